pub mod transform;
pub mod types;

pub use transform::{Translate3d, Translation};
pub use types::{Point, Rect};
