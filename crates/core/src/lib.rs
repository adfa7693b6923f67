pub mod binder;
pub mod config;
pub mod menu;

pub use binder::{PositionBinder, RectProvider};
pub use config::{ConfigError, FullPageOptions, MenuConfig, MenuItem, parse_menu_config};
pub use menu::{MenuError, MenuState};
