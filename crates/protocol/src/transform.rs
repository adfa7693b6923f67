use std::fmt;

use serde::{Deserialize, Serialize};

/// An accumulated 2D offset in screen units (CSS pixels for the DOM,
/// cells for the terminal).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

impl Translation {
    pub const ZERO: Translation = Translation { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A renderable `translate3D(x, y, 0)` transform.
///
/// Built only from a [`Translation`]; `Display` yields the CSS property
/// value, e.g. `translate3D(-150px,-250px,0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Translate3d {
    pub x: f64,
    pub y: f64,
}

impl Translate3d {
    /// The CSS property value as an owned string.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl From<Translation> for Translate3d {
    fn from(t: Translation) -> Self {
        Self { x: t.x, y: t.y }
    }
}

impl fmt::Display for Translate3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate3D({}px,{}px,0)", Px(self.x), Px(self.y))
    }
}

/// Shortest float formatting with `-0` folded into `0`.
struct Px(f64);

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            f.write_str("0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
