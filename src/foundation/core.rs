use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ComposerError, ComposerResult};

pub use kurbo::{Point, Vec2};

/// Class name of a fresh scene.
pub const DEFAULT_SCENE_NAME: &str = "ComposedScene";
/// Font size the target library uses when no scale directive is present.
pub const DEFAULT_FONT_SIZE: u32 = 48;
/// Smallest font size an object may carry; parsed scale factors are clamped up to it.
pub const MIN_FONT_SIZE: u32 = 8;
/// Default run time of `wait` and `play` calls, in seconds.
pub const DEFAULT_DURATION: f64 = 1.0;
/// Default rate function of `play` calls.
pub const DEFAULT_EASING: &str = "smooth";

/// Canvas pixels per scene unit.
pub const CANVAS_UNITS_PER_SCENE_UNIT: f64 = 100.0;
/// Scene-space distance under which a position counts as the origin.
pub const ORIGIN_EPSILON: f64 = 0.01;
/// Canvas-space distance under which two positions are the same.
pub const POSITION_EPSILON: f64 = 0.5;
/// Seconds under which two durations are the same.
pub const DURATION_EPSILON: f64 = 0.01;
/// Float error absorbed on top of each tolerance.
const TOLERANCE_SLACK: f64 = 1e-9;

/// Canvas (Y down, pixels) to scene coordinates (Y up, scene units).
pub fn canvas_to_scene(p: Point) -> Point {
    Point::new(
        p.x / CANVAS_UNITS_PER_SCENE_UNIT,
        -p.y / CANVAS_UNITS_PER_SCENE_UNIT,
    )
}

/// Scene coordinates back to canvas space.
pub fn scene_to_canvas(p: Point) -> Point {
    Point::new(
        p.x * CANVAS_UNITS_PER_SCENE_UNIT,
        -p.y * CANVAS_UNITS_PER_SCENE_UNIT,
    )
}

/// `true` when both axes are within [`POSITION_EPSILON`] canvas units.
///
/// Generated coordinates are rounded to two decimals in scene units, so a round trip can land
/// exactly on the tolerance; the bound is inclusive up to float error.
pub fn positions_match(a: Point, b: Point) -> bool {
    let limit = POSITION_EPSILON + TOLERANCE_SLACK;
    (a.x - b.x).abs() <= limit && (a.y - b.y).abs() <= limit
}

/// `true` when two durations are within [`DURATION_EPSILON`] seconds.
pub fn durations_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= DURATION_EPSILON + TOLERANCE_SLACK
}

/// Opaque sRGB color written as `#RRGGBB` in generated code.
///
/// Equality is on the channel values, so `#ff0000` and `#FF0000` are the same color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional, case-insensitive).
    pub fn parse(s: &str) -> ComposerResult<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ComposerError::validation(format!(
                "hex color must be #RRGGBB, got \"{s}\""
            )));
        }

        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| {
                ComposerError::validation(format!("invalid hex color \"{s}\""))
            })
        };
        Ok(Self::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?))
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ComposerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ComposerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
