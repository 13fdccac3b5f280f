use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GradientError;

/// Two channels closer than one 8-bit quantization step compare equal.
pub const EPSILON: f64 = 0.5 / 255.0;

/// An RGBA color with fractional channels, always stored within [0, 1].
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

pub const BLACK: Color = Color::const_rgba(0.0, 0.0, 0.0, 1.0);
pub const WHITE: Color = Color::const_rgba(1.0, 1.0, 1.0, 1.0);
pub const RED: Color = Color::const_rgba(1.0, 0.0, 0.0, 1.0);
pub const GREEN: Color = Color::const_rgba(0.0, 1.0, 0.0, 1.0);
pub const BLUE: Color = Color::const_rgba(0.0, 0.0, 1.0, 1.0);
pub const TRANSPARENT: Color = Color::const_rgba(0.0, 0.0, 0.0, 0.0);

fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn to_u8(value: f64) -> u8 {
    (saturate(value) * 255.0).round() as u8
}

impl Color {
    const fn const_rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Produces a color from fractional channels. Values outside [0, 1] are
    /// clamped, NaN becomes 0.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: saturate(r),
            g: saturate(g),
            b: saturate(b),
            a: saturate(a),
        }
    }

    /// Opaque color from fractional channels.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Produces a color from 8-bit channels, 255 mapping to 1.0.
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            a as f64 / 255.0,
        )
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    pub fn red(&self) -> f64 {
        self.r
    }

    pub fn green(&self) -> f64 {
        self.g
    }

    pub fn blue(&self) -> f64 {
        self.b
    }

    pub fn alpha(&self) -> f64 {
        self.a
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`. The hash is optional.
    pub fn from_hex_str(code: &str) -> Result<Self, GradientError> {
        let invalid = || GradientError::InvalidColor(code.to_string());
        let digits = code.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let x = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        let [r, g, b, a] = match digits.len() {
            3 => [
                ((x & 0xF00) >> 8) * 0x11,
                ((x & 0x0F0) >> 4) * 0x11,
                (x & 0x00F) * 0x11,
                0xFF,
            ],
            6 => [(x >> 16) & 0xFF, (x >> 8) & 0xFF, x & 0xFF, 0xFF],
            8 => [(x >> 24) & 0xFF, (x >> 16) & 0xFF, (x >> 8) & 0xFF, x & 0xFF],
            _ => return Err(invalid()),
        };
        Ok(Self::rgba8(r as u8, g as u8, b as u8, a as u8))
    }

    /// Per-channel `self - other`, saturated at 0.
    pub fn channelwise_subtract(&self, other: &Self) -> Self {
        Self::new(
            (self.r - other.r).max(0.0),
            (self.g - other.g).max(0.0),
            (self.b - other.b).max(0.0),
            (self.a - other.a).max(0.0),
        )
    }

    /// Per-channel `self + other`, clamped to [0, 1].
    pub fn channelwise_add(&self, other: &Self) -> Self {
        Self::new(
            self.r + other.r,
            self.g + other.g,
            self.b + other.b,
            self.a + other.a,
        )
    }

    /// Multiplies every channel by `factor`, clamped to [0, 1]. A negative or
    /// NaN factor yields a zero color.
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(
            self.r * factor,
            self.g * factor,
            self.b * factor,
            self.a * factor,
        )
    }

    /// Linear interpolation between self and `other`. `d = 0.0` gives self,
    /// `d = 1.0` gives `other`.
    pub fn lerp(&self, other: &Self, d: f64) -> Self {
        self.scale(1.0 - d).channelwise_add(&other.scale(d))
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        (self.r - other.r).abs() < EPSILON
            && (self.g - other.g).abs() < EPSILON
            && (self.b - other.b).abs() < EPSILON
            && (self.a - other.a).abs() < EPSILON
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

impl TryFrom<String> for Color {
    type Error = GradientError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::from_hex_str(&code)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_are_clamped_on_construction() {
        let c = Color::new(1.5, -0.2, f64::NAN, 0.5);
        assert_eq!(c.red(), 1.0);
        assert_eq!(c.green(), 0.0);
        assert_eq!(c.blue(), 0.0);
        assert_eq!(c.alpha(), 0.5);
    }

    #[test]
    fn equality_tolerates_one_quantization_step() {
        let c = Color::rgb(0.5, 0.5, 0.5);
        assert_eq!(c, Color::rgb(0.5 + 0.4 / 255.0, 0.5, 0.5));
        assert_ne!(c, Color::rgb(0.5 + 0.6 / 255.0, 0.5, 0.5));
        assert_ne!(RED, Color::new(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn arithmetic_saturates() {
        assert_eq!(RED.channelwise_subtract(&WHITE), TRANSPARENT);
        assert_eq!(WHITE.channelwise_subtract(&RED), Color::new(0.0, 1.0, 1.0, 0.0));
        assert_eq!(RED.channelwise_add(&WHITE), WHITE);
        assert_eq!(WHITE.scale(2.0), WHITE);
        assert_eq!(WHITE.scale(-1.0), TRANSPARENT);
        assert_eq!(WHITE.scale(f64::NAN), TRANSPARENT);
        assert_eq!(WHITE.scale(0.5), Color::new(0.5, 0.5, 0.5, 0.5));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(RED.lerp(&BLUE, 0.0), RED);
        assert_eq!(RED.lerp(&BLUE, 1.0), BLUE);
        assert_eq!(RED.lerp(&BLUE, 0.5), Color::rgb(0.5, 0.0, 0.5));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Color::from_hex_str("#ff0000").unwrap(), RED);
        assert_eq!(Color::from_hex_str("00f").unwrap(), BLUE);
        assert_eq!(
            Color::from_hex_str("#00ff0080").unwrap(),
            Color::rgba8(0, 255, 0, 128)
        );
        assert!(Color::from_hex_str("#12345").is_err());
        assert!(Color::from_hex_str("#gg0000").is_err());
        assert!(Color::from_hex_str("+f0000").is_err());
        assert!(Color::from_hex_str("").is_err());
    }

    #[test]
    fn display_is_hex_with_alpha() {
        assert_eq!(RED.to_string(), "#ff0000ff");
        assert_eq!(Color::rgba8(200, 210, 210, 255).to_string(), "#c8d2d2ff");
    }

    #[test]
    fn rgba8_conversion() {
        assert_eq!(Color::rgba8(200, 174, 0, 255).to_rgba8(), [200, 174, 0, 255]);
        assert_eq!(Color::rgb(0.5, 0.0, 1.0).to_rgba8(), [128, 0, 255, 255]);
    }
}
