use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An opaque ARGB color handed through to the rendering surface.
///
/// Serialized as `#RRGGBB` when fully opaque and `#AARRGGBB` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const GREEN: Color = Color(0xFF00_FF00);
    pub const RED: Color = Color(0xFFFF_0000);
    pub const DARK_GRAY: Color = Color(0xFF44_4444);
    /// Default fill of the active arc.
    pub const LEAF: Color = Color(0xFF37_B900);

    pub const fn from_argb(argb: u32) -> Self {
        Color(argb)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha() == 0xFF {
            write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            write!(f, "#{:08X}", self.0)
        }
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ValidationError::invalid("color", format!("'{s}' must start with '#'")))?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValidationError::invalid(
                "color",
                format!("'{s}' is not hexadecimal"),
            ));
        }
        let value = u32::from_str_radix(hex, 16)
            .map_err(|_| ValidationError::invalid("color", format!("'{s}' is not hexadecimal")))?;
        match hex.len() {
            6 => Ok(Color(0xFF00_0000 | value)),
            8 => Ok(Color(value)),
            _ => Err(ValidationError::invalid(
                "color",
                format!("'{s}' must be #RRGGBB or #AARRGGBB"),
            )),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
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
    fn parses_opaque_and_translucent_forms() {
        assert_eq!("#37B900".parse::<Color>().unwrap(), Color::LEAF);
        assert_eq!("#8000FF00".parse::<Color>().unwrap().alpha(), 0x80);
    }

    #[test]
    fn display_drops_opaque_alpha() {
        assert_eq!(Color::GREEN.to_string(), "#00FF00");
        assert_eq!(Color::from_argb(0x1200_0000).to_string(), "#12000000");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("00FF00".parse::<Color>().is_err());
        assert!("#00FF0".parse::<Color>().is_err());
        assert!("#GGGGGG".parse::<Color>().is_err());
        assert!("#+FFFFF".parse::<Color>().is_err());
        assert!("#-0000000".parse::<Color>().is_err());
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::RED).unwrap();
        assert_eq!(json, "\"#FF0000\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::RED);
    }
}
