use egui::Color32;
use thiserror::Error;

/// Errors produced when reading a `#rrggbb` color string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("expected 6 hex digits, got {0:?}")]
    InvalidLength(String),
    #[error("invalid hex digit in {0:?}")]
    InvalidDigit(String),
}

/// Parse a color the way an HTML color input reports it (`#rrggbb`).
/// The leading `#` is optional and digits are case-insensitive.
pub fn parse_hex(text: &str) -> Result<Color32, ColorParseError> {
    let digits = text.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(ColorParseError::InvalidLength(text.to_owned()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| ColorParseError::InvalidDigit(text.to_owned()))
    };

    Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format an opaque color as lowercase `#rrggbb`
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// `#[serde(with = "crate::color::hex")]` support for `Color32` fields
pub mod hex {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_hex(&text).map_err(serde::de::Error::custom)
    }
}
