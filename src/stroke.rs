use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use crate::color;

/// One recorded pointer sample of a pen-down stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub pos: Pos2,
    /// Line width of the segment ending at this point
    pub size: f32,
    /// Brush color at capture time (ignored for eraser points)
    pub color: Color32,
    pub is_eraser: bool,
}

impl StrokePoint {
    pub fn new(pos: Pos2, size: f32, color: Color32, is_eraser: bool) -> Self {
        Self {
            pos,
            size,
            color,
            is_eraser,
        }
    }

    /// The color this point paints with against the given background.
    /// Eraser points always take the background that is current when they are drawn.
    pub fn ink(&self, background: Color32) -> Color32 {
        if self.is_eraser { background } else { self.color }
    }
}

/// An entry in the stroke log: a point, or a pen-up separator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeEntry {
    Point(StrokePoint),
    Gap,
}

impl StrokeEntry {
    pub fn as_point(&self) -> Option<&StrokePoint> {
        match self {
            Self::Point(point) => Some(point),
            Self::Gap => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap)
    }
}

impl From<StrokePoint> for StrokeEntry {
    fn from(point: StrokePoint) -> Self {
        Self::Point(point)
    }
}

/// Stored form of a point: `{"x", "y", "size", "color", "erase"}`.
/// Gaps are stored as `null`.
#[derive(Debug, Serialize)]
pub(crate) struct StoredPoint {
    x: f32,
    y: f32,
    size: f32,
    #[serde(with = "color::hex")]
    color: Color32,
    erase: bool,
}

impl From<&StrokePoint> for StoredPoint {
    fn from(point: &StrokePoint) -> Self {
        Self {
            x: point.pos.x,
            y: point.pos.y,
            size: point.size,
            color: point.color,
            erase: point.is_eraser,
        }
    }
}

/// Sizes written by a range input arrive as strings ("23"), newer saves as numbers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawSize {
    Number(f32),
    Text(String),
}

/// Loosely typed stored entry, validated by [`RawEntry::into_entry`]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawEntry {
    x: Option<f32>,
    y: Option<f32>,
    size: Option<RawSize>,
    color: Option<String>,
    erase: Option<bool>,
}

impl RawEntry {
    /// Validate a stored entry. An object without coordinates is a gap.
    pub(crate) fn into_entry(self) -> Result<StrokeEntry, String> {
        let (x, y) = match (self.x, self.y) {
            (None, None) => return Ok(StrokeEntry::Gap),
            (Some(x), Some(y)) => (x, y),
            _ => return Err("only one coordinate present".to_owned()),
        };
        if !x.is_finite() || !y.is_finite() {
            return Err(format!("non-finite coordinates ({x}, {y})"));
        }

        let size = match self.size {
            Some(RawSize::Number(size)) => size,
            Some(RawSize::Text(text)) => text
                .trim()
                .parse::<f32>()
                .map_err(|_| format!("size {text:?} is not a number"))?,
            None => return Err("missing size".to_owned()),
        };
        if !(size.is_finite() && size > 0.0) {
            return Err(format!("size must be positive, got {size}"));
        }

        let color = self.color.ok_or_else(|| "missing color".to_owned())?;
        let color = color::parse_hex(&color).map_err(|err| err.to_string())?;
        let is_eraser = self.erase.unwrap_or(false);

        Ok(StrokeEntry::Point(StrokePoint::new(Pos2::new(x, y), size, color, is_eraser)))
    }
}
