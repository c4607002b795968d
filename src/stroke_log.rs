use egui::{Color32, Pos2};
use thiserror::Error;

use crate::stroke::{RawEntry, StoredPoint, StrokeEntry, StrokePoint};
use crate::surface::Surface;

/// Errors produced when reading a stored stroke log
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("stored stroke log is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid stroke log entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

/// A drawable step of the replay: the segment ending at `to`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    pub from: Pos2,
    pub to: &'a StrokePoint,
}

/// Ordered record of everything drawn on the canvas.
///
/// The surface is a cache of this log: replaying it onto a freshly filled
/// surface reproduces the drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeLog {
    entries: Vec<StrokeEntry>,
}

impl StrokeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<StrokeEntry>) -> Self {
        Self { entries }
    }

    pub fn append(&mut self, entry: impl Into<StrokeEntry>) {
        self.entries.push(entry.into());
    }

    /// Mark a pen-up. Consecutive gaps and a leading gap carry no information,
    /// so one is only recorded right after a point.
    pub fn push_gap(&mut self) -> bool {
        match self.entries.last() {
            Some(StrokeEntry::Point(_)) => {
                self.entries.push(StrokeEntry::Gap);
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StrokeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &StrokeEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&StrokeEntry> {
        self.entries.last()
    }

    /// Number of recorded points, gaps excluded
    pub fn point_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.is_gap()).count()
    }

    /// Consecutive point pairs. The first point of a stroke has no predecessor
    /// and so never ends a segment; a gap on either side breaks the pair.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.entries.windows(2).filter_map(|pair| match pair {
            [StrokeEntry::Point(prev), StrokeEntry::Point(cur)] => Some(Segment {
                from: prev.pos,
                to: cur,
            }),
            _ => None,
        })
    }

    /// Draw every segment onto `surface`. Does not fill the background first.
    pub fn replay(&self, surface: &mut Surface, background: Color32) {
        let mut drawn = 0usize;
        for segment in self.segments() {
            surface.draw_segment(segment.from, segment.to.pos, segment.to.size, segment.to.ink(background));
            drawn += 1;
        }
        log::debug!("Replayed {} segments from {} log entries", drawn, self.entries.len());
    }

    /// Stored form: a JSON array of point objects and `null` gaps
    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        let stored: Vec<Option<StoredPoint>> = self
            .entries
            .iter()
            .map(|entry| entry.as_point().map(StoredPoint::from))
            .collect();
        serde_json::to_string(&stored)
    }

    pub fn deserialize(blob: &str) -> Result<Self, ParseError> {
        let raw: Vec<Option<RawEntry>> = serde_json::from_str(blob)?;
        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                None => Ok(StrokeEntry::Gap),
                Some(entry) => entry
                    .into_entry()
                    .map_err(|reason| ParseError::InvalidEntry { index, reason }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Replace the whole log with the parsed `blob`. On error the log is unchanged.
    pub fn replace_with(&mut self, blob: &str) -> Result<(), ParseError> {
        *self = Self::deserialize(blob)?;
        Ok(())
    }
}
