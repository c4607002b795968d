//! Pointer state machine of the canvas.
//!
//! # State Transitions
//!
//! ```text
//!            pointer down             pointer move
//! ┌──────┐ ───────────────► ┌───────────┐ ◄──────┐
//! │ Idle │                  │ Stroking  │ ───────┘ draw + log point
//! └──────┘ ◄─────────────── └───────────┘
//!   ▲  │       pointer up
//!   └──┘ pointer move: log gap
//! ```
use eframe::egui::Pos2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawState {
    /// Pointer is up
    #[default]
    Idle,
    /// Pointer is down; `last` is where the previous segment ended
    Stroking { last: Pos2, segments: usize },
}

impl DrawState {
    pub fn begin(&mut self, at: Pos2) {
        *self = Self::Stroking { last: at, segments: 0 };
    }

    /// Move the stroke head to `to`, returning where the new segment starts.
    /// `None` while idle.
    pub fn advance(&mut self, to: Pos2) -> Option<Pos2> {
        match self {
            Self::Stroking { last, segments } => {
                let from = *last;
                *last = to;
                *segments += 1;
                Some(from)
            }
            Self::Idle => None,
        }
    }

    /// Return to idle, yielding the number of segments the finished stroke had
    pub fn end(&mut self) -> Option<usize> {
        match std::mem::take(self) {
            Self::Stroking { segments, .. } => Some(segments),
            Self::Idle => None,
        }
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self, Self::Stroking { .. })
    }
}
