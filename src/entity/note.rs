// src/entity/note.rs
use serde::{Deserialize, Serialize};

use super::{Color, NoteId, Point, Size};

/// Width and height used when a stored note carries no size.
pub const DEFAULT_NOTE_SIZE: f64 = 240.0;

/// Largest z-index a note may carry, the ceiling browsers apply to `z-index`.
pub const MAX_Z_INDEX: i64 = i32::MAX as i64;

/// A note as it is persisted on the board.
///
/// Field names follow the stored layout (`initialX`, `initWidth`, ...) so that
/// boards written by earlier versions hydrate unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(rename = "initialX")]
    pub x: f64,
    #[serde(rename = "initialY")]
    pub y: f64,
    #[serde(rename = "zIndex")]
    pub z_index: i64,
    #[serde(rename = "initWidth", default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(rename = "initHeight", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Note {
    pub fn new(position: Point, size: Size, z_index: i64) -> Self {
        Self {
            id: NoteId::generate(),
            x: position.x,
            y: position.y,
            z_index,
            width: Some(size.width),
            height: Some(size.height),
            color: None,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(
            self.width.unwrap_or(DEFAULT_NOTE_SIZE),
            self.height.unwrap_or(DEFAULT_NOTE_SIZE),
        )
    }

    pub fn color(&self) -> Color {
        self.color.unwrap_or_default()
    }
}
