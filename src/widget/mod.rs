//! Sticky-note widget controller.
//!
//! A widget owns the live geometry of one note and the drag/resize state
//! machine that edits it. Anything that touches the board as a whole (stacking
//! order, deletion) is returned to the caller as an [`Intent`] instead of being
//! done here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::{Color, Note, NoteId, Point, Size};

/// Resizing never takes a note below this width or height.
pub const MIN_NOTE_SIZE: f64 = 150.0;

/// Named interaction regions of a widget.
///
/// The host wires each region to its own listener; the engine never guesses
/// the region from whatever element happened to be under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Title bar, starts a drag.
    Header,
    /// Text area and everything else inside the note.
    Body,
    /// Bottom-right corner, starts a resize.
    ResizeHandle,
    /// The close button.
    DeleteControl,
    /// One palette swatch.
    Swatch(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// `offset` is the pointer position minus the note's top-left at grab time.
    Dragging { offset: Point },
    Resizing,
}

/// Board-level request raised by a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    BringToFront,
    Delete,
}

/// Live state of a single note.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    id: NoteId,
    position: Point,
    size: Size,
    color: Color,
    state: InteractionState,
}

impl Widget {
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            position: note.position(),
            size: note.size(),
            color: note.color(),
            state: InteractionState::Idle,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != InteractionState::Idle
    }

    /// Pointer pressed inside the widget.
    ///
    /// Every press raises exactly one front-bring request, whatever the zone.
    /// The header additionally starts a drag and the resize handle a resize.
    pub fn pointer_down(&mut self, zone: Zone, pointer: Point) -> Intent {
        match zone {
            Zone::Header => self.start_drag(pointer),
            Zone::ResizeHandle => self.start_resize(),
            Zone::Body | Zone::DeleteControl | Zone::Swatch(_) => self.request_front(),
        }
    }

    pub fn start_drag(&mut self, pointer: Point) -> Intent {
        let offset = pointer - self.position;
        debug!(id = %self.id, ?offset, "drag started");
        self.state = InteractionState::Dragging { offset };
        Intent::BringToFront
    }

    pub fn start_resize(&mut self) -> Intent {
        debug!(id = %self.id, "resize started");
        self.state = InteractionState::Resizing;
        Intent::BringToFront
    }

    pub fn request_front(&self) -> Intent {
        Intent::BringToFront
    }

    /// Track the pointer while dragging or resizing.
    ///
    /// Returns `true` when geometry changed. Drags are unclamped; resizes are
    /// measured from the logical top-left and floored at [`MIN_NOTE_SIZE`].
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        match self.state {
            InteractionState::Idle => false,
            InteractionState::Dragging { offset } => {
                self.position = pointer - offset;
                true
            }
            InteractionState::Resizing => {
                let width = pointer.x - self.position.x;
                let height = pointer.y - self.position.y;
                self.size = Size::new(width.max(MIN_NOTE_SIZE), height.max(MIN_NOTE_SIZE));
                true
            }
        }
    }

    /// Pointer released. Returns `true` if an interaction was in progress.
    pub fn release(&mut self) -> bool {
        let was_active = self.is_active();
        if was_active {
            debug!(id = %self.id, state = ?self.state, "interaction ended");
        }
        self.state = InteractionState::Idle;
        was_active
    }

    /// Click (press and release) on a zone.
    pub fn click(&mut self, zone: Zone) -> Option<Intent> {
        match zone {
            Zone::DeleteControl => Some(Intent::Delete),
            Zone::Swatch(color) => {
                self.recolor(color);
                None
            }
            Zone::Header | Zone::Body | Zone::ResizeHandle => None,
        }
    }

    pub fn recolor(&mut self, color: Color) {
        self.color = color;
    }

    /// Copy live geometry and color into the persisted record.
    pub fn apply_to(&self, note: &mut Note) {
        note.x = self.position.x;
        note.y = self.position.y;
        note.width = Some(self.size.width);
        note.height = Some(self.size.height);
        note.color = Some(self.color);
    }
}
