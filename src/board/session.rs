use tracing::debug;

use crate::entity::NoteId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Drag,
    Resize,
}

/// Board-wide pointer tracking for one drag or resize.
///
/// Holding a session is what "listening to the whole surface" means: while it
/// exists, pointer-move and pointer-up go to its widget and nowhere else. It is
/// acquired when the interaction begins and dropped when it ends, so at most
/// one exists per board and nothing is left attached afterwards.
#[derive(Debug)]
pub struct InteractionSession {
    note_id: NoteId,
    kind: SessionKind,
}

impl InteractionSession {
    pub(crate) fn acquire(note_id: NoteId, kind: SessionKind) -> Self {
        debug!(id = %note_id, ?kind, "pointer tracking attached");
        Self { note_id, kind }
    }

    pub fn note_id(&self) -> &NoteId {
        &self.note_id
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }
}

impl Drop for InteractionSession {
    fn drop(&mut self) {
        debug!(id = %self.note_id, kind = ?self.kind, "pointer tracking detached");
    }
}
