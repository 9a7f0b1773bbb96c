//! Board controller.
//!
//! The board owns the note collection, the stacking counter and the single
//! interaction session. All structural changes go through its methods, and
//! every change to the collection is followed by a full save through the
//! persistence gateway.

mod session;

pub use session::{InteractionSession, SessionKind};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::entity::{Color, Note, NoteId, Point, Size, DEFAULT_NOTE_SIZE, MAX_Z_INDEX};
use crate::error::{CorkboardError, Result};
use crate::storage::{PersistenceGateway, NOTES_KEY};
use crate::widget::{InteractionState, Intent, Widget, Zone};

/// What an input event landed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// Empty board background.
    Background,
    /// A zone of an existing note.
    Note { id: NoteId, zone: Zone },
}

impl Target {
    pub fn note(id: &NoteId, zone: Zone) -> Self {
        Target::Note {
            id: id.clone(),
            zone,
        }
    }
}

/// Input delivered to the board by the host surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    DoubleClick { target: Target, at: Point },
    PointerDown { target: Target, at: Point },
    PointerMove { at: Point },
    PointerUp,
    Click { target: Target },
}

/// Observable result of handling an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Created { id: NoteId, z_index: i64 },
    Deleted { id: NoteId },
    BroughtToFront { id: NoteId, z_index: i64 },
    Recolored { id: NoteId, color: Color },
    Moved { id: NoteId, position: Point },
    Resized { id: NoteId, size: Size },
    InteractionEnded { id: NoteId },
}

pub struct Board {
    notes: Vec<Note>,
    widgets: HashMap<NoteId, Widget>,
    highest_z_index: i64,
    default_size: Size,
    session: Option<InteractionSession>,
    gateway: PersistenceGateway,
    key: String,
}

impl Board {
    /// Build the board from whatever the gateway holds under `key`.
    ///
    /// Missing or malformed data gives an empty board. The stacking counter
    /// starts at the highest stored z-index. If any stored z-index lies
    /// outside `0..=MAX_Z_INDEX` the whole stack is renumbered `1..=n` in its
    /// existing order.
    pub fn hydrate(gateway: PersistenceGateway, key: impl Into<String>) -> Self {
        let key = key.into();
        let stored: Vec<Note> = gateway.get(&key).unwrap_or_default();

        let mut notes: Vec<Note> = Vec::with_capacity(stored.len());
        for note in stored {
            if notes.iter().any(|n| n.id == note.id) {
                warn!(id = %note.id, "duplicate note id in store, keeping the first");
                continue;
            }
            notes.push(note);
        }

        if notes.iter().any(|n| !(0..=MAX_Z_INDEX).contains(&n.z_index)) {
            warn!("stored z-index out of range, renumbering the stack");
            renumber_stack(&mut notes);
        }

        let highest_z_index = notes.iter().map(|n| n.z_index).max().unwrap_or(0).max(0);
        let widgets = notes
            .iter()
            .map(|n| (n.id.clone(), Widget::from_note(n)))
            .collect();

        info!(count = notes.len(), highest_z_index, key = %key, "board hydrated");

        Self {
            notes,
            widgets,
            highest_z_index,
            default_size: Size::new(DEFAULT_NOTE_SIZE, DEFAULT_NOTE_SIZE),
            session: None,
            gateway,
            key,
        }
    }

    /// Empty board backed by memory only.
    pub fn ephemeral() -> Self {
        Self::hydrate(PersistenceGateway::ephemeral(), NOTES_KEY)
    }

    pub fn with_default_size(mut self, size: Size) -> Self {
        self.default_size = size;
        self
    }

    pub fn set_default_size(&mut self, size: Size) {
        self.default_size = size;
    }

    pub fn default_size(&self) -> Size {
        self.default_size
    }

    pub fn highest_z_index(&self) -> i64 {
        self.highest_z_index
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn gateway(&self) -> &PersistenceGateway {
        &self.gateway
    }

    /// Notes in insertion order, with live widget state applied.
    pub fn notes(&self) -> Vec<Note> {
        self.notes.iter().map(|n| self.reconciled(n)).collect()
    }

    pub fn note(&self, id: &NoteId) -> Option<Note> {
        self.notes
            .iter()
            .find(|n| &n.id == id)
            .map(|n| self.reconciled(n))
    }

    pub fn widget(&self, id: &NoteId) -> Option<&Widget> {
        self.widgets.get(id)
    }

    /// Notes bottom to top. Equal z-indexes keep insertion order.
    pub fn stacking_order(&self) -> Vec<Note> {
        let mut notes = self.notes();
        notes.sort_by_key(|n| n.z_index);
        notes
    }

    /// The drag or resize currently tracking the pointer, if any.
    pub fn active_session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    /// Resolve a full id or a unique id prefix.
    pub fn resolve_id(&self, query: &str) -> Result<NoteId> {
        if let Some(note) = self.notes.iter().find(|n| n.id.as_str() == query) {
            return Ok(note.id.clone());
        }

        let mut matches = self
            .notes
            .iter()
            .filter(|n| !query.is_empty() && n.id.as_str().starts_with(query));
        match (matches.next(), matches.next()) {
            (Some(note), None) => Ok(note.id.clone()),
            (Some(_), Some(_)) => Err(CorkboardError::AmbiguousId(query.to_string())),
            (None, _) => Err(CorkboardError::NoteNotFound(query.to_string())),
        }
    }

    /// Add a note at `at` with the given size on top of the stack.
    pub fn create_note(&mut self, at: Point, size: Size) -> Result<NoteId> {
        self.highest_z_index = self.next_z_index()?;
        let note = Note::new(at, size, self.highest_z_index);
        let id = note.id.clone();

        self.widgets.insert(id.clone(), Widget::from_note(&note));
        self.notes.push(note);
        info!(id = %id, z_index = self.highest_z_index, "note created");

        self.save()?;
        Ok(id)
    }

    /// Remove a note. Unknown ids are ignored.
    ///
    /// Returns whether anything was removed.
    pub fn delete_note(&mut self, id: &NoteId) -> Result<bool> {
        let Some(index) = self.notes.iter().position(|n| &n.id == id) else {
            debug!(id = %id, "delete ignored, no such note");
            return Ok(false);
        };

        self.notes.remove(index);
        self.widgets.remove(id);
        if self.session.as_ref().is_some_and(|s| s.note_id() == id) {
            self.session = None;
        }
        info!(id = %id, "note deleted");

        self.save()?;
        Ok(true)
    }

    /// Raise a note above every other one.
    ///
    /// The counter is bumped and the note takes the bumped value in the same
    /// step. Unknown ids leave the counter alone and return `None`.
    pub fn bring_to_front(&mut self, id: &NoteId) -> Result<Option<i64>> {
        let Some(index) = self.notes.iter().position(|n| &n.id == id) else {
            debug!(id = %id, "front-bring ignored, no such note");
            return Ok(None);
        };

        let z_index = self.next_z_index()?;
        self.highest_z_index = z_index;
        self.notes[index].z_index = z_index;
        debug!(id = %id, z_index, "brought to front");

        self.save()?;
        Ok(Some(z_index))
    }

    fn next_z_index(&self) -> Result<i64> {
        self.highest_z_index
            .checked_add(1)
            .filter(|z| *z <= MAX_Z_INDEX)
            .ok_or(CorkboardError::StackingExhausted(self.highest_z_index))
    }

    /// Change a note's color. Stacking order is untouched.
    pub fn recolor(&mut self, id: &NoteId, color: Color) -> Result<bool> {
        let Some(widget) = self.widgets.get_mut(id) else {
            return Ok(false);
        };
        widget.recolor(color);
        self.save()?;
        Ok(true)
    }

    /// Dispatch one input event.
    pub fn handle(&mut self, event: BoardEvent) -> Result<Vec<Action>> {
        let mut actions = Vec::new();

        match event {
            BoardEvent::DoubleClick {
                target: Target::Background,
                at,
            } => {
                let size = self.default_size;
                let id = self.create_note(at, size)?;
                actions.push(Action::Created {
                    id,
                    z_index: self.highest_z_index,
                });
            }
            BoardEvent::PointerDown {
                target: Target::Note { id, zone },
                at,
            } => self.pointer_down(&id, zone, at, &mut actions)?,
            BoardEvent::PointerMove { at } => {
                if let Some(action) = self.pointer_move(at) {
                    actions.push(action);
                }
            }
            BoardEvent::PointerUp => {
                if let Some(action) = self.end_interaction()? {
                    actions.push(action);
                }
            }
            BoardEvent::Click {
                target: Target::Note { id, zone },
            } => self.click(&id, zone, &mut actions)?,
            BoardEvent::DoubleClick { .. }
            | BoardEvent::PointerDown { .. }
            | BoardEvent::Click { .. } => {}
        }

        Ok(actions)
    }

    /// Write the whole collection, with live widget state folded in.
    pub fn save(&mut self) -> Result<()> {
        for note in &mut self.notes {
            if let Some(widget) = self.widgets.get(&note.id) {
                widget.apply_to(note);
            }
        }
        self.gateway.save(&self.key, &self.notes)
    }

    fn reconciled(&self, note: &Note) -> Note {
        let mut note = note.clone();
        if let Some(widget) = self.widgets.get(&note.id) {
            widget.apply_to(&mut note);
        }
        note
    }

    fn pointer_down(
        &mut self,
        id: &NoteId,
        zone: Zone,
        at: Point,
        actions: &mut Vec<Action>,
    ) -> Result<()> {
        if !self.widgets.contains_key(id) {
            debug!(id = %id, "pointer-down on unknown note");
            return Ok(());
        }

        // A press that starts a new interaction while one is still held means
        // the previous release was missed.
        if matches!(zone, Zone::Header | Zone::ResizeHandle) {
            if let Some(action) = self.end_interaction()? {
                actions.push(action);
            }
        }

        let Some(widget) = self.widgets.get_mut(id) else {
            return Ok(());
        };
        let intent = widget.pointer_down(zone, at);
        let kind = match widget.state() {
            InteractionState::Dragging { .. } => Some(SessionKind::Drag),
            InteractionState::Resizing => Some(SessionKind::Resize),
            InteractionState::Idle => None,
        };
        if let Some(kind) = kind {
            self.session = Some(InteractionSession::acquire(id.clone(), kind));
        }

        self.execute(id, intent, actions)
    }

    fn pointer_move(&mut self, at: Point) -> Option<Action> {
        let session = self.session.as_ref()?;
        let id = session.note_id().clone();
        let kind = session.kind();

        let Some(widget) = self.widgets.get_mut(&id) else {
            self.session = None;
            return None;
        };
        if !widget.pointer_move(at) {
            return None;
        }

        Some(match kind {
            SessionKind::Drag => Action::Moved {
                id,
                position: widget.position(),
            },
            SessionKind::Resize => Action::Resized {
                id,
                size: widget.size(),
            },
        })
    }

    fn end_interaction(&mut self) -> Result<Option<Action>> {
        let Some(session) = self.session.take() else {
            return Ok(None);
        };
        let id = session.note_id().clone();
        drop(session);

        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.release();
        }
        self.save()?;
        Ok(Some(Action::InteractionEnded { id }))
    }

    fn click(&mut self, id: &NoteId, zone: Zone, actions: &mut Vec<Action>) -> Result<()> {
        let Some(widget) = self.widgets.get_mut(id) else {
            return Ok(());
        };

        match widget.click(zone) {
            Some(intent) => self.execute(id, intent, actions)?,
            None => {
                if let Zone::Swatch(color) = zone {
                    self.save()?;
                    actions.push(Action::Recolored {
                        id: id.clone(),
                        color,
                    });
                }
            }
        }
        Ok(())
    }

    fn execute(&mut self, id: &NoteId, intent: Intent, actions: &mut Vec<Action>) -> Result<()> {
        match intent {
            Intent::BringToFront => {
                if let Some(z_index) = self.bring_to_front(id)? {
                    actions.push(Action::BroughtToFront {
                        id: id.clone(),
                        z_index,
                    });
                }
            }
            Intent::Delete => {
                if self.delete_note(id)? {
                    actions.push(Action::Deleted { id: id.clone() });
                }
            }
        }
        Ok(())
    }
}

/// Reassign z-indexes `1..=n` keeping the current bottom-to-top order.
fn renumber_stack(notes: &mut [Note]) {
    let mut order: Vec<usize> = (0..notes.len()).collect();
    order.sort_by_key(|&i| notes[i].z_index);
    for (rank, i) in order.into_iter().enumerate() {
        notes[i].z_index = rank as i64 + 1;
    }
}
