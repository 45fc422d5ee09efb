//! In-memory notes store for the dashboard notes widget
//!
//! [`NotesStore`] is an ordered collection mutated only through
//! [`NoteAction`]s. Each action is a synchronous transformation of the prior
//! collection; [`NotesStore::reduce`] exposes it as a pure function and
//! [`NotesStore::dispatch`] applies it in place.
//!
//! [`NotesController`] owns one store together with the transient "which note
//! is being edited" state of the dashboard form, so every mutation path goes
//! through one object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Note identifier: the creation timestamp in milliseconds
pub type NoteId = i64;

/// A title/description record held in memory for one admin session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier within the collection
    pub id: NoteId,
    /// Title
    pub title: String,
    /// Body text
    pub description: String,
}

impl Note {
    /// Create a note
    pub fn new(id: NoteId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// The three mutations a [`NotesStore`] accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteAction {
    /// Append a fully formed note
    Add(Note),
    /// Replace title and description of the note with this id
    Update {
        /// Target note
        id: NoteId,
        /// New title
        title: String,
        /// New description
        description: String,
    },
    /// Remove the note with this id
    Delete(NoteId),
}

/// Whether an action changed the collection
///
/// Unknown ids and duplicate adds are not errors; they leave the collection
/// as it was and report [`ActionOutcome::Unchanged`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The collection changed
    Applied,
    /// The collection is exactly as before
    Unchanged,
}

impl ActionOutcome {
    /// Whether the collection changed
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Ordered collection of notes with unique ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesStore {
    notes: Vec<Note>,
}

impl NotesStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self { notes: Vec::new() }
    }

    /// Notes in display order
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Number of notes
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the store holds no notes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Look up a note by id
    #[must_use]
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Whether a note with this id exists
    #[must_use]
    pub fn contains(&self, id: NoteId) -> bool {
        self.get(id).is_some()
    }

    /// Apply an action and return the resulting collection
    #[must_use]
    pub fn reduce(mut self, action: NoteAction) -> Self {
        self.dispatch(action);
        self
    }

    /// Apply an action in place
    pub fn dispatch(&mut self, action: NoteAction) -> ActionOutcome {
        match action {
            NoteAction::Add(note) => self.add(note),
            NoteAction::Update {
                id,
                title,
                description,
            } => self.update(id, title, description),
            NoteAction::Delete(id) => self.delete(id),
        }
    }

    /// Append a note to the end of the collection
    ///
    /// A note whose id is already present is ignored so ids stay unique.
    pub fn add(&mut self, note: Note) -> ActionOutcome {
        if self.contains(note.id) {
            debug!(note_id = note.id, "ignoring add with duplicate note id");
            return ActionOutcome::Unchanged;
        }

        self.notes.push(note);
        ActionOutcome::Applied
    }

    /// Replace title and description of a note, keeping its id and position
    pub fn update(
        &mut self,
        id: NoteId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> ActionOutcome {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            debug!(note_id = id, "update for unknown note id");
            return ActionOutcome::Unchanged;
        };

        note.title = title.into();
        note.description = description.into();
        ActionOutcome::Applied
    }

    /// Remove the note with this id
    pub fn delete(&mut self, id: NoteId) -> ActionOutcome {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);

        if self.notes.len() == before {
            debug!(note_id = id, "delete for unknown note id");
            ActionOutcome::Unchanged
        } else {
            ActionOutcome::Applied
        }
    }
}

/// Contents of the dashboard note form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    /// Title field
    #[serde(default)]
    pub title: String,
    /// Description field
    #[serde(default)]
    pub description: String,
}

impl NoteDraft {
    /// Create a draft
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Copy with surrounding whitespace removed from both fields
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self::new(self.title.trim(), self.description.trim())
    }

    /// Whether both fields are empty after trimming
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.description.trim().is_empty()
    }
}

/// Issues creation-timestamp ids that never repeat within one session
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteIdGenerator {
    last: Option<NoteId>,
}

impl NoteIdGenerator {
    /// Next id: `now` in milliseconds, bumped past the previous id if needed
    pub fn next_id(&mut self, now: DateTime<Utc>) -> NoteId {
        let candidate = now.timestamp_millis();
        let id = match self.last {
            Some(last) if candidate <= last => last.saturating_add(1),
            _ => candidate,
        };
        self.last = Some(id);
        id
    }
}

/// Result of submitting the note form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new note was appended
    Added(NoteId),
    /// The edited note was updated
    Updated(NoteId),
    /// The edited note no longer exists; nothing changed
    Unchanged,
    /// Title and description were both blank; nothing changed
    Rejected,
}

/// Notes store plus the dashboard form's editing state
///
/// Editing state moves `None -> Some(id) -> None`: `begin_edit` enters it,
/// and a submit, `cancel_edit`, or removing the edited note leaves it.
#[derive(Debug, Clone, Default)]
pub struct NotesController {
    store: NotesStore,
    editing: Option<NoteId>,
    ids: NoteIdGenerator,
}

impl NotesController {
    /// Create a controller with an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &NotesStore {
        &self.store
    }

    /// Id of the note currently being edited
    #[must_use]
    pub const fn editing(&self) -> Option<NoteId> {
        self.editing
    }

    /// The note currently being edited
    #[must_use]
    pub fn editing_note(&self) -> Option<&Note> {
        self.editing.and_then(|id| self.store.get(id))
    }

    /// Enter editing state for an existing note
    ///
    /// Returns the note so the form can be prefilled. An unknown id returns
    /// `None` and leaves the editing state untouched.
    pub fn begin_edit(&mut self, id: NoteId) -> Option<&Note> {
        let note = self.store.get(id)?;
        self.editing = Some(id);
        Some(note)
    }

    /// Leave editing state without changing any note
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Handle a form submit
    ///
    /// Blank drafts are rejected. While editing, the edited note is updated
    /// and editing state ends; otherwise a new note is added with a fresh id.
    pub fn submit(&mut self, draft: &NoteDraft, now: DateTime<Utc>) -> SubmitOutcome {
        if draft.is_blank() {
            return SubmitOutcome::Rejected;
        }

        let NoteDraft { title, description } = draft.trimmed();

        if let Some(id) = self.editing.take() {
            return match self.store.update(id, title, description) {
                ActionOutcome::Applied => SubmitOutcome::Updated(id),
                ActionOutcome::Unchanged => SubmitOutcome::Unchanged,
            };
        }

        let id = self.ids.next_id(now);
        match self.store.add(Note::new(id, title, description)) {
            ActionOutcome::Applied => SubmitOutcome::Added(id),
            ActionOutcome::Unchanged => SubmitOutcome::Unchanged,
        }
    }

    /// Delete a note, leaving editing state if it was the edited one
    pub fn remove(&mut self, id: NoteId) -> ActionOutcome {
        if self.editing == Some(id) {
            self.editing = None;
        }
        self.store.delete(id)
    }
}
