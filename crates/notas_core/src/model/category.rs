//! Category domain model.
//!
//! # Responsibility
//! - Define the user-defined note bucket that owns an ordered note list.
//!
//! # Invariants
//! - `name` is stored trimmed and is never empty.
//! - `notes` order is the sole source of note ordering; no auto-sort is
//!   ever applied on top of it.

use crate::ids::{new_entity_id, EntityId};
use crate::model::note::{Note, NoteId};
use serde::{Deserialize, Serialize};

/// Stable category identifier.
pub type CategoryId = EntityId;

/// Display emoji assigned to categories created without one.
pub const DEFAULT_EMOJI: &str = "📝";
/// Accent color assigned to categories created without one.
pub const DEFAULT_COLOR: &str = "#EF2917";

/// User-defined named bucket of notes with a display emoji and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Category {
    /// Creates an empty category with a freshly minted id.
    ///
    /// The caller is responsible for trimming and rejecting blank names;
    /// this constructor stores `name` as given.
    pub fn new(
        name: impl Into<String>,
        emoji: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            emoji: emoji.into(),
            color: color.into(),
            notes: Vec::new(),
        }
    }

    /// Looks up one note by id.
    pub fn note(&self, note_id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == note_id)
    }

    /// Looks up one note by id for mutation.
    pub fn note_mut(&mut self, note_id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| note.id == note_id)
    }

    /// Position of a note inside the stored sequence.
    pub fn note_position(&self, note_id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == note_id)
    }
}
