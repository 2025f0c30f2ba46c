//! Note domain model.
//!
//! # Responsibility
//! - Define the committed note record and its draft counterpart.
//! - Provide draft-scoped checklist editing helpers.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `title` must be non-empty after trim before a draft can be committed.
//! - `created_at` is set exactly once, at commit of a fresh draft.
//! - Checklist items are owned exclusively by one note.

use crate::ids::{new_entity_id, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable note identifier, unique across the whole tree.
pub type NoteId = EntityId;

/// Content shape of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    /// Free-form text body only.
    Text,
    /// Checklist items only; `content` stays empty.
    Checklist,
    /// Text body plus checklist items.
    Both,
}

impl Default for NoteKind {
    fn default() -> Self {
        Self::Text
    }
}

/// User-assigned priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

/// Single checkable line inside a checklist-type note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: EntityId,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl ChecklistItem {
    /// Creates an unchecked item with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            text: text.into(),
            completed: false,
        }
    }
}

/// Committed note record.
///
/// Serialized as `type` to match the external schema naming; all other
/// keys are camelCase for the same reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: NoteKind,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub checklist_items: Vec<ChecklistItem>,
    /// Soft archive flag; archived notes stay in their category sequence.
    #[serde(default)]
    pub archived: bool,
    /// Set once at commit. Legacy imports may omit it.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Updated on content-affecting mutations, not on reorder or archive.
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Flips `completed` on the matching checklist item and bumps
    /// `modified_at`. Returns `false` when the item is unknown.
    pub fn toggle_checklist_item(&mut self, item_id: EntityId, now: DateTime<Utc>) -> bool {
        match self.checklist_items.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.completed = !item.completed;
                self.modified_at = Some(now);
                true
            }
            None => false,
        }
    }
}

/// Detached, uncommitted note held outside the tree until saved.
///
/// `id == None` marks a fresh note; `Some` means the draft edits an
/// existing committed note and will replace it in place.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    pub id: Option<NoteId>,
    pub title: String,
    pub content: String,
    pub kind: NoteKind,
    pub priority: Priority,
    pub checklist_items: Vec<ChecklistItem>,
    pub archived: bool,
}

impl NoteDraft {
    /// Creates an empty draft shell for a new note.
    pub fn new() -> Self {
        Self {
            id: None,
            title: String::new(),
            content: String::new(),
            kind: NoteKind::default(),
            priority: Priority::default(),
            checklist_items: Vec::new(),
            archived: false,
        }
    }

    /// Seeds a draft from a committed note for the edit flow.
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: Some(note.id),
            title: note.title.clone(),
            content: note.content.clone(),
            kind: note.kind,
            priority: note.priority,
            checklist_items: note.checklist_items.clone(),
            archived: note.archived,
        }
    }

    /// Appends an empty unchecked item and returns its id.
    pub fn add_checklist_item(&mut self) -> EntityId {
        let item = ChecklistItem::new("");
        let id = item.id;
        self.checklist_items.push(item);
        id
    }

    /// Replaces the text of the matching item.
    pub fn update_checklist_item(&mut self, item_id: EntityId, text: impl Into<String>) -> bool {
        match self.checklist_items.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Removes the matching item.
    pub fn delete_checklist_item(&mut self, item_id: EntityId) -> bool {
        let before = self.checklist_items.len();
        self.checklist_items.retain(|item| item.id != item_id);
        self.checklist_items.len() != before
    }
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self::new()
    }
}
