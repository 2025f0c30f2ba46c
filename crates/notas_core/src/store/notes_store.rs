//! Notes store: command handling, active selection and persistence.
//!
//! # Responsibility
//! - Hold the category tree, active selection and dark-mode flag.
//! - Apply every command from the UI and write one snapshot per success.
//! - Own import/export entry points.
//!
//! # Invariants
//! - Every successful mutating command triggers exactly one snapshot
//!   write; failed validation triggers none.
//! - A failed snapshot write is logged and swallowed; in-memory state
//!   stays authoritative for the session.
//! - `modified_at` changes on content-affecting mutations only, never on
//!   reorder or archive toggles.

use crate::ids::{new_entity_id, EntityId};
use crate::model::category::{Category, CategoryId};
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::repo::kv_repo::{KvStore, RepoError};
use crate::snapshot::{self, SnapshotError};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the snapshot envelope of the category tree.
pub const STORAGE_KEY: &str = "notesAppData";
/// Storage key holding the JSON boolean theme preference.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Title suffix appended by [`NotesStore::duplicate_note`].
pub const COPY_SUFFIX: &str = "(cópia)";

/// Direction for [`NotesStore::move_note`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Errors from store lifecycle operations.
#[derive(Debug)]
pub enum StoreError {
    /// Persistence collaborator failure.
    Repo(RepoError),
    /// Stored snapshot could not be decoded.
    Snapshot(SnapshotError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Snapshot(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<SnapshotError> for StoreError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// The application store: category tree plus transient selection state,
/// persisted through an injected blob store.
pub struct NotesStore<S: KvStore> {
    kv: S,
    categories: Vec<Category>,
    active_category: Option<CategoryId>,
    dark_mode: bool,
}

impl<S: KvStore> NotesStore<S> {
    /// Creates an empty store over the given persistence collaborator.
    pub fn new(kv: S) -> Self {
        Self {
            kv,
            categories: Vec::new(),
            active_category: None,
            dark_mode: false,
        }
    }

    /// Reads both storage keys once at startup.
    ///
    /// The active selection becomes the first stored category. A corrupt
    /// theme blob degrades to light mode instead of failing the load.
    pub fn load(&mut self) -> Result<(), StoreError> {
        if let Some(raw) = self.kv.get(STORAGE_KEY)? {
            self.categories = snapshot::decode_snapshot(&raw)?;
        }
        self.active_category = self.categories.first().map(|category| category.id);

        self.dark_mode = match self.kv.get(DARK_MODE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(
                    "event=store_load module=store status=degraded key={DARK_MODE_KEY} error={err}"
                );
                false
            }),
            None => false,
        };

        info!(
            "event=store_load module=store status=ok categories={}",
            self.categories.len()
        );
        Ok(())
    }

    // ---- accessors -------------------------------------------------------

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, category_id: CategoryId) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
    }

    pub fn note(&self, category_id: CategoryId, note_id: NoteId) -> Option<&Note> {
        self.category(category_id)?.note(note_id)
    }

    pub fn active_category(&self) -> Option<CategoryId> {
        self.active_category
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    // ---- category commands ----------------------------------------------

    /// Appends a category and makes it the active selection.
    ///
    /// No-op returning `None` when `name` trims to empty.
    pub fn create_category(
        &mut self,
        name: &str,
        emoji: impl Into<String>,
        color: impl Into<String>,
    ) -> Option<CategoryId> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }

        let category = Category::new(trimmed, emoji, color);
        let category_id = category.id;
        self.categories.push(category);
        self.active_category = Some(category_id);
        self.save();
        Some(category_id)
    }

    /// Removes a category and all its notes.
    ///
    /// When the deleted category was active, the first remaining category
    /// becomes active, or none if the list is now empty.
    pub fn delete_category(&mut self, category_id: CategoryId) -> bool {
        let before = self.categories.len();
        self.categories.retain(|category| category.id != category_id);
        if self.categories.len() == before {
            return false;
        }

        if self.active_category == Some(category_id) {
            self.active_category = self.categories.first().map(|category| category.id);
        }
        self.save();
        true
    }

    /// Switches the active selection. No-op when the id is unknown.
    ///
    /// The selection is transient UI state, so no snapshot is written.
    pub fn set_active_category(&mut self, category_id: CategoryId) -> bool {
        if self.category(category_id).is_none() {
            return false;
        }
        self.active_category = Some(category_id);
        true
    }

    // ---- note commands ---------------------------------------------------

    /// Produces a detached draft shell for a new note.
    pub fn begin_note_draft(&self) -> NoteDraft {
        NoteDraft::new()
    }

    /// Seeds a draft from a committed note for the edit flow.
    pub fn draft_from_note(&self, category_id: CategoryId, note_id: NoteId) -> Option<NoteDraft> {
        self.note(category_id, note_id).map(NoteDraft::from_note)
    }

    /// Commits a draft into the active category.
    ///
    /// No-op returning `None` when the title trims to empty, when no
    /// category is active, or when an editing draft targets a note that no
    /// longer exists. A fresh draft is appended with
    /// `created_at == modified_at`; an editing draft replaces the note in
    /// place, preserving `created_at` and overwriting `modified_at`.
    pub fn commit_note_draft(&mut self, draft: &NoteDraft) -> Option<NoteId> {
        if draft.title.trim().is_empty() {
            return None;
        }
        let active_id = self.active_category?;
        let now = Utc::now();

        let committed_id = {
            let category = self
                .categories
                .iter_mut()
                .find(|category| category.id == active_id)?;
            match draft.id {
                Some(existing_id) => {
                    let note = category.note_mut(existing_id)?;
                    let created_at = note.created_at;
                    *note = materialize(draft, existing_id, created_at, now);
                    existing_id
                }
                None => {
                    let note_id = new_entity_id();
                    category
                        .notes
                        .push(materialize(draft, note_id, Some(now), now));
                    note_id
                }
            }
        };

        self.save();
        Some(committed_id)
    }

    /// Removes a note from its category sequence.
    pub fn delete_note(&mut self, category_id: CategoryId, note_id: NoteId) -> bool {
        let Some(category) = self.category_mut(category_id) else {
            return false;
        };
        let before = category.notes.len();
        category.notes.retain(|note| note.id != note_id);
        if category.notes.len() == before {
            return false;
        }

        self.save();
        true
    }

    /// Flips the archive flag. `modified_at` is left untouched.
    pub fn toggle_archive(&mut self, category_id: CategoryId, note_id: NoteId) -> bool {
        let Some(note) = self
            .category_mut(category_id)
            .and_then(|category| category.note_mut(note_id))
        else {
            return false;
        };
        note.archived = !note.archived;

        self.save();
        true
    }

    /// Appends a copy of the note with a fresh id, fresh timestamps and
    /// the copy marker suffixed to the title.
    pub fn duplicate_note(
        &mut self,
        category_id: CategoryId,
        note_id: NoteId,
    ) -> Option<NoteId> {
        let now = Utc::now();
        let duplicate_id = {
            let category = self.category_mut(category_id)?;
            let source = category.note(note_id)?.clone();
            let duplicate = Note {
                id: new_entity_id(),
                title: format!("{} {COPY_SUFFIX}", source.title),
                created_at: Some(now),
                modified_at: Some(now),
                ..source
            };
            let duplicate_id = duplicate.id;
            category.notes.push(duplicate);
            duplicate_id
        };

        self.save();
        Some(duplicate_id)
    }

    /// Swaps the note with its immediate neighbor in the stored sequence.
    ///
    /// Boundary moves (first note up, last note down) are no-ops.
    pub fn move_note(
        &mut self,
        category_id: CategoryId,
        note_id: NoteId,
        direction: MoveDirection,
    ) -> bool {
        {
            let Some(category) = self.category_mut(category_id) else {
                return false;
            };
            let Some(index) = category.note_position(note_id) else {
                return false;
            };
            let target = match direction {
                MoveDirection::Up if index > 0 => index - 1,
                MoveDirection::Down if index + 1 < category.notes.len() => index + 1,
                _ => return false,
            };
            category.notes.swap(index, target);
        }

        self.save();
        true
    }

    /// Flips `completed` on one checklist item of a committed note and
    /// bumps the note's `modified_at`.
    pub fn toggle_checklist_item(
        &mut self,
        category_id: CategoryId,
        note_id: NoteId,
        item_id: EntityId,
    ) -> bool {
        let now = Utc::now();
        let toggled = self
            .category_mut(category_id)
            .and_then(|category| category.note_mut(note_id))
            .is_some_and(|note| note.toggle_checklist_item(item_id, now));
        if !toggled {
            return false;
        }

        self.save();
        true
    }

    // ---- theme -----------------------------------------------------------

    /// Stores the theme preference under its own key; the category tree is
    /// not rewritten.
    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
        let payload = if enabled { "true" } else { "false" };
        if let Err(err) = self.kv.put(DARK_MODE_KEY, payload) {
            warn!(
                "event=theme_save module=store status=error key={DARK_MODE_KEY} error={err}"
            );
        }
    }

    // ---- export / import -------------------------------------------------

    /// Pretty-printed JSON of the bare category array.
    pub fn export_json(&self) -> Result<String, SnapshotError> {
        snapshot::export_categories(&self.categories)
    }

    /// Replaces the entire tree with the imported payload.
    ///
    /// Destructive: there is no merge with existing data. On decode
    /// failure the error is returned and state is untouched. On success
    /// the first imported category becomes active and a snapshot is
    /// written.
    pub fn import_json(&mut self, raw: &str) -> Result<(), SnapshotError> {
        let imported = snapshot::decode_snapshot(raw)?;
        self.categories = imported;
        self.active_category = self.categories.first().map(|category| category.id);

        info!(
            "event=import module=store status=ok categories={}",
            self.categories.len()
        );
        self.save();
        Ok(())
    }

    // ---- internals -------------------------------------------------------

    fn category_mut(&mut self, category_id: CategoryId) -> Option<&mut Category> {
        self.categories
            .iter_mut()
            .find(|category| category.id == category_id)
    }

    /// Serializes the whole tree and writes it under [`STORAGE_KEY`].
    ///
    /// Write failures must not fail the command that triggered them; they
    /// are logged and the session continues on in-memory state.
    fn save(&self) {
        let payload = match snapshot::encode_snapshot(&self.categories) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("event=snapshot_save module=store status=error stage=encode error={err}");
                return;
            }
        };

        if let Err(err) = self.kv.put(STORAGE_KEY, &payload) {
            warn!("event=snapshot_save module=store status=error stage=write error={err}");
        }
    }
}

fn materialize(
    draft: &NoteDraft,
    note_id: NoteId,
    created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Note {
    Note {
        id: note_id,
        title: draft.title.clone(),
        content: draft.content.clone(),
        kind: draft.kind,
        priority: draft.priority,
        checklist_items: draft.checklist_items.clone(),
        archived: draft.archived,
        created_at,
        modified_at: Some(now),
    }
}
