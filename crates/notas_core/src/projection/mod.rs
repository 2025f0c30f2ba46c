//! Filtered note projection for the visible list.
//!
//! # Responsibility
//! - Derive the ordered list of visible notes from store state plus
//!   transient UI filters.
//!
//! # Invariants
//! - Pure: no side effects, recomputed on every call.
//! - Stored note order is preserved; no re-sorting is applied.
//! - Only one archive side is ever visible at a time.

use crate::model::category::{Category, CategoryId};
use crate::model::note::{Note, Priority};

/// Priority facet of the note filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityFilter {
    /// Every priority matches.
    All,
    /// Only notes with exactly this priority match.
    Only(Priority),
}

/// Transient UI filter state applied on top of the store.
#[derive(Debug, Clone)]
pub struct NoteFilter {
    /// Case-insensitive substring matched against title and content.
    /// Empty matches every note.
    pub search_term: String,
    pub priority: PriorityFilter,
    /// `false` shows active notes, `true` shows archived ones.
    pub show_archived: bool,
}

impl NoteFilter {
    /// Creates the default view: all unarchived notes, no search.
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            priority: PriorityFilter::All,
            show_archived: false,
        }
    }
}

impl Default for NoteFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the visible note list for the active category.
///
/// Returns an empty list when no category is active. Checklist-only notes
/// have empty `content`, so the search term can only match their title.
pub fn visible_notes<'a>(
    categories: &'a [Category],
    active_category: Option<CategoryId>,
    filter: &NoteFilter,
) -> Vec<&'a Note> {
    let Some(category) = active_category
        .and_then(|active| categories.iter().find(|category| category.id == active))
    else {
        return Vec::new();
    };

    let needle = filter.search_term.to_lowercase();
    category
        .notes
        .iter()
        .filter(|note| note_matches(note, filter, &needle))
        .collect()
}

fn note_matches(note: &Note, filter: &NoteFilter, needle: &str) -> bool {
    if note.archived != filter.show_archived {
        return false;
    }

    if let PriorityFilter::Only(priority) = filter.priority {
        if note.priority != priority {
            return false;
        }
    }

    needle.is_empty()
        || note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
}
