//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notas_core` wiring end to
//!   end against an in-memory container.
//! - Keep output deterministic for quick local sanity checks.

use notas_core::db::open_db_in_memory;
use notas_core::model::category::{DEFAULT_COLOR, DEFAULT_EMOJI};
use notas_core::{NotesStore, SqliteKvStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let kv = SqliteKvStore::try_new(&conn)?;
    let mut store = NotesStore::new(kv);
    store.load()?;

    store
        .create_category("Inbox", DEFAULT_EMOJI, DEFAULT_COLOR)
        .ok_or("category was not created")?;
    let mut draft = store.begin_note_draft();
    draft.title = "smoke note".to_string();
    store
        .commit_note_draft(&draft)
        .ok_or("draft was not committed")?;

    println!("notas_core version={}", notas_core::core_version());
    println!(
        "categories={} notes={}",
        store.categories().len(),
        store
            .categories()
            .iter()
            .map(|category| category.notes.len())
            .sum::<usize>()
    );
    Ok(())
}
