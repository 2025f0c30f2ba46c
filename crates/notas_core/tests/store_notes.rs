use notas_core::db::open_db_in_memory;
use notas_core::{
    KvStore, MoveDirection, NoteId, NoteKind, NotesStore, Priority, SqliteKvStore,
};
use rusqlite::Connection;

#[test]
fn committing_fresh_draft_appends_one_note() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with_category(&conn, "Work");

    let mut draft = store.begin_note_draft();
    draft.title = "Buy milk".to_string();
    draft.content = "2%".to_string();

    let note_id = store.commit_note_draft(&draft).unwrap();

    let category_id = store.active_category().unwrap();
    let category = store.category(category_id).unwrap();
    assert_eq!(category.notes.len(), 1);

    let note = store.note(category_id, note_id).unwrap();
    assert_eq!(note.title, "Buy milk");
    assert_eq!(note.content, "2%");
    assert_eq!(note.kind, NoteKind::Text);
    assert_eq!(note.priority, Priority::Normal);
    assert!(!note.archived);
    assert!(note.created_at.is_some());
    assert_eq!(note.created_at, note.modified_at);
}

#[test]
fn blank_title_draft_is_silent_noop() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with_category(&conn, "Work");

    let mut draft = store.begin_note_draft();
    draft.title = "   ".to_string();

    assert!(store.commit_note_draft(&draft).is_none());
    let category_id = store.active_category().unwrap();
    assert!(store.category(category_id).unwrap().notes.is_empty());
}

#[test]
fn commit_without_active_category_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store(&conn);

    let mut draft = store.begin_note_draft();
    draft.title = "orphan".to_string();

    assert!(store.commit_note_draft(&draft).is_none());
    assert!(store.categories().is_empty());
}

#[test]
fn editing_preserves_created_at_and_bumps_modified_at() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with_category(&conn, "Work");
    let category_id = store.active_category().unwrap();

    let note_id = commit_titled(&mut store, "A");
    let original = store.note(category_id, note_id).unwrap().clone();

    let mut draft = store.draft_from_note(category_id, note_id).unwrap();
    draft.title = "B".to_string();
    let committed = store.commit_note_draft(&draft).unwrap();
    assert_eq!(committed, note_id);

    let edited = store.note(category_id, note_id).unwrap();
    assert_eq!(edited.title, "B");
    assert_eq!(edited.created_at, original.created_at);
    assert!(edited.modified_at >= original.modified_at);
    assert_eq!(store.category(category_id).unwrap().notes.len(), 1);
}

#[test]
fn editing_draft_for_deleted_note_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with_category(&conn, "Work");
    let category_id = store.active_category().unwrap();

    let note_id = commit_titled(&mut store, "doomed");
    let draft = store.draft_from_note(category_id, note_id).unwrap();
    assert!(store.delete_note(category_id, note_id));

    assert!(store.commit_note_draft(&draft).is_none());
    assert!(store.category(category_id).unwrap().notes.is_empty());
}

#[test]
fn delete_note_removes_it_from_the_sequence() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with_category(&conn, "Work");
    let category_id = store.active_category().unwrap();

    let first = commit_titled(&mut store, "first");
    let second = commit_titled(&mut store, "second");

    assert!(store.delete_note(category_id, first));
    assert!(store.note(category_id, first).is_none());
    assert!(store.note(category_id, second).is_some());
    assert!(!store.delete_note(category_id, first));
}

#[test]
fn toggle_archive_flips_flag_without_touching_modified_at() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with_category(&conn, "Work");
    let category_id = store.active_category().unwrap();

    let note_id = commit_titled(&mut store, "keep around");
    let before = store.note(category_id, note_id).unwrap().modified_at;

    assert!(store.toggle_archive(category_id, note_id));
    let archived = store.note(category_id, note_id).unwrap();
    assert!(archived.archived);
    assert_eq!(archived.modified_at, before);

    assert!(store.toggle_archive(category_id, note_id));
    assert!(!store.note(category_id, note_id).unwrap().archived);
}

#[test]
fn duplicate_appends_suffixed_copy_with_fresh_identity() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with_category(&conn, "Work");
    let category_id = store.active_category().unwrap();

    let source_id = commit_titled(&mut store, "relatório");
    let duplicate_id = store.duplicate_note(category_id, source_id).unwrap();
    assert_ne!(duplicate_id, source_id);

    let category = store.category(category_id).unwrap();
    assert_eq!(category.notes.len(), 2);
    assert_eq!(category.notes[1].id, duplicate_id);

    let duplicate = store.note(category_id, duplicate_id).unwrap();
    assert_eq!(duplicate.title, "relatório (cópia)");
    assert!(duplicate.created_at.is_some());
    assert_eq!(duplicate.created_at, duplicate.modified_at);
}

#[test]
fn move_note_swaps_with_immediate_neighbor() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with_category(&conn, "Work");
    let category_id = store.active_category().unwrap();

    commit_titled(&mut store, "a");
    let middle = commit_titled(&mut store, "b");
    commit_titled(&mut store, "c");

    assert!(store.move_note(category_id, middle, MoveDirection::Up));
    assert_eq!(titles(&store, category_id), ["b", "a", "c"]);

    assert!(store.move_note(category_id, middle, MoveDirection::Down));
    assert_eq!(titles(&store, category_id), ["a", "b", "c"]);
}

#[test]
fn move_note_at_boundaries_is_idempotent_noop() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with_category(&conn, "Work");
    let category_id = store.active_category().unwrap();

    let first = commit_titled(&mut store, "a");
    let last = commit_titled(&mut store, "b");

    assert!(!store.move_note(category_id, first, MoveDirection::Up));
    assert!(!store.move_note(category_id, last, MoveDirection::Down));
    assert_eq!(titles(&store, category_id), ["a", "b"]);
}

fn store(conn: &Connection) -> NotesStore<SqliteKvStore<'_>> {
    let kv = SqliteKvStore::try_new(conn).unwrap();
    let mut store = NotesStore::new(kv);
    store.load().unwrap();
    store
}

fn store_with_category<'conn>(
    conn: &'conn Connection,
    name: &str,
) -> NotesStore<SqliteKvStore<'conn>> {
    let mut store = store(conn);
    store.create_category(name, "📝", "#EF2917").unwrap();
    store
}

fn commit_titled<S: KvStore>(store: &mut NotesStore<S>, title: &str) -> NoteId {
    let mut draft = store.begin_note_draft();
    draft.title = title.to_string();
    store.commit_note_draft(&draft).unwrap()
}

fn titles<S: KvStore>(store: &NotesStore<S>, category_id: notas_core::CategoryId) -> Vec<String> {
    store
        .category(category_id)
        .unwrap()
        .notes
        .iter()
        .map(|note| note.title.clone())
        .collect()
}
