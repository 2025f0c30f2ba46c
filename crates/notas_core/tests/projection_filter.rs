use notas_core::{
    new_entity_id, visible_notes, Category, Note, NoteFilter, NoteKind, Priority, PriorityFilter,
};

#[test]
fn no_active_category_yields_empty_list() {
    let categories = vec![category_with_notes("Work", vec![note("alpha", "", false)])];

    assert!(visible_notes(&categories, None, &NoteFilter::new()).is_empty());
    assert!(visible_notes(&categories, Some(new_entity_id()), &NoteFilter::new()).is_empty());
}

#[test]
fn empty_search_shows_all_unarchived_notes_in_stored_order() {
    let categories = vec![category_with_notes(
        "Work",
        vec![
            note("zebra", "", false),
            note("alpha", "", false),
            note("hidden", "", true),
        ],
    )];
    let active = Some(categories[0].id);

    let visible = visible_notes(&categories, active, &NoteFilter::new());
    let titles: Vec<_> = visible.iter().map(|note| note.title.as_str()).collect();
    assert_eq!(titles, ["zebra", "alpha"]);
}

#[test]
fn search_is_case_insensitive_over_title_and_content() {
    let categories = vec![category_with_notes(
        "Work",
        vec![
            note("Buy MILK", "", false),
            note("groceries", "two liters of milk", false),
            note("unrelated", "nothing here", false),
        ],
    )];
    let active = Some(categories[0].id);

    let filter = NoteFilter {
        search_term: "milk".to_string(),
        ..NoteFilter::new()
    };
    let visible = visible_notes(&categories, active, &filter);
    assert_eq!(visible.len(), 2);
}

#[test]
fn archived_match_is_excluded_unless_toggled() {
    let mut archived = note("archived milk note", "milk", false);
    archived.archived = true;
    let categories = vec![category_with_notes(
        "Work",
        vec![note("fresh milk note", "milk", false), archived],
    )];
    let active = Some(categories[0].id);

    let filter = NoteFilter {
        search_term: "milk".to_string(),
        ..NoteFilter::new()
    };
    let visible = visible_notes(&categories, active, &filter);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "fresh milk note");

    let archived_view = NoteFilter {
        search_term: "milk".to_string(),
        show_archived: true,
        ..NoteFilter::new()
    };
    let visible = visible_notes(&categories, active, &archived_view);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "archived milk note");
}

#[test]
fn priority_filter_keeps_exact_matches_only() {
    let mut high = note("urgent", "", false);
    high.priority = Priority::High;
    let mut low = note("later", "", false);
    low.priority = Priority::Low;
    let categories = vec![category_with_notes(
        "Work",
        vec![high, low, note("plain", "", false)],
    )];
    let active = Some(categories[0].id);

    let filter = NoteFilter {
        priority: PriorityFilter::Only(Priority::High),
        ..NoteFilter::new()
    };
    let visible = visible_notes(&categories, active, &filter);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "urgent");
}

#[test]
fn checklist_only_notes_match_via_title_only() {
    let mut checklist = note("chores", "", false);
    checklist.kind = NoteKind::Checklist;
    let categories = vec![category_with_notes("Home", vec![checklist])];
    let active = Some(categories[0].id);

    // Item text is not searched; empty content never matches the term.
    let by_content = NoteFilter {
        search_term: "laundry".to_string(),
        ..NoteFilter::new()
    };
    assert!(visible_notes(&categories, active, &by_content).is_empty());

    let by_title = NoteFilter {
        search_term: "chore".to_string(),
        ..NoteFilter::new()
    };
    assert_eq!(visible_notes(&categories, active, &by_title).len(), 1);
}

#[test]
fn only_the_active_category_is_projected() {
    let work = category_with_notes("Work", vec![note("report", "", false)]);
    let home = category_with_notes("Home", vec![note("dishes", "", false)]);
    let active = Some(home.id);
    let categories = vec![work, home];

    let visible = visible_notes(&categories, active, &NoteFilter::new());
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "dishes");
}

fn category_with_notes(name: &str, notes: Vec<Note>) -> Category {
    let mut category = Category::new(name, "📝", "#EF2917");
    category.notes = notes;
    category
}

fn note(title: &str, content: &str, archived: bool) -> Note {
    Note {
        id: new_entity_id(),
        title: title.to_string(),
        content: content.to_string(),
        kind: NoteKind::Text,
        priority: Priority::Normal,
        checklist_items: Vec::new(),
        archived,
        created_at: None,
        modified_at: None,
    }
}
