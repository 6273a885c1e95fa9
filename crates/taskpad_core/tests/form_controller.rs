use taskpad_core::db::open_db_in_memory;
use taskpad_core::{
    FormController, FormError, SqliteKvRepository, StoreError, TaskDraft, TaskStore,
    TaskValidationError,
};

fn store_with<'conn>(
    conn: &'conn rusqlite::Connection,
    titles: &[&str],
) -> TaskStore<SqliteKvRepository<'conn>> {
    let repo = SqliteKvRepository::try_new(conn).unwrap();
    let mut store = TaskStore::load(repo);
    for title in titles {
        store
            .add(&TaskDraft {
                title: title.to_string(),
                ..TaskDraft::default()
            })
            .unwrap();
    }
    store
}

#[test]
fn controller_starts_in_creating_state() {
    let form = FormController::new();
    assert!(!form.is_editing());
    assert_eq!(form.editing(), None);
    assert_eq!(form.title(), "");
}

#[test]
fn submit_in_creating_state_adds_and_clears() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(&conn, &[]);

    let mut form = FormController::new();
    form.set_title("Buy milk");
    form.set_description("two liters");
    form.set_date("2024-01-15");
    form.set_time("09:30");

    let task = form.submit(&mut store).unwrap();

    assert_eq!(task.title, "Buy milk");
    assert_eq!(
        task.scheduled_at.unwrap().to_string(),
        "2024-01-15 09:30:00"
    );
    assert_eq!(store.len(), 1);

    // Back in the Creating state with every field cleared.
    assert!(!form.is_editing());
    assert_eq!(form.title(), "");
    assert_eq!(form.description(), "");
    assert_eq!(form.date(), "");
    assert_eq!(form.time(), "");
}

#[test]
fn begin_edit_copies_fields_and_enters_editing() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(&conn, &[]);

    let mut seed = FormController::new();
    seed.set_title("dentist");
    seed.set_description("cleaning");
    seed.set_date("2024-06-01");
    seed.set_time("14:00");
    let task = seed.submit(&mut store).unwrap();

    let mut form = FormController::new();
    form.begin_edit(store.get(task.id).unwrap());

    assert!(form.is_editing());
    assert_eq!(form.editing(), Some(task.id));
    assert_eq!(form.title(), "dentist");
    assert_eq!(form.description(), "cleaning");
    assert_eq!(form.date(), "2024-06-01");
    assert_eq!(form.time(), "14:00");
}

#[test]
fn submit_in_editing_state_updates_and_returns_to_creating() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(&conn, &["stale title"]);
    let id = store.list()[0].id;

    let mut form = FormController::new();
    form.begin_edit(store.get(id).unwrap());
    form.set_title("fresh title");

    let updated = form.submit(&mut store).unwrap();

    assert_eq!(updated.id, id);
    assert_eq!(updated.title, "fresh title");
    assert!(updated.updated_at.is_some());
    assert_eq!(store.len(), 1);
    assert!(!form.is_editing());
}

#[test]
fn cancel_edit_returns_to_creating_without_store_contact() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(&conn, &["untouched"]);

    let mut form = FormController::new();
    form.begin_edit(&store.list()[0]);
    form.set_title("abandoned edit");

    form.cancel_edit();

    assert!(!form.is_editing());
    assert_eq!(form.title(), "");
    assert_eq!(store.list()[0].title, "untouched");
    assert_eq!(store.list()[0].updated_at, None);
}

#[test]
fn malformed_date_is_rejected_before_the_store_is_touched() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(&conn, &[]);

    let mut form = FormController::new();
    form.set_title("bad date");
    form.set_date("01/15/2024");

    let err = form.submit(&mut store).unwrap_err();
    assert!(matches!(err, FormError::InvalidDate(_)));
    assert!(store.is_empty());
    // Fields stay put so the user can correct and resubmit.
    assert_eq!(form.title(), "bad date");
}

#[test]
fn malformed_time_is_rejected_before_the_store_is_touched() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(&conn, &[]);

    let mut form = FormController::new();
    form.set_title("bad time");
    form.set_time("quarter past nine");

    let err = form.submit(&mut store).unwrap_err();
    assert!(matches!(err, FormError::InvalidTime(_)));
    assert!(store.is_empty());
}

#[test]
fn blank_title_is_rejected_by_store_authority() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(&conn, &[]);

    let mut form = FormController::new();
    form.set_title("   ");

    let err = form.submit(&mut store).unwrap_err();
    assert!(matches!(
        err,
        FormError::Store(StoreError::Validation(TaskValidationError::EmptyTitle))
    ));
    assert!(store.is_empty());
}

#[test]
fn submit_against_deleted_record_surfaces_not_found_and_keeps_editing() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(&conn, &["about to vanish"]);
    let id = store.list()[0].id;

    let mut form = FormController::new();
    form.begin_edit(store.get(id).unwrap());
    assert!(store.delete(id));

    let err = form.submit(&mut store).unwrap_err();
    assert!(matches!(err, FormError::Store(StoreError::NotFound(stale)) if stale == id));
    assert!(form.is_editing());
}
