use recipebook::model::Record;
use recipebook::records::{RecordsReducer, RecordsState};
use recipebook::store::{Action, Reducer};
use std::sync::Arc;

fn pancakes() -> Record {
    Record::new("Pancakes", "Fluffy")
        .with_ingredient("Flour", 200.0)
        .with_ingredient("Eggs", 2.0)
}

fn seeded() -> Arc<RecordsState> {
    RecordsReducer::reduce(
        Arc::new(RecordsState::default()),
        &Action::SetRecords(vec![pancakes(), Record::new("Soup", "Hot")]),
    )
}

fn names(state: &RecordsState) -> Vec<&str> {
    state.records.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn set_records_replaces_list_and_clears_error() {
    let state = RecordsReducer::reduce(seeded(), &Action::RecordsSyncFail("offline".into()));
    assert_eq!(state.sync_error.as_deref(), Some("offline"));

    let state = RecordsReducer::reduce(state, &Action::SetRecords(vec![Record::new("Tea", "")]));
    assert_eq!(names(&state), vec!["Tea"]);
    assert!(state.sync_error.is_none());
}

#[test]
fn add_update_delete() {
    let state = RecordsReducer::reduce(seeded(), &Action::AddRecord(Record::new("Salad", "")));
    assert_eq!(names(&state), vec!["Pancakes", "Soup", "Salad"]);

    let state = RecordsReducer::reduce(
        state,
        &Action::UpdateRecord {
            index: 1,
            record: Record::new("Stew", "Thick"),
        },
    );
    assert_eq!(names(&state), vec!["Pancakes", "Stew", "Salad"]);

    let state = RecordsReducer::reduce(state, &Action::DeleteRecord(0));
    assert_eq!(names(&state), vec!["Stew", "Salad"]);
}

#[test]
fn out_of_range_index_is_a_no_op() {
    let state = seeded();

    let next = RecordsReducer::reduce(Arc::clone(&state), &Action::DeleteRecord(7));
    assert!(Arc::ptr_eq(&state, &next));

    let next = RecordsReducer::reduce(
        Arc::clone(&state),
        &Action::UpdateRecord {
            index: 2,
            record: Record::new("Nope", ""),
        },
    );
    assert!(Arc::ptr_eq(&state, &next));
}

#[test]
fn auth_actions_keep_identity() {
    let state = seeded();
    for action in [Action::Logout, Action::AutoLogin, Action::ClearError, Action::FetchRecords] {
        let next = RecordsReducer::reduce(Arc::clone(&state), &action);
        assert!(Arc::ptr_eq(&state, &next));
    }
}

#[test]
fn identical_set_records_keeps_identity() {
    let state = seeded();
    let same = state.records.clone();
    let next = RecordsReducer::reduce(Arc::clone(&state), &Action::SetRecords(same));
    assert!(Arc::ptr_eq(&state, &next));
}
