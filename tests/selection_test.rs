//! Integration tests for selection and visit plans

use fairwatt::adapters::PageRequest;
use fairwatt::core::selection::{SelectionSet, VisitPlan, NO_SELECTION_MESSAGE, NO_STAFF_MESSAGE};
use fairwatt::core::store::{Environment, RecordStore};
use fairwatt::domain::{Employee, MeterId, MeterRecord};

fn id(raw: i64) -> MeterId {
    MeterId::new(raw)
}

fn selected(set: &SelectionSet) -> Vec<i64> {
    set.iter().map(|id| id.get()).collect()
}

#[test]
fn test_selection_is_idempotent() {
    let mut once = SelectionSet::new();
    once.add(id(5));

    let mut twice = SelectionSet::new();
    twice.add(id(5));
    twice.add(id(5));
    assert_eq!(once, twice);

    let mut empty = SelectionSet::new();
    empty.remove(id(5));
    assert!(empty.is_empty());
}

#[test]
fn test_plan_without_staff_keeps_selection() {
    let base = vec![
        MeterRecord::builder(1).build().unwrap(),
        MeterRecord::builder(2).build().unwrap(),
    ];
    let mut set = SelectionSet::new();
    set.add(id(1));
    set.add(id(2));
    set.remove(id(1));
    assert_eq!(selected(&set), vec![2]);

    let err = VisitPlan::build(&base, &set, None).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.user_message(), NO_STAFF_MESSAGE);
    assert_eq!(selected(&set), vec![2]);
}

#[test]
fn test_plan_without_selection_rejected_first() {
    let base = vec![MeterRecord::builder(1).build().unwrap()];
    let err = VisitPlan::build(&base, &SelectionSet::new(), None).unwrap_err();
    assert_eq!(err.user_message(), NO_SELECTION_MESSAGE);
}

#[test]
fn test_plan_follows_base_list_order() {
    let base = vec![
        MeterRecord::builder(9)
            .address("Sochi, Kurortny 3")
            .geodata(43.58, 39.72)
            .build()
            .unwrap(),
        MeterRecord::builder(4).address("Anapa, Lenina 1").build().unwrap(),
        MeterRecord::builder(6).build().unwrap(),
    ];
    let mut set = SelectionSet::new();
    set.add(id(6));
    set.add(id(9));

    let staff = Employee::new(1, "Ivanov Aleksey Petrovich");
    let plan = VisitPlan::build(&base, &set, Some(&staff)).unwrap();

    let stops: Vec<i64> = plan.stops.iter().map(|s| s.account_id.get()).collect();
    assert_eq!(stops, vec![9, 6]);
    assert_eq!(plan.stops[0].latitude, 43.58);
    assert_eq!(plan.employee, staff);
}

#[tokio::test]
async fn test_store_plan_clears_selection_on_success() {
    let mut store = RecordStore::new(Environment::debug());
    store.load_page(PageRequest::new(1, 10)).await;

    store.select(id(1)).unwrap();
    store.select(id(3)).unwrap();

    assert!(store.build_visit_plan(None).is_err());
    assert_eq!(store.selection().len(), 2);

    let staff = store.environment().staff[0].clone();
    let plan = store.build_visit_plan(Some(&staff)).unwrap();
    assert_eq!(plan.stops.len(), 2);
    assert!(store.selection().is_empty());
}

#[tokio::test]
async fn test_select_unknown_meter_rejected() {
    let mut store = RecordStore::new(Environment::debug());
    store.load_page(PageRequest::new(1, 10)).await;

    assert!(store.select(id(999)).is_err());
    assert!(store.selection().is_empty());
}

#[tokio::test]
async fn test_toggle_all_visible_respects_filters() {
    let mut store = RecordStore::new(Environment::debug());
    store.load_page(PageRequest::new(1, 10)).await;

    let mut criteria = store.criteria().clone();
    criteria.id = "2".to_string();
    store.set_criteria(criteria);

    store.toggle_all_visible();
    assert_eq!(selected(store.selection()), vec![2]);

    store.toggle_all_visible();
    assert!(store.selection().is_empty());
}
