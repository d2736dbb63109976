use masjid_console::store::records::{
    chanda_total, Asset, ChandaCollection, CommitteeMember, Expense, NamazTiming, Notification,
};
use serde_json::json;

#[test]
fn expense_row_deserializes() {
    let expense: Expense = serde_json::from_value(json!({
        "id": "exp-1",
        "title": "Carpet cleaning",
        "amount": 450.5,
        "category": "maintenance",
        "description": "Main hall",
        "expense_date": "2025-03-14",
        "created_at": "2025-03-14T09:30:00Z"
    }))
    .unwrap();
    assert_eq!(expense.title, "Carpet cleaning");
    assert_eq!(expense.amount, 450.5);
    assert!(expense.created_by.is_none());
}

#[test]
fn chanda_total_sums_loaded_amounts() {
    let rows: Vec<ChandaCollection> = serde_json::from_value(json!([
        {"id": "c1", "member_name": "Ahmed", "amount": 100.0, "collection_date": "2025-01-03"},
        {"id": "c2", "member_name": "Bilal", "amount": 250.5, "collection_date": "2025-01-10"}
    ]))
    .unwrap();
    assert_eq!(chanda_total(&rows), 350.5);
    assert_eq!(chanda_total(&[]), 0.0);
}

#[test]
fn namaz_display_time_truncates_to_minutes() {
    let timing: NamazTiming = serde_json::from_value(json!({
        "id": "n1",
        "prayer_name": "Fajr",
        "prayer_time": "05:30:00",
        "display_order": 1
    }))
    .unwrap();
    assert_eq!(timing.display_time(), "05:30");
}

#[test]
fn namaz_display_time_keeps_short_values() {
    let timing: NamazTiming = serde_json::from_value(json!({
        "id": "n2",
        "prayer_name": "Asr",
        "prayer_time": "4:15",
        "display_order": 3
    }))
    .unwrap();
    assert_eq!(timing.display_time(), "4:15");
}

#[test]
fn notification_priority_defaults_to_normal() {
    let notice: Notification = serde_json::from_value(json!({
        "id": "not-1",
        "title": "Jummah",
        "message": "Khutbah starts at 1pm"
    }))
    .unwrap();
    assert_eq!(notice.priority_label(), "normal");
}

#[test]
fn optional_columns_tolerate_missing_fields() {
    let asset: Asset = serde_json::from_value(json!({
        "id": "a1",
        "item_name": "Large cooking pot"
    }))
    .unwrap();
    assert!(asset.quantity.is_none());
    assert!(asset.condition.is_none());

    let member: CommitteeMember = serde_json::from_value(json!({
        "id": "m1",
        "name": "Imran",
        "role": "Secretary"
    }))
    .unwrap();
    assert!(member.phone.is_none());
    assert!(member.is_leader.is_none());
}
