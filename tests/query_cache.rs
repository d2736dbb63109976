use masjid_console::session::Role;
use masjid_console::store::cache::{QueryCache, QueryKey, RowSet};
use masjid_console::store::records::Expense;
use serde_json::json;

fn expense(id: &str, title: &str) -> Expense {
    serde_json::from_value(json!({
        "id": id,
        "title": title,
        "amount": 100.0,
        "category": "general",
        "expense_date": "2025-01-01"
    }))
    .unwrap()
}

#[test]
fn invalidate_marks_stale_until_taken() {
    let mut cache = QueryCache::default();
    cache.invalidate(QueryKey::Expenses);
    assert!(cache.is_stale(QueryKey::Expenses));

    let due = cache.take_stale();
    assert_eq!(due, vec![QueryKey::Expenses]);
    assert!(!cache.is_stale(QueryKey::Expenses));
    assert!(cache.take_stale().is_empty());
}

#[test]
fn stale_key_waits_for_inflight_fetch() {
    let mut cache = QueryCache::default();
    cache.mark_pending(QueryKey::Expenses);
    cache.invalidate(QueryKey::Expenses);
    // A fetch is already in flight; the refetch is deferred.
    assert!(cache.take_stale().is_empty());

    cache.apply(QueryKey::Expenses, Ok(RowSet::Expenses(Vec::new())));
    assert_eq!(cache.take_stale(), vec![QueryKey::Expenses]);
}

#[test]
fn apply_stores_rows_and_clears_error() {
    let mut cache = QueryCache::default();
    cache.mark_pending(QueryKey::Expenses);
    cache.apply(QueryKey::Expenses, Err("connection reset".to_string()));
    assert_eq!(cache.error(QueryKey::Expenses), Some("connection reset"));

    cache.mark_pending(QueryKey::Expenses);
    cache.apply(
        QueryKey::Expenses,
        Ok(RowSet::Expenses(vec![expense("e1", "Water bill")])),
    );
    assert!(cache.error(QueryKey::Expenses).is_none());
    assert_eq!(cache.expenses.len(), 1);
    assert_eq!(cache.expenses[0].title, "Water bill");
}

#[test]
fn loading_only_before_first_result() {
    let mut cache = QueryCache::default();
    cache.mark_pending(QueryKey::Chanda);
    assert!(cache.is_loading(QueryKey::Chanda));

    cache.apply(QueryKey::Chanda, Ok(RowSet::Chanda(Vec::new())));
    assert!(!cache.is_loading(QueryKey::Chanda));

    // A refetch after the first result is a background refresh, not loading.
    cache.mark_pending(QueryKey::Chanda);
    assert!(!cache.is_loading(QueryKey::Chanda));
    assert!(cache.is_pending(QueryKey::Chanda));
}

#[test]
fn role_snapshot_lands_in_cache() {
    let mut cache = QueryCache::default();
    assert!(cache.role.is_none());
    cache.apply(QueryKey::Role, Ok(RowSet::Role(Role::Admin)));
    assert_eq!(cache.role, Some(Role::Admin));
}
