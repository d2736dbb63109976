use serde_json::Value;

use masjid_console::gui::{valid_time, ChandaModule, ConsoleApp, FinanceModule, NamazModule};
use masjid_console::session::{Role, Session};
use masjid_console::settings::Settings;
use masjid_console::store::cache::{QueryKey, RowSet};
use masjid_console::store::client::{Direction, TableStore};
use masjid_console::store::worker::{MutationOrigin, StoreHandle};

/// Store that answers every request with nothing; these tests only exercise
/// module state, never the worker round trip.
struct NullStore;

impl TableStore for NullStore {
    fn select(
        &self,
        _table: &'static str,
        _order: Option<(&'static str, Direction)>,
    ) -> anyhow::Result<Vec<Value>> {
        Ok(Vec::new())
    }

    fn select_one(
        &self,
        _table: &'static str,
        _filter: Option<(&'static str, String)>,
        _order: Option<(&'static str, Direction)>,
    ) -> anyhow::Result<Option<Value>> {
        Ok(None)
    }

    fn insert(&self, _table: &'static str, _row: Value) -> anyhow::Result<()> {
        Ok(())
    }

    fn update(&self, _table: &'static str, _id: &str, _patch: Value) -> anyhow::Result<()> {
        Ok(())
    }

    fn delete(&self, _table: &'static str, _id: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

fn new_app() -> ConsoleApp {
    let handle = StoreHandle::spawn(NullStore, Session::default());
    ConsoleApp::new(handle, Settings::default())
}

#[test]
fn failed_create_leaves_the_dialog_open_with_its_fields() {
    let mut app = new_app();
    let mut finance = FinanceModule::default();
    finance.dialog.open = true;
    finance.dialog.title = "Carpet cleaning".to_string();
    finance.dialog.amount = "1200".to_string();

    finance.on_mutation(
        MutationOrigin::AddExpense,
        Err("permission denied".to_string()),
        &mut app,
    );

    assert!(finance.dialog.open);
    assert_eq!(finance.dialog.title, "Carpet cleaning");
    assert_eq!(finance.dialog.amount, "1200");
    assert!(!app.cache.is_stale(QueryKey::Expenses));
}

#[test]
fn successful_create_closes_clears_and_invalidates() {
    let mut app = new_app();
    let mut finance = FinanceModule::default();
    finance.dialog.open = true;
    finance.dialog.title = "Carpet cleaning".to_string();
    finance.dialog.amount = "1200".to_string();

    finance.on_mutation(MutationOrigin::AddExpense, Ok(()), &mut app);

    assert!(!finance.dialog.open);
    assert!(finance.dialog.title.is_empty());
    assert_eq!(finance.dialog.category, "general");
    // Financial mutations also refresh the account aggregate.
    assert!(app.cache.is_stale(QueryKey::Expenses));
    assert!(app.cache.is_stale(QueryKey::Account));
}

#[test]
fn chanda_delete_invalidates_list_and_account() {
    let mut app = new_app();
    let mut chanda = ChandaModule::default();

    chanda.on_mutation(MutationOrigin::DeleteChanda, Ok(()), &mut app);

    assert!(app.cache.is_stale(QueryKey::Chanda));
    assert!(app.cache.is_stale(QueryKey::Account));
}

#[test]
fn namaz_update_invalidates_only_timings() {
    let mut app = new_app();
    let mut namaz = NamazModule::default();
    namaz.dialog.open = true;
    namaz.dialog.timing_id = "n1".to_string();
    namaz.dialog.time = "05:45".to_string();

    namaz.on_mutation(MutationOrigin::UpdateTiming, Ok(()), &mut app);

    assert!(!namaz.dialog.open);
    assert!(app.cache.is_stale(QueryKey::NamazTimings));
    assert!(!app.cache.is_stale(QueryKey::Account));
}

#[test]
fn admin_gate_follows_the_fetched_role() {
    let mut app = new_app();
    // Until the role row lands the viewer is treated as a plain user.
    assert!(!app.is_admin());

    app.cache.apply(QueryKey::Role, Ok(RowSet::Role(Role::User)));
    assert!(!app.is_admin());

    app.cache.apply(QueryKey::Role, Ok(RowSet::Role(Role::Admin)));
    assert!(app.is_admin());
}

#[test]
fn role_parsing_defaults_to_user() {
    assert_eq!(Role::parse("admin"), Role::Admin);
    assert_eq!(Role::parse("user"), Role::User);
    assert_eq!(Role::parse("moderator"), Role::User);
    assert_eq!(Role::parse(""), Role::User);
}

#[test]
fn expense_payload_requires_title_and_numeric_amount() {
    let mut finance = FinanceModule::default();
    assert!(finance.dialog.payload().is_none());

    finance.dialog.title = "Carpet cleaning".to_string();
    finance.dialog.amount = "not a number".to_string();
    assert!(finance.dialog.payload().is_none());

    finance.dialog.amount = "1200.50".to_string();
    let row = finance.dialog.payload().unwrap();
    assert_eq!(row["title"], "Carpet cleaning");
    assert_eq!(row["amount"], 1200.5);
    assert_eq!(row["category"], "general");
}

#[test]
fn chanda_payload_requires_member_and_amount() {
    let mut chanda = ChandaModule::default();
    chanda.dialog.member_name = "  ".to_string();
    chanda.dialog.amount = "100".to_string();
    assert!(chanda.dialog.payload().is_none());

    chanda.dialog.member_name = "Ahmed".to_string();
    let row = chanda.dialog.payload().unwrap();
    assert_eq!(row["member_name"], "Ahmed");
    assert_eq!(row["amount"], 100.0);
}

#[test]
fn timing_payload_requires_a_parsable_time() {
    let mut namaz = NamazModule::default();
    namaz.dialog.time = "quarter past five".to_string();
    assert!(namaz.dialog.payload().is_none());

    namaz.dialog.time = "05:45".to_string();
    let patch = namaz.dialog.payload().unwrap();
    assert_eq!(patch["prayer_time"], "05:45");
}

#[test]
fn time_validation_accepts_both_clock_forms() {
    assert!(valid_time("05:45"));
    assert!(valid_time("17:30:00"));
    assert!(!valid_time("25:00"));
    assert!(!valid_time("soon"));
}
