use std::sync::mpsc::{channel, Receiver, Sender};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::session::{Role, Session};
use crate::store::cache::{QueryKey, RowSet};
use crate::store::client::{Direction, TableStore};
use crate::store::records::{
    UserRole, ACCOUNTS_TABLE, ASSETS_TABLE, CHANDA_TABLE, COMMITTEE_TABLE, EXPENSES_TABLE,
    NAMAZ_TABLE, NOTIFICATIONS_TABLE, PROFILES_TABLE, USER_ROLES_TABLE,
};

/// Identifies which UI action issued a mutation, so its completion event can
/// be routed back to the owning module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOrigin {
    AddExpense,
    DeleteExpense,
    AddChanda,
    DeleteChanda,
    AddAsset,
    DeleteAsset,
    AddMember,
    DeleteMember,
    UpdateTiming,
    PostNotice,
    DeleteNotice,
}

#[derive(Debug, Clone)]
pub enum Mutation {
    Insert {
        table: &'static str,
        row: Value,
    },
    Update {
        table: &'static str,
        id: String,
        patch: Value,
    },
    Delete {
        table: &'static str,
        id: String,
    },
}

enum StoreJob {
    Fetch(QueryKey),
    Mutate {
        origin: MutationOrigin,
        mutation: Mutation,
    },
}

#[derive(Debug)]
pub enum StoreEvent {
    Rows {
        key: QueryKey,
        result: Result<RowSet, String>,
    },
    MutationDone {
        origin: MutationOrigin,
        result: Result<(), String>,
    },
}

/// Handle to the store worker thread. Jobs run strictly in submission
/// order, so a mutation's completion event is always observed before the
/// refetch it triggers is even enqueued.
pub struct StoreHandle {
    tx: Sender<StoreJob>,
    rx: Receiver<StoreEvent>,
}

impl StoreHandle {
    /// Spawn the worker thread around any table store. Dropping the handle
    /// closes the job channel and ends the thread.
    pub fn spawn<S: TableStore + 'static>(store: S, session: Session) -> Self {
        let (job_tx, job_rx) = channel();
        let (event_tx, event_rx) = channel();
        std::thread::spawn(move || run(store, session, job_rx, event_tx));
        Self {
            tx: job_tx,
            rx: event_rx,
        }
    }

    pub fn fetch(&self, key: QueryKey) {
        let _ = self.tx.send(StoreJob::Fetch(key));
    }

    pub fn mutate(&self, origin: MutationOrigin, mutation: Mutation) {
        let _ = self.tx.send(StoreJob::Mutate { origin, mutation });
    }

    pub fn try_event(&self) -> Option<StoreEvent> {
        self.rx.try_recv().ok()
    }
}

fn run<S: TableStore>(
    store: S,
    session: Session,
    jobs: Receiver<StoreJob>,
    events: Sender<StoreEvent>,
) {
    while let Ok(job) = jobs.recv() {
        let event = match job {
            StoreJob::Fetch(key) => {
                tracing::debug!(key = key.name(), "fetching rows");
                let result = fetch_rows(&store, &session, key).map_err(|e| e.to_string());
                if let Err(message) = &result {
                    tracing::warn!(key = key.name(), %message, "fetch failed");
                }
                StoreEvent::Rows { key, result }
            }
            StoreJob::Mutate { origin, mutation } => {
                tracing::debug!(?origin, "applying mutation");
                let result = apply_mutation(&store, &mutation).map_err(|e| e.to_string());
                if let Err(message) = &result {
                    tracing::warn!(?origin, %message, "mutation failed");
                }
                StoreEvent::MutationDone { origin, result }
            }
        };
        if events.send(event).is_err() {
            break;
        }
    }
}

fn fetch_rows<S: TableStore>(
    store: &S,
    session: &Session,
    key: QueryKey,
) -> anyhow::Result<RowSet> {
    Ok(match key {
        QueryKey::Account => RowSet::Account(single(store.select_one(ACCOUNTS_TABLE, None, None)?)?),
        QueryKey::Profile => match &session.user_id {
            Some(id) => RowSet::Profile(single(store.select_one(
                PROFILES_TABLE,
                Some(("id", id.clone())),
                None,
            )?)?),
            None => RowSet::Profile(None),
        },
        QueryKey::Role => match &session.user_id {
            Some(id) => {
                let row = store.select_one(
                    USER_ROLES_TABLE,
                    Some(("user_id", id.clone())),
                    Some(("created_at", Direction::Desc)),
                )?;
                let role = single::<UserRole>(row)?
                    .map(|assignment| Role::parse(&assignment.role))
                    .unwrap_or(Role::User);
                RowSet::Role(role)
            }
            None => RowSet::Role(Role::User),
        },
        QueryKey::Expenses => RowSet::Expenses(rows(
            store.select(EXPENSES_TABLE, Some(("expense_date", Direction::Desc)))?,
        )?),
        QueryKey::Chanda => RowSet::Chanda(rows(
            store.select(CHANDA_TABLE, Some(("collection_date", Direction::Desc)))?,
        )?),
        QueryKey::Assets => RowSet::Assets(rows(
            store.select(ASSETS_TABLE, Some(("item_name", Direction::Asc)))?,
        )?),
        QueryKey::Committee => RowSet::Committee(rows(
            store.select(COMMITTEE_TABLE, Some(("name", Direction::Asc)))?,
        )?),
        QueryKey::NamazTimings => RowSet::NamazTimings(rows(
            store.select(NAMAZ_TABLE, Some(("display_order", Direction::Asc)))?,
        )?),
        QueryKey::Notifications => RowSet::Notifications(rows(
            store.select(NOTIFICATIONS_TABLE, Some(("created_at", Direction::Desc)))?,
        )?),
    })
}

fn apply_mutation<S: TableStore>(store: &S, mutation: &Mutation) -> anyhow::Result<()> {
    match mutation {
        Mutation::Insert { table, row } => store.insert(table, row.clone()),
        Mutation::Update { table, id, patch } => store.update(table, id, patch.clone()),
        Mutation::Delete { table, id } => store.delete(table, id),
    }
}

fn rows<T: DeserializeOwned>(values: Vec<Value>) -> anyhow::Result<Vec<T>> {
    values
        .into_iter()
        .map(|value| Ok(serde_json::from_value(value)?))
        .collect()
}

fn single<T: DeserializeOwned>(value: Option<Value>) -> anyhow::Result<Option<T>> {
    value
        .map(|v| Ok(serde_json::from_value(v)?))
        .transpose()
}
