use std::collections::{HashMap, HashSet};

use crate::session::Role;
use crate::store::records::{
    Account, Asset, ChandaCollection, CommitteeMember, Expense, NamazTiming, Notification,
    Profile,
};

/// Names for the cached query results. Mutations invalidate keys rather than
/// touching rows directly; the list only changes after the refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Account,
    Profile,
    Role,
    Expenses,
    Chanda,
    Assets,
    Committee,
    NamazTimings,
    Notifications,
}

impl QueryKey {
    pub const ALL: [QueryKey; 9] = [
        QueryKey::Account,
        QueryKey::Profile,
        QueryKey::Role,
        QueryKey::Expenses,
        QueryKey::Chanda,
        QueryKey::Assets,
        QueryKey::Committee,
        QueryKey::NamazTimings,
        QueryKey::Notifications,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QueryKey::Account => "account",
            QueryKey::Profile => "profile",
            QueryKey::Role => "role",
            QueryKey::Expenses => "expenses",
            QueryKey::Chanda => "chanda",
            QueryKey::Assets => "assets",
            QueryKey::Committee => "committee",
            QueryKey::NamazTimings => "namaz-timings",
            QueryKey::Notifications => "notifications",
        }
    }
}

/// One fetched result set, tagged with the key it belongs to.
#[derive(Debug, Clone)]
pub enum RowSet {
    Account(Option<Account>),
    Profile(Option<Profile>),
    Role(Role),
    Expenses(Vec<Expense>),
    Chanda(Vec<ChandaCollection>),
    Assets(Vec<Asset>),
    Committee(Vec<CommitteeMember>),
    NamazTimings(Vec<NamazTiming>),
    Notifications(Vec<Notification>),
}

impl RowSet {
    pub fn key(&self) -> QueryKey {
        match self {
            RowSet::Account(_) => QueryKey::Account,
            RowSet::Profile(_) => QueryKey::Profile,
            RowSet::Role(_) => QueryKey::Role,
            RowSet::Expenses(_) => QueryKey::Expenses,
            RowSet::Chanda(_) => QueryKey::Chanda,
            RowSet::Assets(_) => QueryKey::Assets,
            RowSet::Committee(_) => QueryKey::Committee,
            RowSet::NamazTimings(_) => QueryKey::NamazTimings,
            RowSet::Notifications(_) => QueryKey::Notifications,
        }
    }
}

/// Latest snapshot per query key plus the bookkeeping marks driving
/// refetches: `pending` while a fetch is in flight, `stale` once a mutation
/// invalidated the key. A stale key is turned into a fetch as soon as no
/// fetch for it is in flight.
#[derive(Default)]
pub struct QueryCache {
    pub account: Option<Account>,
    pub profile: Option<Profile>,
    pub role: Option<Role>,
    pub expenses: Vec<Expense>,
    pub chanda: Vec<ChandaCollection>,
    pub assets: Vec<Asset>,
    pub committee: Vec<CommitteeMember>,
    pub namaz_timings: Vec<NamazTiming>,
    pub notifications: Vec<Notification>,
    pending: HashSet<QueryKey>,
    stale: HashSet<QueryKey>,
    fetched: HashSet<QueryKey>,
    errors: HashMap<QueryKey, String>,
}

impl QueryCache {
    pub fn mark_pending(&mut self, key: QueryKey) {
        self.pending.insert(key);
    }

    /// Mark a key stale so the next frame refetches it.
    pub fn invalidate(&mut self, key: QueryKey) {
        self.stale.insert(key);
    }

    /// Stale keys with no fetch in flight, cleared from the stale set. Keys
    /// invalidated while a fetch is in flight stay stale until that fetch
    /// lands, then get picked up here.
    pub fn take_stale(&mut self) -> Vec<QueryKey> {
        let due: Vec<QueryKey> = QueryKey::ALL
            .iter()
            .copied()
            .filter(|k| self.stale.contains(k) && !self.pending.contains(k))
            .collect();
        for key in &due {
            self.stale.remove(key);
        }
        due
    }

    pub fn apply(&mut self, key: QueryKey, result: Result<RowSet, String>) {
        self.pending.remove(&key);
        match result {
            Ok(rows) => {
                debug_assert_eq!(rows.key(), key);
                self.errors.remove(&key);
                self.fetched.insert(key);
                match rows {
                    RowSet::Account(account) => self.account = account,
                    RowSet::Profile(profile) => self.profile = profile,
                    RowSet::Role(role) => self.role = Some(role),
                    RowSet::Expenses(rows) => self.expenses = rows,
                    RowSet::Chanda(rows) => self.chanda = rows,
                    RowSet::Assets(rows) => self.assets = rows,
                    RowSet::Committee(rows) => self.committee = rows,
                    RowSet::NamazTimings(rows) => self.namaz_timings = rows,
                    RowSet::Notifications(rows) => self.notifications = rows,
                }
            }
            Err(message) => {
                self.errors.insert(key, message);
            }
        }
    }

    /// True until the first result for the key has landed.
    pub fn is_loading(&self, key: QueryKey) -> bool {
        self.pending.contains(&key) && !self.fetched.contains(&key)
    }

    pub fn is_pending(&self, key: QueryKey) -> bool {
        self.pending.contains(&key)
    }

    pub fn is_stale(&self, key: QueryKey) -> bool {
        self.stale.contains(&key)
    }

    pub fn error(&self, key: QueryKey) -> Option<&str> {
        self.errors.get(&key).map(String::as_str)
    }
}
