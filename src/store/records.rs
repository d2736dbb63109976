use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const ACCOUNTS_TABLE: &str = "accounts";
pub const PROFILES_TABLE: &str = "profiles";
pub const USER_ROLES_TABLE: &str = "user_roles";
pub const EXPENSES_TABLE: &str = "expenses";
pub const CHANDA_TABLE: &str = "chanda_collections";
pub const ASSETS_TABLE: &str = "assets";
pub const COMMITTEE_TABLE: &str = "committee_members";
pub const NAMAZ_TABLE: &str = "namaz_timings";
pub const NOTIFICATIONS_TABLE: &str = "notifications";

/// Singleton aggregate row. The balance invariant
/// (balance = chanda collected - expenses) is maintained by the data store,
/// never recomputed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub balance: f64,
    pub total_chanda_collected: f64,
    pub total_expenses: f64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub expense_date: NaiveDate,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChandaCollection {
    pub id: String,
    /// Free text, deliberately not a foreign key into any member table.
    pub member_name: String,
    pub amount: f64,
    pub collection_date: NaiveDate,
    #[serde(default)]
    pub collection_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub item_name: String,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeMember {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_leader: Option<bool>,
    #[serde(default)]
    pub is_accountant: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamazTiming {
    pub id: String,
    pub prayer_name: String,
    /// Stored as an `HH:MM:SS` (or `HH:MM`) wall-clock string.
    pub prayer_time: String,
    /// Sort key only, not identity.
    pub display_order: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NamazTiming {
    /// Truncate the stored time to `HH:MM` for display.
    pub fn display_time(&self) -> &str {
        self.prayer_time.get(..5).unwrap_or(&self.prayer_time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn priority_label(&self) -> &str {
        self.priority.as_deref().unwrap_or("normal")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRole {
    pub id: String,
    pub user_id: String,
    pub role: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Sum of the currently loaded chanda amounts. Recomputed on every render
/// from whatever rows are loaded; may diverge from the account aggregate if
/// the loaded set is ever partial.
pub fn chanda_total(rows: &[ChandaCollection]) -> f64 {
    rows.iter().map(|c| c.amount).sum()
}
