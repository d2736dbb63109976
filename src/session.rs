use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Role derived from the role-assignment table. The sole authorization
/// mechanism: admins see write-capable controls, everyone else reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Unknown role strings fall back to the unprivileged role.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// Identity of the viewer as supplied by configuration. The application
/// never authenticates; it only threads this id into profile and role
/// lookups.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user_id: Option<String>,
}

impl Session {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            user_id: settings
                .user_id
                .clone()
                .filter(|id| !id.trim().is_empty()),
        }
    }
}
