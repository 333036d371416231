//! Domain objects decoded from CloudFS responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account data: storage usage, plan, and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    /// Bytes currently stored.
    pub storage_usage: u64,
    /// Storage quota in bytes, absent for unlimited plans.
    #[serde(default)]
    pub storage_limit: Option<u64>,
    #[serde(default)]
    pub over_storage_limit: bool,
    #[serde(default)]
    pub state_id: Option<String>,
    #[serde(default)]
    pub state_display_name: Option<String>,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub plan_display_name: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

impl Account {
    /// Bytes left before the quota is reached, if the plan has one.
    pub fn storage_remaining(&self) -> Option<u64> {
        self.storage_limit
            .map(|limit| limit.saturating_sub(self.storage_usage))
    }
}

/// User data: identity and login history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Creation time, milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: Option<i64>,
    /// Last login time, milliseconds since the Unix epoch.
    #[serde(default)]
    pub last_login: Option<i64>,
}

impl User {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(DateTime::from_timestamp_millis)
    }

    pub fn last_login_utc(&self) -> Option<DateTime<Utc>> {
        self.last_login.and_then(DateTime::from_timestamp_millis)
    }

    /// "First Last", falling back to the username.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.username.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// Account and user data returned together by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    account: Account,
    user: User,
}

impl Profile {
    pub fn new(account: Account, user: User) -> Self {
        Self { account, user }
    }

    pub fn account_data(&self) -> &Account {
        &self.account
    }

    pub fn user_data(&self) -> &User {
        &self.user
    }

    pub fn into_parts(self) -> (Account, User) {
        (self.account, self.user)
    }
}

/// Generic result of a mutation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralResult {
    pub success: bool,
    /// Message echoed by the server, if any.
    #[serde(default)]
    pub message: Option<String>,
}
