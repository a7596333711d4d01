// Viewer module
// Who is looking at the calendar and what they may do

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Permission key required to create appointments.
pub const PERM_APPOINTMENTS_CREATE: &str = "agenda.appointments.create";

/// Permission key required to move or resize appointments.
pub const PERM_APPOINTMENTS_EDIT: &str = "agenda.appointments.edit";

/// Closed set of roles the console distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Provider,
    Client,
}

/// Identity snapshot built once per session.
///
/// `id` is the account (user) id. For providers it is matched against the
/// user id embedded in appointment payloads, for clients against the
/// client record's user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub id: i64,
    pub role: Role,
    permissions: HashSet<String>,
}

impl Viewer {
    pub fn new(id: i64, role: Role, permissions: impl IntoIterator<Item = String>) -> Self {
        Self {
            id,
            role,
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Admin viewer holding every appointment permission.
    pub fn admin(id: i64) -> Self {
        Self::new(
            id,
            Role::Admin,
            [
                PERM_APPOINTMENTS_CREATE.to_string(),
                PERM_APPOINTMENTS_EDIT.to_string(),
            ],
        )
    }

    pub fn has_permission(&self, key: &str) -> bool {
        self.permissions.contains(key)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_provider(&self) -> bool {
        self.role == Role::Provider
    }

    pub fn is_client(&self) -> bool {
        self.role == Role::Client
    }
}
