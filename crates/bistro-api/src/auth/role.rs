// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Stored user roles.

use std::fmt;
use std::str::FromStr;

use bistro_store::Document;
use serde::{Deserialize, Serialize};

/// Name of the role field on a user record.
pub const ROLE_FIELD: &str = "role";

/// Role of a registered user.
///
/// Roles live on the user record, not in the token, so an elevation takes
/// effect on the caller's next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer.
    #[default]
    User,
    /// Administrator allowed to manage the menu and users.
    Admin,
}

impl Role {
    /// Returns the role name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Reads the role from a user record.
    ///
    /// A missing or unrecognized `role` field means [`Role::User`].
    pub fn of(record: &Document) -> Self {
        record
            .get(ROLE_FIELD)
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Returns `true` for [`Role::Admin`].
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}
