//! Authenticated principals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::error::AccessError;
use crate::evaluator::{has_permission, PermissionSet};

/// Role tag carried by a principal.
///
/// Accepts the short legacy tags (`officer`, `admin`) on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum RoleTag {
    #[serde(alias = "officer")]
    FieldOfficer,
    Detective,
    Supervisor,
    #[serde(alias = "admin")]
    Administrator,
}

impl RoleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FieldOfficer => "field-officer",
            Self::Detective => "detective",
            Self::Supervisor => "supervisor",
            Self::Administrator => "administrator",
        }
    }

    /// Id of the built-in role holding this tag's default bundle.
    pub fn builtin_role_id(&self) -> &'static str {
        match self {
            Self::FieldOfficer => "officer",
            Self::Detective => "detective",
            Self::Supervisor => "supervisor",
            Self::Administrator => "admin",
        }
    }

    pub fn all() -> [Self; 4] {
        [
            Self::FieldOfficer,
            Self::Detective,
            Self::Supervisor,
            Self::Administrator,
        ]
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleTag {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "field-officer" | "officer" => Ok(Self::FieldOfficer),
            "detective" => Ok(Self::Detective),
            "supervisor" => Ok(Self::Supervisor),
            "administrator" | "admin" => Ok(Self::Administrator),
            other => Err(AccessError::UnknownRole(other.to_string())),
        }
    }
}

/// An authenticated actor.
///
/// Built by a [`crate::session::SessionProvider`] at login and never mutated
/// afterwards; pass it explicitly to whatever needs to make a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub badge: String,
    pub department: String,
    pub role: RoleTag,
    pub permissions: PermissionSet,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
}

impl Principal {
    /// Whether this principal may perform the action guarded by `token`.
    ///
    /// Inactive principals are denied everything.
    pub fn can(&self, token: &str) -> bool {
        self.is_active && has_permission(Some(&self.permissions), token)
    }

    /// Whether the principal holds the `"all"` sentinel.
    pub fn is_superuser(&self) -> bool {
        self.is_active && self.permissions.grants_all()
    }
}

/// Evaluate against an optional principal, denying when nobody is signed in.
pub fn principal_can(principal: Option<&Principal>, token: &str) -> bool {
    principal.map(|p| p.can(token)).unwrap_or(false)
}
