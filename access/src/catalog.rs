//! The closed catalog of permission tokens.
//!
//! The catalog drives role editing and reporting. It is advisory: the
//! evaluator never consults it, so a token outside the catalog is checked by
//! plain membership like any other.

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Sentinel token that grants every permission.
pub const ALL_PERMISSIONS: &str = "all";

/// Grouping used when presenting the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum PermissionCategory {
    Dashboard,
    Cases,
    CriminalRecords,
    Evidence,
    SuspectsAndWitnesses,
    Map,
    Search,
    Notifications,
    Audit,
    UserManagement,
    Settings,
}

impl PermissionCategory {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Cases => "Cases",
            Self::CriminalRecords => "Criminal Records",
            Self::Evidence => "Evidence",
            Self::SuspectsAndWitnesses => "Suspects & Witnesses",
            Self::Map => "Map & Location",
            Self::Search => "Search & Filter",
            Self::Notifications => "Notifications",
            Self::Audit => "Audit & Logs",
            Self::UserManagement => "User Management",
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for PermissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionDefinition {
    /// Token checked by the evaluator
    pub token: &'static str,
    /// Short human-readable name
    pub name: &'static str,
    /// What the permission unlocks
    pub description: &'static str,
    pub category: PermissionCategory,
    /// Flags destructive or sensitive permissions in summaries
    pub critical: bool,
}

const fn def(
    token: &'static str,
    name: &'static str,
    description: &'static str,
    category: PermissionCategory,
    critical: bool,
) -> PermissionDefinition {
    PermissionDefinition {
        token,
        name,
        description,
        category,
        critical,
    }
}

use PermissionCategory as C;

/// Every permission known to the system, in presentation order.
pub static CATALOG: &[PermissionDefinition] = &[
    // Dashboard
    def("read_dashboard", "View Dashboard", "Access to main dashboard and statistics", C::Dashboard, false),
    // Cases
    def("read_cases", "View Cases", "View case information and details", C::Cases, false),
    def("write_cases", "Create/Edit Cases", "Create new cases and edit existing ones", C::Cases, false),
    def("delete_cases", "Delete Cases", "Delete case records", C::Cases, true),
    def("case_intake", "Case Intake", "Access to case intake forms", C::Cases, false),
    def("forward_prosecution", "Forward to Prosecution", "Forward cases to prosecution system", C::Cases, true),
    // Criminal records
    def("read_criminals", "View Criminal Records", "Access criminal record information", C::CriminalRecords, false),
    def("write_criminals", "Create/Edit Criminal Records", "Create and modify criminal records", C::CriminalRecords, false),
    def("delete_criminals", "Delete Criminal Records", "Delete criminal records", C::CriminalRecords, true),
    // Evidence
    def("read_evidence", "View Evidence", "Access evidence files and chain of custody", C::Evidence, false),
    def("write_evidence", "Upload/Edit Evidence", "Upload new evidence and edit existing", C::Evidence, false),
    def("delete_evidence", "Delete Evidence", "Delete evidence records", C::Evidence, true),
    // Suspects & witnesses
    def("read_suspects", "View Suspects/Witnesses", "Access suspect and witness information", C::SuspectsAndWitnesses, false),
    def("write_suspects", "Manage Suspects/Witnesses", "Add and edit suspect/witness records", C::SuspectsAndWitnesses, false),
    // Map
    def("read_map", "View Crime Map", "Access crime mapping and location data", C::Map, false),
    // Search
    def("read_search", "Search System", "Use search and filter functionality", C::Search, false),
    // Notifications
    def("read_notifications", "View Notifications", "Receive and view system notifications", C::Notifications, false),
    // Audit
    def("read_audit", "View Audit Logs", "Access system audit logs and activity", C::Audit, false),
    // User management
    def("manage_users", "Manage Users", "Create, edit, and manage user accounts", C::UserManagement, true),
    def("manage_roles", "Manage Roles", "Create and modify user roles and permissions", C::UserManagement, true),
    // Settings
    def("read_settings", "View Settings", "Access system settings and configuration", C::Settings, false),
    def("write_settings", "Modify Settings", "Change system settings and configuration", C::Settings, true),
];

/// Look up a catalog entry by token.
pub fn lookup(token: &str) -> Option<&'static PermissionDefinition> {
    CATALOG.iter().find(|d| d.token == token)
}

/// Whether the token is part of the catalog.
pub fn is_known(token: &str) -> bool {
    lookup(token).is_some()
}

/// Whether the token is flagged critical. Unknown tokens are not.
pub fn is_critical(token: &str) -> bool {
    lookup(token).map(|d| d.critical).unwrap_or(false)
}

/// All catalog tokens in presentation order.
pub fn all_tokens() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|d| d.token)
}

/// Catalog entries grouped by category, categories in first-seen order.
pub fn grouped() -> Vec<(PermissionCategory, Vec<&'static PermissionDefinition>)> {
    let mut groups: Vec<(PermissionCategory, Vec<&'static PermissionDefinition>)> = Vec::new();
    for def in CATALOG {
        match groups.iter_mut().find(|(c, _)| *c == def.category) {
            Some((_, entries)) => entries.push(def),
            None => groups.push((def.category, vec![def])),
        }
    }
    groups
}
