//! Roles: named bundles of default permissions.
//!
//! The registry keeps roles in creation order. The four built-in roles are
//! system roles and can never be deleted.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{self, CATALOG};
use crate::error::{AccessError, Result};
use crate::evaluator::PermissionSet;
use crate::principal::RoleTag;

/// Permission a freshly created role starts with.
const NEW_ROLE_DEFAULT: &str = "read_dashboard";

const OFFICER_BUNDLE: &[&str] = &[
    "read_dashboard",
    "read_cases",
    "write_cases",
    "case_intake",
    "read_criminals",
    "read_evidence",
    "write_evidence",
    "read_suspects",
    "write_suspects",
    "read_map",
    "read_search",
    "read_notifications",
];

const DETECTIVE_EXTRA: &[&str] = &["forward_prosecution", "write_criminals", "read_audit"];

const SUPERVISOR_EXTRA: &[&str] = &["read_settings"];

/// Default permission bundle for a built-in role tag.
pub fn default_permissions(tag: RoleTag) -> PermissionSet {
    match tag {
        RoleTag::FieldOfficer => OFFICER_BUNDLE.iter().copied().collect(),
        RoleTag::Detective => OFFICER_BUNDLE
            .iter()
            .chain(DETECTIVE_EXTRA)
            .copied()
            .collect(),
        RoleTag::Supervisor => OFFICER_BUNDLE
            .iter()
            .chain(DETECTIVE_EXTRA)
            .chain(SUPERVISOR_EXTRA)
            .copied()
            .collect(),
        RoleTag::Administrator => catalog::all_tokens().collect(),
    }
}

/// A named permission bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: PermissionSet,
    /// Number of principals holding the role. Informational.
    pub user_count: u32,
    /// Built-in roles cannot be deleted
    pub system: bool,
}

impl Role {
    fn builtin(tag: RoleTag, name: &str, description: &str, user_count: u32) -> Self {
        Self {
            id: tag.builtin_role_id().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            permissions: default_permissions(tag),
            user_count,
            system: true,
        }
    }
}

/// What happens to a role's holders when it is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionPolicy {
    /// Refuse while any principal holds the role
    Forbid,
    /// Move every holder to the named role, then delete
    ReassignTo(String),
}

/// Reporting view of a role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleSummary {
    pub role_id: String,
    pub name: String,
    pub user_count: u32,
    pub total_permissions: usize,
    pub critical_permissions: usize,
    /// Share of the catalog granted, rounded to a whole percent
    pub coverage_percent: u32,
}

/// Derive a role id from a display name.
pub fn role_id_from_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// In-memory role registry.
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    roles: Vec<Role>,
}

impl RoleRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the four system roles.
    pub fn builtin() -> Self {
        Self {
            roles: vec![
                Role::builtin(
                    RoleTag::FieldOfficer,
                    "Police Officer",
                    "Field officers with basic case and evidence access",
                    0,
                ),
                Role::builtin(
                    RoleTag::Detective,
                    "Detective",
                    "Investigators with enhanced access to cases and records",
                    0,
                ),
                Role::builtin(
                    RoleTag::Supervisor,
                    "Supervisor",
                    "Supervisory staff with oversight capabilities",
                    0,
                ),
                Role::builtin(
                    RoleTag::Administrator,
                    "Administrator",
                    "Full system access with all permissions",
                    0,
                ),
            ],
        }
    }

    pub fn get(&self, role_id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == role_id)
    }

    fn get_mut(&mut self, role_id: &str) -> Result<&mut Role> {
        self.roles
            .iter_mut()
            .find(|r| r.id == role_id)
            .ok_or_else(|| AccessError::UnknownRole(role_id.to_string()))
    }

    pub fn all(&self) -> &[Role] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Insert a fully formed role, e.g. one loaded from configuration.
    pub fn insert(&mut self, role: Role) -> Result<()> {
        if self.get(&role.id).is_some() {
            return Err(AccessError::DuplicateRole(role.id));
        }
        if let Some(unknown) = role.permissions.iter().find(|t| !catalog::is_known(t)) {
            return Err(AccessError::UnknownPermission(unknown.to_string()));
        }
        self.roles.push(role);
        Ok(())
    }

    /// Create a non-system role holding only the default permission.
    pub fn create(&mut self, name: &str, description: &str) -> Result<&Role> {
        let id = role_id_from_name(name);
        if id.is_empty() {
            return Err(AccessError::InvalidRoleName(name.to_string()));
        }
        if self.get(&id).is_some() {
            return Err(AccessError::DuplicateRole(id));
        }

        info!(role = %id, "Creating role");
        self.roles.push(Role {
            id,
            name: name.trim().to_string(),
            description: description.to_string(),
            permissions: [NEW_ROLE_DEFAULT].into_iter().collect(),
            user_count: 0,
            system: false,
        });
        Ok(&self.roles[self.roles.len() - 1])
    }

    /// Flip a permission on a role. Returns whether the role now holds it.
    pub fn toggle_permission(&mut self, role_id: &str, token: &str) -> Result<bool> {
        if !catalog::is_known(token) {
            return Err(AccessError::UnknownPermission(token.to_string()));
        }
        let role = self.get_mut(role_id)?;
        let granted = if role.permissions.remove(token) {
            false
        } else {
            role.permissions.insert(token);
            true
        };
        info!(role = %role_id, permission = %token, granted, "Toggled role permission");
        Ok(granted)
    }

    /// Replace a role's permissions wholesale.
    pub fn set_permissions<I, S>(&mut self, role_id: &str, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let permissions: PermissionSet = tokens.into_iter().collect();
        if let Some(unknown) = permissions.iter().find(|t| !catalog::is_known(t)) {
            return Err(AccessError::UnknownPermission(unknown.to_string()));
        }
        let role = self.get_mut(role_id)?;
        role.permissions = permissions;
        info!(role = %role_id, count = role.permissions.len(), "Replaced role permissions");
        Ok(())
    }

    /// Record one more principal holding the role.
    pub fn assign_user(&mut self, role_id: &str) -> Result<()> {
        let role = self.get_mut(role_id)?;
        role.user_count += 1;
        Ok(())
    }

    /// Record one fewer principal holding the role.
    pub fn unassign_user(&mut self, role_id: &str) -> Result<()> {
        let role = self.get_mut(role_id)?;
        role.user_count = role.user_count.saturating_sub(1);
        Ok(())
    }

    /// Delete a non-system role according to `policy`.
    pub fn delete(&mut self, role_id: &str, policy: &DeletionPolicy) -> Result<Role> {
        let index = self
            .roles
            .iter()
            .position(|r| r.id == role_id)
            .ok_or_else(|| AccessError::UnknownRole(role_id.to_string()))?;

        let role = &self.roles[index];
        if role.system {
            return Err(AccessError::SystemRole(role_id.to_string()));
        }
        let holders = role.user_count;

        match policy {
            DeletionPolicy::Forbid if holders > 0 => {
                return Err(AccessError::RoleInUse {
                    role: role_id.to_string(),
                    users: holders,
                });
            }
            DeletionPolicy::Forbid => {}
            DeletionPolicy::ReassignTo(target) => {
                if target == role_id {
                    return Err(AccessError::RoleInUse {
                        role: role_id.to_string(),
                        users: holders,
                    });
                }
                let target_role = self.get_mut(target)?;
                target_role.user_count += holders;
                info!(from = %role_id, to = %target, users = holders, "Reassigned role holders");
            }
        }

        info!(role = %role_id, "Deleted role");
        Ok(self.roles.remove(index))
    }

    /// Summary figures for a role.
    pub fn summary(&self, role_id: &str) -> Result<RoleSummary> {
        let role = self
            .get(role_id)
            .ok_or_else(|| AccessError::UnknownRole(role_id.to_string()))?;
        Ok(summarize(role))
    }

    /// Summaries for every role in registry order.
    pub fn summaries(&self) -> Vec<RoleSummary> {
        self.roles.iter().map(summarize).collect()
    }
}

fn summarize(role: &Role) -> RoleSummary {
    let total = role.permissions.len();
    let critical = role.permissions.iter().filter(|t| catalog::is_critical(t)).count();
    let coverage = ((total as f64 / CATALOG.len() as f64) * 100.0).round() as u32;
    RoleSummary {
        role_id: role.id.clone(),
        name: role.name.clone(),
        user_count: role.user_count,
        total_permissions: total,
        critical_permissions: critical,
        coverage_percent: coverage,
    }
}
