//! Audit trail of actions taken through the records desk.
//!
//! Entries are kept newest first and pruned from the oldest end once the
//! configured capacity is reached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::principal::Principal;

/// Default capacity before pruning.
pub const MAX_AUDIT_ENTRIES: usize = 10_000;

/// One recorded action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    /// Verb, e.g. `case_created`, `permission_denied`
    pub action: String,
    /// Kind of record acted on, e.g. `case`, `role`
    pub resource: String,
    pub resource_id: String,
    pub details: serde_json::Value,
    /// Digest of the actor's permission set at the time
    pub permission_digest: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded in-memory audit log.
#[derive(Debug, Clone)]
pub struct AuditLog {
    entries: VecDeque<AuditEntry>,
    max_entries: usize,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::with_max_entries(MAX_AUDIT_ENTRIES)
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Record an action by `actor`. Returns the new entry id.
    pub fn record(
        &mut self,
        actor: &Principal,
        action: &str,
        resource: &str,
        resource_id: &str,
        details: serde_json::Value,
    ) -> String {
        let entry = AuditEntry {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: actor.id.clone(),
            user_name: actor.display_name.clone(),
            action: action.to_string(),
            resource: resource.to_string(),
            resource_id: resource_id.to_string(),
            details,
            permission_digest: actor.permissions.digest(),
            timestamp: Utc::now(),
        };
        let id = entry.id.clone();

        tracing::debug!(
            user = %entry.user_id,
            action = %entry.action,
            resource = %entry.resource,
            resource_id = %entry.resource_id,
            "Audit entry recorded"
        );

        self.entries.push_front(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_back();
        }
        id
    }

    /// Most recent entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries.iter().take(limit).collect()
    }

    pub fn by_user(&self, user_id: &str) -> Vec<&AuditEntry> {
        self.entries.iter().filter(|e| e.user_id == user_id).collect()
    }

    pub fn by_resource(&self, resource: &str, resource_id: &str) -> Vec<&AuditEntry> {
        self.entries
            .iter()
            .filter(|e| e.resource == resource && e.resource_id == resource_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::PermissionSet;
    use crate::principal::RoleTag;
    use serde_json::json;

    fn actor(id: &str) -> Principal {
        Principal {
            id: id.to_string(),
            username: id.to_string(),
            display_name: format!("User {id}"),
            badge: String::new(),
            department: String::new(),
            role: RoleTag::Supervisor,
            permissions: ["read_audit"].into_iter().collect::<PermissionSet>(),
            is_active: true,
            last_login: None,
        }
    }

    #[test]
    fn test_newest_first() {
        let mut log = AuditLog::new();
        log.record(&actor("1"), "case_created", "case", "c-1", json!({}));
        log.record(&actor("1"), "status_changed", "case", "c-1", json!({"to": "court"}));

        let recent = log.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].action, "status_changed");
        assert_eq!(recent[1].action, "case_created");
    }

    #[test]
    fn test_pruning() {
        let mut log = AuditLog::with_max_entries(3);
        for i in 0..5 {
            log.record(&actor("1"), "note_added", "case", &i.to_string(), json!(null));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.recent(1)[0].resource_id, "4");
        assert!(log.by_resource("case", "0").is_empty());
    }

    #[test]
    fn test_filters() {
        let mut log = AuditLog::new();
        log.record(&actor("1"), "case_created", "case", "c-1", json!({}));
        log.record(&actor("2"), "role_created", "role", "clerk", json!({}));
        log.record(&actor("2"), "case_viewed", "case", "c-1", json!({}));

        assert_eq!(log.by_user("2").len(), 2);
        assert_eq!(log.by_resource("case", "c-1").len(), 2);
    }

    #[test]
    fn test_digest_recorded() {
        let mut log = AuditLog::new();
        let a = actor("1");
        log.record(&a, "login", "session", "s-1", json!({}));
        assert_eq!(log.recent(1)[0].permission_digest, a.permissions.digest());
    }
}
