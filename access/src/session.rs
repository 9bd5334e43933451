//! Session/identity provider.
//!
//! The provider is the only place a [`Principal`] is built. Callers hold the
//! returned snapshot and pass it explicitly to whatever needs to decide.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::{AccessError, Result};
use crate::evaluator::PermissionSet;
use crate::password::{hash_password, verify_account};
use crate::principal::{Principal, RoleTag};
use crate::roles::RoleRegistry;

/// A stored account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub department: String,
    pub role: RoleTag,
    /// Registry role whose bundle applies; defaults to the tag's built-in role
    #[serde(default)]
    pub role_id: Option<String>,
    /// Argon2 PHC string
    pub password_hash: String,
    /// Explicit grants; when absent the role bundle applies
    #[serde(default)]
    pub permissions: Option<PermissionSet>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Account {
    /// Registry id of the role this account holds.
    pub fn effective_role_id(&self) -> &str {
        self.role_id
            .as_deref()
            .unwrap_or_else(|| self.role.builtin_role_id())
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub session_id: String,
    pub principal: Principal,
    pub started_at: DateTime<Utc>,
}

/// Supplies the current principal.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Authenticate and start a session, replacing any existing one.
    async fn login(&self, username: &str, password: &str) -> Result<Session>;

    /// End the current session, returning it if there was one.
    async fn logout(&self) -> Option<Session>;

    /// Snapshot of the signed-in principal.
    async fn current(&self) -> Option<Principal>;
}

/// In-memory account directory.
pub struct Directory {
    accounts: HashMap<String, Account>,
    roles: RoleRegistry,
    session: Arc<RwLock<Option<Session>>>,
}

impl Directory {
    /// Build a directory. Each account is counted against its role.
    ///
    /// Usernames must be unique.
    pub fn new(accounts: Vec<Account>, mut roles: RoleRegistry) -> Result<Self> {
        let mut by_name = HashMap::new();
        for account in accounts {
            if by_name.contains_key(&account.username) {
                return Err(AccessError::DuplicateAccount(account.username));
            }
            roles.assign_user(account.effective_role_id())?;
            by_name.insert(account.username.clone(), account);
        }
        Ok(Self {
            accounts: by_name,
            roles,
            session: Arc::new(RwLock::new(None)),
        })
    }

    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    pub fn account(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    /// Grants in force for an account.
    pub fn permissions_for(&self, account: &Account) -> PermissionSet {
        if let Some(explicit) = &account.permissions {
            return explicit.clone();
        }
        self.roles
            .get(account.effective_role_id())
            .map(|r| r.permissions.clone())
            .unwrap_or_default()
    }

    /// Principal snapshot for an account, without authenticating.
    pub fn principal_for(&self, account: &Account, now: DateTime<Utc>) -> Principal {
        Principal {
            id: account.id.clone(),
            username: account.username.clone(),
            display_name: account.display_name.clone(),
            badge: account.badge.clone(),
            department: account.department.clone(),
            role: account.role,
            permissions: self.permissions_for(account),
            is_active: account.is_active,
            last_login: Some(now),
        }
    }
}

#[async_trait]
impl SessionProvider for Directory {
    async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let Some(account) = self.accounts.get(username) else {
            warn!(user = %username, "Login rejected: unknown account");
            return Err(AccessError::Authentication(username.to_string()));
        };

        verify_account(account, password)?;

        if !account.is_active {
            warn!(user = %username, "Login rejected: inactive account");
            return Err(AccessError::InactiveAccount(username.to_string()));
        }

        let now = Utc::now();
        let session = Session {
            session_id: uuid::Uuid::new_v4().to_string(),
            principal: self.principal_for(account, now),
            started_at: now,
        };

        info!(
            user = %account.id,
            role = %account.role,
            permissions = session.principal.permissions.len(),
            "Session started"
        );

        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    async fn logout(&self) -> Option<Session> {
        let ended = self.session.write().await.take();
        if let Some(session) = &ended {
            info!(user = %session.principal.id, "Session ended");
        }
        ended
    }

    async fn current(&self) -> Option<Principal> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.principal.clone())
    }
}

/// The four demo accounts of the records desk, with freshly hashed passwords.
pub fn demo_accounts() -> Result<Vec<Account>> {
    let seed = [
        ("1", "admin", "Admin Officer", "ADM001", "Administration", RoleTag::Administrator),
        ("2", "officer", "John Smith", "OFF001", "Patrol Division", RoleTag::FieldOfficer),
        ("3", "detective", "Sarah Brown", "DET001", "Criminal Investigation Division", RoleTag::Detective),
        ("4", "supervisor", "Michael Johnson", "SUP001", "Operations", RoleTag::Supervisor),
    ];

    seed.into_iter()
        .map(|(id, username, name, badge, department, role)| -> Result<Account> {
            Ok(Account {
                id: id.to_string(),
                username: username.to_string(),
                display_name: name.to_string(),
                badge: badge.to_string(),
                department: department.to_string(),
                role,
                role_id: None,
                password_hash: hash_password(&format!("{username}123"))?,
                permissions: None,
                is_active: true,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Directory {
        Directory::new(demo_accounts().unwrap(), RoleRegistry::builtin()).unwrap()
    }

    #[tokio::test]
    async fn test_login_builds_principal_from_role() {
        let dir = directory();
        let session = dir.login("detective", "detective123").await.unwrap();
        let p = &session.principal;

        assert_eq!(p.role, RoleTag::Detective);
        assert!(p.can("forward_prosecution"));
        assert!(!p.can("manage_users"));
        assert!(p.last_login.is_some());
        assert_eq!(dir.current().await.as_ref(), Some(p));
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let dir = directory();
        assert!(matches!(
            dir.login("detective", "wrong").await,
            Err(AccessError::Authentication(_))
        ));
        assert!(matches!(
            dir.login("nobody", "nobody123").await,
            Err(AccessError::Authentication(_))
        ));
        assert!(dir.current().await.is_none());
    }

    #[tokio::test]
    async fn test_logout() {
        let dir = directory();
        dir.login("officer", "officer123").await.unwrap();
        let ended = dir.logout().await.unwrap();
        assert_eq!(ended.principal.username, "officer");
        assert!(dir.current().await.is_none());
        assert!(dir.logout().await.is_none());
    }

    #[tokio::test]
    async fn test_inactive_account() {
        let mut accounts = demo_accounts().unwrap();
        accounts[1].is_active = false;
        let dir = Directory::new(accounts, RoleRegistry::builtin()).unwrap();
        assert!(matches!(
            dir.login("officer", "officer123").await,
            Err(AccessError::InactiveAccount(_))
        ));
    }

    #[tokio::test]
    async fn test_explicit_permissions_override_role() {
        let mut accounts = demo_accounts().unwrap();
        accounts[1].permissions = Some(["read_dashboard"].into_iter().collect());
        let dir = Directory::new(accounts, RoleRegistry::builtin()).unwrap();
        let session = dir.login("officer", "officer123").await.unwrap();
        assert!(session.principal.can("read_dashboard"));
        assert!(!session.principal.can("read_cases"));
    }

    #[test]
    fn test_user_counts() {
        let dir = directory();
        for role in ["officer", "detective", "supervisor", "admin"] {
            assert_eq!(dir.roles().get(role).unwrap().user_count, 1);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        let mut accounts = demo_accounts().unwrap();
        accounts[0].role_id = Some("ghost".to_string());
        assert!(matches!(
            Directory::new(accounts, RoleRegistry::builtin()),
            Err(AccessError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let mut accounts = demo_accounts().unwrap();
        let mut twin = accounts[1].clone();
        twin.id = "5".to_string();
        twin.role = RoleTag::Administrator;
        accounts.push(twin);

        assert!(matches!(
            Directory::new(accounts, RoleRegistry::builtin()),
            Err(AccessError::DuplicateAccount(name)) if name == "officer"
        ));
    }

    #[test]
    fn test_login_blocking() {
        let dir = directory();
        let session = tokio_test::block_on(dir.login("supervisor", "supervisor123")).unwrap();
        assert_eq!(session.principal.role, RoleTag::Supervisor);
        assert!(tokio_test::block_on(dir.current()).is_some());
    }
}
