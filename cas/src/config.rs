//! Configuration for the records desk CLI
//!
//! Command line arguments come from clap with environment fallbacks. The
//! account directory is seeded from a YAML file, or from the demo accounts
//! when no file is given.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use access::audit::MAX_AUDIT_ENTRIES;
use access::{catalog, demo_accounts, Account, AccessError, AuditLog, Directory, RoleRegistry};

/// CAS records desk operator tool
#[derive(Parser, Debug, Clone)]
#[command(name = "cas")]
#[command(about = "Permission and case taxonomy checks for the CAS records desk")]
pub struct Args {
    /// Directory seed file (YAML). Demo accounts are used when absent
    #[arg(long, env = "CAS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit JSON output and JSON logs
    #[arg(long, env = "CAS_JSON", default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check whether an account holds a permission
    Check {
        username: String,
        /// Permission token, e.g. write_cases
        token: String,
    },

    /// List the navigation sections an account can see
    Nav { username: String },

    /// List the sections of a case type in display order
    Sections {
        /// criminal or civil
        case_type: String,
    },

    /// Validate populated sections for a case type
    Validate {
        case_type: String,
        /// Populated section ids or labels
        sections: Vec<String>,
    },

    /// Summarize every role
    Roles,

    /// Authenticate an account and show the resulting principal
    Login {
        username: String,
        #[arg(long, env = "CAS_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Access(#[from] AccessError),
}

/// A custom role added on top of the built-in ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Catalog tokens. A new role holds `read_dashboard` when empty
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Entries kept before the oldest are dropped
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_max_entries() -> usize {
    MAX_AUDIT_ENTRIES
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            max_entries: MAX_AUDIT_ENTRIES,
        }
    }
}

/// Directory seed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub roles: Vec<RoleConfig>,
    #[serde(default)]
    pub audit: AuditConfig,
}

impl DeskConfig {
    /// The four demo accounts with the built-in roles.
    pub fn demo() -> Result<Self, ConfigError> {
        Ok(Self {
            accounts: demo_accounts()?,
            ..Default::default()
        })
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Load from `path`, or fall back to the demo seed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Self::demo();
        };
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_yaml(&yaml)?)
    }

    /// Check references between accounts, roles and the permission catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.audit.max_entries == 0 {
            return Err(ConfigError::Invalid("audit.max_entries must be at least 1".to_string()));
        }

        let mut role_ids: HashSet<String> = RoleRegistry::builtin()
            .all()
            .iter()
            .map(|r| r.id.clone())
            .collect();
        for role in &self.roles {
            for token in &role.permissions {
                if !catalog::is_known(token) {
                    return Err(ConfigError::Invalid(format!(
                        "role {:?} grants unknown permission {:?}",
                        role.name, token
                    )));
                }
            }
            role_ids.insert(access::roles::role_id_from_name(&role.name));
        }

        let mut usernames = HashSet::new();
        for account in &self.accounts {
            if !usernames.insert(account.username.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate account {:?}",
                    account.username
                )));
            }
            if !role_ids.contains(account.effective_role_id()) {
                return Err(ConfigError::Invalid(format!(
                    "account {:?} references unknown role {:?}",
                    account.username,
                    account.effective_role_id()
                )));
            }
        }
        Ok(())
    }

    /// Build the role registry and account directory.
    pub fn directory(&self) -> Result<Directory, ConfigError> {
        let mut roles = RoleRegistry::builtin();
        for role in &self.roles {
            let id = roles.create(&role.name, &role.description)?.id.clone();
            if !role.permissions.is_empty() {
                roles.set_permissions(&id, &role.permissions)?;
            }
        }
        Ok(Directory::new(self.accounts.clone(), roles)?)
    }

    pub fn audit_log(&self) -> AuditLog {
        AuditLog::with_max_entries(self.audit.max_entries)
    }
}
