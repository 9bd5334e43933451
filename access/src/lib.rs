//! Access control for the CAS records desk
//!
//! Centralizes every "may this principal see or do this" decision:
//!
//! - [`has_permission`]: the pure permission evaluator
//! - [`catalog`]: the closed list of permission tokens and their categories
//! - [`RoleRegistry`]: built-in and custom role bundles
//! - [`SessionProvider`]: authentication and the current [`Principal`]
//! - [`AuditLog`]: bounded trail of recorded actions
//!
//! # Example
//!
//! ```
//! use access::{has_permission, PermissionSet};
//!
//! let perms: PermissionSet = ["read_cases", "case_intake"].into_iter().collect();
//! assert!(has_permission(Some(&perms), "read_cases"));
//! assert!(!has_permission(Some(&perms), "manage_users"));
//! assert!(!has_permission(None, "read_cases"));
//! ```

pub mod audit;
pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod navigation;
pub mod password;
pub mod principal;
pub mod roles;
pub mod session;

// Re-export main types
pub use audit::{AuditEntry, AuditLog};
pub use catalog::{PermissionCategory, PermissionDefinition, ALL_PERMISSIONS};
pub use error::{AccessError, Result};
pub use evaluator::{check, has_permission, require, PermissionSet};
pub use navigation::{visible_sections, NavSection};
pub use principal::{principal_can, Principal, RoleTag};
pub use roles::{DeletionPolicy, Role, RoleRegistry, RoleSummary};
pub use session::{demo_accounts, Account, Directory, Session, SessionProvider};
