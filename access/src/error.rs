//! Error types for access control operations.

/// Error types for permission, role and session operations.
///
/// Access denial from [`crate::has_permission`] is a plain `false`, not an
/// error. `Denied` only appears when a caller asks for a hard requirement via
/// [`crate::evaluator::require`].
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The required permission token was empty
    #[error("Invalid permission token: required token must not be empty")]
    InvalidToken,

    /// The principal lacks the required permission
    #[error("Permission denied: requires {token}")]
    Denied { token: String },

    /// Token is not part of the permission catalog
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// Role does not exist
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// A role with the same id already exists
    #[error("Role already exists: {0}")]
    DuplicateRole(String),

    /// Role name is blank
    #[error("Invalid role name: {0:?}")]
    InvalidRoleName(String),

    /// Built-in roles cannot be deleted
    #[error("Cannot delete system role: {0}")]
    SystemRole(String),

    /// Role still has principals assigned and the policy forbids deletion
    #[error("Role {role} is still assigned to {users} user(s)")]
    RoleInUse { role: String, users: u32 },

    /// Two accounts share a username
    #[error("Duplicate account username: {0}")]
    DuplicateAccount(String),

    /// Username/password did not match
    #[error("Authentication failed for {0}")]
    Authentication(String),

    /// Account exists but is disabled
    #[error("Account is inactive: {0}")]
    InactiveAccount(String),

    /// Password hashing failed or a stored hash is malformed
    #[error("Password hash error: {0}")]
    PasswordHash(String),
}

pub type Result<T> = std::result::Result<T, AccessError>;
