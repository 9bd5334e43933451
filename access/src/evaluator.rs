//! The permission evaluator.
//!
//! Every UI decision point funnels through [`has_permission`]. It is a pure
//! function: no I/O, no logging, no shared state.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

use crate::catalog::ALL_PERMISSIONS;
use crate::error::{AccessError, Result};

/// A principal's granted permission tokens.
///
/// Deduplicated and order-irrelevant. Kept sorted so that digests and
/// serialized forms are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set holding only the `"all"` sentinel.
    pub fn everything() -> Self {
        [ALL_PERMISSIONS].into_iter().collect()
    }

    /// Parse an untrusted JSON value.
    ///
    /// Returns `None` unless the value is an array of strings; callers treat
    /// `None` as an absent set, which the evaluator denies.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let items = value.as_array()?;
        items
            .iter()
            .map(|v| v.as_str().map(str::to_owned))
            .collect::<Option<BTreeSet<_>>>()
            .map(Self)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Whether the sentinel is present.
    pub fn grants_all(&self) -> bool {
        self.0.contains(ALL_PERMISSIONS)
    }

    /// Insert a token; returns whether it was newly added.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        self.0.insert(token.into())
    }

    /// Remove a token; returns whether it was present.
    pub fn remove(&mut self, token: &str) -> bool {
        self.0.remove(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// SHA-256 hex digest over the sorted tokens.
    ///
    /// Recorded in audit entries to identify the grant set in force.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for token in &self.0 {
            hasher.update(token.as_bytes());
            hasher.update([0u8]);
        }
        hex::encode(hasher.finalize())
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Decide whether `permissions` grants `token`.
///
/// Fails closed: an absent set or an empty token is `false`. Otherwise the
/// token must be a member, or the `"all"` sentinel must be.
pub fn has_permission(permissions: Option<&PermissionSet>, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    match permissions {
        Some(set) => set.contains(token) || set.grants_all(),
        None => false,
    }
}

/// Strict variant of [`has_permission`] that reports an empty token as
/// [`AccessError::InvalidToken`] instead of folding it into `false`.
pub fn check(permissions: Option<&PermissionSet>, token: &str) -> Result<bool> {
    if token.is_empty() {
        return Err(AccessError::InvalidToken);
    }
    Ok(has_permission(permissions, token))
}

/// Like [`check`], but a negative answer becomes [`AccessError::Denied`].
pub fn require(permissions: Option<&PermissionSet>, token: &str) -> Result<()> {
    if check(permissions, token)? {
        Ok(())
    } else {
        Err(AccessError::Denied {
            token: token.to_string(),
        })
    }
}
