//! Evaluator properties checked across the whole catalog and every built-in role.

use access::catalog::{self, ALL_PERMISSIONS};
use access::roles::default_permissions;
use access::{has_permission, PermissionSet, RoleTag};

// =============================================================================
// Membership or sentinel
// =============================================================================

#[test]
fn test_granted_iff_member_or_sentinel() {
    let candidates: Vec<&str> = catalog::all_tokens().chain(["unlisted_token"]).collect();

    for tag in RoleTag::all() {
        let perms = default_permissions(tag);
        for token in &candidates {
            let expected = perms.contains(token) || perms.contains(ALL_PERMISSIONS);
            assert_eq!(
                has_permission(Some(&perms), token),
                expected,
                "{tag} / {token}"
            );
        }
    }
}

#[test]
fn test_sentinel_with_other_tokens() {
    let perms: PermissionSet = ["read_dashboard", ALL_PERMISSIONS].into_iter().collect();
    for token in catalog::all_tokens() {
        assert!(has_permission(Some(&perms), token));
    }
}

// =============================================================================
// Fail closed
// =============================================================================

#[test]
fn test_absent_and_empty_sets_deny_everything() {
    let empty = PermissionSet::new();
    for token in catalog::all_tokens().chain([ALL_PERMISSIONS, "unlisted_token"]) {
        assert!(!has_permission(None, token));
        assert!(!has_permission(Some(&empty), token));
    }
}

#[test]
fn test_malformed_sets_deny_everything() {
    let malformed = [
        serde_json::json!("all"),
        serde_json::json!({"0": "all"}),
        serde_json::json!(["all", false]),
        serde_json::json!(17),
    ];
    for value in &malformed {
        let parsed = PermissionSet::from_json(value);
        assert!(parsed.is_none(), "{value} should not parse");
        assert!(!has_permission(parsed.as_ref(), "read_cases"));
    }
}

#[test]
fn test_empty_token_never_granted() {
    for tag in RoleTag::all() {
        assert!(!has_permission(Some(&default_permissions(tag)), ""));
    }
    assert!(!has_permission(Some(&PermissionSet::everything()), ""));
}
