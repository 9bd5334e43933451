//! Dashboard areas and the permission each one requires.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::principal::Principal;

/// A top-level area of the records desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum NavSection {
    Dashboard,
    Cases,
    CaseIntake,
    Criminals,
    Evidence,
    Suspects,
    Map,
    Search,
    Notifications,
    Audit,
    Users,
    Roles,
    Settings,
}

impl NavSection {
    /// Menu order.
    pub const ALL: [NavSection; 13] = [
        Self::Dashboard,
        Self::Cases,
        Self::CaseIntake,
        Self::Criminals,
        Self::Evidence,
        Self::Suspects,
        Self::Map,
        Self::Search,
        Self::Notifications,
        Self::Audit,
        Self::Users,
        Self::Roles,
        Self::Settings,
    ];

    /// Permission token that unlocks the section.
    pub fn required_permission(&self) -> &'static str {
        match self {
            Self::Dashboard => "read_dashboard",
            Self::Cases => "read_cases",
            Self::CaseIntake => "case_intake",
            Self::Criminals => "read_criminals",
            Self::Evidence => "read_evidence",
            Self::Suspects => "read_suspects",
            Self::Map => "read_map",
            Self::Search => "read_search",
            Self::Notifications => "read_notifications",
            Self::Audit => "read_audit",
            Self::Users => "manage_users",
            Self::Roles => "manage_roles",
            Self::Settings => "read_settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Cases => "Case Management",
            Self::CaseIntake => "Case Intake",
            Self::Criminals => "Criminal Records",
            Self::Evidence => "Evidence Management",
            Self::Suspects => "Suspects & Witnesses",
            Self::Map => "Crime Map",
            Self::Search => "Search & Filter",
            Self::Notifications => "Notifications",
            Self::Audit => "Audit Logs",
            Self::Users => "User Management",
            Self::Roles => "Role Management",
            Self::Settings => "Settings",
        }
    }
}

/// Sections the principal may open, in menu order.
pub fn visible_sections(principal: &Principal) -> Vec<NavSection> {
    NavSection::ALL
        .into_iter()
        .filter(|s| principal.can(s.required_permission()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::PermissionSet;
    use crate::principal::RoleTag;
    use crate::roles::default_permissions;

    fn principal(role: RoleTag, permissions: PermissionSet) -> Principal {
        Principal {
            id: "p".to_string(),
            username: "p".to_string(),
            display_name: "P".to_string(),
            badge: String::new(),
            department: String::new(),
            role,
            permissions,
            is_active: true,
            last_login: None,
        }
    }

    #[test]
    fn test_required_permissions_are_cataloged() {
        for section in NavSection::ALL {
            assert!(crate::catalog::is_known(section.required_permission()));
        }
    }

    #[test]
    fn test_officer_sections() {
        let p = principal(RoleTag::FieldOfficer, default_permissions(RoleTag::FieldOfficer));
        let sections = visible_sections(&p);
        assert_eq!(sections.first(), Some(&NavSection::Dashboard));
        assert!(sections.contains(&NavSection::CaseIntake));
        assert!(!sections.contains(&NavSection::Audit));
        assert!(!sections.contains(&NavSection::Users));
        assert_eq!(sections.len(), 9);
    }

    #[test]
    fn test_sentinel_sees_everything() {
        let p = principal(RoleTag::Administrator, PermissionSet::everything());
        assert_eq!(visible_sections(&p), NavSection::ALL.to_vec());
    }

    #[test]
    fn test_inactive_sees_nothing() {
        let mut p = principal(RoleTag::Administrator, PermissionSet::everything());
        p.is_active = false;
        assert!(visible_sections(&p).is_empty());
    }
}
