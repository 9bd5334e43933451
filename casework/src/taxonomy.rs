//! Case section taxonomy.
//!
//! The single source of truth for which sections ("tabs") a case presents,
//! in what order, and which must be populated before a new case can be
//! submitted. Both the intake wizard and the case detail view read from here.
//!
//! Resolution is a pure table lookup: the same case type always yields the
//! same, equal-by-value section list.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::error::TaxonomyError;
use crate::types::CaseType;

/// Identifier of a case section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Overview,
    Timeline,
    Evidence,
    Suspects,
    Witnesses,
    Charges,
    Parties,
    Mediation,
    Resolution,
    Documents,
    Notes,
}

impl SectionId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Timeline => "timeline",
            Self::Evidence => "evidence",
            Self::Suspects => "suspects",
            Self::Witnesses => "witnesses",
            Self::Charges => "charges",
            Self::Parties => "parties",
            Self::Mediation => "mediation",
            Self::Resolution => "resolution",
            Self::Documents => "documents",
            Self::Notes => "notes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Timeline => "Timeline",
            Self::Evidence => "Evidence",
            Self::Suspects => "Suspects",
            Self::Witnesses => "Witnesses",
            Self::Charges => "Charges",
            Self::Parties => "Parties Involved",
            Self::Mediation => "Mediation",
            Self::Resolution => "Resolution",
            Self::Documents => "Documents",
            Self::Notes => "Notes",
        }
    }

    const ALL: [SectionId; 11] = [
        Self::Overview,
        Self::Timeline,
        Self::Evidence,
        Self::Suspects,
        Self::Witnesses,
        Self::Charges,
        Self::Parties,
        Self::Mediation,
        Self::Resolution,
        Self::Documents,
        Self::Notes,
    ];
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts either the id (`parties`) or the label (`Parties Involved`),
/// ignoring ASCII case.
impl FromStr for SectionId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s) || id.label().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// One section of a case view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionDescriptor {
    pub id: SectionId,
    pub label: &'static str,
    /// Must be populated before submission
    pub mandatory: bool,
}

const fn section(id: SectionId, label: &'static str, mandatory: bool) -> SectionDescriptor {
    SectionDescriptor {
        id,
        label,
        mandatory,
    }
}

const COMMON_PREFIX: [SectionDescriptor; 3] = [
    section(SectionId::Overview, "Overview", true),
    section(SectionId::Timeline, "Timeline", false),
    section(SectionId::Evidence, "Evidence", true),
];

const CRIMINAL_SECTIONS: [SectionDescriptor; 3] = [
    section(SectionId::Suspects, "Suspects", true),
    section(SectionId::Witnesses, "Witnesses", true),
    section(SectionId::Charges, "Charges", true),
];

const CIVIL_SECTIONS: [SectionDescriptor; 3] = [
    section(SectionId::Parties, "Parties Involved", true),
    section(SectionId::Mediation, "Mediation", false),
    section(SectionId::Resolution, "Resolution", false),
];

const COMMON_SUFFIX: [SectionDescriptor; 2] = [
    section(SectionId::Documents, "Documents", false),
    section(SectionId::Notes, "Notes", false),
];

impl CaseType {
    /// Ordered sections for this case type.
    pub fn sections(&self) -> Vec<SectionDescriptor> {
        let specific = match self {
            CaseType::Criminal => &CRIMINAL_SECTIONS,
            CaseType::Civil => &CIVIL_SECTIONS,
        };
        COMMON_PREFIX
            .iter()
            .chain(specific)
            .chain(&COMMON_SUFFIX)
            .copied()
            .collect()
    }

    /// Check populated sections against this type's mandatory set.
    ///
    /// Populated sections that do not belong to this type are ignored.
    pub fn validate(&self, populated: &HashSet<SectionId>) -> SectionValidation {
        let missing: Vec<SectionId> = self
            .sections()
            .into_iter()
            .filter(|s| s.mandatory && !populated.contains(&s.id))
            .map(|s| s.id)
            .collect();
        SectionValidation {
            ok: missing.is_empty(),
            missing,
        }
    }
}

/// Result of checking a case's populated sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionValidation {
    pub ok: bool,
    /// Every unsatisfied mandatory section, in section order
    pub missing: Vec<SectionId>,
}

impl SectionValidation {
    /// Turn an incomplete result into [`TaxonomyError::IncompleteSubmission`].
    pub fn into_result(self) -> Result<(), TaxonomyError> {
        if self.ok {
            Ok(())
        } else {
            Err(TaxonomyError::IncompleteSubmission {
                missing: self.missing,
            })
        }
    }
}

/// Ordered sections for a case type given as a string.
pub fn sections_for(case_type: &str) -> Result<Vec<SectionDescriptor>, TaxonomyError> {
    Ok(case_type.parse::<CaseType>()?.sections())
}

/// Validate populated sections for a case type given as a string.
///
/// Populated entries may be section ids or labels; unrecognized entries are
/// ignored. An unknown case type is an error, never a failed validation.
pub fn validate_sections<I, S>(case_type: &str, populated: I) -> Result<SectionValidation, TaxonomyError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let case_type: CaseType = case_type.parse()?;
    let populated: HashSet<SectionId> = populated
        .into_iter()
        .filter_map(|s| s.as_ref().parse().ok())
        .collect();
    Ok(case_type.validate(&populated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use SectionId::*;

    fn ids(sections: &[SectionDescriptor]) -> Vec<SectionId> {
        sections.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_criminal_sections() {
        let sections = sections_for("criminal").unwrap();
        assert_eq!(
            ids(&sections),
            vec![Overview, Timeline, Evidence, Suspects, Witnesses, Charges, Documents, Notes]
        );
        let mandatory: Vec<_> = sections.iter().filter(|s| s.mandatory).map(|s| s.id).collect();
        assert_eq!(mandatory, vec![Overview, Evidence, Suspects, Witnesses, Charges]);
    }

    #[test]
    fn test_civil_sections() {
        let sections = sections_for("civil").unwrap();
        assert_eq!(
            ids(&sections),
            vec![Overview, Timeline, Evidence, Parties, Mediation, Resolution, Documents, Notes]
        );
        assert_eq!(sections[3].label, "Parties Involved");
        let mandatory: Vec<_> = sections.iter().filter(|s| s.mandatory).map(|s| s.id).collect();
        assert_eq!(mandatory, vec![Overview, Evidence, Parties]);
    }

    #[test]
    fn test_labels_match_ids() {
        for case_type in [CaseType::Criminal, CaseType::Civil] {
            for s in case_type.sections() {
                assert_eq!(s.label, s.id.label());
            }
        }
    }

    #[test]
    fn test_unknown_case_type() {
        assert_eq!(
            sections_for("unknown"),
            Err(TaxonomyError::InvalidCaseType("unknown".to_string()))
        );
        assert!(matches!(
            validate_sections("traffic", ["overview"]),
            Err(TaxonomyError::InvalidCaseType(_))
        ));
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(sections_for("criminal").unwrap(), sections_for("criminal").unwrap());
        assert_eq!(sections_for("civil").unwrap(), sections_for("civil").unwrap());
    }

    #[test]
    fn test_complete_criminal() {
        let v = validate_sections(
            "criminal",
            ["overview", "evidence", "suspects", "witnesses", "charges"],
        )
        .unwrap();
        assert!(v.ok);
        assert!(v.missing.is_empty());
        assert!(v.into_result().is_ok());
    }

    #[test]
    fn test_missing_listed_in_order() {
        let v = validate_sections("criminal", ["overview"]).unwrap();
        assert!(!v.ok);
        assert_eq!(v.missing, vec![Evidence, Suspects, Witnesses, Charges]);

        let v = validate_sections("criminal", Vec::<String>::new()).unwrap();
        assert_eq!(v.missing, vec![Overview, Evidence, Suspects, Witnesses, Charges]);
    }

    #[test]
    fn test_civil_optional_sections() {
        let v = validate_sections("civil", ["Overview", "Evidence", "Parties Involved"]).unwrap();
        assert!(v.ok);
        assert!(v.missing.is_empty());
    }

    #[test]
    fn test_foreign_and_unknown_sections_ignored() {
        // Suspects does not satisfy anything for a civil case.
        let v = validate_sections("civil", ["overview", "evidence", "suspects", "bogus"]).unwrap();
        assert_eq!(v.missing, vec![Parties]);
    }

    #[test]
    fn test_incomplete_is_distinct_error() {
        let err = validate_sections("civil", ["overview"])
            .unwrap()
            .into_result()
            .unwrap_err();
        assert_eq!(
            err,
            TaxonomyError::IncompleteSubmission {
                missing: vec![Evidence, Parties]
            }
        );
        assert_eq!(err.to_string(), "Incomplete submission: missing evidence, parties");
    }

    #[test]
    fn test_section_parsing() {
        assert_eq!("parties".parse::<SectionId>(), Ok(Parties));
        assert_eq!("Parties Involved".parse::<SectionId>(), Ok(Parties));
        assert_eq!(" NOTES ".parse::<SectionId>(), Ok(Notes));
        assert!("parties involved!".parse::<SectionId>().is_err());
    }

    #[test]
    fn test_validation_serializes_ids() {
        let v = validate_sections("criminal", ["overview", "evidence", "suspects"]).unwrap();
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, serde_json::json!({"ok": false, "missing": ["witnesses", "charges"]}));
    }
}
