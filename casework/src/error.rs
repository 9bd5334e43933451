//! Error types for casework operations.

use crate::taxonomy::SectionId;
use crate::types::CaseStatus;

/// Errors from the section taxonomy.
///
/// `InvalidCaseType` is a caller bug; `IncompleteSubmission` is an ordinary
/// validation outcome the user can fix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaxonomyError {
    /// Case type outside the closed set
    #[error("Invalid case type: {0:?}")]
    InvalidCaseType(String),

    /// One or more mandatory sections are empty
    #[error("Incomplete submission: missing {}", join_sections(.missing))]
    IncompleteSubmission { missing: Vec<SectionId> },
}

fn join_sections(missing: &[SectionId]) -> String {
    missing
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors from case, evidence and repository operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaseError {
    /// Status change not allowed by the lifecycle
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: CaseStatus, to: CaseStatus },

    /// Forwarded status was requested without a prosecution record
    #[error("Forwarding to prosecution requires a prosecution record")]
    ProsecutionRecordRequired,

    /// Detectives are only assigned to criminal cases
    #[error("Cannot assign a detective to civil case {0}")]
    DetectiveOnCivilCase(String),

    /// Operation only applies to criminal cases
    #[error("Case {0} is not a criminal case")]
    NotCriminal(String),

    /// Operation only applies to civil cases
    #[error("Case {0} is not a civil case")]
    NotCivil(String),

    /// Prosecution follow-up on a case that was never forwarded
    #[error("Case {0} has not been forwarded to prosecution")]
    NotForwarded(String),

    /// A stored case was replaced by one that does not extend its history
    #[error("Case {0} history cannot be rewritten")]
    HistoryRewritten(String),

    /// Case was already forwarded
    #[error("Case {0} has already been forwarded to prosecution")]
    AlreadyForwarded(String),

    /// Custody entry is older than the last one
    #[error("Custody entry predates the last recorded entry")]
    CustodyOutOfOrder,

    /// First custody entry must record collection
    #[error("Chain of custody must start with collection")]
    CustodyMustStartCollected,

    /// Malformed case number
    #[error("Invalid case number: {0:?}")]
    InvalidCaseNumber(String),

    /// Record does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Errors from submitting an intake draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    /// A wizard step is missing required fields
    #[error("Intake step {0} is incomplete")]
    StepIncomplete(u8),

    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    #[error(transparent)]
    Case(#[from] CaseError),
}
