//! Casework for the CAS records desk
//!
//! - [`taxonomy`]: which sections a case shows and which are mandatory
//! - [`Case`]: the case record, its timeline and status lifecycle
//! - [`IntakeDraft`]: the four-step intake wizard
//! - [`ChainOfCustody`]: append-only evidence handling history
//! - [`CaseRepository`]: async storage seam with an in-memory backend
//!
//! # Example
//!
//! ```
//! use casework::{validate_sections, TaxonomyError};
//!
//! let result = validate_sections("civil", ["overview", "evidence", "Parties Involved"]).unwrap();
//! assert!(result.ok);
//!
//! assert!(matches!(
//!     validate_sections("traffic", ["overview"]),
//!     Err(TaxonomyError::InvalidCaseType(_))
//! ));
//! ```

pub mod case;
pub mod case_number;
pub mod error;
pub mod evidence;
pub mod intake;
pub mod lifecycle;
pub mod parties;
pub mod repository;
pub mod taxonomy;
pub mod types;

pub use case::{Case, NewCase};
pub use case_number::{prosecution_case_id, CaseNumber};
pub use error::{CaseError, IntakeError, TaxonomyError};
pub use evidence::{ChainOfCustody, CustodyAction, CustodyEntry, Evidence, EvidenceKind};
pub use intake::{IntakeDraft, IntakeOutcome, INTAKE_STEPS};
pub use parties::{Charge, CivilParties, Party, Suspect, Witness};
pub use repository::{CaseRepository, InMemoryCaseRepository};
pub use taxonomy::{sections_for, validate_sections, SectionDescriptor, SectionId, SectionValidation};
pub use types::{
    CaseStatus, CaseType, Location, Priority, ProsecutionInfo, ProsecutionStatus, TimelineEntry,
    TimelineEventType,
};
