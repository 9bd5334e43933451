//! Case intake wizard.
//!
//! A draft is filled in over four steps:
//!
//! 1. Case type
//! 2. Basics: title, assigned officer, narrative
//! 3. Type details: suspect and offense (criminal) or both parties (civil)
//! 4. Review
//!
//! Submission re-checks every step, then asks the section taxonomy whether
//! all mandatory sections are populated, and only then opens the case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::case::{Case, NewCase};
use crate::case_number::CaseNumber;
use crate::error::IntakeError;
use crate::evidence::{Evidence, EvidenceKind};
use crate::parties::{Charge, CivilParties, Suspect, Witness};
use crate::taxonomy::{SectionId, SectionValidation};
use crate::types::{CaseType, Location, Priority};

/// Number of wizard steps.
pub const INTAKE_STEPS: u8 = 4;

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuspectDraft {
    pub full_name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceDraft {
    pub kind: EvidenceKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WitnessDraft {
    pub full_name: String,
    pub statement: String,
    #[serde(default)]
    pub phone: String,
}

/// Everything entered in the intake wizard so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeDraft {
    pub case_type: Option<CaseType>,
    pub title: String,
    pub priority: Priority,
    pub assigned_officer: String,
    pub assigned_detective: Option<String>,
    pub reporting_officer: String,
    pub narrative: String,
    pub incident_location: String,
    // Criminal
    pub suspect: SuspectDraft,
    pub offense: Charge,
    pub witnesses: Vec<WitnessDraft>,
    // Civil
    pub parties: CivilParties,
    pub mediation_notes: String,
    pub desired_resolution: String,
    // Common
    pub evidence: Vec<EvidenceDraft>,
    pub documents: Vec<String>,
    pub notes: String,
}

/// Records produced by a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeOutcome {
    pub case: Case,
    pub evidence: Vec<Evidence>,
    pub suspects: Vec<Suspect>,
    pub witnesses: Vec<Witness>,
}

impl IntakeDraft {
    pub fn new(case_type: CaseType) -> Self {
        Self {
            case_type: Some(case_type),
            ..Default::default()
        }
    }

    /// Whether the given wizard step has its required fields.
    ///
    /// Steps outside 1..=3 have no requirements.
    pub fn validate_step(&self, step: u8) -> bool {
        match step {
            1 => self.case_type.is_some(),
            2 => filled(&self.title) && filled(&self.assigned_officer) && filled(&self.narrative),
            3 => match self.case_type {
                Some(CaseType::Criminal) => filled(&self.suspect.full_name) && filled(&self.offense.category),
                Some(CaseType::Civil) => self.parties.is_complete(),
                None => false,
            },
            _ => true,
        }
    }

    /// First step that is not complete, if any.
    pub fn first_incomplete_step(&self) -> Option<u8> {
        (1..=INTAKE_STEPS).find(|s| !self.validate_step(*s))
    }

    /// Sections the draft has data for.
    pub fn populated_sections(&self) -> HashSet<SectionId> {
        let mut populated = HashSet::new();
        if self.validate_step(2) {
            populated.insert(SectionId::Overview);
        }
        if self.evidence.iter().any(|e| filled(&e.name)) {
            populated.insert(SectionId::Evidence);
        }
        if filled(&self.suspect.full_name) {
            populated.insert(SectionId::Suspects);
        }
        if self.witnesses.iter().any(|w| filled(&w.full_name)) {
            populated.insert(SectionId::Witnesses);
        }
        if filled(&self.offense.category) {
            populated.insert(SectionId::Charges);
        }
        if self.parties.is_complete() {
            populated.insert(SectionId::Parties);
        }
        if filled(&self.mediation_notes) {
            populated.insert(SectionId::Mediation);
        }
        if filled(&self.desired_resolution) {
            populated.insert(SectionId::Resolution);
        }
        if self.documents.iter().any(|d| filled(d)) {
            populated.insert(SectionId::Documents);
        }
        if filled(&self.notes) {
            populated.insert(SectionId::Notes);
        }
        populated
    }

    /// Section checklist for the review step. `None` until a type is chosen.
    pub fn checklist(&self) -> Option<SectionValidation> {
        self.case_type
            .map(|t| t.validate(&self.populated_sections()))
    }

    /// Validate the whole draft and open the case.
    ///
    /// `sequence` feeds the case number. A detective entered on a civil
    /// draft is dropped.
    pub fn submit(&self, now: DateTime<Utc>, sequence: u16) -> Result<IntakeOutcome, IntakeError> {
        if let Some(step) = self.first_incomplete_step() {
            return Err(IntakeError::StepIncomplete(step));
        }
        let case_type = self.case_type.ok_or(IntakeError::StepIncomplete(1))?;
        case_type.validate(&self.populated_sections()).into_result()?;

        let created_by = if filled(&self.reporting_officer) {
            self.reporting_officer.trim().to_string()
        } else {
            "System".to_string()
        };
        let detective = match case_type {
            CaseType::Criminal => self.assigned_detective.clone().filter(|d| filled(d)),
            CaseType::Civil => None,
        };

        let location = self.incident_location.trim();
        let mut case = Case::open(
            NewCase {
                case_number: CaseNumber::generate(now, sequence),
                title: self.title.trim().to_string(),
                case_type,
                priority: self.priority,
                description: self.narrative.trim().to_string(),
                location: Location::address(location),
                assigned_officer: self.assigned_officer.clone(),
                assigned_detective: detective,
                created_by: created_by.clone(),
            },
            now,
        )?;

        let evidence: Vec<Evidence> = self
            .evidence
            .iter()
            .filter(|e| filled(&e.name))
            .map(|e| {
                Evidence::collected(
                    case.id.clone(),
                    e.kind,
                    e.name.trim().to_string(),
                    e.description.clone(),
                    created_by.clone(),
                    location.to_string(),
                    now,
                )
            })
            .collect();
        for item in &evidence {
            case.add_evidence(item.id.clone(), &item.name, &created_by, now);
        }

        let mut suspects = Vec::new();
        let mut witnesses = Vec::new();
        if case_type == CaseType::Criminal {
            let mut suspect = Suspect::new(self.suspect.full_name.trim(), now);
            suspect.age = self.suspect.age;
            suspect.aliases = self.suspect.aliases.clone();
            suspect.notes = self.suspect.notes.clone();
            suspect.associated_cases.push(case.id.clone());
            case.add_suspect(suspect.id.clone(), &suspect.full_name, &created_by, now);
            suspects.push(suspect);

            for draft in self.witnesses.iter().filter(|w| filled(&w.full_name)) {
                let mut witness = Witness::new(draft.full_name.trim(), draft.statement.clone(), now);
                witness.phone = draft.phone.clone();
                witness.associated_cases.push(case.id.clone());
                case.add_witness(witness.id.clone(), &witness.full_name, &created_by, now);
                witnesses.push(witness);
            }
        }

        match case_type {
            CaseType::Criminal => {
                let charge = Charge {
                    category: self.offense.category.trim().to_string(),
                    description: self.offense.description.trim().to_string(),
                };
                case.add_charge(charge, &created_by, now)?;
            }
            CaseType::Civil => {
                case.record_parties(self.parties.clone(), &created_by, now)?;
                if filled(&self.mediation_notes) {
                    case.record_mediation(self.mediation_notes.trim(), &created_by, now)?;
                }
                if filled(&self.desired_resolution) {
                    case.record_resolution(self.desired_resolution.trim(), &created_by, now)?;
                }
            }
        }
        for document in self.documents.iter().filter(|d| filled(d)) {
            case.add_document(document.trim(), &created_by, now);
        }

        if filled(&self.notes) {
            case.add_note(self.notes.trim(), &created_by, now);
        }

        tracing::info!(
            case = %case.case_number,
            case_type = %case_type,
            evidence = evidence.len(),
            "Case opened via intake"
        );

        Ok(IntakeOutcome {
            case,
            evidence,
            suspects,
            witnesses,
        })
    }
}
