//! The case record and the operations that mutate it.
//!
//! Every mutation appends to the timeline. Status changes go through the
//! lifecycle table, and the only way into `forwarded_prosecution` is
//! [`Case::forward_to_prosecution`], which always attaches the record.
//! Status, timeline and prosecution record are read through accessors so the
//! history can only grow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;

use crate::case_number::{prosecution_case_id, CaseNumber};
use crate::error::CaseError;
use crate::lifecycle;
use crate::parties::{Charge, CivilParties};
use crate::taxonomy::{SectionDescriptor, SectionId};
use crate::types::{
    CaseStatus, CaseType, Location, Priority, ProsecutionInfo, ProsecutionStatus, TimelineEntry,
    TimelineEventType,
};

/// An investigation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub case_number: CaseNumber,
    pub title: String,
    pub case_type: CaseType,
    pub priority: Priority,
    status: CaseStatus,
    pub description: String,
    pub location: Location,
    pub assigned_officer: String,
    /// Only ever set on criminal cases
    pub assigned_detective: Option<String>,
    pub evidence: Vec<String>,
    pub suspects: Vec<String>,
    pub witnesses: Vec<String>,
    /// Criminal only
    #[serde(default)]
    pub charges: Vec<Charge>,
    /// Civil only
    #[serde(default)]
    pub parties: Option<CivilParties>,
    #[serde(default)]
    pub mediation: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    /// Document names
    #[serde(default)]
    pub documents: Vec<String>,
    timeline: Vec<TimelineEntry>,
    prosecution: Option<ProsecutionInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Fields needed to open a case.
#[derive(Debug, Clone)]
pub struct NewCase {
    pub case_number: CaseNumber,
    pub title: String,
    pub case_type: CaseType,
    pub priority: Priority,
    pub description: String,
    pub location: Location,
    pub assigned_officer: String,
    pub assigned_detective: Option<String>,
    /// Who opened the case, recorded on the first timeline entry
    pub created_by: String,
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

impl Case {
    /// Open a case in `open` status with a `created` timeline entry.
    pub fn open(new: NewCase, now: DateTime<Utc>) -> Result<Self, CaseError> {
        let id = uuid::Uuid::new_v4().to_string();
        if new.assigned_detective.is_some() && new.case_type != CaseType::Criminal {
            return Err(CaseError::DetectiveOnCivilCase(id));
        }

        let mut case = Self {
            id,
            case_number: new.case_number,
            title: new.title,
            case_type: new.case_type,
            priority: new.priority,
            status: CaseStatus::Open,
            description: new.description,
            location: new.location,
            assigned_officer: new.assigned_officer,
            assigned_detective: new.assigned_detective,
            evidence: Vec::new(),
            suspects: Vec::new(),
            witnesses: Vec::new(),
            charges: Vec::new(),
            parties: None,
            mediation: None,
            resolution: None,
            documents: Vec::new(),
            timeline: Vec::new(),
            prosecution: None,
            created_at: now,
            updated_at: now,
            closed_at: None,
        };
        let description = format!("Case {} created by {}", case.case_number, new.created_by);
        case.append(
            TimelineEventType::Created,
            description,
            &new.created_by,
            None,
            now,
        );
        Ok(case)
    }

    pub fn status(&self) -> CaseStatus {
        self.status
    }

    /// Timeline, oldest first.
    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    pub fn prosecution(&self) -> Option<&ProsecutionInfo> {
        self.prosecution.as_ref()
    }

    /// Sections this case presents, in display order.
    pub fn sections(&self) -> Vec<SectionDescriptor> {
        self.case_type.sections()
    }

    /// Sections that currently hold data.
    pub fn populated_sections(&self) -> HashSet<SectionId> {
        let mut populated = HashSet::from([SectionId::Overview, SectionId::Timeline]);
        let checks = [
            (SectionId::Evidence, !self.evidence.is_empty()),
            (SectionId::Suspects, !self.suspects.is_empty()),
            (SectionId::Witnesses, !self.witnesses.is_empty()),
            (SectionId::Charges, !self.charges.is_empty()),
            (SectionId::Parties, self.parties.as_ref().is_some_and(|p| p.is_complete())),
            (SectionId::Mediation, self.mediation.as_deref().is_some_and(filled)),
            (SectionId::Resolution, self.resolution.as_deref().is_some_and(filled)),
            (SectionId::Documents, !self.documents.is_empty()),
            (
                SectionId::Notes,
                self.timeline.iter().any(|e| e.kind == TimelineEventType::NoteAdded),
            ),
        ];
        populated.extend(checks.into_iter().filter(|(_, present)| *present).map(|(id, _)| id));
        populated
    }

    fn append(
        &mut self,
        kind: TimelineEventType,
        description: String,
        officer: &str,
        details: Option<serde_json::Value>,
        now: DateTime<Utc>,
    ) {
        self.timeline.push(TimelineEntry {
            id: uuid::Uuid::new_v4().to_string(),
            date: now,
            kind,
            description,
            officer: officer.to_string(),
            details,
        });
        self.updated_at = now;
    }

    fn ensure_criminal(&self) -> Result<(), CaseError> {
        match self.case_type {
            CaseType::Criminal => Ok(()),
            CaseType::Civil => Err(CaseError::NotCriminal(self.id.clone())),
        }
    }

    fn ensure_civil(&self) -> Result<(), CaseError> {
        match self.case_type {
            CaseType::Civil => Ok(()),
            CaseType::Criminal => Err(CaseError::NotCivil(self.id.clone())),
        }
    }

    pub fn assign_detective(
        &mut self,
        detective: impl Into<String>,
        officer: &str,
        now: DateTime<Utc>,
    ) -> Result<(), CaseError> {
        if self.case_type != CaseType::Criminal {
            return Err(CaseError::DetectiveOnCivilCase(self.id.clone()));
        }
        let detective = detective.into();
        self.append(
            TimelineEventType::DetectiveAssigned,
            format!("Detective {detective} assigned"),
            officer,
            None,
            now,
        );
        self.assigned_detective = Some(detective);
        Ok(())
    }

    pub fn add_evidence(&mut self, evidence_id: impl Into<String>, name: &str, officer: &str, now: DateTime<Utc>) {
        let evidence_id = evidence_id.into();
        self.append(
            TimelineEventType::EvidenceAdded,
            format!("Evidence added: {name}"),
            officer,
            Some(json!({ "evidence_id": evidence_id })),
            now,
        );
        self.evidence.push(evidence_id);
    }

    pub fn add_suspect(&mut self, suspect_id: impl Into<String>, name: &str, officer: &str, now: DateTime<Utc>) {
        let suspect_id = suspect_id.into();
        self.append(
            TimelineEventType::SuspectAdded,
            format!("Suspect added: {name}"),
            officer,
            Some(json!({ "suspect_id": suspect_id })),
            now,
        );
        self.suspects.push(suspect_id);
    }

    pub fn add_witness(&mut self, witness_id: impl Into<String>, name: &str, officer: &str, now: DateTime<Utc>) {
        let witness_id = witness_id.into();
        self.append(
            TimelineEventType::WitnessInterviewed,
            format!("Witness interviewed: {name}"),
            officer,
            Some(json!({ "witness_id": witness_id })),
            now,
        );
        self.witnesses.push(witness_id);
    }

    /// File a charge. Criminal cases only.
    pub fn add_charge(&mut self, charge: Charge, officer: &str, now: DateTime<Utc>) -> Result<(), CaseError> {
        self.ensure_criminal()?;
        self.append(
            TimelineEventType::ChargeFiled,
            format!("Charge filed: {}", charge.category),
            officer,
            Some(json!({ "category": charge.category })),
            now,
        );
        self.charges.push(charge);
        Ok(())
    }

    /// Record both sides of a civil dispute. Civil cases only.
    pub fn record_parties(
        &mut self,
        parties: CivilParties,
        officer: &str,
        now: DateTime<Utc>,
    ) -> Result<(), CaseError> {
        self.ensure_civil()?;
        self.append(
            TimelineEventType::PartiesRecorded,
            format!(
                "Parties recorded: {} v. {}",
                parties.complainant.name, parties.opposing_party.name
            ),
            officer,
            None,
            now,
        );
        self.parties = Some(parties);
        Ok(())
    }

    pub fn record_mediation(
        &mut self,
        notes: impl Into<String>,
        officer: &str,
        now: DateTime<Utc>,
    ) -> Result<(), CaseError> {
        self.ensure_civil()?;
        self.append(
            TimelineEventType::MediationRecorded,
            "Mediation notes recorded".to_string(),
            officer,
            None,
            now,
        );
        self.mediation = Some(notes.into());
        Ok(())
    }

    pub fn record_resolution(
        &mut self,
        resolution: impl Into<String>,
        officer: &str,
        now: DateTime<Utc>,
    ) -> Result<(), CaseError> {
        self.ensure_civil()?;
        self.append(
            TimelineEventType::ResolutionRecorded,
            "Desired resolution recorded".to_string(),
            officer,
            None,
            now,
        );
        self.resolution = Some(resolution.into());
        Ok(())
    }

    pub fn add_document(&mut self, name: impl Into<String>, officer: &str, now: DateTime<Utc>) {
        let name = name.into();
        self.append(
            TimelineEventType::DocumentAdded,
            format!("Document added: {name}"),
            officer,
            None,
            now,
        );
        self.documents.push(name);
    }

    pub fn add_note(&mut self, note: impl Into<String>, officer: &str, now: DateTime<Utc>) {
        self.append(TimelineEventType::NoteAdded, note.into(), officer, None, now);
    }

    /// Move to a new status along the lifecycle.
    ///
    /// `forwarded_prosecution` is refused here; use
    /// [`Case::forward_to_prosecution`].
    pub fn transition(&mut self, to: CaseStatus, officer: &str, now: DateTime<Utc>) -> Result<(), CaseError> {
        if to == CaseStatus::ForwardedProsecution {
            return Err(CaseError::ProsecutionRecordRequired);
        }
        self.ensure_transition(to)?;

        let from = self.status;
        self.status = to;
        if to == CaseStatus::Closed {
            self.closed_at = Some(now);
        }
        self.append(
            TimelineEventType::StatusChanged,
            format!("Status changed from {} to {}", from.label(), to.label()),
            officer,
            Some(json!({ "from": from, "to": to })),
            now,
        );
        Ok(())
    }

    fn ensure_transition(&self, to: CaseStatus) -> Result<(), CaseError> {
        if lifecycle::can_transition(self.status, to) {
            Ok(())
        } else {
            Err(CaseError::InvalidTransition {
                from: self.status,
                to,
            })
        }
    }

    /// Forward a criminal case to the prosecution office.
    pub fn forward_to_prosecution(
        &mut self,
        forwarded_by: &str,
        notes: Option<String>,
        now: DateTime<Utc>,
        sequence: u16,
    ) -> Result<&ProsecutionInfo, CaseError> {
        self.ensure_criminal()?;
        if self.status == CaseStatus::ForwardedProsecution || self.prosecution.is_some() {
            return Err(CaseError::AlreadyForwarded(self.id.clone()));
        }
        self.ensure_transition(CaseStatus::ForwardedProsecution)?;

        let prosecution_id = prosecution_case_id(now, sequence);
        self.append(
            TimelineEventType::ForwardedProsecution,
            format!("Case forwarded to prosecution office with ID: {prosecution_id}"),
            forwarded_by,
            Some(json!({ "prosecution_case_id": prosecution_id, "notes": notes })),
            now,
        );
        self.status = CaseStatus::ForwardedProsecution;

        Ok(self.prosecution.insert(ProsecutionInfo {
            forwarded_at: now,
            forwarded_by: forwarded_by.to_string(),
            prosecution_case_id: prosecution_id,
            prosecutor_assigned: None,
            status: ProsecutionStatus::PendingReview,
            notes,
            court_date: None,
            last_updated: now,
        }))
    }

    /// Record a status update from the prosecution office.
    ///
    /// Only a forwarded case has a record to update.
    pub fn update_prosecution(
        &mut self,
        status: ProsecutionStatus,
        prosecutor: Option<String>,
        court_date: Option<DateTime<Utc>>,
        officer: &str,
        now: DateTime<Utc>,
    ) -> Result<&ProsecutionInfo, CaseError> {
        let Some(info) = self.prosecution.as_mut() else {
            return Err(CaseError::NotForwarded(self.id.clone()));
        };
        info.update(status, prosecutor, court_date, now);
        let details = json!({
            "prosecution_case_id": info.prosecution_case_id,
            "status": info.status,
            "prosecutor": info.prosecutor_assigned,
            "court_date": info.court_date,
        });

        self.append(
            TimelineEventType::ProsecutionUpdated,
            format!("Prosecution status updated to {status:?}"),
            officer,
            Some(details),
            now,
        );
        self.prosecution
            .as_ref()
            .ok_or_else(|| CaseError::NotForwarded(self.id.clone()))
    }

    /// Check the record-level invariants.
    ///
    /// Used when accepting records from outside, e.g. a repository write.
    pub fn check_invariants(&self) -> Result<(), CaseError> {
        if self.assigned_detective.is_some() && self.case_type != CaseType::Criminal {
            return Err(CaseError::DetectiveOnCivilCase(self.id.clone()));
        }
        if !self.charges.is_empty() {
            self.ensure_criminal()?;
        }
        if self.parties.is_some() || self.mediation.is_some() || self.resolution.is_some() {
            self.ensure_civil()?;
        }
        if self.status == CaseStatus::ForwardedProsecution && self.prosecution.is_none() {
            return Err(CaseError::ProsecutionRecordRequired);
        }
        Ok(())
    }

    /// Check that this record is a valid later version of `previous`.
    ///
    /// The identity is fixed, the status is unchanged or a lifecycle
    /// successor, the timeline extends the previous one, and a prosecution
    /// record once attached keeps its id.
    pub fn check_successor_of(&self, previous: &Case) -> Result<(), CaseError> {
        let rewritten = || CaseError::HistoryRewritten(previous.id.clone());

        if self.id != previous.id
            || self.case_number != previous.case_number
            || self.case_type != previous.case_type
        {
            return Err(rewritten());
        }
        if self.status != previous.status && !lifecycle::can_transition(previous.status, self.status) {
            return Err(CaseError::InvalidTransition {
                from: previous.status,
                to: self.status,
            });
        }
        if !self.timeline.starts_with(&previous.timeline) {
            return Err(rewritten());
        }
        if let Some(before) = &previous.prosecution {
            match &self.prosecution {
                Some(after) if after.prosecution_case_id == before.prosecution_case_id => {}
                _ => return Err(rewritten()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parties::Party;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0).unwrap()
    }

    fn new_case(case_type: CaseType) -> NewCase {
        NewCase {
            case_number: CaseNumber::generate(now(), 12),
            title: "Warehouse break-in".to_string(),
            case_type,
            priority: Priority::High,
            description: "Forced entry at the rear loading dock".to_string(),
            location: Location::address("45 Dock Rd"),
            assigned_officer: "Off. Smith".to_string(),
            assigned_detective: None,
            created_by: "Off. Smith".to_string(),
        }
    }

    fn parties() -> CivilParties {
        CivilParties {
            complainant: Party {
                name: "A. Landlord".to_string(),
                contact: String::new(),
            },
            opposing_party: Party {
                name: "B. Tenant".to_string(),
                contact: String::new(),
            },
        }
    }

    fn forwarded_case() -> Case {
        let mut case = Case::open(new_case(CaseType::Criminal), now()).unwrap();
        case.transition(CaseStatus::Investigation, "Det. Brown", now()).unwrap();
        case.forward_to_prosecution("Det. Brown", None, now(), 3).unwrap();
        case
    }

    #[test]
    fn test_open() {
        let case = Case::open(new_case(CaseType::Criminal), now()).unwrap();
        assert_eq!(case.status(), CaseStatus::Open);
        assert_eq!(case.case_number.to_string(), "CASE-2024-05-012");
        assert_eq!(case.timeline().len(), 1);
        assert_eq!(case.timeline()[0].kind, TimelineEventType::Created);
        assert!(case.check_invariants().is_ok());
    }

    #[test]
    fn test_detective_only_on_criminal() {
        let mut new = new_case(CaseType::Civil);
        new.assigned_detective = Some("Det. Brown".to_string());
        assert!(matches!(
            Case::open(new, now()),
            Err(CaseError::DetectiveOnCivilCase(_))
        ));

        let mut civil = Case::open(new_case(CaseType::Civil), now()).unwrap();
        assert!(civil.assign_detective("Det. Brown", "Sgt. Lee", now()).is_err());
        assert!(civil.assigned_detective.is_none());

        let mut criminal = Case::open(new_case(CaseType::Criminal), now()).unwrap();
        criminal.assign_detective("Det. Brown", "Sgt. Lee", now()).unwrap();
        assert_eq!(criminal.assigned_detective.as_deref(), Some("Det. Brown"));
        assert!(!criminal.populated_sections().contains(&SectionId::Notes));
    }

    #[test]
    fn test_timeline_is_appended() {
        let mut case = Case::open(new_case(CaseType::Criminal), now()).unwrap();
        case.add_evidence("ev-1", "Crowbar", "Off. Smith", now());
        case.add_suspect("sus-1", "J. Doe", "Off. Smith", now());
        case.add_witness("wit-1", "A. Clerk", "Off. Smith", now());
        case.add_note("Neighbour heard alarm at 02:10", "Off. Smith", now());

        let kinds: Vec<_> = case.timeline().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TimelineEventType::Created,
                TimelineEventType::EvidenceAdded,
                TimelineEventType::SuspectAdded,
                TimelineEventType::WitnessInterviewed,
                TimelineEventType::NoteAdded,
            ]
        );
        assert_eq!(case.evidence, vec!["ev-1"]);
        assert!(case.populated_sections().contains(&SectionId::Notes));
    }

    #[test]
    fn test_criminal_sections_complete() {
        let mut case = Case::open(new_case(CaseType::Criminal), now()).unwrap();
        assert!(!case.case_type.validate(&case.populated_sections()).ok);

        case.add_evidence("ev-1", "Crowbar", "Off. Smith", now());
        case.add_suspect("sus-1", "J. Doe", "Off. Smith", now());
        case.add_witness("wit-1", "A. Clerk", "Off. Smith", now());
        let missing = case.case_type.validate(&case.populated_sections()).missing;
        assert_eq!(missing, vec![SectionId::Charges]);

        let charge = Charge {
            category: "burglary".to_string(),
            description: String::new(),
        };
        case.add_charge(charge, "Det. Brown", now()).unwrap();
        assert!(case.case_type.validate(&case.populated_sections()).ok);
        assert!(case.record_parties(parties(), "Off. Smith", now()).is_err());
    }

    #[test]
    fn test_civil_sections() {
        let mut case = Case::open(new_case(CaseType::Civil), now()).unwrap();
        case.add_evidence("ev-1", "Lease", "Off. Smith", now());
        case.record_parties(parties(), "Off. Smith", now()).unwrap();
        case.record_mediation("Both sides met on 12 May", "Off. Smith", now()).unwrap();
        case.record_resolution("Deposit returned", "Off. Smith", now()).unwrap();
        case.add_document("lease.pdf", "Off. Smith", now());

        let populated = case.populated_sections();
        assert!(case.case_type.validate(&populated).ok);
        for id in [SectionId::Parties, SectionId::Mediation, SectionId::Resolution, SectionId::Documents] {
            assert!(populated.contains(&id), "{id} not populated");
        }

        let charge = Charge {
            category: "fraud".to_string(),
            description: String::new(),
        };
        assert!(matches!(
            case.add_charge(charge, "Off. Smith", now()),
            Err(CaseError::NotCriminal(_))
        ));
        assert!(case.check_invariants().is_ok());
    }

    #[test]
    fn test_transitions() {
        let mut case = Case::open(new_case(CaseType::Civil), now()).unwrap();
        case.transition(CaseStatus::Investigation, "Sgt. Lee", now()).unwrap();
        assert_eq!(
            case.transition(CaseStatus::Open, "Sgt. Lee", now()),
            Err(CaseError::InvalidTransition {
                from: CaseStatus::Investigation,
                to: CaseStatus::Open
            })
        );
        case.transition(CaseStatus::Closed, "Sgt. Lee", now()).unwrap();
        assert_eq!(case.closed_at, Some(now()));
        assert!(case.transition(CaseStatus::Court, "Sgt. Lee", now()).is_err());
        assert_eq!(case.timeline().last().unwrap().kind, TimelineEventType::StatusChanged);
    }

    #[test]
    fn test_forwarded_status_requires_record() {
        let mut case = Case::open(new_case(CaseType::Criminal), now()).unwrap();
        assert_eq!(
            case.transition(CaseStatus::ForwardedProsecution, "Det. Brown", now()),
            Err(CaseError::ProsecutionRecordRequired)
        );
        assert_eq!(case.status(), CaseStatus::Open);
    }

    #[test]
    fn test_forward_to_prosecution() {
        let mut case = Case::open(new_case(CaseType::Criminal), now()).unwrap();
        case.transition(CaseStatus::Investigation, "Det. Brown", now()).unwrap();

        let info = case
            .forward_to_prosecution("Det. Brown", Some("File complete".to_string()), now(), 3)
            .unwrap();
        assert_eq!(info.prosecution_case_id, "PROS-2024-003");
        assert_eq!(info.status, ProsecutionStatus::PendingReview);

        assert_eq!(case.status(), CaseStatus::ForwardedProsecution);
        assert!(case.prosecution().is_some());
        assert!(case.check_invariants().is_ok());
        assert_eq!(
            case.timeline().last().unwrap().kind,
            TimelineEventType::ForwardedProsecution
        );

        assert!(matches!(
            case.forward_to_prosecution("Det. Brown", None, now(), 4),
            Err(CaseError::AlreadyForwarded(_))
        ));
        assert!(case.transition(CaseStatus::Closed, "Det. Brown", now()).is_err());
    }

    #[test]
    fn test_forward_rejects_civil_and_closed() {
        let mut civil = Case::open(new_case(CaseType::Civil), now()).unwrap();
        assert!(matches!(
            civil.forward_to_prosecution("Det. Brown", None, now(), 1),
            Err(CaseError::NotCriminal(_))
        ));
        assert!(civil.prosecution().is_none());

        let mut closed = Case::open(new_case(CaseType::Criminal), now()).unwrap();
        closed.transition(CaseStatus::Closed, "Sgt. Lee", now()).unwrap();
        assert!(matches!(
            closed.forward_to_prosecution("Det. Brown", None, now(), 1),
            Err(CaseError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_prosecution_update() {
        let mut open = Case::open(new_case(CaseType::Criminal), now()).unwrap();
        assert!(matches!(
            open.update_prosecution(ProsecutionStatus::Accepted, None, None, "Clerk", now()),
            Err(CaseError::NotForwarded(_))
        ));
        assert_eq!(open.timeline().len(), 1);

        let mut case = forwarded_case();
        let court = now() + Duration::days(30);
        let later = now() + Duration::days(2);
        let info = case
            .update_prosecution(
                ProsecutionStatus::Accepted,
                Some("ADA Rivera".to_string()),
                Some(court),
                "Clerk",
                later,
            )
            .unwrap();
        assert_eq!(info.status, ProsecutionStatus::Accepted);
        assert_eq!(info.prosecutor_assigned.as_deref(), Some("ADA Rivera"));
        assert_eq!(info.last_updated, later);

        // A later update without a prosecutor keeps the assigned one
        case.update_prosecution(ProsecutionStatus::InProgress, None, None, "Clerk", later)
            .unwrap();
        let info = case.prosecution().unwrap();
        assert_eq!(info.status, ProsecutionStatus::InProgress);
        assert_eq!(info.prosecutor_assigned.as_deref(), Some("ADA Rivera"));
        assert_eq!(info.court_date, Some(court));
        assert_eq!(
            case.timeline().last().unwrap().kind,
            TimelineEventType::ProsecutionUpdated
        );
        assert_eq!(case.status(), CaseStatus::ForwardedProsecution);
    }

    #[test]
    fn test_invariants_catch_bad_records() {
        let mut case = Case::open(new_case(CaseType::Criminal), now()).unwrap();
        case.status = CaseStatus::ForwardedProsecution;
        assert_eq!(case.check_invariants(), Err(CaseError::ProsecutionRecordRequired));

        let mut case = Case::open(new_case(CaseType::Civil), now()).unwrap();
        case.assigned_detective = Some("Det. Brown".to_string());
        assert!(matches!(
            case.check_invariants(),
            Err(CaseError::DetectiveOnCivilCase(_))
        ));

        let mut case = Case::open(new_case(CaseType::Criminal), now()).unwrap();
        case.parties = Some(parties());
        assert!(matches!(case.check_invariants(), Err(CaseError::NotCivil(_))));
    }

    #[test]
    fn test_successor_accepts_growth() {
        let before = Case::open(new_case(CaseType::Criminal), now()).unwrap();
        let mut after = before.clone();
        after.add_note("Canvass done", "Off. Smith", now());
        after.transition(CaseStatus::Investigation, "Off. Smith", now()).unwrap();
        assert!(after.check_successor_of(&before).is_ok());
        assert!(before.check_successor_of(&before).is_ok());
    }

    #[test]
    fn test_successor_rejects_rewrites() {
        let before = forwarded_case();

        let mut reopened = before.clone();
        reopened.status = CaseStatus::Open;
        reopened.prosecution = None;
        reopened.timeline.clear();
        assert_eq!(
            reopened.check_successor_of(&before),
            Err(CaseError::InvalidTransition {
                from: CaseStatus::ForwardedProsecution,
                to: CaseStatus::Open
            })
        );

        let mut truncated = before.clone();
        truncated.timeline.pop();
        assert!(matches!(
            truncated.check_successor_of(&before),
            Err(CaseError::HistoryRewritten(_))
        ));

        let mut edited = before.clone();
        edited.timeline[0].description = "Nothing happened".to_string();
        assert!(matches!(
            edited.check_successor_of(&before),
            Err(CaseError::HistoryRewritten(_))
        ));

        let mut dropped = before.clone();
        dropped.prosecution = None;
        assert!(matches!(
            dropped.check_successor_of(&before),
            Err(CaseError::HistoryRewritten(_))
        ));
    }
}
