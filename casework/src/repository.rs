//! Case storage.
//!
//! Callers work against [`CaseRepository`]; [`InMemoryCaseRepository`] backs
//! the CLI and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU16, Ordering};
use tracing::{debug, info, warn};

use crate::case::Case;
use crate::error::CaseError;
use crate::evidence::{CustodyAction, CustodyEntry, Evidence};
use crate::types::CaseStatus;

/// Storage for cases and their evidence.
#[async_trait]
pub trait CaseRepository: Send + Sync {
    async fn get(&self, case_id: &str) -> Result<Case, CaseError>;

    /// Insert or replace a case.
    ///
    /// Records that break case invariants are refused. A replacement must
    /// extend the stored record: same identity, a status reachable by the
    /// lifecycle, and a timeline that starts with the stored one.
    async fn put(&self, case: Case) -> Result<(), CaseError>;

    /// All cases, newest first.
    async fn list(&self) -> Vec<Case>;

    async fn by_status(&self, status: CaseStatus) -> Vec<Case>;

    /// Next value for case and prosecution numbering.
    async fn next_sequence(&self) -> u16;

    /// Store an evidence item. Its case must exist.
    async fn put_evidence(&self, evidence: Evidence) -> Result<(), CaseError>;

    async fn get_evidence(&self, evidence_id: &str) -> Result<Evidence, CaseError>;

    /// Record a custody event on a stored evidence item.
    async fn append_custody(
        &self,
        evidence_id: &str,
        officer: &str,
        action: CustodyAction,
        location: &str,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<CustodyEntry, CaseError>;
}

/// Process-local repository.
pub struct InMemoryCaseRepository {
    cases: DashMap<String, Case>,
    evidence: DashMap<String, Evidence>,
    sequence: AtomicU16,
}

impl InMemoryCaseRepository {
    pub fn new() -> Self {
        Self {
            cases: DashMap::new(),
            evidence: DashMap::new(),
            sequence: AtomicU16::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl Default for InMemoryCaseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaseRepository for InMemoryCaseRepository {
    async fn get(&self, case_id: &str) -> Result<Case, CaseError> {
        self.cases
            .get(case_id)
            .map(|c| c.clone())
            .ok_or_else(|| CaseError::NotFound(case_id.to_string()))
    }

    async fn put(&self, case: Case) -> Result<(), CaseError> {
        case.check_invariants()?;
        debug!(case = %case.case_number, status = %case.status(), "Storing case");
        match self.cases.entry(case.id.clone()) {
            Entry::Occupied(mut stored) => {
                if let Err(e) = case.check_successor_of(stored.get()) {
                    warn!(case = %case.case_number, error = %e, "Refusing case replacement");
                    return Err(e);
                }
                stored.insert(case);
            }
            Entry::Vacant(slot) => {
                slot.insert(case);
            }
        }
        Ok(())
    }

    async fn list(&self) -> Vec<Case> {
        let mut cases: Vec<Case> = self.cases.iter().map(|c| c.value().clone()).collect();
        cases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        cases
    }

    async fn by_status(&self, status: CaseStatus) -> Vec<Case> {
        let mut cases: Vec<Case> = self
            .cases
            .iter()
            .filter(|c| c.status() == status)
            .map(|c| c.value().clone())
            .collect();
        cases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        cases
    }

    async fn next_sequence(&self) -> u16 {
        // Case numbers carry three digits
        self.sequence
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |s| Some(s % 999 + 1))
            .unwrap_or(1)
    }

    async fn put_evidence(&self, evidence: Evidence) -> Result<(), CaseError> {
        if !self.cases.contains_key(&evidence.case_id) {
            return Err(CaseError::NotFound(evidence.case_id.clone()));
        }
        debug!(evidence = %evidence.id, case = %evidence.case_id, "Storing evidence");
        self.evidence.insert(evidence.id.clone(), evidence);
        Ok(())
    }

    async fn get_evidence(&self, evidence_id: &str) -> Result<Evidence, CaseError> {
        self.evidence
            .get(evidence_id)
            .map(|e| e.clone())
            .ok_or_else(|| CaseError::NotFound(evidence_id.to_string()))
    }

    async fn append_custody(
        &self,
        evidence_id: &str,
        officer: &str,
        action: CustodyAction,
        location: &str,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<CustodyEntry, CaseError> {
        let mut item = self
            .evidence
            .get_mut(evidence_id)
            .ok_or_else(|| CaseError::NotFound(evidence_id.to_string()))?;
        let entry = item
            .custody
            .append(officer, action, location, notes, now)?
            .clone();
        info!(evidence = %evidence_id, officer = %officer, action = ?action, "Custody updated");
        Ok(entry)
    }
}
