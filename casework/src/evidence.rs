//! Evidence records and their chain of custody.
//!
//! A chain of custody only grows. Entries are handed out by shared reference
//! and every append is checked against the last entry, so the history read
//! back is exactly the history recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::error::CaseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    Document,
    Photo,
    Video,
    Physical,
    Digital,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum CustodyAction {
    Collected,
    Transferred,
    Analyzed,
    Stored,
    Returned,
}

/// One custody event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustodyEntry {
    pub id: String,
    pub officer: String,
    pub action: CustodyAction,
    pub timestamp: DateTime<Utc>,
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Append-only custody log.
///
/// Deserializing re-validates the sequence, so a tampered or reordered log
/// fails to load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CustodyEntry>", into = "Vec<CustodyEntry>")]
pub struct ChainOfCustody {
    entries: Vec<CustodyEntry>,
}

impl ChainOfCustody {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_next(&self, action: CustodyAction, timestamp: DateTime<Utc>) -> Result<(), CaseError> {
        match self.entries.last() {
            None if action != CustodyAction::Collected => Err(CaseError::CustodyMustStartCollected),
            Some(last) if timestamp < last.timestamp => Err(CaseError::CustodyOutOfOrder),
            _ => Ok(()),
        }
    }

    /// Append an entry. The first must be `collected`; later ones may not
    /// predate the previous entry.
    pub fn append(
        &mut self,
        officer: impl Into<String>,
        action: CustodyAction,
        location: impl Into<String>,
        notes: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<&CustodyEntry, CaseError> {
        self.check_next(action, timestamp)?;
        self.entries.push(CustodyEntry {
            id: uuid::Uuid::new_v4().to_string(),
            officer: officer.into(),
            action,
            timestamp,
            location: location.into(),
            notes,
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn entries(&self) -> &[CustodyEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&CustodyEntry> {
        self.entries.last()
    }

    /// Officer who last handled the item.
    pub fn current_holder(&self) -> Option<&str> {
        self.entries.last().map(|e| e.officer.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<CustodyEntry>> for ChainOfCustody {
    type Error = CaseError;

    fn try_from(entries: Vec<CustodyEntry>) -> Result<Self, Self::Error> {
        let mut chain = Self::new();
        for entry in entries {
            chain.check_next(entry.action, entry.timestamp)?;
            chain.entries.push(entry);
        }
        Ok(chain)
    }
}

impl From<ChainOfCustody> for Vec<CustodyEntry> {
    fn from(chain: ChainOfCustody) -> Self {
        chain.entries
    }
}

/// An evidence item attached to a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub id: String,
    pub case_id: String,
    pub kind: EvidenceKind,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_secure: bool,
    #[serde(default)]
    pub custody: ChainOfCustody,
}

impl Evidence {
    /// New evidence item with its collection recorded as the first custody entry.
    pub fn collected(
        case_id: impl Into<String>,
        kind: EvidenceKind,
        name: impl Into<String>,
        description: impl Into<String>,
        officer: impl Into<String>,
        location: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let officer = officer.into();
        let location = location.into();

        let custody = ChainOfCustody {
            entries: vec![CustodyEntry {
                id: uuid::Uuid::new_v4().to_string(),
                officer: officer.clone(),
                action: CustodyAction::Collected,
                timestamp: now,
                location: location.clone(),
                notes: None,
            }],
        };

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            case_id: case_id.into(),
            kind,
            name: name.into(),
            description: description.into(),
            tags: Vec::new(),
            uploaded_by: officer,
            uploaded_at: now,
            location: Some(location),
            is_secure: false,
            custody,
        }
    }
}
