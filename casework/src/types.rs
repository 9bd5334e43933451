//! Core case vocabulary.
//!
//! With the `typescript` feature enabled these enums export to TypeScript
//! for the dashboard front end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::error::TaxonomyError;

/// Case type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    Criminal,
    Civil,
}

impl CaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Criminal => "criminal",
            Self::Civil => "civil",
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseType {
    type Err = TaxonomyError;

    /// Exact, lower-case match only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "criminal" => Ok(Self::Criminal),
            "civil" => Ok(Self::Civil),
            other => Err(TaxonomyError::InvalidCaseType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Case status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Open,
    Investigation,
    Pending,
    Court,
    ForwardedProsecution,
    Closed,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Investigation => "investigation",
            Self::Pending => "pending",
            Self::Court => "court",
            Self::ForwardedProsecution => "forwarded_prosecution",
            Self::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Investigation => "Under Investigation",
            Self::Pending => "Pending",
            Self::Court => "In Court",
            Self::ForwardedProsecution => "Forwarded to Prosecution",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a case on the prosecution side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ProsecutionStatus {
    PendingReview,
    Accepted,
    Rejected,
    InProgress,
    Completed,
}

/// Record created when a case is forwarded to the prosecution office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProsecutionInfo {
    pub forwarded_at: DateTime<Utc>,
    pub forwarded_by: String,
    /// `PROS-YYYY-NNN`
    pub prosecution_case_id: String,
    pub prosecutor_assigned: Option<String>,
    pub status: ProsecutionStatus,
    pub notes: Option<String>,
    pub court_date: Option<DateTime<Utc>>,
    pub last_updated: DateTime<Utc>,
}

impl ProsecutionInfo {
    /// Record a status update from the prosecution office.
    pub fn update(
        &mut self,
        status: ProsecutionStatus,
        prosecutor: Option<String>,
        court_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) {
        self.status = status;
        if prosecutor.is_some() {
            self.prosecutor_assigned = prosecutor;
        }
        if court_date.is_some() {
            self.court_date = court_date;
        }
        self.last_updated = now;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl Location {
    pub fn address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            coordinates: None,
        }
    }
}

/// Kind of timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventType {
    Created,
    EvidenceAdded,
    SuspectAdded,
    WitnessInterviewed,
    StatusChanged,
    NoteAdded,
    DetectiveAssigned,
    ChargeFiled,
    PartiesRecorded,
    MediationRecorded,
    ResolutionRecorded,
    DocumentAdded,
    ForwardedProsecution,
    ProsecutionUpdated,
}

/// One immutable entry in a case timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub kind: TimelineEventType,
    pub description: String,
    pub officer: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
