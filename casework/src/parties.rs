//! People and charges attached to cases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A charge filed on a criminal case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    /// Offense category, e.g. `burglary`
    pub category: String,
    #[serde(default)]
    pub description: String,
}

/// One side of a civil dispute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    #[serde(default)]
    pub contact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CivilParties {
    pub complainant: Party,
    pub opposing_party: Party,
}

impl CivilParties {
    /// Both sides are named.
    pub fn is_complete(&self) -> bool {
        !self.complainant.name.trim().is_empty() && !self.opposing_party.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspectStatus {
    #[default]
    Active,
    Cleared,
    Wanted,
    InCustody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suspect {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub status: SuspectStatus,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub known_associates: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub associated_cases: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Suspect {
    pub fn new(full_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            full_name: full_name.into(),
            age: None,
            status: SuspectStatus::Active,
            aliases: Vec::new(),
            known_associates: Vec::new(),
            notes: String::new(),
            associated_cases: Vec::new(),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Witness {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    pub statement: String,
    #[serde(default)]
    pub reliability: Reliability,
    /// Identity withheld from general case views
    #[serde(default)]
    pub is_protected: bool,
    #[serde(default)]
    pub associated_cases: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Witness {
    pub fn new(full_name: impl Into<String>, statement: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            full_name: full_name.into(),
            phone: String::new(),
            statement: statement.into(),
            reliability: Reliability::Medium,
            is_protected: false,
            associated_cases: Vec::new(),
            created_at: now,
        }
    }
}
