//! Human-readable case and prosecution identifiers.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CaseError;

/// A case number of the form `CASE-YYYY-MM-NNN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaseNumber {
    year: u16,
    month: u8,
    sequence: u16,
}

impl CaseNumber {
    /// Build a case number for the month of `now`. The sequence wraps at 1000.
    pub fn generate(now: DateTime<Utc>, sequence: u16) -> Self {
        Self {
            year: now.year().clamp(0, 9999) as u16,
            month: now.month() as u8,
            sequence: sequence % 1000,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn sequence(&self) -> u16 {
        self.sequence
    }
}

impl fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CASE-{:04}-{:02}-{:03}", self.year, self.month, self.sequence)
    }
}

fn digits<T: FromStr>(part: &str, width: usize) -> Option<T> {
    if part.len() == width && part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

impl FromStr for CaseNumber {
    type Err = CaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CaseError::InvalidCaseNumber(s.to_string());

        let mut parts = s.split('-');
        if parts.next() != Some("CASE") {
            return Err(invalid());
        }
        let year: u16 = parts.next().and_then(|p| digits(p, 4)).ok_or_else(invalid)?;
        let month: u8 = parts.next().and_then(|p| digits(p, 2)).ok_or_else(invalid)?;
        let sequence: u16 = parts.next().and_then(|p| digits(p, 3)).ok_or_else(invalid)?;
        if parts.next().is_some() || !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self {
            year,
            month,
            sequence,
        })
    }
}

impl TryFrom<String> for CaseNumber {
    type Error = CaseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CaseNumber> for String {
    fn from(value: CaseNumber) -> Self {
        value.to_string()
    }
}

/// Prosecution office reference of the form `PROS-YYYY-NNN`.
pub fn prosecution_case_id(now: DateTime<Utc>, sequence: u16) -> String {
    format!("PROS-{:04}-{:03}", now.year(), sequence % 1000)
}
