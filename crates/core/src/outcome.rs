//! Post-delivery quality outcome.
//!
//! Logged once per order when the delivered goods are inspected. Logging an
//! outcome simultaneously forces the order's status to `Delivered`; the
//! persistence layer issues both as one single-row write.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The quality-inspection verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeStatus {
    #[serde(rename = "Successful")]
    Successful,
    #[serde(rename = "Alteration Required")]
    AlterationRequired,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Successful => "Successful",
            OutcomeStatus::AlterationRequired => "Alteration Required",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutcomeStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Successful" => Ok(OutcomeStatus::Successful),
            "Alteration Required" => Ok(OutcomeStatus::AlterationRequired),
            other => Err(CoreError::Validation(format!(
                "Unknown outcome status: {other}"
            ))),
        }
    }
}

/// Enforce the persistence-boundary rule: an `Alteration Required` outcome
/// must carry a non-empty solution. The UI applies the same rule, but the
/// store must not trust it.
pub fn validate_outcome(status: OutcomeStatus, solution: Option<&str>) -> Result<(), CoreError> {
    if status == OutcomeStatus::AlterationRequired
        && solution.map_or(true, |s| s.trim().is_empty())
    {
        return Err(CoreError::Validation(
            "A solution is required when the outcome is Alteration Required".into(),
        ));
    }
    Ok(())
}
