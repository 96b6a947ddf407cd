//! Order type: sample run vs. final production run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Whether a line item is a sample or a final production run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Sample,
    Production,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Sample => "sample",
            OrderType::Production => "production",
        }
    }
}

impl Default for OrderType {
    fn default() -> Self {
        OrderType::Production
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sample" => Ok(OrderType::Sample),
            "production" => Ok(OrderType::Production),
            other => Err(CoreError::Validation(format!(
                "Unknown order type: {other}"
            ))),
        }
    }
}
