//! The production workflow: the fixed, totally ordered set of stage labels
//! an order moves through on the factory floor.
//!
//! This is an ordered label set, not a guarded state machine. Transition
//! legality lives in one place, [`transition_allowed`], which currently
//! permits every move (forward, backward, or skipping stages). Tightening
//! the policy later is a change to that one function, not a rewrite of the
//! callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A manufacturing stage label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductionStatus {
    #[serde(rename = "Order Received")]
    OrderReceived,
    #[serde(rename = "Inspection")]
    Inspection,
    #[serde(rename = "Cutting")]
    Cutting,
    #[serde(rename = "Stitching")]
    Stitching,
    #[serde(rename = "Embroidery/Printing")]
    EmbroideryPrinting,
    #[serde(rename = "Quality Check")]
    QualityCheck,
    #[serde(rename = "Packing")]
    Packing,
    #[serde(rename = "Delivered")]
    Delivered,
}

/// All stages in fixed forward order. Progress displays derive from the
/// index into this slice.
pub const ALL_STATUSES: [ProductionStatus; 8] = [
    ProductionStatus::OrderReceived,
    ProductionStatus::Inspection,
    ProductionStatus::Cutting,
    ProductionStatus::Stitching,
    ProductionStatus::EmbroideryPrinting,
    ProductionStatus::QualityCheck,
    ProductionStatus::Packing,
    ProductionStatus::Delivered,
];

impl ProductionStatus {
    /// The status every newly created order starts in.
    pub const INITIAL: ProductionStatus = ProductionStatus::OrderReceived;

    /// The terminal label. Not enforced as immutable; see [`transition_allowed`].
    pub const TERMINAL: ProductionStatus = ProductionStatus::Delivered;

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductionStatus::OrderReceived => "Order Received",
            ProductionStatus::Inspection => "Inspection",
            ProductionStatus::Cutting => "Cutting",
            ProductionStatus::Stitching => "Stitching",
            ProductionStatus::EmbroideryPrinting => "Embroidery/Printing",
            ProductionStatus::QualityCheck => "Quality Check",
            ProductionStatus::Packing => "Packing",
            ProductionStatus::Delivered => "Delivered",
        }
    }

    /// Zero-based position of this stage in the fixed forward order.
    pub fn index(&self) -> usize {
        ALL_STATUSES
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }

    /// Progress percentage derived solely from the stage index.
    /// `Order Received` is 0, `Delivered` is 100.
    pub fn progress_percent(&self) -> u8 {
        let steps = ALL_STATUSES.len() - 1;
        (self.index() * 100 / steps) as u8
    }
}

impl fmt::Display for ProductionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_STATUSES
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown production status: {s}")))
    }
}

/// Whether moving an order from `from` to `to` is permitted.
///
/// The current policy allows any transition, including backward moves and
/// moves out of `Delivered`. Callers must route every status change through
/// this function so a stricter relation can be introduced without touching
/// handler code.
pub fn transition_allowed(_from: ProductionStatus, _to: ProductionStatus) -> bool {
    true
}
