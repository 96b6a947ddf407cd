//! Size/quantity breakdown for an order item.
//!
//! The invariant: an item's total quantity is always the arithmetic sum of
//! its breakdown. The total is recomputed from the breakdown on every write
//! and never accepted from client input.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One entry in an item's size breakdown, e.g. `{ "size": "M", "quantity": 3 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeEntry {
    pub size: String,
    pub quantity: i64,
}

/// Sum of all quantities in a breakdown.
pub fn total_quantity(sizes: &[SizeEntry]) -> i64 {
    sizes.iter().map(|entry| entry.quantity).sum()
}

/// Validate a breakdown before persistence: non-empty size labels and
/// non-negative quantities.
pub fn validate_sizes(sizes: &[SizeEntry]) -> Result<(), CoreError> {
    for entry in sizes {
        if entry.size.trim().is_empty() {
            return Err(CoreError::Validation(
                "Size label must not be empty".into(),
            ));
        }
        if entry.quantity < 0 {
            return Err(CoreError::Validation(format!(
                "Quantity for size {} must not be negative",
                entry.size
            )));
        }
    }
    Ok(())
}
