//! Denormalized prediction history rows.

use serde::{Deserialize, Serialize};

use super::format_one_decimal;
use super::prediction::RiskLevel;

/// One row of the service-side prediction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub age: u32,
    pub height: f64,
    pub weight: f64,
    pub risk: RiskLevel,
    pub chance: f64,
}

impl HistoryEntry {
    pub fn height_display(&self) -> String {
        format_one_decimal(self.height)
    }

    pub fn weight_display(&self) -> String {
        format_one_decimal(self.weight)
    }

    pub fn chance_display(&self) -> String {
        format!("{}%", format_one_decimal(self.chance))
    }
}
