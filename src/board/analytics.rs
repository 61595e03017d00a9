//! Per-wall burner distribution analytics.
//!
//! The imbalance between NG-only and off-gas-only burner counts is used as
//! a proxy for thermal skew risk on a wall. Classification is deterministic
//! with no hysteresis.

use serde::Serialize;
use utoipa::ToSchema;

use super::{BurnerState, Wall};

/// Burner counts by operating mode on one wall.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StateCounts {
    pub both: u32,
    pub ng_only: u32,
    pub off_gas: u32,
    pub capped: u32,
}

impl StateCounts {
    pub fn record(&mut self, state: BurnerState) {
        match state {
            BurnerState::Both => self.both += 1,
            BurnerState::NgOnly => self.ng_only += 1,
            BurnerState::OffGas => self.off_gas += 1,
            BurnerState::Capped => self.capped += 1,
        }
    }

    /// Absolute difference between NG-only and off-gas-only counts.
    #[must_use]
    pub fn imbalance(&self) -> u32 {
        self.ng_only.abs_diff(self.off_gas)
    }
}

/// Discrete classification of imbalance magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Major,
    Critical,
}

impl Severity {
    #[must_use]
    pub fn classify(imbalance: u32) -> Self {
        if imbalance > 20 {
            Severity::Critical
        } else if imbalance > 10 {
            Severity::Major
        } else if imbalance > 5 {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    #[must_use]
    pub fn is_normal(self) -> bool {
        self == Severity::Normal
    }
}

/// Analytics snapshot for one wall.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct WallAnalytics {
    #[schema(value_type = String)]
    pub wall: Wall,
    pub counts: StateCounts,
    pub imbalance: u32,
    pub severity: Severity,
}

impl WallAnalytics {
    #[must_use]
    pub fn from_counts(wall: Wall, counts: StateCounts) -> Self {
        let imbalance = counts.imbalance();
        Self {
            wall,
            counts,
            imbalance,
            severity: Severity::classify(imbalance),
        }
    }
}
