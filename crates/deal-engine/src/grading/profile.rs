//! Grade profiles: user-configurable weights over the five scored
//! metrics. The engine owns normalization; the profile store just hands
//! records over.

use serde::{Deserialize, Serialize};

/// Relative weights across the five scored metrics plus a badge color for
/// the rendering layer. Weights are relative, not fractions; call
/// [`GradeProfile::normalized_weights`] before mixing scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeProfile {
    pub name: String,
    pub cash_on_cash_weight: f64,
    pub debt_coverage_weight: f64,
    pub cap_rate_weight: f64,
    pub cash_flow_weight: f64,
    pub equity_gain_weight: f64,
    pub color: String,
}

impl GradeProfile {
    /// Even weighting across all five metrics.
    pub fn balanced() -> Self {
        Self {
            name: "balanced".to_string(),
            cash_on_cash_weight: 20.0,
            debt_coverage_weight: 20.0,
            cap_rate_weight: 20.0,
            cash_flow_weight: 20.0,
            equity_gain_weight: 20.0,
            color: "#3B82F6".to_string(),
        }
    }

    /// Income-first preset for buy-and-hold operators.
    pub fn cash_flow_focused() -> Self {
        Self {
            name: "cash-flow".to_string(),
            cash_on_cash_weight: 30.0,
            debt_coverage_weight: 25.0,
            cap_rate_weight: 10.0,
            cash_flow_weight: 30.0,
            equity_gain_weight: 5.0,
            color: "#10B981".to_string(),
        }
    }

    /// Growth-first preset weighting equity build-up heavily.
    pub fn appreciation_focused() -> Self {
        Self {
            name: "appreciation".to_string(),
            cash_on_cash_weight: 10.0,
            debt_coverage_weight: 15.0,
            cap_rate_weight: 20.0,
            cash_flow_weight: 10.0,
            equity_gain_weight: 45.0,
            color: "#8B5CF6".to_string(),
        }
    }

    /// Looks up a built-in preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "balanced" | "default" => Some(Self::balanced()),
            "cash-flow" | "cashflow" => Some(Self::cash_flow_focused()),
            "appreciation" | "growth" => Some(Self::appreciation_focused()),
            _ => None,
        }
    }

    fn weight_sum(&self) -> f64 {
        self.cash_on_cash_weight
            + self.debt_coverage_weight
            + self.cap_rate_weight
            + self.cash_flow_weight
            + self.equity_gain_weight
    }

    /// Divides each weight by the sum of all five, flooring the
    /// denominator at 1 when the sum is non-positive. With at least one
    /// positive raw weight the results sum to 1.
    pub fn normalized_weights(&self) -> NormalizedWeights {
        let sum = self.weight_sum();
        let denominator = if sum <= 0.0 { 1.0 } else { sum };
        NormalizedWeights {
            cash_on_cash: self.cash_on_cash_weight / denominator,
            debt_coverage: self.debt_coverage_weight / denominator,
            cap_rate: self.cap_rate_weight / denominator,
            cash_flow: self.cash_flow_weight / denominator,
            equity_gain: self.equity_gain_weight / denominator,
        }
    }
}

impl Default for GradeProfile {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Weights after normalization; fractions of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWeights {
    pub cash_on_cash: f64,
    pub debt_coverage: f64,
    pub cap_rate: f64,
    pub cash_flow: f64,
    pub equity_gain: f64,
}
