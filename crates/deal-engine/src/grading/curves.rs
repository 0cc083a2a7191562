//! Data-driven scoring curves: each metric maps to an ordered list of
//! (value, score) anchors, scored by clamped piecewise-linear
//! interpolation. Tuning a curve means editing a table, not code.

use serde::{Deserialize, Serialize};

/// One anchor on a scoring curve. Anchors are listed ascending by value
/// with scores in 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub value: f64,
    pub score: f64,
}

const fn bp(value: f64, score: f64) -> Breakpoint {
    Breakpoint { value, score }
}

/// The five metrics the weighted grade scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoredMetric {
    CashOnCash,
    DebtCoverage,
    CapRate,
    CashFlow,
    EquityGain,
}

impl ScoredMetric {
    pub const ALL: [ScoredMetric; 5] = [
        ScoredMetric::CashOnCash,
        ScoredMetric::DebtCoverage,
        ScoredMetric::CapRate,
        ScoredMetric::CashFlow,
        ScoredMetric::EquityGain,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScoredMetric::CashOnCash => "Cash-on-Cash",
            ScoredMetric::DebtCoverage => "Debt Coverage",
            ScoredMetric::CapRate => "Cap Rate",
            ScoredMetric::CashFlow => "Annual Cash Flow",
            ScoredMetric::EquityGain => "Equity Gain",
        }
    }
}

const CASH_ON_CASH_CURVE: [Breakpoint; 4] = [
    bp(0.00, 0.0),
    bp(0.08, 60.0),
    bp(0.12, 85.0),
    bp(0.15, 100.0),
];

const DEBT_COVERAGE_CURVE: [Breakpoint; 4] = [
    bp(1.00, 0.0),
    bp(1.20, 60.0),
    bp(1.35, 85.0),
    bp(1.50, 100.0),
];

const CAP_RATE_CURVE: [Breakpoint; 4] = [
    bp(0.03, 0.0),
    bp(0.06, 60.0),
    bp(0.08, 85.0),
    bp(0.10, 100.0),
];

const EQUITY_GAIN_CURVE: [Breakpoint; 4] = [
    bp(0.00, 0.0),
    bp(0.02, 60.0),
    bp(0.04, 85.0),
    bp(0.06, 100.0),
];

/// Fixed curve for a metric, or `None` for cash flow, whose anchors
/// depend on the caller's break-even threshold.
pub fn fixed_curve(metric: ScoredMetric) -> Option<&'static [Breakpoint]> {
    match metric {
        ScoredMetric::CashOnCash => Some(&CASH_ON_CASH_CURVE),
        ScoredMetric::DebtCoverage => Some(&DEBT_COVERAGE_CURVE),
        ScoredMetric::CapRate => Some(&CAP_RATE_CURVE),
        ScoredMetric::CashFlow => None,
        ScoredMetric::EquityGain => Some(&EQUITY_GAIN_CURVE),
    }
}

/// Cash-flow anchors derived from the monthly break-even threshold:
/// break-even annual cash flow scores 50, with full marks $10k above it.
pub fn cash_flow_curve(cashflow_threshold_monthly: f64) -> [Breakpoint; 4] {
    let break_even_annual = cashflow_threshold_monthly.max(0.0) * 12.0;
    [
        bp(0.0, 0.0),
        bp(break_even_annual, 50.0),
        bp(break_even_annual + 5_000.0, 80.0),
        bp(break_even_annual + 10_000.0, 100.0),
    ]
}

const COINCIDENT_ANCHOR_EPSILON: f64 = 1e-9;

/// Scores a value against a curve: clamped outside the anchor range,
/// linearly interpolated between neighboring anchors. Coincident anchors
/// cannot divide by zero thanks to the epsilon floor on the span.
pub fn piecewise_score(value: f64, curve: &[Breakpoint]) -> f64 {
    let Some(first) = curve.first() else {
        return 0.0;
    };
    if value <= first.value {
        return first.score;
    }

    let last = curve[curve.len() - 1];
    if value >= last.value {
        return last.score;
    }

    for pair in curve.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        if value <= upper.value {
            let span = (upper.value - lower.value).max(COINCIDENT_ANCHOR_EPSILON);
            return lower.score + (upper.score - lower.score) * (value - lower.value) / span;
        }
    }

    last.score
}
