//! Stateless façade tying the engine together: one call turns raw deal
//! inputs into the full underwriting picture, or `None` when the
//! financing inputs are still incomplete.

use crate::amortization;
use crate::domain::{DealInputs, DealMetrics, Grade, MortgageBreakdown, PillarEvaluation};
use crate::expenses::OperatingExpenses;
use crate::grading::{self, GradeOutcome, GradeProfile, GradingContext};
use crate::max_offer;
use crate::metrics;
use crate::pillars::{self, PillarContext};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default debt coverage target used when solving the maximum allowable
/// offer.
pub const DEFAULT_TARGET_DCR: f64 = 1.25;

/// Applies one grade profile and DCR target to any number of deals.
/// Holds no deal state; every evaluation is computed fresh.
#[derive(Debug, Clone)]
pub struct DealEvaluator {
    profile: GradeProfile,
    target_dcr: f64,
}

impl DealEvaluator {
    pub fn new(profile: GradeProfile) -> Self {
        Self {
            profile,
            target_dcr: DEFAULT_TARGET_DCR,
        }
    }

    pub fn with_target_dcr(mut self, target_dcr: f64) -> Self {
        self.target_dcr = target_dcr;
        self
    }

    pub fn profile(&self) -> &GradeProfile {
        &self.profile
    }

    /// Full evaluation of one deal. `None` means "add more inputs":
    /// purchase price, down payment, rate, or term is missing or
    /// unusable.
    pub fn evaluate(&self, inputs: &DealInputs) -> Option<DealEvaluation> {
        let deal_metrics = metrics::compute_metrics(inputs)?;

        // compute_metrics already proved these fields are present.
        let purchase_price = inputs.purchase_price?;
        let down_payment_percent = inputs.down_payment_percent?;
        let interest_rate_percent = inputs.interest_rate_percent?;
        let term_years = inputs.loan_term_years?;

        let expenses = metrics::expense_picture(inputs, purchase_price);
        let mortgage = amortization::first_year_breakdown(
            purchase_price,
            down_payment_percent,
            interest_rate_percent,
            term_years,
            expenses.taxes.annual_amount,
            expenses.insurance.annual_amount,
        );

        let annual_principal_paydown = mortgage
            .as_ref()
            .map(|breakdown| breakdown.annual_principal)
            .unwrap_or(0.0);
        let appreciation_rate_percent = inputs.appreciation_rate_percent.unwrap_or(0.0);
        let cashflow_threshold_monthly = inputs.cashflow_threshold_monthly.unwrap_or(0.0);

        let weighted = grading::weighted_grade(
            &deal_metrics,
            &GradingContext {
                purchase_price,
                annual_principal_paydown,
                appreciation_rate_percent,
                cashflow_threshold_monthly,
            },
            &self.profile,
        );

        let pillars = pillars::evaluate_pillars(&PillarContext {
            purchase_price,
            annual_cash_flow: deal_metrics.annual_cash_flow,
            annual_principal_paydown,
            appreciation_rate_percent,
            cashflow_threshold_monthly,
            marginal_tax_rate_percent: inputs.marginal_tax_rate_percent,
            land_value_percent: inputs.land_value_percent,
        });

        let max_allowable_offer = max_offer::maximum_allowable_offer(
            &deal_metrics,
            inputs.down_payment_percent,
            inputs.interest_rate_percent,
            inputs.loan_term_years,
            self.target_dcr,
        );

        tracing::debug!(
            grade = %weighted.grade,
            total_score = weighted.total_score,
            quick_grade = %deal_metrics.grade,
            "deal evaluated"
        );

        Some(DealEvaluation {
            metrics: deal_metrics,
            expenses,
            mortgage,
            weighted,
            pillars,
            max_allowable_offer,
        })
    }
}

impl Default for DealEvaluator {
    fn default() -> Self {
        Self::new(GradeProfile::default())
    }
}

/// Everything one evaluation produces. The quick grade lives inside
/// `metrics`; the profile-weighted grade in `weighted`. The two scales
/// are independent and may disagree; rendering decides which badge leads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealEvaluation {
    pub metrics: DealMetrics,
    pub expenses: OperatingExpenses,
    pub mortgage: Option<MortgageBreakdown>,
    pub weighted: GradeOutcome,
    pub pillars: PillarEvaluation,
    pub max_allowable_offer: Option<f64>,
}

impl DealEvaluation {
    pub fn weighted_grade(&self) -> Grade {
        self.weighted.grade
    }

    /// Descending ranking order for deal comparison lists: better
    /// weighted grade first, cash-on-cash breaking ties.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .weighted
            .grade
            .cmp(&self.weighted.grade)
            .then_with(|| {
                other
                    .metrics
                    .cash_on_cash
                    .total_cmp(&self.metrics.cash_on_cash)
            })
    }
}
