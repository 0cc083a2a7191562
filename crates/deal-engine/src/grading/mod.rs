//! Profile-weighted composite grading: five piecewise-scored metrics
//! mixed by normalized profile weights into a 0–100 total, then mapped to
//! a letter.

mod curves;
mod profile;

pub use curves::{cash_flow_curve, fixed_curve, piecewise_score, Breakpoint, ScoredMetric};
pub use profile::{GradeProfile, NormalizedWeights};

use crate::domain::{DealMetrics, Grade};
use serde::{Deserialize, Serialize};

/// Deal-level context the composite grade needs beyond the metric set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradingContext {
    pub purchase_price: f64,
    pub annual_principal_paydown: f64,
    pub appreciation_rate_percent: f64,
    pub cashflow_threshold_monthly: f64,
}

/// One metric's contribution to the composite, kept for audit display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub metric: ScoredMetric,
    pub value: f64,
    pub score: f64,
    pub weight: f64,
    pub weighted_score: f64,
}

/// Composite grade with its per-metric breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeOutcome {
    pub grade: Grade,
    pub total_score: f64,
    pub components: Vec<ScoreComponent>,
}

/// Annual equity gain: first-year principal paydown plus appreciation,
/// with negative appreciation clamped out.
pub fn annual_equity_gain(
    purchase_price: f64,
    annual_principal_paydown: f64,
    appreciation_rate_percent: f64,
) -> f64 {
    annual_principal_paydown + (purchase_price * appreciation_rate_percent / 100.0).max(0.0)
}

fn grade_for_total(total_score: f64) -> Grade {
    if total_score >= 85.0 {
        Grade::A
    } else if total_score >= 70.0 {
        Grade::B
    } else if total_score >= 55.0 {
        Grade::C
    } else {
        Grade::DF
    }
}

/// Scores the five metrics against their curves, mixes them by the
/// profile's normalized weights, and maps the total to a letter at
/// 85/70/55.
pub fn weighted_grade(
    metrics: &DealMetrics,
    context: &GradingContext,
    profile: &GradeProfile,
) -> GradeOutcome {
    let weights = profile.normalized_weights();

    let equity_gain = annual_equity_gain(
        context.purchase_price,
        context.annual_principal_paydown,
        context.appreciation_rate_percent,
    );
    let equity_gain_ratio = if context.purchase_price > 0.0 {
        equity_gain / context.purchase_price
    } else {
        0.0
    };
    let cash_flow_anchors = cash_flow_curve(context.cashflow_threshold_monthly);

    let mut components = Vec::with_capacity(ScoredMetric::ALL.len());
    let mut total_score = 0.0;
    for metric in ScoredMetric::ALL {
        let (value, score) = match metric {
            ScoredMetric::CashFlow => (
                metrics.annual_cash_flow,
                piecewise_score(metrics.annual_cash_flow, &cash_flow_anchors),
            ),
            other => {
                let value = match other {
                    ScoredMetric::CashOnCash => metrics.cash_on_cash,
                    ScoredMetric::DebtCoverage => metrics.debt_coverage_ratio,
                    ScoredMetric::CapRate => metrics.cap_rate,
                    ScoredMetric::EquityGain => equity_gain_ratio,
                    ScoredMetric::CashFlow => unreachable!("handled above"),
                };
                let curve = fixed_curve(other).expect("non-cash-flow curves are fixed");
                (value, piecewise_score(value, curve))
            }
        };

        let weight = match metric {
            ScoredMetric::CashOnCash => weights.cash_on_cash,
            ScoredMetric::DebtCoverage => weights.debt_coverage,
            ScoredMetric::CapRate => weights.cap_rate,
            ScoredMetric::CashFlow => weights.cash_flow,
            ScoredMetric::EquityGain => weights.equity_gain,
        };

        let weighted_score = score * weight;
        total_score += weighted_score;
        components.push(ScoreComponent {
            metric,
            value,
            score,
            weight,
            weighted_score,
        });
    }

    GradeOutcome {
        grade: grade_for_total(total_score),
        total_score,
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(cash_on_cash: f64, dcr: f64, cap_rate: f64, annual_cash_flow: f64) -> DealMetrics {
        DealMetrics {
            total_annual_rent: 36_000.0,
            net_operating_income: 23_400.0,
            cap_rate,
            annual_debt_service: 17_000.0,
            annual_cash_flow,
            cash_on_cash,
            debt_coverage_ratio: dcr,
            grade: crate::metrics::grade_for(cash_on_cash, dcr),
        }
    }

    fn context() -> GradingContext {
        GradingContext {
            purchase_price: 300_000.0,
            annual_principal_paydown: 3_000.0,
            appreciation_rate_percent: 3.0,
            cashflow_threshold_monthly: 200.0,
        }
    }

    #[test]
    fn strong_deal_grades_a() {
        let outcome = weighted_grade(
            &metrics(0.15, 1.50, 0.10, 15_000.0),
            &context(),
            &GradeProfile::balanced(),
        );
        assert_eq!(outcome.grade, Grade::A);
        assert!(outcome.total_score >= 85.0);
    }

    #[test]
    fn weak_deal_fails() {
        let outcome = weighted_grade(
            &metrics(-0.02, 0.90, 0.02, -2_000.0),
            &context(),
            &GradeProfile::balanced(),
        );
        assert_eq!(outcome.grade, Grade::DF);
    }

    #[test]
    fn components_sum_to_the_total() {
        let outcome = weighted_grade(
            &metrics(0.09, 1.28, 0.07, 6_000.0),
            &context(),
            &GradeProfile::cash_flow_focused(),
        );
        let sum: f64 = outcome
            .components
            .iter()
            .map(|component| component.weighted_score)
            .sum();
        assert!((sum - outcome.total_score).abs() < 1e-9);
        assert_eq!(outcome.components.len(), 5);
    }

    #[test]
    fn zero_weight_profile_scores_zero() {
        let profile = GradeProfile {
            name: "empty".to_string(),
            cash_on_cash_weight: 0.0,
            debt_coverage_weight: 0.0,
            cap_rate_weight: 0.0,
            cash_flow_weight: 0.0,
            equity_gain_weight: 0.0,
            color: "#000000".to_string(),
        };
        let outcome = weighted_grade(&metrics(0.15, 1.50, 0.10, 15_000.0), &context(), &profile);
        assert_eq!(outcome.total_score, 0.0);
        assert_eq!(outcome.grade, Grade::DF);
    }

    #[test]
    fn grade_never_drops_as_cash_on_cash_rises() {
        let profile = GradeProfile::balanced();
        let mut previous = Grade::DF;
        for step in 0..40 {
            let coc = -0.05 + 0.005 * f64::from(step);
            let outcome = weighted_grade(&metrics(coc, 1.25, 0.06, 4_000.0), &context(), &profile);
            assert!(outcome.grade >= previous, "coc {coc} regressed the grade");
            previous = outcome.grade;
        }
    }

    #[test]
    fn grade_never_drops_as_coverage_rises() {
        let profile = GradeProfile::balanced();
        let mut previous = Grade::DF;
        for step in 0..40 {
            let dcr = 0.80 + 0.025 * f64::from(step);
            let outcome = weighted_grade(&metrics(0.08, dcr, 0.06, 4_000.0), &context(), &profile);
            assert!(outcome.grade >= previous, "dcr {dcr} regressed the grade");
            previous = outcome.grade;
        }
    }

    #[test]
    fn zero_purchase_price_guards_the_equity_ratio() {
        let mut ctx = context();
        ctx.purchase_price = 0.0;
        let outcome = weighted_grade(
            &metrics(0.08, 1.25, 0.06, 4_000.0),
            &ctx,
            &GradeProfile::balanced(),
        );
        let equity = outcome
            .components
            .iter()
            .find(|component| component.metric == ScoredMetric::EquityGain)
            .expect("equity component present");
        assert!(equity.value.is_finite());
        assert_eq!(equity.value, 0.0);
    }

    #[test]
    fn tier_thresholds_sit_at_85_70_55() {
        assert_eq!(grade_for_total(85.0), Grade::A);
        assert_eq!(grade_for_total(84.999), Grade::B);
        assert_eq!(grade_for_total(70.0), Grade::B);
        assert_eq!(grade_for_total(69.999), Grade::C);
        assert_eq!(grade_for_total(55.0), Grade::C);
        assert_eq!(grade_for_total(54.999), Grade::DF);
    }
}
