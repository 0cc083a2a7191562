//! Four-pillar qualitative evaluation: cash flow, mortgage paydown,
//! equity, and tax incentives, each judged independently of the numeric
//! grade.

use crate::domain::{Pillar, PillarEvaluation, PillarResult, PillarStatus};
use crate::grading::annual_equity_gain;
use serde::{Deserialize, Serialize};

/// Residential straight-line depreciation schedule length.
pub const DEPRECIATION_LIFE_YEARS: f64 = 27.5;

/// Borderline band around the cash-flow target, as a fraction of it.
const BORDERLINE_BAND_RATIO: f64 = 0.10;

/// Everything the pillar checks need from one deal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarContext {
    pub purchase_price: f64,
    pub annual_cash_flow: f64,
    pub annual_principal_paydown: f64,
    pub appreciation_rate_percent: f64,
    pub cashflow_threshold_monthly: f64,
    pub marginal_tax_rate_percent: Option<f64>,
    pub land_value_percent: Option<f64>,
}

/// Runs all four pillar checks, returning one result per pillar in
/// `Pillar::ALL` order.
pub fn evaluate_pillars(context: &PillarContext) -> PillarEvaluation {
    PillarEvaluation {
        results: vec![
            cash_flow_pillar(context),
            mortgage_paydown_pillar(context),
            equity_pillar(context),
            tax_incentives_pillar(context),
        ],
    }
}

fn cash_flow_pillar(context: &PillarContext) -> PillarResult {
    let monthly = context.annual_cash_flow / 12.0;
    let threshold = context.cashflow_threshold_monthly.max(0.0);
    let band = if threshold > 0.0 {
        threshold * BORDERLINE_BAND_RATIO
    } else {
        0.0
    };
    let borderline = threshold > 0.0 && (monthly - threshold).abs() <= band;

    let status = if borderline {
        PillarStatus::Borderline
    } else if monthly >= threshold {
        PillarStatus::Met
    } else {
        PillarStatus::NotMet
    };

    let delta = monthly - threshold;
    let detail = match status {
        PillarStatus::Borderline => format!(
            "Monthly cash flow of {} sits within {} of the {} target",
            dollars(monthly),
            dollars(band),
            dollars(threshold)
        ),
        PillarStatus::Met => format!(
            "Monthly cash flow of {} clears the {} target by {}",
            dollars(monthly),
            dollars(threshold),
            dollars(delta)
        ),
        _ => format!(
            "Monthly cash flow of {} falls {} short of the {} target",
            dollars(monthly),
            dollars(-delta),
            dollars(threshold)
        ),
    };

    PillarResult {
        pillar: Pillar::CashFlow,
        status,
        detail,
        value: None,
        monthly_value: Some(monthly),
        annual_value: Some(context.annual_cash_flow),
        threshold: Some(threshold),
    }
}

fn mortgage_paydown_pillar(context: &PillarContext) -> PillarResult {
    let paydown = context.annual_principal_paydown;
    let met = paydown > 0.0;

    let detail = if met {
        format!("Tenants retire {} of principal in the first year", dollars(paydown))
    } else {
        "No principal paydown; financing builds no equity through amortization".to_string()
    };

    PillarResult {
        pillar: Pillar::MortgagePaydown,
        status: if met {
            PillarStatus::Met
        } else {
            PillarStatus::NotMet
        },
        detail,
        value: Some(paydown),
        monthly_value: Some(paydown / 12.0),
        annual_value: Some(paydown),
        threshold: None,
    }
}

fn equity_pillar(context: &PillarContext) -> PillarResult {
    let gain = annual_equity_gain(
        context.purchase_price,
        context.annual_principal_paydown,
        context.appreciation_rate_percent,
    );
    let met = gain > 0.0;

    let detail = if met {
        format!(
            "Appreciation and paydown add {} of equity per year",
            dollars(gain)
        )
    } else {
        "No equity gain expected from appreciation or paydown".to_string()
    };

    PillarResult {
        pillar: Pillar::Equity,
        status: if met {
            PillarStatus::Met
        } else {
            PillarStatus::NotMet
        },
        detail,
        value: Some(gain),
        monthly_value: None,
        annual_value: Some(gain),
        threshold: None,
    }
}

fn tax_incentives_pillar(context: &PillarContext) -> PillarResult {
    let (Some(marginal_tax_rate), Some(land_value_percent)) = (
        context.marginal_tax_rate_percent,
        context.land_value_percent,
    ) else {
        return PillarResult {
            pillar: Pillar::TaxIncentives,
            status: PillarStatus::NeedsInput,
            detail: "Add a marginal tax rate and land value percent to estimate the depreciation benefit".to_string(),
            value: None,
            monthly_value: None,
            annual_value: None,
            threshold: None,
        };
    };

    let depreciable_basis =
        (context.purchase_price * (1.0 - land_value_percent / 100.0)).max(0.0);
    let annual_depreciation = depreciable_basis / DEPRECIATION_LIFE_YEARS;
    let tax_benefit = annual_depreciation * (marginal_tax_rate / 100.0);
    let met = tax_benefit > 0.0;

    let detail = if met {
        format!(
            "Depreciating {} over 27.5 years shelters about {} per year",
            dollars(depreciable_basis),
            dollars(tax_benefit)
        )
    } else {
        "No depreciation benefit at the supplied tax rate and land value".to_string()
    };

    PillarResult {
        pillar: Pillar::TaxIncentives,
        status: if met {
            PillarStatus::Met
        } else {
            PillarStatus::NotMet
        },
        detail,
        value: Some(tax_benefit),
        monthly_value: None,
        annual_value: Some(tax_benefit),
        threshold: None,
    }
}

/// Whole-dollar rendering for detail strings; numeric fields stay full
/// precision.
fn dollars(value: f64) -> String {
    let rounded = value.round();
    // -0.0 == 0.0, so this also normalizes the negative-zero rendering.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    if rounded < 0.0 {
        format!("-${:.0}", rounded.abs())
    } else {
        format!("${rounded:.0}")
    }
}
