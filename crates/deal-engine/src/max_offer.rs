//! Maximum allowable offer: inverts the amortization formula to find the
//! purchase price at which the deal's NOI still covers debt service at a
//! target DCR.

use crate::amortization;
use crate::domain::DealMetrics;

/// Largest purchase price whose financed debt service keeps
/// `NOI / debt service` at or above `target_dcr`, under the given
/// financing terms. `None` when the target or financing terms cannot
/// support the inversion.
pub fn maximum_allowable_offer(
    metrics: &DealMetrics,
    down_payment_percent: Option<f64>,
    interest_rate_percent: Option<f64>,
    term_years: Option<u32>,
    target_dcr: f64,
) -> Option<f64> {
    if target_dcr <= 0.0 {
        return None;
    }
    let down_payment_percent = down_payment_percent?;
    let interest_rate_percent = interest_rate_percent?;
    let term_years = term_years?;
    if term_years == 0 {
        return None;
    }

    let annual_debt_service_target = metrics.net_operating_income / target_dcr;

    let payment_per_dollar =
        amortization::payment_per_loan_dollar(interest_rate_percent, term_years);
    if payment_per_dollar <= 0.0 {
        return None;
    }

    let max_loan_amount = annual_debt_service_target / payment_per_dollar;

    let loan_to_value = 1.0 - down_payment_percent / 100.0;
    if loan_to_value <= 0.0 {
        return None;
    }

    Some((max_loan_amount / loan_to_value).max(0.0))
}
