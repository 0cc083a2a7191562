//! Fixed-rate amortization math: level annual payments and the
//! first-year principal/interest split.

use crate::domain::MortgageBreakdown;

/// Annual debt service for a standard amortizing loan.
///
/// A zero rate degrades to straight-line repayment; a non-positive loan
/// amount owes nothing.
pub fn annual_payment(loan_amount: f64, annual_rate_percent: f64, years: u32) -> f64 {
    if loan_amount <= 0.0 || years == 0 {
        return 0.0;
    }

    loan_amount * payment_per_loan_dollar(annual_rate_percent, years)
}

/// Annual payment per dollar of loan principal. Shared with the maximum
/// allowable offer solver, which divides a target debt service by this
/// factor to back out the loan amount.
pub fn payment_per_loan_dollar(annual_rate_percent: f64, years: u32) -> f64 {
    if years == 0 {
        return 0.0;
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return 1.0 / f64::from(years);
    }

    let periods = f64::from(years * 12);
    let growth = (1.0 + monthly_rate).powf(periods);
    monthly_rate * growth / (growth - 1.0) * 12.0
}

/// First-year mortgage breakdown: simulates twelve monthly steps from the
/// opening balance and reports the accumulated principal/interest split.
///
/// This is deliberately the first year's totals, not the loan's lifetime
/// split, so a report can show "this year's" paydown. Monthly fields are
/// annual totals divided by 12. Taxes and insurance pass through
/// unchanged. Returns `None` when there is no purchase price or loan term
/// to amortize against.
pub fn first_year_breakdown(
    purchase_price: f64,
    down_payment_percent: f64,
    interest_rate_percent: f64,
    term_years: u32,
    annual_taxes: f64,
    annual_insurance: f64,
) -> Option<MortgageBreakdown> {
    if purchase_price <= 0.0 || term_years == 0 {
        return None;
    }

    let loan_amount = (purchase_price * (1.0 - down_payment_percent / 100.0)).max(0.0);
    let annual_pi = annual_payment(loan_amount, interest_rate_percent, term_years);
    let monthly_pi = annual_pi / 12.0;
    let monthly_rate = interest_rate_percent / 100.0 / 12.0;

    let mut balance = loan_amount;
    let mut annual_principal = 0.0;
    let mut annual_interest = 0.0;
    for _ in 0..12 {
        let interest = balance * monthly_rate;
        let principal = (monthly_pi - interest).max(0.0);
        annual_interest += interest;
        annual_principal += principal;
        balance = (balance - principal).max(0.0);
    }

    let annual_total_pi = annual_principal + annual_interest;
    let monthly_total_pi = annual_total_pi / 12.0;
    let monthly_taxes = annual_taxes / 12.0;
    let monthly_insurance = annual_insurance / 12.0;

    Some(MortgageBreakdown {
        monthly_principal: annual_principal / 12.0,
        monthly_interest: annual_interest / 12.0,
        monthly_taxes,
        monthly_insurance,
        monthly_total_pi,
        monthly_total: monthly_total_pi + monthly_taxes + monthly_insurance,
        annual_principal,
        annual_interest,
        annual_taxes,
        annual_insurance,
        annual_total_pi,
        annual_total: annual_total_pi + annual_taxes + annual_insurance,
    })
}
