//! Core metric derivation: NOI, cap rate, DCR, cash flow, cash-on-cash,
//! and the quick four-tier grade.

use crate::amortization;
use crate::domain::{DealInputs, DealMetrics, ExpenseAccounting, Grade};
use crate::expenses::{self, OperatingExpenses};

/// Floor applied to the down payment before dividing, so a zero-down deal
/// reports an extreme cash-on-cash instead of dividing by zero.
pub const DOWN_PAYMENT_FLOOR: f64 = 0.0001;

/// Cap rate with the zero-price guard: unlevered yield, or zero when
/// there is no meaningful purchase price.
pub fn cap_rate(net_operating_income: f64, purchase_price: f64) -> f64 {
    if purchase_price > 0.0 {
        net_operating_income / purchase_price
    } else {
        0.0
    }
}

/// Debt coverage ratio with the zero-debt-service guard.
pub fn debt_coverage_ratio(net_operating_income: f64, annual_debt_service: f64) -> f64 {
    if annual_debt_service > 0.0 {
        net_operating_income / annual_debt_service
    } else {
        0.0
    }
}

/// Quick classifier over cash-on-cash and DCR, evaluated top-down with
/// first match winning. Anything outside the three bands fails.
pub fn grade_for(cash_on_cash: f64, debt_coverage_ratio: f64) -> Grade {
    let coc = cash_on_cash;
    let dcr = debt_coverage_ratio;

    if coc > 0.10 && dcr > 1.35 {
        Grade::A
    } else if (0.07..=0.10).contains(&coc) && (1.25..=1.35).contains(&dcr) {
        Grade::B
    } else if (0.04..0.07).contains(&coc) && (1.15..1.25).contains(&dcr) {
        Grade::C
    } else {
        Grade::DF
    }
}

/// Derives the full metric set, or `None` when the financing picture is
/// incomplete (missing price, down payment, rate, or term, or a
/// non-positive price/term that nothing can be computed against).
///
/// The two expense accounting modes diverge on purpose: blended-rate NOI
/// skips the vacancy haircut and its cash flow subtracts taxes and
/// insurance on top of the rate, while itemized NOI already carries both.
pub fn compute_metrics(inputs: &DealInputs) -> Option<DealMetrics> {
    let purchase_price = inputs.purchase_price?;
    let down_payment_percent = inputs.down_payment_percent?;
    let interest_rate_percent = inputs.interest_rate_percent?;
    let term_years = inputs.loan_term_years?;
    if purchase_price <= 0.0 || term_years == 0 {
        return None;
    }

    let total_annual_rent = inputs.gross_annual_rent();
    let expense_picture = expense_picture(inputs, purchase_price);

    let loan_amount = (purchase_price * (1.0 - down_payment_percent / 100.0)).max(0.0);
    let annual_debt_service =
        amortization::annual_payment(loan_amount, interest_rate_percent, term_years);

    let (net_operating_income, annual_cash_flow) = match inputs.expense_accounting {
        ExpenseAccounting::BlendedRate { expense_rate } => {
            let noi = total_annual_rent * (1.0 - expense_rate);
            let cash_flow = noi
                - annual_debt_service
                - expense_picture.taxes.annual_amount
                - expense_picture.insurance.annual_amount;
            (noi, cash_flow)
        }
        ExpenseAccounting::Itemized => {
            let noi = expense_picture.net_operating_income();
            (noi, noi - annual_debt_service)
        }
    };

    let down_payment = (purchase_price * down_payment_percent / 100.0).max(DOWN_PAYMENT_FLOOR);
    let cash_on_cash = annual_cash_flow / down_payment;
    let cap = cap_rate(net_operating_income, purchase_price);
    let dcr = debt_coverage_ratio(net_operating_income, annual_debt_service);

    Some(DealMetrics {
        total_annual_rent,
        net_operating_income,
        cap_rate: cap,
        annual_debt_service,
        annual_cash_flow,
        cash_on_cash,
        debt_coverage_ratio: dcr,
        grade: grade_for(cash_on_cash, dcr),
    })
}

/// Resolved expense lines for the deal; used for itemized NOI and for the
/// effective taxes/insurance the blended mode and the mortgage breakdown
/// both need.
pub fn expense_picture(inputs: &DealInputs, purchase_price: f64) -> OperatingExpenses {
    expenses::operating_expenses(
        purchase_price,
        inputs.unit_count(),
        inputs.gross_annual_rent(),
        inputs.expense_overrides(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RentRollUnit;

    fn reference_inputs(expense_accounting: ExpenseAccounting) -> DealInputs {
        DealInputs {
            purchase_price: Some(300_000.0),
            down_payment_percent: Some(20.0),
            interest_rate_percent: Some(6.0),
            loan_term_years: Some(30),
            rent_roll: vec![RentRollUnit {
                label: "House".to_string(),
                monthly_rent: 3_000.0,
                bedrooms: 4,
                bathrooms: 2.0,
            }],
            expense_accounting,
            annual_taxes: Some(6_000.0),
            annual_insurance: Some(1_200.0),
            management_fee: None,
            maintenance_reserve: None,
            marginal_tax_rate_percent: None,
            land_value_percent: None,
            appreciation_rate_percent: None,
            cashflow_threshold_monthly: None,
        }
    }

    #[test]
    fn blended_rate_reference_deal() {
        let inputs = reference_inputs(ExpenseAccounting::BlendedRate { expense_rate: 0.35 });
        let metrics = compute_metrics(&inputs).expect("complete financing inputs");

        assert!((metrics.total_annual_rent - 36_000.0).abs() < 1e-9);
        assert!((metrics.net_operating_income - 23_400.0).abs() < 1e-9);
        assert!((metrics.cap_rate - 0.078).abs() < 1e-9);

        // $240k at 6%/30yr services at $17,267.07/yr.
        assert!((metrics.annual_debt_service - 17_267.07).abs() < 0.05);

        let expected_cash_flow = 23_400.0 - metrics.annual_debt_service - 6_000.0 - 1_200.0;
        assert!((metrics.annual_cash_flow - expected_cash_flow).abs() < 1e-9);
        assert!(metrics.annual_cash_flow < 0.0);

        assert!((metrics.cash_on_cash - expected_cash_flow / 60_000.0).abs() < 1e-12);
        assert!((metrics.debt_coverage_ratio - 23_400.0 / metrics.annual_debt_service).abs() < 1e-12);
        assert!(metrics.debt_coverage_ratio > 1.35);

        // Negative cash-on-cash fails the quick classifier outright.
        assert_eq!(metrics.grade, Grade::DF);
    }

    #[test]
    fn itemized_mode_uses_line_items_and_haircut() {
        let inputs = reference_inputs(ExpenseAccounting::Itemized);
        let metrics = compute_metrics(&inputs).expect("complete financing inputs");

        // taxes 6000 + insurance 1200 + mgmt 3600 + maintenance 1800
        let expected_noi = 36_000.0 * 0.95 - 12_600.0;
        assert!((metrics.net_operating_income - expected_noi).abs() < 1e-9);
        assert!(
            (metrics.annual_cash_flow - (expected_noi - metrics.annual_debt_service)).abs() < 1e-9
        );
    }

    #[test]
    fn modes_disagree_by_construction() {
        let blended =
            compute_metrics(&reference_inputs(ExpenseAccounting::BlendedRate {
                expense_rate: 0.35,
            }))
            .expect("metrics");
        let itemized =
            compute_metrics(&reference_inputs(ExpenseAccounting::Itemized)).expect("metrics");

        assert!((blended.net_operating_income - itemized.net_operating_income).abs() > 1.0);
    }

    #[test]
    fn missing_financing_fields_yield_none() {
        let mut inputs = reference_inputs(ExpenseAccounting::Itemized);
        inputs.down_payment_percent = None;
        assert!(compute_metrics(&inputs).is_none());

        let mut inputs = reference_inputs(ExpenseAccounting::Itemized);
        inputs.loan_term_years = Some(0);
        assert!(compute_metrics(&inputs).is_none());

        let mut inputs = reference_inputs(ExpenseAccounting::Itemized);
        inputs.purchase_price = Some(0.0);
        assert!(compute_metrics(&inputs).is_none());
    }

    #[test]
    fn ratio_guards_never_divide_by_zero() {
        assert_eq!(cap_rate(23_400.0, 0.0), 0.0);
        assert_eq!(cap_rate(23_400.0, -1.0), 0.0);
        assert_eq!(debt_coverage_ratio(23_400.0, 0.0), 0.0);
        assert_eq!(debt_coverage_ratio(23_400.0, -500.0), 0.0);
    }

    #[test]
    fn zero_down_payment_floors_the_denominator() {
        let mut inputs = reference_inputs(ExpenseAccounting::Itemized);
        inputs.down_payment_percent = Some(0.0);
        let metrics = compute_metrics(&inputs).expect("metrics");
        assert!(metrics.cash_on_cash.is_finite());
    }

    #[test]
    fn quick_grade_tiers() {
        assert_eq!(grade_for(0.11, 1.40), Grade::A);
        assert_eq!(grade_for(0.08, 1.30), Grade::B);
        assert_eq!(grade_for(0.05, 1.20), Grade::C);
        assert_eq!(grade_for(0.02, 1.05), Grade::DF);

        // Boundaries: A is strict, B and C close their lower edges.
        assert_eq!(grade_for(0.10, 1.35), Grade::B);
        assert_eq!(grade_for(0.07, 1.25), Grade::B);
        assert_eq!(grade_for(0.04, 1.15), Grade::C);
        assert_eq!(grade_for(0.07, 1.24), Grade::DF);

        // Strong DCR cannot rescue weak cash-on-cash.
        assert_eq!(grade_for(0.05, 1.60), Grade::DF);
    }
}
