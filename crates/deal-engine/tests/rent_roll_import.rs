//! Integration coverage for the CSV rent-roll import feeding the
//! evaluator, mirroring the intake path from a spreadsheet export.

use deal_engine::rent_roll::{parse_rent_roll, RentRollImportError};
use deal_engine::{DealEvaluator, DealInputs, ExpenseAccounting};

fn inputs_with_rent_roll(csv: &str) -> Result<DealInputs, RentRollImportError> {
    let rent_roll = parse_rent_roll(csv.as_bytes())?;
    Ok(DealInputs {
        purchase_price: Some(250_000.0),
        down_payment_percent: Some(25.0),
        interest_rate_percent: Some(5.5),
        loan_term_years: Some(30),
        rent_roll,
        expense_accounting: ExpenseAccounting::Itemized,
        annual_taxes: None,
        annual_insurance: None,
        management_fee: None,
        maintenance_reserve: None,
        marginal_tax_rate_percent: None,
        land_value_percent: None,
        appreciation_rate_percent: Some(2.0),
        cashflow_threshold_monthly: Some(150.0),
    })
}

#[test]
fn imported_rent_roll_drives_the_evaluation() {
    let csv = "Unit,Monthly Rent,Beds,Baths\n\
               Main,1450,3,1.5\n\
               Garden,1100,1,1\n";
    let inputs = inputs_with_rent_roll(csv).expect("export parses");

    assert_eq!(inputs.unit_count(), 2);
    assert!((inputs.gross_annual_rent() - 30_600.0).abs() < 1e-9);

    let evaluation = DealEvaluator::default()
        .evaluate(&inputs)
        .expect("complete inputs evaluate");
    assert!((evaluation.metrics.total_annual_rent - 30_600.0).abs() < 1e-9);
    // Two units default to $1,600 of insurance.
    assert!((evaluation.expenses.insurance.annual_amount - 1_600.0).abs() < 1e-9);
}

#[test]
fn a_bad_row_fails_the_whole_import() {
    let csv = "Unit,Monthly Rent,Beds,Baths\n\
               Main,1450,3,1.5\n\
               Garden,-25,1,1\n";
    let error = inputs_with_rent_roll(csv).expect_err("negative rent is rejected");
    assert!(matches!(
        error,
        RentRollImportError::NonPositiveRent { ref label, .. } if label == "Garden"
    ));
}

#[test]
fn an_empty_export_produces_an_empty_roll() {
    let csv = "Unit,Monthly Rent,Beds,Baths\n";
    let inputs = inputs_with_rent_roll(csv).expect("empty export parses");
    assert!(inputs.rent_roll.is_empty());
    assert_eq!(inputs.gross_annual_rent(), 0.0);

    // Still evaluates: zero rent is a computable (terrible) deal.
    let evaluation = DealEvaluator::default()
        .evaluate(&inputs)
        .expect("financing inputs are complete");
    assert!(evaluation.metrics.annual_cash_flow < 0.0);
    assert_eq!(evaluation.metrics.cap_rate, evaluation.metrics.net_operating_income / 250_000.0);
}
