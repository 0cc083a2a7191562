use crate::error::AppError;
use crate::report::{apply_underwriting_defaults, evaluator_for, render_evaluation};
use clap::Args;
use deal_engine::config::AppConfig;
use deal_engine::{DealInputs, ExpenseAccounting, RentRollUnit};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Built-in grade profile (balanced, cash-flow, appreciation)
    #[arg(long)]
    pub(crate) profile: Option<String>,
    /// Debt coverage target for the max-offer solver
    #[arg(long)]
    pub(crate) target_dcr: Option<f64>,
}

/// A side-by-side duplex priced and rented like the Des Moines rentals
/// the rest of the tooling was built around.
pub(crate) fn sample_duplex() -> DealInputs {
    DealInputs {
        purchase_price: Some(285_000.0),
        down_payment_percent: Some(20.0),
        interest_rate_percent: Some(6.25),
        loan_term_years: Some(30),
        rent_roll: vec![
            RentRollUnit {
                label: "1208 East Side A".to_string(),
                monthly_rent: 1_475.0,
                bedrooms: 2,
                bathrooms: 1.0,
            },
            RentRollUnit {
                label: "1208 East Side B".to_string(),
                monthly_rent: 1_475.0,
                bedrooms: 2,
                bathrooms: 1.0,
            },
        ],
        expense_accounting: ExpenseAccounting::Itemized,
        annual_taxes: Some(5_430.0),
        annual_insurance: None,
        management_fee: None,
        maintenance_reserve: None,
        marginal_tax_rate_percent: Some(24.0),
        land_value_percent: Some(18.0),
        appreciation_rate_percent: None,
        cashflow_threshold_monthly: None,
    }
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    println!("Deal grading demo\n");

    let mut inputs = sample_duplex();
    apply_underwriting_defaults(&mut inputs, &config.underwriting);

    let evaluator = evaluator_for(
        args.profile.as_deref(),
        args.target_dcr,
        &config.underwriting,
    )?;
    let evaluation = evaluator
        .evaluate(&inputs)
        .ok_or(AppError::InsufficientInputs)?;

    render_evaluation(&inputs, &evaluation, evaluator.profile());
    Ok(())
}
