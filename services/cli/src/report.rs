use crate::error::AppError;
use chrono::Local;
use clap::Args;
use deal_engine::config::{AppConfig, UnderwritingConfig};
use deal_engine::expenses::{ExpenseLine, ExpenseSource};
use deal_engine::rent_roll::import_rent_roll;
use deal_engine::{
    DealEvaluation, DealEvaluator, DealInputs, ExpenseAccounting, GradeProfile, PillarStatus,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Deal inputs JSON file
    #[arg(long)]
    pub(crate) deal: PathBuf,
    /// Rent-roll CSV export that replaces the deal file's rent roll
    #[arg(long)]
    pub(crate) rent_roll: Option<PathBuf>,
    /// Built-in grade profile (balanced, cash-flow, appreciation)
    #[arg(long)]
    pub(crate) profile: Option<String>,
    /// Debt coverage target for the max-offer solver
    #[arg(long)]
    pub(crate) target_dcr: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct MaxOfferArgs {
    /// Deal inputs JSON file
    #[arg(long)]
    pub(crate) deal: PathBuf,
    /// Debt coverage target to solve against
    #[arg(long)]
    pub(crate) target_dcr: Option<f64>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut inputs = load_deal(&args.deal)?;
    if let Some(rent_roll_path) = &args.rent_roll {
        inputs.rent_roll = import_rent_roll(rent_roll_path)?;
        info!(units = inputs.rent_roll.len(), "rent roll imported");
    }
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

pub(crate) fn run_max_offer(args: MaxOfferArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut inputs = load_deal(&args.deal)?;
    apply_underwriting_defaults(&mut inputs, &config.underwriting);

    let target_dcr = args.target_dcr.unwrap_or(config.underwriting.target_dcr);
    let evaluation = DealEvaluator::default()
        .with_target_dcr(target_dcr)
        .evaluate(&inputs)
        .ok_or(AppError::InsufficientInputs)?;

    println!("NOI: {}", money(evaluation.metrics.net_operating_income));
    match evaluation.max_allowable_offer {
        Some(offer) => println!(
            "Maximum allowable offer at DCR {target_dcr:.2}: {}",
            money(offer)
        ),
        None => println!(
            "No offer supports a DCR of {target_dcr:.2} under these financing terms"
        ),
    }
    Ok(())
}

pub(crate) fn load_deal(path: &Path) -> Result<DealInputs, AppError> {
    let file = File::open(path)?;
    let inputs = serde_json::from_reader(file)?;
    Ok(inputs)
}

/// Fills blanks the engine treats as zero with the operator's configured
/// underwriting assumptions.
pub(crate) fn apply_underwriting_defaults(
    inputs: &mut DealInputs,
    underwriting: &UnderwritingConfig,
) {
    if inputs.cashflow_threshold_monthly.is_none() {
        inputs.cashflow_threshold_monthly = Some(underwriting.cashflow_threshold_monthly);
    }
    if inputs.appreciation_rate_percent.is_none() {
        inputs.appreciation_rate_percent = Some(underwriting.appreciation_rate_percent);
    }
}

pub(crate) fn evaluator_for(
    profile_name: Option<&str>,
    target_dcr: Option<f64>,
    underwriting: &UnderwritingConfig,
) -> Result<DealEvaluator, AppError> {
    let name = profile_name.unwrap_or(&underwriting.grade_profile);
    let profile = GradeProfile::preset(name)
        .ok_or_else(|| AppError::UnknownProfile(name.to_string()))?;
    Ok(DealEvaluator::new(profile)
        .with_target_dcr(target_dcr.unwrap_or(underwriting.target_dcr)))
}

pub(crate) fn render_evaluation(
    inputs: &DealInputs,
    evaluation: &DealEvaluation,
    profile: &GradeProfile,
) {
    let today = Local::now().date_naive();
    println!("Underwriting report — {today}");
    println!("Grade profile: {} ({})", profile.name, profile.color);

    if let (Some(price), Some(down), Some(rate), Some(term)) = (
        inputs.purchase_price,
        inputs.down_payment_percent,
        inputs.interest_rate_percent,
        inputs.loan_term_years,
    ) {
        println!("\nDeal");
        println!("  Purchase price     {}", money(price));
        println!(
            "  Financing          {down:.1}% down, {rate:.3}% for {term} years"
        );
        println!(
            "  Rent roll          {} unit(s), {} gross/year",
            inputs.unit_count(),
            money(inputs.gross_annual_rent())
        );
        match inputs.expense_accounting {
            ExpenseAccounting::BlendedRate { expense_rate } => {
                println!("  Expenses           blended rate {:.1}%", expense_rate * 100.0)
            }
            ExpenseAccounting::Itemized => println!("  Expenses           itemized"),
        }
    }

    let metrics = &evaluation.metrics;
    println!("\nMetrics");
    println!("  NOI                {}", money(metrics.net_operating_income));
    println!("  Cap rate           {}", percent(metrics.cap_rate));
    println!("  Debt service       {}", money(metrics.annual_debt_service));
    println!("  Annual cash flow   {}", money(metrics.annual_cash_flow));
    println!("  Cash-on-cash       {}", percent(metrics.cash_on_cash));
    println!("  DCR                {:.2}", metrics.debt_coverage_ratio);
    println!("  Quick grade        {}", metrics.grade);

    println!(
        "\nWeighted grade: {} ({:.1}/100)",
        evaluation.weighted.grade, evaluation.weighted.total_score
    );
    for component in &evaluation.weighted.components {
        println!(
            "  {:<18} score {:>5.1} x weight {:>4.1}% = {:>5.1}",
            component.metric.label(),
            component.score,
            component.weight * 100.0,
            component.weighted_score
        );
    }

    println!("\nPillars");
    for result in &evaluation.pillars.results {
        println!(
            "  [{}] {:<17} {}",
            status_tag(result.status),
            result.pillar.label(),
            result.detail
        );
    }

    if let Some(breakdown) = &evaluation.mortgage {
        println!("\nFirst-year mortgage");
        println!(
            "  Principal          {}/mo ({}/yr)",
            money(breakdown.monthly_principal),
            money(breakdown.annual_principal)
        );
        println!(
            "  Interest           {}/mo ({}/yr)",
            money(breakdown.monthly_interest),
            money(breakdown.annual_interest)
        );
        println!(
            "  Taxes + insurance  {}/mo",
            money(breakdown.monthly_taxes + breakdown.monthly_insurance)
        );
        println!("  Total payment      {}/mo", money(breakdown.monthly_total));
    }

    println!("\nOperating expenses");
    print_expense_line("Taxes", &evaluation.expenses.taxes);
    print_expense_line("Insurance", &evaluation.expenses.insurance);
    print_expense_line("Management", &evaluation.expenses.management_fee);
    print_expense_line("Maintenance", &evaluation.expenses.maintenance_reserve);
    println!(
        "  Total              {} ({} of gross rent)",
        money(evaluation.expenses.total_operating_expenses()),
        percent(evaluation.expenses.expense_to_income_ratio())
    );

    if let Some(offer) = evaluation.max_allowable_offer {
        println!("\nMax allowable offer: {}", money(offer));
    }
}

fn print_expense_line(label: &str, line: &ExpenseLine) {
    let marker = match line.source {
        ExpenseSource::Provided => "",
        ExpenseSource::Defaulted => " (default)",
    };
    println!("  {:<18} {}{marker}", label, money(line.annual_amount));
}

fn status_tag(status: PillarStatus) -> &'static str {
    match status {
        PillarStatus::Met => "met",
        PillarStatus::NotMet => "not met",
        PillarStatus::Borderline => "borderline",
        PillarStatus::NeedsInput => "needs input",
    }
}

/// Currency with cents and thousands separators; display-only rounding.
pub(crate) fn money(value: f64) -> String {
    let negative = value < 0.0;
    let cents_total = (value.abs() * 100.0).round() as u64;
    let dollars = cents_total / 100;
    let cents = cents_total % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{cents:02}")
}

pub(crate) fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(300_000.0), "$300,000.00");
        assert_eq!(money(1_439.19), "$1,439.19");
        assert_eq!(money(-1_070.28), "-$1,070.28");
        assert_eq!(money(0.0), "$0.00");
    }

    #[test]
    fn percent_renders_two_decimals() {
        assert_eq!(percent(0.078), "7.80%");
        assert_eq!(percent(-0.0178), "-1.78%");
    }

    #[test]
    fn unknown_profiles_are_rejected() {
        let underwriting = UnderwritingConfig {
            target_dcr: 1.25,
            cashflow_threshold_monthly: 200.0,
            appreciation_rate_percent: 3.0,
            grade_profile: "balanced".to_string(),
        };
        assert!(evaluator_for(Some("nope"), None, &underwriting).is_err());
        assert!(evaluator_for(None, None, &underwriting).is_ok());
    }

    #[test]
    fn defaults_fill_only_blank_assumptions() {
        let underwriting = UnderwritingConfig {
            target_dcr: 1.25,
            cashflow_threshold_monthly: 200.0,
            appreciation_rate_percent: 3.0,
            grade_profile: "balanced".to_string(),
        };
        let mut inputs = crate::demo::sample_duplex();
        inputs.cashflow_threshold_monthly = None;
        inputs.appreciation_rate_percent = Some(1.0);

        apply_underwriting_defaults(&mut inputs, &underwriting);
        assert_eq!(inputs.cashflow_threshold_monthly, Some(200.0));
        assert_eq!(inputs.appreciation_rate_percent, Some(1.0));
    }
}
