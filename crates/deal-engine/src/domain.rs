use crate::expenses::ExpenseOverrides;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Single unit on the rent roll as entered during deal intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentRollUnit {
    #[serde(default)]
    pub label: String,
    pub monthly_rent: f64,
    #[serde(default)]
    pub bedrooms: u8,
    #[serde(default)]
    pub bathrooms: f64,
}

/// Selects how operating expenses enter NOI and cash flow.
///
/// The two modes are intentionally not arithmetically equivalent. The
/// blended rate excludes taxes and insurance, so cash flow subtracts them
/// on top of the rate; the itemized mode already carries them inside the
/// line items (plus a 5% vacancy haircut on gross rent). Callers pick one
/// explicitly rather than the engine guessing which was meant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExpenseAccounting {
    /// `NOI = gross rent * (1 - expense_rate)`, no vacancy haircut;
    /// taxes and insurance come out of cash flow separately.
    BlendedRate { expense_rate: f64 },
    /// NOI from itemized line items, defaults filled per unit count,
    /// purchase price, and gross rent; vacancy haircut applied.
    Itemized,
}

/// Financing and property inputs supplied by the intake layer.
///
/// Required financing fields are optional here on purpose: a half-filled
/// form is a legitimate state, and the engine answers it with `None`
/// ("add more inputs") instead of an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealInputs {
    pub purchase_price: Option<f64>,
    pub down_payment_percent: Option<f64>,
    pub interest_rate_percent: Option<f64>,
    pub loan_term_years: Option<u32>,
    #[serde(default)]
    pub rent_roll: Vec<RentRollUnit>,
    pub expense_accounting: ExpenseAccounting,
    #[serde(default)]
    pub annual_taxes: Option<f64>,
    #[serde(default)]
    pub annual_insurance: Option<f64>,
    #[serde(default)]
    pub management_fee: Option<f64>,
    #[serde(default)]
    pub maintenance_reserve: Option<f64>,
    #[serde(default)]
    pub marginal_tax_rate_percent: Option<f64>,
    #[serde(default)]
    pub land_value_percent: Option<f64>,
    #[serde(default)]
    pub appreciation_rate_percent: Option<f64>,
    #[serde(default)]
    pub cashflow_threshold_monthly: Option<f64>,
}

impl DealInputs {
    pub fn unit_count(&self) -> usize {
        self.rent_roll.len()
    }

    pub fn gross_annual_rent(&self) -> f64 {
        self.rent_roll
            .iter()
            .map(|unit| unit.monthly_rent * 12.0)
            .sum()
    }

    pub(crate) fn expense_overrides(&self) -> ExpenseOverrides {
        ExpenseOverrides {
            annual_taxes: self.annual_taxes,
            annual_insurance: self.annual_insurance,
            management_fee: self.management_fee,
            maintenance_reserve: self.maintenance_reserve,
        }
    }
}

/// Letter grade for a deal. Variants are declared worst-first so the
/// derived ordering ranks `A > B > C > D/F`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Grade {
    #[serde(rename = "D/F")]
    DF,
    C,
    B,
    A,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::DF => "D/F",
        };
        f.write_str(letter)
    }
}

/// First-year principal/interest split plus pass-through taxes and
/// insurance. Monthly fields are the annual totals divided by 12 (a
/// reporting average, not month one's actual split).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageBreakdown {
    pub monthly_principal: f64,
    pub monthly_interest: f64,
    pub monthly_taxes: f64,
    pub monthly_insurance: f64,
    pub monthly_total_pi: f64,
    pub monthly_total: f64,
    pub annual_principal: f64,
    pub annual_interest: f64,
    pub annual_taxes: f64,
    pub annual_insurance: f64,
    pub annual_total_pi: f64,
    pub annual_total: f64,
}

/// Core investment metrics for one deal, computed fresh on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealMetrics {
    pub total_annual_rent: f64,
    pub net_operating_income: f64,
    pub cap_rate: f64,
    pub annual_debt_service: f64,
    pub annual_cash_flow: f64,
    pub cash_on_cash: f64,
    pub debt_coverage_ratio: f64,
    /// Quick four-tier grade from the static cash-on-cash/DCR classifier.
    /// Independent of the profile-weighted grade.
    pub grade: Grade,
}

/// The four qualitative investment criteria evaluated alongside the
/// numeric grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    CashFlow,
    MortgagePaydown,
    Equity,
    TaxIncentives,
}

impl Pillar {
    pub const ALL: [Pillar; 4] = [
        Pillar::CashFlow,
        Pillar::MortgagePaydown,
        Pillar::Equity,
        Pillar::TaxIncentives,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Pillar::CashFlow => "Cash Flow",
            Pillar::MortgagePaydown => "Mortgage Paydown",
            Pillar::Equity => "Equity",
            Pillar::TaxIncentives => "Tax Incentives",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarStatus {
    Met,
    NotMet,
    Borderline,
    NeedsInput,
}

/// Outcome of one pillar check with a human-readable detail line.
/// Currency values inside `detail` are rounded to whole dollars; the
/// numeric fields stay full precision for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarResult {
    pub pillar: Pillar,
    pub status: PillarStatus,
    pub detail: String,
    pub value: Option<f64>,
    pub monthly_value: Option<f64>,
    pub annual_value: Option<f64>,
    pub threshold: Option<f64>,
}

/// Exactly one result per pillar, in `Pillar::ALL` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarEvaluation {
    pub results: Vec<PillarResult>,
}

impl PillarEvaluation {
    pub fn result_for(&self, pillar: Pillar) -> Option<&PillarResult> {
        self.results.iter().find(|result| result.pillar == pillar)
    }

    pub fn met_count(&self) -> usize {
        self.results
            .iter()
            .filter(|result| result.status == PillarStatus::Met)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_order_from_failing_to_a() {
        assert!(Grade::A > Grade::B);
        assert!(Grade::B > Grade::C);
        assert!(Grade::C > Grade::DF);
    }

    #[test]
    fn grade_serializes_with_display_letters() {
        assert_eq!(serde_json::to_string(&Grade::DF).expect("serializes"), "\"D/F\"");
        assert_eq!(Grade::DF.to_string(), "D/F");
        assert_eq!(Grade::A.to_string(), "A");
    }

    #[test]
    fn gross_annual_rent_sums_the_rent_roll() {
        let inputs = DealInputs {
            purchase_price: Some(300_000.0),
            down_payment_percent: Some(20.0),
            interest_rate_percent: Some(6.0),
            loan_term_years: Some(30),
            rent_roll: vec![
                RentRollUnit {
                    label: "Main".to_string(),
                    monthly_rent: 1_800.0,
                    bedrooms: 3,
                    bathrooms: 1.5,
                },
                RentRollUnit {
                    label: "Upper".to_string(),
                    monthly_rent: 1_200.0,
                    bedrooms: 2,
                    bathrooms: 1.0,
                },
            ],
            expense_accounting: ExpenseAccounting::Itemized,
            annual_taxes: None,
            annual_insurance: None,
            management_fee: None,
            maintenance_reserve: None,
            marginal_tax_rate_percent: None,
            land_value_percent: None,
            appreciation_rate_percent: None,
            cashflow_threshold_monthly: None,
        };

        assert_eq!(inputs.unit_count(), 2);
        assert!((inputs.gross_annual_rent() - 36_000.0).abs() < 1e-9);
    }

    #[test]
    fn expense_accounting_deserializes_tagged_modes() {
        let blended: ExpenseAccounting =
            serde_json::from_str(r#"{"mode":"blended_rate","expense_rate":0.35}"#)
                .expect("blended mode parses");
        assert_eq!(
            blended,
            ExpenseAccounting::BlendedRate { expense_rate: 0.35 }
        );

        let itemized: ExpenseAccounting =
            serde_json::from_str(r#"{"mode":"itemized"}"#).expect("itemized mode parses");
        assert_eq!(itemized, ExpenseAccounting::Itemized);
    }
}
