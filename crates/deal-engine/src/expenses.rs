//! Operating expense line items: user overrides where provided, market
//! defaults where not, plus the NOI derivation used by itemized
//! accounting.

use serde::{Deserialize, Serialize};

/// Annual property tax default as a fraction of purchase price.
pub const DEFAULT_TAX_RATE: f64 = 0.0223;
/// Annual insurance default per unit.
pub const DEFAULT_INSURANCE_PER_UNIT: f64 = 800.0;
/// Management fee default as a fraction of gross annual rent.
pub const DEFAULT_MANAGEMENT_RATE: f64 = 0.10;
/// Maintenance reserve default as a fraction of gross annual rent.
pub const DEFAULT_MAINTENANCE_RATE: f64 = 0.05;
/// Share of gross rent assumed collectible after vacancy and credit loss.
pub const COLLECTIBLE_RENT_FACTOR: f64 = 0.95;

/// Whether a line item came from the user or from the default rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseSource {
    Provided,
    Defaulted,
}

/// One annual expense line with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub annual_amount: f64,
    pub source: ExpenseSource,
}

impl ExpenseLine {
    fn effective(override_amount: Option<f64>, default_amount: f64) -> Self {
        match override_amount {
            Some(annual_amount) => Self {
                annual_amount,
                source: ExpenseSource::Provided,
            },
            None => Self {
                annual_amount: default_amount,
                source: ExpenseSource::Defaulted,
            },
        }
    }
}

/// Per-line overrides from deal intake; `None` falls back to defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseOverrides {
    pub annual_taxes: Option<f64>,
    pub annual_insurance: Option<f64>,
    pub management_fee: Option<f64>,
    pub maintenance_reserve: Option<f64>,
}

/// Resolved expense picture for one deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingExpenses {
    pub purchase_price: f64,
    pub unit_count: usize,
    pub gross_annual_rent: f64,
    pub taxes: ExpenseLine,
    pub insurance: ExpenseLine,
    pub management_fee: ExpenseLine,
    pub maintenance_reserve: ExpenseLine,
}

impl OperatingExpenses {
    /// Sum of the four effective line items, clamped at zero.
    pub fn total_operating_expenses(&self) -> f64 {
        (self.taxes.annual_amount
            + self.insurance.annual_amount
            + self.management_fee.annual_amount
            + self.maintenance_reserve.annual_amount)
            .max(0.0)
    }

    /// Collectible rent (5% vacancy haircut) minus total operating
    /// expenses.
    pub fn net_operating_income(&self) -> f64 {
        self.gross_annual_rent * COLLECTIBLE_RENT_FACTOR - self.total_operating_expenses()
    }

    pub fn expense_to_income_ratio(&self) -> f64 {
        if self.gross_annual_rent > 0.0 {
            self.total_operating_expenses() / self.gross_annual_rent
        } else {
            0.0
        }
    }
}

/// Resolves the four expense lines, preferring overrides and defaulting
/// the rest from purchase price, unit count, and gross rent.
pub fn operating_expenses(
    purchase_price: f64,
    unit_count: usize,
    gross_annual_rent: f64,
    overrides: ExpenseOverrides,
) -> OperatingExpenses {
    OperatingExpenses {
        purchase_price,
        unit_count,
        gross_annual_rent,
        taxes: ExpenseLine::effective(overrides.annual_taxes, purchase_price * DEFAULT_TAX_RATE),
        insurance: ExpenseLine::effective(
            overrides.annual_insurance,
            DEFAULT_INSURANCE_PER_UNIT * unit_count as f64,
        ),
        management_fee: ExpenseLine::effective(
            overrides.management_fee,
            gross_annual_rent * DEFAULT_MANAGEMENT_RATE,
        ),
        maintenance_reserve: ExpenseLine::effective(
            overrides.maintenance_reserve,
            gross_annual_rent * DEFAULT_MAINTENANCE_RATE,
        ),
    }
}
