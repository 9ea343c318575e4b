//! Progressive income tax estimation.
//!
//! Walks the ordered resident bracket table, or applies the non-resident
//! flat-rate floor, to estimate annual and monthly tax.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;

/// Tax residency for the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxResidency {
    /// Taxed on the progressive resident schedule.
    Resident,
    /// Taxed at the higher of the flat rate and the resident schedule.
    NonResident,
}

/// The result of a tax estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxEstimate {
    /// Estimated annual tax.
    pub annual_tax: Decimal,
    /// Monthly estimate (annual / 12).
    pub monthly_tax: Decimal,
    /// Effective rate (annual tax / annual income; 0 for no income).
    pub effective_rate: Decimal,
}

/// Computes resident progressive tax on an annual income.
///
/// Locates the bracket containing the income (the last row whose floor
/// does not exceed it) and returns the cumulative tax at the bracket floor
/// plus the marginal rate on the excess. Income at or below the first
/// chargeable floor is taxed at that bracket's (zero) rate, so tax is 0.
pub fn resident_tax(annual_income: Decimal, config: &TaxConfig) -> Decimal {
    if annual_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let bracket = config
        .resident_brackets
        .iter()
        .rfind(|b| b.floor <= annual_income)
        .or(config.resident_brackets.first());

    match bracket {
        Some(bracket) => {
            let excess = annual_income - bracket.floor;
            round_cents(bracket.cumulative + excess * bracket.rate_pct / Decimal::ONE_HUNDRED)
        }
        None => Decimal::ZERO,
    }
}

/// Estimates annual and monthly tax for an annual income.
///
/// Residents follow the progressive schedule. Non-residents pay the
/// greater of the flat employment-income rate and the resident
/// progressive amount.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{estimate_tax, TaxResidency};
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/sg").unwrap();
/// let tax = &loader.rates().for_year(2025).unwrap().tax;
///
/// let estimate = estimate_tax(
///     Decimal::from_str("60000").unwrap(),
///     TaxResidency::Resident,
///     tax,
/// );
/// // 550 + 7% of 20000 = 1950.
/// assert_eq!(estimate.annual_tax, Decimal::from_str("1950.00").unwrap());
/// assert_eq!(estimate.monthly_tax, Decimal::from_str("162.50").unwrap());
/// ```
pub fn estimate_tax(
    annual_income: Decimal,
    residency: TaxResidency,
    config: &TaxConfig,
) -> TaxEstimate {
    let progressive = resident_tax(annual_income, config);
    let annual_tax = match residency {
        TaxResidency::Resident => progressive,
        TaxResidency::NonResident => {
            if annual_income <= Decimal::ZERO {
                Decimal::ZERO
            } else {
                let flat = round_cents(
                    annual_income * config.non_resident_flat_pct / Decimal::ONE_HUNDRED,
                );
                flat.max(progressive)
            }
        }
    };

    let monthly_tax = round_cents(annual_tax / Decimal::from(12));
    let effective_rate = if annual_income <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        (annual_tax / annual_income)
            .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
    };

    TaxEstimate {
        annual_tax,
        monthly_tax,
        effective_rate,
    }
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
