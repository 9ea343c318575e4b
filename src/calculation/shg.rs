//! Community self-help-group fund deduction calculation.
//!
//! Each race group contributes a flat, wage-tiered monthly amount to its
//! own fund. Foreigners and unmapped race codes contribute nothing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ShgConfig;
use crate::models::{Race, ResidencyStatus};

/// The community self-help-group funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShgFund {
    /// Chinese Development Assistance Council.
    Cdac,
    /// Eurasian Community Fund.
    Ecf,
    /// Mosque Building and Mendaki Fund.
    Mbmf,
    /// Singapore Indian Development Association.
    Sinda,
}

impl std::fmt::Display for ShgFund {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShgFund::Cdac => write!(f, "CDAC"),
            ShgFund::Ecf => write!(f, "ECF"),
            ShgFund::Mbmf => write!(f, "MBMF"),
            ShgFund::Sinda => write!(f, "SINDA"),
        }
    }
}

/// The result of a community-fund deduction lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShgDeduction {
    /// The fund the deduction goes to, if any.
    pub fund: Option<ShgFund>,
    /// The flat monthly deduction amount.
    pub amount: Decimal,
    /// Whether a deduction applies at all.
    pub applicable: bool,
}

impl ShgDeduction {
    /// Returns the fund name for display ("N/A" when not applicable).
    pub fn fund_name(&self) -> String {
        match self.fund {
            Some(fund) => fund.to_string(),
            None => "N/A".to_string(),
        }
    }

    fn not_applicable() -> Self {
        Self {
            fund: None,
            amount: Decimal::ZERO,
            applicable: false,
        }
    }
}

/// Maps a race code to its fund.
///
/// Foreigners and unmapped race codes have no fund.
pub fn fund_for(race: Race, residency: ResidencyStatus) -> Option<ShgFund> {
    if residency == ResidencyStatus::Foreigner {
        return None;
    }
    match race {
        Race::Chinese => Some(ShgFund::Cdac),
        Race::Eurasian => Some(ShgFund::Ecf),
        Race::Malay => Some(ShgFund::Mbmf),
        Race::Indian => Some(ShgFund::Sinda),
        Race::Other => None,
    }
}

/// Computes the community-fund deduction for one employee's monthly wages.
///
/// Selects the race's fund table, then the first wage-bracket tier whose
/// upper bound covers the wages; the last tier is open-ended. Amounts are
/// flat values, not percentages.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_shg, ShgFund};
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{Race, ResidencyStatus};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/sg").unwrap();
/// let shg = &loader.rates().for_year(2025).unwrap().shg;
///
/// let deduction = calculate_shg(
///     Race::Chinese,
///     ResidencyStatus::Citizen,
///     Decimal::from_str("3000").unwrap(),
///     shg,
/// );
/// assert_eq!(deduction.fund, Some(ShgFund::Cdac));
/// assert_eq!(deduction.amount, Decimal::from_str("1.00").unwrap());
/// ```
pub fn calculate_shg(
    race: Race,
    residency: ResidencyStatus,
    wages: Decimal,
    config: &ShgConfig,
) -> ShgDeduction {
    let Some(fund) = fund_for(race, residency) else {
        return ShgDeduction::not_applicable();
    };

    let tiers = match fund {
        ShgFund::Cdac => &config.cdac,
        ShgFund::Ecf => &config.ecf,
        ShgFund::Mbmf => &config.mbmf,
        ShgFund::Sinda => &config.sinda,
    };

    let amount = tiers
        .iter()
        .find(|tier| tier.wage_max.is_none_or(|max| wages <= max))
        .or(tiers.last())
        .map(|tier| tier.amount)
        .unwrap_or(Decimal::ZERO);

    ShgDeduction {
        fund: Some(fund),
        amount,
        applicable: true,
    }
}
