//! Skills Development Levy calculation.
//!
//! A percentage-of-wage levy with a flat minimum for low wages and a
//! monthly ceiling. Pure function, no state.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::SdlConfig;

/// Computes the Skills Development Levy for one employee's monthly wages.
///
/// Wages at or below zero attract no levy. Wages below the low-wage
/// threshold pay the flat minimum; otherwise the percentage levy is
/// clamped to the configured `[minimum, maximum]` range. The result is
/// rounded to 2 decimal places.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_sdl;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/sg").unwrap();
/// let sdl = &loader.rates().for_year(2025).unwrap().sdl;
///
/// // 0.25% of 3000 = 7.50
/// let levy = calculate_sdl(Decimal::from_str("3000").unwrap(), sdl);
/// assert_eq!(levy, Decimal::from_str("7.50").unwrap());
/// ```
pub fn calculate_sdl(wages: Decimal, config: &SdlConfig) -> Decimal {
    if wages <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let levy = if wages < config.low_wage_threshold {
        config.minimum
    } else {
        (wages * config.rate_pct / Decimal::ONE_HUNDRED)
            .max(config.minimum)
            .min(config.maximum)
    };

    levy.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
