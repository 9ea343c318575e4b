//! CPF contribution calculation.
//!
//! This module computes the employer/employee CPF contribution split and
//! its three-way sub-account allocation from capped wages, the age-banded
//! rate tables, and the graduated permanent-resident rate buckets.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::{CpfConfig, band_for_age};
use crate::models::{CpfSplit, ResidencyStatus};

use super::service_period::{age_at, completed_months};

/// The resolved contribution-rate bucket for an employee.
///
/// New permanent residents pay graduated rates during their first two
/// years of PR status; citizens and full-rate-agreed PRs always pay full
/// rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CpfRateBucket {
    /// First year of PR status.
    SprYearOne,
    /// Second year of PR status.
    SprYearTwo,
    /// Full rates (citizens, third-year-plus PRs, full-rate agreements).
    Full,
}

impl std::fmt::Display for CpfRateBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CpfRateBucket::SprYearOne => write!(f, "SPR year 1"),
            CpfRateBucket::SprYearTwo => write!(f, "SPR year 2"),
            CpfRateBucket::Full => write!(f, "full"),
        }
    }
}

/// Input snapshot for one CPF computation.
///
/// Wages are assumed non-negative; clamping malformed input is the
/// caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpfInput {
    /// The employee's date of birth.
    pub date_of_birth: NaiveDate,
    /// Ordinary wages for the month.
    pub ordinary_wages: Decimal,
    /// Additional wages for the month (bonus, overtime).
    pub additional_wages: Decimal,
    /// Year-to-date ordinary wages, excluding this month.
    pub ytd_ordinary_wages: Decimal,
    /// Residency status.
    pub residency: ResidencyStatus,
    /// The date PR status began, if any.
    pub pr_start_date: Option<NaiveDate>,
    /// Whether full rates were agreed during the graduated PR period.
    pub full_rate_agreed: bool,
    /// The reference date for age and PR-tenure resolution (normally the
    /// last day of the payroll period).
    pub reference_date: NaiveDate,
}

/// The result of one CPF computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpfAssessment {
    /// Age at the reference date.
    pub age: u32,
    /// The resolved rate bucket.
    pub bucket: CpfRateBucket,
    /// Ordinary wages after the monthly ceiling.
    pub capped_ordinary_wages: Decimal,
    /// Additional wages after the annual ceiling.
    pub capped_additional_wages: Decimal,
    /// The contribution split and sub-account allocation.
    pub split: CpfSplit,
}

/// Resolves the contribution-rate bucket for an employee.
///
/// Citizens and full-rate-agreed PRs always resolve to [`CpfRateBucket::Full`]
/// regardless of elapsed time. For other PRs the bucket follows the months
/// elapsed since PR status began: under 12 is year one, under 24 is year
/// two, anything later is full. A PR without a recorded start date is
/// treated as full-rate.
pub fn resolve_rate_bucket(
    residency: ResidencyStatus,
    full_rate_agreed: bool,
    pr_start_date: Option<NaiveDate>,
    reference_date: NaiveDate,
) -> CpfRateBucket {
    match residency {
        ResidencyStatus::PermanentResident if !full_rate_agreed => match pr_start_date {
            Some(start) => match completed_months(start, reference_date) {
                0..=11 => CpfRateBucket::SprYearOne,
                12..=23 => CpfRateBucket::SprYearTwo,
                _ => CpfRateBucket::Full,
            },
            None => CpfRateBucket::Full,
        },
        _ => CpfRateBucket::Full,
    }
}

/// Computes the CPF contribution for one month.
///
/// Ordinary wages are capped at the monthly ceiling; additional wages at
/// whatever headroom the annual ceiling leaves after year-to-date and
/// current ordinary wages. Employer and employee contributions are rounded
/// to the nearest whole dollar independently. The sub-account allocation
/// computes the Ordinary and Special account shares from the age-banded
/// percentages and lets MediSave absorb the rounding remainder, so the
/// three accounts always sum exactly to the total contribution.
///
/// This is a total function: there are no error paths, and band lookups
/// beyond the table extremes clamp to the nearest defined band.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_cpf, CpfInput, CpfRateBucket};
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::ResidencyStatus;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/sg").unwrap();
/// let cpf = &loader.rates().for_year(2025).unwrap().cpf;
///
/// let input = CpfInput {
///     date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
///     ordinary_wages: Decimal::from_str("4000").unwrap(),
///     additional_wages: Decimal::ZERO,
///     ytd_ordinary_wages: Decimal::ZERO,
///     residency: ResidencyStatus::Citizen,
///     pr_start_date: None,
///     full_rate_agreed: false,
///     reference_date: NaiveDate::from_ymd_opt(2025, 8, 31).unwrap(),
/// };
///
/// let assessment = calculate_cpf(&input, cpf);
/// assert_eq!(assessment.bucket, CpfRateBucket::Full);
/// assert_eq!(assessment.split.employer, Decimal::from_str("680").unwrap());
/// assert_eq!(assessment.split.employee, Decimal::from_str("800").unwrap());
/// ```
pub fn calculate_cpf(input: &CpfInput, config: &CpfConfig) -> CpfAssessment {
    let age = age_at(input.date_of_birth, input.reference_date);
    let bucket = resolve_rate_bucket(
        input.residency,
        input.full_rate_agreed,
        input.pr_start_date,
        input.reference_date,
    );

    let bands = match bucket {
        CpfRateBucket::SprYearOne => &config.rates.spr_year_one,
        CpfRateBucket::SprYearTwo => &config.rates.spr_year_two,
        CpfRateBucket::Full => &config.rates.full,
    };
    let band = band_for_age(bands, age, |b| b.age_max);

    let capped_ow = input.ordinary_wages.min(config.monthly_ordinary_ceiling);
    let aw_headroom =
        (config.annual_salary_ceiling - input.ytd_ordinary_wages - capped_ow).max(Decimal::ZERO);
    let capped_aw = input.additional_wages.min(aw_headroom);

    let total_wages = capped_ow + capped_aw;
    let hundred = Decimal::ONE_HUNDRED;
    let employer = round_dollars(total_wages * band.employer_pct / hundred);
    let employee = round_dollars(total_wages * band.employee_pct / hundred);
    let total = employer + employee;

    let allocation = config.allocation_for(age);
    let ordinary_account = round_cents(total * allocation.ordinary_pct / hundred);
    let special_account = round_cents(total * allocation.special_pct / hundred);
    // MediSave takes the remainder so the three accounts reconcile exactly.
    let medisave_account = total - ordinary_account - special_account;

    CpfAssessment {
        age,
        bucket,
        capped_ordinary_wages: capped_ow,
        capped_additional_wages: capped_aw,
        split: CpfSplit {
            employer,
            employee,
            ordinary_account,
            special_account,
            medisave_account,
        },
    }
}

fn round_dollars(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
