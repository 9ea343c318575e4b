//! Leave entitlement proration.
//!
//! Computes prorated, probation-aware annual leave and the fixed
//! service-month schedules for medical and hospitalization leave. Invoked
//! on read, per employee and year, independently of the payroll run.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{LeaveBalance, LeaveType};

use super::service_period::{completed_months, completed_years};

/// Completed service months before any annual leave is earned.
const PROBATION_MONTHS: u32 = 3;

/// Statutory annual leave ceiling in days.
const STATUTORY_ANNUAL_CAP: u32 = 14;

/// Full-year medical leave entitlement in days.
const FULL_MEDICAL_DAYS: u32 = 14;

/// Full-year hospitalization leave entitlement in days.
const FULL_HOSPITALIZATION_DAYS: u32 = 60;

/// Grade-specific leave policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// Full-year annual leave days granted by the employee's grade.
    pub annual_days: Decimal,
}

/// Returns the statutory minimum annual leave for a service length:
/// 7 days plus one per completed year, capped at 14.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::statutory_annual_leave;
/// use rust_decimal::Decimal;
///
/// assert_eq!(statutory_annual_leave(0), Decimal::from(7));
/// assert_eq!(statutory_annual_leave(3), Decimal::from(10));
/// assert_eq!(statutory_annual_leave(20), Decimal::from(14));
/// ```
pub fn statutory_annual_leave(completed_service_years: u32) -> Decimal {
    Decimal::from((7 + completed_service_years).min(STATUTORY_ANNUAL_CAP))
}

/// Computes the annual leave balance for one employee as of a date.
///
/// The full-year entitlement is the greater of the statutory minimum and
/// the grade policy. The entitled figure prorates by the months the
/// employee can possibly serve this year; the earned figure prorates by
/// the months already completed this year and is forced to zero during
/// the first three completed service months (probation). Both round to
/// the nearest half day.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{annual_leave_balance, LeavePolicy};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let balance = annual_leave_balance(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
///     &LeavePolicy { annual_days: Decimal::from(14) },
///     Decimal::ZERO,
///     NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
/// );
/// // Exactly three completed months: probation over, 3/12 x 14 = 3.5.
/// assert_eq!(balance.earned, Decimal::new(35, 1));
/// ```
pub fn annual_leave_balance(
    employee_id: &str,
    date_joined: NaiveDate,
    policy: &LeavePolicy,
    taken: Decimal,
    as_of: NaiveDate,
) -> LeaveBalance {
    let service_years = completed_years(date_joined, as_of);
    let full_year = statutory_annual_leave(service_years).max(policy.annual_days);

    let possible_months = if date_joined.year() == as_of.year() {
        13 - date_joined.month()
    } else {
        12
    };
    let entitled = prorate(full_year, possible_months);

    let service_months = completed_months(date_joined, as_of);
    let earned = if service_months < PROBATION_MONTHS {
        Decimal::ZERO
    } else {
        let year_start = NaiveDate::from_ymd_opt(as_of.year(), 1, 1).expect("valid year start");
        let months_this_year = completed_months(date_joined.max(year_start), as_of).min(12);
        prorate(full_year, months_this_year).min(entitled)
    };

    LeaveBalance {
        employee_id: employee_id.to_string(),
        leave_type: LeaveType::Annual,
        year: as_of.year(),
        entitled,
        earned,
        taken,
        balance: (earned - taken).max(Decimal::ZERO),
    }
}

/// Computes a medical or hospitalization leave balance as of a date.
///
/// Earned days follow the fixed completed-service-months schedule,
/// independent of grade policy; nothing is earned before three completed
/// months, and the full 14/60 days vest at six.
pub fn medical_leave_balance(
    employee_id: &str,
    leave_type: LeaveType,
    date_joined: NaiveDate,
    taken: Decimal,
    as_of: NaiveDate,
) -> LeaveBalance {
    let service_months = completed_months(date_joined, as_of);
    let (earned_days, full_days) = match leave_type {
        LeaveType::Hospitalization => (
            hospitalization_days(service_months),
            FULL_HOSPITALIZATION_DAYS,
        ),
        _ => (medical_days(service_months), FULL_MEDICAL_DAYS),
    };

    let earned = Decimal::from(earned_days);

    LeaveBalance {
        employee_id: employee_id.to_string(),
        leave_type,
        year: as_of.year(),
        entitled: Decimal::from(full_days),
        earned,
        taken,
        balance: (earned - taken).max(Decimal::ZERO),
    }
}

/// Outpatient medical days earned by completed service months.
fn medical_days(service_months: u32) -> u32 {
    match service_months {
        0..=2 => 0,
        3 => 5,
        4 => 8,
        5 => 11,
        _ => FULL_MEDICAL_DAYS,
    }
}

/// Hospitalization days earned by completed service months.
fn hospitalization_days(service_months: u32) -> u32 {
    match service_months {
        0..=2 => 0,
        3 => 15,
        4 => 30,
        5 => 45,
        _ => FULL_HOSPITALIZATION_DAYS,
    }
}

/// Prorates a full-year entitlement by months over twelve, rounding to
/// the nearest half day.
fn prorate(full_year: Decimal, months: u32) -> Decimal {
    let raw = full_year * Decimal::from(months) / Decimal::from(12);
    (raw * Decimal::from(2)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        / Decimal::from(2)
}
