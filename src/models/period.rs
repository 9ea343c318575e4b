//! Payroll period and public holiday models.
//!
//! This module contains the [`PayrollPeriod`] and [`PublicHoliday`] types
//! that define the calculation scope for a payroll run.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Represents a public holiday within a payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday (e.g., "National Day").
    pub name: String,
}

/// The (entity, year, month) scope of one payroll run.
///
/// A period produces exactly one payslip per active employee in scope, or
/// the run fails atomically.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayrollPeriod, PublicHoliday};
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod {
///     entity: "acme_sg".to_string(),
///     year: 2025,
///     month: 8,
///     public_holidays: vec![PublicHoliday {
///         date: NaiveDate::from_ymd_opt(2025, 8, 9).unwrap(),
///         name: "National Day".to_string(),
///     }],
/// };
///
/// assert_eq!(period.days_in_month(), 31);
/// assert!(period.is_public_holiday(NaiveDate::from_ymd_opt(2025, 8, 9).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// The paying entity (tenant) this run belongs to.
    pub entity: String,
    /// The calendar year of the period.
    pub year: i32,
    /// The calendar month of the period (1-12).
    pub month: u32,
    /// Public holidays falling within this period.
    #[serde(default)]
    pub public_holidays: Vec<PublicHoliday>,
}

impl PayrollPeriod {
    /// Returns the first day of the period's month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(self.year, 1, 1).expect("valid year"))
    }

    /// Returns the last day of the period's month.
    pub fn last_day(&self) -> NaiveDate {
        let first = self.first_day();
        let next_month = first
            .checked_add_days(Days::new(32))
            .expect("valid date")
            .with_day(1)
            .expect("valid first of month");
        next_month.pred_opt().expect("valid predecessor")
    }

    /// Returns the number of calendar days in the period's month.
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Checks whether a date is a public holiday within this period.
    pub fn is_public_holiday(&self, date: NaiveDate) -> bool {
        self.public_holidays.iter().any(|h| h.date == date)
    }

    /// Counts the working days in the period's month for a weekly pattern.
    ///
    /// The off days of a week are the rest day plus the days immediately
    /// preceding it, enough to leave `working_days_per_week` working days.
    /// A 5-day week with a Sunday rest day therefore treats Saturday and
    /// Sunday as off.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayrollPeriod;
    /// use chrono::Weekday;
    ///
    /// let period = PayrollPeriod {
    ///     entity: "acme_sg".to_string(),
    ///     year: 2025,
    ///     month: 8,
    ///     public_holidays: vec![],
    /// };
    /// // August 2025 has 10 weekend days.
    /// assert_eq!(period.working_days(5, Weekday::Sun), 21);
    /// ```
    pub fn working_days(&self, working_days_per_week: u32, rest_day: Weekday) -> u32 {
        let off_per_week = 7u32.saturating_sub(working_days_per_week.clamp(1, 7));
        let rest_index = rest_day.num_days_from_monday();

        let mut count = 0;
        let mut date = self.first_day();
        let last = self.last_day();
        while date <= last {
            let index = date.weekday().num_days_from_monday();
            // Days counted backwards from the rest day form the off block.
            let distance_back = (rest_index + 7 - index) % 7;
            if distance_back >= off_per_week {
                count += 1;
            }
            date = date.succ_opt().expect("valid successor");
        }
        count
    }
}
