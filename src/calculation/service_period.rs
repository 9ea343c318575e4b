//! Age and tenure date-math helpers.
//!
//! Pure functions over calendar dates used by the CPF calculator (age at
//! reference date) and the leave proration calculator (elapsed service).

use chrono::{Datelike, NaiveDate};

/// Returns the age in whole years at a reference date (floor).
///
/// A reference date earlier than the date of birth yields 0.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::age_at;
/// use chrono::NaiveDate;
///
/// let dob = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
/// // Day before the birthday.
/// assert_eq!(age_at(dob, NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()), 34);
/// // On the birthday.
/// assert_eq!(age_at(dob, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()), 35);
/// ```
pub fn age_at(date_of_birth: NaiveDate, reference: NaiveDate) -> u32 {
    completed_months(date_of_birth, reference) / 12
}

/// Returns the number of whole calendar months elapsed between two dates.
///
/// A month counts once the day-of-month of `start` is reached again. A
/// reference earlier than `start` yields 0.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::completed_months;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// assert_eq!(completed_months(start, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()), 1);
/// assert_eq!(completed_months(start, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()), 2);
/// ```
pub fn completed_months(start: NaiveDate, reference: NaiveDate) -> u32 {
    if reference <= start {
        return 0;
    }

    let mut months =
        (reference.year() - start.year()) * 12 + reference.month() as i32 - start.month() as i32;
    if reference.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Returns the number of whole years elapsed between two dates.
pub fn completed_years(start: NaiveDate, reference: NaiveDate) -> u32 {
    completed_months(start, reference) / 12
}
