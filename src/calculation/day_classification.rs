//! Day-type resolution and overtime classification.
//!
//! This module determines the day type for each attendance date, buckets
//! worked hours into normal/1.5x/2.0x/public-holiday categories, and
//! computes late-arrival and early-departure penalty minutes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, PayrollPeriod, ShiftConfig};

/// Hours paid as normal time on a partial off-day before 1.5x applies.
pub const PARTIAL_OFF_DAY_NORMAL_HOURS: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Hours paid as normal (and flagged for PH pay) on a worked public
/// holiday before 2.0x applies.
pub const PUBLIC_HOLIDAY_NORMAL_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

const MINUTES_PER_DAY: i64 = 24 * 60;

/// The type of day for overtime classification.
///
/// Day types are mutually exclusive and resolved once per date, then
/// dispatched exhaustively; two rules can never silently overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// An ordinary working day.
    Ordinary,
    /// The employee's designated weekly rest day.
    RestDay,
    /// A gazetted public holiday.
    PublicHoliday,
    /// A designated non-working weekday with partial coverage (e.g., an
    /// alternate-off-Saturday pattern).
    PartialOffDay,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Ordinary => write!(f, "Ordinary"),
            DayType::RestDay => write!(f, "RestDay"),
            DayType::PublicHoliday => write!(f, "PublicHoliday"),
            DayType::PartialOffDay => write!(f, "PartialOffDay"),
        }
    }
}

/// Resolves the day type for one attendance date.
///
/// Priority order: rest day, then partial off-day, then public holiday,
/// then ordinary. A rest day that is also a public holiday therefore
/// classifies as a rest day.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{resolve_day_type, DayType};
///
/// assert_eq!(resolve_day_type(true, true, false), DayType::RestDay);
/// assert_eq!(resolve_day_type(false, true, false), DayType::PublicHoliday);
/// assert_eq!(resolve_day_type(false, false, false), DayType::Ordinary);
/// ```
pub fn resolve_day_type(
    is_rest_day: bool,
    is_public_holiday: bool,
    is_partial_off_day: bool,
) -> DayType {
    if is_rest_day {
        DayType::RestDay
    } else if is_partial_off_day {
        DayType::PartialOffDay
    } else if is_public_holiday {
        DayType::PublicHoliday
    } else {
        DayType::Ordinary
    }
}

/// Resolves the day type for a date within a payroll period.
///
/// Convenience wrapper over [`resolve_day_type`] that reads the holiday
/// calendar from the period and matches the date against the employee's
/// rest day and designated partial off-dates.
pub fn resolve_day_type_for_date(
    date: NaiveDate,
    period: &PayrollPeriod,
    rest_day: chrono::Weekday,
    partial_off_dates: &[NaiveDate],
) -> DayType {
    use chrono::Datelike;
    resolve_day_type(
        date.weekday() == rest_day,
        period.is_public_holiday(date),
        partial_off_dates.contains(&date),
    )
}

/// One attendance record after classification.
///
/// The normal/1.5x/2.0x buckets are mutually exclusive and sum to the
/// worked duration minus the unpaid break. `ph_hours` is the
/// public-holiday-flagged subset of the normal hours, never additive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// The resolved day type.
    pub day_type: DayType,
    /// Hours paid at normal time.
    pub normal_hours: Decimal,
    /// Hours paid at 1.5x.
    pub ot_1_5_hours: Decimal,
    /// Hours paid at 2.0x.
    pub ot_2_0_hours: Decimal,
    /// Normal hours additionally flagged for public-holiday pay.
    pub ph_hours: Decimal,
    /// Late-arrival penalty minutes, after grace and block rounding.
    pub late_minutes: i64,
    /// Early-departure penalty minutes, after grace and block rounding.
    pub early_out_minutes: i64,
    /// Performance-credit hours carried over from the record.
    pub performance_hours: Decimal,
}

/// Monthly aggregate of classified days, consumed by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAttendance {
    /// Days with an attendance record.
    pub days_worked: u32,
    /// Total normal-time hours.
    pub normal_hours: Decimal,
    /// Total 1.5x overtime hours.
    pub ot_1_5_hours: Decimal,
    /// Total 2.0x overtime hours.
    pub ot_2_0_hours: Decimal,
    /// Total public-holiday-flagged hours.
    pub ph_hours: Decimal,
    /// Total late-arrival penalty minutes.
    pub late_minutes: i64,
    /// Total early-departure penalty minutes.
    pub early_out_minutes: i64,
    /// Total performance-credit hours.
    pub performance_hours: Decimal,
}

impl MonthlyAttendance {
    /// Returns the combined late and early penalty minutes.
    pub fn total_penalty_minutes(&self) -> i64 {
        self.late_minutes + self.early_out_minutes
    }
}

/// Rounds a raw lateness up to a penalty, honoring grace and block size.
///
/// Raw minutes at or below the grace threshold are forgiven entirely.
/// Above it, the full raw duration rounds up to the next multiple of the
/// block size. A grace of 0 therefore turns any nonzero lateness into one
/// full block.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::penalty_minutes;
///
/// assert_eq!(penalty_minutes(16, 15, 15), 30);
/// assert_eq!(penalty_minutes(15, 15, 15), 0);
/// assert_eq!(penalty_minutes(1, 0, 15), 15);
/// ```
pub fn penalty_minutes(raw: i64, grace: i64, block: i64) -> i64 {
    if raw <= 0 || raw <= grace {
        return 0;
    }
    if block <= 0 {
        return raw;
    }
    // raw > 0 and block > 0 here (guarded above), so this is the exact
    // positive-integer equivalent of raw.div_ceil(block) without relying on
    // the unstable `int_roundings` feature.
    ((raw + block - 1) / block) * block
}

/// Classifies one attendance record into hour buckets and penalties.
///
/// A clock-out at or before the clock-in is treated as crossing midnight.
/// The shift's unpaid break is subtracted before bucketing. Bucketing
/// dispatches on the day type:
///
/// - Rest day: everything at 2.0x, nothing at normal time.
/// - Partial off-day: first 4 hours normal, remainder at 1.5x.
/// - Public holiday: first 8 hours normal and PH-flagged, remainder 2.0x.
/// - Ordinary day: first `contractual_daily_hours` normal, remainder 1.5x.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{classify_attendance, DayType};
/// use payroll_engine::models::{AttendanceRecord, ShiftConfig};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let shift = ShiftConfig {
///     id: "day".to_string(),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     break_start: None,
///     break_end: None,
///     late_grace_minutes: 15,
///     late_block_minutes: 15,
///     early_grace_minutes: 15,
///     early_block_minutes: 15,
///     compulsory_ot_hours: Decimal::ZERO,
///     performance_multiplier: Decimal::ONE,
/// };
/// let record = AttendanceRecord {
///     date: NaiveDate::from_ymd_opt(2025, 8, 10).unwrap(),
///     clock_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     clock_out: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     shift_id: "day".to_string(),
///     performance_hours: Decimal::ZERO,
/// };
///
/// // Ten punched hours minus the default one-hour break, on a rest day.
/// let day = classify_attendance(&record, &shift, DayType::RestDay, Decimal::from(8));
/// assert_eq!(day.ot_2_0_hours, Decimal::from(9));
/// assert_eq!(day.normal_hours, Decimal::ZERO);
/// ```
pub fn classify_attendance(
    record: &AttendanceRecord,
    shift: &ShiftConfig,
    day_type: DayType,
    contractual_daily_hours: Decimal,
) -> ClassifiedDay {
    let in_minutes = minutes_of_day(record.clock_in);
    let mut out_minutes = minutes_of_day(record.clock_out);
    // A punch-out at or before the punch-in crossed midnight.
    if out_minutes <= in_minutes {
        out_minutes += MINUTES_PER_DAY;
    }

    let worked_minutes = (out_minutes - in_minutes - shift.unpaid_break_minutes()).max(0);
    let worked = Decimal::from(worked_minutes) / Decimal::from(60);

    let (normal_hours, ot_1_5_hours, ot_2_0_hours, ph_hours) = match day_type {
        DayType::RestDay => (Decimal::ZERO, Decimal::ZERO, worked, Decimal::ZERO),
        DayType::PartialOffDay => {
            let normal = worked.min(PARTIAL_OFF_DAY_NORMAL_HOURS);
            (normal, worked - normal, Decimal::ZERO, Decimal::ZERO)
        }
        DayType::PublicHoliday => {
            let normal = worked.min(PUBLIC_HOLIDAY_NORMAL_HOURS);
            (normal, Decimal::ZERO, worked - normal, normal)
        }
        DayType::Ordinary => {
            let cap = if contractual_daily_hours > Decimal::ZERO {
                contractual_daily_hours
            } else {
                PUBLIC_HOLIDAY_NORMAL_HOURS
            };
            let normal = worked.min(cap);
            (normal, worked - normal, Decimal::ZERO, Decimal::ZERO)
        }
    };

    let shift_start = minutes_of_day(shift.start_time);
    let mut shift_end = minutes_of_day(shift.end_time);
    if shift_end <= shift_start {
        shift_end += MINUTES_PER_DAY;
    }

    let late_minutes = penalty_minutes(
        in_minutes - shift_start,
        shift.late_grace_minutes,
        shift.late_block_minutes,
    );
    let early_out_minutes = penalty_minutes(
        shift_end - out_minutes,
        shift.early_grace_minutes,
        shift.early_block_minutes,
    );

    ClassifiedDay {
        date: record.date,
        day_type,
        normal_hours,
        ot_1_5_hours,
        ot_2_0_hours,
        ph_hours,
        late_minutes,
        early_out_minutes,
        performance_hours: record.performance_hours,
    }
}

/// Aggregates classified days into the monthly totals the orchestrator
/// consumes.
pub fn aggregate_month(days: &[ClassifiedDay]) -> MonthlyAttendance {
    days.iter().fold(MonthlyAttendance::default(), |mut acc, day| {
        acc.days_worked += 1;
        acc.normal_hours += day.normal_hours;
        acc.ot_1_5_hours += day.ot_1_5_hours;
        acc.ot_2_0_hours += day.ot_2_0_hours;
        acc.ph_hours += day.ph_hours;
        acc.late_minutes += day.late_minutes;
        acc.early_out_minutes += day.early_out_minutes;
        acc.performance_hours += day.performance_hours;
        acc
    })
}

fn minutes_of_day(time: chrono::NaiveTime) -> i64 {
    use chrono::Timelike;
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}
