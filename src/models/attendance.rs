//! Shift configuration and attendance punch models.
//!
//! This module defines the [`ShiftConfig`] read by the classifier and the
//! raw [`AttendanceRecord`] produced by attendance ingestion.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default unpaid meal break, in minutes, when a shift has no break window.
pub const DEFAULT_UNPAID_BREAK_MINUTES: i64 = 60;

/// Per-site/shift configuration read by the classifier.
///
/// Configured by administrators; read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftConfig {
    /// Unique identifier for the shift configuration.
    pub id: String,
    /// Scheduled shift start time.
    pub start_time: NaiveTime,
    /// Scheduled shift end time (earlier than `start_time` for overnight
    /// shifts).
    pub end_time: NaiveTime,
    /// Start of the unpaid meal-break window, if configured.
    #[serde(default)]
    pub break_start: Option<NaiveTime>,
    /// End of the unpaid meal-break window, if configured.
    #[serde(default)]
    pub break_end: Option<NaiveTime>,
    /// Late-arrival grace threshold in minutes.
    pub late_grace_minutes: i64,
    /// Penalty rounding block size for late arrivals, in minutes.
    pub late_block_minutes: i64,
    /// Early-departure grace threshold in minutes.
    pub early_grace_minutes: i64,
    /// Penalty rounding block size for early departures, in minutes.
    pub early_block_minutes: i64,
    /// Compulsory overtime hours attached to the shift.
    #[serde(default)]
    pub compulsory_ot_hours: Decimal,
    /// Multiplier applied to performance-credit hours.
    pub performance_multiplier: Decimal,
}

impl ShiftConfig {
    /// Returns the unpaid break length in minutes.
    ///
    /// Derived from the configured meal-break window; shifts without a
    /// window fall back to the statutory one-hour break.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::ShiftConfig;
    /// use chrono::NaiveTime;
    /// use rust_decimal::Decimal;
    ///
    /// let shift = ShiftConfig {
    ///     id: "day".to_string(),
    ///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
    ///     break_start: Some(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
    ///     break_end: Some(NaiveTime::from_hms_opt(12, 30, 0).unwrap()),
    ///     late_grace_minutes: 15,
    ///     late_block_minutes: 15,
    ///     early_grace_minutes: 15,
    ///     early_block_minutes: 15,
    ///     compulsory_ot_hours: Decimal::ZERO,
    ///     performance_multiplier: Decimal::ONE,
    /// };
    /// assert_eq!(shift.unpaid_break_minutes(), 30);
    /// ```
    pub fn unpaid_break_minutes(&self) -> i64 {
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) if end > start => (end - start).num_minutes(),
            _ => DEFAULT_UNPAID_BREAK_MINUTES,
        }
    }
}

/// One raw attendance record per employee per calendar date.
///
/// Produced by attendance ingestion; consumed by the classifier, which
/// derives the hour buckets and penalty minutes from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// Clock-in time.
    pub clock_in: NaiveTime,
    /// Clock-out time. At or before `clock_in` means the punch crossed
    /// midnight and belongs to the next day.
    pub clock_out: NaiveTime,
    /// Reference to the shift configuration in force for this date.
    pub shift_id: String,
    /// Performance-credit hours granted for the day.
    #[serde(default)]
    pub performance_hours: Decimal,
}
