//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/payslip`
//! and `/leave/balance` endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::TaxResidency;
use crate::models::{AttendanceRecord, EmploymentProfile, LeaveType, PayrollPeriod, ShiftConfig};

/// Request body for the `/payslip` endpoint.
///
/// Contains everything needed to classify one employee's attendance and
/// compute the payslip for a period: the contract snapshot, the period
/// scope with its holiday calendar, the shift configuration, and the raw
/// attendance punches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipRequest {
    /// The employment profile snapshot for the period.
    pub profile: EmploymentProfile,
    /// The payroll period scope, including public holidays.
    pub period: PayrollPeriod,
    /// The shift configuration in force.
    pub shift: ShiftConfig,
    /// Raw attendance records for the period.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// Designated partial off-dates (e.g., alternate off Saturdays).
    #[serde(default)]
    pub partial_off_dates: Vec<NaiveDate>,
    /// One-off bonus paid this period.
    #[serde(default)]
    pub bonus: Decimal,
    /// Unpaid leave days taken this period.
    #[serde(default)]
    pub unpaid_leave_days: Decimal,
    /// Year-to-date ordinary wages before this period.
    #[serde(default)]
    pub ytd_ordinary_wages: Decimal,
}

/// Request body for the `/tax/estimate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxEstimateRequest {
    /// Annual chargeable income.
    pub annual_income: Decimal,
    /// Tax residency for the estimation.
    pub residency: TaxResidency,
    /// The year of assessment the estimate is for.
    pub year: i32,
}

/// Request body for the `/leave/balance` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveBalanceRequest {
    /// The employee the balance is for.
    pub employee_id: String,
    /// The leave type to compute.
    pub leave_type: LeaveType,
    /// The date the employee joined.
    pub date_joined: NaiveDate,
    /// Full-year annual leave days granted by the employee's grade.
    pub grade_annual_days: Decimal,
    /// Days already taken this year.
    #[serde(default)]
    pub taken: Decimal,
    /// The date to compute the balance as of.
    pub as_of: NaiveDate,
}
