//! Data models for the payroll engine.
//!
//! This module contains the input snapshots the engine consumes
//! (employment profiles, shift configurations, attendance punches,
//! payroll periods) and the computed outputs it produces (payslips,
//! run summaries, leave balances).

mod attendance;
mod employee;
mod leave;
mod payslip;
mod period;

pub use attendance::{AttendanceRecord, ShiftConfig};
pub use employee::{EmploymentProfile, Race, ResidencyStatus};
pub use leave::{LeaveBalance, LeaveType};
pub use payslip::{CpfSplit, PayItem, PayrollRun, Payslip, RunSummary};
pub use period::{PayrollPeriod, PublicHoliday};
