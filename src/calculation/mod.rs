//! Calculation logic for the payroll engine.
//!
//! This module contains the deterministic calculators: service-period date
//! math, CPF contribution computation, SDL levy, SHG community-fund
//! deduction, progressive income tax estimation, day-type/overtime
//! classification, payslip orchestration, and leave proration.

mod cpf;
mod day_classification;
mod income_tax;
mod leave;
mod payroll;
mod sdl;
mod service_period;
mod shg;

pub use cpf::{CpfAssessment, CpfInput, CpfRateBucket, calculate_cpf, resolve_rate_bucket};
pub use day_classification::{
    ClassifiedDay, DayType, MonthlyAttendance, PARTIAL_OFF_DAY_NORMAL_HOURS,
    PUBLIC_HOLIDAY_NORMAL_HOURS, aggregate_month, classify_attendance, penalty_minutes,
    resolve_day_type, resolve_day_type_for_date,
};
pub use income_tax::{TaxEstimate, TaxResidency, estimate_tax, resident_tax};
pub use leave::{LeavePolicy, annual_leave_balance, medical_leave_balance, statutory_annual_leave};
pub use payroll::{EmployeeRunInput, PayslipInput, calculate_payslip, run_payroll};
pub use sdl::calculate_sdl;
pub use shg::{ShgDeduction, ShgFund, calculate_shg, fund_for};
pub use service_period::{age_at, completed_months, completed_years};
