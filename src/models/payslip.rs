//! Payslip and payroll-run output models.
//!
//! This module contains the computed, append-only [`Payslip`] record and the
//! aggregate [`PayrollRun`] produced by one invocation of the orchestrator.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single named allowance or deduction line on a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayItem {
    /// Short machine-readable code (e.g., "fixed_allowance").
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// The line amount.
    pub amount: Decimal,
}

/// The employer/employee CPF contribution split and its three-way
/// sub-account allocation.
///
/// The three sub-accounts always sum exactly to the total contribution;
/// the MediSave account absorbs the allocation rounding remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpfSplit {
    /// Employer contribution, whole dollars.
    pub employer: Decimal,
    /// Employee contribution, whole dollars.
    pub employee: Decimal,
    /// Ordinary Account allocation.
    pub ordinary_account: Decimal,
    /// Special Account allocation.
    pub special_account: Decimal,
    /// MediSave Account allocation (remainder-absorbing).
    pub medisave_account: Decimal,
}

impl CpfSplit {
    /// Returns the total contribution (employer + employee).
    pub fn total(&self) -> Decimal {
        self.employer + self.employee
    }
}

/// A computed payslip for one employee in one payroll period.
///
/// Created once per (employee, period); never mutated after the run
/// commits. Callers persist it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for this payslip.
    pub payslip_id: Uuid,
    /// When the payslip was computed.
    pub generated_at: DateTime<Utc>,
    /// The employee this payslip belongs to.
    pub employee_id: String,
    /// The calendar year of the period.
    pub year: i32,
    /// The calendar month of the period (1-12).
    pub month: u32,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Allowance line items (fixed + custom).
    pub allowances: Vec<PayItem>,
    /// Overtime pay for hours in the 1.5x bucket.
    pub overtime_pay_1_5: Decimal,
    /// Overtime pay for hours in the 2.0x bucket.
    pub overtime_pay_2_0: Decimal,
    /// Extra pay for public-holiday-flagged hours.
    pub public_holiday_pay: Decimal,
    /// Performance allowance (credited hours at the multiplied rate).
    pub performance_allowance: Decimal,
    /// One-off bonus for the period.
    pub bonus: Decimal,
    /// Deduction for unpaid leave days, at the gross daily rate.
    pub unpaid_leave_deduction: Decimal,
    /// Attendance penalty applied for late/early minutes (after any cap).
    pub attendance_deduction: Decimal,
    /// Custom deduction line items (after any cap).
    pub deductions: Vec<PayItem>,
    /// CPF contribution split, when the employee is contribution-applicable.
    #[serde(default)]
    pub cpf: Option<CpfSplit>,
    /// Skills Development Levy payable by the employer.
    pub sdl: Decimal,
    /// Community self-help-group fund name ("CDAC", "MBMF", "SINDA",
    /// "ECF", or "N/A").
    pub shg_fund: String,
    /// Community-fund deduction amount.
    pub shg_amount: Decimal,
    /// Gross pay for the period.
    pub gross_pay: Decimal,
    /// Total deductions taken from the employee.
    pub total_deductions: Decimal,
    /// Net pay for the period.
    pub net_pay: Decimal,
    /// Statutory adjustments recorded during computation (e.g., the
    /// 50%-of-wages deduction cap).
    #[serde(default)]
    pub compliance_notes: Vec<String>,
}

impl Payslip {
    /// Returns the sum of all allowance line items.
    pub fn allowance_total(&self) -> Decimal {
        self.allowances.iter().map(|item| item.amount).sum()
    }
}

/// Aggregate totals for a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of payslips produced.
    pub employees: u32,
    /// Sum of gross pay across the run.
    pub total_gross: Decimal,
    /// Sum of employer CPF contributions.
    pub total_cpf_employer: Decimal,
    /// Sum of employee CPF contributions.
    pub total_cpf_employee: Decimal,
    /// Sum of SDL across the run.
    pub total_sdl: Decimal,
    /// Sum of community-fund deductions.
    pub total_shg: Decimal,
    /// Sum of net pay across the run.
    pub total_net: Decimal,
}

/// The complete output of one payroll run: every payslip in scope plus
/// the aggregate summary. Either the whole run is produced or none of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// The paying entity.
    pub entity: String,
    /// The calendar year of the period.
    pub year: i32,
    /// The calendar month of the period.
    pub month: u32,
    /// The payslips, in processing order.
    pub payslips: Vec<Payslip>,
    /// Aggregate totals for the run.
    pub summary: RunSummary,
}
