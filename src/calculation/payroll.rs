//! Payslip orchestration.
//!
//! Composes the classifier aggregate with the CPF, SDL, and SHG
//! calculators into a full payslip, applies the statutory 50%-of-wages
//! deduction cap, and folds per-employee results into an atomic payroll
//! run.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{RateBook, StatutoryRates};
use crate::error::{EngineError, EngineResult};
use crate::models::{EmploymentProfile, PayItem, PayrollPeriod, PayrollRun, Payslip, RunSummary};

use super::cpf::{CpfInput, calculate_cpf};
use super::day_classification::MonthlyAttendance;
use super::sdl::calculate_sdl;
use super::shg::calculate_shg;

/// Per-employee inputs for one payslip computation.
///
/// Every recognized option is explicit; there are no ad-hoc defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayslipInput {
    /// The classifier's monthly aggregate for the employee.
    pub attendance: MonthlyAttendance,
    /// One-off bonus paid this period.
    pub bonus: Decimal,
    /// Unpaid leave days taken this period.
    pub unpaid_leave_days: Decimal,
    /// Entity performance multiplier applied to credited hours.
    pub performance_multiplier: Decimal,
    /// Year-to-date ordinary wages before this period, for the CPF
    /// additional-wage ceiling.
    pub ytd_ordinary_wages: Decimal,
}

/// One employee's slice of a payroll run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRunInput {
    /// The employment profile snapshot for the period.
    pub profile: EmploymentProfile,
    /// The computed per-period inputs.
    pub input: PayslipInput,
}

/// Computes one employee's payslip for a payroll period.
///
/// The hourly base rate derives from the contractual weekly hours, never
/// actual shift hours: `12 x basic / (52 x weekly_hours)`. The
/// unpaid-leave deduction uses the gross daily rate (basic plus
/// allowances over working days). Total employee deductions are capped at
/// 50% of gross pay; statutory CPF and SHG amounts are never reduced, so
/// the cap clamps the attendance and custom portions proportionally and
/// records a compliance note.
///
/// # Errors
///
/// Returns [`EngineError::InvalidProfile`] when the contractual weekly
/// hours are not positive, since no hourly rate can be derived.
pub fn calculate_payslip(
    profile: &EmploymentProfile,
    period: &PayrollPeriod,
    input: &PayslipInput,
    rates: &StatutoryRates,
) -> EngineResult<Payslip> {
    if profile.weekly_hours <= Decimal::ZERO {
        return Err(EngineError::InvalidProfile {
            field: "weekly_hours".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    let allowances = allowance_items(profile);
    let allowance_total: Decimal = allowances.iter().map(|item| item.amount).sum();

    let working_days = Decimal::from(
        period.working_days(profile.working_days_per_week, profile.rest_day),
    );
    let unpaid_leave_deduction = round_cents(
        (profile.basic_salary + allowance_total) / working_days * input.unpaid_leave_days,
    );

    let hourly_base = Decimal::from(12) * profile.basic_salary
        / (Decimal::from(52) * profile.weekly_hours);

    let attendance = &input.attendance;
    let overtime_pay_1_5 =
        round_cents(attendance.ot_1_5_hours * hourly_base * Decimal::new(15, 1));
    let overtime_pay_2_0 =
        round_cents(attendance.ot_2_0_hours * hourly_base * Decimal::new(20, 1));
    let public_holiday_pay = round_cents(attendance.ph_hours * hourly_base);
    let performance_allowance = round_cents(
        attendance.performance_hours * hourly_base * input.performance_multiplier,
    );

    let attendance_deduction = round_cents(
        Decimal::from(attendance.total_penalty_minutes()) / Decimal::from(60) * hourly_base,
    );

    let gross_pay = profile.basic_salary + allowance_total + overtime_pay_1_5 + overtime_pay_2_0
        + public_holiday_pay
        + performance_allowance
        + input.bonus
        - unpaid_leave_deduction;

    let cpf = if profile.is_cpf_member() {
        let assessment = calculate_cpf(
            &CpfInput {
                date_of_birth: profile.date_of_birth,
                ordinary_wages: (profile.basic_salary + allowance_total - unpaid_leave_deduction)
                    .max(Decimal::ZERO),
                additional_wages: (overtime_pay_1_5
                    + overtime_pay_2_0
                    + public_holiday_pay
                    + input.bonus)
                    .max(Decimal::ZERO),
                ytd_ordinary_wages: input.ytd_ordinary_wages,
                residency: profile.residency,
                pr_start_date: profile.pr_start_date,
                full_rate_agreed: profile.full_rate_agreed,
                reference_date: period.last_day(),
            },
            &rates.cpf,
        );
        Some(assessment.split)
    } else {
        None
    };

    let sdl = calculate_sdl(gross_pay, &rates.sdl);
    let shg = calculate_shg(profile.race, profile.residency, gross_pay, &rates.shg);

    let mut compliance_notes = Vec::new();
    let cpf_employee = cpf.map(|split| split.employee).unwrap_or(Decimal::ZERO);
    let statutory_deductions = cpf_employee + shg.amount;

    let custom_items = deduction_items(profile);
    let (attendance_deduction, custom_items) = apply_deduction_cap(
        gross_pay,
        statutory_deductions,
        attendance_deduction,
        custom_items,
        &mut compliance_notes,
    );

    let custom_total: Decimal = custom_items.iter().map(|item| item.amount).sum();
    let total_deductions = statutory_deductions + attendance_deduction + custom_total;
    let net_pay = round_cents(gross_pay - total_deductions);

    Ok(Payslip {
        payslip_id: Uuid::new_v4(),
        generated_at: chrono::Utc::now(),
        employee_id: profile.id.clone(),
        year: period.year,
        month: period.month,
        basic_salary: profile.basic_salary,
        allowances,
        overtime_pay_1_5,
        overtime_pay_2_0,
        public_holiday_pay,
        performance_allowance,
        bonus: input.bonus,
        unpaid_leave_deduction,
        attendance_deduction,
        deductions: custom_items,
        cpf,
        sdl,
        shg_fund: shg.fund_name(),
        shg_amount: shg.amount,
        gross_pay,
        total_deductions,
        net_pay,
        compliance_notes,
    })
}

/// Runs payroll for every employee in scope, atomically.
///
/// Employees are processed sequentially in input order; any per-employee
/// failure aborts the entire run with [`EngineError::RunAborted`], so a
/// partial payslip set is never produced. Per-employee results are
/// collected into an ordered list before the aggregate summary is folded.
pub fn run_payroll(
    period: &PayrollPeriod,
    employees: &[EmployeeRunInput],
    rates: &RateBook,
) -> EngineResult<PayrollRun> {
    let tables = rates.for_year(period.year)?;

    let mut payslips = Vec::with_capacity(employees.len());
    for employee in employees {
        let payslip = calculate_payslip(&employee.profile, period, &employee.input, tables)
            .map_err(|e| EngineError::RunAborted {
                employee_id: employee.profile.id.clone(),
                message: e.to_string(),
            })?;
        payslips.push(payslip);
    }

    let summary = summarize(&payslips);

    Ok(PayrollRun {
        run_id: Uuid::new_v4(),
        entity: period.entity.clone(),
        year: period.year,
        month: period.month,
        payslips,
        summary,
    })
}

/// Folds an ordered payslip list into the immutable run summary.
fn summarize(payslips: &[Payslip]) -> RunSummary {
    payslips.iter().fold(
        RunSummary {
            employees: 0,
            total_gross: Decimal::ZERO,
            total_cpf_employer: Decimal::ZERO,
            total_cpf_employee: Decimal::ZERO,
            total_sdl: Decimal::ZERO,
            total_shg: Decimal::ZERO,
            total_net: Decimal::ZERO,
        },
        |mut acc, payslip| {
            acc.employees += 1;
            acc.total_gross += payslip.gross_pay;
            if let Some(split) = payslip.cpf {
                acc.total_cpf_employer += split.employer;
                acc.total_cpf_employee += split.employee;
            }
            acc.total_sdl += payslip.sdl;
            acc.total_shg += payslip.shg_amount;
            acc.total_net += payslip.net_pay;
            acc
        },
    )
}

fn allowance_items(profile: &EmploymentProfile) -> Vec<PayItem> {
    let mut items = Vec::new();
    if profile.fixed_allowance != Decimal::ZERO {
        items.push(PayItem {
            code: "fixed_allowance".to_string(),
            description: "Fixed allowance".to_string(),
            amount: profile.fixed_allowance,
        });
    }
    for (name, amount) in &profile.custom_allowances {
        items.push(PayItem {
            code: name.clone(),
            description: name.clone(),
            amount: *amount,
        });
    }
    items
}

fn deduction_items(profile: &EmploymentProfile) -> Vec<PayItem> {
    profile
        .custom_deductions
        .iter()
        .map(|(name, amount)| PayItem {
            code: name.clone(),
            description: name.clone(),
            amount: *amount,
        })
        .collect()
}

/// Applies the statutory 50%-of-gross deduction cap.
///
/// Statutory amounts (employee CPF and SHG) are never reduced. When the
/// combined deductions would exceed the cap, the attendance penalty and
/// custom deductions scale down proportionally; the attendance line
/// absorbs the cent-level scaling remainder so the applied total lands on
/// the cap exactly.
fn apply_deduction_cap(
    gross_pay: Decimal,
    statutory: Decimal,
    attendance_deduction: Decimal,
    custom_items: Vec<PayItem>,
    compliance_notes: &mut Vec<String>,
) -> (Decimal, Vec<PayItem>) {
    let cap_limit = round_cents(gross_pay * Decimal::new(5, 1)).max(Decimal::ZERO);
    let flexible: Decimal =
        attendance_deduction + custom_items.iter().map(|item| item.amount).sum::<Decimal>();

    if statutory + flexible <= cap_limit || flexible <= Decimal::ZERO {
        return (attendance_deduction, custom_items);
    }

    let allowed = (cap_limit - statutory).max(Decimal::ZERO);
    let ratio = allowed / flexible;

    let mut scaled_items: Vec<PayItem> = custom_items
        .into_iter()
        .map(|item| PayItem {
            amount: round_cents(item.amount * ratio),
            ..item
        })
        .collect();
    let mut scaled_attendance = round_cents(attendance_deduction * ratio);

    // Land the applied total on the cap exactly: the attendance line (or
    // the last custom line when there is none) absorbs the cent-level
    // scaling remainder.
    let scaled_custom_total: Decimal = scaled_items.iter().map(|item| item.amount).sum();
    let residual = allowed - scaled_attendance - scaled_custom_total;
    if scaled_attendance > Decimal::ZERO || scaled_items.is_empty() {
        scaled_attendance = (scaled_attendance + residual).max(Decimal::ZERO);
    } else if let Some(last) = scaled_items.last_mut() {
        last.amount = (last.amount + residual).max(Decimal::ZERO);
    }

    compliance_notes.push(format!(
        "Total deductions capped at 50% of gross pay ({}); non-statutory deductions reduced from {} to {}",
        cap_limit, flexible, allowed
    ));

    (scaled_attendance, scaled_items)
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
