//! Employment profile model and related types.
//!
//! This module defines the [`EmploymentProfile`] snapshot consumed by the
//! payroll calculators, together with the residency and race enums that
//! drive statutory contribution rules.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Residency status of an employee for statutory contribution purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidencyStatus {
    /// Singapore citizen; full CPF rates always apply.
    Citizen,
    /// Permanent resident; graduated CPF rates apply during the first
    /// two years of PR status unless full rates were agreed.
    PermanentResident,
    /// Foreign employee; no CPF and no community-fund deduction.
    Foreigner,
}

/// Race/ethnicity code used to select the community self-help-group fund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    /// Chinese; contributes to CDAC.
    Chinese,
    /// Malay; contributes to MBMF.
    Malay,
    /// Indian; contributes to SINDA.
    Indian,
    /// Eurasian; contributes to ECF.
    Eurasian,
    /// Any other or unmapped race code; no fund deduction.
    Other,
}

/// An immutable-per-period snapshot of an employee's contract terms.
///
/// The profile is owned by the employee directory; the engine only reads a
/// value snapshot for the period being processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's date of birth.
    pub date_of_birth: NaiveDate,
    /// The date the employee joined the company.
    pub date_joined: NaiveDate,
    /// Residency status for statutory contribution purposes.
    pub residency: ResidencyStatus,
    /// Race code used for the community-fund deduction.
    pub race: Race,
    /// Whether CPF contributions apply to this employee.
    pub cpf_applicable: bool,
    /// The date PR status began, for graduated-rate bucketing.
    #[serde(default)]
    pub pr_start_date: Option<NaiveDate>,
    /// Whether employer and employee agreed to full CPF rates during the
    /// graduated PR period.
    #[serde(default)]
    pub full_rate_agreed: bool,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Fixed monthly allowance.
    pub fixed_allowance: Decimal,
    /// Named recurring allowances (name to monthly amount).
    #[serde(default)]
    pub custom_allowances: BTreeMap<String, Decimal>,
    /// Named recurring deductions (name to monthly amount).
    #[serde(default)]
    pub custom_deductions: BTreeMap<String, Decimal>,
    /// Contractual weekly working hours (not actual shift hours).
    pub weekly_hours: Decimal,
    /// Contractual daily working hours.
    pub daily_hours: Decimal,
    /// Contractual working days per week.
    pub working_days_per_week: u32,
    /// The employee's designated weekly rest day.
    pub rest_day: Weekday,
    /// Employee grade, used to select leave policy.
    pub grade: String,
}

impl EmploymentProfile {
    /// Returns true if CPF contributions must be computed for this employee.
    ///
    /// Foreigners never contribute regardless of the applicability flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{EmploymentProfile, Race, ResidencyStatus};
    /// use chrono::{NaiveDate, Weekday};
    /// use rust_decimal::Decimal;
    /// use std::collections::BTreeMap;
    ///
    /// let profile = EmploymentProfile {
    ///     id: "emp_001".to_string(),
    ///     date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
    ///     date_joined: NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
    ///     residency: ResidencyStatus::Citizen,
    ///     race: Race::Chinese,
    ///     cpf_applicable: true,
    ///     pr_start_date: None,
    ///     full_rate_agreed: false,
    ///     basic_salary: Decimal::new(320000, 2),
    ///     fixed_allowance: Decimal::ZERO,
    ///     custom_allowances: BTreeMap::new(),
    ///     custom_deductions: BTreeMap::new(),
    ///     weekly_hours: Decimal::new(44, 0),
    ///     daily_hours: Decimal::new(8, 0),
    ///     working_days_per_week: 5,
    ///     rest_day: Weekday::Sun,
    ///     grade: "executive".to_string(),
    /// };
    /// assert!(profile.is_cpf_member());
    /// ```
    pub fn is_cpf_member(&self) -> bool {
        self.cpf_applicable && self.residency != ResidencyStatus::Foreigner
    }

    /// Returns the sum of the fixed allowance and all custom allowances.
    pub fn allowance_total(&self) -> Decimal {
        self.fixed_allowance + self.custom_allowances.values().copied().sum::<Decimal>()
    }

    /// Returns the sum of all custom deductions.
    pub fn deduction_total(&self) -> Decimal {
        self.custom_deductions.values().copied().sum::<Decimal>()
    }
}
