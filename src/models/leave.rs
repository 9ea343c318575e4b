//! Leave balance view models.
//!
//! The engine computes [`LeaveBalance`] records on read; the leave-approval
//! workflow (an external collaborator) owns the `taken` figure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The leave types the proration calculator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Annual leave, prorated from statutory minimum and grade policy.
    Annual,
    /// Outpatient medical leave, earned by completed service months.
    Medical,
    /// Hospitalization leave, earned by completed service months.
    Hospitalization,
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveType::Annual => write!(f, "Annual"),
            LeaveType::Medical => write!(f, "Medical"),
            LeaveType::Hospitalization => write!(f, "Hospitalization"),
        }
    }
}

/// A computed leave balance for one (employee, leave type, year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee this balance belongs to.
    pub employee_id: String,
    /// The leave type.
    pub leave_type: LeaveType,
    /// The calendar year the balance applies to.
    pub year: i32,
    /// Prorated full-year entitlement in days.
    pub entitled: Decimal,
    /// Days earned to date (probation-aware).
    pub earned: Decimal,
    /// Days already taken, owned by the leave-approval workflow.
    pub taken: Decimal,
    /// Remaining balance: `max(0, earned - taken)`.
    pub balance: Decimal,
}
