//! Payroll Compliance & Attendance-Classification Engine
//!
//! This crate provides the deterministic calculators that turn raw attendance
//! and employment-contract data into a statutory payslip under Singapore
//! employment rules: CPF contributions, SDL, SHG community-fund deductions,
//! progressive income tax, day-type/overtime classification, and prorated
//! leave entitlements.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
