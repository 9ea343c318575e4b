//! HTTP API for the payroll engine.
//!
//! This module provides the axum router, request/response types, and
//! shared application state for the calculation endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{LeaveBalanceRequest, PayslipRequest, TaxEstimateRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
