//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    LeavePolicy, PayslipInput, aggregate_month, annual_leave_balance, calculate_payslip,
    classify_attendance, estimate_tax, medical_leave_balance, resolve_day_type_for_date,
};
use crate::models::LeaveType;

use super::request::{LeaveBalanceRequest, PayslipRequest, TaxEstimateRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslip", post(payslip_handler))
        .route("/leave/balance", post(leave_balance_handler))
        .route("/tax/estimate", post(tax_estimate_handler))
        .with_state(state)
}

/// Handler for the POST /payslip endpoint.
///
/// Classifies the employee's attendance records, aggregates them for the
/// month, and computes the full payslip.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let classified: Vec<_> = request
        .attendance
        .iter()
        .map(|record| {
            let day_type = resolve_day_type_for_date(
                record.date,
                &request.period,
                request.profile.rest_day,
                &request.partial_off_dates,
            );
            classify_attendance(record, &request.shift, day_type, request.profile.daily_hours)
        })
        .collect();

    let input = PayslipInput {
        attendance: aggregate_month(&classified),
        bonus: request.bonus,
        unpaid_leave_days: request.unpaid_leave_days,
        performance_multiplier: request.shift.performance_multiplier,
        ytd_ordinary_wages: request.ytd_ordinary_wages,
    };

    let tables = match state.config().rates().for_year(request.period.year) {
        Ok(tables) => tables,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                year = request.period.year,
                "No rate table for period year"
            );
            let api_error: ApiErrorResponse = err.into();
            return api_error.into_response();
        }
    };

    match calculate_payslip(&request.profile, &request.period, &input, tables) {
        Ok(payslip) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %payslip.employee_id,
                gross_pay = %payslip.gross_pay,
                "Payslip computed"
            );
            (StatusCode::OK, Json(payslip)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Payslip computation failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for the POST /leave/balance endpoint.
///
/// Computes a prorated leave balance as of the requested date.
async fn leave_balance_handler(
    payload: Result<Json<LeaveBalanceRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave balance request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let balance = match request.leave_type {
        LeaveType::Annual => annual_leave_balance(
            &request.employee_id,
            request.date_joined,
            &LeavePolicy {
                annual_days: request.grade_annual_days,
            },
            request.taken,
            request.as_of,
        ),
        LeaveType::Medical | LeaveType::Hospitalization => medical_leave_balance(
            &request.employee_id,
            request.leave_type,
            request.date_joined,
            request.taken,
            request.as_of,
        ),
    };

    info!(
        correlation_id = %correlation_id,
        employee_id = %balance.employee_id,
        leave_type = %balance.leave_type,
        "Leave balance computed"
    );
    (StatusCode::OK, Json(balance)).into_response()
}

/// Handler for the POST /tax/estimate endpoint.
///
/// Estimates annual and monthly tax for an income under the bracket
/// table of the requested year of assessment.
async fn tax_estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxEstimateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax estimate request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let tables = match state.config().rates().for_year(request.year) {
        Ok(tables) => tables,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                year = request.year,
                "No rate table for assessment year"
            );
            let api_error: ApiErrorResponse = err.into();
            return api_error.into_response();
        }
    };

    let estimate = estimate_tax(request.annual_income, request.residency, &tables.tax);

    info!(
        correlation_id = %correlation_id,
        annual_tax = %estimate.annual_tax,
        "Tax estimate computed"
    );
    (StatusCode::OK, Json(estimate)).into_response()
}

/// Maps a JSON extraction rejection to the error response body.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> axum::response::Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
