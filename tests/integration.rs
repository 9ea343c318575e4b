//! Comprehensive integration tests for the payroll engine.
//!
//! This test suite exercises the HTTP API end to end, covering:
//! - Ordinary month payslips (CPF, SDL, SHG, net pay)
//! - Rest-day and public-holiday overtime classification
//! - Late-arrival penalties
//! - The 50%-of-gross statutory deduction cap
//! - Leave proration (probation, vesting, medical schedules)
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/sg").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn field_decimal(value: &Value, field: &str) -> Decimal {
    Decimal::from_str(value[field].as_str().unwrap_or_else(|| {
        panic!("field {} missing or not a string: {}", field, value[field])
    }))
    .unwrap()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn create_profile() -> Value {
    json!({
        "id": "emp_001",
        "date_of_birth": "1990-06-15",
        "date_joined": "2022-06-01",
        "residency": "citizen",
        "race": "chinese",
        "cpf_applicable": true,
        "basic_salary": "3200.00",
        "fixed_allowance": "300.00",
        "weekly_hours": "44",
        "daily_hours": "8",
        "working_days_per_week": 5,
        "rest_day": "Sunday",
        "grade": "executive"
    })
}

fn create_period() -> Value {
    json!({
        "entity": "acme_sg",
        "year": 2025,
        "month": 8,
        "public_holidays": [
            { "date": "2025-08-09", "name": "National Day" }
        ]
    })
}

fn create_shift() -> Value {
    json!({
        "id": "day",
        "start_time": "09:00:00",
        "end_time": "18:00:00",
        "late_grace_minutes": 15,
        "late_block_minutes": 15,
        "early_grace_minutes": 15,
        "early_block_minutes": 15,
        "performance_multiplier": "1.0"
    })
}

fn attendance_day(date: &str, clock_in: &str, clock_out: &str) -> Value {
    json!({
        "date": date,
        "clock_in": clock_in,
        "clock_out": clock_out,
        "shift_id": "day"
    })
}

fn payslip_request(profile: Value, attendance: Vec<Value>) -> Value {
    json!({
        "profile": profile,
        "period": create_period(),
        "shift": create_shift(),
        "attendance": attendance
    })
}

// =============================================================================
// Payslip: ordinary month
// =============================================================================

#[tokio::test]
async fn test_payslip_no_attendance_basic_statutory() {
    let router = create_router_for_test();
    let (status, body) = post_json(router, "/payslip", payslip_request(create_profile(), vec![])).await;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(field_decimal(&body, "gross_pay"), decimal("3500.00"));

    // OW 3500 at full rates under 55: employee 20%, employer 17%.
    let cpf = &body["cpf"];
    assert_eq!(field_decimal(cpf, "employee"), decimal("700"));
    assert_eq!(field_decimal(cpf, "employer"), decimal("595"));

    assert_eq!(field_decimal(&body, "sdl"), decimal("8.75"));
    assert_eq!(body["shg_fund"], "CDAC");
    assert_eq!(field_decimal(&body, "shg_amount"), decimal("1.00"));
    assert_eq!(field_decimal(&body, "net_pay"), decimal("2799.00"));
    assert!(body["compliance_notes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_payslip_ordinary_day_no_overtime() {
    let router = create_router_for_test();
    let request = payslip_request(
        create_profile(),
        vec![attendance_day("2025-08-13", "09:00:00", "18:00:00")],
    );
    let (status, body) = post_json(router, "/payslip", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field_decimal(&body, "overtime_pay_1_5"), decimal("0.00"));
    assert_eq!(field_decimal(&body, "overtime_pay_2_0"), decimal("0.00"));
    assert_eq!(field_decimal(&body, "gross_pay"), decimal("3500.00"));
}

#[tokio::test]
async fn test_cpf_allocations_reconcile_with_total() {
    let router = create_router_for_test();
    let request = payslip_request(
        create_profile(),
        vec![
            attendance_day("2025-08-10", "08:00:00", "18:00:00"), // rest day
            attendance_day("2025-08-09", "08:00:00", "19:00:00"), // public holiday
        ],
    );
    let (status, body) = post_json(router, "/payslip", request).await;

    assert_eq!(status, StatusCode::OK);
    let cpf = &body["cpf"];
    let total = field_decimal(cpf, "employer") + field_decimal(cpf, "employee");
    let allocated = field_decimal(cpf, "ordinary_account")
        + field_decimal(cpf, "special_account")
        + field_decimal(cpf, "medisave_account");
    assert_eq!(allocated, total);
}

// =============================================================================
// Payslip: day-type classification
// =============================================================================

#[tokio::test]
async fn test_rest_day_work_paid_entirely_at_double_time() {
    let router = create_router_for_test();
    // Sunday 2025-08-10, 10 punched hours minus the 1-hour break: 9 hours,
    // all at 2.0x, none at normal time.
    let request = payslip_request(
        create_profile(),
        vec![attendance_day("2025-08-10", "08:00:00", "18:00:00")],
    );
    let (status, body) = post_json(router, "/payslip", request).await;

    assert_eq!(status, StatusCode::OK);
    // Hourly base 12 x 3200 / (52 x 44) = 16.7832...; 9h x 2.0 = 302.10.
    assert_eq!(field_decimal(&body, "overtime_pay_2_0"), decimal("302.10"));
    assert_eq!(field_decimal(&body, "overtime_pay_1_5"), decimal("0.00"));
    assert_eq!(field_decimal(&body, "public_holiday_pay"), decimal("0.00"));
}

#[tokio::test]
async fn test_public_holiday_work_first_eight_hours_flagged() {
    let router = create_router_for_test();
    // Saturday 2025-08-09 is National Day: 10 worked hours split into
    // 8 PH-flagged normal hours and 2 at 2.0x.
    let request = payslip_request(
        create_profile(),
        vec![attendance_day("2025-08-09", "08:00:00", "19:00:00")],
    );
    let (status, body) = post_json(router, "/payslip", request).await;

    assert_eq!(status, StatusCode::OK);
    // 8h x 16.7832... = 134.27; 2h x 2.0 x 16.7832... = 67.13.
    assert_eq!(field_decimal(&body, "public_holiday_pay"), decimal("134.27"));
    assert_eq!(field_decimal(&body, "overtime_pay_2_0"), decimal("67.13"));
    assert_eq!(field_decimal(&body, "overtime_pay_1_5"), decimal("0.00"));
}

#[tokio::test]
async fn test_weekday_overtime_at_one_and_half() {
    let router = create_router_for_test();
    // Wednesday, 12 punched hours minus break = 11 worked: 8 normal + 3 OT.
    let request = payslip_request(
        create_profile(),
        vec![attendance_day("2025-08-13", "09:00:00", "21:00:00")],
    );
    let (status, body) = post_json(router, "/payslip", request).await;

    assert_eq!(status, StatusCode::OK);
    // 3h x 1.5 x 16.7832... = 75.52.
    assert_eq!(field_decimal(&body, "overtime_pay_1_5"), decimal("75.52"));
}

#[tokio::test]
async fn test_late_arrival_penalty_rounds_to_block() {
    let router = create_router_for_test();
    // 16 minutes late with grace 15 and block 15 rounds up to 30 minutes.
    let request = payslip_request(
        create_profile(),
        vec![attendance_day("2025-08-13", "09:16:00", "18:00:00")],
    );
    let (status, body) = post_json(router, "/payslip", request).await;

    assert_eq!(status, StatusCode::OK);
    // Half an hour at the hourly base: 8.39.
    assert_eq!(field_decimal(&body, "attendance_deduction"), decimal("8.39"));
    assert_eq!(
        field_decimal(&body, "net_pay"),
        decimal("3500.00") - decimal("700") - decimal("1.00") - decimal("8.39")
    );
}

// =============================================================================
// Payslip: deduction cap
// =============================================================================

#[tokio::test]
async fn test_deduction_cap_clamps_to_exactly_half_gross() {
    let router = create_router_for_test();
    let mut profile = create_profile();
    profile["basic_salary"] = json!("5000.00");
    profile["cpf_applicable"] = json!(false);
    profile["custom_deductions"] = json!({
        "company_loan": "2400.00",
        "equipment": "600.00"
    });

    let (status, body) = post_json(router, "/payslip", payslip_request(profile, vec![])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field_decimal(&body, "gross_pay"), decimal("5300.00"));
    assert_eq!(field_decimal(&body, "total_deductions"), decimal("2650.00"));
    assert_eq!(field_decimal(&body, "net_pay"), decimal("2650.00"));

    let notes = body["compliance_notes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].as_str().unwrap().contains("50%"));
}

#[tokio::test]
async fn test_statutory_deductions_survive_the_cap() {
    let router = create_router_for_test();
    let mut profile = create_profile();
    profile["basic_salary"] = json!("5000.00");
    profile["cpf_applicable"] = json!(false);
    profile["custom_deductions"] = json!({ "company_loan": "4000.00" });

    let (status, body) = post_json(router, "/payslip", payslip_request(profile, vec![])).await;

    assert_eq!(status, StatusCode::OK);
    // The SHG amount is untouched; only the loan is clamped.
    assert_eq!(field_decimal(&body, "shg_amount"), decimal("2.00"));
    let loan = field_decimal(&body["deductions"][0], "amount");
    assert_eq!(loan + decimal("2.00"), decimal("2650.00"));
}

#[tokio::test]
async fn test_small_deductions_are_not_clamped() {
    let router = create_router_for_test();
    let mut profile = create_profile();
    profile["custom_deductions"] = json!({ "equipment": "50.00" });

    let (status, body) = post_json(router, "/payslip", payslip_request(profile, vec![])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field_decimal(&body["deductions"][0], "amount"), decimal("50.00"));
    assert!(body["compliance_notes"].as_array().unwrap().is_empty());
}

// =============================================================================
// Payslip: gross reconciliation
// =============================================================================

#[tokio::test]
async fn test_gross_pay_reconciles_with_line_items() {
    let router = create_router_for_test();
    let mut request = payslip_request(
        create_profile(),
        vec![
            attendance_day("2025-08-09", "08:00:00", "19:00:00"),
            attendance_day("2025-08-10", "08:00:00", "18:00:00"),
            attendance_day("2025-08-13", "09:00:00", "21:00:00"),
        ],
    );
    request["bonus"] = json!("500.00");
    request["unpaid_leave_days"] = json!("1");

    let (status, body) = post_json(router, "/payslip", request).await;

    assert_eq!(status, StatusCode::OK);
    let allowances: Decimal = body["allowances"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| field_decimal(item, "amount"))
        .sum();
    let reconstructed = field_decimal(&body, "basic_salary")
        + allowances
        + field_decimal(&body, "overtime_pay_1_5")
        + field_decimal(&body, "overtime_pay_2_0")
        + field_decimal(&body, "public_holiday_pay")
        + field_decimal(&body, "performance_allowance")
        + field_decimal(&body, "bonus")
        - field_decimal(&body, "unpaid_leave_deduction");

    assert_eq!(field_decimal(&body, "gross_pay"), reconstructed);
}

#[tokio::test]
async fn test_unpaid_leave_deducted_at_gross_daily_rate() {
    let router = create_router_for_test();
    let mut request = payslip_request(create_profile(), vec![]);
    request["unpaid_leave_days"] = json!("2");

    let (status, body) = post_json(router, "/payslip", request).await;

    assert_eq!(status, StatusCode::OK);
    // (3200 + 300) / 21 working days x 2 = 333.33.
    assert_eq!(
        field_decimal(&body, "unpaid_leave_deduction"),
        decimal("333.33")
    );
    assert_eq!(field_decimal(&body, "gross_pay"), decimal("3166.67"));
}

// =============================================================================
// Payslip: residency variants
// =============================================================================

#[tokio::test]
async fn test_foreigner_payslip_has_no_cpf_or_shg() {
    let router = create_router_for_test();
    let mut profile = create_profile();
    profile["residency"] = json!("foreigner");

    let (status, body) = post_json(router, "/payslip", payslip_request(profile, vec![])).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["cpf"].is_null());
    assert_eq!(body["shg_fund"], "N/A");
    assert_eq!(field_decimal(&body, "shg_amount"), decimal("0"));
    // SDL remains an employer obligation.
    assert_eq!(field_decimal(&body, "sdl"), decimal("8.75"));
    assert_eq!(field_decimal(&body, "net_pay"), decimal("3500.00"));
}

#[tokio::test]
async fn test_first_year_pr_pays_graduated_rates() {
    let router = create_router_for_test();
    let mut profile = create_profile();
    profile["residency"] = json!("permanent_resident");
    profile["pr_start_date"] = json!("2025-01-10");

    let (status, body) = post_json(router, "/payslip", payslip_request(profile, vec![])).await;

    assert_eq!(status, StatusCode::OK);
    let cpf = &body["cpf"];
    // Graduated first-year rates on OW 3500: 4% employer, 5% employee.
    assert_eq!(field_decimal(cpf, "employer"), decimal("140"));
    assert_eq!(field_decimal(cpf, "employee"), decimal("175"));
}

#[tokio::test]
async fn test_indian_employee_contributes_to_sinda() {
    let router = create_router_for_test();
    let mut profile = create_profile();
    profile["race"] = json!("indian");

    let (status, body) = post_json(router, "/payslip", payslip_request(profile, vec![])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shg_fund"], "SINDA");
    // SINDA tier for wages 3500: 7.00.
    assert_eq!(field_decimal(&body, "shg_amount"), decimal("7.00"));
}

// =============================================================================
// Leave balance endpoint
// =============================================================================

#[tokio::test]
async fn test_annual_leave_probation_earns_nothing() {
    let router = create_router_for_test();
    let request = json!({
        "employee_id": "emp_001",
        "leave_type": "annual",
        "date_joined": "2025-03-01",
        "grade_annual_days": "14",
        "as_of": "2025-05-01"
    });

    let (status, body) = post_json(router, "/leave/balance", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field_decimal(&body, "earned"), decimal("0"));
    assert_eq!(field_decimal(&body, "balance"), decimal("0"));
}

#[tokio::test]
async fn test_annual_leave_vests_at_three_months() {
    let router = create_router_for_test();
    let request = json!({
        "employee_id": "emp_001",
        "leave_type": "annual",
        "date_joined": "2025-02-01",
        "grade_annual_days": "14",
        "as_of": "2025-05-01"
    });

    let (status, body) = post_json(router, "/leave/balance", request).await;

    assert_eq!(status, StatusCode::OK);
    // 3/12 of the 14-day entitlement, rounded to the nearest half day.
    assert_eq!(field_decimal(&body, "earned"), decimal("3.5"));
}

#[tokio::test]
async fn test_annual_leave_balance_subtracts_taken() {
    let router = create_router_for_test();
    let request = json!({
        "employee_id": "emp_001",
        "leave_type": "annual",
        "date_joined": "2022-06-01",
        "grade_annual_days": "14",
        "taken": "2",
        "as_of": "2025-06-30"
    });

    let (status, body) = post_json(router, "/leave/balance", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field_decimal(&body, "entitled"), decimal("14"));
    // 5 completed months: 14 x 5/12 rounded to 0.5 = 6; minus 2 taken.
    assert_eq!(field_decimal(&body, "earned"), decimal("6"));
    assert_eq!(field_decimal(&body, "balance"), decimal("4"));
}

#[tokio::test]
async fn test_medical_leave_follows_service_schedule() {
    let router = create_router_for_test();
    let request = json!({
        "employee_id": "emp_001",
        "leave_type": "medical",
        "date_joined": "2025-01-01",
        "grade_annual_days": "14",
        "as_of": "2025-05-01"
    });

    let (status, body) = post_json(router, "/leave/balance", request).await;

    assert_eq!(status, StatusCode::OK);
    // 4 completed service months earn 8 medical days.
    assert_eq!(field_decimal(&body, "earned"), decimal("8"));
    assert_eq!(field_decimal(&body, "entitled"), decimal("14"));
}

#[tokio::test]
async fn test_hospitalization_leave_follows_service_schedule() {
    let router = create_router_for_test();
    let request = json!({
        "employee_id": "emp_001",
        "leave_type": "hospitalization",
        "date_joined": "2025-01-01",
        "grade_annual_days": "14",
        "as_of": "2025-05-01"
    });

    let (status, body) = post_json(router, "/leave/balance", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field_decimal(&body, "earned"), decimal("30"));
    assert_eq!(field_decimal(&body, "entitled"), decimal("60"));
}

// =============================================================================
// Tax estimate endpoint
// =============================================================================

#[tokio::test]
async fn test_resident_tax_zero_at_twenty_thousand() {
    let router = create_router_for_test();
    let request = json!({
        "annual_income": "20000",
        "residency": "resident",
        "year": 2025
    });

    let (status, body) = post_json(router, "/tax/estimate", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field_decimal(&body, "annual_tax"), decimal("0"));
    assert_eq!(field_decimal(&body, "monthly_tax"), decimal("0"));
}

#[tokio::test]
async fn test_resident_tax_mid_bracket() {
    let router = create_router_for_test();
    let request = json!({
        "annual_income": "60000",
        "residency": "resident",
        "year": 2025
    });

    let (status, body) = post_json(router, "/tax/estimate", request).await;

    assert_eq!(status, StatusCode::OK);
    // 550 at the 40000 floor plus 7% of the 20000 above it.
    assert_eq!(field_decimal(&body, "annual_tax"), decimal("1950.00"));
    assert_eq!(field_decimal(&body, "monthly_tax"), decimal("162.50"));
    assert_eq!(field_decimal(&body, "effective_rate"), decimal("0.0325"));
}

#[tokio::test]
async fn test_non_resident_tax_flat_rate_floor() {
    let router = create_router_for_test();
    let request = json!({
        "annual_income": "60000",
        "residency": "non_resident",
        "year": 2025
    });

    let (status, body) = post_json(router, "/tax/estimate", request).await;

    assert_eq!(status, StatusCode::OK);
    // Flat 15% of 60000 beats the progressive 1950.
    assert_eq!(field_decimal(&body, "annual_tax"), decimal("9000.00"));
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_bad_request() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payslip")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field_returns_validation_error() {
    let router = create_router_for_test();
    let request = json!({
        "period": create_period(),
        "shift": create_shift(),
        "attendance": []
    });

    let (status, body) = post_json(router, "/payslip", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_period_before_rate_tables_is_rejected() {
    let router = create_router_for_test();
    let mut request = payslip_request(create_profile(), vec![]);
    request["period"]["year"] = json!(1990);

    let (status, body) = post_json(router, "/payslip", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "RATE_TABLE_NOT_FOUND");
}

#[tokio::test]
async fn test_zero_weekly_hours_is_rejected() {
    let router = create_router_for_test();
    let mut profile = create_profile();
    profile["weekly_hours"] = json!("0");

    let (status, body) = post_json(router, "/payslip", payslip_request(profile, vec![])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PROFILE");
}
