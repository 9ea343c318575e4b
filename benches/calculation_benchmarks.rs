//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite verifies that the calculation engine meets
//! performance targets:
//! - Payslip with no attendance: < 1ms mean
//! - Payslip with a full month of attendance: < 5ms mean
//! - Leave balance computation: < 1ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/sg").expect("Failed to load config");
    AppState::new(config)
}

/// Creates a payslip request with the given number of attendance days.
fn create_payslip_request(day_count: usize) -> serde_json::Value {
    let attendance: Vec<serde_json::Value> = (1..=day_count.min(28))
        .map(|day| {
            serde_json::json!({
                "date": format!("2025-08-{:02}", day),
                "clock_in": "09:00:00",
                "clock_out": "19:30:00",
                "shift_id": "day"
            })
        })
        .collect();

    serde_json::json!({
        "profile": {
            "id": "emp_bench_001",
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
        },
        "period": {
            "entity": "acme_sg",
            "year": 2025,
            "month": 8,
            "public_holidays": [
                { "date": "2025-08-09", "name": "National Day" }
            ]
        },
        "shift": {
            "id": "day",
            "start_time": "09:00:00",
            "end_time": "18:00:00",
            "late_grace_minutes": 15,
            "late_block_minutes": 15,
            "early_grace_minutes": 15,
            "early_block_minutes": 15,
            "performance_multiplier": "1.0"
        },
        "attendance": attendance,
        "bonus": "500.00"
    })
}

async fn post(router: axum::Router, uri: &str, body: String) -> axum::response::Response {
    router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Benchmark: payslip with no attendance records.
fn bench_payslip_no_attendance(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = create_payslip_request(0).to_string();

    c.bench_function("payslip_no_attendance", |b| {
        b.to_async(&rt).iter(|| async {
            let response = post(router.clone(), "/payslip", body.clone()).await;
            black_box(response)
        })
    });
}

/// Benchmark: payslip with increasing attendance volume.
fn bench_payslip_attendance_volume(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());

    let mut group = c.benchmark_group("payslip_attendance");
    for day_count in [1usize, 10, 22] {
        let body = create_payslip_request(day_count).to_string();
        group.throughput(Throughput::Elements(day_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(day_count),
            &body,
            |b, body| {
                b.to_async(&rt).iter(|| async {
                    let response = post(router.clone(), "/payslip", body.clone()).await;
                    black_box(response)
                })
            },
        );
    }
    group.finish();
}

/// Benchmark: leave balance computation.
fn bench_leave_balance(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "employee_id": "emp_bench_001",
        "leave_type": "annual",
        "date_joined": "2022-06-01",
        "grade_annual_days": "14",
        "taken": "3",
        "as_of": "2025-06-30"
    })
    .to_string();

    c.bench_function("leave_balance", |b| {
        b.to_async(&rt).iter(|| async {
            let response = post(router.clone(), "/leave/balance", body.clone()).await;
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_payslip_no_attendance,
    bench_payslip_attendance_volume,
    bench_leave_balance
);
criterion_main!(benches);
