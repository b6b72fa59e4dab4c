//! Integration tests for the Payroll Engine.
//!
//! These drive the HTTP router end to end and cover:
//! - Absence deductions under both deduction policies
//! - Inactive employees and transit scope
//! - Month boundaries and justified absences
//! - The business-day deduction cutoff
//! - Store column aliases
//! - Dashboard and report endpoints
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
use payroll_engine::config::{
    CompanyMetadata, ConfigLoader, DeductionPolicy, PayrollPolicy, TransitPolicy, TransitScope,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn create_router_with_policy(policy: PayrollPolicy) -> Router {
    let company = CompanyMetadata {
        name: "Conservadora Teste".to_string(),
        currency: "BRL".to_string(),
    };
    let config = ConfigLoader::from_policy(company, policy).expect("Invalid policy");
    create_router(AppState::new(config))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
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

fn employee(id: &str, status: &str, salary: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Funcionaria {}", id),
        "status": status,
        "monthly_base_salary": salary
    })
}

fn absence(employee_id: &str, date: &str, justified: bool) -> Value {
    json!({
        "id": format!("abs_{}_{}", employee_id, date),
        "employee_id": employee_id,
        "date": date,
        "justified": justified
    })
}

fn snapshot(employees: Vec<Value>, absences: Vec<Value>, today: &str) -> Value {
    json!({
        "employees": employees,
        "absences": absences,
        "today": today
    })
}

fn assert_decimal(value: &Value, expected: &str) {
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("Expected a decimal string, got {}", value));
    assert_eq!(
        decimal(actual),
        decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

fn warning_codes(result: &Value) -> Vec<String> {
    result["audit_trace"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Absence Deductions
// =============================================================================

#[tokio::test]
async fn test_no_absences_pays_full_salary() {
    let body = snapshot(vec![employee("emp_001", "active", "3000.00")], vec![], "2024-09-20");

    let (status, result) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["reference_month"], "2024-09");
    assert_decimal(&result["per_employee"]["emp_001"], "3000");
    assert_decimal(&result["total_payroll"], "3000");
}

#[tokio::test]
async fn test_two_unjustified_absences_daily_rate() {
    let body = snapshot(
        vec![employee("emp_001", "active", "3000.00")],
        vec![
            absence("emp_001", "2024-09-10", false),
            absence("emp_001", "2024-09-11", false),
        ],
        "2024-09-20",
    );

    let (status, result) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["per_employee"]["emp_001"], "2800");
    assert_decimal(&result["total_payroll"], "2800");

    let row = &result["breakdown"][0];
    assert_eq!(row["unjustified_absences"], 2);
    assert_decimal(&row["deduction"], "200");
}

#[tokio::test]
async fn test_two_unjustified_absences_double_rate() {
    let router = create_router_with_policy(PayrollPolicy {
        deduction_policy: DeductionPolicy::DoubleRate,
        ..PayrollPolicy::default()
    });
    let body = snapshot(
        vec![employee("emp_001", "active", "3000.00")],
        vec![
            absence("emp_001", "2024-09-10", false),
            absence("emp_001", "2024-09-11", false),
        ],
        "2024-09-20",
    );

    let (status, result) = post_json(router, "/payroll", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["per_employee"]["emp_001"], "2600");
    assert_decimal(&result["total_payroll"], "2600");
}

#[tokio::test]
async fn test_justified_absences_never_reduce_pay() {
    let body = snapshot(
        vec![employee("emp_001", "active", "3000.00")],
        vec![
            absence("emp_001", "2024-09-10", true),
            absence("emp_001", "2024-09-11", true),
            absence("emp_001", "2024-09-12", false),
        ],
        "2024-09-20",
    );

    let (_, result) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_decimal(&result["per_employee"]["emp_001"], "2900");
}

#[tokio::test]
async fn test_absences_outside_reference_month_are_ignored() {
    let body = snapshot(
        vec![employee("emp_001", "active", "3000.00")],
        vec![
            absence("emp_001", "2024-08-31", false),
            absence("emp_001", "2024-10-01", false),
            absence("emp_001", "2023-09-15", false),
        ],
        "2024-09-20",
    );

    let (_, result) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_decimal(&result["per_employee"]["emp_001"], "3000");
}

#[tokio::test]
async fn test_adjusted_pay_never_goes_negative() {
    let router = create_router_with_policy(PayrollPolicy {
        deduction_policy: DeductionPolicy::DoubleRate,
        ..PayrollPolicy::default()
    });
    let absences = (1..=20)
        .map(|day| absence("emp_001", &format!("2024-09-{:02}", day), false))
        .collect();
    let body = snapshot(vec![employee("emp_001", "active", "3000")], absences, "2024-09-30");

    let (_, result) = post_json(router, "/payroll", body).await;

    // 20 * 2 * 100 exceeds the salary
    assert_decimal(&result["per_employee"]["emp_001"], "0");
    assert_decimal(&result["breakdown"][0]["deduction"], "4000");
}

// =============================================================================
// Employee Status and Transit
// =============================================================================

#[tokio::test]
async fn test_inactive_employee_contributes_nothing() {
    let mut inactive = employee("emp_002", "inactive", "2500.00");
    inactive["weekly_hours"] = json!(44);
    inactive["daily_transit_fare"] = json!("9.00");

    let body = snapshot(
        vec![employee("emp_001", "active", "3000.00"), inactive],
        vec![absence("emp_002", "2024-09-10", false)],
        "2024-09-20",
    );

    let (_, result) = post_json(create_router_for_test(), "/payroll", body).await;

    assert!(result["per_employee"].get("emp_002").is_none());
    assert_decimal(&result["total_payroll"], "3000");
    assert_decimal(&result["total_transit"], "0");

    let row = result["breakdown"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["employee_id"] == "emp_002")
        .unwrap();
    assert_eq!(row["counts_towards_payroll"], false);
    assert_eq!(row["counts_towards_transit"], false);
    assert_decimal(&row["transit_cost"], "222.75");
}

#[tokio::test]
async fn test_transit_weekly_hours() {
    let mut worker = employee("emp_001", "active", "3000.00");
    worker["weekly_hours"] = json!(44);
    worker["daily_transit_fare"] = json!("9.00");

    let body = snapshot(vec![worker], vec![], "2024-09-20");
    let (_, result) = post_json(create_router_for_test(), "/payroll", body).await;

    // 9.00 * 44 / 8 * 4.5
    assert_decimal(&result["total_transit"], "222.75");
}

#[tokio::test]
async fn test_transit_monthly_passes_all_employees() {
    let router = create_router_with_policy(PayrollPolicy {
        transit_policy: TransitPolicy::MonthlyPasses,
        transit_scope: TransitScope::AllEmployees,
        ..PayrollPolicy::default()
    });

    let mut active = employee("emp_001", "active", "3000.00");
    active["monthly_transit_passes"] = json!(44);
    active["daily_transit_fare"] = json!("4.40");
    let mut inactive = employee("emp_002", "inactive", "2500.00");
    inactive["monthly_transit_passes"] = json!(10);
    inactive["daily_transit_fare"] = json!("5.00");

    let body = snapshot(vec![active, inactive], vec![], "2024-09-20");
    let (_, result) = post_json(router, "/payroll", body).await;

    // 44 * 4.40 + 10 * 5.00
    assert_decimal(&result["total_transit"], "243.60");
    assert_decimal(&result["total_payroll"], "3000");
}

#[tokio::test]
async fn test_missing_salary_counts_as_zero_with_warning() {
    let body = snapshot(
        vec![json!({ "id": "emp_001", "name": "Sem Salario", "status": "active" })],
        vec![absence("emp_001", "2024-09-10", false)],
        "2024-09-20",
    );

    let (status, result) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["per_employee"]["emp_001"], "0");
    assert!(warning_codes(&result).contains(&"MISSING_BASE_SALARY".to_string()));
}

// =============================================================================
// Snapshot Anomalies
// =============================================================================

#[tokio::test]
async fn test_duplicate_employee_last_row_wins() {
    let body = snapshot(
        vec![
            employee("emp_001", "active", "3000.00"),
            employee("emp_001", "active", "3300.00"),
        ],
        vec![],
        "2024-09-20",
    );

    let (_, result) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_decimal(&result["per_employee"]["emp_001"], "3300");
    assert_decimal(&result["total_payroll"], "3300");
    assert_eq!(result["breakdown"].as_array().unwrap().len(), 1);
    assert!(warning_codes(&result).contains(&"DUPLICATE_EMPLOYEE_ID".to_string()));
}

#[tokio::test]
async fn test_orphan_absence_is_ignored_with_warning() {
    let body = snapshot(
        vec![employee("emp_001", "active", "3000.00")],
        vec![absence("emp_999", "2024-09-10", false)],
        "2024-09-20",
    );

    let (_, result) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_decimal(&result["total_payroll"], "3000");
    assert!(warning_codes(&result).contains(&"ORPHAN_ABSENCE".to_string()));
}

#[tokio::test]
async fn test_empty_snapshot() {
    let body = snapshot(vec![], vec![], "2024-09-20");

    let (status, result) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["per_employee"].as_object().unwrap().is_empty());
    assert_decimal(&result["total_payroll"], "0");
    assert_decimal(&result["total_transit"], "0");
}

#[tokio::test]
async fn test_store_column_aliases() {
    let body = json!({
        "employees": [{
            "id": "emp_001",
            "nome": "Maria Silva",
            "cpf": "123.456.789-00",
            "status": "Ativa",
            "salario_base": "3000.00",
            "horas_semanais": 40,
            "valor_passagem": "10.00"
        }, {
            "id": "emp_002",
            "nome": "Ana Souza",
            "status": "Inativa",
            "salario_base": "2000.00"
        }],
        "absences": [{
            "id": "abs_001",
            "id_funcionaria": "emp_001",
            "data": "2024-09-10",
            "justificativa": false,
            "motivo": "Nao compareceu"
        }],
        "today": "2024-09-20"
    });

    let (status, result) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["per_employee"]["emp_001"], "2900");
    assert!(result["per_employee"].get("emp_002").is_none());
    assert_decimal(&result["total_transit"], "225");
}

// =============================================================================
// Business-Day Cutoff
// =============================================================================

#[tokio::test]
async fn test_deductions_deferred_until_fifth_business_day() {
    let policy = PayrollPolicy {
        deduction_cutoff_business_day: Some(5),
        ..PayrollPolicy::default()
    };
    let employees = vec![employee("emp_001", "active", "3000.00")];
    let absences = vec![absence("emp_001", "2024-09-02", false)];

    // 2024-09-06 is the 5th weekday of September 2024
    let on_cutoff = snapshot(employees.clone(), absences.clone(), "2024-09-06");
    let router = create_router_with_policy(policy.clone());
    let (_, before) = post_json(router, "/payroll", on_cutoff).await;
    assert_decimal(&before["per_employee"]["emp_001"], "3000");

    let after_cutoff = snapshot(employees, absences, "2024-09-07");
    let (_, after) = post_json(create_router_with_policy(policy), "/payroll", after_cutoff).await;
    assert_decimal(&after["per_employee"]["emp_001"], "2900");

    let cutoff_step = after["audit_trace"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["rule_id"] == "deduction_cutoff")
        .unwrap();
    assert_eq!(cutoff_step["output"]["cutoff_date"], "2024-09-06");
    assert_eq!(cutoff_step["output"]["deductions_apply"], true);
}

// =============================================================================
// Audit Trace
// =============================================================================

#[tokio::test]
async fn test_audit_trace_records_rules() {
    let mut worker = employee("emp_001", "active", "3000.00");
    worker["weekly_hours"] = json!(44);
    worker["daily_transit_fare"] = json!("9.00");

    let body = snapshot(
        vec![worker, employee("emp_002", "inactive", "2500.00")],
        vec![absence("emp_001", "2024-09-10", false)],
        "2024-09-20",
    );

    let (_, result) = post_json(create_router_for_test(), "/payroll", body).await;

    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    let rule_ids: Vec<&str> = steps.iter().map(|s| s["rule_id"].as_str().unwrap()).collect();
    assert!(rule_ids.contains(&"transit_cost"));
    assert!(rule_ids.contains(&"absence_deduction"));
    assert!(rule_ids.contains(&"employee_status"));

    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step["step_number"], (i + 1) as u64);
    }
}

#[tokio::test]
async fn test_identical_requests_yield_identical_summaries() {
    let body = snapshot(
        vec![
            employee("emp_002", "active", "2000.00"),
            employee("emp_001", "active", "3000.00"),
        ],
        vec![
            absence("emp_001", "2024-09-10", false),
            absence("ghost", "2024-09-11", false),
        ],
        "2024-09-20",
    );

    let (_, first) = post_json(create_router_for_test(), "/payroll", body.clone()).await;
    let (_, second) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_eq!(first, second);
}

// =============================================================================
// Dashboard and Reports
// =============================================================================

#[tokio::test]
async fn test_dashboard_counters() {
    let body = snapshot(
        vec![
            employee("emp_001", "active", "3000.00"),
            employee("emp_002", "active", "2000.00"),
            employee("emp_003", "inactive", "2500.00"),
        ],
        vec![
            absence("emp_001", "2024-09-10", false),
            absence("emp_002", "2024-09-11", true),
            absence("emp_003", "2024-09-12", false),
            absence("emp_001", "2024-08-12", false),
        ],
        "2024-09-20",
    );

    let (status, stats) = post_json(create_router_for_test(), "/dashboard", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["reference_month"], "2024-09");
    assert_eq!(stats["total_employees"], 3);
    assert_eq!(stats["active_employees"], 2);
    assert_eq!(stats["absences_this_month"], 3);
    assert_eq!(stats["unjustified_absences_this_month"], 2);
    assert_decimal(&stats["total_payroll"], "4900");
}

#[tokio::test]
async fn test_report_generation() {
    let mut body = snapshot(
        vec![employee("emp_001", "active", "3000.00")],
        vec![absence("emp_001", "2024-09-10", false)],
        "2024-09-20",
    );
    body["report_type"] = json!("monthly_close");

    let (status, report) = post_json(create_router_for_test(), "/reports", body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["report_type"], "monthly_close");
    assert_eq!(report["reference_month"], "2024-09");
    assert_eq!(report["engine_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(report["data"]["currency"], "BRL");
    assert_decimal(&report["data"]["totals"]["payroll"], "2900");
    assert!(report["id"].as_str().is_some());
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_unknown_status_is_validation_error() {
    let body = snapshot(vec![employee("emp_001", "on_holiday", "3000.00")], vec![], "2024-09-20");

    let (status, error) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_negative_fare_is_rejected() {
    let mut worker = employee("emp_001", "active", "3000.00");
    worker["daily_transit_fare"] = json!("-4.40");

    let body = snapshot(vec![worker], vec![], "2024-09-20");
    let (status, error) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_EMPLOYEE");
    assert!(error["message"].as_str().unwrap().contains("daily_transit_fare"));
}

#[tokio::test]
async fn test_salaries_beyond_limit_are_rejected() {
    let huge = "50000000000000000000000000000";
    let body = snapshot(
        vec![
            employee("emp_001", "active", huge),
            employee("emp_002", "active", huge),
        ],
        vec![],
        "2024-09-20",
    );

    let (status, error) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_EMPLOYEE");
    assert!(error["message"].as_str().unwrap().contains("monthly_base_salary"));
}

#[tokio::test]
async fn test_row_without_status_counts_as_active() {
    let mut worker = employee("emp_001", "active", "3000.00");
    worker.as_object_mut().unwrap().remove("status");

    let body = snapshot(vec![worker], vec![], "2024-09-20");
    let (status, result) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["per_employee"]["emp_001"], "3000");
    assert_eq!(result["breakdown"][0]["status"], "active");
}

#[tokio::test]
async fn test_invalid_date_is_rejected() {
    let body = snapshot(
        vec![employee("emp_001", "active", "3000.00")],
        vec![absence("emp_001", "2024-02-30", false)],
        "2024-09-20",
    );

    let (status, error) = post_json(create_router_for_test(), "/payroll", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}
