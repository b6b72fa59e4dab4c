//! HTTP request handlers for the Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    DEFAULT_REPORT_TYPE, build_payroll_report, compute_dashboard_stats, compute_monthly_payroll,
};

use super::request::{PayrollRequest, ReportRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", post(payroll_handler))
        .route("/dashboard", post(dashboard_handler))
        .route("/reports", post(report_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for POST /payroll.
///
/// Accepts a snapshot of employees and absences and returns the monthly
/// payroll summary for the month containing the reference date.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match accept(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let summary = compute_monthly_payroll(
        &request.employees,
        &request.absences,
        request.reference_date(),
        state.config().policy(),
    );

    info!(
        correlation_id = %correlation_id,
        reference_month = %summary.reference_month,
        employees = request.employees.len(),
        absences = request.absences.len(),
        total_payroll = %summary.total_payroll,
        total_transit = %summary.total_transit,
        warnings = summary.audit_trace.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Payroll computed"
    );

    json_response(StatusCode::OK, &summary)
}

/// Handler for POST /dashboard.
async fn dashboard_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing dashboard request");

    let request = match accept(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let stats = compute_dashboard_stats(
        &request.employees,
        &request.absences,
        request.reference_date(),
        state.config().policy(),
    );

    info!(
        correlation_id = %correlation_id,
        reference_month = %stats.reference_month,
        active_employees = stats.active_employees,
        duration_us = start_time.elapsed().as_micros(),
        "Dashboard computed"
    );

    json_response(StatusCode::OK, &stats)
}

/// Handler for POST /reports.
///
/// Computes the payroll and packages it as a report record. The report is
/// returned to the caller, which owns persisting it.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };
    if let Err(err) = request.payroll.validate() {
        warn!(correlation_id = %correlation_id, error = %err, "Request validation failed");
        return ApiErrorResponse::from(err).into_response();
    }

    let report_type = match request.report_type.as_deref().map(str::trim) {
        Some("") => {
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error("report_type cannot be empty"),
            }
            .into_response();
        }
        Some(kind) => kind.to_string(),
        None => DEFAULT_REPORT_TYPE.to_string(),
    };

    let start_time = Instant::now();
    let payroll = &request.payroll;
    let summary = compute_monthly_payroll(
        &payroll.employees,
        &payroll.absences,
        payroll.reference_date(),
        state.config().policy(),
    );
    let report = build_payroll_report(
        &summary,
        state.config().company(),
        &report_type,
        Utc::now(),
    );

    info!(
        correlation_id = %correlation_id,
        report_id = %report.id,
        report_type = %report.report_type,
        reference_month = %report.reference_month,
        duration_us = start_time.elapsed().as_micros(),
        "Report generated"
    );

    json_response(StatusCode::CREATED, &report)
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

/// Handler for GET /health.
async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        &HealthStatus {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

/// Unwraps and validates a payroll request body.
fn accept(
    payload: Result<Json<PayrollRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<PayrollRequest, Response> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return Err(rejection_response(rejection, correlation_id)),
    };

    if let Err(err) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %err, "Request validation failed");
        return Err(ApiErrorResponse::from(err).into_response());
    }

    Ok(request)
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // body_text carries serde's message, including the offending field
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
