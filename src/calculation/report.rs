//! Monthly payroll report building.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::CompanyMetadata;
use crate::models::{PayrollReport, PayrollSummary};

/// Report type used when the caller does not name one.
pub const DEFAULT_REPORT_TYPE: &str = "payroll";

/// Packages a payroll summary as a storable report.
///
/// The payload holds the company header, totals, the per-employee breakdown
/// and any warnings raised during the run.
pub fn build_payroll_report(
    summary: &PayrollSummary,
    company: &CompanyMetadata,
    report_type: &str,
    generated_at: DateTime<Utc>,
) -> PayrollReport {
    let data = serde_json::json!({
        "company": company.name,
        "currency": company.currency,
        "totals": {
            "payroll": summary.total_payroll.to_string(),
            "transit": summary.total_transit.to_string(),
            "cost": summary.total_cost().to_string()
        },
        "per_employee": summary.per_employee,
        "employees": summary.breakdown,
        "warnings": summary.audit_trace.warnings
    });

    PayrollReport {
        id: Uuid::new_v4(),
        reference_month: summary.reference_month,
        report_type: report_type.to_string(),
        data,
        generated_at,
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
    }
}
