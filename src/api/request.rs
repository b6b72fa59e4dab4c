//! Request types for the Payroll Engine API.
//!
//! This module defines the JSON request bodies accepted by the payroll,
//! dashboard and report endpoints.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Absence, Employee};

/// Largest salary or fare accepted in a request.
pub const MAX_MONEY_AMOUNT: i64 = 1_000_000_000;

/// Request body for `/payroll` and `/dashboard`.
///
/// Carries the snapshot of store rows to compute over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Employee rows.
    pub employees: Vec<Employee>,
    /// Absence rows, any month.
    #[serde(default)]
    pub absences: Vec<Absence>,
    /// Reference date; today's UTC date when omitted.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl PayrollRequest {
    /// The reference date for the computation.
    pub fn reference_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Rejects rows the calculator would silently misread.
    ///
    /// Empty identifiers and money amounts outside `0..=MAX_MONEY_AMOUNT`
    /// are refused here rather than degraded to zero, since they point at a
    /// broken upstream row.
    pub fn validate(&self) -> EngineResult<()> {
        for employee in &self.employees {
            if employee.id.trim().is_empty() {
                return Err(EngineError::InvalidEmployee {
                    field: "id".to_string(),
                    message: format!("employee '{}' has an empty id", employee.name),
                });
            }
            check_amount("monthly_base_salary", employee.monthly_base_salary)?;
            check_amount("daily_transit_fare", employee.daily_transit_fare)?;
        }

        for absence in &self.absences {
            if absence.employee_id.trim().is_empty() {
                return Err(EngineError::InvalidAbsence {
                    absence_id: absence.id.clone(),
                    message: "employee_id is empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn check_amount(field: &str, value: Option<Decimal>) -> EngineResult<()> {
    let message = match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => {
            format!("cannot be negative (got {})", v)
        }
        Some(v) if v > Decimal::from(MAX_MONEY_AMOUNT) => {
            format!("cannot exceed {} (got {})", MAX_MONEY_AMOUNT, v)
        }
        _ => return Ok(()),
    };
    Err(EngineError::InvalidEmployee {
        field: field.to_string(),
        message,
    })
}

/// Request body for `/reports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The snapshot to report on.
    #[serde(flatten)]
    pub payroll: PayrollRequest,
    /// Report kind; defaults to "payroll".
    #[serde(default)]
    pub report_type: Option<String>,
}
