//! Stored payroll report model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ReferenceMonth;

/// A generated monthly report, in the shape the dashboard stores it.
///
/// `data` is free-form JSON so that report types can evolve without a
/// schema change in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Unique identifier for this report.
    pub id: Uuid,
    /// The month the report covers.
    pub reference_month: ReferenceMonth,
    /// Report kind, e.g. "payroll".
    pub report_type: String,
    /// Report payload.
    pub data: serde_json::Value,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
}
