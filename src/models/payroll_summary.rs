//! Payroll summary models.
//!
//! This module contains the [`PayrollSummary`] type returned by the monthly
//! payroll calculator, the per-employee [`EmployeePayroll`] breakdown, and
//! the audit structures recording every decision the calculator made.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeStatus, ReferenceMonth};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag suspicious input that was tolerated rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Builds a warning from its parts.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a payroll run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// How one employee's figures were derived for the reference month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayroll {
    /// The employee this line belongs to.
    pub employee_id: String,
    /// Employee name, copied for display.
    pub name: String,
    /// Status at snapshot time.
    pub status: EmployeeStatus,
    /// Base salary used, zero when the employee has none.
    pub base_salary: Decimal,
    /// Unjustified absences dated in the reference month.
    pub unjustified_absences: u32,
    /// Whether the deduction cutoff allowed deductions to apply.
    pub deduction_applied: bool,
    /// Amount deducted for absences.
    pub deduction: Decimal,
    /// Pay after deductions, never negative.
    pub adjusted_pay: Decimal,
    /// Monthly transit cost under the configured transit policy.
    pub transit_cost: Decimal,
    /// Whether this employee's pay is part of `total_payroll`.
    pub counts_towards_payroll: bool,
    /// Whether this employee's transit cost is part of `total_transit`.
    pub counts_towards_transit: bool,
}

/// The result of one monthly payroll computation.
///
/// `per_employee` only lists active employees; `total_payroll` is always
/// the exact sum of its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The month the figures refer to.
    pub reference_month: ReferenceMonth,
    /// Adjusted monthly pay per active employee id.
    pub per_employee: BTreeMap<String, Decimal>,
    /// Sum of adjusted pay over active employees.
    pub total_payroll: Decimal,
    /// Sum of monthly transit cost over the employees in transit scope.
    pub total_transit: Decimal,
    /// Per-employee derivation, in input order (after de-duplication).
    pub breakdown: Vec<EmployeePayroll>,
    /// Record of every rule applied.
    pub audit_trace: AuditTrace,
}

impl PayrollSummary {
    /// Adjusted pay for one employee, `None` if not on the active payroll.
    pub fn pay_for(&self, employee_id: &str) -> Option<Decimal> {
        self.per_employee.get(employee_id).copied()
    }

    /// Payroll plus transit: the company's monthly staff cost.
    ///
    /// Saturates at `Decimal::MAX`.
    pub fn total_cost(&self) -> Decimal {
        self.total_payroll.saturating_add(self.total_transit)
    }
}
