//! Headline counters for the management dashboard.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollPolicy;
use crate::models::{Absence, Employee, EmployeeStatus, ReferenceMonth};

use super::payroll::compute_monthly_payroll;

/// Dashboard figures for the month containing the reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// The month the figures refer to.
    pub reference_month: ReferenceMonth,
    /// Distinct employees in the snapshot.
    pub total_employees: u32,
    /// Distinct employees currently active.
    pub active_employees: u32,
    /// Absences dated in the reference month, any employee.
    pub absences_this_month: u32,
    /// Unjustified absences dated in the reference month, any employee.
    pub unjustified_absences_this_month: u32,
    /// Adjusted payroll total.
    pub total_payroll: Decimal,
    /// Transit total.
    pub total_transit: Decimal,
}

/// Computes the dashboard counters.
///
/// Absence counts use the raw absence list, so absences of inactive or
/// unknown employees are still counted even though they never affect pay.
pub fn compute_dashboard_stats(
    employees: &[Employee],
    absences: &[Absence],
    today: NaiveDate,
    policy: &PayrollPolicy,
) -> DashboardStats {
    let summary = compute_monthly_payroll(employees, absences, today, policy);
    let month = summary.reference_month;

    let this_month: Vec<&Absence> = absences.iter().filter(|a| a.falls_in(month)).collect();
    let unjustified = this_month.iter().filter(|a| a.is_deductible()).count();
    let active = summary
        .breakdown
        .iter()
        .filter(|row| row.status == EmployeeStatus::Active)
        .count();

    DashboardStats {
        reference_month: month,
        total_employees: summary.breakdown.len() as u32,
        active_employees: active as u32,
        absences_this_month: this_month.len() as u32,
        unjustified_absences_this_month: unjustified as u32,
        total_payroll: summary.total_payroll,
        total_transit: summary.total_transit,
    }
}
