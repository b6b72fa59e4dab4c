//! Calculation logic for the Payroll Engine.
//!
//! This module contains the monthly payroll aggregation and the helpers it is
//! built from: business-day arithmetic for the deduction cutoff, absence
//! indexing and filtering, salary deductions for unjustified absences,
//! transit cost formulas, dashboard counters and report packaging.

mod absence_index;
mod business_day;
mod dashboard;
mod payroll;
mod report;
mod salary_deduction;
mod transit_cost;

pub use absence_index::{AbsenceFilter, AbsenceIndex, filter_absences};
pub use business_day::{
    is_after_business_day_cutoff, is_weekday, nth_weekday_of_month, weekdays_in_month,
};
pub use dashboard::{DashboardStats, compute_dashboard_stats};
pub use payroll::compute_monthly_payroll;
pub use report::{DEFAULT_REPORT_TYPE, build_payroll_report};
pub use salary_deduction::{
    DeductionResult, absence_deduction_value, calculate_absence_deduction, daily_rate,
};
pub use transit_cost::{TransitCostResult, calculate_transit_cost};
