//! Monthly transit cost of an employee.
//!
//! Two formulas exist and are mutually exclusive; [`TransitPolicy`] picks one.

use rust_decimal::Decimal;

use crate::config::{PayrollPolicy, TransitPolicy};
use crate::models::{AuditStep, AuditWarning, Employee};

/// The result of a transit cost calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct TransitCostResult {
    /// Monthly transit cost, zero when the needed fields are missing.
    pub monthly_cost: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Raised when the cost could not be computed from the inputs.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates an employee's monthly transit cost.
///
/// - [`TransitPolicy::WeeklyHours`]:
///   `fare × (weekly_hours / hours_per_workday) × weeks_per_month`,
///   requires `weekly_hours` and `daily_transit_fare`.
/// - [`TransitPolicy::MonthlyPasses`]: `monthly_transit_passes × fare`,
///   requires `monthly_transit_passes` and `daily_transit_fare`.
///
/// Missing inputs yield zero. So does a formula that cannot be evaluated
/// (`hours_per_workday` of zero, or a result beyond `Decimal::MAX`), which
/// also raises a `TRANSIT_COST_UNAVAILABLE` warning. Status is not considered
/// here; the caller decides whether the cost counts towards the fleet total.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_transit_cost;
/// use payroll_engine::config::PayrollPolicy;
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let mut employee = Employee::new("emp_001", "Maria Silva");
/// employee.weekly_hours = Some(40);
/// employee.daily_transit_fare = Some(Decimal::from(10));
///
/// // 10 × (40 / 8) × 4.5
/// let result = calculate_transit_cost(&employee, &PayrollPolicy::default(), 1);
/// assert_eq!(result.monthly_cost, Decimal::from(225));
/// ```
pub fn calculate_transit_cost(
    employee: &Employee,
    policy: &PayrollPolicy,
    step_number: u32,
) -> TransitCostResult {
    let fare = employee.daily_transit_fare;
    let mut warnings = Vec::new();

    let (monthly_cost, reasoning) = match policy.transit_policy {
        TransitPolicy::WeeklyHours => match (employee.weekly_hours, fare) {
            (Some(hours), Some(fare)) => {
                let days_per_week =
                    Decimal::from(hours).checked_div(Decimal::from(policy.hours_per_workday));
                let cost = days_per_week
                    .and_then(|days| fare.checked_mul(days))
                    .and_then(|cost| cost.checked_mul(policy.weeks_per_month));

                match (days_per_week, cost) {
                    (Some(days_per_week), Some(cost)) => {
                        let reasoning = format!(
                            "{} fare × {} day(s)/week ({}h / {}h) × {} weeks = {}",
                            fare.normalize(),
                            days_per_week.normalize(),
                            hours,
                            policy.hours_per_workday,
                            policy.weeks_per_month.normalize(),
                            cost.normalize()
                        );
                        (cost, reasoning)
                    }
                    _ => {
                        warnings.push(unavailable(employee));
                        (
                            Decimal::ZERO,
                            format!(
                                "Formula not computable for {}h / {}h - no transit cost",
                                hours, policy.hours_per_workday
                            ),
                        )
                    }
                }
            }
            _ => (
                Decimal::ZERO,
                "Weekly hours or daily fare missing - no transit cost".to_string(),
            ),
        },
        TransitPolicy::MonthlyPasses => match (employee.monthly_transit_passes, fare) {
            (Some(passes), Some(fare)) => match Decimal::from(passes).checked_mul(fare) {
                Some(cost) => {
                    let reasoning = format!(
                        "{} pass(es) × {} fare = {}",
                        passes,
                        fare.normalize(),
                        cost.normalize()
                    );
                    (cost, reasoning)
                }
                None => {
                    warnings.push(unavailable(employee));
                    (
                        Decimal::ZERO,
                        format!(
                            "{} pass(es) × {} fare overflows - no transit cost",
                            passes,
                            fare.normalize()
                        ),
                    )
                }
            },
            _ => (
                Decimal::ZERO,
                "Monthly passes or daily fare missing - no transit cost".to_string(),
            ),
        },
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "transit_cost".to_string(),
        rule_name: "Transit Cost".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "transit_policy": policy.transit_policy,
            "weekly_hours": employee.weekly_hours,
            "daily_transit_fare": fare.map(|f| f.to_string()),
            "monthly_transit_passes": employee.monthly_transit_passes
        }),
        output: serde_json::json!({
            "monthly_cost": monthly_cost.to_string()
        }),
        reasoning,
    };

    TransitCostResult {
        monthly_cost,
        audit_step,
        warnings,
    }
}

fn unavailable(employee: &Employee) -> AuditWarning {
    AuditWarning::new(
        "TRANSIT_COST_UNAVAILABLE",
        format!(
            "Transit cost of '{}' cannot be computed with the configured policy; counted as zero",
            employee.id
        ),
        "high",
    )
}
