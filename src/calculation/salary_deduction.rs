//! Absence deductions from the monthly base salary.
//!
//! A month is always priced as a flat `days_per_month` (30 by default), so
//! the daily rate does not depend on how many calendar days the month has.

use rust_decimal::Decimal;

use crate::config::PayrollPolicy;
use crate::models::{Absence, AuditStep, AuditWarning, Employee};

/// The result of applying absence deductions to one employee's salary.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// Base salary used, zero when the employee has none.
    pub base_salary: Decimal,
    /// Number of unjustified absences considered.
    pub unjustified_absences: u32,
    /// The salary divided by the configured days per month, `None` when
    /// `days_per_month` is zero.
    pub daily_rate: Option<Decimal>,
    /// The amount deducted.
    pub deduction: Decimal,
    /// `max(base_salary - deduction, 0)`.
    pub adjusted_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Raised when the deduction could not be priced normally.
    pub warnings: Vec<AuditWarning>,
}

/// Daily rate of a monthly salary under `policy`.
///
/// Returns `None` when `days_per_month` is zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::daily_rate;
/// use payroll_engine::config::PayrollPolicy;
/// use rust_decimal::Decimal;
///
/// let rate = daily_rate(Decimal::from(3000), &PayrollPolicy::default());
/// assert_eq!(rate, Some(Decimal::from(100)));
///
/// let broken = PayrollPolicy {
///     days_per_month: 0,
///     ..PayrollPolicy::default()
/// };
/// assert_eq!(daily_rate(Decimal::from(3000), &broken), None);
/// ```
pub fn daily_rate(monthly_salary: Decimal, policy: &PayrollPolicy) -> Option<Decimal> {
    monthly_salary.checked_div(Decimal::from(policy.days_per_month))
}

/// Applies the absence deduction to an employee's base salary.
///
/// # Arguments
///
/// * `employee` - The employee whose salary is adjusted
/// * `unjustified_absences` - Unjustified absences in the reference month
/// * `deduction_applies` - False when the business-day cutoff has not passed yet
/// * `policy` - Deduction policy and month constants
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// A [`DeductionResult`]. An employee without a base salary gets zero pay and
/// zero deduction; the adjusted pay is never negative. Without a daily rate
/// nothing is deducted (`DAILY_RATE_UNAVAILABLE`); a deduction too large for
/// a `Decimal` saturates and leaves zero pay (`AMOUNT_OVERFLOW`).
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_absence_deduction;
/// use payroll_engine::config::{DeductionPolicy, PayrollPolicy};
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let mut employee = Employee::new("emp_001", "Maria Silva");
/// employee.monthly_base_salary = Some(Decimal::from(3000));
///
/// let policy = PayrollPolicy::default();
/// let result = calculate_absence_deduction(&employee, 2, true, &policy, 1);
/// assert_eq!(result.adjusted_pay, Decimal::from(2800));
///
/// let double = PayrollPolicy {
///     deduction_policy: DeductionPolicy::DoubleRate,
///     ..PayrollPolicy::default()
/// };
/// let result = calculate_absence_deduction(&employee, 2, true, &double, 1);
/// assert_eq!(result.adjusted_pay, Decimal::from(2600));
/// ```
pub fn calculate_absence_deduction(
    employee: &Employee,
    unjustified_absences: u32,
    deduction_applies: bool,
    policy: &PayrollPolicy,
    step_number: u32,
) -> DeductionResult {
    let base_salary = employee.monthly_base_salary.unwrap_or(Decimal::ZERO);
    let rate = daily_rate(base_salary, policy);
    let days_per_absence = policy.deduction_policy.days_per_absence();
    let mut warnings = Vec::new();

    let deducts =
        employee.monthly_base_salary.is_some() && deduction_applies && unjustified_absences > 0;
    let deduction = match rate {
        _ if !deducts => Decimal::ZERO,
        None => {
            warnings.push(AuditWarning::new(
                "DAILY_RATE_UNAVAILABLE",
                format!(
                    "No daily rate for '{}' with days_per_month = {}; absences not deducted",
                    employee.id, policy.days_per_month
                ),
                "high",
            ));
            Decimal::ZERO
        }
        Some(rate) => Decimal::from(unjustified_absences)
            .checked_mul(days_per_absence)
            .and_then(|days| rate.checked_mul(days))
            .unwrap_or_else(|| {
                warnings.push(AuditWarning::new(
                    "AMOUNT_OVERFLOW",
                    format!(
                        "Deduction of '{}' exceeds the representable range; pay set to zero",
                        employee.id
                    ),
                    "high",
                ));
                Decimal::MAX
            }),
    };
    let adjusted_pay = base_salary
        .checked_sub(deduction)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);

    let reasoning = match (employee.monthly_base_salary, rate) {
        (None, _) => "No base salary on record - pay is zero".to_string(),
        (Some(_), _) if !deduction_applies => format!(
            "Deduction cutoff not reached - {} unjustified absence(s) not deducted yet, pay {}",
            unjustified_absences,
            adjusted_pay.normalize()
        ),
        (Some(_), _) if unjustified_absences == 0 => format!(
            "No unjustified absences this month - full base salary {}",
            adjusted_pay.normalize()
        ),
        (Some(_), None) => format!(
            "No daily rate for {} day(s)/month - {} absence(s) not deducted, pay {}",
            policy.days_per_month,
            unjustified_absences,
            adjusted_pay.normalize()
        ),
        (Some(_), Some(rate)) => format!(
            "{} unjustified absence(s) × {} day(s) × {} daily rate = {} deducted, pay {}",
            unjustified_absences,
            days_per_absence,
            rate.round_dp(2),
            deduction.round_dp(2),
            adjusted_pay.round_dp(2)
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "absence_deduction".to_string(),
        rule_name: "Absence Deduction".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "base_salary": employee.monthly_base_salary.map(|s| s.to_string()),
            "unjustified_absences": unjustified_absences,
            "deduction_policy": policy.deduction_policy,
            "days_per_month": policy.days_per_month,
            "deduction_applies": deduction_applies
        }),
        output: serde_json::json!({
            "daily_rate": rate.map(|r| r.to_string()),
            "deduction": deduction.to_string(),
            "adjusted_pay": adjusted_pay.to_string()
        }),
        reasoning,
    };

    DeductionResult {
        base_salary,
        unjustified_absences,
        daily_rate: rate,
        deduction,
        adjusted_pay,
        audit_step,
        warnings,
    }
}

/// What a single absence costs the employee under `policy`, as shown on the
/// absence listing.
///
/// Only absences flagged with a discount and not justified are priced
/// (see [`Absence::carries_discount`]). Zero for everything else, for
/// employees without a base salary and when no daily rate can be derived.
/// Saturates at `Decimal::MAX`.
pub fn absence_deduction_value(
    employee: &Employee,
    absence: &Absence,
    policy: &PayrollPolicy,
) -> Decimal {
    if !absence.carries_discount() {
        return Decimal::ZERO;
    }

    employee
        .monthly_base_salary
        .and_then(|salary| daily_rate(salary, policy))
        .map(|rate| rate.saturating_mul(policy.deduction_policy.days_per_absence()))
        .unwrap_or(Decimal::ZERO)
}
