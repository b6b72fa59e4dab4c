//! Monthly payroll aggregation.
//!
//! Turns a snapshot of employees and absences into per-employee adjusted pay
//! and fleet-wide payroll and transit totals for the month containing the
//! reference date. The computation is pure: the same inputs always produce
//! the same [`PayrollSummary`].

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{PayrollPolicy, TransitScope};
use crate::models::{
    Absence, AuditStep, AuditTrace, AuditWarning, Employee, EmployeePayroll, PayrollSummary,
    ReferenceMonth,
};

use super::absence_index::AbsenceIndex;
use super::business_day::{is_after_business_day_cutoff, nth_weekday_of_month};
use super::salary_deduction::calculate_absence_deduction;
use super::transit_cost::calculate_transit_cost;

/// Computes the monthly payroll for the month containing `today`.
///
/// # Arguments
///
/// * `employees` - Snapshot of employee rows; on duplicate ids the last row wins
/// * `absences` - Snapshot of absence rows, any month
/// * `today` - The reference date
/// * `policy` - Deduction, transit and cutoff rules
///
/// # Behavior
///
/// - Only active employees appear in `per_employee` and count towards
///   `total_payroll`
/// - Unjustified absences dated in the reference month reduce pay by the
///   configured deduction policy; justified ones never do
/// - With a business-day cutoff configured, deductions apply only once
///   `today` is past that weekday of the month
/// - Transit cost counts towards `total_transit` per the configured scope
/// - Missing numeric fields count as zero; the function never fails
/// - Amounts that cannot be computed (zero divisors in the policy, values
///   beyond `Decimal::MAX`) degrade to zero or are left out of the totals,
///   each with an audit warning
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_monthly_payroll;
/// use payroll_engine::config::PayrollPolicy;
/// use payroll_engine::models::{Absence, Employee};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut employee = Employee::new("emp_001", "Maria Silva");
/// employee.monthly_base_salary = Some(Decimal::from(3000));
///
/// let absences: Vec<Absence> = [10, 11]
///     .iter()
///     .map(|day| Absence {
///         id: format!("abs_{}", day),
///         employee_id: "emp_001".to_string(),
///         date: NaiveDate::from_ymd_opt(2024, 9, *day).unwrap(),
///         justified: false,
///         discount_applied: true,
///         reason: None,
///     })
///     .collect();
///
/// let today = NaiveDate::from_ymd_opt(2024, 9, 20).unwrap();
/// let summary = compute_monthly_payroll(&[employee], &absences, today, &PayrollPolicy::default());
///
/// assert_eq!(summary.pay_for("emp_001"), Some(Decimal::from(2800)));
/// assert_eq!(summary.total_payroll, Decimal::from(2800));
/// ```
pub fn compute_monthly_payroll(
    employees: &[Employee],
    absences: &[Absence],
    today: NaiveDate,
    policy: &PayrollPolicy,
) -> PayrollSummary {
    let reference_month = ReferenceMonth::from_date(today);
    let index = AbsenceIndex::new(absences);

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    if let Err(err) = policy.validate() {
        warn!(error = %err, "Payroll policy is invalid, affected amounts degrade to zero");
        warnings.push(AuditWarning::new(
            "INVALID_POLICY",
            format!("{}; affected amounts are counted as zero", err),
            "high",
        ));
    }

    // Last row per id wins
    let mut latest: HashMap<&str, usize> = HashMap::new();
    for (position, employee) in employees.iter().enumerate() {
        if latest.insert(employee.id.as_str(), position).is_some() {
            warn!(
                employee_id = %employee.id,
                "Duplicate employee id in snapshot, keeping last row"
            );
            warnings.push(AuditWarning::new(
                "DUPLICATE_EMPLOYEE_ID",
                format!(
                    "Employee '{}' appears more than once; the last row was used",
                    employee.id
                ),
                "medium",
            ));
        }
    }

    let deduction_applies = match evaluate_cutoff(today, policy, step_number) {
        Some((applies, step)) => {
            steps.push(step);
            step_number += 1;
            applies
        }
        None => true,
    };

    let mut per_employee: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut breakdown: Vec<EmployeePayroll> = Vec::new();
    let mut total_payroll = Decimal::ZERO;
    let mut total_transit = Decimal::ZERO;

    let current_rows = employees
        .iter()
        .enumerate()
        .filter(|(position, employee)| latest.get(employee.id.as_str()) == Some(position))
        .map(|(_, employee)| employee);

    for employee in current_rows {
        let active = employee.is_active();
        let unjustified_absences = index.unjustified_in_month(&employee.id, reference_month);

        let transit = calculate_transit_cost(employee, policy, step_number);
        steps.push(transit.audit_step);
        warnings.extend(transit.warnings);
        step_number += 1;

        let mut counts_towards_transit =
            active || policy.transit_scope == TransitScope::AllEmployees;
        if counts_towards_transit {
            match total_transit.checked_add(transit.monthly_cost) {
                Some(total) => total_transit = total,
                None => {
                    counts_towards_transit = false;
                    warn!(employee_id = %employee.id, "Transit total overflow, row left out");
                    warnings.push(overflow_warning("TRANSIT_OVERFLOW", &employee.id, "transit"));
                }
            }
        }

        if !active {
            steps.push(AuditStep {
                step_number,
                rule_id: "employee_status".to_string(),
                rule_name: "Employee Status".to_string(),
                input: serde_json::json!({
                    "employee_id": employee.id,
                    "status": employee.status
                }),
                output: serde_json::json!({
                    "counts_towards_payroll": false,
                    "counts_towards_transit": counts_towards_transit
                }),
                reasoning: format!(
                    "Employee is {} - excluded from payroll total",
                    employee.status
                ),
            });
            step_number += 1;

            debug!(employee_id = %employee.id, "Skipping inactive employee");
            breakdown.push(EmployeePayroll {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                status: employee.status,
                base_salary: employee.monthly_base_salary.unwrap_or(Decimal::ZERO),
                unjustified_absences,
                deduction_applied: false,
                deduction: Decimal::ZERO,
                adjusted_pay: Decimal::ZERO,
                transit_cost: transit.monthly_cost,
                counts_towards_payroll: false,
                counts_towards_transit,
            });
            continue;
        }

        if employee.monthly_base_salary.is_none() {
            warnings.push(AuditWarning::new(
                "MISSING_BASE_SALARY",
                format!(
                    "Active employee '{}' has no base salary; counted as zero",
                    employee.id
                ),
                "high",
            ));
        }

        let deduction = calculate_absence_deduction(
            employee,
            unjustified_absences,
            deduction_applies,
            policy,
            step_number,
        );
        steps.push(deduction.audit_step);
        warnings.extend(deduction.warnings);
        step_number += 1;

        let counts_towards_payroll = match total_payroll.checked_add(deduction.adjusted_pay) {
            Some(total) => {
                total_payroll = total;
                per_employee.insert(employee.id.clone(), deduction.adjusted_pay);
                true
            }
            None => {
                warn!(employee_id = %employee.id, "Payroll total overflow, row left out");
                warnings.push(overflow_warning("PAYROLL_OVERFLOW", &employee.id, "payroll"));
                false
            }
        };

        debug!(
            employee_id = %employee.id,
            unjustified_absences,
            deduction = %deduction.deduction,
            adjusted_pay = %deduction.adjusted_pay,
            transit_cost = %transit.monthly_cost,
            "Computed employee payroll"
        );

        breakdown.push(EmployeePayroll {
            employee_id: employee.id.clone(),
            name: employee.name.clone(),
            status: employee.status,
            base_salary: deduction.base_salary,
            unjustified_absences,
            deduction_applied: deduction_applies,
            deduction: deduction.deduction,
            adjusted_pay: deduction.adjusted_pay,
            transit_cost: transit.monthly_cost,
            counts_towards_payroll,
            counts_towards_transit,
        });
    }

    let mut orphans: Vec<&str> = index
        .employee_ids()
        .filter(|id| !latest.contains_key(id))
        .collect();
    orphans.sort_unstable();
    for id in orphans {
        warn!(employee_id = %id, "Absences reference an unknown employee");
        warnings.push(AuditWarning::new(
            "ORPHAN_ABSENCE",
            format!("Absences reference unknown employee '{}'; ignored", id),
            "low",
        ));
    }

    debug!(
        reference_month = %reference_month,
        employees = breakdown.len(),
        total_payroll = %total_payroll,
        total_transit = %total_transit,
        "Monthly payroll computed"
    );

    PayrollSummary {
        reference_month,
        per_employee,
        total_payroll,
        total_transit,
        breakdown,
        audit_trace: AuditTrace { steps, warnings },
    }
}

fn overflow_warning(code: &str, employee_id: &str, total: &str) -> AuditWarning {
    AuditWarning::new(
        code,
        format!(
            "Adding '{}' would overflow the {} total; the row was left out of it",
            employee_id, total
        ),
        "high",
    )
}

/// Resolves the business-day cutoff gate, if one is configured.
///
/// A cutoff that cannot be computed leaves deductions enabled.
fn evaluate_cutoff(
    today: NaiveDate,
    policy: &PayrollPolicy,
    step_number: u32,
) -> Option<(bool, AuditStep)> {
    let n = policy.deduction_cutoff_business_day?;
    let reference_month = ReferenceMonth::from_date(today);

    let (applies, cutoff, reasoning) = match is_after_business_day_cutoff(today, n) {
        Ok(after) => {
            let cutoff = nth_weekday_of_month(reference_month.year(), reference_month.month(), n)
                .ok()
                .map(|d| d.to_string());
            let reasoning = if after {
                format!("{} is past business day {} - deductions apply", today, n)
            } else {
                format!(
                    "{} is on or before business day {} - deductions deferred",
                    today, n
                )
            };
            (after, cutoff, reasoning)
        }
        Err(err) => {
            warn!(error = %err, "Could not compute deduction cutoff, applying deductions");
            (true, None, format!("Cutoff unavailable ({}) - deductions apply", err))
        }
    };

    let step = AuditStep {
        step_number,
        rule_id: "deduction_cutoff".to_string(),
        rule_name: "Deduction Cutoff".to_string(),
        input: serde_json::json!({
            "today": today.to_string(),
            "business_day": n
        }),
        output: serde_json::json!({
            "cutoff_date": cutoff,
            "deductions_apply": applies
        }),
        reasoning,
    };

    Some((applies, step))
}
