//! Absence lookup and filtering.
//!
//! [`AbsenceIndex`] groups a snapshot of absences by employee so the payroll
//! run is linear in the number of employees plus absences. [`filter_absences`]
//! backs the absence listing (by employee and/or month).

use std::collections::HashMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::{Absence, ReferenceMonth};

/// Absences of a snapshot grouped by employee id.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::AbsenceIndex;
/// use payroll_engine::models::{Absence, ReferenceMonth};
/// use chrono::NaiveDate;
///
/// let absences = vec![Absence {
///     id: "abs_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 9, 10).unwrap(),
///     justified: false,
///     discount_applied: false,
///     reason: None,
/// }];
///
/// let index = AbsenceIndex::new(&absences);
/// let month = ReferenceMonth::new(2024, 9).unwrap();
/// assert_eq!(index.unjustified_in_month("emp_001", month), 1);
/// assert_eq!(index.unjustified_in_month("emp_002", month), 0);
/// ```
#[derive(Debug, Default)]
pub struct AbsenceIndex<'a> {
    by_employee: HashMap<&'a str, Vec<&'a Absence>>,
}

impl<'a> AbsenceIndex<'a> {
    /// Indexes `absences` by employee id.
    pub fn new(absences: &'a [Absence]) -> Self {
        let mut by_employee: HashMap<&'a str, Vec<&'a Absence>> = HashMap::new();
        for absence in absences {
            by_employee
                .entry(absence.employee_id.as_str())
                .or_default()
                .push(absence);
        }
        Self { by_employee }
    }

    /// All absences recorded for an employee, in input order.
    pub fn for_employee(&self, employee_id: &str) -> &[&'a Absence] {
        self.by_employee
            .get(employee_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Unjustified absences of an employee dated inside `month`.
    pub fn unjustified_in_month(&self, employee_id: &str, month: ReferenceMonth) -> u32 {
        self.for_employee(employee_id)
            .iter()
            .filter(|a| a.is_deductible() && a.falls_in(month))
            .count() as u32
    }

    /// Employee ids that have at least one absence.
    pub fn employee_ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.by_employee.keys().copied()
    }
}

/// Criteria for listing absences. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceFilter {
    /// Only absences of this employee.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Only absences in this calendar month number (1..=12), any year.
    #[serde(default)]
    pub month_of_year: Option<u32>,
    /// Only absences in this exact year and month.
    #[serde(default)]
    pub reference_month: Option<ReferenceMonth>,
    /// Only justified (`Some(true)`) or unjustified (`Some(false)`) absences.
    #[serde(default)]
    pub justified: Option<bool>,
    /// Only absences with (`Some(true)`) or without (`Some(false)`) a
    /// recorded discount.
    #[serde(default, alias = "desconto_aplicado")]
    pub discount_applied: Option<bool>,
}

impl AbsenceFilter {
    /// Returns true if `absence` satisfies every set criterion.
    pub fn matches(&self, absence: &Absence) -> bool {
        self.employee_id
            .as_deref()
            .is_none_or(|id| absence.employee_id == id)
            && self
                .month_of_year
                .is_none_or(|m| absence.date.month() == m)
            && self.reference_month.is_none_or(|rm| absence.falls_in(rm))
            && self.justified.is_none_or(|j| absence.justified == j)
            && self
                .discount_applied
                .is_none_or(|d| absence.discount_applied == d)
    }
}

/// Returns the absences matching `filter`, preserving input order.
pub fn filter_absences<'a>(absences: &'a [Absence], filter: &AbsenceFilter) -> Vec<&'a Absence> {
    absences.iter().filter(|a| filter.matches(a)).collect()
}
