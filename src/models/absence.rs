//! Absence model.
//!
//! An absence is a single missed working day recorded against one employee.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ReferenceMonth;

/// A recorded absence of one employee on one calendar date.
///
/// Unjustified absences reduce pay for the month containing `date`;
/// justified ones never do. `discount_applied` marks the absences the
/// listing prices individually (see [`Absence::carries_discount`]).
///
/// # Example
///
/// ```
/// use payroll_engine::models::Absence;
/// use chrono::NaiveDate;
///
/// let absence = Absence {
///     id: "abs_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 9, 10).unwrap(),
///     justified: false,
///     discount_applied: true,
///     reason: None,
/// };
/// assert!(absence.is_deductible());
/// assert!(absence.carries_discount());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    /// Opaque identifier assigned by the store.
    #[serde(default)]
    pub id: String,
    /// The employee this absence belongs to.
    #[serde(alias = "id_funcionaria")]
    pub employee_id: String,
    /// The day that was missed.
    #[serde(alias = "data")]
    pub date: NaiveDate,
    /// Whether the absence was justified (medical note, agreed leave, ...).
    #[serde(default, alias = "justificativa")]
    pub justified: bool,
    /// Whether a pay discount was recorded for this absence.
    #[serde(default, alias = "desconto_aplicado")]
    pub discount_applied: bool,
    /// Free-text reason.
    #[serde(default, alias = "motivo")]
    pub reason: Option<String>,
}

impl Absence {
    /// Returns true if this absence may reduce pay.
    pub fn is_deductible(&self) -> bool {
        !self.justified
    }

    /// Returns true if the absence is priced on the listing: a discount was
    /// recorded and the absence is not justified.
    pub fn carries_discount(&self) -> bool {
        self.discount_applied && !self.justified
    }

    /// Returns true if the absence falls inside `month`.
    pub fn falls_in(&self, month: ReferenceMonth) -> bool {
        month.contains(self.date)
    }
}
