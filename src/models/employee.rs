//! Employee model and related types.
//!
//! This module defines the Employee struct and EmployeeStatus enum for the
//! staff rows read from the external store. Keys follow snake_case English
//! names; the store's own column names are accepted as aliases.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether an employee is currently on the payroll.
///
/// Rows without a status are read as [`EmployeeStatus::Active`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed; contributes to payroll totals.
    #[default]
    #[serde(alias = "Ativa", alias = "Ativo", alias = "Active")]
    Active,
    /// No longer employed or on leave; contributes nothing.
    #[serde(alias = "Inativa", alias = "Inativo", alias = "Inactive")]
    Inactive,
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmployeeStatus::Active => write!(f, "active"),
            EmployeeStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// Represents an employee assigned to condominium cleaning work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Opaque identifier assigned by the store.
    pub id: String,
    /// Full name.
    #[serde(default, alias = "nome")]
    pub name: String,
    /// National taxpayer document (CPF).
    #[serde(default, alias = "cpf")]
    pub document_number: Option<String>,
    /// Employment status.
    #[serde(default)]
    pub status: EmployeeStatus,
    /// Monthly base salary before absence deductions.
    #[serde(default, alias = "salario_base")]
    pub monthly_base_salary: Option<Decimal>,
    /// Contracted hours per week.
    #[serde(default, alias = "horas_semanais")]
    pub weekly_hours: Option<u32>,
    /// Transit fare paid per working day.
    #[serde(default, alias = "valor_passagem")]
    pub daily_transit_fare: Option<Decimal>,
    /// Number of transit passes handed out per month.
    #[serde(default, alias = "passagens_mensais")]
    pub monthly_transit_passes: Option<u32>,
    /// Contact phone.
    #[serde(default, alias = "telefone")]
    pub phone: Option<String>,
    /// Home address.
    #[serde(default, alias = "endereco")]
    pub address: Option<String>,
    /// Admission date.
    #[serde(default, alias = "data_de_admissao")]
    pub hired_on: Option<NaiveDate>,
    /// Termination date.
    #[serde(default, alias = "data_de_desligamento")]
    pub terminated_on: Option<NaiveDate>,
}

impl Employee {
    /// Creates an active employee with only the identity fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            document_number: None,
            status: EmployeeStatus::Active,
            monthly_base_salary: None,
            weekly_hours: None,
            daily_transit_fare: None,
            monthly_transit_passes: None,
            phone: None,
            address: None,
            hired_on: None,
            terminated_on: None,
        }
    }

    /// Returns true if the employee counts towards payroll totals.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmployeeStatus};
    ///
    /// let mut employee = Employee::new("emp_001", "Maria Silva");
    /// assert!(employee.is_active());
    ///
    /// employee.status = EmployeeStatus::Inactive;
    /// assert!(!employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Case-insensitive match of `term` against the name or document number.
    ///
    /// An empty term matches everyone.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&term)
            || self
                .document_number
                .as_deref()
                .is_some_and(|doc| doc.to_lowercase().contains(&term))
    }
}
