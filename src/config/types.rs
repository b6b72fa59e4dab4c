//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest business-day cutoff accepted; every month has at least 20 weekdays.
pub const MAX_CUTOFF_BUSINESS_DAY: u32 = 20;

/// How an unjustified absence is priced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionPolicy {
    /// Each absence costs one daily rate.
    #[default]
    DailyRate,
    /// Each absence costs two daily rates.
    DoubleRate,
}

impl DeductionPolicy {
    /// Number of daily rates deducted per unjustified absence.
    pub fn days_per_absence(&self) -> Decimal {
        match self {
            DeductionPolicy::DailyRate => Decimal::ONE,
            DeductionPolicy::DoubleRate => Decimal::TWO,
        }
    }
}

/// How the monthly transit cost of an employee is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitPolicy {
    /// `fare × (weekly_hours / hours_per_workday) × weeks_per_month`.
    #[default]
    WeeklyHours,
    /// `monthly_transit_passes × fare`.
    MonthlyPasses,
}

/// Which employees' transit costs are summed into the fleet total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitScope {
    /// Only active employees.
    #[default]
    ActiveOnly,
    /// Every employee in the snapshot regardless of status.
    AllEmployees,
}

/// Company metadata shown on reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyMetadata {
    /// Company display name.
    pub name: String,
    /// ISO currency code amounts are expressed in.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "BRL".to_string()
}

/// The rules that drive a payroll computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPolicy {
    /// Absence pricing.
    #[serde(default)]
    pub deduction_policy: DeductionPolicy,
    /// Transit cost formula.
    #[serde(default)]
    pub transit_policy: TransitPolicy,
    /// Transit total scope.
    #[serde(default)]
    pub transit_scope: TransitScope,
    /// Divisor turning a monthly salary into a daily rate.
    #[serde(default = "default_days_per_month")]
    pub days_per_month: u32,
    /// Hours in one working day, used to turn weekly hours into days.
    #[serde(default = "default_hours_per_workday")]
    pub hours_per_workday: u32,
    /// Average number of weeks in a month.
    #[serde(default = "default_weeks_per_month")]
    pub weeks_per_month: Decimal,
    /// When set, deductions only apply after this business day of the month.
    #[serde(default)]
    pub deduction_cutoff_business_day: Option<u32>,
}

fn default_days_per_month() -> u32 {
    30
}

fn default_hours_per_workday() -> u32 {
    8
}

fn default_weeks_per_month() -> Decimal {
    Decimal::new(45, 1)
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            deduction_policy: DeductionPolicy::default(),
            transit_policy: TransitPolicy::default(),
            transit_scope: TransitScope::default(),
            days_per_month: default_days_per_month(),
            hours_per_workday: default_hours_per_workday(),
            weeks_per_month: default_weeks_per_month(),
            deduction_cutoff_business_day: None,
        }
    }
}

impl PayrollPolicy {
    /// Checks that every value can be used without dividing by zero or
    /// asking for a weekday that does not exist.
    pub fn validate(&self) -> EngineResult<()> {
        if self.days_per_month == 0 {
            return Err(invalid("days_per_month", "must be greater than zero"));
        }
        if self.hours_per_workday == 0 {
            return Err(invalid("hours_per_workday", "must be greater than zero"));
        }
        if self.weeks_per_month <= Decimal::ZERO {
            return Err(invalid("weeks_per_month", "must be greater than zero"));
        }
        if let Some(n) = self.deduction_cutoff_business_day {
            if !(1..=MAX_CUTOFF_BUSINESS_DAY).contains(&n) {
                return Err(invalid(
                    "deduction_cutoff_business_day",
                    &format!("must be between 1 and {}", MAX_CUTOFF_BUSINESS_DAY),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// The complete payroll configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Company metadata.
    pub company: CompanyMetadata,
    /// Payroll rules.
    #[serde(default)]
    pub policy: PayrollPolicy,
}
