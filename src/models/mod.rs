//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod absence;
mod employee;
mod payroll_summary;
mod reference_month;
mod report;

pub use absence::Absence;
pub use employee::{Employee, EmployeeStatus};
pub use payroll_summary::{AuditStep, AuditTrace, AuditWarning, EmployeePayroll, PayrollSummary};
pub use reference_month::ReferenceMonth;
pub use report::PayrollReport;
