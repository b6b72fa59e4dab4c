//! Payroll Engine for condominium cleaning staff
//!
//! This crate computes the monthly payroll of a cleaning-services company:
//! per-employee pay after absence deductions, the fleet-wide payroll total and
//! the monthly transit cost, from snapshots of employee and absence rows.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
