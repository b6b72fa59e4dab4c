//! HTTP API module for the Payroll Engine.
//!
//! This module exposes the monthly payroll, dashboard and report
//! computations over REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{MAX_MONEY_AMOUNT, PayrollRequest, ReportRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
