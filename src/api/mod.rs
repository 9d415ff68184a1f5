//! HTTP API module for the HRMS engine.
//!
//! This module provides the REST endpoints the front end talks to. The
//! caller is identified by the `x-user-email` header, with optional role
//! claims in `x-user-claims`.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{CLAIMS_HEADER, EMAIL_HEADER, create_router};
pub use request::{
    BalanceQuery, DateQuery, GeneratePayrollRequest, NotificationQuery, PositionQuery,
    PostingQuery, ReviewRequest,
};
pub use response::{ApiError, ApiErrorResponse, HealthResponse, MeResponse, UpdatedResponse};
pub use state::AppState;
