//! HTTP request handlers for the HRMS API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! handler resolves the caller from the `x-user-email` and `x-user-claims`
//! headers, runs one store operation under the store lock and answers with
//! JSON.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{HrmsError, HrmsResult};
use crate::models::Identity;
use crate::roles::Action;
use crate::store::{
    Actor, EmployeeFilter, EmployeeUpdate, HrmsStore, NewCandidate, NewDepartment, NewEmployee,
    NewJobPosting, NewLeaveRequest, NewMission, ReviewDecision,
};

use super::request::{
    BalanceQuery, DateQuery, GeneratePayrollRequest, NotificationQuery, PositionQuery,
    PostingQuery, ReviewRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, HealthResponse, MeResponse, UpdatedResponse,
};
use super::state::AppState;

/// Header carrying the caller's email.
pub const EMAIL_HEADER: &str = "x-user-email";

/// Header carrying the caller's comma-separated role claims.
pub const CLAIMS_HEADER: &str = "x-user-claims";

type ApiResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/me", get(me_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/:id", get(get_employee).put(update_employee))
        .route("/employees/:id/deactivate", post(deactivate_employee))
        .route("/departments", get(list_departments).post(create_department))
        .route("/positions", get(list_positions))
        .route("/leave-requests", get(list_leave).post(submit_leave))
        .route("/leave-requests/:id/approve", post(approve_leave))
        .route("/leave-requests/:id/reject", post(reject_leave))
        .route("/leave-requests/:id/cancel", post(cancel_leave))
        .route("/leave-balance", get(leave_balance_handler))
        .route("/missions", get(list_missions).post(submit_mission))
        .route("/missions/:id/approve", post(approve_mission))
        .route("/missions/:id/reject", post(reject_mission))
        .route("/missions/:id/complete", post(complete_mission))
        .route("/payroll", get(list_payroll))
        .route("/payroll/generate", post(generate_payroll))
        .route("/payroll/:id/pay", post(pay_payroll))
        .route("/attendance/check-in", post(check_in))
        .route("/attendance/check-out", post(check_out))
        .route("/attendance/daily", get(daily_attendance))
        .route("/notifications", get(list_notifications))
        .route("/notifications/read-all", post(read_all_notifications))
        .route("/notifications/:id/read", post(read_notification))
        .route("/contracts/expiring", get(expiring_contracts))
        .route("/contracts/scan", post(scan_contracts))
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/:id/close", post(close_job))
        .route("/jobs/:id/candidates", get(list_candidates).post(add_candidate))
        .route("/candidates/:id/advance", post(advance_candidate))
        .route("/candidates/:id/reject", post(reject_candidate))
        .with_state(state)
}

/// Per-request bookkeeping: correlation id for log lines and timing.
struct RequestContext {
    correlation_id: Uuid,
    operation: &'static str,
    started: Instant,
}

impl RequestContext {
    fn new(operation: &'static str) -> Self {
        let correlation_id = Uuid::new_v4();
        info!(correlation_id = %correlation_id, operation, "Processing request");
        Self {
            correlation_id,
            operation,
            started: Instant::now(),
        }
    }

    /// Reads the caller's identity from the request headers.
    fn identity(&self, headers: &HeaderMap) -> Result<Identity, ApiErrorResponse> {
        self.check(identity_from_headers(headers))
    }

    /// Resolves the caller against the store.
    fn actor(&self, store: &HrmsStore, identity: Identity) -> Actor {
        let actor = store.actor_for(identity);
        debug!(
            correlation_id = %self.correlation_id,
            email = %actor.identity.email,
            roles = ?actor.roles.to_vec(),
            source = ?actor.source,
            employee_id = ?actor.employee_id,
            "Caller resolved"
        );
        actor
    }

    /// Turns a store error into an API error, logging it.
    fn check<T>(&self, result: HrmsResult<T>) -> Result<T, ApiErrorResponse> {
        result.map_err(|err| {
            warn!(
                correlation_id = %self.correlation_id,
                operation = self.operation,
                error = %err,
                "Request failed"
            );
            err.into()
        })
    }

    /// Unwraps a JSON body, mapping rejections to 400 responses.
    fn body<T>(&self, payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiErrorResponse> {
        match payload {
            Ok(Json(value)) => Ok(value),
            Err(rejection) => Err(self.reject_json(rejection)),
        }
    }

    /// Like [`RequestContext::body`], but a request without a JSON body
    /// yields the default value.
    fn optional_body<T: Default>(
        &self,
        payload: Result<Json<T>, JsonRejection>,
    ) -> Result<T, ApiErrorResponse> {
        match payload {
            Ok(Json(value)) => Ok(value),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
            Err(rejection) => Err(self.reject_json(rejection)),
        }
    }

    fn reject_json(&self, rejection: JsonRejection) -> ApiErrorResponse {
        let error = match rejection {
            JsonRejection::JsonDataError(err) => {
                // Get the body text which contains the detailed error from serde
                let body_text = err.body_text();
                warn!(
                    correlation_id = %self.correlation_id,
                    error = %body_text,
                    "JSON data error"
                );
                if body_text.contains("missing field") {
                    ApiError::validation_error(body_text)
                } else {
                    ApiError::malformed_json(body_text)
                }
            }
            JsonRejection::JsonSyntaxError(err) => {
                warn!(
                    correlation_id = %self.correlation_id,
                    error = %err,
                    "JSON syntax error"
                );
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => ApiError::malformed_json("Failed to parse request body"),
        };
        ApiErrorResponse::bad_request(error)
    }

    fn ok<T: Serialize>(&self, body: T) -> ApiResult {
        self.respond(StatusCode::OK, body)
    }

    fn created<T: Serialize>(&self, body: T) -> ApiResult {
        self.respond(StatusCode::CREATED, body)
    }

    fn respond<T: Serialize>(&self, status: StatusCode, body: T) -> ApiResult {
        info!(
            correlation_id = %self.correlation_id,
            operation = self.operation,
            status = status.as_u16(),
            duration_us = self.started.elapsed().as_micros() as u64,
            "Request completed"
        );
        Ok((
            status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response())
    }
}

/// Builds the caller's identity from the request headers.
///
/// A missing or blank email is unauthenticated; claims are optional.
fn identity_from_headers(headers: &HeaderMap) -> HrmsResult<Identity> {
    let email = headers
        .get(EMAIL_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .ok_or(HrmsError::Unauthenticated)?;

    let claims: Vec<String> = headers
        .get(CLAIMS_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|claim| !claim.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(Identity::from_email(email).with_claims(claims))
}

fn today(store: &HrmsStore, now: DateTime<Utc>) -> NaiveDate {
    store.local_time(now).date()
}

// -----------------------------------------------------------------------------
// Session
// -----------------------------------------------------------------------------

/// Handler for GET /health.
async fn health_handler() -> ApiResult {
    let ctx = RequestContext::new("health");
    ctx.ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for GET /me.
async fn me_handler(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
    let ctx = RequestContext::new("me");
    let identity = ctx.identity(&headers)?;
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);

    let employee = match actor.employee_id.as_deref() {
        Some(id) => Some(ctx.check(store.employee(id))?.clone()),
        None => None,
    };
    let unread_notifications = if employee.is_some() {
        ctx.check(store.unread_notifications(&actor))?
    } else {
        0
    };
    ctx.ok(MeResponse {
        identity: actor.identity,
        roles: actor.roles,
        source: actor.source,
        employee,
        unread_notifications,
    })
}

/// Handler for GET /dashboard.
async fn dashboard_handler(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
    let ctx = RequestContext::new("dashboard");
    let identity = ctx.identity(&headers)?;
    let now = state.clock().now();
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);
    let dashboard = ctx.check(store.dashboard(&actor, today(&store, now)))?;
    ctx.ok(dashboard)
}

// -----------------------------------------------------------------------------
// Directory
// -----------------------------------------------------------------------------

/// Handler for GET /employees.
async fn list_employees(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(filter): Query<EmployeeFilter>,
) -> ApiResult {
    let ctx = RequestContext::new("list_employees");
    let identity = ctx.identity(&headers)?;
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);
    let employees = ctx.check(store.employees(&actor, &filter))?;
    ctx.ok(employees)
}

/// Handler for POST /employees.
async fn create_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> ApiResult {
    let ctx = RequestContext::new("create_employee");
    let identity = ctx.identity(&headers)?;
    let form = ctx.body(payload)?;
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let employee = ctx.check(store.create_employee(&actor, form))?;
    ctx.created(employee)
}

/// Handler for GET /employees/:id.
async fn get_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let ctx = RequestContext::new("get_employee");
    let identity = ctx.identity(&headers)?;
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);
    ctx.check(actor.authorize(Action::ViewDirectory))?;
    let employee = ctx.check(store.employee(&id))?;
    ctx.ok(employee)
}

/// Handler for PUT /employees/:id.
async fn update_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> ApiResult {
    let ctx = RequestContext::new("update_employee");
    let identity = ctx.identity(&headers)?;
    let update = ctx.body(payload)?;
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let employee = ctx.check(store.update_employee(&actor, &id, update))?;
    ctx.ok(employee)
}

/// Handler for POST /employees/:id/deactivate.
async fn deactivate_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let ctx = RequestContext::new("deactivate_employee");
    let identity = ctx.identity(&headers)?;
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let employee = ctx.check(store.deactivate_employee(&actor, &id))?;
    ctx.ok(employee)
}

/// Handler for GET /departments.
async fn list_departments(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
    let ctx = RequestContext::new("list_departments");
    let identity = ctx.identity(&headers)?;
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);
    let departments = ctx.check(store.departments(&actor))?;
    ctx.ok(departments)
}

/// Handler for POST /departments.
async fn create_department(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewDepartment>, JsonRejection>,
) -> ApiResult {
    let ctx = RequestContext::new("create_department");
    let identity = ctx.identity(&headers)?;
    let form = ctx.body(payload)?;
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let department = ctx.check(store.create_department(&actor, form))?;
    ctx.created(department)
}

/// Handler for GET /positions.
async fn list_positions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PositionQuery>,
) -> ApiResult {
    let ctx = RequestContext::new("list_positions");
    let identity = ctx.identity(&headers)?;
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);
    let positions = ctx.check(store.positions(&actor, query.department_id.as_deref()))?;
    ctx.ok(positions)
}

// -----------------------------------------------------------------------------
// Leave
// -----------------------------------------------------------------------------

/// Handler for GET /leave-requests.
async fn list_leave(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
    let ctx = RequestContext::new("list_leave");
    let identity = ctx.identity(&headers)?;
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);
    let requests = ctx.check(store.leave_requests_for(&actor))?;
    ctx.ok(requests)
}

/// Handler for POST /leave-requests.
async fn submit_leave(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewLeaveRequest>, JsonRejection>,
) -> ApiResult {
    let ctx = RequestContext::new("submit_leave");
    let identity = ctx.identity(&headers)?;
    let form = ctx.body(payload)?;
    let now = state.clock().now();
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let request = ctx.check(store.submit_leave(&actor, form, now))?;
    ctx.created(request)
}

async fn review_leave(
    state: AppState,
    headers: HeaderMap,
    id: String,
    decision: ReviewDecision,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> ApiResult {
    let ctx = RequestContext::new("review_leave");
    let identity = ctx.identity(&headers)?;
    let review = ctx.optional_body(payload)?;
    let now = state.clock().now();
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let request = ctx.check(store.review_leave(&actor, &id, decision, review.comment, now))?;
    ctx.ok(request)
}

/// Handler for POST /leave-requests/:id/approve.
async fn approve_leave(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> ApiResult {
    review_leave(state, headers, id, ReviewDecision::Approve, payload).await
}

/// Handler for POST /leave-requests/:id/reject.
async fn reject_leave(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> ApiResult {
    review_leave(state, headers, id, ReviewDecision::Reject, payload).await
}

/// Handler for POST /leave-requests/:id/cancel.
async fn cancel_leave(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let ctx = RequestContext::new("cancel_leave");
    let identity = ctx.identity(&headers)?;
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let request = ctx.check(store.cancel_leave(&actor, &id))?;
    ctx.ok(request)
}

/// Handler for GET /leave-balance.
async fn leave_balance_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BalanceQuery>,
) -> ApiResult {
    let ctx = RequestContext::new("leave_balance");
    let identity = ctx.identity(&headers)?;
    let now = state.clock().now();
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);

    let own = actor.employee_id.as_deref();
    let employee_id = match query.employee_id.as_deref() {
        Some(id) if Some(id) != own => {
            ctx.check(actor.authorize(Action::ViewAllLeave))?;
            ctx.check(store.employee(id))?.id.clone()
        }
        _ => ctx.check(actor.require_employee())?.to_string(),
    };
    let year = query.year.unwrap_or_else(|| today(&store, now).year());
    ctx.ok(store.leave_balances(&employee_id, year))
}

// -----------------------------------------------------------------------------
// Missions
// -----------------------------------------------------------------------------

/// Handler for GET /missions.
async fn list_missions(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
    let ctx = RequestContext::new("list_missions");
    let identity = ctx.identity(&headers)?;
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);
    let missions = ctx.check(store.missions_for(&actor))?;
    ctx.ok(missions)
}

/// Handler for POST /missions.
async fn submit_mission(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewMission>, JsonRejection>,
) -> ApiResult {
    let ctx = RequestContext::new("submit_mission");
    let identity = ctx.identity(&headers)?;
    let form = ctx.body(payload)?;
    let now = state.clock().now();
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let mission = ctx.check(store.submit_mission(&actor, form, now))?;
    ctx.created(mission)
}

async fn review_mission(
    state: AppState,
    headers: HeaderMap,
    id: String,
    decision: ReviewDecision,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> ApiResult {
    let ctx = RequestContext::new("review_mission");
    let identity = ctx.identity(&headers)?;
    let review = ctx.optional_body(payload)?;
    let now = state.clock().now();
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let mission = ctx.check(store.review_mission(&actor, &id, decision, review.comment, now))?;
    ctx.ok(mission)
}

/// Handler for POST /missions/:id/approve.
async fn approve_mission(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> ApiResult {
    review_mission(state, headers, id, ReviewDecision::Approve, payload).await
}

/// Handler for POST /missions/:id/reject.
async fn reject_mission(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> ApiResult {
    review_mission(state, headers, id, ReviewDecision::Reject, payload).await
}

/// Handler for POST /missions/:id/complete.
async fn complete_mission(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let ctx = RequestContext::new("complete_mission");
    let identity = ctx.identity(&headers)?;
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let mission = ctx.check(store.complete_mission(&actor, &id))?;
    ctx.ok(mission)
}

// -----------------------------------------------------------------------------
// Payroll
// -----------------------------------------------------------------------------

/// Handler for GET /payroll.
async fn list_payroll(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
    let ctx = RequestContext::new("list_payroll");
    let identity = ctx.identity(&headers)?;
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);
    let payrolls = ctx.check(store.payrolls_for(&actor))?;
    ctx.ok(payrolls)
}

/// Handler for POST /payroll/generate.
async fn generate_payroll(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<GeneratePayrollRequest>, JsonRejection>,
) -> ApiResult {
    let ctx = RequestContext::new("generate_payroll");
    let identity = ctx.identity(&headers)?;
    let request = ctx.body(payload)?;
    let now = state.clock().now();
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let created = ctx.check(store.generate_payroll(&actor, request.year, request.month, now))?;
    ctx.created(created)
}

/// Handler for POST /payroll/:id/pay.
async fn pay_payroll(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let ctx = RequestContext::new("pay_payroll");
    let identity = ctx.identity(&headers)?;
    let now = state.clock().now();
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let payroll = ctx.check(store.pay_payroll(&actor, &id, now))?;
    ctx.ok(payroll)
}

// -----------------------------------------------------------------------------
// Attendance
// -----------------------------------------------------------------------------

/// Handler for POST /attendance/check-in.
async fn check_in(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
    let ctx = RequestContext::new("check_in");
    let identity = ctx.identity(&headers)?;
    let now = state.clock().now();
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let at = store.local_time(now);
    let record = ctx.check(store.check_in(&actor, at))?;
    ctx.ok(record)
}

/// Handler for POST /attendance/check-out.
async fn check_out(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
    let ctx = RequestContext::new("check_out");
    let identity = ctx.identity(&headers)?;
    let now = state.clock().now();
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let at = store.local_time(now);
    let record = ctx.check(store.check_out(&actor, at))?;
    ctx.ok(record)
}

/// Handler for GET /attendance/daily.
async fn daily_attendance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DateQuery>,
) -> ApiResult {
    let ctx = RequestContext::new("daily_attendance");
    let identity = ctx.identity(&headers)?;
    let now = state.clock().now();
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);
    let date = query.date.unwrap_or_else(|| today(&store, now));
    let rows = ctx.check(store.daily_report(&actor, date))?;
    ctx.ok(rows)
}

// -----------------------------------------------------------------------------
// Notifications
// -----------------------------------------------------------------------------

/// Handler for GET /notifications.
async fn list_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<NotificationQuery>,
) -> ApiResult {
    let ctx = RequestContext::new("list_notifications");
    let identity = ctx.identity(&headers)?;
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);
    let notifications = ctx.check(store.notifications_for(&actor, query.unread_only))?;
    ctx.ok(notifications)
}

/// Handler for POST /notifications/:id/read.
async fn read_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let ctx = RequestContext::new("read_notification");
    let identity = ctx.identity(&headers)?;
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let notification = ctx.check(store.mark_notification_read(&actor, &id))?;
    ctx.ok(notification)
}

/// Handler for POST /notifications/read-all.
async fn read_all_notifications(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
    let ctx = RequestContext::new("read_all_notifications");
    let identity = ctx.identity(&headers)?;
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let updated = ctx.check(store.mark_all_notifications_read(&actor))?;
    ctx.ok(UpdatedResponse { updated })
}

// -----------------------------------------------------------------------------
// Contracts
// -----------------------------------------------------------------------------

/// Handler for GET /contracts/expiring.
async fn expiring_contracts(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
    let ctx = RequestContext::new("expiring_contracts");
    let identity = ctx.identity(&headers)?;
    let now = state.clock().now();
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);
    let contracts = ctx.check(store.expiring_contracts(&actor, today(&store, now)))?;
    ctx.ok(contracts)
}

/// Handler for POST /contracts/scan.
async fn scan_contracts(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
    let ctx = RequestContext::new("scan_contracts");
    let identity = ctx.identity(&headers)?;
    let now = state.clock().now();
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let date = today(&store, now);
    let created = ctx.check(store.scan_contract_expiries(&actor, date, now))?;
    ctx.ok(created)
}

// -----------------------------------------------------------------------------
// Recruitment
// -----------------------------------------------------------------------------

/// Handler for GET /jobs.
async fn list_jobs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PostingQuery>,
) -> ApiResult {
    let ctx = RequestContext::new("list_jobs");
    ctx.identity(&headers)?;
    let store = state.store().read().await;
    ctx.ok(store.job_postings(query.status))
}

/// Handler for POST /jobs.
async fn create_job(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewJobPosting>, JsonRejection>,
) -> ApiResult {
    let ctx = RequestContext::new("create_job");
    let identity = ctx.identity(&headers)?;
    let form = ctx.body(payload)?;
    let now = state.clock().now();
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let date = today(&store, now);
    let posting = ctx.check(store.create_posting(&actor, form, date))?;
    ctx.created(posting)
}

/// Handler for POST /jobs/:id/close.
async fn close_job(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let ctx = RequestContext::new("close_job");
    let identity = ctx.identity(&headers)?;
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let posting = ctx.check(store.close_posting(&actor, &id))?;
    ctx.ok(posting)
}

/// Handler for GET /jobs/:id/candidates.
async fn list_candidates(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let ctx = RequestContext::new("list_candidates");
    let identity = ctx.identity(&headers)?;
    let store = state.store().read().await;
    let actor = ctx.actor(&store, identity);
    let candidates = ctx.check(store.candidates(&actor, &id))?;
    ctx.ok(candidates)
}

/// Handler for POST /jobs/:id/candidates.
async fn add_candidate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<NewCandidate>, JsonRejection>,
) -> ApiResult {
    let ctx = RequestContext::new("add_candidate");
    let identity = ctx.identity(&headers)?;
    let form = ctx.body(payload)?;
    let now = state.clock().now();
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let candidate = ctx.check(store.add_candidate(&actor, &id, form, now))?;
    ctx.created(candidate)
}

/// Handler for POST /candidates/:id/advance.
async fn advance_candidate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let ctx = RequestContext::new("advance_candidate");
    let identity = ctx.identity(&headers)?;
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let candidate = ctx.check(store.advance_candidate(&actor, &id))?;
    ctx.ok(candidate)
}

/// Handler for POST /candidates/:id/reject.
async fn reject_candidate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let ctx = RequestContext::new("reject_candidate");
    let identity = ctx.identity(&headers)?;
    let mut store = state.store().write().await;
    let actor = ctx.actor(&store, identity);
    let candidate = ctx.check(store.reject_candidate(&actor, &id))?;
    ctx.ok(candidate)
}
