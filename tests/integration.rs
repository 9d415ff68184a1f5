//! Integration tests for the HRMS engine HTTP API.
//!
//! The suite drives the router end to end against the seed data with the
//! clock pinned to Monday 2026-10-19 10:00 UTC:
//! - Identity and role resolution
//! - Leave requests and their notifications
//! - Missions
//! - Payroll generation and payment
//! - Attendance punches and the daily report
//! - Contract expiry scans
//! - Recruitment pipeline
//! - Dashboards
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use hrms_engine::api::{AppState, create_router};
use hrms_engine::clock::FixedClock;
use hrms_engine::config::ConfigLoader;

const AMINA: &str = "employee.amina@acme.test";
const LEE: &str = "manager.lee@acme.test";
const SARA: &str = "hr.sara@acme.test";
const OMAR: &str = "payroll.omar@acme.test";
const ADMIN: &str = "admin@acme.test";
const LINA: &str = "lina.petrova@acme.test";

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/hrms").expect("Failed to load config");
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap();
    AppState::with_clock(config, FixedClock(now))
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn get(router: &Router, uri: &str, email: &str) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .uri(uri)
            .header("x-user-email", email)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn post(router: &Router, uri: &str, email: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-user-email", email);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(router, request).await
}

fn leave_request(start: &str, end: &str, justification: &str) -> Value {
    json!({
        "leave_type": "annual",
        "start_date": start,
        "end_date": end,
        "justification": justification
    })
}

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// SECTION 1: Identity and Roles
// =============================================================================

#[tokio::test]
async fn test_missing_email_is_401() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        Request::builder()
            .uri("/leave-requests")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_me_resolves_email_prefix() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/me", SARA).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "email_prefix");
    assert_eq!(body["roles"], json!(["employee", "hr_admin"]));
    assert_eq!(body["employee"]["id"], "emp_003");
}

#[tokio::test]
async fn test_me_claims_take_precedence() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        Request::builder()
            .uri("/me")
            .header("x-user-email", AMINA)
            .header("x-user-claims", "HR-Team")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "claims");
    assert_eq!(body["roles"], json!(["employee", "hr_admin"]));
}

#[tokio::test]
async fn test_me_unknown_identity_gets_fallback() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/me", LINA).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert_eq!(
        body["roles"],
        json!(["employee", "line_manager", "hr_admin", "payroll_specialist", "system_admin"])
    );
    assert_eq!(body["employee"]["id"], "emp_007");
}

#[tokio::test]
async fn test_me_outside_directory_has_no_record() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/me", "employee.visitor@acme.test").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["employee"].is_null());
    assert_eq!(body["unread_notifications"], 0);
}

// =============================================================================
// SECTION 2: Directory
// =============================================================================

#[tokio::test]
async fn test_employee_directory_filters() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/employees?department_id=dep_fin", AMINA).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["emp_004", "emp_007"]);
}

#[tokio::test]
async fn test_hr_creates_employee() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/employees",
        SARA,
        Some(json!({
            "first_name": "Yara",
            "last_name": "Nasser",
            "email": "yara.nasser@acme.test",
            "department_id": "dep_eng",
            "position_id": "pos_dev",
            "manager_id": "emp_002",
            "employment_type": "full_time",
            "hire_date": "2026-11-01",
            "base_salary": "4100.00"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "active");
    let id = body["id"].as_str().unwrap();

    let (status, fetched) = get(&router, &format!("/employees/{}", id), AMINA).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "yara.nasser@acme.test");
}

#[tokio::test]
async fn test_employee_cannot_create_employee() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/employees",
        AMINA,
        Some(json!({
            "first_name": "Yara",
            "last_name": "Nasser",
            "email": "yara.nasser@acme.test",
            "department_id": "dep_eng",
            "position_id": "pos_dev",
            "employment_type": "full_time",
            "hire_date": "2026-11-01",
            "base_salary": "4100.00"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_deactivate_is_soft() {
    let router = create_router_for_test();
    let (status, body) = post(&router, "/employees/emp_005/deactivate", SARA, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "inactive");

    let (status, body) = post(&router, "/employees/emp_005/deactivate", SARA, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_TRANSITION");

    let (status, _) = get(&router, "/employees/emp_005", SARA).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// SECTION 3: Leave Requests
// =============================================================================

#[tokio::test]
async fn test_blank_justification_is_rejected() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/leave-requests",
        AMINA,
        Some(leave_request("2026-11-02", "2026-11-04", "   ")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"], "justification");
}

#[tokio::test]
async fn test_leave_submission_notifies_manager() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/leave-requests",
        AMINA,
        Some(leave_request("2026-11-02", "2026-11-04", "Family visit")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["days"], 3);
    let link = format!("/leave-requests/{}", body["id"].as_str().unwrap());

    let (_, inbox) = get(&router, "/notifications?unread_only=true", LEE).await;
    let entry = inbox
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["link"] == link.as_str())
        .expect("manager notified");
    assert_eq!(entry["kind"], "leave_request");

    let (_, inbox) = get(&router, "/notifications", SARA).await;
    assert!(inbox.as_array().unwrap().iter().any(|n| n["link"] == link.as_str()));
}

#[tokio::test]
async fn test_leave_overlapping_pending_request_conflicts() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/leave-requests",
        AMINA,
        Some(leave_request("2026-11-17", "2026-11-19", "Overlap")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_manager_approval_notifies_owner() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/leave-requests/lv_003/approve",
        LEE,
        Some(json!({ "comment": "Enjoy" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["reviewer_id"], "emp_002");

    let (_, inbox) = get(&router, "/notifications?unread_only=true", AMINA).await;
    let decision = inbox
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["link"] == "/leave-requests/lv_003")
        .expect("owner notified");
    assert_eq!(decision["kind"], "leave_decision");

    let (status, body) = post(&router, "/leave-requests/lv_003/reject", LEE, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_employee_cannot_approve() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/leave-requests/lv_003/approve",
        "employee.noah@acme.test",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_owner_cancels_pending_leave() {
    let router = create_router_for_test();
    let (status, body) = post(&router, "/leave-requests/lv_003/cancel", AMINA, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");

    let (status, _) = post(&router, "/leave-requests/lv_001/cancel", AMINA, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_leave_visibility() {
    let router = create_router_for_test();

    let (_, own) = get(&router, "/leave-requests", AMINA).await;
    assert_eq!(ids(&own).len(), 2);

    let (_, team) = get(&router, "/leave-requests", LEE).await;
    assert_eq!(ids(&team).len(), 3);

    let (_, all) = get(&router, "/leave-requests", SARA).await;
    assert_eq!(ids(&all).len(), 3);
}

#[tokio::test]
async fn test_leave_balance() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/leave-balance", AMINA).await;

    assert_eq!(status, StatusCode::OK);
    let annual = body
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["leave_type"] == "annual")
        .unwrap();
    assert_eq!(annual["year"], 2026);
    assert_eq!(annual["entitlement"], 25);
    assert_eq!(annual["used"], 5);
    assert_eq!(annual["pending"], 3);
    assert_eq!(annual["remaining"], 20);
}

#[tokio::test]
async fn test_other_leave_balance_needs_leave_rights() {
    let router = create_router_for_test();

    let (status, _) = get(&router, "/leave-balance?employee_id=emp_003", AMINA).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = get(&router, "/leave-balance?employee_id=emp_001", SARA).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// SECTION 4: Missions
// =============================================================================

#[tokio::test]
async fn test_mission_lifecycle() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/missions",
        AMINA,
        Some(json!({
            "destination": "Madrid",
            "purpose": "Partner onboarding",
            "start_date": "2026-11-09",
            "end_date": "2026-11-10",
            "estimated_cost": "640.456"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["estimated_cost"], "640.46");
    let id = body["id"].as_str().unwrap().to_string();

    let (status, _) = post(&router, &format!("/missions/{}/complete", id), AMINA, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = post(&router, &format!("/missions/{}/approve", id), LEE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");

    let (status, body) = post(&router, &format!("/missions/{}/complete", id), AMINA, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
}

// =============================================================================
// SECTION 5: Payroll
// =============================================================================

#[tokio::test]
async fn test_payroll_generate_and_pay() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/payroll/generate",
        OMAR,
        Some(json!({ "year": 2026, "month": 10 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created = body.as_array().unwrap();
    assert_eq!(created.len(), 7);
    let amina = created
        .iter()
        .find(|p| p["employee_id"] == "emp_001")
        .unwrap();
    assert_eq!(amina["status"], "draft");
    assert_eq!(amina["net_salary"], "4045.50");

    let id = amina["id"].as_str().unwrap();
    let (status, paid) = post(&router, &format!("/payroll/{}/pay", id), OMAR, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "paid");

    let (_, inbox) = get(&router, "/notifications?unread_only=true", AMINA).await;
    let link = format!("/payroll/{}", id);
    assert!(inbox.as_array().unwrap().iter().any(|n| n["link"] == link.as_str()));

    let (status, _) = post(&router, &format!("/payroll/{}/pay", id), OMAR, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, again) = post(
        &router,
        "/payroll/generate",
        OMAR,
        Some(json!({ "year": 2026, "month": 10 })),
    )
    .await;
    assert!(again.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_payroll_invalid_month() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/payroll/generate",
        OMAR,
        Some(json!({ "year": 2026, "month": 13 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "month");
}

#[tokio::test]
async fn test_employee_cannot_generate_payroll() {
    let router = create_router_for_test();
    let (status, _) = post(
        &router,
        "/payroll/generate",
        AMINA,
        Some(json!({ "year": 2026, "month": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = get(&router, "/payroll", AMINA).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["pr_001"]);
}

// =============================================================================
// SECTION 6: Attendance
// =============================================================================

#[tokio::test]
async fn test_check_in_twice_conflicts() {
    let router = create_router_for_test();
    let (status, body) = post(&router, "/attendance/check-in", ADMIN, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["check_in"], "10:00:00");

    let (status, body) = post(&router, "/attendance/check-in", ADMIN, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_check_out_without_check_in_conflicts() {
    let router = create_router_for_test();
    let (status, _) = post(&router, "/attendance/check-out", OMAR, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_daily_report_statuses() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/attendance/daily", SARA).await;
    assert_eq!(status, StatusCode::OK);

    let status_of = |id: &str| {
        body.as_array()
            .unwrap()
            .iter()
            .find(|row| row["employee_id"] == id)
            .map(|row| row["assessment"]["status"].as_str().unwrap().to_string())
            .unwrap()
    };
    assert_eq!(status_of("emp_001"), "in_progress");
    assert_eq!(status_of("emp_003"), "half_day");
    assert_eq!(status_of("emp_004"), "absent");
    assert_eq!(status_of("emp_005"), "on_leave");

    let (status, team) = get(&router, "/attendance/daily?date=2026-10-19", LEE).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(team.as_array().unwrap().len(), 2);

    let (status, _) = get(&router, "/attendance/daily", AMINA).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// SECTION 7: Notifications
// =============================================================================

#[tokio::test]
async fn test_mark_read_and_read_all() {
    let router = create_router_for_test();

    let (status, body) = post(&router, "/notifications/ntf_003/read", AMINA, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = post(&router, "/notifications/ntf_003/read", LEE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["read"], true);

    let (status, body) = post(&router, "/notifications/read-all", AMINA, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 1);

    let (_, unread) = get(&router, "/notifications?unread_only=true", AMINA).await;
    assert!(unread.as_array().unwrap().is_empty());
}

// =============================================================================
// SECTION 8: Contracts
// =============================================================================

#[tokio::test]
async fn test_contract_scan_notifies_hr_once() {
    let router = create_router_for_test();

    let (status, expiring) = get(&router, "/contracts/expiring", SARA).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(expiring[0]["employee_id"], "emp_005");
    assert_eq!(expiring[0]["status"]["days_remaining"], 17);

    let (status, created) = post(&router, "/contracts/scan", SARA, None).await;
    assert_eq!(status, StatusCode::OK);
    let recipients: Vec<&str> = created
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["recipient_id"].as_str().unwrap())
        .collect();
    assert_eq!(recipients, vec!["emp_003", "emp_006"]);

    let (_, again) = post(&router, "/contracts/scan", SARA, None).await;
    assert!(again.as_array().unwrap().is_empty());

    let (status, _) = post(&router, "/contracts/scan", AMINA, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// SECTION 9: Recruitment
// =============================================================================

#[tokio::test]
async fn test_recruitment_pipeline() {
    let router = create_router_for_test();

    let (status, open) = get(&router, "/jobs?status=open", AMINA).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&open), vec!["job_001"]);

    let (status, candidate) = post(
        &router,
        "/jobs/job_001/candidates",
        SARA,
        Some(json!({ "full_name": "Jin Park", "email": "jin.park@mail.test" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(candidate["stage"], "applied");
    assert_eq!(candidate["applied_on"], "2026-10-19");

    let id = candidate["id"].as_str().unwrap();
    let (status, advanced) = post(&router, &format!("/candidates/{}/advance", id), SARA, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(advanced["stage"], "screening");

    let (status, rejected) = post(&router, &format!("/candidates/{}/reject", id), SARA, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["stage"], "rejected");

    let (status, _) = post(&router, &format!("/candidates/{}/advance", id), SARA, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, list) = get(&router, "/jobs/job_001/candidates", SARA).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_closed_posting_rejects_candidates() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/jobs/job_002/candidates",
        SARA,
        Some(json!({ "full_name": "Jin Park", "email": "jin.park@mail.test" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_create_and_close_posting() {
    let router = create_router_for_test();
    let (status, posting) = post(
        &router,
        "/jobs",
        SARA,
        Some(json!({ "title": "Payroll Analyst", "department_id": "dep_fin" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(posting["status"], "open");
    assert_eq!(posting["opened_on"], "2026-10-19");

    let id = posting["id"].as_str().unwrap();
    let (status, closed) = post(&router, &format!("/jobs/{}/close", id), SARA, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["status"], "closed");
}

// =============================================================================
// SECTION 10: Dashboards
// =============================================================================

#[tokio::test]
async fn test_employee_dashboard_has_one_section() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/dashboard", AMINA).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("employee").is_some());
    assert!(body.get("manager").is_none());
    assert!(body.get("hr").is_none());
    assert!(body.get("payroll").is_none());
    assert!(body.get("admin").is_none());
    assert_eq!(body["employee"]["pending_leave_requests"], 1);
}

#[tokio::test]
async fn test_admin_dashboard_has_every_section() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/dashboard", ADMIN).await;

    assert_eq!(status, StatusCode::OK);
    for section in ["employee", "manager", "hr", "payroll", "admin"] {
        assert!(body.get(section).is_some(), "missing {}", section);
    }
    assert_eq!(body["hr"]["headcount"], 7);
    assert_eq!(body["hr"]["expiring_contracts"], 1);
    assert_eq!(body["admin"]["fallback_identities"], 1);
}

// =============================================================================
// SECTION 11: Error Cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        Request::builder()
            .method("POST")
            .uri("/missions")
            .header("x-user-email", AMINA)
            .header("Content-Type", "application/json")
            .body(Body::from("{ invalid json }"))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_unknown_record_is_404() {
    let router = create_router_for_test();
    let (status, body) = post(&router, "/missions/ms_999/approve", LEE, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
