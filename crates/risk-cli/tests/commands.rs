//! End-to-end command runs against an in-process stub of the REST API.

use axum::extract::{Form, Path, RawQuery};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use clap::Parser;
use risk_cli::{App, Cli, CliError, Command};
use risk_client::ClientConfig;
use risk_platform::{MemoryStorage, RecordingShell};
use risk_types::{Storage, ToastKind, THEME_KEY, TOKEN_KEY};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

fn profile(token: &str) -> Option<Value> {
    let (username, role, access) = match token {
        "maker" => ("jsmith", "Maker", json!(["risk_event.read", "risk_event.create"])),
        "checker" => ("jpearson", "Approver", json!(["risk_event.read", "risk_event.approve"])),
        "root" => ("hspecter", "Superadmin", Value::Null),
        _ => return None,
    };
    Some(json!({
        "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "email": format!("{}@example.com", username),
        "username": username,
        "first_name": null,
        "last_name": null,
        "role": role,
        "access": access
    }))
}

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string()
}

async fn me(headers: HeaderMap) -> impl IntoResponse {
    match profile(&bearer(&headers)) {
        Some(p) => (StatusCode::OK, Json(p)),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Could not validate credentials" })),
        ),
    }
}

async fn login(Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
    let user = form.get("username").cloned().unwrap_or_default();
    if form.get("password").map(String::as_str) == Some("secret") && profile(&user).is_some() {
        (
            StatusCode::OK,
            Json(json!({ "access_token": user, "token_type": "bearer" })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Incorrect username or password" })),
        )
    }
}

async fn list_events(RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({
        "items": [{
            "id": "INC-2024-002",
            "date": "2024-12-06",
            "time": "11:30",
            "report_title": "Unauthorized API Access Attempt",
            "client_code": "SEC-002",
            "risk_description": query.unwrap_or_default(),
            "severity": "high",
            "status": "Waiting for Approval",
            "images": [],
            "maker": "Jane Smith",
            "approver": "-",
            "resolved_at": null
        }],
        "total": 1,
        "page": 1,
        "pages": 1,
        "limit": 10
    }))
}

fn pending_request() -> Value {
    json!({
        "id": "REQ-007",
        "timestamp": "2024-12-06T11:35:00",
        "action": "edit",
        "status": "pending",
        "payload": { "reportTitle": "Unauthorized API Access Attempt" },
        "target_incident_id": "INC-2024-002",
        "requested_by_id": "7f9c0a52-1111-4c1e-9f00-000000000001",
        "note": null
    })
}

async fn create_request(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": "REQ-008",
        "timestamp": "2024-12-06T12:00:00",
        "action": body["action"],
        "status": "pending",
        "payload": body["payload"],
        "requested_by_id": "7f9c0a52-1111-4c1e-9f00-000000000001"
    }))
}

async fn decide(Path((id, action)): Path<(String, String)>) -> Json<Value> {
    let verb = if action == "approve" { "approved" } else { "rejected" };
    Json(json!({ "message": format!("Request {} {} successfully", id, verb) }))
}

fn app() -> Router {
    let api = Router::new()
        .route("/users/me", get(me))
        .route("/auth/login", post(login))
        .route("/risk-events/", get(list_events))
        .route(
            "/risk-events/approvals/pending",
            get(|| async { Json(json!([pending_request()])) }),
        )
        .route(
            "/risk-events/requests/mine",
            get(|| async { Json(json!([])) }),
        )
        .route("/risk-events/request", post(create_request))
        .route("/risk-events/approvals/:id/:action", post(decide))
        .route(
            "/sessions/",
            get(|| async {
                Json(json!([{
                    "id": "0b5f2e3c-9a43-4b8e-bb5e-6f6d7a1c2e01",
                    "ip_address": "10.0.0.7",
                    "user_agent": "riskctl",
                    "location": "Jakarta",
                    "created_at": "2024-12-06T08:00:00",
                    "last_active_at": "2024-12-06T12:00:00",
                    "is_revoked": false,
                    "is_current": true
                }]))
            }),
        )
        .route("/sessions/:id", delete(|| async { StatusCode::NO_CONTENT }));
    Router::new().nest("/api/v1", api)
}

async fn spawn_api() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });
    format!("http://{}/api/v1", addr)
}

struct Harness {
    app: App,
    storage: MemoryStorage,
    shell: RecordingShell,
}

async fn harness(token: Option<&str>, json: bool) -> Harness {
    let base = spawn_api().await;
    let storage = MemoryStorage::new();
    if let Some(t) = token {
        storage.set(TOKEN_KEY, t).unwrap();
    }
    let shell = RecordingShell::new();
    let app = App::with_parts(
        ClientConfig::new(base),
        Arc::new(storage.clone()),
        Arc::new(shell.clone()),
        json,
    )
    .unwrap();
    Harness {
        app,
        storage,
        shell,
    }
}

fn command(args: &[&str]) -> Command {
    let mut argv = vec!["riskctl"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().command
}

async fn run(h: &Harness, args: &[&str]) -> Result<String, CliError> {
    let mut out = Vec::new();
    h.app.run(command(args), &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn login_stores_token_and_prints_profile() {
    let h = harness(None, false).await;
    let out = run(&h, &["login", "-u", "maker", "-p", "secret"]).await.unwrap();
    assert!(out.contains("role:     Maker"));
    assert_eq!(h.storage.get(TOKEN_KEY).unwrap().as_deref(), Some("maker"));
    let toasts = h.app.toasts().get();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Success);
}

#[tokio::test]
async fn bad_password_reports_detail() {
    let h = harness(None, false).await;
    let err = run(&h, &["login", "-u", "maker", "-p", "nope"]).await.unwrap_err();
    assert_eq!(err.message(), "API error 401: Incorrect username or password");
    // the login endpoint answers 401, which also ends any session
    assert_eq!(err.exit_code(), 3);
    assert_eq!(h.storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(h.shell.last_navigation().as_deref(), Some("/"));
}

#[tokio::test]
async fn whoami_without_session_is_not_signed_in() {
    let h = harness(None, false).await;
    let err = run(&h, &["whoami"]).await.unwrap_err();
    assert!(matches!(err, CliError::NotSignedIn));
}

#[tokio::test]
async fn incidents_sends_filters_and_renders_rows() {
    let h = harness(Some("maker"), false).await;
    let out = run(
        &h,
        &["incidents", "--severity", "high", "--from", "2024-12-01", "--limit", "10"],
    )
    .await
    .unwrap();
    assert!(out.contains("INC-2024-002"));
    assert!(out.contains("6 Desember 2024"));
    assert!(out.contains("page 1/1 (1 total, 10 per page)"));

    let h = harness(Some("maker"), true).await;
    let out = run(&h, &["incidents", "--severity", "high", "--from", "2024-12-01"])
        .await
        .unwrap();
    let v: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        v["items"][0]["riskDescription"],
        "severity=high&date_from=2024-12-01"
    );
}

#[tokio::test]
async fn maker_cannot_approve() {
    let h = harness(Some("maker"), false).await;
    let err = run(&h, &["approve", "REQ-007"]).await.unwrap_err();
    assert!(matches!(err, CliError::PermissionDenied(ref p) if p == "risk_event.approve"));
    assert_eq!(h.app.toasts().get()[0].kind, ToastKind::Error);
}

#[tokio::test]
async fn checker_lists_and_decides() {
    let h = harness(Some("checker"), false).await;
    let out = run(&h, &["pending"]).await.unwrap();
    assert!(out.contains("REQ-007"));
    assert!(out.contains("INC-2024-002"));

    let out = run(&h, &["reject", "REQ-007"]).await.unwrap();
    assert_eq!(out, "Request REQ-007 rejected successfully\n");
}

#[tokio::test]
async fn superadmin_bypasses_access_list() {
    let h = harness(Some("root"), false).await;
    assert_eq!(run(&h, &["can", "risk_event.approve"]).await.unwrap(), "yes\n");
    let out = run(&h, &["approve", "REQ-007"]).await.unwrap();
    assert!(out.contains("approved"));
}

#[tokio::test]
async fn can_without_session_is_no() {
    let h = harness(None, false).await;
    assert_eq!(run(&h, &["can", "risk_event.read"]).await.unwrap(), "no\n");
}

#[tokio::test]
async fn submit_reads_request_file() {
    let h = harness(Some("maker"), false).await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("request.json");
    std::fs::write(
        &file,
        json!({
            "action": "create",
            "payload": { "reportTitle": "Batch job overrun", "severity": "low" },
            "note": "nightly"
        })
        .to_string(),
    )
    .unwrap();

    let out = run(&h, &["submit", file.to_str().unwrap()]).await.unwrap();
    assert!(out.contains("REQ-008"));
    assert!(out.contains("Batch job overrun"));
}

#[tokio::test]
async fn submit_rejects_edit_without_target() {
    let h = harness(Some("maker"), false).await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.json");
    std::fs::write(&file, r#"{"action":"edit","payload":{}}"#).unwrap();

    let err = run(&h, &["submit", file.to_str().unwrap()]).await.unwrap_err();
    assert!(matches!(
        err,
        CliError::Client(risk_client::ClientError::Validation(_))
    ));
}

#[tokio::test]
async fn expired_token_clears_session() {
    let h = harness(Some("stale"), false).await;
    let err = run(&h, &["sessions"]).await;
    // sessions stub does not check tokens; whoami does
    assert!(err.is_ok());
    let err = run(&h, &["whoami"]).await.unwrap_err();
    assert!(matches!(err, CliError::NotSignedIn));
    assert_eq!(h.storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(h.shell.navigations(), vec!["/".to_string()]);
}

#[tokio::test]
async fn sessions_and_revoke() {
    let h = harness(Some("maker"), false).await;
    let out = run(&h, &["sessions"]).await.unwrap();
    assert!(out.starts_with("* 0b5f2e3c-9a43-4b8e-bb5e-6f6d7a1c2e01"));
    let out = run(&h, &["revoke-session", "0b5f2e3c-9a43-4b8e-bb5e-6f6d7a1c2e01"])
        .await
        .unwrap();
    assert!(out.starts_with("revoked"));
}

#[tokio::test]
async fn logout_forgets_user() {
    let h = harness(Some("maker"), false).await;
    run(&h, &["whoami"]).await.unwrap();
    assert!(h.app.user().get().is_some());
    run(&h, &["logout"]).await.unwrap();
    assert!(h.app.user().get().is_none());
    assert_eq!(h.storage.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn theme_commands_persist() {
    let h = harness(None, false).await;
    assert_eq!(run(&h, &["theme"]).await.unwrap(), "system (light)\n");
    assert_eq!(run(&h, &["theme", "toggle"]).await.unwrap(), "light (light)\n");
    assert_eq!(run(&h, &["theme", "toggle"]).await.unwrap(), "dark (dark)\n");
    assert_eq!(h.storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    assert!(h.shell.has_class("dark"));
}

#[tokio::test]
async fn mock_json_rows_carry_display_tokens() {
    let h = harness(None, true).await;
    let out = run(&h, &["mock", "--anchor", "2024-12-10"]).await.unwrap();
    let rows: Vec<Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(rows.len(), 60);
    assert_eq!(rows[0]["formattedDate"], "6 Desember 2024");
    assert_eq!(rows[0]["severityBadge"], "bg-red-50 text-red-700 border-red-200");
    assert_eq!(rows[1]["statusBadge"], "bg-yellow-50 text-yellow-700 border-yellow-200");
    assert_eq!(rows[4]["id"], "INC-AUTO-100");
    assert_eq!(rows[4]["date"], "2024-12-10");
}

#[tokio::test]
async fn file_state_survives_between_runs() {
    let base = spawn_api().await;
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("nested").join("state.json");
    let state = state.to_str().unwrap();

    let login = Cli::try_parse_from([
        "riskctl", "--base-url", base.as_str(), "--state", state, "login", "-u", "checker", "-p", "secret",
    ])
    .unwrap();
    let app = App::from_cli(&login).unwrap();
    app.run(login.command, &mut Vec::new()).await.unwrap();

    let whoami =
        Cli::try_parse_from(["riskctl", "--base-url", base.as_str(), "--state", state, "whoami"]).unwrap();
    let app = App::from_cli(&whoami).unwrap();
    let mut out = Vec::new();
    app.run(whoami.command, &mut out).await.unwrap();
    assert!(String::from_utf8(out).unwrap().contains("jpearson"));

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(state).unwrap()).unwrap();
    assert_eq!(saved[TOKEN_KEY], "checker");
}
