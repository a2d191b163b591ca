//! End-to-end tests for the full autopanel stack.
//!
//! Each test starts an axum mock backend on an ephemeral port and drives it
//! through the real reqwest gateway, either via the panel directly or by
//! running the compiled binary.

use std::process::Output;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::{Value, json};

use autopanel_adapter_http_reqwest::{Config, HttpAutomationGateway};
use autopanel_app::ports::AutomationGateway;
use autopanel_app::services::automation_panel::{ActionOutcome, AutomationPanel};
use autopanel_app::services::edit_form::GatewayEditForm;
use autopanel_domain::edit_session::EditSession;
use autopanel_domain::id::AutomationId;

type Records = Arc<Mutex<Vec<Value>>>;

fn seed() -> Records {
    Arc::new(Mutex::new(vec![
        json!({
            "automation_id": "1",
            "name": "Job1",
            "description": "first job",
            "status": "active",
            "created_at": "2024-05-01T08:00:00Z",
            "updated_at": "2024-05-01T08:00:00Z",
        }),
        json!({
            "automation_id": "2",
            "name": "Job2",
            "description": "second job",
            "status": "paused",
            "created_at": "2024-05-02T08:00:00Z",
            "updated_at": "2024-05-02T08:00:00Z",
        }),
    ]))
}

async fn list(State(records): State<Records>) -> Json<Vec<Value>> {
    Json(records.lock().unwrap().clone())
}

async fn delete(State(records): State<Records>, Path(id): Path<String>) -> StatusCode {
    let mut records = records.lock().unwrap();
    let before = records.len();
    records.retain(|record| record["automation_id"] != id.as_str());
    if records.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn update(
    State(records): State<Records>,
    Path(id): Path<String>,
    Json(changes): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut records = records.lock().unwrap();
    let record = records
        .iter_mut()
        .find(|record| record["automation_id"] == id.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;
    for field in ["name", "description", "status"] {
        record[field] = changes[field].clone();
    }
    record["updated_at"] = json!("2024-06-01T12:00:00Z");
    Ok(Json(record.clone()))
}

async fn serve(records: Records) -> String {
    let app = Router::new()
        .route("/automations", get(list))
        .route("/automations/{id}", axum::routing::delete(delete).put(update))
        .with_state(records);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn id(value: &str) -> AutomationId {
    AutomationId::new(value).unwrap()
}

/// Run the compiled binary against `base_url` without blocking the mock.
async fn autopanel(base_url: String, args: &'static [&'static str]) -> Output {
    tokio::task::spawn_blocking(move || {
        std::process::Command::new(env!("CARGO_BIN_EXE_autopanel"))
            .args(args)
            .arg("--backend-url")
            .arg(base_url)
            .env_remove("AUTOPANEL_BACKEND_URL")
            .env_remove("AUTOPANEL_SESSION_COOKIE")
            .env_remove("AUTOPANEL_TIMEOUT_SECS")
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn should_follow_backend_confirmations_through_delete_and_edit() {
    let records = seed();
    let base_url = serve(records.clone()).await;
    let gateway: HttpAutomationGateway = Config::new(base_url).build().unwrap();

    let snapshot = gateway.list().await.unwrap();
    let panel = AutomationPanel::new(snapshot, gateway.clone(), GatewayEditForm::new(gateway));

    assert!(panel.delete(&id("1")).await.is_applied());
    assert_eq!(panel.automations().len(), 1);

    // the backend already forgot it: failure, list untouched
    let outcome = panel.delete(&id("1")).await;
    assert!(matches!(outcome, ActionOutcome::Failed(_)));
    assert_eq!(panel.automations().len(), 1);

    assert!(panel.edit(&id("2")).is_some());
    panel.revise_draft(|draft| draft.name = "Job2-renamed".to_string());
    assert!(panel.save_edit().await.is_applied());

    let automations = panel.automations();
    assert_eq!(automations.len(), 1);
    assert_eq!(automations[0].id, id("2"));
    assert_eq!(automations[0].name, "Job2-renamed");
    assert_eq!(automations[0].status.as_str(), "paused");
    assert_eq!(panel.session(), EditSession::Closed);
    assert_eq!(records.lock().unwrap()[0]["name"], "Job2-renamed");
}

#[tokio::test(flavor = "multi_thread")]
async fn should_print_table_when_listing() {
    let base_url = serve(seed()).await;

    let output = autopanel(base_url, &["list"]).await;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Created Date"));
    assert!(stdout.contains("Job1"));
    assert!(stdout.contains("Job2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn should_print_empty_message_when_backend_has_no_automations() {
    let base_url = serve(Arc::new(Mutex::new(Vec::new()))).await;

    let output = autopanel(base_url, &[]).await;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("No automations found."));
}

#[tokio::test(flavor = "multi_thread")]
async fn should_delete_several_automations_from_the_command_line() {
    let records = seed();
    let base_url = serve(records.clone()).await;

    let output = autopanel(base_url, &["delete", "1", "2", "1"]).await;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("deleted 1"));
    assert!(stdout.contains("deleted 2"));
    assert!(stdout.contains("No automations found."));
    assert!(records.lock().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn should_fail_when_deleting_unknown_automation() {
    let records = seed();
    let base_url = serve(records.clone()).await;

    let output = autopanel(base_url, &["delete", "404"]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to delete automation 404"));
    assert_eq!(records.lock().unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn should_update_automation_from_the_command_line() {
    let records = seed();
    let base_url = serve(records.clone()).await;

    let output = autopanel(base_url, &["edit", "2", "--status", "active"]).await;

    assert!(output.status.success());
    assert_eq!(records.lock().unwrap()[1]["status"], "active");
    assert_eq!(records.lock().unwrap()[1]["name"], "Job2");
}

#[tokio::test(flavor = "multi_thread")]
async fn should_fail_when_backend_is_unreachable() {
    let output = autopanel("http://127.0.0.1:9".to_string(), &["list"]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to fetch automations"));
}
