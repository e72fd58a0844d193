use std::process::Command;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use rxform::{
    router, AppState, Completion, CompletionClient, CompletionMarkup, Prompt, Result, RxError,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn rxform_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rxform"));
    cmd.current_dir(dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("GEMINI_MODEL")
        .env_remove("GEMINI_BASE_URL")
        .env_remove("GEMINI_TIMEOUT_SECS");
    cmd
}

/// Returns a fixed text and records every prompt it sees.
struct Canned {
    text: String,
    prompts: Mutex<Vec<String>>,
}

impl Canned {
    fn new(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: text.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CompletionClient for Canned {
    async fn complete(&self, prompt: &Prompt) -> Result<Completion> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(Completion::new(self.text.clone()).with_model("stub"))
    }
}

struct Unavailable;

#[async_trait]
impl CompletionClient for Unavailable {
    async fn complete(&self, _prompt: &Prompt) -> Result<Completion> {
        Err(RxError::Provider {
            status: 503,
            message: "UNAVAILABLE: model overloaded".to_string(),
        })
    }
}

async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn submit(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/submit")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_jane_doe_scenario() {
    let tmp = TempDir::new().unwrap();
    let client = Canned::new("Take ibuprofen 200mg twice daily.");
    let app = router(AppState::new(client.clone(), tmp.path()));

    let response = app
        .oneshot(submit(
            "name=Jane+Doe&age=30&gender=F&address=12+Elm+St&number=555-1234&disease=headache",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let body = body_string(response).await;
    assert!(body.contains("Jane Doe"));
    assert!(body.contains("Take ibuprofen 200mg twice daily."));

    let prompts = client.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    for value in ["Jane Doe", "30", "F", "12 Elm St", "555-1234", "headache"] {
        assert!(prompts[0].contains(value), "prompt missing {value}");
    }
}

#[tokio::test]
async fn test_empty_submission_still_renders() {
    let tmp = TempDir::new().unwrap();
    let client = Canned::new("Rest.");
    let app = router(AppState::new(client.clone(), tmp.path()));

    let response = app
        .oneshot(submit("name=&age=&gender=&address=&number=&disease="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Rest."));
}

#[tokio::test]
async fn test_missing_fields_still_render() {
    let tmp = TempDir::new().unwrap();
    let app = router(AppState::new(Canned::new("Rest."), tmp.path()));

    let response = app.oneshot(submit("")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_completion_markup_is_not_escaped_by_default() {
    let tmp = TempDir::new().unwrap();
    let text = "<h3>Rx</h3>\n* Paracetamol 500mg & fluids";
    let app = router(AppState::new(Canned::new(text), tmp.path()));

    let body = body_string(app.oneshot(submit("name=Jane")).await.unwrap()).await;
    assert!(body.contains(text));
}

#[tokio::test]
async fn test_completion_markup_can_be_escaped() {
    let tmp = TempDir::new().unwrap();
    let state = AppState::new(Canned::new("<h3>Rx</h3>"), tmp.path())
        .with_markup(CompletionMarkup::Escaped);

    let body = body_string(router(state).oneshot(submit("name=Jane")).await.unwrap()).await;
    assert!(body.contains("&lt;h3&gt;Rx&lt;/h3&gt;"));
    assert!(!body.contains("<h3>Rx</h3>"));
}

#[tokio::test]
async fn test_provider_failure_returns_plain_500() {
    let tmp = TempDir::new().unwrap();
    let app = router(AppState::new(Arc::new(Unavailable), tmp.path()));

    let response = app.oneshot(submit("name=Jane+Doe")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));

    let body = body_string(response).await;
    assert!(!body.is_empty());
    assert!(!body.contains("<html"));
    assert!(!body.contains("UNAVAILABLE"));
}

#[tokio::test]
async fn test_index_is_served_from_public_dir() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("index.html"), "<html>custom intake</html>").unwrap();
    let app = router(AppState::new(Canned::new(""), tmp.path()));

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "<html>custom intake</html>");
}

#[tokio::test]
async fn test_index_without_public_dir() {
    let app = router(AppState::new(Canned::new(""), "/nonexistent/rxform/public"));

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(!body.is_empty());
    assert!(body.contains("name=\"disease\""));
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("hospital.png"), [0x89, b'P', b'N', b'G']).unwrap();
    let app = router(AppState::new(Canned::new(""), tmp.path()));

    let response = app.clone().oneshot(get("/hospital.png")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");

    let missing = app.oneshot(get("/missing.png")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_prompt_command_prints_fields() {
    let tmp = TempDir::new().unwrap();

    let output = rxform_cmd(&tmp)
        .args([
            "prompt", "--name", "Jane Doe", "--age", "30", "--disease", "headache",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("certified physician"));
    assert!(stdout.contains("- Name: Jane Doe"));
    assert!(stdout.contains("- Age: 30"));
    assert!(stdout.contains("- Symptoms: headache"));
}

#[test]
fn test_serve_without_api_key_fails() {
    let tmp = TempDir::new().unwrap();

    let output = rxform_cmd(&tmp).args(["serve", "--port", "0"]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GEMINI_API_KEY"));
}

#[test]
fn test_empty_api_key_in_dotenv_is_rejected() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(".env"), "GEMINI_API_KEY=\n").unwrap();

    let output = rxform_cmd(&tmp)
        .args(["generate", "--name", "Jane"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("GEMINI_API_KEY"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_command_against_mock_provider() {
    let mock = Router::new().route(
        "/v1beta/models/gemini-test:generateContent",
        post(|Json(body): Json<Value>| async move {
            let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
            let text = if prompt.contains("Jane Doe") {
                "Take ibuprofen 200mg twice daily."
            } else {
                "wrong patient"
            };
            Json(json!({
                "candidates": [{"content": {"parts": [{"text": text}]}, "finishReason": "STOP"}]
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, mock).await.unwrap();
    });

    let tmp = TempDir::new().unwrap();
    let out_path = tmp.path().join("rx.html");
    let mut cmd = rxform_cmd(&tmp);
    cmd.env("GEMINI_API_KEY", "test-key").args([
        "generate",
        "--name",
        "Jane Doe",
        "--disease",
        "headache",
        "--model",
        "models/gemini-test",
        "--base-url",
        &format!("http://{addr}"),
        "--timeout-secs",
        "10",
        "--output",
        out_path.to_str().unwrap(),
    ]);

    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let page = std::fs::read_to_string(&out_path).unwrap();
    assert!(page.contains("Prescription for Jane Doe"));
    assert!(page.contains("Take ibuprofen 200mg twice daily."));
    assert!(page.contains("Prescription_Jane Doe.html"));
}
