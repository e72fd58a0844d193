//! HTTP front-end: the intake page, the submission endpoint and static assets.
//!
//! `GET /` serves `index.html` from the public directory, falling back to the
//! built-in intake form. `POST /submit` answers with the rendered prescription
//! or a generic 500. Everything else is looked up in the public directory.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::completion::CompletionClient;
use crate::entity::Submission;
use crate::error::Result;
use crate::prescription::prescribe;
use crate::render::CompletionMarkup;

/// Built-in intake form, used when the public directory has no `index.html`.
pub const INDEX_HTML: &str = include_str!("../../public/index.html");

/// Body of every failed submission.
pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";

pub const DEFAULT_PORT: u16 = 3000;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn CompletionClient>,
    pub markup: CompletionMarkup,
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(client: Arc<dyn CompletionClient>, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            markup: CompletionMarkup::default(),
            public_dir: public_dir.into(),
        }
    }

    pub fn with_markup(mut self, markup: CompletionMarkup) -> Self {
        self.markup = markup;
        self
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.public_dir);

    Router::new()
        .route("/", get(index))
        .route("/submit", post(submit))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let path = state.public_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(page) if !page.trim().is_empty() => Html(page),
        _ => Html(INDEX_HTML.to_string()),
    }
}

async fn submit(
    State(state): State<AppState>,
    form: std::result::Result<Form<Submission>, FormRejection>,
) -> Response {
    let span = info_span!("submit", request_id = %Uuid::new_v4());
    async move {
        let submission = match form {
            Ok(Form(submission)) => submission,
            Err(FormRejection::InvalidFormContentType(rejection)) => {
                warn!(%rejection, "Not a form body, continuing with empty fields");
                Submission::default()
            }
            // Oversized or unreadable bodies must not turn into a blank patient.
            Err(rejection) => {
                error!(%rejection, "Failed to read form body");
                return (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR).into_response();
            }
        };

        info!(blank = submission.is_blank(), "Submission received");
        match prescribe(state.client.as_ref(), &submission, state.markup).await {
            Ok(page) => Html(page).into_response(),
            Err(e) => {
                error!(error = %e, "Prescription generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR).into_response()
            }
        }
    }
    .instrument(span)
    .await
}
