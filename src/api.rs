//! REST API wrapper around the orchestrator.
//!
//! A thin axum surface for browser front-ends: each endpoint locks the
//! in-memory session map, runs one orchestrator operation, and returns
//! JSON. Sessions are keyed by a client-chosen ID and live only as long
//! as the process; no authentication and no persistence, matching the
//! single-user scope of the assistant.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get, post};
use mentor_search::ConceptResources;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::info;

use crate::agents::analyzer::TaskBreakdown;
use crate::config::MentorConfig;
use crate::error::{MentorError, Result};
use crate::orchestrator::Orchestrator;

/// Shared server state: the base config plus per-session orchestrators.
pub struct ApiState {
    config: MentorConfig,
    sessions: Mutex<HashMap<String, Orchestrator>>,
}

type SharedState = Arc<ApiState>;

/// Build the API router.
pub fn router(config: MentorConfig) -> Router {
    let state = Arc::new(ApiState {
        config,
        sessions: Mutex::new(HashMap::new()),
    });

    Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze-task", post(analyze_task))
        .route("/api/find-resources", post(find_resources))
        .route("/api/generate-plan", post(generate_plan))
        .route("/api/get-code-example", post(get_code_example))
        .route("/api/ask-tutor", post(ask_tutor))
        .route("/api/export-markdown", post(export_markdown))
        .route("/api/reset-session", delete(reset_session))
        .with_state(state)
}

/// Bind and serve the API until the process exits.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, config: MentorConfig) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "mentor API listening");
    axum::serve(listener, router(config))
        .await
        .map_err(|e| MentorError::Server(e.to_string()))
}

// ── Error mapping ───────────────────────────────────────────────────────

/// API-level error: status code plus a JSON `detail` body.
struct ApiError(StatusCode, String);

impl From<MentorError> for ApiError {
    fn from(err: MentorError) -> Self {
        let status = match err {
            MentorError::NoAnalysis => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "detail": self.1 }))).into_response()
    }
}

// ── Request/response shapes ─────────────────────────────────────────────

fn default_session() -> String {
    "default".to_owned()
}

#[derive(Debug, Deserialize)]
struct AnalyzeTaskRequest {
    task_description: String,
    #[serde(default = "default_session")]
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct FindResourcesRequest {
    #[serde(default)]
    known_prerequisite_indices: Vec<usize>,
    #[serde(default = "default_session")]
    session_id: String,
}

#[derive(Debug, Serialize)]
struct FindResourcesResponse {
    resources: Vec<ConceptResources>,
}

#[derive(Debug, Deserialize)]
struct SessionRequest {
    #[serde(default = "default_session")]
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct CodeExampleRequest {
    concept: String,
    #[serde(default = "default_session")]
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct AskTutorRequest {
    query: String,
    #[serde(default = "default_session")]
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct SessionParams {
    #[serde(default = "default_session")]
    session_id: String,
}

// ── Handlers ────────────────────────────────────────────────────────────

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "mentor" }))
}

async fn analyze_task(
    State(state): State<SharedState>,
    Json(request): Json<AnalyzeTaskRequest>,
) -> std::result::Result<Json<TaskBreakdown>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let orchestrator = session_entry(&state, &mut sessions, &request.session_id)?;
    let breakdown = orchestrator.analyze_task(&request.task_description).await;
    Ok(Json(breakdown))
}

async fn find_resources(
    State(state): State<SharedState>,
    Json(request): Json<FindResourcesRequest>,
) -> std::result::Result<Json<FindResourcesResponse>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let orchestrator = session_entry(&state, &mut sessions, &request.session_id)?;
    let resources = orchestrator
        .find_resources(&request.known_prerequisite_indices)
        .await?;
    Ok(Json(FindResourcesResponse { resources }))
}

async fn generate_plan(
    State(state): State<SharedState>,
    Json(request): Json<SessionRequest>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let orchestrator = session_entry(&state, &mut sessions, &request.session_id)?;
    let plan = orchestrator.generate_project_plan().await?;
    Ok(Json(json!({ "plan": plan })))
}

async fn get_code_example(
    State(state): State<SharedState>,
    Json(request): Json<CodeExampleRequest>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let orchestrator = session_entry(&state, &mut sessions, &request.session_id)?;
    let code = orchestrator.code_example(&request.concept).await?;
    Ok(Json(json!({ "code": code })))
}

async fn ask_tutor(
    State(state): State<SharedState>,
    Json(request): Json<AskTutorRequest>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let orchestrator = session_entry(&state, &mut sessions, &request.session_id)?;
    let response = orchestrator.tutor_response(&request.query).await?;
    Ok(Json(json!({ "response": response })))
}

async fn export_markdown(
    State(state): State<SharedState>,
    Json(request): Json<SessionRequest>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let orchestrator = session_entry(&state, &mut sessions, &request.session_id)?;
    let path = orchestrator.save_markdown(None)?;
    Ok(Json(json!({ "path": path.display().to_string() })))
}

async fn reset_session(
    State(state): State<SharedState>,
    Query(params): Query<SessionParams>,
) -> Json<serde_json::Value> {
    let mut sessions = state.sessions.lock().await;
    sessions.remove(&params.session_id);
    Json(json!({ "message": "session reset" }))
}

/// Get or create the orchestrator for a session.
fn session_entry<'a>(
    state: &ApiState,
    sessions: &'a mut HashMap<String, Orchestrator>,
    session_id: &str,
) -> std::result::Result<&'a mut Orchestrator, ApiError> {
    match sessions.entry(session_id.to_owned()) {
        std::collections::hash_map::Entry::Occupied(entry) => Ok(entry.into_mut()),
        std::collections::hash_map::Entry::Vacant(entry) => {
            let orchestrator = Orchestrator::new(state.config.clone())?;
            Ok(entry.insert(orchestrator))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> MentorConfig {
        let mut config = MentorConfig::default();
        config.llm.api_url = "http://127.0.0.1:9".into();
        config
    }

    #[test]
    fn router_builds() {
        let _router = router(local_config());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn session_entry_creates_then_reuses() {
        let state = ApiState {
            config: local_config(),
            sessions: Mutex::new(HashMap::new()),
        };
        let mut sessions = state.sessions.lock().await;
        assert!(session_entry(&state, &mut sessions, "s1").is_ok());
        assert_eq!(sessions.len(), 1);
        assert!(session_entry(&state, &mut sessions, "s1").is_ok());
        assert_eq!(sessions.len(), 1);
        assert!(session_entry(&state, &mut sessions, "s2").is_ok());
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn no_analysis_maps_to_bad_request() {
        let err: ApiError = MentorError::NoAnalysis.into();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn other_errors_map_to_internal() {
        let err: ApiError = MentorError::Llm("boom".into()).into();
        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
