use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::error::AppError;
use crate::extract::CompletionClient;
use crate::store::Store;
use crate::types::MemoryPayload;

const DEFAULT_UID: &str = "unknown_user";

#[derive(Clone)]
pub struct MemoryServer {
    pub store: Arc<tokio::sync::Mutex<Store>>,
    pub llm: Arc<dyn CompletionClient>,
    pub public_base_url: Option<String>,
}

impl MemoryServer {
    pub fn new(
        store: Store,
        llm: Arc<dyn CompletionClient>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            store: Arc::new(tokio::sync::Mutex::new(store)),
            llm,
            public_base_url,
        }
    }

    /// Base for dashboard links: the configured public URL, else whatever
    /// host the caller reached us on.
    fn base_url(&self, headers: &HeaderMap) -> String {
        if let Some(url) = &self.public_base_url {
            return url.clone();
        }
        let scheme = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("http");
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("localhost");
        format!("{}://{}", scheme, host)
    }
}

pub fn router(server: MemoryServer) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/memory-trigger", get(memory_trigger_info).post(memory_trigger))
        .route("/dashboard", get(dashboard))
        .route("/setup-status", get(setup_status))
        .route("/omi-dashboard", post(omi_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "description": "A memory trigger integration that extracts social intelligence data from conversation memories.",
        "endpoints": {
            "memory-trigger": "POST endpoint for receiving memory data",
            "setup-status": "GET endpoint for checking setup status",
            "dashboard": "GET endpoint for visualizing social intelligence insights",
            "omi-dashboard": "POST endpoint returning recent insights as plain text"
        },
        "instructions": "Visit /dashboard to see your social intelligence insights"
    }))
}

async fn memory_trigger_info() -> Json<serde_json::Value> {
    Json(json!({
        "endpoint": "memory-trigger",
        "method": "POST",
        "description": "Endpoint for receiving memory data. Please use POST method with memory data in JSON format.",
        "example": "POST /memory-trigger?uid=user123 with memory data as JSON payload"
    }))
}

#[derive(Debug, Deserialize)]
struct TriggerQuery {
    uid: Option<String>,
}

async fn memory_trigger(
    State(server): State<MemoryServer>,
    Query(query): Query<TriggerQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let uid = query.uid.unwrap_or_else(|| DEFAULT_UID.to_string());
    let span = tracing::info_span!(
        "memory_trigger",
        request_id = %uuid::Uuid::new_v4(),
        uid = %uid,
    );

    async move {
        let payload: MemoryPayload = match serde_json::from_slice(&body) {
            Ok(p) => p,
            Err(e) => {
                return AppError::Validation(format!("invalid memory payload: {}", e))
                    .into_response()
            }
        };
        if let Some(title) = payload.structured.as_ref().and_then(|s| s.title.as_deref()) {
            tracing::debug!(title, "memory received");
        }

        let base_url = server.base_url(&headers);
        match server.do_ingest(&uid, &payload, &base_url).await {
            Ok(outcome) => Json(outcome).into_response(),
            Err(e) => e.into_response(),
        }
    }
    .instrument(span)
    .await
}

async fn dashboard(State(server): State<MemoryServer>) -> Result<Html<String>, AppError> {
    Ok(Html(server.do_dashboard().await?))
}

async fn setup_status() -> Json<serde_json::Value> {
    Json(json!({ "is_setup_completed": true }))
}

async fn omi_dashboard(State(server): State<MemoryServer>, headers: HeaderMap) -> Response {
    let base_url = server.base_url(&headers);
    match server.do_condensed(&base_url).await {
        Ok(text) => Json(json!({ "text": text })).into_response(),
        Err(e) => {
            tracing::error!(error = ?e, "condensed dashboard failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "text": format!("Error loading dashboard: {}", e) })),
            )
                .into_response()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::External(_) | AppError::Store(_) | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let body = json!({ "status": "error", "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}
