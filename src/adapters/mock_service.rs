//! Local stand-in for the prediction service.
//!
//! Speaks the same contract as the production backend but answers with a
//! configured label instead of running a model. Useful for development and
//! for end-to-end tests of the form.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::MockServerSettings;
use crate::form::FieldId;

#[derive(Debug, Clone)]
pub struct MockService {
    label: Arc<String>,
    fail_message: Option<Arc<String>>,
    requests: Arc<AtomicUsize>,
    received: Arc<RwLock<Vec<Value>>>,
    start_time: std::time::Instant,
}

impl MockService {
    pub fn new(settings: &MockServerSettings) -> Self {
        Self {
            label: Arc::new(settings.label.clone()),
            fail_message: settings.fail_message.clone().map(Arc::new),
            requests: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(RwLock::new(Vec::new())),
            start_time: std::time::Instant::now(),
        }
    }

    /// Number of `/predict` calls received so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// JSON bodies of every parseable `/predict` call, oldest first
    pub async fn received(&self) -> Vec<Value> {
        self.received.read().await.clone()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/predict", post(predict))
            .route("/health", get(health))
            .with_state(self.clone())
            .layer(
                tower_http::cors::CorsLayer::new()
                    .allow_origin(tower_http::cors::Any)
                    .allow_methods(tower_http::cors::Any)
                    .allow_headers(tower_http::cors::Any),
            )
    }

    /// Binds `addr` and serves until the task is dropped
    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Mock prediction service listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

async fn predict(State(service): State<MockService>, body: Bytes) -> impl IntoResponse {
    service.requests.fetch_add(1, Ordering::SeqCst);

    let data: Value = match serde_json::from_slice(&body) {
        Ok(data) => data,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("Invalid JSON body: {}", e) })),
            )
        }
    };

    service.received.write().await.push(data.clone());

    if let Some(message) = &service.fail_message {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "message": message.as_str() })),
        );
    }

    if let Err(reason) = check_features(&data) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": reason })));
    }

    (
        StatusCode::OK,
        Json(json!({ "prediction": service.label.as_str() })),
    )
}

fn check_features(data: &Value) -> Result<(), String> {
    for id in FieldId::ALL {
        match data.get(id.as_str()) {
            None => return Err(format!("Missing feature: '{}'", id)),
            Some(value) if !value.is_number() => return Err(format!("Invalid feature: '{}'", id)),
            Some(_) => {}
        }
    }
    Ok(())
}

async fn health(State(service): State<MockService>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "uptime_seconds": service.start_time.elapsed().as_secs(),
        })),
    )
}
