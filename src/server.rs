//! HTTP API over the content gate
//!
//! Endpoints:
//! - GET  /health              - Health check
//! - POST /turn                - Gate one scene: {scene, override?, seed?}
//! - GET  /directive/:sanity   - Directive for the next upstream request
//! - POST /stream/narrative    - Narrative decoded so far from a partial scene body
//!
//! Stateless: the turn loop that owns player state lives in the client.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::{
    classify, entropy_rng, extract_partial_narrative, sanity_change_guidance, scene_rng,
    TurnGate,
};
use crate::types::{DebugOverride, GateConfig, SanityTier, Scene, TurnEnvelope};
use crate::{clamp_stat, GateError};

/// App state
pub struct AppState {
    pub gate: TurnGate,
}

/// Gate request
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub scene: serde_json::Value,
    #[serde(default, rename = "override")]
    pub debug: Option<DebugOverride>,
    /// Seed for reproducible option gating; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Directive response
#[derive(Debug, Serialize)]
pub struct DirectiveResponse {
    pub sanity: u8,
    pub tier: SanityTier,
    pub directive: String,
    pub guidance: String,
}

/// Partial narrative response
#[derive(Debug, Serialize)]
pub struct PartialNarrativeResponse {
    pub narrative: String,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let status = match self {
            GateError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GateError::Request(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        log::warn!("rejecting request: {}", self);
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Create the API router
pub fn create_router(config: GateConfig) -> Router {
    let state = Arc::new(AppState {
        gate: TurnGate::new(config),
    });

    Router::new()
        .route("/health", get(health))
        .route("/turn", post(gate_turn))
        .route("/directive/:sanity", get(directive))
        .route("/stream/narrative", post(partial_narrative))
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// Gate one scene
async fn gate_turn(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TurnRequest>, JsonRejection>,
) -> Result<Json<TurnEnvelope>, GateError> {
    let Json(req) = payload.map_err(|rejection| GateError::Request(rejection.body_text()))?;
    let scene = Scene::from_value(req.scene)?;
    let report = match req.seed {
        Some(seed) => {
            let mut rng = scene_rng(seed, scene.scene_id.as_deref());
            state.gate.evaluate(&scene, req.debug.as_ref(), &mut rng)
        }
        None => state
            .gate
            .evaluate(&scene, req.debug.as_ref(), &mut entropy_rng()),
    };
    Ok(Json(TurnEnvelope::new(report)))
}

/// Directive for a sanity value (clamped)
async fn directive(
    State(state): State<Arc<AppState>>,
    Path(sanity): Path<i64>,
) -> Json<DirectiveResponse> {
    let sanity = clamp_stat(sanity);
    Json(DirectiveResponse {
        sanity,
        tier: classify(sanity as i64),
        directive: state.gate.directive(sanity, None),
        guidance: sanity_change_guidance(sanity as i64).to_string(),
    })
}

/// Raw (possibly truncated) scene body in, narrative so far out
async fn partial_narrative(body: String) -> Json<PartialNarrativeResponse> {
    Json(PartialNarrativeResponse {
        narrative: extract_partial_narrative(&body),
    })
}

/// Run the API server
pub async fn run_server(addr: &str, config: GateConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("sanitygate API running on {}", addr);
    println!("sanitygate API running on {}", addr);
    println!("  GET  /health            - Health check");
    println!("  POST /turn              - Gate one scene");
    println!("  GET  /directive/:sanity - Directive for the next request");
    println!("  POST /stream/narrative  - Narrative from a partial scene body");
    axum::serve(listener, router).await?;
    Ok(())
}
