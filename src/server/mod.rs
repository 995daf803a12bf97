pub mod middleware;

use crate::config::ValidatorConfig;
use crate::contract::ContractModel;
use axum::{
    Json, Router,
    extract::{Request, State},
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub contract: Arc<ContractModel>,
    pub config: ValidatorConfig,
}

impl AppState {
    pub fn new(contract: ContractModel, config: ValidatorConfig) -> Self {
        Self {
            contract: Arc::new(contract),
            config,
        }
    }
}

/// Build the application: every request passes header validation before
/// reaching the fallback handler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .fallback(accept_request)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::validate_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the validating server
pub async fn start_server(addr: SocketAddr, state: AppState) -> crate::Result<()> {
    let app = build_router(state);

    tracing::info!("Starting header validation server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Reached only by requests whose headers passed validation
async fn accept_request(State(state): State<AppState>, request: Request) -> Json<Value> {
    let operation = state
        .contract
        .resolve(request.method().as_str(), request.uri().path());

    Json(json!({
        "valid": true,
        "method": request.method().as_str(),
        "path": request.uri().path(),
        "operation": operation.as_ref().map(|op| op.template.as_str()),
        "operationId": operation.as_ref().and_then(|op| op.operation_id.as_deref()),
    }))
}
