use super::AppState;
use crate::validation::Validator;
use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Reject requests whose headers do not satisfy the contract with `400`
/// and the full list of errors.
pub async fn validate_headers(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let result = Validator::with_config(&state.contract, state.config.clone())
        .validate_header_params(&request);

    if result.is_valid {
        return next.run(request).await;
    }

    tracing::info!(
        method = %request.method(),
        path = %request.uri().path(),
        errors = result.errors.len(),
        "Rejected request headers"
    );

    (StatusCode::BAD_REQUEST, Json(result)).into_response()
}
