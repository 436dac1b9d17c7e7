use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use super::services::CaptureRequest;
use super::session::{spawn_scan, ScanError, ScanStatus};
use crate::state::AppState;
use crate::tracker::model::FoodEntry;

pub fn scan_routes() -> Router<AppState> {
    Router::new()
        .route("/scan", get(scan_status).post(start_scan))
        .route("/scan/accept", post(accept_scan))
        .route("/scan/reset", post(reset_scan))
}

pub async fn scan_status(State(state): State<AppState>) -> Json<ScanStatus> {
    Json(state.scan.status())
}

/// An empty body is a camera capture without image; a malformed one is rejected.
#[instrument(skip(state, body))]
pub async fn start_scan(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ScanStatus>), (StatusCode, String)> {
    let request = parse_capture(&body)?;
    spawn_scan(state.scan.clone(), state.recognizer.clone(), request).map_err(conflict)?;
    Ok((StatusCode::ACCEPTED, Json(state.scan.status())))
}

#[instrument(skip(state))]
pub async fn accept_scan(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<FoodEntry>), (StatusCode, String)> {
    let entry = state.scan.accept(&state.store).map_err(conflict)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn reset_scan(State(state): State<AppState>) -> Json<ScanStatus> {
    state.scan.reset();
    Json(state.scan.status())
}

fn parse_capture(body: &[u8]) -> Result<CaptureRequest, (StatusCode, String)> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CaptureRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "invalid capture request");
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })
}

fn conflict(e: ScanError) -> (StatusCode, String) {
    (StatusCode::CONFLICT, e.to_string())
}
