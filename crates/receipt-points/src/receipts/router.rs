use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::{error, warn};

use crate::error::AppError;

use super::domain::{Receipt, ReceiptId};
use super::repository::PointsRepository;
use super::service::ReceiptPointsService;

/// Router builder exposing the submit and fetch endpoints.
pub fn receipts_router<R>(service: Arc<ReceiptPointsService<R>>) -> Router
where
    R: PointsRepository + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<R>))
        .route("/receipts/:id/points", get(points_handler::<R>))
        .with_state(service)
}

// The body is decoded here rather than through `Json` so every envelope failure is a 400,
// whatever the content type.
pub(crate) async fn process_handler<R>(
    State(service): State<Arc<ReceiptPointsService<R>>>,
    body: Bytes,
) -> Response
where
    R: PointsRepository + 'static,
{
    let receipt = match Receipt::from_json(&body) {
        Ok(receipt) => receipt,
        Err(err) => {
            warn!(error = %err, "rejected receipt submission");
            return AppError::from(err).into_response();
        }
    };

    match service.process(&receipt) {
        Ok(processed) => (StatusCode::OK, axum::Json(processed)).into_response(),
        Err(err) => {
            error!(error = %err, "failed to record receipt points");
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn points_handler<R>(
    State(service): State<Arc<ReceiptPointsService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: PointsRepository + 'static,
{
    let id = ReceiptId(id);
    match service.points(&id) {
        Ok(points) => (StatusCode::OK, axum::Json(json!({ "points": points }))).into_response(),
        Err(err) => {
            error!(%id, error = %err, "failed to read receipt points");
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
