use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::EquipmentId;
use super::ledger::{EquipmentError, EquipmentLedger};
use super::repository::{EquipmentStore, EquipmentStoreError};

#[derive(Debug, Deserialize)]
pub(crate) struct LedgerActionRequest {
    #[serde(default)]
    pub(crate) actor: Option<String>,
}

pub fn equipment_router<S>(ledger: Arc<EquipmentLedger<S>>) -> Router
where
    S: EquipmentStore + 'static,
{
    Router::new()
        .route("/api/v1/equipment", get(inventory_handler::<S>))
        .route("/api/v1/equipment/logs", get(logs_handler::<S>))
        .route(
            "/api/v1/equipment/:item_id/borrow",
            post(borrow_handler::<S>),
        )
        .route(
            "/api/v1/equipment/:item_id/return",
            post(return_handler::<S>),
        )
        .with_state(ledger)
}

pub(crate) async fn inventory_handler<S>(
    State(ledger): State<Arc<EquipmentLedger<S>>>,
) -> Response
where
    S: EquipmentStore + 'static,
{
    match ledger.inventory() {
        Ok(items) => (StatusCode::OK, axum::Json(items)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn logs_handler<S>(State(ledger): State<Arc<EquipmentLedger<S>>>) -> Response
where
    S: EquipmentStore + 'static,
{
    match ledger.logs() {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn borrow_handler<S>(
    State(ledger): State<Arc<EquipmentLedger<S>>>,
    Path(item_id): Path<String>,
    axum::Json(request): axum::Json<LedgerActionRequest>,
) -> Response
where
    S: EquipmentStore + 'static,
{
    let actor = request.actor.unwrap_or_else(|| "anonymous".to_string());
    match ledger.borrow(&EquipmentId(item_id), &actor) {
        Ok(item) => (StatusCode::OK, axum::Json(item)).into_response(),
        Err(EquipmentError::OutOfStock { name }) => {
            let payload = json!({ "error": format!("'{name}' is out of stock") });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(EquipmentError::Store(EquipmentStoreError::NotFound)) => not_found(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn return_handler<S>(
    State(ledger): State<Arc<EquipmentLedger<S>>>,
    Path(item_id): Path<String>,
    axum::Json(request): axum::Json<LedgerActionRequest>,
) -> Response
where
    S: EquipmentStore + 'static,
{
    let actor = request.actor.unwrap_or_else(|| "anonymous".to_string());
    match ledger.return_item(&EquipmentId(item_id), &actor) {
        Ok(item) => (StatusCode::OK, axum::Json(item)).into_response(),
        Err(EquipmentError::Store(EquipmentStoreError::NotFound)) => not_found(),
        Err(error) => internal_error(error),
    }
}

fn not_found() -> Response {
    let payload = json!({ "error": "equipment item not found" });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(error: EquipmentError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
