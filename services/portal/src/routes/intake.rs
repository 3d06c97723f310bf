use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use pricing_engine::{calculate_price, CalculationInput};

use crate::routes::pricing::pricing_error;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Intake routes — persist form submissions and priced quotes
//
// The store assigns the id; the stored record comes back in the response.
// Pricing never waits on the store: a quote is priced first, and a store
// failure surfaces as a 500 without a price having depended on it.
// ---------------------------------------------------------------------------

const KIND_LEADS: &str = "leads";
const KIND_QUOTES: &str = "quotes";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/leads", post(create_lead))
        .route("/quotes", post(create_quote))
        .route("/quotes/:id", get(get_quote))
}

fn store_error(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    tracing::error!("submission store: {e:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "submission store unavailable" })),
    )
}

async fn create_lead(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let record = state
        .store
        .insert(KIND_LEADS, payload)
        .map_err(store_error)?;
    Ok(Json(serde_json::to_value(record).unwrap_or(Value::Null)))
}

async fn create_quote(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CalculationInput>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let result = calculate_price(&state.pricing, &input).map_err(pricing_error)?;
    let payload = json!({
        "input": serde_json::to_value(&input).unwrap_or(Value::Null),
        "result": serde_json::to_value(&result).unwrap_or(Value::Null),
    });
    let record = state
        .store
        .insert(KIND_QUOTES, payload)
        .map_err(store_error)?;
    Ok(Json(serde_json::to_value(record).unwrap_or(Value::Null)))
}

async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.store.get(KIND_QUOTES, id).map_err(store_error)? {
        Some(record) => Ok(Json(serde_json::to_value(record).unwrap_or(Value::Null))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("unknown quote: {id}") })),
        )),
    }
}
