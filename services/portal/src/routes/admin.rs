use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use pricing_engine::{CalculationInput, ConfigDraft, ConfigEdit};

use crate::routes::pricing::pricing_error;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/admin/preview", post(preview))
}

#[derive(Deserialize)]
pub struct PreviewReq {
    #[serde(default)]
    pub edits: Vec<ConfigEdit>,
    pub input: CalculationInput,
}

/// Apply a set of edits to a private draft of the configuration and
/// price against it. The shared configuration is never mutated, so
/// concurrent calculations are unaffected.
async fn preview(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PreviewReq>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut draft = ConfigDraft::new(&state.pricing);
    draft.apply_all(&req.edits).map_err(pricing_error)?;
    let result = draft.preview(&req.input).map_err(pricing_error)?;
    Ok(Json(json!({
        "preview": true,
        "result": serde_json::to_value(result).unwrap_or(Value::Null),
    })))
}
