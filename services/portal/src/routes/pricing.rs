use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use pricing_engine::{
    calculate_price, format_price, validate_config, CalculationInput, PricingError, TierName,
};

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pricing/calculate", post(calculate))
        .route("/pricing/types", get(list_types))
        .route("/pricing/types/:id", get(get_type))
        .route("/pricing/validate", get(validate))
}

/// Map engine errors onto HTTP statuses: anything the configuration does
/// not contain is a 404 carrying the offending id. No fallback price.
pub fn pricing_error(e: PricingError) -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": e.to_string() })))
}

async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CalculationInput>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let result = calculate_price(&state.pricing, &input).map_err(pricing_error)?;
    Ok(Json(serde_json::to_value(result).unwrap_or(Value::Null)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TypeSummary {
    id: String,
    label: String,
    tiers: Vec<TierSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TierSummary {
    tier: TierName,
    monthly_base_price: rust_decimal::Decimal,
    display: String,
}

async fn list_types(State(state): State<Arc<AppState>>) -> Json<Vec<TypeSummary>> {
    let cfg = &state.pricing;
    let out = cfg
        .website_types
        .iter()
        .map(|(id, wt)| TypeSummary {
            id: id.clone(),
            label: wt.label.clone(),
            tiers: TierName::ALL
                .into_iter()
                .filter_map(|name| wt.tier(name).map(|t| (name, t)))
                .map(|(name, t)| TierSummary {
                    tier: name,
                    monthly_base_price: t.monthly_base_price,
                    display: format_price(t.monthly_base_price, &cfg.base_currency),
                })
                .collect(),
        })
        .collect();
    Json(out)
}

async fn get_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.pricing.website_type(&id) {
        Some(wt) => Ok(Json(serde_json::to_value(wt).unwrap_or(Value::Null))),
        None => Err(pricing_error(PricingError::UnknownWebsiteType { id })),
    }
}

async fn validate(State(state): State<Arc<AppState>>) -> Json<Value> {
    let report = validate_config(&state.pricing);
    Json(serde_json::to_value(report).unwrap_or(Value::Null))
}
