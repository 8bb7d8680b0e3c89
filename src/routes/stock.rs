use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::StockLevel,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct StockLevelList {
    pub items: Vec<StockLevel>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_stock_levels))
}

#[utoipa::path(
    get,
    path = "/api/stock",
    responses(
        (status = 200, description = "Quantity on hand per product and location", body = ApiResponse<StockLevelList>),
    ),
    tag = "Stock"
)]
pub async fn list_stock_levels(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<StockLevelList>>> {
    let items = sqlx::query_as::<_, StockLevel>(
        "SELECT product_id, product_sku, product_name, location_id, location_name, quantity \
         FROM stock_quantities ORDER BY location_name, product_sku",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success(
        "Stock levels",
        StockLevelList { items },
        Some(Meta::empty()),
    )))
}
