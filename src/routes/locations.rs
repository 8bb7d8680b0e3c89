use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::locations::{CreateLocationRequest, LocationList},
    error::AppResult,
    models::Location,
    response::ApiResponse,
    services::location_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_location))
        .route("/", get(list_locations))
        .route("/{id}", get(get_location))
}

#[utoipa::path(
    post,
    path = "/api/locations",
    request_body = CreateLocationRequest,
    responses(
        (status = 200, description = "Location created", body = ApiResponse<Location>),
        (status = 409, description = "Name already in use"),
    ),
    tag = "Locations"
)]
pub async fn create_location(
    State(state): State<AppState>,
    Json(payload): Json<CreateLocationRequest>,
) -> AppResult<Json<ApiResponse<Location>>> {
    Ok(Json(
        location_service::create_location(&state, payload).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = 200, description = "All locations", body = ApiResponse<LocationList>),
    ),
    tag = "Locations"
)]
pub async fn list_locations(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<LocationList>>> {
    Ok(Json(location_service::list_locations(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/locations/{id}",
    responses(
        (status = 200, description = "Location", body = ApiResponse<Location>),
        (status = 404, description = "No such location"),
    ),
    tag = "Locations"
)]
pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Location>>> {
    Ok(Json(location_service::get_location(&state, id).await?))
}
