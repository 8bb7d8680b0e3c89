use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::locations::{CreateLocationRequest, LocationList},
    entity::locations::{
        ActiveModel as LocationActive, Column as LocationCol, Entity as Locations,
        Model as LocationModel,
    },
    error::{AppError, AppResult},
    models::Location,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn create_location(
    state: &AppState,
    payload: CreateLocationRequest,
) -> AppResult<ApiResponse<Location>> {
    let duplicate = Locations::find()
        .filter(LocationCol::Name.eq(payload.name.clone()))
        .one(&state.orm)
        .await?;
    if duplicate.is_some() {
        return Err(AppError::Conflict(format!(
            "location '{}' already exists",
            payload.name
        )));
    }

    let location = LocationActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        address: Set(payload.address),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Location created",
        location_view(location),
        Some(Meta::empty()),
    ))
}

pub async fn list_locations(state: &AppState) -> AppResult<ApiResponse<LocationList>> {
    let items = Locations::find()
        .order_by_asc(LocationCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(location_view)
        .collect();
    Ok(ApiResponse::success(
        "Locations",
        LocationList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_location(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Location>> {
    let location = Locations::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("location {id}")))?;
    Ok(ApiResponse::success(
        "Location",
        location_view(location),
        Some(Meta::empty()),
    ))
}

fn location_view(model: LocationModel) -> Location {
    Location {
        id: model.id,
        name: model.name,
        address: model.address,
    }
}
