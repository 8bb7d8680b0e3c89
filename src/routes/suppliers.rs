use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::suppliers::{
        AddSupplierProductRequest, CreateSupplierRequest, SupplierList, SupplierProductList,
        UpdateSupplierRequest,
    },
    error::AppResult,
    models::{SupplierDetail, SupplierProduct},
    response::ApiResponse,
    services::supplier_service,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SupplierNameQuery {
    pub name: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_supplier))
        .route("/", get(get_supplier_by_name))
        .route("/all", get(list_suppliers))
        .route("/{id}", get(get_supplier))
        .route("/{id}", put(update_supplier))
        .route("/{id}", delete(delete_supplier))
        .route("/addProduct", post(add_product_to_supplier))
        .route("/products/all", get(list_supplier_products))
        .route("/products/{id}", get(list_products_by_supplier))
        .route(
            "/{supplier_id}/{product_id}",
            delete(remove_product_from_supplier),
        )
}

#[utoipa::path(
    post,
    path = "/api/suppliers",
    request_body = CreateSupplierRequest,
    responses(
        (status = 200, description = "Supplier created", body = ApiResponse<SupplierDetail>),
        (status = 409, description = "Email already in use"),
    ),
    tag = "Suppliers"
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(payload): Json<CreateSupplierRequest>,
) -> AppResult<Json<ApiResponse<SupplierDetail>>> {
    Ok(Json(supplier_service::create_supplier(&state, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/all",
    responses(
        (status = 200, description = "All suppliers with products expanded", body = ApiResponse<SupplierList>),
    ),
    tag = "Suppliers"
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SupplierList>>> {
    Ok(Json(supplier_service::list_suppliers(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    responses(
        (status = 200, description = "Supplier", body = ApiResponse<SupplierDetail>),
        (status = 404, description = "No such supplier"),
    ),
    tag = "Suppliers"
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SupplierDetail>>> {
    Ok(Json(supplier_service::get_supplier(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/suppliers",
    params(("name" = String, Query, description = "Unique supplier name")),
    responses(
        (status = 200, description = "Supplier", body = ApiResponse<SupplierDetail>),
        (status = 404, description = "No such supplier"),
    ),
    tag = "Suppliers"
)]
pub async fn get_supplier_by_name(
    State(state): State<AppState>,
    Query(query): Query<SupplierNameQuery>,
) -> AppResult<Json<ApiResponse<SupplierDetail>>> {
    Ok(Json(
        supplier_service::get_supplier_by_name(&state, &query.name).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    request_body = UpdateSupplierRequest,
    responses(
        (status = 200, description = "Supplier updated", body = ApiResponse<SupplierDetail>),
        (status = 404, description = "No such supplier"),
        (status = 409, description = "Email already in use"),
    ),
    tag = "Suppliers"
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierRequest>,
) -> AppResult<Json<ApiResponse<SupplierDetail>>> {
    Ok(Json(
        supplier_service::update_supplier(&state, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    responses(
        (status = 200, description = "Supplier deleted"),
        (status = 404, description = "No such supplier"),
        (status = 424, description = "Join cleanup failed; supplier kept"),
    ),
    tag = "Suppliers"
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(supplier_service::delete_supplier(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/suppliers/addProduct",
    request_body = AddSupplierProductRequest,
    responses(
        (status = 200, description = "Join upserted", body = ApiResponse<SupplierProduct>),
        (status = 404, description = "Supplier or product does not exist"),
    ),
    tag = "Suppliers"
)]
pub async fn add_product_to_supplier(
    State(state): State<AppState>,
    Json(payload): Json<AddSupplierProductRequest>,
) -> AppResult<Json<ApiResponse<SupplierProduct>>> {
    Ok(Json(
        supplier_service::add_product_to_supplier(&state, payload).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/products/all",
    responses(
        (status = 200, description = "All supplier product joins", body = ApiResponse<SupplierProductList>),
    ),
    tag = "Suppliers"
)]
pub async fn list_supplier_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SupplierProductList>>> {
    Ok(Json(supplier_service::list_supplier_products(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/products/{id}",
    responses(
        (status = 200, description = "Joins for one supplier", body = ApiResponse<SupplierProductList>),
        (status = 404, description = "No such supplier"),
    ),
    tag = "Suppliers"
)]
pub async fn list_products_by_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SupplierProductList>>> {
    Ok(Json(
        supplier_service::list_products_by_supplier(&state, id).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/suppliers/{supplier_id}/{product_id}",
    responses(
        (status = 200, description = "Join removed"),
        (status = 404, description = "Join does not exist"),
    ),
    tag = "Suppliers"
)]
pub async fn remove_product_from_supplier(
    State(state): State<AppState>,
    Path((supplier_id, product_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        supplier_service::remove_product_from_supplier(&state, supplier_id, product_id).await?,
    ))
}
