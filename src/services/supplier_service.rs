use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::suppliers::{
        AddSupplierProductRequest, CreateSupplierRequest, SupplierList, SupplierProductList,
        UpdateSupplierRequest,
    },
    entity::{
        products::Entity as Products,
        supplier_products::{
            ActiveModel as JoinActive, Column as JoinCol, Entity as SupplierProducts,
            Model as JoinModel,
        },
        suppliers::{
            ActiveModel as SupplierActive, Column as SupplierCol, Entity as Suppliers,
            Model as SupplierModel,
        },
    },
    error::{AppError, AppResult},
    models::{SupplierDetail, SupplierProduct, SupplierProductDetail},
    response::{ApiResponse, Meta},
    services::product_service,
    state::AppState,
};

pub async fn create_supplier(
    state: &AppState,
    payload: CreateSupplierRequest,
) -> AppResult<ApiResponse<SupplierDetail>> {
    // Pre-checked before any write; this is the contract, not a translated
    // unique-constraint failure.
    let duplicate = Suppliers::find()
        .filter(SupplierCol::Email.eq(payload.email.clone()))
        .one(&state.orm)
        .await?;
    if duplicate.is_some() {
        return Err(AppError::Conflict(format!(
            "supplier with email '{}' already exists",
            payload.email
        )));
    }

    let supplier = SupplierActive {
        id: Set(Uuid::new_v4()),
        email: Set(payload.email),
        name: Set(payload.name),
        address: Set(payload.address),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    for input in &payload.supplier_products {
        upsert_join(state, supplier.id, input.product_id, input.rate).await?;
    }

    let detail = expand_supplier(state, supplier).await?;
    Ok(ApiResponse::success(
        "Supplier created",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn list_suppliers(state: &AppState) -> AppResult<ApiResponse<SupplierList>> {
    let suppliers = Suppliers::find()
        .order_by_asc(SupplierCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut items = Vec::with_capacity(suppliers.len());
    for supplier in suppliers {
        items.push(expand_supplier(state, supplier).await?);
    }

    Ok(ApiResponse::success(
        "Suppliers",
        SupplierList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_supplier(state: &AppState, id: Uuid) -> AppResult<ApiResponse<SupplierDetail>> {
    let supplier = find_supplier(state, id).await?;
    let detail = expand_supplier(state, supplier).await?;
    Ok(ApiResponse::success(
        "Supplier",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn get_supplier_by_name(
    state: &AppState,
    name: &str,
) -> AppResult<ApiResponse<SupplierDetail>> {
    let supplier = Suppliers::find()
        .filter(SupplierCol::Name.eq(name))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("supplier '{name}'")))?;
    let detail = expand_supplier(state, supplier).await?;
    Ok(ApiResponse::success(
        "Supplier",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn update_supplier(
    state: &AppState,
    id: Uuid,
    payload: UpdateSupplierRequest,
) -> AppResult<ApiResponse<SupplierDetail>> {
    let existing = find_supplier(state, id).await?;

    if let Some(email) = payload.email.as_ref() {
        let clash = Suppliers::find()
            .filter(SupplierCol::Email.eq(email.clone()))
            .filter(SupplierCol::Id.ne(id))
            .one(&state.orm)
            .await?;
        if clash.is_some() {
            return Err(AppError::Conflict(format!(
                "supplier with email '{email}' already exists"
            )));
        }
    }

    let mut active: SupplierActive = existing.into();
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(address) = payload.address {
        active.address = Set(address);
    }
    let supplier = active.update(&state.orm).await?;

    let detail = expand_supplier(state, supplier).await?;
    Ok(ApiResponse::success(
        "Supplier updated",
        detail,
        Some(Meta::empty()),
    ))
}

/// Settle-all cleanup: every join removal is attempted and its outcome
/// recorded before the overall result is decided; the supplier row is only
/// deleted after a fully clean sweep.
pub async fn delete_supplier(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    find_supplier(state, id).await?;

    let joins = SupplierProducts::find()
        .filter(JoinCol::SupplierId.eq(id))
        .all(&state.orm)
        .await?;

    let mut failures = Vec::new();
    for join in &joins {
        let outcome = SupplierProducts::delete_by_id((join.supplier_id, join.product_id))
            .exec(&state.orm)
            .await;
        if let Err(err) = outcome {
            tracing::error!(
                supplier_id = %id,
                product_id = %join.product_id,
                error = %err,
                "supplier product cleanup failed"
            );
            failures.push(join.product_id);
        }
    }
    if !failures.is_empty() {
        return Err(AppError::Dependency(format!(
            "{} of {} supplier product joins could not be removed",
            failures.len(),
            joins.len()
        )));
    }

    Suppliers::delete_by_id(id).exec(&state.orm).await?;
    Ok(ApiResponse::success(
        format!("Deleted supplier with id:{id}"),
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

pub async fn add_product_to_supplier(
    state: &AppState,
    payload: AddSupplierProductRequest,
) -> AppResult<ApiResponse<SupplierProduct>> {
    // Both sides must exist before the join is written.
    find_supplier(state, payload.supplier_id).await?;
    if Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "product {}",
            payload.product_id
        )));
    }

    let join = upsert_join(state, payload.supplier_id, payload.product_id, payload.rate).await?;
    Ok(ApiResponse::success(
        "Product added to supplier",
        join_view(join),
        Some(Meta::empty()),
    ))
}

pub async fn remove_product_from_supplier(
    state: &AppState,
    supplier_id: Uuid,
    product_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = SupplierProducts::delete_by_id((supplier_id, product_id))
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!(
            "supplier {supplier_id} has no product {product_id}"
        )));
    }
    Ok(ApiResponse::success(
        format!("Deleted product id: {product_id} from supplier id: {supplier_id}"),
        serde_json::json!({ "supplier_id": supplier_id, "product_id": product_id }),
        Some(Meta::empty()),
    ))
}

pub async fn list_supplier_products(
    state: &AppState,
) -> AppResult<ApiResponse<SupplierProductList>> {
    let items = SupplierProducts::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(join_view)
        .collect();
    Ok(ApiResponse::success(
        "Supplier products",
        SupplierProductList { items },
        Some(Meta::empty()),
    ))
}

pub async fn list_products_by_supplier(
    state: &AppState,
    supplier_id: Uuid,
) -> AppResult<ApiResponse<SupplierProductList>> {
    find_supplier(state, supplier_id).await?;
    let items = SupplierProducts::find()
        .filter(JoinCol::SupplierId.eq(supplier_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(join_view)
        .collect();
    Ok(ApiResponse::success(
        "Supplier products",
        SupplierProductList { items },
        Some(Meta::empty()),
    ))
}

async fn find_supplier(state: &AppState, id: Uuid) -> AppResult<SupplierModel> {
    Suppliers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("supplier {id}")))
}

/// Create-if-absent, else last-write-wins on the rate. Keyed on the
/// (supplier, product) pair, so repeated upserts leave exactly one row.
async fn upsert_join(
    state: &AppState,
    supplier_id: Uuid,
    product_id: Uuid,
    rate: i64,
) -> AppResult<JoinModel> {
    let existing = SupplierProducts::find_by_id((supplier_id, product_id))
        .one(&state.orm)
        .await?;
    let join = match existing {
        Some(join) => {
            let mut active: JoinActive = join.into();
            active.rate = Set(rate);
            active.update(&state.orm).await?
        }
        None => {
            JoinActive {
                supplier_id: Set(supplier_id),
                product_id: Set(product_id),
                rate: Set(rate),
            }
            .insert(&state.orm)
            .await?
        }
    };
    Ok(join)
}

/// Flatten the supplier's join rows into view models carrying the full
/// product record (category tags included) next to the agreed rate.
async fn expand_supplier(state: &AppState, supplier: SupplierModel) -> AppResult<SupplierDetail> {
    let joins = SupplierProducts::find()
        .filter(JoinCol::SupplierId.eq(supplier.id))
        .all(&state.orm)
        .await?;

    let mut supplier_products = Vec::with_capacity(joins.len());
    for join in joins {
        let product = product_service::find_by_id(state, join.product_id).await?;
        supplier_products.push(SupplierProductDetail {
            supplier_id: join.supplier_id,
            rate: join.rate,
            product,
        });
    }

    Ok(SupplierDetail {
        id: supplier.id,
        email: supplier.email,
        name: supplier.name,
        address: supplier.address,
        supplier_products,
    })
}

fn join_view(model: JoinModel) -> SupplierProduct {
    SupplierProduct {
        supplier_id: model.supplier_id,
        product_id: model.product_id,
        rate: model.rate,
    }
}
