use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::products::{CreateProductRequest, ProductList},
    entity::{
        product_categories::{
            ActiveModel as CategoryActive, Column as CategoryCol, Entity as ProductCategories,
        },
        products::{
            ActiveModel as ProductActive, Column as ProductCol, Entity as Products,
            Model as ProductModel,
        },
    },
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let duplicate = Products::find()
        .filter(ProductCol::Sku.eq(payload.sku.clone()))
        .one(&state.orm)
        .await?;
    if duplicate.is_some() {
        return Err(AppError::Conflict(format!(
            "product with sku '{}' already exists",
            payload.sku
        )));
    }

    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        sku: Set(payload.sku),
        name: Set(payload.name),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    for tag in &payload.category {
        CategoryActive {
            id: Set(Uuid::new_v4()),
            product_id: Set(product.id),
            category: Set(tag.clone()),
        }
        .insert(&state.orm)
        .await?;
    }

    let detail = with_categories(state, product).await?;
    Ok(ApiResponse::success(
        "Product created",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let products = Products::find()
        .order_by_asc(ProductCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut items = Vec::with_capacity(products.len());
    for product in products {
        items.push(with_categories(state, product).await?);
    }

    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = find_by_id(state, id).await?;
    Ok(ApiResponse::success("Product", product, Some(Meta::empty())))
}

pub async fn find_by_id(state: &AppState, id: Uuid) -> AppResult<Product> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    with_categories(state, product).await
}

pub async fn find_by_sku(state: &AppState, sku: &str) -> AppResult<Product> {
    let product = Products::find()
        .filter(ProductCol::Sku.eq(sku))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product with sku '{sku}'")))?;
    with_categories(state, product).await
}

/// Rename the category-tag relation into a flat list of tag strings on the
/// product view model.
async fn with_categories(state: &AppState, product: ProductModel) -> AppResult<Product> {
    let category = ProductCategories::find()
        .filter(CategoryCol::ProductId.eq(product.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|row| row.category)
        .collect();
    Ok(Product {
        id: product.id,
        sku: product.sku,
        name: product.name,
        category,
    })
}
