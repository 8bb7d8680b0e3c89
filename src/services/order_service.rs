use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::orders::{CreateOrderRequest, OrderItemInput, OrderList, UpdateOrderRequest},
    entity::{
        locations::{Column as LocationCol, Entity as Locations, Model as LocationModel},
        proc_order_items::{
            ActiveModel as ItemActive, Column as ItemCol, Entity as ProcOrderItems,
            Model as ItemModel,
        },
        procurement_orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as ProcurementOrders,
            FulfilmentStatus, Model as OrderModel,
        },
        stock_quantities::{ActiveModel as StockActive, Entity as StockQuantities},
        suppliers::Entity as Suppliers,
    },
    error::{AppError, AppResult},
    models::{Location, OrderDetail, OrderItemDetail, Supplier},
    notify::{OrderSnapshot, OrderSnapshotItem, render_order_document},
    response::{ApiResponse, Meta},
    services::product_service,
    state::AppState,
};

/// Exact sum of quantity x rate over the line items. Amounts are minor
/// currency units, so integer arithmetic keeps the invariant
/// `total == sum(quantity_i * rate_i)` without rounding.
pub fn order_total(items: &[OrderItemInput]) -> i64 {
    items
        .iter()
        .map(|item| i64::from(item.quantity) * item.rate)
        .sum()
}

pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderDetail>> {
    // Both linkages are preconditions: a miss is a validation failure on the
    // request, not a silent null in the stored order.
    let location = Locations::find()
        .filter(LocationCol::Name.eq(payload.warehouse_name.clone()))
        .one(&state.orm)
        .await?
        .ok_or_else(|| {
            AppError::Validation(format!(
                "warehouse '{}' does not exist",
                payload.warehouse_name
            ))
        })?;
    let supplier = Suppliers::find_by_id(payload.supplier_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| {
            AppError::Validation(format!("supplier {} does not exist", payload.supplier_id))
        })?;

    let order_date = Utc::now();
    let total_amount = order_total(&payload.proc_order_items);

    // Supplier fields are snapshotted here; later supplier edits must not
    // rewrite orders already placed.
    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        order_date: Set(order_date.into()),
        description: Set(payload.description),
        payment_status: Set(payload.payment_status),
        fulfilment_status: Set(payload.fulfilment_status),
        total_amount: Set(total_amount),
        warehouse_name: Set(location.name.clone()),
        warehouse_address: Set(payload.warehouse_address),
        supplier_id: Set(supplier.id),
        supplier_name: Set(supplier.name.clone()),
        supplier_address: Set(supplier.address.clone()),
        supplier_email: Set(supplier.email.clone()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let mut items = Vec::with_capacity(payload.proc_order_items.len());
    for input in &payload.proc_order_items {
        let item = insert_item(state, order.id, input).await?;
        items.push(item);
    }

    // Post-commit hook: the order is already persisted, so delivery problems
    // are logged and never surfaced to the caller.
    let snapshot = order_snapshot(&order, &items);
    if let Err(err) = state.dispatcher.render_and_send(&snapshot).await {
        tracing::warn!(order_id = %order.id, error = %err, "purchase order notification failed");
    }

    let detail = assemble_order_detail(state, order, items).await?;
    Ok(ApiResponse::success(
        "Procurement order created",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn update_order(
    state: &AppState,
    id: Uuid,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<OrderDetail>> {
    let existing = ProcurementOrders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("procurement order {id}")))?;
    let previous_status = existing.fulfilment_status;

    let mut active: OrderActive = existing.into();
    if let Some(order_date) = payload.order_date {
        active.order_date = Set(order_date.into());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(payment_status) = payload.payment_status {
        active.payment_status = Set(payment_status);
    }
    if let Some(fulfilment_status) = payload.fulfilment_status {
        active.fulfilment_status = Set(fulfilment_status);
    }
    if let Some(warehouse_address) = payload.warehouse_address {
        active.warehouse_address = Set(warehouse_address);
    }
    if let Some(total_amount) = payload.total_amount {
        active.total_amount = Set(total_amount);
    }
    let order = active.update(&state.orm).await?;

    if let Some(inputs) = payload.proc_order_items {
        ProcOrderItems::delete_many()
            .filter(ItemCol::ProcOrderId.eq(order.id))
            .exec(&state.orm)
            .await?;
        for input in &inputs {
            insert_item(state, order.id, input).await?;
        }
    }

    let items = ProcOrderItems::find()
        .filter(ItemCol::ProcOrderId.eq(order.id))
        .all(&state.orm)
        .await?;

    // Stock posts exactly once, on the edge into COMPLETED. Updates that
    // leave an already-completed order completed do not post again.
    if previous_status != FulfilmentStatus::Completed
        && order.fulfilment_status == FulfilmentStatus::Completed
    {
        post_stock(state, &order, &items).await?;
    }

    let detail = assemble_order_detail(state, order, items).await?;
    Ok(ApiResponse::success(
        "Procurement order updated",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(state: &AppState) -> AppResult<ApiResponse<OrderList>> {
    let orders = ProcurementOrders::find()
        .order_by_asc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;

    // Sequential assembly keeps the response in store listing order.
    let mut details = Vec::with_capacity(orders.len());
    for order in orders {
        let items = ProcOrderItems::find()
            .filter(ItemCol::ProcOrderId.eq(order.id))
            .all(&state.orm)
            .await?;
        details.push(assemble_order_detail(state, order, items).await?);
    }

    Ok(ApiResponse::success(
        "Procurement orders",
        OrderList { items: details },
        Some(Meta::empty()),
    ))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<OrderDetail>> {
    let (order, items) = find_order_with_items(state, id).await?;
    let detail = assemble_order_detail(state, order, items).await?;
    Ok(ApiResponse::success(
        "Procurement order",
        detail,
        Some(Meta::empty()),
    ))
}

/// Rendered purchase order document for an existing order.
pub async fn order_document(state: &AppState, id: Uuid) -> AppResult<String> {
    let (order, items) = find_order_with_items(state, id).await?;
    Ok(render_order_document(&order_snapshot(&order, &items)))
}

/// Per-item view models: each line joined with its product, the product's
/// category rows flattened to tag strings. A missing SKU is a hard error,
/// never a silently dropped line.
pub async fn assemble_item_details(
    state: &AppState,
    items: &[ItemModel],
) -> AppResult<Vec<OrderItemDetail>> {
    let mut details = Vec::with_capacity(items.len());
    for item in items {
        let product = product_service::find_by_sku(state, &item.product_sku).await?;
        details.push(OrderItemDetail {
            id: item.id,
            proc_order_id: item.proc_order_id,
            quantity: item.quantity,
            product,
        });
    }
    Ok(details)
}

async fn find_order_with_items(
    state: &AppState,
    id: Uuid,
) -> AppResult<(OrderModel, Vec<ItemModel>)> {
    let order = ProcurementOrders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("procurement order {id}")))?;
    let items = ProcOrderItems::find()
        .filter(ItemCol::ProcOrderId.eq(order.id))
        .all(&state.orm)
        .await?;
    Ok((order, items))
}

async fn insert_item(
    state: &AppState,
    proc_order_id: Uuid,
    input: &OrderItemInput,
) -> AppResult<ItemModel> {
    let item = ItemActive {
        id: Set(Uuid::new_v4()),
        proc_order_id: Set(proc_order_id),
        product_sku: Set(input.product_sku.clone()),
        product_name: Set(input.product_name.clone()),
        quantity: Set(input.quantity),
        rate: Set(input.rate),
    }
    .insert(&state.orm)
    .await?;
    Ok(item)
}

/// Create-or-increment stock for every line item at the order's warehouse.
async fn post_stock(state: &AppState, order: &OrderModel, items: &[ItemModel]) -> AppResult<()> {
    let location = find_warehouse(state, &order.warehouse_name).await?;
    for item in items {
        let product = product_service::find_by_sku(state, &item.product_sku).await?;
        let existing = StockQuantities::find_by_id((product.id, location.id))
            .one(&state.orm)
            .await?;
        match existing {
            Some(stock) => {
                // i64 running total: per-item quantities are i32, but the
                // accumulated level is not bounded by one order.
                let next = stock.quantity + i64::from(item.quantity);
                let mut active: StockActive = stock.into();
                active.quantity = Set(next);
                active.update(&state.orm).await?;
            }
            None => {
                StockActive {
                    product_id: Set(product.id),
                    location_id: Set(location.id),
                    product_sku: Set(product.sku.clone()),
                    product_name: Set(product.name.clone()),
                    location_name: Set(location.name.clone()),
                    quantity: Set(i64::from(item.quantity)),
                }
                .insert(&state.orm)
                .await?;
            }
        }
        tracing::debug!(
            sku = %item.product_sku,
            location = %location.name,
            quantity = item.quantity,
            "stock posted"
        );
    }
    Ok(())
}

async fn assemble_order_detail(
    state: &AppState,
    order: OrderModel,
    items: Vec<ItemModel>,
) -> AppResult<OrderDetail> {
    let location = find_warehouse(state, &order.warehouse_name).await?;
    let item_details = assemble_item_details(state, &items).await?;
    Ok(OrderDetail {
        id: order.id,
        order_date: order.order_date.with_timezone(&Utc),
        description: order.description,
        payment_status: order.payment_status,
        fulfilment_status: order.fulfilment_status,
        total_amount: order.total_amount,
        // Built from the creation-time snapshot, so the view stays stable
        // even if the supplier record changed or went away since.
        supplier: Supplier {
            id: order.supplier_id,
            email: order.supplier_email,
            name: order.supplier_name,
            address: order.supplier_address,
        },
        location: location_view(location),
        proc_order_items: item_details,
    })
}

async fn find_warehouse(state: &AppState, name: &str) -> AppResult<LocationModel> {
    Locations::find()
        .filter(LocationCol::Name.eq(name))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("location '{name}'")))
}

fn location_view(model: LocationModel) -> Location {
    Location {
        id: model.id,
        name: model.name,
        address: model.address,
    }
}

fn order_snapshot(order: &OrderModel, items: &[ItemModel]) -> OrderSnapshot {
    OrderSnapshot {
        order_date: order.order_date.format("%d %b %Y").to_string(),
        supplier_name: order.supplier_name.clone(),
        supplier_email: order.supplier_email.clone(),
        warehouse_address: order.warehouse_address.clone(),
        items: items
            .iter()
            .map(|item| OrderSnapshotItem {
                product_sku: item.product_sku.clone(),
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                rate: item.rate,
            })
            .collect(),
    }
}
