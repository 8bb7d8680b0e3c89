mod common;

use std::sync::Arc;

use async_trait::async_trait;
use procurement_api::{
    dto::orders::{CreateOrderRequest, OrderItemInput, UpdateOrderRequest},
    entity::{
        StockQuantities,
        procurement_orders::{FulfilmentStatus, PaymentStatus},
    },
    error::AppError,
    notify::{NotificationDispatcher, OrderSnapshot},
    services::order_service,
};
use sea_orm::EntityTrait;
use uuid::Uuid;

fn order_request(supplier_id: Uuid, warehouse: &str) -> CreateOrderRequest {
    CreateOrderRequest {
        description: "Restock widgets".into(),
        payment_status: PaymentStatus::Pending,
        fulfilment_status: FulfilmentStatus::Pending,
        warehouse_name: warehouse.into(),
        warehouse_address: "12 Dock Road".into(),
        supplier_id,
        proc_order_items: vec![
            OrderItemInput {
                product_sku: "SKU-A".into(),
                product_name: "Widget".into(),
                quantity: 2,
                rate: 10,
            },
            OrderItemInput {
                product_sku: "SKU-B".into(),
                product_name: "Gadget".into(),
                quantity: 1,
                rate: 5,
            },
        ],
    }
}

// Full procurement flow: create order (total + snapshot + nested assembly),
// complete it (stock posting), complete it again (no double posting).
#[tokio::test]
async fn order_lifecycle_posts_stock_once() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let location = common::seed_location(&state, "Central Warehouse").await?;
    let product_a = common::seed_product(&state, "SKU-A", "Widget", &["hardware"]).await?;
    let product_b = common::seed_product(&state, "SKU-B", "Gadget", &["hardware", "tools"]).await?;
    let supplier = common::seed_supplier(&state, "orders@acme.example", "Acme", vec![]).await?;

    let created = order_service::create_order(&state, order_request(supplier.id, &location.name))
        .await?
        .data
        .expect("order data");
    assert_eq!(created.total_amount, 25);
    assert_eq!(created.supplier.email, "orders@acme.example");
    assert_eq!(created.location.id, location.id);
    assert_eq!(created.proc_order_items.len(), 2);
    let first_item = &created.proc_order_items[0];
    assert_eq!(first_item.product.sku, "SKU-A");
    assert_eq!(first_item.product.category, vec!["hardware".to_string()]);

    // No stock while the order is pending.
    assert!(
        StockQuantities::find_by_id((product_a.id, location.id))
            .one(&state.orm)
            .await?
            .is_none()
    );

    // PENDING -> COMPLETED posts each item quantity at the warehouse.
    let completed = order_service::update_order(
        &state,
        created.id,
        UpdateOrderRequest {
            fulfilment_status: Some(FulfilmentStatus::Completed),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("order data");
    assert_eq!(completed.fulfilment_status, FulfilmentStatus::Completed);

    let stock_a = StockQuantities::find_by_id((product_a.id, location.id))
        .one(&state.orm)
        .await?
        .expect("stock for SKU-A");
    assert_eq!(stock_a.quantity, 2);
    let stock_b = StockQuantities::find_by_id((product_b.id, location.id))
        .one(&state.orm)
        .await?
        .expect("stock for SKU-B");
    assert_eq!(stock_b.quantity, 1);

    // Re-sending COMPLETED must not post again.
    order_service::update_order(
        &state,
        created.id,
        UpdateOrderRequest {
            fulfilment_status: Some(FulfilmentStatus::Completed),
            description: Some("Restock widgets (amended)".into()),
            ..Default::default()
        },
    )
    .await?;
    let stock_a = StockQuantities::find_by_id((product_a.id, location.id))
        .one(&state.orm)
        .await?
        .expect("stock for SKU-A");
    assert_eq!(stock_a.quantity, 2, "completed re-update must not double-post");

    // A second order into the same warehouse merges additively.
    let second = order_service::create_order(&state, order_request(supplier.id, &location.name))
        .await?
        .data
        .expect("order data");
    order_service::update_order(
        &state,
        second.id,
        UpdateOrderRequest {
            fulfilment_status: Some(FulfilmentStatus::Completed),
            ..Default::default()
        },
    )
    .await?;
    let stock_a = StockQuantities::find_by_id((product_a.id, location.id))
        .one(&state.orm)
        .await?
        .expect("stock for SKU-A");
    assert_eq!(stock_a.quantity, 4);

    // Listing preserves store order and returns fully assembled views.
    let listed = order_service::list_orders(&state).await?.data.expect("list");
    assert_eq!(listed.items.len(), 2);
    assert_eq!(listed.items[0].id, created.id);
    assert_eq!(listed.items[1].id, second.id);

    Ok(())
}

#[tokio::test]
async fn stock_level_accumulates_beyond_i32() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let location = common::seed_location(&state, "Bulk Warehouse").await?;
    let product = common::seed_product(&state, "GRAIN-01", "Grain", &[]).await?;
    let supplier = common::seed_supplier(&state, "po@silo.example", "Silo Co", vec![]).await?;

    let bulk_order = || CreateOrderRequest {
        description: "Bulk grain intake".into(),
        payment_status: PaymentStatus::Pending,
        fulfilment_status: FulfilmentStatus::Pending,
        warehouse_name: location.name.clone(),
        warehouse_address: location.address.clone(),
        supplier_id: supplier.id,
        proc_order_items: vec![OrderItemInput {
            product_sku: "GRAIN-01".into(),
            product_name: "Grain".into(),
            quantity: 2_000_000_000,
            rate: 1,
        }],
    };

    // Two completed postings of 2e9 units push the level past i32::MAX.
    for _ in 0..2 {
        let order = order_service::create_order(&state, bulk_order())
            .await?
            .data
            .expect("order data");
        order_service::update_order(
            &state,
            order.id,
            UpdateOrderRequest {
                fulfilment_status: Some(FulfilmentStatus::Completed),
                ..Default::default()
            },
        )
        .await?;
    }

    let stock = StockQuantities::find_by_id((product.id, location.id))
        .one(&state.orm)
        .await?
        .expect("bulk stock");
    assert_eq!(stock.quantity, 4_000_000_000_i64);

    Ok(())
}

#[tokio::test]
async fn create_order_requires_supplier_and_warehouse() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let location = common::seed_location(&state, "East Warehouse").await?;
    let supplier = common::seed_supplier(&state, "po@nordic.example", "Nordic", vec![]).await?;

    let err = order_service::create_order(&state, order_request(Uuid::new_v4(), &location.name))
        .await
        .expect_err("unknown supplier");
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let err = order_service::create_order(&state, order_request(supplier.id, "No Such Warehouse"))
        .await
        .expect_err("unknown warehouse");
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    Ok(())
}

#[tokio::test]
async fn missing_sku_fails_item_assembly() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let location = common::seed_location(&state, "West Warehouse").await?;
    let supplier = common::seed_supplier(&state, "po@apex.example", "Apex", vec![]).await?;

    // Items reference SKUs that were never registered as products.
    let err = order_service::create_order(&state, order_request(supplier.id, &location.name))
        .await
        .expect_err("unknown SKU must propagate");
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

    Ok(())
}

struct FailingDispatcher;

#[async_trait]
impl NotificationDispatcher for FailingDispatcher {
    async fn render_and_send(&self, _snapshot: &OrderSnapshot) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("smtp unreachable"))
    }
}

#[tokio::test]
async fn notification_failure_does_not_fail_creation() -> anyhow::Result<()> {
    let Some(state) = common::setup_state_with(Arc::new(FailingDispatcher)).await? else {
        return Ok(());
    };

    let location = common::seed_location(&state, "South Warehouse").await?;
    common::seed_product(&state, "SKU-A", "Widget", &[]).await?;
    common::seed_product(&state, "SKU-B", "Gadget", &[]).await?;
    let supplier = common::seed_supplier(&state, "po@delta.example", "Delta", vec![]).await?;

    let created = order_service::create_order(&state, order_request(supplier.id, &location.name))
        .await?
        .data
        .expect("order data");
    assert_eq!(created.total_amount, 25);

    // The order is persisted despite the failed dispatch.
    let fetched = order_service::get_order(&state, created.id)
        .await?
        .data
        .expect("order data");
    assert_eq!(fetched.id, created.id);

    Ok(())
}
