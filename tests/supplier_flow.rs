mod common;

use procurement_api::{
    dto::suppliers::{AddSupplierProductRequest, CreateSupplierRequest, SupplierProductInput},
    entity::{SupplierProducts, Suppliers},
    error::AppError,
    services::supplier_service,
};
use sea_orm::{ConnectionTrait, EntityTrait, Statement};
use uuid::Uuid;

// Join resolver flow: create with initial products, upsert rates, expand
// joins into product view models, and delete with full join cleanup.
#[tokio::test]
async fn supplier_product_join_lifecycle() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let bolts = common::seed_product(&state, "BOLT-01", "Hex Bolt", &["fasteners"]).await?;
    let nuts = common::seed_product(&state, "NUT-01", "Hex Nut", &["fasteners", "steel"]).await?;

    let supplier = common::seed_supplier(
        &state,
        "sales@ferro.example",
        "Ferro Supplies",
        vec![SupplierProductInput {
            product_id: bolts.id,
            rate: 150,
        }],
    )
    .await?;
    assert_eq!(supplier.supplier_products.len(), 1);
    assert_eq!(supplier.supplier_products[0].rate, 150);
    assert_eq!(supplier.supplier_products[0].product.sku, "BOLT-01");

    // Upsert on the same key: one row, latest rate wins.
    supplier_service::add_product_to_supplier(
        &state,
        AddSupplierProductRequest {
            supplier_id: supplier.id,
            product_id: bolts.id,
            rate: 175,
        },
    )
    .await?;
    let joins = SupplierProducts::find().all(&state.orm).await?;
    assert_eq!(joins.len(), 1);
    assert_eq!(joins[0].rate, 175);

    // Second product joins alongside.
    supplier_service::add_product_to_supplier(
        &state,
        AddSupplierProductRequest {
            supplier_id: supplier.id,
            product_id: nuts.id,
            rate: 40,
        },
    )
    .await?;

    let expanded = supplier_service::get_supplier(&state, supplier.id)
        .await?
        .data
        .expect("supplier data");
    assert_eq!(expanded.supplier_products.len(), 2);
    let nut_join = expanded
        .supplier_products
        .iter()
        .find(|sp| sp.product.id == nuts.id)
        .expect("nut join");
    assert_eq!(nut_join.rate, 40);
    assert_eq!(
        nut_join.product.category,
        vec!["fasteners".to_string(), "steel".to_string()]
    );

    // Deleting the supplier sweeps every join first, then the record.
    supplier_service::delete_supplier(&state, supplier.id).await?;
    assert!(SupplierProducts::find().all(&state.orm).await?.is_empty());
    assert!(
        Suppliers::find_by_id(supplier.id)
            .one(&state.orm)
            .await?
            .is_none()
    );

    Ok(())
}

// Failure half of the settle-all delete: when a join removal fails, the
// outcome is a Dependency error and the supplier record must survive.
#[tokio::test]
async fn failed_join_cleanup_keeps_supplier() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let bolts = common::seed_product(&state, "BOLT-02", "Lag Bolt", &[]).await?;
    let supplier = common::seed_supplier(
        &state,
        "po@ridge.example",
        "Ridge Hardware",
        vec![SupplierProductInput {
            product_id: bolts.id,
            rate: 90,
        }],
    )
    .await?;

    // Make the store refuse join deletes so the cleanup sweep fails.
    let backend = state.orm.get_database_backend();
    state
        .orm
        .execute(Statement::from_string(
            backend,
            "CREATE OR REPLACE FUNCTION refuse_join_delete() RETURNS trigger AS $$ \
             BEGIN RAISE EXCEPTION 'join delete blocked'; END; \
             $$ LANGUAGE plpgsql",
        ))
        .await?;
    state
        .orm
        .execute(Statement::from_string(
            backend,
            "CREATE TRIGGER refuse_join_delete BEFORE DELETE ON supplier_products \
             FOR EACH ROW EXECUTE FUNCTION refuse_join_delete()",
        ))
        .await?;

    let err = supplier_service::delete_supplier(&state, supplier.id)
        .await
        .expect_err("join cleanup must fail");
    assert!(matches!(err, AppError::Dependency(_)), "got {err:?}");

    // Supplier and its join are both still in place.
    assert!(
        Suppliers::find_by_id(supplier.id)
            .one(&state.orm)
            .await?
            .is_some(),
        "supplier must survive a failed cleanup"
    );
    assert_eq!(SupplierProducts::find().all(&state.orm).await?.len(), 1);

    // With the fault removed, the same delete sweeps cleanly.
    state
        .orm
        .execute(Statement::from_string(
            backend,
            "DROP TRIGGER refuse_join_delete ON supplier_products",
        ))
        .await?;
    supplier_service::delete_supplier(&state, supplier.id).await?;
    assert!(
        Suppliers::find_by_id(supplier.id)
            .one(&state.orm)
            .await?
            .is_none()
    );

    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_with_no_write() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    common::seed_supplier(&state, "dup@mills.example", "Mills", vec![]).await?;

    let err = supplier_service::create_supplier(
        &state,
        CreateSupplierRequest {
            email: "dup@mills.example".into(),
            name: "Mills Clone".into(),
            address: "9 Side Street".into(),
            supplier_products: vec![],
        },
    )
    .await
    .expect_err("duplicate email");
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");

    let suppliers = Suppliers::find().all(&state.orm).await?;
    assert_eq!(suppliers.len(), 1, "conflict must not write a second row");

    Ok(())
}

#[tokio::test]
async fn join_writes_require_both_sides() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let product = common::seed_product(&state, "PIPE-01", "Steel Pipe", &[]).await?;
    let supplier = common::seed_supplier(&state, "po@tube.example", "Tube Co", vec![]).await?;

    let err = supplier_service::add_product_to_supplier(
        &state,
        AddSupplierProductRequest {
            supplier_id: Uuid::new_v4(),
            product_id: product.id,
            rate: 10,
        },
    )
    .await
    .expect_err("missing supplier");
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

    let err = supplier_service::add_product_to_supplier(
        &state,
        AddSupplierProductRequest {
            supplier_id: supplier.id,
            product_id: Uuid::new_v4(),
            rate: 10,
        },
    )
    .await
    .expect_err("missing product");
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

    // Neither failed precondition may have written a join.
    assert!(SupplierProducts::find().all(&state.orm).await?.is_empty());

    let err = supplier_service::remove_product_from_supplier(&state, supplier.id, product.id)
        .await
        .expect_err("join never existed");
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

    Ok(())
}

#[tokio::test]
async fn update_supplier_does_not_rewrite_order_snapshots() -> anyhow::Result<()> {
    use procurement_api::dto::orders::{CreateOrderRequest, OrderItemInput};
    use procurement_api::dto::suppliers::UpdateSupplierRequest;
    use procurement_api::entity::procurement_orders::{FulfilmentStatus, PaymentStatus};
    use procurement_api::services::order_service;

    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let location = common::seed_location(&state, "North Warehouse").await?;
    common::seed_product(&state, "SKU-A", "Widget", &[]).await?;
    let supplier = common::seed_supplier(&state, "old@vendor.example", "Vendor", vec![]).await?;

    let order = order_service::create_order(
        &state,
        CreateOrderRequest {
            description: "Snapshot check".into(),
            payment_status: PaymentStatus::Pending,
            fulfilment_status: FulfilmentStatus::Pending,
            warehouse_name: location.name.clone(),
            warehouse_address: location.address.clone(),
            supplier_id: supplier.id,
            proc_order_items: vec![OrderItemInput {
                product_sku: "SKU-A".into(),
                product_name: "Widget".into(),
                quantity: 1,
                rate: 100,
            }],
        },
    )
    .await?
    .data
    .expect("order data");

    supplier_service::update_supplier(
        &state,
        supplier.id,
        UpdateSupplierRequest {
            email: Some("new@vendor.example".into()),
            ..Default::default()
        },
    )
    .await?;

    // The order keeps the supplier as it was at creation time.
    let fetched = order_service::get_order(&state, order.id)
        .await?
        .data
        .expect("order data");
    assert_eq!(fetched.supplier.email, "old@vendor.example");

    Ok(())
}
