use std::ops::Deref;
use std::sync::Arc;

use procurement_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        locations::CreateLocationRequest,
        products::CreateProductRequest,
        suppliers::{CreateSupplierRequest, SupplierProductInput},
    },
    models::{Location, Product, SupplierDetail},
    notify::{LogDispatcher, NotificationDispatcher},
    services::{location_service, product_service, supplier_service},
    state::AppState,
};
use sea_orm::{ConnectionTrait, Statement};
use tokio::sync::{Mutex, MutexGuard};

// The flow tests share one database and truncate it on setup, so only one
// of them may run at a time even though libtest spawns them concurrently.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

/// Database-backed test fixture. Holds the serialization guard for the whole
/// test so a concurrent test's truncate cannot wipe this test's seeds.
pub struct TestDb {
    state: AppState,
    _guard: MutexGuard<'static, ()>,
}

impl Deref for TestDb {
    type Target = AppState;

    fn deref(&self) -> &AppState {
        &self.state
    }
}

/// Returns `None` when no database is configured, so the flow tests skip
/// instead of failing on machines without Postgres.
pub async fn setup_state() -> anyhow::Result<Option<TestDb>> {
    setup_state_with(Arc::new(LogDispatcher)).await
}

pub async fn setup_state_with(
    dispatcher: Arc<dyn NotificationDispatcher>,
) -> anyhow::Result<Option<TestDb>> {
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(None);
            }
        };

    let guard = DB_LOCK.lock().await;

    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE proc_order_items, procurement_orders, stock_quantities, \
         supplier_products, product_categories, products, suppliers, locations \
         RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(Some(TestDb {
        state: AppState {
            pool,
            orm,
            dispatcher,
        },
        _guard: guard,
    }))
}

pub async fn seed_location(state: &AppState, name: &str) -> anyhow::Result<Location> {
    let resp = location_service::create_location(
        state,
        CreateLocationRequest {
            name: name.into(),
            address: format!("{name} street 1"),
        },
    )
    .await?;
    Ok(resp.data.expect("location data"))
}

pub async fn seed_product(
    state: &AppState,
    sku: &str,
    name: &str,
    category: &[&str],
) -> anyhow::Result<Product> {
    let resp = product_service::create_product(
        state,
        CreateProductRequest {
            sku: sku.into(),
            name: name.into(),
            category: category.iter().map(|c| c.to_string()).collect(),
        },
    )
    .await?;
    Ok(resp.data.expect("product data"))
}

pub async fn seed_supplier(
    state: &AppState,
    email: &str,
    name: &str,
    products: Vec<SupplierProductInput>,
) -> anyhow::Result<SupplierDetail> {
    let resp = supplier_service::create_supplier(
        state,
        CreateSupplierRequest {
            email: email.into(),
            name: name.into(),
            address: "7 Harbour Way".into(),
            supplier_products: products,
        },
    )
    .await?;
    Ok(resp.data.expect("supplier data"))
}
