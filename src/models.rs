use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::procurement_orders::{FulfilmentStatus, PaymentStatus};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Supplier {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub address: String,
}

/// Supplier with its product joins expanded: each join carries the full
/// product record in place of the bare product id.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SupplierDetail {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub address: String,
    pub supplier_products: Vec<SupplierProductDetail>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SupplierProductDetail {
    pub supplier_id: Uuid,
    pub rate: i64,
    pub product: Product,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SupplierProduct {
    pub supplier_id: Uuid,
    pub product_id: Uuid,
    pub rate: i64,
}

/// Product with its category-tag relation flattened to plain strings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub category: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderDetail {
    pub id: Uuid,
    pub order_date: DateTime<Utc>,
    pub description: String,
    pub payment_status: PaymentStatus,
    pub fulfilment_status: FulfilmentStatus,
    pub total_amount: i64,
    pub supplier: Supplier,
    pub location: Location,
    pub proc_order_items: Vec<OrderItemDetail>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDetail {
    pub id: Uuid,
    pub proc_order_id: Uuid,
    pub quantity: i32,
    pub product: Product,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct StockLevel {
    pub product_id: Uuid,
    pub product_sku: String,
    pub product_name: String,
    pub location_id: Uuid,
    pub location_name: String,
    pub quantity: i64,
}
