use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::procurement_orders::{FulfilmentStatus, PaymentStatus};
use crate::models::OrderDetail;

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemInput {
    pub product_sku: String,
    pub product_name: String,
    pub quantity: i32,
    pub rate: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub description: String,
    pub payment_status: PaymentStatus,
    pub fulfilment_status: FulfilmentStatus,
    pub warehouse_name: String,
    pub warehouse_address: String,
    pub supplier_id: Uuid,
    pub proc_order_items: Vec<OrderItemInput>,
}

/// Partial update; only supplied fields are written. `total_amount` is never
/// recomputed here — callers who change items and want a new total must send
/// it explicitly.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub order_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub fulfilment_status: Option<FulfilmentStatus>,
    pub warehouse_address: Option<String>,
    pub total_amount: Option<i64>,
    pub proc_order_items: Option<Vec<OrderItemInput>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderDetail>,
}
