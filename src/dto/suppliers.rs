use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{SupplierDetail, SupplierProduct};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SupplierProductInput {
    pub product_id: Uuid,
    pub rate: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSupplierRequest {
    pub email: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub supplier_products: Vec<SupplierProductInput>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSupplierRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddSupplierProductRequest {
    pub supplier_id: Uuid,
    pub product_id: Uuid,
    pub rate: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierList {
    pub items: Vec<SupplierDetail>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierProductList {
    pub items: Vec<SupplierProduct>,
}
