use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        locations::{CreateLocationRequest, LocationList},
        orders::{CreateOrderRequest, OrderItemInput, OrderList, UpdateOrderRequest},
        products::{CreateProductRequest, ProductList},
        suppliers::{
            AddSupplierProductRequest, CreateSupplierRequest, SupplierList, SupplierProductInput,
            SupplierProductList, UpdateSupplierRequest,
        },
    },
    entity::procurement_orders::{FulfilmentStatus, PaymentStatus},
    models::{
        Location, OrderDetail, OrderItemDetail, Product, StockLevel, Supplier, SupplierDetail,
        SupplierProduct, SupplierProductDetail,
    },
    response::{ApiResponse, Meta},
    routes::{health, locations, orders, products, stock, suppliers},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        suppliers::create_supplier,
        suppliers::list_suppliers,
        suppliers::get_supplier,
        suppliers::get_supplier_by_name,
        suppliers::update_supplier,
        suppliers::delete_supplier,
        suppliers::add_product_to_supplier,
        suppliers::list_supplier_products,
        suppliers::list_products_by_supplier,
        suppliers::remove_product_from_supplier,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order,
        orders::order_document,
        products::create_product,
        products::list_products,
        products::get_product,
        locations::create_location,
        locations::list_locations,
        locations::get_location,
        stock::list_stock_levels
    ),
    components(
        schemas(
            Supplier,
            SupplierDetail,
            SupplierProduct,
            SupplierProductDetail,
            Product,
            Location,
            StockLevel,
            OrderDetail,
            OrderItemDetail,
            PaymentStatus,
            FulfilmentStatus,
            CreateSupplierRequest,
            UpdateSupplierRequest,
            AddSupplierProductRequest,
            SupplierProductInput,
            SupplierList,
            SupplierProductList,
            CreateOrderRequest,
            UpdateOrderRequest,
            OrderItemInput,
            OrderList,
            CreateProductRequest,
            ProductList,
            CreateLocationRequest,
            LocationList,
            stock::StockLevelList,
            health::HealthData,
            Meta,
            ApiResponse<SupplierDetail>,
            ApiResponse<SupplierList>,
            ApiResponse<SupplierProduct>,
            ApiResponse<SupplierProductList>,
            ApiResponse<OrderDetail>,
            ApiResponse<OrderList>,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Location>,
            ApiResponse<LocationList>,
            ApiResponse<stock::StockLevelList>,
            ApiResponse<health::HealthData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Suppliers", description = "Supplier and supplier-product endpoints"),
        (name = "Orders", description = "Procurement order endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Locations", description = "Warehouse location endpoints"),
        (name = "Stock", description = "Stock level read model"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
