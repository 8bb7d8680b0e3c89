pub mod locations;
pub mod proc_order_items;
pub mod procurement_orders;
pub mod product_categories;
pub mod products;
pub mod stock_quantities;
pub mod supplier_products;
pub mod suppliers;

pub use locations::Entity as Locations;
pub use proc_order_items::Entity as ProcOrderItems;
pub use procurement_orders::Entity as ProcurementOrders;
pub use product_categories::Entity as ProductCategories;
pub use products::Entity as Products;
pub use stock_quantities::Entity as StockQuantities;
pub use supplier_products::Entity as SupplierProducts;
pub use suppliers::Entity as Suppliers;
