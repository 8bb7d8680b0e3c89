use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub sku: String,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_categories::Entity")]
    ProductCategories,
    #[sea_orm(has_many = "super::supplier_products::Entity")]
    SupplierProducts,
    #[sea_orm(has_many = "super::stock_quantities::Entity")]
    StockQuantities,
}

impl Related<super::product_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductCategories.def()
    }
}

impl Related<super::supplier_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplierProducts.def()
    }
}

impl Related<super::stock_quantities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockQuantities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
