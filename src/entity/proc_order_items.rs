use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "proc_order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub proc_order_id: Uuid,
    pub product_sku: String,
    pub product_name: String,
    pub quantity: i32,
    pub rate: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::procurement_orders::Entity",
        from = "Column::ProcOrderId",
        to = "super::procurement_orders::Column::Id"
    )]
    ProcurementOrders,
}

impl Related<super::procurement_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProcurementOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
