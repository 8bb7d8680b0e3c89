use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub address: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_quantities::Entity")]
    StockQuantities,
}

impl Related<super::stock_quantities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockQuantities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
