use sea_orm::entity::prelude::*;

// Article ids are assigned by the upstream inventory system, never generated here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub stock: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_requirements::Entity")]
    ProductRequirements,
}

impl Related<super::product_requirements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductRequirements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
