use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tipos_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nome: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::itens::Entity")]
    Itens,
}

impl Related<super::itens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Itens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
