use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "itens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub categoria: Option<String>,
    pub imagem_url: Option<String>,
    pub tipo_item_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tipos_item::Entity",
        from = "Column::TipoItemId",
        to = "super::tipos_item::Column::Id"
    )]
    TiposItem,
    #[sea_orm(has_many = "super::estoque::Entity")]
    Estoque,
}

impl Related<super::tipos_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TiposItem.def()
    }
}

impl Related<super::estoque::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Estoque.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
