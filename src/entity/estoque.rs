use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "estoque")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub produtor_id: i64,
    pub item_id: i64,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub preco_unitario: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub quantidade: Decimal,
    pub disponivel: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::produtores::Entity",
        from = "Column::ProdutorId",
        to = "super::produtores::Column::Id"
    )]
    Produtores,
    #[sea_orm(
        belongs_to = "super::itens::Entity",
        from = "Column::ItemId",
        to = "super::itens::Column::Id"
    )]
    Itens,
}

impl Related<super::produtores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Produtores.def()
    }
}

impl Related<super::itens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Itens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
