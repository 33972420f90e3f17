use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "produtores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub usuario_id: i64,
    pub nome_produtor: Option<String>,
    pub cnpj: Option<String>,
    pub endereco_retirada: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuarios::Entity",
        from = "Column::UsuarioId",
        to = "super::usuarios::Column::Id"
    )]
    Usuarios,
    #[sea_orm(has_many = "super::estoque::Entity")]
    Estoque,
}

impl Related<super::usuarios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Usuarios.def()
    }
}

impl Related<super::estoque::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Estoque.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
