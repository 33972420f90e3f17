use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nome: String,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub endereco_padrao: Option<String>,
    pub tipo_usuario: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::produtores::Entity")]
    Produtores,
}

impl Related<super::produtores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Produtores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
