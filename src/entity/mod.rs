pub mod estoque;
pub mod itens;
pub mod produtores;
pub mod tipos_item;
pub mod usuarios;
