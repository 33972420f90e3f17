use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Producer, User};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileView {
    pub user: User,
    pub producer: Option<Producer>,
}

/// Producer fields are ignored for consumer accounts.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub store_name: Option<String>,
    pub cnpj: Option<String>,
    pub pickup_address: Option<String>,
}
