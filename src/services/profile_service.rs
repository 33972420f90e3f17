use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
    sea_query::LockType,
};

use crate::{
    dto::profile::{ProfileView, UpdateProfileRequest},
    entity::{
        produtores::{ActiveModel as ProducerActive, Column as ProducerCol, Entity as Produtores, Model as ProducerModel},
        usuarios::{ActiveModel as UserActive, Entity as Usuarios, Model as UserModel},
    },
    error::{AppError, AppResult},
    middleware::session::SessionUser,
    models::{Producer, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const PRODUCER_TYPE: &str = "produtor";

pub async fn get_profile(
    state: &AppState,
    session: &SessionUser,
) -> AppResult<ApiResponse<ProfileView>> {
    let user = Usuarios::find_by_id(session.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let producer = if user.tipo_usuario == PRODUCER_TYPE {
        Produtores::find()
            .filter(ProducerCol::UsuarioId.eq(user.id))
            .one(&state.orm)
            .await?
            .map(producer_from_entity)
    } else {
        None
    };

    Ok(ApiResponse::success(
        "Profile",
        ProfileView {
            user: user_from_entity(user),
            producer,
        },
        Some(Meta::empty()),
    ))
}

pub async fn update_profile(
    state: &AppState,
    session: &SessionUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<ProfileView>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    // User and producer rows change together or not at all.
    let txn = state.orm.begin().await?;
    let user = Usuarios::find_by_id(session.user_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let is_producer = user.tipo_usuario == PRODUCER_TYPE;

    let mut active: UserActive = user.into();
    active.nome = Set(name.to_string());
    active.telefone = Set(blank_to_none(payload.phone));
    active.endereco_padrao = Set(blank_to_none(payload.address));
    let user = active.update(&txn).await?;

    let producer = if is_producer {
        let existing = Produtores::find()
            .filter(ProducerCol::UsuarioId.eq(user.id))
            .lock(LockType::Update)
            .one(&txn)
            .await?;
        match existing {
            Some(existing) => {
                let mut active: ProducerActive = existing.into();
                active.nome_produtor = Set(blank_to_none(payload.store_name));
                active.cnpj = Set(blank_to_none(payload.cnpj));
                active.endereco_retirada = Set(blank_to_none(payload.pickup_address));
                Some(producer_from_entity(active.update(&txn).await?))
            }
            None => {
                tracing::warn!(user_id = user.id, "producer account without producer row");
                None
            }
        }
    } else {
        None
    };

    txn.commit().await?;
    tracing::info!(user_id = user.id, "profile updated");

    Ok(ApiResponse::success(
        "Profile updated",
        ProfileView {
            user: user_from_entity(user),
            producer,
        },
        Some(Meta::empty()),
    ))
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        name: model.nome,
        email: model.email,
        phone: model.telefone,
        address: model.endereco_padrao,
        user_type: model.tipo_usuario,
    }
}

fn producer_from_entity(model: ProducerModel) -> Producer {
    Producer {
        id: model.id,
        user_id: model.usuario_id,
        store_name: model.nome_produtor,
        cnpj: model.cnpj,
        pickup_address: model.endereco_retirada,
    }
}
