use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::profile::{ProfileView, UpdateProfileRequest},
    error::AppResult,
    middleware::session::SessionUser,
    response::ApiResponse,
    services::profile_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(update_profile))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    params(
        ("x-user-id" = i64, Header, description = "Cached session user id")
    ),
    responses(
        (status = 200, description = "User profile", body = ApiResponse<ProfileView>),
        (status = 404, description = "User not found"),
    ),
    tag = "Profile"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    session: SessionUser,
) -> AppResult<Json<ApiResponse<ProfileView>>> {
    Ok(Json(profile_service::get_profile(&state, &session).await?))
}

#[utoipa::path(
    put,
    path = "/api/profile",
    params(
        ("x-user-id" = i64, Header, description = "Cached session user id")
    ),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<ProfileView>),
        (status = 400, description = "Name is required"),
        (status = 404, description = "User not found"),
    ),
    tag = "Profile"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    session: SessionUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<ProfileView>>> {
    Ok(Json(
        profile_service::update_profile(&state, &session, payload).await?,
    ))
}
