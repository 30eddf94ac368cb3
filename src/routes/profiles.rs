use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};

use crate::{
    dto::profiles::{UpdateLocationRequest, UpdateProfileRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Profile,
    response::ApiResponse,
    services::profile_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_profile))
        .route("/me", put(update_profile))
        .route("/me/location", put(update_location))
}

#[utoipa::path(
    get,
    path = "/api/profiles/me",
    responses(
        (status = 200, description = "The caller's profile, created on first read", body = ApiResponse<Profile>)
    ),
    tag = "Profiles"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Profile>>> {
    let resp = profile_service::get_or_create(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/profiles/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<Profile>)
    ),
    tag = "Profiles"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<Profile>>> {
    let resp = profile_service::update_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/profiles/me/location",
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "Location saved", body = ApiResponse<Profile>),
        (status = 400, description = "Invalid coordinates"),
    ),
    tag = "Profiles"
)]
pub async fn update_location(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateLocationRequest>,
) -> AppResult<Json<ApiResponse<Profile>>> {
    let resp = profile_service::update_location(&state, &user, payload).await?;
    Ok(Json(resp))
}
