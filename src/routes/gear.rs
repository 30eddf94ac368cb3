use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::gear::{AddImageRequest, CreateGearRequest, GearDetails, GearList, UpdateGearRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Gear, GearImage},
    response::ApiResponse,
    routes::params::{GearQuery, Pagination},
    services::gear_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_gear))
        .route("/", post(create_gear))
        .route("/mine", get(list_my_gear))
        .route("/{id}", get(get_gear))
        .route("/{id}", put(update_gear))
        .route("/{id}", delete(delete_gear))
        .route("/{id}/availability", post(toggle_availability))
        .route("/{id}/images", post(add_image))
        .route("/{id}/images/{image_id}", delete(remove_image))
}

#[utoipa::path(
    get,
    path = "/api/gear",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("category" = Option<String>, Query, description = "Category filter; 'All' or absent for every category"),
        ("q" = Option<String>, Query, description = "Case-insensitive search over name and description"),
    ),
    responses(
        (status = 200, description = "Browse available gear", body = ApiResponse<GearList>)
    ),
    tag = "Gear"
)]
pub async fn list_gear(
    State(state): State<AppState>,
    Query(query): Query<GearQuery>,
) -> AppResult<Json<ApiResponse<GearList>>> {
    let resp = gear_service::list_available(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/gear/mine",
    responses(
        (status = 200, description = "The caller's own listings", body = ApiResponse<GearList>)
    ),
    tag = "Gear"
)]
pub async fn list_my_gear(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<GearList>>> {
    let resp = gear_service::list_my_gear(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/gear/{id}",
    params(
        ("id" = Uuid, Path, description = "Gear ID")
    ),
    responses(
        (status = 200, description = "Gear detail", body = ApiResponse<GearDetails>),
        (status = 404, description = "Gear not found"),
    ),
    tag = "Gear"
)]
pub async fn get_gear(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<GearDetails>>> {
    let resp = gear_service::get_gear(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/gear",
    request_body = CreateGearRequest,
    responses(
        (status = 200, description = "Listing created", body = ApiResponse<GearDetails>)
    ),
    tag = "Gear"
)]
pub async fn create_gear(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateGearRequest>,
) -> AppResult<Json<ApiResponse<GearDetails>>> {
    let resp = gear_service::create_gear(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/gear/{id}",
    params(
        ("id" = Uuid, Path, description = "Gear ID")
    ),
    request_body = UpdateGearRequest,
    responses(
        (status = 200, description = "Updated listing", body = ApiResponse<GearDetails>),
        (status = 403, description = "Not the owner"),
    ),
    tag = "Gear"
)]
pub async fn update_gear(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGearRequest>,
) -> AppResult<Json<ApiResponse<GearDetails>>> {
    let resp = gear_service::update_gear(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/gear/{id}/availability",
    params(
        ("id" = Uuid, Path, description = "Gear ID")
    ),
    responses(
        (status = 200, description = "Availability toggled", body = ApiResponse<Gear>),
        (status = 403, description = "Not the owner"),
    ),
    tag = "Gear"
)]
pub async fn toggle_availability(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Gear>>> {
    let resp = gear_service::toggle_availability(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/gear/{id}",
    params(
        ("id" = Uuid, Path, description = "Gear ID")
    ),
    responses(
        (status = 200, description = "Listing deleted"),
        (status = 403, description = "Not the owner"),
    ),
    tag = "Gear"
)]
pub async fn delete_gear(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = gear_service::delete_gear(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/gear/{id}/images",
    params(
        ("id" = Uuid, Path, description = "Gear ID")
    ),
    request_body = AddImageRequest,
    responses(
        (status = 200, description = "Image added", body = ApiResponse<GearImage>),
        (status = 403, description = "Not the owner"),
    ),
    tag = "Gear"
)]
pub async fn add_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddImageRequest>,
) -> AppResult<Json<ApiResponse<GearImage>>> {
    let resp = gear_service::add_image(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/gear/{id}/images/{image_id}",
    params(
        ("id" = Uuid, Path, description = "Gear ID"),
        ("image_id" = Uuid, Path, description = "Image ID"),
    ),
    responses(
        (status = 200, description = "Image removed"),
        (status = 403, description = "Not the owner"),
    ),
    tag = "Gear"
)]
pub async fn remove_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, image_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = gear_service::remove_image(&state, &user, id, image_id).await?;
    Ok(Json(resp))
}
