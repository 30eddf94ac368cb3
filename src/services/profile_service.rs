use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    audit::log_audit,
    dto::profiles::{UpdateLocationRequest, UpdateProfileRequest},
    entity::profiles::{ActiveModel as ProfileActive, Entity as Profiles, Model as ProfileModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Fetch the caller's profile, creating one on first read. The display name
/// defaults to the token's email local part until the user sets it. Null
/// coordinates tell the client to show its one-time location prompt.
pub async fn get_or_create(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<models::Profile>> {
    let profile = ensure_profile(state, user).await?;
    Ok(ApiResponse::success(
        "Profile",
        profile_from_entity(profile),
        Some(Meta::empty()),
    ))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<models::Profile>> {
    if payload.display_name.trim().is_empty() {
        return Err(AppError::BadRequest("Display name is required".into()));
    }

    let existing = ensure_profile(state, user).await?;
    let mut active: ProfileActive = existing.into();
    active.display_name = Set(payload.display_name);
    let profile = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "profile_update",
        Some("profiles"),
        None,
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Profile updated",
        profile_from_entity(profile),
        Some(Meta::empty()),
    ))
}

pub async fn update_location(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateLocationRequest,
) -> AppResult<ApiResponse<models::Profile>> {
    if !(-90.0..=90.0).contains(&payload.latitude)
        || !(-180.0..=180.0).contains(&payload.longitude)
    {
        return Err(AppError::BadRequest("Invalid coordinates".into()));
    }

    let existing = ensure_profile(state, user).await?;
    let mut active: ProfileActive = existing.into();
    active.latitude = Set(Some(payload.latitude));
    active.longitude = Set(Some(payload.longitude));
    let profile = active.update(&state.orm).await?;

    // Coordinates are deliberately left out of the audit metadata.
    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "profile_location",
        Some("profiles"),
        None,
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Location saved",
        profile_from_entity(profile),
        Some(Meta::empty()),
    ))
}

async fn ensure_profile(state: &AppState, user: &AuthUser) -> AppResult<ProfileModel> {
    if let Some(profile) = Profiles::find_by_id(user.user_id).one(&state.orm).await? {
        return Ok(profile);
    }

    let display_name = user
        .email
        .as_deref()
        .and_then(|e| e.split('@').next())
        .unwrap_or_default()
        .to_string();

    let profile = ProfileActive {
        id: Set(user.user_id),
        display_name: Set(display_name),
        latitude: Set(None),
        longitude: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(profile)
}

fn profile_from_entity(model: ProfileModel) -> models::Profile {
    models::Profile {
        id: model.id,
        display_name: model.display_name,
        latitude: model.latitude,
        longitude: model.longitude,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
