use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::gear::{AddImageRequest, CreateGearRequest, GearDetails, GearList, UpdateGearRequest},
    entity::{
        gear::{ActiveModel as GearActive, Column as GearCol, Entity as Gear, Model as GearModel},
        gear_images::{
            ActiveModel as ImageActive, Column as ImageCol, Entity as GearImages,
            Model as ImageModel,
        },
        gear_pricing::{
            ActiveModel as PricingActive, Column as PricingCol, Entity as GearPricing,
            Model as PricingModel,
        },
        profiles::{Column as ProfileCol, Entity as Profiles},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models,
    response::{ApiResponse, Meta},
    routes::params::{GearQuery, Pagination, SortOrder},
    state::AppState,
};

/// Browse listings: available gear only, optionally narrowed by category and
/// a case-insensitive search over name and description.
pub async fn list_available(
    state: &AppState,
    query: GearQuery,
) -> AppResult<ApiResponse<GearList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(GearCol::Available.eq(true));

    // "All" is the browse filter's no-op category.
    if let Some(category) = query
        .category
        .as_ref()
        .filter(|c| !c.is_empty() && c.as_str() != "All")
    {
        condition = condition.add(GearCol::Category.eq(category.clone()));
    }

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(GearCol::Name).ilike(pattern.clone()))
                .add(Expr::col(GearCol::Description).ilike(pattern)),
        );
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let mut finder = Gear::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(GearCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(GearCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let items = attach_details(state, rows).await?;
    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Gear", GearList { items }, Some(meta)))
}

/// The caller's own listings, including unavailable ones.
pub async fn list_my_gear(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<GearList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Gear::find()
        .filter(GearCol::OwnerId.eq(user.user_id))
        .order_by_desc(GearCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let items = attach_details(state, rows).await?;
    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("My gear", GearList { items }, Some(meta)))
}

pub async fn get_gear(state: &AppState, id: Uuid) -> AppResult<ApiResponse<GearDetails>> {
    let details = fetch_details(state, id).await?;
    Ok(ApiResponse::success("Gear", details, None))
}

/// Create a listing together with its rate card and optional primary image.
/// The three inserts share one transaction so a listing can never exist
/// half-created.
pub async fn create_gear(
    state: &AppState,
    user: &AuthUser,
    payload: CreateGearRequest,
) -> AppResult<ApiResponse<GearDetails>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Equipment name is required".into()));
    }
    if payload.hourly_rate < 0 || payload.daily_rate < 0 {
        return Err(AppError::BadRequest("Rates must be non-negative".into()));
    }

    let txn = state.orm.begin().await?;

    let gear_id = Uuid::new_v4();
    let gear = GearActive {
        id: Set(gear_id),
        owner_id: Set(user.user_id),
        name: Set(payload.name),
        description: Set(payload.description),
        category: Set(payload.category.as_str().to_string()),
        condition: Set(payload.condition.as_str().to_string()),
        available: Set(true),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    PricingActive {
        gear_id: Set(gear.id),
        hourly_rate: Set(payload.hourly_rate),
        daily_rate: Set(payload.daily_rate),
    }
    .insert(&txn)
    .await?;

    if let Some(image_url) = payload.image_url.filter(|u| !u.is_empty()) {
        ImageActive {
            id: Set(Uuid::new_v4()),
            gear_id: Set(gear.id),
            image_url: Set(image_url),
            is_primary: Set(true),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "gear_create",
        Some("gear"),
        Some(serde_json::json!({ "gear_id": gear.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let details = fetch_details(state, gear.id).await?;
    Ok(ApiResponse::success(
        "Gear created",
        details,
        Some(Meta::empty()),
    ))
}

/// Partial update of a listing and its rates; owner only. The response body
/// is the authoritative post-update state.
pub async fn update_gear(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateGearRequest,
) -> AppResult<ApiResponse<GearDetails>> {
    let existing = find_owned_gear(state, user, id).await?;

    let txn = state.orm.begin().await?;

    let mut active: GearActive = existing.into();
    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Equipment name is required".into()));
        }
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(category) = payload.category {
        active.category = Set(category.as_str().to_string());
    }
    if let Some(condition) = payload.condition {
        active.condition = Set(condition.as_str().to_string());
    }
    let gear = active.update(&txn).await?;

    if payload.hourly_rate.is_some() || payload.daily_rate.is_some() {
        if payload.hourly_rate.is_some_and(|r| r < 0)
            || payload.daily_rate.is_some_and(|r| r < 0)
        {
            return Err(AppError::BadRequest("Rates must be non-negative".into()));
        }
        let pricing = GearPricing::find_by_id(gear.id).one(&txn).await?;
        match pricing {
            Some(row) => {
                let mut active: PricingActive = row.into();
                if let Some(rate) = payload.hourly_rate {
                    active.hourly_rate = Set(rate);
                }
                if let Some(rate) = payload.daily_rate {
                    active.daily_rate = Set(rate);
                }
                active.update(&txn).await?;
            }
            None => {
                PricingActive {
                    gear_id: Set(gear.id),
                    hourly_rate: Set(payload.hourly_rate.unwrap_or(0)),
                    daily_rate: Set(payload.daily_rate.unwrap_or(0)),
                }
                .insert(&txn)
                .await?;
            }
        }
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "gear_update",
        Some("gear"),
        Some(serde_json::json!({ "gear_id": gear.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let details = fetch_details(state, gear.id).await?;
    Ok(ApiResponse::success("Updated", details, Some(Meta::empty())))
}

/// Flip the listing's availability and nothing else.
pub async fn toggle_availability(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<models::Gear>> {
    let existing = find_owned_gear(state, user, id).await?;

    let next = !existing.available;
    let mut active: GearActive = existing.into();
    active.available = Set(next);
    let gear = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "gear_availability",
        Some("gear"),
        Some(serde_json::json!({ "gear_id": gear.id, "available": gear.available })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        if gear.available {
            "Marked available"
        } else {
            "Marked unavailable"
        },
        gear_from_entity(gear)?,
        Some(Meta::empty()),
    ))
}

/// Delete a listing; pricing and images go with it via cascade.
pub async fn delete_gear(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    find_owned_gear(state, user, id).await?;

    let result = Gear::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "gear_delete",
        Some("gear"),
        Some(serde_json::json!({ "gear_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn add_image(
    state: &AppState,
    user: &AuthUser,
    gear_id: Uuid,
    payload: AddImageRequest,
) -> AppResult<ApiResponse<models::GearImage>> {
    if payload.image_url.trim().is_empty() {
        return Err(AppError::BadRequest("Image URL is required".into()));
    }
    find_owned_gear(state, user, gear_id).await?;

    let image = ImageActive {
        id: Set(Uuid::new_v4()),
        gear_id: Set(gear_id),
        image_url: Set(payload.image_url),
        is_primary: Set(payload.is_primary),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "gear_image_add",
        Some("gear_images"),
        Some(serde_json::json!({ "gear_id": gear_id, "image_id": image.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Image added",
        image_from_entity(image),
        Some(Meta::empty()),
    ))
}

pub async fn remove_image(
    state: &AppState,
    user: &AuthUser,
    gear_id: Uuid,
    image_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    find_owned_gear(state, user, gear_id).await?;

    let result = GearImages::delete_many()
        .filter(
            Condition::all()
                .add(ImageCol::Id.eq(image_id))
                .add(ImageCol::GearId.eq(gear_id)),
        )
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "gear_image_remove",
        Some("gear_images"),
        Some(serde_json::json!({ "gear_id": gear_id, "image_id": image_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Image removed",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Load a gear row and require the caller to be its owner.
async fn find_owned_gear(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<GearModel> {
    let gear = Gear::find_by_id(id).one(&state.orm).await?;
    let gear = match gear {
        Some(g) => g,
        None => return Err(AppError::NotFound),
    };
    if gear.owner_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    Ok(gear)
}

async fn fetch_details(state: &AppState, id: Uuid) -> AppResult<GearDetails> {
    let gear = Gear::find_by_id(id).one(&state.orm).await?;
    let gear = match gear {
        Some(g) => g,
        None => return Err(AppError::NotFound),
    };
    let mut details = attach_details(state, vec![gear]).await?;
    details.pop().ok_or(AppError::NotFound)
}

/// Stitch rate cards, images, and owner display names onto a page of gear
/// rows with one query per related table.
async fn attach_details(
    state: &AppState,
    rows: Vec<GearModel>,
) -> AppResult<Vec<GearDetails>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let gear_ids: Vec<Uuid> = rows.iter().map(|g| g.id).collect();
    let owner_ids: Vec<Uuid> = rows.iter().map(|g| g.owner_id).collect();

    let pricing_by_gear: HashMap<Uuid, PricingModel> = GearPricing::find()
        .filter(PricingCol::GearId.is_in(gear_ids.clone()))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|p| (p.gear_id, p))
        .collect();

    let mut images_by_gear: HashMap<Uuid, Vec<ImageModel>> = HashMap::new();
    let image_rows = GearImages::find()
        .filter(ImageCol::GearId.is_in(gear_ids))
        .order_by_desc(ImageCol::IsPrimary)
        .order_by_asc(ImageCol::CreatedAt)
        .all(&state.orm)
        .await?;
    for image in image_rows {
        images_by_gear.entry(image.gear_id).or_default().push(image);
    }

    let names_by_owner: HashMap<Uuid, String> = Profiles::find()
        .filter(ProfileCol::Id.is_in(owner_ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|p| (p.id, p.display_name))
        .collect();

    rows.into_iter()
        .map(|gear| {
            let pricing = pricing_by_gear.get(&gear.id).map(pricing_from_entity);
            let images = images_by_gear
                .remove(&gear.id)
                .unwrap_or_default()
                .into_iter()
                .map(image_from_entity)
                .collect();
            let owner_display_name = names_by_owner
                .get(&gear.owner_id)
                .filter(|n| !n.is_empty())
                .cloned();
            Ok(GearDetails {
                gear: gear_from_entity(gear)?,
                pricing,
                images,
                owner_display_name,
            })
        })
        .collect()
}

fn gear_from_entity(model: GearModel) -> AppResult<models::Gear> {
    let category = model
        .category
        .parse()
        .map_err(|e: String| AppError::Internal(anyhow::anyhow!(e)))?;
    let condition = model
        .condition
        .parse()
        .map_err(|e: String| AppError::Internal(anyhow::anyhow!(e)))?;
    Ok(models::Gear {
        id: model.id,
        owner_id: model.owner_id,
        name: model.name,
        description: model.description,
        category,
        condition,
        available: model.available,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

fn pricing_from_entity(model: &PricingModel) -> models::GearPricing {
    models::GearPricing {
        gear_id: model.gear_id,
        hourly_rate: model.hourly_rate,
        daily_rate: model.daily_rate,
    }
}

fn image_from_entity(model: ImageModel) -> models::GearImage {
    models::GearImage {
        id: model.id,
        gear_id: model.gear_id,
        image_url: model.image_url,
        is_primary: model.is_primary,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
