use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Category, Condition, Gear, GearImage, GearPricing};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGearRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub condition: Condition,
    pub hourly_rate: i64,
    pub daily_rate: i64,
    /// Optional primary image recorded alongside the listing.
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateGearRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    pub hourly_rate: Option<i64>,
    pub daily_rate: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddImageRequest {
    pub image_url: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// One listing as the browse and detail views need it: the row itself plus
/// its rate card, images, and the owner's display name.
#[derive(Debug, Serialize, ToSchema)]
pub struct GearDetails {
    pub gear: Gear,
    pub pricing: Option<GearPricing>,
    pub images: Vec<GearImage>,
    pub owner_display_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GearList {
    pub items: Vec<GearDetails>,
}
