use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::pricing::RentalType;

/// Listing categories shown in the browse filter. `All` is a query-side
/// pseudo-category and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Category {
    #[serde(rename = "Camera Bodies")]
    CameraBodies,
    Lenses,
    Lighting,
    Tripods,
    Stabilizers,
    Audio,
    Filters,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CameraBodies => "Camera Bodies",
            Category::Lenses => "Lenses",
            Category::Lighting => "Lighting",
            Category::Tripods => "Tripods",
            Category::Stabilizers => "Stabilizers",
            Category::Audio => "Audio",
            Category::Filters => "Filters",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Camera Bodies" => Ok(Category::CameraBodies),
            "Lenses" => Ok(Category::Lenses),
            "Lighting" => Ok(Category::Lighting),
            "Tripods" => Ok(Category::Tripods),
            "Stabilizers" => Ok(Category::Stabilizers),
            "Audio" => Ok(Category::Audio),
            "Filters" => Ok(Category::Filters),
            "Other" => Ok(Category::Other),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Excellent => "excellent",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
        }
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "excellent" => Ok(Condition::Excellent),
            "good" => Ok(Condition::Good),
            "fair" => Ok(Condition::Fair),
            "poor" => Ok(Condition::Poor),
            other => Err(format!("unknown condition: {other}")),
        }
    }
}

/// Payment lifecycle of a booking. This service only ever writes `pending`;
/// `paid` and `failed` are set by the payment processor's webhook collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Gear {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub condition: Condition,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GearPricing {
    pub gear_id: Uuid,
    pub hourly_rate: i64,
    pub daily_rate: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GearImage {
    pub id: Uuid,
    pub gear_id: Uuid,
    pub image_url: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub gear_id: Uuid,
    pub renter_id: Uuid,
    pub owner_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub rental_type: RentalType,
    pub total_price: i64,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub display_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}
