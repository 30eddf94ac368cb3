use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        bookings::{BookingCheckout, BookingList},
        checkout::{CheckoutErrorResponse, CheckoutSessionRequest, CheckoutSessionResponse},
        gear::{AddImageRequest, CreateGearRequest, GearDetails, GearList, UpdateGearRequest},
        profiles::{UpdateLocationRequest, UpdateProfileRequest},
    },
    models::{Booking, Category, Condition, Gear, GearImage, GearPricing, PaymentStatus, Profile},
    pricing::RentalType,
    response::{ApiResponse, Meta},
    routes::{bookings, checkout, gear, health, params, profiles},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        gear::list_gear,
        gear::list_my_gear,
        gear::get_gear,
        gear::create_gear,
        gear::update_gear,
        gear::toggle_availability,
        gear::delete_gear,
        gear::add_image,
        gear::remove_image,
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        checkout::create_checkout_session,
        profiles::get_profile,
        profiles::update_profile,
        profiles::update_location,
    ),
    components(
        schemas(
            Gear,
            GearPricing,
            GearImage,
            Booking,
            Profile,
            Category,
            Condition,
            RentalType,
            PaymentStatus,
            CreateGearRequest,
            UpdateGearRequest,
            AddImageRequest,
            GearDetails,
            GearList,
            BookingCheckout,
            BookingList,
            CheckoutSessionRequest,
            CheckoutSessionResponse,
            CheckoutErrorResponse,
            UpdateProfileRequest,
            UpdateLocationRequest,
            params::Pagination,
            params::GearQuery,
            Meta,
            ApiResponse<Gear>,
            ApiResponse<GearDetails>,
            ApiResponse<GearList>,
            ApiResponse<BookingCheckout>,
            ApiResponse<BookingList>,
            ApiResponse<Profile>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Gear", description = "Listing endpoints"),
        (name = "Bookings", description = "Booking endpoints"),
        (name = "Checkout", description = "Hosted checkout session proxy"),
        (name = "Profiles", description = "Profile endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
