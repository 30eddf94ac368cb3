use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::bookings::{BookingCheckout, BookingList, CreateBookingRequest},
    entity::{
        bookings::{
            ActiveModel as BookingActive, Column as BookingCol, Entity as Bookings,
            Model as BookingModel,
        },
        gear::Entity as Gear,
        gear_pricing::Entity as GearPricing,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{self, PaymentStatus},
    payments::CheckoutSessionParams,
    pricing::{self, RateCard},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// Create a booking and open a checkout session for it.
///
/// The booking insert is the only write; the checkout-session call happens
/// after it and is allowed to fail on its own. A failed session leaves the
/// booking persisted in `pending` with no redirect URL in the response; the
/// renter is told payment is unavailable rather than losing the booking.
pub async fn create_booking(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBookingRequest,
) -> AppResult<ApiResponse<BookingCheckout>> {
    let gear = Gear::find_by_id(payload.gear_id).one(&state.orm).await?;
    let gear = match gear {
        Some(g) => g,
        None => return Err(AppError::NotFound),
    };

    if gear.owner_id == user.user_id {
        return Err(AppError::BadRequest(
            "You cannot book your own equipment".into(),
        ));
    }
    if !gear.available {
        return Err(AppError::BadRequest(
            "Equipment is not available for booking".into(),
        ));
    }

    // A listing with no rate card is not bookable.
    let rates = match GearPricing::find_by_id(gear.id).one(&state.orm).await? {
        Some(p) => RateCard {
            hourly_rate: p.hourly_rate,
            daily_rate: p.daily_rate,
        },
        None => {
            return Err(AppError::BadRequest(
                "Equipment has no pricing and cannot be booked".into(),
            ));
        }
    };

    let quote = pricing::quote(
        payload.rental_type,
        payload.quantity,
        &rates,
        payload.start_date,
    );

    let booking = BookingActive {
        id: Set(Uuid::new_v4()),
        gear_id: Set(gear.id),
        renter_id: Set(user.user_id),
        owner_id: Set(gear.owner_id),
        start_date: Set(quote.start.into()),
        end_date: Set(quote.end.into()),
        rental_type: Set(quote.rental_type.as_str().to_string()),
        total_price: Set(quote.total),
        payment_status: Set(PaymentStatus::Pending.as_str().to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "booking_create",
        Some("bookings"),
        Some(serde_json::json!({
            "booking_id": booking.id,
            "gear_id": gear.id,
            "total_price": booking.total_price,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let checkout_url = request_checkout_session(state, &booking, &gear.name, payload.frontend_origin).await;

    let message = if checkout_url.is_some() {
        "Booking created"
    } else {
        "Booking created but payment is unavailable"
    };

    Ok(ApiResponse::success(
        message,
        BookingCheckout {
            booking: booking_from_entity(booking)?,
            checkout_url,
        },
        Some(Meta::empty()),
    ))
}

/// Bookings where the caller is the renter or the owner, newest first.
pub async fn list_bookings(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<BookingList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Bookings::find()
        .filter(
            Condition::any()
                .add(BookingCol::RenterId.eq(user.user_id))
                .add(BookingCol::OwnerId.eq(user.user_id)),
        )
        .order_by_desc(BookingCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(booking_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Bookings",
        BookingList { items },
        Some(meta),
    ))
}

/// Row-level visibility: only the renter or the owner can read a booking;
/// everyone else sees not-found.
pub async fn get_booking(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<models::Booking>> {
    let booking = Bookings::find()
        .filter(
            Condition::all().add(BookingCol::Id.eq(id)).add(
                Condition::any()
                    .add(BookingCol::RenterId.eq(user.user_id))
                    .add(BookingCol::OwnerId.eq(user.user_id)),
            ),
        )
        .one(&state.orm)
        .await?;
    let booking = match booking {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success(
        "Booking",
        booking_from_entity(booking)?,
        Some(Meta::empty()),
    ))
}

/// Ask Stripe for a hosted session keyed by the new booking. Returns None on
/// any failure; the booking itself has already committed.
async fn request_checkout_session(
    state: &AppState,
    booking: &BookingModel,
    gear_name: &str,
    frontend_origin: Option<String>,
) -> Option<String> {
    let stripe = match &state.stripe {
        Some(client) => client,
        None => {
            tracing::warn!(
                booking_id = %booking.id,
                "checkout skipped: Stripe is not configured"
            );
            return None;
        }
    };

    let origin = frontend_origin
        .filter(|o| !o.is_empty())
        .or_else(|| state.frontend_origin.clone());
    let origin = match origin {
        Some(o) => o,
        None => {
            tracing::warn!(
                booking_id = %booking.id,
                "checkout skipped: no frontend origin supplied or configured"
            );
            return None;
        }
    };

    let params = CheckoutSessionParams {
        booking_id: booking.id.to_string(),
        gear_name: Some(gear_name.to_string()),
        total_price: booking.total_price as f64,
        frontend_origin: origin,
    };

    match stripe.create_checkout_session(&params).await {
        Ok(url) => Some(url),
        Err(err) => {
            tracing::error!(
                booking_id = %booking.id,
                error = %err,
                "checkout session failed; booking stays pending"
            );
            None
        }
    }
}

fn booking_from_entity(model: BookingModel) -> AppResult<models::Booking> {
    let rental_type = model
        .rental_type
        .parse()
        .map_err(|e: String| AppError::Internal(anyhow::anyhow!(e)))?;
    let payment_status = model
        .payment_status
        .parse()
        .map_err(|e: String| AppError::Internal(anyhow::anyhow!(e)))?;
    Ok(models::Booking {
        id: model.id,
        gear_id: model.gear_id,
        renter_id: model.renter_id,
        owner_id: model.owner_id,
        start_date: model.start_date.with_timezone(&Utc),
        end_date: model.end_date.with_timezone(&Utc),
        rental_type,
        payment_status,
        total_price: model.total_price,
        created_at: model.created_at.with_timezone(&Utc),
    })
}
