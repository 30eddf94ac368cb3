use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Hard bound on a single rental window, matching the booking form's
/// quantity input range.
pub const MAX_QUANTITY: i64 = 365;

/// Billing granularity of a booking. Each variant carries its own duration
/// unit so call sites never branch on strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RentalType {
    Hourly,
    Daily,
}

impl RentalType {
    /// The duration billed per unit of quantity.
    pub fn unit(&self) -> Duration {
        match self {
            RentalType::Hourly => Duration::hours(1),
            RentalType::Daily => Duration::days(1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RentalType::Hourly => "hourly",
            RentalType::Daily => "daily",
        }
    }
}

impl FromStr for RentalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(RentalType::Hourly),
            "daily" => Ok(RentalType::Daily),
            other => Err(format!("unknown rental type: {other}")),
        }
    }
}

impl fmt::Display for RentalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rate table for one gear listing, in whole currency units.
#[derive(Debug, Clone, Copy)]
pub struct RateCard {
    pub hourly_rate: i64,
    pub daily_rate: i64,
}

impl RateCard {
    pub fn rate_for(&self, rental_type: RentalType) -> i64 {
        match rental_type {
            RentalType::Hourly => self.hourly_rate,
            RentalType::Daily => self.daily_rate,
        }
    }
}

/// A fully resolved rental window and price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub rental_type: RentalType,
    pub quantity: i64,
    pub rate: i64,
    pub total: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Clamp a requested quantity into the bookable range. Zero and negative
/// inputs normalize to 1, matching the booking form.
pub fn normalize_quantity(quantity: i64) -> i64 {
    quantity.clamp(1, MAX_QUANTITY)
}

/// Compute the rental window and total price for a booking request.
///
/// `total = rate × quantity` and `end = start + quantity × unit`, where the
/// unit is one hour or one day depending on the rental type.
pub fn quote(
    rental_type: RentalType,
    quantity: i64,
    rates: &RateCard,
    start: DateTime<Utc>,
) -> Quote {
    let quantity = normalize_quantity(quantity);
    let rate = rates.rate_for(rental_type);
    Quote {
        rental_type,
        quantity,
        rate,
        total: rate * quantity,
        start,
        end: start + rental_type.unit() * quantity as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rates() -> RateCard {
        RateCard {
            hourly_rate: 15,
            daily_rate: 80,
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn total_is_rate_times_quantity() {
        for q in [1, 2, 7, 30, 365] {
            let hourly = quote(RentalType::Hourly, q, &rates(), start());
            assert_eq!(hourly.rate, 15);
            assert_eq!(hourly.total, 15 * q);

            let daily = quote(RentalType::Daily, q, &rates(), start());
            assert_eq!(daily.rate, 80);
            assert_eq!(daily.total, 80 * q);
        }
    }

    #[test]
    fn hourly_window_spans_quantity_hours() {
        for q in [1, 3, 48] {
            let q_quote = quote(RentalType::Hourly, q, &rates(), start());
            assert_eq!(q_quote.end - q_quote.start, Duration::hours(q));
        }
    }

    #[test]
    fn daily_window_spans_quantity_days() {
        for q in [1, 5, 14] {
            let q_quote = quote(RentalType::Daily, q, &rates(), start());
            assert_eq!(q_quote.end - q_quote.start, Duration::days(q));
        }
    }

    #[test]
    fn end_is_strictly_after_start() {
        let q_quote = quote(RentalType::Hourly, 0, &rates(), start());
        assert!(q_quote.end > q_quote.start);
    }

    #[test]
    fn quantity_below_one_normalizes_to_one() {
        for q in [0, -1, -100] {
            let q_quote = quote(RentalType::Daily, q, &rates(), start());
            assert_eq!(q_quote.quantity, 1);
            assert_eq!(q_quote.total, 80);
            assert_eq!(q_quote.end - q_quote.start, Duration::days(1));
        }
    }

    #[test]
    fn quantity_above_max_clamps() {
        let q_quote = quote(RentalType::Daily, 1000, &rates(), start());
        assert_eq!(q_quote.quantity, MAX_QUANTITY);
        assert_eq!(q_quote.total, 80 * MAX_QUANTITY);
    }

    #[test]
    fn zero_rates_quote_to_zero_total() {
        let free = RateCard {
            hourly_rate: 0,
            daily_rate: 0,
        };
        let q_quote = quote(RentalType::Hourly, 10, &free, start());
        assert_eq!(q_quote.total, 0);
    }

    #[test]
    fn rental_type_round_trips_through_str() {
        assert_eq!("hourly".parse::<RentalType>().unwrap(), RentalType::Hourly);
        assert_eq!("daily".parse::<RentalType>().unwrap(), RentalType::Daily);
        assert!("weekly".parse::<RentalType>().is_err());
    }
}
