use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Rate value - uses Decimal for precision
/// Future: could become a newtype with validation (strictly positive)
pub type RateValue = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Client identifier
pub type ClientId = i64;

/// Sentinel client used when a request carries no client identity
pub const ANONYMOUS_CLIENT: ClientId = 0;
