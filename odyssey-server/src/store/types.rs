//! Booking value types.

use chrono::{DateTime, Utc};

/// One flown hop of a booked route.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSegment {
    pub from: String,
    pub to: String,
    pub carrier: String,
    pub price: f64,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
}

/// A booking as submitted, before the store assigns identity.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub first_name: String,
    pub last_name: String,
    pub segments: Vec<BookingSegment>,
    pub total_price: f64,
    pub total_hours: i64,
    pub total_distance_km: f64,
}

/// Passenger fields a booking update may change; `None` leaves the field
/// as it is.
#[derive(Debug, Clone, Default)]
pub struct BookingUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A stored booking, pinned to the pricelist it was made against.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    /// The snapshot this booking's prices came from. The booking is
    /// dropped when that snapshot falls out of retention.
    pub pricelist_id: String,
    pub first_name: String,
    pub last_name: String,
    pub segments: Vec<BookingSegment>,
    pub total_price: f64,
    pub total_hours: i64,
    pub total_distance_km: f64,
    pub created_at: DateTime<Utc>,
    /// Set when the booking has been changed since creation.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Store counters for monitoring.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStats {
    pub active_pricelists: usize,
    pub total_bookings: usize,
    pub unique_passengers: usize,
    pub last_updated: DateTime<Utc>,
}
