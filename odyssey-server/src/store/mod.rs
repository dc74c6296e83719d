//! In-memory store for pricelist snapshots and bookings.
//!
//! Keeps the newest catalogue snapshots in retention and the bookings made
//! against them. When a snapshot falls out of retention its bookings go
//! with it: their prices are no longer honoured, so keeping them around
//! would only mislead.

mod types;

pub use types::{Booking, BookingSegment, BookingUpdate, NewBooking, StoreStats};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::Pricelist;

/// How many pricelist snapshots stay in retention.
pub const MAX_PRICELISTS: usize = 15;

/// Errors from store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A booking was attempted with no pricelist in retention.
    #[error("no active pricelist found")]
    NoActivePricelist,
}

#[derive(Debug)]
struct Inner {
    /// Newest first.
    pricelists: Vec<Arc<Pricelist>>,
    /// Newest first.
    bookings: Vec<Booking>,
    next_booking_id: u64,
    last_updated: DateTime<Utc>,
}

/// Shared in-memory store. Cloning is cheap and all clones see the same
/// data.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<RwLock<Inner>>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                pricelists: Vec::new(),
                bookings: Vec::new(),
                next_booking_id: 1,
                last_updated: Utc::now(),
            })),
        }
    }

    /// Insert a snapshot as the newest pricelist.
    ///
    /// Snapshots beyond the retention limit are evicted oldest-first, and
    /// bookings pinned to an evicted snapshot are deleted with it.
    /// Re-inserting the currently newest snapshot (same id) is a no-op so
    /// periodic refreshes do not churn retention.
    pub async fn insert_pricelist(&self, pricelist: Pricelist) {
        let mut inner = self.inner.write().await;

        if inner
            .pricelists
            .first()
            .is_some_and(|current| current.id() == pricelist.id())
        {
            return;
        }

        inner.pricelists.insert(0, Arc::new(pricelist));

        if inner.pricelists.len() > MAX_PRICELISTS {
            let evicted: Vec<Arc<Pricelist>> = inner.pricelists.split_off(MAX_PRICELISTS);
            let before = inner.bookings.len();
            inner
                .bookings
                .retain(|b| !evicted.iter().any(|pl| pl.id() == b.pricelist_id));
            let removed = before - inner.bookings.len();

            info!(
                evicted_pricelists = evicted.len(),
                removed_bookings = removed,
                "pricelist retention limit reached"
            );
        }

        inner.last_updated = Utc::now();
    }

    /// The newest pricelist in retention.
    pub async fn current_pricelist(&self) -> Option<Arc<Pricelist>> {
        self.inner.read().await.pricelists.first().cloned()
    }

    /// Number of pricelists in retention.
    pub async fn pricelist_count(&self) -> usize {
        self.inner.read().await.pricelists.len()
    }

    /// Create a booking against the current pricelist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoActivePricelist` when retention is empty.
    pub async fn create_booking(&self, new: NewBooking) -> Result<Booking, StoreError> {
        let mut inner = self.inner.write().await;

        let pricelist_id = inner
            .pricelists
            .first()
            .ok_or(StoreError::NoActivePricelist)?
            .id()
            .to_string();

        let id = format!("bk-{}", inner.next_booking_id);
        inner.next_booking_id += 1;

        let booking = Booking {
            id,
            pricelist_id,
            first_name: new.first_name,
            last_name: new.last_name,
            segments: new.segments,
            total_price: new.total_price,
            total_hours: new.total_hours,
            total_distance_km: new.total_distance_km,
            created_at: Utc::now(),
            updated_at: None,
        };

        inner.bookings.insert(0, booking.clone());
        inner.last_updated = Utc::now();

        Ok(booking)
    }

    /// All bookings, newest first.
    pub async fn bookings(&self) -> Vec<Booking> {
        self.inner.read().await.bookings.clone()
    }

    /// Bookings for one passenger, matched case-insensitively on trimmed
    /// first and last name.
    pub async fn bookings_by_passenger(&self, first_name: &str, last_name: &str) -> Vec<Booking> {
        let first = first_name.trim().to_lowercase();
        let last = last_name.trim().to_lowercase();

        self.inner
            .read()
            .await
            .bookings
            .iter()
            .filter(|b| {
                b.first_name.trim().to_lowercase() == first
                    && b.last_name.trim().to_lowercase() == last
            })
            .cloned()
            .collect()
    }

    /// Look up one booking by id.
    pub async fn booking(&self, id: &str) -> Option<Booking> {
        self.inner
            .read()
            .await
            .bookings
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    /// Update a booking's passenger details. Returns the updated booking,
    /// or `None` when no booking has that id.
    pub async fn update_booking(&self, id: &str, update: BookingUpdate) -> Option<Booking> {
        let mut inner = self.inner.write().await;
        let booking = inner.bookings.iter_mut().find(|b| b.id == id)?;

        if let Some(first) = update.first_name {
            booking.first_name = first;
        }
        if let Some(last) = update.last_name {
            booking.last_name = last;
        }
        booking.updated_at = Some(Utc::now());
        let updated = booking.clone();

        inner.last_updated = Utc::now();
        Some(updated)
    }

    /// Delete a booking. Returns whether it existed.
    pub async fn delete_booking(&self, id: &str) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.bookings.len();
        inner.bookings.retain(|b| b.id != id);
        let deleted = inner.bookings.len() < before;
        if deleted {
            inner.last_updated = Utc::now();
        }
        deleted
    }

    /// Store counters for monitoring.
    pub async fn stats(&self) -> StoreStats {
        let inner = self.inner.read().await;

        let unique_passengers = inner
            .bookings
            .iter()
            .map(|b| {
                format!(
                    "{} {}",
                    b.first_name.trim().to_lowercase(),
                    b.last_name.trim().to_lowercase()
                )
            })
            .collect::<std::collections::HashSet<_>>()
            .len();

        StoreStats {
            active_pricelists: inner.pricelists.len(),
            total_bookings: inner.bookings.len(),
            unique_passengers,
            last_updated: inner.last_updated,
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
