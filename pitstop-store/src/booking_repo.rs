use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use pitstop_booking::models::{Booking, BookingStatus};
use pitstop_booking::repository::{BookingRepository, RepositoryError};

/// In-memory booking store with optimistic versioning. `update` is a
/// compare-and-swap on the stored version under a single write lock, so
/// two racing writers resolve to exactly one winner.
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<Uuid, Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: Booking) -> Result<Booking, RepositoryError> {
        self.bookings
            .write()
            .await
            .insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, RepositoryError> {
        Ok(self.bookings.read().await.get(&id).cloned())
    }

    async fn update(
        &self,
        booking: Booking,
        expected_version: u64,
    ) -> Result<Booking, RepositoryError> {
        let mut bookings = self.bookings.write().await;
        let current = bookings
            .get(&booking.id)
            .ok_or(RepositoryError::NotFound(booking.id))?;

        if current.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                id: booking.id,
                expected: expected_version,
                actual: current.version,
            });
        }

        let mut stored = booking;
        stored.version = expected_version + 1;
        bookings.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_overdue_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Booking>, RepositoryError> {
        Ok(self
            .bookings
            .read()
            .await
            .values()
            .filter(|b| b.status == BookingStatus::Pending && b.scheduled_at < cutoff)
            .cloned()
            .collect())
    }

    async fn count_active_at(
        &self,
        provider_id: Uuid,
        scheduled_at: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> Result<u32, RepositoryError> {
        Ok(self
            .bookings
            .read()
            .await
            .values()
            .filter(|b| {
                b.provider_id == provider_id
                    && b.scheduled_at == scheduled_at
                    && Some(b.id) != exclude
                    && matches!(b.status, BookingStatus::Pending | BookingStatus::Confirmed)
            })
            .count() as u32)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let removed = self.bookings.write().await.remove(&id);
        match removed {
            Some(booking) => {
                warn!(
                    booking_id = %id,
                    status = %booking.status,
                    "booking hard-deleted from store"
                );
                Ok(())
            }
            None => Err(RepositoryError::NotFound(id)),
        }
    }
}
