use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::authz::{Actor, AuthorizationGate};
use crate::error::BookingError;
use crate::lifecycle::{self, LifecycleError};
use crate::models::{Booking, BookingAction};
use crate::notify::{self, Notifier};
use crate::repository::{BookingRepository, RepositoryError};
use pitstop_catalog::{PriceAggregator, PriceError, ServiceCatalog};
use pitstop_schedule::{AvailabilityCalendar, TimeSlot};
use pitstop_shared::{BookingEvent, BookingEventKind};

/// Orchestrates the scheduling core: slot validation, price
/// aggregation, lifecycle transitions behind the authorization gate,
/// and fire-and-forget party notification.
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
    catalog: Arc<dyn ServiceCatalog>,
    calendar: AvailabilityCalendar,
    notifier: Arc<dyn Notifier>,
    /// Active bookings allowed per provider slot. Zero disables the
    /// occupancy check entirely.
    max_per_slot: u32,
}

impl BookingService {
    pub fn new(
        repo: Arc<dyn BookingRepository>,
        catalog: Arc<dyn ServiceCatalog>,
        calendar: AvailabilityCalendar,
        notifier: Arc<dyn Notifier>,
        max_per_slot: u32,
    ) -> Self {
        Self {
            repo,
            catalog,
            calendar,
            notifier,
            max_per_slot,
        }
    }

    /// Customer requests a slot. The booking is created `PENDING`,
    /// priced from the active catalog, and only inside a bookable slot
    /// with free capacity.
    pub async fn request_booking(
        &self,
        customer_id: Uuid,
        provider_id: Uuid,
        service_ids: Vec<i64>,
        scheduled_at: DateTime<Utc>,
        notes: Option<String>,
    ) -> Result<Booking, BookingError> {
        if service_ids.is_empty() {
            return Err(PriceError::EmptySelection.into());
        }
        let mut ids = service_ids;
        ids.sort_unstable();
        ids.dedup();

        self.ensure_slot_free(provider_id, scheduled_at, None).await?;

        let offerings = self
            .catalog
            .get_active_services(&ids)
            .await
            .map_err(|e| BookingError::Infrastructure(e.to_string()))?;
        for id in &ids {
            if !offerings.iter().any(|o| o.id == *id) {
                return Err(BookingError::UnknownService(*id));
            }
        }

        let breakdown = PriceAggregator::aggregate(&offerings)?;
        let booking = Booking::new(customer_id, provider_id, ids, breakdown, scheduled_at, notes);
        let stored = self.repo.insert(booking).await?;

        info!(
            booking_id = %stored.id,
            %provider_id,
            scheduled_at = %stored.scheduled_at,
            "booking requested"
        );
        notify::dispatch(
            self.notifier.clone(),
            event(&stored, BookingEventKind::Requested),
        );
        Ok(stored)
    }

    /// Apply a lifecycle action on behalf of an actor. Authorization is
    /// checked strictly before any mutation; the write is a versioned
    /// compare-and-swap, so a concurrent writer makes this fail with
    /// `ConcurrentModification` instead of silently overwriting.
    pub async fn apply_action(
        &self,
        actor: &Actor,
        booking_id: Uuid,
        action: BookingAction,
        reason: Option<String>,
        new_scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .repo
            .get(booking_id)
            .await?
            .ok_or(BookingError::NotFound(booking_id))?;

        AuthorizationGate::authorize(actor, &booking, action)?;

        if action == BookingAction::Reschedule {
            let at = new_scheduled_at.ok_or(LifecycleError::MissingSchedule)?;
            // An invalid target slot must leave the stored booking,
            // including its original scheduled time, untouched. The
            // booking being moved does not count against the slot.
            self.ensure_slot_free(booking.provider_id, at, Some(booking.id))
                .await?;
        }

        let mut updated = booking.clone();
        let kind = lifecycle::apply(&mut updated, action, reason.as_deref(), new_scheduled_at)?;
        let stored = self.repo.update(updated, booking.version).await?;

        info!(
            %booking_id,
            %action,
            status = %stored.status,
            actor_role = %actor.role,
            "booking transition applied"
        );
        notify::dispatch(self.notifier.clone(), event(&stored, kind));
        Ok(stored)
    }

    /// Bookable slots for a provider on one date.
    pub async fn list_slots(
        &self,
        provider_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, BookingError> {
        Ok(self.calendar.slots_for(provider_id, date).await?)
    }

    /// Fetch a booking, visible only to its parties and admins.
    pub async fn get_booking(
        &self,
        actor: &Actor,
        booking_id: Uuid,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .repo
            .get(booking_id)
            .await?
            .ok_or(BookingError::NotFound(booking_id))?;
        AuthorizationGate::authorize_view(actor, &booking)?;
        Ok(booking)
    }

    /// Administrative hard delete, outside the lifecycle. Audited here
    /// and in the store.
    pub async fn delete_booking(&self, actor: &Actor, booking_id: Uuid) -> Result<(), BookingError> {
        AuthorizationGate::authorize_delete(actor)?;
        warn!(
            %booking_id,
            admin_id = %actor.id,
            "administrative hard delete of booking"
        );
        self.repo.delete(booking_id).await?;
        Ok(())
    }

    /// Time-driven sweep: every pending booking whose scheduled time has
    /// passed moves to `EXPIRED`. Selection only sees pending rows, so
    /// re-running the sweep is a no-op; a booking that loses its version
    /// race was just transitioned by someone else and is skipped.
    pub async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<usize, BookingError> {
        let overdue = self.repo.list_overdue_pending(now).await?;
        let mut expired = 0;

        for booking in overdue {
            let mut updated = booking.clone();
            if lifecycle::apply(&mut updated, BookingAction::Expire, None, None).is_err() {
                continue;
            }
            match self.repo.update(updated, booking.version).await {
                Ok(stored) => {
                    expired += 1;
                    info!(booking_id = %stored.id, "booking expired");
                    notify::dispatch(
                        self.notifier.clone(),
                        event(&stored, BookingEventKind::Expired),
                    );
                }
                Err(RepositoryError::VersionConflict { id, .. }) => {
                    info!(booking_id = %id, "expiry lost a concurrent transition, skipping");
                }
                Err(RepositoryError::NotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(expired)
    }

    async fn ensure_slot_free(
        &self,
        provider_id: Uuid,
        at: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> Result<(), BookingError> {
        if !self.calendar.is_bookable(provider_id, at).await? {
            return Err(BookingError::SlotUnavailable);
        }
        if self.max_per_slot > 0 {
            let active = self.repo.count_active_at(provider_id, at, exclude).await?;
            if active >= self.max_per_slot {
                return Err(BookingError::SlotFull);
            }
        }
        Ok(())
    }
}

fn event(booking: &Booking, kind: BookingEventKind) -> BookingEvent {
    BookingEvent {
        booking_id: booking.id,
        customer_id: booking.customer_id,
        provider_id: booking.provider_id,
        kind,
        scheduled_at: booking.scheduled_at,
        occurred_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::ActorRole;
    use crate::models::BookingStatus;
    use crate::notify::LogNotifier;
    use async_trait::async_trait;
    use chrono::{Days, NaiveTime, TimeZone};
    use pitstop_catalog::ServiceOffering;
    use pitstop_schedule::{
        Availability, AvailabilitySource, DaySchedule, WeeklySchedule, DEFAULT_SLOT_MINUTES,
    };
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MemRepo(Mutex<HashMap<Uuid, Booking>>);

    impl MemRepo {
        fn new() -> Self {
            Self(Mutex::new(HashMap::new()))
        }
    }

    #[async_trait]
    impl BookingRepository for MemRepo {
        async fn insert(&self, booking: Booking) -> Result<Booking, RepositoryError> {
            self.0
                .lock()
                .unwrap()
                .insert(booking.id, booking.clone());
            Ok(booking)
        }

        async fn get(&self, id: Uuid) -> Result<Option<Booking>, RepositoryError> {
            Ok(self.0.lock().unwrap().get(&id).cloned())
        }

        async fn update(
            &self,
            booking: Booking,
            expected_version: u64,
        ) -> Result<Booking, RepositoryError> {
            let mut map = self.0.lock().unwrap();
            let current = map
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
            map.insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn list_overdue_pending(
            &self,
            cutoff: DateTime<Utc>,
        ) -> Result<Vec<Booking>, RepositoryError> {
            Ok(self
                .0
                .lock()
                .unwrap()
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
                .0
                .lock()
                .unwrap()
                .values()
                .filter(|b| {
                    b.provider_id == provider_id
                        && b.scheduled_at == scheduled_at
                        && Some(b.id) != exclude
                        && matches!(
                            b.status,
                            BookingStatus::Pending | BookingStatus::Confirmed
                        )
                })
                .count() as u32)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
            self.0
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(RepositoryError::NotFound(id))
        }
    }

    struct AlwaysOpen(Uuid);

    #[async_trait]
    impl AvailabilitySource for AlwaysOpen {
        async fn get_availability(
            &self,
            provider_id: Uuid,
        ) -> Result<Option<Availability>, Box<dyn std::error::Error + Send + Sync>> {
            if provider_id != self.0 {
                return Ok(None);
            }
            let open = DaySchedule::open(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            );
            Ok(Some(Availability {
                provider_id,
                week: WeeklySchedule {
                    mon: open.clone(),
                    tue: open.clone(),
                    wed: open.clone(),
                    thu: open.clone(),
                    fri: open.clone(),
                    sat: open.clone(),
                    sun: open,
                },
            }))
        }
    }

    struct FixedCatalog(Vec<ServiceOffering>);

    #[async_trait]
    impl ServiceCatalog for FixedCatalog {
        async fn get_active_services(
            &self,
            service_ids: &[i64],
        ) -> Result<Vec<ServiceOffering>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self
                .0
                .iter()
                .filter(|s| s.active && service_ids.contains(&s.id))
                .cloned()
                .collect())
        }
    }

    fn offering(id: i64, price_minor: i64) -> ServiceOffering {
        ServiceOffering {
            id,
            name: format!("service-{}", id),
            price_minor,
            currency: "QAR".to_string(),
            active: true,
        }
    }

    fn service_for(provider_id: Uuid, max_per_slot: u32) -> BookingService {
        let calendar = AvailabilityCalendar::new(
            Arc::new(AlwaysOpen(provider_id)),
            DEFAULT_SLOT_MINUTES,
        );
        BookingService::new(
            Arc::new(MemRepo::new()),
            Arc::new(FixedCatalog(vec![offering(1, 10000), offering(2, 5000)])),
            calendar,
            Arc::new(LogNotifier),
            max_per_slot,
        )
    }

    fn tomorrow_at(h: u32, m: u32) -> DateTime<Utc> {
        let date = Utc::now().date_naive() + Days::new(1);
        Utc.from_utc_datetime(&date.and_hms_opt(h, m, 0).unwrap())
    }

    #[tokio::test]
    async fn request_creates_pending_booking_with_total() {
        let provider_id = Uuid::new_v4();
        let svc = service_for(provider_id, 1);

        let booking = svc
            .request_booking(
                Uuid::new_v4(),
                provider_id,
                vec![1, 2],
                tomorrow_at(10, 0),
                Some("squeaky brakes".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_minor, 15000);
        assert_eq!(booking.currency, "QAR");
        assert_eq!(booking.service_prices.len(), 2);
    }

    #[tokio::test]
    async fn request_off_boundary_is_rejected() {
        let provider_id = Uuid::new_v4();
        let svc = service_for(provider_id, 1);

        let err = svc
            .request_booking(Uuid::new_v4(), provider_id, vec![1], tomorrow_at(10, 15), None)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::SlotUnavailable));
    }

    #[tokio::test]
    async fn request_unknown_service_is_rejected() {
        let provider_id = Uuid::new_v4();
        let svc = service_for(provider_id, 1);

        let err = svc
            .request_booking(Uuid::new_v4(), provider_id, vec![99], tomorrow_at(10, 0), None)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::UnknownService(99)));
    }

    #[tokio::test]
    async fn request_empty_selection_is_rejected() {
        let provider_id = Uuid::new_v4();
        let svc = service_for(provider_id, 1);

        let err = svc
            .request_booking(Uuid::new_v4(), provider_id, vec![], tomorrow_at(10, 0), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::Price(PriceError::EmptySelection)
        ));
    }

    #[tokio::test]
    async fn single_occupancy_slot_fills_up() {
        let provider_id = Uuid::new_v4();
        let svc = service_for(provider_id, 1);
        let at = tomorrow_at(11, 0);

        svc.request_booking(Uuid::new_v4(), provider_id, vec![1], at, None)
            .await
            .unwrap();

        let err = svc
            .request_booking(Uuid::new_v4(), provider_id, vec![1], at, None)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::SlotFull));

        // A different slot is still free.
        svc.request_booking(Uuid::new_v4(), provider_id, vec![1], tomorrow_at(11, 30), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn reschedule_does_not_collide_with_its_own_slot() {
        let provider_id = Uuid::new_v4();
        let svc = service_for(provider_id, 1);
        let customer_id = Uuid::new_v4();
        let at = tomorrow_at(10, 0);

        let booking = svc
            .request_booking(customer_id, provider_id, vec![1], at, None)
            .await
            .unwrap();

        // With single occupancy, moving a booking onto its own time must
        // not count the booking itself as the occupant.
        let customer = Actor {
            role: ActorRole::Customer,
            id: customer_id,
        };
        let moved = svc
            .apply_action(&customer, booking.id, BookingAction::Reschedule, None, Some(at))
            .await
            .unwrap();
        assert_eq!(moved.status, BookingStatus::Pending);
        assert_eq!(moved.scheduled_at, at);

        // A second customer is still kept out of the occupied slot.
        let err = svc
            .request_booking(Uuid::new_v4(), provider_id, vec![1], at, None)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::SlotFull));
    }

    #[tokio::test]
    async fn failed_reschedule_leaves_booking_untouched() {
        let provider_id = Uuid::new_v4();
        let svc = service_for(provider_id, 1);
        let customer_id = Uuid::new_v4();
        let original_at = tomorrow_at(10, 0);

        let booking = svc
            .request_booking(customer_id, provider_id, vec![1], original_at, None)
            .await
            .unwrap();

        let customer = Actor {
            role: ActorRole::Customer,
            id: customer_id,
        };
        let err = svc
            .apply_action(
                &customer,
                booking.id,
                BookingAction::Reschedule,
                None,
                Some(tomorrow_at(10, 45)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::SlotUnavailable));

        let stored = svc.get_booking(&customer, booking.id).await.unwrap();
        assert_eq!(stored.scheduled_at, original_at);
        assert_eq!(stored.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn customer_cannot_confirm() {
        let provider_id = Uuid::new_v4();
        let svc = service_for(provider_id, 1);
        let customer_id = Uuid::new_v4();

        let booking = svc
            .request_booking(customer_id, provider_id, vec![1], tomorrow_at(10, 0), None)
            .await
            .unwrap();

        let customer = Actor {
            role: ActorRole::Customer,
            id: customer_id,
        };
        let err = svc
            .apply_action(&customer, booking.id, BookingAction::Confirm, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Unauthorized(_)));

        // Denied strictly before mutation: still pending.
        let stored = svc.get_booking(&customer, booking.id).await.unwrap();
        assert_eq!(stored.status, BookingStatus::Pending);
    }
}
