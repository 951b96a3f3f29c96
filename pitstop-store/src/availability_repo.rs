use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use pitstop_schedule::{Availability, AvailabilitySource, ScheduleError};

/// In-memory availability store. One record per provider, created
/// all-closed on onboarding, overwritten whole on edit, never deleted.
/// The owning provider is the single writer; reads are concurrent.
pub struct InMemoryAvailabilityStore {
    records: RwLock<HashMap<Uuid, Availability>>,
}

impl InMemoryAvailabilityStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Register a provider with an all-closed default week.
    pub async fn onboard(&self, provider_id: Uuid) -> Availability {
        let mut records = self.records.write().await;
        records
            .entry(provider_id)
            .or_insert_with(|| {
                info!(%provider_id, "provider onboarded with all-closed availability");
                Availability::all_closed(provider_id)
            })
            .clone()
    }

    /// Overwrite a provider's weekly schedule. The schedule is validated
    /// before it replaces the stored record.
    pub async fn upsert(&self, availability: Availability) -> Result<(), ScheduleError> {
        availability.validate()?;
        self.records
            .write()
            .await
            .insert(availability.provider_id, availability);
        Ok(())
    }
}

impl Default for InMemoryAvailabilityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AvailabilitySource for InMemoryAvailabilityStore {
    async fn get_availability(
        &self,
        provider_id: Uuid,
    ) -> Result<Option<Availability>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.records.read().await.get(&provider_id).cloned())
    }
}
