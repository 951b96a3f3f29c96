use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use pitstop_catalog::{ServiceCatalog, ServiceOffering};

/// In-memory service offering catalog. Lookups only ever return active
/// offerings; inactive or unknown ids are silently absent and the
/// booking layer decides what that means.
pub struct InMemoryServiceCatalog {
    services: RwLock<HashMap<i64, ServiceOffering>>,
}

impl InMemoryServiceCatalog {
    pub fn new() -> Self {
        Self {
            services: RwLock::new(HashMap::new()),
        }
    }

    pub async fn seed(&self, offerings: Vec<ServiceOffering>) {
        let mut services = self.services.write().await;
        for offering in offerings {
            services.insert(offering.id, offering);
        }
    }

    pub async fn deactivate(&self, service_id: i64) {
        if let Some(offering) = self.services.write().await.get_mut(&service_id) {
            offering.active = false;
        }
    }
}

impl Default for InMemoryServiceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceCatalog for InMemoryServiceCatalog {
    async fn get_active_services(
        &self,
        service_ids: &[i64],
    ) -> Result<Vec<ServiceOffering>, Box<dyn std::error::Error + Send + Sync>> {
        let services = self.services.read().await;
        let mut found: Vec<ServiceOffering> = service_ids
            .iter()
            .filter_map(|id| services.get(id))
            .filter(|s| s.active)
            .cloned()
            .collect();
        found.sort_by_key(|s| s.id);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offering(id: i64) -> ServiceOffering {
        ServiceOffering {
            id,
            name: format!("service-{}", id),
            price_minor: 2500,
            currency: "QAR".to_string(),
            active: true,
        }
    }

    #[tokio::test]
    async fn inactive_offerings_are_invisible() {
        let catalog = InMemoryServiceCatalog::new();
        catalog.seed(vec![offering(1), offering(2)]).await;
        catalog.deactivate(2).await;

        let found = catalog.get_active_services(&[1, 2, 3]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }
}
