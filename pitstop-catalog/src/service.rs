use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A bookable service offering published by a provider (oil change,
/// detailing, inspection). Offering ids are plain integers from the
/// marketplace catalog. Prices are minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    pub id: i64,
    pub name: String,
    pub price_minor: i64,
    pub currency: String,
    pub active: bool,
}

/// Catalog lookup collaborator. Implementations return only offerings
/// that exist and are active; requested ids with no match are simply
/// absent from the result.
#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    async fn get_active_services(
        &self,
        service_ids: &[i64],
    ) -> Result<Vec<ServiceOffering>, Box<dyn std::error::Error + Send + Sync>>;
}
