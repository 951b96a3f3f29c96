use serde::{Deserialize, Serialize};

use crate::service::ServiceOffering;
use pitstop_shared::ServicePrice;

/// Line items plus total for a set of selected offerings. Total is the
/// exact minor-unit sum; no rounding happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub service_prices: Vec<ServicePrice>,
    pub total_minor: i64,
    pub currency: String,
}

/// Stateless price aggregation over selected service offerings.
pub struct PriceAggregator;

impl PriceAggregator {
    /// All offerings must share one currency. A mixed selection is
    /// rejected outright rather than defaulting to the first currency
    /// seen.
    pub fn aggregate(services: &[ServiceOffering]) -> Result<PriceBreakdown, PriceError> {
        let first = services.first().ok_or(PriceError::EmptySelection)?;
        let currency = first.currency.clone();

        let mut service_prices = Vec::with_capacity(services.len());
        let mut total_minor: i64 = 0;

        for service in services {
            if service.currency != currency {
                return Err(PriceError::CurrencyMismatch {
                    expected: currency,
                    found: service.currency.clone(),
                });
            }
            total_minor = total_minor.saturating_add(service.price_minor);
            service_prices.push(ServicePrice::new(
                service.id,
                service.price_minor,
                service.currency.clone(),
            ));
        }

        Ok(PriceBreakdown {
            service_prices,
            total_minor,
            currency,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    #[error("No services selected")]
    EmptySelection,

    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: String, found: String },
}
