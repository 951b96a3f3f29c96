use serde::{Deserialize, Serialize};

/// A priced line item on a booking, in the currency's minor units
/// (fils, cents). One entry per selected service offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePrice {
    pub service_id: i64,
    pub amount_minor: i64,
    pub currency: String,
}

impl ServicePrice {
    pub fn new(service_id: i64, amount_minor: i64, currency: impl Into<String>) -> Self {
        Self {
            service_id,
            amount_minor,
            currency: currency.into(),
        }
    }
}
