pub mod aggregate;
pub mod service;

pub use aggregate::{PriceAggregator, PriceBreakdown, PriceError};
pub use service::{ServiceCatalog, ServiceOffering};
