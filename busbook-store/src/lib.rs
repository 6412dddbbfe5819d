pub mod app_config;
pub mod receipt_store;

pub use app_config::Config;
pub use receipt_store::ReceiptStore;

use busbook_catalog::{CatalogError, SeatMapError};
use busbook_order::FulfillmentError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid route catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid seating: {0}")]
    Seating(#[from] SeatMapError),

    #[error("Receipt rendering failed: {0}")]
    Render(#[from] FulfillmentError),

    #[error("Receipt could not be written: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
