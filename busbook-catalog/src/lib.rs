pub mod route;
pub mod pricing;
pub mod seat_map;

pub use route::{CatalogError, RouteCatalog};
pub use pricing::total_price;
pub use seat_map::{SeatLayout, SeatMap, SeatMapError, SeatStatus};
