use crate::StoreResult;
use busbook_catalog::{route::reference_routes, RouteCatalog, SeatLayout, SeatMap, SeatMapError};
use busbook_core::PaymentProfile;
use busbook_order::BookingSession;
use busbook_shared::{Route, SeatId};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub seating: SeatingConfig,
    pub payment: PaymentConfig,
    pub receipt: ReceiptConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "reference_routes")]
    pub routes: Vec<Route>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            routes: reference_routes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SeatingConfig {
    pub rows: u8,
    pub columns: u16,
    /// Seats already sold before this session starts
    pub booked: Vec<String>,
}

impl Default for SeatingConfig {
    fn default() -> Self {
        let layout = SeatLayout::default();
        Self {
            rows: layout.rows,
            columns: layout.columns,
            booked: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PaymentConfig {
    pub payee: String,
    pub label: String,
    pub currency: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        let profile = PaymentProfile::default();
        Self {
            payee: profile.payee,
            label: profile.label,
            currency: profile.currency,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReceiptConfig {
    pub output_dir: PathBuf,
    pub file_stem: String,
    pub currency_symbol: String,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_stem: "Bus_Ticket".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_dir = env::var("BUSBOOK_CONFIG_DIR").unwrap_or_else(|_| "config".into());
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from(&config_dir, &run_mode)
    }

    pub fn load_from(config_dir: &str, run_mode: &str) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            // Every key has a built-in default, so even the base file is optional
            .add_source(config::File::with_name(&format!("{}/default", config_dir)).required(false))
            .add_source(config::File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name(&format!("{}/local", config_dir)).required(false))
            // Eg.. `BUSBOOK_PAYMENT__PAYEE=shop@bank` sets `payment.payee`
            .add_source(
                config::Environment::with_prefix("BUSBOOK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("seating.booked"),
            )
            .build()?;

        s.try_deserialize()
    }

    pub fn route_catalog(&self) -> StoreResult<RouteCatalog> {
        Ok(RouteCatalog::new(self.catalog.routes.clone())?)
    }

    pub fn seat_layout(&self) -> StoreResult<SeatLayout> {
        Ok(SeatLayout::new(self.seating.rows, self.seating.columns)?)
    }

    pub fn seat_map(&self) -> StoreResult<SeatMap> {
        let booked = self
            .seating
            .booked
            .iter()
            .map(|s| s.parse::<SeatId>().map_err(SeatMapError::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SeatMap::new(self.seat_layout()?, booked)?)
    }

    pub fn payment_profile(&self) -> PaymentProfile {
        PaymentProfile::new(&self.payment.payee, &self.payment.label, &self.payment.currency)
    }

    /// Fresh session wired from this configuration
    pub fn open_session(&self) -> StoreResult<BookingSession> {
        let catalog = self.route_catalog()?;
        let seat_map = self.seat_map()?;
        tracing::debug!(
            routes = catalog.len(),
            booked = seat_map.booked_seats().len(),
            payee = %self.payment.payee,
            "Configuration applied"
        );
        Ok(BookingSession::new(catalog, seat_map, self.payment_profile()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("busbook-{}-{}", name, uuid::Uuid::new_v4().simple()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_defaults_without_files() {
        let dir = scratch_dir("empty");
        let config = Config::load_from(dir.to_str().unwrap(), "test").unwrap();

        let catalog = config.route_catalog().unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.price_of("Mumbai to Bangalore").unwrap(), 1800);
        assert_eq!(config.seat_layout().unwrap(), SeatLayout::default());
        assert_eq!(config.payment_profile(), PaymentProfile::default());
        assert_eq!(config.receipt.file_stem, "Bus_Ticket");
    }

    #[test]
    fn test_file_overrides() {
        let dir = scratch_dir("files");
        fs::write(
            dir.join("default.toml"),
            r#"
[[catalog.routes]]
name = "Goa to Pune"
price_per_seat = 900

[seating]
rows = 2
booked = ["A1", "B3"]

[payment]
payee = "merchant@bank"
"#,
        )
        .unwrap();
        fs::write(dir.join("test.toml"), "[receipt]\nfile_stem = \"Trip\"\n").unwrap();

        let config = Config::load_from(dir.to_str().unwrap(), "test").unwrap();
        let catalog = config.route_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.price_of("Goa to Pune").unwrap(), 900);

        let seats = config.seat_map().unwrap();
        assert_eq!(seats.layout(), SeatLayout { rows: 2, columns: 3 });
        assert_eq!(seats.booked_seats().len(), 2);

        let profile = config.payment_profile();
        assert_eq!(profile.payee, "merchant@bank");
        assert_eq!(profile.label, "BusBooking");
        assert_eq!(config.receipt.file_stem, "Trip");
    }

    #[test]
    fn test_invalid_booked_seat() {
        let mut config = Config::default();
        config.seating.booked = vec!["Z1".to_string()];
        assert!(matches!(config.seat_map(), Err(StoreError::Seating(SeatMapError::OutsideLayout(_)))));

        config.seating.booked = vec!["??".to_string()];
        assert!(matches!(config.seat_map(), Err(StoreError::Seating(SeatMapError::InvalidSeatId(_)))));
    }

    #[test]
    fn test_zero_price_rejected() {
        let mut config = Config::default();
        config.catalog.routes = vec![Route::new("Goa to Pune", 0)];
        assert!(matches!(config.route_catalog(), Err(StoreError::Catalog(_))));
    }

    #[test]
    fn test_open_session() {
        let session = Config::default().open_session().unwrap();
        assert_eq!(session.catalog().len(), 5);
        assert_eq!(session.recompute_total(), 0);
        assert_eq!(session.payment_request().uri(), "upi://pay?pa=0987654321@axl&pn=BusBooking&am=0&cu=INR");
    }
}
