use crate::app_config::ReceiptConfig;
use crate::StoreResult;
use busbook_order::{JsonSnapshot, PlainTextReceipt, TicketRenderer};
use busbook_shared::Ticket;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes issued tickets to disk, one file per renderer
pub struct ReceiptStore {
    output_dir: PathBuf,
    file_stem: String,
    renderers: Vec<Box<dyn TicketRenderer>>,
}

impl ReceiptStore {
    pub fn new(output_dir: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_stem: file_stem.into(),
            renderers: Vec::new(),
        }
    }

    /// Printable text receipt first, JSON snapshot alongside
    pub fn from_config(config: &ReceiptConfig) -> Self {
        Self::new(&config.output_dir, &config.file_stem)
            .with_renderer(PlainTextReceipt::new(&config.currency_symbol))
            .with_renderer(JsonSnapshot)
    }

    pub fn with_renderer(mut self, renderer: impl TicketRenderer + 'static) -> Self {
        self.renderers.push(Box::new(renderer));
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render and write the ticket; returns the written paths in renderer order
    pub fn save(&self, ticket: &Ticket) -> StoreResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)?;

        let mut written = Vec::with_capacity(self.renderers.len());
        for renderer in &self.renderers {
            let body = renderer.render(ticket)?;
            let path = self
                .output_dir
                .join(format!("{}.{}", self.file_stem, renderer.extension()));
            fs::write(&path, body)?;
            tracing::info!(reference = %ticket.reference, path = %path.display(), "Receipt written");
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use busbook_shared::{Gender, HeadPassenger, PassengerRecord, Route};
    use chrono::{NaiveDate, Utc};

    fn ticket() -> Ticket {
        Ticket {
            reference: "BUS-1-DEADBEEF".to_string(),
            route: Route::new("Hyderabad to Pune", 1000),
            date: NaiveDate::from_ymd_opt(2026, 10, 30).unwrap(),
            seats: vec!["D3".parse().unwrap()],
            total_price: 1000,
            head_passenger: HeadPassenger::new("Kiran", "9000000000", "kiran@example.com"),
            passengers: vec![PassengerRecord {
                seat: "D3".parse().unwrap(),
                name: "Kiran".to_string(),
                gender: Gender::Other,
                age: 45,
            }],
            issued_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_writes_text_and_json() {
        let dir = std::env::temp_dir().join(format!("busbook-receipts-{}", uuid::Uuid::new_v4().simple()));
        let config = ReceiptConfig {
            output_dir: dir.clone(),
            file_stem: "Bus_Ticket".to_string(),
            currency_symbol: "Rs ".to_string(),
        };
        let store = ReceiptStore::from_config(&config);

        let paths = store.save(&ticket()).unwrap();
        assert_eq!(paths, vec![dir.join("Bus_Ticket.txt"), dir.join("Bus_Ticket.json")]);

        let text = fs::read_to_string(&paths[0]).unwrap();
        assert!(text.contains("Route: Hyderabad to Pune"));
        assert!(text.contains("Total Price: Rs 1000"));
        assert!(text.trim_end().ends_with("Happy Journey!"));

        let json: Ticket = serde_json::from_str(&fs::read_to_string(&paths[1]).unwrap()).unwrap();
        assert_eq!(json, ticket_with_time(json.issued_at));
    }

    fn ticket_with_time(issued_at: chrono::DateTime<Utc>) -> Ticket {
        Ticket { issued_at, ..ticket() }
    }

    #[test]
    fn test_store_without_renderers_writes_nothing() {
        let dir = std::env::temp_dir().join(format!("busbook-empty-{}", uuid::Uuid::new_v4().simple()));
        let store = ReceiptStore::new(&dir, "Bus_Ticket");
        assert!(store.save(&ticket()).unwrap().is_empty());
        assert_eq!(store.output_dir(), dir.as_path());
    }
}
