use busbook_shared::Ticket;
use uuid::Uuid;

/// Turns an issued ticket into a document body
pub trait TicketRenderer {
    /// File extension of the produced document, without the dot
    fn extension(&self) -> &'static str;

    fn render(&self, ticket: &Ticket) -> Result<String, FulfillmentError>;
}

/// Line-per-item receipt, the printable form of a ticket
#[derive(Debug, Clone)]
pub struct PlainTextReceipt {
    currency_symbol: String,
}

impl PlainTextReceipt {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn lines(&self, ticket: &Ticket) -> Vec<String> {
        let head = &ticket.head_passenger;
        let mut lines = vec![
            format!("Ticket: {}", ticket.reference),
            format!("Route: {}", ticket.route.name),
            format!("Date: {}", ticket.date.format("%Y-%m-%d")),
            format!("Seats: {}", ticket.seat_list()),
            format!("Total Price: {}{}", self.currency_symbol, ticket.total_price),
            String::new(),
            "Passenger Details:".to_string(),
            format!(
                "Head Passenger: {}, Mobile: {}, Email: {}",
                head.name,
                head.mobile.expose(),
                head.email.expose()
            ),
        ];

        for (i, passenger) in ticket.passengers.iter().enumerate() {
            lines.push(format!(
                "Passenger {} (Seat {}): {}, Gender: {}, Age: {}",
                i + 1,
                passenger.seat,
                passenger.name,
                passenger.gender,
                passenger.age
            ));
        }

        lines.push(String::new());
        lines.push("Happy Journey!".to_string());
        lines
    }
}

impl Default for PlainTextReceipt {
    fn default() -> Self {
        Self::new("₹")
    }
}

impl TicketRenderer for PlainTextReceipt {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, ticket: &Ticket) -> Result<String, FulfillmentError> {
        let mut body = self.lines(ticket).join("\n");
        body.push('\n');
        Ok(body)
    }
}

/// Machine-readable copy of the ticket
#[derive(Debug, Clone, Default)]
pub struct JsonSnapshot;

impl TicketRenderer for JsonSnapshot {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, ticket: &Ticket) -> Result<String, FulfillmentError> {
        Ok(serde_json::to_string_pretty(ticket)?)
    }
}

/// Booking reference printed on the ticket
pub fn generate_reference(session_id: &Uuid) -> String {
    // Format: BUS-{timestamp}-{short_uuid}
    let timestamp = chrono::Utc::now().timestamp();
    let short_id = &session_id.simple().to_string()[..8];
    format!("BUS-{}-{}", timestamp, short_id.to_uppercase())
}

#[derive(Debug, thiserror::Error)]
pub enum FulfillmentError {
    #[error("Ticket serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
