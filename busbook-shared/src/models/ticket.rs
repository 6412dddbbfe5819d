use crate::models::{HeadPassenger, Money, PassengerRecord, Route, SeatId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Read-only snapshot of a paid booking, handed to receipt renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub reference: String,
    pub route: Route,
    pub date: NaiveDate,
    pub seats: Vec<SeatId>,
    pub total_price: Money,
    pub head_passenger: HeadPassenger,
    pub passengers: Vec<PassengerRecord>,
    pub issued_at: DateTime<Utc>,
}

impl Ticket {
    /// Seats joined the way receipts print them (`A1, B2`)
    pub fn seat_list(&self) -> String {
        self.seats
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
