pub mod passenger;
pub mod seat;
pub mod ticket;

use serde::{Deserialize, Serialize};

pub use passenger::{Gender, HeadPassenger, PassengerRecord};
pub use seat::SeatId;
pub use ticket::Ticket;

/// Whole currency units (rupees for the reference catalog).
pub type Money = u64;

/// An origin-destination pair sold at a flat per-seat price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    pub price_per_seat: Money,
}

impl Route {
    pub fn new(name: impl Into<String>, price_per_seat: Money) -> Self {
        Self {
            name: name.into(),
            price_per_seat,
        }
    }
}
