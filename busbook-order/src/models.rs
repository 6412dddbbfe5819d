use serde::{Deserialize, Serialize};
use std::fmt;

/// Steps of one booking, in the order a customer walks through them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStage {
    #[default]
    RouteSelection,
    SeatSelection,
    PassengerDetails,
    Payment,
    TicketIssued,
}

impl BookingStage {
    /// Stages in which the seat selection may still change
    pub fn accepts_seat_changes(&self) -> bool {
        matches!(self, BookingStage::RouteSelection | BookingStage::SeatSelection)
    }

    /// Stages in which passenger details may be entered or corrected
    pub fn accepts_passenger_details(&self) -> bool {
        matches!(self, BookingStage::PassengerDetails | BookingStage::Payment)
    }
}

impl fmt::Display for BookingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookingStage::RouteSelection => "ROUTE_SELECTION",
            BookingStage::SeatSelection => "SEAT_SELECTION",
            BookingStage::PassengerDetails => "PASSENGER_DETAILS",
            BookingStage::Payment => "PAYMENT",
            BookingStage::TicketIssued => "TICKET_ISSUED",
        };
        f.write_str(label)
    }
}
