pub mod models;
pub mod roster;
pub mod session;
pub mod fulfillment;

pub use models::BookingStage;
pub use roster::{PassengerRoster, RosterError};
pub use session::{BookingError, BookingSession};
pub use fulfillment::{FulfillmentError, JsonSnapshot, PlainTextReceipt, TicketRenderer};
