pub mod models;
pub mod pii;

pub use models::{
    Gender, HeadPassenger, Money, PassengerRecord, Route, SeatId, Ticket,
};
pub use models::seat::SeatIdError;
pub use models::passenger::GenderError;
pub use pii::Masked;
