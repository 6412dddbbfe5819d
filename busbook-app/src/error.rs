use busbook_core::CoreError;
use busbook_order::BookingError;
use busbook_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Input closed before the booking was finished")]
    InputClosed,

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    PaymentCode(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type AppResult<T> = Result<T, AppError>;
