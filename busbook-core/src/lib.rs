pub mod payment;

pub use payment::{PaymentCodeRenderer, PaymentProfile, PaymentRequest, TextPaymentCode};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Payment code rendering failed: {0}")]
    RenderError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
