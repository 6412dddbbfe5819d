use crate::{CoreError, CoreResult};
use busbook_shared::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PAYMENT_SCHEME: &str = "upi";

/// Fixed payee details every payment request is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProfile {
    pub payee: String,
    pub label: String,
    pub currency: String,
}

impl PaymentProfile {
    pub fn new(payee: impl Into<String>, label: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            payee: payee.into(),
            label: label.into(),
            currency: currency.into(),
        }
    }

    /// Build the request for a given amount
    pub fn request(&self, amount: Money) -> PaymentRequest {
        PaymentRequest {
            payee: self.payee.clone(),
            label: self.label.clone(),
            amount,
            currency: self.currency.clone(),
        }
    }
}

impl Default for PaymentProfile {
    fn default() -> Self {
        Self::new("0987654321@axl", "BusBooking", "INR")
    }
}

/// Payment request handed to a scanning client.
///
/// `Display` yields the canonical string
/// `upi://pay?pa=<payee>&pn=<label>&am=<amount>&cu=<currency>`. Fields are
/// written verbatim; scanning apps expect them unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub payee: String,
    pub label: String,
    pub amount: Money,
    pub currency: String,
}

impl PaymentRequest {
    pub fn uri(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://pay?pa={}&pn={}&am={}&cu={}",
            PAYMENT_SCHEME, self.payee, self.label, self.amount, self.currency
        )
    }
}

/// Turns a payment request into something a payer can scan or copy.
///
/// Image generation lives outside this workspace; implementors only need
/// the request itself.
pub trait PaymentCodeRenderer {
    fn render(&self, request: &PaymentRequest) -> CoreResult<String>;
}

/// Renders the request string inside a text frame for terminals
#[derive(Debug, Clone, Default)]
pub struct TextPaymentCode;

impl PaymentCodeRenderer for TextPaymentCode {
    fn render(&self, request: &PaymentRequest) -> CoreResult<String> {
        if request.payee.is_empty() {
            return Err(CoreError::RenderError("payee identifier is empty".to_string()));
        }

        let uri = request.uri();
        let width = uri.chars().count() + 2;
        let border = format!("+{}+", "-".repeat(width));
        tracing::debug!(amount = request.amount, currency = %request.currency, "Rendering payment code");

        Ok(format!(
            "{border}\n| {uri} |\n{border}\nScan or copy to pay {} {}",
            request.currency, request.amount
        ))
    }
}
