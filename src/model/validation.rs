use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Validation errors for a submitted ticket.
///
/// Each message names the offending field; the order the checks run in is
/// fixed by [`TicketInput::validate`](crate::model::TicketInput::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("customer name is required")]
    MissingCustomerName,
    #[error("call status is required")]
    MissingCallStatus,
    #[error("phone must contain digits only: {0}")]
    InvalidPhone(String),
    #[error("shipping SLA is required when shipping is \"Not yet delivered\"")]
    MissingShippingSla,
}

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid hardcoded regex"));

/// Validates a customer name: must be non-empty after trimming.
pub fn validate_customer_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::MissingCustomerName)
    } else {
        Ok(())
    }
}

/// Validates a phone number: digits only, no spaces, symbols, or letters.
///
/// An empty phone is valid — the field is optional.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() || PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone(phone.to_string()))
    }
}
