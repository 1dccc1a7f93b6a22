use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Remote operation failure, carrying the message surfaced on the ledger
    /// state (server-supplied when present, generic fallback otherwise).
    #[error("{0}")]
    Remote(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    #[error("Unknown status: {0}")]
    UnknownStatus(String),
}
