//! Domain error model.

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, ErrorReason>;

/// Why an inventory operation was rejected.
///
/// This is a closed set: every failed operation reports exactly one reason,
/// even when several conditions hold at once. Infrastructure failures (store
/// I/O and the like) are not represented here.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorReason {
    /// The referenced product does not exist (or the id was malformed), or a
    /// product name was blank.
    #[error("invalid request")]
    InvalidRequest,

    /// The requested quantity is negative or not representable.
    #[error("quantity invalid")]
    QuantityInvalid,

    /// The change would break the stock/reserved relationship.
    #[error("not enough quantity")]
    NotEnoughQuantity,
}

impl ErrorReason {
    /// Stable machine-readable code (matches the serialized form).
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorReason::InvalidRequest => "InvalidRequest",
            ErrorReason::QuantityInvalid => "QuantityInvalid",
            ErrorReason::NotEnoughQuantity => "NotEnoughQuantity",
        }
    }
}
