//! Error types for curve evaluation

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// The curve has asymptotes at zero; it is undefined there and
    /// outside the branch the known reserve was claimed to be on.
    #[error("curve evaluated outside its domain")]
    Domain,

    /// The required counter-reserve exceeds the representable ceiling.
    /// Callers treat the point as unreachable rather than propagating.
    #[error("required reserve exceeds the representable ceiling")]
    AmountOutOfRange,

    #[error("overflow in fixed-point math")]
    Overflow,

    #[error("division by zero in fixed-point math")]
    DivisionByZero,

    #[error("invalid curve parameters: {message}")]
    InvalidParams { message: String },
}

pub type Result<T> = std::result::Result<T, CurveError>;
