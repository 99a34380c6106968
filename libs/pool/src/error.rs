//! Error types for the pool engine
//!
//! Every fallible path returns one of these closed enums; the engine
//! never truncates silently or settles for a partial swap.

use jitswap_curve::CurveError;
use thiserror::Error;

/// Failures surfaced by the external lending vaults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// The vault cannot source the requested amount.
    #[error("insufficient vault liquidity")]
    InsufficientLiquidity,

    /// Borrowing would exceed the account's loan-to-value ceiling.
    #[error("borrow limit exceeded")]
    BorrowLimitExceeded,

    /// The deposit is small enough to mint zero vault shares. The swap
    /// engine absorbs this one case and retains the dust.
    #[error("deposit would mint zero shares")]
    ZeroShares,

    /// The acting operator is not enabled for the account.
    #[error("operator not authorized")]
    NotAuthorized,
}

/// Failures of the swap state machine. Any of these aborts the whole
/// swap; vault checkpoints and pool holdings are unwound first.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("amount outside the representable range")]
    Bounds,

    #[error("pool is not activated against its vaults")]
    NotActivated,

    #[error("swap already in progress on this pool")]
    AlreadyInSwap,

    #[error("post-swap reserves violate the curve invariant")]
    InvariantViolation,

    #[error("vault rejected the operation: {0}")]
    Vault(#[from] VaultError),

    #[error("swap callback failed: {message}")]
    Callback { message: String },

    #[error("curve evaluation failed: {0}")]
    Curve(#[from] CurveError),
}

/// Failures of the read-only quoting engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("amount outside the representable range")]
    Bounds,

    #[error("pool is not activated against its vaults")]
    NotActivated,

    /// The bisection never found a feasible point: the requested trade
    /// lies past the curve's reachable region.
    #[error("no feasible quote within the representable domain")]
    Unreachable,

    /// The curve could satisfy the trade but vault liquidity or the
    /// borrow ceiling cannot.
    #[error("vault liquidity cannot satisfy the requested output")]
    VaultRejected,
}

/// Failures of pool creation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid curve parameters: {0}")]
    Curve(#[from] CurveError),

    #[error("fee fraction must be below 1e18")]
    FeeTooHigh,

    #[error("initial reserve exceeds the representable ceiling")]
    ReserveOutOfRange,

    #[error("initial reserves must lie on or above the curve")]
    ReservesBelowCurve,
}
