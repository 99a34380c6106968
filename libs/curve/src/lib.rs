//! # Jitswap Curve - Bonding Curve Evaluator
//!
//! ## Purpose
//!
//! Pure mathematical core for jitswap pools: evaluates the piecewise
//! blended bonding curve that relates the minimum acceptable reserve of
//! one asset to the other. The evaluator has no knowledge of vault
//! balances or debt; swap execution and quoting live in `jitswap-pool`
//! and consume this crate through the [`BondingCurve`] trait.
//!
//! ## Integration Points
//!
//! - **Input Sources**: curve parameters fixed at pool creation,
//!   hypothetical or committed reserve pairs
//! - **Output Destinations**: reserve-commit invariant checks and the
//!   bisection quoter in `jitswap-pool`
//! - **Precision**: integer fixed point; amounts capped at `2^112 - 1`,
//!   concentrations at 1e18 scale, 512-bit fused multiply-divide
//!   internally (no floating point anywhere)

pub mod curve;
pub mod error;
pub mod math;

pub use curve::{BondingCurve, CurveParams};
pub use error::CurveError;
pub use math::{MAX_AMOUNT, MAX_PRICE, ONE_E18};
