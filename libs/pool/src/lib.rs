//! # Jitswap Pool - Vault-Backed Swap Engine
//!
//! ## Purpose
//!
//! Swap execution and quoting over virtual reserves that are only
//! partially backed by real deposits. Outputs are sourced from the
//! owner's lending-vault position, borrowing on demand when the deposit
//! runs short; inputs settle back into the vault, repaying debt first.
//! Every swap is atomic against the curve invariant in
//! `jitswap-curve`.
//!
//! ## Integration Points
//!
//! - **Input Sources**: [`SwapRequest`]s and quote queries from
//!   callers, input payments via [`Pool::receive`] or the
//!   [`SwapCallback`] hook
//! - **Output Destinations**: the two per-asset [`Vault`]s, committed
//!   [`SwapEvent`]s, structured `tracing` events per swap
//! - **Atomicity**: vault checkpoint/rollback scopes; a failed swap
//!   leaves no observable state change

pub mod error;
pub mod pool;
pub mod quote;
pub mod reserves;
pub mod swap;
pub mod testing;
pub mod vault;

pub use error::{ConfigError, QuoteError, SwapError, VaultError};
pub use pool::{Pool, PoolConfig, TokenSide};
pub use reserves::VirtualReserves;
pub use swap::{SwapCallback, SwapEvent, SwapPayment, SwapRequest};
pub use vault::{AccountId, Vault};
