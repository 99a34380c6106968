//! Lending-vault interface
//!
//! The vault subsystem is an external collaborator assumed correct:
//! deposits, withdrawals, borrows and repayments against one asset. A
//! pool holds one handle per asset and acts on the owner's behalf once
//! enabled as an operator.
//!
//! Checkpoint/rollback exposes the vault's scoped-transaction
//! capability: intermediate operations inside one swap may leave the
//! account transiently unbalanced, and the scope either settles into a
//! single collateralized position or is unwound in full.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VaultError;

/// Account identity inside the vault subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One asset's lending vault.
pub trait Vault {
    /// Deposits `amount` for `on_behalf_of`. Fails with
    /// [`VaultError::ZeroShares`] when the amount is too small to mint
    /// any share.
    fn deposit(&mut self, amount: u128, on_behalf_of: &AccountId) -> Result<(), VaultError>;

    /// Withdraws from `on_behalf_of`'s deposit, delivering to `to`.
    fn withdraw(
        &mut self,
        amount: u128,
        to: &AccountId,
        on_behalf_of: &AccountId,
    ) -> Result<(), VaultError>;

    /// Borrows against `on_behalf_of`'s position, delivering to `to`.
    fn borrow(
        &mut self,
        amount: u128,
        to: &AccountId,
        on_behalf_of: &AccountId,
    ) -> Result<(), VaultError>;

    /// Repays `on_behalf_of`'s outstanding debt from freshly supplied
    /// funds; any excess over the debt lands in the deposit balance.
    fn repay_with_deposit(&mut self, amount: u128, on_behalf_of: &AccountId)
        -> Result<(), VaultError>;

    /// Deposit balance spendable by `account`.
    fn available_balance(&self, account: &AccountId) -> u128;

    /// Outstanding debt owed by `account`.
    fn available_debt(&self, account: &AccountId) -> u128;

    /// Liquidity ceiling: how much the vault can pay out right now.
    fn max_withdrawable(&self) -> u128;

    /// Borrow ceiling for `account` under the vault's LTV policy.
    fn max_borrowable(&self, account: &AccountId) -> u128;

    /// Enables `operator` to act on `account`'s positions.
    fn enable_operator(&mut self, account: &AccountId, operator: &AccountId)
        -> Result<(), VaultError>;

    /// Opens a transaction scope; returns a token for `rollback`/`release`.
    fn checkpoint(&mut self) -> u64;

    /// Unwinds every operation performed since `checkpoint`.
    fn rollback(&mut self, checkpoint: u64);

    /// Closes the scope opened at `checkpoint`, keeping its effects.
    fn release(&mut self, checkpoint: u64);
}
