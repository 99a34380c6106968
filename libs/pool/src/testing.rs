//! Test fixtures
//!
//! In-memory vault with snapshot-based transaction scopes, plus the
//! pegged-pair pool configuration most tests start from. Compiled into
//! the crate so integration tests and downstream consumers can reuse
//! the same mocks.

use std::collections::{HashMap, HashSet};

use jitswap_curve::{CurveParams, ONE_E18};

use crate::error::VaultError;
use crate::pool::PoolConfig;
use crate::vault::{AccountId, Vault};

#[derive(Debug, Clone, Default)]
struct MockVaultState {
    /// Liquid asset held by the vault, spendable for withdrawals and
    /// borrows.
    cash: u128,
    deposits: HashMap<AccountId, u128>,
    debts: HashMap<AccountId, u128>,
    /// Tokens the vault has paid out, per recipient.
    wallets: HashMap<AccountId, u128>,
    operators: HashSet<(AccountId, AccountId)>,
}

/// Deterministic single-asset vault for tests.
#[derive(Debug, Clone)]
pub struct MockVault {
    state: MockVaultState,
    borrow_cap: u128,
    /// Deposits below this mint zero shares and are rejected.
    min_deposit: u128,
    snapshots: Vec<MockVaultState>,
}

impl MockVault {
    pub fn new(cash: u128, borrow_cap: u128) -> Self {
        Self {
            state: MockVaultState {
                cash,
                ..Default::default()
            },
            borrow_cap,
            min_deposit: 0,
            snapshots: Vec::new(),
        }
    }

    pub fn with_min_deposit(mut self, min_deposit: u128) -> Self {
        self.min_deposit = min_deposit;
        self
    }

    /// Seeds a deposit balance, adding the matching cash.
    pub fn credit_deposit(&mut self, account: &AccountId, amount: u128) {
        *self.state.deposits.entry(account.clone()).or_default() += amount;
        self.state.cash += amount;
    }

    pub fn set_debt(&mut self, account: &AccountId, amount: u128) {
        self.state.debts.insert(account.clone(), amount);
    }

    /// Tokens delivered to `account` by withdrawals and borrows.
    pub fn wallet(&self, account: &AccountId) -> u128 {
        self.state.wallets.get(account).copied().unwrap_or(0)
    }

    pub fn cash(&self) -> u128 {
        self.state.cash
    }

    pub fn debt(&self, account: &AccountId) -> u128 {
        self.state.debts.get(account).copied().unwrap_or(0)
    }

    pub fn is_operator(&self, account: &AccountId, operator: &AccountId) -> bool {
        self.state
            .operators
            .contains(&(account.clone(), operator.clone()))
    }

    fn require_operator(&self, account: &AccountId) -> Result<(), VaultError> {
        let enabled = self
            .state
            .operators
            .iter()
            .any(|(owner, _)| owner == account);
        if enabled {
            Ok(())
        } else {
            Err(VaultError::NotAuthorized)
        }
    }
}

impl Vault for MockVault {
    fn deposit(&mut self, amount: u128, on_behalf_of: &AccountId) -> Result<(), VaultError> {
        if amount < self.min_deposit {
            return Err(VaultError::ZeroShares);
        }
        *self.state.deposits.entry(on_behalf_of.clone()).or_default() += amount;
        self.state.cash += amount;
        Ok(())
    }

    fn withdraw(
        &mut self,
        amount: u128,
        to: &AccountId,
        on_behalf_of: &AccountId,
    ) -> Result<(), VaultError> {
        self.require_operator(on_behalf_of)?;
        let balance = self.state.deposits.entry(on_behalf_of.clone()).or_default();
        if amount > *balance || amount > self.state.cash {
            return Err(VaultError::InsufficientLiquidity);
        }
        *balance -= amount;
        self.state.cash -= amount;
        *self.state.wallets.entry(to.clone()).or_default() += amount;
        Ok(())
    }

    fn borrow(
        &mut self,
        amount: u128,
        to: &AccountId,
        on_behalf_of: &AccountId,
    ) -> Result<(), VaultError> {
        self.require_operator(on_behalf_of)?;
        let debt = self.state.debts.entry(on_behalf_of.clone()).or_default();
        if debt.saturating_add(amount) > self.borrow_cap {
            return Err(VaultError::BorrowLimitExceeded);
        }
        if amount > self.state.cash {
            return Err(VaultError::InsufficientLiquidity);
        }
        *debt += amount;
        self.state.cash -= amount;
        *self.state.wallets.entry(to.clone()).or_default() += amount;
        Ok(())
    }

    fn repay_with_deposit(
        &mut self,
        amount: u128,
        on_behalf_of: &AccountId,
    ) -> Result<(), VaultError> {
        let debt = self.state.debts.entry(on_behalf_of.clone()).or_default();
        let repaid = amount.min(*debt);
        *debt -= repaid;
        let excess = amount - repaid;
        if excess > 0 {
            *self.state.deposits.entry(on_behalf_of.clone()).or_default() += excess;
        }
        self.state.cash += amount;
        Ok(())
    }

    fn available_balance(&self, account: &AccountId) -> u128 {
        self.state.deposits.get(account).copied().unwrap_or(0)
    }

    fn available_debt(&self, account: &AccountId) -> u128 {
        self.debt(account)
    }

    fn max_withdrawable(&self) -> u128 {
        self.state.cash
    }

    fn max_borrowable(&self, account: &AccountId) -> u128 {
        self.borrow_cap
            .saturating_sub(self.debt(account))
            .min(self.state.cash)
    }

    fn enable_operator(
        &mut self,
        account: &AccountId,
        operator: &AccountId,
    ) -> Result<(), VaultError> {
        self.state
            .operators
            .insert((account.clone(), operator.clone()));
        Ok(())
    }

    fn checkpoint(&mut self) -> u64 {
        self.snapshots.push(self.state.clone());
        (self.snapshots.len() - 1) as u64
    }

    fn rollback(&mut self, checkpoint: u64) {
        let index = checkpoint as usize;
        self.state = self.snapshots[index].clone();
        self.snapshots.truncate(index);
    }

    fn release(&mut self, checkpoint: u64) {
        self.snapshots.truncate(checkpoint as usize);
    }
}

/// Symmetric 1:1 pool at one million per side with half concentration
/// and no fee.
pub fn pegged_config() -> PoolConfig {
    PoolConfig {
        curve: CurveParams {
            price_x: ONE_E18,
            price_y: ONE_E18,
            concentration_x: ONE_E18 / 2,
            concentration_y: ONE_E18 / 2,
            equilibrium_reserve0: 1_000_000,
            equilibrium_reserve1: 1_000_000,
        },
        fee: 0,
        owner: AccountId::new("alice"),
        initial_reserve0: 1_000_000,
        initial_reserve1: 1_000_000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollback_restores_the_snapshot() {
        let alice = AccountId::new("alice");
        let pool = AccountId::new("pool");
        let mut vault = MockVault::new(1_000, 500);
        vault.enable_operator(&alice, &pool).unwrap();

        let cp = vault.checkpoint();
        vault.borrow(300, &alice, &alice).unwrap();
        assert_eq!(vault.debt(&alice), 300);

        vault.rollback(cp);
        assert_eq!(vault.debt(&alice), 0);
        assert_eq!(vault.cash(), 1_000);
        assert_eq!(vault.wallet(&alice), 0);
    }

    #[test]
    fn nested_scopes_unwind_independently() {
        let alice = AccountId::new("alice");
        let mut vault = MockVault::new(1_000, 0);
        vault.enable_operator(&alice, &alice).unwrap();
        vault.credit_deposit(&alice, 100);

        let outer = vault.checkpoint();
        vault.withdraw(40, &alice, &alice).unwrap();
        let inner = vault.checkpoint();
        vault.withdraw(60, &alice, &alice).unwrap();

        vault.rollback(inner);
        assert_eq!(vault.available_balance(&alice), 60);

        vault.release(outer);
        assert_eq!(vault.available_balance(&alice), 60);
    }

    #[test]
    fn repay_excess_lands_in_the_deposit() {
        let alice = AccountId::new("alice");
        let mut vault = MockVault::new(0, 1_000);
        vault.set_debt(&alice, 40);

        vault.repay_with_deposit(100, &alice).unwrap();
        assert_eq!(vault.debt(&alice), 0);
        assert_eq!(vault.available_balance(&alice), 60);
    }
}
