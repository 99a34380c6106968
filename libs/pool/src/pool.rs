//! Pool configuration and lifecycle
//!
//! A pool is created immutably from explicit parameters, including its
//! initial reserves, which are supplied at creation rather than derived
//! from live vault balance/debt state. It is never destroyed
//! programmatically; retirement means revoking the operator permission
//! externally.

use jitswap_curve::{BondingCurve, CurveParams, MAX_AMOUNT, ONE_E18};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ConfigError, SwapError};
use crate::reserves::VirtualReserves;
use crate::vault::{AccountId, Vault};

/// Which of the pool's two assets an amount refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenSide {
    Token0,
    Token1,
}

impl TokenSide {
    pub fn other(self) -> Self {
        match self {
            TokenSide::Token0 => TokenSide::Token1,
            TokenSide::Token1 => TokenSide::Token0,
        }
    }
}

/// Everything a pool is created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    pub curve: CurveParams,
    /// Fraction of each input retained as owner yield, 1e18 scale.
    pub fee: u128,
    /// Account whose vault positions the pool operates on.
    pub owner: AccountId,
    pub initial_reserve0: u128,
    pub initial_reserve1: u128,
}

impl PoolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.curve.validate()?;
        if self.fee >= ONE_E18 {
            return Err(ConfigError::FeeTooHigh);
        }
        if self.initial_reserve0 > MAX_AMOUNT || self.initial_reserve1 > MAX_AMOUNT {
            return Err(ConfigError::ReserveOutOfRange);
        }
        if !self
            .curve
            .on_or_above(self.initial_reserve0, self.initial_reserve1)
        {
            return Err(ConfigError::ReservesBelowCurve);
        }
        Ok(())
    }
}

/// One swap pool: immutable curve parameters, a virtual reserve pair,
/// two vault handles and the un-deposited token holdings.
#[derive(Debug)]
pub struct Pool<V: Vault> {
    pub(crate) config: PoolConfig,
    pub(crate) reserves: VirtualReserves,
    pub(crate) vault0: V,
    pub(crate) vault1: V,
    /// Tokens paid to the pool but not yet settled into the vaults.
    /// Swap settlement drains these; degenerate-deposit dust stays here.
    pub(crate) holdings0: u128,
    pub(crate) holdings1: u128,
    /// Identity under which the pool acts against the vaults.
    pub(crate) operator: AccountId,
    pub(crate) active: bool,
    pub(crate) in_swap: bool,
}

impl<V: Vault> Pool<V> {
    pub fn new(
        operator: AccountId,
        config: PoolConfig,
        vault0: V,
        vault1: V,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let reserves = VirtualReserves::new(config.initial_reserve0, config.initial_reserve1);
        Ok(Self {
            config,
            reserves,
            vault0,
            vault1,
            holdings0: 0,
            holdings1: 0,
            operator,
            active: false,
            in_swap: false,
        })
    }

    /// Authorizes the pool to act on the owner's behalf in both vaults.
    /// Swaps and quotes are rejected until this has run.
    pub fn activate(&mut self) -> Result<(), SwapError> {
        self.vault0
            .enable_operator(&self.config.owner, &self.operator)?;
        self.vault1
            .enable_operator(&self.config.owner, &self.operator)?;
        self.active = true;
        info!(operator = %self.operator, owner = %self.config.owner, "pool activated");
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Current virtual reserve pair.
    pub fn reserves(&self) -> (u128, u128) {
        self.reserves.current()
    }

    /// Token balances held by the pool awaiting settlement.
    pub fn holdings(&self) -> (u128, u128) {
        (self.holdings0, self.holdings1)
    }

    /// Credits tokens paid to the pool. Anything here when a swap
    /// settles counts as input, whether it arrived beforehand or during
    /// the swap callback.
    pub fn receive(&mut self, side: TokenSide, amount: u128) -> Result<(), SwapError> {
        let slot = match side {
            TokenSide::Token0 => &mut self.holdings0,
            TokenSide::Token1 => &mut self.holdings1,
        };
        let credited = slot.checked_add(amount).ok_or(SwapError::Bounds)?;
        if credited > MAX_AMOUNT {
            return Err(SwapError::Bounds);
        }
        *slot = credited;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{pegged_config, MockVault};

    #[test]
    fn new_rejects_reserves_below_curve() {
        let mut config = pegged_config();
        config.initial_reserve0 = 999_999;
        let err = Pool::new(
            AccountId::new("pool"),
            config,
            MockVault::new(0, 0),
            MockVault::new(0, 0),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::ReservesBelowCurve);
    }

    #[test]
    fn new_rejects_excessive_fee() {
        let mut config = pegged_config();
        config.fee = ONE_E18;
        let err = Pool::new(
            AccountId::new("pool"),
            config,
            MockVault::new(0, 0),
            MockVault::new(0, 0),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::FeeTooHigh);
    }

    #[test]
    fn activate_enables_operator_in_both_vaults() {
        let config = pegged_config();
        let owner = config.owner.clone();
        let mut pool = Pool::new(
            AccountId::new("pool"),
            config,
            MockVault::new(0, 0),
            MockVault::new(0, 0),
        )
        .unwrap();

        assert!(!pool.is_active());
        pool.activate().unwrap();
        assert!(pool.is_active());
        assert!(pool.vault0.is_operator(&owner, &AccountId::new("pool")));
        assert!(pool.vault1.is_operator(&owner, &AccountId::new("pool")));
    }

    #[test]
    fn receive_rejects_amounts_past_the_ceiling() {
        let config = pegged_config();
        let mut pool = Pool::new(
            AccountId::new("pool"),
            config,
            MockVault::new(0, 0),
            MockVault::new(0, 0),
        )
        .unwrap();

        pool.receive(TokenSide::Token0, MAX_AMOUNT).unwrap();
        assert_eq!(pool.holdings(), (MAX_AMOUNT, 0));
        assert_eq!(pool.receive(TokenSide::Token0, 1), Err(SwapError::Bounds));
    }

    #[test]
    fn config_serde_round_trip() {
        let config = pegged_config();
        let json = serde_json::to_string(&config).unwrap();
        let back: PoolConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
        back.validate().unwrap();
    }
}
