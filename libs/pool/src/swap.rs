//! Swap execution
//!
//! A swap runs as one atomic sequence: validate, checkpoint the vaults,
//! pay outputs (withdrawing deposits first, borrowing any shortfall),
//! run the optional callback, settle inputs (repaying debt before
//! depositing), take the fee, and commit the shifted reserves after
//! re-verifying the curve. Any failure unwinds both vaults and the
//! pool's holdings to their pre-swap state.

use jitswap_curve::math::mul_div_u128;
use jitswap_curve::ONE_E18;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{SwapError, VaultError};
use crate::pool::{Pool, TokenSide};
use crate::vault::{AccountId, Vault};

/// One swap instruction: how much of each asset to pay out, to whom,
/// and whether to hand control back to the caller for payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub amount0_out: u128,
    pub amount1_out: u128,
    pub recipient: AccountId,
    /// When present, the pool invokes the swap callback after paying
    /// outputs; the callback supplies the input payment.
    pub callback_data: Option<Vec<u8>>,
}

/// Input the callback hands back to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapPayment {
    pub amount0: u128,
    pub amount1: u128,
}

/// Counterparty hook run mid-swap, after outputs are delivered.
pub trait SwapCallback {
    fn on_swap(
        &mut self,
        amount0_out: u128,
        amount1_out: u128,
        data: &[u8],
    ) -> Result<SwapPayment, String>;
}

/// Record of one committed swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapEvent {
    /// Settled input per side; excludes dust the vault refused.
    pub amount0_in: u128,
    pub amount1_in: u128,
    pub amount0_out: u128,
    pub amount1_out: u128,
    /// Owner-yield portion of each input. Deposited with the rest but
    /// excluded from the reserve shift.
    pub fee0: u128,
    pub fee1: u128,
    pub recipient: AccountId,
}

impl<V: Vault> Pool<V> {
    /// Executes one swap atomically.
    pub fn swap(
        &mut self,
        request: SwapRequest,
        callback: Option<&mut dyn SwapCallback>,
    ) -> Result<SwapEvent, SwapError> {
        if !self.active {
            return Err(SwapError::NotActivated);
        }
        if self.in_swap {
            return Err(SwapError::AlreadyInSwap);
        }
        let (reserve0, reserve1) = self.reserves.current();
        if request.amount0_out > reserve0 || request.amount1_out > reserve1 {
            return Err(SwapError::Bounds);
        }

        self.in_swap = true;
        let checkpoint0 = self.vault0.checkpoint();
        let checkpoint1 = self.vault1.checkpoint();
        let holdings_before = (self.holdings0, self.holdings1);

        match self.execute(&request, callback) {
            Ok(event) => {
                self.vault0.release(checkpoint0);
                self.vault1.release(checkpoint1);
                self.in_swap = false;
                info!(
                    amount0_in = event.amount0_in,
                    amount1_in = event.amount1_in,
                    amount0_out = event.amount0_out,
                    amount1_out = event.amount1_out,
                    fee0 = event.fee0,
                    fee1 = event.fee1,
                    recipient = %event.recipient,
                    "swap committed"
                );
                Ok(event)
            }
            Err(err) => {
                self.vault1.rollback(checkpoint1);
                self.vault0.rollback(checkpoint0);
                self.holdings0 = holdings_before.0;
                self.holdings1 = holdings_before.1;
                self.in_swap = false;
                debug!(error = %err, "swap aborted, state unwound");
                Err(err)
            }
        }
    }

    fn execute(
        &mut self,
        request: &SwapRequest,
        callback: Option<&mut dyn SwapCallback>,
    ) -> Result<SwapEvent, SwapError> {
        self.disburse(TokenSide::Token0, request.amount0_out, &request.recipient)?;
        self.disburse(TokenSide::Token1, request.amount1_out, &request.recipient)?;

        if let Some(data) = &request.callback_data {
            let handler = callback.ok_or_else(|| SwapError::Callback {
                message: "no callback handler registered".into(),
            })?;
            let payment = handler
                .on_swap(request.amount0_out, request.amount1_out, data)
                .map_err(|message| SwapError::Callback { message })?;
            self.receive(TokenSide::Token0, payment.amount0)?;
            self.receive(TokenSide::Token1, payment.amount1)?;
        }

        let (in0, fee0) = self.settle(TokenSide::Token0)?;
        let (in1, fee1) = self.settle(TokenSide::Token1)?;

        let (reserve0, reserve1) = self.reserves.current();
        let new_reserve0 = shifted(reserve0, in0, fee0, request.amount0_out)?;
        let new_reserve1 = shifted(reserve1, in1, fee1, request.amount1_out)?;
        self.reserves
            .commit(new_reserve0, new_reserve1, &self.config.curve)?;

        Ok(SwapEvent {
            amount0_in: in0,
            amount1_in: in1,
            amount0_out: request.amount0_out,
            amount1_out: request.amount1_out,
            fee0,
            fee1,
            recipient: request.recipient.clone(),
        })
    }

    /// Pays `amount` of one asset to `to`, spending the owner's deposit
    /// first and borrowing whatever the deposit cannot cover.
    fn disburse(&mut self, side: TokenSide, amount: u128, to: &AccountId) -> Result<(), SwapError> {
        if amount == 0 {
            return Ok(());
        }
        let owner = self.config.owner.clone();
        let vault = match side {
            TokenSide::Token0 => &mut self.vault0,
            TokenSide::Token1 => &mut self.vault1,
        };
        let from_deposit = amount.min(vault.available_balance(&owner));
        if from_deposit > 0 {
            vault.withdraw(from_deposit, to, &owner)?;
        }
        let shortfall = amount - from_deposit;
        if shortfall > 0 {
            debug!(?side, shortfall, "covering output by borrowing");
            vault.borrow(shortfall, to, &owner)?;
        }
        Ok(())
    }

    /// Moves one side's holdings into the vault: debt first, deposit
    /// the rest. A deposit too small to mint shares is absorbed; the
    /// dust stays in holdings and counts toward a later swap.
    fn settle(&mut self, side: TokenSide) -> Result<(u128, u128), SwapError> {
        let gross = match side {
            TokenSide::Token0 => self.holdings0,
            TokenSide::Token1 => self.holdings1,
        };
        if gross == 0 {
            return Ok((0, 0));
        }
        let owner = self.config.owner.clone();
        let mut settled = gross;
        let mut leftover = 0u128;
        {
            let vault = match side {
                TokenSide::Token0 => &mut self.vault0,
                TokenSide::Token1 => &mut self.vault1,
            };
            let repay = gross.min(vault.available_debt(&owner));
            if repay > 0 {
                vault.repay_with_deposit(repay, &owner)?;
            }
            let rest = gross - repay;
            if rest > 0 {
                match vault.deposit(rest, &owner) {
                    Ok(()) => {}
                    Err(VaultError::ZeroShares) => {
                        warn!(?side, dust = rest, "deposit below share granularity, retaining dust");
                        settled = repay;
                        leftover = rest;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
        match side {
            TokenSide::Token0 => self.holdings0 = leftover,
            TokenSide::Token1 => self.holdings1 = leftover,
        }
        let fee = if settled == 0 || self.config.fee == 0 {
            0
        } else {
            mul_div_u128(settled, self.config.fee, ONE_E18, false)?
        };
        Ok((settled, fee))
    }
}

fn shifted(reserve: u128, gross_in: u128, fee: u128, out: u128) -> Result<u128, SwapError> {
    // fee <= gross_in by construction
    let net_in = gross_in - fee;
    let grown = reserve.checked_add(net_in).ok_or(SwapError::Bounds)?;
    grown.checked_sub(out).ok_or(SwapError::InvariantViolation)
}
