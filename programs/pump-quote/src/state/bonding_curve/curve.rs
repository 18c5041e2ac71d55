use crate::constants::{BONDING_CURVE_SEED, FEE_BASIS_POINTS_DENOMINATOR};
use crate::errors::QuoteError;
use crate::fees::{compute_fees_bps, creator_fee_applies, get_fee, get_fee_breakdown, FeeBps};
use crate::state::bonding_curve::structs::{
    BondingCurve, BuyResult, CurveState, ResolvedCurve, SellResult,
};
use crate::state::fee_config::FeeConfig;
use crate::state::global::Global;
use crate::util::to_u64;
use anchor_lang::prelude::*;
use std::fmt::{self};

impl BondingCurve {
    pub const SEED_PREFIX: &'static str = BONDING_CURVE_SEED;

    pub fn new_from_global(global: &Global) -> Self {
        BondingCurve {
            virtual_token_reserves: global.initial_virtual_token_reserves,
            virtual_sol_reserves: global.initial_virtual_sol_reserves,
            real_token_reserves: global.initial_real_token_reserves,
            real_sol_reserves: 0,
            token_total_supply: global.token_total_supply,
            complete: false,
            creator: Pubkey::default(),
            is_mayhem_mode: global.mayhem_mode_enabled,
        }
    }

    /// Liquidity has moved off the curve; nothing can be quoted against it.
    pub fn is_migrated(&self) -> bool {
        self.virtual_token_reserves == 0
    }

    pub fn market_cap(&self, mint_supply: u64) -> Result<u128> {
        bonding_curve_market_cap(
            mint_supply,
            self.virtual_sol_reserves,
            self.virtual_token_reserves,
        )
    }

    /// Tokens out for a net (post-fee) SOL input, rounded down.
    pub fn get_tokens_for_buy_sol(&self, sol_amount: u64) -> Result<u64> {
        let sol_amount = sol_amount as u128;
        let tokens_received = sol_amount
            .checked_mul(self.virtual_token_reserves as u128)
            .ok_or(QuoteError::ArithmeticError)?
            .checked_div(
                (self.virtual_sol_reserves as u128)
                    .checked_add(sol_amount)
                    .ok_or(QuoteError::ArithmeticError)?,
            )
            .ok_or(QuoteError::ArithmeticError)?;
        to_u64(tokens_received)
    }

    /// Pre-fee SOL needed to take `token_amount` off the curve. Rounded up by
    /// one lamport so the buyer never underpays.
    pub fn get_buy_price(&self, token_amount: u64) -> Result<u64> {
        let token_amount = token_amount as u128;
        let remaining_token_reserves = (self.virtual_token_reserves as u128)
            .checked_sub(token_amount)
            .ok_or(QuoteError::ArithmeticError)?;
        let sol_cost = token_amount
            .checked_mul(self.virtual_sol_reserves as u128)
            .ok_or(QuoteError::ArithmeticError)?
            .checked_div(remaining_token_reserves)
            .ok_or(QuoteError::ArithmeticError)?
            .checked_add(1)
            .ok_or(QuoteError::ArithmeticError)?;
        to_u64(sol_cost)
    }

    /// Gross SOL out for selling `token_amount`, rounded down.
    pub fn get_sol_for_sell_tokens(&self, token_amount: u64) -> Result<u64> {
        let token_amount = token_amount as u128;
        let sol_received = token_amount
            .checked_mul(self.virtual_sol_reserves as u128)
            .ok_or(QuoteError::ArithmeticError)?
            .checked_div(
                (self.virtual_token_reserves as u128)
                    .checked_add(token_amount)
                    .ok_or(QuoteError::ArithmeticError)?,
            )
            .ok_or(QuoteError::ArithmeticError)?;
        to_u64(sol_received)
    }

    /// Snapshot after `token_amount` left the curve for `sol_amount`.
    pub fn apply_buy(&self, token_amount: u64, sol_amount: u64) -> Result<BondingCurve> {
        let mut next = *self;
        next.virtual_token_reserves = self
            .virtual_token_reserves
            .checked_sub(token_amount)
            .ok_or(QuoteError::ArithmeticError)?;
        next.real_token_reserves = self
            .real_token_reserves
            .checked_sub(token_amount)
            .ok_or(QuoteError::ArithmeticError)?;
        next.virtual_sol_reserves = self
            .virtual_sol_reserves
            .checked_add(sol_amount)
            .ok_or(QuoteError::ArithmeticError)?;
        next.real_sol_reserves = self
            .real_sol_reserves
            .checked_add(sol_amount)
            .ok_or(QuoteError::ArithmeticError)?;
        next.complete = next.real_token_reserves == 0;
        Ok(next)
    }

    /// Snapshot after `token_amount` came back to the curve for `sol_amount`.
    pub fn apply_sell(&self, token_amount: u64, sol_amount: u64) -> Result<BondingCurve> {
        let mut next = *self;
        next.real_sol_reserves = self
            .real_sol_reserves
            .checked_sub(sol_amount)
            .ok_or(QuoteError::InsufficientRealSolReserves)?;
        next.virtual_sol_reserves = self
            .virtual_sol_reserves
            .checked_sub(sol_amount)
            .ok_or(QuoteError::ArithmeticError)?;
        next.virtual_token_reserves = self
            .virtual_token_reserves
            .checked_add(token_amount)
            .ok_or(QuoteError::ArithmeticError)?;
        next.real_token_reserves = self
            .real_token_reserves
            .checked_add(token_amount)
            .ok_or(QuoteError::ArithmeticError)?;
        Ok(next)
    }

    pub fn msg(&self) {
        msg!("{}", self);
    }
}

impl fmt::Display for BondingCurve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "BondingCurve {{ virtual_token_reserves: {:?}, virtual_sol_reserves: {:?}, real_token_reserves: {:?}, real_sol_reserves: {:?}, token_total_supply: {:?}, complete: {:?}, creator: {:?}, is_mayhem_mode: {:?} }}",
            self.virtual_token_reserves,
            self.virtual_sol_reserves,
            self.real_token_reserves,
            self.real_sol_reserves,
            self.token_total_supply,
            self.complete,
            self.creator,
            self.is_mayhem_mode
        )
    }
}

/// `virtual_sol_reserves * mint_supply / virtual_token_reserves`, rounded down.
pub fn bonding_curve_market_cap(
    mint_supply: u64,
    virtual_sol_reserves: u64,
    virtual_token_reserves: u64,
) -> Result<u128> {
    if virtual_token_reserves == 0 {
        return Err(QuoteError::ZeroReserves.into());
    }
    (virtual_sol_reserves as u128)
        .checked_mul(mint_supply as u128)
        .ok_or(QuoteError::ArithmeticError)?
        .checked_div(virtual_token_reserves as u128)
        .ok_or(QuoteError::ArithmeticError.into())
}

/// Tokens received for spending `amount` lamports, fee included.
pub fn get_buy_token_amount_from_sol_amount(
    global: &Global,
    fee_config: Option<&FeeConfig>,
    curve_state: CurveState,
    amount: u64,
) -> Result<u64> {
    if amount == 0 {
        return Ok(0);
    }

    let ResolvedCurve {
        bonding_curve,
        mint_supply,
        is_new_bonding_curve,
    } = curve_state.resolve(global);

    if bonding_curve.is_migrated() {
        msg!("GetBuyTokenAmountFromSolAmount: curve migrated");
        return Ok(0);
    }

    let FeeBps {
        protocol_fee_bps,
        creator_fee_bps,
    } = compute_fees_bps(
        global,
        fee_config,
        mint_supply,
        bonding_curve.virtual_sol_reserves,
        bonding_curve.virtual_token_reserves,
    )?;

    let mut total_fee_bps = protocol_fee_bps as u128;
    if creator_fee_applies(&bonding_curve, is_new_bonding_curve) {
        total_fee_bps = total_fee_bps
            .checked_add(creator_fee_bps as u128)
            .ok_or(QuoteError::ArithmeticError)?;
    }
    msg!(
        "GetBuyTokenAmountFromSolAmount: amount: {}, total_fee_bps: {}",
        amount,
        total_fee_bps
    );

    // Back the fee out of the gross amount. The extra lamport keeps the fee
    // recomputed on the net input from exceeding `amount`.
    let denominator = FEE_BASIS_POINTS_DENOMINATOR as u128;
    let input_amount = ((amount - 1) as u128)
        .checked_mul(denominator)
        .ok_or(QuoteError::ArithmeticError)?
        .checked_div(
            total_fee_bps
                .checked_add(denominator)
                .ok_or(QuoteError::ArithmeticError)?,
        )
        .ok_or(QuoteError::ArithmeticError)?;

    let tokens_received = bonding_curve.get_tokens_for_buy_sol(to_u64(input_amount)?)?;
    msg!(
        "GetBuyTokenAmountFromSolAmount: input_amount: {}, tokens_received: {}",
        input_amount,
        tokens_received
    );

    Ok(tokens_received.min(bonding_curve.real_token_reserves))
}

/// Lamports needed, fee included, to buy `amount` tokens. Requests above the
/// real token reserves are priced at the reserves.
pub fn get_buy_sol_amount_from_token_amount(
    global: &Global,
    fee_config: Option<&FeeConfig>,
    curve_state: CurveState,
    amount: u64,
) -> Result<u64> {
    if amount == 0 {
        return Ok(0);
    }

    let ResolvedCurve {
        bonding_curve,
        mint_supply,
        is_new_bonding_curve,
    } = curve_state.resolve(global);

    if bonding_curve.is_migrated() {
        msg!("GetBuySolAmountFromTokenAmount: curve migrated");
        return Ok(0);
    }

    let min_amount = amount.min(bonding_curve.real_token_reserves);
    let sol_cost = bonding_curve.get_buy_price(min_amount)?;
    let fee = get_fee(
        global,
        fee_config,
        mint_supply,
        &bonding_curve,
        sol_cost,
        is_new_bonding_curve,
    )?;
    msg!(
        "GetBuySolAmountFromTokenAmount: token_amount: {}, sol_cost: {}, fee: {}",
        min_amount,
        sol_cost,
        fee
    );

    sol_cost
        .checked_add(fee)
        .ok_or(QuoteError::ArithmeticError.into())
}

/// Lamports the seller receives, net of fees, for `amount` tokens.
pub fn get_sell_sol_amount_from_token_amount(
    global: &Global,
    fee_config: Option<&FeeConfig>,
    mint_supply: u64,
    bonding_curve: &BondingCurve,
    amount: u64,
) -> Result<u64> {
    if amount == 0 {
        return Ok(0);
    }

    if bonding_curve.is_migrated() {
        msg!("GetSellSolAmountFromTokenAmount: curve migrated");
        return Ok(0);
    }

    let sol_cost = bonding_curve.get_sol_for_sell_tokens(amount)?;
    let fee = get_fee(global, fee_config, mint_supply, bonding_curve, sol_cost, false)?;
    msg!(
        "GetSellSolAmountFromTokenAmount: token_amount: {}, sol_cost: {}, fee: {}",
        amount,
        sol_cost,
        fee
    );

    // Dust sells can round the fee above the payout.
    Ok(sol_cost.saturating_sub(fee))
}

/// Full buy of `sol_amount` lamports against the curve: tokens received,
/// cost, fees and the curve left behind.
pub fn simulate_buy(
    global: &Global,
    fee_config: Option<&FeeConfig>,
    curve_state: CurveState,
    sol_amount: u64,
) -> Result<BuyResult> {
    let ResolvedCurve {
        bonding_curve,
        mint_supply,
        is_new_bonding_curve,
    } = curve_state.resolve(global);

    require!(!bonding_curve.complete, QuoteError::BondingCurveComplete);

    let token_amount =
        get_buy_token_amount_from_sol_amount(global, fee_config, curve_state, sol_amount)?;
    if token_amount == 0 {
        return Ok(BuyResult {
            token_amount: 0,
            sol_amount: 0,
            fees: Default::default(),
            bonding_curve,
        });
    }

    let cost = bonding_curve.get_buy_price(token_amount)?;
    let fees = get_fee_breakdown(
        global,
        fee_config,
        mint_supply,
        &bonding_curve,
        cost,
        is_new_bonding_curve,
    )?;
    let next = bonding_curve.apply_buy(token_amount, cost)?;
    msg!(
        "SimulateBuy: token_amount: {}, cost: {}, fees: {:?}",
        token_amount,
        cost,
        fees
    );
    next.msg();

    Ok(BuyResult {
        token_amount,
        sol_amount: cost,
        fees,
        bonding_curve: next,
    })
}

/// Full sell of `token_amount` tokens into an existing curve.
pub fn simulate_sell(
    global: &Global,
    fee_config: Option<&FeeConfig>,
    mint_supply: u64,
    bonding_curve: &BondingCurve,
    token_amount: u64,
) -> Result<SellResult> {
    require!(!bonding_curve.complete, QuoteError::BondingCurveComplete);

    if token_amount == 0 || bonding_curve.is_migrated() {
        return Ok(SellResult {
            token_amount: 0,
            sol_amount: 0,
            fees: Default::default(),
            bonding_curve: *bonding_curve,
        });
    }

    let sol_amount = bonding_curve.get_sol_for_sell_tokens(token_amount)?;
    let fees = get_fee_breakdown(
        global,
        fee_config,
        mint_supply,
        bonding_curve,
        sol_amount,
        false,
    )?;
    let next = bonding_curve.apply_sell(token_amount, sol_amount)?;
    msg!(
        "SimulateSell: token_amount: {}, sol_amount: {}, fees: {:?}",
        token_amount,
        sol_amount,
        fees
    );
    next.msg();

    Ok(SellResult {
        token_amount,
        sol_amount,
        fees,
        bonding_curve: next,
    })
}
