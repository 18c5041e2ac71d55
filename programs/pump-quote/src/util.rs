use crate::constants::FEE_BASIS_POINTS_DENOMINATOR;
use crate::errors::QuoteError;
use anchor_lang::prelude::*;

/// `floor(bps * value / divisor)`, `None` on overflow or a zero divisor.
pub fn bps_mul(bps: u64, value: u64, divisor: u64) -> Option<u64> {
    (bps as u128)
        .checked_mul(value as u128)?
        .checked_div(divisor as u128)?
        .try_into()
        .ok()
}

/// `ceil(bps * value / divisor)`, `None` on overflow or a zero divisor.
pub fn bps_mul_ceil(bps: u64, value: u64, divisor: u64) -> Option<u64> {
    ceil_div((bps as u128).checked_mul(value as u128)?, divisor as u128)?
        .try_into()
        .ok()
}

pub fn ceil_div(numerator: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    numerator
        .checked_add(denominator - 1)?
        .checked_div(denominator)
}

pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| QuoteError::ArithmeticError.into())
}

/// Upper bound a buyer is willing to pay for a quoted cost.
pub fn max_sol_cost(sol_amount: u64, slippage_bps: u64) -> Result<u64> {
    let slack = bps_mul(slippage_bps, sol_amount, FEE_BASIS_POINTS_DENOMINATOR)
        .ok_or(QuoteError::ArithmeticError)?;
    sol_amount
        .checked_add(slack)
        .ok_or(QuoteError::ArithmeticError.into())
}

/// Lower bound a seller accepts for a quoted payout.
pub fn min_sol_output(sol_amount: u64, slippage_bps: u64) -> Result<u64> {
    let slack = bps_mul(slippage_bps, sol_amount, FEE_BASIS_POINTS_DENOMINATOR)
        .ok_or(QuoteError::ArithmeticError)?;
    Ok(sol_amount.saturating_sub(slack))
}
