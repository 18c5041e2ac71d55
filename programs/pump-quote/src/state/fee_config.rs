use crate::constants::FEE_CONFIG_SEED;
use crate::errors::QuoteError;
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, InitSpace, Debug, Default, PartialEq, Eq)]
pub struct Fees {
    /// Carried for the liquidity distribution side; quote math never reads it.
    pub lp_fee_bps: u64,
    pub protocol_fee_bps: u64,
    pub creator_fee_bps: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, InitSpace, Debug, PartialEq, Eq)]
pub struct FeeTier {
    pub market_cap_lamports_threshold: u128,
    pub fees: Fees,
}

/// Market-cap tiered fee schedule. Tiers are expected in ascending
/// threshold order.
#[account]
#[derive(Debug, PartialEq)]
pub struct FeeConfig {
    pub bump: u8,
    pub admin: Pubkey,
    pub flat_fees: Fees,
    pub fee_tiers: Vec<FeeTier>,
}

impl FeeConfig {
    pub const SEED_PREFIX: &'static str = FEE_CONFIG_SEED;

    pub fn validate(&self) -> Result<()> {
        require!(!self.fee_tiers.is_empty(), QuoteError::EmptyFeeSchedule);
        Ok(())
    }

    pub fn fee_tier(&self, market_cap: u128) -> Result<Fees> {
        calculate_fee_tier(&self.fee_tiers, market_cap)
    }
}

/// Highest tier whose threshold the market cap reaches. Below the first
/// threshold the first tier applies.
pub fn calculate_fee_tier(fee_tiers: &[FeeTier], market_cap: u128) -> Result<Fees> {
    let first_tier = fee_tiers.first().ok_or(QuoteError::EmptyFeeSchedule)?;

    if market_cap < first_tier.market_cap_lamports_threshold {
        return Ok(first_tier.fees);
    }

    Ok(fee_tiers
        .iter()
        .rev()
        .find(|tier| market_cap >= tier.market_cap_lamports_threshold)
        .unwrap_or(first_tier)
        .fees)
}
