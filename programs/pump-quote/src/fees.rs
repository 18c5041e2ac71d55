use crate::constants::{FEE_BASIS_POINTS_DENOMINATOR, ONE_BILLION_SUPPLY};
use crate::errors::QuoteError;
use crate::state::bonding_curve::{bonding_curve_market_cap, BondingCurve};
use crate::state::fee_config::FeeConfig;
use crate::state::global::Global;
use crate::util::bps_mul_ceil;
use anchor_lang::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeBps {
    pub protocol_fee_bps: u64,
    pub creator_fee_bps: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub protocol_fee: u64,
    pub creator_fee: u64,
}

impl FeeBreakdown {
    pub fn total(&self) -> Result<u64> {
        self.protocol_fee
            .checked_add(self.creator_fee)
            .ok_or(QuoteError::ArithmeticError.into())
    }
}

/// Flat global rates, or the tier matching the curve's market cap when a fee
/// config is present.
pub fn compute_fees_bps(
    global: &Global,
    fee_config: Option<&FeeConfig>,
    mint_supply: u64,
    virtual_sol_reserves: u64,
    virtual_token_reserves: u64,
) -> Result<FeeBps> {
    let Some(fee_config) = fee_config else {
        return Ok(FeeBps {
            protocol_fee_bps: global.fee_basis_points,
            creator_fee_bps: global.creator_fee_basis_points,
        });
    };

    let market_cap =
        bonding_curve_market_cap(mint_supply, virtual_sol_reserves, virtual_token_reserves)?;
    let fees = fee_config.fee_tier(market_cap)?;
    Ok(FeeBps {
        protocol_fee_bps: fees.protocol_fee_bps,
        creator_fee_bps: fees.creator_fee_bps,
    })
}

/// `ceil(amount * fee_basis_points / 10_000)`. Never under-collects.
pub fn compute_fee(amount: u64, fee_basis_points: u64) -> Result<u64> {
    bps_mul_ceil(fee_basis_points, amount, FEE_BASIS_POINTS_DENOMINATOR)
        .ok_or(QuoteError::ArithmeticError.into())
}

/// An existing curve without a creator pays no creator fee. A curve that is
/// about to be created always does.
pub fn creator_fee_applies(bonding_curve: &BondingCurve, is_new_bonding_curve: bool) -> bool {
    is_new_bonding_curve || bonding_curve.creator != Pubkey::default()
}

pub fn get_fee_breakdown(
    global: &Global,
    fee_config: Option<&FeeConfig>,
    mint_supply: u64,
    bonding_curve: &BondingCurve,
    amount: u64,
    is_new_bonding_curve: bool,
) -> Result<FeeBreakdown> {
    // Tiers are priced against the canonical supply; mayhem curves use their
    // live supply.
    let supply_basis = if bonding_curve.is_mayhem_mode {
        mint_supply
    } else {
        ONE_BILLION_SUPPLY
    };

    let FeeBps {
        protocol_fee_bps,
        creator_fee_bps,
    } = compute_fees_bps(
        global,
        fee_config,
        supply_basis,
        bonding_curve.virtual_sol_reserves,
        bonding_curve.virtual_token_reserves,
    )?;

    let creator_fee = if creator_fee_applies(bonding_curve, is_new_bonding_curve) {
        compute_fee(amount, creator_fee_bps)?
    } else {
        0
    };

    Ok(FeeBreakdown {
        protocol_fee: compute_fee(amount, protocol_fee_bps)?,
        creator_fee,
    })
}

pub fn get_fee(
    global: &Global,
    fee_config: Option<&FeeConfig>,
    mint_supply: u64,
    bonding_curve: &BondingCurve,
    amount: u64,
    is_new_bonding_curve: bool,
) -> Result<u64> {
    get_fee_breakdown(
        global,
        fee_config,
        mint_supply,
        bonding_curve,
        amount,
        is_new_bonding_curve,
    )?
    .total()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fee_config::{FeeTier, Fees};

    fn tier(threshold: u128, protocol_fee_bps: u64, creator_fee_bps: u64) -> FeeTier {
        FeeTier {
            market_cap_lamports_threshold: threshold,
            fees: Fees {
                lp_fee_bps: 25,
                protocol_fee_bps,
                creator_fee_bps,
            },
        }
    }

    fn fee_config(fee_tiers: Vec<FeeTier>) -> FeeConfig {
        FeeConfig {
            bump: 255,
            admin: Pubkey::default(),
            flat_fees: Fees::default(),
            fee_tiers,
        }
    }

    fn curve_with_creator(global: &Global) -> BondingCurve {
        BondingCurve {
            creator: Pubkey::new_unique(),
            ..BondingCurve::new_from_global(global)
        }
    }

    #[test]
    fn test_compute_fee() {
        assert_eq!(compute_fee(10_000, 100).unwrap(), 100);
        assert_eq!(compute_fee(10_001, 100).unwrap(), 101);
        assert_eq!(compute_fee(1, 1).unwrap(), 1);
        assert_eq!(compute_fee(0, 100).unwrap(), 0);
        assert_eq!(compute_fee(1_000_000, 0).unwrap(), 0);
        assert_eq!(compute_fee(u64::MAX, 10_000).unwrap(), u64::MAX);
        assert!(compute_fee(u64::MAX, 10_001).is_err());
    }

    #[test]
    fn test_flat_rates_without_fee_config() {
        let global = Global::default();
        let bps = compute_fees_bps(&global, None, 0, 0, 0).unwrap();
        assert_eq!(
            bps,
            FeeBps {
                protocol_fee_bps: 95,
                creator_fee_bps: 5,
            }
        );
    }

    #[test]
    fn test_tiered_rates_follow_market_cap() {
        let global = Global::default();
        // Default curve market cap at 1B supply: 27_958_993_476 lamports.
        let config = fee_config(vec![
            tier(0, 120, 30),
            tier(20_000_000_000, 90, 20),
            tier(30_000_000_000, 50, 10),
        ]);
        let bps = compute_fees_bps(
            &global,
            Some(&config),
            ONE_BILLION_SUPPLY,
            global.initial_virtual_sol_reserves,
            global.initial_virtual_token_reserves,
        )
        .unwrap();
        assert_eq!(
            bps,
            FeeBps {
                protocol_fee_bps: 90,
                creator_fee_bps: 20,
            }
        );
    }

    #[test]
    fn test_tiered_rates_errors() {
        let global = Global::default();
        assert_eq!(
            compute_fees_bps(&global, Some(&fee_config(vec![])), ONE_BILLION_SUPPLY, 1, 1)
                .unwrap_err(),
            QuoteError::EmptyFeeSchedule.into()
        );
        assert_eq!(
            compute_fees_bps(
                &global,
                Some(&fee_config(vec![tier(0, 1, 1)])),
                ONE_BILLION_SUPPLY,
                1,
                0
            )
            .unwrap_err(),
            QuoteError::ZeroReserves.into()
        );
    }

    #[test]
    fn test_creator_fee_exemption() {
        let global = Global::default();
        let fresh = BondingCurve::new_from_global(&global);
        let owned = curve_with_creator(&global);

        // No creator on an existing curve: protocol fee only.
        assert_eq!(
            get_fee_breakdown(&global, None, ONE_BILLION_SUPPLY, &fresh, 1_000_000, false).unwrap(),
            FeeBreakdown {
                protocol_fee: 9_500,
                creator_fee: 0,
            }
        );
        // Same snapshot, but about to be created.
        assert_eq!(
            get_fee(&global, None, ONE_BILLION_SUPPLY, &fresh, 1_000_000, true).unwrap(),
            10_000
        );
        assert_eq!(
            get_fee(&global, None, ONE_BILLION_SUPPLY, &owned, 1_000_000, false).unwrap(),
            10_000
        );
    }

    #[test]
    fn test_components_round_up_independently() {
        let global = Global::default();
        let owned = curve_with_creator(&global);
        // 95 bps of 27_985_075 = 265_858.2125, 5 bps = 13_992.5375
        assert_eq!(
            get_fee_breakdown(&global, None, ONE_BILLION_SUPPLY, &owned, 27_985_075, false)
                .unwrap(),
            FeeBreakdown {
                protocol_fee: 265_859,
                creator_fee: 13_993,
            }
        );
    }

    #[test]
    fn test_supply_basis_depends_on_mayhem_mode() {
        let global = Global::default();
        // Market cap at the canonical supply is 27_958_993_476; a tiny live
        // supply would put the curve in the lowest tier.
        let config = fee_config(vec![tier(0, 300, 0), tier(20_000_000_000, 100, 0)]);
        let live_supply = 1_000_000;

        let normal = curve_with_creator(&global);
        assert_eq!(
            get_fee(&global, Some(&config), live_supply, &normal, 10_000, false).unwrap(),
            100
        );

        let mayhem = BondingCurve {
            is_mayhem_mode: true,
            ..normal
        };
        assert_eq!(
            get_fee(&global, Some(&config), live_supply, &mayhem, 10_000, false).unwrap(),
            300
        );
    }
}
