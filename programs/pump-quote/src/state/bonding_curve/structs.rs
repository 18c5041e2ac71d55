use crate::fees::FeeBreakdown;
use crate::state::global::Global;
use anchor_lang::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct BuyResult {
    pub token_amount: u64,
    /// Pre-fee cost charged against the curve.
    pub sol_amount: u64,
    pub fees: FeeBreakdown,
    /// Curve snapshot after the trade settles.
    pub bonding_curve: BondingCurve,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SellResult {
    pub token_amount: u64,
    /// Gross SOL leaving the curve; the seller receives this minus `fees`.
    pub sol_amount: u64,
    pub fees: FeeBreakdown,
    pub bonding_curve: BondingCurve,
}

#[account]
#[derive(InitSpace, Debug, Default, Copy, PartialEq)]
pub struct BondingCurve {
    pub virtual_token_reserves: u64,
    pub virtual_sol_reserves: u64,
    pub real_token_reserves: u64,
    pub real_sol_reserves: u64,
    pub token_total_supply: u64,
    pub complete: bool,
    /// `Pubkey::default()` when the curve has no creator to pay.
    pub creator: Pubkey,
    pub is_mayhem_mode: bool,
}

/// The curve a quote runs against. A market that has not been created yet is
/// priced from the global initial reserves.
#[derive(Debug, Clone, Copy)]
pub enum CurveState<'a> {
    Fresh,
    Existing {
        bonding_curve: &'a BondingCurve,
        mint_supply: u64,
    },
}

/// A `CurveState` with the fresh case materialized.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedCurve {
    pub bonding_curve: BondingCurve,
    pub mint_supply: u64,
    pub is_new_bonding_curve: bool,
}

impl CurveState<'_> {
    pub fn resolve(self, global: &Global) -> ResolvedCurve {
        match self {
            CurveState::Fresh => ResolvedCurve {
                bonding_curve: BondingCurve::new_from_global(global),
                mint_supply: global.token_total_supply,
                is_new_bonding_curve: true,
            },
            CurveState::Existing {
                bonding_curve,
                mint_supply,
            } => ResolvedCurve {
                bonding_curve: *bonding_curve,
                mint_supply,
                is_new_bonding_curve: false,
            },
        }
    }
}
