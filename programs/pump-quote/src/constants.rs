pub static GLOBAL_SEED: &str = "global";
pub static BONDING_CURVE_SEED: &str = "bonding-curve";
pub static FEE_CONFIG_SEED: &str = "fee_config";

/// Fee rates are integer basis points out of this denominator.
pub const FEE_BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// 1B tokens at 6 decimals. Fee tiers are always priced against this supply
/// unless the curve runs in mayhem mode.
pub const ONE_BILLION_SUPPLY: u64 = 1_000_000_000_000_000;
