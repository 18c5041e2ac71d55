pub mod bonding_curve;
pub mod fee_config;
pub mod global;
