use anchor_lang::error_code;

#[error_code]
pub enum QuoteError {
    #[msg("Fee Config has no fee tiers")]
    EmptyFeeSchedule,

    #[msg("Virtual token reserves are zero")]
    ZeroReserves,

    #[msg("Arithmetic Error")]
    ArithmeticError,

    #[msg("Bonding Curve Complete")]
    BondingCurveComplete,

    #[msg("Insufficient real SOL reserves")]
    InsufficientRealSolReserves,
}
