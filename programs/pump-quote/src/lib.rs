use anchor_lang::prelude::*;
pub mod constants;
pub mod errors;
pub mod fees;
pub mod state;
pub mod util;

pub use errors::QuoteError;
pub use fees::*;
pub use state::bonding_curve::*;
pub use state::fee_config::*;
pub use state::global::*;

// Owner of the Global and BondingCurve accounts this crate decodes.
declare_id!("6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P");
