use crate::constants::GLOBAL_SEED;
use anchor_lang::prelude::*;

pub const FEE_RECIPIENT_SLOTS: usize = 7;

#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Global {
    pub initialized: bool,
    pub authority: Pubkey,
    pub fee_recipient: Pubkey,
    pub initial_virtual_token_reserves: u64,
    pub initial_virtual_sol_reserves: u64,
    pub initial_real_token_reserves: u64,
    pub token_total_supply: u64,
    pub fee_basis_points: u64,
    pub withdraw_authority: Pubkey,
    pub enable_migrate: bool,
    pub pool_migration_fee: u64,
    pub creator_fee_basis_points: u64,
    pub fee_recipients: [Pubkey; FEE_RECIPIENT_SLOTS],
    pub set_creator_authority: Pubkey,
    pub admin_set_creator_authority: Pubkey,
    pub create_v2_enabled: bool,
    pub whitelist_pda: Pubkey,
    pub reserved_fee_recipient: Pubkey,
    pub mayhem_mode_enabled: bool,
    pub reserved_fee_recipients: [Pubkey; FEE_RECIPIENT_SLOTS],
}

impl Default for Global {
    fn default() -> Self {
        Self {
            initialized: true,
            authority: Pubkey::default(),
            fee_recipient: Pubkey::default(),
            // Pump.fun initial values
            initial_virtual_token_reserves: 1_073_000_000_000_000,
            initial_virtual_sol_reserves: 30_000_000_000,
            initial_real_token_reserves: 793_100_000_000_000,
            token_total_supply: 1_000_000_000_000_000,
            fee_basis_points: 95,
            withdraw_authority: Pubkey::default(),
            enable_migrate: true,
            pool_migration_fee: 15_000_001,
            creator_fee_basis_points: 5,
            fee_recipients: [Pubkey::default(); FEE_RECIPIENT_SLOTS],
            set_creator_authority: Pubkey::default(),
            admin_set_creator_authority: Pubkey::default(),
            create_v2_enabled: false,
            whitelist_pda: Pubkey::default(),
            reserved_fee_recipient: Pubkey::default(),
            mayhem_mode_enabled: false,
            reserved_fee_recipients: [Pubkey::default(); FEE_RECIPIENT_SLOTS],
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Default)]
pub struct GlobalSettingsInput {
    pub initial_virtual_token_reserves: Option<u64>,
    pub initial_virtual_sol_reserves: Option<u64>,
    pub initial_real_token_reserves: Option<u64>,
    pub token_total_supply: Option<u64>,
    pub fee_basis_points: Option<u64>,
    pub creator_fee_basis_points: Option<u64>,
    pub fee_recipient: Option<Pubkey>,
    pub fee_recipients: Option<[Pubkey; FEE_RECIPIENT_SLOTS]>,
    pub reserved_fee_recipient: Option<Pubkey>,
    pub reserved_fee_recipients: Option<[Pubkey; FEE_RECIPIENT_SLOTS]>,
    pub mayhem_mode_enabled: Option<bool>,
}

impl Global {
    pub const SEED_PREFIX: &'static str = GLOBAL_SEED;

    pub fn update_settings(&mut self, params: GlobalSettingsInput) {
        if let Some(initial_virtual_token_reserves) = params.initial_virtual_token_reserves {
            self.initial_virtual_token_reserves = initial_virtual_token_reserves;
        }
        if let Some(initial_virtual_sol_reserves) = params.initial_virtual_sol_reserves {
            self.initial_virtual_sol_reserves = initial_virtual_sol_reserves;
        }
        if let Some(initial_real_token_reserves) = params.initial_real_token_reserves {
            self.initial_real_token_reserves = initial_real_token_reserves;
        }
        if let Some(token_total_supply) = params.token_total_supply {
            self.token_total_supply = token_total_supply;
        }
        if let Some(fee_basis_points) = params.fee_basis_points {
            self.fee_basis_points = fee_basis_points;
        }
        if let Some(creator_fee_basis_points) = params.creator_fee_basis_points {
            self.creator_fee_basis_points = creator_fee_basis_points;
        }
        if let Some(fee_recipient) = params.fee_recipient {
            self.fee_recipient = fee_recipient;
        }
        if let Some(fee_recipients) = params.fee_recipients {
            self.fee_recipients = fee_recipients;
        }
        if let Some(reserved_fee_recipient) = params.reserved_fee_recipient {
            self.reserved_fee_recipient = reserved_fee_recipient;
        }
        if let Some(reserved_fee_recipients) = params.reserved_fee_recipients {
            self.reserved_fee_recipients = reserved_fee_recipients;
        }
        if let Some(mayhem_mode_enabled) = params.mayhem_mode_enabled {
            self.mayhem_mode_enabled = mayhem_mode_enabled;
        }
    }

    /// Primary recipient first, then the alternates. Mayhem-mode curves pay
    /// into the reserved set instead.
    pub fn fee_recipients(&self, is_mayhem_mode: bool) -> Vec<Pubkey> {
        let (primary, alternates) = if is_mayhem_mode {
            (self.reserved_fee_recipient, &self.reserved_fee_recipients)
        } else {
            (self.fee_recipient, &self.fee_recipients)
        };
        std::iter::once(primary)
            .chain(alternates.iter().copied())
            .collect()
    }

    /// Picks a fee recipient from an index drawn by the caller. Any index is
    /// valid; it wraps around the recipient list.
    pub fn select_fee_recipient(&self, is_mayhem_mode: bool, index: usize) -> Pubkey {
        let recipients = self.fee_recipients(is_mayhem_mode);
        recipients[index % recipients.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_settings_only_touches_some_fields() {
        let mut global = Global::default();
        let before = global.clone();

        global.update_settings(GlobalSettingsInput {
            fee_basis_points: Some(100),
            creator_fee_basis_points: Some(0),
            mayhem_mode_enabled: Some(true),
            ..GlobalSettingsInput::default()
        });

        assert_eq!(global.fee_basis_points, 100);
        assert_eq!(global.creator_fee_basis_points, 0);
        assert!(global.mayhem_mode_enabled);
        assert_eq!(
            global.initial_virtual_token_reserves,
            before.initial_virtual_token_reserves
        );
        assert_eq!(global.token_total_supply, before.token_total_supply);

        global.update_settings(GlobalSettingsInput::default());
        assert_eq!(global.fee_basis_points, 100);
    }

    #[test]
    fn test_select_fee_recipient() {
        let mut global = Global::default();
        global.fee_recipient = Pubkey::new_unique();
        for slot in global.fee_recipients.iter_mut() {
            *slot = Pubkey::new_unique();
        }
        global.reserved_fee_recipient = Pubkey::new_unique();

        let recipients = global.fee_recipients(false);
        assert_eq!(recipients.len(), FEE_RECIPIENT_SLOTS + 1);
        assert_eq!(recipients[0], global.fee_recipient);
        assert_eq!(recipients[1..], global.fee_recipients[..]);

        assert_eq!(global.select_fee_recipient(false, 0), global.fee_recipient);
        assert_eq!(global.select_fee_recipient(false, 3), global.fee_recipients[2]);
        assert_eq!(
            global.select_fee_recipient(false, FEE_RECIPIENT_SLOTS + 1),
            global.fee_recipient
        );
        assert_eq!(
            global.select_fee_recipient(true, 0),
            global.reserved_fee_recipient
        );
    }

    #[test]
    fn test_account_roundtrip_keeps_discriminator() {
        let global = Global::default();
        let mut data = Vec::new();
        global.try_serialize(&mut data).unwrap();
        assert_eq!(&data[..8], Global::DISCRIMINATOR);
        assert_eq!(data.len(), 8 + Global::INIT_SPACE);

        let decoded = Global::try_deserialize(&mut data.as_slice()).unwrap();
        assert_eq!(decoded, global);
    }
}
