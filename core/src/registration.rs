//! Registration and login.

use crate::{
    account::{Account, BonusState, Registration},
    error::{WalletError, WalletResult},
    service::WalletService,
    types::AccountId,
};
use uuid::Uuid;

impl WalletService {
    /// Create a new account. With a referrer id present, the shared
    /// referral linkage runs for the new account; an unknown referrer
    /// fails the whole registration and no account is created.
    pub fn register(&self, reg: &Registration) -> WalletResult<AccountId> {
        validate_identity(reg)?;

        if self.store.identity_exists(&reg.email, &reg.phone)? {
            return Err(WalletError::DuplicateAccount);
        }
        if let Some(referrer_id) = &reg.referrer_id {
            if self.store.find_account(referrer_id)?.is_none() {
                return Err(WalletError::NotFound(referrer_id.clone()));
            }
        }

        let account = Account {
            account_id:      Uuid::new_v4().to_string(),
            first_name:      reg.first_name.clone(),
            last_name:       reg.last_name.clone(),
            email:           reg.email.clone(),
            phone:           reg.phone.clone(),
            password:        reg.password.clone(),
            referred_by:     None,
            referrals_count: 0,
            balance:         0.0,
            bonus_state:     BonusState::Idle,
            created_at:      self.clock.now(),
        };
        self.store.insert_account(&account)?;

        if let Some(referrer_id) = &reg.referrer_id {
            self.link_referral(&account.account_id, referrer_id)?;
        }

        log::info!("account {} registered", account.account_id);
        Ok(account.account_id)
    }

    /// Verify phone + password. Unknown phone and wrong password return
    /// the same error.
    pub fn login(&self, phone: &str, password: &str) -> WalletResult<AccountId> {
        let account = self
            .store
            .find_by_phone(phone)?
            .ok_or(WalletError::InvalidCredentials)?;
        if !self.verifier.verify(&account.password, password) {
            return Err(WalletError::InvalidCredentials);
        }
        Ok(account.account_id)
    }
}

fn validate_identity(reg: &Registration) -> WalletResult<()> {
    let fields = [
        ("firstName", &reg.first_name),
        ("lastName", &reg.last_name),
        ("email", &reg.email),
        ("phone", &reg.phone),
        ("password", &reg.password),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(WalletError::MissingField(name));
        }
    }
    Ok(())
}
