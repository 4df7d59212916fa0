//! Referral linkage.
//!
//! RULE: binding an account to a referrer has exactly one implementation,
//! shared by registration and the standalone referral operation.

use crate::{
    error::{WalletError, WalletResult},
    service::WalletService,
};

impl WalletService {
    /// Bind `target` to `referrer`. Single-shot: a referrer, once set, is
    /// never overwritten. The referrer is credited one referral count and
    /// the flat referral bonus.
    pub fn link_referral(&self, target_id: &str, referrer_id: &str) -> WalletResult<()> {
        let target = self
            .store
            .find_account(target_id)?
            .ok_or_else(|| WalletError::NotFound(target_id.to_string()))?;
        if target.referred_by.is_some() {
            return Err(WalletError::AlreadyReferred(target_id.to_string()));
        }
        if self.store.find_account(referrer_id)?.is_none() {
            return Err(WalletError::NotFound(referrer_id.to_string()));
        }

        if !self.store.set_referrer(target_id, referrer_id)? {
            // Lost a race to another linkage for the same target.
            return Err(WalletError::AlreadyReferred(target_id.to_string()));
        }
        self.store
            .credit_referral(referrer_id, self.config.referral_bonus)?;

        log::info!("account {target_id} referred by {referrer_id}");
        Ok(())
    }
}
