//! Deposits, purchases, and account lookup.

use crate::{
    account::Account,
    error::{WalletError, WalletResult},
    service::WalletService,
    types::Amount,
};

impl WalletService {
    pub fn account(&self, account_id: &str) -> WalletResult<Account> {
        self.store
            .find_account(account_id)?
            .ok_or_else(|| WalletError::NotFound(account_id.to_string()))
    }

    /// Credit `amount` and return the new balance.
    pub fn deposit(&self, account_id: &str, amount: Amount) -> WalletResult<Amount> {
        if !(amount > 0.0) {
            return Err(WalletError::InvalidAmount(amount));
        }
        if !self.store.credit_balance(account_id, amount)? {
            return Err(WalletError::NotFound(account_id.to_string()));
        }
        self.store.account_balance(account_id)
    }

    /// Deduct `price`, arming the bonus timer if this is the first
    /// purchase of a cycle. A purchase while already armed leaves the
    /// timer untouched; it does not re-arm or extend.
    pub fn purchase(&self, account_id: &str, price: Amount) -> WalletResult<()> {
        if !(price > 0.0) {
            return Err(WalletError::InvalidAmount(price));
        }
        let now = self.clock.now();
        if self.store.debit_for_purchase(account_id, price, now.timestamp())? {
            return Ok(());
        }
        // The conditional update matched no row: missing account or
        // short funds.
        match self.store.find_account(account_id)? {
            None => Err(WalletError::NotFound(account_id.to_string())),
            Some(account) => Err(WalletError::InsufficientFunds {
                available: account.balance,
                required: price,
            }),
        }
    }
}
