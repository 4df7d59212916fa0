//! The bonus sweep: Idle → Armed (purchase) → Idle (bonus paid).
//!
//! The bonus is computed on the balance at the moment the sweep runs,
//! not the balance at purchase time: deposits and purchases made while
//! armed change the payout. That matches the deployed behavior and must
//! not be "corrected" here.

use crate::{error::WalletResult, service::WalletService};

/// Outcome of one sweep over all armed accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub examined: usize,
    pub bonused:  usize,
    pub failed:   usize,
}

impl WalletService {
    /// Scan every armed account and pay the bonus where the delay has
    /// elapsed, disarming in the same update. A store failure on one
    /// account is logged and does not stop the rest of the sweep.
    pub fn sweep(&self) -> WalletResult<SweepReport> {
        let now_ts = self.clock.now().timestamp();
        let delay = self.config.bonus_delay_secs();
        let armed = self.store.armed_accounts()?;

        let mut report = SweepReport {
            examined: armed.len(),
            ..Default::default()
        };
        for (account_id, since_ts) in armed {
            if now_ts - since_ts < delay {
                continue;
            }
            match self.store.apply_bonus(&account_id, self.config.bonus_rate) {
                Ok(true) => {
                    report.bonused += 1;
                    log::info!("bonus paid to account {account_id}");
                }
                // Disarmed between the scan and the update; nothing to pay.
                Ok(false) => {}
                Err(e) => {
                    report.failed += 1;
                    log::warn!("bonus update failed for account {account_id}: {e}");
                }
            }
        }
        Ok(report)
    }
}
