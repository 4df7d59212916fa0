//! The daily bonus sweep as an owned background task.
//!
//! One task, explicit start/stop. Sleeps until the next configured UTC
//! time of day, runs one sweep, repeats. Runs concurrently with request
//! handling; per-account updates are atomic in the store, so a request
//! landing mid-sweep is last-write-wins.

use chrono::{DateTime, Duration as ChronoDuration, NaiveTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use wallet_core::service::WalletService;

pub struct BonusScheduler {
    handle:   JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

impl BonusScheduler {
    pub fn start(service: Arc<Mutex<WalletService>>, sweep_time: NaiveTime) -> Self {
        let (shutdown, mut rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            loop {
                let wait = until_next(Utc::now(), sweep_time);
                log::debug!("next bonus sweep in {}s", wait.as_secs());
                tokio::select! {
                    _ = tokio::time::sleep(wait) => run_sweep(&service),
                    _ = rx.changed() => break,
                }
            }
        });
        Self { handle, shutdown }
    }

    /// Signal the loop to exit and wait for it.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}

fn run_sweep(service: &Arc<Mutex<WalletService>>) {
    let result = match service.lock() {
        Ok(s) => s.sweep(),
        Err(_) => {
            log::error!("bonus sweep skipped: service lock poisoned");
            return;
        }
    };
    match result {
        Ok(report) => log::info!(
            "bonus sweep: {} armed, {} bonused, {} failed",
            report.examined,
            report.bonused,
            report.failed
        ),
        Err(e) => log::error!("bonus sweep failed: {e}"),
    }
}

/// Duration from `now` until the next occurrence of `at` on the UTC wall
/// clock. An exact hit schedules the following day.
fn until_next(now: DateTime<Utc>, at: NaiveTime) -> Duration {
    let today = now.date_naive().and_time(at).and_utc();
    let next = if today > now {
        today
    } else {
        today + ChronoDuration::days(1)
    };
    (next - now).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sweep_later_today() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let at = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        assert_eq!(until_next(now, at), Duration::from_secs(15 * 3600 + 1800));
    }

    #[test]
    fn sweep_time_already_passed_rolls_to_tomorrow() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let at = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        assert_eq!(until_next(now, at), Duration::from_secs(16 * 3600));
    }

    #[test]
    fn exact_hit_waits_a_full_day() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let at = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        assert_eq!(until_next(now, at), Duration::from_secs(24 * 3600));
    }
}
