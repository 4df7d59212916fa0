//! Runtime configuration.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Flat amount credited to a referrer per successful referral.
    pub referral_bonus: f64,
    /// Fraction of the current balance paid out by the scheduled bonus.
    pub bonus_rate: f64,
    /// Hours that must elapse after an arming purchase before the bonus
    /// becomes payable.
    pub bonus_delay_hours: i64,
    /// UTC time of day ("HH:MM") at which the daily sweep runs.
    pub sweep_time_utc: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            referral_bonus: 1000.0,
            bonus_rate: 0.40,
            bonus_delay_hours: 24,
            sweep_time_utc: "00:00".into(),
        }
    }
}

impl WalletConfig {
    /// Load from a JSON file. Missing keys fall back to the defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn sweep_time(&self) -> anyhow::Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.sweep_time_utc, "%H:%M").map_err(|e| {
            anyhow::anyhow!("Invalid sweep_time_utc '{}': {e}", self.sweep_time_utc)
        })
    }

    pub fn bonus_delay_secs(&self) -> i64 {
        self.bonus_delay_hours * 3600
    }
}
