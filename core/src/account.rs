//! The account model: profile, wallet state, referral linkage, and the
//! bonus timer state.

use crate::types::{AccountId, Amount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bonus accrual state. A purchase arms the timer; the sweep pays the
/// bonus and disarms once the delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BonusState {
    Idle,
    Armed { since: DateTime<Utc> },
}

impl BonusState {
    /// Storage mapping: the armed-since timestamp doubles as the state
    /// flag (NULL column = idle).
    pub fn from_timestamp(ts: Option<i64>) -> Self {
        match ts.and_then(|t| DateTime::from_timestamp(t, 0)) {
            Some(since) => BonusState::Armed { since },
            None => BonusState::Idle,
        }
    }

    pub fn as_timestamp(&self) -> Option<i64> {
        match self {
            BonusState::Armed { since } => Some(since.timestamp()),
            BonusState::Idle => None,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, BonusState::Armed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub account_id:      AccountId,
    pub first_name:      String,
    pub last_name:       String,
    pub email:           String,
    pub phone:           String,
    pub password:        String,
    pub referred_by:     Option<AccountId>,
    pub referrals_count: i64,
    pub balance:         Amount,
    pub bonus_state:     BonusState,
    pub created_at:      DateTime<Utc>,
}

/// Input to registration. Identity fields are required; the referrer is
/// optional and must resolve before the account row exists.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub first_name:  String,
    pub last_name:   String,
    pub email:       String,
    pub phone:       String,
    pub password:    String,
    pub referrer_id: Option<AccountId>,
}
