//! Trading account.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_util::timestamp;

/// Account lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Application in progress.
    Onboarding,
    /// Application submission failed.
    SubmissionFailed,
    /// Application submitted.
    Submitted,
    /// Account information updated, pending review.
    AccountUpdated,
    /// Awaiting approval.
    ApprovalPending,
    /// Active and able to trade.
    Active,
    /// Application rejected.
    Rejected,
}

/// Account snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: String,
    /// Lifecycle status.
    pub status: AccountStatus,
    /// Account currency.
    pub currency: String,
    /// Buying power.
    pub buying_power: Decimal,
    /// Cash balance.
    pub cash: Decimal,
    /// Total value of cash and holdings.
    pub portfolio_value: Decimal,
    /// Flagged as pattern day trader.
    pub pattern_day_trader: bool,
    /// Trading is blocked.
    pub trading_blocked: bool,
    /// Transfers are blocked.
    pub transfers_blocked: bool,
    /// Account is blocked entirely.
    pub account_blocked: bool,
    /// Creation time.
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

impl Account {
    /// Whether orders can currently be placed from this account.
    #[must_use]
    pub const fn can_trade(&self) -> bool {
        matches!(self.status, AccountStatus::Active) && !self.trading_blocked && !self.account_blocked
    }
}
