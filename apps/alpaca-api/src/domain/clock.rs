//! Market clock.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::serde_util::timestamp;

/// Market clock snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    /// Current server time.
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
    /// Whether the market is open.
    pub is_open: bool,
    /// Next market open.
    #[serde(with = "timestamp")]
    pub next_open: NaiveDateTime,
    /// Next market close.
    #[serde(with = "timestamp")]
    pub next_close: NaiveDateTime,
}
