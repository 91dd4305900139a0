//! Open position.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_util::quantity;

/// Position direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSide {
    /// Long.
    Long,
    /// Short.
    Short,
}

/// Position snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Asset ID.
    pub asset_id: String,
    /// Symbol.
    pub symbol: String,
    /// Exchange.
    pub exchange: String,
    /// Asset class.
    pub asset_class: String,
    /// Average entry price.
    pub avg_entry_price: Decimal,
    /// Number of shares; negative for short positions.
    #[serde(with = "quantity")]
    pub qty: i64,
    /// Direction.
    pub side: PositionSide,
    /// Total market value.
    pub market_value: Decimal,
    /// Total cost basis.
    pub cost_basis: Decimal,
    /// Unrealized profit/loss.
    pub unrealized_pl: Decimal,
    /// Unrealized profit/loss percent.
    pub unrealized_plpc: Decimal,
    /// Unrealized profit/loss for the day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrealized_intraday_pl: Option<Decimal>,
    /// Unrealized profit/loss percent for the day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrealized_intraday_plpc: Option<Decimal>,
    /// Current asset price.
    pub current_price: Decimal,
    /// Previous close.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastday_price: Option<Decimal>,
    /// Percent change since previous close.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_today: Option<Decimal>,
}
