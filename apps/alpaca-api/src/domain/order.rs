//! Order entity and its closed enumerations.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BuildError;
use super::serde_util::{quantity, timestamp, timestamp_option};

// ============================================================================
// Enumerations
// ============================================================================

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    /// Buy.
    Buy,
    /// Sell.
    Sell,
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Market order.
    Market,
    /// Limit order.
    Limit,
    /// Stop order.
    Stop,
    /// Stop-limit order.
    StopLimit,
}

impl OrderType {
    /// Whether orders of this type must carry a limit price.
    #[must_use]
    pub const fn requires_limit_price(self) -> bool {
        matches!(self, Self::Limit | Self::StopLimit)
    }

    /// Whether orders of this type must carry a stop price.
    #[must_use]
    pub const fn requires_stop_price(self) -> bool {
        matches!(self, Self::Stop | Self::StopLimit)
    }
}

/// Time in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeInForce {
    /// Good for the trading day.
    Day,
    /// Good until canceled.
    Gtc,
    /// Market/limit on open.
    Opg,
    /// Market/limit on close.
    Cls,
    /// Immediate or cancel.
    Ioc,
    /// Fill or kill.
    Fok,
}

/// Order status as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Received and routed.
    New,
    /// Partially filled.
    PartiallyFilled,
    /// Completely filled.
    Filled,
    /// Done for the day, no further updates until the next day.
    DoneForDay,
    /// Canceled.
    Canceled,
    /// Expired.
    Expired,
    /// Replaced by another order.
    Replaced,
    /// Received but not yet routed.
    Accepted,
    /// Received but not yet accepted for execution.
    PendingNew,
    /// Received and accepted for bidding.
    AcceptedForBidding,
    /// Cancel requested, not yet confirmed.
    PendingCancel,
    /// Replace requested, not yet confirmed.
    PendingReplace,
    /// Stopped, a trade is guaranteed.
    Stopped,
    /// Rejected.
    Rejected,
    /// Suspended, not eligible for trading.
    Suspended,
    /// Completed for the day, settlement calculations pending.
    Calculated,
}

impl OrderStatus {
    /// Whether no further fills can happen.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Filled | Self::Canceled | Self::Expired | Self::Replaced | Self::Rejected
        )
    }
}

macro_rules! wire_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    match serde_json::to_value(self) {
                        Ok(serde_json::Value::String(s)) => f.write_str(&s),
                        _ => write!(f, "{self:?}"),
                    }
                }
            }
        )+
    };
}

wire_display!(OrderSide, OrderType, TimeInForce, OrderStatus);

// ============================================================================
// Order
// ============================================================================

/// Snapshot of an order as known by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: String,
    client_order_id: String,
    #[serde(with = "timestamp")]
    created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    updated_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    submitted_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp_option")]
    filled_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp_option")]
    expired_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp_option")]
    canceled_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp_option")]
    failed_at: Option<NaiveDateTime>,
    asset_id: String,
    symbol: String,
    asset_class: String,
    #[serde(with = "quantity")]
    qty: u64,
    #[serde(with = "quantity")]
    filled_qty: u64,
    #[serde(rename = "type")]
    order_type: OrderType,
    side: OrderSide,
    time_in_force: TimeInForce,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stop_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filled_avg_price: Option<Decimal>,
    status: OrderStatus,
}

impl Order {
    /// Start building an order.
    #[must_use]
    pub fn builder() -> OrderBuilder {
        OrderBuilder::default()
    }

    /// Server-assigned order ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Client-assigned order ID.
    #[must_use]
    pub fn client_order_id(&self) -> &str {
        &self.client_order_id
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Last update time.
    #[must_use]
    pub const fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Submission time.
    #[must_use]
    pub const fn submitted_at(&self) -> NaiveDateTime {
        self.submitted_at
    }

    /// Fill time, if filled.
    #[must_use]
    pub const fn filled_at(&self) -> Option<NaiveDateTime> {
        self.filled_at
    }

    /// Expiry time, if expired.
    #[must_use]
    pub const fn expired_at(&self) -> Option<NaiveDateTime> {
        self.expired_at
    }

    /// Cancel time, if canceled.
    #[must_use]
    pub const fn canceled_at(&self) -> Option<NaiveDateTime> {
        self.canceled_at
    }

    /// Failure time, if failed.
    #[must_use]
    pub const fn failed_at(&self) -> Option<NaiveDateTime> {
        self.failed_at
    }

    /// Asset ID.
    #[must_use]
    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    /// Symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Asset class.
    #[must_use]
    pub fn asset_class(&self) -> &str {
        &self.asset_class
    }

    /// Ordered quantity.
    #[must_use]
    pub const fn qty(&self) -> u64 {
        self.qty
    }

    /// Filled quantity.
    #[must_use]
    pub const fn filled_qty(&self) -> u64 {
        self.filled_qty
    }

    /// Order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Order side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Time in force.
    #[must_use]
    pub const fn time_in_force(&self) -> TimeInForce {
        self.time_in_force
    }

    /// Limit price.
    #[must_use]
    pub const fn limit_price(&self) -> Option<Decimal> {
        self.limit_price
    }

    /// Stop price.
    #[must_use]
    pub const fn stop_price(&self) -> Option<Decimal> {
        self.stop_price
    }

    /// Average fill price.
    #[must_use]
    pub const fn filled_avg_price(&self) -> Option<Decimal> {
        self.filled_avg_price
    }

    /// Order status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }
}

/// Builder for [`Order`]. `build` fails if a required field was never set.
#[derive(Debug, Clone, Default)]
pub struct OrderBuilder {
    id: Option<String>,
    client_order_id: Option<String>,
    created_at: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
    submitted_at: Option<NaiveDateTime>,
    filled_at: Option<NaiveDateTime>,
    expired_at: Option<NaiveDateTime>,
    canceled_at: Option<NaiveDateTime>,
    failed_at: Option<NaiveDateTime>,
    asset_id: Option<String>,
    symbol: Option<String>,
    asset_class: Option<String>,
    qty: Option<u64>,
    filled_qty: Option<u64>,
    order_type: Option<OrderType>,
    side: Option<OrderSide>,
    time_in_force: Option<TimeInForce>,
    limit_price: Option<Decimal>,
    stop_price: Option<Decimal>,
    filled_avg_price: Option<Decimal>,
    status: Option<OrderStatus>,
}

macro_rules! setters {
    ($($field:ident: $ty:ty),+ $(,)?) => {
        $(
            #[doc = concat!("Set `", stringify!($field), "`.")]
            #[must_use]
            pub fn $field(mut self, value: $ty) -> Self {
                self.$field = Some(value);
                self
            }
        )+
    };
}

impl OrderBuilder {
    setters! {
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
        submitted_at: NaiveDateTime,
        filled_at: NaiveDateTime,
        expired_at: NaiveDateTime,
        canceled_at: NaiveDateTime,
        failed_at: NaiveDateTime,
        qty: u64,
        filled_qty: u64,
        order_type: OrderType,
        side: OrderSide,
        time_in_force: TimeInForce,
        limit_price: Decimal,
        stop_price: Decimal,
        filled_avg_price: Decimal,
        status: OrderStatus,
    }

    /// Set the server-assigned ID.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the client-assigned ID.
    #[must_use]
    pub fn client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    /// Set the asset ID.
    #[must_use]
    pub fn asset_id(mut self, id: impl Into<String>) -> Self {
        self.asset_id = Some(id.into());
        self
    }

    /// Set the symbol.
    #[must_use]
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Set the asset class.
    #[must_use]
    pub fn asset_class(mut self, class: impl Into<String>) -> Self {
        self.asset_class = Some(class.into());
        self
    }

    /// Build the order.
    pub fn build(self) -> Result<Order, BuildError> {
        Ok(Order {
            id: self.id.ok_or(BuildError::MissingField("id"))?,
            client_order_id: self
                .client_order_id
                .ok_or(BuildError::MissingField("client_order_id"))?,
            created_at: self
                .created_at
                .ok_or(BuildError::MissingField("created_at"))?,
            updated_at: self
                .updated_at
                .ok_or(BuildError::MissingField("updated_at"))?,
            submitted_at: self
                .submitted_at
                .ok_or(BuildError::MissingField("submitted_at"))?,
            filled_at: self.filled_at,
            expired_at: self.expired_at,
            canceled_at: self.canceled_at,
            failed_at: self.failed_at,
            asset_id: self.asset_id.ok_or(BuildError::MissingField("asset_id"))?,
            symbol: self.symbol.ok_or(BuildError::MissingField("symbol"))?,
            asset_class: self
                .asset_class
                .ok_or(BuildError::MissingField("asset_class"))?,
            qty: self.qty.ok_or(BuildError::MissingField("qty"))?,
            filled_qty: self
                .filled_qty
                .ok_or(BuildError::MissingField("filled_qty"))?,
            order_type: self.order_type.ok_or(BuildError::MissingField("type"))?,
            side: self.side.ok_or(BuildError::MissingField("side"))?,
            time_in_force: self
                .time_in_force
                .ok_or(BuildError::MissingField("time_in_force"))?,
            limit_price: self.limit_price,
            stop_price: self.stop_price,
            filled_avg_price: self.filled_avg_price,
            status: self.status.ok_or(BuildError::MissingField("status"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn order_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2008, 7, 9)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    fn filled_order() -> Order {
        Order::builder()
            .id("904837e3-3b76-47ec-b432-046db621571b")
            .client_order_id("904837e3-3b76-47ec-b432-046db621571c")
            .created_at(order_date())
            .updated_at(order_date())
            .submitted_at(order_date())
            .filled_at(order_date())
            .asset_id("b0b6dd9d-8b9b-48a9-ba46-b9d54906e415")
            .symbol("AAPL")
            .asset_class("us_equity")
            .qty(1)
            .filled_qty(1)
            .order_type(OrderType::Limit)
            .side(OrderSide::Buy)
            .time_in_force(TimeInForce::Day)
            .limit_price(dec!(107.00))
            .filled_avg_price(dec!(106.25))
            .status(OrderStatus::Filled)
            .build()
            .unwrap()
    }

    #[test]
    fn build_requires_id() {
        let err = Order::builder().build().unwrap_err();
        assert_eq!(err, BuildError::MissingField("id"));
    }

    #[test]
    fn build_reports_first_missing_field() {
        let err = Order::builder()
            .id("1")
            .client_order_id("2")
            .created_at(order_date())
            .updated_at(order_date())
            .submitted_at(order_date())
            .asset_id("3")
            .symbol("AAPL")
            .asset_class("us_equity")
            .qty(1)
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::MissingField("filled_qty"));
    }

    #[test]
    fn encodes_wire_names() {
        let json = serde_json::to_value(filled_order()).unwrap();
        assert_eq!(json["type"], "limit");
        assert_eq!(json["side"], "buy");
        assert_eq!(json["time_in_force"], "day");
        assert_eq!(json["status"], "filled");
        assert_eq!(json["limit_price"], "107.00");
        assert_eq!(json["created_at"], "2008-07-09T12:30:00");
    }

    #[test]
    fn omits_absent_optionals() {
        let json = serde_json::to_value(filled_order()).unwrap();
        assert!(json.get("stop_price").is_none());
        assert!(json.get("canceled_at").is_none());
        assert!(json.get("expired_at").is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let order = filled_order();
        let json = serde_json::to_string(&order).unwrap();
        let decoded: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, order);
    }

    #[test]
    fn decodes_server_style_strings() {
        let json = r#"{
            "id": "61e69015-8549-4bfd-b9c3-01e75843f47d",
            "client_order_id": "eb9e2aaa-f71a-4f51-b5b4-52a6c565dad4",
            "created_at": "2018-10-05T05:48:59Z",
            "updated_at": "2018-10-05T05:48:59Z",
            "submitted_at": "2018-10-05T05:48:59Z",
            "filled_at": null,
            "asset_id": "904837e3-3b76-47ec-b432-046db621571b",
            "symbol": "AAPL",
            "asset_class": "us_equity",
            "qty": "15",
            "filled_qty": "0",
            "type": "market",
            "side": "buy",
            "time_in_force": "day",
            "limit_price": "107.00",
            "stop_price": "106.00",
            "filled_avg_price": "106.00",
            "status": "accepted"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.qty(), 15);
        assert_eq!(order.filled_at(), None);
        assert_eq!(order.limit_price(), Some(dec!(107.00)));
        assert_eq!(order.status(), OrderStatus::Accepted);
    }

    #[test]
    fn unknown_enum_value_fails_decode() {
        let mut json = serde_json::to_value(filled_order()).unwrap();
        json["side"] = serde_json::Value::String("BUY".to_string());
        assert!(serde_json::from_value::<Order>(json).is_err());
    }

    #[test]
    fn display_uses_wire_names() {
        assert_eq!(OrderType::StopLimit.to_string(), "stop_limit");
        assert_eq!(OrderStatus::PartiallyFilled.to_string(), "partially_filled");
        assert_eq!(TimeInForce::Gtc.to_string(), "gtc");
    }

    #[test]
    fn conditional_price_requirements() {
        assert!(OrderType::StopLimit.requires_limit_price());
        assert!(OrderType::StopLimit.requires_stop_price());
        assert!(OrderType::Limit.requires_limit_price());
        assert!(!OrderType::Limit.requires_stop_price());
        assert!(!OrderType::Market.requires_limit_price());
    }
}
