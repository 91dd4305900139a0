//! Request body for placing a new order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BuildError;
use super::order::{OrderSide, OrderType, TimeInForce};
use super::serde_util::quantity;

/// A validated intent to place an order.
///
/// Only obtainable through [`OrderRequestBuilder::build`], so a limit or stop
/// order without its price cannot exist. Deserialization goes through the
/// same validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOrderRequest")]
pub struct OrderRequest {
    symbol: String,
    #[serde(with = "quantity")]
    qty: u64,
    side: OrderSide,
    #[serde(rename = "type")]
    order_type: OrderType,
    time_in_force: TimeInForce,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stop_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    client_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extended_hours: Option<bool>,
}

impl OrderRequest {
    /// Start building a request.
    #[must_use]
    pub fn builder() -> OrderRequestBuilder {
        OrderRequestBuilder::default()
    }

    /// Market order with `day` time in force.
    pub fn market(symbol: impl Into<String>, side: OrderSide, qty: u64) -> Result<Self, BuildError> {
        Self::builder()
            .symbol(symbol)
            .qty(qty)
            .side(side)
            .order_type(OrderType::Market)
            .time_in_force(TimeInForce::Day)
            .build()
    }

    /// Limit order with `day` time in force.
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        qty: u64,
        limit_price: Decimal,
    ) -> Result<Self, BuildError> {
        Self::builder()
            .symbol(symbol)
            .qty(qty)
            .side(side)
            .order_type(OrderType::Limit)
            .time_in_force(TimeInForce::Day)
            .limit_price(limit_price)
            .build()
    }

    /// Symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Quantity.
    #[must_use]
    pub const fn qty(&self) -> u64 {
        self.qty
    }

    /// Side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
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

    /// Client-assigned order ID.
    #[must_use]
    pub fn client_order_id(&self) -> Option<&str> {
        self.client_order_id.as_deref()
    }

    /// Extended hours eligibility.
    #[must_use]
    pub const fn extended_hours(&self) -> Option<bool> {
        self.extended_hours
    }
}

/// Unvalidated wire form, only used to feed the builder on decode.
#[derive(Deserialize)]
struct RawOrderRequest {
    symbol: String,
    #[serde(with = "quantity")]
    qty: u64,
    side: OrderSide,
    #[serde(rename = "type")]
    order_type: OrderType,
    time_in_force: TimeInForce,
    #[serde(default)]
    limit_price: Option<Decimal>,
    #[serde(default)]
    stop_price: Option<Decimal>,
    #[serde(default)]
    client_order_id: Option<String>,
    #[serde(default)]
    extended_hours: Option<bool>,
}

impl TryFrom<RawOrderRequest> for OrderRequest {
    type Error = BuildError;

    fn try_from(raw: RawOrderRequest) -> Result<Self, BuildError> {
        let mut builder = Self::builder()
            .symbol(raw.symbol)
            .qty(raw.qty)
            .side(raw.side)
            .order_type(raw.order_type)
            .time_in_force(raw.time_in_force);
        if let Some(price) = raw.limit_price {
            builder = builder.limit_price(price);
        }
        if let Some(price) = raw.stop_price {
            builder = builder.stop_price(price);
        }
        if let Some(id) = raw.client_order_id {
            builder = builder.client_order_id(id);
        }
        if let Some(enabled) = raw.extended_hours {
            builder = builder.extended_hours(enabled);
        }
        builder.build()
    }
}

/// Builder for [`OrderRequest`].
#[derive(Debug, Clone, Default)]
pub struct OrderRequestBuilder {
    symbol: Option<String>,
    qty: Option<u64>,
    side: Option<OrderSide>,
    order_type: Option<OrderType>,
    time_in_force: Option<TimeInForce>,
    limit_price: Option<Decimal>,
    stop_price: Option<Decimal>,
    client_order_id: Option<String>,
    extended_hours: Option<bool>,
}

impl OrderRequestBuilder {
    /// Set the symbol.
    #[must_use]
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Set the quantity.
    #[must_use]
    pub const fn qty(mut self, qty: u64) -> Self {
        self.qty = Some(qty);
        self
    }

    /// Set the side.
    #[must_use]
    pub const fn side(mut self, side: OrderSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Set the order type.
    #[must_use]
    pub const fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    /// Set the time in force.
    #[must_use]
    pub const fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    /// Set the limit price.
    #[must_use]
    pub const fn limit_price(mut self, price: Decimal) -> Self {
        self.limit_price = Some(price);
        self
    }

    /// Set the stop price.
    #[must_use]
    pub const fn stop_price(mut self, price: Decimal) -> Self {
        self.stop_price = Some(price);
        self
    }

    /// Set the client-assigned order ID.
    #[must_use]
    pub fn client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    /// Allow execution during extended hours.
    #[must_use]
    pub const fn extended_hours(mut self, enabled: bool) -> Self {
        self.extended_hours = Some(enabled);
        self
    }

    /// Validate and build the request.
    pub fn build(self) -> Result<OrderRequest, BuildError> {
        let symbol = self.symbol.ok_or(BuildError::MissingField("symbol"))?;
        if symbol.trim().is_empty() {
            return Err(BuildError::Invalid("symbol must not be empty".to_string()));
        }
        let qty = self.qty.ok_or(BuildError::MissingField("qty"))?;
        if qty == 0 {
            return Err(BuildError::Invalid("qty must be positive".to_string()));
        }
        let side = self.side.ok_or(BuildError::MissingField("side"))?;
        let order_type = self.order_type.ok_or(BuildError::MissingField("type"))?;
        let time_in_force = self
            .time_in_force
            .ok_or(BuildError::MissingField("time_in_force"))?;

        if order_type.requires_limit_price() && self.limit_price.is_none() {
            return Err(BuildError::MissingConditional {
                field: "limit_price",
                order_type,
            });
        }
        if order_type.requires_stop_price() && self.stop_price.is_none() {
            return Err(BuildError::MissingConditional {
                field: "stop_price",
                order_type,
            });
        }

        Ok(OrderRequest {
            symbol,
            qty,
            side,
            order_type,
            time_in_force,
            limit_price: self.limit_price,
            stop_price: self.stop_price,
            client_order_id: self.client_order_id,
            extended_hours: self.extended_hours,
        })
    }
}
