//! Domain entities and their JSON codec.
//!
//! Entities are immutable snapshots of server-side resources. Closed string
//! fields are enums, so an unrecognized value fails decoding instead of
//! slipping through as free text. Money is always `Decimal`.

mod account;
mod asset;
mod clock;
mod order;
mod order_request;
mod position;
pub mod serde_util;

use thiserror::Error;

pub use account::{Account, AccountStatus};
pub use asset::{Asset, AssetStatus};
pub use clock::Clock;
pub use order::{Order, OrderBuilder, OrderSide, OrderStatus, OrderType, TimeInForce};
pub use order_request::{OrderRequest, OrderRequestBuilder};
pub use position::{Position, PositionSide};

/// Errors raised while building entities or requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A required field was never set.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field required by the chosen order type was never set.
    #[error("{field} is required for {order_type} orders")]
    MissingConditional {
        /// Missing field.
        field: &'static str,
        /// Order type that requires it.
        order_type: OrderType,
    },

    /// A field value is out of range.
    #[error("Invalid value: {0}")]
    Invalid(String),
}
