// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::items_after_statements
    )
)]

//! Alpaca API - async trading REST client
//!
//! Translates typed calls into authenticated HTTP requests, dispatches them
//! on a tokio runtime without blocking the caller, and resolves each HTTP
//! outcome into a typed entity or one of a closed set of failures.
//!
//! # Flow
//!
//! caller → [`RequestBuilder`] → [`Transport`] → [`resolve`] → [`Deferred`] → caller
//!
//! - **http**: request building, the transport seam, response resolution
//! - **deferred**: single-assignment result handle with memoized `wait`
//! - **domain**: orders, assets, positions, account, clock and their codec
//! - **api**: one facade per resource, reached from [`AlpacaClient`]
//! - **error**: status-to-failure taxonomy
//!
//! # Usage
//!
//! ```rust,ignore
//! use alpaca_api::{AlpacaClient, ClientConfig, OrderQuery, OrderStatusFilter};
//!
//! let client = AlpacaClient::new(&ClientConfig::from_env()?)?;
//! let open = client
//!     .orders()
//!     .list(&OrderQuery::new().status(OrderStatusFilter::Open))
//!     .wait()
//!     .await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod api;
pub mod client;
pub mod config;
pub mod deferred;
pub mod domain;
pub mod error;
pub mod http;
pub mod observability;

pub use api::{
    AccountApi, AssetQuery, AssetsApi, ClockApi, OrderQuery, OrderStatusFilter, OrdersApi,
    PositionsApi, SortDirection,
};
pub use client::AlpacaClient;
pub use config::{ClientConfig, ConfigError, Credentials, Environment, LoggingConfig, load_config};
pub use deferred::{AlreadyResolved, Completer, Deferred, Outcome};
pub use domain::{
    Account, AccountStatus, Asset, AssetStatus, BuildError, Clock, Order, OrderBuilder, OrderRequest,
    OrderRequestBuilder, OrderSide, OrderStatus, OrderType, Position, PositionSide, TimeInForce,
};
pub use error::{ApiError, FailureKind};
pub use http::{
    ApiRequest, HttpMethod, List, NoContent, QueryParams, RawResponse, RequestBuilder,
    ReqwestTransport, ResponseShape, Single, Transport, resolve,
};
pub use observability::{LoggingError, init_logging};
