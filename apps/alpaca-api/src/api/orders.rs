//! Orders endpoints.

use std::fmt;

use chrono::NaiveDateTime;

use crate::client::AlpacaClient;
use crate::deferred::Deferred;
use crate::domain::serde_util::format_timestamp;
use crate::domain::{Order, OrderRequest};
use crate::http::{List, NoContent, QueryParams, RequestBuilder, Single};

/// Which orders a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatusFilter {
    /// Orders still working.
    Open,
    /// Orders in a terminal state.
    Closed,
    /// Both.
    All,
}

impl OrderStatusFilter {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

impl fmt::Display for OrderStatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction by submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Oldest first.
    Asc,
    /// Newest first.
    Desc,
}

impl SortDirection {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for listing orders. Unset filters are left off the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    status: Option<OrderStatusFilter>,
    limit: Option<u32>,
    after: Option<NaiveDateTime>,
    until: Option<NaiveDateTime>,
    direction: Option<SortDirection>,
}

impl OrderQuery {
    /// No filters; the server applies its defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by status.
    #[must_use]
    pub const fn status(mut self, status: OrderStatusFilter) -> Self {
        self.status = Some(status);
        self
    }

    /// Maximum number of orders.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Only orders submitted after this time.
    #[must_use]
    pub const fn after(mut self, after: NaiveDateTime) -> Self {
        self.after = Some(after);
        self
    }

    /// Only orders submitted until this time.
    #[must_use]
    pub const fn until(mut self, until: NaiveDateTime) -> Self {
        self.until = Some(until);
        self
    }

    /// Sort direction.
    #[must_use]
    pub const fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Query parameters in wire order.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("status", self.status)
            .push_opt("limit", self.limit)
            .push_opt("after", self.after.as_ref().map(format_timestamp))
            .push_opt("until", self.until.as_ref().map(format_timestamp))
            .push_opt("direction", self.direction)
    }
}

/// `/v1/orders`.
#[derive(Debug, Clone, Copy)]
pub struct OrdersApi<'a> {
    client: &'a AlpacaClient,
}

impl<'a> OrdersApi<'a> {
    pub(crate) const fn new(client: &'a AlpacaClient) -> Self {
        Self { client }
    }

    /// List orders matching `query`, in server order.
    #[must_use]
    pub fn list(&self, query: &OrderQuery) -> Deferred<Vec<Order>> {
        self.client
            .execute::<List<Order>>(RequestBuilder::get("/v1/orders").query(query.to_params()))
    }

    /// Fetch an order by its server ID.
    #[must_use]
    pub fn get(&self, order_id: &str) -> Deferred<Order> {
        self.client.execute::<Single<Order>>(
            RequestBuilder::get("/v1/orders/{order_id}").path_param("order_id", order_id),
        )
    }

    /// Fetch an order by the ID the client assigned when placing it.
    #[must_use]
    pub fn get_by_client_order_id(&self, client_order_id: &str) -> Deferred<Order> {
        self.client.execute::<Single<Order>>(
            RequestBuilder::get("/v1/orders:by_client_order_id")
                .query(QueryParams::new().push("client_order_id", client_order_id)),
        )
    }

    /// Place a new order.
    #[must_use]
    pub fn place(&self, request: &OrderRequest) -> Deferred<Order> {
        tracing::info!(
            symbol = %request.symbol(),
            side = %request.side(),
            order_type = %request.order_type(),
            qty = request.qty(),
            "Placing order"
        );
        self.client
            .execute::<Single<Order>>(RequestBuilder::post("/v1/orders").json_body(request))
    }

    /// Cancel an open order.
    ///
    /// Resolves to `Unprocessable` when the order can no longer be canceled.
    #[must_use]
    pub fn cancel(&self, order_id: &str) -> Deferred<()> {
        tracing::info!(order_id, "Canceling order");
        self.client.execute::<NoContent>(
            RequestBuilder::delete("/v1/orders/{order_id}").path_param("order_id", order_id),
        )
    }
}
