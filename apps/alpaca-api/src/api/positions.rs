//! Positions endpoints.

use crate::client::AlpacaClient;
use crate::deferred::Deferred;
use crate::domain::Position;
use crate::http::{List, RequestBuilder, Single};

/// `/v1/positions`.
#[derive(Debug, Clone, Copy)]
pub struct PositionsApi<'a> {
    client: &'a AlpacaClient,
}

impl<'a> PositionsApi<'a> {
    pub(crate) const fn new(client: &'a AlpacaClient) -> Self {
        Self { client }
    }

    /// All open positions.
    #[must_use]
    pub fn list(&self) -> Deferred<Vec<Position>> {
        self.client
            .execute::<List<Position>>(RequestBuilder::get("/v1/positions"))
    }

    /// The open position in `symbol`. Resolves to `EntityNotFound` when flat.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Deferred<Position> {
        self.client.execute::<Single<Position>>(
            RequestBuilder::get("/v1/positions/{symbol}").path_param("symbol", symbol),
        )
    }
}
