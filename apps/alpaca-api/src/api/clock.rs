//! Market clock endpoint.

use crate::client::AlpacaClient;
use crate::deferred::Deferred;
use crate::domain::Clock;
use crate::http::{RequestBuilder, Single};

/// `/v1/clock`.
#[derive(Debug, Clone, Copy)]
pub struct ClockApi<'a> {
    client: &'a AlpacaClient,
}

impl<'a> ClockApi<'a> {
    pub(crate) const fn new(client: &'a AlpacaClient) -> Self {
        Self { client }
    }

    /// Fetch the market clock.
    #[must_use]
    pub fn get(&self) -> Deferred<Clock> {
        self.client
            .execute::<Single<Clock>>(RequestBuilder::get("/v1/clock"))
    }
}
