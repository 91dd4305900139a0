//! Account endpoint.

use crate::client::AlpacaClient;
use crate::deferred::Deferred;
use crate::domain::Account;
use crate::http::{RequestBuilder, Single};

/// `/v1/account`.
#[derive(Debug, Clone, Copy)]
pub struct AccountApi<'a> {
    client: &'a AlpacaClient,
}

impl<'a> AccountApi<'a> {
    pub(crate) const fn new(client: &'a AlpacaClient) -> Self {
        Self { client }
    }

    /// Fetch the account.
    #[must_use]
    pub fn get(&self) -> Deferred<Account> {
        self.client
            .execute::<Single<Account>>(RequestBuilder::get("/v1/account"))
    }
}
