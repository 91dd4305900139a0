//! Assets endpoints.

use crate::client::AlpacaClient;
use crate::deferred::Deferred;
use crate::domain::{Asset, AssetStatus};
use crate::http::{List, QueryParams, RequestBuilder, Single};

/// Filters for listing assets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetQuery {
    /// Listing status.
    pub status: Option<AssetStatus>,
    /// Asset class, e.g. `us_equity`.
    pub asset_class: Option<String>,
}

impl AssetQuery {
    /// Query parameters in wire order.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("status", self.status.map(AssetStatus::as_str))
            .push_opt("asset_class", self.asset_class.as_deref())
    }
}

/// `/v1/assets`.
#[derive(Debug, Clone, Copy)]
pub struct AssetsApi<'a> {
    client: &'a AlpacaClient,
}

impl<'a> AssetsApi<'a> {
    pub(crate) const fn new(client: &'a AlpacaClient) -> Self {
        Self { client }
    }

    /// List assets matching `query`.
    #[must_use]
    pub fn list(&self, query: &AssetQuery) -> Deferred<Vec<Asset>> {
        self.client
            .execute::<List<Asset>>(RequestBuilder::get("/v1/assets").query(query.to_params()))
    }

    /// Fetch an asset by symbol.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Deferred<Asset> {
        self.client.execute::<Single<Asset>>(
            RequestBuilder::get("/v1/assets/{symbol}").path_param("symbol", symbol),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_class_is_not_sent() {
        let query = AssetQuery {
            status: Some(AssetStatus::Active),
            asset_class: Some(String::new()),
        };
        assert_eq!(
            query.to_params().pairs(),
            &[("status".to_string(), "active".to_string())]
        );
    }
}
