//! Tradable asset.

use serde::{Deserialize, Serialize};

/// Asset listing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// Listed.
    Active,
    /// Delisted or otherwise unavailable.
    Inactive,
}

impl AssetStatus {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Asset snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset ID.
    pub id: String,
    /// Asset class, e.g. `us_equity`.
    #[serde(rename = "class", alias = "asset_class")]
    pub asset_class: String,
    /// Primary exchange.
    pub exchange: String,
    /// Symbol.
    pub symbol: String,
    /// Listing status.
    pub status: AssetStatus,
    /// Whether the asset can be traded.
    pub tradable: bool,
    /// Whether the asset can be bought on margin.
    #[serde(default)]
    pub marginable: bool,
    /// Whether the asset can be sold short.
    #[serde(default)]
    pub shortable: bool,
    /// Whether the asset is easy to borrow.
    #[serde(default)]
    pub easy_to_borrow: bool,
}
