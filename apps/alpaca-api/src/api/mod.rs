//! Resource endpoints.
//!
//! Each facade borrows an [`AlpacaClient`](crate::AlpacaClient), builds the
//! request for one endpoint and declares the shape it expects back. Every
//! call returns a [`Deferred`](crate::Deferred) immediately.

mod account;
mod assets;
mod clock;
mod orders;
mod positions;

pub use account::AccountApi;
pub use assets::{AssetQuery, AssetsApi};
pub use clock::ClockApi;
pub use orders::{OrderQuery, OrderStatusFilter, OrdersApi, SortDirection};
pub use positions::PositionsApi;
