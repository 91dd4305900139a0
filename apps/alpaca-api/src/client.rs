//! Request execution engine.
//!
//! `AlpacaClient` owns immutable credentials, the base URL and a shared
//! transport. `execute` builds the request, spawns the transport call on the
//! client's tokio runtime and returns a [`Deferred`] right away. The spawned
//! task resolves the response and completes the deferred result.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::api::{AccountApi, AssetsApi, ClockApi, OrdersApi, PositionsApi};
use crate::config::{ClientConfig, Credentials};
use crate::deferred::{self, Deferred, Outcome};
use crate::error::ApiError;
use crate::http::{ApiRequest, RequestBuilder, ResponseShape, ReqwestTransport, Transport, resolve};

/// Client for the trading API.
///
/// Cheap to clone and safe to share between tasks; calls never share
/// mutable state.
#[derive(Debug, Clone)]
pub struct AlpacaClient {
    credentials: Arc<Credentials>,
    base_url: Arc<str>,
    transport: Arc<dyn Transport>,
    runtime: Handle,
}

impl AlpacaClient {
    /// Create a client using the reqwest transport and the current runtime.
    ///
    /// Must be called from within a tokio runtime; use [`Self::with_runtime`]
    /// otherwise.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let runtime = Handle::try_current()
            .map_err(|e| ApiError::Dispatch(format!("no tokio runtime available: {e}")))?;
        Self::with_runtime(config, runtime)
    }

    /// Create a client that dispatches on the given runtime.
    pub fn with_runtime(config: &ClientConfig, runtime: Handle) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport), runtime))
    }

    /// Create a client with a custom transport.
    #[must_use]
    pub fn with_transport(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        runtime: Handle,
    ) -> Self {
        if config.environment.is_live() {
            tracing::warn!(
                base_url = %config.trading_base_url,
                "Client configured for LIVE trading"
            );
        }

        Self {
            credentials: Arc::new(config.credentials.clone()),
            base_url: Arc::from(config.trading_base_url.trim_end_matches('/')),
            transport,
            runtime,
        }
    }

    /// Trading API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Dispatch a request and return its deferred result.
    ///
    /// A request that fails to build resolves immediately without reaching
    /// the transport.
    pub fn execute<S: ResponseShape>(&self, request: RequestBuilder) -> Deferred<S::Output> {
        let request = match request.build(&self.base_url, &self.credentials) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(error = %err, "Request rejected before dispatch");
                return Deferred::resolved(Err(err));
            }
        };

        let (completer, deferred) = deferred::channel();
        let transport = Arc::clone(&self.transport);

        tracing::debug!(
            method = %request.method(),
            path = %request.path(),
            shape = S::NAME,
            "Dispatching request"
        );

        self.runtime.spawn(async move {
            let outcome = dispatch::<S>(transport.as_ref(), request).await;
            // The completer is owned by this task alone.
            let _ = completer.complete(outcome);
        });

        deferred
    }

    /// Orders endpoints.
    #[must_use]
    pub const fn orders(&self) -> OrdersApi<'_> {
        OrdersApi::new(self)
    }

    /// Assets endpoints.
    #[must_use]
    pub const fn assets(&self) -> AssetsApi<'_> {
        AssetsApi::new(self)
    }

    /// Positions endpoints.
    #[must_use]
    pub const fn positions(&self) -> PositionsApi<'_> {
        PositionsApi::new(self)
    }

    /// Account endpoint.
    #[must_use]
    pub const fn account(&self) -> AccountApi<'_> {
        AccountApi::new(self)
    }

    /// Market clock endpoint.
    #[must_use]
    pub const fn clock(&self) -> ClockApi<'_> {
        ClockApi::new(self)
    }
}

/// Send one request and resolve its response.
async fn dispatch<S: ResponseShape>(
    transport: &dyn Transport,
    request: ApiRequest,
) -> Outcome<S::Output> {
    let method = request.method();
    let path = request.path().to_string();

    let response = match transport.execute(request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(%method, %path, error = %err, "Transport failure");
            return Err(err);
        }
    };

    tracing::debug!(%method, %path, status = response.status, "Response received");

    let outcome = resolve::<S>(&response);
    if let Err(err) = &outcome {
        tracing::warn!(%method, %path, status = response.status, error = %err, "Request failed");
    }
    outcome
}
