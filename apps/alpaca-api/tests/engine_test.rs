//! Dispatch and resolution behavior of the client engine.

// Allow unwrap in tests - tests should panic on unexpected errors
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use alpaca_api::{
    AlpacaClient, ApiError, ApiRequest, ClientConfig, Clock, Environment, NoContent, RawResponse,
    RequestBuilder, ReqwestTransport, Single, Transport,
};

fn config(base_url: &str) -> ClientConfig {
    ClientConfig::new("key", "secret", Environment::Paper).with_trading_base_url(base_url)
}

fn clock_json() -> serde_json::Value {
    json!({
        "timestamp": "2024-01-02T14:30:00",
        "is_open": true,
        "next_open": "2024-01-03T14:30:00",
        "next_close": "2024-01-02T21:00:00"
    })
}

/// Counts dispatches before delegating to the real transport.
#[derive(Debug)]
struct CountingTransport {
    inner: ReqwestTransport,
    calls: AtomicUsize,
}

#[async_trait]
impl Transport for CountingTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(request).await
    }
}

#[tokio::test]
async fn repeated_wait_returns_same_outcome_without_redispatch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/clock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clock_json()))
        .expect(1)
        .mount(&server)
        .await;

    let transport = Arc::new(CountingTransport {
        inner: ReqwestTransport::new(Duration::from_secs(5)).unwrap(),
        calls: AtomicUsize::new(0),
    });
    let client = AlpacaClient::with_transport(
        &config(&server.uri()),
        transport.clone(),
        tokio::runtime::Handle::current(),
    );

    let deferred = client.clock().get();
    let first = deferred.wait().await.unwrap();
    let second = deferred.wait().await.unwrap();
    let from_clone = deferred.clone().wait().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first, from_clone);
    assert!(first.is_open);
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failures_are_memoized_too() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let client = AlpacaClient::new(&config(&server.uri())).unwrap();
    let deferred = client.account().get();

    let first = deferred.wait().await.unwrap_err();
    let second = deferred.wait().await.unwrap_err();
    assert_eq!(first, second);
    assert_eq!(
        first,
        ApiError::Api {
            status: 403,
            message: "forbidden".to_string()
        }
    );
}

#[tokio::test]
async fn dispatch_happens_before_wait() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/clock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clock_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = AlpacaClient::new(&config(&server.uri())).unwrap();
    let deferred = client.clock().get();

    // Never waited on, yet the request reaches the server.
    for _ in 0..100 {
        if deferred.is_resolved() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(deferred.try_get().is_some());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_resolve_independently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/orders/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/clock"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(clock_json())
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let client = AlpacaClient::new(&config(&server.uri())).unwrap();

    let clocks: Vec<_> = (0..8).map(|_| client.clock().get()).collect();
    let missing: Vec<_> = (0..8).map(|_| client.orders().get("missing")).collect();

    for deferred in &missing {
        assert!(matches!(
            deferred.wait().await,
            Err(ApiError::EntityNotFound { .. })
        ));
    }
    for deferred in &clocks {
        assert!(deferred.wait().await.is_ok());
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 16);
}

#[tokio::test]
async fn malformed_success_body_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/clock"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = AlpacaClient::new(&config(&server.uri())).unwrap();
    assert!(matches!(
        client.clock().get().wait().await,
        Err(ApiError::Decode(_))
    ));
    assert!(matches!(
        client.account().get().wait().await,
        Err(ApiError::Decode(_))
    ));
}

#[tokio::test]
async fn unknown_enum_value_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/assets/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "class": "us_equity",
            "exchange": "NASDAQ",
            "symbol": "AAPL",
            "status": "halted",
            "tradable": true
        })))
        .mount(&server)
        .await;

    let client = AlpacaClient::new(&config(&server.uri())).unwrap();
    assert!(matches!(
        client.assets().get("AAPL").wait().await,
        Err(ApiError::Decode(_))
    ));
}

#[tokio::test]
async fn server_error_keeps_status_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/orders/abc"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"message": "service unavailable"})),
        )
        .mount(&server)
        .await;

    let client = AlpacaClient::new(&config(&server.uri())).unwrap();
    assert_eq!(
        client.orders().cancel("abc").wait().await,
        Err(ApiError::Api {
            status: 503,
            message: "service unavailable".to_string()
        })
    );
}

#[tokio::test]
async fn connection_refused_is_transport_failure() {
    // Bind then drop to get a port with nothing listening.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let client = AlpacaClient::new(&config(&format!("http://127.0.0.1:{port}"))).unwrap();
    let outcome = client
        .execute::<NoContent>(RequestBuilder::delete("/v1/orders/abc"))
        .wait()
        .await;
    assert!(matches!(outcome, Err(ApiError::Transport(_))));
}

#[test]
fn blocking_wait_from_plain_thread() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap();

    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/clock"))
            .respond_with(ResponseTemplate::new(200).set_body_json(clock_json()))
            .expect(1)
            .mount(&server)
            .await;
        server
    });

    let client =
        AlpacaClient::with_runtime(&config(&server.uri()), runtime.handle().clone()).unwrap();

    let deferred = client.execute::<Single<Clock>>(RequestBuilder::get("/v1/clock"));
    let first = deferred.wait_blocking().expect("clock resolves");
    let second = deferred.wait_blocking().expect("clock resolves");
    assert_eq!(first, second);

    runtime.block_on(async move { drop(server) });
}
