//! Response resolution.
//!
//! Turns a [`RawResponse`] into the typed outcome of a call. The caller
//! declares the expected success shape up front; the body's own shape is
//! never used to pick between an entity and a list.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use super::transport::RawResponse;
use crate::error::ApiError;

/// Expected shape of a success body.
pub trait ResponseShape: Send + 'static {
    /// Decoded value.
    type Output: Clone + Send + Sync + 'static;

    /// Shape name used in logs and decode errors.
    const NAME: &'static str;

    /// Decode a success body.
    fn decode(body: &[u8]) -> Result<Self::Output, ApiError>;
}

/// A single JSON object.
#[derive(Debug)]
pub struct Single<T>(PhantomData<fn() -> T>);

/// A JSON array of objects, order preserved.
#[derive(Debug)]
pub struct List<T>(PhantomData<fn() -> T>);

/// No value; the body is ignored.
#[derive(Debug)]
pub struct NoContent;

impl<T> ResponseShape for Single<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Output = T;
    const NAME: &'static str = "entity";

    fn decode(body: &[u8]) -> Result<T, ApiError> {
        decode_json(body, Self::NAME)
    }
}

impl<T> ResponseShape for List<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Output = Vec<T>;
    const NAME: &'static str = "list";

    fn decode(body: &[u8]) -> Result<Vec<T>, ApiError> {
        decode_json(body, Self::NAME)
    }
}

impl ResponseShape for NoContent {
    type Output = ();
    const NAME: &'static str = "no content";

    fn decode(_body: &[u8]) -> Result<(), ApiError> {
        Ok(())
    }
}

fn decode_json<T: DeserializeOwned>(body: &[u8], shape: &str) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::Decode(format!("expected {shape}, got empty body")));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(format!("expected {shape}: {e}")))
}

/// Resolve a response into the declared shape or a typed failure.
pub fn resolve<S: ResponseShape>(response: &RawResponse) -> Result<S::Output, ApiError> {
    if response.is_success() {
        return S::decode(&response.body);
    }
    Err(ApiError::from_status(
        response.status,
        diagnostic_text(response),
    ))
}

/// Diagnostic text for a rejected response.
///
/// Preference order: the body's `message` field, a non-JSON text body, the
/// reason phrase.
#[must_use]
pub fn diagnostic_text(response: &RawResponse) -> String {
    let text = String::from_utf8_lossy(&response.body);
    let text = text.trim();

    if !text.is_empty() {
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => {
                if let Some(message) = value
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .filter(|m| !m.is_empty())
                {
                    return message.to_string();
                }
            }
            Err(_) => return text.to_string(),
        }
    }

    response.reason.clone().unwrap_or_default()
}
