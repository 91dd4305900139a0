//! Request construction.
//!
//! `RequestBuilder` turns a method, a path template, path parameters, query
//! parameters and an optional body into an [`ApiRequest`]. Nothing here
//! touches the network.

use std::fmt;

use serde::Serialize;

use crate::config::Credentials;
use crate::error::ApiError;

/// Header carrying the API key ID.
pub const KEY_ID_HEADER: &str = "APCA-API-KEY-ID";
/// Header carrying the API secret key.
pub const SECRET_KEY_HEADER: &str = "APCA-API-SECRET-KEY";
/// Content type header name.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
/// JSON media type.
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PATCH.
    Patch,
    /// DELETE.
    Delete,
}

impl HttpMethod {
    /// Method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered query parameters.
///
/// Pairs keep insertion order. `push_opt` skips absent values and empty
/// strings so unset filters never reach the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a parameter.
    #[must_use]
    pub fn push(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.pairs.push((name.to_string(), value.to_string()));
        self
    }

    /// Append a parameter when a non-empty value is present.
    #[must_use]
    pub fn push_opt<V: fmt::Display>(self, name: &str, value: Option<V>) -> Self {
        match value.map(|v| v.to_string()) {
            Some(v) if !v.is_empty() => self.push(name, v),
            _ => self,
        }
    }

    /// Whether no parameters were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Parameters in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Value of the first parameter with this name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Percent-encoded `name=value&...` string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// A transport-ready request.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
    method: HttpMethod,
    base_url: String,
    path: String,
    query: QueryParams,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl ApiRequest {
    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Escaped path, without base URL or query.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters.
    #[must_use]
    pub const fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Headers in send order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Value of the first header with this name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Serialized JSON body.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Full URL including the encoded query string.
    #[must_use]
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            format!("{}{}", self.base_url, self.path)
        } else {
            format!(
                "{}{}?{}",
                self.base_url,
                self.path,
                self.query.to_query_string()
            )
        }
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Header values hold credentials.
        let header_names: Vec<&str> = self.headers.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url())
            .field("headers", &header_names)
            .field("body", &self.body)
            .finish()
    }
}

/// Builder for [`ApiRequest`].
///
/// Path templates name their parameters in braces, e.g.
/// `/v1/orders/{order_id}`; each one must be filled with `path_param`.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: HttpMethod,
    path: String,
    query: QueryParams,
    body: Option<Result<String, String>>,
}

impl RequestBuilder {
    /// Start a request for `method` on `template`.
    #[must_use]
    pub fn new(method: HttpMethod, template: &str) -> Self {
        Self {
            method,
            path: template.to_string(),
            query: QueryParams::new(),
            body: None,
        }
    }

    /// GET request.
    #[must_use]
    pub fn get(template: &str) -> Self {
        Self::new(HttpMethod::Get, template)
    }

    /// POST request.
    #[must_use]
    pub fn post(template: &str) -> Self {
        Self::new(HttpMethod::Post, template)
    }

    /// DELETE request.
    #[must_use]
    pub fn delete(template: &str) -> Self {
        Self::new(HttpMethod::Delete, template)
    }

    /// Fill the `{name}` placeholder with the URL-escaped `value`.
    #[must_use]
    pub fn path_param(mut self, name: &str, value: &str) -> Self {
        let placeholder = format!("{{{name}}}");
        self.path = self
            .path
            .replace(&placeholder, &urlencoding::encode(value));
        self
    }

    /// Replace the query parameters.
    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body. Serialization errors surface from `build`.
    #[must_use]
    pub fn json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_string(body).map_err(|e| e.to_string()));
        self
    }

    /// Method of the request being built.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Path as filled so far.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Produce the request against `base_url` with `credentials`.
    pub fn build(self, base_url: &str, credentials: &Credentials) -> Result<ApiRequest, ApiError> {
        if let Some(start) = self.path.find('{') {
            return Err(ApiError::InvalidRequest(format!(
                "unfilled path parameter in '{}'",
                &self.path[start..]
            )));
        }

        let body = self
            .body
            .transpose()
            .map_err(ApiError::Serialization)?;

        let mut headers = vec![
            (KEY_ID_HEADER.to_string(), credentials.key_id().to_string()),
            (
                SECRET_KEY_HEADER.to_string(),
                credentials.secret_key().to_string(),
            ),
        ];
        if body.is_some() {
            headers.push((
                CONTENT_TYPE_HEADER.to_string(),
                APPLICATION_JSON.to_string(),
            ));
        }

        Ok(ApiRequest {
            method: self.method,
            base_url: base_url.trim_end_matches('/').to_string(),
            path: self.path,
            query: self.query,
            headers,
            body,
        })
    }
}
