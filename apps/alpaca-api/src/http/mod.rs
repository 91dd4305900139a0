//! HTTP plumbing: request building, transport, and response resolution.

pub mod request;
pub mod resolver;
pub mod transport;

pub use request::{ApiRequest, HttpMethod, QueryParams, RequestBuilder};
pub use resolver::{List, NoContent, ResponseShape, Single, resolve};
pub use transport::{RawResponse, ReqwestTransport, Transport};
