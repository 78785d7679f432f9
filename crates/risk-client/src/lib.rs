//! HTTP client for the operational risk REST API.
//!
//! Layers, bottom up: [`AuthClient`] attaches the bearer token and runs response
//! interceptors; [`ApiClient`] adds the four verbs with one error contract;
//! [`RiskApi`] exposes the typed endpoints.

mod config;
mod endpoints;
mod error;
mod interceptor;
mod transport;
mod verbs;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use endpoints::RiskApi;
pub use error::ClientError;
pub use interceptor::{ResponseInterceptor, ResponseMeta, SessionExpiry};
pub use transport::{AuthClient, AuthClientBuilder, RequestBody, RequestOptions};
pub use verbs::{ApiClient, RequestConfig};

pub use reqwest::{Method, StatusCode};
