//! Authenticated request layer.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::interceptor::{ResponseInterceptor, ResponseMeta};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response};
use risk_types::{Query, Storage, TOKEN_KEY};
use std::sync::Arc;

/// Request body as sent on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Serialized JSON text.
    Json(String),
    /// `application/x-www-form-urlencoded` pairs.
    Form(Vec<(String, String)>),
}

/// Per-request options. Caller headers override the defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub query: Query,
    pub body: RequestBody,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub fn json<T: serde::Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        let text =
            serde_json::to_string(body).map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        self.body = RequestBody::Json(text);
        Ok(self)
    }

    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(pairs);
        self
    }
}

struct Inner {
    http: reqwest::Client,
    config: ClientConfig,
    storage: Arc<dyn Storage>,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

/// Bearer-token HTTP client. Cheap to clone.
///
/// Every call reads the token from storage, so a login or logout elsewhere takes effect
/// on the next request. The response is always returned as-is, whatever its status;
/// interceptors registered at build time see it first.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<Inner>,
}

pub struct AuthClientBuilder {
    config: ClientConfig,
    storage: Arc<dyn Storage>,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl AuthClientBuilder {
    /// Register an interceptor. Interceptors run in registration order.
    pub fn interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn build(self) -> Result<AuthClient, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()?;
        Ok(AuthClient {
            inner: Arc::new(Inner {
                http,
                config: self.config,
                storage: self.storage,
                interceptors: self.interceptors,
            }),
        })
    }
}

impl AuthClient {
    pub fn builder(config: ClientConfig, storage: Arc<dyn Storage>) -> AuthClientBuilder {
        AuthClientBuilder {
            config,
            storage,
            interceptors: Vec::new(),
        }
    }

    /// Client without interceptors.
    pub fn new(config: ClientConfig, storage: Arc<dyn Storage>) -> Result<Self, ClientError> {
        Self::builder(config, storage).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Currently stored bearer token.
    pub fn token(&self) -> Result<Option<String>, ClientError> {
        let token = self.inner.storage.get(TOKEN_KEY)?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    pub fn set_token(&self, token: &str) -> Result<(), ClientError> {
        self.inner.storage.set(TOKEN_KEY, token)?;
        Ok(())
    }

    pub fn clear_token(&self) -> Result<(), ClientError> {
        self.inner.storage.remove(TOKEN_KEY)?;
        Ok(())
    }

    /// Issue one request against `base_url + path`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        opts: RequestOptions,
    ) -> Result<Response, ClientError> {
        let url = self.inner.config.url(path);
        let headers = self.headers(&opts)?;

        let mut req = self
            .inner
            .http
            .request(method.clone(), &url)
            .headers(headers);
        if !opts.query.is_empty() {
            req = req.query(&opts.query);
        }
        req = match opts.body {
            RequestBody::Empty => req,
            RequestBody::Json(text) => req.body(text),
            RequestBody::Form(pairs) => req.form(&pairs),
        };

        let res = req.send().await?;
        let status = res.status();
        tracing::debug!(method = %method, path, status = status.as_u16(), "api request");

        if !self.inner.interceptors.is_empty() {
            let meta = ResponseMeta {
                method,
                path: path.to_string(),
                status,
            };
            for interceptor in &self.inner.interceptors {
                interceptor.on_response(&meta).await;
            }
        }
        Ok(res)
    }

    fn headers(&self, opts: &RequestOptions) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        let content_type = match opts.body {
            RequestBody::Form(_) => "application/x-www-form-urlencoded",
            _ => "application/json",
        };
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        for (name, value) in &opts.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::InvalidRequest(format!("header {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::InvalidRequest(format!("header {}: {}", name, e)))?;
            headers.insert(name, value);
        }
        if let Some(token) = self.token()? {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ClientError::InvalidRequest(format!("token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("base_url", &self.inner.config.base_url)
            .field("interceptors", &self.inner.interceptors.len())
            .finish()
    }
}
