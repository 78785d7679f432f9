//! Read/create/update/remove on top of the authenticated request layer.

use crate::error::ClientError;
use crate::transport::{AuthClient, RequestOptions};
use reqwest::{Method, Response, StatusCode};
use risk_types::Query;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Extra query parameters and headers for one call.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query pairs; keys may repeat.
    pub params: Query,
    pub headers: Vec<(String, String)>,
}

impl RequestConfig {
    pub fn params(params: Query) -> Self {
        Self {
            params,
            headers: Vec::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    fn into_options(self) -> RequestOptions {
        RequestOptions {
            headers: self.headers,
            query: self.params,
            ..Default::default()
        }
    }
}

/// Typed verb client.
#[derive(Clone, Debug)]
pub struct ApiClient {
    transport: AuthClient,
}

impl ApiClient {
    pub fn new(transport: AuthClient) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &AuthClient {
        &self.transport
    }

    /// GET `path` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.get_with(path, RequestConfig::default()).await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        config: RequestConfig,
    ) -> Result<T, ClientError> {
        let res = self
            .transport
            .request(Method::GET, path, config.into_options())
            .await?;
        decode(ensure_success(res).await?).await
    }

    /// POST `data` as JSON and decode the JSON answer.
    pub async fn post<B, T>(&self, path: &str, data: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post_with(path, data, RequestConfig::default()).await
    }

    pub async fn post_with<B, T>(
        &self,
        path: &str,
        data: &B,
        config: RequestConfig,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, data, config).await
    }

    /// PUT `data` as JSON and decode the JSON answer.
    pub async fn put<B, T>(&self, path: &str, data: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.put_with(path, data, RequestConfig::default()).await
    }

    pub async fn put_with<B, T>(
        &self,
        path: &str,
        data: &B,
        config: RequestConfig,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, data, config).await
    }

    /// DELETE `path`. `Ok(None)` for 204 or an empty body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ClientError> {
        self.delete_with(path, RequestConfig::default()).await
    }

    pub async fn delete_with<T: DeserializeOwned>(
        &self,
        path: &str,
        config: RequestConfig,
    ) -> Result<Option<T>, ClientError> {
        let res = self
            .transport
            .request(Method::DELETE, path, config.into_options())
            .await?;
        let res = ensure_success(res).await?;
        if res.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let text = res.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// POST form-encoded pairs and decode the JSON answer.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        pairs: Vec<(String, String)>,
    ) -> Result<T, ClientError> {
        let res = self
            .transport
            .request(Method::POST, path, RequestOptions::new().form(pairs))
            .await?;
        decode(ensure_success(res).await?).await
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        data: &B,
        config: RequestConfig,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let opts = config.into_options().json(data)?;
        let res = self.transport.request(method, path, opts).await?;
        decode(ensure_success(res).await?).await
    }
}

/// Turn a non-2xx response into `ClientError::Status`.
async fn ensure_success(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let text = res.text().await.unwrap_or_default();
    let body: serde_json::Value =
        serde_json::from_str(&text).unwrap_or_else(|_| serde_json::json!({}));
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    let text = res.text().await?;
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}
