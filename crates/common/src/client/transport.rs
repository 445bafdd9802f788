use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use url::Url;

/// Content type of a posted write frame
pub const FRAME_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("transport error: {0}")]
    Default(#[from] anyhow::Error),
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub body: Bytes,
}

impl Response {
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }
}

/// The network seam of the client.
///
/// A transport only moves bytes: it reports whatever status the server
/// answered with and leaves judging it to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as `application/octet-stream`, abandoning the request
    /// after `timeout`.
    async fn post(
        &self,
        url: &Url,
        body: Bytes,
        timeout: Duration,
    ) -> Result<Response, TransportError>;

    /// GET under the transport's default timeout, if any.
    async fn get(&self, url: &Url) -> Result<Response, TransportError>;
}

/// [`Transport`] over a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_default_timeout(None)
    }

    /// `timeout` applies to requests that don't set their own, i.e. reads.
    pub fn with_default_timeout(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn finish(response: reqwest::Response) -> Result<Response, TransportError> {
        let status = response.status();
        let body = response.bytes().await?;
        Ok(Response { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &Url,
        body: Bytes,
        timeout: Duration,
    ) -> Result<Response, TransportError> {
        tracing::debug!(%url, len = body.len(), "POST");
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static(FRAME_CONTENT_TYPE))
            .timeout(timeout)
            .body(body)
            .send()
            .await?;
        Self::finish(response).await
    }

    async fn get(&self, url: &Url) -> Result<Response, TransportError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        Self::finish(response).await
    }
}
