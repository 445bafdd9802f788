use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::client::{Response, Transport, TransportError};
use crate::shard::Shard;

/// A request as the transport saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: Url,
    pub body: Bytes,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
enum Scripted {
    Respond(Response),
    Fail(String),
}

#[derive(Debug, Default)]
struct Inner {
    requests: Vec<RecordedRequest>,
    script: HashMap<String, Scripted>,
}

/// Cloneable [`Transport`] double. Clones share the same log and script.
///
/// Hosts without a scripted answer respond `200 OK` with an empty body.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request to `shard` with `response`.
    pub fn respond(&self, shard: Shard, response: Response) {
        self.inner
            .lock()
            .script
            .insert(shard.host(), Scripted::Respond(response));
    }

    /// Fail every request to `shard` at the transport level.
    pub fn fail(&self, shard: Shard, reason: &str) {
        self.inner
            .lock()
            .script
            .insert(shard.host(), Scripted::Fail(reason.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().requests.clone()
    }

    fn handle(&self, request: RecordedRequest) -> Result<Response, TransportError> {
        let host = request.url.host_str().unwrap_or_default().to_string();
        let mut inner = self.inner.lock();
        inner.requests.push(request);
        match inner.script.get(&host) {
            Some(Scripted::Respond(response)) => Ok(response.clone()),
            Some(Scripted::Fail(reason)) => Err(anyhow::anyhow!("{}: {}", host, reason).into()),
            None => Ok(Response {
                status: StatusCode::OK,
                body: Bytes::new(),
            }),
        }
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post(
        &self,
        url: &Url,
        body: Bytes,
        timeout: Duration,
    ) -> Result<Response, TransportError> {
        self.handle(RecordedRequest {
            method: Method::POST,
            url: url.clone(),
            body,
            timeout: Some(timeout),
        })
    }

    async fn get(&self, url: &Url) -> Result<Response, TransportError> {
        self.handle(RecordedRequest {
            method: Method::GET,
            url: url.clone(),
            body: Bytes::new(),
            timeout: None,
        })
    }
}
