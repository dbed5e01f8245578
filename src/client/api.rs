//! `CounterApi` and its reqwest implementation.

use crate::model::{Counter, ErrorResponse, SetCounterRequest};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx response; `message` is the server's `error` field when present.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

#[async_trait]
pub trait CounterApi: Send + Sync {
    async fn get(&self) -> Result<Counter, ClientError>;
    async fn increment(&self) -> Result<Counter, ClientError>;
    async fn reset(&self) -> Result<Counter, ClientError>;
    async fn set(&self, value: i32) -> Result<Counter, ClientError>;
}

#[derive(Clone)]
pub struct HttpCounterApi {
    client: Client,
    base_url: String,
}

impl HttpCounterApi {
    /// `base_url` without trailing slash, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn decode(resp: Response) -> Result<Counter, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<Counter>().await?);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error)
        .unwrap_or(text);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl CounterApi for HttpCounterApi {
    async fn get(&self) -> Result<Counter, ClientError> {
        decode(self.client.get(self.url("/api/counter")).send().await?).await
    }

    async fn increment(&self) -> Result<Counter, ClientError> {
        decode(self.client.post(self.url("/api/counter/increment")).send().await?).await
    }

    async fn reset(&self) -> Result<Counter, ClientError> {
        decode(self.client.post(self.url("/api/counter/reset")).send().await?).await
    }

    async fn set(&self, value: i32) -> Result<Counter, ClientError> {
        let resp = self
            .client
            .put(self.url("/api/counter"))
            .json(&SetCounterRequest { value })
            .send()
            .await?;
        decode(resp).await
    }
}
