//! Thin authenticated JSON client shared by the generation and pinning APIs.

use crate::{Error, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const ASSET_HOST: &str = "asset host";

pub struct RemoteClient {
    client: Client,
    service: &'static str,
    base_url: String,
    credential: String,
}

impl RemoteClient {
    pub fn new(
        service: &'static str,
        base_url: String,
        credential: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| Error::Transport { service, source })?;

        Ok(Self::new_with_client(service, base_url, credential, client))
    }

    pub fn new_with_client(
        service: &'static str,
        base_url: String,
        credential: String,
        client: Client,
    ) -> Self {
        Self {
            client,
            service,
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
        }
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.credential))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
    }

    pub async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        payload: &Req,
    ) -> Result<Resp> {
        let url = self.url(path);
        tracing::debug!("POST {} ({})", url, self.service);

        let request = self.authorized(self.client.post(&url)).json(payload);
        let response = send(self.service, request).await?;
        decode(self.service, response).await
    }

    pub async fn get<Resp: DeserializeOwned>(&self, path: &str) -> Result<Resp> {
        let url = self.url(path);
        tracing::debug!("GET {} ({})", url, self.service);

        let response = send(self.service, self.authorized(self.client.get(&url))).await?;
        decode(self.service, response).await
    }
}

/// Fetch an absolute, publicly reachable URL without credentials.
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    tracing::debug!("Fetching asset {}", url);

    let response = send(ASSET_HOST, client.get(url)).await?;
    let bytes = response.bytes().await.map_err(|source| Error::Transport {
        service: ASSET_HOST,
        source,
    })?;
    Ok(bytes.to_vec())
}

async fn send(service: &'static str, request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(|source| {
        tracing::error!("Failed to send request to {}: {}", service, source);
        Error::Transport { service, source }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
        tracing::error!("{} API error (status {}): {}", service, status, body);
        return Err(Error::RemoteService {
            service,
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

async fn decode<Resp: DeserializeOwned>(service: &'static str, response: Response) -> Result<Resp> {
    let body = response
        .text()
        .await
        .map_err(|source| Error::Transport { service, source })?;

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!("Failed to parse {} response: {}\nBody: {}", service, e, body);
        Error::Decode {
            service,
            message: e.to_string(),
            body,
        }
    })
}
