//! Application entry points: submit a prompt, deliver a selected image.

use crate::delivery::{DeliveryCoordinator, Publisher};
use crate::generation::{GenerationPoller, GenerationService, LeonardoClient};
use crate::models::{Config, DeliveredAsset, GenerationOutcome, GenerationParams};
use crate::pinning::{PinningService, PinterestClient};
use crate::{Error, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct App {
    poller: GenerationPoller,
    delivery: DeliveryCoordinator,
    request_timeout: Option<Duration>,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub generation: Box<dyn GenerationService>,
    pub pinning: Option<Arc<dyn PinningService>>,
    pub http: reqwest::Client,
}

impl App {
    pub fn with_services(services: AppServices, config: &Config) -> Self {
        let publisher = services.pinning.map(|service| {
            Publisher::new(service, config.board_name.clone(), config.pin_note.clone())
                .with_board_id(config.board_id.clone())
        });

        Self {
            poller: GenerationPoller::new(
                services.generation,
                GenerationParams::default(),
                config.poll,
            ),
            delivery: DeliveryCoordinator::new(services.http, publisher),
            request_timeout: config.request_timeout,
        }
    }

    /// Construct an app with real HTTP clients for both services.
    pub fn new(config: &Config) -> Result<Self> {
        // Reuse one HTTP connection pool across both services and asset fetches.
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|source| Error::Transport {
                service: "http client",
                source,
            })?;

        let generation = Box::new(LeonardoClient::new_with_client(
            config.leonardo_api_key.clone(),
            config.leonardo_api_url.clone(),
            http.clone(),
        ));

        let pinning = match &config.pinterest_access_token {
            Some(token) => {
                info!("Pinning enabled (board: {})", config.board_name);
                Some(Arc::new(PinterestClient::new_with_client(
                    token.clone(),
                    config.pinterest_api_url.clone(),
                    http.clone(),
                )) as Arc<dyn PinningService>)
            }
            None => {
                info!("Pinterest access token not configured, pinning disabled");
                None
            }
        };

        Ok(Self::with_services(
            AppServices {
                generation,
                pinning,
                http,
            },
            config,
        ))
    }

    pub async fn submit(&self, prompt: &str) -> Result<GenerationOutcome> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(Error::InvalidInput("No prompt provided".to_string()));
        }

        info!("Received generation request with prompt: {}", prompt);
        self.with_deadline(self.poller.generate(prompt)).await
    }

    pub async fn deliver_selected(&self, asset_url: &str) -> Result<DeliveredAsset> {
        let asset_url = asset_url.trim();
        if asset_url.is_empty() {
            return Err(Error::InvalidInput("No image URL provided".to_string()));
        }

        self.with_deadline(self.delivery.deliver(asset_url)).await
    }

    async fn with_deadline<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| Error::Timeout(limit))?,
            None => fut.await,
        }
    }
}
