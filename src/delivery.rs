//! Delivery of a selected asset to the caller
//!
//! Publishing to the pinning service happens first and is best effort; the
//! asset fetch afterwards is the only step that can fail a delivery.

use crate::mime::ImageKind;
use crate::models::{DeliveredAsset, PublishResult};
use crate::pinning::{BoardResolver, PinningService};
use crate::remote;
use crate::{Error, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Where and how delivered assets get pinned.
pub struct Publisher {
    service: Arc<dyn PinningService>,
    resolver: BoardResolver,
    board_name: String,
    board_id: Option<String>,
    note: String,
}

impl Publisher {
    pub fn new(service: Arc<dyn PinningService>, board_name: String, note: String) -> Self {
        Self {
            resolver: BoardResolver::new(service.clone()),
            service,
            board_name,
            board_id: None,
            note,
        }
    }

    /// Pin to this board directly instead of resolving one by name.
    pub fn with_board_id(mut self, board_id: Option<String>) -> Self {
        self.board_id = board_id;
        self
    }

    pub async fn publish(&self, asset_url: &str) -> PublishResult {
        let board_id = match &self.board_id {
            Some(id) => id.clone(),
            None => match self.resolver.resolve(&self.board_name).await {
                Some(id) => id,
                None => {
                    warn!("Failed to get or create board '{}'", self.board_name);
                    return PublishResult::failed();
                }
            },
        };

        match self.service.create_pin(&board_id, asset_url, &self.note).await {
            Ok(pin) => {
                info!("Pinned {} to board {}", asset_url, board_id);
                PublishResult::success(pin.id)
            }
            Err(e) => {
                warn!("Error pinning {}: {}", asset_url, e);
                PublishResult::failed()
            }
        }
    }
}

pub struct DeliveryCoordinator {
    http: reqwest::Client,
    publisher: Option<Publisher>,
}

impl DeliveryCoordinator {
    pub fn new(http: reqwest::Client, publisher: Option<Publisher>) -> Self {
        Self { http, publisher }
    }

    pub fn is_publishing(&self) -> bool {
        self.publisher.is_some()
    }

    pub async fn deliver(&self, asset_url: &str) -> Result<DeliveredAsset> {
        let publish = match &self.publisher {
            Some(publisher) => publisher.publish(asset_url).await,
            None => PublishResult::unconfigured(),
        };

        let bytes = remote::fetch_bytes(&self.http, asset_url)
            .await
            .map_err(|e| Error::Delivery {
                url: asset_url.to_string(),
                source: Box::new(e),
            })?;

        let kind = ImageKind::sniff(&bytes);
        let filename = format!(
            "generated_image_{}.{}",
            Utc::now().timestamp(),
            kind.extension()
        );
        info!(
            "Delivered {} ({} bytes, publish {})",
            filename,
            bytes.len(),
            publish.status.as_header_value()
        );

        Ok(DeliveredAsset {
            url: asset_url.to_string(),
            bytes,
            filename,
            content_type: kind.content_type(),
            publish,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PublishStatus;
    use crate::pinning::MockPinningClient;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PNG: [u8; 6] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A];

    async fn asset_server(status: u16, body: &[u8]) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/img/1.png"))
            .respond_with(ResponseTemplate::new(status).set_body_bytes(body.to_vec()))
            .mount(&server)
            .await;
        server
    }

    fn publisher(mock: &MockPinningClient) -> Publisher {
        Publisher::new(
            Arc::new(mock.clone()),
            "AI Generated Art".to_string(),
            "AI generated image".to_string(),
        )
    }

    #[tokio::test]
    async fn test_unconfigured_still_delivers() {
        let server = asset_server(200, &PNG).await;
        let url = format!("{}/img/1.png", server.uri());

        let coordinator = DeliveryCoordinator::new(reqwest::Client::new(), None);
        let asset = coordinator.deliver(&url).await.unwrap();

        assert_eq!(asset.bytes, PNG.to_vec());
        assert_eq!(asset.publish.status, PublishStatus::Unconfigured);
        assert_eq!(asset.content_type, "image/png");
        assert!(asset.filename.starts_with("generated_image_"));
        assert!(asset.filename.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_publishes_then_delivers() {
        let server = asset_server(200, &PNG).await;
        let url = format!("{}/img/1.png", server.uri());
        let mock = MockPinningClient::new().with_board("b1", "AI Generated Art");

        let coordinator = DeliveryCoordinator::new(reqwest::Client::new(), Some(publisher(&mock)));
        let asset = coordinator.deliver(&url).await.unwrap();

        assert!(asset.publish.is_success());
        assert_eq!(asset.publish.pin_id.as_deref(), Some("pin-1"));
        assert_eq!(
            mock.get_pins(),
            vec![("b1".to_string(), url.clone(), "AI generated image".to_string())]
        );
        assert_eq!(asset.bytes, PNG.to_vec());
    }

    #[tokio::test]
    async fn test_publish_failure_does_not_touch_bytes() {
        let server = asset_server(200, &PNG).await;
        let url = format!("{}/img/1.png", server.uri());
        let mock = MockPinningClient::new().with_board_failure();

        let coordinator = DeliveryCoordinator::new(reqwest::Client::new(), Some(publisher(&mock)));
        let asset = coordinator.deliver(&url).await.unwrap();

        assert_eq!(asset.publish, PublishResult::failed());
        assert_eq!(asset.bytes, PNG.to_vec());
        assert!(mock.get_pins().is_empty());
    }

    #[tokio::test]
    async fn test_pin_failure_is_reported_as_failed() {
        let server = asset_server(200, &PNG).await;
        let url = format!("{}/img/1.png", server.uri());
        let mock = MockPinningClient::new()
            .with_board("b1", "AI Generated Art")
            .with_pin_failure();

        let coordinator = DeliveryCoordinator::new(reqwest::Client::new(), Some(publisher(&mock)));
        let asset = coordinator.deliver(&url).await.unwrap();

        assert_eq!(asset.publish.status, PublishStatus::Failed);
        assert_eq!(asset.bytes, PNG.to_vec());
    }

    #[tokio::test]
    async fn test_explicit_board_id_skips_resolution() {
        let server = asset_server(200, &PNG).await;
        let url = format!("{}/img/1.png", server.uri());
        let mock = MockPinningClient::new();

        let coordinator = DeliveryCoordinator::new(
            reqwest::Client::new(),
            Some(publisher(&mock).with_board_id(Some("fixed".to_string()))),
        );
        let asset = coordinator.deliver(&url).await.unwrap();

        assert!(asset.publish.is_success());
        assert_eq!(mock.get_list_count(), 0);
        assert_eq!(mock.get_create_board_count(), 0);
        assert_eq!(mock.get_pins()[0].0, "fixed");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_delivery_error() {
        let server = asset_server(404, b"gone").await;
        let url = format!("{}/img/1.png", server.uri());

        let coordinator = DeliveryCoordinator::new(reqwest::Client::new(), None);
        let err = coordinator.deliver(&url).await.unwrap_err();

        assert!(matches!(err, Error::Delivery { .. }));
        assert_eq!(err.upstream_status(), Some(404));
    }
}
