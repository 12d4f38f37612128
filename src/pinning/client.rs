use super::PinningService;
use crate::models::{
    Board, BoardList, CreateBoardRequest, CreatePinRequest, MediaSource, Pin,
};
use crate::remote::RemoteClient;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct PinterestClient {
    http: RemoteClient,
}

impl PinterestClient {
    pub fn new(access_token: String, base_url: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: RemoteClient::new("Pinterest", base_url, access_token, timeout)?,
        })
    }

    pub fn new_with_client(access_token: String, base_url: String, client: reqwest::Client) -> Self {
        Self {
            http: RemoteClient::new_with_client("Pinterest", base_url, access_token, client),
        }
    }
}

#[async_trait]
impl PinningService for PinterestClient {
    async fn list_boards(&self) -> Result<Vec<Board>> {
        let boards: BoardList = self.http.get("/boards").await?;

        Ok(boards
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Board>(item.clone()) {
                Ok(board) => Some(board),
                Err(e) => {
                    tracing::debug!("Skipping board entry {}: {}", item, e);
                    None
                }
            })
            .collect())
    }

    async fn create_board(&self, name: &str, description: &str, privacy: &str) -> Result<Board> {
        let request = CreateBoardRequest {
            name: name.to_string(),
            description: description.to_string(),
            privacy: privacy.to_string(),
        };

        let created: serde_json::Value = self.http.post("/boards", &request).await?;
        let id = created
            .get("id")
            .and_then(|id| id.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::Decode {
                service: self.http.service(),
                message: "created board has no id".to_string(),
                body: created.to_string(),
            })?;

        Ok(Board {
            id,
            name: name.to_string(),
            privacy: Some(privacy.to_string()),
        })
    }

    async fn create_pin(&self, board_id: &str, image_url: &str, note: &str) -> Result<Pin> {
        let request = CreatePinRequest {
            board_id: board_id.to_string(),
            media_source: MediaSource::image_url(image_url),
            note: note.to_string(),
        };

        self.http.post("/pins", &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pinning::{BOARD_DESCRIPTION, BOARD_PRIVACY};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_client(server: &MockServer) -> PinterestClient {
        PinterestClient::new("pin-token".to_string(), server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_boards() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/boards"))
            .and(header("Authorization", "Bearer pin-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    { "id": "b1", "name": "Travel", "privacy": "SECRET" },
                    { "id": "b2", "name": "AI Generated Art" }
                ],
                "bookmark": null
            })))
            .mount(&server)
            .await;

        let boards = make_client(&server).list_boards().await.unwrap();
        assert_eq!(boards.len(), 2);
        assert_eq!(boards[1].id, "b2");
        assert_eq!(boards[0].privacy.as_deref(), Some("SECRET"));
    }

    #[tokio::test]
    async fn test_create_board_sends_public_privacy() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/boards"))
            .and(body_json(serde_json::json!({
                "name": "AI Generated Art",
                "description": "Collection of AI-generated artwork",
                "privacy": "PUBLIC"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "id": "b9" })))
            .expect(1)
            .mount(&server)
            .await;

        let board = make_client(&server)
            .create_board("AI Generated Art", BOARD_DESCRIPTION, BOARD_PRIVACY)
            .await
            .unwrap();
        assert_eq!(board.id, "b9");
    }

    #[tokio::test]
    async fn test_list_boards_skips_unnamed_entries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/boards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    { "id": "b0" },
                    { "id": "b1", "name": "AI Generated Art" }
                ]
            })))
            .mount(&server)
            .await;

        let boards = make_client(&server).list_boards().await.unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].id, "b1");
    }

    #[tokio::test]
    async fn test_board_without_id_keeps_response_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/boards"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({ "message": "board queued" })),
            )
            .mount(&server)
            .await;

        let err = make_client(&server)
            .create_board("AI Generated Art", BOARD_DESCRIPTION, BOARD_PRIVACY)
            .await
            .unwrap_err();
        match err {
            Error::Decode { body, .. } => assert!(body.contains("board queued")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_pin_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pins"))
            .and(body_json(serde_json::json!({
                "board_id": "b1",
                "media_source": { "source_type": "image_url", "url": "https://cdn.test/1.png" },
                "note": "AI generated image"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "p1", "board_id": "b1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let pin = make_client(&server)
            .create_pin("b1", "https://cdn.test/1.png", "AI generated image")
            .await
            .unwrap();
        assert_eq!(pin.id.as_deref(), Some("p1"));
    }

    #[tokio::test]
    async fn test_unauthorized_is_remote_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/boards"))
            .respond_with(ResponseTemplate::new(401).set_body_string("{\"message\":\"bad token\"}"))
            .mount(&server)
            .await;

        let err = make_client(&server).list_boards().await.unwrap_err();
        assert_eq!(err.upstream_status(), Some(401));
    }
}
