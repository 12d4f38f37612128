use super::{PinningService, BOARD_DESCRIPTION, BOARD_PRIVACY};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Finds or creates a board by exact name.
///
/// Lookups through the same resolver are serialized, so concurrent callers in
/// one process never create duplicate boards. Separate processes can still
/// race each other.
pub struct BoardResolver {
    service: Arc<dyn PinningService>,
    lock: Mutex<()>,
}

impl BoardResolver {
    pub fn new(service: Arc<dyn PinningService>) -> Self {
        Self {
            service,
            lock: Mutex::new(()),
        }
    }

    /// Returns `None` when the pinning service cannot be reached or refuses the
    /// request; the caller should treat that as "publishing unavailable".
    pub async fn resolve(&self, name: &str) -> Option<String> {
        let _guard = self.lock.lock().await;

        let boards = match self.service.list_boards().await {
            Ok(boards) => boards,
            Err(e) => {
                warn!("Could not list boards: {}", e);
                return None;
            }
        };

        if let Some(board) = boards.into_iter().find(|b| b.name == name) {
            return Some(board.id);
        }

        match self
            .service
            .create_board(name, BOARD_DESCRIPTION, BOARD_PRIVACY)
            .await
        {
            Ok(board) => {
                info!("Created board '{}' ({})", name, board.id);
                Some(board.id)
            }
            Err(e) => {
                warn!("Could not create board '{}': {}", name, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pinning::MockPinningClient;

    fn make_resolver(mock: &MockPinningClient) -> BoardResolver {
        BoardResolver::new(Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_existing_board_first_match_wins() {
        let mock = MockPinningClient::new()
            .with_board("b0", "ai generated art")
            .with_board("b1", "AI Generated Art")
            .with_board("b2", "AI Generated Art");

        let id = make_resolver(&mock).resolve("AI Generated Art").await;
        assert_eq!(id.as_deref(), Some("b1"));
        assert_eq!(mock.get_create_board_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_board_is_created_once() {
        let mock = MockPinningClient::new().with_board("b0", "Travel");
        let resolver = make_resolver(&mock);

        let first = resolver.resolve("AI Generated Art").await;
        let second = resolver.resolve("AI Generated Art").await;

        assert_eq!(first.as_deref(), Some("board-1"));
        assert_eq!(first, second);
        assert_eq!(mock.get_create_board_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_resolves_create_one_board() {
        let mock = MockPinningClient::new();
        let resolver = make_resolver(&mock);

        let (a, b) = tokio::join!(resolver.resolve("Art"), resolver.resolve("Art"));

        assert_eq!(a, b);
        assert_eq!(mock.get_create_board_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_yields_none() {
        let mock = MockPinningClient::new().with_board_failure();
        assert_eq!(make_resolver(&mock).resolve("Art").await, None);
    }
}
