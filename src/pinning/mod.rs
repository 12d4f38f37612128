//! Pinning service integration
//!
//! Publishes delivered images as pins on a named board. Everything in here
//! is best effort: callers get a status back, never an error.

pub mod board;
pub mod client;
pub mod mock;

pub use board::BoardResolver;
pub use client::PinterestClient;
pub use mock::MockPinningClient;

use crate::models::{Board, Pin};
use crate::Result;
use async_trait::async_trait;

pub const BOARD_DESCRIPTION: &str = "Collection of AI-generated artwork";
pub const BOARD_PRIVACY: &str = "PUBLIC";

#[async_trait]
pub trait PinningService: Send + Sync {
    async fn list_boards(&self) -> Result<Vec<Board>>;
    async fn create_board(&self, name: &str, description: &str, privacy: &str) -> Result<Board>;
    async fn create_pin(&self, board_id: &str, image_url: &str, note: &str) -> Result<Pin>;
}
