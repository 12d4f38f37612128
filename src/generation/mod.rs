//! Image generation service integration
//!
//! Submits prompts to the asynchronous generation API and polls the
//! resulting jobs until they finish or the polling budget runs out.

pub mod client;
pub mod mock;
pub mod poller;

pub use client::LeonardoClient;
pub use mock::MockGenerationClient;
pub use poller::GenerationPoller;

use crate::models::{GenerationRequest, JobSnapshot};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Create a job and return its generation id.
    async fn submit(&self, request: &GenerationRequest) -> Result<String>;
    async fn job_status(&self, generation_id: &str) -> Result<JobSnapshot>;
}
