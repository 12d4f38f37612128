use super::GenerationService;
use crate::models::{GenerationRequest, JobSnapshot, JobStatus};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted generation service.
///
/// Poll responses are served in order; once the script runs out every poll
/// reports `IN_PROGRESS`.
#[derive(Clone)]
pub struct MockGenerationClient {
    generation_id: Option<String>,
    statuses: Arc<Mutex<VecDeque<JobSnapshot>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    poll_count: Arc<Mutex<usize>>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self {
            generation_id: Some("mock-generation".to_string()),
            statuses: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            poll_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_generation_id(mut self, id: &str) -> Self {
        self.generation_id = Some(id.to_string());
        self
    }

    /// Make `submit` fail as if the response carried no job id.
    pub fn without_generation_id(mut self) -> Self {
        self.generation_id = None;
        self
    }

    pub fn with_status(self, status: JobStatus) -> Self {
        self.with_snapshot(JobSnapshot {
            status,
            images: Vec::new(),
        })
    }

    pub fn with_complete(self, urls: &[&str]) -> Self {
        self.with_snapshot(JobSnapshot {
            status: JobStatus::Complete,
            images: urls.iter().map(|u| u.to_string()).collect(),
        })
    }

    pub fn with_snapshot(self, snapshot: JobSnapshot) -> Self {
        self.statuses.lock().unwrap().push_back(snapshot);
        self
    }

    pub fn get_poll_count(&self) -> usize {
        *self.poll_count.lock().unwrap()
    }

    pub fn get_submitted_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationService for MockGenerationClient {
    async fn submit(&self, request: &GenerationRequest) -> Result<String> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        self.generation_id
            .clone()
            .ok_or_else(|| Error::Submission("No generation ID received".to_string()))
    }

    async fn job_status(&self, generation_id: &str) -> Result<JobSnapshot> {
        *self.poll_count.lock().unwrap() += 1;

        if self.generation_id.as_deref() != Some(generation_id) {
            return Err(Error::RemoteService {
                service: "mock",
                status: 404,
                body: format!("unknown generation {}", generation_id),
            });
        }

        Ok(self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(JobSnapshot {
                status: JobStatus::InProgress,
                images: Vec::new(),
            }))
    }
}
