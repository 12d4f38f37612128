use super::GenerationService;
use crate::models::{
    GenerationRequest, GenerationStatusResponse, JobSnapshot, JobStatus, SubmitGenerationResponse,
};
use crate::remote::RemoteClient;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct LeonardoClient {
    http: RemoteClient,
}

impl LeonardoClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: RemoteClient::new("Leonardo", base_url, api_key, timeout)?,
        })
    }

    pub fn new_with_client(api_key: String, base_url: String, client: reqwest::Client) -> Self {
        Self {
            http: RemoteClient::new_with_client("Leonardo", base_url, api_key, client),
        }
    }
}

#[async_trait]
impl GenerationService for LeonardoClient {
    async fn submit(&self, request: &GenerationRequest) -> Result<String> {
        let response: SubmitGenerationResponse = self.http.post("/generations", request).await?;

        response
            .sd_generation_job
            .and_then(|job| job.generation_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Submission("No generation ID received".to_string()))
    }

    async fn job_status(&self, generation_id: &str) -> Result<JobSnapshot> {
        let response: GenerationStatusResponse = self
            .http
            .get(&format!("/generations/{}", generation_id))
            .await?;

        let Some(generation) = response.generations_by_pk else {
            return Ok(JobSnapshot {
                status: JobStatus::Unknown(String::new()),
                images: Vec::new(),
            });
        };

        Ok(JobSnapshot {
            status: generation
                .status
                .unwrap_or_else(|| JobStatus::Unknown(String::new())),
            images: generation
                .generated_images
                .unwrap_or_default()
                .into_iter()
                .filter_map(|image| image.url)
                .filter(|url| !url.is_empty())
                .collect(),
        })
    }
}
