//! Data models and structures
//!
//! Defines the generation job lifecycle, the publish/delivery results, the
//! request/response payloads for the generation and pinning APIs, and the
//! runtime configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Lifecycle state of a generation job.
///
/// `TimedOut` is never reported by the remote service; it marks a job whose
/// local polling budget ran out.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum JobStatus {
    Submitted,
    Pending,
    InProgress,
    Complete,
    Failed,
    Deleted,
    TimedOut,
    Unknown(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Submitted => "SUBMITTED",
            JobStatus::Pending => "PENDING",
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Complete => "COMPLETE",
            JobStatus::Failed => "FAILED",
            JobStatus::Deleted => "DELETED",
            JobStatus::TimedOut => "TIMED_OUT",
            JobStatus::Unknown(raw) => raw,
        }
    }

    /// Remote failure states that end polling without a result.
    pub fn is_failure(&self) -> bool {
        matches!(self, JobStatus::Failed | JobStatus::Deleted)
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SUBMITTED" => JobStatus::Submitted,
            "PENDING" => JobStatus::Pending,
            "IN_PROGRESS" => JobStatus::InProgress,
            "COMPLETE" => JobStatus::Complete,
            "FAILED" => JobStatus::Failed,
            "DELETED" => JobStatus::Deleted,
            "TIMED_OUT" => JobStatus::TimedOut,
            _ => JobStatus::Unknown(raw),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job tracked on the generation service.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub id: String,
    pub status: JobStatus,
    pub images: Vec<String>,
}

impl GenerationJob {
    pub fn submitted(id: String) -> Self {
        Self {
            id,
            status: JobStatus::Submitted,
            images: Vec::new(),
        }
    }

    pub fn apply(&mut self, snapshot: JobSnapshot) {
        self.status = snapshot.status;
        self.images = snapshot.images;
    }
}

/// Status and image URLs from a single poll.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSnapshot {
    pub status: JobStatus,
    pub images: Vec<String>,
}

/// Result of a generation run that did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The job completed with at least one image URL.
    Complete(Vec<String>),
    /// The attempt budget ran out; the job may still finish remotely.
    Pending { generation_id: String, attempts: u32 },
}

/// Fixed generation parameters sent with every prompt.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub model_id: String,
    pub contrast: f32,
    pub num_images: u32,
    pub width: u32,
    pub height: u32,
    pub ultra: bool,
    pub style_uuid: String,
    pub enhance_prompt: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model_id: "6b645e3a-d64f-4341-a6d8-7a3690fbf042".to_string(),
            contrast: 3.5,
            num_images: 4,
            width: 1024,
            height: 1024,
            ultra: true,
            style_uuid: "111dc692-d470-4eec-b791-3475abac4c46".to_string(),
            enhance_prompt: true,
        }
    }
}

// Generation API Request/Response models
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    #[serde(rename = "modelId")]
    pub model_id: String,
    pub contrast: f32,
    pub prompt: String,
    pub num_images: u32,
    pub width: u32,
    pub height: u32,
    pub ultra: bool,
    #[serde(rename = "styleUUID")]
    pub style_uuid: String,
    #[serde(rename = "enhancePrompt")]
    pub enhance_prompt: bool,
}

impl GenerationRequest {
    pub fn new(prompt: &str, params: &GenerationParams) -> Self {
        Self {
            model_id: params.model_id.clone(),
            contrast: params.contrast,
            prompt: prompt.to_string(),
            num_images: params.num_images,
            width: params.width,
            height: params.height,
            ultra: params.ultra,
            style_uuid: params.style_uuid.clone(),
            enhance_prompt: params.enhance_prompt,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitGenerationResponse {
    #[serde(rename = "sdGenerationJob")]
    pub sd_generation_job: Option<SdGenerationJob>,
}

#[derive(Debug, Deserialize)]
pub struct SdGenerationJob {
    #[serde(rename = "generationId")]
    pub generation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerationStatusResponse {
    pub generations_by_pk: Option<GenerationByPk>,
}

#[derive(Debug, Deserialize)]
pub struct GenerationByPk {
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub generated_images: Option<Vec<GeneratedImage>>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    pub url: Option<String>,
}

// Pinning API Request/Response models
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<String>,
}

/// Raw board listing; entries are decoded one at a time so a single
/// malformed board does not hide the rest.
#[derive(Debug, Deserialize)]
pub struct BoardList {
    #[serde(default)]
    pub items: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
pub struct CreateBoardRequest {
    pub name: String,
    pub description: String,
    pub privacy: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePinRequest {
    pub board_id: String,
    pub media_source: MediaSource,
    pub note: String,
}

#[derive(Debug, Serialize)]
pub struct MediaSource {
    pub source_type: String,
    pub url: String,
}

impl MediaSource {
    pub fn image_url(url: &str) -> Self {
        Self {
            source_type: "image_url".to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pin {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    Success,
    Failed,
    Unconfigured,
}

impl PublishStatus {
    /// Value reported alongside a delivered asset, e.g. as a response header.
    pub fn as_header_value(&self) -> &'static str {
        match self {
            PublishStatus::Success => "success",
            PublishStatus::Failed => "failed",
            PublishStatus::Unconfigured => "unconfigured",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub status: PublishStatus,
    pub pin_id: Option<String>,
}

impl PublishResult {
    pub fn success(pin_id: Option<String>) -> Self {
        Self {
            status: PublishStatus::Success,
            pin_id,
        }
    }

    pub fn failed() -> Self {
        Self {
            status: PublishStatus::Failed,
            pin_id: None,
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            status: PublishStatus::Unconfigured,
            pin_id: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PublishStatus::Success
    }
}

/// An asset fetched for the caller, with the outcome of the side-publish.
#[derive(Debug, Clone)]
pub struct DeliveredAsset {
    pub url: String,
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
    pub publish: PublishResult,
}

/// Polling schedule for generation jobs.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 60,
        }
    }
}

impl PollConfig {
    /// Upper bound on time spent sleeping between polls.
    pub fn wait_budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

pub const DEFAULT_LEONARDO_API_URL: &str = "https://cloud.leonardo.ai/api/rest/v1";
pub const DEFAULT_PINTEREST_API_URL: &str = "https://api.pinterest.com/v5";
pub const DEFAULT_BOARD_NAME: &str = "AI Generated Art";
pub const DEFAULT_PIN_NOTE: &str = "AI generated image";

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub leonardo_api_key: String,
    pub leonardo_api_url: String,
    pub pinterest_access_token: Option<String>,
    pub pinterest_api_url: String,
    pub board_name: String,
    pub board_id: Option<String>,
    pub pin_note: String,
    pub poll: PollConfig,
    pub http_timeout: Duration,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        match dotenvy::dotenv() {
            Err(e) if !e.not_found() => return Err(e.into()),
            _ => {}
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let defaults = PollConfig::default();
        let poll = PollConfig {
            interval: Duration::from_secs(
                parse_number(get("POLL_INTERVAL_SECS"), "POLL_INTERVAL_SECS")?
                    .unwrap_or(defaults.interval.as_secs()),
            ),
            max_attempts: parse_number(get("POLL_MAX_ATTEMPTS"), "POLL_MAX_ATTEMPTS")?
                .unwrap_or(defaults.max_attempts),
        };
        if poll.max_attempts == 0 {
            return Err(crate::Error::Config(
                "POLL_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            leonardo_api_key: get("LEONARDO_API_KEY")
                .ok_or_else(|| crate::Error::Config("LEONARDO_API_KEY not set".to_string()))?,
            leonardo_api_url: get("LEONARDO_API_URL")
                .unwrap_or_else(|| DEFAULT_LEONARDO_API_URL.to_string()),
            pinterest_access_token: get("PINTEREST_ACCESS_TOKEN"),
            pinterest_api_url: get("PINTEREST_API_URL")
                .unwrap_or_else(|| DEFAULT_PINTEREST_API_URL.to_string()),
            board_name: get("PINTEREST_BOARD_NAME").unwrap_or_else(|| DEFAULT_BOARD_NAME.to_string()),
            board_id: get("PINTEREST_BOARD_ID"),
            pin_note: get("PIN_NOTE").unwrap_or_else(|| DEFAULT_PIN_NOTE.to_string()),
            poll,
            http_timeout: Duration::from_secs(
                parse_number(get("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS")?.unwrap_or(30),
            ),
            request_timeout: parse_number(get("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs),
        })
    }
}

fn parse_number<T: std::str::FromStr>(value: Option<String>, key: &str) -> crate::Result<Option<T>> {
    value
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|_| crate::Error::Config(format!("{} must be a number, got '{}'", key, v)))
        })
        .transpose()
}
