use super::GenerationService;
use crate::models::{
    GenerationJob, GenerationOutcome, GenerationParams, GenerationRequest, JobStatus, PollConfig,
};
use crate::{Error, Result};
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, info, warn};

/// Submits a prompt and waits for the resulting job.
///
/// Polls are strictly sequential and each one is preceded by a sleep of
/// `PollConfig::interval`. The returned future owns the whole loop, so
/// dropping it (for example under `tokio::time::timeout`) stops polling.
pub struct GenerationPoller {
    service: Box<dyn GenerationService>,
    params: GenerationParams,
    poll: PollConfig,
}

impl GenerationPoller {
    pub fn new(service: Box<dyn GenerationService>, params: GenerationParams, poll: PollConfig) -> Self {
        Self {
            service,
            params,
            poll,
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<GenerationOutcome> {
        let request = GenerationRequest::new(prompt, &self.params);
        let generation_id = self.service.submit(&request).await?;
        info!("Generation ID received: {}", generation_id);

        let mut job = GenerationJob::submitted(generation_id);
        let schedule = FixedInterval::new(self.poll.interval).take(self.poll.max_attempts as usize);

        for (attempt, delay) in (1..).zip(schedule) {
            tokio::time::sleep(delay).await;
            debug!(
                "Polling generation {} (attempt {}/{})",
                job.id, attempt, self.poll.max_attempts
            );

            job.apply(self.service.job_status(&job.id).await?);

            if job.status == JobStatus::Complete {
                if !job.images.is_empty() {
                    info!(
                        "Generation {} complete with {} images after {} polls",
                        job.id,
                        job.images.len(),
                        attempt
                    );
                    return Ok(GenerationOutcome::Complete(job.images));
                }
                // Status can flip before the image URLs are populated.
                debug!("Generation {} reported COMPLETE without images", job.id);
            } else if job.status.is_failure() {
                warn!("Generation {} failed with status: {}", job.id, job.status);
                return Err(Error::GenerationFailed {
                    generation_id: job.id,
                    status: job.status,
                });
            } else {
                debug!("Generation {} status: {}", job.id, job.status);
            }
        }

        job.status = JobStatus::TimedOut;
        warn!(
            "Generation {} marked {} after {} polls ({:?})",
            job.id,
            job.status,
            self.poll.max_attempts,
            self.poll.wait_budget()
        );
        Ok(GenerationOutcome::Pending {
            generation_id: job.id,
            attempts: self.poll.max_attempts,
        })
    }
}
