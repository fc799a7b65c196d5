//! Job-seeking posting operations (candidate side).

use crate::envelope::{item, page};
use crate::error::Result;
use crate::transport::Transport;
use helpernote_core::validation::validate_job_seeking;
use helpernote_core::{
    CreateJobSeeking, JobSeekingPosting, JobSeekingQuery, Page, PostingId, UpdateJobSeeking,
    UpdateSettlement,
};
use tracing::info;

pub struct JobSeekingsClient<'a> {
    transport: &'a Transport,
}

impl<'a> JobSeekingsClient<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn create(&self, posting: &CreateJobSeeking) -> Result<JobSeekingPosting> {
        validate_job_seeking(posting)?;
        let value = self.transport.post("/api/job-seekings", posting).await?;
        let created: JobSeekingPosting = item(value, "job_seeking")?;
        info!(posting_id = created.id, customer_id = created.customer_id, "Job seeking created");
        Ok(created)
    }

    pub async fn list(&self, query: &JobSeekingQuery) -> Result<Page<JobSeekingPosting>> {
        let value = self
            .transport
            .get_query("/api/job-seekings", query)
            .await?;
        page(value, "job_seekings")
    }

    pub async fn get(&self, id: PostingId) -> Result<JobSeekingPosting> {
        let value = self
            .transport
            .get(&format!("/api/job-seekings/{}", id))
            .await?;
        item(value, "job_seeking")
    }

    pub async fn update(
        &self,
        id: PostingId,
        update: &UpdateJobSeeking,
    ) -> Result<JobSeekingPosting> {
        let value = self
            .transport
            .put(&format!("/api/job-seekings/{}", id), update)
            .await?;
        item(value, "job_seeking")
    }

    pub async fn delete(&self, id: PostingId) -> Result<()> {
        self.transport
            .delete(&format!("/api/job-seekings/{}", id))
            .await
    }

    pub async fn toggle_favorite(&self, id: PostingId) -> Result<JobSeekingPosting> {
        let value = self
            .transport
            .post_empty(&format!("/api/job-seekings/{}/favorite", id))
            .await?;
        item(value, "job_seeking")
    }

    /// Update the settlement fields. The server's reply body is not relied on.
    pub async fn update_settlement(
        &self,
        id: PostingId,
        settlement: &UpdateSettlement,
    ) -> Result<()> {
        self.transport
            .put(&format!("/api/job-seekings/{}/settlement", id), settlement)
            .await?;
        info!(posting_id = id, "Settlement updated");
        Ok(())
    }
}
