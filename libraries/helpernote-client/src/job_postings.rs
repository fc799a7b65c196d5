//! Job posting operations (employer side).

use crate::envelope::{item, page};
use crate::error::Result;
use crate::transport::Transport;
use helpernote_core::validation::validate_job_posting;
use helpernote_core::{
    CreateJobPosting, JobPosting, JobPostingQuery, Page, PostingId, UpdateJobPosting,
    UpdateSettlement,
};
use tracing::info;

pub struct JobPostingsClient<'a> {
    transport: &'a Transport,
}

impl<'a> JobPostingsClient<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn create(&self, posting: &CreateJobPosting) -> Result<JobPosting> {
        validate_job_posting(posting)?;
        let value = self.transport.post("/api/job-postings", posting).await?;
        let created: JobPosting = item(value, "job_posting")?;
        info!(posting_id = created.id, customer_id = created.customer_id, "Job posting created");
        Ok(created)
    }

    pub async fn list(&self, query: &JobPostingQuery) -> Result<Page<JobPosting>> {
        let value = self
            .transport
            .get_query("/api/job-postings", query)
            .await?;
        page(value, "job_postings")
    }

    pub async fn get(&self, id: PostingId) -> Result<JobPosting> {
        let value = self
            .transport
            .get(&format!("/api/job-postings/{}", id))
            .await?;
        item(value, "job_posting")
    }

    pub async fn update(&self, id: PostingId, update: &UpdateJobPosting) -> Result<JobPosting> {
        let value = self
            .transport
            .put(&format!("/api/job-postings/{}", id), update)
            .await?;
        item(value, "job_posting")
    }

    pub async fn delete(&self, id: PostingId) -> Result<()> {
        self.transport
            .delete(&format!("/api/job-postings/{}", id))
            .await
    }

    /// Flip the favorite flag; returns the updated posting.
    pub async fn toggle_favorite(&self, id: PostingId) -> Result<JobPosting> {
        let value = self
            .transport
            .post_empty(&format!("/api/job-postings/{}/favorite", id))
            .await?;
        item(value, "job_posting")
    }

    pub async fn update_settlement(
        &self,
        id: PostingId,
        settlement: &UpdateSettlement,
    ) -> Result<JobPosting> {
        let value = self
            .transport
            .put(&format!("/api/job-postings/{}/settlement", id), settlement)
            .await?;
        let posting: JobPosting = item(value, "job_posting")?;
        info!(
            posting_id = id,
            status = ?posting.settlement_status,
            "Settlement updated"
        );
        Ok(posting)
    }
}
