//! Matching operations.

use crate::envelope::{item, page};
use crate::error::Result;
use crate::transport::Transport;
use helpernote_core::validation::validate_matching;
use helpernote_core::{
    CancelMatching, CreateMatching, CreateMatchingMemo, Matching, MatchingId, MatchingQuery,
    MatchingStatus, Memo, Page, UpdateMatchingStatus,
};
use tracing::info;

pub struct MatchingsClient<'a> {
    transport: &'a Transport,
}

impl<'a> MatchingsClient<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Pair a job posting with a job seeking. Fees are computed server-side
    /// from the agreed salary and rates.
    pub async fn create(&self, matching: &CreateMatching) -> Result<Matching> {
        validate_matching(matching)?;
        let value = self.transport.post("/api/matchings", matching).await?;
        let created: Matching = item(value, "matching")?;
        info!(
            matching_id = created.id,
            job_posting_id = created.job_posting_id,
            job_seeking_posting_id = created.job_seeking_posting_id,
            "Matching created"
        );
        Ok(created)
    }

    pub async fn list(&self, query: &MatchingQuery) -> Result<Page<Matching>> {
        let value = self
            .transport
            .get_query("/api/matchings", query)
            .await?;
        page(value, "matchings")
    }

    pub async fn get(&self, id: MatchingId) -> Result<Matching> {
        let value = self
            .transport
            .get(&format!("/api/matchings/{}", id))
            .await?;
        item(value, "matching")
    }

    pub async fn update_status(&self, id: MatchingId, status: MatchingStatus) -> Result<Matching> {
        let value = self
            .transport
            .put(
                &format!("/api/matchings/{}/status", id),
                &UpdateMatchingStatus {
                    matching_status: status,
                },
            )
            .await?;
        item(value, "matching")
    }

    pub async fn complete(&self, id: MatchingId) -> Result<Matching> {
        let value = self
            .transport
            .post_empty(&format!("/api/matchings/{}/complete", id))
            .await?;
        let matching: Matching = item(value, "matching")?;
        info!(matching_id = id, "Matching completed");
        Ok(matching)
    }

    pub async fn cancel(&self, id: MatchingId, reason: Option<String>) -> Result<Matching> {
        let value = self
            .transport
            .post(
                &format!("/api/matchings/{}/cancel", id),
                &CancelMatching {
                    cancellation_reason: reason,
                },
            )
            .await?;
        let matching: Matching = item(value, "matching")?;
        info!(matching_id = id, "Matching cancelled");
        Ok(matching)
    }

    pub async fn add_memo(&self, id: MatchingId, content: impl Into<String>) -> Result<Memo> {
        let value = self
            .transport
            .post(
                &format!("/api/matchings/{}/memos", id),
                &CreateMatchingMemo::new(id, content),
            )
            .await?;
        item(value, "memo")
    }

    pub async fn memos(&self, id: MatchingId) -> Result<Page<Memo>> {
        let value = self
            .transport
            .get(&format!("/api/matchings/{}/memos", id))
            .await?;
        page(value, "memos")
    }
}
