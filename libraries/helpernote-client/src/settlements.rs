//! Settlement view.
//!
//! There is no settlement resource on the server. Items are derived from the
//! job posting and job-seeking lists, and updates go to the per-posting
//! `/settlement` endpoints.

use std::collections::HashMap;

use crate::customers::CustomersClient;
use crate::error::Result;
use crate::job_postings::JobPostingsClient;
use crate::job_seekings::JobSeekingsClient;
use crate::transport::Transport;
use helpernote_core::{
    CustomerId, CustomerQuery, JobPostingQuery, JobSeekingQuery, PostingId, PostingType,
    SettlementItem, SettlementStatus, SettlementSummary, UpdateSettlement,
};
use tracing::debug;

pub struct SettlementsClient<'a> {
    transport: &'a Transport,
}

impl<'a> SettlementsClient<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// All settlement items, newest first, optionally filtered by status.
    pub async fn list(&self, status: Option<SettlementStatus>) -> Result<Vec<SettlementItem>> {
        let postings = JobPostingsClient::new(self.transport);
        let seekings = JobSeekingsClient::new(self.transport);
        let customers = CustomersClient::new(self.transport);

        let posting_query = JobPostingQuery {
            settlement_status: status,
            ..Default::default()
        };
        let seeking_query = JobSeekingQuery {
            settlement_status: status,
            ..Default::default()
        };
        let customer_query = CustomerQuery::default();

        let (job_postings, job_seekings, customer_page) = tokio::try_join!(
            postings.list(&posting_query),
            seekings.list(&seeking_query),
            customers.list(&customer_query),
        )?;

        let mut names: HashMap<CustomerId, String> = customer_page
            .items
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut items = Vec::with_capacity(job_postings.len() + job_seekings.len());
        for posting in &job_postings.items {
            let name = customer_name(&customers, &mut names, posting.customer_id).await?;
            items.push(SettlementItem::from_job_posting(posting, name)?);
        }
        for posting in &job_seekings.items {
            let name = customer_name(&customers, &mut names, posting.customer_id).await?;
            items.push(SettlementItem::from_job_seeking(posting, name)?);
        }

        // The server filters too, but older deployments ignore the parameter.
        if let Some(status) = status {
            items.retain(|item| item.settlement_status == status);
        }
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        debug!(count = items.len(), "Built settlement list");
        Ok(items)
    }

    pub async fn summary(&self) -> Result<SettlementSummary> {
        let items = self.list(None).await?;
        Ok(SettlementSummary::from_items(&items))
    }

    /// Update the settlement fields of one posting.
    pub async fn update(
        &self,
        posting_type: PostingType,
        id: PostingId,
        settlement: &UpdateSettlement,
    ) -> Result<()> {
        match posting_type {
            PostingType::JobPosting => {
                JobPostingsClient::new(self.transport)
                    .update_settlement(id, settlement)
                    .await?;
            }
            PostingType::JobSeeking => {
                JobSeekingsClient::new(self.transport)
                    .update_settlement(id, settlement)
                    .await?;
            }
        }
        Ok(())
    }
}

async fn customer_name(
    customers: &CustomersClient<'_>,
    names: &mut HashMap<CustomerId, String>,
    id: CustomerId,
) -> Result<String> {
    if let Some(name) = names.get(&id) {
        return Ok(name.clone());
    }
    let customer = customers.get(id).await?;
    names.insert(id, customer.name.clone());
    Ok(customer.name)
}
