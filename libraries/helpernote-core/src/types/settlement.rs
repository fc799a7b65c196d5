//! Settlement view over postings.
//!
//! Settlements have no table of their own: each job posting and job-seeking
//! posting carries its settlement status, amount and memo. The back office
//! shows them as one list of [`SettlementItem`]s.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::customer::CustomerId;
use super::posting::{JobPosting, JobSeekingPosting, PostingId, SettlementStatus};
use crate::error::Result;

/// Which kind of posting a settlement item comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingType {
    JobPosting,
    JobSeeking,
}

impl PostingType {
    pub fn label(self) -> &'static str {
        match self {
            Self::JobPosting => "구인",
            Self::JobSeeking => "구직",
        }
    }
}

/// One row of the settlement list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementItem {
    pub id: PostingId,
    pub posting_type: PostingType,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub description: String,
    pub fee_rate: Decimal,
    pub calculated_fee: Decimal,
    pub settlement_status: SettlementStatus,
    pub settlement_amount: Option<Decimal>,
    pub settlement_memo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl SettlementItem {
    /// Settlement view of a job posting (employer fee).
    pub fn from_job_posting(posting: &JobPosting, customer_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            id: posting.id,
            posting_type: PostingType::JobPosting,
            customer_id: posting.customer_id,
            customer_name: customer_name.into(),
            description: posting.description.clone(),
            fee_rate: posting.employer_fee_rate.unwrap_or(Decimal::ZERO),
            calculated_fee: posting.calculated_fee()?,
            settlement_status: posting.settlement_status,
            settlement_amount: posting.settlement_amount,
            settlement_memo: posting.settlement_memo.clone(),
            created_at: posting.created_at,
            updated_at: posting.updated_at,
        })
    }

    /// Settlement view of a job-seeking posting (employee fee).
    pub fn from_job_seeking(
        posting: &JobSeekingPosting,
        customer_name: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            id: posting.id,
            posting_type: PostingType::JobSeeking,
            customer_id: posting.customer_id,
            customer_name: customer_name.into(),
            description: posting.description.clone(),
            fee_rate: posting.employee_fee_rate.unwrap_or(Decimal::ZERO),
            calculated_fee: posting.calculated_fee()?,
            settlement_status: posting.settlement_status,
            settlement_amount: posting.settlement_amount,
            settlement_memo: posting.settlement_memo.clone(),
            created_at: posting.created_at,
            updated_at: posting.updated_at,
        })
    }

    /// Amount actually settled, or the calculated fee when none was recorded.
    pub fn effective_amount(&self) -> Decimal {
        self.settlement_amount.unwrap_or(self.calculated_fee)
    }
}

/// Body of `PUT /api/job-postings/{id}/settlement` and its job-seeking twin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSettlement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_status: Option<SettlementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_memo: Option<String>,
}

impl UpdateSettlement {
    /// Mark as settled for the given amount.
    pub fn settle(amount: Decimal, memo: Option<String>) -> Self {
        Self {
            settlement_status: Some(SettlementStatus::Settled),
            settlement_amount: Some(amount),
            settlement_memo: memo,
        }
    }
}

/// Totals shown above the settlement list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    pub total_unsettled: usize,
    pub total_settled: usize,
    pub total_unsettled_amount: Decimal,
    pub total_settled_amount: Decimal,
}

impl SettlementSummary {
    /// Aggregate a list of settlement items.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a SettlementItem>) -> Self {
        items
            .into_iter()
            .fold(Self::default(), |mut summary, item| {
                match item.settlement_status {
                    SettlementStatus::Settled => {
                        summary.total_settled += 1;
                        summary.total_settled_amount += item.effective_amount();
                    }
                    SettlementStatus::Unsettled => {
                        summary.total_unsettled += 1;
                        summary.total_unsettled_amount += item.calculated_fee;
                    }
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PostingStatus;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn job_posting(status: SettlementStatus, amount: Option<i64>) -> JobPosting {
        JobPosting {
            id: 1,
            customer_id: 10,
            salary: Decimal::from(3_000_000),
            description: "식당 주방 보조".into(),
            employer_fee_rate: Some(Decimal::from(10)),
            settlement_status: status,
            settlement_amount: amount.map(Decimal::from),
            settlement_memo: None,
            posting_status: PostingStatus::Closed,
            is_favorite: false,
            created_at: ts(),
            updated_at: ts(),
            deleted_at: None,
        }
    }

    fn job_seeking(status: SettlementStatus) -> JobSeekingPosting {
        JobSeekingPosting {
            id: 2,
            customer_id: 20,
            desired_salary: Decimal::from(2_000_000),
            description: "요양 보호사 구직".into(),
            preferred_location: "부산".into(),
            employee_fee_rate: None,
            settlement_status: status,
            settlement_amount: None,
            settlement_memo: None,
            posting_status: PostingStatus::Published,
            is_favorite: true,
            created_at: ts(),
            updated_at: ts(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_item_from_job_posting() {
        let item =
            SettlementItem::from_job_posting(&job_posting(SettlementStatus::Unsettled, None), "박사장")
                .unwrap();
        assert_eq!(item.posting_type, PostingType::JobPosting);
        assert_eq!(item.customer_name, "박사장");
        assert_eq!(item.calculated_fee, Decimal::from(300_000));
        assert_eq!(item.effective_amount(), Decimal::from(300_000));
    }

    #[test]
    fn test_item_from_job_seeking_without_rate() {
        let item =
            SettlementItem::from_job_seeking(&job_seeking(SettlementStatus::Unsettled), "이영희")
                .unwrap();
        assert_eq!(item.posting_type, PostingType::JobSeeking);
        assert_eq!(item.fee_rate, Decimal::ZERO);
        assert_eq!(item.calculated_fee, Decimal::ZERO);
    }

    #[test]
    fn test_summary() {
        let items = vec![
            SettlementItem::from_job_posting(
                &job_posting(SettlementStatus::Settled, Some(280_000)),
                "a",
            )
            .unwrap(),
            SettlementItem::from_job_posting(&job_posting(SettlementStatus::Unsettled, None), "b")
                .unwrap(),
            SettlementItem::from_job_seeking(&job_seeking(SettlementStatus::Unsettled), "c")
                .unwrap(),
        ];

        let summary = SettlementSummary::from_items(&items);
        assert_eq!(summary.total_settled, 1);
        assert_eq!(summary.total_unsettled, 2);
        assert_eq!(summary.total_settled_amount, Decimal::from(280_000));
        assert_eq!(summary.total_unsettled_amount, Decimal::from(300_000));
    }

    #[test]
    fn test_settle_body() {
        let body = UpdateSettlement::settle(Decimal::from(300_000), None);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "settlement_status": "Settled",
                "settlement_amount": "300000"
            })
        );
    }
}
