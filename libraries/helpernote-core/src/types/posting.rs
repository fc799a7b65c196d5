//! Job postings (employer side) and job-seeking postings (candidate side).

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::customer::CustomerId;
use crate::error::Result;
use crate::fee::fee_or_zero;

pub type PostingId = i64;

/// Lifecycle of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostingStatus {
    Published,
    InProgress,
    Closed,
    Cancelled,
}

impl PostingStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Published => "게시됨",
            Self::InProgress => "진행중",
            Self::Closed => "마감",
            Self::Cancelled => "취소",
        }
    }

    /// Whether the posting can still be matched.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Published | Self::InProgress)
    }
}

/// Whether the agency has collected its fee for a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementStatus {
    #[serde(alias = "unsettled")]
    Unsettled,
    #[serde(alias = "settled")]
    Settled,
}

impl SettlementStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unsettled => "미정산",
            Self::Settled => "정산완료",
        }
    }
}

/// An employer's job offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: PostingId,
    pub customer_id: CustomerId,
    pub salary: Decimal,
    pub description: String,
    pub employer_fee_rate: Option<Decimal>,
    pub settlement_status: SettlementStatus,
    pub settlement_amount: Option<Decimal>,
    pub settlement_memo: Option<String>,
    pub posting_status: PostingStatus,
    pub is_favorite: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub deleted_at: Option<NaiveDateTime>,
}

impl JobPosting {
    /// Employer fee on the offered salary (missing rate counts as zero).
    pub fn calculated_fee(&self) -> Result<Decimal> {
        fee_or_zero(self.salary, self.employer_fee_rate)
    }
}

/// A candidate's request for work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSeekingPosting {
    pub id: PostingId,
    pub customer_id: CustomerId,
    pub desired_salary: Decimal,
    pub description: String,
    pub preferred_location: String,
    pub employee_fee_rate: Option<Decimal>,
    pub settlement_status: SettlementStatus,
    pub settlement_amount: Option<Decimal>,
    pub settlement_memo: Option<String>,
    pub posting_status: PostingStatus,
    pub is_favorite: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub deleted_at: Option<NaiveDateTime>,
}

impl JobSeekingPosting {
    /// Employee fee on the desired salary (missing rate counts as zero).
    pub fn calculated_fee(&self) -> Result<Decimal> {
        fee_or_zero(self.desired_salary, self.employee_fee_rate)
    }
}

/// Data for creating a job posting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateJobPosting {
    #[validate(range(min = 1, message = "고객을 선택해주세요"))]
    pub customer_id: CustomerId,
    #[validate(custom(
        function = "crate::validation::positive_amount",
        message = "급여는 0보다 커야 합니다"
    ))]
    pub salary: Decimal,
    #[validate(custom(
        function = "crate::validation::description",
        message = "설명은 최소 10자 이상 입력해주세요"
    ))]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(
        function = "crate::validation::fee_rate",
        message = "수수료율은 0에서 100 사이여야 합니다"
    ))]
    pub employer_fee_rate: Option<Decimal>,
}

/// Partial update of a job posting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateJobPosting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_fee_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_status: Option<SettlementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting_status: Option<PostingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

/// Data for creating a job-seeking posting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateJobSeeking {
    #[validate(range(min = 1, message = "고객을 선택해주세요"))]
    pub customer_id: CustomerId,
    #[validate(custom(
        function = "crate::validation::positive_amount",
        message = "희망 급여는 0보다 커야 합니다"
    ))]
    pub desired_salary: Decimal,
    #[validate(custom(
        function = "crate::validation::description",
        message = "설명은 최소 10자 이상 입력해주세요"
    ))]
    pub description: String,
    #[validate(custom(
        function = "crate::validation::not_blank",
        message = "희망 근무지를 입력해주세요"
    ))]
    pub preferred_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(
        function = "crate::validation::fee_rate",
        message = "수수료율은 0에서 100 사이여야 합니다"
    ))]
    pub employee_fee_rate: Option<Decimal>,
}

/// Partial update of a job-seeking posting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateJobSeeking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_salary: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_fee_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_status: Option<SettlementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting_status: Option<PostingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

/// Filters for listing job postings, sent as the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobPostingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_status: Option<SettlementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

/// Filters for listing job-seeking postings, sent as the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobSeekingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_status: Option<SettlementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}
