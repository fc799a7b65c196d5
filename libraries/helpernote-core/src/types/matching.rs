//! Matchings: an agreed pairing between a job posting and a job-seeking posting.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::posting::PostingId;
use super::user::UserId;
use crate::error::{CoreError, Result};
use crate::fee::FeeBreakdown;

pub type MatchingId = i64;

/// Lifecycle of a matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchingStatus {
    InProgress,
    Completed,
    Cancelled,
}

impl MatchingStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::InProgress => "진행중",
            Self::Completed => "완료",
            Self::Cancelled => "취소",
        }
    }

    /// Only matchings still in progress can be completed.
    pub fn can_complete(self) -> bool {
        self == Self::InProgress
    }

    /// Completed and already-cancelled matchings cannot be cancelled.
    pub fn can_cancel(self) -> bool {
        self == Self::InProgress
    }

    /// Reject a transition the server would refuse anyway.
    pub fn check_transition(self, next: Self) -> Result<()> {
        let allowed = match next {
            Self::InProgress => self == Self::InProgress,
            Self::Completed => self.can_complete(),
            Self::Cancelled => self.can_cancel(),
        };
        if allowed {
            Ok(())
        } else {
            Err(CoreError::validation(
                "matching_status",
                match self {
                    Self::Completed => "완료된 매칭은 변경할 수 없습니다",
                    Self::Cancelled => "이미 취소된 매칭입니다",
                    Self::InProgress => "허용되지 않는 상태 변경입니다",
                },
            ))
        }
    }
}

/// A matching as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matching {
    pub id: MatchingId,
    pub job_posting_id: PostingId,
    pub job_seeking_posting_id: PostingId,
    pub matched_at: NaiveDateTime,
    pub agreed_salary: Decimal,
    pub employer_fee_rate: Decimal,
    pub employee_fee_rate: Decimal,
    pub employer_fee_amount: Option<Decimal>,
    pub employee_fee_amount: Option<Decimal>,
    pub matching_status: MatchingStatus,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<NaiveDateTime>,
    pub cancelled_by: Option<UserId>,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub deleted_at: Option<NaiveDateTime>,
}

impl Matching {
    /// Fees for this matching.
    ///
    /// Amounts stored by the server win; a missing side is recomputed from
    /// the agreed salary and its rate.
    pub fn fees(&self) -> Result<FeeBreakdown> {
        let computed = FeeBreakdown::for_matching(
            self.agreed_salary,
            self.employer_fee_rate,
            self.employee_fee_rate,
        )?;
        Ok(FeeBreakdown {
            employer_fee: self.employer_fee_amount.unwrap_or(computed.employer_fee),
            employee_fee: self.employee_fee_amount.unwrap_or(computed.employee_fee),
        })
    }
}

/// Data for creating a matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateMatching {
    pub job_posting_id: PostingId,
    pub job_seeking_posting_id: PostingId,
    #[validate(custom(
        function = "crate::validation::positive_amount",
        message = "합의 급여는 0보다 커야 합니다"
    ))]
    pub agreed_salary: Decimal,
    #[validate(custom(
        function = "crate::validation::fee_rate",
        message = "수수료율은 0에서 100 사이여야 합니다"
    ))]
    pub employer_fee_rate: Decimal,
    #[validate(custom(
        function = "crate::validation::fee_rate",
        message = "수수료율은 0에서 100 사이여야 합니다"
    ))]
    pub employee_fee_rate: Decimal,
}

impl CreateMatching {
    /// Fees the server will record for this matching.
    pub fn preview_fees(&self) -> Result<FeeBreakdown> {
        FeeBreakdown::for_matching(
            self.agreed_salary,
            self.employer_fee_rate,
            self.employee_fee_rate,
        )
    }
}

/// Partial update of a matching
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMatching {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreed_salary: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_fee_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_fee_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_status: Option<MatchingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

/// Body of `PUT /api/matchings/{id}/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMatchingStatus {
    pub matching_status: MatchingStatus,
}

/// Body of `POST /api/matchings/{id}/cancel`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelMatching {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

/// Filters for listing matchings, sent as the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MatchingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}
