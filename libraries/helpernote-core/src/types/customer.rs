//! Customer records (employers, job seekers, or both).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::file::FileId;
use super::user::UserId;

pub type CustomerId = i64;

/// Which side of the market a customer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerType {
    Employer,
    Employee,
    Both,
}

impl CustomerType {
    /// Display label used in the back office.
    pub fn label(self) -> &'static str {
        match self {
            Self::Employer => "고용주",
            Self::Employee => "근로자",
            Self::Both => "양쪽",
        }
    }

    /// Whether this customer can own job postings.
    pub fn is_employer(self) -> bool {
        matches!(self, Self::Employer | Self::Both)
    }

    /// Whether this customer can own job-seeking postings.
    pub fn is_employee(self) -> bool {
        matches!(self, Self::Employee | Self::Both)
    }
}

/// A customer as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub user_id: UserId,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub phone: String,
    pub address: Option<String>,
    pub profile_photo_id: Option<FileId>,
    pub customer_type: CustomerType,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub deleted_at: Option<NaiveDateTime>,
}

impl Customer {
    /// Soft-deleted customers keep their row but carry a deletion timestamp.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Data for creating a new customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateCustomer {
    #[validate(custom(
        function = "crate::validation::not_blank",
        message = "이름을 입력해주세요"
    ))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[validate(custom(
        function = "crate::validation::phone_number",
        message = "올바른 전화번호 형식이 아닙니다"
    ))]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub customer_type: CustomerType,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCustomer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo_id: Option<FileId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<CustomerType>,
}

/// Filters for listing customers, sent as the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomerQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<CustomerType>,
    /// Only customers carrying all of these tags, sent as `tag_ids=1,2,3`
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "comma_separated"
    )]
    pub tag_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

fn comma_separated<S: serde::Serializer>(ids: &[i64], serializer: S) -> Result<S::Ok, S::Error> {
    let joined: Vec<String> = ids.iter().map(ToString::to_string).collect();
    serializer.serialize_str(&joined.join(","))
}

/// Free-text customer search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSearch {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl CustomerSearch {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            limit: None,
            offset: None,
        }
    }
}
