//! Free-text notes on customers and matchings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::user::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: i64,
    /// Set for customer memos
    #[serde(default)]
    pub customer_id: Option<i64>,
    /// Set for matching memos
    #[serde(default)]
    pub matching_id: Option<i64>,
    pub memo_content: String,
    #[serde(default)]
    pub created_by: Option<UserId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub deleted_at: Option<NaiveDateTime>,
}

/// Body for adding a memo to a customer. The server rejects a `customer_id`
/// that differs from the one in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomerMemo {
    pub customer_id: i64,
    pub memo_content: String,
}

impl CreateCustomerMemo {
    pub fn new(customer_id: i64, content: impl Into<String>) -> Self {
        Self {
            customer_id,
            memo_content: content.into(),
        }
    }
}

/// Body for adding a memo to a matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMatchingMemo {
    pub matching_id: i64,
    pub memo_content: String,
}

impl CreateMatchingMemo {
    pub fn new(matching_id: i64, content: impl Into<String>) -> Self {
        Self {
            matching_id,
            memo_content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_bodies_carry_owner_id() {
        let body = serde_json::to_value(CreateCustomerMemo::new(5, "메모 내용")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"customer_id": 5, "memo_content": "메모 내용"})
        );

        let body = serde_json::to_value(CreateMatchingMemo::new(9, "면접 완료")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"matching_id": 9, "memo_content": "면접 완료"})
        );
    }
}
