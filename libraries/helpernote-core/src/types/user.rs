//! The signed-in back-office user.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// User summary returned with a login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// Full profile from `GET /api/profile`.
///
/// The default fee rates pre-fill new postings and matchings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub phone: Option<String>,
    pub default_employer_fee_rate: Decimal,
    pub default_employee_fee_rate: Decimal,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    #[serde(default)]
    pub default_employer_fee_rate: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    #[serde(default)]
    pub default_employee_fee_rate: Option<Decimal>,
}
