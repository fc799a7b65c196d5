//! Checks the back-office forms run before anything is sent to the server.
//!
//! The rules live as `#[validate(...)]` attributes on the create types; the
//! functions here run them and report the first failing field, in form order,
//! as [`CoreError::Validation`].

use regex::Regex;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{CoreError, Result};
use crate::phone::is_valid_phone_number;
use crate::types::{CreateCustomer, CreateJobPosting, CreateJobSeeking, CreateMatching, CreateTag};

pub const MIN_DESCRIPTION_CHARS: usize = 10;

pub(crate) static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("color pattern is valid"));

const CUSTOMER_FIELDS: &[&str] = &["name", "phone"];
const JOB_POSTING_FIELDS: &[&str] = &["customer_id", "salary", "description", "employer_fee_rate"];
const JOB_SEEKING_FIELDS: &[&str] = &[
    "customer_id",
    "desired_salary",
    "description",
    "preferred_location",
    "employee_fee_rate",
];
const MATCHING_FIELDS: &[&str] = &["agreed_salary", "employer_fee_rate", "employee_fee_rate"];
const TAG_FIELDS: &[&str] = &["tag_name", "tag_color"];
const REGISTRATION_FIELDS: &[&str] = &["username", "password", "security_answer"];

#[derive(Validate)]
struct Registration<'a> {
    #[validate(length(
        min = 3,
        max = 50,
        message = "아이디는 3자 이상 50자 이하여야 합니다"
    ))]
    username: &'a str,
    #[validate(length(
        min = 8,
        message = "비밀번호는 최소 8자 이상이어야 합니다"
    ))]
    password: &'a str,
    #[validate(custom(function = "not_blank", message = "보안 질문 답변을 입력해주세요"))]
    security_answer: &'a str,
}

pub fn validate_customer(customer: &CreateCustomer) -> Result<()> {
    customer
        .validate()
        .map_err(|errors| first_error(&errors, CUSTOMER_FIELDS))
}

pub fn validate_job_posting(posting: &CreateJobPosting) -> Result<()> {
    posting
        .validate()
        .map_err(|errors| first_error(&errors, JOB_POSTING_FIELDS))
}

pub fn validate_job_seeking(posting: &CreateJobSeeking) -> Result<()> {
    posting
        .validate()
        .map_err(|errors| first_error(&errors, JOB_SEEKING_FIELDS))
}

pub fn validate_matching(matching: &CreateMatching) -> Result<()> {
    matching
        .validate()
        .map_err(|errors| first_error(&errors, MATCHING_FIELDS))
}

pub fn validate_tag(tag: &CreateTag) -> Result<()> {
    tag.validate()
        .map_err(|errors| first_error(&errors, TAG_FIELDS))
}

pub fn validate_registration(username: &str, password: &str, security_answer: &str) -> Result<()> {
    Registration {
        username,
        password,
        security_answer,
    }
    .validate()
    .map_err(|errors| first_error(&errors, REGISTRATION_FIELDS))
}

/// Map validator output to the first failing field of `order`.
fn first_error(errors: &ValidationErrors, order: &[&str]) -> CoreError {
    let field_errors = errors.field_errors();
    order
        .iter()
        .find_map(|field| {
            let error = field_errors.get(*field)?.first()?;
            let message = error
                .message
                .as_ref()
                .map_or_else(|| error.code.to_string(), ToString::to_string);
            Some(CoreError::validation(*field, message))
        })
        .unwrap_or_else(|| CoreError::invalid_input(errors.to_string()))
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub(crate) fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("required", "값을 입력해주세요"))
    } else {
        Ok(())
    }
}

pub(crate) fn phone_number(value: &str) -> std::result::Result<(), ValidationError> {
    if is_valid_phone_number(value) {
        Ok(())
    } else {
        Err(invalid("phone", "올바른 전화번호 형식이 아닙니다"))
    }
}

pub(crate) fn description(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().chars().count() < MIN_DESCRIPTION_CHARS {
        Err(invalid("length", "설명은 최소 10자 이상 입력해주세요"))
    } else {
        Ok(())
    }
}

pub(crate) fn positive_amount(value: &Decimal) -> std::result::Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        Err(invalid("positive", "금액은 0보다 커야 합니다"))
    } else {
        Ok(())
    }
}

pub(crate) fn fee_rate(rate: &Decimal) -> std::result::Result<(), ValidationError> {
    if *rate < Decimal::ZERO || *rate > Decimal::ONE_HUNDRED {
        Err(invalid("range", "수수료율은 0에서 100 사이여야 합니다"))
    } else {
        Ok(())
    }
}
