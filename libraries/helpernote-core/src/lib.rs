//! Helpernote Core
//!
//! Platform-agnostic domain types, fee rules and input helpers for the
//! Helpernote job-matching back office.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Customer`, `JobPosting`, `Matching`, `Tag`, etc.
//! - **Fee Rules**: percentage-based commission with whole-won rounding
//! - **Formatting**: Korean phone numbers and won amounts
//! - **Validation**: the checks forms run before submitting to the API
//! - **Route Gating**: which dashboard paths require a session
//!
//! # Example
//!
//! ```rust
//! use helpernote_core::fee::fee;
//! use helpernote_core::phone::format_phone_number;
//! use rust_decimal::Decimal;
//!
//! let amount = fee(Decimal::from(3_000_000), Decimal::from(10)).unwrap();
//! assert_eq!(amount, Decimal::from(300_000));
//!
//! assert_eq!(format_phone_number("01012345678"), "010-1234-5678");
//! ```

#![forbid(unsafe_code)]

pub mod currency;
pub mod error;
pub mod fee;
pub mod phone;
pub mod routes;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use fee::{fee, FeeBreakdown};
pub use routes::{route_access, RouteDecision};

pub use types::{
    // Customers
    CreateCustomer, Customer, CustomerId, CustomerQuery, CustomerSearch, CustomerType,
    UpdateCustomer,
    // Postings
    CreateJobPosting, CreateJobSeeking, JobPosting, JobPostingQuery, JobSeekingPosting,
    JobSeekingQuery, PostingId, PostingStatus, SettlementStatus, UpdateJobPosting,
    UpdateJobSeeking,
    // Matchings
    CancelMatching, CreateMatching, Matching, MatchingId, MatchingQuery, MatchingStatus,
    UpdateMatching, UpdateMatchingStatus,
    // Settlements
    PostingType, SettlementItem, SettlementSummary, UpdateSettlement,
    // Tags, files, users, memos
    AttachTags, CreateTag, CustomerFile, FileId, FileType, Tag, TagId, UpdateTag, UploadedFile,
    CreateCustomerMemo, CreateMatchingMemo, Memo, UpdateProfile, User, UserId, UserProfile,
    DEFAULT_TAG_COLOR,
    // Lists
    Page,
};
