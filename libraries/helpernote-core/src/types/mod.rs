/// Domain types exchanged with the Helpernote backend
mod customer;
mod file;
mod matching;
mod memo;
mod page;
mod posting;
mod settlement;
mod tag;
mod user;

pub use customer::{
    CreateCustomer, Customer, CustomerId, CustomerQuery, CustomerSearch, CustomerType,
    UpdateCustomer,
};
pub use file::{CustomerFile, FileId, FileType, UploadedFile};
pub use matching::{
    CancelMatching, CreateMatching, Matching, MatchingId, MatchingQuery, MatchingStatus,
    UpdateMatching, UpdateMatchingStatus,
};
pub use memo::{CreateCustomerMemo, CreateMatchingMemo, Memo};
pub use page::Page;
pub use posting::{
    CreateJobPosting, CreateJobSeeking, JobPosting, JobPostingQuery, JobSeekingPosting,
    JobSeekingQuery, PostingId, PostingStatus, SettlementStatus, UpdateJobPosting,
    UpdateJobSeeking,
};
pub use settlement::{PostingType, SettlementItem, SettlementSummary, UpdateSettlement};
pub use tag::{AttachTags, CreateTag, Tag, TagId, UpdateTag, DEFAULT_TAG_COLOR};
pub use user::{UpdateProfile, User, UserId, UserProfile};
