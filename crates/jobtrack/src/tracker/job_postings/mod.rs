//! Job postings: the descriptive record an application is logged against.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    JobPostingChanges, JobPostingDraft, JobPostingPatch, JobPostingRecord, JobPostingRow,
    NewJobPosting,
};
pub use repository::JobPostingRepository;
pub use router::job_posting_router;
pub use service::JobPostingService;
