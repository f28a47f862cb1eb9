//! Interviews and assignments scheduled against an application.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    InterviewChanges, InterviewDraft, InterviewPatch, InterviewRecord, InterviewRow,
    InterviewStatus, NewInterview,
};
pub use repository::InterviewRepository;
pub use router::interview_router;
pub use service::InterviewService;
