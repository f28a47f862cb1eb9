//! Applications logged against a job posting, carrying the pipeline status.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationChanges, ApplicationDraft, ApplicationPatch, ApplicationRecord, ApplicationRow,
    ApplicationStatus, NewApplication,
};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::ApplicationService;
