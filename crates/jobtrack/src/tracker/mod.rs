//! The three tracked resources (job postings, applications, interviews)
//! plus the pure derivation utilities the dashboard renders from.
//!
//! Each resource module follows the same layout: `domain` (records, rows,
//! request payloads, status enums), `repository` (storage trait), `service`
//! (owner-scoped operations), and `router` (HTTP surface).

pub mod applications;
pub mod dashboard;
pub mod interviews;
pub mod job_postings;
pub mod validate;
