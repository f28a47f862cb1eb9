//! Core library for the job-application tracker.
//!
//! The tracker keeps three owned record collections per user (job postings,
//! applications against those postings, and interviews tied to an application)
//! behind per-resource services that enforce ownership on every operation.
//! Persistence is abstracted behind repository traits so the HTTP service and
//! the tests can supply their own backends.

pub mod auth;
pub mod config;
pub mod error;
pub mod ident;
pub mod patch;
pub mod store;
pub mod telemetry;
pub mod tracker;
