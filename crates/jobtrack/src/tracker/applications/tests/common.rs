use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::Request;
use axum::response::Response;
use axum::{body::Body, Extension, Router};
use serde_json::Value;

use crate::auth::{SessionManager, SessionUser};
use crate::store::RepositoryError;
use crate::tracker::applications::domain::{ApplicationRecord, ApplicationStatus, NewApplication};
use crate::tracker::applications::repository::ApplicationRepository;
use crate::tracker::applications::{application_router, ApplicationService};

pub(super) const OWNER_ID: &str = "665f1b2a9c3d4e5f6a7b8c00";
pub(super) const OTHER_ID: &str = "665f1b2a9c3d4e5f6a7b8cff";
pub(super) const POSTING_ID: &str = "665f1b2a9c3d4e5f6a7b8c9d";

pub(super) fn new_application() -> NewApplication {
    NewApplication {
        job_posting_id: POSTING_ID.to_string(),
        status: ApplicationStatus::Applied,
        applied_at: None,
        memo: Some("채용 담당자와 통화함".to_string()),
    }
}

pub(super) fn build_service() -> (ApplicationService<MemoryApplications>, Arc<MemoryApplications>) {
    let repository = Arc::new(MemoryApplications::default());
    let service = ApplicationService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryApplications {
    pub(super) records: Arc<Mutex<HashMap<String, ApplicationRecord>>>,
}

impl ApplicationRepository for MemoryApplications {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut records = self.records.lock().expect("repository mutex poisoned");
        if records.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &str) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records.get(id).cloned())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().expect("repository mutex poisoned");
        if records.contains_key(&record.id) {
            records.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn remove(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut records = self.records.lock().expect("repository mutex poisoned");
        Ok(records.remove(id).is_some())
    }
}

pub(super) struct UnavailableApplications;

impl ApplicationRepository for UnavailableApplications {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &str) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_for_user(&self, _user_id: &str) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &str) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Router plus a live session cookie for the given user.
pub(super) fn router_with_session(
    service: ApplicationService<MemoryApplications>,
    user_id: &str,
) -> (Router, String) {
    let sessions = Arc::new(SessionManager::new("jobtrack_session"));
    let token = sessions.issue(SessionUser {
        id: user_id.to_string(),
        name: "김지원".to_string(),
        email: "jiwon@example.com".to_string(),
    });
    let cookie = format!("jobtrack_session={token}");
    let router = application_router(Arc::new(service)).layer(Extension(sessions));
    (router, cookie)
}

pub(super) fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 65536)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
