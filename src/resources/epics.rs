//! Epics

use crate::error::Result;
use crate::filter::{self, Filter};
use crate::http::{ApiRequest, HttpClient};
use crate::pagination::{Cursor, PagedIter, DEFAULT_PAGE_LIMIT};
use crate::resources::stories::{Comment, Person};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An epic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Epic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Body for creating or updating an epic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpicRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<Vec<Person>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_id: Option<u64>,
}

/// Iterator over a project's epics
pub type EpicIter = PagedIter<Epic>;

/// Epic operations scoped to one project
#[derive(Debug)]
pub struct EpicService {
    client: Arc<HttpClient>,
    project_id: u64,
}

impl EpicService {
    pub(crate) fn new(client: Arc<HttpClient>, project_id: u64) -> Self {
        Self { client, project_id }
    }

    fn cursor(&self, filters: &[Filter]) -> Cursor {
        let client = Arc::clone(&self.client);
        let project_id = self.project_id;
        let filters = filters.to_vec();
        Cursor::new(
            client,
            Box::new(move || {
                let mut request = ApiRequest::get(format!("projects/{project_id}/epics"));
                filter::apply_all(&filters, &mut request);
                request
            }),
            DEFAULT_PAGE_LIMIT,
        )
    }

    /// Fetch a single page of epics matching `filters`
    pub async fn list(&self, filters: &[Filter]) -> Result<Vec<Epic>> {
        let mut request = ApiRequest::get(format!("projects/{}/epics", self.project_id));
        filter::apply_all(filters, &mut request);
        self.client.execute_json(&request).await
    }

    /// Iterate epics matching `filters` one at a time
    pub fn iter(&self, filters: &[Filter]) -> EpicIter {
        PagedIter::new(self.cursor(filters))
    }

    /// Fetch one epic by id
    pub async fn get(&self, epic_id: u64) -> Result<Epic> {
        let request = ApiRequest::get(format!("projects/{}/epics/{epic_id}", self.project_id));
        self.client.execute_json(&request).await
    }

    /// Create an epic
    ///
    /// A `project_id` in the body overrides the service's project.
    pub async fn create(&self, epic: &EpicRequest) -> Result<Epic> {
        let project = epic.project_id.unwrap_or(self.project_id);
        let request = ApiRequest::post(
            format!("projects/{project}/epics"),
            serde_json::to_value(epic)?,
        );
        self.client.execute_json(&request).await
    }

    /// Update an epic
    pub async fn update(&self, epic_id: u64, epic: &EpicRequest) -> Result<Epic> {
        let project = epic.project_id.unwrap_or(self.project_id);
        let request = ApiRequest::put(
            format!("projects/{project}/epics/{epic_id}"),
            serde_json::to_value(epic)?,
        );
        self.client.execute_json(&request).await
    }

    /// Delete an epic
    pub async fn delete(&self, epic_id: u64) -> Result<()> {
        let request = ApiRequest::delete(format!("projects/{}/epics/{epic_id}", self.project_id));
        self.client.execute_unit(&request).await
    }
}
