//! Iterations

use crate::error::Result;
use crate::filter::{self, Filter};
use crate::http::{ApiRequest, HttpClient};
use crate::pagination::{Cursor, PagedIter, DEFAULT_PAGE_LIMIT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An iteration (sprint)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Iteration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Per-iteration overrides as the server reports them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IterationOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Body for overriding one iteration's settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IterationOverrideRequest {
    pub iteration_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_strength: Option<f64>,
}

/// Iterator over a project's iterations
pub type IterationIter = PagedIter<Iteration>;

/// Iteration operations scoped to one project
#[derive(Debug)]
pub struct IterationService {
    client: Arc<HttpClient>,
    project_id: u64,
}

impl IterationService {
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
                let mut request = ApiRequest::get(format!("projects/{project_id}/iterations"));
                filter::apply_all(&filters, &mut request);
                request
            }),
            DEFAULT_PAGE_LIMIT,
        )
    }

    /// Fetch every iteration matching `filters`, draining all pages
    pub async fn list(&self, filters: &[Filter]) -> Result<Vec<Iteration>> {
        let cursor = self.cursor(filters);
        let mut iterations = Vec::new();
        cursor.collect_into(&mut iterations).await?;
        Ok(iterations)
    }

    /// Iterate iterations matching `filters` one at a time
    pub fn iter(&self, filters: &[Filter]) -> IterationIter {
        PagedIter::new(self.cursor(filters))
    }

    /// Override one iteration's length or team strength
    pub async fn override_iteration(
        &self,
        overrides: &IterationOverrideRequest,
    ) -> Result<IterationOverride> {
        let request = ApiRequest::put(
            format!(
                "projects/{}/iterations/{}",
                self.project_id, overrides.iteration_number
            ),
            serde_json::to_value(overrides)?,
        );
        self.client.execute_json(&request).await
    }
}
