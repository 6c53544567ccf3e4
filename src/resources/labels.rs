//! Labels

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Label operations scoped to one project
#[derive(Debug)]
pub struct LabelService {
    client: Arc<HttpClient>,
    project_id: u64,
}

impl LabelService {
    pub(crate) fn new(client: Arc<HttpClient>, project_id: u64) -> Self {
        Self { client, project_id }
    }

    /// List the project's labels
    pub async fn list(&self) -> Result<Vec<Label>> {
        let request = ApiRequest::get(format!("projects/{}/labels", self.project_id));
        self.client.execute_json(&request).await
    }

    /// Create a label
    pub async fn create(&self, name: &str) -> Result<Label> {
        let request = ApiRequest::post(
            format!("projects/{}/labels", self.project_id),
            serde_json::json!({ "name": name }),
        );
        self.client.execute_json(&request).await
    }

    /// Fetch one label by id
    pub async fn get(&self, label_id: u64) -> Result<Label> {
        let request = ApiRequest::get(format!("projects/{}/labels/{label_id}", self.project_id));
        self.client.execute_json(&request).await
    }

    /// Rename a label
    pub async fn rename(&self, label_id: u64, new_name: &str) -> Result<Label> {
        let request = ApiRequest::put(
            format!("projects/{}/labels/{label_id}", self.project_id),
            serde_json::json!({ "name": new_name }),
        );
        self.client.execute_json(&request).await
    }

    /// Delete a label
    pub async fn delete(&self, label_id: u64) -> Result<()> {
        let request =
            ApiRequest::delete(format!("projects/{}/labels/{label_id}", self.project_id));
        self.client.execute_unit(&request).await
    }
}
