//! Stories and their nested resources (tasks, owners, comments)

use crate::error::{Error, Result};
use crate::filter::{self, Filter};
use crate::http::{ApiRequest, HttpClient};
use crate::pagination::{Cursor, PagedIter, DEFAULT_PAGE_LIMIT};
use crate::resources::labels::Label;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Kind of work a story represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryType {
    Feature,
    Bug,
    Chore,
    Release,
}

/// Workflow state of a story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryState {
    Unscheduled,
    Planned,
    Unstarted,
    Started,
    Finished,
    Delivered,
    Accepted,
    Rejected,
}

impl StoryState {
    /// Wire representation of this state
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryState::Unscheduled => "unscheduled",
            StoryState::Planned => "planned",
            StoryState::Unstarted => "unstarted",
            StoryState::Started => "started",
            StoryState::Finished => "finished",
            StoryState::Delivered => "delivered",
            StoryState::Accepted => "accepted",
            StoryState::Rejected => "rejected",
        }
    }
}

/// A story
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Story {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_type: Option<StoryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_state: Option<StoryState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A task attached to a story
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_id: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A project member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A comment on a story or epic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_attachment_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_attachment_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Iterator over a project's stories
pub type StoryIter = PagedIter<Story>;

/// Story operations scoped to one project
#[derive(Debug)]
pub struct StoryService {
    client: Arc<HttpClient>,
    project_id: u64,
}

impl StoryService {
    pub(crate) fn new(client: Arc<HttpClient>, project_id: u64) -> Self {
        Self { client, project_id }
    }

    fn list_request(&self, filters: &[Filter]) -> ApiRequest {
        let mut request = ApiRequest::get(format!("projects/{}/stories", self.project_id));
        filter::apply_all(filters, &mut request);
        request
    }

    fn cursor(&self, filters: &[Filter]) -> Cursor {
        let client = Arc::clone(&self.client);
        let project_id = self.project_id;
        let filters = filters.to_vec();
        Cursor::new(
            client,
            Box::new(move || {
                let mut request = ApiRequest::get(format!("projects/{project_id}/stories"));
                filter::apply_all(&filters, &mut request);
                request
            }),
            DEFAULT_PAGE_LIMIT,
        )
    }

    /// Fetch a single page of stories matching `filters`
    pub async fn list(&self, filters: &[Filter]) -> Result<Vec<Story>> {
        self.client.execute_json(&self.list_request(filters)).await
    }

    /// Fetch every story matching `filters`, draining all pages
    pub async fn list_all(&self, filters: &[Filter]) -> Result<Vec<Story>> {
        let cursor = self.cursor(filters);
        let mut stories = Vec::new();
        cursor.collect_into(&mut stories).await?;
        Ok(stories)
    }

    /// Iterate stories matching `filters` one at a time
    pub fn iter(&self, filters: &[Filter]) -> StoryIter {
        PagedIter::new(self.cursor(filters))
    }

    /// Fetch one story by id
    pub async fn get(&self, story_id: u64) -> Result<Story> {
        let request = ApiRequest::get(format!("projects/{}/stories/{story_id}", self.project_id));
        self.client.execute_json(&request).await
    }

    /// Update a story, returning the server's view of it
    pub async fn update(&self, story_id: u64, story: &Story) -> Result<Story> {
        let request = ApiRequest::put(
            format!("projects/{}/stories/{story_id}", self.project_id),
            serde_json::to_value(story)?,
        );
        self.client.execute_json(&request).await
    }

    /// List a story's tasks
    pub async fn list_tasks(&self, story_id: u64) -> Result<Vec<Task>> {
        let request = ApiRequest::get(format!(
            "projects/{}/stories/{story_id}/tasks",
            self.project_id
        ));
        self.client.execute_json(&request).await
    }

    /// Add a task to a story
    pub async fn add_task(&self, story_id: u64, task: &Task) -> Result<()> {
        if task.description.is_empty() {
            return Err(Error::missing_field("description"));
        }
        let request = ApiRequest::post(
            format!("projects/{}/stories/{story_id}/tasks", self.project_id),
            serde_json::to_value(task)?,
        );
        self.client.execute_unit(&request).await
    }

    /// List a story's owners
    pub async fn list_owners(&self, story_id: u64) -> Result<Vec<Person>> {
        let request = ApiRequest::get(format!(
            "projects/{}/stories/{story_id}/owners",
            self.project_id
        ));
        self.client.execute_json(&request).await
    }

    /// Add a comment to a story, returning the created comment
    pub async fn add_comment(&self, story_id: u64, comment: &Comment) -> Result<Comment> {
        let request = ApiRequest::post(
            format!("projects/{}/stories/{story_id}/comments", self.project_id),
            serde_json::to_value(comment)?,
        );
        self.client.execute_json(&request).await
    }
}
