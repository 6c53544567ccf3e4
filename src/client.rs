//! Top-level client and project handle

use crate::http::{ClientConfig, HttpClient};
use crate::resources::{EpicService, IterationService, LabelService, StoryService};
use std::sync::Arc;

/// Entry point to the Tracker API
///
/// Cheap to clone; all services share one underlying HTTP client.
#[derive(Debug, Clone)]
pub struct Client {
    http: Arc<HttpClient>,
}

impl Client {
    /// Create a client authenticated with `token` against the public API
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::builder().token(token).build())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            http: Arc::new(HttpClient::with_config(config)),
        }
    }

    /// Scope operations to one project
    pub fn project(&self, project_id: u64) -> Project {
        Project {
            http: Arc::clone(&self.http),
            project_id,
        }
    }
}

/// Handle for one project's resources
#[derive(Debug, Clone)]
pub struct Project {
    http: Arc<HttpClient>,
    project_id: u64,
}

impl Project {
    /// This project's id
    pub fn id(&self) -> u64 {
        self.project_id
    }

    /// Story operations
    pub fn stories(&self) -> StoryService {
        StoryService::new(Arc::clone(&self.http), self.project_id)
    }

    /// Epic operations
    pub fn epics(&self) -> EpicService {
        EpicService::new(Arc::clone(&self.http), self.project_id)
    }

    /// Iteration operations
    pub fn iterations(&self) -> IterationService {
        IterationService::new(Arc::clone(&self.http), self.project_id)
    }

    /// Label operations
    pub fn labels(&self) -> LabelService {
        LabelService::new(Arc::clone(&self.http), self.project_id)
    }
}
