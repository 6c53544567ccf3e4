//! # tracker-client
//!
//! A typed async client for the Pivotal Tracker v5 REST API.
//!
//! Listing endpoints are paginated server-side via `limit`/`offset` query
//! parameters, with the server reporting its view of each page in
//! `X-Tracker-Pagination-*` response headers. The [`pagination`] module
//! turns that protocol into a resumable page cursor and a one-item-at-a-time
//! iterator; the resource services in [`resources`] are thin typed wrappers
//! over it.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tracker_client::{Client, Filter, StoryState};
//!
//! #[tokio::main]
//! async fn main() -> tracker_client::Result<()> {
//!     let client = Client::new("your-api-token");
//!     let stories = client.project(99).stories();
//!
//!     // Drain every matching story across all pages.
//!     let started = stories
//!         .list_all(&[Filter::WithState(StoryState::Started)])
//!         .await?;
//!
//!     // Or pull them one at a time.
//!     let mut iter = stories.iter(&[]);
//!     while let Some(story) = iter.next().await? {
//!         println!("{:?}", story.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// HTTP request templates and execution
pub mod http;

/// Listing filters
pub mod filter;

/// The pagination cursor and typed iterators
pub mod pagination;

/// Typed resource services
pub mod resources;

/// Top-level client
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{Client, Project};
pub use error::{Error, Result};
pub use filter::Filter;
pub use pagination::{Advance, Cursor, CursorState, PageMeta, PagedIter, DEFAULT_PAGE_LIMIT};
pub use resources::{
    Comment, Epic, EpicRequest, Iteration, IterationOverride, IterationOverrideRequest, Label,
    Person, Story, StoryState, StoryType, Task,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
