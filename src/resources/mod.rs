//! Typed resource services
//!
//! Each service assembles URLs and bodies for one resource kind and calls
//! the HTTP client directly, or constructs a pagination cursor for listing
//! endpoints.

pub mod epics;
pub mod iterations;
pub mod labels;
pub mod stories;

pub use epics::{Epic, EpicIter, EpicRequest, EpicService};
pub use iterations::{
    Iteration, IterationIter, IterationOverride, IterationOverrideRequest, IterationService,
};
pub use labels::{Label, LabelService};
pub use stories::{
    Comment, Person, Story, StoryIter, StoryService, StoryState, StoryType, Task,
};
