//! Listing filters
//!
//! Each [`Filter`] appends one query parameter to a listing request.
//! Filters never overwrite prior values of the same key; the pagination
//! cursor is the only component that replaces `limit`/`offset` outright.

use crate::http::ApiRequest;
use crate::resources::stories::StoryState;
use chrono::{DateTime, Utc};

/// A query-string filter for listing endpoints
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Maximum items per page
    Limit(u32),
    /// Zero-based index of the first item to return
    Offset(u32),
    /// Only items carrying this label
    WithLabel(String),
    /// Only stories in this state
    WithState(StoryState),
    /// Only stories after this story id
    AfterStoryId(u64),
    /// Only stories before this story id
    BeforeStoryId(u64),
    /// Only stories accepted before this instant
    AcceptedBefore(DateTime<Utc>),
    /// Only items created before this instant
    CreatedBefore(DateTime<Utc>),
    /// Only items created after this instant
    CreatedAfter(DateTime<Utc>),
    /// Free-text search query
    Query(String),
    /// Iteration scope, e.g. `done`, `current`, `backlog`
    Scope(String),
}

impl Filter {
    /// Query parameter key for this filter
    pub fn key(&self) -> &'static str {
        match self {
            Filter::Limit(_) => "limit",
            Filter::Offset(_) => "offset",
            Filter::WithLabel(_) => "with_label",
            Filter::WithState(_) => "with_state",
            Filter::AfterStoryId(_) => "after_story_id",
            Filter::BeforeStoryId(_) => "before_story_id",
            Filter::AcceptedBefore(_) => "accepted_before",
            Filter::CreatedBefore(_) => "created_before",
            Filter::CreatedAfter(_) => "created_after",
            Filter::Query(_) => "query",
            Filter::Scope(_) => "scope",
        }
    }

    /// Query parameter value for this filter
    pub fn value(&self) -> String {
        match self {
            Filter::Limit(n) | Filter::Offset(n) => n.to_string(),
            Filter::WithLabel(s) | Filter::Query(s) | Filter::Scope(s) => s.clone(),
            Filter::WithState(state) => state.as_str().to_string(),
            Filter::AfterStoryId(id) | Filter::BeforeStoryId(id) => id.to_string(),
            Filter::AcceptedBefore(t) | Filter::CreatedBefore(t) | Filter::CreatedAfter(t) => {
                t.to_rfc3339()
            }
        }
    }

    /// Append this filter to a request's query string
    pub fn apply(&self, request: &mut ApiRequest) {
        request.append_query(self.key(), self.value());
    }
}

/// Append every filter to a request, in order
pub fn apply_all(filters: &[Filter], request: &mut ApiRequest) {
    for filter in filters {
        filter.apply(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_filter_keys_and_values() {
        assert_eq!(Filter::Limit(50).key(), "limit");
        assert_eq!(Filter::Limit(50).value(), "50");
        assert_eq!(Filter::Offset(20).key(), "offset");
        assert_eq!(Filter::WithLabel("infra".into()).value(), "infra");
        assert_eq!(Filter::WithState(StoryState::Started).value(), "started");
        assert_eq!(Filter::AfterStoryId(42).key(), "after_story_id");
        assert_eq!(Filter::Query("login".into()).key(), "query");
        assert_eq!(Filter::Scope("done".into()).key(), "scope");
    }

    #[test]
    fn test_date_filters_are_rfc3339() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let value = Filter::CreatedAfter(t).value();
        assert_eq!(value, "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_apply_all_appends_in_order() {
        let mut req = ApiRequest::get("projects/1/stories");
        apply_all(
            &[
                Filter::WithLabel("a".into()),
                Filter::WithLabel("b".into()),
                Filter::Limit(5),
            ],
            &mut req,
        );

        assert_eq!(
            req.query,
            vec![
                ("with_label".to_string(), "a".to_string()),
                ("with_label".to_string(), "b".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }
}
