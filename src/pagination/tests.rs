//! Tests for the pagination module

use super::*;
use crate::error::Error;
use crate::http::{ApiRequest, ClientConfig, HttpClient};
use pretty_assertions::assert_eq;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct Item {
    id: u64,
}

fn meta_headers(limit: u64, offset: u64, total: u64, returned: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(HEADER_LIMIT, HeaderValue::from_str(&limit.to_string()).unwrap());
    headers.insert(HEADER_OFFSET, HeaderValue::from_str(&offset.to_string()).unwrap());
    headers.insert(HEADER_TOTAL, HeaderValue::from_str(&total.to_string()).unwrap());
    headers.insert(
        HEADER_RETURNED,
        HeaderValue::from_str(&returned.to_string()).unwrap(),
    );
    headers
}

/// A page response with ids `offset..offset + returned` and the four
/// pagination headers set
fn page(limit: u64, offset: u64, total: u64, returned: u64) -> ResponseTemplate {
    let items: Vec<serde_json::Value> = (offset..offset + returned)
        .map(|id| serde_json::json!({"id": id}))
        .collect();
    ResponseTemplate::new(200)
        .insert_header(HEADER_LIMIT, limit.to_string().as_str())
        .insert_header(HEADER_OFFSET, offset.to_string().as_str())
        .insert_header(HEADER_TOTAL, total.to_string().as_str())
        .insert_header(HEADER_RETURNED, returned.to_string().as_str())
        .set_body_json(items)
}

fn test_client(server: &MockServer) -> Arc<HttpClient> {
    Arc::new(HttpClient::with_config(
        ClientConfig::builder().base_url(server.uri()).build(),
    ))
}

fn stories_cursor(client: Arc<HttpClient>) -> Cursor {
    Cursor::new(
        client,
        Box::new(|| ApiRequest::get("projects/99/stories")),
        DEFAULT_PAGE_LIMIT,
    )
}

// ============================================================================
// PageMeta Tests
// ============================================================================

#[test]
fn test_page_meta_from_headers() {
    let headers = meta_headers(10, 20, 95, 10);
    let meta = PageMeta::from_headers(&headers).unwrap();
    assert_eq!(
        meta,
        PageMeta {
            limit: 10,
            offset: 20,
            total: 95,
            returned: 10
        }
    );
}

#[test]
fn test_page_meta_missing_header() {
    let mut headers = meta_headers(10, 0, 95, 10);
    headers.remove(HEADER_TOTAL);

    let err = PageMeta::from_headers(&headers).unwrap_err();
    assert!(matches!(err, Error::PaginationHeader { ref header, .. } if header == HEADER_TOTAL));
}

#[test]
fn test_page_meta_non_numeric_header() {
    let mut headers = meta_headers(10, 0, 95, 10);
    headers.insert(HEADER_RETURNED, HeaderValue::from_static("ten"));

    let err = PageMeta::from_headers(&headers).unwrap_err();
    assert!(matches!(err, Error::PaginationHeader { ref header, .. } if header == HEADER_RETURNED));
}

#[test]
fn test_page_meta_step_takes_min() {
    let capped = PageMeta {
        limit: 5,
        offset: 0,
        total: 100,
        returned: 10,
    };
    assert_eq!(capped.step(), 5);

    let short = PageMeta {
        limit: 10,
        offset: 0,
        total: 100,
        returned: 3,
    };
    assert_eq!(short.step(), 3);
}

#[test]
fn test_advance_flags() {
    assert!(Advance::End.is_end());
    assert!(!Advance::End.is_more());
    assert!(Advance::More.is_more());
}

// ============================================================================
// Cursor Tests
// ============================================================================

#[tokio::test]
async fn test_cursor_three_page_scenario() {
    let server = MockServer::start().await;

    // total=25, limit=10: pages return 10, 10, 5 items.
    for (offset, returned) in [(0u64, 10u64), (10, 10), (20, 5)] {
        Mock::given(method("GET"))
            .and(path("/projects/99/stories"))
            .and(query_param("offset", offset.to_string()))
            .and(query_param("limit", "10"))
            .respond_with(page(10, offset, 25, returned))
            .mount(&server)
            .await;
    }

    let cursor = stories_cursor(test_client(&server));

    let mut buf: Vec<Item> = Vec::new();
    assert_eq!(cursor.advance(&mut buf).await.unwrap(), Advance::More);
    assert_eq!(buf.len(), 10);
    assert_eq!(cursor.state().await.offset, 10);

    let mut buf: Vec<Item> = Vec::new();
    assert_eq!(cursor.advance(&mut buf).await.unwrap(), Advance::More);
    assert_eq!(buf.len(), 10);
    assert_eq!(cursor.state().await.offset, 20);

    // Third page carries the final 5 items together with the end signal.
    let mut buf: Vec<Item> = Vec::new();
    assert_eq!(cursor.advance(&mut buf).await.unwrap(), Advance::End);
    assert_eq!(buf.len(), 5);

    let state = cursor.state().await;
    assert_eq!(state.offset, 25);
    assert_eq!(state.request_count, 3);
    assert_eq!(state.pages, 3);
}

#[tokio::test]
async fn test_cursor_server_capped_limit() {
    let server = MockServer::start().await;

    // Server reports a limit of 5 even though 10 items came back: the
    // offset must advance by min(10, 5) = 5.
    Mock::given(method("GET"))
        .and(path("/projects/99/stories"))
        .respond_with(page(5, 0, 100, 10))
        .mount(&server)
        .await;

    let cursor = stories_cursor(test_client(&server));

    let mut buf: Vec<Item> = Vec::new();
    assert_eq!(cursor.advance(&mut buf).await.unwrap(), Advance::More);
    assert_eq!(cursor.state().await.offset, 5);
}

#[tokio::test]
async fn test_cursor_first_advance_honors_preseeded_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/99/stories"))
        .and(query_param("limit", "3"))
        .and(query_param("offset", "6"))
        .respond_with(page(3, 6, 100, 3))
        .mount(&server)
        .await;

    // The second advance must discard the seeded values in favor of the
    // cursor's own bookkeeping: limit back to the default, offset 6+3.
    Mock::given(method("GET"))
        .and(path("/projects/99/stories"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "9"))
        .respond_with(page(10, 9, 100, 10))
        .mount(&server)
        .await;

    let cursor = Cursor::new(
        test_client(&server),
        Box::new(|| {
            ApiRequest::get("projects/99/stories")
                .query("limit", "3")
                .query("offset", "6")
        }),
        DEFAULT_PAGE_LIMIT,
    );

    let mut buf: Vec<Item> = Vec::new();
    assert_eq!(cursor.advance(&mut buf).await.unwrap(), Advance::More);
    assert_eq!(cursor.state().await.offset, 9);

    let mut buf: Vec<Item> = Vec::new();
    assert_eq!(cursor.advance(&mut buf).await.unwrap(), Advance::More);
    assert_eq!(cursor.state().await.offset, 19);
}

#[tokio::test]
async fn test_cursor_fills_defaults_for_absent_params() {
    let server = MockServer::start().await;

    // Only limit was seeded; offset gets the default 0.
    Mock::given(method("GET"))
        .and(path("/projects/99/stories"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "0"))
        .respond_with(page(5, 0, 5, 5))
        .mount(&server)
        .await;

    let cursor = Cursor::new(
        test_client(&server),
        Box::new(|| ApiRequest::get("projects/99/stories").query("limit", "5")),
        DEFAULT_PAGE_LIMIT,
    );

    let mut buf: Vec<Item> = Vec::new();
    assert_eq!(cursor.advance(&mut buf).await.unwrap(), Advance::End);
    assert_eq!(buf.len(), 5);
}

#[tokio::test]
async fn test_cursor_failed_advance_is_retry_safe() {
    let server = MockServer::start().await;

    // First attempt fails with a 500.
    Mock::given(method("GET"))
        .and(path("/projects/99/stories"))
        .and(query_param("limit", "7"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    // The retry must reissue the identical request, still honoring the
    // seeded limit because no advance has succeeded yet.
    Mock::given(method("GET"))
        .and(path("/projects/99/stories"))
        .and(query_param("limit", "7"))
        .and(query_param("offset", "0"))
        .respond_with(page(7, 0, 7, 7))
        .mount(&server)
        .await;

    let cursor = Cursor::new(
        test_client(&server),
        Box::new(|| ApiRequest::get("projects/99/stories").query("limit", "7")),
        DEFAULT_PAGE_LIMIT,
    );

    let mut buf: Vec<Item> = Vec::new();
    let err = cursor.advance(&mut buf).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));

    let state = cursor.state().await;
    assert_eq!(state.offset, 0);
    assert_eq!(state.request_count, 1);
    assert_eq!(state.pages, 0);

    let mut buf: Vec<Item> = Vec::new();
    assert_eq!(cursor.advance(&mut buf).await.unwrap(), Advance::End);
    assert_eq!(buf.len(), 7);
    assert_eq!(cursor.state().await.request_count, 2);
}

#[tokio::test]
async fn test_cursor_malformed_headers_leave_state_unchanged() {
    let server = MockServer::start().await;

    // 200 response without pagination headers.
    Mock::given(method("GET"))
        .and(path("/projects/99/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let cursor = stories_cursor(test_client(&server));

    let mut buf: Vec<Item> = Vec::new();
    let err = cursor.advance(&mut buf).await.unwrap_err();
    assert!(matches!(err, Error::PaginationHeader { .. }));

    let state = cursor.state().await;
    assert_eq!(state.offset, 0);
    assert_eq!(state.pages, 0);
    assert_eq!(state.request_count, 1);
}

#[tokio::test]
async fn test_cursor_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    // Valid pagination headers, body that is not JSON.
    Mock::given(method("GET"))
        .and(path("/projects/99/stories"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(HEADER_LIMIT, "10")
                .insert_header(HEADER_OFFSET, "0")
                .insert_header(HEADER_TOTAL, "25")
                .insert_header(HEADER_RETURNED, "10")
                .set_body_string("{not json"),
        )
        .mount(&server)
        .await;

    let cursor = stories_cursor(test_client(&server));

    let mut buf: Vec<Item> = Vec::new();
    let err = cursor.advance(&mut buf).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    // Reissuing would fail identically, so this is not retryable.
    assert!(!err.is_retryable());

    let state = cursor.state().await;
    assert_eq!(state.offset, 0);
    assert_eq!(state.pages, 0);
}

#[tokio::test]
async fn test_cursor_collect_into_drains_in_order() {
    let server = MockServer::start().await;

    for (offset, returned) in [(0u64, 10u64), (10, 10), (20, 5)] {
        Mock::given(method("GET"))
            .and(path("/projects/99/stories"))
            .and(query_param("offset", offset.to_string()))
            .respond_with(page(10, offset, 25, returned))
            .mount(&server)
            .await;
    }

    let cursor = stories_cursor(test_client(&server));

    let mut items: Vec<Item> = Vec::new();
    cursor.collect_into(&mut items).await.unwrap();

    assert_eq!(items.len(), 25);
    // Server order, no duplicates or drops across page boundaries.
    let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, (0..25).collect::<Vec<u64>>());
}

#[tokio::test]
async fn test_cursor_collect_into_keeps_partial_results_on_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/99/stories"))
        .and(query_param("offset", "0"))
        .respond_with(page(10, 0, 25, 10))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/99/stories"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let cursor = stories_cursor(test_client(&server));

    let mut items: Vec<Item> = Vec::new();
    let err = cursor.collect_into(&mut items).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert_eq!(items.len(), 10);
}

// ============================================================================
// PagedIter Tests
// ============================================================================

#[tokio::test]
async fn test_paged_iter_yields_across_pages() {
    let server = MockServer::start().await;

    for (offset, returned) in [(0u64, 10u64), (10, 5)] {
        Mock::given(method("GET"))
            .and(path("/projects/99/stories"))
            .and(query_param("offset", offset.to_string()))
            .respond_with(page(10, offset, 15, returned))
            .mount(&server)
            .await;
    }

    let cursor = stories_cursor(test_client(&server));
    let mut iter: PagedIter<Item> = PagedIter::new(cursor);

    let mut ids = Vec::new();
    while let Some(item) = iter.next().await.unwrap() {
        ids.push(item.id);
    }
    assert_eq!(ids, (0..15).collect::<Vec<u64>>());

    // Exhausted: stays at the end.
    assert!(iter.next().await.unwrap().is_none());
}

#[tokio::test]
async fn test_paged_iter_empty_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/99/stories"))
        .respond_with(page(10, 0, 0, 0))
        .expect(1)
        .mount(&server)
        .await;

    let cursor = stories_cursor(test_client(&server));
    let mut iter: PagedIter<Item> = PagedIter::new(cursor);

    assert!(iter.next().await.unwrap().is_none());
    // No further network traffic after end-of-sequence.
    assert!(iter.next().await.unwrap().is_none());
}

#[tokio::test]
async fn test_paged_iter_propagates_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/99/stories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let cursor = stories_cursor(test_client(&server));
    let mut iter: PagedIter<Item> = PagedIter::new(cursor);

    let err = iter.next().await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_paged_iter_stream_adapter() {
    use futures::StreamExt;

    let server = MockServer::start().await;

    for (offset, returned) in [(0u64, 10u64), (10, 2)] {
        Mock::given(method("GET"))
            .and(path("/projects/99/stories"))
            .and(query_param("offset", offset.to_string()))
            .respond_with(page(10, offset, 12, returned))
            .mount(&server)
            .await;
    }

    let cursor = stories_cursor(test_client(&server));
    let iter: PagedIter<Item> = PagedIter::new(cursor);

    let items: Vec<Item> = iter
        .into_stream()
        .map(|r| r.unwrap())
        .collect::<Vec<_>>()
        .await;
    assert_eq!(items.len(), 12);
}

// ============================================================================
// Shared Cursor Tests
// ============================================================================

#[tokio::test]
async fn test_cursor_shared_across_tasks_fetches_each_page_once() {
    let server = MockServer::start().await;

    for (offset, returned) in [(0u64, 10u64), (10, 10), (20, 10)] {
        Mock::given(method("GET"))
            .and(path("/projects/99/stories"))
            .and(query_param("offset", offset.to_string()))
            .respond_with(page(10, offset, 30, returned))
            .expect(1)
            .mount(&server)
            .await;
    }

    let cursor = Arc::new(stories_cursor(test_client(&server)));

    let tasks: Vec<_> = (0..3)
        .map(|_| {
            let cursor = Arc::clone(&cursor);
            tokio::spawn(async move {
                let mut buf: Vec<Item> = Vec::new();
                cursor.advance(&mut buf).await.unwrap();
                buf
            })
        })
        .collect();

    let mut all: Vec<u64> = Vec::new();
    for task in tasks {
        all.extend(task.await.unwrap().iter().map(|i| i.id));
    }
    all.sort_unstable();
    assert_eq!(all, (0..30).collect::<Vec<u64>>());
    assert_eq!(cursor.state().await.offset, 30);
}
