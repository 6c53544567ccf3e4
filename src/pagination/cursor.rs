//! The pagination cursor
//!
//! A [`Cursor`] turns a page-oriented listing endpoint into a sequence of
//! discrete "fetch next page" calls with correct offset bookkeeping,
//! terminating at the server-declared end of data.

use super::types::{Advance, CursorState, PageMeta};
use crate::error::{Error, Result};
use crate::http::{ApiRequest, HttpClient};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Default page size, matching the API's native default
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// A factory producing a fresh, re-issuable request per page fetch
pub type RequestFn = Box<dyn Fn() -> ApiRequest + Send + Sync>;

/// Stateful driver for sequential page fetches against one listing endpoint
///
/// Construction performs no I/O. A single `Cursor` may be shared across
/// tasks: the internal mutex serializes concurrent [`advance`](Self::advance)
/// calls, so each page is fetched exactly once, though interleaving order
/// across callers is unspecified. A cursor is forward-only; restarting
/// requires building a new one from the original listing parameters.
pub struct Cursor {
    client: Arc<HttpClient>,
    request_fn: RequestFn,
    state: Mutex<CursorState>,
}

impl Cursor {
    /// Create a cursor over `request_fn`'s endpoint with the given fallback
    /// page size
    pub fn new(client: Arc<HttpClient>, request_fn: RequestFn, default_limit: u64) -> Self {
        Self {
            client,
            request_fn,
            state: Mutex::new(CursorState::new(default_limit)),
        }
    }

    /// Snapshot of the cursor's current bookkeeping state
    pub async fn state(&self) -> CursorState {
        *self.state.lock().await
    }

    /// Fetch and decode the next page into `buf`
    ///
    /// On the first successful advance, any limit/offset the request factory
    /// pre-seeded in the query string are honored and defaults fill only
    /// whichever is absent; every later advance overwrites both with the
    /// cursor's tracked values. A transport, status, or decode failure
    /// propagates immediately and leaves the offset untouched, so retrying
    /// reissues the identical request.
    ///
    /// Returns [`Advance::End`] once `offset >= total` per the response
    /// headers; the final page's items are still appended to `buf`.
    pub async fn advance<T: DeserializeOwned>(&self, buf: &mut Vec<T>) -> Result<Advance> {
        let mut state = self.state.lock().await;
        let mut request = (self.request_fn)();

        if state.pages == 0 {
            if request.query_value("limit").is_none() {
                request.set_query("limit", state.limit.to_string());
            }
            if request.query_value("offset").is_none() {
                request.set_query("offset", state.offset.to_string());
            }
        } else {
            request.set_query("limit", state.limit.to_string());
            request.set_query("offset", state.offset.to_string());
        }

        state.request_count += 1;
        let response = self.client.execute(&request).await?;

        let meta = PageMeta::from_headers(response.headers())?;
        let mut items: Vec<T> = response.json().await.map_err(Error::from_body)?;
        buf.append(&mut items);

        state.offset = meta.offset + meta.step();
        state.pages += 1;

        debug!(
            "page {}: offset {} -> {}, returned {}, total {}",
            state.pages, meta.offset, state.offset, meta.returned, meta.total
        );

        if state.offset >= meta.total {
            Ok(Advance::End)
        } else {
            Ok(Advance::More)
        }
    }

    /// Drain every remaining page into `items`, in server order
    ///
    /// The end-of-sequence signal is not surfaced as an error. On any other
    /// error the pages already collected stay in `items`, so partial results
    /// remain visible to the caller. An empty page also terminates the drain,
    /// guarding against a server that misreports its total.
    pub async fn collect_into<T: DeserializeOwned>(&self, items: &mut Vec<T>) -> Result<()> {
        loop {
            let mut page = Vec::new();
            let advance = self.advance(&mut page).await?;
            let fetched = page.len();
            items.append(&mut page);
            if advance.is_end() || fetched == 0 {
                return Ok(());
            }
        }
    }
}

impl std::fmt::Debug for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor").finish_non_exhaustive()
    }
}
