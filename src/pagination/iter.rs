//! Single-item pull interface over a paginated endpoint

use super::cursor::Cursor;
use crate::error::Result;
use futures::Stream;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;

/// Lazy, finite, forward-only iterator over a paginated listing
///
/// Buffers one decoded page and yields single typed items, refilling from
/// the cursor when the buffer runs dry. Non-restartable: once `next`
/// returns `Ok(None)` the sequence is exhausted, and starting over means
/// constructing a new iterator from the original listing parameters.
pub struct PagedIter<T> {
    cursor: Cursor,
    buf: VecDeque<T>,
    done: bool,
}

impl<T: DeserializeOwned> PagedIter<T> {
    pub(crate) fn new(cursor: Cursor) -> Self {
        Self {
            cursor,
            buf: VecDeque::new(),
            done: false,
        }
    }

    /// Pull the next item, fetching another page when needed
    ///
    /// `Ok(None)` marks the end of the sequence. Errors propagate from the
    /// cursor unchanged and do not consume an item; the cursor is left
    /// positioned for a retry.
    pub async fn next(&mut self) -> Result<Option<T>> {
        if self.buf.is_empty() && !self.done {
            let mut page = Vec::new();
            if self.cursor.advance(&mut page).await?.is_end() {
                self.done = true;
            }
            // A page with nothing in it ends the sequence regardless of
            // what the headers claimed.
            if page.is_empty() {
                self.done = true;
            }
            self.buf.extend(page);
        }
        Ok(self.buf.pop_front())
    }

    /// Adapt the iterator into a [`Stream`] of items
    ///
    /// The stream terminates after yielding an error.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        futures::stream::unfold(self, |mut iter| async move {
            match iter.next().await {
                Ok(Some(item)) => Some((Ok(item), iter)),
                Ok(None) => None,
                Err(e) => {
                    iter.done = true;
                    iter.buf.clear();
                    Some((Err(e), iter))
                }
            }
        })
    }
}

impl<T> std::fmt::Debug for PagedIter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedIter")
            .field("buffered", &self.buf.len())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
