//! Pagination over header-driven listing endpoints
//!
//! # Overview
//!
//! The Tracker API paginates listing endpoints with `limit`/`offset` query
//! parameters and reports its view of each page in four response headers.
//! [`Cursor`] wraps a request factory and converts that protocol into a
//! resumable sequence of page fetches; [`PagedIter`] adapts a cursor into a
//! one-item-at-a-time pull interface.

mod cursor;
mod iter;
mod types;

pub use cursor::{Cursor, RequestFn, DEFAULT_PAGE_LIMIT};
pub use iter::PagedIter;
pub use types::{
    Advance, CursorState, PageMeta, HEADER_LIMIT, HEADER_OFFSET, HEADER_RETURNED, HEADER_TOTAL,
};

#[cfg(test)]
mod tests;
