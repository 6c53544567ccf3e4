//! Pagination metadata and control types

use crate::error::{Error, Result};
use reqwest::header::HeaderMap;

/// Header reporting the page size the server applied
pub const HEADER_LIMIT: &str = "X-Tracker-Pagination-Limit";
/// Header reporting the offset of the page just returned
pub const HEADER_OFFSET: &str = "X-Tracker-Pagination-Offset";
/// Header reporting the total item count for the current filter
pub const HEADER_TOTAL: &str = "X-Tracker-Pagination-Total";
/// Header reporting how many items the page actually contains
pub const HEADER_RETURNED: &str = "X-Tracker-Pagination-Returned";

/// Server-reported pagination metadata for one page
///
/// Parsed from response headers on every page and discarded once the next
/// offset has been computed. The server's view may diverge from what was
/// requested (e.g. a capped limit), so these values always win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    /// Page size the server applied
    pub limit: u64,
    /// Offset of the first item in this page
    pub offset: u64,
    /// Total items across all pages for the current filter
    pub total: u64,
    /// Items actually included in this page
    pub returned: u64,
}

impl PageMeta {
    /// Parse the four pagination headers, failing on any missing or
    /// non-numeric value
    pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            limit: int_header(headers, HEADER_LIMIT)?,
            offset: int_header(headers, HEADER_OFFSET)?,
            total: int_header(headers, HEADER_TOTAL)?,
            returned: int_header(headers, HEADER_RETURNED)?,
        })
    }

    /// How far this page moves the offset forward
    ///
    /// Uses the server-reported limit, never the locally requested one.
    pub fn step(&self) -> u64 {
        self.returned.min(self.limit)
    }
}

/// Read a base-10 non-negative integer header
fn int_header(headers: &HeaderMap, name: &str) -> Result<u64> {
    let value = headers
        .get(name)
        .ok_or_else(|| Error::pagination_header(name, "missing"))?;
    let text = value
        .to_str()
        .map_err(|e| Error::pagination_header(name, e.to_string()))?;
    text.parse::<u64>()
        .map_err(|e| Error::pagination_header(name, e.to_string()))
}

/// Outcome of a successful page fetch
///
/// `End` is a normal control signal, not a fault: the final page's items are
/// still delivered alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// More pages remain
    More,
    /// The server-declared end of data has been reached
    End,
}

impl Advance {
    /// Check if this is the end of the sequence
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// Check if more pages remain
    pub fn is_more(&self) -> bool {
        matches!(self, Self::More)
    }
}

/// Snapshot of a cursor's bookkeeping state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    /// Page size sent on every advance after the first
    pub limit: u64,
    /// Offset the next advance will request
    pub offset: u64,
    /// Advance attempts that reached the network
    pub request_count: u64,
    /// Pages fetched and decoded successfully
    pub pages: u64,
}

impl CursorState {
    pub(super) fn new(limit: u64) -> Self {
        Self {
            limit,
            offset: 0,
            request_count: 0,
            pages: 0,
        }
    }
}
