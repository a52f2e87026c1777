//! Page numbering, sizing, and the fetched page container.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when callers do not configure one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Errors raised when constructing a [`PageSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    Zero,
}

/// Number of items requested per page.
///
/// ## Invariants
/// - Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Validate and construct a page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError::Zero`] when `size` is zero.
    pub const fn new(size: u32) -> Result<Self, PageSizeError> {
        match NonZeroU32::new(size) {
            Some(size) => Ok(Self(size)),
            None => Err(PageSizeError::Zero),
        }
    }

    /// Raw item count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Whether a page holding `count` items signals that more may follow.
    ///
    /// Pages longer than the requested size also count as full so the feed
    /// errs toward continuing.
    #[must_use]
    pub fn is_full(self, count: usize) -> bool {
        u32::try_from(count).map_or(true, |count| count >= self.get())
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroU32::MIN.saturating_add(DEFAULT_PAGE_SIZE - 1))
    }
}

impl TryFrom<u32> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for u32 {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// One-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page of every feed.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Construct a page number, rejecting zero.
    #[must_use]
    pub const fn new(page: u32) -> Option<Self> {
        match NonZeroU32::new(page) {
            Some(page) => Some(Self(page)),
            None => None,
        }
    }

    /// Raw one-based index.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The page after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Page coordinates sent to the remote side.
///
/// Serialises as `page=<n>&limit=<size>` when used as query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRequest {
    page: PageNumber,
    limit: PageSize,
}

impl PageRequest {
    /// Build a request for `page` holding up to `limit` items.
    #[must_use]
    pub const fn new(page: PageNumber, limit: PageSize) -> Self {
        Self { page, limit }
    }

    /// Requested page.
    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn limit(&self) -> PageSize {
        self.limit
    }
}

/// Items returned by exactly one fetch. Immutable once accumulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    number: PageNumber,
    items: Vec<T>,
}

impl<T> Page<T> {
    pub(crate) const fn new(number: PageNumber, items: Vec<T>) -> Self {
        Self { number, items }
    }

    /// Page index within its feed.
    #[must_use]
    pub const fn number(&self) -> PageNumber {
        self.number
    }

    /// Items in the order the remote side returned them.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(PageSize::new(0), Err(PageSizeError::Zero));
    }

    #[test]
    fn default_page_size_matches_reference_feed() {
        assert_eq!(PageSize::default().get(), DEFAULT_PAGE_SIZE);
    }

    #[rstest]
    #[case(10, true)]
    #[case(11, true)]
    #[case(7, false)]
    #[case(0, false)]
    fn full_pages_signal_more(#[case] count: usize, #[case] expected: bool) {
        assert_eq!(PageSize::default().is_full(count), expected);
    }

    #[test]
    fn page_numbers_start_at_one_and_advance() {
        assert_eq!(PageNumber::FIRST.get(), 1);
        assert_eq!(PageNumber::FIRST.next().get(), 2);
        assert!(PageNumber::new(0).is_none());
    }

    #[test]
    fn page_request_serialises_as_query_pairs() {
        let request = PageRequest::new(PageNumber::FIRST.next(), PageSize::default());
        let json = serde_json::to_value(request).unwrap_or_default();
        assert_eq!(json, serde_json::json!({ "page": 2, "limit": 10 }));
    }

    #[test]
    fn page_size_deserialisation_validates() {
        assert!(serde_json::from_str::<PageSize>("0").is_err());
        assert_eq!(
            serde_json::from_str::<PageSize>("25").ok().map(PageSize::get),
            Some(25)
        );
    }
}
