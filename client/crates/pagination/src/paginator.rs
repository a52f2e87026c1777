//! Generation-guarded page accumulator.

use crate::page::{Page, PageNumber, PageRequest, PageSize};

/// Permission to fetch one page for one query generation.
///
/// A ticket is only honoured by [`Paginator::complete`] while its generation
/// is current and it is still the paginator's in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    request: PageRequest,
}

impl FetchTicket {
    /// Page coordinates to fetch.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Query generation the ticket was issued for.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Why a completed fetch was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// The query changed after the ticket was issued.
    Stale,
    /// The consumer was torn down.
    Disposed,
    /// The ticket had already been completed.
    Duplicate,
}

/// Outcome of handing a fetch result back to the paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Items were appended as a new page.
    Appended {
        /// Page that was appended.
        page: PageNumber,
        /// Number of items on the page.
        item_count: usize,
        /// Whether another page may follow.
        has_more: bool,
    },
    /// The fetch failed; accumulated pages were kept.
    Failed {
        /// Page that failed to load.
        page: PageNumber,
    },
    /// The result no longer belongs to the current feed.
    Discarded(DiscardReason),
}

/// Owned view of a paginator's state for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSnapshot<T, E> {
    /// Pages accumulated for the current query, in page order.
    pub pages: Vec<Page<T>>,
    /// The first page of the current query is in flight.
    pub is_loading_first: bool,
    /// A follow-up page is in flight.
    pub is_loading_more: bool,
    /// Another page may be requested.
    pub has_more: bool,
    /// Failure of the most recent fetch, if it failed.
    pub error: Option<E>,
}

impl<T, E> FeedSnapshot<T, E> {
    /// Items across all pages in feed order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.pages.iter().flat_map(|page| page.items().iter())
    }

    /// Whether no items have been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|page| page.items().is_empty())
    }
}

/// Accumulates an append-only, gap-free sequence of pages for one query key.
///
/// `K` identifies the query (pages are never merged across keys), `T` is the
/// item type and `E` the fetch error surfaced to callers.
///
/// ## Invariants
/// - At most one fetch is in flight at any time.
/// - Pages are appended strictly in increasing page order, starting at 1.
/// - Changing the key discards every accumulated page and bumps the
///   generation, invalidating outstanding tickets.
/// - After [`Paginator::dispose`] no ticket is issued and no result applied.
#[derive(Debug, Clone)]
pub struct Paginator<K, T, E> {
    key: K,
    generation: u64,
    page_size: PageSize,
    pages: Vec<Page<T>>,
    next_page: PageNumber,
    in_flight: Option<FetchTicket>,
    has_more: bool,
    error: Option<E>,
    disposed: bool,
}

impl<K, T, E> Paginator<K, T, E>
where
    K: PartialEq,
{
    /// Start an empty feed for `key`.
    pub const fn new(key: K, page_size: PageSize) -> Self {
        Self {
            key,
            generation: 0,
            page_size,
            pages: Vec::new(),
            next_page: PageNumber::FIRST,
            in_flight: None,
            has_more: true,
            error: None,
            disposed: false,
        }
    }

    /// Current query key.
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Current query generation.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Configured page size.
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Switch to a different query, restarting at page 1.
    ///
    /// Returns `false` (and changes nothing) when `key` equals the current key
    /// or the paginator has been disposed.
    pub fn reset(&mut self, key: K) -> bool {
        if self.disposed || self.key == key {
            return false;
        }
        self.key = key;
        self.generation = self.generation.wrapping_add(1);
        self.pages.clear();
        self.next_page = PageNumber::FIRST;
        self.in_flight = None;
        self.has_more = true;
        self.error = None;
        true
    }

    /// Issue a ticket for the next page when the feed may advance.
    ///
    /// The first page of a fresh query is issued without the visibility
    /// signal. Later pages, and retries after a failure, require
    /// `wants_more`. Nothing is issued while a fetch is in flight, once the
    /// feed is exhausted, or after disposal.
    pub fn begin_next(&mut self, wants_more: bool) -> Option<FetchTicket> {
        if self.disposed || self.in_flight.is_some() || !self.has_more {
            return None;
        }
        let initial_load = self.pages.is_empty() && self.error.is_none();
        if !(wants_more || initial_load) {
            return None;
        }

        let ticket = FetchTicket {
            generation: self.generation,
            request: PageRequest::new(self.next_page, self.page_size),
        };
        self.error = None;
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Apply the outcome of a fetch issued by [`Paginator::begin_next`].
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<T>, E>) -> Completion {
        if self.disposed {
            return Completion::Discarded(DiscardReason::Disposed);
        }
        if ticket.generation != self.generation {
            return Completion::Discarded(DiscardReason::Stale);
        }
        if self.in_flight != Some(ticket) {
            return Completion::Discarded(DiscardReason::Duplicate);
        }
        self.in_flight = None;

        let page = ticket.request.page();
        match result {
            Ok(items) => {
                let item_count = items.len();
                self.has_more = self.page_size.is_full(item_count);
                self.pages.push(Page::new(page, items));
                self.next_page = page.next();
                Completion::Appended {
                    page,
                    item_count,
                    has_more: self.has_more,
                }
            }
            Err(error) => {
                self.error = Some(error);
                Completion::Failed { page }
            }
        }
    }

    /// Tear down the feed; outstanding and future fetches are ignored.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.in_flight = None;
    }

    /// Whether [`Paginator::dispose`] has been called.
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Accumulated pages in page order.
    pub fn pages(&self) -> &[Page<T>] {
        &self.pages
    }

    /// Items across all pages in feed order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.pages.iter().flat_map(|page| page.items().iter())
    }

    /// Whether another page may be requested.
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Failure of the most recent fetch, if it failed.
    pub const fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    /// The first page of the current query is in flight.
    pub fn is_loading_first(&self) -> bool {
        self.in_flight.is_some() && self.pages.is_empty()
    }

    /// A follow-up page is in flight.
    pub fn is_loading_more(&self) -> bool {
        self.in_flight.is_some() && !self.pages.is_empty()
    }

    /// Owned copy of the render state.
    pub fn snapshot(&self) -> FeedSnapshot<T, E>
    where
        T: Clone,
        E: Clone,
    {
        FeedSnapshot {
            pages: self.pages.clone(),
            is_loading_first: self.is_loading_first(),
            is_loading_more: self.is_loading_more(),
            has_more: self.has_more,
            error: self.error.clone(),
        }
    }
}

#[cfg(test)]
#[path = "paginator_tests.rs"]
mod tests;
