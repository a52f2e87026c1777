//! Sans-IO page accumulation for infinite-scroll feeds.
//!
//! The crate owns the bookkeeping behind "load the next page" without knowing
//! how pages are fetched. Callers ask a [`Paginator`] for a [`FetchTicket`],
//! perform the request however they like, and hand the outcome back through
//! [`Paginator::complete`]. Tickets carry the generation of the query they
//! were issued for, so a response that arrives after the query changed (or
//! after the consumer was torn down) is discarded instead of leaking into the
//! current feed.
//!
//! # Example
//!
//! ```
//! use pagination::{Completion, PageSize, Paginator};
//!
//! let mut feed: Paginator<String, u32, String> =
//!     Paginator::new(String::new(), PageSize::new(2).expect("non-zero"));
//!
//! let ticket = feed.begin_next(false).expect("first page is issued eagerly");
//! assert_eq!(ticket.request().page().get(), 1);
//!
//! let completion = feed.complete(ticket, Ok(vec![10, 11]));
//! assert!(matches!(completion, Completion::Appended { has_more: true, .. }));
//! assert_eq!(feed.items().copied().collect::<Vec<_>>(), vec![10, 11]);
//! ```

mod page;
mod paginator;

pub use page::{Page, PageNumber, PageRequest, PageSize, PageSizeError};
pub use paginator::{Completion, DiscardReason, FeedSnapshot, FetchTicket, Paginator};
