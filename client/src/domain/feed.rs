//! Infinite-scroll media feed.
//!
//! [`MediaFeed`] couples a [`Paginator`] keyed by [`FeedQuery`] with a
//! [`MediaGateway`]. The paginator sits behind a mutex that is only held
//! while issuing or completing a ticket, never across the gateway call, so
//! concurrent triggers can never start two fetches.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pagination::{Completion, DiscardReason, FeedSnapshot, PageSize, Paginator};
use tracing::{debug, warn};

use super::error::FeedFetchError;
use super::media::{FeedQuery, MediaSummary};
use super::ports::MediaGateway;
use super::session::SessionState;

/// Render state of the feed area.
pub type MediaFeedSnapshot = FeedSnapshot<MediaSummary, FeedFetchError>;

/// Feed of media summaries for the current search term.
pub struct MediaFeed<G> {
    gateway: Arc<G>,
    engine: Mutex<Paginator<FeedQuery, MediaSummary, FeedFetchError>>,
}

impl<G> MediaFeed<G>
where
    G: MediaGateway,
{
    /// Start on the public feed.
    pub fn new(gateway: Arc<G>, page_size: PageSize) -> Self {
        Self {
            gateway,
            engine: Mutex::new(Paginator::new(FeedQuery::all(), page_size)),
        }
    }

    /// Switch to the feed for `term`; an empty term is the public feed.
    ///
    /// Returns `true` when the query identity changed, in which case every
    /// accumulated page was dropped and any in-flight fetch will be ignored.
    pub fn set_search_term(&self, term: &str) -> bool {
        let query = FeedQuery::search(term);
        let mut engine = self.engine();
        let changed = engine.reset(query);
        if changed {
            debug!(query = %engine.key(), generation = engine.generation(), "feed query changed");
        }
        changed
    }

    /// Query the feed currently shows.
    pub fn query(&self) -> FeedQuery {
        self.engine().key().clone()
    }

    /// Fetch the next page when the feed may advance.
    ///
    /// `wants_more` is the visibility signal of the "load more" sentinel. The
    /// first page of a fresh query is fetched without it. Returns `None` when
    /// no fetch was issued, otherwise how the result was applied.
    pub async fn maybe_fetch_next(&self, wants_more: bool) -> Option<Completion> {
        let (query, ticket) = {
            let mut engine = self.engine();
            let ticket = engine.begin_next(wants_more)?;
            (engine.key().clone(), ticket)
        };
        let request = ticket.request();
        debug!(
            query = %query,
            page = request.page().get(),
            generation = ticket.generation(),
            "fetching feed page"
        );

        let result = self
            .gateway
            .fetch_media_page(&query, request)
            .await
            .map_err(FeedFetchError::from);
        let completion = self.engine().complete(ticket, result);

        match completion {
            Completion::Appended {
                page,
                item_count,
                has_more,
            } => debug!(query = %query, page = page.get(), item_count, has_more, "feed page appended"),
            Completion::Failed { page } => {
                warn!(query = %query, page = page.get(), "feed page fetch failed");
            }
            Completion::Discarded(reason) => debug!(
                query = %query,
                page = request.page().get(),
                generation = ticket.generation(),
                reason = discard_label(reason),
                "feed page discarded"
            ),
        }
        Some(completion)
    }

    /// Owned copy of the paginator state.
    pub fn snapshot(&self) -> MediaFeedSnapshot {
        self.engine().snapshot()
    }

    /// Render decision for the feed area as seen by `session`.
    pub fn view(&self, session: &SessionState) -> FeedView {
        let engine = self.engine();
        FeedView::from_snapshot(&engine.snapshot(), engine.key(), session)
    }

    /// Tear the feed down. Nothing further is fetched and late results are
    /// dropped.
    pub fn dispose(&self) {
        self.engine().dispose();
        debug!("feed disposed");
    }

    fn engine(&self) -> MutexGuard<'_, Paginator<FeedQuery, MediaSummary, FeedFetchError>> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

const fn discard_label(reason: DiscardReason) -> &'static str {
    match reason {
        DiscardReason::Stale => "stale",
        DiscardReason::Disposed => "disposed",
        DiscardReason::Duplicate => "duplicate",
    }
}

/// Primary action offered on an empty public feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallToAction {
    /// Creators are invited to upload.
    Upload,
    /// Visitors are invited to sign up.
    CreateAccount,
}

impl CallToAction {
    /// Button text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upload => "Upload Your First Photo",
            Self::CreateAccount => "Create Account",
        }
    }

    /// Route the button leads to.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Upload => "/upload",
            Self::CreateAccount => "/register",
        }
    }
}

/// Zero-item terminal state, distinct from a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyFeed {
    /// Search that matched nothing, or `None` for the public feed.
    pub search_term: Option<String>,
    /// Action to offer; never present for a search.
    pub call_to_action: Option<CallToAction>,
}

impl EmptyFeed {
    /// Heading text.
    pub const fn headline(&self) -> &'static str {
        if self.search_term.is_some() {
            "No Results Found"
        } else {
            "Welcome to PhotoShare!"
        }
    }

    /// Body text.
    pub fn message(&self) -> String {
        self.search_term.as_ref().map_or_else(
            || "Discover and share amazing photos from creators around the world.".to_owned(),
            |term| format!("No media found for \"{term}\""),
        )
    }
}

/// Status line under the accumulated items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFooter {
    /// A follow-up page is in flight.
    LoadingMore,
    /// More pages exist; the sentinel will request them.
    ScrollForMore,
    /// A short page ended the feed.
    EndReached,
    /// The last follow-up fetch failed; scrolling retries it.
    Failed(FeedFetchError),
}

impl FeedFooter {
    /// Footer text.
    pub fn label(&self) -> &str {
        match self {
            Self::LoadingMore => "Loading more...",
            Self::ScrollForMore => "Scroll to load more",
            Self::EndReached => "You've reached the end!",
            Self::Failed(error) => error.message(),
        }
    }
}

/// What the feed area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedBody {
    /// The first page is on its way.
    Loading,
    /// The first page failed; the whole area shows the error.
    Failed(FeedFetchError),
    /// The query has no items.
    Empty(EmptyFeed),
    /// Accumulated items in feed order.
    Items {
        /// Items across all pages.
        items: Vec<MediaSummary>,
        /// Status line under the items.
        footer: FeedFooter,
    },
}

/// Complete render decision for the home feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedView {
    /// Whether the creator-only post composer is shown.
    pub show_composer: bool,
    /// Feed area contents.
    pub body: FeedBody,
}

impl FeedView {
    /// Derive the view from paginator state, the active query and the session.
    pub fn from_snapshot(
        snapshot: &MediaFeedSnapshot,
        query: &FeedQuery,
        session: &SessionState,
    ) -> Self {
        let items: Vec<MediaSummary> = snapshot.items().cloned().collect();
        let body = if items.is_empty() {
            empty_body(snapshot, query, session)
        } else {
            FeedBody::Items {
                items,
                footer: footer(snapshot),
            }
        };
        Self {
            show_composer: session.is_creator(),
            body,
        }
    }
}

fn empty_body(snapshot: &MediaFeedSnapshot, query: &FeedQuery, session: &SessionState) -> FeedBody {
    if snapshot.is_loading_first || snapshot.is_loading_more {
        return FeedBody::Loading;
    }
    if let Some(error) = &snapshot.error {
        return FeedBody::Failed(error.clone());
    }
    if snapshot.has_more {
        // Nothing fetched yet for this query.
        return FeedBody::Loading;
    }
    let call_to_action = if query.is_search() || session.is_loading() {
        None
    } else if session.is_creator() {
        Some(CallToAction::Upload)
    } else if session.user().is_none() {
        Some(CallToAction::CreateAccount)
    } else {
        None
    };
    FeedBody::Empty(EmptyFeed {
        search_term: query.search_term().map(str::to_owned),
        call_to_action,
    })
}

fn footer(snapshot: &MediaFeedSnapshot) -> FeedFooter {
    if snapshot.is_loading_more {
        FeedFooter::LoadingMore
    } else if let Some(error) = &snapshot.error {
        FeedFooter::Failed(error.clone())
    } else if snapshot.has_more {
        FeedFooter::ScrollForMore
    } else {
        FeedFooter::EndReached
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
