//! Media read models and feed query identity.
//!
//! Everything here is a snapshot of remote state valid at fetch time; the
//! client never mutates it.

use std::fmt;

use chrono::{DateTime, Utc};

use super::user::UserId;

/// Server-assigned media identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MediaId(i64);

impl MediaId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a logical feed.
///
/// Two queries are the same feed only when their search terms are equal; an
/// empty term means the unfiltered public feed. Pages are never merged across
/// different queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FeedQuery {
    search_term: Option<String>,
}

impl FeedQuery {
    /// The unfiltered public feed.
    pub const fn all() -> Self {
        Self { search_term: None }
    }

    /// A feed filtered by `term`; an empty term yields [`FeedQuery::all`].
    pub fn search(term: impl Into<String>) -> Self {
        let term = term.into();
        if term.is_empty() {
            Self::all()
        } else {
            Self {
                search_term: Some(term),
            }
        }
    }

    /// Active search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    /// Whether this is a search rather than the public feed.
    pub const fn is_search(&self) -> bool {
        self.search_term.is_some()
    }
}

impl fmt::Display for FeedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.search_term {
            Some(term) => write!(f, "search:{term}"),
            None => f.write_str("all"),
        }
    }
}

/// One feed entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSummary {
    /// Media identifier.
    pub id: MediaId,
    /// Uploading creator.
    pub creator_id: UserId,
    /// Creator display name.
    pub creator_name: String,
    /// Title shown under the image.
    pub title: String,
    /// Optional caption.
    pub caption: Option<String>,
    /// Optional free-text location.
    pub location: Option<String>,
    /// Thumbnail (or full image when no thumbnail exists).
    pub thumbnail_url: String,
    /// Upload time.
    pub created_at: DateTime<Utc>,
    /// Number of comments at fetch time.
    pub comment_count: u64,
    /// Mean rating at fetch time; zero when unrated.
    pub average_rating: f64,
}

impl MediaSummary {
    /// Rating rendered with one decimal place, e.g. `4.5`.
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.average_rating)
    }
}

/// Full media record for the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaDetail {
    /// Media identifier.
    pub id: MediaId,
    /// Uploading creator.
    pub creator_id: UserId,
    /// Creator display name.
    pub creator_name: String,
    /// Title.
    pub title: String,
    /// Optional caption.
    pub caption: Option<String>,
    /// Optional free-text location.
    pub location: Option<String>,
    /// Full-size image.
    pub image_url: String,
    /// Upload time.
    pub created_at: DateTime<Utc>,
    /// Mean rating; zero when unrated.
    pub average_rating: f64,
    /// People tagged in the photo.
    pub people: Vec<String>,
}

impl MediaDetail {
    /// Rating rendered with one decimal place, e.g. `4.5`.
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.average_rating)
    }
}
