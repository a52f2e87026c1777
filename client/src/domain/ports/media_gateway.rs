//! Driven port for media and profile reads.

use async_trait::async_trait;
use pagination::PageRequest;

use super::GatewayError;
use crate::domain::{FeedQuery, MediaDetail, MediaId, MediaSummary, User, UserId};

/// Remote media read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Fetch one page of the feed identified by `query`.
    ///
    /// Implementations return at most `request.limit()` items in server order.
    async fn fetch_media_page(
        &self,
        query: &FeedQuery,
        request: PageRequest,
    ) -> Result<Vec<MediaSummary>, GatewayError>;

    /// Fetch one media record; [`GatewayError::NotFound`] when it is missing.
    async fn fetch_media(&self, id: MediaId) -> Result<MediaDetail, GatewayError>;

    /// Fetch a public profile.
    async fn fetch_profile(&self, id: UserId) -> Result<User, GatewayError>;

    /// Fetch every upload of a creator.
    async fn fetch_user_media(&self, id: UserId) -> Result<Vec<MediaSummary>, GatewayError>;
}
