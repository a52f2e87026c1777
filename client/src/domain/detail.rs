//! Media detail loading.

use tracing::debug;

use super::error::LoadError;
use super::media::{MediaDetail, MediaId};
use super::ports::{GatewayError, MediaGateway};

/// What the detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    /// The record was found.
    Loaded(MediaDetail),
    /// No media has this identifier.
    NotFound,
    /// The record could not be loaded.
    Failed(LoadError),
}

impl DetailView {
    /// Heading used for the not-found state.
    pub const NOT_FOUND_HEADLINE: &'static str = "Media Not Found";
}

/// Load one media record, separating "does not exist" from failures.
pub async fn load_media_detail<G>(gateway: &G, id: MediaId) -> DetailView
where
    G: MediaGateway + ?Sized,
{
    match gateway.fetch_media(id).await {
        Ok(detail) => DetailView::Loaded(detail),
        Err(GatewayError::NotFound { .. }) => {
            debug!(media_id = %id, "media not found");
            DetailView::NotFound
        }
        Err(error) => {
            debug!(media_id = %id, error = %error, "media detail failed");
            DetailView::Failed(error.into())
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockMediaGateway;
    use crate::domain::user::UserId;
    use chrono::Utc;
    use rstest::rstest;

    fn detail() -> MediaDetail {
        MediaDetail {
            id: MediaId::new(4),
            creator_id: UserId::new(1),
            creator_name: "Ada".to_owned(),
            title: "Harbour".to_owned(),
            caption: Some("Low tide".to_owned()),
            location: None,
            image_url: "https://cdn.example.test/4.jpg".to_owned(),
            created_at: Utc::now(),
            average_rating: 4.0,
            people: vec!["Grace".to_owned()],
        }
    }

    #[tokio::test]
    async fn found_media_is_loaded() {
        let expected = detail();
        let returned = expected.clone();
        let mut gateway = MockMediaGateway::new();
        gateway
            .expect_fetch_media()
            .withf(|id| id.get() == 4)
            .return_once(move |_| Ok(returned));

        let view = load_media_detail(&gateway, MediaId::new(4)).await;

        assert_eq!(view, DetailView::Loaded(expected));
    }

    #[rstest]
    #[case(GatewayError::not_found("media 4"), DetailView::NotFound)]
    #[case(
        GatewayError::timeout("10s"),
        DetailView::Failed(LoadError::from(GatewayError::timeout("10s")))
    )]
    #[case(
        GatewayError::rejected(500_u16, "database offline"),
        DetailView::Failed(LoadError::Remote { message: "database offline".to_owned() })
    )]
    #[tokio::test]
    async fn failures_are_classified(#[case] error: GatewayError, #[case] expected: DetailView) {
        let mut gateway = MockMediaGateway::new();
        gateway
            .expect_fetch_media()
            .return_once(move |_| Err(error));

        assert_eq!(load_media_detail(&gateway, MediaId::new(4)).await, expected);
    }

    #[test]
    fn ratings_render_with_one_decimal() {
        assert_eq!(detail().rating_label(), "4.0");
    }
}
