//! Public profile loading.
//!
//! A profile is fetched first; its uploads are only requested when the
//! profile belongs to a creator, since consumers cannot upload.

use tracing::debug;

use super::error::LoadError;
use super::media::MediaSummary;
use super::ports::{GatewayError, MediaGateway};
use super::session::SessionState;
use super::user::{User, UserId};

/// Uploads section of a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum CreatorMedia {
    /// The profile is a consumer's; nothing was requested.
    NotApplicable,
    /// The creator's uploads, newest first as served.
    Loaded(Vec<MediaSummary>),
    /// The uploads could not be loaded; the profile header still renders.
    Failed(LoadError),
}

/// A loaded profile page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePage {
    /// Profile owner.
    pub profile: User,
    /// Uploads section.
    pub media: CreatorMedia,
    /// Whether the viewer is looking at their own profile.
    pub is_own_profile: bool,
}

impl ProfilePage {
    /// The upload shortcut is offered on a creator's own profile.
    pub const fn can_upload(&self) -> bool {
        self.is_own_profile && self.profile.is_creator()
    }

    /// The sign-out button is offered on the viewer's own profile.
    pub const fn can_logout(&self) -> bool {
        self.is_own_profile
    }
}

/// What the profile route shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileView {
    /// Profile and (for creators) uploads.
    Loaded(ProfilePage),
    /// No user has this identifier.
    NotFound,
    /// The profile itself could not be loaded.
    Failed(LoadError),
}

/// Load the profile of `user_id` as seen by `session`.
pub async fn load_profile<G>(gateway: &G, session: &SessionState, user_id: UserId) -> ProfileView
where
    G: MediaGateway + ?Sized,
{
    let profile = match gateway.fetch_profile(user_id).await {
        Ok(profile) => profile,
        Err(GatewayError::NotFound { .. }) => {
            debug!(user_id = %user_id, "profile not found");
            return ProfileView::NotFound;
        }
        Err(error) => {
            debug!(user_id = %user_id, error = %error, "profile load failed");
            return ProfileView::Failed(error.into());
        }
    };

    let media = if profile.is_creator() {
        match gateway.fetch_user_media(user_id).await {
            Ok(items) => CreatorMedia::Loaded(items),
            Err(error) => {
                debug!(user_id = %user_id, error = %error, "creator media load failed");
                CreatorMedia::Failed(error.into())
            }
        }
    } else {
        CreatorMedia::NotApplicable
    };

    let is_own_profile = session.user().is_some_and(|viewer| viewer.id() == user_id);
    ProfileView::Loaded(ProfilePage {
        profile,
        media,
        is_own_profile,
    })
}
