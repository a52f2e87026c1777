//! Domain model and client-side state machines.
//!
//! Purpose: own the authoritative session, the route access decision and the
//! paginated media feed, independent of any transport. Remote calls go
//! through the ports in [`ports`]; adapters live in `crate::outbound`.
//!
//! Public surface:
//! - SessionStore (alias to `session::SessionStore`): single source of truth
//!   for the signed-in user.
//! - RouteGuard (alias to `guard::RouteGuard`): pure access decision.
//! - MediaFeed (alias to `feed::MediaFeed`): infinite-scroll feed driver.
//! - load_media_detail / load_profile: one-shot page loaders.
//! - nav_entries: role-aware navigation model.

pub mod auth;
pub mod detail;
pub mod error;
pub mod feed;
pub mod guard;
pub mod media;
pub mod navigation;
pub mod ports;
pub mod profile;
pub mod session;
pub mod user;

pub use self::auth::{CredentialsValidationError, LoginCredentials, PASSWORD_MIN_LEN, Registration};
pub use self::detail::{DetailView, load_media_detail};
pub use self::error::{AuthError, CONNECTIVITY_MESSAGE, FeedFetchError, LoadError};
pub use self::feed::{CallToAction, EmptyFeed, FeedBody, FeedFooter, FeedView, MediaFeed};
pub use self::guard::{GuardDecision, Location, RequiredRoles, RouteGuard, post_login_destination};
pub use self::media::{FeedQuery, MediaDetail, MediaId, MediaSummary};
pub use self::navigation::{NavEntry, account_badge, nav_entries};
pub use self::profile::{CreatorMedia, ProfilePage, ProfileView, load_profile};
pub use self::session::{
    REGISTRATION_NOTICE, RegistrationReceipt, SessionPhase, SessionState, SessionStore,
};
pub use self::user::{Role, User, UserId, UserValidationError};
