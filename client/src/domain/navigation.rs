//! Role-aware navigation model.

use super::guard::Location;
use super::session::SessionState;
use super::user::{Role, UserId};

/// One navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEntry {
    /// Public feed.
    Home,
    /// Sign-in form.
    Login,
    /// Sign-up form.
    Register,
    /// The signed-in user's own profile.
    Profile(UserId),
    /// Upload form, creators only.
    Upload,
}

impl NavEntry {
    /// Link target.
    pub fn path(self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::Register => "/register".to_owned(),
            Self::Profile(id) => format!("/profile/{id}"),
            Self::Upload => "/upload".to_owned(),
        }
    }

    /// Link text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Sign In",
            Self::Register => "Sign Up",
            Self::Profile(_) => "Profile",
            Self::Upload => "Upload",
        }
    }

    /// Whether the link should be highlighted for `current`. Home matches
    /// only itself; every other entry matches its whole subtree.
    pub fn is_active(self, current: &Location) -> bool {
        match self {
            Self::Home => current.as_str() == "/",
            // Any profile highlights the profile link.
            Self::Profile(_) => current.as_str().starts_with("/profile"),
            _ => current.as_str().starts_with(&self.path()),
        }
    }
}

/// Links to render for `session`. While the session boots only Home is
/// shown, so no sign-in link flashes for a returning user.
pub fn nav_entries(session: &SessionState) -> Vec<NavEntry> {
    let mut entries = vec![NavEntry::Home];
    if session.is_loading() {
        return entries;
    }
    match session.user() {
        Some(user) => {
            entries.push(NavEntry::Profile(user.id()));
            if user.role() == Role::Creator {
                entries.push(NavEntry::Upload);
            }
        }
        None => entries.extend([NavEntry::Login, NavEntry::Register]),
    }
    entries
}

/// Badge text describing the signed-in account, e.g. "Creator Account".
pub fn account_badge(session: &SessionState) -> Option<&'static str> {
    session.role().map(Role::account_label)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::user::User;
    use rstest::rstest;

    fn signed_in(role: Role) -> SessionState {
        SessionState::authenticated(User::new(UserId::new(7), "Kai", role))
    }

    #[rstest]
    #[case(SessionState::booting(), vec![NavEntry::Home])]
    #[case(SessionState::anonymous(), vec![NavEntry::Home, NavEntry::Login, NavEntry::Register])]
    #[case(signed_in(Role::Consumer), vec![NavEntry::Home, NavEntry::Profile(UserId::new(7))])]
    #[case(
        signed_in(Role::Creator),
        vec![NavEntry::Home, NavEntry::Profile(UserId::new(7)), NavEntry::Upload]
    )]
    fn entries_follow_the_session(#[case] session: SessionState, #[case] expected: Vec<NavEntry>) {
        assert_eq!(nav_entries(&session), expected);
    }

    #[test]
    fn profile_link_targets_the_viewer() {
        assert_eq!(NavEntry::Profile(UserId::new(7)).path(), "/profile/7");
    }

    #[rstest]
    #[case(NavEntry::Home, "/", true)]
    #[case(NavEntry::Home, "/upload", false)]
    #[case(NavEntry::Upload, "/upload", true)]
    #[case(NavEntry::Profile(UserId::new(7)), "/profile/3", true)]
    #[case(NavEntry::Login, "/media/1", false)]
    fn active_link_matching(#[case] entry: NavEntry, #[case] current: &str, #[case] active: bool) {
        assert_eq!(entry.is_active(&Location::new(current)), active);
    }

    #[rstest]
    #[case(signed_in(Role::Creator), Some("Creator Account"))]
    #[case(signed_in(Role::Consumer), Some("Consumer Account"))]
    #[case(SessionState::anonymous(), None)]
    fn badge_names_the_account_type(#[case] session: SessionState, #[case] expected: Option<&str>) {
        assert_eq!(account_badge(&session), expected);
    }
}
