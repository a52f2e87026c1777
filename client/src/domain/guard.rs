//! Route access decisions.
//!
//! [`RouteGuard::evaluate`] is a pure function of the session snapshot, the
//! roles a route requires and the location being requested. Callers re-run
//! it whenever either changes, typically on every
//! [`SessionStore::subscribe`](super::SessionStore::subscribe) notification.

use std::collections::BTreeSet;
use std::fmt;

use super::session::SessionState;
use super::user::Role;

/// Path of the public feed.
pub const HOME_PATH: &str = "/";
/// Path of the sign-in form.
pub const LOGIN_PATH: &str = "/login";

/// An in-app location such as `/profile/7?tab=media`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    /// Wrap a path; an empty path means the home page.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.is_empty() {
            Self::root()
        } else {
            Self(path)
        }
    }

    /// The home page.
    pub fn root() -> Self {
        Self(HOME_PATH.to_owned())
    }

    /// The sign-in form.
    pub fn login() -> Self {
        Self(LOGIN_PATH.to_owned())
    }

    /// Path as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Roles allowed on a route. An empty set admits every signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequiredRoles(BTreeSet<Role>);

impl RequiredRoles {
    /// Any signed-in user.
    pub const fn any() -> Self {
        Self(BTreeSet::new())
    }

    /// Exactly one role.
    pub fn only(role: Role) -> Self {
        Self(BTreeSet::from([role]))
    }

    /// Whether `role` may enter.
    pub fn permits(&self, role: Role) -> bool {
        self.0.is_empty() || self.0.contains(&role)
    }
}

impl FromIterator<Role> for RequiredRoles {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of evaluating a guarded route.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GuardDecision {
    /// The session is still booting; render a spinner, never redirect.
    #[default]
    Pending,
    /// Nobody is signed in. `from` is where to return after signing in.
    RedirectToLogin {
        /// Sign-in location.
        login: Location,
        /// Originally requested location.
        from: Location,
    },
    /// The signed-in user's role is not allowed here.
    Forbidden {
        /// Role that was refused.
        role: Role,
    },
    /// Render the route.
    Allow,
}

/// Stateless route guard.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Decide whether `requested` may be rendered for `session`.
    pub fn evaluate(
        session: &SessionState,
        required: &RequiredRoles,
        requested: &Location,
    ) -> GuardDecision {
        if session.is_loading() {
            return GuardDecision::Pending;
        }
        match session.user() {
            None => GuardDecision::RedirectToLogin {
                login: Location::login(),
                from: requested.clone(),
            },
            Some(user) if !required.permits(user.role()) => GuardDecision::Forbidden {
                role: user.role(),
            },
            Some(_) => GuardDecision::Allow,
        }
    }
}

/// Where to go after a successful sign-in: the saved location, or home.
pub fn post_login_destination(from: Option<&Location>) -> Location {
    from.cloned().unwrap_or_else(Location::root)
}

#[cfg(test)]
mod tests {
    //! Decision table coverage.
    use super::*;
    use crate::domain::user::{User, UserId};
    use rstest::rstest;

    fn signed_in(role: Role) -> SessionState {
        SessionState::authenticated(User::new(UserId::new(3), "Lin", role))
    }

    fn upload() -> Location {
        Location::new("/upload")
    }

    #[rstest]
    #[case(RequiredRoles::any())]
    #[case(RequiredRoles::only(Role::Creator))]
    #[case(RequiredRoles::only(Role::Consumer))]
    #[case([Role::Creator, Role::Consumer].into_iter().collect())]
    fn booting_is_always_pending(#[case] required: RequiredRoles) {
        let booting = SessionState::booting();
        assert_eq!(
            RouteGuard::evaluate(&booting, &required, &upload()),
            GuardDecision::Pending
        );
    }

    #[test]
    fn anonymous_visitors_are_sent_to_login_with_origin() {
        let decision = RouteGuard::evaluate(
            &SessionState::anonymous(),
            &RequiredRoles::only(Role::Creator),
            &upload(),
        );
        assert_eq!(
            decision,
            GuardDecision::RedirectToLogin {
                login: Location::login(),
                from: upload(),
            }
        );
    }

    #[rstest]
    #[case(Role::Consumer, RequiredRoles::only(Role::Creator), GuardDecision::Forbidden { role: Role::Consumer })]
    #[case(Role::Creator, RequiredRoles::only(Role::Creator), GuardDecision::Allow)]
    #[case(Role::Consumer, RequiredRoles::any(), GuardDecision::Allow)]
    #[case(Role::Creator, RequiredRoles::only(Role::Consumer), GuardDecision::Forbidden { role: Role::Creator })]
    fn signed_in_users_are_checked_against_roles(
        #[case] role: Role,
        #[case] required: RequiredRoles,
        #[case] expected: GuardDecision,
    ) {
        assert_eq!(
            RouteGuard::evaluate(&signed_in(role), &required, &upload()),
            expected
        );
    }

    #[rstest]
    #[case(SessionState::booting())]
    #[case(SessionState::anonymous())]
    #[case(signed_in(Role::Consumer))]
    #[case(signed_in(Role::Creator))]
    fn evaluation_is_deterministic(#[case] session: SessionState) {
        let required = RequiredRoles::only(Role::Creator);
        let first = RouteGuard::evaluate(&session, &required, &upload());
        let second = RouteGuard::evaluate(&session, &required, &upload());
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(None, "/")]
    #[case(Some(Location::new("/media/4")), "/media/4")]
    fn sign_in_returns_to_saved_location(#[case] from: Option<Location>, #[case] expected: &str) {
        assert_eq!(post_login_destination(from.as_ref()).as_str(), expected);
    }

    #[test]
    fn empty_location_is_home() {
        assert_eq!(Location::new(""), Location::root());
    }
}
