//! Route guarding.
//!
//! Access decisions are a pure function of the session snapshot so that any
//! front end (terminal, desktop, web) can apply them the same way.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::session::SessionSnapshot;

/// Entry points of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Login,
    Register,
    Onboarding,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Onboarding => "/onboarding",
            Route::Dashboard => "/",
        }
    }

    /// Resolves a path; anything unknown lands on the dashboard.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/onboarding" => Route::Onboarding,
            _ => Route::Dashboard,
        }
    }

    /// Access rule each route is mounted with.
    pub fn access(self) -> RouteAccess {
        match self {
            Route::Login | Route::Register => RouteAccess::RequireGuest,
            Route::Onboarding => RouteAccess::RequireOnboarding,
            Route::Dashboard => RouteAccess::RequireAuth,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Signed in with onboarding finished.
    RequireAuth,
    /// Hidden from signed-in users (login, registration).
    RequireGuest,
    /// Signed in with onboarding still pending.
    RequireOnboarding,
}

/// Outcome of guarding a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    ShowLoading,
    RedirectTo(Route),
    ShowChildren,
}

pub fn guard(access: RouteAccess, session: &SessionSnapshot) -> GuardDecision {
    if session.initializing {
        return GuardDecision::ShowLoading;
    }

    match (access, &session.identity) {
        (RouteAccess::RequireAuth, None) => GuardDecision::RedirectTo(Route::Login),
        (RouteAccess::RequireAuth, Some(user)) if !user.onboarding_done => {
            GuardDecision::RedirectTo(Route::Onboarding)
        }
        (RouteAccess::RequireAuth, Some(_)) => GuardDecision::ShowChildren,

        (RouteAccess::RequireGuest, None) => GuardDecision::ShowChildren,
        (RouteAccess::RequireGuest, Some(user)) => GuardDecision::RedirectTo(if user.onboarding_done {
            Route::Dashboard
        } else {
            Route::Onboarding
        }),

        (RouteAccess::RequireOnboarding, None) => GuardDecision::RedirectTo(Route::Login),
        (RouteAccess::RequireOnboarding, Some(user)) if user.onboarding_done => {
            GuardDecision::RedirectTo(Route::Dashboard)
        }
        (RouteAccess::RequireOnboarding, Some(_)) => GuardDecision::ShowChildren,
    }
}

/// Guards `route` with the access rule it is mounted with.
pub fn guard_route(route: Route, session: &SessionSnapshot) -> GuardDecision {
    guard(route.access(), session)
}

/// Follows redirects from `route` until a route renders or is loading.
///
/// The guard rules never redirect in a cycle, so this settles within a
/// couple of hops.
pub fn resolve(route: Route, session: &SessionSnapshot) -> (Route, GuardDecision) {
    let mut current = route;
    for _ in 0..4 {
        match guard_route(current, session) {
            GuardDecision::RedirectTo(next) => current = next,
            decision => return (current, decision),
        }
    }
    (current, guard_route(current, session))
}
