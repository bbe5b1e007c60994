//! Route access rules.
//!
//! Decides whether a navigation proceeds or is redirected, given whether a
//! session is present. Verifying the session itself happens elsewhere.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// A customer or admin account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Outcome of a route check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "location", rename_all = "snake_case")]
pub enum RouteDecision {
    /// Serve the requested page.
    Proceed,
    /// Send the browser elsewhere.
    Redirect(String),
}

/// Path-prefix rules for protected and sign-in pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteGuard {
    /// Pages that need a session.
    #[serde(default = "default_protected_routes")]
    pub protected_routes: Vec<String>,
    /// Sign-in pages that a signed-in user should skip.
    #[serde(default = "default_auth_routes")]
    pub auth_routes: Vec<String>,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_home_path")]
    pub home_path: String,
}

fn default_protected_routes() -> Vec<String> {
    vec!["/admin".into(), "/checkout".into(), "/orders".into()]
}

fn default_auth_routes() -> Vec<String> {
    vec!["/login".into(), "/register".into()]
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_home_path() -> String {
    "/".to_string()
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            protected_routes: default_protected_routes(),
            auth_routes: default_auth_routes(),
            login_path: default_login_path(),
            home_path: default_home_path(),
        }
    }
}

impl RouteGuard {
    /// Decide what happens when `path` is requested.
    ///
    /// Protected pages without a session go to the login page; sign-in pages
    /// with a session go home. A query string on `path` is ignored.
    pub fn check(&self, path: &str, signed_in: bool) -> RouteDecision {
        let path = path.split(['?', '#']).next().unwrap_or(path);

        if !signed_in && matches_any(&self.protected_routes, path) {
            tracing::debug!(path, "protected route without session");
            return RouteDecision::Redirect(self.login_path.clone());
        }
        if signed_in && matches_any(&self.auth_routes, path) {
            return RouteDecision::Redirect(self.home_path.clone());
        }
        RouteDecision::Proceed
    }
}

fn matches_any(prefixes: &[String], path: &str) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_route_redirects_to_login() {
        let guard = RouteGuard::default();
        assert_eq!(
            guard.check("/admin/products", false),
            RouteDecision::Redirect("/login".into())
        );
        assert_eq!(guard.check("/checkout?step=2", true), RouteDecision::Proceed);
    }

    #[test]
    fn test_auth_route_redirects_home_when_signed_in() {
        let guard = RouteGuard::default();
        assert_eq!(guard.check("/login", true), RouteDecision::Redirect("/".into()));
        assert_eq!(guard.check("/register", false), RouteDecision::Proceed);
    }

    #[test]
    fn test_public_routes_proceed() {
        let guard = RouteGuard::default();
        assert_eq!(guard.check("/products?category=Kitchen", false), RouteDecision::Proceed);
        assert_eq!(guard.check("/", true), RouteDecision::Proceed);
    }

    #[test]
    fn test_decision_json() {
        let json = serde_json::to_string(&RouteDecision::Redirect("/login".into())).unwrap();
        assert_eq!(json, r#"{"action":"redirect","location":"/login"}"#);
    }
}
