//! Identity gating for console routes.
//!
//! Authentication is optional: it switches on only when a real publishable
//! key is configured. With it off every route is open and the session
//! widget shows an anonymous marker.

use secrecy::{ExposeSecret, SecretString};

use crate::config::Config;
use crate::error::{Result, ScopeError};

/// Route prefixes reachable without a session.
pub const PUBLIC_ROUTE_PREFIXES: &[&str] = &["/sign-in", "/sign-up", "/api/webhooks"];

/// Shown in place of the user when authentication is disabled.
pub const ANONYMOUS_MARKER: &str = "anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthConfig {
    enabled: bool,
}

impl AuthConfig {
    /// Enabled iff `publishable_key` is present, non-empty and not a
    /// `placeholder` value.
    pub fn from_key(publishable_key: Option<&str>) -> Self {
        let enabled = publishable_key
            .map(str::trim)
            .is_some_and(|key| !key.is_empty() && !key.contains("placeholder"));
        Self { enabled }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::from_key(config.publishable_key().as_deref())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Allow or reject a visit to `route` with the given session.
    pub fn guard(&self, route: &str, session: Option<&SecretString>) -> Result<()> {
        if !self.enabled || is_public_route(route) {
            return Ok(());
        }
        match session {
            Some(token) if !token.expose_secret().trim().is_empty() => Ok(()),
            _ => {
                tracing::debug!(route, "rejecting route without session");
                Err(ScopeError::Auth(format!(
                    "sign in required for {route}; set RIVALSCOPE_SESSION_TOKEN"
                )))
            }
        }
    }

    /// Label for the session widget.
    pub fn session_label(&self, session: Option<&SecretString>) -> &'static str {
        match (self.enabled, session) {
            (false, _) => ANONYMOUS_MARKER,
            (true, Some(_)) => "signed in",
            (true, None) => "signed out",
        }
    }
}

/// `/sign-in*`, `/sign-up*` and `/api/webhooks*`.
pub fn is_public_route(route: &str) -> bool {
    PUBLIC_ROUTE_PREFIXES
        .iter()
        .any(|prefix| route.starts_with(prefix))
}
