//! Declarative route access policy
//!
//! Every route's requirement lives in one table keyed by method and route
//! template. The gate middleware looks requests up here; routes without an
//! entry are public.

use axum::http::Method;
use std::collections::HashMap;

use crate::api::paths;
use crate::auth::models::Role;

/// What a route requires from the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    /// A valid token whose role is one of these
    Roles(Vec<Role>),
}

const ADMINS: &[Role] = &[Role::Admin, Role::Superadmin];
const ANYONE_SIGNED_IN: &[Role] = &[Role::User, Role::Admin, Role::Superadmin];

static PUBLIC: Access = Access::Public;

#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    rules: HashMap<(Method, String), Access>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for a route
    pub fn rule(mut self, method: Method, route: &str, access: Access) -> Self {
        self.rules.insert((method, route.to_string()), access);
        self
    }

    fn restrict(self, method: Method, route: &str, roles: &[Role]) -> Self {
        self.rule(method, route, Access::Roles(roles.to_vec()))
    }

    /// Requirement for a request. Unlisted routes are public.
    pub fn access_for(&self, method: &Method, route: &str) -> &Access {
        self.rules
            .get(&(method.clone(), route.to_string()))
            .unwrap_or(&PUBLIC)
    }

    /// Only account creation is gated. The company, method and user routes
    /// stay open, matching how the service has been deployed so far.
    pub fn standard() -> Self {
        Self::new().restrict(Method::POST, paths::AUTH_CREATE, ADMINS)
    }

    /// `standard` plus admin-only management routes and signed-in-only
    /// user routes
    pub fn protected() -> Self {
        let policy = Self::standard()
            .restrict(Method::GET, paths::COMPANIES, ADMINS)
            .restrict(Method::POST, paths::COMPANIES, ADMINS)
            .restrict(Method::PUT, paths::COMPANY, ADMINS)
            .restrict(Method::DELETE, paths::COMPANY, ADMINS)
            .restrict(Method::GET, paths::METHODS, ADMINS)
            .restrict(Method::POST, paths::METHODS, ADMINS)
            .restrict(Method::PUT, paths::METHOD, ADMINS)
            .restrict(Method::DELETE, paths::METHOD, ADMINS);

        [
            (Method::GET, paths::DASHBOARD),
            (Method::POST, paths::COMMUNICATION),
            (Method::GET, paths::NOTIFICATIONS),
            (Method::GET, paths::CALENDAR),
        ]
        .into_iter()
        .fold(policy, |policy, (method, route)| {
            policy.restrict(method, route, ANYONE_SIGNED_IN)
        })
    }

    pub fn from_config(protect_tracking_routes: bool) -> Self {
        if protect_tracking_routes {
            Self::protected()
        } else {
            Self::standard()
        }
    }
}
