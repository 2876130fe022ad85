//! Registration, login and token checks

use std::sync::Arc;

use crate::auth::jwt::{Claims, TokenIssuer};
use crate::auth::models::{CreateUserRequest, LoginRequest, LoginResponse, RegisterRequest, Role, User};
use crate::auth::password::{hash_password, verify_password};
use crate::config::{AuthConfig, SuperadminConfig};
use crate::error::{Error, Result};
use crate::store::Store;

/// Owns the token issuer and talks to the credential store
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn Store>,
    tokens: TokenIssuer,
    bcrypt_cost: u32,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Authenticator {
    pub fn new(store: Arc<dyn Store>, config: &AuthConfig) -> Result<Self> {
        Ok(Self {
            store,
            tokens: TokenIssuer::new(&config.jwt_secret, config.token_ttl_secs)?,
            bcrypt_cost: config.bcrypt_cost,
        })
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Self-service registration. Creating an admin requires valid
    /// superadmin credentials in the same request; any role other than
    /// "admin" is stored as "user".
    pub async fn register(&self, req: RegisterRequest) -> Result<User> {
        let (Some(username), Some(email), Some(password), Some(role)) = (
            present(req.username),
            present(req.email),
            present(req.password),
            present(req.role),
        ) else {
            return Err(Error::validation(
                "Username, email, password, and role are required.",
            ));
        };

        let role = if role == "admin" {
            self.check_superadmin(req.super_admin_email, req.super_admin_password)
                .await?;
            Role::Admin
        } else {
            Role::User
        };

        self.insert_new_user(username, email, &password, role).await
    }

    /// Account creation by an authenticated admin or superadmin
    pub async fn create_user(&self, creator: &Claims, req: CreateUserRequest) -> Result<User> {
        let (Some(username), Some(email), Some(password), Some(role)) = (
            present(req.username),
            present(req.email),
            present(req.password),
            present(req.role),
        ) else {
            return Err(Error::validation("All fields are required."));
        };

        let role: Role = role.parse().map_err(Error::Validation)?;
        if role == Role::Superadmin {
            return Err(Error::Forbidden(
                "Cannot create another superadmin.".to_string(),
            ));
        }

        let user = self.insert_new_user(username, email, &password, role).await?;
        tracing::info!("User {} created {} account {}", creator.sub, user.role, user.id);
        Ok(user)
    }

    /// Check credentials and issue a token
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse> {
        let (Some(email), Some(password)) = (present(req.email), present(req.password)) else {
            return Err(Error::validation("Email and password are required."));
        };

        let user = match self.store.find_user_by_email(&email).await? {
            Some(user) if verify_password(&password, &user.password_hash).await? => user,
            _ => {
                tracing::warn!("Failed login attempt for {}", email);
                return Err(Error::Auth("Invalid email or password.".to_string()));
            }
        };

        Ok(LoginResponse {
            token: self.tokens.issue(&user)?,
            role: user.role,
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        self.tokens.verify(token)
    }

    /// Gate a request on its bearer token. No or bad token is
    /// `Unauthorized`; a valid token whose role is not allowed is
    /// `Forbidden`.
    pub fn require_role(&self, token: Option<&str>, allowed: &[Role]) -> Result<Claims> {
        let token = token.ok_or_else(|| Error::Unauthorized("Unauthorized.".to_string()))?;
        let claims = self
            .tokens
            .verify(token)
            .map_err(|_| Error::Unauthorized("Invalid or expired token.".to_string()))?;

        if !allowed.contains(&claims.role) {
            return Err(Error::Forbidden("Access denied.".to_string()));
        }
        Ok(claims)
    }

    /// Create the superadmin if none exists. Returns true when one was
    /// created.
    pub async fn ensure_superadmin(&self, identity: &SuperadminConfig) -> Result<bool> {
        if self.store.find_user_by_role(Role::Superadmin).await?.is_some() {
            tracing::debug!("Superadmin already exists");
            return Ok(false);
        }

        let hash = hash_password(&identity.password, self.bcrypt_cost).await?;
        let user = User::new(
            identity.username.clone(),
            identity.email.clone(),
            hash,
            Role::Superadmin,
        );
        self.store.insert_user(&user).await?;

        tracing::info!("Superadmin {} initialized", user.email);
        Ok(true)
    }

    async fn check_superadmin(&self, email: Option<String>, password: Option<String>) -> Result<()> {
        let invalid = || Error::Auth("Invalid super admin credentials".to_string());

        let (Some(email), Some(password)) = (email, password) else {
            return Err(invalid());
        };

        match self.store.find_user_by_email(&email).await? {
            Some(user) if user.is_superadmin() => {
                if verify_password(&password, &user.password_hash).await? {
                    Ok(())
                } else {
                    Err(invalid())
                }
            }
            _ => Err(invalid()),
        }
    }

    async fn insert_new_user(
        &self,
        username: String,
        email: String,
        password: &str,
        role: Role,
    ) -> Result<User> {
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(Error::Conflict("Email is already registered.".to_string()));
        }

        let hash = hash_password(password, self.bcrypt_cost).await?;
        let user = User::new(username, email, hash, role);
        self.store.insert_user(&user).await?;

        tracing::info!("Registered {} {}", user.role, user.email);
        Ok(user)
    }
}
