//! Authentication, tokens and role-based access

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod policy;
pub mod service;

pub use jwt::{Claims, TokenIssuer};
pub use middleware::{bearer_token, gate};
pub use models::{CreateUserRequest, LoginRequest, LoginResponse, RegisterRequest, Role, User};
pub use policy::{Access, AccessPolicy};
pub use service::Authenticator;
