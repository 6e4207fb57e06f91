use crate::domain::result::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// User account able to manage devices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub username: String,
    pub putty_login: String,
    pub putty_password: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// External input for registering a user (no ID, plaintext password)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserInput {
    pub email: String,
    pub password: String, // Plaintext - hashed by the domain service
    pub username: String,
    pub putty_login: String,
    pub putty_password: String,
}

/// Internal input with generated ID and hashed password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserInputWithId {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub username: String,
    pub putty_login: String,
    pub putty_password: String,
}

/// Input for replacing a user's stored terminal credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserCredentialsInput {
    pub user_id: String,
    pub putty_login: String,
    pub putty_password: String,
}

/// Input for logging a user in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginUserInput {
    pub email: String,
    pub password: String,
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginUserOutput {
    pub access_token: String,
}

/// Repository trait for user storage operations
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Register a new user (id and password_hash already generated/hashed)
    async fn register_user(&self, input: RegisterUserInputWithId) -> DomainResult<User>;

    /// Get a user by ID
    async fn get_user(&self, user_id: &str) -> DomainResult<Option<User>>;

    /// Get a user by email
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Replace the stored terminal credentials for a user
    async fn update_credentials(&self, input: UpdateUserCredentialsInput) -> DomainResult<User>;
}
