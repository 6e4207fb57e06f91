use common::auth::{AuthTokenProvider, PasswordService};
use common::domain::{
    DomainError, DomainResult, LoginUserInput, LoginUserOutput, RegisterUserInput,
    RegisterUserInputWithId, UpdateUserCredentialsInput, User, UserRepository,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Domain service for user registration and authentication
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    auth_token_provider: Arc<dyn AuthTokenProvider>,
    password_service: Arc<dyn PasswordService>,
}

impl UserService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        auth_token_provider: Arc<dyn AuthTokenProvider>,
        password_service: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            user_repository,
            auth_token_provider,
            password_service,
        }
    }

    /// Register a new user with hashed password
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register_user(&self, input: RegisterUserInput) -> DomainResult<User> {
        if !Self::is_valid_email(&input.email) {
            return Err(DomainError::InvalidEmail("Invalid email format".to_string()));
        }

        if input.password.len() < 8 {
            return Err(DomainError::InvalidPassword(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        if input.username.trim().is_empty() {
            return Err(DomainError::InvalidUserName(
                "Username cannot be empty".to_string(),
            ));
        }

        let password_hash = self.password_service.hash_password(&input.password)?;
        let user_id = xid::new().to_string();

        debug!(user_id = %user_id, "registering user with hashed password");

        let user = self
            .user_repository
            .register_user(RegisterUserInputWithId {
                id: user_id,
                email: input.email,
                password_hash,
                username: input.username,
                putty_login: input.putty_login,
                putty_password: input.putty_password,
            })
            .await?;

        debug!(user_id = %user.id, "user registered successfully");
        Ok(user)
    }

    /// Login a user, producing an access token. Unknown email and wrong
    /// password are indistinguishable to the caller.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login_user(&self, input: LoginUserInput) -> DomainResult<LoginUserOutput> {
        if !Self::is_valid_email(&input.email) {
            return Err(DomainError::InvalidCredentials);
        }

        let user = self
            .user_repository
            .get_user_by_email(&input.email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !self
            .password_service
            .verify_password(&input.password, &user.password_hash)?
        {
            return Err(DomainError::InvalidCredentials);
        }

        let access_token = self.auth_token_provider.generate_token(&user.id)?;

        debug!(user_id = %user.id, "user login successful");
        Ok(LoginUserOutput { access_token })
    }

    /// Get the authenticated caller's account
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: &str) -> DomainResult<User> {
        self.user_repository
            .get_user(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))
    }

    /// Replace the caller's stored terminal credentials
    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    pub async fn update_credentials(
        &self,
        input: UpdateUserCredentialsInput,
    ) -> DomainResult<User> {
        let user = self.user_repository.update_credentials(input).await?;
        debug!(user_id = %user.id, "updated user credentials");
        Ok(user)
    }

    /// Basic email validation: one @, dot somewhere in the domain
    fn is_valid_email(email: &str) -> bool {
        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() != 2 || parts[0].is_empty() {
            return false;
        }
        let domain = parts[1];
        domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::auth::{MockAuthTokenProvider, MockPasswordService};
    use common::domain::MockUserRepository;

    fn alice() -> User {
        User {
            id: "user-alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            username: "alice".to_string(),
            putty_login: "admin".to_string(),
            putty_password: "hunter2".to_string(),
            created_at: None,
        }
    }

    fn register_input() -> RegisterUserInput {
        RegisterUserInput {
            email: "alice@example.com".to_string(),
            password: "long-enough-password".to_string(),
            username: "alice".to_string(),
            putty_login: "admin".to_string(),
            putty_password: "hunter2".to_string(),
        }
    }

    fn service(
        repo: MockUserRepository,
        tokens: MockAuthTokenProvider,
        passwords: MockPasswordService,
    ) -> UserService {
        UserService::new(Arc::new(repo), Arc::new(tokens), Arc::new(passwords))
    }

    #[tokio::test]
    async fn test_register_user_success() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_register_user()
            .withf(|input: &RegisterUserInputWithId| {
                !input.id.is_empty()
                    && input.email == "alice@example.com"
                    && input.password_hash == "hashed"
            })
            .times(1)
            .return_once(|_| Ok(alice()));

        let mut mock_passwords = MockPasswordService::new();
        mock_passwords
            .expect_hash_password()
            .with(mockall::predicate::eq("long-enough-password"))
            .times(1)
            .returning(|_| Ok("hashed".to_string()));

        let service = service(mock_repo, MockAuthTokenProvider::new(), mock_passwords);

        let user = service.register_user(register_input()).await.unwrap();
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_register_user_invalid_email() {
        let service = service(
            MockUserRepository::new(),
            MockAuthTokenProvider::new(),
            MockPasswordService::new(),
        );

        let mut input = register_input();
        input.email = "not-an-email".to_string();

        let result = service.register_user(input).await;
        assert!(matches!(result, Err(DomainError::InvalidEmail(_))));
    }

    #[tokio::test]
    async fn test_register_user_short_password() {
        let service = service(
            MockUserRepository::new(),
            MockAuthTokenProvider::new(),
            MockPasswordService::new(),
        );

        let mut input = register_input();
        input.password = "short".to_string();

        let result = service.register_user(input).await;
        assert!(matches!(result, Err(DomainError::InvalidPassword(_))));
    }

    #[tokio::test]
    async fn test_register_user_blank_username() {
        let service = service(
            MockUserRepository::new(),
            MockAuthTokenProvider::new(),
            MockPasswordService::new(),
        );

        let mut input = register_input();
        input.username = "   ".to_string();

        let result = service.register_user(input).await;
        assert!(matches!(result, Err(DomainError::InvalidUserName(_))));
    }

    #[tokio::test]
    async fn test_register_user_duplicate_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_register_user()
            .times(1)
            .return_once(|_| Err(DomainError::UserAlreadyExists("alice@example.com".to_string())));

        let mut mock_passwords = MockPasswordService::new();
        mock_passwords
            .expect_hash_password()
            .returning(|_| Ok("hashed".to_string()));

        let service = service(mock_repo, MockAuthTokenProvider::new(), mock_passwords);

        let result = service.register_user(register_input()).await;
        assert!(matches!(result, Err(DomainError::UserAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_user_success() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_user_by_email()
            .with(mockall::predicate::eq("alice@example.com"))
            .times(1)
            .return_once(|_| Ok(Some(alice())));

        let mut mock_passwords = MockPasswordService::new();
        mock_passwords
            .expect_verify_password()
            .times(1)
            .returning(|_, _| Ok(true));

        let mut mock_tokens = MockAuthTokenProvider::new();
        mock_tokens
            .expect_generate_token()
            .with(mockall::predicate::eq("user-alice"))
            .times(1)
            .returning(|_| Ok("jwt-token".to_string()));

        let service = service(mock_repo, mock_tokens, mock_passwords);

        let output = service
            .login_user(LoginUserInput {
                email: "alice@example.com".to_string(),
                password: "long-enough-password".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.access_token, "jwt-token");
    }

    #[tokio::test]
    async fn test_login_user_unknown_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_user_by_email()
            .times(1)
            .return_once(|_| Ok(None));

        let service = service(
            mock_repo,
            MockAuthTokenProvider::new(),
            MockPasswordService::new(),
        );

        let result = service
            .login_user(LoginUserInput {
                email: "ghost@example.com".to_string(),
                password: "whatever-password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_user_wrong_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_user_by_email()
            .times(1)
            .return_once(|_| Ok(Some(alice())));

        let mut mock_passwords = MockPasswordService::new();
        mock_passwords
            .expect_verify_password()
            .times(1)
            .returning(|_, _| Ok(false));

        let service = service(mock_repo, MockAuthTokenProvider::new(), mock_passwords);

        let result = service
            .login_user(LoginUserInput {
                email: "alice@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_current_user_success() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_user()
            .with(mockall::predicate::eq("user-alice"))
            .times(1)
            .return_once(|_| Ok(Some(alice())));

        let service = service(
            mock_repo,
            MockAuthTokenProvider::new(),
            MockPasswordService::new(),
        );

        let user = service.current_user("user-alice").await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_current_user_stale_id() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_user()
            .times(1)
            .return_once(|_| Ok(None));

        let service = service(
            mock_repo,
            MockAuthTokenProvider::new(),
            MockPasswordService::new(),
        );

        let result = service.current_user("ghost").await;
        assert!(matches!(result, Err(DomainError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_credentials() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_update_credentials()
            .withf(|input: &UpdateUserCredentialsInput| {
                input.user_id == "user-alice" && input.putty_login == "root"
            })
            .times(1)
            .return_once(|_| {
                Ok(User {
                    putty_login: "root".to_string(),
                    ..alice()
                })
            });

        let service = service(
            mock_repo,
            MockAuthTokenProvider::new(),
            MockPasswordService::new(),
        );

        let user = service
            .update_credentials(UpdateUserCredentialsInput {
                user_id: "user-alice".to_string(),
                putty_login: "root".to_string(),
                putty_password: "changed".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.putty_login, "root");
    }
}
