use crate::domain::{
    DomainError, DomainResult, RegisterUserInputWithId, UpdateUserCredentialsInput, User,
    UserRepository,
};
use crate::postgres::PostgresClient;
use async_trait::async_trait;
use tokio_postgres::Row;
use tracing::{debug, instrument};

fn user_from_row(row: &Row) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        username: row.get("username"),
        putty_login: row.get("putty_login"),
        putty_password: row.get("putty_password"),
        created_at: Some(row.get("created_at")),
    }
}

/// PostgreSQL implementation of UserRepository trait
#[derive(Clone)]
pub struct PostgresUserRepository {
    client: PostgresClient,
}

impl PostgresUserRepository {
    pub fn new(client: PostgresClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, input), fields(user_id = %input.id, email = %input.email))]
    async fn register_user(&self, input: RegisterUserInputWithId) -> DomainResult<User> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let result = conn
            .query_one(
                "INSERT INTO users (id, email, password_hash, username, putty_login, putty_password)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING id, email, password_hash, username, putty_login, putty_password, created_at",
                &[
                    &input.id,
                    &input.email,
                    &input.password_hash,
                    &input.username,
                    &input.putty_login,
                    &input.putty_password,
                ],
            )
            .await;

        match result {
            Ok(row) => {
                debug!("user registered in database");
                Ok(user_from_row(&row))
            }
            Err(e) => {
                // PostgreSQL error code 23505 is unique_violation
                if let Some(db_err) = e.as_db_error() {
                    if db_err.code().code() == "23505" {
                        return Err(DomainError::UserAlreadyExists(input.email));
                    }
                }
                Err(DomainError::RepositoryError(e.into()))
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_id: &str) -> DomainResult<Option<User>> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let row = conn
            .query_opt(
                "SELECT id, email, password_hash, username, putty_login, putty_password, created_at
                 FROM users
                 WHERE id = $1",
                &[&user_id],
            )
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;

        Ok(row.as_ref().map(user_from_row))
    }

    #[instrument(skip(self, email))]
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let row = conn
            .query_opt(
                "SELECT id, email, password_hash, username, putty_login, putty_password, created_at
                 FROM users
                 WHERE email = $1",
                &[&email],
            )
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;

        Ok(row.as_ref().map(user_from_row))
    }

    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    async fn update_credentials(&self, input: UpdateUserCredentialsInput) -> DomainResult<User> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let row = conn
            .query_opt(
                "UPDATE users SET putty_login = $2, putty_password = $3
                 WHERE id = $1
                 RETURNING id, email, password_hash, username, putty_login, putty_password, created_at",
                &[&input.user_id, &input.putty_login, &input.putty_password],
            )
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;

        match row {
            Some(row) => {
                debug!("updated user credentials");
                Ok(user_from_row(&row))
            }
            None => Err(DomainError::UserNotFound(input.user_id)),
        }
    }
}
