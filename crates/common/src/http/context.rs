use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;

use crate::auth::AuthTokenProvider;
use crate::http::cookie::extract_session_token;
use crate::http::error::{domain_error_to_response, error_response};

/// Caller identity extracted from an authenticated request
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: String,
}

/// Extract the caller from a request's credentials.
///
/// Accepts a Bearer token in the Authorization header (API clients) or the
/// session cookie (browser pages) and validates it with the provided
/// AuthTokenProvider. On failure returns a ready-to-send 401 response.
pub fn extract_user_context(
    headers: &HeaderMap,
    auth_token_provider: &dyn AuthTokenProvider,
) -> Result<UserContext, Response> {
    let token = bearer_token(headers)
        .or_else(|| extract_session_token(headers))
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "Missing credentials"))?;

    let user_id = auth_token_provider
        .validate_token(&token)
        .map_err(domain_error_to_response)?;

    Ok(UserContext { user_id })
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(|token| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MockAuthTokenProvider;
    use crate::domain::DomainError;

    #[test]
    fn test_extract_from_bearer_header() {
        let mut mock_provider = MockAuthTokenProvider::new();
        mock_provider
            .expect_validate_token()
            .with(mockall::predicate::eq("valid_token"))
            .returning(|_| Ok("user123".to_string()));

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Bearer valid_token".parse().unwrap(),
        );

        let context = extract_user_context(&headers, &mock_provider).unwrap();
        assert_eq!(context.user_id, "user123");
    }

    #[test]
    fn test_extract_from_session_cookie() {
        let mut mock_provider = MockAuthTokenProvider::new();
        mock_provider
            .expect_validate_token()
            .with(mockall::predicate::eq("cookie_token"))
            .returning(|_| Ok("user456".to_string()));

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            "confhub_session=cookie_token".parse().unwrap(),
        );

        let context = extract_user_context(&headers, &mock_provider).unwrap();
        assert_eq!(context.user_id, "user456");
    }

    #[test]
    fn test_bearer_header_wins_over_cookie() {
        let mut mock_provider = MockAuthTokenProvider::new();
        mock_provider
            .expect_validate_token()
            .with(mockall::predicate::eq("header_token"))
            .returning(|_| Ok("user123".to_string()));

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Bearer header_token".parse().unwrap(),
        );
        headers.insert(
            axum::http::header::COOKIE,
            "confhub_session=cookie_token".parse().unwrap(),
        );

        assert!(extract_user_context(&headers, &mock_provider).is_ok());
    }

    #[test]
    fn test_missing_credentials() {
        let mock_provider = MockAuthTokenProvider::new();
        let headers = HeaderMap::new();

        let response = extract_user_context(&headers, &mock_provider).unwrap_err();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_unsupported_scheme() {
        let mock_provider = MockAuthTokenProvider::new();
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Basic abc123".parse().unwrap(),
        );

        let response = extract_user_context(&headers, &mock_provider).unwrap_err();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invalid_token() {
        let mut mock_provider = MockAuthTokenProvider::new();
        mock_provider
            .expect_validate_token()
            .returning(|_| Err(DomainError::InvalidToken("expired".to_string())));

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Bearer expired_token".parse().unwrap(),
        );

        let response = extract_user_context(&headers, &mock_provider).unwrap_err();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
