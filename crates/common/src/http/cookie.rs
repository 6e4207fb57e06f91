use axum::http::HeaderMap;

/// Name of the session cookie carrying the access token for browser pages
pub const SESSION_COOKIE: &str = "confhub_session";

/// Session cookie carrying the JWT access token
pub struct SessionCookie {
    pub value: String,
    pub max_age_seconds: i64,
    pub secure: bool,
}

impl SessionCookie {
    /// Create a session cookie holding `value` for `expiration_hours`
    pub fn new(value: String, expiration_hours: u64, secure: bool) -> Self {
        Self {
            value,
            max_age_seconds: (expiration_hours * 60 * 60) as i64,
            secure,
        }
    }

    /// Create a cookie that clears the session (for logout)
    pub fn clear(secure: bool) -> Self {
        Self {
            value: String::new(),
            max_age_seconds: 0,
            secure,
        }
    }

    /// Build the Set-Cookie header value
    pub fn to_header_value(&self) -> String {
        let mut parts = vec![
            format!("{}={}", SESSION_COOKIE, self.value),
            format!("Max-Age={}", self.max_age_seconds),
            "Path=/".to_string(),
            "HttpOnly".to_string(),
            "SameSite=Lax".to_string(),
        ];

        if self.secure {
            parts.push("Secure".to_string());
        }

        parts.join("; ")
    }
}

/// Extract the session token from request cookies
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{}=", SESSION_COOKIE);
    headers
        .get(axum::http::header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str
                .split(';')
                .map(|s| s.trim())
                .find(|s| s.starts_with(&prefix))
                .map(|s| s[prefix.len()..].to_string())
        })
        .filter(|token| !token.is_empty())
}
