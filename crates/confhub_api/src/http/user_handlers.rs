//! Identity handlers: registration, login/logout, current user.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::domain::{LoginUserInput, RegisterUserInput, UpdateUserCredentialsInput};
use common::http::{domain_error_to_response, extract_user_context, SessionCookie, UserContext};
use tracing::{debug, instrument};

use crate::http::router::AppState;
use crate::http::schemas::{TokenRead, UserCreate, UserCredentialsUpdate, UserLogin, UserRead};

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<UserContext, Response> {
    extract_user_context(headers, state.auth_token_provider.as_ref())
}

#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn register(State(state): State<AppState>, Json(payload): Json<UserCreate>) -> Response {
    let input = RegisterUserInput {
        email: payload.email,
        password: payload.password,
        username: payload.username,
        putty_login: payload.putty_login,
        putty_password: payload.putty_password,
    };

    match state.user_service.register_user(input).await {
        Ok(user) => {
            debug!(user_id = %user.id, "user registered");
            (StatusCode::CREATED, Json(UserRead::from(user))).into_response()
        }
        Err(e) => domain_error_to_response(e),
    }
}

/// Issue an access token. The token goes out twice: in the JSON body for API
/// clients and as an HttpOnly session cookie for the browser pages.
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login(State(state): State<AppState>, Json(payload): Json<UserLogin>) -> Response {
    let input = LoginUserInput {
        email: payload.email,
        password: payload.password,
    };

    match state.user_service.login_user(input).await {
        Ok(output) => {
            let cookie = SessionCookie::new(
                output.access_token.clone(),
                state.session_expiration_hours,
                state.secure_cookies,
            );
            (
                [(header::SET_COOKIE, cookie.to_header_value())],
                Json(TokenRead {
                    access_token: output.access_token,
                    token_type: "bearer".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => domain_error_to_response(e),
    }
}

#[instrument(skip(state, headers))]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }

    let cookie = SessionCookie::clear(state.secure_cookies);
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, cookie.to_header_value())],
    )
        .into_response()
}

#[instrument(skip(state, headers))]
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let context = match authenticate(&state, &headers) {
        Ok(context) => context,
        Err(response) => return response,
    };

    match state.user_service.current_user(&context.user_id).await {
        Ok(user) => Json(UserRead::from(user)).into_response(),
        Err(e) => domain_error_to_response(e),
    }
}

#[instrument(skip(state, headers, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UserCredentialsUpdate>,
) -> Response {
    let context = match authenticate(&state, &headers) {
        Ok(context) => context,
        Err(response) => return response,
    };

    let input = UpdateUserCredentialsInput {
        user_id: context.user_id,
        putty_login: payload.putty_login,
        putty_password: payload.putty_password,
    };

    match state.user_service.update_credentials(input).await {
        Ok(user) => Json(UserRead::from(user)).into_response(),
        Err(e) => domain_error_to_response(e),
    }
}
