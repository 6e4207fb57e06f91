//! JSON API handlers for device management. Handlers stay thin: extract the
//! caller, build a service request, map the outcome.

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::http::{domain_error_to_response, error_response, extract_user_context, UserContext};
use tracing::{debug, instrument};

use crate::domain::UploadConfigRequest;
use crate::http::router::AppState;
use crate::http::schemas::{DeviceConfigRead, DeviceCreate, DeviceRead, DeviceUpdate};

fn authenticate(state: &AppState, headers: &axum::http::HeaderMap) -> Result<UserContext, Response> {
    extract_user_context(headers, state.auth_token_provider.as_ref())
}

#[instrument(skip(state, headers))]
pub async fn list_devices(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }

    match state.device_service.list_devices().await {
        Ok(devices) => {
            let body: Vec<DeviceRead> = devices.into_iter().map(DeviceRead::from).collect();
            Json(body).into_response()
        }
        Err(e) => domain_error_to_response(e),
    }
}

#[instrument(skip(state, headers, payload), fields(device_name = %payload.name))]
pub async fn create_device(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Json(payload): Json<DeviceCreate>,
) -> Response {
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }

    let request = crate::domain::CreateDeviceRequest {
        name: payload.name,
        ip_address: payload.ip_address,
    };

    match state.device_service.create_device(request).await {
        Ok(device) => {
            debug!(device_id = device.id, "device created");
            Json(DeviceRead::from(device)).into_response()
        }
        Err(e) => domain_error_to_response(e),
    }
}

#[instrument(skip(state, headers, payload))]
pub async fn update_device(
    State(state): State<AppState>,
    Path(device_id): Path<i64>,
    headers: axum::http::HeaderMap,
    Json(payload): Json<DeviceUpdate>,
) -> Response {
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }

    match state
        .device_service
        .update_device_ip(device_id, payload.ip_address)
        .await
    {
        Ok(device) => Json(DeviceRead::from(device)).into_response(),
        Err(e) => domain_error_to_response(e),
    }
}

#[instrument(skip(state, headers))]
pub async fn delete_device(
    State(state): State<AppState>,
    Path(device_id): Path<i64>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }

    match state.device_service.delete_device(device_id).await {
        Ok(()) => Json(true).into_response(),
        Err(e) => domain_error_to_response(e),
    }
}

#[instrument(skip(state, headers, multipart))]
pub async fn upload_config(
    State(state): State<AppState>,
    Path(device_id): Path<i64>,
    headers: axum::http::HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }

    // Single file part, mirroring the upload form; the first part wins
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => return error_response(StatusCode::BAD_REQUEST, "Missing config file part"),
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let content_type = field.content_type().unwrap_or_default().to_string();
    let content = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let request = UploadConfigRequest {
        device_id,
        content_type,
        content,
    };

    match state.device_service.upload_config(request).await {
        Ok(device) => Json(DeviceRead::from(device)).into_response(),
        Err(e) => domain_error_to_response(e),
    }
}

#[instrument(skip(state, headers))]
pub async fn get_config(
    State(state): State<AppState>,
    Path(device_id): Path<i64>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }

    match state.device_service.get_config(device_id).await {
        Ok(snapshot) => Json(DeviceConfigRead::from(snapshot)).into_response(),
        Err(e) => domain_error_to_response(e),
    }
}

#[instrument(skip(state, headers))]
pub async fn download_config(
    State(state): State<AppState>,
    Path(device_id): Path<i64>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }

    match state.device_service.get_config(device_id).await {
        Ok(snapshot) => {
            let disposition = format!(
                "attachment; filename=\"{}.txt\"",
                snapshot.device_name.replace('"', "")
            );
            (
                [
                    (
                        header::CONTENT_TYPE,
                        "text/plain; charset=utf-8".to_string(),
                    ),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                snapshot.content,
            )
                .into_response()
        }
        Err(e) => domain_error_to_response(e),
    }
}
