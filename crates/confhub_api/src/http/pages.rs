//! Server-rendered HTML pages. These are a thin presentation shell over the
//! same services the JSON API uses; the only substantial HTML document in
//! the system (the comparison view) comes from the diff renderer.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use common::diff::escape_html;
use common::domain::{Device, DomainError};
use common::http::extract_user_context;
use serde::Deserialize;
use tracing::instrument;

use crate::http::router::AppState;

const PAGE_STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }
table.devices { border-collapse: collapse; }
table.devices th, table.devices td { border: 1px solid #ccc; padding: 4px 10px; }
pre.config { background: #f4f4f4; padding: 1em; }";

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{PAGE_STYLE}\n</style>\n</head>\n\
         <body>\n<nav><a href=\"/devices\">Devices</a> | <a href=\"/compare\">Compare</a></nav>\n\
         {body}\n</body>\n</html>\n",
        title = escape_html(title),
    ))
}

fn device_table(devices: &[Device]) -> String {
    let mut rows = String::new();
    for device in devices {
        rows.push_str(&format!(
            "<tr><td>{id}</td><td><a href=\"/devices/{id}\">{name}</a></td><td>{ip}</td><td>{config}</td></tr>\n",
            id = device.id,
            name = escape_html(&device.name),
            ip = escape_html(&device.ip_address),
            config = if device.config_file_path.is_some() { "yes" } else { "no" },
        ));
    }

    format!(
        "<table class=\"devices\">\n\
         <tr><th>Id</th><th>Name</th><th>IP address</th><th>Config</th></tr>\n\
         {rows}</table>"
    )
}

#[instrument]
pub async fn index_page() -> Html<String> {
    page(
        "confhub",
        "<h1>confhub</h1>\n<p>Device configuration management.</p>",
    )
}

#[instrument(skip(state, headers))]
pub async fn devices_page(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Err(response) = extract_user_context(&headers, state.auth_token_provider.as_ref()) {
        return response;
    }

    match state.device_service.list_devices().await {
        Ok(devices) => page(
            "Devices",
            &format!("<h1>Devices</h1>\n{}", device_table(&devices)),
        )
        .into_response(),
        Err(e) => common::http::domain_error_to_response(e),
    }
}

#[instrument(skip(state, headers))]
pub async fn device_page(
    State(state): State<AppState>,
    Path(device_id): Path<i64>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Err(response) = extract_user_context(&headers, state.auth_token_provider.as_ref()) {
        return response;
    }

    let device = match state.device_service.get_device(device_id).await {
        Ok(device) => device,
        Err(e) => return common::http::domain_error_to_response(e),
    };

    let config_section = match state.device_service.get_config(device_id).await {
        Ok(snapshot) => format!(
            "<h2>Configuration</h2>\n<pre class=\"config\">{}</pre>",
            escape_html(&snapshot.content)
        ),
        Err(DomainError::ConfigNotFound(_)) => {
            "<p>No configuration uploaded yet.</p>".to_string()
        }
        Err(e) => return common::http::domain_error_to_response(e),
    };

    let body = format!(
        "<h1>{name}</h1>\n<p>IP address: {ip}</p>\n{config_section}",
        name = escape_html(&device.name),
        ip = escape_html(&device.ip_address),
    );

    page(&device.name, &body).into_response()
}

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub device1_id: Option<i64>,
    pub device2_id: Option<i64>,
}

#[instrument(skip(state, headers))]
pub async fn compare_page(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Err(response) = extract_user_context(&headers, state.auth_token_provider.as_ref()) {
        return response;
    }

    // With both devices picked, the diff renderer's document is the page
    if let (Some(left), Some(right)) = (params.device1_id, params.device2_id) {
        return match state.device_service.compare_configs(left, right).await {
            Ok(html) => Html(html).into_response(),
            Err(e) => common::http::domain_error_to_response(e),
        };
    }

    // Otherwise render a picker over the known devices
    match state.device_service.list_devices().await {
        Ok(devices) => {
            let options: String = devices
                .iter()
                .map(|d| {
                    format!(
                        "<option value=\"{}\">{}</option>\n",
                        d.id,
                        escape_html(&d.name)
                    )
                })
                .collect();

            let body = format!(
                "<h1>Compare configurations</h1>\n\
                 <form method=\"get\" action=\"/compare\">\n\
                 <select name=\"device1_id\">{options}</select>\n\
                 <select name=\"device2_id\">{options}</select>\n\
                 <button type=\"submit\">Compare</button>\n</form>",
            );
            page("Compare", &body).into_response()
        }
        Err(e) => common::http::domain_error_to_response(e),
    }
}
