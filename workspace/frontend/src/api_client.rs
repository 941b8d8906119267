pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod executives;
pub mod insight;
pub mod pipeline;
pub mod revenue;
pub mod signings;
pub mod wins;

use common::ErrorResponse;
use compute::{FetchContext, GatewayError};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use crate::settings;

fn api_url(endpoint: &str) -> String {
    settings::get_settings().api_url(endpoint)
}

fn with_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) if !token.is_empty() => {
            request.header("Authorization", &format!("Bearer {}", token))
        }
        _ => request,
    }
}

fn request_failed(method: &str, endpoint: &str, e: gloo_net::Error) -> GatewayError {
    let error_msg = format!("Request failed: {}", e);
    log::error!("{} {} - {}", method, endpoint, error_msg);
    GatewayError::Network(error_msg)
}

/// Maps a non-2xx response to a gateway error, preferring the server's `error` message.
pub(crate) fn status_error(status: u16, body_message: Option<String>) -> GatewayError {
    let message = body_message.unwrap_or_else(|| format!("HTTP error: {}", status));
    match status {
        401 | 403 => GatewayError::Authentication(message),
        _ => GatewayError::Network(message),
    }
}

/// Checks the status and parses the JSON body of a response.
async fn read_response<T>(method: &str, endpoint: &str, response: Response) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
{
    if !response.ok() {
        let status = response.status();
        log::warn!("{} {} - Non-OK response: {}", method, endpoint, status);
        let body_message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|err| err.error);
        let error = status_error(status, body_message);
        log::error!("{} {} - {}", method, endpoint, error);
        return Err(error);
    }

    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let data: T = response.json().await.map_err(|e| {
        let error_msg = format!("Failed to parse response: {}", e);
        log::error!("{} {} - {}", method, endpoint, error_msg);
        GatewayError::Network(error_msg)
    })?;

    log::info!("{} {} - Success", method, endpoint);
    Ok(data)
}

/// GET with the user's token and the `username`/`year` query every dashboard read takes
pub async fn get<T>(endpoint: &str, ctx: &FetchContext) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
{
    let url = api_url(endpoint);
    log::debug!("GET request to: {} (user={}, year={})", url, ctx.user.username, ctx.year);

    let query = ctx.query();
    let request = Request::get(&url).query(query.iter().map(|(k, v)| (*k, v.as_str())));
    let response = with_token(request, Some(&ctx.user.token))
        .send()
        .await
        .map_err(|e| request_failed("GET", endpoint, e))?;

    read_response("GET", endpoint, response).await
}

/// Common POST request handler
pub async fn post<T, B>(endpoint: &str, token: Option<&str>, body: &B) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let url = api_url(endpoint);
    post_url(&url, endpoint, token, body).await
}

/// POST to an absolute URL; `endpoint` is only used in log lines and errors.
pub async fn post_url<T, B>(url: &str, endpoint: &str, token: Option<&str>, body: &B) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    log::debug!("POST request to: {}", url);

    let response = with_token(Request::post(url), token)
        .json(body)
        .map_err(|e| {
            let error_msg = format!("Failed to serialize request: {}", e);
            log::error!("POST {} - {}", endpoint, error_msg);
            GatewayError::Network(error_msg)
        })?
        .send()
        .await
        .map_err(|e| request_failed("POST", endpoint, e))?;

    read_response("POST", endpoint, response).await
}

/// Common DELETE request handler
pub async fn delete<T>(endpoint: &str, token: &str) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
{
    let url = api_url(endpoint);
    log::debug!("DELETE request to: {}", url);

    let response = with_token(Request::delete(&url), Some(token))
        .send()
        .await
        .map_err(|e| request_failed("DELETE", endpoint, e))?;

    read_response("DELETE", endpoint, response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mapping() {
        assert_eq!(
            status_error(401, Some("Invalid credentials".to_string())),
            GatewayError::Authentication("Invalid credentials".to_string())
        );
        assert!(status_error(403, None).is_authentication());
        assert_eq!(
            status_error(500, None),
            GatewayError::Network("HTTP error: 500".to_string())
        );
        assert_eq!(
            status_error(404, Some("User not found".to_string())),
            GatewayError::Network("User not found".to_string())
        );
    }
}
