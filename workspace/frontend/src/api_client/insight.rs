use common::{InsightRequest, InsightResponse, UserContext};
use compute::GatewayError;
use crate::{api_client, settings};

/// Shown in place of an answer whenever the insight service fails.
pub const INSIGHT_FAILURE: &str = "Something went wrong. Please try again.";

/// Ask the insight service a free-text question. Blank questions are not sent.
pub async fn ask(user: &UserContext, query: &str) -> Result<Option<String>, GatewayError> {
    let query = query.trim();
    if query.is_empty() {
        log::debug!("Skipping blank insight query");
        return Ok(None);
    }

    // The insight route is served from the server root, outside the API prefix
    let url = settings::get_settings().server_url("/ai-insight");
    let request = InsightRequest {
        query: query.to_string(),
    };
    let response: InsightResponse =
        api_client::post_url(&url, "/ai-insight", Some(&user.token), &request).await?;

    Ok(Some(
        response
            .insight
            .unwrap_or_else(|| "No insight returned.".to_string()),
    ))
}
