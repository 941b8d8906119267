use common::{PipelineCount, RevenueSum, SigningsCount, WinsCount};
use compute::{FetchContext, GatewayError};
use crate::api_client;

/// Total revenue for the reporting year
pub async fn get_revenue_sum(ctx: &FetchContext) -> Result<f64, GatewayError> {
    log::trace!("Fetching revenue sum");
    let result: RevenueSum = api_client::get("/dashboard/revenue-sum", ctx).await?;
    Ok(result.revenue_sum)
}

/// Number of open opportunities
pub async fn get_pipeline_count(ctx: &FetchContext) -> Result<f64, GatewayError> {
    log::trace!("Fetching pipeline count");
    let result: PipelineCount = api_client::get("/dashboard/pipeline-count", ctx).await?;
    Ok(result.pipeline_count)
}

pub async fn get_signings_count(ctx: &FetchContext) -> Result<f64, GatewayError> {
    log::trace!("Fetching signings count");
    let result: SigningsCount = api_client::get("/dashboard/signings-count", ctx).await?;
    Ok(result.signings_count)
}

pub async fn get_wins_count(ctx: &FetchContext) -> Result<f64, GatewayError> {
    log::trace!("Fetching wins count");
    let result: WinsCount = api_client::get("/dashboard/wins-count", ctx).await?;
    Ok(result.wins_count)
}
