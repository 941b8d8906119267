use async_trait::async_trait;
use common::{
    IndustryRevenueChart, QuarterlyTarget, QuarterlyTargets, RevenueDistribution, RevenueList,
    RevenueRecord,
};
use compute::{FetchContext, GatewayError, RowSource};
use crate::api_client;

/// Revenue table rows
pub struct RevenueSource;

#[async_trait(?Send)]
impl RowSource<RevenueRecord> for RevenueSource {
    async fn fetch_rows(&self, ctx: &FetchContext) -> Result<Vec<RevenueRecord>, GatewayError> {
        get_revenue(ctx).await
    }
}

pub async fn get_revenue(ctx: &FetchContext) -> Result<Vec<RevenueRecord>, GatewayError> {
    log::trace!("Fetching revenue records for {}", ctx.user.username);
    let list: RevenueList = api_client::get("/revenue/revenue", ctx).await?;
    log::info!("Fetched {} revenue records", list.revenue.len());
    Ok(list.revenue)
}

/// Revenue per product category and quarter, for the bubble chart
pub async fn get_product_distribution(ctx: &FetchContext) -> Result<RevenueDistribution, GatewayError> {
    log::trace!("Fetching revenue product distribution");
    api_client::get("/revenue/revenue-product-distribution-chart", ctx).await
}

pub async fn get_industry_revenue(ctx: &FetchContext) -> Result<IndustryRevenueChart, GatewayError> {
    log::trace!("Fetching industry revenue area chart");
    api_client::get("/revenue/industry-revenue-area-chart", ctx).await
}

pub async fn get_quarterly_targets(ctx: &FetchContext) -> Result<Vec<QuarterlyTarget>, GatewayError> {
    log::trace!("Fetching revenue quarterly targets");
    let targets: QuarterlyTargets = api_client::get("/revenue/quarterly-targets", ctx).await?;
    Ok(targets.quarterly_targets)
}
