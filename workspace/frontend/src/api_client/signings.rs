use async_trait::async_trait;
use common::{
    IndustryAcvChart, ProvincialDistribution, QuarterlyTarget, QuarterlyTargets, Signing,
    SigningList,
};
use compute::{FetchContext, GatewayError, RowSource};
use crate::api_client;

/// Signings table rows
pub struct SigningSource;

#[async_trait(?Send)]
impl RowSource<Signing> for SigningSource {
    async fn fetch_rows(&self, ctx: &FetchContext) -> Result<Vec<Signing>, GatewayError> {
        get_signings(ctx).await
    }
}

pub async fn get_signings(ctx: &FetchContext) -> Result<Vec<Signing>, GatewayError> {
    log::trace!("Fetching signings for {}", ctx.user.username);
    let list: SigningList = api_client::get("/signings/signings", ctx).await?;
    log::info!("Fetched {} signings", list.signings.len());
    Ok(list.signings)
}

pub async fn get_industry_acv(ctx: &FetchContext) -> Result<IndustryAcvChart, GatewayError> {
    log::trace!("Fetching incremental ACV by industry");
    api_client::get("/signings/industry-acv", ctx).await
}

pub async fn get_provincial_distribution(ctx: &FetchContext) -> Result<ProvincialDistribution, GatewayError> {
    log::trace!("Fetching provincial signings distribution");
    api_client::get("/signings/provincial-distribution", ctx).await
}

pub async fn get_quarterly_targets(ctx: &FetchContext) -> Result<Vec<QuarterlyTarget>, GatewayError> {
    log::trace!("Fetching signings quarterly targets");
    let targets: QuarterlyTargets = api_client::get("/signings/quarterly-targets", ctx).await?;
    Ok(targets.quarterly_targets)
}
