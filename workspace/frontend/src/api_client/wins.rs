use async_trait::async_trait;
use common::{
    QuarterlyTarget, QuarterlyTargets, Win, WinList, WinsCategoryDistribution, WinsEvolution,
};
use compute::{FetchContext, GatewayError, RowSource};
use crate::api_client;

/// Wins table rows
pub struct WinSource;

#[async_trait(?Send)]
impl RowSource<Win> for WinSource {
    async fn fetch_rows(&self, ctx: &FetchContext) -> Result<Vec<Win>, GatewayError> {
        get_wins(ctx).await
    }
}

pub async fn get_wins(ctx: &FetchContext) -> Result<Vec<Win>, GatewayError> {
    log::trace!("Fetching wins for {}", ctx.user.username);
    let list: WinList = api_client::get("/wins/wins", ctx).await?;
    log::info!("Fetched {} wins", list.wins.len());
    Ok(list.wins)
}

pub async fn get_category_distribution(ctx: &FetchContext) -> Result<WinsCategoryDistribution, GatewayError> {
    log::trace!("Fetching wins category distribution");
    api_client::get("/wins/category-distribution", ctx).await
}

pub async fn get_quarterly_evolution(ctx: &FetchContext) -> Result<WinsEvolution, GatewayError> {
    log::trace!("Fetching quarterly wins evolution");
    api_client::get("/wins/win-quarterly-evolution-chart", ctx).await
}

pub async fn get_quarterly_targets(ctx: &FetchContext) -> Result<Vec<QuarterlyTarget>, GatewayError> {
    log::trace!("Fetching wins quarterly targets");
    let targets: QuarterlyTargets = api_client::get("/wins/quarterly-targets", ctx).await?;
    Ok(targets.quarterly_targets)
}
