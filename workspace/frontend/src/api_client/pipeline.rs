use async_trait::async_trait;
use common::{
    Opportunity, OpportunityList, PipelineHeatmap, QuarterlyTarget, QuarterlyTargets, StageFunnel,
};
use compute::{FetchContext, GatewayError, RowSource};
use crate::api_client;

/// Opportunities table rows
pub struct OpportunitySource;

#[async_trait(?Send)]
impl RowSource<Opportunity> for OpportunitySource {
    async fn fetch_rows(&self, ctx: &FetchContext) -> Result<Vec<Opportunity>, GatewayError> {
        get_opportunities(ctx).await
    }
}

pub async fn get_opportunities(ctx: &FetchContext) -> Result<Vec<Opportunity>, GatewayError> {
    log::trace!("Fetching opportunities for {}", ctx.user.username);
    let list: OpportunityList = api_client::get("/pipeline/opportunities", ctx).await?;
    log::info!("Fetched {} opportunities", list.opportunities.len());
    Ok(list.opportunities)
}

pub async fn get_stage_funnel(ctx: &FetchContext) -> Result<StageFunnel, GatewayError> {
    log::trace!("Fetching pipeline stage funnel");
    api_client::get("/pipeline/stage-funnel", ctx).await
}

pub async fn get_heatmap(ctx: &FetchContext) -> Result<PipelineHeatmap, GatewayError> {
    log::trace!("Fetching pipeline heatmap");
    api_client::get("/pipeline/heatmap", ctx).await
}

pub async fn get_quarterly_targets(ctx: &FetchContext) -> Result<Vec<QuarterlyTarget>, GatewayError> {
    log::trace!("Fetching pipeline quarterly targets");
    let targets: QuarterlyTargets = api_client::get("/pipeline/quarterly-targets", ctx).await?;
    Ok(targets.quarterly_targets)
}
