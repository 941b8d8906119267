use common::{format_currency, Opportunity, PipelineHeatmap, StageFunnel};
use compute::{chart, FetchContext, ValueFormat};
use yew::prelude::*;

use super::{load_progress, targets_section};
use crate::api_client::pipeline::{self, OpportunitySource};
use crate::common::fetch_hook::{use_load_tracker, use_page_fetch};
use crate::common::fetch_render::FetchRender;
use crate::components::cards::Panel;
use crate::components::chart::ChartView;
use crate::components::filter_panel::table_filters;
use crate::components::table::{use_table, DataTable, TableHandle};

const FETCHES: &[&str] = &["opportunities", "stage funnel", "pipeline heatmap", "quarterly targets"];
const FILTER_COLUMNS: &[&str] = &["sales_stage", "forecast_category", "product_category"];

#[function_component(PipelinePage)]
pub fn pipeline_page() -> Html {
    let tracker = use_load_tracker(FETCHES);
    let (table, refetch_rows): (TableHandle<Opportunity>, _) = use_table(
        "opportunities",
        &tracker,
        FILTER_COLUMNS,
        Some("client_name"),
        OpportunitySource,
    );
    let (funnel, refetch_funnel) = use_page_fetch("stage funnel", &tracker, |ctx: FetchContext| async move {
        pipeline::get_stage_funnel(&ctx).await
    });
    let (heatmap, refetch_heatmap) = use_page_fetch("pipeline heatmap", &tracker, |ctx: FetchContext| async move {
        pipeline::get_heatmap(&ctx).await
    });
    let (targets, refetch_targets) = use_page_fetch("quarterly targets", &tracker, |ctx: FetchContext| async move {
        pipeline::get_quarterly_targets(&ctx).await
    });

    let engine = table.engine();
    let rows = engine.filtered_rows().into_iter().map(render_row).collect::<Vec<_>>();

    html! {
        <>
            {load_progress(&tracker)}
            {targets_section(&targets, ValueFormat::Currency, refetch_targets)}

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mt-6">
                <Panel title="Stage Funnel">
                    <FetchRender<StageFunnel>
                        state={(*funnel).clone()}
                        render={Callback::from(|funnel: StageFunnel| html! {
                            <ChartView model={chart::stage_funnel(&funnel)} />
                        })}
                        on_retry={Some(refetch_funnel)}
                    />
                </Panel>
                <Panel title="Pipeline Heatmap">
                    <FetchRender<PipelineHeatmap>
                        state={(*heatmap).clone()}
                        render={Callback::from(|heatmap: PipelineHeatmap| html! {
                            <ChartView model={chart::pipeline_heatmap(&heatmap)} />
                        })}
                        on_retry={Some(refetch_heatmap)}
                    />
                </Panel>
            </div>

            <div class="mt-6">
                {table_filters(&table)}
                <DataTable
                    headers={vec!["Opportunity", "Client", "Product", "Stage", "Forecast", "Close Date", "Amount"]}
                    status={table.status.clone()}
                    {rows}
                    total={engine.len()}
                    on_retry={Some(refetch_rows)}
                />
            </div>
        </>
    }
}

fn render_row(opportunity: &Opportunity) -> Html {
    html! {
        <tr key={opportunity.opportunity_id} class="hover">
            <td class="font-medium">{&opportunity.opportunity_name}</td>
            <td>{&opportunity.client_name}</td>
            <td>
                {&opportunity.product_name}
                <span class="badge badge-sm badge-ghost ml-2">{&opportunity.product_category}</span>
            </td>
            <td>{&opportunity.sales_stage}</td>
            <td>{&opportunity.forecast_category}</td>
            <td class="whitespace-nowrap">
                {opportunity.close_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())}
            </td>
            <td class="font-mono text-right">
                {opportunity.amount.map(format_currency).unwrap_or_else(|| "-".to_string())}
            </td>
        </tr>
    }
}
