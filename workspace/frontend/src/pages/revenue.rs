use common::{format_currency, IndustryRevenueChart, RevenueDistribution, RevenueRecord};
use compute::{chart, FetchContext, ValueFormat};
use yew::prelude::*;

use super::{load_progress, targets_section};
use crate::api_client::revenue::{self, RevenueSource};
use crate::common::fetch_hook::{use_load_tracker, use_page_fetch};
use crate::common::fetch_render::FetchRender;
use crate::components::cards::Panel;
use crate::components::chart::chart_or_error;
use crate::components::filter_panel::table_filters;
use crate::components::table::{use_table, DataTable, TableHandle};

const FETCHES: &[&str] = &["revenue", "product distribution", "industry revenue", "quarterly targets"];
const FILTER_COLUMNS: &[&str] = &["product_category", "industry"];

#[function_component(RevenuePage)]
pub fn revenue_page() -> Html {
    let tracker = use_load_tracker(FETCHES);
    let (table, refetch_rows): (TableHandle<RevenueRecord>, _) = use_table("revenue", &tracker, FILTER_COLUMNS, Some("client_name"), RevenueSource);
    let (distribution, refetch_distribution) = use_page_fetch("product distribution", &tracker, |ctx: FetchContext| async move {
        revenue::get_product_distribution(&ctx).await
    });
    let (industry, refetch_industry) = use_page_fetch("industry revenue", &tracker, |ctx: FetchContext| async move {
        revenue::get_industry_revenue(&ctx).await
    });
    let (targets, refetch_targets) = use_page_fetch("quarterly targets", &tracker, |ctx: FetchContext| async move {
        revenue::get_quarterly_targets(&ctx).await
    });

    let engine = table.engine();
    let rows = engine.filtered_rows().into_iter().map(render_row).collect::<Vec<_>>();

    html! {
        <>
            {load_progress(&tracker)}
            {targets_section(&targets, ValueFormat::Currency, refetch_targets)}

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mt-6">
                <Panel title="Revenue by Product">
                    <FetchRender<RevenueDistribution>
                        state={(*distribution).clone()}
                        render={Callback::from(|distribution: RevenueDistribution| {
                            chart_or_error(chart::revenue_by_product(&distribution))
                        })}
                        on_retry={Some(refetch_distribution)}
                    />
                </Panel>
                <Panel title="Revenue by Industry">
                    <FetchRender<IndustryRevenueChart>
                        state={(*industry).clone()}
                        render={Callback::from(|industry: IndustryRevenueChart| {
                            chart_or_error(chart::industry_revenue_area(&industry))
                        })}
                        on_retry={Some(refetch_industry)}
                    />
                </Panel>
            </div>

            <div class="mt-6">
                {table_filters(&table)}
                <DataTable
                    headers={vec!["Client", "Industry", "Product Category", "Quarter", "Amount"]}
                    status={table.status.clone()}
                    {rows}
                    total={engine.len()}
                    on_retry={Some(refetch_rows)}
                />
            </div>
        </>
    }
}

fn render_row(record: &RevenueRecord) -> Html {
    html! {
        <tr class="hover">
            <td class="font-medium">{&record.client_name}</td>
            <td>{&record.industry}</td>
            <td><span class="badge badge-sm badge-ghost">{&record.product_category}</span></td>
            <td>{format!("{} Q{}", record.fiscal_year, record.fiscal_quarter)}</td>
            <td class="font-mono text-right">{format_currency(record.amount)}</td>
        </tr>
    }
}
