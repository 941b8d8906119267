use common::{format_currency, IndustryAcvChart, ProvincialDistribution, Signing};
use compute::{chart, FetchContext, ValueFormat};
use yew::prelude::*;

use super::{load_progress, targets_section};
use crate::api_client::signings::{self, SigningSource};
use crate::common::fetch_hook::{use_load_tracker, use_page_fetch};
use crate::common::fetch_render::FetchRender;
use crate::components::cards::Panel;
use crate::components::chart::ChartView;
use crate::components::filter_panel::table_filters;
use crate::components::table::{use_table, DataTable, TableHandle};

const FETCHES: &[&str] = &["signings", "industry ACV", "provincial distribution", "quarterly targets"];
const FILTER_COLUMNS: &[&str] = &["product_category", "fiscal_quarter"];

#[function_component(SigningsPage)]
pub fn signings_page() -> Html {
    let tracker = use_load_tracker(FETCHES);
    let (table, refetch_rows): (TableHandle<Signing>, _) = use_table("signings", &tracker, FILTER_COLUMNS, Some("client_name"), SigningSource);
    let (acv, refetch_acv) = use_page_fetch("industry ACV", &tracker, |ctx: FetchContext| async move {
        signings::get_industry_acv(&ctx).await
    });
    let (provinces, refetch_provinces) = use_page_fetch("provincial distribution", &tracker, |ctx: FetchContext| async move {
        signings::get_provincial_distribution(&ctx).await
    });
    let (targets, refetch_targets) = use_page_fetch("quarterly targets", &tracker, |ctx: FetchContext| async move {
        signings::get_quarterly_targets(&ctx).await
    });

    let engine = table.engine();
    let rows = engine.filtered_rows().into_iter().map(render_row).collect::<Vec<_>>();

    html! {
        <>
            {load_progress(&tracker)}
            {targets_section(&targets, ValueFormat::Currency, refetch_targets)}

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mt-6">
                <Panel title="Incremental ACV by Industry">
                    <FetchRender<IndustryAcvChart>
                        state={(*acv).clone()}
                        render={Callback::from(|acv: IndustryAcvChart| html! {
                            <ChartView model={chart::industry_acv_bar(&acv)} />
                        })}
                        on_retry={Some(refetch_acv)}
                    />
                </Panel>
                <Panel title="Signings by Province">
                    <FetchRender<ProvincialDistribution>
                        state={(*provinces).clone()}
                        render={Callback::from(|provinces: ProvincialDistribution| html! {
                            <ChartView model={chart::provincial_distribution(&provinces)} />
                        })}
                        on_retry={Some(refetch_provinces)}
                    />
                </Panel>
            </div>

            <div class="mt-6">
                {table_filters(&table)}
                <DataTable
                    headers={vec!["Client", "Product", "Category", "Quarter", "Signed", "TCV", "Incremental ACV"]}
                    status={table.status.clone()}
                    {rows}
                    total={engine.len()}
                    on_retry={Some(refetch_rows)}
                />
            </div>
        </>
    }
}

fn money(amount: Option<rust_decimal::Decimal>) -> String {
    amount.map(format_currency).unwrap_or_else(|| "-".to_string())
}

fn render_row(signing: &Signing) -> Html {
    html! {
        <tr key={signing.signing_id} class="hover">
            <td class="font-medium">{&signing.client_name}</td>
            <td>{&signing.product_name}</td>
            <td><span class="badge badge-sm badge-ghost">{&signing.product_category}</span></td>
            <td>{format!("Q{}", signing.fiscal_quarter)}</td>
            <td class="whitespace-nowrap">
                {signing.signing_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())}
            </td>
            <td class="font-mono text-right">{money(signing.total_contract_value)}</td>
            <td class="font-mono text-right">{money(signing.incremental_acv)}</td>
        </tr>
    }
}
