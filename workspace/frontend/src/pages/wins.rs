use common::{Win, WinsCategoryDistribution, WinsEvolution};
use compute::{chart, FetchContext, ValueFormat};
use yew::prelude::*;

use super::{load_progress, targets_section};
use crate::api_client::wins::{self, WinSource};
use crate::common::fetch_hook::{use_load_tracker, use_page_fetch};
use crate::common::fetch_render::FetchRender;
use crate::components::cards::Panel;
use crate::components::chart::{chart_or_error, ChartView};
use crate::components::filter_panel::table_filters;
use crate::components::table::{use_table, DataTable, TableHandle};

const FETCHES: &[&str] = &["wins", "category distribution", "quarterly evolution", "quarterly targets"];
const FILTER_COLUMNS: &[&str] = &["win_category", "client_industry"];

#[function_component(WinsPage)]
pub fn wins_page() -> Html {
    let tracker = use_load_tracker(FETCHES);
    let (table, refetch_rows): (TableHandle<Win>, _) = use_table("wins", &tracker, FILTER_COLUMNS, Some("client_name"), WinSource);
    let (categories, refetch_categories) = use_page_fetch("category distribution", &tracker, |ctx: FetchContext| async move {
        wins::get_category_distribution(&ctx).await
    });
    let (evolution, refetch_evolution) = use_page_fetch("quarterly evolution", &tracker, |ctx: FetchContext| async move {
        wins::get_quarterly_evolution(&ctx).await
    });
    let (targets, refetch_targets) = use_page_fetch("quarterly targets", &tracker, |ctx: FetchContext| async move {
        wins::get_quarterly_targets(&ctx).await
    });

    let engine = table.engine();
    let rows = engine.filtered_rows().into_iter().map(render_row).collect::<Vec<_>>();

    html! {
        <>
            {load_progress(&tracker)}
            {targets_section(&targets, ValueFormat::Plain, refetch_targets)}

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mt-6">
                <Panel title="Wins by Category">
                    <FetchRender<WinsCategoryDistribution>
                        state={(*categories).clone()}
                        render={Callback::from(|categories: WinsCategoryDistribution| {
                            chart_or_error(chart::wins_category_distribution(&categories))
                        })}
                        on_retry={Some(refetch_categories)}
                    />
                </Panel>
                <Panel title="Quarterly Evolution">
                    <FetchRender<WinsEvolution>
                        state={(*evolution).clone()}
                        render={Callback::from(|evolution: WinsEvolution| html! {
                            <ChartView model={chart::wins_evolution(&evolution)} />
                        })}
                        on_retry={Some(refetch_evolution)}
                    />
                </Panel>
            </div>

            <div class="mt-6">
                {table_filters(&table)}
                <DataTable
                    headers={vec!["Client", "Industry", "Category", "Level", "Date"]}
                    status={table.status.clone()}
                    {rows}
                    total={engine.len()}
                    on_retry={Some(refetch_rows)}
                />
            </div>
        </>
    }
}

fn render_row(win: &Win) -> Html {
    html! {
        <tr key={win.win_id} class="hover">
            <td class="font-medium">{&win.client_name}</td>
            <td>{&win.client_industry}</td>
            <td><span class="badge badge-sm badge-primary">{win.display_category()}</span></td>
            <td>{&win.win_level}</td>
            <td class="whitespace-nowrap">{win.win_date()}</td>
        </tr>
    }
}
