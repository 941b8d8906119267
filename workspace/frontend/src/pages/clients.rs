use common::{Client, IndustryTreemap, ProvincePie};
use compute::{chart, FetchContext};
use yew::prelude::*;

use super::load_progress;
use crate::api_client::clients::{self, ClientSource};
use crate::common::fetch_hook::{report_failure, use_load_tracker, use_page_fetch};
use crate::common::fetch_render::FetchRender;
use crate::common::toast::ToastContext;
use crate::components::cards::Panel;
use crate::components::chart::{chart_or_error, ChartView};
use crate::components::filter_panel::table_filters;
use crate::components::forms::ClientModal;
use crate::components::table::{use_table, DataTable, TableHandle};
use crate::session::use_session;

const FETCHES: &[&str] = &["clients", "industry treemap", "province pie"];
const FILTER_COLUMNS: &[&str] = &["industry", "location"];

/// Asks the browser to confirm a destructive action.
pub(crate) fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[function_component(ClientsPage)]
pub fn clients_page() -> Html {
    let session = use_session();
    let toast_ctx = use_context::<ToastContext>().expect("ToastProvider is missing from the component tree");
    let show_modal = use_state(|| false);

    let tracker = use_load_tracker(FETCHES);
    let (table, refetch_rows): (TableHandle<Client>, _) = use_table("clients", &tracker, FILTER_COLUMNS, Some("client_name"), ClientSource);
    let (treemap, refetch_treemap) = use_page_fetch("industry treemap", &tracker, |ctx: FetchContext| async move {
        clients::get_industry_treemap(&ctx).await
    });
    let (pie, refetch_pie) = use_page_fetch("province pie", &tracker, |ctx: FetchContext| async move {
        clients::get_province_pie(&ctx).await
    });

    let refresh_all = {
        let refetch_rows = refetch_rows.clone();
        let refetch_treemap = refetch_treemap.clone();
        let refetch_pie = refetch_pie.clone();
        Callback::from(move |_| {
            log::debug!("Refreshing clients page");
            refetch_rows.emit(());
            refetch_treemap.emit(());
            refetch_pie.emit(());
        })
    };

    let on_delete = {
        let session = session.clone();
        let refresh_all = refresh_all.clone();
        Callback::from(move |client: Client| {
            if !confirm(&format!("Delete client {}?", client.client_name)) {
                return;
            }
            let Some(user) = session.user.as_ref().map(|u| u.context.clone()) else {
                return;
            };
            let session = session.clone();
            let toast_ctx = toast_ctx.clone();
            let refresh_all = refresh_all.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match clients::delete_client(&user, client.client_id).await {
                    Ok(()) => {
                        toast_ctx.show_success(format!("Deleted {}", client.client_name));
                        refresh_all.emit(());
                    }
                    Err(err) => report_failure("client deletion", &err, &toast_ctx, &session),
                }
            });
        })
    };

    let open_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_| show_modal.set(true))
    };
    let close_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_| show_modal.set(false))
    };

    let engine = table.engine();
    let rows = engine
        .filtered_rows()
        .into_iter()
        .map(|client| render_row(client, &on_delete))
        .collect::<Vec<_>>();

    html! {
        <>
            {load_progress(&tracker)}

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <Panel title="Clients by Industry">
                    <FetchRender<IndustryTreemap>
                        state={(*treemap).clone()}
                        render={Callback::from(|treemap: IndustryTreemap| html! {
                            <ChartView model={chart::industry_treemap(&treemap)} />
                        })}
                        on_retry={Some(refetch_treemap)}
                    />
                </Panel>
                <Panel title="Clients by Province">
                    <FetchRender<ProvincePie>
                        state={(*pie).clone()}
                        render={Callback::from(|pie: ProvincePie| chart_or_error(chart::province_pie(&pie)))}
                        on_retry={Some(refetch_pie)}
                    />
                </Panel>
            </div>

            <div class="flex justify-end mt-6 mb-4">
                <button class="btn btn-primary btn-sm" onclick={open_modal}>
                    <i class="fas fa-plus"></i>{" Add Client"}
                </button>
            </div>

            {table_filters(&table)}
            <DataTable
                headers={vec!["Client", "Industry", "Location", "Email", ""]}
                status={table.status.clone()}
                {rows}
                total={engine.len()}
                on_retry={Some(refetch_rows)}
            />

            <ClientModal show={*show_modal} on_close={close_modal} on_success={refresh_all} />
        </>
    }
}

fn render_row(client: &Client, on_delete: &Callback<Client>) -> Html {
    let onclick = {
        let on_delete = on_delete.clone();
        let client = client.clone();
        Callback::from(move |_| on_delete.emit(client.clone()))
    };

    html! {
        <tr key={client.client_id} class="hover">
            <td class="font-medium">{&client.client_name}</td>
            <td>{&client.industry}</td>
            <td>{&client.location}</td>
            <td>{&client.email}</td>
            <td class="text-right">
                <button class="btn btn-ghost btn-xs text-error" title="Delete" {onclick}>
                    <i class="fas fa-trash"></i>
                </button>
            </td>
        </tr>
    }
}
