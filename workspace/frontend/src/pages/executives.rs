use common::{AccountExecutive, ExecutivePerformance};
use compute::{chart, FetchContext};
use yew::prelude::*;

use super::clients::confirm;
use super::load_progress;
use crate::api_client::executives::{self, ExecutiveSource};
use crate::common::fetch_hook::{report_failure, use_load_tracker, use_page_fetch};
use crate::common::fetch_render::FetchRender;
use crate::common::toast::ToastContext;
use crate::components::cards::Panel;
use crate::components::chart::ChartView;
use crate::components::filter_panel::table_filters;
use crate::components::forms::ExecutiveModal;
use crate::components::table::{use_table, DataTable, TableHandle};
use crate::session::use_session;

const FETCHES: &[&str] = &["account executives", "top executives"];
const FILTER_COLUMNS: &[&str] = &["role"];

#[function_component(ExecutivesPage)]
pub fn executives_page() -> Html {
    let session = use_session();
    let toast_ctx = use_context::<ToastContext>().expect("ToastProvider is missing from the component tree");
    let show_modal = use_state(|| false);

    let tracker = use_load_tracker(FETCHES);
    let (table, refetch_rows): (TableHandle<AccountExecutive>, _) = use_table(
        "account executives",
        &tracker,
        FILTER_COLUMNS,
        Some("full_name"),
        ExecutiveSource,
    );
    let (top, refetch_top) = use_page_fetch("top executives", &tracker, |ctx: FetchContext| async move {
        executives::get_top_executives(&ctx).await
    });

    let refresh_all = {
        let refetch_rows = refetch_rows.clone();
        let refetch_top = refetch_top.clone();
        Callback::from(move |_| {
            refetch_rows.emit(());
            refetch_top.emit(());
        })
    };

    let on_delete = {
        let session = session.clone();
        let refresh_all = refresh_all.clone();
        Callback::from(move |executive: AccountExecutive| {
            if !confirm(&format!("Delete account executive {}?", executive.full_name())) {
                return;
            }
            let Some(user) = session.user.as_ref().map(|u| u.context.clone()) else {
                return;
            };
            let session = session.clone();
            let toast_ctx = toast_ctx.clone();
            let refresh_all = refresh_all.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match executives::delete_executive(&user, executive.user_id).await {
                    Ok(()) => {
                        toast_ctx.show_success(format!("Deleted {}", executive.full_name()));
                        refresh_all.emit(());
                    }
                    Err(err) => report_failure("executive deletion", &err, &toast_ctx, &session),
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
        .map(|executive| render_row(executive, &on_delete))
        .collect::<Vec<_>>();

    html! {
        <>
            {load_progress(&tracker)}

            <Panel title="Top Account Executives">
                <FetchRender<Vec<ExecutivePerformance>>
                    state={(*top).clone()}
                    render={Callback::from(|top: Vec<ExecutivePerformance>| html! {
                        <ChartView model={chart::top_executives(&top)} />
                    })}
                    on_retry={Some(refetch_top)}
                />
            </Panel>

            <div class="flex justify-end mt-6 mb-4">
                <button class="btn btn-primary btn-sm" onclick={open_modal}>
                    <i class="fas fa-plus"></i>{" Add Account Executive"}
                </button>
            </div>

            {table_filters(&table)}
            <DataTable
                headers={vec!["Name", "Username", "Email", "Role", ""]}
                status={table.status.clone()}
                {rows}
                total={engine.len()}
                on_retry={Some(refetch_rows)}
            />

            <ExecutiveModal show={*show_modal} on_close={close_modal} on_success={refresh_all} />
        </>
    }
}

fn render_row(executive: &AccountExecutive, on_delete: &Callback<AccountExecutive>) -> Html {
    let onclick = {
        let on_delete = on_delete.clone();
        let executive = executive.clone();
        Callback::from(move |_| on_delete.emit(executive.clone()))
    };

    html! {
        <tr key={executive.user_id} class="hover">
            <td class="font-medium">{executive.full_name()}</td>
            <td>{&executive.username}</td>
            <td>{&executive.email}</td>
            <td><span class="badge badge-sm badge-ghost">{&executive.role}</span></td>
            <td class="text-right">
                <button class="btn btn-ghost btn-xs text-error" title="Delete" {onclick}>
                    <i class="fas fa-trash"></i>
                </button>
            </td>
        </tr>
    }
}
