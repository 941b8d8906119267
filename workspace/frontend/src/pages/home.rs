use common::KpiTotals;
use compute::cards::kpi_cards;
use compute::FetchContext;
use yew::prelude::*;
use yew_router::prelude::*;

use super::load_progress;
use crate::api_client::dashboard;
use crate::common::error::ErrorDisplay;
use crate::common::fetch_hook::{use_load_tracker, use_page_fetch};
use crate::common::loading::Loading;
use crate::components::cards::SummaryCards;
use crate::hooks::FetchState;
use crate::session::use_session;
use crate::Route;

const FETCHES: &[&str] = &["pipeline count", "revenue sum", "signings count", "wins count"];

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let session = use_session();
    let tracker = use_load_tracker(FETCHES);
    let (pipeline, refetch_pipeline) = use_page_fetch("pipeline count", &tracker, |ctx: FetchContext| async move {
        dashboard::get_pipeline_count(&ctx).await
    });
    let (revenue, refetch_revenue) = use_page_fetch("revenue sum", &tracker, |ctx: FetchContext| async move {
        dashboard::get_revenue_sum(&ctx).await
    });
    let (signings, refetch_signings) = use_page_fetch("signings count", &tracker, |ctx: FetchContext| async move {
        dashboard::get_signings_count(&ctx).await
    });
    let (wins, refetch_wins) = use_page_fetch("wins count", &tracker, |ctx: FetchContext| async move {
        dashboard::get_wins_count(&ctx).await
    });

    let retry_all = Callback::from(move |_| {
        refetch_pipeline.emit(());
        refetch_revenue.emit(());
        refetch_signings.emit(());
        refetch_wins.emit(());
    });

    let states: [&FetchState<f64>; 4] = [&*pipeline, &*revenue, &*signings, &*wins];
    let totals = match states.map(|s| s.data().copied()) {
        [Some(pipeline), Some(revenue), Some(signings), Some(wins)] => Some(KpiTotals {
            pipeline,
            revenue,
            signings,
            wins,
        }),
        _ => None,
    };

    let body = if let Some(totals) = totals {
        html! { <SummaryCards cards={kpi_cards(&totals)} /> }
    } else if let Some(error) = states.iter().find_map(|s| s.error()) {
        html! { <ErrorDisplay message={error.clone()} on_retry={Some(retry_all)} /> }
    } else {
        html! { <Loading text={Some("Loading totals...".to_string())} /> }
    };

    let greeting = session
        .user
        .as_ref()
        .map(|u| format!("Welcome back, {}", u.profile.display_name()))
        .unwrap_or_default();

    html! {
        <>
            {load_progress(&tracker)}
            <div class="mb-6">
                <h2 class="text-2xl font-bold">{greeting}</h2>
                <p class="text-sm opacity-70">{format!("Sales overview for {}", session.year)}</p>
            </div>
            {body}
            <div class="grid grid-cols-2 md:grid-cols-3 gap-4 mt-8">
                { for [
                    (Route::Pipeline, "fa-filter", "Pipeline"),
                    (Route::Revenue, "fa-dollar-sign", "Revenue"),
                    (Route::Signings, "fa-file-signature", "Signings"),
                    (Route::Wins, "fa-trophy", "Wins"),
                    (Route::Clients, "fa-building", "Clients"),
                    (Route::Executives, "fa-user-tie", "Account Executives"),
                ].into_iter().map(|(route, icon, label)| html! {
                    <Link<Route> to={route} classes="btn btn-outline">
                        <i class={classes!("fas", icon)}></i>{" "}{label}
                    </Link<Route>>
                })}
            </div>
        </>
    }
}
