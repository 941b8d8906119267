pub mod clients;
pub mod executives;
pub mod home;
pub mod login;
pub mod not_found;
pub mod pipeline;
pub mod revenue;
pub mod signings;
pub mod wins;

use common::QuarterlyTarget;
use compute::cards::quarterly_cards;
use compute::{chart, ValueFormat};
use yew::prelude::*;

use crate::common::fetch_hook::LoadTrackerHandle;
use crate::common::fetch_render::FetchRender;
use crate::components::cards::{Panel, SummaryCards};
use crate::components::chart::ChartView;
use crate::hooks::FetchState;

/// Thin progress bar shown until every fetch on the page has settled.
fn load_progress(tracker: &LoadTrackerHandle) -> Html {
    let tracker = &tracker.0;
    if tracker.is_complete() {
        if tracker.has_failures() {
            log::debug!("Page finished loading with failures");
        }
        return html! {};
    }
    let pending = tracker.pending().collect::<Vec<_>>().join(", ");
    html! {
        <progress class="progress progress-primary w-full mb-4" title={format!("Loading {}", pending)}></progress>
    }
}

/// Quarterly target cards plus the latest-quarter gauge.
fn targets_section(
    state: &FetchState<Vec<QuarterlyTarget>>,
    value_format: ValueFormat,
    on_retry: Callback<()>,
) -> Html {
    let render = Callback::from(move |targets: Vec<QuarterlyTarget>| {
        if targets.is_empty() {
            return html! {
                <div class="alert alert-info">
                    <i class="fas fa-info-circle"></i>
                    <span>{"No quarterly targets for this year."}</span>
                </div>
            };
        }
        html! {
            <div class="grid grid-cols-1 xl:grid-cols-3 gap-6">
                <div class="xl:col-span-2">
                    <SummaryCards cards={quarterly_cards(&targets, "Target", value_format)} />
                </div>
                <Panel title="Target Achievement">
                    <ChartView model={chart::target_gauge(&targets)} height={220} />
                </Panel>
            </div>
        }
    });

    html! {
        <FetchRender<Vec<QuarterlyTarget>>
            state={state.clone()}
            {render}
            on_retry={Some(on_retry)}
            loading_text={Some("Loading quarterly targets...".to_string())}
        />
    }
}
