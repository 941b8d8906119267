use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client::insight::{ask, INSIGHT_FAILURE};
use crate::session::use_session;

/// Free-text question box in the navbar; the answer opens in a dropdown panel.
#[function_component(InsightBox)]
pub fn insight_box() -> Html {
    let session = use_session();
    let query = use_state(String::new);
    let answer = use_state(|| None::<String>);
    let is_asking = use_state(|| false);

    let oninput = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
        })
    };

    let onsubmit = {
        let query = query.clone();
        let answer = answer.clone();
        let is_asking = is_asking.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_asking {
                return;
            }
            let Some(user) = session.user.as_ref().map(|u| u.context.clone()) else {
                return;
            };
            let question = (*query).clone();
            let answer = answer.clone();
            let is_asking = is_asking.clone();

            is_asking.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                log::debug!("Asking insight service: {}", question);
                match ask(&user, &question).await {
                    Ok(Some(insight)) => answer.set(Some(insight)),
                    Ok(None) => {}
                    Err(e) => {
                        log::error!("Insight request failed: {}", e);
                        answer.set(Some(INSIGHT_FAILURE.to_string()));
                    }
                }
                is_asking.set(false);
            });
        })
    };

    let on_dismiss = {
        let answer = answer.clone();
        Callback::from(move |_| answer.set(None))
    };

    html! {
        <div class="relative hidden md:block">
            <form {onsubmit} class="join">
                <input
                    type="text"
                    class="input input-sm input-bordered join-item w-64"
                    placeholder="Ask about your sales data..."
                    value={(*query).clone()}
                    {oninput}
                />
                <button type="submit" class="btn btn-sm btn-primary join-item" disabled={*is_asking}>
                    if *is_asking {
                        <span class="loading loading-spinner loading-xs"></span>
                    } else {
                        <i class="fas fa-robot"></i>
                    }
                </button>
            </form>
            if let Some(text) = (*answer).as_ref() {
                <div class="card bg-base-100 shadow-lg absolute right-0 mt-2 w-96 z-50">
                    <div class="card-body p-4">
                        <div class="flex justify-between items-start gap-2">
                            <p class="text-sm whitespace-pre-wrap">{text}</p>
                            <button class="btn btn-xs btn-ghost btn-circle" onclick={on_dismiss}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    </div>
                </div>
            }
        </div>
    }
}
