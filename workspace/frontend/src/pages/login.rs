use yew::prelude::*;
use yew_router::prelude::*;

use crate::api_client::auth::login;
use crate::session::{use_session, SessionAction};
use crate::Route;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let form_ref = use_node_ref();
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| None::<String>);

    if session.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Home} /> };
    }

    let on_submit = {
        let form_ref = form_ref.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }
            let Some(form) = form_ref.cast::<web_sys::HtmlFormElement>() else {
                return;
            };
            let Ok(form_data) = web_sys::FormData::new_with_form(&form) else {
                log::error!("Failed to read login form");
                return;
            };
            let username = form_data.get("username").as_string().unwrap_or_default().trim().to_string();
            let password = form_data.get("password").as_string().unwrap_or_default();

            if username.is_empty() || password.is_empty() {
                error_message.set(Some("Please enter your username and password.".to_string()));
                return;
            }

            let session = session.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();

            is_submitting.set(true);
            error_message.set(None);

            wasm_bindgen_futures::spawn_local(async move {
                match login(&username, &password).await {
                    Ok(outcome) => {
                        session.dispatch(SessionAction::Login {
                            profile: outcome.profile,
                            token: outcome.token,
                        });
                    }
                    Err(e) => {
                        log::warn!("Login failed for {}: {}", username, e);
                        let message = if e.is_authentication() {
                            "Invalid username or password.".to_string()
                        } else {
                            format!("Login failed: {}", e)
                        };
                        error_message.set(Some(message));
                        is_submitting.set(false);
                    }
                }
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-base-200">
            <div class="card w-full max-w-sm bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title text-2xl justify-center">
                        <i class="fas fa-chart-line text-primary"></i>{" Sales Analytics"}
                    </h2>

                    if let Some(error) = (*error_message).as_ref() {
                        <div class="alert alert-error mt-2">
                            <span>{error}</span>
                        </div>
                    }

                    <form ref={form_ref} onsubmit={on_submit} class="space-y-4 mt-2">
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Username"}</span></label>
                            <input type="text" name="username" class="input input-bordered w-full" disabled={*is_submitting} />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Password"}</span></label>
                            <input type="password" name="password" class="input input-bordered w-full" disabled={*is_submitting} />
                        </div>
                        <button type="submit" class="btn btn-primary w-full" disabled={*is_submitting}>
                            if *is_submitting {
                                <span class="loading loading-spinner loading-sm"></span>
                            }
                            {"Sign In"}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
