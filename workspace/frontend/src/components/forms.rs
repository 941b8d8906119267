use compute::validation::{ClientForm, ExecutiveForm};
use compute::GatewayError;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client::clients::create_client;
use crate::api_client::executives::create_executive;
use crate::common::fetch_hook::report_failure;
use crate::common::toast::ToastContext;
use crate::session::{use_session, SessionContext};

/// Text input bound to one form field.
fn field(label: &str, kind: &'static str, value: &str, invalid: bool, disabled: bool, oninput: Callback<String>) -> Html {
    let oninput = Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        oninput.emit(input.value());
    });

    html! {
        <div class="form-control">
            <label class="label"><span class="label-text">{label}</span></label>
            <input
                type={kind}
                class={classes!("input", "input-bordered", "w-full", invalid.then_some("input-error"))}
                value={value.to_string()}
                {disabled}
                {oninput}
            />
        </div>
    }
}

/// Shared outcome handling for create calls.
fn finish_submit(
    what: &str,
    result: Result<(), GatewayError>,
    error_message: &UseStateHandle<Option<String>>,
    toast_ctx: &ToastContext,
    session: &SessionContext,
    on_success: &Callback<()>,
    on_close: &Callback<()>,
) -> bool {
    match result {
        Ok(()) => {
            log::info!("{} created", what);
            toast_ctx.show_success(format!("{} created", what));
            on_success.emit(());
            on_close.emit(());
            true
        }
        Err(err) if err.is_authentication() => {
            report_failure(what, &err, toast_ctx, session);
            false
        }
        Err(err) => {
            log::error!("Failed to create {}: {}", what, err);
            error_message.set(Some(format!("Failed to create {}: {}", what.to_lowercase(), err)));
            false
        }
    }
}

fn modal_frame(id: &'static str, show: bool, title: &str, error: Option<&String>, body: Html, on_close: Callback<MouseEvent>) -> Html {
    html! {
        <dialog class={classes!("modal", show.then_some("modal-open"))} {id}>
            <div class="modal-box w-11/12 max-w-2xl">
                <h3 class="font-bold text-lg">{title}</h3>
                if let Some(error) = error {
                    <div class="alert alert-error mt-4">
                        <span>{error}</span>
                    </div>
                }
                {body}
            </div>
            <form class="modal-backdrop" method="dialog">
                <button onclick={on_close}>{"close"}</button>
            </form>
        </dialog>
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub show: bool,
    pub on_close: Callback<()>,
    pub on_success: Callback<()>,
}

#[function_component(ClientModal)]
pub fn client_modal(props: &ModalProps) -> Html {
    let form = use_state(ClientForm::default);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| None::<String>);
    let toast_ctx = use_context::<ToastContext>().expect("ToastProvider is missing from the component tree");
    let session = use_session();

    let invalid = form.check().err().map(|e| e.fields().to_vec()).unwrap_or_default();
    let is_invalid = |name: &str, value: &str| !value.is_empty() && invalid.iter().any(|f| f == name);

    let update = |apply: fn(&mut ClientForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let on_success = props.on_success.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }
            let Some(user) = session.user.as_ref().map(|u| u.context.clone()) else {
                return;
            };
            let request = match (*form).clone().into_request() {
                Ok(request) => request,
                Err(err) => {
                    error_message.set(Some(err.to_string()));
                    return;
                }
            };

            let form = form.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let toast_ctx = toast_ctx.clone();
            let session = session.clone();
            let on_success = on_success.clone();
            let on_close = on_close.clone();

            is_submitting.set(true);
            error_message.set(None);

            wasm_bindgen_futures::spawn_local(async move {
                let result = create_client(&user, &request).await;
                if finish_submit("Client", result, &error_message, &toast_ctx, &session, &on_success, &on_close) {
                    form.set(ClientForm::default());
                }
                is_submitting.set(false);
            });
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        let is_submitting = *is_submitting;
        Callback::from(move |_| {
            if !is_submitting {
                on_close.emit(())
            }
        })
    };

    let disabled = *is_submitting;
    let body = html! {
        <form onsubmit={on_submit} class="py-4 space-y-4">
            {field("Client Name", "text", &form.client_name, is_invalid("client_name", &form.client_name), disabled, update(|f, v| f.client_name = v))}
            <div class="grid grid-cols-2 gap-4">
                {field("Industry", "text", &form.industry, is_invalid("industry", &form.industry), disabled, update(|f, v| f.industry = v))}
                {field("Location", "text", &form.location, is_invalid("location", &form.location), disabled, update(|f, v| f.location = v))}
            </div>
            {field("Email", "email", &form.email, is_invalid("email", &form.email), disabled, update(|f, v| f.email = v))}
            <div class="modal-action">
                <button type="button" class="btn" onclick={on_close.clone()}>{"Cancel"}</button>
                <button type="submit" class="btn btn-primary" disabled={disabled || !form.is_valid()}>
                    if disabled {
                        <span class="loading loading-spinner loading-sm"></span>
                    }
                    {"Save Client"}
                </button>
            </div>
        </form>
    };

    modal_frame("client_modal", props.show, "Add Client", (*error_message).as_ref(), body, on_close)
}

#[function_component(ExecutiveModal)]
pub fn executive_modal(props: &ModalProps) -> Html {
    let form = use_state(ExecutiveForm::default);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| None::<String>);
    let toast_ctx = use_context::<ToastContext>().expect("ToastProvider is missing from the component tree");
    let session = use_session();

    let invalid = form.check().err().map(|e| e.fields().to_vec()).unwrap_or_default();
    let is_invalid = |name: &str, value: &str| !value.is_empty() && invalid.iter().any(|f| f == name);

    let update = |apply: fn(&mut ExecutiveForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let on_success = props.on_success.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }
            let Some(user) = session.user.as_ref().map(|u| u.context.clone()) else {
                return;
            };
            let request = match (*form).clone().into_request() {
                Ok(request) => request,
                Err(err) => {
                    error_message.set(Some(err.to_string()));
                    return;
                }
            };

            let form = form.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let toast_ctx = toast_ctx.clone();
            let session = session.clone();
            let on_success = on_success.clone();
            let on_close = on_close.clone();

            is_submitting.set(true);
            error_message.set(None);

            wasm_bindgen_futures::spawn_local(async move {
                let result = create_executive(&user, &request).await;
                if finish_submit("Account executive", result, &error_message, &toast_ctx, &session, &on_success, &on_close) {
                    form.set(ExecutiveForm::default());
                }
                is_submitting.set(false);
            });
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        let is_submitting = *is_submitting;
        Callback::from(move |_| {
            if !is_submitting {
                on_close.emit(())
            }
        })
    };

    let disabled = *is_submitting;
    let body = html! {
        <form onsubmit={on_submit} class="py-4 space-y-4">
            <div class="grid grid-cols-2 gap-4">
                {field("First Name", "text", &form.first_name, is_invalid("first_name", &form.first_name), disabled, update(|f, v| f.first_name = v))}
                {field("Last Name", "text", &form.last_name, is_invalid("last_name", &form.last_name), disabled, update(|f, v| f.last_name = v))}
            </div>
            {field("Email", "email", &form.email, is_invalid("email", &form.email), disabled, update(|f, v| f.email = v))}
            <div class="modal-action">
                <button type="button" class="btn" onclick={on_close.clone()}>{"Cancel"}</button>
                <button type="submit" class="btn btn-primary" disabled={disabled || !form.is_valid()}>
                    if disabled {
                        <span class="loading loading-spinner loading-sm"></span>
                    }
                    {"Save Executive"}
                </button>
            </div>
        </form>
    };

    modal_frame("executive_modal", props.show, "Add Account Executive", (*error_message).as_ref(), body, on_close)
}
