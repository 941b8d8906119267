use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

/// Inline panel for a failed fetch. The previous data, if any, is not shown.
#[function_component(ErrorDisplay)]
pub fn error_display(props: &ErrorDisplayProps) -> Html {
    let on_retry = props.on_retry.clone().map(|on_retry| {
        Callback::from(move |_: MouseEvent| {
            log::debug!("Retrying failed fetch");
            on_retry.emit(());
        })
    });

    html! {
        <div class="flex flex-col items-center justify-center py-8 gap-4">
            <div class="alert alert-error max-w-lg">
                <i class="fas fa-exclamation-circle text-2xl"></i>
                <div class="flex flex-col gap-1">
                    <span class="font-semibold">{"Could not load data"}</span>
                    <span class="text-sm">{&props.message}</span>
                </div>
            </div>
            if let Some(onclick) = on_retry {
                <button class="btn btn-primary btn-sm" {onclick}>
                    <i class="fas fa-redo"></i>
                    {" Try Again"}
                </button>
            }
        </div>
    }
}
