use yew::prelude::*;
use crate::hooks::FetchState;
use super::loading::Loading;
use super::error::ErrorDisplay;

#[derive(Properties)]
pub struct FetchRenderProps<T: Clone + PartialEq + 'static> {
    pub state: FetchState<T>,
    pub render: Callback<T, Html>,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
    #[prop_or_default]
    pub loading_text: Option<String>,
}

impl<T: Clone + PartialEq + 'static> PartialEq for FetchRenderProps<T> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.loading_text == other.loading_text
    }
}

/// Renders a fetch: spinner while loading, error panel with retry on failure, and
/// `render` on success.
#[function_component(FetchRender)]
pub fn fetch_render<T>(props: &FetchRenderProps<T>) -> Html
where
    T: Clone + PartialEq + 'static,
{
    match &props.state {
        FetchState::NotStarted => html! {},
        FetchState::Loading => html! {
            <Loading text={props.loading_text.clone()} compact={true} />
        },
        FetchState::Error(err) => {
            html! {
                <ErrorDisplay
                    message={err.clone()}
                    on_retry={props.on_retry.clone()}
                />
            }
        }
        FetchState::Success(data) => props.render.emit(data.clone()),
    }
}
