use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    log::warn!("404 - Route not found");
    html! {
        <div class="flex flex-col items-center justify-center py-24 gap-4">
            <h1 class="text-5xl font-bold">{"404"}</h1>
            <p class="opacity-70">{"This page does not exist."}</p>
            <Link<Route> to={Route::Home} classes="btn btn-primary">{"Back to dashboard"}</Link<Route>>
        </div>
    }
}
