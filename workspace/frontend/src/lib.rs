use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod pages;
pub mod api_client;
pub mod common;
pub mod hooks;
pub mod session;
pub mod settings;
pub mod theme;

use common::toast::ToastProvider;
use components::layout::breadcrumb::route_label;
use components::layout::layout::Layout;
use pages::clients::ClientsPage;
use pages::executives::ExecutivesPage;
use pages::home::HomePage;
use pages::login::LoginPage;
use pages::not_found::NotFoundPage;
use pages::pipeline::PipelinePage;
use pages::revenue::RevenuePage;
use pages::signings::SigningsPage;
use pages::wins::WinsPage;
use session::SessionProvider;
use theme::ThemeProvider;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/pipeline")]
    Pipeline,
    #[at("/revenue")]
    Revenue,
    #[at("/signings")]
    Signings,
    #[at("/wins")]
    Wins,
    #[at("/clients")]
    Clients,
    #[at("/account-executives")]
    Executives,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    log::debug!("Routing to: {:?}", route);
    let title = route_label(&route).to_string();
    match route {
        Route::Login => {
            log::trace!("Rendering Login page");
            html! { <LoginPage /> }
        }
        Route::Home => html! { <Layout {title}><HomePage /></Layout> },
        Route::Pipeline => html! { <Layout {title}><PipelinePage /></Layout> },
        Route::Revenue => html! { <Layout {title}><RevenuePage /></Layout> },
        Route::Signings => html! { <Layout {title}><SigningsPage /></Layout> },
        Route::Wins => html! { <Layout {title}><WinsPage /></Layout> },
        Route::Clients => html! { <Layout {title}><ClientsPage /></Layout> },
        Route::Executives => html! { <Layout {title}><ExecutivesPage /></Layout> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ToastProvider>
            <SessionProvider>
                <ThemeProvider>
                    <BrowserRouter>
                        <Switch<Route> render={switch} />
                    </BrowserRouter>
                </ThemeProvider>
            </SessionProvider>
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Sales Analytics Frontend Application Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API base URL: {}", settings.api_base_url());
    log::debug!("Debug mode: {}", settings.debug_mode);

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
