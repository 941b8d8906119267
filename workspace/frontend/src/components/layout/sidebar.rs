use yew::prelude::*;
use yew_router::prelude::*;
use crate::Route;

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    html! {
        <div class="drawer-side z-50">
            <label aria-label="close sidebar" class="drawer-overlay" for="my-drawer"></label>
            <ul class="menu p-4 w-80 min-h-full bg-base-100 text-base-content border-r border-base-300">
                <li class="mb-4">
                    <div class="flex items-center gap-3 px-2">
                        <div class="w-10 h-10 rounded-lg bg-primary flex items-center justify-center text-primary-content font-bold text-2xl">
                            <i class="fas fa-chart-line"></i>
                        </div>
                        <span class="text-2xl font-bold tracking-tight">{"Sales Analytics"}</span>
                    </div>
                </li>

                <li><Link<Route> to={Route::Home} classes="nav-link"><i class="fas fa-home w-5"></i> {"Dashboard"}</Link<Route>></li>
                <li><Link<Route> to={Route::Pipeline} classes="nav-link"><i class="fas fa-filter w-5"></i> {"Pipeline"}</Link<Route>></li>
                <li><Link<Route> to={Route::Revenue} classes="nav-link"><i class="fas fa-dollar-sign w-5"></i> {"Revenue"}</Link<Route>></li>
                <li><Link<Route> to={Route::Signings} classes="nav-link"><i class="fas fa-file-signature w-5"></i> {"Signings"}</Link<Route>></li>
                <li><Link<Route> to={Route::Wins} classes="nav-link"><i class="fas fa-trophy w-5"></i> {"Wins"}</Link<Route>></li>

                <div class="divider"></div>

                <li><Link<Route> to={Route::Clients} classes="nav-link"><i class="fas fa-building w-5"></i> {"Clients"}</Link<Route>></li>
                <li><Link<Route> to={Route::Executives} classes="nav-link"><i class="fas fa-user-tie w-5"></i> {"Account Executives"}</Link<Route>></li>
            </ul>
        </div>
    }
}
