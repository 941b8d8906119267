use yew::prelude::*;
use yew_router::prelude::*;
use crate::Route;

/// Label shown for a route, also used as the page title.
pub fn route_label(route: &Route) -> &'static str {
    match route {
        Route::Home => "Dashboard",
        Route::Login => "Sign In",
        Route::Pipeline => "Pipeline",
        Route::Revenue => "Revenue",
        Route::Signings => "Signings",
        Route::Wins => "Wins",
        Route::Clients => "Clients",
        Route::Executives => "Account Executives",
        Route::NotFound => "404",
    }
}

#[function_component(Breadcrumb)]
pub fn breadcrumb() -> Html {
    let route = use_route::<Route>().unwrap_or(Route::Home);

    let mut items = vec![Route::Home];
    if route != Route::Home {
        items.push(route);
    }

    html! {
        <div class="breadcrumbs text-sm px-6 py-2 bg-base-100">
            <ul>
                {for items.iter().enumerate().map(|(idx, item)| {
                    let is_last = idx == items.len() - 1;
                    html! {
                        <li>
                            if is_last {
                                <span class="text-primary font-semibold">{route_label(item)}</span>
                            } else {
                                <Link<Route> to={item.clone()} classes="hover:text-primary">
                                    {route_label(item)}
                                </Link<Route>>
                            }
                        </li>
                    }
                })}
            </ul>
        </div>
    }
}
