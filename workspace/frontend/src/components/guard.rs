use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::use_session;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct ProtectedProps {
    pub children: Children,
}

/// Renders its children only for a signed-in user; everyone else goes to the login page.
#[function_component(Protected)]
pub fn protected(props: &ProtectedProps) -> Html {
    let session = use_session();

    if !session.is_authenticated() {
        log::debug!("No signed-in user, redirecting to login");
        return html! { <Redirect<Route> to={Route::Login} /> };
    }

    html! { <>{ for props.children.iter() }</> }
}
