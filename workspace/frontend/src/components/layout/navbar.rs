use chrono::Datelike;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::insight::InsightBox;
use crate::session::{use_session, SessionAction};
use crate::settings;
use crate::theme::use_theme;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: String,
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    let session = use_session();
    let theme = use_theme();

    let years = settings::get_settings().selectable_years(chrono::Local::now().year());

    let on_year_change = {
        let session = session.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<i32>() {
                Ok(year) => session.dispatch(SessionAction::SetYear(year)),
                Err(err) => log::warn!("Ignoring unparsable year '{}': {}", select.value(), err),
            }
        })
    };

    let on_theme_toggle = {
        let toggle = theme.toggle.clone();
        Callback::from(move |_| toggle.emit(()))
    };

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(SessionAction::Logout))
    };

    let display_name = session
        .user
        .as_ref()
        .map(|u| u.profile.display_name())
        .unwrap_or_default();

    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-none lg:hidden">
                <label aria-label="open sidebar" class="btn btn-square btn-ghost" for="my-drawer">
                    <i class="fas fa-bars text-xl"></i>
                </label>
            </div>
            <div class="flex-1 px-4">
                <h1 class="text-xl font-bold" id="page-title">{ &props.title }</h1>
            </div>
            <div class="flex-none gap-2">
                <InsightBox />

                <select class="select select-sm select-bordered" id="year-select" onchange={on_year_change}>
                    { for years.iter().map(|year| html! {
                        <option value={year.to_string()} selected={*year == session.year}>{year}</option>
                    })}
                </select>

                <label class="swap swap-rotate btn btn-ghost btn-circle">
                    <input id="theme-toggle" type="checkbox" checked={theme.theme.is_dark()} onchange={on_theme_toggle}/>
                    <i class="swap-on fill-current fas fa-sun text-xl"></i>
                    <i class="swap-off fill-current fas fa-moon text-xl"></i>
                </label>

                <span class="hidden md:inline text-sm font-semibold">{display_name}</span>
                <button class="btn btn-ghost btn-sm" onclick={on_logout} title="Sign out">
                    <i class="fas fa-sign-out-alt"></i>
                </button>
            </div>
        </div>
    }
}
