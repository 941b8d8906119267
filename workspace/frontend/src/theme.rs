use compute::Theme;
use stylist::css;
use stylist::yew::Global;
use web_sys::window;
use yew::prelude::*;

use crate::settings::storage_key;

const THEME_KEY: &str = "theme";

/// Current theme plus a callback flipping it. Chart components re-render when it changes.
#[derive(Clone, PartialEq)]
pub struct ThemeContext {
    pub theme: Theme,
    pub toggle: Callback<()>,
}

fn stored_theme() -> Theme {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(&storage_key(THEME_KEY)).ok().flatten())
        .and_then(|value| value.parse::<Theme>().ok())
        .unwrap_or_default()
}

/// Mirrors the theme onto `<body>` so plain CSS can follow it, and stores it.
fn apply_theme(theme: Theme) {
    let Some(window) = window() else {
        return;
    };

    if let Some(body) = window.document().and_then(|d| d.body()) {
        let classes = body.class_list();
        let result = match theme.body_class() {
            Some(class) => classes.add_1(class),
            None => classes.remove_1("dark-mode"),
        };
        if let Err(e) = result {
            log::warn!("Failed to update body class: {:?}", e);
        }
    }

    if let Ok(Some(storage)) = window.local_storage() {
        if let Err(e) = storage.set_item(&storage_key(THEME_KEY), &theme.to_string()) {
            log::warn!("Failed to store theme: {:?}", e);
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ThemeProviderProps {
    pub children: Children,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let theme = use_state(stored_theme);

    use_effect_with(*theme, |theme| {
        log::debug!("Applying {} theme", theme);
        apply_theme(*theme);
        || ()
    });

    let toggle = {
        let theme = theme.clone();
        Callback::from(move |_| theme.set(theme.toggle()))
    };

    let context = ThemeContext {
        theme: *theme,
        toggle,
    };

    html! {
        <ContextProvider<ThemeContext> context={context}>
            <Global css={css!(
                r#"
                body.dark-mode {
                    background-color: #121212;
                    color: #e0e0e0;
                }
                body.dark-mode .card,
                body.dark-mode .navbar,
                body.dark-mode .menu {
                    background-color: #1e1e1e;
                    color: #e0e0e0;
                }
                body.dark-mode .table thead {
                    color: #bdbdbd;
                }
                "#
            )} />
            {props.children.clone()}
        </ContextProvider<ThemeContext>>
    }
}

#[hook]
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeProvider is missing from the component tree")
}
