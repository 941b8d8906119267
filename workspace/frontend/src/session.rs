//! Signed-in user and reporting year, owned by the app shell.
//!
//! Pages read the session through [`use_session`] and build a [`FetchContext`] from it
//! instead of reaching into browser storage themselves. The provider mirrors every
//! change to localStorage so a reload keeps the user signed in.

use std::rc::Rc;

use common::{UserContext, UserProfile};
use compute::FetchContext;
use web_sys::{window, Storage};
use yew::prelude::*;

use crate::settings::{self, storage_key};

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";
const YEAR_KEY: &str = "year";

#[derive(Debug, Clone, PartialEq)]
pub struct SignedInUser {
    pub profile: UserProfile,
    pub context: UserContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<SignedInUser>,
    pub year: i32,
}

pub enum SessionAction {
    Login { profile: UserProfile, token: String },
    Logout,
    SetYear(i32),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn fetch_context(&self) -> Option<FetchContext> {
        self.user
            .as_ref()
            .map(|user| FetchContext::new(user.context.clone(), self.year))
    }

    fn restore() -> Self {
        let default_year = settings::get_settings().default_year;
        let Some(storage) = local_storage() else {
            return Self { user: None, year: default_year };
        };
        let read = |name: &str| storage.get_item(&storage_key(name)).ok().flatten();

        let year = read(YEAR_KEY)
            .and_then(|y| y.parse::<i32>().ok())
            .unwrap_or(default_year);

        let user = read(USER_KEY)
            .and_then(|json| match serde_json::from_str::<UserProfile>(&json) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    log::warn!("Discarding unreadable stored user: {}", e);
                    None
                }
            })
            .map(|profile| {
                let token = read(TOKEN_KEY).unwrap_or_default();
                SignedInUser {
                    context: UserContext::new(profile.username.clone(), token),
                    profile,
                }
            });

        log::debug!("Restored session: signed_in={}, year={}", user.is_some(), year);
        Self { user, year }
    }

    fn persist(&self) {
        let Some(storage) = local_storage() else {
            return;
        };
        let result = match &self.user {
            Some(user) => serde_json::to_string(&user.profile)
                .map_err(|e| e.to_string())
                .and_then(|json| {
                    storage
                        .set_item(&storage_key(USER_KEY), &json)
                        .and_then(|_| storage.set_item(&storage_key(TOKEN_KEY), &user.context.token))
                        .map_err(|e| format!("{:?}", e))
                }),
            None => storage
                .remove_item(&storage_key(USER_KEY))
                .and_then(|_| storage.remove_item(&storage_key(TOKEN_KEY)))
                .map_err(|e| format!("{:?}", e)),
        }
        .and_then(|_| {
            storage
                .set_item(&storage_key(YEAR_KEY), &self.year.to_string())
                .map_err(|e| format!("{:?}", e))
        });

        if let Err(e) = result {
            log::error!("Failed to persist session: {}", e);
        }
    }
}

impl Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            SessionAction::Login { profile, token } => {
                log::info!("User signed in: {}", profile.username);
                Session {
                    user: Some(SignedInUser {
                        context: UserContext::new(profile.username.clone(), token),
                        profile,
                    }),
                    year: self.year,
                }
            }
            SessionAction::Logout => {
                log::info!("User signed out");
                Session { user: None, year: self.year }
            }
            SessionAction::SetYear(year) => {
                log::debug!("Reporting year changed to {}", year);
                Session { user: self.user.clone(), year }
            }
        };
        Rc::new(next)
    }
}

fn local_storage() -> Option<Storage> {
    window().and_then(|w| w.local_storage().ok().flatten())
}

pub type SessionContext = UseReducerHandle<Session>;

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_reducer(Session::restore);

    {
        let session = session.clone();
        use_effect_with((*session).clone(), move |_| {
            session.persist();
            || ()
        });
    }

    html! {
        <ContextProvider<SessionContext> context={session}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

/// Session of the surrounding [`SessionProvider`]
#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionProvider is missing from the component tree")
}
