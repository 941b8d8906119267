use std::future::Future;
use std::rc::Rc;

use compute::{FetchContext, GatewayError, LoadTracker, PageScope};
use yew::prelude::*;

use crate::common::toast::ToastContext;
use crate::hooks::FetchState;
use crate::session::{use_session, SessionAction, SessionContext};

/// Scope that lives as long as the calling component; cancelled on unmount.
#[hook]
pub fn use_page_scope() -> PageScope {
    let scope = use_memo((), |_| PageScope::new());

    {
        let scope = scope.clone();
        use_effect_with((), move |_| {
            move || {
                log::trace!("Page unmounted, cancelling in-flight fetches");
                scope.cancel();
            }
        });
    }

    (*scope).clone()
}

/// Page-wide "everything settled" flag over a fixed set of fetch keys.
#[derive(Clone, PartialEq)]
pub struct TrackerState(pub LoadTracker);

pub enum TrackerAction {
    Settled { key: &'static str, ok: bool },
    Reset,
}

impl Reducible for TrackerState {
    type Action = TrackerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut tracker = self.0.clone();
        match action {
            TrackerAction::Settled { key, ok: true } => tracker.succeeded(key),
            TrackerAction::Settled { key, ok: false } => tracker.failed(key),
            TrackerAction::Reset => tracker.reset(),
        }
        Rc::new(TrackerState(tracker))
    }
}

pub type LoadTrackerHandle = UseReducerHandle<TrackerState>;

/// Tracks the page's fetches; starts over whenever the user or year changes.
#[hook]
pub fn use_load_tracker(keys: &'static [&'static str]) -> LoadTrackerHandle {
    let session = use_session();
    let tracker = use_reducer(move || TrackerState(LoadTracker::new(keys.iter().copied())));

    {
        let tracker = tracker.clone();
        use_effect_with(session.fetch_context(), move |_| {
            tracker.dispatch(TrackerAction::Reset);
            || ()
        });
    }

    tracker
}

/// Shared failure handling: log, toast, and sign out on authentication errors.
pub fn report_failure(what: &str, err: &GatewayError, toast_ctx: &ToastContext, session: &SessionContext) {
    log::error!("Failed to load {}: {}", what, err);
    if err.is_authentication() {
        toast_ctx.show_warning("Your session has expired. Please sign in again.".to_string());
        session.dispatch(SessionAction::Logout);
    } else {
        toast_ctx.show_error(format!("Failed to load {}: {}", what, err));
    }
}

/// Fetches with the session's context on mount and whenever the user or year changes.
///
/// Responses arriving after the page unmounted or after a newer fetch started are
/// dropped. Each settled fetch is reported to `tracker` under `key`.
#[hook]
pub fn use_page_fetch<T, F, Fut>(
    key: &'static str,
    tracker: &LoadTrackerHandle,
    fetch_fn: F,
) -> (UseStateHandle<FetchState<T>>, Callback<()>)
where
    T: 'static,
    F: Fn(FetchContext) -> Fut + 'static,
    Fut: Future<Output = Result<T, GatewayError>> + 'static,
{
    let fetch_state = use_state(|| FetchState::Loading);
    let toast_ctx = use_context::<ToastContext>().expect("ToastProvider is missing from the component tree");
    let session = use_session();
    let scope = use_page_scope();
    let fetch_fn = use_state(|| Rc::new(fetch_fn));
    let fetch_context = session.fetch_context();

    let refetch = {
        let fetch_state = fetch_state.clone();
        let tracker = tracker.clone();
        let scope = scope.clone();

        use_callback(fetch_context.clone(), move |_, fetch_context| {
            let Some(ctx) = fetch_context.clone() else {
                log::debug!("Skipping {} fetch, no signed-in user", key);
                return;
            };
            let fetch_state = fetch_state.clone();
            let toast_ctx = toast_ctx.clone();
            let session = session.clone();
            let tracker = tracker.clone();
            let fetch_fn = fetch_fn.clone();
            let ticket = scope.ticket();

            fetch_state.set(FetchState::Loading);

            wasm_bindgen_futures::spawn_local(async move {
                let result = (*fetch_fn)(ctx).await;
                if !ticket.is_current() {
                    log::debug!("Dropping stale {} response", key);
                    return;
                }
                tracker.dispatch(TrackerAction::Settled { key, ok: result.is_ok() });
                if let Err(err) = &result {
                    report_failure(key, err, &toast_ctx, &session);
                }
                fetch_state.set(result.into());
            });
        })
    };

    // Fetch on mount and on every user/year change
    {
        let refetch = refetch.clone();
        use_effect_with(fetch_context, move |_| {
            scope.renew();
            refetch.emit(());
            || ()
        });
    }

    (fetch_state, refetch)
}
