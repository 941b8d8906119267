use std::rc::Rc;
use yew::prelude::*;
use crate::settings;

#[derive(Clone, PartialEq)]
pub enum ToastType {
    Success,
    Warning,
    Error,
}

impl ToastType {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastType::Success => "alert-success",
            ToastType::Warning => "alert-warning",
            ToastType::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Success => "fas fa-check-circle",
            ToastType::Warning => "fas fa-exclamation-triangle",
            ToastType::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub toast_type: ToastType,
}

/// Toasts currently shown; ids keep increasing so a dismissal never hits a newer toast.
#[derive(Clone, PartialEq, Default)]
pub struct ToastList {
    next_id: usize,
    toasts: Vec<Toast>,
}

pub enum ToastAction {
    Add(String, ToastType),
    Remove(usize),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Add(message, toast_type) => {
                next.toasts.push(Toast {
                    id: next.next_id,
                    message,
                    toast_type,
                });
                next.next_id += 1;
            }
            ToastAction::Remove(id) => next.toasts.retain(|t| t.id != id),
        }
        Rc::new(next)
    }
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    pub toasts: Vec<Toast>,
    pub add_toast: Callback<(String, ToastType)>,
    pub remove_toast: Callback<usize>,
}

impl ToastContext {
    pub fn show_success(&self, message: String) {
        self.add_toast.emit((message, ToastType::Success));
    }

    pub fn show_warning(&self, message: String) {
        self.add_toast.emit((message, ToastType::Warning));
    }

    pub fn show_error(&self, message: String) {
        self.add_toast.emit((message, ToastType::Error));
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer(ToastList::default);

    let add_toast = {
        let list = list.clone();

        Callback::from(move |(message, toast_type): (String, ToastType)| {
            let id = list.next_id;
            list.dispatch(ToastAction::Add(message, toast_type));

            // Auto-dismiss after the configured duration
            let dispatcher = list.dispatcher();
            let duration = settings::get_settings().toast_duration_ms;
            let timeout_handle = gloo_timers::callback::Timeout::new(duration, move || {
                dispatcher.dispatch(ToastAction::Remove(id));
            });
            timeout_handle.forget();
        })
    };

    let remove_toast = {
        let dispatcher = list.dispatcher();
        Callback::from(move |id: usize| dispatcher.dispatch(ToastAction::Remove(id)))
    };

    let toasts = list.toasts.clone();
    let context = ToastContext {
        toasts: toasts.clone(),
        add_toast,
        remove_toast: remove_toast.clone(),
    };

    html! {
        <ContextProvider<ToastContext> context={context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for toasts.iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let remove_toast = remove_toast.clone();
                        Callback::from(move |_| remove_toast.emit(id))
                    };

                    html! {
                        <div key={id} class={classes!("alert", toast.toast_type.alert_class(), "shadow-lg")}>
                            <i class={toast.toast_type.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}

