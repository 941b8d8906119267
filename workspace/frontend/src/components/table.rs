use std::rc::Rc;

use compute::{fetch_rows, Fetched, FilterEngine, FilterSchema, Refresh, Row, RowSource, TablePage, Ticket};
use yew::prelude::*;

use crate::common::error::ErrorDisplay;
use crate::common::fetch_hook::{report_failure, use_page_scope, LoadTrackerHandle, TrackerAction};
use crate::common::loading::Loading;
use crate::common::toast::ToastContext;
use crate::session::use_session;

#[derive(Debug, Clone, PartialEq)]
pub enum TableStatus {
    Loading,
    Ready,
    Failed(String),
}

/// A page's filter engine plus the state of its last fetch.
#[derive(Debug, Clone)]
pub struct TableState<R> {
    page: TablePage<R>,
    pub status: TableStatus,
}

pub enum TableAction<R> {
    Started,
    Loaded { ticket: Ticket, rows: Vec<R> },
    Failed(String),
    Toggle { column: String, value: String, included: bool },
    Apply(Option<String>),
    Clear,
}

impl<R: Row + Clone> TableState<R> {
    fn new(columns: &[&str], search_column: Option<&str>, scope: compute::PageScope) -> Self {
        // Column lists are static per page
        let page = FilterSchema::new(columns.iter().copied(), search_column)
            .and_then(|schema| TablePage::new(schema, scope))
            .unwrap_or_else(|e| panic!("Invalid table configuration: {}", e));
        Self {
            page,
            status: TableStatus::Loading,
        }
    }

    pub fn engine(&self) -> &FilterEngine<R> {
        self.page.engine()
    }
}

impl<R: Row + Clone + 'static> Reducible for TableState<R> {
    type Action = TableAction<R>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            TableAction::Started => next.status = TableStatus::Loading,
            TableAction::Loaded { ticket, rows } => {
                if next.page.accept(&ticket, rows) == Refresh::Discarded {
                    return self;
                }
                next.status = TableStatus::Ready;
            }
            TableAction::Failed(message) => next.status = TableStatus::Failed(message),
            TableAction::Toggle { column, value, included } => {
                if let Err(e) = next.page.engine_mut().toggle_filter_value(&column, &value, included) {
                    panic!("Filter panel out of sync with table: {}", e);
                }
            }
            TableAction::Apply(term) => {
                let visible = next.page.engine_mut().apply_filters(term.as_deref()).len();
                log::debug!("Filters applied, {} rows visible", visible);
            }
            TableAction::Clear => {
                next.page.engine_mut().clear_filters();
            }
        }
        Rc::new(next)
    }
}

pub type TableHandle<R> = UseReducerHandle<TableState<R>>;

/// Row table for one page: fetches through `source` on mount and on every user/year
/// change, and keeps the filter engine in a reducer.
#[hook]
pub fn use_table<R, S>(
    key: &'static str,
    tracker: &LoadTrackerHandle,
    columns: &'static [&'static str],
    search_column: Option<&'static str>,
    source: S,
) -> (TableHandle<R>, Callback<()>)
where
    R: Row + Clone + 'static,
    S: RowSource<R> + 'static,
{
    let scope = use_page_scope();
    let table = {
        let scope = scope.clone();
        use_reducer(move || TableState::new(columns, search_column, scope))
    };
    let toast_ctx = use_context::<ToastContext>().expect("ToastProvider is missing from the component tree");
    let session = use_session();
    let source = use_state(|| Rc::new(source));
    let fetch_context = session.fetch_context();

    let refetch = {
        let dispatcher = table.dispatcher();
        let tracker = tracker.clone();
        let scope = scope.clone();

        use_callback(fetch_context.clone(), move |_, fetch_context| {
            let Some(ctx) = fetch_context.clone() else {
                log::debug!("Skipping {} fetch, no signed-in user", key);
                return;
            };
            let dispatcher = dispatcher.clone();
            let toast_ctx = toast_ctx.clone();
            let session = session.clone();
            let tracker = tracker.clone();
            let source = (*source).clone();
            let scope = scope.clone();

            dispatcher.dispatch(TableAction::Started);

            wasm_bindgen_futures::spawn_local(async move {
                log::trace!("Fetching {} rows", key);
                match fetch_rows::<R, S>(&scope, source.as_ref(), &ctx).await {
                    Fetched::Stale => log::debug!("Dropping stale {} rows", key),
                    Fetched::Rows { ticket, rows } => {
                        tracker.dispatch(TrackerAction::Settled { key, ok: true });
                        dispatcher.dispatch(TableAction::Loaded { ticket, rows });
                    }
                    Fetched::Failed(err) => {
                        tracker.dispatch(TrackerAction::Settled { key, ok: false });
                        report_failure(key, &err, &toast_ctx, &session);
                        dispatcher.dispatch(TableAction::Failed(err.to_string()));
                    }
                }
            });
        })
    };

    {
        let refetch = refetch.clone();
        use_effect_with(fetch_context, move |_| {
            scope.renew();
            refetch.emit(());
            || ()
        });
    }

    (table, refetch)
}

#[derive(Properties, PartialEq)]
pub struct DataTableProps {
    pub headers: Vec<&'static str>,
    pub status: TableStatus,
    /// Rows currently visible, already rendered as `<tr>` elements.
    pub rows: Vec<Html>,
    pub total: usize,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

#[function_component(DataTable)]
pub fn data_table(props: &DataTableProps) -> Html {
    match &props.status {
        TableStatus::Loading if props.total == 0 => {
            return html! { <Loading text={Some("Loading rows...".to_string())} /> };
        }
        TableStatus::Failed(message) if props.total == 0 => {
            return html! { <ErrorDisplay message={message.clone()} on_retry={props.on_retry.clone()} /> };
        }
        _ => {}
    }

    html! {
        <div class="overflow-x-auto bg-base-100 shadow rounded-box">
            <div class="px-4 pt-3 text-sm opacity-70">
                {format!("Showing {} of {}", props.rows.len(), props.total)}
            </div>
            <table class="table table-zebra">
                <thead>
                    <tr>
                        { for props.headers.iter().map(|h| html! { <th>{*h}</th> }) }
                    </tr>
                </thead>
                <tbody>
                    if props.rows.is_empty() {
                        <tr>
                            <td colspan={props.headers.len().to_string()} class="text-center py-8 text-gray-500">
                                {"No rows match the current filters."}
                            </td>
                        </tr>
                    } else {
                        { for props.rows.iter().cloned() }
                    }
                </tbody>
            </table>
        </div>
    }
}
