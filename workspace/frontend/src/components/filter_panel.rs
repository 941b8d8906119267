use std::collections::BTreeSet;

use compute::{ColumnDescriptor, Row};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::table::{TableAction, TableHandle};

/// `sales_stage` -> `Sales Stage`
pub fn column_label(column: &str) -> String {
    column
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The text box as typed; only an empty box means "no search".
fn search_term(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

#[derive(Properties, PartialEq)]
pub struct FilterPanelProps {
    pub descriptors: Vec<ColumnDescriptor>,
    /// Parallel to `descriptors`.
    pub selections: Vec<BTreeSet<String>>,
    #[prop_or_default]
    pub search_label: Option<String>,
    #[prop_or_default]
    pub search_term: Option<String>,
    pub on_toggle: Callback<(String, String, bool)>,
    pub on_apply: Callback<Option<String>>,
    pub on_clear: Callback<()>,
}

/// Checkbox groups for each filterable column, an optional search box, and
/// Apply/Clear buttons. Toggling only stages a selection; Apply recomputes the view.
#[function_component(FilterPanel)]
pub fn filter_panel(props: &FilterPanelProps) -> Html {
    let search_text = use_state(|| props.search_term.clone().unwrap_or_default());

    let on_search_input = {
        let search_text = search_text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search_text.set(input.value());
        })
    };

    let on_apply = {
        let on_apply = props.on_apply.clone();
        let search_text = search_text.clone();
        Callback::from(move |_| {
            let term = (*search_text).clone();
            log::debug!("Applying filters with search term '{}'", term);
            on_apply.emit(search_term(term));
        })
    };

    let on_clear = {
        let on_clear = props.on_clear.clone();
        let search_text = search_text.clone();
        Callback::from(move |_| {
            log::debug!("Clearing filters");
            search_text.set(String::new());
            on_clear.emit(());
        })
    };

    html! {
        <div class="card bg-base-100 shadow mb-6">
            <div class="card-body">
                <h3 class="card-title text-lg"><i class="fas fa-filter"></i>{" Filters"}</h3>

                if let Some(label) = &props.search_label {
                    <div class="form-control">
                        <input
                            type="text"
                            class="input input-bordered input-sm w-full max-w-md"
                            placeholder={format!("Search by {}", label)}
                            value={(*search_text).clone()}
                            oninput={on_search_input}
                        />
                    </div>
                }

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    { for props.descriptors.iter().zip(&props.selections).map(|(descriptor, selected)| {
                        render_column(descriptor, selected, &props.on_toggle)
                    })}
                </div>

                <div class="card-actions justify-end">
                    <button class="btn btn-ghost btn-sm" onclick={on_clear}>
                        <i class="fas fa-times"></i>{" Clear"}
                    </button>
                    <button class="btn btn-primary btn-sm" onclick={on_apply}>
                        <i class="fas fa-check"></i>{" Apply"}
                    </button>
                </div>
            </div>
        </div>
    }
}

fn render_column(
    descriptor: &ColumnDescriptor,
    selected: &BTreeSet<String>,
    on_toggle: &Callback<(String, String, bool)>,
) -> Html {
    html! {
        <div>
            <p class="font-semibold text-sm mb-2">{column_label(&descriptor.name)}</p>
            <div class="flex flex-col gap-1 max-h-48 overflow-y-auto">
                { for descriptor.distinct_values.iter().map(|value| {
                    let onchange = {
                        let on_toggle = on_toggle.clone();
                        let column = descriptor.name.clone();
                        let value = value.clone();
                        Callback::from(move |e: Event| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            on_toggle.emit((column.clone(), value.clone(), input.checked()));
                        })
                    };
                    html! {
                        <label class="label cursor-pointer justify-start gap-2 py-0">
                            <input
                                type="checkbox"
                                class="checkbox checkbox-sm"
                                checked={selected.contains(value)}
                                {onchange}
                            />
                            <span class="label-text">{value}</span>
                        </label>
                    }
                })}
            </div>
        </div>
    }
}

/// Wires a [`FilterPanel`] to a page's table reducer.
pub fn table_filters<R>(table: &TableHandle<R>) -> Html
where
    R: Row + Clone + 'static,
{
    let engine = table.engine();
    let descriptors = engine.descriptors().to_vec();
    let selections = descriptors
        .iter()
        .map(|d| engine.selected(&d.name).cloned().unwrap_or_default())
        .collect::<Vec<_>>();

    let on_toggle = {
        let table = table.clone();
        Callback::from(move |(column, value, included): (String, String, bool)| {
            table.dispatch(TableAction::Toggle { column, value, included });
        })
    };
    let on_apply = {
        let table = table.clone();
        Callback::from(move |term: Option<String>| table.dispatch(TableAction::Apply(term)))
    };
    let on_clear = {
        let table = table.clone();
        Callback::from(move |_| table.dispatch(TableAction::Clear))
    };

    html! {
        <FilterPanel
            {descriptors}
            {selections}
            search_label={engine.schema().search_column().map(column_label)}
            search_term={engine.search_term().map(str::to_string)}
            {on_toggle}
            {on_apply}
            {on_clear}
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_label() {
        assert_eq!(column_label("sales_stage"), "Sales Stage");
        assert_eq!(column_label("industry"), "Industry");
        assert_eq!(column_label("full_name"), "Full Name");
    }

    #[test]
    fn test_search_term_keeps_whitespace() {
        assert_eq!(search_term(String::new()), None);
        assert_eq!(search_term(" ".to_string()), Some(" ".to_string()));
        assert_eq!(search_term(" acme ".to_string()), Some(" acme ".to_string()));
    }
}
