use compute::cards::SummaryCard;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryCardsProps {
    pub cards: Vec<SummaryCard>,
}

#[function_component(SummaryCards)]
pub fn summary_cards(props: &SummaryCardsProps) -> Html {
    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-4 gap-6">
            { for props.cards.iter().map(|card| html! {
                <div class="stats shadow bg-base-100">
                    <div class="stat">
                        <div class="stat-title">{&card.title}</div>
                        <div class="stat-value text-primary text-2xl">{&card.value}</div>
                        if let Some(caption) = &card.caption {
                            <div class="stat-desc">{caption}</div>
                        }
                    </div>
                </div>
            })}
        </div>
    }
}

/// Titled card around a chart or table.
#[derive(Properties, PartialEq)]
pub struct PanelProps {
    pub title: String,
    pub children: Children,
}

#[function_component(Panel)]
pub fn panel(props: &PanelProps) -> Html {
    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{&props.title}</h2>
                { for props.children.iter() }
            </div>
        </div>
    }
}
