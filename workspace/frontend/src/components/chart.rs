//! Plotly host for [`ChartModel`]s.
//!
//! Conversion to Plotly traces is a pure function of the model and the current theme,
//! so a theme switch simply re-plots. Bar and line traces go through the typed `plotly`
//! builders; kinds the typed API does not cover are written as JSON.

use std::sync::atomic::{AtomicUsize, Ordering};

use compute::{ChartKind, ChartModel, ConfigurationError, Orientation, Theme};
use plotly::common::{Fill, HoverInfo, Line, Marker, Mode};
use plotly::{Bar, Scatter};
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::theme::use_theme;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);

    #[wasm_bindgen(js_namespace = Plotly)]
    fn purge(div_id: &str);
}

static NEXT_CHART_ID: AtomicUsize = AtomicUsize::new(0);

/// Largest bubble diameter in pixels.
const MAX_BUBBLE_PX: f64 = 40.0;

fn color(model: &ChartModel, index: usize) -> String {
    if model.colors.is_empty() {
        return String::from("#4285F4");
    }
    model.colors[index % model.colors.len()].clone()
}

fn hover_texts(model: &ChartModel, values: &[f64]) -> Vec<String> {
    values.iter().map(|v| model.tooltip_text(*v)).collect()
}

fn to_json<T: Serialize>(trace: &T) -> Value {
    serde_json::to_value(trace).unwrap_or_else(|e| {
        log::error!("Failed to serialize trace: {}", e);
        Value::Null
    })
}

fn bar_traces(model: &ChartModel) -> Vec<Value> {
    model
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let marker = Marker::new().color(color(model, i));
            let texts = hover_texts(model, &series.values);
            match model.orientation {
                Orientation::Vertical => to_json(
                    &Bar::new(model.categories.clone(), series.values.clone())
                        .name(&series.name)
                        .marker(marker)
                        .hover_text_array(texts)
                        .hover_info(HoverInfo::Text),
                ),
                Orientation::Horizontal => to_json(
                    &Bar::new(series.values.clone(), model.categories.clone())
                        .orientation(plotly::common::Orientation::Horizontal)
                        .name(&series.name)
                        .marker(marker)
                        .hover_text_array(texts)
                        .hover_info(HoverInfo::Text),
                ),
            }
        })
        .collect()
}

fn line_traces(model: &ChartModel, area: bool) -> Vec<Value> {
    model
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let mut trace = Scatter::new(model.categories.clone(), series.values.clone())
                .mode(Mode::LinesMarkers)
                .name(&series.name)
                .line(Line::new().color(color(model, i)).width(2.0))
                .hover_text_array(hover_texts(model, &series.values))
                .hover_info(HoverInfo::Text);
            if area {
                trace = trace.fill(Fill::ToNextY);
                if model.stacked {
                    trace = trace.stack_group("stack");
                }
            }
            to_json(&trace)
        })
        .collect()
}

fn bubble_traces(model: &ChartModel) -> Vec<Value> {
    let largest = model
        .series
        .iter()
        .flat_map(|s| s.sizes.iter().copied())
        .fold(0.0_f64, f64::max);
    let sizeref = if largest > 0.0 {
        2.0 * largest / (MAX_BUBBLE_PX * MAX_BUBBLE_PX)
    } else {
        1.0
    };

    model
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let texts: Vec<String> = series
                .values
                .iter()
                .zip(&series.sizes)
                .map(|(value, clients)| format!("{} ({} clients)", model.tooltip_text(*value), clients))
                .collect();
            json!({
                "type": "scatter",
                "mode": "markers",
                "name": series.name,
                "x": model.categories,
                "y": series.values,
                "hovertext": texts,
                "hoverinfo": "text",
                "marker": {
                    "size": series.sizes,
                    "sizemode": "area",
                    "sizeref": sizeref,
                    "color": color(model, i),
                },
            })
        })
        .collect()
}

/// Plotly `data` array for a model.
pub fn traces(model: &ChartModel) -> Vec<Value> {
    let first = model.series.first();
    let values = first.map(|s| s.values.clone()).unwrap_or_default();

    match model.kind {
        ChartKind::Bar => bar_traces(model),
        ChartKind::Line => line_traces(model, false),
        ChartKind::Area => line_traces(model, true),
        ChartKind::Bubble => bubble_traces(model),
        ChartKind::Funnel => vec![json!({
            "type": "funnel",
            "y": model.categories,
            "x": values,
            "hovertext": hover_texts(model, &values),
            "hoverinfo": "text",
            "marker": { "color": model.colors },
        })],
        ChartKind::Heatmap => vec![json!({
            "type": "heatmap",
            "x": model.categories,
            "y": model.series.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            "z": model.series.iter().map(|s| s.values.clone()).collect::<Vec<_>>(),
            "text": model.series.iter().map(|s| hover_texts(model, &s.values)).collect::<Vec<_>>(),
            "hoverinfo": "x+y+text",
            "colorscale": "Blues",
        })],
        ChartKind::Pie => vec![json!({
            "type": "pie",
            "labels": model.categories,
            "values": values,
            "hovertext": hover_texts(model, &values),
            "hoverinfo": "label+text+percent",
            "marker": { "colors": model.colors },
        })],
        ChartKind::PolarArea => vec![json!({
            "type": "barpolar",
            "theta": model.categories,
            "r": values,
            "hovertext": hover_texts(model, &values),
            "hoverinfo": "text",
            "marker": {
                "color": (0..model.categories.len()).map(|i| color(model, i)).collect::<Vec<_>>(),
            },
        })],
        ChartKind::Treemap => vec![json!({
            "type": "treemap",
            "labels": model.categories,
            "parents": vec![""; model.categories.len()],
            "values": values,
            "hovertext": hover_texts(model, &values),
            "hoverinfo": "label+text",
            "marker": { "colors": model.colors },
        })],
        ChartKind::Gauge => vec![json!({
            "type": "indicator",
            "mode": "gauge+number",
            "value": values.first().copied().unwrap_or(0.0),
            "title": { "text": model.categories.first().cloned().unwrap_or_default() },
            "number": { "suffix": "%", "valueformat": ".1f" },
            "gauge": {
                "axis": { "range": [0, 100] },
                "bar": { "color": color(model, 0) },
            },
        })],
    }
}

/// Plotly `layout` object for a model in the given theme.
pub fn layout(model: &ChartModel, theme: Theme, height: u32) -> Value {
    let axis = json!({
        "gridcolor": theme.grid_color(),
        "color": theme.fore_color(),
        "automargin": true,
    });
    let barmode = if model.stacked { "stack" } else { "group" };

    json!({
        "title": { "text": model.title },
        "height": height,
        "paper_bgcolor": theme.background(),
        "plot_bgcolor": theme.background(),
        "font": { "color": theme.fore_color() },
        "xaxis": axis,
        "yaxis": axis,
        "barmode": barmode,
        "showlegend": model.series.len() > 1 || matches!(model.kind, ChartKind::Pie),
        "margin": { "t": 50, "l": 40, "r": 20, "b": 40 },
    })
}

fn traces_to_js(data: &Value) -> Option<JsValue> {
    let text = serde_json::to_string(data).ok()?;
    js_sys::JSON::parse(&text).ok()
}

fn layout_to_js(layout: &Value) -> Option<JsValue> {
    // Plain objects rather than JS Maps, which Plotly ignores
    layout
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .ok()
}

#[derive(Properties, PartialEq)]
pub struct ChartViewProps {
    pub model: ChartModel,
    #[prop_or(350)]
    pub height: u32,
}

/// Plots a model and re-plots whenever the model or the theme changes.
#[function_component(ChartView)]
pub fn chart_view(props: &ChartViewProps) -> Html {
    let container_ref = use_node_ref();
    let theme = use_theme().theme;
    let div_id = use_memo((), |_| {
        format!("chart-{}", NEXT_CHART_ID.fetch_add(1, Ordering::Relaxed))
    });

    {
        let div_id = (*div_id).clone();
        use_effect_with(
            (container_ref.clone(), props.model.clone(), theme, props.height),
            move |(container_ref, model, theme, height)| {
                let mut plotted = false;
                if let Some(element) = container_ref.cast::<HtmlElement>() {
                    element.set_id(&div_id);
                    let data = Value::Array(traces(model));
                    let layout = layout(model, *theme, *height);
                    match (traces_to_js(&data), layout_to_js(&layout)) {
                        (Some(data_js), Some(layout_js)) => {
                            log::trace!("Plotting '{}' into {}", model.title, div_id);
                            newPlot(&div_id, data_js, layout_js);
                            plotted = true;
                        }
                        _ => log::error!("Failed to convert chart '{}' for Plotly", model.title),
                    }
                }
                move || {
                    if plotted {
                        purge(&div_id);
                    }
                }
            },
        );
    }

    if props.model.is_empty() {
        return html! {
            <div class="text-center py-8 text-gray-500">
                <i class="fas fa-chart-bar text-4xl mb-4 opacity-50"></i>
                <p>{format!("No data for {}.", props.model.title)}</p>
            </div>
        };
    }

    html! {
        <div ref={container_ref} style={format!("width:100%; height:{}px;", props.height)}></div>
    }
}

/// Plots a builder result; server data that cannot be charted shows an inline alert.
pub fn chart_or_error(result: Result<ChartModel, ConfigurationError>) -> Html {
    match result {
        Ok(model) => html! { <ChartView {model} /> },
        Err(e) => {
            log::error!("Cannot chart response: {}", e);
            html! {
                <div class="alert alert-warning">
                    <i class="fas fa-exclamation-triangle"></i>
                    <span>{format!("Chart unavailable: {}", e)}</span>
                </div>
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compute::{Series, ValueFormat};

    fn model(kind: ChartKind) -> ChartModel {
        ChartModel::new(
            kind,
            "Sample",
            vec!["Q1".to_string(), "Q2".to_string()],
            vec![Series::new("Revenue", vec![1000.0, 2500.0])],
        )
        .unwrap()
        .with_format(ValueFormat::Currency)
    }

    #[test]
    fn test_pie_trace_carries_labels_and_values() {
        let data = traces(&model(ChartKind::Pie));
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["type"], "pie");
        assert_eq!(data[0]["labels"], json!(["Q1", "Q2"]));
        assert_eq!(data[0]["values"], json!([1000.0, 2500.0]));
    }

    #[test]
    fn test_heatmap_rows_are_series() {
        let heatmap = ChartModel::new(
            ChartKind::Heatmap,
            "Heat",
            vec!["Cloud".to_string()],
            vec![Series::new("Commit", vec![5.0]), Series::new("Upside", vec![0.0])],
        )
        .unwrap();
        let data = traces(&heatmap);
        assert_eq!(data[0]["y"], json!(["Commit", "Upside"]));
        assert_eq!(data[0]["z"], json!([[5.0], [0.0]]));
    }

    #[test]
    fn test_layout_follows_theme() {
        let chart = model(ChartKind::Bar);
        let dark = layout(&chart, Theme::Dark, 300);
        assert_eq!(dark["font"]["color"], Theme::Dark.fore_color());
        assert_eq!(dark["xaxis"]["gridcolor"], Theme::Dark.grid_color());
        assert_eq!(dark["height"], 300);

        let light = layout(&chart, Theme::Light, 300);
        assert_ne!(light["font"]["color"], dark["font"]["color"]);
    }

    #[test]
    fn test_stacked_area_uses_stack_barmode() {
        let area = model(ChartKind::Area).stacked();
        assert_eq!(layout(&area, Theme::Light, 300)["barmode"], "stack");
        assert_eq!(traces(&area).len(), 1);
    }
}
