//! Chart view-models built from backend aggregates.
//!
//! Every builder walks its source once and pushes the category label and the value(s)
//! for that category together, so `series[i].values[j]` always belongs to
//! `categories[j]`. Builders that receive labels and values as separate arrays go
//! through [`ChartModel::new`], which rejects misaligned input.

use std::collections::BTreeSet;

use common::{
    format_count, format_currency_f64, format_percentage, quarter_label, ExecutivePerformance,
    IndustryAcvChart, IndustryRevenueChart, IndustryTreemap, PipelineHeatmap, ProvincePie,
    ProvincialDistribution, QuarterlyTarget, RevenueDistribution, StageFunnel,
    WinsCategoryDistribution, WinsEvolution,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ConfigurationError;

/// Palette used by most bar, line and funnel charts.
pub const GOOGLE_PALETTE: [&str; 6] = [
    "#4285F4", "#34A853", "#FBBC05", "#EA4335", "#A142F4", "#00ACC1",
];

/// Palette for the provincial polar chart.
pub const POLAR_PALETTE: [&str; 10] = [
    "#1E90FF", "#FF8C00", "#32CD32", "#FF69B4", "#8A2BE2", "#00CED1", "#FFD700", "#FF6347",
    "#40E0D0", "#DA70D6",
];

/// Palette for the revenue bubble and area charts.
pub const REVENUE_PALETTE: [&str; 4] = ["#008FFB", "#00E396", "#FEB019", "#FF4560"];

/// Number of executives shown in the performance chart.
pub const TOP_EXECUTIVES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Area,
    Funnel,
    Heatmap,
    Pie,
    PolarArea,
    Treemap,
    Bubble,
    Gauge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// How values are rendered in labels and tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    #[default]
    Plain,
    Currency,
    Percentage,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Plain => format_count(value),
            Self::Currency => format_currency_f64(value),
            Self::Percentage => format_percentage(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    /// Bubble radii, parallel to `values`. Empty for every other chart kind.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            sizes: Vec::new(),
        }
    }
}

/// Rendering-ready description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartModel {
    pub kind: ChartKind,
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub colors: Vec<String>,
    pub value_format: ValueFormat,
    /// Unit appended to hovered values, e.g. "wins".
    pub tooltip: Option<String>,
    pub orientation: Orientation,
    pub stacked: bool,
}

impl ChartModel {
    /// Builds a model after checking every series has one value per category.
    pub fn new(
        kind: ChartKind,
        title: impl Into<String>,
        categories: Vec<String>,
        series: Vec<Series>,
    ) -> Result<Self, ConfigurationError> {
        for s in &series {
            if s.values.len() != categories.len()
                || (!s.sizes.is_empty() && s.sizes.len() != categories.len())
            {
                return Err(ConfigurationError::MisalignedSeries {
                    series: s.name.clone(),
                    values: s.values.len(),
                    categories: categories.len(),
                });
            }
        }
        Ok(Self::aligned(kind, title, categories, series))
    }

    fn aligned(
        kind: ChartKind,
        title: impl Into<String>,
        categories: Vec<String>,
        series: Vec<Series>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            categories,
            series,
            colors: palette(&GOOGLE_PALETTE),
            value_format: ValueFormat::Plain,
            tooltip: None,
            orientation: Orientation::Vertical,
            stacked: false,
        }
    }

    pub fn with_colors(mut self, colors: &[&str]) -> Self {
        self.colors = palette(colors);
        self
    }

    pub fn with_format(mut self, value_format: ValueFormat) -> Self {
        self.value_format = value_format;
        self
    }

    pub fn with_tooltip(mut self, unit: impl Into<String>) -> Self {
        self.tooltip = Some(unit.into());
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }

    pub fn stacked(mut self) -> Self {
        self.stacked = true;
        self
    }

    pub fn is_aligned(&self) -> bool {
        let n = self.categories.len();
        self.series
            .iter()
            .all(|s| s.values.len() == n && (s.sizes.is_empty() || s.sizes.len() == n))
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Value of the first series for the named category.
    pub fn value_for(&self, category: &str) -> Option<f64> {
        let index = self.categories.iter().position(|c| c == category)?;
        self.series.first().and_then(|s| s.values.get(index).copied())
    }

    /// Hover text for one value, e.g. `"$1,200.00 revenue"`.
    pub fn tooltip_text(&self, value: f64) -> String {
        match &self.tooltip {
            Some(unit) => format!("{} {}", self.value_format.format(value), unit),
            None => self.value_format.format(value),
        }
    }
}

fn palette(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}

/// Pushes one category with its single value.
fn single_series(
    kind: ChartKind,
    title: &str,
    name: &str,
    points: impl IntoIterator<Item = (String, f64)>,
) -> ChartModel {
    let mut categories = Vec::new();
    let mut values = Vec::new();
    for (category, value) in points {
        categories.push(category);
        values.push(value);
    }
    ChartModel::aligned(kind, title, categories, vec![Series::new(name, values)])
}

/// Pipeline funnel, largest stage first.
#[instrument(skip_all, fields(stages = funnel.stage_funnel_data.len()))]
pub fn stage_funnel(funnel: &StageFunnel) -> ChartModel {
    let mut stages = funnel.stage_funnel_data.clone();
    stages.sort_by(|a, b| b.count.total_cmp(&a.count));

    single_series(
        ChartKind::Funnel,
        "Pipeline Stage Funnel",
        "Opportunities",
        stages.into_iter().map(|s| (s.stage, s.count)),
    )
    .horizontal()
    .with_tooltip("opportunities")
}

/// Product category by forecast category pivot.
///
/// Categories are product categories, one series per forecast category, both in
/// order of first appearance. Pairs absent from the source are zero.
#[instrument(skip_all, fields(cells = heatmap.heatmap_data.len()))]
pub fn pipeline_heatmap(heatmap: &PipelineHeatmap) -> ChartModel {
    let mut products: Vec<String> = Vec::new();
    let mut forecasts: Vec<String> = Vec::new();
    for cell in &heatmap.heatmap_data {
        if !products.contains(&cell.product_category) {
            products.push(cell.product_category.clone());
        }
        if !forecasts.contains(&cell.forecast_category) {
            forecasts.push(cell.forecast_category.clone());
        }
    }

    let mut series: Vec<Series> = forecasts
        .iter()
        .map(|forecast| Series::new(forecast.as_str(), vec![0.0; products.len()]))
        .collect();
    for cell in &heatmap.heatmap_data {
        let row = products.iter().position(|p| *p == cell.product_category);
        let column = forecasts.iter().position(|f| *f == cell.forecast_category);
        if let (Some(row), Some(column)) = (row, column) {
            series[column].values[row] += cell.value;
        }
    }

    debug!(
        products = products.len(),
        forecasts = forecasts.len(),
        "Built heatmap pivot"
    );
    ChartModel::aligned(ChartKind::Heatmap, "Pipeline Heatmap", products, series)
        .with_format(ValueFormat::Currency)
}

pub fn industry_acv_bar(chart: &IndustryAcvChart) -> ChartModel {
    single_series(
        ChartKind::Bar,
        "Incremental ACV by Industry",
        "Incremental ACV",
        chart
            .industry_acv_data
            .iter()
            .map(|i| (i.industry.clone(), i.incremental_acv)),
    )
    .with_colors(&["#3f51b5"])
    .with_format(ValueFormat::Currency)
}

/// Signings count per province, labelled with the province's average contract value.
pub fn provincial_distribution(distribution: &ProvincialDistribution) -> ChartModel {
    single_series(
        ChartKind::PolarArea,
        "Signings by Province",
        "Signings",
        distribution.provincial_data.iter().map(|p| {
            (
                format!("{} - {}", p.province, format_currency_f64(p.avg_value)),
                p.count,
            )
        }),
    )
    .with_colors(&POLAR_PALETTE)
    .with_tooltip("signings")
}

pub fn wins_category_distribution(
    distribution: &WinsCategoryDistribution,
) -> Result<ChartModel, ConfigurationError> {
    let series = distribution
        .series
        .iter()
        .map(|s| Series::new(s.name.as_str(), s.data.clone()))
        .collect();

    Ok(ChartModel::new(
        ChartKind::Line,
        "Wins by Category",
        distribution.quarters.clone(),
        series,
    )?
    .with_tooltip("wins"))
}

pub fn wins_evolution(evolution: &WinsEvolution) -> ChartModel {
    single_series(
        ChartKind::Line,
        "Quarterly Wins Evolution",
        "Total Wins",
        evolution
            .win_evolution
            .iter()
            .map(|p| (quarter_label(p.quarter), p.win_count)),
    )
    .with_colors(&["#4285F4"])
    .with_tooltip("wins")
}

pub fn industry_treemap(treemap: &IndustryTreemap) -> ChartModel {
    single_series(
        ChartKind::Treemap,
        "Clients by Industry",
        "Clients",
        treemap.treemap_data.iter().map(|p| (p.x.clone(), p.y)),
    )
    .with_tooltip("clients")
}

pub fn province_pie(pie: &ProvincePie) -> Result<ChartModel, ConfigurationError> {
    Ok(ChartModel::new(
        ChartKind::Pie,
        "Clients by Province",
        pie.labels.clone(),
        vec![Series::new("Clients", pie.series.clone())],
    )?
    .with_tooltip("clients"))
}

/// Fiscal quarter carried as a JSON number, e.g. `3.0`.
fn quarter_from(value: f64) -> Result<u8, ConfigurationError> {
    let rounded = value.round();
    if value.is_finite() && (1.0..=4.0).contains(&rounded) {
        Ok(rounded as u8)
    } else {
        Err(ConfigurationError::InvalidQuarter(value.to_string()))
    }
}

/// Revenue per product category and quarter, sized by client count.
///
/// Categories are every quarter present in any product's data, ascending. A product
/// with no point for a quarter gets zero revenue and zero size there. A point whose
/// quarter is not 1 to 4 rejects the whole chart.
#[instrument(skip_all, fields(products = distribution.bubble_data.len()))]
pub fn revenue_by_product(
    distribution: &RevenueDistribution,
) -> Result<ChartModel, ConfigurationError> {
    let mut quarters = BTreeSet::new();
    for product in &distribution.bubble_data {
        for [quarter, _, _] in &product.data {
            quarters.insert(quarter_from(*quarter)?);
        }
    }
    let quarters: Vec<u8> = quarters.into_iter().collect();

    let mut series = Vec::with_capacity(distribution.bubble_data.len());
    for product in &distribution.bubble_data {
        let mut values = vec![0.0; quarters.len()];
        let mut sizes = vec![0.0; quarters.len()];
        for [quarter, revenue, clients] in &product.data {
            let quarter = quarter_from(*quarter)?;
            if let Some(index) = quarters.iter().position(|q| *q == quarter) {
                values[index] += revenue;
                sizes[index] += clients;
            }
        }
        series.push(Series {
            name: product.product_category.clone(),
            values,
            sizes,
        });
    }

    Ok(ChartModel::aligned(
        ChartKind::Bubble,
        "Revenue Distribution by Product",
        quarters.into_iter().map(quarter_label).collect(),
        series,
    )
    .with_colors(&REVENUE_PALETTE)
    .with_format(ValueFormat::Currency))
}

pub fn industry_revenue_area(
    chart: &IndustryRevenueChart,
) -> Result<ChartModel, ConfigurationError> {
    let series = chart
        .industry_data
        .iter()
        .map(|i| Series::new(i.industry.as_str(), i.data.clone()))
        .collect();

    Ok(ChartModel::new(
        ChartKind::Area,
        "Revenue by Industry",
        chart.quarters.iter().copied().map(quarter_label).collect(),
        series,
    )?
    .with_colors(&["#4285F4", "#DB4437", "#F4B400", "#0F9D58"])
    .with_format(ValueFormat::Currency)
    .stacked())
}

/// The best performing executives, highest count first.
pub fn top_executives(performance: &[ExecutivePerformance]) -> ChartModel {
    let mut ranked = performance.to_vec();
    ranked.sort_by(|a, b| b.count.total_cmp(&a.count));
    ranked.truncate(TOP_EXECUTIVES);

    single_series(
        ChartKind::Bar,
        "Top Account Executives",
        "Deals",
        ranked.into_iter().map(|e| (e.category, e.count)),
    )
    .with_colors(&REVENUE_PALETTE)
    .horizontal()
}

/// Achievement of the latest quarter that has a target.
pub fn target_gauge(targets: &[QuarterlyTarget]) -> ChartModel {
    let latest = targets.iter().max_by_key(|t| t.quarter);

    single_series(
        ChartKind::Gauge,
        "Target Achievement",
        "Achievement",
        latest.map(|t| (quarter_label(t.quarter), t.achievement_percentage)),
    )
    .with_colors(&["#4CAF50"])
    .with_format(ValueFormat::Percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{
        BubbleSeries, HeatmapCell, IndustryAcv, IndustryRevenue, NamedSeries, ProvincialPoint,
        StageCount, TreemapPoint, WinEvolutionPoint,
    };

    fn assert_pairs(model: &ChartModel, expected: &[(&str, f64)]) {
        assert!(model.is_aligned());
        assert_eq!(model.categories.len(), expected.len());
        for (category, value) in expected {
            assert_eq!(model.value_for(category), Some(*value), "category {}", category);
        }
    }

    #[test]
    fn test_new_rejects_misaligned_series() {
        let err = ChartModel::new(
            ChartKind::Bar,
            "Broken",
            vec!["A".to_string(), "B".to_string()],
            vec![Series::new("values", vec![1.0])],
        )
        .unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::MisalignedSeries {
                series: "values".to_string(),
                values: 1,
                categories: 2,
            }
        );
    }

    #[test]
    fn test_stage_funnel_sorted_descending() {
        let funnel = StageFunnel {
            stage_funnel_data: vec![
                StageCount { stage: "Qualify".to_string(), count: 5.0 },
                StageCount { stage: "Prospect".to_string(), count: 12.0 },
                StageCount { stage: "Closed Won".to_string(), count: 2.0 },
            ],
        };

        let model = stage_funnel(&funnel);
        assert_eq!(model.categories, vec!["Prospect", "Qualify", "Closed Won"]);
        assert_eq!(model.series[0].values, vec![12.0, 5.0, 2.0]);
        assert_eq!(model.orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_heatmap_zero_fills_missing_pairs() {
        let cell = |product: &str, forecast: &str, value: f64| HeatmapCell {
            product_category: product.to_string(),
            forecast_category: forecast.to_string(),
            value,
        };
        let heatmap = PipelineHeatmap {
            heatmap_data: vec![
                cell("Cloud", "Commit", 100.0),
                cell("Security", "Upside", 40.0),
                cell("Cloud", "Upside", 25.0),
            ],
        };

        let model = pipeline_heatmap(&heatmap);
        assert!(model.is_aligned());
        assert_eq!(model.categories, vec!["Cloud", "Security"]);
        assert_eq!(model.series[0].name, "Commit");
        assert_eq!(model.series[0].values, vec![100.0, 0.0]);
        assert_eq!(model.series[1].name, "Upside");
        assert_eq!(model.series[1].values, vec![25.0, 40.0]);
    }

    #[test]
    fn test_single_series_builders_stay_aligned() {
        let acv = IndustryAcvChart {
            industry_acv_data: vec![
                IndustryAcv { industry: "Retail".to_string(), incremental_acv: 1200.0 },
                IndustryAcv { industry: "Finance".to_string(), incremental_acv: 800.0 },
            ],
        };
        assert_pairs(&industry_acv_bar(&acv), &[("Retail", 1200.0), ("Finance", 800.0)]);

        let evolution = WinsEvolution {
            win_evolution: vec![
                WinEvolutionPoint { quarter: 1, win_count: 3.0 },
                WinEvolutionPoint { quarter: 2, win_count: 7.0 },
            ],
            categories: vec![],
            year: Some(2024),
        };
        let model = wins_evolution(&evolution);
        assert_pairs(&model, &[("Q1", 3.0), ("Q2", 7.0)]);
        assert_eq!(model.series[0].name, "Total Wins");

        let treemap = IndustryTreemap {
            treemap_data: vec![TreemapPoint {
                x: "Retail".to_string(),
                y: 4.0,
                revenue: None,
                client_count: None,
            }],
        };
        assert_pairs(&industry_treemap(&treemap), &[("Retail", 4.0)]);
    }

    #[test]
    fn test_provincial_labels_carry_average() {
        let distribution = ProvincialDistribution {
            provincial_data: vec![ProvincialPoint {
                province: "Ontario".to_string(),
                count: 9.0,
                avg_value: 50000.0,
            }],
        };

        let model = provincial_distribution(&distribution);
        assert_pairs(&model, &[("Ontario - $50,000.00", 9.0)]);
        assert_eq!(model.colors.len(), POLAR_PALETTE.len());
    }

    #[test]
    fn test_prezipped_builders_validate_lengths() {
        let pie = ProvincePie {
            labels: vec!["Ontario".to_string(), "Quebec".to_string()],
            series: vec![10.0],
        };
        assert!(province_pie(&pie).is_err());

        let wins = WinsCategoryDistribution {
            series: vec![NamedSeries { name: "NEW LOGO".to_string(), data: vec![1.0, 2.0] }],
            quarters: vec!["Q1".to_string(), "Q2".to_string()],
        };
        let model = wins_category_distribution(&wins).unwrap();
        assert!(model.is_aligned());

        let area = IndustryRevenueChart {
            industry_data: vec![IndustryRevenue {
                industry: "Retail".to_string(),
                data: vec![5.0, 6.0, 7.0],
            }],
            quarters: vec![1, 2, 3],
        };
        let model = industry_revenue_area(&area).unwrap();
        assert_eq!(model.categories, vec!["Q1", "Q2", "Q3"]);
        assert!(model.stacked);
    }

    #[test]
    fn test_revenue_by_product_fills_quarter_gaps() {
        let distribution = RevenueDistribution {
            bubble_data: vec![
                BubbleSeries {
                    product_category: "gcp-core".to_string(),
                    data: vec![[1.0, 75000.0, 12.0], [3.0, 110000.0, 18.0]],
                },
                BubbleSeries {
                    product_category: "data-analytics".to_string(),
                    data: vec![[2.0, 55000.0, 10.0]],
                },
            ],
            year: Some(2024),
        };

        let model = revenue_by_product(&distribution).unwrap();
        assert!(model.is_aligned());
        assert_eq!(model.categories, vec!["Q1", "Q2", "Q3"]);
        assert_eq!(model.series[0].values, vec![75000.0, 0.0, 110000.0]);
        assert_eq!(model.series[0].sizes, vec![12.0, 0.0, 18.0]);
        assert_eq!(model.series[1].values, vec![0.0, 55000.0, 0.0]);
    }

    #[test]
    fn test_top_executives_keeps_best_five() {
        let performance: Vec<ExecutivePerformance> = (1..=7)
            .map(|n| ExecutivePerformance {
                category: format!("Exec {}", n),
                count: n as f64,
            })
            .collect();

        let model = top_executives(&performance);
        assert_eq!(
            model.categories,
            vec!["Exec 7", "Exec 6", "Exec 5", "Exec 4", "Exec 3"]
        );
        assert_eq!(model.series[0].values, vec![7.0, 6.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_target_gauge_uses_latest_quarter() {
        let targets = vec![
            QuarterlyTarget { quarter: 2, accumulated_value: 10.0, achievement_percentage: 40.0 },
            QuarterlyTarget { quarter: 3, accumulated_value: 20.0, achievement_percentage: 65.5 },
            QuarterlyTarget { quarter: 1, accumulated_value: 5.0, achievement_percentage: 20.0 },
        ];

        let model = target_gauge(&targets);
        assert_pairs(&model, &[("Q3", 65.5)]);
        assert_eq!(model.tooltip_text(65.5), "65.5%");

        let empty = target_gauge(&[]);
        assert!(empty.is_empty());
        assert!(empty.is_aligned());
    }

    #[test]
    fn test_revenue_by_product_rejects_bad_quarters() {
        let with_quarter = |quarter: f64| RevenueDistribution {
            bubble_data: vec![BubbleSeries {
                product_category: "gcp-core".to_string(),
                data: vec![[1.0, 10.0, 1.0], [quarter, 20.0, 2.0]],
            }],
            year: Some(2024),
        };

        for bad in [f64::NAN, -1.0, 0.0, 5.0, f64::INFINITY] {
            assert!(
                matches!(
                    revenue_by_product(&with_quarter(bad)),
                    Err(ConfigurationError::InvalidQuarter(_))
                ),
                "quarter {} accepted",
                bad
            );
        }

        let model = revenue_by_product(&with_quarter(2.0000001)).unwrap();
        assert_eq!(model.categories, vec!["Q1", "Q2"]);
    }

    #[test]
    fn test_chart_model_json_shape() {
        let model = provincial_distribution(&ProvincialDistribution {
            provincial_data: vec![ProvincialPoint {
                province: "Quebec".to_string(),
                count: 3.0,
                avg_value: 1200.0,
            }],
        });

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["kind"], "polar_area");
        assert_eq!(json["orientation"], "vertical");
        assert_eq!(json["categories"][0], "Quebec - $1,200.00");
        assert!(json["series"][0].get("sizes").is_none());

        let back: ChartModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, model);
    }

    mod alignment {
        use super::*;
        use proptest::prelude::*;

        fn label() -> impl Strategy<Value = String> {
            prop::sample::select(vec!["Cloud", "Security", "Data", "Workspace", "AI"])
                .prop_map(str::to_string)
        }

        fn amount() -> impl Strategy<Value = f64> {
            (0u32..100_000).prop_map(f64::from)
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 128,
                failure_persistence: None,
                .. ProptestConfig::default()
            })]

            #[test]
            fn funnel_pairs_each_stage_with_its_count(
                stages in prop::collection::vec((label(), amount()), 0..12),
            ) {
                let funnel = StageFunnel {
                    stage_funnel_data: stages
                        .iter()
                        .map(|(stage, count)| StageCount { stage: stage.clone(), count: *count })
                        .collect(),
                };

                let model = stage_funnel(&funnel);
                prop_assert!(model.is_aligned());

                let mut built: Vec<(String, f64)> = model
                    .categories
                    .iter()
                    .cloned()
                    .zip(model.series[0].values.iter().copied())
                    .collect();
                prop_assert!(built.windows(2).all(|w| w[0].1 >= w[1].1));

                let mut expected = stages.clone();
                built.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
                expected.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
                prop_assert_eq!(built, expected);
            }

            #[test]
            fn heatmap_cell_holds_the_sum_for_its_pair(
                cells in prop::collection::vec((label(), label(), amount()), 0..20),
            ) {
                let heatmap = PipelineHeatmap {
                    heatmap_data: cells
                        .iter()
                        .map(|(product, forecast, value)| HeatmapCell {
                            product_category: product.clone(),
                            forecast_category: format!("F-{}", forecast),
                            value: *value,
                        })
                        .collect(),
                };

                let model = pipeline_heatmap(&heatmap);
                prop_assert!(model.is_aligned());
                for (row, product) in model.categories.iter().enumerate() {
                    for series in &model.series {
                        let expected = heatmap
                            .heatmap_data
                            .iter()
                            .filter(|c| c.product_category == *product && c.forecast_category == series.name)
                            .fold(0.0, |sum, c| sum + c.value);
                        prop_assert_eq!(series.values[row], expected);
                    }
                }
            }

            #[test]
            fn bubble_value_belongs_to_its_quarter(
                products in prop::collection::vec(
                    (label(), prop::collection::vec((1u8..=4, amount(), 0u32..50), 0..8)),
                    0..5,
                ),
            ) {
                let distribution = RevenueDistribution {
                    bubble_data: products
                        .iter()
                        .map(|(name, points)| BubbleSeries {
                            product_category: name.clone(),
                            data: points
                                .iter()
                                .map(|(q, revenue, clients)| [f64::from(*q), *revenue, f64::from(*clients)])
                                .collect(),
                        })
                        .collect(),
                    year: Some(2024),
                };

                let model = revenue_by_product(&distribution).unwrap();
                prop_assert!(model.is_aligned());
                prop_assert_eq!(model.series.len(), products.len());
                for (series, (_, points)) in model.series.iter().zip(&products) {
                    for (column, category) in model.categories.iter().enumerate() {
                        let expected = points
                            .iter()
                            .filter(|(q, _, _)| quarter_label(*q) == *category)
                            .fold(0.0, |sum, (_, revenue, _)| sum + revenue);
                        prop_assert_eq!(series.values[column], expected);
                    }
                }
            }
        }
    }
}
