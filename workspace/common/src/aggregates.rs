//! Pre-aggregated payloads consumed by cards and charts.

use serde::{Deserialize, Serialize};

// ===================== Totals =====================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RevenueSum {
    pub revenue_sum: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PipelineCount {
    pub pipeline_count: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SigningsCount {
    pub signings_count: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WinsCount {
    pub wins_count: f64,
}

/// The four landing-page totals, assembled from the single-field endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct KpiTotals {
    pub pipeline: f64,
    pub revenue: f64,
    pub signings: f64,
    pub wins: f64,
}

// ===================== Quarterly targets =====================

/// Accumulated value and achievement for one fiscal quarter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuarterlyTarget {
    pub quarter: u8,
    pub accumulated_value: f64,
    pub achievement_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QuarterlyTargets {
    #[serde(default)]
    pub quarterly_targets: Vec<QuarterlyTarget>,
}

// ===================== Pipeline =====================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageCount {
    pub stage: String,
    pub count: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StageFunnel {
    #[serde(default)]
    pub stage_funnel_data: Vec<StageCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapCell {
    pub product_category: String,
    pub forecast_category: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PipelineHeatmap {
    #[serde(default)]
    pub heatmap_data: Vec<HeatmapCell>,
}

// ===================== Revenue =====================

/// Per product category: `[quarter, revenue, client_count]` triples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BubbleSeries {
    pub product_category: String,
    pub data: Vec<[f64; 3]>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RevenueDistribution {
    #[serde(default)]
    pub bubble_data: Vec<BubbleSeries>,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndustryRevenue {
    pub industry: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IndustryRevenueChart {
    #[serde(default)]
    pub industry_data: Vec<IndustryRevenue>,
    #[serde(default)]
    pub quarters: Vec<u8>,
}

// ===================== Signings =====================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndustryAcv {
    pub industry: String,
    pub incremental_acv: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IndustryAcvChart {
    #[serde(default)]
    pub industry_acv_data: Vec<IndustryAcv>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProvincialPoint {
    pub province: String,
    pub count: f64,
    pub avg_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProvincialDistribution {
    #[serde(default)]
    pub provincial_data: Vec<ProvincialPoint>,
}

// ===================== Wins =====================

/// A named series of values, one per category of the enclosing chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WinsCategoryDistribution {
    #[serde(default)]
    pub series: Vec<NamedSeries>,
    #[serde(default)]
    pub quarters: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WinEvolutionPoint {
    pub quarter: u8,
    pub win_count: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WinsEvolution {
    #[serde(default)]
    pub win_evolution: Vec<WinEvolutionPoint>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

// ===================== Clients =====================

/// Treemap rectangle: industry label with client count as size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreemapPoint {
    pub x: String,
    pub y: f64,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub client_count: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IndustryTreemap {
    #[serde(default)]
    pub treemap_data: Vec<TreemapPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProvincePie {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub series: Vec<f64>,
}

// ===================== Account executives =====================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutivePerformance {
    pub category: String,
    pub count: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wins_evolution_deserialization() {
        let json = r#"{
            "win_evolution": [
                {"quarter": 1, "win_count": 4.5},
                {"quarter": 2, "win_count": 7.0},
                {"quarter": 3, "win_count": 9.5},
                {"quarter": 4, "win_count": 12.0}
            ],
            "categories": ["Q1", "Q2", "Q3", "Q4"],
            "year": 2024
        }"#;

        let evolution: WinsEvolution = serde_json::from_str(json).unwrap();
        assert_eq!(evolution.win_evolution.len(), 4);
        assert_eq!(evolution.categories[3], "Q4");
        assert_eq!(evolution.year, Some(2024));
    }

    #[test]
    fn test_revenue_distribution_triples() {
        let json = r#"{
            "bubble_data": [
                {"product_category": "gcp-core", "data": [[1, 75000, 12], [2, 85000, 14]]}
            ],
            "year": 2024
        }"#;

        let distribution: RevenueDistribution = serde_json::from_str(json).unwrap();
        let series = &distribution.bubble_data[0];
        assert_eq!(series.product_category, "gcp-core");
        assert_eq!(series.data[1], [2.0, 85000.0, 14.0]);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let targets: QuarterlyTargets = serde_json::from_str("{}").unwrap();
        assert!(targets.quarterly_targets.is_empty());

        let heatmap: PipelineHeatmap = serde_json::from_str("{}").unwrap();
        assert!(heatmap.heatmap_data.is_empty());
    }
}
