//! Summary cards shown above the charts on every business page.

use common::{format_percentage, quarter_label, KpiTotals, QuarterlyTarget};
use serde::{Deserialize, Serialize};

use crate::chart::ValueFormat;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
    pub caption: Option<String>,
}

/// One card per quarterly target, in quarter order: "Q1 Target", the accumulated value,
/// and "45.0% Achieved".
///
/// `title_suffix` follows the quarter label (pages use "Target").
pub fn quarterly_cards(
    targets: &[QuarterlyTarget],
    title_suffix: &str,
    value_format: ValueFormat,
) -> Vec<SummaryCard> {
    let mut ordered: Vec<&QuarterlyTarget> = targets.iter().collect();
    ordered.sort_by_key(|t| t.quarter);

    ordered
        .into_iter()
        .map(|target| SummaryCard {
            title: format!("{} {}", quarter_label(target.quarter), title_suffix),
            value: value_format.format(target.accumulated_value),
            caption: Some(format!(
                "{} Achieved",
                format_percentage(target.achievement_percentage)
            )),
        })
        .collect()
}

/// Landing page totals.
pub fn kpi_cards(totals: &KpiTotals) -> Vec<SummaryCard> {
    let card = |title: &str, value: String| SummaryCard {
        title: title.to_string(),
        value,
        caption: None,
    };

    vec![
        card("Pipeline", ValueFormat::Plain.format(totals.pipeline)),
        card("Revenue", ValueFormat::Currency.format(totals.revenue)),
        card("Signings", ValueFormat::Plain.format(totals.signings)),
        card("Wins", ValueFormat::Plain.format(totals.wins)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarterly_cards_format() {
        let targets = vec![
            QuarterlyTarget { quarter: 2, accumulated_value: 2000.0, achievement_percentage: 80.25 },
            QuarterlyTarget { quarter: 1, accumulated_value: 1000.0, achievement_percentage: 45.0 },
        ];

        let cards = quarterly_cards(&targets, "Target", ValueFormat::Currency);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Q1 Target");
        assert_eq!(cards[0].value, "$1,000.00");
        assert_eq!(cards[0].caption.as_deref(), Some("45.0% Achieved"));
        assert_eq!(cards[1].title, "Q2 Target");
    }

    #[test]
    fn test_wins_cards_show_raw_count() {
        let targets = vec![QuarterlyTarget {
            quarter: 3,
            accumulated_value: 14.0,
            achievement_percentage: 70.0,
        }];

        let cards = quarterly_cards(&targets, "Target", ValueFormat::Plain);
        assert_eq!(cards[0].value, "14");
    }

    #[test]
    fn test_kpi_cards() {
        let cards = kpi_cards(&KpiTotals {
            pipeline: 42.0,
            revenue: 2000.0,
            signings: 7.0,
            wins: 3.0,
        });

        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Pipeline", "Revenue", "Signings", "Wins"]);
        assert_eq!(cards[1].value, "$2,000.00");
        assert_eq!(cards[0].value, "42");
    }
}
