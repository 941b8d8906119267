//! Flat, column-addressable view over business records.
//!
//! The filter engine never looks at concrete record types. It asks a [`Row`] for the
//! cell under a column name and compares the cell's [`CellValue::filter_key`].

use std::collections::BTreeMap;
use std::fmt;

use common::{AccountExecutive, Client, Opportunity, RevenueRecord, Signing, Win};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single scalar held by a row under one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Missing,
}

impl CellValue {
    /// The string a filter selection is matched against.
    ///
    /// Missing cells have no key, so they never contribute a distinct value and never
    /// satisfy a non-empty selection.
    pub fn filter_key(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Integer(value) => Some(value.to_string()),
            Self::Number(value) if value.is_finite() => Some(value.to_string()),
            Self::Number(_) | Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Number(value) => Some(*value),
            Self::Text(_) | Self::Missing => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Number(value) => write!(f, "{}", value),
            Self::Missing => write!(f, ""),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        value.to_f64().map(Self::Number).unwrap_or(Self::Missing)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Missing)
    }
}

/// One business record addressed by column name.
pub trait Row {
    /// Every column [`Row::cell`] can answer for, or `None` when that depends on the
    /// row itself.
    const COLUMNS: Option<&'static [&'static str]> = None;

    /// Returns the cell under `column`, or [`CellValue::Missing`] for unknown columns.
    fn cell(&self, column: &str) -> CellValue;
}

impl<R: Row + ?Sized> Row for &R {
    const COLUMNS: Option<&'static [&'static str]> = R::COLUMNS;

    fn cell(&self, column: &str) -> CellValue {
        (**self).cell(column)
    }
}

/// Untyped row for data that has no record type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DynamicRow {
    cells: BTreeMap<String, CellValue>,
}

impl DynamicRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

impl Row for DynamicRow {
    fn cell(&self, column: &str) -> CellValue {
        self.cells.get(column).cloned().unwrap_or(CellValue::Missing)
    }
}

impl<K, V> FromIterator<(K, V)> for DynamicRow
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = DynamicRow::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

impl Row for Opportunity {
    const COLUMNS: Option<&'static [&'static str]> = Some(&[
        "opportunity_id",
        "opportunity_name",
        "client_name",
        "product_name",
        "product_category",
        "forecast_category",
        "sales_stage",
        "close_date",
        "probability",
        "amount",
    ]);

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "opportunity_id" => self.opportunity_id.into(),
            "opportunity_name" => self.opportunity_name.as_str().into(),
            "client_name" => self.client_name.as_str().into(),
            "product_name" => self.product_name.as_str().into(),
            "product_category" => self.product_category.as_str().into(),
            "forecast_category" => self.forecast_category.as_str().into(),
            "sales_stage" => self.sales_stage.as_str().into(),
            "close_date" => self.close_date.map(|date| date.to_string()).into(),
            "probability" => self.probability.into(),
            "amount" => self.amount.into(),
            _ => CellValue::Missing,
        }
    }
}

impl Row for RevenueRecord {
    const COLUMNS: Option<&'static [&'static str]> = Some(&[
        "revenue_id",
        "client_name",
        "industry",
        "product_category",
        "amount",
        "fiscal_year",
        "fiscal_quarter",
    ]);

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "revenue_id" => self.revenue_id.into(),
            "client_name" => self.client_name.as_str().into(),
            "industry" => self.industry.as_str().into(),
            "product_category" => self.product_category.as_str().into(),
            "amount" => self.amount.into(),
            "fiscal_year" => self.fiscal_year.into(),
            "fiscal_quarter" => common::quarter_label(self.fiscal_quarter).into(),
            _ => CellValue::Missing,
        }
    }
}

impl Row for Signing {
    const COLUMNS: Option<&'static [&'static str]> = Some(&[
        "signing_id",
        "client_name",
        "product_name",
        "product_category",
        "total_contract_value",
        "incremental_acv",
        "start_date",
        "end_date",
        "signing_date",
        "fiscal_year",
        "fiscal_quarter",
    ]);

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "signing_id" => self.signing_id.into(),
            "client_name" => self.client_name.as_str().into(),
            "product_name" => self.product_name.as_str().into(),
            "product_category" => self.product_category.as_str().into(),
            "total_contract_value" => self.total_contract_value.into(),
            "incremental_acv" => self.incremental_acv.into(),
            "start_date" => self.start_date.map(|date| date.to_string()).into(),
            "end_date" => self.end_date.map(|date| date.to_string()).into(),
            "signing_date" => self.signing_date.map(|date| date.to_string()).into(),
            "fiscal_year" => self.fiscal_year.into(),
            "fiscal_quarter" => common::quarter_label(self.fiscal_quarter).into(),
            _ => CellValue::Missing,
        }
    }
}

impl Row for Win {
    const COLUMNS: Option<&'static [&'static str]> = Some(&[
        "win_id",
        "client_name",
        "client_industry",
        "win_level",
        "win_category",
        "win_date",
        "fiscal_year",
        "fiscal_quarter",
    ]);

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "win_id" => self.win_id.into(),
            "client_name" => self.client_name.as_str().into(),
            "client_industry" => self.client_industry.as_str().into(),
            "win_level" => self.win_level.as_str().into(),
            // Filter options are offered in the same casing the table shows.
            "win_category" => self.display_category().into(),
            "win_date" => self.win_date().into(),
            "fiscal_year" => self.fiscal_year.into(),
            "fiscal_quarter" => common::quarter_label(self.fiscal_quarter).into(),
            _ => CellValue::Missing,
        }
    }
}

impl Row for Client {
    const COLUMNS: Option<&'static [&'static str]> = Some(&[
        "client_id",
        "client_name",
        "industry",
        "location",
        "email",
        "account_executive_id",
    ]);

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "client_id" => self.client_id.into(),
            "client_name" => self.client_name.as_str().into(),
            "industry" => self.industry.as_str().into(),
            "location" => self.location.as_str().into(),
            "email" => self.email.as_str().into(),
            "account_executive_id" => self.account_executive_id.into(),
            _ => CellValue::Missing,
        }
    }
}

impl Row for AccountExecutive {
    const COLUMNS: Option<&'static [&'static str]> = Some(&[
        "user_id",
        "username",
        "full_name",
        "email",
        "first_name",
        "last_name",
        "role",
    ]);

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "user_id" => self.user_id.into(),
            "username" => self.username.as_str().into(),
            "full_name" => self.full_name().into(),
            "email" => self.email.as_str().into(),
            "first_name" => self.first_name.as_str().into(),
            "last_name" => self.last_name.as_str().into(),
            "role" => self.role.as_str().into(),
            _ => CellValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_filter_keys() {
        assert_eq!(CellValue::from("Won").filter_key(), Some("Won".to_string()));
        assert_eq!(CellValue::from(2024_i64).filter_key(), Some("2024".to_string()));
        assert_eq!(CellValue::from(0.5_f64).filter_key(), Some("0.5".to_string()));
        assert_eq!(CellValue::Number(f64::NAN).filter_key(), None);
        assert_eq!(CellValue::Missing.filter_key(), None);
        assert_eq!(CellValue::from(None::<i32>), CellValue::Missing);
    }

    #[test]
    fn test_dynamic_row_unknown_column_is_missing() {
        let row = DynamicRow::new().with("stage", "Won").with("amount", 12.5_f64);
        assert_eq!(row.cell("stage"), CellValue::Text("Won".to_string()));
        assert_eq!(row.cell("amount").as_f64(), Some(12.5));
        assert!(row.cell("nope").is_missing());
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["amount", "stage"]);
    }

    #[test]
    fn test_win_cells_use_display_values() {
        let win = Win {
            win_id: 1,
            client_name: "Acme Corp".to_string(),
            client_industry: "Retail".to_string(),
            win_level: "Gold".to_string(),
            win_category: "new logo".to_string(),
            fiscal_year: 2024,
            fiscal_quarter: 2,
        };

        assert_eq!(win.cell("win_category").filter_key(), Some("NEW LOGO".to_string()));
        assert_eq!(win.cell("win_date").filter_key(), Some("2024 Q2".to_string()));
        assert_eq!(win.cell("fiscal_quarter").filter_key(), Some("Q2".to_string()));
    }

    #[test]
    fn test_revenue_amount_is_numeric() {
        let record = RevenueRecord {
            revenue_id: None,
            client_name: "Beta Inc".to_string(),
            industry: "Finance".to_string(),
            product_category: "Cloud".to_string(),
            amount: Decimal::new(150050, 2),
            fiscal_year: 2024,
            fiscal_quarter: 1,
        };

        assert_eq!(record.cell("amount").as_f64(), Some(1500.5));
        assert!(record.cell("revenue_id").is_missing());
    }

    #[test]
    fn test_declared_columns_all_resolve() {
        let win = Win {
            win_id: 1,
            client_name: "Acme Corp".to_string(),
            client_industry: "Retail".to_string(),
            win_level: "Gold".to_string(),
            win_category: "new logo".to_string(),
            fiscal_year: 2024,
            fiscal_quarter: 2,
        };

        let columns = Win::COLUMNS.unwrap();
        assert!(columns.contains(&"win_category"));
        for column in columns {
            assert!(!win.cell(column).is_missing(), "column {}", column);
        }
        assert!(DynamicRow::COLUMNS.is_none());
        assert_eq!(<&Win as Row>::COLUMNS, Win::COLUMNS);
    }
}
