//! Row cache and filter engine shared by every tabular page.
//!
//! A page declares which columns can be filtered and which column the free-text search
//! box looks at. The engine keeps the last loaded snapshot, the distinct values of each
//! declared column, and the user's staged selections. The visible view is stored as
//! indices into the snapshot, so it is always an in-order subsequence of it.

use std::collections::BTreeSet;

use tracing::{debug, instrument, trace, warn};

use crate::error::ConfigurationError;
use crate::row::Row;

/// Name and distinct values of one filterable column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Values in order of first appearance in the snapshot.
    pub distinct_values: Vec<String>,
}

impl ColumnDescriptor {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            distinct_values: Vec::new(),
        }
    }
}

/// Filterable columns plus the optional search column for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSchema {
    columns: Vec<String>,
    search_column: Option<String>,
}

impl FilterSchema {
    pub fn new<I, S>(columns: I, search_column: Option<&str>) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut declared: Vec<String> = Vec::new();
        for column in columns {
            let column = column.into();
            if declared.contains(&column) {
                return Err(ConfigurationError::DuplicateColumn(column));
            }
            declared.push(column);
        }

        Ok(Self {
            columns: declared,
            search_column: search_column.map(str::to_string),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn search_column(&self) -> Option<&str> {
        self.search_column.as_deref()
    }

    /// Checks every declared column, search column included, against the columns
    /// `R` is known to have. Rows without a fixed column list always pass.
    pub fn check_against<R: Row>(&self) -> Result<(), ConfigurationError> {
        let Some(known) = R::COLUMNS else {
            return Ok(());
        };
        self.columns
            .iter()
            .map(String::as_str)
            .chain(self.search_column())
            .find(|column| !known.contains(column))
            .map_or(Ok(()), |column| {
                Err(ConfigurationError::NoSuchColumn(column.to_string()))
            })
    }
}

/// Cached snapshot with staged column selections and a derived filtered view.
#[derive(Debug, Clone)]
pub struct FilterEngine<R> {
    schema: FilterSchema,
    rows: Vec<R>,
    descriptors: Vec<ColumnDescriptor>,
    /// Parallel to `descriptors`.
    selections: Vec<BTreeSet<String>>,
    search_term: Option<String>,
    view: Vec<usize>,
}

impl<R: Row> FilterEngine<R> {
    pub fn new(schema: FilterSchema) -> Self {
        let descriptors: Vec<ColumnDescriptor> = schema
            .columns
            .iter()
            .map(|name| ColumnDescriptor::new(name))
            .collect();
        let selections = vec![BTreeSet::new(); descriptors.len()];

        Self {
            schema,
            rows: Vec::new(),
            descriptors,
            selections,
            search_term: None,
            view: Vec::new(),
        }
    }

    pub fn schema(&self) -> &FilterSchema {
        &self.schema
    }

    /// Replaces the snapshot and recomputes every column's distinct values.
    ///
    /// The view is reset to the whole snapshot. Staged selections and the search term
    /// are kept, but are not applied until the next [`FilterEngine::apply_filters`].
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn load(&mut self, rows: Vec<R>) {
        self.rows = rows;

        for descriptor in &mut self.descriptors {
            let mut seen = BTreeSet::new();
            descriptor.distinct_values.clear();
            for row in &self.rows {
                if let Some(key) = row.cell(&descriptor.name).filter_key() {
                    if seen.insert(key.clone()) {
                        descriptor.distinct_values.push(key);
                    }
                }
            }
            trace!(
                column = %descriptor.name,
                distinct = descriptor.distinct_values.len(),
                "Recomputed distinct values"
            );
        }

        self.view = (0..self.rows.len()).collect();
        debug!("Snapshot loaded");
    }

    /// Stages adding (`included`) or removing a value from a column's selection.
    ///
    /// The view is not recomputed. Removing a value that was never selected is a no-op.
    pub fn toggle_filter_value(
        &mut self,
        column: &str,
        value: &str,
        included: bool,
    ) -> Result<(), ConfigurationError> {
        let index = self.column_index(column)?;
        let selection = &mut self.selections[index];
        if included {
            selection.insert(value.to_string());
        } else {
            selection.remove(value);
        }
        trace!(column, value, included, "Toggled filter value");
        Ok(())
    }

    /// Recomputes the view from the snapshot, the staged selections and `search_term`.
    ///
    /// A row passes when, for every column with a non-empty selection, its value is
    /// one of the selected values, and its search-column value contains the term
    /// ignoring case. An empty term places no restriction; whitespace is matched as is.
    #[instrument(skip(self))]
    pub fn apply_filters(&mut self, search_term: Option<&str>) -> Vec<&R> {
        self.search_term = search_term
            .filter(|term| !term.is_empty())
            .map(str::to_string);

        let needle = match (&self.search_term, self.schema.search_column()) {
            (Some(term), Some(_)) => Some(term.to_lowercase()),
            (Some(term), None) => {
                warn!(term = %term, "Search term ignored, no search column declared");
                None
            }
            (None, _) => None,
        };

        let active: Vec<(&str, &BTreeSet<String>)> = self
            .descriptors
            .iter()
            .zip(&self.selections)
            .filter(|(_, selection)| !selection.is_empty())
            .map(|(descriptor, selection)| (descriptor.name.as_str(), selection))
            .collect();
        let search_column = self.schema.search_column();

        self.view = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                active.iter().all(|(column, selection)| {
                    row.cell(column)
                        .filter_key()
                        .is_some_and(|key| selection.contains(&key))
                })
            })
            .filter(|(_, row)| match (&needle, search_column) {
                (Some(needle), Some(column)) => row
                    .cell(column)
                    .filter_key()
                    .is_some_and(|text| text.to_lowercase().contains(needle.as_str())),
                _ => true,
            })
            .map(|(index, _)| index)
            .collect();

        debug!(
            visible = self.view.len(),
            total = self.rows.len(),
            "Filters applied"
        );
        self.filtered_rows()
    }

    /// Empties every selection and the search term; the view becomes the snapshot.
    #[instrument(skip(self))]
    pub fn clear_filters(&mut self) -> Vec<&R> {
        for selection in &mut self.selections {
            selection.clear();
        }
        self.search_term = None;
        self.view = (0..self.rows.len()).collect();
        debug!("Filters cleared");
        self.filtered_rows()
    }

    pub fn distinct_values(&self, column: &str) -> Result<&[String], ConfigurationError> {
        let index = self.column_index(column)?;
        Ok(&self.descriptors[index].distinct_values)
    }

    pub fn descriptors(&self) -> &[ColumnDescriptor] {
        &self.descriptors
    }

    pub fn selected(&self, column: &str) -> Result<&BTreeSet<String>, ConfigurationError> {
        let index = self.column_index(column)?;
        Ok(&self.selections[index])
    }

    pub fn is_selected(&self, column: &str, value: &str) -> bool {
        self.column_index(column)
            .map(|index| self.selections[index].contains(value))
            .unwrap_or(false)
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn has_active_filters(&self) -> bool {
        self.search_term.is_some() || self.selections.iter().any(|s| !s.is_empty())
    }

    /// The unfiltered snapshot.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// The current view, in snapshot order.
    pub fn filtered_rows(&self) -> Vec<&R> {
        self.view.iter().map(|&index| &self.rows[index]).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    fn column_index(&self, column: &str) -> Result<usize, ConfigurationError> {
        self.descriptors
            .iter()
            .position(|descriptor| descriptor.name == column)
            .ok_or_else(|| ConfigurationError::UnknownColumn(column.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{CellValue, DynamicRow};
    use proptest::prelude::*;

    fn engine(columns: &[&str], search: Option<&str>) -> FilterEngine<DynamicRow> {
        FilterEngine::new(FilterSchema::new(columns.iter().copied(), search).unwrap())
    }

    fn stage_cat(stage: &str, cat: &str) -> DynamicRow {
        DynamicRow::new().with("stage", stage).with("cat", cat)
    }

    fn position_in<'a>(rows: &'a [DynamicRow], row: &DynamicRow) -> Option<usize> {
        rows.iter().position(|candidate| std::ptr::eq(candidate, row))
    }

    #[test]
    fn test_schema_rejects_duplicate_columns() {
        let err = FilterSchema::new(["stage", "cat", "stage"], None).unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateColumn("stage".to_string()));
    }

    #[test]
    fn test_unknown_column_is_configuration_error() {
        let mut engine = engine(&["stage"], None);
        assert_eq!(
            engine.toggle_filter_value("region", "EU", true),
            Err(ConfigurationError::UnknownColumn("region".to_string()))
        );
        assert!(engine.distinct_values("region").is_err());
        assert!(engine.selected("region").is_err());
        assert!(!engine.is_selected("region", "EU"));
    }

    #[test]
    fn test_multi_column_and() {
        let mut engine = engine(&["stage", "cat"], None);
        engine.load(vec![
            stage_cat("Won", "A"),
            stage_cat("Won", "B"),
            stage_cat("Lost", "A"),
        ]);

        engine.toggle_filter_value("stage", "Won", true).unwrap();
        engine.toggle_filter_value("cat", "A", true).unwrap();
        let view = engine.apply_filters(None);

        assert_eq!(view.len(), 1);
        assert_eq!(view[0], &stage_cat("Won", "A"));
    }

    #[test]
    fn test_values_within_one_column_are_ored() {
        let mut engine = engine(&["stage"], None);
        engine.load(vec![
            stage_cat("Won", "A"),
            stage_cat("Open", "B"),
            stage_cat("Lost", "A"),
        ]);

        engine.toggle_filter_value("stage", "Won", true).unwrap();
        engine.toggle_filter_value("stage", "Lost", true).unwrap();
        let stages: Vec<CellValue> = engine
            .apply_filters(None)
            .into_iter()
            .map(|row| row.cell("stage"))
            .collect();

        assert_eq!(stages, vec![CellValue::from("Won"), CellValue::from("Lost")]);
    }

    #[test]
    fn test_search_term_is_case_insensitive_substring() {
        let mut engine = engine(&[], Some("name"));
        engine.load(vec![
            DynamicRow::new().with("name", "Acme Corp"),
            DynamicRow::new().with("name", "Beta Inc"),
        ]);

        let view = engine.apply_filters(Some("acme"));
        assert_eq!(view, vec![&DynamicRow::new().with("name", "Acme Corp")]);
        assert_eq!(engine.search_term(), Some("acme"));
    }

    #[test]
    fn test_empty_search_term_is_no_restriction() {
        let mut engine = engine(&[], Some("name"));
        engine.load(vec![
            DynamicRow::new().with("name", "Acme Corp"),
            DynamicRow::new().with("name", "Beta Inc"),
        ]);

        assert_eq!(engine.apply_filters(Some("")).len(), 2);
        assert_eq!(engine.search_term(), None);
        assert!(!engine.has_active_filters());
    }

    #[test]
    fn test_whitespace_search_term_is_matched_literally() {
        let mut engine = engine(&[], Some("name"));
        engine.load(vec![
            DynamicRow::new().with("name", "Acme Corp"),
            DynamicRow::new().with("name", "BetaInc"),
        ]);

        let view = engine.apply_filters(Some(" "));
        assert_eq!(view, vec![&DynamicRow::new().with("name", "Acme Corp")]);
        assert_eq!(engine.search_term(), Some(" "));
        assert!(engine.has_active_filters());
    }

    #[test]
    fn test_schema_checked_against_record_columns() {
        use common::Opportunity;

        let schema = FilterSchema::new(["sales_stage", "forecast_category"], Some("client_name")).unwrap();
        assert_eq!(schema.check_against::<Opportunity>(), Ok(()));

        let typo = FilterSchema::new(["sales_stgae"], Some("client_name")).unwrap();
        assert_eq!(
            typo.check_against::<Opportunity>(),
            Err(ConfigurationError::NoSuchColumn("sales_stgae".to_string()))
        );

        let bad_search = FilterSchema::new(["sales_stage"], Some("client")).unwrap();
        assert_eq!(
            bad_search.check_against::<Opportunity>(),
            Err(ConfigurationError::NoSuchColumn("client".to_string()))
        );

        assert_eq!(typo.check_against::<DynamicRow>(), Ok(()));
    }

    #[test]
    fn test_search_term_without_search_column_is_ignored() {
        let mut engine = engine(&["stage"], None);
        engine.load(vec![stage_cat("Won", "A"), stage_cat("Lost", "B")]);

        assert_eq!(engine.apply_filters(Some("won")).len(), 2);
    }

    #[test]
    fn test_reload_resets_view_until_reapplied() {
        let mut engine = engine(&["stage"], None);
        engine.load(vec![stage_cat("Won", "A"), stage_cat("Lost", "B")]);
        engine.toggle_filter_value("stage", "Won", true).unwrap();
        assert_eq!(engine.apply_filters(None).len(), 1);

        let reloaded = vec![
            stage_cat("Lost", "C"),
            stage_cat("Won", "D"),
            stage_cat("Open", "E"),
        ];
        engine.load(reloaded.clone());
        assert_eq!(engine.filtered_len(), 3);
        assert_eq!(engine.filtered_rows(), reloaded.iter().collect::<Vec<_>>());

        // The staged selection survives the reload and narrows once applied again.
        assert!(engine.is_selected("stage", "Won"));
        assert_eq!(engine.apply_filters(None), vec![&stage_cat("Won", "D")]);
    }

    #[test]
    fn test_missing_cells_never_match_a_selection() {
        let mut engine = engine(&["stage"], None);
        engine.load(vec![
            stage_cat("Won", "A"),
            DynamicRow::new().with("cat", "B"),
        ]);

        assert_eq!(engine.distinct_values("stage").unwrap(), ["Won".to_string()]);
        engine.toggle_filter_value("stage", "Won", true).unwrap();
        assert_eq!(engine.apply_filters(None).len(), 1);
    }

    #[test]
    fn test_toggle_off_and_clear() {
        let mut engine = engine(&["stage"], Some("cat"));
        engine.load(vec![stage_cat("Won", "A"), stage_cat("Lost", "B")]);

        engine.toggle_filter_value("stage", "Won", true).unwrap();
        engine.toggle_filter_value("stage", "Won", false).unwrap();
        engine.toggle_filter_value("stage", "Never", false).unwrap();
        assert!(engine.selected("stage").unwrap().is_empty());

        engine.toggle_filter_value("stage", "Lost", true).unwrap();
        engine.apply_filters(Some("b"));
        assert!(engine.has_active_filters());

        let cleared = engine.clear_filters();
        assert_eq!(cleared.len(), 2);
        assert!(!engine.has_active_filters());
        assert_eq!(engine.search_term(), None);
    }

    fn arb_row() -> impl Strategy<Value = DynamicRow> {
        (
            prop::option::of(prop::sample::select(vec!["Won", "Lost", "Open"])),
            prop::option::of(prop::sample::select(vec!["A", "B", "C", "D"])),
            prop::sample::select(vec!["Acme Corp", "Beta Inc", "acme labs", "Gamma"]),
        )
            .prop_map(|(stage, cat, name)| {
                let mut row = DynamicRow::new().with("name", name);
                if let Some(stage) = stage {
                    row.insert("stage", stage);
                }
                if let Some(cat) = cat {
                    row.insert("cat", cat);
                }
                row
            })
    }

    fn arb_toggles() -> impl Strategy<Value = Vec<(&'static str, &'static str, bool)>> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["stage", "cat"]),
                prop::sample::select(vec!["Won", "Lost", "Open", "A", "B", "C", "D"]),
                any::<bool>(),
            ),
            0..8,
        )
    }

    fn arb_term() -> impl Strategy<Value = Option<&'static str>> {
        prop::option::of(prop::sample::select(vec!["acme", "INC", "", "zzz", "a"]))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            failure_persistence: None,
            .. ProptestConfig::default()
        })]

        #[test]
        fn distinct_values_are_first_seen_and_unique(rows in prop::collection::vec(arb_row(), 0..40)) {
            let mut engine = engine(&["stage", "cat"], Some("name"));
            engine.load(rows.clone());

            for column in ["stage", "cat"] {
                let mut expected: Vec<String> = Vec::new();
                for row in &rows {
                    if let Some(key) = row.cell(column).filter_key() {
                        if !expected.contains(&key) {
                            expected.push(key);
                        }
                    }
                }
                prop_assert_eq!(engine.distinct_values(column).unwrap(), expected.as_slice());
            }
        }

        #[test]
        fn apply_filters_is_idempotent(
            rows in prop::collection::vec(arb_row(), 0..40),
            toggles in arb_toggles(),
            term in arb_term(),
        ) {
            let mut engine = engine(&["stage", "cat"], Some("name"));
            engine.load(rows);
            for (column, value, included) in toggles {
                engine.toggle_filter_value(column, value, included).unwrap();
            }

            let first: Vec<DynamicRow> = engine.apply_filters(term).into_iter().cloned().collect();
            let second: Vec<DynamicRow> = engine.apply_filters(term).into_iter().cloned().collect();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn view_is_an_ordered_subsequence_of_the_snapshot(
            rows in prop::collection::vec(arb_row(), 0..40),
            toggles in arb_toggles(),
            term in arb_term(),
        ) {
            let mut engine = engine(&["stage", "cat"], Some("name"));
            engine.load(rows);
            for (column, value, included) in toggles {
                engine.toggle_filter_value(column, value, included).unwrap();
            }

            engine.apply_filters(term);
            let mut last: Option<usize> = None;
            for row in engine.filtered_rows() {
                let position = position_in(engine.rows(), row);
                prop_assert!(position.is_some(), "view row is not a snapshot row");
                prop_assert!(last < position, "view order differs from snapshot order");
                last = position;
            }
        }

        #[test]
        fn empty_selection_returns_whole_snapshot(rows in prop::collection::vec(arb_row(), 0..40)) {
            let mut engine = engine(&["stage", "cat"], Some("name"));
            engine.load(rows.clone());

            let view: Vec<DynamicRow> = engine.apply_filters(None).into_iter().cloned().collect();
            prop_assert_eq!(view, rows);
        }

        #[test]
        fn load_then_clear_returns_loaded_rows(
            before in prop::collection::vec(arb_row(), 0..20),
            rows in prop::collection::vec(arb_row(), 0..40),
            toggles in arb_toggles(),
            term in arb_term(),
        ) {
            let mut engine = engine(&["stage", "cat"], Some("name"));
            engine.load(before);
            for (column, value, included) in toggles {
                engine.toggle_filter_value(column, value, included).unwrap();
            }
            engine.apply_filters(term);

            engine.load(rows.clone());
            let cleared: Vec<DynamicRow> = engine.clear_filters().into_iter().cloned().collect();
            prop_assert_eq!(cleared, rows);
        }
    }
}
