//! Client-side engine of the sales analytics dashboard.
//!
//! Everything here is plain synchronous Rust apart from the [`gateway::RowSource`]
//! seam, so it runs the same in the browser and under `cargo test`.

pub mod cards;
pub mod chart;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod loading;
pub mod row;
pub mod scope;
pub mod theme;
pub mod validation;

pub use chart::{ChartKind, ChartModel, Orientation, Series, ValueFormat};
pub use error::{ComputeError, ConfigurationError, GatewayError, Result, ValidationError};
pub use filter::{ColumnDescriptor, FilterEngine, FilterSchema};
pub use gateway::{fetch_rows, FetchContext, Fetched, Refresh, RowSource, TablePage};
pub use loading::LoadTracker;
pub use row::{CellValue, DynamicRow, Row};
pub use scope::{PageScope, Ticket};
pub use theme::Theme;

/// Reporting year used until the user picks another one.
pub const DEFAULT_YEAR: i32 = 2024;
