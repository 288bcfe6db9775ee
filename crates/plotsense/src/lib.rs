//! Plotsense: decide which charts a tabular dataset can meaningfully draw.
//!
//! Plotsense loads a delimited or spreadsheet file, normalizes nulls and
//! date/time text, assigns every column a semantic category and then works
//! out which columns may sit on which axis of which chart type.
//!
//! # Core Principles
//!
//! - **Classification never fails**: every column gets a category or none
//! - **Conversions fall back**: a date/time column that cannot be converted
//!   stays as it was
//! - **Validation gates rendering**: a chart plan exists only when both the
//!   attribute list and the column eligibility check pass
//!
//! # Example
//!
//! ```no_run
//! use plotsense::{ChartType, Plotsense};
//! use plotsense::validation::arity;
//!
//! let plotsense = Plotsense::new();
//! if let Some(dataset) = plotsense.load("sales.csv").unwrap() {
//!     let values = vec![None; arity(ChartType::Bar)];
//!     if let Some(plan) = plotsense.plan(&dataset.overview, ChartType::Bar, values) {
//!         for chart in &plan.charts {
//!             println!("{}", chart.title);
//!         }
//!     }
//! }
//! ```

pub mod datetime;
pub mod eligibility;
pub mod error;
pub mod facet;
pub mod inference;
pub mod input;
pub mod overview;
pub mod schema;
pub mod validation;

mod plotsense;

pub use crate::plotsense::{ChartPlan, LoadedDataset, PlannedChart, Plotsense, PlotsenseConfig};
pub use eligibility::{AxisCombination, AxisMode, ChartType, EligibilityConfig};
pub use error::{PlotsenseError, Result};
pub use facet::{FacetConfig, FacetLayout};
pub use input::{SourceMetadata, Table};
pub use overview::DatasetOverview;
pub use schema::{ColumnDescriptor, ColumnId, DataCategory, RawType};
pub use validation::{ChartConfig, ParamValue};
