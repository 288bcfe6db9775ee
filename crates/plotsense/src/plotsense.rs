//! Main Plotsense struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::eligibility::{axis_candidates, enumerate, AxisCombination, ChartType, EligibilityConfig};
use crate::error::Result;
use crate::facet::{plan_facets, FacetConfig, FacetLayout, FacetPlan};
use crate::input::{Parser, ParserConfig, SourceMetadata, Table};
use crate::overview::DatasetOverview;
use crate::schema::ColumnId;
use crate::validation::{collect_attributes, invalid_attributes, ChartConfig, ParamValue};

/// Configuration for Plotsense.
#[derive(Debug, Clone, Default)]
pub struct PlotsenseConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Candidate-list configuration.
    pub eligibility: EligibilityConfig,
    /// Facet grid configuration.
    pub facet: FacetConfig,
}

impl PlotsenseConfig {
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_eligibility(mut self, eligibility: EligibilityConfig) -> Self {
        self.eligibility = eligibility;
        self
    }

    pub fn with_facet(mut self, facet: FacetConfig) -> Self {
        self.facet = facet;
        self
    }
}

/// A loaded file with its normalized, classified overview.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub source: SourceMetadata,
    pub overview: DatasetOverview,
}

/// One chart to render and its title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedChart {
    pub combination: AxisCombination,
    pub title: String,
}

/// Everything the renderer needs to draw one chart request.
#[derive(Debug, Clone)]
pub struct ChartPlan {
    pub chart_type: ChartType,
    pub config: ChartConfig,
    pub charts: Vec<PlannedChart>,
    /// Categorical columns too varied to plot directly.
    pub high_cardinal: Vec<String>,
    /// Facet partitions, one per faceted column, for facet charts.
    pub facets: Vec<FacetPlan>,
}

impl ChartPlan {
    /// Facet grid layouts in facet-column order.
    pub fn facet_layouts(&self) -> Vec<&FacetLayout> {
        self.facets.iter().map(|f| &f.layout).collect()
    }
}

/// The main Plotsense engine.
pub struct Plotsense {
    config: PlotsenseConfig,
    parser: Parser,
}

impl Plotsense {
    /// Create a new Plotsense instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(PlotsenseConfig::default())
    }

    /// Create a Plotsense instance with custom configuration.
    pub fn with_config(config: PlotsenseConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &PlotsenseConfig {
        &self.config
    }

    /// Load a file and build its overview.
    ///
    /// Returns `Ok(None)` for missing files and unsupported extensions.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Option<LoadedDataset>> {
        let Some((table, source)) = self.parser.load(path)? else {
            return Ok(None);
        };

        Ok(Some(LoadedDataset {
            source,
            overview: self.overview(table),
        }))
    }

    /// Normalize and classify an in-memory table.
    pub fn overview(&self, table: Table) -> DatasetOverview {
        DatasetOverview::new(table)
    }

    /// Validate a chart request and plan what to draw.
    ///
    /// `values` is the chart's positional attribute list. Returns `None`
    /// when the list is rejected or no column combination is eligible.
    pub fn plan(
        &self,
        overview: &DatasetOverview,
        chart: ChartType,
        values: Vec<Option<ParamValue>>,
    ) -> Option<ChartPlan> {
        let attributes = collect_attributes(chart, values)?;
        let invalid = invalid_attributes(&attributes);
        if !invalid.is_empty() {
            warn!(chart = %chart, ?invalid, "chart rejected: invalid attributes");
            return None;
        }
        let config = ChartConfig::from_attributes(&attributes);

        let candidates = axis_candidates(overview, chart, self.config.eligibility.cardinality_threshold);
        let combinations = enumerate(chart, &candidates, config.axis_mode, config.hue);
        if combinations.is_empty() {
            warn!(chart = %chart, "chart rejected: no eligible columns");
            return None;
        }

        let facets = if chart == ChartType::Facet {
            self.plan_facet_columns(overview, &config, &combinations)
        } else {
            Vec::new()
        };

        let charts: Vec<PlannedChart> = combinations
            .into_iter()
            .map(|combination| PlannedChart {
                title: config.title_for(&combination),
                combination,
            })
            .collect();

        debug!(chart = %chart, charts = charts.len(), facets = facets.len(), "chart planned");

        Some(ChartPlan {
            chart_type: chart,
            high_cardinal: candidates.high_cardinal.into_iter().map(|c| c.name).collect(),
            config,
            charts,
            facets,
        })
    }

    fn plan_facet_columns(
        &self,
        overview: &DatasetOverview,
        config: &ChartConfig,
        combinations: &[AxisCombination],
    ) -> Vec<FacetPlan> {
        let facet_config = self
            .config
            .facet
            .clone()
            .with_bars_per_facet(config.bars_per_facet)
            .with_figure_size(config.figure_width, config.figure_height);

        let mut seen: Vec<ColumnId> = Vec::new();
        let mut plans = Vec::new();
        for combination in combinations {
            let id = combination.x.id;
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            if let Some(plan) = plan_facets(overview.table(), id.0, &facet_config) {
                plans.push(plan);
            }
        }
        plans
    }
}

impl Default for Plotsense {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Column;
    use crate::validation::arity;

    fn sales() -> DatasetOverview {
        DatasetOverview::new(Table::new(vec![
            Column::text("region", ["north", "south", "north", "east", "south", "north"]),
            Column::float("revenue", [10.5, 20.25, 12.0, 8.75, 19.5, 11.0]),
            Column::text("store", (0..6).map(|i| format!("store_{i}"))),
        ]))
    }

    #[test]
    fn test_plan_bar_single_axis() {
        let plotsense = Plotsense::new();
        let plan = plotsense
            .plan(&sales(), ChartType::Bar, vec![None; arity(ChartType::Bar)])
            .unwrap();

        let titles: Vec<&str> = plan.charts.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["'region' Bar Chart", "'store' Bar Chart"]);
        assert!(plan.charts.iter().all(|c| c.combination.y.is_none()));
        assert!(plan.facets.is_empty());
    }

    #[test]
    fn test_plan_rejects_invalid_attributes() {
        let plotsense = Plotsense::new();
        let mut values = vec![None; arity(ChartType::Line)];
        values[5] = Some(ParamValue::from("diagonal"));
        assert!(plotsense.plan(&sales(), ChartType::Line, values).is_none());
        assert!(plotsense.plan(&sales(), ChartType::Line, vec![None; 3]).is_none());
    }

    #[test]
    fn test_plan_rejects_without_eligible_columns() {
        let plotsense = Plotsense::new();
        let values = vec![None; arity(ChartType::Facet)];
        assert!(plotsense.plan(&sales(), ChartType::Facet, values).is_none());
    }

    #[test]
    fn test_plan_facet_chart() {
        let overview = DatasetOverview::new(Table::new(vec![
            Column::text("city", (0..40).map(|i| format!("city_{i}"))),
            Column::float("rainfall", (0..40).map(|i| i as f64 * 1.5)),
        ]));

        let plotsense = Plotsense::new();
        let plan = plotsense
            .plan(&overview, ChartType::Facet, vec![None; arity(ChartType::Facet)])
            .unwrap();

        assert_eq!(plan.high_cardinal, vec!["city"]);
        assert_eq!(plan.charts[0].title, "'rainfall' / 'city' Facet Chart");
        let layouts = plan.facet_layouts();
        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].group_sizes, vec![10; 4]);
        assert_eq!((layouts[0].rows, layouts[0].columns), (1, 4));
    }

    #[test]
    fn test_plan_facets_each_column_sharing_a_name() {
        let overview = DatasetOverview::new(Table::new(vec![
            Column::text("city", (0..40).map(|i| format!("city_{i}"))),
            Column::text("city", (0..40).map(|i| format!("town_{i}"))),
            Column::float("rainfall", (0..40).map(|i| i as f64 * 1.5)),
        ]));

        let plan = Plotsense::new()
            .plan(&overview, ChartType::Facet, vec![None; arity(ChartType::Facet)])
            .unwrap();

        assert_eq!(plan.facets.len(), 2);
        assert_eq!(
            plan.facets[1].frames[0].table.column_at(1).unwrap().data.display_value(0).as_deref(),
            Some("town_0")
        );
        assert!(plan.facet_layouts().iter().all(|l| l.variable == "city"));
    }
}
