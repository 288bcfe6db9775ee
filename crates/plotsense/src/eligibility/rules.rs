//! Chart types and the axis rules that decide which columns they accept.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::schema::{ColumnDescriptor, DataCategory};

/// Categorical columns at or below this many distinct values are plotted directly.
pub const DEFAULT_CARDINALITY_THRESHOLD: usize = 30;

/// Selectable chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartType {
    Line,
    Scatter,
    Bar,
    Box,
    Pie,
    Histogram,
    MultiLine,
    MultiScatter,
    MultiBar,
    Facet,
}

impl ChartType {
    /// Every chart type, in menu order.
    pub const ALL: [ChartType; 10] = [
        ChartType::Line,
        ChartType::Scatter,
        ChartType::Bar,
        ChartType::Box,
        ChartType::Pie,
        ChartType::Histogram,
        ChartType::MultiLine,
        ChartType::MultiScatter,
        ChartType::MultiBar,
        ChartType::Facet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChartType::Line => "Line",
            ChartType::Scatter => "Scatter",
            ChartType::Bar => "Bar",
            ChartType::Box => "Box",
            ChartType::Pie => "Pie",
            ChartType::Histogram => "Histogram",
            ChartType::MultiLine => "MultiLine",
            ChartType::MultiScatter => "MultiScatter",
            ChartType::MultiBar => "MultiBar",
            ChartType::Facet => "Facet",
        }
    }

    /// Axis rules of this chart type.
    pub fn axis_rules(&self) -> &'static [AxisRule] {
        match self {
            ChartType::Line => LINE_RULES,
            ChartType::Scatter => SCATTER_RULES,
            ChartType::Bar => BAR_RULES,
            ChartType::Box => BOX_RULES,
            ChartType::Pie => PIE_RULES,
            ChartType::Histogram => HISTOGRAM_RULES,
            ChartType::MultiLine => MULTI_LINE_RULES,
            ChartType::MultiScatter => MULTI_SCATTER_RULES,
            ChartType::MultiBar => MULTI_BAR_RULES,
            ChartType::Facet => FACET_RULES,
        }
    }

    /// Rule for one axis, if the chart uses it.
    pub fn rule_for(&self, axis: Axis) -> Option<&'static AxisRule> {
        self.axis_rules().iter().find(|r| r.axis == axis)
    }

    /// Whether high-cardinality categorical columns are reported for this
    /// chart, so they can be redirected to a facet plot.
    pub fn reports_high_cardinal(&self) -> bool {
        matches!(
            self,
            ChartType::Bar | ChartType::Box | ChartType::MultiBar | ChartType::Facet
        )
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ChartType::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown chart type '{}'", s))
    }
}

/// Plot axis. `Z` is the hue/colour dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Distinct-value constraint applied on top of the category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Any,
    /// At most the threshold.
    Plottable,
    /// Strictly above the threshold.
    High,
}

impl Cardinality {
    pub fn admits(&self, unique_count: usize, threshold: usize) -> bool {
        match self {
            Cardinality::Any => true,
            Cardinality::Plottable => unique_count <= threshold,
            Cardinality::High => unique_count > threshold,
        }
    }
}

/// Which columns may fill one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRule {
    pub axis: Axis,
    pub categories: &'static [DataCategory],
    pub cardinality: Cardinality,
}

impl AxisRule {
    /// Check a classified column against this rule.
    pub fn accepts(&self, descriptor: &ColumnDescriptor, threshold: usize) -> bool {
        descriptor
            .category
            .is_some_and(|c| self.categories.contains(&c))
            && self.cardinality.admits(descriptor.unique_count, threshold)
    }
}

const CATEGORICAL: &[DataCategory] = &[
    DataCategory::Nominal,
    DataCategory::NominalBinary,
    DataCategory::Ordinal,
];
const CONTINUOUS: &[DataCategory] = &[DataCategory::Continuous];
const QUANTITATIVE: &[DataCategory] = &[DataCategory::Continuous, DataCategory::Discrete];
const TEMPORAL_OR_CONTINUOUS: &[DataCategory] = &[
    DataCategory::Date,
    DataCategory::Time,
    DataCategory::Continuous,
];

const fn rule(axis: Axis, categories: &'static [DataCategory], cardinality: Cardinality) -> AxisRule {
    AxisRule {
        axis,
        categories,
        cardinality,
    }
}

const LINE_RULES: &[AxisRule] = &[
    rule(Axis::X, TEMPORAL_OR_CONTINUOUS, Cardinality::Any),
    rule(Axis::Y, CONTINUOUS, Cardinality::Any),
];

const SCATTER_RULES: &[AxisRule] = &[
    rule(Axis::X, CONTINUOUS, Cardinality::Any),
    rule(Axis::Y, CONTINUOUS, Cardinality::Any),
];

const BAR_RULES: &[AxisRule] = &[
    rule(Axis::X, CATEGORICAL, Cardinality::Plottable),
    rule(Axis::Y, QUANTITATIVE, Cardinality::Any),
];

const BOX_RULES: &[AxisRule] = &[
    rule(Axis::X, CATEGORICAL, Cardinality::Plottable),
    rule(Axis::Y, CONTINUOUS, Cardinality::Any),
    rule(Axis::Z, CATEGORICAL, Cardinality::Plottable),
];

const PIE_RULES: &[AxisRule] = &[rule(Axis::X, CATEGORICAL, Cardinality::Plottable)];

const HISTOGRAM_RULES: &[AxisRule] = &[rule(Axis::X, QUANTITATIVE, Cardinality::Any)];

const MULTI_LINE_RULES: &[AxisRule] = &[
    rule(Axis::X, TEMPORAL_OR_CONTINUOUS, Cardinality::Any),
    rule(Axis::Y, CONTINUOUS, Cardinality::Any),
    rule(Axis::Z, CATEGORICAL, Cardinality::Plottable),
];

const MULTI_SCATTER_RULES: &[AxisRule] = &[
    rule(Axis::X, CONTINUOUS, Cardinality::Any),
    rule(Axis::Y, CONTINUOUS, Cardinality::Any),
    rule(Axis::Z, CATEGORICAL, Cardinality::Plottable),
];

const MULTI_BAR_RULES: &[AxisRule] = &[
    rule(Axis::X, CATEGORICAL, Cardinality::Plottable),
    rule(Axis::Y, QUANTITATIVE, Cardinality::Any),
    rule(Axis::Z, CATEGORICAL, Cardinality::Plottable),
];

const FACET_RULES: &[AxisRule] = &[
    rule(Axis::X, CATEGORICAL, Cardinality::High),
    rule(Axis::Y, QUANTITATIVE, Cardinality::Any),
];
