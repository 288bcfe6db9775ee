//! Candidate lists per axis and enumeration of plottable column combinations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rules::{Axis, AxisRule, Cardinality, ChartType};
use crate::overview::DatasetOverview;
use crate::schema::ColumnId;

/// A column picked for an axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisColumn {
    pub id: ColumnId,
    pub name: String,
}

/// Columns eligible for each axis of one chart type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisCandidates {
    pub x: Vec<AxisColumn>,
    pub y: Vec<AxisColumn>,
    pub z: Vec<AxisColumn>,
    /// Categorical columns too varied to plot directly; facet-plot candidates.
    pub high_cardinal: Vec<AxisColumn>,
}

impl AxisCandidates {
    pub fn axis(&self, axis: Axis) -> &[AxisColumn] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

/// Whether a chart with an optional second value axis shows counts only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisMode {
    /// Count/frequency plot over the categorical axis.
    Single,
    /// Categorical axis against a value axis.
    Dual,
}

impl AxisMode {
    /// Read the `single_axes` toggle: `on` or unset is single, `off` is dual.
    pub fn from_toggle(single_axes: Option<&str>) -> Self {
        match single_axes {
            Some("off") => AxisMode::Dual,
            _ => AxisMode::Single,
        }
    }
}

/// One chart to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisCombination {
    pub x: AxisColumn,
    pub y: Option<AxisColumn>,
    pub z: Option<AxisColumn>,
}

impl AxisCombination {
    fn columns(&self) -> impl Iterator<Item = &AxisColumn> {
        std::iter::once(&self.x).chain(self.y.as_ref()).chain(self.z.as_ref())
    }

    /// True when two axes resolve to the same column.
    pub fn is_degenerate(&self) -> bool {
        let ids: Vec<ColumnId> = self.columns().map(|c| c.id).collect();
        ids.iter()
            .enumerate()
            .any(|(i, id)| ids[i + 1..].contains(id))
    }
}

/// Filter the overview's columns into per-axis candidate lists.
pub fn axis_candidates(overview: &DatasetOverview, chart: ChartType, threshold: usize) -> AxisCandidates {
    let pick = |rule: &AxisRule| -> Vec<AxisColumn> {
        overview
            .descriptors()
            .iter()
            .filter(|(_, d)| rule.accepts(d, threshold))
            .map(|(id, d)| AxisColumn {
                id: *id,
                name: d.name.clone(),
            })
            .collect()
    };

    let mut candidates = AxisCandidates::default();
    for rule in chart.axis_rules() {
        let columns = pick(rule);
        match rule.axis {
            Axis::X => candidates.x = columns,
            Axis::Y => candidates.y = columns,
            Axis::Z => candidates.z = columns,
        }
    }

    if chart.reports_high_cardinal() {
        candidates.high_cardinal = match chart.rule_for(Axis::X) {
            Some(x_rule) => pick(&AxisRule {
                cardinality: Cardinality::High,
                ..*x_rule
            }),
            None => Vec::new(),
        };
    }

    debug!(
        chart = %chart,
        x = candidates.x.len(),
        y = candidates.y.len(),
        z = candidates.z.len(),
        high_cardinal = candidates.high_cardinal.len(),
        "axis candidates"
    );
    candidates
}

/// Enumerate every non-degenerate combination for a chart.
///
/// `mode` applies to Bar and MultiBar; `hue` enables the z axis of Box.
pub fn enumerate(
    chart: ChartType,
    candidates: &AxisCandidates,
    mode: AxisMode,
    hue: bool,
) -> Vec<AxisCombination> {
    let layout: &[Axis] = match chart {
        ChartType::Pie | ChartType::Histogram => &[Axis::X],
        ChartType::Line | ChartType::Scatter | ChartType::Facet => &[Axis::X, Axis::Y],
        ChartType::MultiLine | ChartType::MultiScatter => &[Axis::X, Axis::Y, Axis::Z],
        ChartType::Bar => match mode {
            AxisMode::Single => &[Axis::X],
            AxisMode::Dual => &[Axis::X, Axis::Y],
        },
        ChartType::MultiBar => match mode {
            AxisMode::Single => &[Axis::X, Axis::Z],
            AxisMode::Dual => &[Axis::X, Axis::Y, Axis::Z],
        },
        ChartType::Box if hue => &[Axis::X, Axis::Y, Axis::Z],
        ChartType::Box => &[Axis::X, Axis::Y],
    };

    let uses = |axis: Axis| layout.contains(&axis);
    let optional = |axis: Axis| {
        if uses(axis) {
            candidates.axis(axis).iter().map(Some).collect::<Vec<_>>()
        } else {
            vec![None]
        }
    };
    let ys = optional(Axis::Y);
    let zs = optional(Axis::Z);

    let mut combinations = Vec::new();
    for x in &candidates.x {
        for y in &ys {
            for z in &zs {
                let combination = AxisCombination {
                    x: x.clone(),
                    y: y.cloned(),
                    z: z.cloned(),
                };
                if !combination.is_degenerate() {
                    combinations.push(combination);
                }
            }
        }
    }

    debug!(chart = %chart, count = combinations.len(), "enumerated combinations");
    combinations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(id: usize, name: &str) -> AxisColumn {
        AxisColumn {
            id: ColumnId(id),
            name: name.to_string(),
        }
    }

    fn candidates() -> AxisCandidates {
        AxisCandidates {
            x: vec![col(0, "a"), col(1, "b")],
            y: vec![col(2, "v"), col(3, "w")],
            z: vec![col(0, "a"), col(1, "b")],
            high_cardinal: vec![],
        }
    }

    #[test]
    fn test_axis_mode_from_toggle() {
        assert_eq!(AxisMode::from_toggle(None), AxisMode::Single);
        assert_eq!(AxisMode::from_toggle(Some("on")), AxisMode::Single);
        assert_eq!(AxisMode::from_toggle(Some("off")), AxisMode::Dual);
    }

    #[test]
    fn test_degenerate_detection() {
        let same = AxisCombination {
            x: col(0, "a"),
            y: None,
            z: Some(col(0, "a")),
        };
        assert!(same.is_degenerate());

        let distinct = AxisCombination {
            x: col(0, "a"),
            y: Some(col(2, "v")),
            z: Some(col(1, "b")),
        };
        assert!(!distinct.is_degenerate());
    }

    #[test]
    fn test_bar_single_and_dual() {
        let c = candidates();
        let single = enumerate(ChartType::Bar, &c, AxisMode::Single, false);
        assert_eq!(single.len(), 2);
        assert!(single.iter().all(|k| k.y.is_none() && k.z.is_none()));

        let dual = enumerate(ChartType::Bar, &c, AxisMode::Dual, false);
        assert_eq!(dual.len(), 4);
    }

    #[test]
    fn test_multi_bar_excludes_same_x_and_z() {
        let c = candidates();
        let single = enumerate(ChartType::MultiBar, &c, AxisMode::Single, false);
        assert_eq!(single.len(), 2);
        assert!(single.iter().all(|k| k.z.as_ref().unwrap().id != k.x.id));

        let dual = enumerate(ChartType::MultiBar, &c, AxisMode::Dual, false);
        assert_eq!(dual.len(), 4);
    }

    #[test]
    fn test_box_hue_toggle() {
        let c = candidates();
        assert_eq!(enumerate(ChartType::Box, &c, AxisMode::Single, false).len(), 4);
        assert_eq!(enumerate(ChartType::Box, &c, AxisMode::Single, true).len(), 4);
        assert!(enumerate(ChartType::Box, &c, AxisMode::Single, true)
            .iter()
            .all(|k| k.z.is_some()));
    }

    #[test]
    fn test_scatter_excludes_self_pairs() {
        let c = AxisCandidates {
            x: vec![col(0, "p"), col(1, "q")],
            y: vec![col(0, "p"), col(1, "q")],
            ..AxisCandidates::default()
        };
        let pairs = enumerate(ChartType::Scatter, &c, AxisMode::Single, false);
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_empty_candidates_yield_nothing() {
        let c = AxisCandidates::default();
        for chart in ChartType::ALL {
            assert!(enumerate(chart, &c, AxisMode::Dual, true).is_empty());
        }
    }
}
