//! Typed chart configuration built from validated attributes.

use serde::{Deserialize, Serialize};

use super::attributes::{AttributeKey, ParamValue};
use super::catalog::{is_color_like, DEFAULT_COLOR};
use super::charts::ChartAttributes;
use crate::eligibility::{AxisCombination, AxisMode, ChartType};

/// Bins used when none (or zero) are requested.
pub const DEFAULT_BINS: usize = 10;

/// Bars per facet when unset.
pub const DEFAULT_BARS_PER_FACET: usize = 10;

/// Facet figure width and height when unset.
pub const DEFAULT_FIGURE_SIZE: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorBarType {
    Sd,
    Se,
    Pi,
    Ci,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceChoice {
    Largest,
    Smallest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistogramStyle {
    Bars,
    Area,
}

/// Renderer-facing configuration of one chart request, defaults applied.
///
/// Attributes a chart type does not take keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub chart: ChartType,
    /// Bar/line colour; unrecognized or unset colours fall back to the default.
    pub color: String,
    pub custom_title: Option<String>,
    /// Tick rotation in whole degrees.
    pub xtick_rotation: i64,
    pub legend: bool,
    pub legend_offset: Option<f64>,
    pub style: Option<String>,
    pub orientation: Orientation,
    pub palette: Option<String>,
    pub axis_mode: AxisMode,
    pub error_bar: Option<ErrorBarType>,
    pub error_bar_value: Option<f64>,
    /// Colour the hue (z) dimension of a box plot.
    pub hue: bool,
    pub pie_rotation: f64,
    pub exploded_slice: Option<SliceChoice>,
    pub donut: bool,
    pub bins: usize,
    pub histogram_style: HistogramStyle,
    pub bars_per_facet: usize,
    pub figure_width: u32,
    pub figure_height: u32,
}

impl ChartConfig {
    /// Build the configuration of a validated submission.
    pub fn from_attributes(attributes: &ChartAttributes) -> Self {
        let text = move |key| attributes.text(key);
        let number = move |key| attributes.get(key).and_then(ParamValue::as_number);
        let count = move |key| match attributes.get(key) {
            Some(ParamValue::Integer(i)) if *i > 0 => Some(*i as usize),
            Some(ParamValue::Text(s)) => s.parse::<usize>().ok().filter(|n| *n > 0),
            _ => None,
        };
        let toggle = |key, default| match text(key) {
            Some("on") => true,
            Some("off") => false,
            _ => default,
        };

        Self {
            chart: attributes.chart,
            color: text(AttributeKey::ColorCode)
                .filter(|c| is_color_like(c))
                .unwrap_or(DEFAULT_COLOR)
                .to_string(),
            custom_title: text(AttributeKey::CustomTitle).map(str::to_string),
            xtick_rotation: number(AttributeKey::XtickRotation)
                .filter(|r| r.is_finite())
                .map(|r| r.trunc() as i64)
                .unwrap_or(0),
            legend: toggle(AttributeKey::LegendOn, true),
            legend_offset: number(AttributeKey::SpaceLegendOut),
            style: text(AttributeKey::CurrentStyle).map(str::to_string),
            orientation: match text(AttributeKey::Orientation) {
                Some("horizontal") => Orientation::Horizontal,
                _ => Orientation::Vertical,
            },
            palette: text(AttributeKey::Palette).map(str::to_string),
            axis_mode: AxisMode::from_toggle(text(AttributeKey::SingleAxes)),
            error_bar: match text(AttributeKey::ErrorBarType) {
                Some("sd") => Some(ErrorBarType::Sd),
                Some("se") => Some(ErrorBarType::Se),
                Some("pi") => Some(ErrorBarType::Pi),
                Some("ci") => Some(ErrorBarType::Ci),
                _ => None,
            },
            error_bar_value: number(AttributeKey::ErrorBarValue),
            hue: toggle(AttributeKey::ZAxisColor, true),
            pie_rotation: number(AttributeKey::Rotation).unwrap_or(0.0),
            exploded_slice: match text(AttributeKey::ChosenSlice) {
                Some("largest") => Some(SliceChoice::Largest),
                Some("smallest") => Some(SliceChoice::Smallest),
                _ => None,
            },
            donut: toggle(AttributeKey::Donut, false),
            bins: count(AttributeKey::NBins).unwrap_or(DEFAULT_BINS),
            histogram_style: match text(AttributeKey::HistogramType) {
                Some("area") => HistogramStyle::Area,
                _ => HistogramStyle::Bars,
            },
            bars_per_facet: count(AttributeKey::NBarsPerFacet).unwrap_or(DEFAULT_BARS_PER_FACET),
            figure_width: count(AttributeKey::FigureWidth)
                .and_then(|w| u32::try_from(w).ok())
                .unwrap_or(DEFAULT_FIGURE_SIZE),
            figure_height: count(AttributeKey::FigureHeight)
                .and_then(|h| u32::try_from(h).ok())
                .unwrap_or(DEFAULT_FIGURE_SIZE),
        }
    }

    /// Custom title if set, otherwise the default title of the combination.
    pub fn title_for(&self, combination: &AxisCombination) -> String {
        match &self.custom_title {
            Some(title) => title.clone(),
            None => default_title(
                self.chart,
                &combination.x.name,
                combination.y.as_ref().map(|y| y.name.as_str()),
            ),
        }
    }
}

/// Default chart title.
///
/// Charts that plot a value against another name the value column first.
pub fn default_title(chart: ChartType, x: &str, y: Option<&str>) -> String {
    match (chart, y) {
        (ChartType::Line, Some(y)) => format!("'{y}'  Line Chart"),
        (ChartType::Line, None) => format!("'{x}'  Line Chart"),
        (ChartType::Scatter, Some(y)) => format!("'{y}' / '{x}'  Scatter Plot"),
        (ChartType::MultiLine, Some(y)) => format!("'{y}' / '{x}'  MultiLine Chart"),
        (ChartType::MultiScatter, Some(y)) => format!("'{y}' / '{x}' MultiScatter Plot"),
        (ChartType::Facet, Some(y)) => format!("'{y}' / '{x}' Facet Chart"),
        (ChartType::Histogram, _) => format!("'{x}'  Histogram"),
        (ChartType::Bar, Some(y)) => format!("'{y}' Bar Chart"),
        (ChartType::MultiBar, Some(y)) => format!("'{y}' MultiBar Chart"),
        (ChartType::Box, _) => format!("'{x}' Box Plot"),
        (chart, _) => format!("'{x}' {} Chart", chart.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::AxisColumn;
    use crate::schema::ColumnId;
    use crate::validation::collect_attributes;

    fn attributes(chart: ChartType, set: &[(usize, ParamValue)]) -> ChartAttributes {
        let mut values = vec![None; crate::validation::arity(chart)];
        for (i, v) in set {
            values[*i] = Some(v.clone());
        }
        collect_attributes(chart, values).unwrap()
    }

    #[test]
    fn test_defaults_for_unset_attributes() {
        let config = ChartConfig::from_attributes(&attributes(ChartType::Facet, &[]));
        assert_eq!(config.color, DEFAULT_COLOR);
        assert_eq!(config.xtick_rotation, 0);
        assert_eq!(config.bars_per_facet, 10);
        assert_eq!(config.figure_width, 15);
        assert_eq!(config.figure_height, 15);
        assert_eq!(config.bins, 10);
        assert_eq!(config.axis_mode, AxisMode::Single);
    }

    #[test]
    fn test_tick_rotation_truncated_to_integer() {
        let config = ChartConfig::from_attributes(&attributes(
            ChartType::Bar,
            &[(2, ParamValue::from("45.7"))],
        ));
        assert_eq!(config.xtick_rotation, 45);
    }

    #[test]
    fn test_zero_bins_use_default() {
        let config = ChartConfig::from_attributes(&attributes(
            ChartType::Histogram,
            &[(5, ParamValue::from(0_i64)), (6, ParamValue::from("area"))],
        ));
        assert_eq!(config.bins, DEFAULT_BINS);
        assert_eq!(config.histogram_style, HistogramStyle::Area);

        let config = ChartConfig::from_attributes(&attributes(
            ChartType::Histogram,
            &[(5, ParamValue::from("25"))],
        ));
        assert_eq!(config.bins, 25);
    }

    #[test]
    fn test_toggles() {
        let config = ChartConfig::from_attributes(&attributes(
            ChartType::Box,
            &[(8, ParamValue::from("off")), (6, ParamValue::from("horizontal"))],
        ));
        assert!(!config.hue);
        assert_eq!(config.orientation, Orientation::Horizontal);

        let config = ChartConfig::from_attributes(&attributes(
            ChartType::MultiBar,
            &[(7, ParamValue::from("off"))],
        ));
        assert_eq!(config.axis_mode, AxisMode::Dual);
    }

    #[test]
    fn test_default_titles() {
        assert_eq!(default_title(ChartType::Line, "day", Some("temp")), "'temp'  Line Chart");
        assert_eq!(
            default_title(ChartType::Scatter, "a", Some("b")),
            "'b' / 'a'  Scatter Plot"
        );
        assert_eq!(default_title(ChartType::Histogram, "a", None), "'a'  Histogram");
        assert_eq!(default_title(ChartType::Bar, "city", None), "'city' Bar Chart");
        assert_eq!(default_title(ChartType::Pie, "city", None), "'city' Pie Chart");
        assert_eq!(default_title(ChartType::Box, "city", Some("temp")), "'city' Box Plot");
        assert_eq!(
            default_title(ChartType::MultiScatter, "a", Some("b")),
            "'b' / 'a' MultiScatter Plot"
        );
        assert_eq!(default_title(ChartType::MultiBar, "city", None), "'city' MultiBar Chart");
    }

    #[test]
    fn test_title_for_prefers_custom() {
        let combination = AxisCombination {
            x: AxisColumn {
                id: ColumnId(0),
                name: "city".into(),
            },
            y: None,
            z: None,
        };
        let config = ChartConfig::from_attributes(&attributes(ChartType::Pie, &[]));
        assert_eq!(config.title_for(&combination), "'city' Pie Chart");

        let config = ChartConfig::from_attributes(&attributes(
            ChartType::Pie,
            &[(0, ParamValue::from("Cities"))],
        ));
        assert_eq!(config.title_for(&combination), "Cities");
    }
}
