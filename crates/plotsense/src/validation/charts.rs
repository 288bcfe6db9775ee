//! Per-chart parameter lists and the aggregate validity check.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::attributes::AttributeKey::*;
use super::attributes::*;
use crate::eligibility::ChartType;

const LINE_KEYS: &[AttributeKey] = &[
    ColorCode,
    CustomTitle,
    XtickRotation,
    LegendOn,
    CurrentStyle,
    Orientation,
    ErrorBarType,
    ErrorBarValue,
];

const SCATTER_KEYS: &[AttributeKey] = &[
    ColorCode,
    CustomTitle,
    XtickRotation,
    LegendOn,
    CurrentStyle,
    Orientation,
];

const BAR_KEYS: &[AttributeKey] = &[
    ColorCode,
    CustomTitle,
    XtickRotation,
    LegendOn,
    CurrentStyle,
    Orientation,
    SingleAxes,
];

const BOX_KEYS: &[AttributeKey] = &[
    ColorCode,
    CustomTitle,
    XtickRotation,
    LegendOn,
    SpaceLegendOut,
    CurrentStyle,
    Orientation,
    Palette,
    ZAxisColor,
];

const PIE_KEYS: &[AttributeKey] = &[
    CustomTitle,
    LegendOn,
    SpaceLegendOut,
    CurrentStyle,
    Palette,
    Rotation,
    ChosenSlice,
    Donut,
];

const HISTOGRAM_KEYS: &[AttributeKey] = &[
    ColorCode,
    CustomTitle,
    XtickRotation,
    LegendOn,
    CurrentStyle,
    NBins,
    HistogramType,
];

const MULTI_KEYS: &[AttributeKey] = &[
    CustomTitle,
    XtickRotation,
    LegendOn,
    SpaceLegendOut,
    CurrentStyle,
    Orientation,
    Palette,
];

const MULTI_BAR_KEYS: &[AttributeKey] = &[
    CustomTitle,
    XtickRotation,
    LegendOn,
    SpaceLegendOut,
    CurrentStyle,
    Orientation,
    Palette,
    SingleAxes,
];

const FACET_KEYS: &[AttributeKey] = &[
    ColorCode,
    CustomTitle,
    XtickRotation,
    FigureWidth,
    FigureHeight,
    CurrentStyle,
    Palette,
    NBarsPerFacet,
];

/// Ordered parameter list of a chart type.
pub fn parameter_keys(chart: ChartType) -> &'static [AttributeKey] {
    match chart {
        ChartType::Line => LINE_KEYS,
        ChartType::Scatter => SCATTER_KEYS,
        ChartType::Bar => BAR_KEYS,
        ChartType::Box => BOX_KEYS,
        ChartType::Pie => PIE_KEYS,
        ChartType::Histogram => HISTOGRAM_KEYS,
        ChartType::MultiLine | ChartType::MultiScatter => MULTI_KEYS,
        ChartType::MultiBar => MULTI_BAR_KEYS,
        ChartType::Facet => FACET_KEYS,
    }
}

/// Number of parameters a chart type expects.
pub fn arity(chart: ChartType) -> usize {
    parameter_keys(chart).len()
}

/// Submitted parameters of one chart, keyed in parameter-list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAttributes {
    pub chart: ChartType,
    values: IndexMap<AttributeKey, Option<ParamValue>>,
}

impl ChartAttributes {
    /// Value of one attribute; `None` when unset or not part of this chart.
    pub fn get(&self, key: AttributeKey) -> Option<&ParamValue> {
        self.values.get(&key).and_then(Option::as_ref)
    }

    /// Text value of one attribute.
    pub fn text(&self, key: AttributeKey) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_text)
    }

    pub fn contains(&self, key: AttributeKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, Option<&ParamValue>)> {
        self.values.iter().map(|(k, v)| (*k, v.as_ref()))
    }
}

/// Pair a positional parameter list with the chart's keys.
///
/// Returns `None` when the list length differs from the chart's arity.
pub fn collect_attributes(chart: ChartType, values: Vec<Option<ParamValue>>) -> Option<ChartAttributes> {
    let keys = parameter_keys(chart);
    if values.len() != keys.len() {
        warn!(
            chart = %chart,
            expected = keys.len(),
            got = values.len(),
            "parameter list has the wrong length"
        );
        return None;
    }

    Some(ChartAttributes {
        chart,
        values: keys.iter().copied().zip(values).collect(),
    })
}

/// Validate one attribute of a submission.
pub fn validate_attribute(key: AttributeKey, attributes: &ChartAttributes) -> bool {
    let value = attributes.get(key);
    match key {
        ColorCode => color_code_check(value),
        CustomTitle => custom_title_check(value),
        XtickRotation => xtick_rotation_check(value),
        LegendOn => legend_on_check(value),
        SpaceLegendOut => space_legend_out_check(value),
        CurrentStyle => current_style_check(value),
        Orientation => orientation_check(value),
        Palette => palette_check(value),
        SingleAxes => single_axes_check(value),
        ErrorBarType => error_bar_type_check(value),
        ErrorBarValue => error_bar_value_check(attributes.get(ErrorBarType), value),
        ZAxisColor => z_axis_color_check(value),
        Rotation => rotation_check(value),
        ChosenSlice => chosen_slice_check(value),
        Donut => donut_check(value),
        NBins => n_bins_check(value),
        HistogramType => histogram_type_check(value),
        NBarsPerFacet => n_bars_per_facet_check(value),
        FigureWidth => figure_width_check(value),
        FigureHeight => figure_height_check(value),
    }
}

/// Attributes of the submission that fail validation, in list order.
pub fn invalid_attributes(attributes: &ChartAttributes) -> Vec<AttributeKey> {
    parameter_keys(attributes.chart)
        .iter()
        .copied()
        .filter(|key| !validate_attribute(*key, attributes))
        .collect()
}

/// Conjunction of every field validator the chart uses.
pub fn check_attributes(attributes: &ChartAttributes) -> bool {
    let invalid = invalid_attributes(attributes);
    if !invalid.is_empty() {
        debug!(chart = %attributes.chart, ?invalid, "attribute validation failed");
    }
    invalid.is_empty()
}

/// Arity check followed by the aggregate field check.
pub fn config_check(chart: ChartType, values: Vec<Option<ParamValue>>) -> bool {
    collect_attributes(chart, values).is_some_and(|attributes| check_attributes(&attributes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unset(n: usize) -> Vec<Option<ParamValue>> {
        vec![None; n]
    }

    #[test]
    fn test_arities() {
        let expected = [
            (ChartType::Line, 8),
            (ChartType::Scatter, 6),
            (ChartType::Bar, 7),
            (ChartType::Box, 9),
            (ChartType::Pie, 8),
            (ChartType::Histogram, 7),
            (ChartType::MultiLine, 7),
            (ChartType::MultiScatter, 7),
            (ChartType::MultiBar, 8),
            (ChartType::Facet, 8),
        ];
        for (chart, n) in expected {
            assert_eq!(arity(chart), n, "{chart}");
        }
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        assert!(collect_attributes(ChartType::Line, unset(7)).is_none());
        assert!(!config_check(ChartType::Line, unset(9)));
        assert!(config_check(ChartType::Line, unset(8)));
    }

    #[test]
    fn test_positional_mapping() {
        let mut values = unset(8);
        values[0] = Some(ParamValue::from("Sales"));
        values[5] = Some(ParamValue::from(0.5));
        let attributes = collect_attributes(ChartType::Pie, values).unwrap();

        assert_eq!(attributes.text(CustomTitle), Some("Sales"));
        assert_eq!(attributes.get(Rotation), Some(&ParamValue::Float(0.5)));
        assert!(!attributes.contains(ColorCode));
    }

    #[test]
    fn test_bad_legend_spacing_fails_box_and_pie() {
        let mut box_values = unset(9);
        box_values[4] = Some(ParamValue::from("1.5"));
        assert!(!config_check(ChartType::Box, box_values));

        let mut pie_values = unset(8);
        pie_values[2] = Some(ParamValue::from("1.5"));
        assert!(!config_check(ChartType::Pie, pie_values));
    }

    #[test]
    fn test_invalid_attributes_lists_failures() {
        let mut values = unset(8);
        values[6] = Some(ParamValue::from("ci"));
        values[7] = Some(ParamValue::from(150_i64));
        let attributes = collect_attributes(ChartType::Line, values).unwrap();
        assert_eq!(invalid_attributes(&attributes), vec![ErrorBarValue]);
        assert!(!check_attributes(&attributes));
    }

    #[test]
    fn test_facet_fields() {
        let mut values = unset(8);
        values[3] = Some(ParamValue::from(20_i64));
        values[7] = Some(ParamValue::from(0_i64));
        let attributes = collect_attributes(ChartType::Facet, values).unwrap();
        assert_eq!(invalid_attributes(&attributes), vec![NBarsPerFacet]);
    }
}
