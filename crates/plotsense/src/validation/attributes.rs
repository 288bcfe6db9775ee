//! Field validators for user-submitted chart attributes.
//!
//! Every validator is total: an unset value means "use the default" and
//! passes. Failures are plain `false`, never errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::catalog::{is_color_like, is_palette, is_style};

/// A raw value as submitted from a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Numeric reading of the value; text is parsed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Integer(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            ParamValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Integer(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

/// The configurable chart attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    ColorCode,
    CustomTitle,
    XtickRotation,
    LegendOn,
    SpaceLegendOut,
    CurrentStyle,
    Orientation,
    Palette,
    SingleAxes,
    ErrorBarType,
    ErrorBarValue,
    ZAxisColor,
    Rotation,
    ChosenSlice,
    Donut,
    NBins,
    HistogramType,
    NBarsPerFacet,
    FigureWidth,
    FigureHeight,
}

impl AttributeKey {
    pub const ALL: [AttributeKey; 20] = [
        AttributeKey::ColorCode,
        AttributeKey::CustomTitle,
        AttributeKey::XtickRotation,
        AttributeKey::LegendOn,
        AttributeKey::SpaceLegendOut,
        AttributeKey::CurrentStyle,
        AttributeKey::Orientation,
        AttributeKey::Palette,
        AttributeKey::SingleAxes,
        AttributeKey::ErrorBarType,
        AttributeKey::ErrorBarValue,
        AttributeKey::ZAxisColor,
        AttributeKey::Rotation,
        AttributeKey::ChosenSlice,
        AttributeKey::Donut,
        AttributeKey::NBins,
        AttributeKey::HistogramType,
        AttributeKey::NBarsPerFacet,
        AttributeKey::FigureWidth,
        AttributeKey::FigureHeight,
    ];

    /// Field name as used in forms.
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKey::ColorCode => "color_code",
            AttributeKey::CustomTitle => "custom_title",
            AttributeKey::XtickRotation => "xtick_rotation",
            AttributeKey::LegendOn => "legend_on",
            AttributeKey::SpaceLegendOut => "space_legend_out",
            AttributeKey::CurrentStyle => "current_style",
            AttributeKey::Orientation => "orientation",
            AttributeKey::Palette => "palette",
            AttributeKey::SingleAxes => "single_axes",
            AttributeKey::ErrorBarType => "error_bar_type",
            AttributeKey::ErrorBarValue => "error_bar_value",
            AttributeKey::ZAxisColor => "z_axis_color",
            AttributeKey::Rotation => "rotation",
            AttributeKey::ChosenSlice => "chosen_slice",
            AttributeKey::Donut => "donut",
            AttributeKey::NBins => "n_bins",
            AttributeKey::HistogramType => "histogram_type",
            AttributeKey::NBarsPerFacet => "n_bars_per_facet",
            AttributeKey::FigureWidth => "figure_width",
            AttributeKey::FigureHeight => "figure_height",
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttributeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeKey::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("unknown attribute '{}'", s))
    }
}

// =============================================================================
// FIELD VALIDATORS
// =============================================================================

fn one_of(value: Option<&ParamValue>, allowed: &[&str]) -> bool {
    match value {
        None => true,
        Some(ParamValue::Text(s)) => allowed.contains(&s.as_str()),
        Some(_) => false,
    }
}

fn numeric(value: Option<&ParamValue>) -> bool {
    value.is_none_or(|v| v.as_number().is_some())
}

fn positive_integer(value: Option<&ParamValue>) -> bool {
    match value {
        None => true,
        Some(ParamValue::Integer(i)) => *i > 0,
        Some(_) => false,
    }
}

pub fn color_code_check(value: Option<&ParamValue>) -> bool {
    match value {
        None => true,
        Some(ParamValue::Text(s)) => is_color_like(s),
        Some(_) => false,
    }
}

pub fn xtick_rotation_check(value: Option<&ParamValue>) -> bool {
    numeric(value)
}

pub fn custom_title_check(value: Option<&ParamValue>) -> bool {
    matches!(value, None | Some(ParamValue::Text(_)))
}

pub fn legend_on_check(value: Option<&ParamValue>) -> bool {
    one_of(value, &["on", "off"])
}

/// Legend offset as a fraction of the figure, 0.0 to 1.0 inclusive.
pub fn space_legend_out_check(value: Option<&ParamValue>) -> bool {
    value.is_none_or(|v| {
        v.as_number()
            .is_some_and(|offset| (0.0..=1.0).contains(&offset))
    })
}

pub fn current_style_check(value: Option<&ParamValue>) -> bool {
    match value {
        None => true,
        Some(ParamValue::Text(s)) => is_style(s),
        Some(_) => false,
    }
}

pub fn orientation_check(value: Option<&ParamValue>) -> bool {
    one_of(value, &["vertical", "horizontal"])
}

pub fn palette_check(value: Option<&ParamValue>) -> bool {
    match value {
        None => true,
        Some(ParamValue::Text(s)) => is_palette(s),
        Some(_) => false,
    }
}

pub fn single_axes_check(value: Option<&ParamValue>) -> bool {
    one_of(value, &["on", "off"])
}

pub fn error_bar_type_check(value: Option<&ParamValue>) -> bool {
    one_of(value, &["sd", "se", "pi", "ci"])
}

/// Error-bar magnitude. Percentile and confidence intervals must lie in
/// `[0, 100)`; other types only need a number.
pub fn error_bar_value_check(error_bar_type: Option<&ParamValue>, value: Option<&ParamValue>) -> bool {
    let Some(value) = value else {
        return true;
    };
    let Some(number) = value.as_number() else {
        return false;
    };
    match error_bar_type.and_then(ParamValue::as_text) {
        Some("pi") | Some("ci") => (0.0..100.0).contains(&number),
        _ => number.is_finite(),
    }
}

pub fn z_axis_color_check(value: Option<&ParamValue>) -> bool {
    one_of(value, &["on", "off"])
}

pub fn rotation_check(value: Option<&ParamValue>) -> bool {
    numeric(value)
}

pub fn chosen_slice_check(value: Option<&ParamValue>) -> bool {
    one_of(value, &["largest", "smallest"])
}

pub fn donut_check(value: Option<&ParamValue>) -> bool {
    one_of(value, &["on", "off"])
}

/// Non-negative integer, or text made only of digits.
pub fn n_bins_check(value: Option<&ParamValue>) -> bool {
    match value {
        None => true,
        Some(ParamValue::Integer(i)) => *i >= 0,
        Some(ParamValue::Text(s)) => !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()),
        Some(ParamValue::Float(_)) => false,
    }
}

pub fn histogram_type_check(value: Option<&ParamValue>) -> bool {
    one_of(value, &["bars", "area"])
}

pub fn n_bars_per_facet_check(value: Option<&ParamValue>) -> bool {
    positive_integer(value)
}

pub fn figure_width_check(value: Option<&ParamValue>) -> bool {
    positive_integer(value)
}

pub fn figure_height_check(value: Option<&ParamValue>) -> bool {
    positive_integer(value)
}
