//! Chart attribute validation.
//!
//! Each chart type takes a fixed, ordered list of optional attributes.
//! A submission is valid when it has the right length and every attribute
//! passes its field check; valid submissions become a [`ChartConfig`].

mod attributes;
mod catalog;
mod charts;
mod config;

pub use attributes::*;
pub use catalog::{
    is_color_like, is_palette, is_style, palettes, DEFAULT_COLOR, PALETTE_GROUPS, STYLES,
};
pub use charts::{
    arity, check_attributes, collect_attributes, config_check, invalid_attributes,
    parameter_keys, validate_attribute, ChartAttributes,
};
pub use config::{
    default_title, ChartConfig, ErrorBarType, HistogramStyle, Orientation, SliceChoice,
    DEFAULT_BARS_PER_FACET, DEFAULT_BINS, DEFAULT_FIGURE_SIZE,
};
