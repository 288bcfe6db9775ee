//! Closed vocabularies accepted by the renderer: style sheets, palettes and colours.

use once_cell::sync::Lazy;
use regex::Regex;

/// Style sheets the renderer can apply.
pub const STYLES: &[&str] = &[
    "Solarize_Light2",
    "_classic_test_patch",
    "bmh",
    "classic",
    "dark_background",
    "fast",
    "fivethirtyeight",
    "ggplot",
    "grayscale",
    "seaborn",
    "seaborn-bright",
    "seaborn-colorblind",
    "seaborn-dark",
    "seaborn-dark-palette",
    "seaborn-darkgrid",
    "seaborn-deep",
    "seaborn-muted",
    "seaborn-notebook",
    "seaborn-paper",
    "seaborn-pastel",
    "seaborn-poster",
    "seaborn-talk",
    "seaborn-ticks",
    "seaborn-white",
    "seaborn-whitegrid",
    "tableau-colorblind10",
];

// =============================================================================
// PALETTES
// =============================================================================

pub const MATPLOTLIB_PALETTES: &[&str] = &[
    "tab10", "deep", "muted", "pastel", "bright", "dark", "colorblind", "tab20", "tab20b", "tab20c",
];

pub const CIRCULAR_PALETTES: &[&str] = &["hls", "husl"];

pub const QUALITATIVE_BREWER_PALETTES: &[&str] = &[
    "Set1", "Set2", "Set3", "Paired", "Accent", "Pastel1", "Pastel2", "Dark2",
];

pub const SEQUENTIAL_BREWER_PALETTES: &[&str] = &[
    "Greys", "Reds", "Greens", "Blues", "Oranges", "Purples", "BuGn", "BuPu", "GnBu", "OrRd",
    "PuBu", "RdPu", "YlGn", "PuBuGn", "YlGnBu", "YlOrBr", "YlOrRd",
];

pub const DIVERGING_BREWER_PALETTES: &[&str] = &[
    "RdBu", "RdGy", "PRGn", "PiYG", "BrBG", "RdYlBu", "RdYlGn", "Spectral",
];

pub const SEQUENTIAL_PALETTES: &[&str] = &[
    "rocket", "mako", "flare", "crest", "viridis", "plasma", "inferno", "magma", "cividis",
];

pub const DIVERGING_PALETTES: &[&str] = &["vlag", "icefire", "coolwarm", "bwr", "seismic"];

pub const MISC_COLOR_MAPS: &[&str] = &[
    "flag", "prism", "ocean", "gist_earth", "terrain", "gist_stern", "gnuplot", "gnuplot2",
    "CMRmap", "cubehelix", "brg", "gist_rainbow", "rainbow", "jet", "turbo", "nipy_spectral",
    "gist_ncar",
];

/// Every palette group.
pub const PALETTE_GROUPS: &[&[&str]] = &[
    MATPLOTLIB_PALETTES,
    CIRCULAR_PALETTES,
    QUALITATIVE_BREWER_PALETTES,
    SEQUENTIAL_BREWER_PALETTES,
    DIVERGING_BREWER_PALETTES,
    SEQUENTIAL_PALETTES,
    DIVERGING_PALETTES,
    MISC_COLOR_MAPS,
];

pub fn is_style(name: &str) -> bool {
    STYLES.contains(&name)
}

pub fn is_palette(name: &str) -> bool {
    PALETTE_GROUPS.iter().any(|group| group.contains(&name))
}

/// All palette names, group by group.
pub fn palettes() -> impl Iterator<Item = &'static str> {
    PALETTE_GROUPS.iter().flat_map(|group| group.iter().copied())
}

// =============================================================================
// COLOURS
// =============================================================================

/// Colour used when none, or an unrecognized one, is given.
pub const DEFAULT_COLOR: &str = "#1E53A2";

const BASE_COLORS: &[&str] = &["b", "g", "r", "c", "m", "y", "k", "w"];

const TABLEAU_COLORS: &[&str] = &[
    "tab:blue", "tab:orange", "tab:green", "tab:red", "tab:purple", "tab:brown", "tab:pink",
    "tab:gray", "tab:grey", "tab:olive", "tab:cyan",
];

const CSS4_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen",
];

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
});

static CYCLE_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^C\d+$").unwrap());

/// Check whether a string names a colour the renderer understands.
///
/// Accepts single-letter base colours, `tab:` colours, CSS4 names (any
/// case), `#rgb`/`#rgba`/`#rrggbb`/`#rrggbbaa` hex codes, grey levels
/// written as a number between 0 and 1, `C<n>` cycle references and `none`.
pub fn is_color_like(value: &str) -> bool {
    if BASE_COLORS.contains(&value) || HEX_COLOR.is_match(value) || CYCLE_COLOR.is_match(value) {
        return true;
    }

    let lower = value.to_ascii_lowercase();
    if lower == "none" || TABLEAU_COLORS.contains(&lower.as_str()) || CSS4_COLORS.contains(&lower.as_str()) {
        return true;
    }

    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|grey| (0.0..=1.0).contains(&grey))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles() {
        assert!(is_style("ggplot"));
        assert!(is_style("seaborn-darkgrid"));
        assert!(!is_style("seaborn-v0_8"));
        assert!(!is_style("GGPLOT"));
    }

    #[test]
    fn test_palettes() {
        assert!(is_palette("viridis"));
        assert!(is_palette("Set1"));
        assert!(is_palette("gist_ncar"));
        assert!(!is_palette("set1"));
        assert_eq!(palettes().count(), 76);
    }

    #[test]
    fn test_color_like() {
        for color in ["r", "tab:blue", "CornflowerBlue", "#fff", "#1E53A2", "#1E53A2FF", "0.5", "C3", "none"] {
            assert!(is_color_like(color), "{color} should be a colour");
        }
        for color in ["", "bluish", "#12345", "1.5", "tab:teal", "c3"] {
            assert!(!is_color_like(color), "{color} should not be a colour");
        }
    }
}
