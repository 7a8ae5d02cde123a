//! Public configuration and its normalized form.

use crate::format::ValueFormat;
use crate::geometry::fill_array_with;
use serde::{Deserialize, Serialize};

/// Fan-out used when `grid` is given as a bare boolean.
pub const DEFAULT_NUM_CELLS: [u32; 2] = [4, 5];

/// Tooltip visibility used to pad a short `tooltips` list.
pub const DEFAULT_TOOLTIP_VISIBLE: bool = true;

/// Interval visibility used to pad a short `intervals` list.
pub const DEFAULT_INTERVAL_VISIBLE: bool = false;

/// A single value or an ordered list of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Shorthand for a one-element list
    One(T),
    /// Explicit list
    Many(Vec<T>),
}

impl<T: Clone> OneOrMany<T> {
    /// Expand into an explicit list.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value.clone()],
            Self::Many(values) => values.clone(),
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values)
    }
}

impl From<f64> for OneOrMany<f64> {
    fn from(value: f64) -> Self {
        Self::One(value)
    }
}

impl From<bool> for OneOrMany<bool> {
    fn from(value: bool) -> Self {
        Self::One(value)
    }
}

/// Track orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Left to right
    #[default]
    Horizontal,
    /// Bottom to top
    Vertical,
}

/// Grid settings: visibility plus per-level fan-out, coarsest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    /// Whether the scale is shown
    pub is_visible: bool,
    /// Number of cells each level splits its parent segment into
    pub num_cells: Vec<u32>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            is_visible: false,
            num_cells: DEFAULT_NUM_CELLS.to_vec(),
        }
    }
}

/// `grid` as accepted in configuration: a toggle or full settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridOption {
    /// Visibility only, default fan-out
    Toggle(bool),
    /// Explicit settings
    Config(GridConfig),
}

impl GridOption {
    /// Rewrite into explicit settings.
    #[must_use]
    pub fn to_config(&self) -> GridConfig {
        match self {
            Self::Toggle(is_visible) => GridConfig {
                is_visible: *is_visible,
                num_cells: DEFAULT_NUM_CELLS.to_vec(),
            },
            Self::Config(config) => config.clone(),
        }
    }
}

impl Default for GridOption {
    fn default() -> Self {
        Self::Toggle(false)
    }
}

/// Fully-specified slider configuration.
///
/// Absent fields must be defaulted by the caller before conversion; the
/// `rangeslider-yaml` manifest does that from its default table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Selected value(s)
    pub value: OneOrMany<f64>,
    /// Track start
    pub min: f64,
    /// Track end
    pub max: f64,
    /// Quantization step (0 = continuous)
    pub step: f64,
    /// Track orientation
    pub orientation: Orientation,
    /// Tooltip visibility per handle
    pub tooltips: OneOrMany<bool>,
    /// Interval visibility per segment
    pub intervals: OneOrMany<bool>,
    /// Background scale
    pub grid: GridOption,
    /// Class attached to the track
    pub css_class: String,
    /// Tooltip content formatter
    #[serde(skip)]
    pub tooltip_format: ValueFormat,
    /// Grid label formatter
    #[serde(skip)]
    pub grid_format: ValueFormat,
}

/// Configuration with every per-handle field expanded to a list.
///
/// `tooltips` has at least one entry per value and `intervals` at least one
/// more than that.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOptions {
    /// Selected values
    pub values: Vec<f64>,
    /// Track start
    pub min: f64,
    /// Track end
    pub max: f64,
    /// Quantization step
    pub step: f64,
    /// Track orientation
    pub orientation: Orientation,
    /// Tooltip visibility per handle
    pub tooltips: Vec<bool>,
    /// Interval visibility per segment
    pub intervals: Vec<bool>,
    /// Background scale
    pub grid: GridConfig,
    /// Class attached to the track
    pub css_class: String,
    /// Tooltip content formatter
    pub tooltip_format: ValueFormat,
    /// Grid label formatter
    pub grid_format: ValueFormat,
}

/// Expand scalar shorthands and pad short lists.
///
/// Over-long `tooltips`/`intervals` lists pass through untouched.
#[must_use]
pub fn normalize(options: &Options) -> NormalizedOptions {
    let values = options.value.to_vec();
    let tooltips = fill_array_with(
        values.len(),
        DEFAULT_TOOLTIP_VISIBLE,
        options.tooltips.to_vec(),
    );
    let intervals = fill_array_with(
        values.len() + 1,
        DEFAULT_INTERVAL_VISIBLE,
        options.intervals.to_vec(),
    );

    NormalizedOptions {
        values,
        min: options.min,
        max: options.max,
        step: options.step,
        orientation: options.orientation,
        tooltips,
        intervals,
        grid: options.grid.to_config(),
        css_class: options.css_class.clone(),
        tooltip_format: options.tooltip_format.clone(),
        grid_format: options.grid_format.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(value: OneOrMany<f64>) -> Options {
        Options {
            value,
            min: 0.0,
            max: 100.0,
            step: 1.0,
            orientation: Orientation::Horizontal,
            tooltips: OneOrMany::One(true),
            intervals: OneOrMany::One(false),
            grid: GridOption::Toggle(true),
            css_class: "range-slider".to_string(),
            tooltip_format: ValueFormat::Plain,
            grid_format: ValueFormat::Plain,
        }
    }

    // ==========================================================================
    // Shorthand expansion
    // ==========================================================================

    #[test]
    fn test_scalar_value_becomes_single_element_list() {
        let normalized = normalize(&options(OneOrMany::One(40.0)));
        assert_eq!(normalized.values, vec![40.0]);
        assert_eq!(normalized.tooltips, vec![true]);
        assert_eq!(normalized.intervals, vec![false, false]);
    }

    #[test]
    fn test_short_lists_are_padded_with_field_defaults() {
        let mut opts = options(OneOrMany::Many(vec![10.0, 20.0, 30.0]));
        opts.tooltips = OneOrMany::Many(vec![false]);
        opts.intervals = OneOrMany::Many(vec![true, true]);

        let normalized = normalize(&opts);
        assert_eq!(normalized.tooltips, vec![false, true, true]);
        assert_eq!(normalized.intervals, vec![true, true, false, false]);
    }

    #[test]
    fn test_scalar_toggle_is_broadcast_then_padded() {
        let mut opts = options(OneOrMany::Many(vec![10.0, 20.0]));
        opts.intervals = OneOrMany::One(true);

        let normalized = normalize(&opts);
        // One explicit entry, the rest are the hidden default
        assert_eq!(normalized.intervals, vec![true, false, false]);
    }

    #[test]
    fn test_long_lists_pass_through() {
        let mut opts = options(OneOrMany::One(10.0));
        opts.tooltips = OneOrMany::Many(vec![true, false, true]);

        let normalized = normalize(&opts);
        assert_eq!(normalized.tooltips, vec![true, false, true]);
    }

    #[test]
    fn test_grid_toggle_gets_default_fan_out() {
        let normalized = normalize(&options(OneOrMany::One(0.0)));
        assert_eq!(
            normalized.grid,
            GridConfig {
                is_visible: true,
                num_cells: DEFAULT_NUM_CELLS.to_vec(),
            }
        );
    }

    // ==========================================================================
    // Serde shapes
    // ==========================================================================

    #[test]
    fn test_deserialize_shorthand_json() {
        let json = r#"{
            "value": 25,
            "min": 0,
            "max": 50,
            "step": 5,
            "orientation": "vertical",
            "tooltips": [true, false],
            "intervals": true,
            "grid": {"isVisible": true, "numCells": [2, 2]},
            "cssClass": "slider"
        }"#;
        let opts: Options = serde_json::from_str(json).expect("valid options");
        assert_eq!(opts.value, OneOrMany::One(25.0));
        assert_eq!(opts.orientation, Orientation::Vertical);
        assert_eq!(opts.tooltips, OneOrMany::Many(vec![true, false]));
        assert_eq!(opts.intervals, OneOrMany::One(true));
        assert_eq!(
            opts.grid,
            GridOption::Config(GridConfig {
                is_visible: true,
                num_cells: vec![2, 2],
            })
        );
        assert!(opts.tooltip_format.is_plain());
    }

    #[test]
    fn test_deserialize_grid_toggle() {
        let grid: GridOption = serde_json::from_str("false").expect("valid grid");
        assert_eq!(grid, GridOption::Toggle(false));
    }
}
