//! Slider manifests: partial configuration completed from a default table.

use crate::error::ParseError;
use crate::template::TemplateParser;
use rangeslider_core::{GridOption, OneOrMany, Options, Orientation, ValueFormat};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Values used for every field a manifest leaves out.
pub mod defaults {
    use rangeslider_core::options::DEFAULT_NUM_CELLS;
    use rangeslider_core::{GridConfig, GridOption, Orientation};

    /// Single handle at the track start
    pub const VALUE: f64 = 0.0;
    /// Track start
    pub const MIN: f64 = 0.0;
    /// Track end
    pub const MAX: f64 = 100.0;
    /// Quantization step
    pub const STEP: f64 = 1.0;
    /// Track orientation
    pub const ORIENTATION: Orientation = Orientation::Horizontal;
    /// Tooltip visibility
    pub const TOOLTIPS: bool = true;
    /// Interval visibility
    pub const INTERVALS: bool = false;
    /// Track class
    pub const CSS_CLASS: &str = "range-slider";

    /// Hidden grid with the default fan-out.
    #[must_use]
    pub fn grid() -> GridOption {
        GridOption::Config(GridConfig {
            is_visible: false,
            num_cells: DEFAULT_NUM_CELLS.to_vec(),
        })
    }
}

/// Slider configuration as written in a YAML or JSON file.
///
/// Every field is optional. `tooltipFormat` and `gridFormat` hold label
/// templates, see [`Template`](crate::Template).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderManifest {
    /// Selected value(s)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<OneOrMany<f64>>,
    /// Track start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Track end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Quantization step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Track orientation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    /// Tooltip visibility per handle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltips: Option<OneOrMany<bool>>,
    /// Interval visibility per segment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervals: Option<OneOrMany<bool>>,
    /// Background scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridOption>,
    /// Track class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
    /// Tooltip label template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_format: Option<String>,
    /// Grid label template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_format: Option<String>,
}

impl SliderManifest {
    /// Parse manifest from YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse manifest from JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize manifest to YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Complete the manifest into fully-specified [`Options`].
    ///
    /// # Errors
    ///
    /// Returns an error if a number is not finite or a template does not
    /// parse.
    pub fn into_options(self) -> Result<Options, ParseError> {
        let value = self.value.unwrap_or(OneOrMany::One(defaults::VALUE));
        if value.to_vec().iter().any(|v| !v.is_finite()) {
            return Err(non_finite("value"));
        }

        let min = finite("min", self.min.unwrap_or(defaults::MIN))?;
        let max = finite("max", self.max.unwrap_or(defaults::MAX))?;
        let step = finite("step", self.step.unwrap_or(defaults::STEP))?;

        let tooltip_format = compile("tooltipFormat", self.tooltip_format.as_deref())?;
        let grid_format = compile("gridFormat", self.grid_format.as_deref())?;

        let options = Options {
            value,
            min,
            max,
            step,
            orientation: self.orientation.unwrap_or(defaults::ORIENTATION),
            tooltips: self.tooltips.unwrap_or(OneOrMany::One(defaults::TOOLTIPS)),
            intervals: self
                .intervals
                .unwrap_or(OneOrMany::One(defaults::INTERVALS)),
            grid: self.grid.unwrap_or_else(defaults::grid),
            css_class: self
                .css_class
                .unwrap_or_else(|| defaults::CSS_CLASS.to_string()),
            tooltip_format,
            grid_format,
        };

        tracing::debug!(
            target: "rangeslider_yaml::manifest",
            handles = options.value.to_vec().len(),
            min = options.min,
            max = options.max,
            step = options.step,
            "manifest completed"
        );

        Ok(options)
    }
}

fn non_finite(field: &'static str) -> ParseError {
    ParseError::InvalidValue {
        field,
        message: "must be a finite number".to_string(),
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ParseError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(non_finite(field))
    }
}

fn compile(field: &'static str, source: Option<&str>) -> Result<ValueFormat, ParseError> {
    let Some(source) = source else {
        return Ok(ValueFormat::Plain);
    };
    let template = TemplateParser::new()
        .parse(source)
        .map_err(|source| ParseError::Template { field, source })?;
    Ok(ValueFormat::Custom(Arc::new(template)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateError;
    use rangeslider_core::GridConfig;

    // ==========================================================================
    // Defaults
    // ==========================================================================

    #[test]
    fn test_empty_manifest_gets_default_table() {
        let options = SliderManifest::from_yaml("{}")
            .unwrap()
            .into_options()
            .unwrap();

        assert_eq!(options.value, OneOrMany::One(0.0));
        assert_eq!(options.min, 0.0);
        assert_eq!(options.max, 100.0);
        assert_eq!(options.step, 1.0);
        assert_eq!(options.orientation, Orientation::Horizontal);
        assert_eq!(options.tooltips, OneOrMany::One(true));
        assert_eq!(options.intervals, OneOrMany::One(false));
        assert_eq!(
            options.grid,
            GridOption::Config(GridConfig {
                is_visible: false,
                num_cells: vec![4, 5],
            })
        );
        assert_eq!(options.css_class, "range-slider");
        assert!(options.tooltip_format.is_plain());
        assert!(options.grid_format.is_plain());
    }

    #[test]
    fn test_partial_manifest_keeps_given_fields() {
        let yaml = r"
value: [10, 60]
max: 200
orientation: vertical
grid: true
";
        let options = SliderManifest::from_yaml(yaml)
            .unwrap()
            .into_options()
            .unwrap();

        assert_eq!(options.value, OneOrMany::Many(vec![10.0, 60.0]));
        assert_eq!(options.min, 0.0);
        assert_eq!(options.max, 200.0);
        assert_eq!(options.orientation, Orientation::Vertical);
        assert_eq!(options.grid, GridOption::Toggle(true));
    }

    // ==========================================================================
    // Loaders
    // ==========================================================================

    #[test]
    fn test_from_json() {
        let json = r#"{"value": 5, "step": 0.5, "cssClass": "slim", "intervals": [true, false]}"#;
        let manifest = SliderManifest::from_json(json).unwrap();

        assert_eq!(manifest.value, Some(OneOrMany::One(5.0)));
        assert_eq!(manifest.step, Some(0.5));
        assert_eq!(manifest.css_class.as_deref(), Some("slim"));
        assert_eq!(
            manifest.intervals,
            Some(OneOrMany::Many(vec![true, false]))
        );
    }

    #[test]
    fn test_malformed_input_is_reported() {
        assert!(matches!(
            SliderManifest::from_yaml("value: [1, 2"),
            Err(ParseError::Yaml(_))
        ));
        assert!(matches!(
            SliderManifest::from_json("{\"min\": \"low\"}"),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn test_yaml_round_trip_skips_absent_fields() {
        let manifest = SliderManifest {
            max: Some(50.0),
            tooltip_format: Some("{{ value }}%".to_string()),
            ..SliderManifest::default()
        };
        let yaml = manifest.to_yaml().unwrap();

        assert!(!yaml.contains("min"));
        assert_eq!(SliderManifest::from_yaml(&yaml).unwrap(), manifest);
    }

    // ==========================================================================
    // Validation
    // ==========================================================================

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        let err = SliderManifest::from_yaml("max: .inf")
            .unwrap()
            .into_options()
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { field: "max", .. }));

        let err = SliderManifest::from_yaml("value: [1, .nan]")
            .unwrap()
            .into_options()
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { field: "value", .. }));
    }

    #[test]
    fn test_templates_become_custom_formats() {
        let options = SliderManifest::from_yaml("tooltipFormat: '{{ value | fixed(2) }} m'")
            .unwrap()
            .into_options()
            .unwrap();

        assert_eq!(options.tooltip_format.format(3.0), "3.00 m");
        assert!(options.grid_format.is_plain());
    }

    #[test]
    fn test_bad_template_names_its_field() {
        let err = SliderManifest::from_yaml("gridFormat: '{{ value | sqrt }}'")
            .unwrap()
            .into_options()
            .unwrap_err();

        match err {
            ParseError::Template { field, source } => {
                assert_eq!(field, "gridFormat");
                assert_eq!(source, TemplateError::UnknownTransform("sqrt".to_string()));
            }
            other => panic!("Expected template error, got {other:?}"),
        }
    }
}
