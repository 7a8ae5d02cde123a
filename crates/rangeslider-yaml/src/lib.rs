//! Slider manifests for rangeslider.
//!
//! Loads partial YAML or JSON configuration, fills the gaps from
//! [`manifest::defaults`], and compiles `tooltipFormat`/`gridFormat` label
//! templates into formatting strategies.
//!
//! ```
//! let options = rangeslider_yaml::load_options_yaml(
//!     "value: [20, 80]\ntooltipFormat: '{{ value }}%'",
//! )
//! .expect("valid manifest");
//! assert_eq!(options.tooltip_format.format(20.0), "20%");
//! ```

mod error;
pub mod manifest;
mod template;

pub use error::ParseError;
pub use manifest::SliderManifest;
pub use template::{
    Segment, Template, TemplateError, TemplateParser, Transform, MAX_FIXED_DECIMALS,
};

use rangeslider_core::Options;

/// Parse a YAML manifest into fully-specified options.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or a field is invalid.
pub fn load_options_yaml(yaml: &str) -> Result<Options, ParseError> {
    SliderManifest::from_yaml(yaml)?.into_options()
}

/// Parse a JSON manifest into fully-specified options.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or a field is invalid.
pub fn load_options_json(json: &str) -> Result<Options, ParseError> {
    SliderManifest::from_json(json)?.into_options()
}
