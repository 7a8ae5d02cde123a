//! End-to-end tests: manifest text in, render state out.

use proptest::prelude::*;
use rangeslider_core::{validate, HandleId, Model, Orientation, Proposal, TooltipId};
use rangeslider_yaml::{load_options_json, load_options_yaml, ParseError};

const PRICE_FILTER: &str = r"
value: [200, 800]
min: 0
max: 1000
step: 50
tooltips: true
intervals: [false, true, false]
grid:
  isVisible: true
  numCells: [2, 5]
tooltipFormat: '${{ value }}'
gridFormat: '{{ value | scale(0.001) | fixed(1) }}k'
";

#[test]
fn test_yaml_manifest_drives_model() {
    let options = load_options_yaml(PRICE_FILTER).unwrap();
    let mut model = Model::from_options(&options);
    assert!(validate(model.data()).is_ok());

    let state = model.state();
    let contents: Vec<&str> = state.tooltips.iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents, vec!["$200", "$800"]);

    let labels: Vec<&str> = state
        .grid
        .cells
        .iter()
        .filter(|c| c.is_label_visible)
        .map(|c| c.label.as_str())
        .collect();
    assert_eq!(labels, vec!["0.0k", "0.5k", "1.0k"]);

    assert!(model
        .propose(Proposal::drag_move(HandleId(1), 260.0))
        .is_applied());
    assert!(model
        .propose(Proposal::tooltip_collisions(vec![vec![
            TooltipId(0),
            TooltipId(1)
        ]]))
        .is_applied());

    let state = model.state();
    assert_eq!(state.tooltips.len(), 1);
    assert_eq!(state.tooltips[0].content, "$200 - $250");
}

#[test]
fn test_json_manifest_with_defaults() {
    let options = load_options_json(r#"{"value": 30, "orientation": "vertical"}"#).unwrap();
    let model = Model::from_options(&options);

    let state = model.state();
    assert_eq!(state.track.orientation, Orientation::Vertical);
    assert_eq!(state.handles.len(), 1);
    assert_eq!(state.handles[0].position, 30.0);
    assert!(!state.grid.is_visible);
}

#[test]
fn test_invalid_manifest_never_reaches_the_model() {
    let err = load_options_yaml("step: .nan").unwrap_err();
    assert!(matches!(err, ParseError::InvalidValue { field: "step", .. }));

    let err = load_options_yaml("tooltipFormat: '{{ value'").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Template {
            field: "tooltipFormat",
            ..
        }
    ));
}

#[test]
fn test_oversized_fixed_precision_is_a_parse_error() {
    let err = load_options_yaml("tooltipFormat: '{{ value | fixed(65536) }}'").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Template {
            field: "tooltipFormat",
            ..
        }
    ));
}

#[test]
fn test_fractional_step_manifest_renders_clean_labels() {
    let options = load_options_yaml("value: 0.7\nmax: 1\nstep: 0.1").unwrap();
    let mut model = Model::from_options(&options);
    assert_eq!(model.state().tooltips[0].content, "0.7");

    assert!(model
        .propose(Proposal::drag_move(HandleId(0), 0.32))
        .is_applied());
    assert_eq!(model.state().tooltips[0].content, "0.3");
}

proptest! {
    #[test]
    fn prop_fixed_template_renders_requested_decimals(
        value in -1.0e6f64..1.0e6,
        decimals in 0usize..6,
    ) {
        let yaml = format!("tooltipFormat: '{{{{ value | fixed({decimals}) }}}}'");
        let options = load_options_yaml(&yaml).unwrap();
        let rendered = options.tooltip_format.format(value);

        let fraction = rendered.split('.').nth(1).map_or(0, str::len);
        prop_assert_eq!(fraction, decimals);
    }
}
