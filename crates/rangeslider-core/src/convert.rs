//! Conversion between public [`Options`] and the internal [`Data`] graph.

use crate::data::{Data, Handle, Interval, Tooltip};
use crate::geometry::closest_to_step;
use crate::ids::{HandleId, IntervalId, TooltipId};
use crate::options::{
    normalize, GridOption, NormalizedOptions, OneOrMany, Options, DEFAULT_INTERVAL_VISIBLE,
    DEFAULT_TOOLTIP_VISIBLE,
};
use std::collections::BTreeSet;

/// Build the entity graph from a configuration.
///
/// Handle values are quantized and clamped on the way in, before any
/// validation runs.
#[must_use]
pub fn options_to_data(options: &Options) -> Data {
    normalized_to_data(&normalize(options))
}

/// Build the entity graph from an already-normalized configuration.
#[must_use]
pub fn normalized_to_data(options: &NormalizedOptions) -> Data {
    let count = options.values.len();

    let handles: Vec<Handle> = options
        .values
        .iter()
        .enumerate()
        .map(|(i, &raw)| Handle {
            id: HandleId(i),
            value: closest_to_step(options.min, options.max, options.step, raw),
            tooltip_id: TooltipId(i),
            lhs_interval_id: IntervalId(i),
            rhs_interval_id: IntervalId(i + 1),
        })
        .collect();

    let tooltips: Vec<Tooltip> = (0..count)
        .map(|i| Tooltip {
            id: TooltipId(i),
            is_visible: options
                .tooltips
                .get(i)
                .copied()
                .unwrap_or(DEFAULT_TOOLTIP_VISIBLE),
            handle_id: HandleId(i),
        })
        .collect();

    let intervals: Vec<Interval> = (0..=count)
        .map(|j| Interval {
            id: IntervalId(j),
            is_visible: options
                .intervals
                .get(j)
                .copied()
                .unwrap_or(DEFAULT_INTERVAL_VISIBLE),
            lhs_handle_id: j.checked_sub(1).map(HandleId),
            rhs_handle_id: (j < count).then_some(HandleId(j)),
        })
        .collect();

    let handle_ids: Vec<HandleId> = handles.iter().map(|h| h.id).collect();

    Data {
        handles_stack_order: handle_ids.clone(),
        handle_ids,
        handles,
        active_handle_ids: BTreeSet::new(),
        tooltip_ids: tooltips.iter().map(|t| t.id).collect(),
        tooltips,
        interval_ids: intervals.iter().map(|i| i.id).collect(),
        intervals,
        tooltip_collisions: Vec::new(),
        min: options.min,
        max: options.max,
        step: options.step,
        orientation: options.orientation,
        css_class: options.css_class.clone(),
        tooltip_format: options.tooltip_format.clone(),
        grid_format: options.grid_format.clone(),
        grid: options.grid.clone(),
    }
}

/// Project the entity graph back onto the public configuration shape.
///
/// Per-entity fields come back as explicit lists in track order.
#[must_use]
pub fn data_to_options(data: &Data) -> Options {
    let tooltips = data
        .tooltip_ids
        .iter()
        .filter_map(|&id| data.tooltip(id).map(|t| t.is_visible))
        .collect();
    let intervals = data
        .interval_ids
        .iter()
        .filter_map(|&id| data.interval(id).map(|i| i.is_visible))
        .collect();

    Options {
        value: OneOrMany::Many(data.values()),
        min: data.min,
        max: data.max,
        step: data.step,
        orientation: data.orientation,
        tooltips: OneOrMany::Many(tooltips),
        intervals: OneOrMany::Many(intervals),
        grid: GridOption::Config(data.grid.clone()),
        css_class: data.css_class.clone(),
        tooltip_format: data.tooltip_format.clone(),
        grid_format: data.grid_format.clone(),
    }
}
