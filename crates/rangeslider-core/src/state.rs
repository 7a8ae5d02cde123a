//! Render state derived from a [`Data`] snapshot.
//!
//! [`State`] is everything a renderer needs: percentages along the track,
//! visibility flags and label text, keyed by external string ids. Tooltips
//! listed together in `tooltip_collisions` are replaced by one merged
//! tooltip each; the originals are not emitted.

use crate::data::{Data, Handle};
use crate::geometry::relative_position;
use crate::ids::{make_id, EntityKind, TooltipId};
use crate::options::Orientation;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const TARGET: &str = "rangeslider_core::state";

/// Joins two merged values whose separating interval is visible.
pub const CONTINUOUS_CONNECTOR: &str = " - ";

/// Joins two merged values whose separating interval is hidden.
pub const DISJOINT_CONNECTOR: &str = ", ";

/// Upper bound on grid segments at the finest level.
///
/// A first-level fan-out above the bound is lowered to it. A deeper level
/// that would pass it ends the nesting.
pub const MAX_GRID_SEGMENTS: u64 = 1000;

/// Declarative description of the whole control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    /// Track settings
    pub track: TrackState,
    /// Handles in paint order, top-most last
    pub handles: Vec<HandleState>,
    /// Track segments in track order
    pub intervals: Vec<IntervalState>,
    /// Unmerged tooltips in track order, then merged ones
    pub tooltips: Vec<TooltipState>,
    /// Background scale
    pub grid: GridState,
}

/// Track passthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackState {
    /// Track orientation
    pub orientation: Orientation,
    /// Class attached to the track
    pub css_class: String,
}

/// One handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleState {
    /// External id
    pub id: String,
    /// Handle value
    pub value: f64,
    /// Percent along the track
    pub position: f64,
    /// Being dragged
    pub is_active: bool,
}

/// One track segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalState {
    /// External id
    pub id: String,
    /// Start percent
    pub from: f64,
    /// End percent
    pub to: f64,
    /// Highlighted
    pub is_visible: bool,
}

/// One tooltip, either a handle's own or a merged one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipState {
    /// External id
    pub id: String,
    /// Tooltips this one stands for (itself when unmerged)
    pub source_ids: Vec<String>,
    /// Percent along the track
    pub position: f64,
    /// Formatted text
    pub content: String,
    /// Shown
    pub is_visible: bool,
    /// Synthesized from a collision group
    pub is_merged: bool,
}

/// Background scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridState {
    /// Shown
    pub is_visible: bool,
    /// Tick marks ordered by position
    pub cells: Vec<GridCellState>,
}

/// One tick mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCellState {
    /// External id
    pub id: String,
    /// Track value at the mark
    pub value: f64,
    /// Percent along the track
    pub position: f64,
    /// Nesting level, 1 = coarsest
    pub level: u32,
    /// Formatted value
    pub label: String,
    /// Label shown (level 1 only)
    pub is_label_visible: bool,
}

/// Derive the render state of a snapshot.
#[must_use]
pub fn data_to_state(data: &Data) -> State {
    State {
        track: TrackState {
            orientation: data.orientation,
            css_class: data.css_class.clone(),
        },
        handles: handles(data),
        intervals: intervals(data),
        tooltips: tooltips(data),
        grid: GridState {
            is_visible: data.grid.is_visible,
            cells: grid_cells(data),
        },
    }
}

fn position_of(data: &Data, value: f64) -> f64 {
    if data.min == data.max {
        0.0
    } else {
        relative_position(data.min, data.max, value)
    }
}

fn handles(data: &Data) -> Vec<HandleState> {
    data.handles_stack_order
        .iter()
        .filter_map(|&id| data.handle(id))
        .map(|h| HandleState {
            id: h.id.to_external(),
            value: h.value,
            position: position_of(data, h.value),
            is_active: data.active_handle_ids.contains(&h.id),
        })
        .collect()
}

fn intervals(data: &Data) -> Vec<IntervalState> {
    let handle_position = |id| data.handle(id).map(|h: &Handle| position_of(data, h.value));

    data.interval_ids
        .iter()
        .filter_map(|&id| data.interval(id))
        .map(|interval| IntervalState {
            id: interval.id.to_external(),
            from: interval
                .lhs_handle_id
                .and_then(handle_position)
                .unwrap_or(0.0),
            to: interval
                .rhs_handle_id
                .and_then(handle_position)
                .unwrap_or(100.0),
            is_visible: interval.is_visible,
        })
        .collect()
}

// ============================================================================
// Tooltips
// ============================================================================

struct Member<'a> {
    tooltip_id: TooltipId,
    is_visible: bool,
    track_index: usize,
    handle: &'a Handle,
}

fn tooltips(data: &Data) -> Vec<TooltipState> {
    let groups: Vec<Vec<Member<'_>>> = data
        .tooltip_collisions
        .iter()
        .map(|group| resolve_group(data, group))
        .filter(|members| members.len() >= 2)
        .collect();

    let merged_ids: HashSet<TooltipId> = groups
        .iter()
        .flatten()
        .map(|member| member.tooltip_id)
        .collect();

    let originals = data
        .tooltip_ids
        .iter()
        .filter(|&&id| !merged_ids.contains(&id))
        .filter_map(|&id| {
            let tooltip = data.tooltip(id)?;
            let handle = data.handle(tooltip.handle_id)?;
            Some(TooltipState {
                id: id.to_external(),
                source_ids: vec![id.to_external()],
                position: position_of(data, handle.value),
                content: data.tooltip_format.format(handle.value),
                is_visible: tooltip.is_visible,
                is_merged: false,
            })
        });

    let merged = groups
        .iter()
        .enumerate()
        .filter_map(|(index, members)| merge_group(data, index, members));

    originals.chain(merged).collect()
}

fn resolve_group<'a>(data: &'a Data, group: &[TooltipId]) -> Vec<Member<'a>> {
    let mut seen = HashSet::new();
    let mut members: Vec<Member<'a>> = group
        .iter()
        .filter(|&&id| seen.insert(id))
        .filter_map(|&id| {
            let tooltip = data.tooltip(id)?;
            let handle = data.handle(tooltip.handle_id)?;
            Some(Member {
                tooltip_id: id,
                is_visible: tooltip.is_visible,
                track_index: data.track_index(handle.id)?,
                handle,
            })
        })
        .collect();
    members.sort_by_key(|member| member.track_index);
    members
}

fn merge_group(data: &Data, index: usize, members: &[Member<'_>]) -> Option<TooltipState> {
    let (first, rest) = members.split_first()?;
    let last = rest.last().unwrap_or(first);

    let mut parts = vec![data.tooltip_format.format(first.handle.value)];
    let mut previous = first;
    for member in rest {
        if member.handle.value != previous.handle.value {
            let connector = if separated_by_visible(data, previous.track_index, member.track_index)
            {
                CONTINUOUS_CONNECTOR
            } else {
                DISJOINT_CONNECTOR
            };
            parts.push(connector.to_string());
            parts.push(data.tooltip_format.format(member.handle.value));
        }
        previous = member;
    }
    if data.orientation == Orientation::Vertical {
        parts.reverse();
    }

    let from = position_of(data, first.handle.value);
    let to = position_of(data, last.handle.value);

    Some(TooltipState {
        id: make_id(EntityKind::MergedTooltip, index),
        source_ids: members.iter().map(|m| m.tooltip_id.to_external()).collect(),
        position: (from + to) / 2.0,
        content: parts.concat(),
        is_visible: members.iter().any(|m| m.is_visible),
        is_merged: true,
    })
}

// Every interval between the two handles must be visible.
fn separated_by_visible(data: &Data, from: usize, to: usize) -> bool {
    data.handle_ids[from..to].iter().all(|&id| {
        data.handle(id)
            .and_then(|h| data.interval(h.rhs_interval_id))
            .is_some_and(|interval| interval.is_visible)
    })
}

// ============================================================================
// Grid
// ============================================================================

struct Mark {
    index: u64,
    segments: u64,
    level: u32,
}

fn grid_cells(data: &Data) -> Vec<GridCellState> {
    if data.min == data.max {
        return Vec::new();
    }

    let mut marks = Vec::new();
    let mut segments: u64 = 1;
    for (depth, &fan_out) in data.grid.num_cells.iter().enumerate() {
        if fan_out == 0 {
            break;
        }
        let mut fan_out = u64::from(fan_out);
        if depth == 0 && fan_out > MAX_GRID_SEGMENTS {
            tracing::trace!(target: TARGET, fan_out, "first grid level capped");
            fan_out = MAX_GRID_SEGMENTS;
        }
        let Some(next) = segments
            .checked_mul(fan_out)
            .filter(|&next| next <= MAX_GRID_SEGMENTS)
        else {
            tracing::trace!(target: TARGET, depth, "grid subdivision truncated");
            break;
        };
        let level = depth as u32 + 1;
        // Multiples of `fan_out` coincide with a coarser boundary.
        marks.extend(
            (0..=next)
                .filter(|index| depth == 0 || index % fan_out != 0)
                .map(|index| Mark {
                    index,
                    segments: next,
                    level,
                }),
        );
        segments = next;
    }

    let finest = segments;
    marks.sort_by_key(|mark| mark.index * (finest / mark.segments));

    let span = data.max - data.min;
    marks
        .iter()
        .enumerate()
        .map(|(i, mark)| {
            let index = mark.index as f64;
            let segments = mark.segments as f64;
            // Divide last so exact multiples stay exact.
            let value = data.min + index * span / segments;
            GridCellState {
                id: make_id(EntityKind::GridCell, i),
                value,
                position: index * 100.0 / segments,
                level: mark.level,
                label: data.grid_format.format(value),
                is_label_visible: mark.level == 1,
            }
        })
        .collect()
}
