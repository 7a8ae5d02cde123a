//! Internal entity graph owned by the [`Model`](crate::Model).
//!
//! Entities live in slot tables (`handles`, `tooltips`, `intervals`) indexed
//! by their typed id; the `*_ids` sequences give position order. Nothing here
//! enforces consistency: that is the job of [`validate`](crate::validate).

use crate::format::ValueFormat;
use crate::ids::{HandleId, IntervalId, TooltipId};
use crate::options::{GridConfig, Orientation};
use std::collections::BTreeSet;

/// A draggable value marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    /// Own slot
    pub id: HandleId,
    /// Current value
    pub value: f64,
    /// Attached tooltip
    pub tooltip_id: TooltipId,
    /// Interval on the track-start side
    pub lhs_interval_id: IntervalId,
    /// Interval on the track-end side
    pub rhs_interval_id: IntervalId,
}

/// A label attached to a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    /// Own slot
    pub id: TooltipId,
    /// Whether the label is shown
    pub is_visible: bool,
    /// Owning handle
    pub handle_id: HandleId,
}

/// A track segment between two handles, or a handle and a track end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// Own slot
    pub id: IntervalId,
    /// Whether the segment is highlighted
    pub is_visible: bool,
    /// Handle on the track-start side (`None` = track start)
    pub lhs_handle_id: Option<HandleId>,
    /// Handle on the track-end side (`None` = track end)
    pub rhs_handle_id: Option<HandleId>,
}

/// Immutable snapshot of the whole slider.
#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    /// Handle slot table
    pub handles: Vec<Handle>,
    /// Handles in track order
    pub handle_ids: Vec<HandleId>,
    /// Handles in paint order, last on top
    pub handles_stack_order: Vec<HandleId>,
    /// Handles currently being dragged
    pub active_handle_ids: BTreeSet<HandleId>,
    /// Tooltip slot table
    pub tooltips: Vec<Tooltip>,
    /// Tooltips in track order, one per handle
    pub tooltip_ids: Vec<TooltipId>,
    /// Interval slot table
    pub intervals: Vec<Interval>,
    /// Intervals in track order, one more than handles
    pub interval_ids: Vec<IntervalId>,
    /// Overlapping tooltip groups reported by the renderer
    pub tooltip_collisions: Vec<Vec<TooltipId>>,
    /// Track start
    pub min: f64,
    /// Track end
    pub max: f64,
    /// Quantization step
    pub step: f64,
    /// Track orientation
    pub orientation: Orientation,
    /// Class attached to the track
    pub css_class: String,
    /// Tooltip content formatter
    pub tooltip_format: ValueFormat,
    /// Grid label formatter
    pub grid_format: ValueFormat,
    /// Background scale
    pub grid: GridConfig,
}

impl Data {
    /// Look up a handle by id.
    #[must_use]
    pub fn handle(&self, id: HandleId) -> Option<&Handle> {
        self.handles.get(id.index()).filter(|h| h.id == id)
    }

    /// Look up a tooltip by id.
    #[must_use]
    pub fn tooltip(&self, id: TooltipId) -> Option<&Tooltip> {
        self.tooltips.get(id.index()).filter(|t| t.id == id)
    }

    /// Look up an interval by id.
    #[must_use]
    pub fn interval(&self, id: IntervalId) -> Option<&Interval> {
        self.intervals.get(id.index()).filter(|i| i.id == id)
    }

    /// Handle values in track order; unknown ids are skipped.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.handle_ids
            .iter()
            .filter_map(|&id| self.handle(id).map(|h| h.value))
            .collect()
    }

    /// Position of a handle within `handle_ids`.
    #[must_use]
    pub fn track_index(&self, id: HandleId) -> Option<usize> {
        self.handle_ids.iter().position(|&h| h == id)
    }

    /// Copy of the handle table with one value replaced.
    #[must_use]
    pub fn handles_with_value(&self, id: HandleId, value: f64) -> Vec<Handle> {
        self.handles
            .iter()
            .map(|h| {
                if h.id == id {
                    Handle { value, ..h.clone() }
                } else {
                    h.clone()
                }
            })
            .collect()
    }

    /// Stack order with `id` moved to the top.
    #[must_use]
    pub fn stack_order_raised(&self, id: HandleId) -> Vec<HandleId> {
        let mut order: Vec<HandleId> = self
            .handles_stack_order
            .iter()
            .copied()
            .filter(|&h| h != id)
            .collect();
        order.push(id);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::options_to_data;
    use crate::options::{GridOption, OneOrMany, Options};

    fn two_handles() -> Data {
        options_to_data(&Options {
            value: OneOrMany::Many(vec![20.0, 60.0]),
            min: 0.0,
            max: 100.0,
            step: 1.0,
            orientation: Orientation::Horizontal,
            tooltips: OneOrMany::One(true),
            intervals: OneOrMany::One(false),
            grid: GridOption::Toggle(false),
            css_class: String::new(),
            tooltip_format: ValueFormat::Plain,
            grid_format: ValueFormat::Plain,
        })
    }

    #[test]
    fn test_lookup_rejects_mismatched_slot() {
        let mut data = two_handles();
        assert!(data.handle(HandleId(1)).is_some());
        assert!(data.handle(HandleId(7)).is_none());

        data.handles[1].id = HandleId(5);
        assert!(data.handle(HandleId(1)).is_none());
    }

    #[test]
    fn test_values_follow_track_order() {
        let mut data = two_handles();
        assert_eq!(data.values(), vec![20.0, 60.0]);
        data.handle_ids.reverse();
        assert_eq!(data.values(), vec![60.0, 20.0]);
    }

    #[test]
    fn test_handles_with_value_leaves_source_untouched() {
        let data = two_handles();
        let handles = data.handles_with_value(HandleId(0), 35.0);
        assert_eq!(handles[0].value, 35.0);
        assert_eq!(handles[1].value, 60.0);
        assert_eq!(data.handles[0].value, 20.0);
    }

    #[test]
    fn test_stack_order_raised() {
        let data = two_handles();
        assert_eq!(data.handles_stack_order, vec![HandleId(0), HandleId(1)]);
        assert_eq!(
            data.stack_order_raised(HandleId(0)),
            vec![HandleId(1), HandleId(0)]
        );
        assert_eq!(data.track_index(HandleId(1)), Some(1));
    }
}
