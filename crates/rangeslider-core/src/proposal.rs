//! Proposed changes to a [`Data`] snapshot.
//!
//! A [`Proposal`] is a list of transformers. Each one reads the *current*
//! snapshot and yields the next value of a single field as a [`FieldValue`];
//! the variant names the field. When several transformers target the same
//! field, the last one wins.

use crate::data::{Data, Handle, Interval, Tooltip};
use crate::format::ValueFormat;
use crate::geometry::closest_to_step;
use crate::ids::{HandleId, IntervalId, TooltipId};
use crate::options::{GridConfig, Orientation};
use std::collections::BTreeSet;
use std::fmt;

/// Names a field of [`Data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataField {
    /// `handles`
    Handles,
    /// `handle_ids`
    HandleIds,
    /// `handles_stack_order`
    HandlesStackOrder,
    /// `active_handle_ids`
    ActiveHandleIds,
    /// `tooltips`
    Tooltips,
    /// `tooltip_ids`
    TooltipIds,
    /// `intervals`
    Intervals,
    /// `interval_ids`
    IntervalIds,
    /// `tooltip_collisions`
    TooltipCollisions,
    /// `min`
    Min,
    /// `max`
    Max,
    /// `step`
    Step,
    /// `orientation`
    Orientation,
    /// `css_class`
    CssClass,
    /// `tooltip_format`
    TooltipFormat,
    /// `grid_format`
    GridFormat,
    /// `grid`
    Grid,
}

/// The value of one [`Data`] field.
///
/// Variants mirror [`DataField`] one to one.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Handles(Vec<Handle>),
    HandleIds(Vec<HandleId>),
    HandlesStackOrder(Vec<HandleId>),
    ActiveHandleIds(BTreeSet<HandleId>),
    Tooltips(Vec<Tooltip>),
    TooltipIds(Vec<TooltipId>),
    Intervals(Vec<Interval>),
    IntervalIds(Vec<IntervalId>),
    TooltipCollisions(Vec<Vec<TooltipId>>),
    Min(f64),
    Max(f64),
    Step(f64),
    Orientation(Orientation),
    CssClass(String),
    TooltipFormat(ValueFormat),
    GridFormat(ValueFormat),
    Grid(GridConfig),
}

impl FieldValue {
    /// Read a field out of a snapshot.
    #[must_use]
    pub fn read(data: &Data, field: DataField) -> Self {
        match field {
            DataField::Handles => Self::Handles(data.handles.clone()),
            DataField::HandleIds => Self::HandleIds(data.handle_ids.clone()),
            DataField::HandlesStackOrder => {
                Self::HandlesStackOrder(data.handles_stack_order.clone())
            }
            DataField::ActiveHandleIds => Self::ActiveHandleIds(data.active_handle_ids.clone()),
            DataField::Tooltips => Self::Tooltips(data.tooltips.clone()),
            DataField::TooltipIds => Self::TooltipIds(data.tooltip_ids.clone()),
            DataField::Intervals => Self::Intervals(data.intervals.clone()),
            DataField::IntervalIds => Self::IntervalIds(data.interval_ids.clone()),
            DataField::TooltipCollisions => {
                Self::TooltipCollisions(data.tooltip_collisions.clone())
            }
            DataField::Min => Self::Min(data.min),
            DataField::Max => Self::Max(data.max),
            DataField::Step => Self::Step(data.step),
            DataField::Orientation => Self::Orientation(data.orientation),
            DataField::CssClass => Self::CssClass(data.css_class.clone()),
            DataField::TooltipFormat => Self::TooltipFormat(data.tooltip_format.clone()),
            DataField::GridFormat => Self::GridFormat(data.grid_format.clone()),
            DataField::Grid => Self::Grid(data.grid.clone()),
        }
    }

    /// The field this value belongs to.
    #[must_use]
    pub const fn field(&self) -> DataField {
        match self {
            Self::Handles(_) => DataField::Handles,
            Self::HandleIds(_) => DataField::HandleIds,
            Self::HandlesStackOrder(_) => DataField::HandlesStackOrder,
            Self::ActiveHandleIds(_) => DataField::ActiveHandleIds,
            Self::Tooltips(_) => DataField::Tooltips,
            Self::TooltipIds(_) => DataField::TooltipIds,
            Self::Intervals(_) => DataField::Intervals,
            Self::IntervalIds(_) => DataField::IntervalIds,
            Self::TooltipCollisions(_) => DataField::TooltipCollisions,
            Self::Min(_) => DataField::Min,
            Self::Max(_) => DataField::Max,
            Self::Step(_) => DataField::Step,
            Self::Orientation(_) => DataField::Orientation,
            Self::CssClass(_) => DataField::CssClass,
            Self::TooltipFormat(_) => DataField::TooltipFormat,
            Self::GridFormat(_) => DataField::GridFormat,
            Self::Grid(_) => DataField::Grid,
        }
    }

    /// Write this value into a snapshot.
    pub fn apply(self, data: &mut Data) {
        match self {
            Self::Handles(v) => data.handles = v,
            Self::HandleIds(v) => data.handle_ids = v,
            Self::HandlesStackOrder(v) => data.handles_stack_order = v,
            Self::ActiveHandleIds(v) => data.active_handle_ids = v,
            Self::Tooltips(v) => data.tooltips = v,
            Self::TooltipIds(v) => data.tooltip_ids = v,
            Self::Intervals(v) => data.intervals = v,
            Self::IntervalIds(v) => data.interval_ids = v,
            Self::TooltipCollisions(v) => data.tooltip_collisions = v,
            Self::Min(v) => data.min = v,
            Self::Max(v) => data.max = v,
            Self::Step(v) => data.step = v,
            Self::Orientation(v) => data.orientation = v,
            Self::CssClass(v) => data.css_class = v,
            Self::TooltipFormat(v) => data.tooltip_format = v,
            Self::GridFormat(v) => data.grid_format = v,
            Self::Grid(v) => data.grid = v,
        }
    }
}

type Transformer = Box<dyn FnOnce(&Data) -> FieldValue>;

/// Transformers evaluated together against one snapshot.
#[derive(Default)]
pub struct Proposal {
    transformers: Vec<Transformer>,
}

impl Proposal {
    /// Create an empty proposal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transformer computing one field from the current snapshot.
    #[must_use]
    pub fn with<F>(mut self, transformer: F) -> Self
    where
        F: FnOnce(&Data) -> FieldValue + 'static,
    {
        self.transformers.push(Box::new(transformer));
        self
    }

    /// Replace fields with fixed values, ignoring the current snapshot.
    #[must_use]
    pub fn replace(values: impl IntoIterator<Item = FieldValue>) -> Self {
        values
            .into_iter()
            .fold(Self::new(), |proposal, value| proposal.with(move |_| value))
    }

    /// Drag start: mark `id` active and raise it to the top of the stack.
    #[must_use]
    pub fn drag_start(id: HandleId) -> Self {
        Self::new()
            .with(move |_| FieldValue::ActiveHandleIds(BTreeSet::from([id])))
            .with(move |data| FieldValue::HandlesStackOrder(data.stack_order_raised(id)))
    }

    /// Drag move: snap `raw` onto the track and assign it to `id`.
    #[must_use]
    pub fn drag_move(id: HandleId, raw: f64) -> Self {
        Self::new().with(move |data| {
            let value = closest_to_step(data.min, data.max, data.step, raw);
            FieldValue::Handles(data.handles_with_value(id, value))
        })
    }

    /// Drag end: clear the active set.
    #[must_use]
    pub fn drag_end() -> Self {
        Self::new().with(|_| FieldValue::ActiveHandleIds(BTreeSet::new()))
    }

    /// Renderer feedback: tooltip groups that overlap after layout.
    #[must_use]
    pub fn tooltip_collisions(groups: Vec<Vec<TooltipId>>) -> Self {
        Self::new().with(move |_| FieldValue::TooltipCollisions(groups))
    }

    /// Number of transformers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    /// Check if there is nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Evaluate every transformer against `current` and merge the results
    /// over a copy of it.
    #[must_use]
    pub fn evaluate(self, current: &Data) -> Data {
        let values: Vec<FieldValue> = self
            .transformers
            .into_iter()
            .map(|transform| transform(current))
            .collect();

        let mut candidate = current.clone();
        for value in values {
            value.apply(&mut candidate);
        }
        candidate
    }
}

impl fmt::Debug for Proposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proposal")
            .field("transformers", &self.transformers.len())
            .finish()
    }
}
