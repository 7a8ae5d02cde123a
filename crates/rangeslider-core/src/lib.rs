//! State core for range-selection controls.
//!
//! This crate turns a slider configuration into a validated entity graph and
//! that graph into a declarative render description:
//! - Configuration: [`Options`], normalized by [`normalize`]
//! - Entity graph: [`Data`], built by [`options_to_data`]
//! - Invariants: [`validate`] returning every [`Violation`] at once
//! - State machine: [`Model`] with [`Proposal`]s and [`ModelEvent`]s
//! - Render state: [`State`], derived by [`data_to_state`]
//!
//! Nothing here draws or captures input; renderers consume [`State`] and
//! feed back [`Proposal`]s.

pub mod convert;
pub mod data;
pub mod format;
pub mod geometry;
pub mod ids;
pub mod model;
pub mod options;
pub mod proposal;
pub mod state;
pub mod validation;

pub use convert::{data_to_options, normalized_to_data, options_to_data};
pub use data::{Data, Handle, Interval, Tooltip};
pub use format::{Formatter, ValueFormat};
pub use geometry::{
    closest_to_step, decimal_places, fill_array_with, is_sorted_by, relative_position,
};
pub use ids::{make_id, EntityKind, HandleId, IntervalId, TooltipId};
pub use model::{Model, ModelEvent, ProposalOutcome, SubscriptionId};
pub use options::{
    normalize, GridConfig, GridOption, NormalizedOptions, OneOrMany, Options, Orientation,
};
pub use proposal::{DataField, FieldValue, Proposal};
pub use state::{
    data_to_state, GridCellState, GridState, HandleState, IntervalState, State, TooltipState,
    TrackState,
};
pub use validation::{validate, ValidationErrors, ValidationResult, Violation};
