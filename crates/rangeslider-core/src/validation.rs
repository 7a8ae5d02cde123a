//! Cross-entity invariant checks over [`Data`].
//!
//! Every check runs independently so a single proposal reports all of its
//! problems at once. The range-dependent checks are skipped while `min`/`max`
//! are themselves invalid.

use crate::data::Data;
use crate::geometry::is_sorted_by;
use std::fmt;
use thiserror::Error;

/// A violated invariant. Callers branch on the kind, not the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Violation {
    /// `max` is not greater than `min`
    #[error("max must be greater than min")]
    InvalidRange,
    /// A handle lies outside `[min, max]`
    #[error("handle value is outside of [min, max]")]
    ValueOutOfRange,
    /// Handle values decrease somewhere along the track
    #[error("handle values are not in ascending order")]
    ValuesNotSorted,
    /// `step` is negative or larger than the track
    #[error("step must lie within [0, max - min]")]
    StepOutOfRange,
    /// Tooltip count differs from handle count
    #[error("tooltip count does not match handle count")]
    TooltipCountMismatch,
    /// Interval count is not handle count + 1
    #[error("interval count must be handle count + 1")]
    IntervalCountMismatch,
    /// An id or cross-reference points at no entity
    #[error("reference to an unknown entity")]
    UnknownEntity,
}

impl Violation {
    /// Stable machine-readable tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::InvalidRange => "invalidRange",
            Self::ValueOutOfRange => "valueOutOfRange",
            Self::ValuesNotSorted => "valuesNotSorted",
            Self::StepOutOfRange => "stepOutOfRange",
            Self::TooltipCountMismatch => "tooltipCountMismatch",
            Self::IntervalCountMismatch => "intervalCountMismatch",
            Self::UnknownEntity => "unknownEntity",
        }
    }
}

/// Non-empty, ordered list of violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    /// Violations in check order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Check if a kind was reported.
    #[must_use]
    pub fn contains(&self, violation: Violation) -> bool {
        self.0.contains(&violation)
    }

    /// Number of violations (at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no violations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tags of every violation, in order.
    #[must_use]
    pub fn tags(&self) -> Vec<&'static str> {
        self.0.iter().map(|v| v.tag()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "invalid slider data: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Result of [`validate`]: the graph is untouched either way.
pub type ValidationResult = Result<(), ValidationErrors>;

/// Check every invariant of `data`.
pub fn validate(data: &Data) -> ValidationResult {
    let mut violations = Vec::new();
    let range_ok = data.max > data.min;

    if !range_ok {
        violations.push(Violation::InvalidRange);
    }

    let values = data.values();
    if range_ok && values.iter().any(|&v| !(data.min..=data.max).contains(&v)) {
        violations.push(Violation::ValueOutOfRange);
    }
    if !is_sorted_by(&values, |a, b| a <= b) {
        violations.push(Violation::ValuesNotSorted);
    }
    if range_ok && !(0.0..=data.max - data.min).contains(&data.step) {
        violations.push(Violation::StepOutOfRange);
    }
    if data.tooltip_ids.len() != data.handle_ids.len() {
        violations.push(Violation::TooltipCountMismatch);
    }
    if data.interval_ids.len() != data.handle_ids.len() + 1 {
        violations.push(Violation::IntervalCountMismatch);
    }
    if !references_resolve(data) {
        violations.push(Violation::UnknownEntity);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(violations))
    }
}

fn references_resolve(data: &Data) -> bool {
    let handles_ok = data
        .handle_ids
        .iter()
        .chain(&data.handles_stack_order)
        .chain(&data.active_handle_ids)
        .all(|&id| data.handle(id).is_some());

    let cross_ok = data.handle_ids.iter().all(|&id| {
        data.handle(id).is_some_and(|h| {
            data.tooltip(h.tooltip_id).is_some()
                && data.interval(h.lhs_interval_id).is_some()
                && data.interval(h.rhs_interval_id).is_some()
        })
    });

    let tooltips_ok = data
        .tooltip_ids
        .iter()
        .chain(data.tooltip_collisions.iter().flatten())
        .all(|&id| {
            data.tooltip(id)
                .is_some_and(|t| data.handle(t.handle_id).is_some())
        });

    let intervals_ok = data.interval_ids.iter().all(|&id| {
        data.interval(id).is_some_and(|i| {
            i.lhs_handle_id
                .into_iter()
                .chain(i.rhs_handle_id)
                .all(|h| data.handle(h).is_some())
        })
    });

    handles_ok && cross_ok && tooltips_ok && intervals_ok
}
