//! The stateful core: one validated snapshot, replaced wholesale.
//!
//! Every change goes through [`Model::propose`]: evaluate the transformers
//! against the current snapshot, merge, validate, then either swap in the
//! candidate and emit [`ModelEvent::Updated`] or keep the old snapshot and
//! emit [`ModelEvent::ValidationFailed`]. There is no other mutation path.
//!
//! # Event ordering
//!
//! Emission is synchronous. A reactive listener may answer an event with a
//! follow-up [`Proposal`]; it runs immediately and its own events reach all
//! listeners before the remaining listeners see the outer event
//! (depth-first). A listener that always answers with a proposal recurses
//! without bound; avoiding that is the listener's job.
//!
//! # Examples
//!
//! ```
//! use rangeslider_core::{
//!     FieldValue, GridOption, HandleId, Model, OneOrMany, Options, Orientation, Proposal,
//!     ValueFormat,
//! };
//!
//! let mut model = Model::from_options(&Options {
//!     value: OneOrMany::One(50.0),
//!     min: 0.0,
//!     max: 100.0,
//!     step: 1.0,
//!     orientation: Orientation::Horizontal,
//!     tooltips: OneOrMany::One(true),
//!     intervals: OneOrMany::One(false),
//!     grid: GridOption::Toggle(false),
//!     css_class: String::new(),
//!     tooltip_format: ValueFormat::Plain,
//!     grid_format: ValueFormat::Plain,
//! });
//!
//! let outcome = model.propose(Proposal::drag_move(HandleId(0), 70.4));
//! assert!(outcome.is_applied());
//! assert_eq!(model.data().values(), vec![70.0]);
//!
//! let outcome = model.set([FieldValue::Min(500.0)]);
//! assert!(outcome.is_rejected());
//! assert_eq!(model.data().min, 0.0);
//! ```

use crate::convert::options_to_data;
use crate::data::Data;
use crate::options::Options;
use crate::proposal::{DataField, FieldValue, Proposal};
use crate::state::{data_to_state, State};
use crate::validation::{validate, ValidationErrors};
use std::fmt;
use std::sync::Arc;

const TARGET: &str = "rangeslider_core::model";

/// Notification sent to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// A proposal was accepted
    Updated {
        /// Revision of the new snapshot
        revision: u64,
        /// The new snapshot
        data: Arc<Data>,
    },
    /// A proposal was rejected; the snapshot is unchanged
    ValidationFailed {
        /// Every violated invariant, in check order
        errors: ValidationErrors,
    },
}

/// What [`Model::propose`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum ProposalOutcome {
    /// Nothing was proposed; no event was emitted
    Unchanged,
    /// The candidate replaced the snapshot
    Applied {
        /// Revision of the new snapshot
        revision: u64,
    },
    /// The candidate failed validation
    Rejected(ValidationErrors),
}

impl ProposalOutcome {
    /// Check if the snapshot was replaced.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Check if validation failed.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Handle returned by [`Model::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&ModelEvent) -> Option<Proposal>>;

struct Snapshot {
    data: Arc<Data>,
    revision: u64,
}

/// Owner of the current [`Data`] snapshot.
pub struct Model {
    current: Snapshot,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Model {
    /// Seed a model with a snapshot.
    ///
    /// Seed violations are logged, not returned: the model stays usable and
    /// a later valid proposal can repair it.
    pub fn new(data: Data) -> Self {
        if let Err(errors) = validate(&data) {
            tracing::warn!(
                target: TARGET,
                violations = ?errors.tags(),
                "seed data failed validation"
            );
        }
        Self {
            current: Snapshot {
                data: Arc::new(data),
                revision: 0,
            },
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Build the snapshot from a configuration and seed a model with it.
    pub fn from_options(options: &Options) -> Self {
        Self::new(options_to_data(options))
    }

    /// Read one field.
    #[must_use]
    pub fn get(&self, field: DataField) -> FieldValue {
        FieldValue::read(&self.current.data, field)
    }

    /// Shared handle to the whole snapshot.
    #[must_use]
    pub fn get_all(&self) -> Arc<Data> {
        Arc::clone(&self.current.data)
    }

    /// Borrow the current snapshot.
    #[must_use]
    pub fn data(&self) -> &Data {
        &self.current.data
    }

    /// Number of accepted proposals so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.current.revision
    }

    /// Render state of the current snapshot.
    #[must_use]
    pub fn state(&self) -> State {
        data_to_state(&self.current.data)
    }

    /// Register a listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&ModelEvent) + 'static,
    {
        self.subscribe_reactive(move |event| {
            listener(event);
            None
        })
    }

    /// Register a listener that may answer with a follow-up proposal.
    pub fn subscribe_reactive<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&ModelEvent) -> Option<Proposal> + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Replace fields with the given values.
    pub fn set(&mut self, values: impl IntoIterator<Item = FieldValue>) -> ProposalOutcome {
        self.propose(Proposal::replace(values))
    }

    /// Evaluate, validate and either swap or reject.
    pub fn propose(&mut self, proposal: Proposal) -> ProposalOutcome {
        run(&mut self.current, &self.listeners, proposal)
    }
}

fn run(
    current: &mut Snapshot,
    listeners: &[(SubscriptionId, Listener)],
    proposal: Proposal,
) -> ProposalOutcome {
    if proposal.is_empty() {
        return ProposalOutcome::Unchanged;
    }

    let candidate = proposal.evaluate(&current.data);
    match validate(&candidate) {
        Ok(()) => {
            current.revision += 1;
            current.data = Arc::new(candidate);
            let revision = current.revision;
            tracing::debug!(target: TARGET, revision, "proposal applied");

            let event = ModelEvent::Updated {
                revision,
                data: Arc::clone(&current.data),
            };
            emit(current, listeners, &event);
            ProposalOutcome::Applied { revision }
        }
        Err(errors) => {
            tracing::debug!(
                target: TARGET,
                violations = ?errors.tags(),
                "proposal rejected"
            );
            let event = ModelEvent::ValidationFailed {
                errors: errors.clone(),
            };
            emit(current, listeners, &event);
            ProposalOutcome::Rejected(errors)
        }
    }
}

fn emit(current: &mut Snapshot, listeners: &[(SubscriptionId, Listener)], event: &ModelEvent) {
    tracing::trace!(target: TARGET, listeners = listeners.len(), "emitting model event");
    for (_, listener) in listeners {
        if let Some(follow_up) = listener(event) {
            run(current, listeners, follow_up);
        }
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("revision", &self.current.revision)
            .field("data", &self.current.data)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
