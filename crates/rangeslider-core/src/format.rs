//! Value formatting strategies for tooltip contents and grid labels.

use std::fmt;
use std::sync::Arc;

/// Turns a handle or grid value into display text.
pub trait Formatter {
    /// Format a single value.
    fn format(&self, value: f64) -> String;
}

impl<F> Formatter for F
where
    F: Fn(f64) -> String,
{
    fn format(&self, value: f64) -> String {
        self(value)
    }
}

/// Formatting descriptor stored in options and data snapshots.
#[derive(Clone, Default)]
pub enum ValueFormat {
    /// `Display` of the number: `50.0` renders as `50`.
    #[default]
    Plain,
    /// Caller-supplied strategy.
    Custom(Arc<dyn Formatter>),
}

impl ValueFormat {
    /// Wrap a formatter.
    pub fn custom(formatter: impl Formatter + 'static) -> Self {
        Self::Custom(Arc::new(formatter))
    }

    /// Format a value with this descriptor.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Plain => value.to_string(),
            Self::Custom(formatter) => formatter.format(value),
        }
    }

    /// Check if this is the plain formatter.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        matches!(self, Self::Plain)
    }
}

impl PartialEq for ValueFormat {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Plain, Self::Plain) => true,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "Plain"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
