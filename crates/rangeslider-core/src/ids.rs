//! Deterministic entity naming.
//!
//! Entities inside [`Data`](crate::Data) are addressed by integer slots. The
//! string form (`handle_0`, `tooltip_1`, ...) only appears at the external
//! boundary: in [`Options`](crate::Options) round-trips and in the render
//! [`State`](crate::State).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of entity an identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Draggable value marker
    Handle,
    /// Label attached to a handle
    Tooltip,
    /// Track segment between handles
    Interval,
    /// Tick mark of the background scale
    GridCell,
    /// Tooltip synthesized from a collision group
    MergedTooltip,
}

impl EntityKind {
    /// Namespace prefix used by [`make_id`].
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Handle => "handle",
            Self::Tooltip => "tooltip",
            Self::Interval => "interval",
            Self::GridCell => "grid-cell",
            Self::MergedTooltip => "merged-tooltip",
        }
    }
}

/// Build the external id of the `index`-th entity of `kind`.
///
/// Prefixes never contain `_`, so ids of different kinds cannot collide.
#[must_use]
pub fn make_id(kind: EntityKind, index: usize) -> String {
    format!("{}_{index}", kind.prefix())
}

macro_rules! slot_id {
    ($(#[$meta:meta])* $name:ident => $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub usize);

        impl $name {
            /// Slot index inside its entity table.
            #[must_use]
            pub const fn index(self) -> usize {
                self.0
            }

            /// External string form.
            #[must_use]
            pub fn to_external(self) -> String {
                make_id($kind, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $kind.prefix(), self.0)
            }
        }
    };
}

slot_id!(
    /// Slot of a handle in [`Data::handles`](crate::Data::handles).
    HandleId => EntityKind::Handle
);
slot_id!(
    /// Slot of a tooltip in [`Data::tooltips`](crate::Data::tooltips).
    TooltipId => EntityKind::Tooltip
);
slot_id!(
    /// Slot of an interval in [`Data::intervals`](crate::Data::intervals).
    IntervalId => EntityKind::Interval
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_make_id_is_deterministic() {
        assert_eq!(make_id(EntityKind::Handle, 0), "handle_0");
        assert_eq!(make_id(EntityKind::Handle, 0), make_id(EntityKind::Handle, 0));
        assert_eq!(make_id(EntityKind::Interval, 12), "interval_12");
        assert_eq!(make_id(EntityKind::GridCell, 3), "grid-cell_3");
    }

    #[test]
    fn test_make_id_kinds_never_collide() {
        let kinds = [
            EntityKind::Handle,
            EntityKind::Tooltip,
            EntityKind::Interval,
            EntityKind::GridCell,
            EntityKind::MergedTooltip,
        ];
        let mut seen = HashSet::new();
        for kind in kinds {
            for index in 0..50 {
                assert!(seen.insert(make_id(kind, index)));
            }
        }
    }

    #[test]
    fn test_slot_id_display_matches_make_id() {
        assert_eq!(HandleId(2).to_string(), make_id(EntityKind::Handle, 2));
        assert_eq!(TooltipId(0).to_external(), "tooltip_0");
        assert_eq!(IntervalId(4).index(), 4);
    }
}
