//! Typed identifier newtypes backed by random UUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declares an opaque, ordered, randomly generated identifier.
macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Station`](crate::station::Station).
    StationId
);

define_id!(
    /// A living target (a character in the world).
    ActorId
);

define_id!(
    /// Handle to a node in the host scene graph (parts, billboards, labels).
    NodeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_never_hand_out_the_same_node_twice() {
        let nodes: std::collections::BTreeSet<NodeId> = (0..64).map(|_| NodeId::new()).collect();
        assert_eq!(nodes.len(), 64);
    }

    #[test]
    fn should_display_as_hyphenated_uuid() {
        let text = StationId::new().to_string();
        assert_eq!(text.len(), 36);
        assert_eq!(text.matches('-').count(), 4);
    }

    #[test]
    fn should_serialize_as_bare_string() {
        let id = ActorId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
