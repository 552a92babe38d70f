//! Typed identifiers for ledger entities.
//!
//! Every entity gets its own id newtype over [`Uuid`] so that a lot id can
//! never be passed where an output id is expected. Ids serialize as plain
//! UUID strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random id.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// The raw UUID behind this id.
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::from_str(s).map(Self)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id! {
    /// Identifier of a [`crate::Product`].
    ProductId
}

entity_id! {
    /// Identifier of a [`crate::StockEntry`] (a lot).
    EntryId
}

entity_id! {
    /// Identifier of a [`crate::StockOutput`] (a withdrawal).
    OutputId
}

entity_id! {
    /// Identifier of a [`crate::StockOutputLine`].
    LineId
}

entity_id! {
    /// Identifier of a [`crate::Transaction`] journal row.
    TxId
}
