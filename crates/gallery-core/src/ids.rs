//! Identifier types for the gallery.
//!
//! Every table uses a database-generated `BIGSERIAL` key. The `serial_id_type!`
//! macro wraps those keys in distinct newtypes so a painting id can never be
//! passed where an order id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a serial (`i64`) identifier type with standard trait implementations.
///
/// This macro generates a newtype wrapper around `i64` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize`, `Deserialize` (as a bare JSON number)
/// - `Display`, `Debug`
/// - `From<i64>`, `Into<i64>`
///
/// # Example
///
/// ```ignore
/// serial_id_type!(MyId, "A custom identifier type.");
/// let id = MyId::new(7);
/// assert_eq!(i64::from(id), 7);
/// ```
macro_rules! serial_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database key.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Return the raw database key.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

serial_id_type!(UserId, "A customer identifier.\n\nUsers are created outside this service and only referenced here.");
serial_id_type!(PaintingId, "A catalog painting identifier.");
serial_id_type!(OrderId, "An order identifier, generated when the order row is inserted.");
