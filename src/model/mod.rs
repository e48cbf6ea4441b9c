//! Plain data types for the delivery domain.
//!
//! These structs carry no behavior beyond small helpers; the rules that move them
//! between states live in the `*_actor` modules.

use thiserror::Error;

/// A caller-supplied identifier that does not name any entity kind's id format.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Malformed {kind} identifier: {input:?}")]
pub struct MalformedId {
    pub kind: &'static str,
    pub input: String,
}

/// A caller-supplied label outside an enumerated set (statuses, roles, groups).
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown {field}: {input:?}")]
pub struct UnknownValue {
    pub field: &'static str,
    pub input: String,
}

/// Declares a typed `u32` id shown as `<prefix>_<n>`.
///
/// Parsing accepts both `parcel_7` and `7`; zero is never issued and is rejected.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::MalformedId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let digits = trimmed
                    .strip_prefix(concat!($prefix, "_"))
                    .unwrap_or(trimmed);
                match digits.parse::<u32>() {
                    Ok(n) if n > 0 => Ok(Self(n)),
                    _ => Err($crate::model::MalformedId {
                        kind: $prefix,
                        input: s.to_string(),
                    }),
                }
            }
        }
    };
}

/// Declares `as_str`, `Display` and `FromStr` for a unit-only label enum.
macro_rules! labels {
    ($name:ident, $field:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($label => Ok($name::$variant),)+
                    _ => Err($crate::model::UnknownValue {
                        field: $field,
                        input: s.to_string(),
                    }),
                }
            }
        }
    };
}

pub mod parcel;
pub mod payment;
pub mod rider;
pub mod tracking;
pub mod user;

pub use parcel::*;
pub use payment::*;
pub use rider::*;
pub use tracking::*;
pub use user::*;
