//! Tri-state PATCH fields.
//!
//! A field absent from the request body keeps the stored value, an explicit
//! `null` clears it, and a value replaces it. Plain `Option<T>` cannot tell
//! the first two apart once deserialized, so PATCH payload structs wrap their
//! nullable fields in [`Patch`] via `#[serde(default, deserialize_with =
//! "patch::deserialize")]`.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Keep,
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T> Patch<T> {
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Write the patch into an optional storage slot.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Patch::Keep => {}
            Patch::Clear => *slot = None,
            Patch::Set(value) => *slot = Some(value),
        }
    }
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Patch<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<T>::deserialize(deserializer)? {
        Some(value) => Patch::Set(value),
        None => Patch::Clear,
    })
}
