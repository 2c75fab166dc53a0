//! Partial-update field wrapper
//!
//! `Patch<T>` keeps "not supplied" apart from every supplied value, including
//! empty strings, zero and `None`. A patch field is only ever applied when it
//! is `Set`.

use serde::{Deserialize, Deserializer};

/// A single field of a partial update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The caller did not supply the field; the stored value is kept
    Unset,
    /// The caller supplied this value
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Patch::Set(_))
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Unset => Patch::Unset,
            Patch::Set(value) => Patch::Set(value),
        }
    }

    /// Overwrite `target` when the field was supplied
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Set(value) = self {
            *target = value;
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unset
    }
}

/// A present JSON field always becomes `Set`, `null` included (for
/// `Patch<Option<_>>` that means "clear"). Absent fields rely on
/// `#[serde(default)]` to stay `Unset`.
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Patch::Set)
    }
}
