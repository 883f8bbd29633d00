//! Opaque identifiers for actions and status effects.
//!
//! Both are plain numeric keys assigned by the game. Equality is the only
//! meaningful operation; they carry no ordering.

use core::fmt;

/// Identifies one usable ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionId(pub u32);

impl ActionId {
    /// Returns the raw game identifier.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ActionId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies a status effect (buff or debuff).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EffectId(pub u16);

impl From<u16> for EffectId {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect {}", self.0)
    }
}
