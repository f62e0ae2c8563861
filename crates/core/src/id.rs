//! The identifier value object shared by every entity.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::InvalidUuidError;
use crate::value_object::ValueObject;

/// Value object wrapping an RFC 4122 UUID used as entity identity.
///
/// Construction is fail-fast: either a fresh random (v4) identifier is generated, or
/// a caller-supplied string is parsed eagerly. A `UniqueId` holding malformed content
/// is never observable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueId(Uuid);

impl UniqueId {
    /// Generate a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a caller-supplied identifier string, validating eagerly.
    pub fn parse(value: &str) -> Result<Self, InvalidUuidError> {
        let uuid = Uuid::from_str(value).map_err(|_| InvalidUuidError::new(value))?;
        Ok(Self(uuid))
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl ValueObject for UniqueId {}

impl Default for UniqueId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for UniqueId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for UniqueId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<UniqueId> for Uuid {
    fn from(value: UniqueId) -> Self {
        value.0
    }
}

impl FromStr for UniqueId {
    type Err = InvalidUuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
