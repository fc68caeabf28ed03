//! Identifier newtypes.
//!
//! The backend uses integer primary keys. Each id kind gets its own type so an
//! ECN id can never be passed where an approval instance id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one approval instance (one pending decision on one item).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u64);

/// Identifier of a user, used as an approver or delegate target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// Identifier of an engineering change notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EcnId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EcnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlates every log line emitted during one opened dialog.
///
/// A fresh id is generated each time a dialog opens; it never leaves the
/// client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogSessionId(pub uuid::Uuid);

impl DialogSessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for DialogSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DialogSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
