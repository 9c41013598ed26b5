//! Player definitions for dialogue games.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier a player is known by inside the protocol (e.g. `"alice"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant in a dialogue and the roles they currently hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Protocol-level identifier.
    pub player: PlayerId,

    /// Human-facing name, usually the roster key.
    pub name: String,

    /// Roles such as `"speaker"`, `"proposer"` or `"judge"`.
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl Player {
    /// Create a player whose name matches its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            player: PlayerId::new(id.clone()),
            name: id,
            roles: BTreeSet::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Add multiple roles.
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Check if the player currently holds a role.
    pub fn in_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Grant a role. Returns false if it was already held.
    pub fn grant_role(&mut self, role: impl Into<String>) -> bool {
        self.roles.insert(role.into())
    }

    /// Revoke a role. Returns false if it was not held.
    pub fn revoke_role(&mut self, role: &str) -> bool {
        self.roles.remove(role)
    }
}
