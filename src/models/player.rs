//! Player data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in groups, teams and lookups).
pub type PlayerId = Uuid;

/// A registered player. The engine only ever looks at the id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub email: String,
}

impl Player {
    /// Create a new player with a fresh id. Name and email are stored trimmed.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
        }
    }
}
