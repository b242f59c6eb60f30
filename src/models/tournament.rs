//! Tournament record and the input used to create one.

use crate::models::error::{EngineError, EngineResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Roster cap used when a tournament is created without one.
pub const DEFAULT_MAX_PLAYERS: usize = 16;

/// A tournament. Groups, teams and matches are derived from its roster and live in the store.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub game_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_players: usize,
}

/// Fields needed to create a tournament (e.g. from the create form).
#[derive(Clone, Debug, Deserialize)]
pub struct NewTournament {
    pub name: String,
    pub game_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_max_players")]
    pub max_players: usize,
}

fn default_max_players() -> usize {
    DEFAULT_MAX_PLAYERS
}

impl Tournament {
    /// Validate the input and build a tournament with a fresh id.
    pub fn create(input: NewTournament) -> EngineResult<Self> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(EngineError::Validation("Please enter a tournament name".into()));
        }
        let game_type = input.game_type.trim();
        if game_type.is_empty() {
            return Err(EngineError::Validation("Please select a game type".into()));
        }
        if input.end_date < input.start_date {
            return Err(EngineError::Validation(
                "End date must not be before start date".into(),
            ));
        }
        if input.max_players == 0 {
            return Err(EngineError::Validation("Max players must be at least 1".into()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            game_type: game_type.to_string(),
            start_date: input.start_date,
            end_date: input.end_date,
            max_players: input.max_players,
        })
    }
}
