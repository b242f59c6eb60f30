//! Tournament business logic: group draws, schedules, regeneration, results.

mod directory;
mod grouping;
mod presets;
mod regenerate;
mod results;
mod scheduling;
mod shuffle;
mod teams;

pub use directory::{
    create_player, create_tournament, enroll_player, get_tournament, list_players,
    list_tournaments, tournament_groups, tournament_matches, tournament_roster,
};
pub use grouping::{group_name, make_groups, MAX_GROUP_SIZE, TARGET_GROUP_SIZE};
pub use presets::{preset_for, randomize, PresetMatch, FIVE_PLAYERS, FOUR_PLAYERS, SIX_PLAYERS};
pub use regenerate::{regenerate_groups, regenerate_matches};
pub use results::{group_standings, record_result, MAX_SCORE};
pub use scheduling::{generate_matches, lineups, Lineup};
pub use shuffle::Shuffler;
pub use teams::resolve_team;
