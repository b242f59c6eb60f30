//! Round-robin doubles templates for groups of 4, 5 and 6 players.
//!
//! Each entry is `(home slots, away slots)`, slots being 1-based positions in a
//! group's (shuffled) player list. The tables are data: any other valid
//! round-robin schedule can be dropped in without touching the scheduler.

use crate::logic::shuffle::Shuffler;

/// One templated match: two teams of two slots each.
pub type PresetMatch = ([usize; 2], [usize; 2]);

/// Every player partners every other at least once; the last match is the
/// return leg of the third.
pub const FOUR_PLAYERS: &[PresetMatch] = &[
    ([1, 2], [3, 4]),
    ([3, 1], [4, 2]),
    ([2, 3], [1, 4]),
    ([1, 4], [2, 3]),
];

/// One player sits out each match, each player exactly once; every one of the
/// ten pairs partners exactly once.
pub const FIVE_PLAYERS: &[PresetMatch] = &[
    ([2, 5], [3, 4]),
    ([3, 1], [4, 5]),
    ([4, 2], [5, 1]),
    ([5, 3], [1, 2]),
    ([1, 4], [2, 3]),
];

/// Two players sit out each match; everyone plays four and sits two, and no
/// partnership repeats.
pub const SIX_PLAYERS: &[PresetMatch] = &[
    ([1, 2], [3, 4]),
    ([5, 6], [1, 3]),
    ([2, 5], [4, 6]),
    ([1, 4], [3, 5]),
    ([2, 6], [1, 5]),
    ([2, 4], [3, 6]),
];

/// Template for a group of `size` players, if one exists.
pub fn preset_for(size: usize) -> Option<&'static [PresetMatch]> {
    match size {
        4 => Some(FOUR_PLAYERS),
        5 => Some(FIVE_PLAYERS),
        6 => Some(SIX_PLAYERS),
        _ => None,
    }
}

/// Copy of `preset` with presentation randomized: each match independently
/// swaps the players within the home team, within the away team, and home with
/// away (each with probability 1/2); then match order is shuffled.
///
/// Which players meet is unchanged.
pub fn randomize(preset: &[PresetMatch], shuffler: &mut Shuffler) -> Vec<PresetMatch> {
    let flipped: Vec<PresetMatch> = preset
        .iter()
        .map(|&(mut home, mut away)| {
            if shuffler.coin() {
                home.swap(0, 1);
            }
            if shuffler.coin() {
                away.swap(0, 1);
            }
            if shuffler.coin() {
                std::mem::swap(&mut home, &mut away);
            }
            (home, away)
        })
        .collect();
    shuffler.shuffle(flipped)
}
