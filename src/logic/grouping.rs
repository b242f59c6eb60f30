//! Group draw: split a roster into balanced groups of 4–6 players.

use crate::logic::shuffle::Shuffler;
use crate::models::PlayerId;

/// Preferred group size. Groups are cut at this size first.
pub const TARGET_GROUP_SIZE: usize = 4;
/// Leftover players are added to groups up to this size.
pub const MAX_GROUP_SIZE: usize = 6;

/// Display name for the group at `index` (0-based): "Group 1", "Group 2", ...
pub fn group_name(index: usize) -> String {
    format!("Group {}", index + 1)
}

/// Partition `players` into groups.
///
/// 1. Shuffle.
/// 2. Cut as many groups of exactly 4 as possible.
/// 3. Hand out the 0–3 leftover players round-robin, one per group per pass,
///    skipping groups that already hold 6.
///
/// Fewer than 4 players give a single undersized group (none for an empty roster).
/// If the leftovers do not fit (7 players: one group of 4 can only take 2 more),
/// they form their own undersized group.
pub fn make_groups(players: &[PlayerId], shuffler: &mut Shuffler) -> Vec<Vec<PlayerId>> {
    let mut pool = shuffler.shuffle(players.to_vec());
    if pool.is_empty() {
        return Vec::new();
    }
    if pool.len() < TARGET_GROUP_SIZE {
        return vec![pool];
    }

    let full_groups = pool.len() / TARGET_GROUP_SIZE;
    let leftover = pool.split_off(full_groups * TARGET_GROUP_SIZE);
    let mut groups: Vec<Vec<PlayerId>> = pool
        .chunks_exact(TARGET_GROUP_SIZE)
        .map(|chunk| chunk.to_vec())
        .collect();

    let capacity = groups.len() * (MAX_GROUP_SIZE - TARGET_GROUP_SIZE);
    if leftover.len() > capacity {
        groups.push(leftover);
        return groups;
    }

    let mut next = 0;
    for player in leftover {
        while groups[next % groups.len()].len() >= MAX_GROUP_SIZE {
            next += 1;
        }
        let slot = next % groups.len();
        groups[slot].push(player);
        next += 1;
    }
    groups
}
