//! Integration tests for team resolution and per-group match generation.

use doubles_tournament_web::logic::{lineups, FOUR_PLAYERS};
use doubles_tournament_web::{
    create_tournament, generate_matches, resolve_team, EngineError, GameMatch, Group,
    MemoryStore, NewTournament, PlayerId, PlayerPair, Repository, Shuffler, Stage, TournamentId,
};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

fn players(n: usize) -> Vec<PlayerId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

/// Store with one tournament and one (empty) group to attach matches to.
fn store_with_group() -> (MemoryStore, TournamentId, Group) {
    let store = MemoryStore::new();
    let t = create_tournament(
        &store,
        NewTournament {
            name: "Office League".into(),
            game_type: "Table tennis".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
            max_players: 16,
        },
    )
    .unwrap();
    let group = Group::new(t.id, "Group 1");
    let g = group.clone();
    store.transaction(|uow| Ok(uow.insert_group(g)?)).unwrap();
    (store, t.id, group)
}

fn schedule(n: usize, seed: u64) -> (Vec<PlayerId>, Vec<GameMatch>) {
    let (store, tid, group) = store_with_group();
    let roster = players(n);
    let mut shuffler = Shuffler::seeded(seed);
    let matches = store
        .transaction(|uow| generate_matches(uow, &mut shuffler, tid, group.id, &roster))
        .unwrap();
    (roster, matches)
}

fn partnership_counts(matches: &[GameMatch]) -> HashMap<PlayerPair, usize> {
    let mut counts = HashMap::new();
    for m in matches {
        for team in [&m.home_team, &m.away_team] {
            *counts.entry(team.players).or_insert(0) += 1;
        }
    }
    counts
}

fn all_pairs(roster: &[PlayerId]) -> Vec<PlayerPair> {
    let mut pairs = Vec::new();
    for (i, &a) in roster.iter().enumerate() {
        for &b in &roster[i + 1..] {
            pairs.push(PlayerPair::new(a, b).unwrap());
        }
    }
    pairs
}

fn players_in(m: &GameMatch) -> HashSet<PlayerId> {
    m.home_team
        .players
        .members()
        .into_iter()
        .chain(m.away_team.players.members())
        .collect()
}

#[test]
fn resolve_is_idempotent_and_order_independent() {
    let store = MemoryStore::new();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let (first, second, swapped) = store
        .transaction(|uow| {
            let first = resolve_team(uow, a, b)?;
            let second = resolve_team(uow, a, b)?;
            let swapped = resolve_team(uow, b, a)?;
            Ok((first, second, swapped))
        })
        .unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.id, swapped.id);

    let (teams, links) = store
        .transaction(|uow| Ok((uow.teams()?, uow.team_members(first.id)?)))
        .unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(links.len(), 2);
}

#[test]
fn resolve_rejects_a_team_of_one_player() {
    let store = MemoryStore::new();
    let a = Uuid::new_v4();
    let err = store.transaction(|uow| resolve_team(uow, a, a)).unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[test]
fn concurrent_resolves_converge_on_one_team() {
    let store = Arc::new(MemoryStore::new());
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let (x, y) = if i % 2 == 0 { (a, b) } else { (b, a) };
                store.transaction(|uow| resolve_team(uow, x, y)).unwrap().id
            })
        })
        .collect();
    let ids: HashSet<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(ids.len(), 1);
    let teams = store.transaction(|uow| Ok(uow.teams()?)).unwrap();
    assert_eq!(teams.len(), 1);
}

#[test]
fn four_players_get_four_matches_covering_every_partnership() {
    for seed in 0..20 {
        let (roster, matches) = schedule(4, seed);
        assert_eq!(matches.len(), 4);
        for m in &matches {
            assert!(!m.home_team.players.overlaps(&m.away_team.players));
            assert_eq!(players_in(m).len(), 4);
        }
        let counts = partnership_counts(&matches);
        for pair in all_pairs(&roster) {
            assert!(counts.contains_key(&pair), "seed {seed}: {pair:?} never partners");
        }
    }
}

#[test]
fn five_players_get_five_matches_of_four() {
    for seed in 0..20 {
        let (roster, matches) = schedule(5, seed);
        assert_eq!(matches.len(), 5);
        let mut sat_out: HashMap<PlayerId, usize> = HashMap::new();
        for m in &matches {
            let playing = players_in(m);
            assert_eq!(playing.len(), 4);
            for p in roster.iter().filter(|p| !playing.contains(*p)) {
                *sat_out.entry(*p).or_insert(0) += 1;
            }
        }
        assert!(roster.iter().all(|p| sat_out.get(p) == Some(&1)));

        let counts = partnership_counts(&matches);
        for pair in all_pairs(&roster) {
            assert_eq!(counts.get(&pair), Some(&1), "seed {seed}: {pair:?}");
        }
        let meetings: HashSet<(PlayerPair, PlayerPair)> = matches
            .iter()
            .map(|m| {
                let (home, away) = (m.home_team.players, m.away_team.players);
                (home.min(away), home.max(away))
            })
            .collect();
        assert_eq!(meetings.len(), 5);
    }
}

#[test]
fn six_players_get_six_matches_without_repeat_partners() {
    for seed in 0..20 {
        let (_, matches) = schedule(6, seed);
        assert_eq!(matches.len(), 6);
        for m in &matches {
            assert_eq!(players_in(m).len(), 4);
        }
        assert!(partnership_counts(&matches).values().all(|&c| c == 1));
    }
}

#[test]
fn new_matches_are_unplayed_group_stage_matches() {
    let (_, matches) = schedule(5, 99);
    for m in &matches {
        assert_eq!(m.home_score, 0);
        assert_eq!(m.away_score, 0);
        assert!(!m.is_played);
        assert_eq!(m.winner_team, None);
        assert_eq!(m.stage, Stage::GroupStage);
        assert_eq!(m.stage.to_string(), "Group Stage");
    }
}

#[test]
fn undersized_group_gets_no_matches() {
    for n in 0..4 {
        let (_, matches) = schedule(n, 5);
        assert!(matches.is_empty(), "{n} players");
    }
}

#[test]
fn oversized_group_plays_the_four_player_preset() {
    let (_, matches) = schedule(7, 5);
    assert_eq!(matches.len(), 4);
    let playing: HashSet<PlayerId> = matches.iter().flat_map(players_in).collect();
    assert_eq!(playing.len(), 4);
}

#[test]
fn canonical_four_player_preset() {
    let [a, b, c, d] = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    let expected = vec![
        ([a, b], [c, d]),
        ([c, a], [d, b]),
        ([b, c], [a, d]),
        ([a, d], [b, c]),
    ];
    assert_eq!(lineups(&[a, b, c, d], FOUR_PLAYERS), expected);
}

#[test]
fn matches_in_one_group_share_teams_with_the_store() {
    let (store, tid, group) = store_with_group();
    let roster = players(4);
    let mut shuffler = Shuffler::seeded(8);
    let matches = store
        .transaction(|uow| generate_matches(uow, &mut shuffler, tid, group.id, &roster))
        .unwrap();
    let (stored, teams) = store
        .transaction(|uow| Ok((uow.group_matches(group.id)?, uow.teams()?)))
        .unwrap();
    assert_eq!(stored, matches);
    // 4 matches over 6 possible pairs; the return leg reuses two teams.
    assert_eq!(teams.len(), 6);
}
