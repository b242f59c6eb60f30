//! Integration tests for the group draw.

use doubles_tournament_web::logic::{group_name, make_groups};
use doubles_tournament_web::{PlayerId, Shuffler};
use std::collections::HashSet;
use uuid::Uuid;

fn players(n: usize) -> Vec<PlayerId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn sorted_sizes(groups: &[Vec<PlayerId>]) -> Vec<usize> {
    let mut sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
    sizes.sort();
    sizes
}

#[test]
fn groups_are_between_4_and_6_players() {
    let mut shuffler = Shuffler::seeded(11);
    for n in (4..=60).filter(|&n| n != 7) {
        let groups = make_groups(&players(n), &mut shuffler);
        for g in &groups {
            assert!((4..=6).contains(&g.len()), "n={n}: group of {}", g.len());
        }
    }
}

#[test]
fn groups_partition_the_roster_exactly() {
    let mut shuffler = Shuffler::seeded(12);
    for n in 0..=40 {
        let input = players(n);
        let groups = make_groups(&input, &mut shuffler);
        let flat: Vec<PlayerId> = groups.iter().flatten().copied().collect();
        assert_eq!(flat.len(), n, "n={n}: player omitted or duplicated");
        let seen: HashSet<PlayerId> = flat.into_iter().collect();
        assert_eq!(seen, input.into_iter().collect::<HashSet<_>>());
    }
}

#[test]
fn fewer_than_four_players_make_one_group() {
    let mut shuffler = Shuffler::seeded(13);
    for n in 1..4 {
        let groups = make_groups(&players(n), &mut shuffler);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), n);
    }
    assert!(make_groups(&[], &mut shuffler).is_empty());
}

#[test]
fn remainder_is_spread_over_existing_groups() {
    let mut shuffler = Shuffler::seeded(14);
    assert_eq!(sorted_sizes(&make_groups(&players(9), &mut shuffler)), vec![4, 5]);
    assert_eq!(sorted_sizes(&make_groups(&players(10), &mut shuffler)), vec![5, 5]);
    assert_eq!(sorted_sizes(&make_groups(&players(11), &mut shuffler)), vec![5, 6]);
    assert_eq!(sorted_sizes(&make_groups(&players(6), &mut shuffler)), vec![6]);
    assert_eq!(sorted_sizes(&make_groups(&players(15), &mut shuffler)), vec![5, 5, 5]);
}

#[test]
fn seven_players_leave_an_undersized_group() {
    let mut shuffler = Shuffler::seeded(15);
    assert_eq!(sorted_sizes(&make_groups(&players(7), &mut shuffler)), vec![3, 4]);
}

#[test]
fn draws_differ_between_calls() {
    let input = players(16);
    let mut shuffler = Shuffler::seeded(16);
    let first = make_groups(&input, &mut shuffler);
    let second = make_groups(&input, &mut shuffler);
    assert_ne!(first, second);
}

#[test]
fn groups_are_named_in_order() {
    assert_eq!(group_name(0), "Group 1");
    assert_eq!(group_name(3), "Group 4");
}
