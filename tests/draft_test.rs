//! Draft payloads through to optimizer pick sets

use serde_json::json;
use std::collections::BTreeSet;
use sleeper_ffl::{
    optimize::{all_picks_idx, roster_to_team_picks_idx_map, ScoringTable, TableRow},
    sleeper::{
        types::{DraftMeta, DraftPick, DraftType},
        Draft,
    },
    PlayerId, Position, RosterId, Week,
};

fn meta(draft_type: &str) -> DraftMeta {
    serde_json::from_value(json!({
        "draft_id": "1050831757233778688",
        "type": draft_type,
        "status": "drafting",
        "settings": {"teams": 4, "rounds": 3, "pick_timer": 90},
        "slot_to_roster_id": {"1": 2, "2": 4, "3": 1, "4": 3},
        "draft_order": {"u-1": 3, "u-2": 1}
    }))
    .unwrap()
}

fn picks() -> Vec<DraftPick> {
    serde_json::from_value(json!([
        {"round": 1, "draft_slot": 1, "pick_no": 1, "player_id": "4046", "picked_by": "u-2", "roster_id": 2},
        {"round": 1, "draft_slot": 2, "pick_no": 2, "player_id": "6794", "picked_by": "", "roster_id": 4},
        {"round": 1, "draft_slot": 3, "pick_no": 3, "player_id": "KC", "picked_by": "u-1"},
        {"round": 1, "draft_slot": 4, "pick_no": 4, "player_id": "retired", "picked_by": null, "roster_id": 3},
        {"round": 2, "draft_slot": 4, "pick_no": 5, "player_id": "9509", "picked_by": "u-3", "roster_id": 3}
    ]))
    .unwrap()
}

fn table() -> ScoringTable {
    let row = |id: &str, position| TableRow {
        player_id: PlayerId::new(id),
        name: id.to_string(),
        position,
        points: vec![10.0],
    };
    ScoringTable::new(
        vec![Week::new(1)],
        vec![
            row("4046", Position::QB),
            row("9509", Position::RB),
            row("6794", Position::WR),
            row("KC", Position::DEF),
            row("free", Position::TE),
        ],
    )
    .unwrap()
}

#[test]
fn test_snake_draft_from_payloads() {
    let draft = Draft::from_meta(&meta("snake"), picks());

    assert_eq!(draft.draft_type, DraftType::Snake);
    assert_eq!(
        draft.order.iter().map(|r| r.as_u32()).collect::<Vec<_>>(),
        vec![2, 4, 1, 3, 3, 1, 4, 2, 2, 4, 1, 3]
    );
    // five picks made, the sixth belongs to roster 1
    assert_eq!(draft.next_pick(), Some(RosterId::new(1)));
    assert_eq!(draft.picks[1].picked_by, None);
}

#[test]
fn test_linear_and_unknown_draft_types() {
    let linear = Draft::from_meta(&meta("linear"), Vec::new());
    assert_eq!(&linear.order[4..8], &linear.order[0..4]);

    let other = Draft::from_meta(&meta("some_new_type"), Vec::new());
    assert_eq!(other.draft_type, DraftType::Other);
    assert_eq!(other.order[4], RosterId::new(3));
}

#[test]
fn test_draft_picks_map_to_table_rows() {
    let draft = Draft::from_meta(&meta("snake"), picks());
    let table = table();

    let team_picks = roster_to_team_picks_idx_map(&table, &draft.rosters());

    assert_eq!(team_picks.len(), 4);
    assert_eq!(team_picks[&RosterId::new(2)], BTreeSet::from([0]));
    assert_eq!(team_picks[&RosterId::new(4)], BTreeSet::from([2]));
    // pick 3 has no roster id and is credited to the team on the clock
    assert_eq!(team_picks[&RosterId::new(1)], BTreeSet::from([3]));
    // "retired" is not in the table
    assert_eq!(team_picks[&RosterId::new(3)], BTreeSet::from([1]));

    let all = all_picks_idx(&team_picks);
    assert_eq!(all, BTreeSet::from([0, 1, 2, 3]));
    assert!(!all.contains(&4));
}
