//! On-disk snapshot store tests

use sleeper_ffl::{
    storage::{PlayerRecord, ProjectionRecord, Snapshot, SnapshotStore},
    PlayerId, Position, Season, SleeperError, Week,
};
use tempfile::TempDir;

fn player(id: &str, position: Position, active: bool) -> PlayerRecord {
    PlayerRecord {
        player_id: PlayerId::new(id),
        full_name: format!("Player {}", id),
        position,
        team: None,
        active,
        status: None,
    }
}

#[test]
fn test_snapshots_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("snapshots.db");

    {
        let mut store = SnapshotStore::open(&path).unwrap();
        store
            .write(&[player("4046", Position::QB, true), player("KC", Position::DEF, true)])
            .unwrap();
        store
            .write(&[ProjectionRecord {
                player_id: PlayerId::new("4046"),
                season: Season::new(2024),
                week: Week::new(3),
                pts_ppr: 23.17,
                pts_half_ppr: 23.17,
                pts_std: 23.17,
            }])
            .unwrap();
    }

    let store = SnapshotStore::open(&path).unwrap();
    let players = store.read::<PlayerRecord>().unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[1].position, Position::DEF);

    let projections = store.read::<ProjectionRecord>().unwrap();
    assert_eq!(projections[0].week, Week::new(3));
    assert_eq!(projections[0].pts_ppr, 23.17);

    let names: Vec<String> = store.catalog().unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec![PlayerRecord::NAME, ProjectionRecord::NAME]);
}

#[test]
fn test_fresh_store_has_no_snapshots() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(&dir.path().join("empty.db")).unwrap();

    assert!(!store.exists(PlayerRecord::NAME).unwrap());
    assert!(matches!(
        store.read::<ProjectionRecord>(),
        Err(SleeperError::SnapshotMissing { .. })
    ));
}

#[test]
fn test_inactive_flag_round_trips() {
    let dir = TempDir::new().unwrap();
    let mut store = SnapshotStore::open(&dir.path().join("flags.db")).unwrap();
    store.write(&[player("1", Position::K, false)]).unwrap();

    let read = store.read::<PlayerRecord>().unwrap();
    assert!(!read[0].active);
    assert_eq!(read[0].team, None);
}
