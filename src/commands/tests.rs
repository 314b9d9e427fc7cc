//! Tests for command handlers

use super::*;
use crate::cli::types::{PlayerId, Season, Week};
use crate::core::RetryPolicy;
use crate::storage::{PlayerRecord, ProjectionRecord, SnapshotStore};
use refresh_data::{refresh_snapshots_with_base_url, RefreshSummary};
use serde_json::json;
use std::collections::BTreeSet;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

mod command_tests {
    use super::*;

    #[test]
    fn test_resolve_league_id() {
        let explicit = resolve_league_id(Some("289646328504385536".parse().unwrap())).unwrap();
        assert_eq!(explicit.as_str(), "289646328504385536");

        // env var handling shares one test so parallel tests never race on it
        std::env::set_var(LEAGUE_ID_ENV_VAR, "784512");
        assert_eq!(resolve_league_id(None).unwrap().as_str(), "784512");

        std::env::set_var(LEAGUE_ID_ENV_VAR, "not_a_number");
        assert!(resolve_league_id(None).is_err());

        std::env::remove_var(LEAGUE_ID_ENV_VAR);
        match resolve_league_id(None) {
            Err(SleeperError::MissingLeagueId { env_var }) => {
                assert_eq!(env_var, LEAGUE_ID_ENV_VAR)
            }
            other => panic!("Expected MissingLeagueId error, got {:?}", other),
        }
    }
}

mod refresh_tests {
    use super::*;

    async fn mount_players(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/players/nfl"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "4046": {"full_name": "Patrick Mahomes", "position": "QB", "team": "KC", "active": true},
                "6794": {"full_name": "Justin Jefferson", "position": "WR", "team": "MIN", "active": true},
                "9999": {"full_name": "Some Lineman", "position": "OL", "active": true}
            })))
            .mount(server)
            .await;
    }

    async fn mount_week(server: &MockServer, week: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/projections/nfl/regular/2024/{}", week)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    fn weeks() -> Vec<Week> {
        vec![Week::new(1), Week::new(2)]
    }

    fn stored_projection(season: u16, week: u16) -> ProjectionRecord {
        ProjectionRecord {
            player_id: PlayerId::new("4046"),
            season: Season::new(season),
            week: Week::new(week),
            pts_ppr: 20.0,
            pts_half_ppr: 20.0,
            pts_std: 20.0,
        }
    }

    #[tokio::test]
    async fn test_refresh_writes_both_snapshots() {
        let server = MockServer::start().await;
        mount_players(&server).await;
        mount_week(&server, 1, json!({"4046": {"pts_ppr": 21.5, "pts_half_ppr": 21.5, "pts_std": 21.5}})).await;
        mount_week(
            &server,
            2,
            json!({
                "4046": {"pts_ppr": 19.0, "pts_half_ppr": 19.0, "pts_std": 19.0},
                "6794": {"pts_ppr": 18.2, "pts_half_ppr": 15.1, "pts_std": 12.0}
            }),
        )
        .await;

        let mut store = SnapshotStore::new_in_memory().unwrap();
        let summary = refresh_snapshots_with_base_url(
            &server.uri(),
            RetryPolicy::no_delay(0),
            &mut store,
            Season::new(2024),
            &weeks(),
            false,
        )
        .await
        .unwrap();

        // the lineman is not a fantasy position
        assert_eq!(
            summary,
            RefreshSummary {
                players: Some(2),
                projections: Some(3)
            }
        );
        let projections = store.read::<ProjectionRecord>().unwrap();
        assert!(projections
            .iter()
            .any(|p| p.week == Week::new(2) && p.pts_std == 12.0));
    }

    #[tokio::test]
    async fn test_existing_snapshots_are_skipped_unless_forced() {
        let server = MockServer::start().await;
        mount_players(&server).await;
        mount_week(&server, 1, json!({})).await;
        mount_week(&server, 2, json!({})).await;

        let mut store = SnapshotStore::new_in_memory().unwrap();
        store.write::<PlayerRecord>(&[]).unwrap();
        store
            .write(&[stored_projection(2024, 1), stored_projection(2024, 2)])
            .unwrap();

        let skipped = refresh_snapshots_with_base_url(
            &server.uri(),
            RetryPolicy::no_delay(0),
            &mut store,
            Season::new(2024),
            &weeks(),
            false,
        )
        .await
        .unwrap();
        assert_eq!(skipped, RefreshSummary::default());
        assert!(server.received_requests().await.unwrap().is_empty());

        let forced = refresh_snapshots_with_base_url(
            &server.uri(),
            RetryPolicy::no_delay(0),
            &mut store,
            Season::new(2024),
            &weeks(),
            true,
        )
        .await
        .unwrap();
        assert_eq!(forced.players, Some(2));
        assert_eq!(forced.projections, Some(0));
    }

    #[tokio::test]
    async fn test_projections_for_another_season_are_refetched() {
        let server = MockServer::start().await;
        mount_players(&server).await;
        for week in [1, 2] {
            Mock::given(method("GET"))
                .and(path(format!("/projections/nfl/regular/2025/{}", week)))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "6794": {"pts_ppr": 17.0, "pts_half_ppr": 14.5, "pts_std": 12.0}
                })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let mut store = SnapshotStore::new_in_memory().unwrap();
        store.write::<PlayerRecord>(&[]).unwrap();
        store
            .write(&[stored_projection(2024, 1), stored_projection(2024, 2)])
            .unwrap();

        let summary = refresh_snapshots_with_base_url(
            &server.uri(),
            RetryPolicy::no_delay(0),
            &mut store,
            Season::new(2025),
            &weeks(),
            false,
        )
        .await
        .unwrap();

        assert_eq!(summary.players, None);
        assert_eq!(summary.projections, Some(2));
        assert_eq!(
            store.projected_weeks(Season::new(2025)).unwrap(),
            BTreeSet::from([Week::new(1), Week::new(2)])
        );
    }

    #[tokio::test]
    async fn test_missing_week_triggers_refetch() {
        let server = MockServer::start().await;
        mount_week(&server, 1, json!({"4046": {"pts_ppr": 21.5, "pts_half_ppr": 21.5, "pts_std": 21.5}})).await;
        mount_week(&server, 2, json!({"4046": {"pts_ppr": 19.0, "pts_half_ppr": 19.0, "pts_std": 19.0}})).await;

        let mut store = SnapshotStore::new_in_memory().unwrap();
        store.write::<PlayerRecord>(&[]).unwrap();
        store.write(&[stored_projection(2024, 1)]).unwrap();

        let summary = refresh_snapshots_with_base_url(
            &server.uri(),
            RetryPolicy::no_delay(0),
            &mut store,
            Season::new(2024),
            &weeks(),
            false,
        )
        .await
        .unwrap();

        assert_eq!(summary.projections, Some(2));
        assert_eq!(store.projected_weeks(Season::new(2024)).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/players/nfl"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        mount_players(&server).await;
        mount_week(&server, 1, json!({})).await;
        mount_week(&server, 2, json!({})).await;

        let mut store = SnapshotStore::new_in_memory().unwrap();
        let summary = refresh_snapshots_with_base_url(
            &server.uri(),
            RetryPolicy::no_delay(2),
            &mut store,
            Season::new(2024),
            &weeks(),
            false,
        )
        .await
        .unwrap();

        assert_eq!(summary.players, Some(2));
    }

    #[tokio::test]
    async fn test_failed_week_leaves_projections_unwritten() {
        let server = MockServer::start().await;
        mount_players(&server).await;
        mount_week(&server, 1, json!({})).await;
        Mock::given(method("GET"))
            .and(path("/projections/nfl/regular/2024/2"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let mut store = SnapshotStore::new_in_memory().unwrap();
        let result = refresh_snapshots_with_base_url(
            &server.uri(),
            RetryPolicy::no_delay(2),
            &mut store,
            Season::new(2024),
            &weeks(),
            false,
        )
        .await;

        assert!(matches!(result, Err(SleeperError::Http(_))));
        assert!(store.exists("players").unwrap());
        assert!(!store.exists("weekly_projections").unwrap());
    }

    #[tokio::test]
    async fn test_empty_players_payload_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/players/nfl"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let mut store = SnapshotStore::new_in_memory().unwrap();
        let result = refresh_snapshots_with_base_url(
            &server.uri(),
            RetryPolicy::no_delay(0),
            &mut store,
            Season::new(2024),
            &weeks(),
            false,
        )
        .await;

        assert!(matches!(result, Err(SleeperError::NoData)));
    }
}
