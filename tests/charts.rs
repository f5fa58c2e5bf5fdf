use std::fs;
use std::path::PathBuf;

use wc23_tactics::charts::{formation_overlay, match_view, split_sides, tactic_plot};
use wc23_tactics::classify::classify;
use wc23_tactics::event::MatchEvents;
use wc23_tactics::open_data::{parse_events_json, parse_matches_json};
use wc23_tactics::pitch::{Chart, Mirror, Point};

const HOME: &str = "Spain Women's";
const AWAY: &str = "Costa Rica Women's";

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn sample_match() -> MatchEvents {
    parse_events_json(&read_fixture("events_sample.json")).expect("fixture should parse")
}

#[test]
fn chart_conventions_are_fixed_per_chart() {
    assert_eq!(Chart::TacticPlot.opponent_mirror(), Mirror::Full);
    assert_eq!(Chart::DefensiveDisplay.opponent_mirror(), Mirror::Full);
    assert_eq!(Chart::FormationOverlay.opponent_mirror(), Mirror::Horizontal);
    assert_eq!(Chart::PositionView.opponent_mirror(), Mirror::Identity);
    assert_eq!(Chart::TacticPlot.mirror_for(false), Mirror::Identity);
}

#[test]
fn tactic_plot_mirrors_opponent_layers_only() {
    let events = sample_match();
    let (away, home) = split_sides(&events, None, AWAY);
    assert_eq!(home.team(), HOME);
    let away_c = classify(&away);
    let home_c = classify(&home);
    let plot = tactic_plot(&away_c, &home_c);

    assert_eq!(plot.team, AWAY);
    assert_eq!(plot.opponent, HOME);
    assert_eq!(plot.opponent_carries.len(), 1);
    assert_eq!(plot.opponent_carries[0].start, Point::new(50.0, 20.0));
    assert_eq!(plot.opponent_carries[0].end, Point::new(35.0, 25.0));

    let long_starts: Vec<Point> = plot.opponent_long_passes.iter().map(|s| s.start).collect();
    assert_eq!(long_starts, vec![Point::new(90.0, 40.0)]);

    assert_eq!(
        plot.defense.successful,
        vec![Point::new(40.0, 30.0), Point::new(20.0, 40.0)]
    );
    assert_eq!(plot.defense.unsuccessful, vec![Point::new(38.0, 30.0)]);
    assert_eq!(plot.defense.opponent_dispossessions, vec![Point::new(38.0, 52.0)]);
}

#[test]
fn shot_markers_skip_unlocated_shots_and_keep_build_up() {
    let events = sample_match();
    let (away, home) = split_sides(&events, None, AWAY);
    let plot = tactic_plot(&classify(&away), &classify(&home));

    assert!(plot.goal_shots.is_empty());
    assert_eq!(plot.no_goal_shots.len(), 1);
    let shot = &plot.no_goal_shots[0];
    assert_eq!(shot.index, 16);
    assert_eq!(shot.location, Point::new(100.0, 30.0));
    assert_eq!(shot.path.len(), 4);
    assert_eq!(shot.trail.len(), 3);
    assert_eq!(shot.path.last(), Some(&shot.location));
}

#[test]
fn goal_marker_carries_xg_and_trail() {
    let events = sample_match();
    let (home, away) = split_sides(&events, None, HOME);
    let plot = tactic_plot(&classify(&home), &classify(&away));

    assert_eq!(plot.goal_shots.len(), 1);
    let goal = &plot.goal_shots[0];
    assert_eq!(goal.xg, Some(0.41));
    assert_eq!(goal.player.as_deref(), Some("Striker Nine"));
    assert_eq!(
        goal.trail,
        vec![
            Point::new(82.0, 28.0),
            Point::new(60.0, 70.0),
            Point::new(100.0, 40.0),
            Point::new(100.0, 40.0),
        ]
    );
}

#[test]
fn formation_overlay_flips_opponent_horizontally() {
    let events = sample_match();
    let (home, away) = split_sides(&events, None, HOME);
    let overlay = formation_overlay(&classify(&home), &classify(&away));

    assert_eq!(overlay.team.formation.as_deref(), Some("4-3-3"));
    let striker = overlay
        .team
        .starting
        .as_ref()
        .and_then(|m| m.iter().find(|m| m.position == 23))
        .expect("striker marker");
    assert_eq!(striker.point, Point::new(100.0, 40.0));
    assert_eq!(overlay.team.shifts.len(), 1);
    assert_eq!(overlay.team.shifts[0].formation.as_deref(), Some("4-4-1-1"));
    assert_eq!(overlay.team.shifts[0].clock, "60:05");

    assert_eq!(overlay.opponent.formation.as_deref(), Some("4-2-3-1"));
    let points: Vec<Point> = overlay
        .opponent
        .starting
        .as_ref()
        .expect("opponent starting XI")
        .iter()
        .map(|m| m.point)
        .collect();
    assert_eq!(
        points,
        vec![
            Point::new(110.0, 40.0),
            Point::new(95.0, 40.0),
            Point::new(20.0, 56.0),
        ]
    );
}

#[test]
fn match_view_uses_match_record_for_header_and_opponent() {
    let events = sample_match();
    let list = parse_matches_json(&read_fixture("matches_sample.json")).expect("fixture should parse");
    let info = list.find(3893806).ok();

    let view = match_view(&events, info, HOME);
    let header = view.header.expect("header from match record");
    assert_eq!(header.home, "Spain");
    assert_eq!(header.away, "Costa Rica");
    assert_eq!(view.tactic_plot.opponent, AWAY);
    assert_eq!(view.team_counts.goal_shots, 1);
    assert_eq!(view.opponent_counts.successful_defense, 2);
    assert_eq!(view.opponent_counts.unsuccessful_defense, 1);

    let json = serde_json::to_value(&view.tactic_plot).expect("serializes");
    assert_eq!(json["goal_shots"][0]["location"], serde_json::json!([108.0, 38.0]));
}

#[test]
fn unknown_team_yields_empty_charts() {
    let events = sample_match();
    let view = match_view(&events, None, "Nobody");
    assert!(view.tactic_plot.goal_shots.is_empty());
    assert!(view.formations.team.starting.is_none());
    assert_eq!(view.tactic_plot.opponent, HOME);
}
