use serde::Serialize;

use crate::classify::{ClassifiedEvents, SubsetCounts, classify};
use crate::event::{Event, EventDetail, EventIndex, MatchEvents, TeamEvents};
use crate::formation::{FormationMarker, Tactics, markers};
use crate::matches::{MatchHeader, MatchInfo};
use crate::pitch::{Chart, Mirror, Point};
use crate::sequence::{Sequences, path, trail};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotMarker {
    pub index: EventIndex,
    pub player: Option<String>,
    pub minute: u32,
    pub location: Point,
    pub xg: Option<f64>,
    /// Dimmed markers before the shot.
    pub trail: Vec<Point>,
    /// Line through the whole build-up, shot included.
    pub path: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefensiveDisplay {
    pub successful: Vec<Point>,
    pub unsuccessful: Vec<Point>,
    /// Opponent players losing the ball, mirrored into this team's frame.
    pub opponent_dispossessions: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TacticPlot {
    pub team: String,
    pub opponent: String,
    pub goal_shots: Vec<ShotMarker>,
    pub no_goal_shots: Vec<ShotMarker>,
    pub defense: DefensiveDisplay,
    pub opponent_carries: Vec<Segment>,
    pub opponent_long_passes: Vec<Segment>,
}

fn shot_markers(shots: &[&Event], sequences: &Sequences<'_>, mirror: Mirror) -> Vec<ShotMarker> {
    shots
        .iter()
        .filter_map(|shot| {
            let location = shot.location?.mirrored(mirror);
            let seq = sequences.get(&shot.index).map(Vec::as_slice).unwrap_or(&[]);
            let xg = match &shot.detail {
                EventDetail::Shot { xg, .. } => *xg,
                _ => None,
            };
            Some(ShotMarker {
                index: shot.index,
                player: shot.player.clone(),
                minute: shot.minute,
                location,
                xg,
                trail: trail(seq, shot.index)
                    .into_iter()
                    .map(|p| p.mirrored(mirror))
                    .collect(),
                path: path(seq).into_iter().map(|p| p.mirrored(mirror)).collect(),
            })
        })
        .collect()
}

fn points(events: &[&Event], mirror: Mirror) -> Vec<Point> {
    events
        .iter()
        .filter_map(|e| e.location)
        .map(|p| p.mirrored(mirror))
        .collect()
}

/// Start -> end segments; events missing either end are skipped.
fn segments(events: &[&Event], mirror: Mirror) -> Vec<Segment> {
    events
        .iter()
        .filter_map(|e| {
            Some(Segment {
                start: e.location?.mirrored(mirror),
                end: e.end_location()?.mirrored(mirror),
            })
        })
        .collect()
}

pub fn defensive_display(team: &ClassifiedEvents<'_>, opponent: &ClassifiedEvents<'_>) -> DefensiveDisplay {
    let chart = Chart::DefensiveDisplay;
    DefensiveDisplay {
        successful: points(&team.successful_defense, chart.own_mirror()),
        unsuccessful: points(&team.unsuccessful_defense, chart.own_mirror()),
        opponent_dispossessions: points(&opponent.dispossessions, chart.opponent_mirror()),
    }
}

pub fn tactic_plot(team: &ClassifiedEvents<'_>, opponent: &ClassifiedEvents<'_>) -> TacticPlot {
    let chart = Chart::TacticPlot;
    TacticPlot {
        team: team.team.to_string(),
        opponent: opponent.team.to_string(),
        goal_shots: shot_markers(&team.goal_shots, &team.goal_sequences, chart.own_mirror()),
        no_goal_shots: shot_markers(
            &team.no_goal_shots,
            &team.no_goal_sequences,
            chart.own_mirror(),
        ),
        defense: defensive_display(team, opponent),
        opponent_carries: segments(&opponent.extended_carries, chart.opponent_mirror()),
        opponent_long_passes: segments(&opponent.long_passes, chart.opponent_mirror()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftView {
    pub index: EventIndex,
    pub clock: String,
    pub formation: Option<String>,
    pub markers: Vec<FormationMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormationView {
    pub team: String,
    pub formation: Option<String>,
    /// `None` when the match has no starting-XI record for this team.
    pub starting: Option<Vec<FormationMarker>>,
    pub shifts: Vec<ShiftView>,
}

pub fn formation_view(team: &ClassifiedEvents<'_>, mirror: Mirror) -> FormationView {
    FormationView {
        team: team.team.to_string(),
        formation: team
            .starting_lineup
            .as_ref()
            .and_then(Tactics::formation_label),
        starting: team
            .starting_lineup
            .as_ref()
            .map(|tactics| markers(tactics, mirror)),
        shifts: team
            .tactical_shifts
            .iter()
            .map(|shift| ShiftView {
                index: shift.index,
                clock: shift.clock_label(),
                formation: shift.tactics.formation_label(),
                markers: markers(&shift.tactics, mirror),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormationOverlay {
    pub team: FormationView,
    pub opponent: FormationView,
}

pub fn formation_overlay(team: &ClassifiedEvents<'_>, opponent: &ClassifiedEvents<'_>) -> FormationOverlay {
    let chart = Chart::FormationOverlay;
    FormationOverlay {
        team: formation_view(team, chart.own_mirror()),
        opponent: formation_view(opponent, chart.opponent_mirror()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchView {
    pub header: Option<MatchHeader>,
    pub tactic_plot: TacticPlot,
    pub formations: FormationOverlay,
    pub team_counts: SubsetCounts,
    pub opponent_counts: SubsetCounts,
}

/// Team and opponent event lists for `team`. The opponent comes from the
/// match record when available, else from the other team seen in the events.
pub fn split_sides(events: &MatchEvents, info: Option<&MatchInfo>, team: &str) -> (TeamEvents, TeamEvents) {
    let opponent = info
        .and_then(|m| m.opponent_of(team))
        .map(|t| t.name.clone())
        .or_else(|| events.opponent_of(team).map(str::to_string))
        .unwrap_or_default();
    (events.team(team), events.team(&opponent))
}

pub fn match_view(events: &MatchEvents, info: Option<&MatchInfo>, team: &str) -> MatchView {
    let (own, other) = split_sides(events, info, team);
    let own_classified = classify(&own);
    let other_classified = classify(&other);
    MatchView {
        header: info.map(MatchInfo::header),
        tactic_plot: tactic_plot(&own_classified, &other_classified),
        formations: formation_overlay(&own_classified, &other_classified),
        team_counts: own_classified.counts(),
        opponent_counts: other_classified.counts(),
    }
}
