use std::collections::BTreeMap;

use crate::event::{Event, EventIndex, TeamEvents};
use crate::pitch::Point;

pub const BUILD_UP_LOOKBACK: usize = 4;

/// Shot index -> located events of its build-up, shot last when located.
pub type Sequences<'a> = BTreeMap<EventIndex, Vec<&'a Event>>;

/// The shot plus up to [`BUILD_UP_LOOKBACK`] team events before it, keeping
/// only those with a location. `None` when the shot is not in `team`.
pub fn build_up<'a>(team: &'a TeamEvents, shot: &Event) -> Option<Vec<&'a Event>> {
    let pos = team.position_of(shot.index)?;
    let start = pos.saturating_sub(BUILD_UP_LOOKBACK);
    let window = &team.events()[start..=pos];
    Some(window.iter().filter(|e| e.location.is_some()).collect())
}

pub fn build_up_sequences<'a>(team: &'a TeamEvents, shots: &[&Event]) -> Sequences<'a> {
    shots
        .iter()
        .filter_map(|shot| build_up(team, shot).map(|seq| (shot.index, seq)))
        .collect()
}

pub fn path(seq: &[&Event]) -> Vec<Point> {
    seq.iter().filter_map(|e| e.location).collect()
}

/// Locations leading up to `shot`. An unlocated shot is already absent from
/// `seq`, so nothing else is dropped.
pub fn trail(seq: &[&Event], shot: EventIndex) -> Vec<Point> {
    let lead = match seq.split_last() {
        Some((last, rest)) if last.index == shot => rest,
        _ => seq,
    };
    path(lead)
}
