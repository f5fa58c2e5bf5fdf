use log::{debug, warn};
use serde::Serialize;

use crate::event::{Event, EventDetail, TeamEvents};
use crate::formation::{TacticalShift, Tactics};
use crate::sequence::{Sequences, build_up_sequences};
use crate::taxonomy::{
    EXTENDED_CARRY_MIN_SECS, EventType, GOAL_OUTCOME, LONG_PASS_MIN_LENGTH,
    is_successful_duel_code, is_successful_interception_code,
};

pub fn is_goal_shot(e: &Event) -> bool {
    matches!(&e.detail, EventDetail::Shot { outcome: Some(o), .. } if o == GOAL_OUTCOME)
}

/// Any shot whose outcome is not a goal, including shots with no outcome.
pub fn is_no_goal_shot(e: &Event) -> bool {
    e.is(EventType::Shot) && !is_goal_shot(e)
}

pub fn is_extended_carry(e: &Event) -> bool {
    e.is(EventType::Carry) && e.duration.is_some_and(|d| d > EXTENDED_CARRY_MIN_SECS)
}

pub fn is_successful_defense(e: &Event) -> bool {
    match &e.detail {
        EventDetail::Clearance => true,
        EventDetail::Duel {
            duel_type: Some(code),
            ..
        } => is_successful_duel_code(*code),
        EventDetail::Interception {
            outcome: Some(code),
        } => is_successful_interception_code(*code),
        _ => false,
    }
}

pub fn is_unsuccessful_defense(e: &Event) -> bool {
    match &e.detail {
        EventDetail::Duel {
            duel_type: Some(code),
            ..
        } => !is_successful_duel_code(*code),
        EventDetail::Interception {
            outcome: Some(code),
        } => !is_successful_interception_code(*code),
        _ => false,
    }
}

/// A pass only carries an outcome key when it was not a plain completion;
/// a null outcome still disqualifies it.
pub fn is_long_completed_pass(e: &Event) -> bool {
    matches!(
        &e.detail,
        EventDetail::Pass { length: Some(len), has_outcome: false, .. } if *len > LONG_PASS_MIN_LENGTH
    )
}

pub fn is_dispossession(e: &Event) -> bool {
    e.is(EventType::Dispossessed)
}

pub fn select<'a>(events: &'a [Event], pred: impl Fn(&Event) -> bool) -> Vec<&'a Event> {
    events.iter().filter(|&e| pred(e)).collect()
}

/// First starting-XI lineup in the list. `None` is a data-quality condition,
/// not an error: callers skip the formation panel.
pub fn starting_lineup(events: &[Event]) -> Option<Tactics> {
    let mut found = events.iter().filter_map(|e| match &e.detail {
        EventDetail::StartingXi { tactics } => Some(tactics.as_ref()),
        _ => None,
    });
    let first = found.next();
    if found.next().is_some() {
        warn!("more than one starting XI record; using the first");
    }
    first.flatten().cloned()
}

pub fn tactical_shifts(events: &[Event]) -> Vec<TacticalShift> {
    events.iter().filter_map(TacticalShift::from_event).collect()
}

/// Every subset the charts draw from, for one team.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedEvents<'a> {
    pub team: &'a str,
    pub goal_shots: Vec<&'a Event>,
    pub no_goal_shots: Vec<&'a Event>,
    pub goal_sequences: Sequences<'a>,
    pub no_goal_sequences: Sequences<'a>,
    pub extended_carries: Vec<&'a Event>,
    pub successful_defense: Vec<&'a Event>,
    pub unsuccessful_defense: Vec<&'a Event>,
    pub long_passes: Vec<&'a Event>,
    pub starting_lineup: Option<Tactics>,
    pub tactical_shifts: Vec<TacticalShift>,
    pub dispossessions: Vec<&'a Event>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubsetCounts {
    pub goal_shots: usize,
    pub no_goal_shots: usize,
    pub extended_carries: usize,
    pub successful_defense: usize,
    pub unsuccessful_defense: usize,
    pub long_passes: usize,
    pub has_starting_lineup: bool,
    pub tactical_shifts: usize,
    pub dispossessions: usize,
}

impl ClassifiedEvents<'_> {
    pub fn counts(&self) -> SubsetCounts {
        SubsetCounts {
            goal_shots: self.goal_shots.len(),
            no_goal_shots: self.no_goal_shots.len(),
            extended_carries: self.extended_carries.len(),
            successful_defense: self.successful_defense.len(),
            unsuccessful_defense: self.unsuccessful_defense.len(),
            long_passes: self.long_passes.len(),
            has_starting_lineup: self.starting_lineup.is_some(),
            tactical_shifts: self.tactical_shifts.len(),
            dispossessions: self.dispossessions.len(),
        }
    }
}

pub fn classify(team: &TeamEvents) -> ClassifiedEvents<'_> {
    let events = team.events();
    let goal_shots = select(events, is_goal_shot);
    let no_goal_shots = select(events, is_no_goal_shot);
    let goal_sequences = build_up_sequences(team, &goal_shots);
    let no_goal_sequences = build_up_sequences(team, &no_goal_shots);

    let starting_lineup = starting_lineup(events);
    if starting_lineup.is_none() {
        warn!("no starting XI found for {}", team.team());
    }

    let out = ClassifiedEvents {
        team: team.team(),
        goal_shots,
        no_goal_shots,
        goal_sequences,
        no_goal_sequences,
        extended_carries: select(events, is_extended_carry),
        successful_defense: select(events, is_successful_defense),
        unsuccessful_defense: select(events, is_unsuccessful_defense),
        long_passes: select(events, is_long_completed_pass),
        starting_lineup,
        tactical_shifts: tactical_shifts(events),
        dispossessions: select(events, is_dispossession),
    };
    debug!("classified {} events for {}: {:?}", events.len(), team.team(), out.counts());
    out
}
