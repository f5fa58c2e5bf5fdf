use serde::{Deserialize, Deserializer, Serialize};

use crate::formation::{LineupEntry, Tactics};
use crate::pitch::Point;
use crate::position::{PositionBucket, PositionCode};
use crate::taxonomy::EventType;

/// Per-match sequence number assigned by the feed (`index`), strictly
/// increasing in temporal order.
pub type EventIndex = u32;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub index: EventIndex,
    pub id: String,
    pub type_id: u32,
    pub period: u8,
    pub minute: u32,
    pub second: u32,
    pub timestamp: Option<String>,
    pub team: String,
    pub player: Option<String>,
    pub position: Option<PositionCode>,
    pub location: Option<Point>,
    pub duration: Option<f64>,
    pub detail: EventDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDetail {
    Shot {
        outcome: Option<String>,
        end_location: Option<Point>,
        xg: Option<f64>,
    },
    Pass {
        length: Option<f64>,
        angle: Option<f64>,
        end_location: Option<Point>,
        outcome: Option<String>,
        /// The record carried an `outcome` key, even a null one. Plain
        /// completions carry none.
        has_outcome: bool,
    },
    Carry {
        end_location: Option<Point>,
    },
    Duel {
        duel_type: Option<u32>,
        outcome: Option<u32>,
    },
    Interception {
        outcome: Option<u32>,
    },
    Clearance,
    Block,
    Dispossessed,
    BallReceipt,
    StartingXi {
        tactics: Option<Tactics>,
    },
    TacticalShift {
        tactics: Option<Tactics>,
    },
    Other {
        name: String,
    },
}

impl Event {
    pub fn event_type(&self) -> Option<EventType> {
        EventType::from_id(self.type_id)
    }

    pub fn is(&self, kind: EventType) -> bool {
        self.type_id == kind.id()
    }

    pub fn bucket(&self) -> Option<PositionBucket> {
        self.position.and_then(PositionBucket::from_code)
    }

    /// End of the ball's movement for passes, carries and shots.
    pub fn end_location(&self) -> Option<Point> {
        match &self.detail {
            EventDetail::Pass { end_location, .. }
            | EventDetail::Carry { end_location }
            | EventDetail::Shot { end_location, .. } => *end_location,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchEvents {
    events: Vec<Event>,
}

impl MatchEvents {
    pub fn new(mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| e.index);
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Team names in order of first appearance.
    pub fn teams(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for e in &self.events {
            if !out.contains(&e.team.as_str()) {
                out.push(&e.team);
            }
        }
        out
    }

    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        self.teams().into_iter().find(|t| *t != team)
    }

    pub fn team(&self, team: &str) -> TeamEvents {
        TeamEvents {
            team: team.to_string(),
            events: self
                .events
                .iter()
                .filter(|e| e.team == team)
                .cloned()
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamEvents {
    team: String,
    events: Vec<Event>,
}

impl TeamEvents {
    pub fn new(team: impl Into<String>, mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| e.index);
        Self {
            team: team.into(),
            events,
        }
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Position of the event with `index` in this list.
    pub fn position_of(&self, index: EventIndex) -> Option<usize> {
        self.events.binary_search_by_key(&index, |e| e.index).ok()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEvent {
    id: Option<String>,
    index: EventIndex,
    period: Option<u8>,
    timestamp: Option<String>,
    minute: Option<u32>,
    second: Option<u32>,
    #[serde(rename = "type")]
    kind: RawType,
    team: RawRef,
    player: Option<RawRef>,
    position: Option<RawRef>,
    location: Option<Point>,
    duration: Option<f64>,
    shot: Option<RawShot>,
    pass: Option<RawPass>,
    carry: Option<RawCarry>,
    duel: Option<RawDuel>,
    interception: Option<RawInterception>,
    tactics: Option<RawTactics>,
}

#[derive(Debug, Deserialize)]
struct RawType {
    id: u32,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawRef {
    id: Option<u32>,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawShot {
    outcome: Option<RawRef>,
    end_location: Option<Point>,
    statsbomb_xg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawPass {
    length: Option<f64>,
    angle: Option<f64>,
    end_location: Option<Point>,
    #[serde(default, deserialize_with = "keyed")]
    outcome: Option<Option<RawRef>>,
}

#[derive(Debug, Deserialize)]
struct RawCarry {
    end_location: Option<Point>,
}

#[derive(Debug, Deserialize)]
struct RawDuel {
    #[serde(rename = "type")]
    kind: Option<RawRef>,
    outcome: Option<RawRef>,
}

#[derive(Debug, Deserialize)]
struct RawInterception {
    outcome: Option<RawRef>,
}

#[derive(Debug, Deserialize)]
struct RawTactics {
    formation: Option<u32>,
    #[serde(default)]
    lineup: Vec<RawLineupEntry>,
}

#[derive(Debug, Deserialize)]
struct RawLineupEntry {
    player: Option<RawRef>,
    position: Option<RawRef>,
    jersey_number: Option<u32>,
}

/// `Some(None)` for an explicit null, `None` (via `default`) for a missing key.
fn keyed<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<RawTactics> for Tactics {
    fn from(raw: RawTactics) -> Self {
        Tactics {
            formation: raw.formation,
            lineup: raw
                .lineup
                .into_iter()
                .map(|entry| LineupEntry {
                    player: entry.player.map(|p| p.name).filter(|n| !n.is_empty()),
                    position: entry.position.and_then(|p| p.id),
                    jersey_number: entry.jersey_number,
                })
                .collect(),
        }
    }
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        let detail = match EventType::from_id(raw.kind.id) {
            Some(EventType::Shot) => {
                let shot = raw.shot;
                EventDetail::Shot {
                    outcome: shot
                        .as_ref()
                        .and_then(|s| s.outcome.as_ref())
                        .map(|o| o.name.clone()),
                    end_location: shot.as_ref().and_then(|s| s.end_location),
                    xg: shot.as_ref().and_then(|s| s.statsbomb_xg),
                }
            }
            Some(EventType::Pass) => {
                let pass = raw.pass;
                EventDetail::Pass {
                    length: pass.as_ref().and_then(|p| p.length),
                    angle: pass.as_ref().and_then(|p| p.angle),
                    end_location: pass.as_ref().and_then(|p| p.end_location),
                    outcome: pass
                        .as_ref()
                        .and_then(|p| p.outcome.as_ref())
                        .and_then(Option::as_ref)
                        .map(|o| o.name.clone()),
                    has_outcome: pass.as_ref().is_some_and(|p| p.outcome.is_some()),
                }
            }
            Some(EventType::Carry) => EventDetail::Carry {
                end_location: raw.carry.and_then(|c| c.end_location),
            },
            Some(EventType::Duel) => {
                let duel = raw.duel;
                EventDetail::Duel {
                    duel_type: duel.as_ref().and_then(|d| d.kind.as_ref()).and_then(|k| k.id),
                    outcome: duel.as_ref().and_then(|d| d.outcome.as_ref()).and_then(|o| o.id),
                }
            }
            Some(EventType::Interception) => EventDetail::Interception {
                outcome: raw.interception.and_then(|i| i.outcome).and_then(|o| o.id),
            },
            Some(EventType::Clearance) => EventDetail::Clearance,
            Some(EventType::Block) => EventDetail::Block,
            Some(EventType::Dispossessed) => EventDetail::Dispossessed,
            Some(EventType::BallReceipt) => EventDetail::BallReceipt,
            Some(EventType::StartingXi) => EventDetail::StartingXi {
                tactics: raw.tactics.map(Tactics::from),
            },
            Some(EventType::TacticalShift) => EventDetail::TacticalShift {
                tactics: raw.tactics.map(Tactics::from),
            },
            _ => EventDetail::Other {
                name: raw.kind.name.clone(),
            },
        };

        Event {
            index: raw.index,
            id: raw.id.unwrap_or_else(|| raw.index.to_string()),
            type_id: raw.kind.id,
            period: raw.period.unwrap_or(1),
            minute: raw.minute.unwrap_or(0),
            second: raw.second.unwrap_or(0),
            timestamp: raw.timestamp,
            team: raw.team.name,
            player: raw.player.map(|p| p.name).filter(|n| !n.is_empty()),
            position: raw.position.and_then(|p| p.id),
            location: raw.location,
            duration: raw.duration,
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> Event {
        let raw: RawEvent = serde_json::from_str(json).expect("raw event");
        Event::from(raw)
    }

    #[test]
    fn pass_without_outcome_keeps_outcome_none() {
        let e = raw(
            r#"{"index":5,"type":{"id":30,"name":"Pass"},"team":{"id":1,"name":"A"},
                "location":[30.0,40.0],"pass":{"length":45.0,"angle":0.1,"end_location":[75.0,40.0]}}"#,
        );
        assert_eq!(
            e.detail,
            EventDetail::Pass {
                length: Some(45.0),
                angle: Some(0.1),
                end_location: Some(Point::new(75.0, 40.0)),
                outcome: None,
                has_outcome: false,
            }
        );
        assert_eq!(e.end_location(), Some(Point::new(75.0, 40.0)));
    }

    #[test]
    fn null_pass_outcome_still_counts_as_present() {
        let e = raw(
            r#"{"index":6,"type":{"id":30,"name":"Pass"},"team":{"name":"A"},
                "pass":{"length":50.0,"outcome":null}}"#,
        );
        assert!(matches!(
            e.detail,
            EventDetail::Pass {
                outcome: None,
                has_outcome: true,
                ..
            }
        ));
    }

    #[test]
    fn shot_without_payload_has_empty_detail() {
        let e = raw(r#"{"index":9,"type":{"id":16,"name":"Shot"},"team":{"name":"A"}}"#);
        assert_eq!(
            e.detail,
            EventDetail::Shot {
                outcome: None,
                end_location: None,
                xg: None,
            }
        );
        assert_eq!(e.id, "9");
    }

    #[test]
    fn unknown_type_becomes_other() {
        let e = raw(r#"{"index":1,"type":{"id":18,"name":"Half Start"},"team":{"name":"A"}}"#);
        assert_eq!(
            e.detail,
            EventDetail::Other {
                name: "Half Start".to_string()
            }
        );
        assert_eq!(e.event_type(), None);
    }

    #[test]
    fn team_events_locate_by_index() {
        let a = raw(r#"{"index":3,"type":{"id":42},"team":{"name":"A"}}"#);
        let b = raw(r#"{"index":8,"type":{"id":42},"team":{"name":"A"}}"#);
        let team = TeamEvents::new("A", vec![b, a]);
        assert_eq!(team.position_of(3), Some(0));
        assert_eq!(team.position_of(8), Some(1));
        assert_eq!(team.position_of(4), None);
    }
}
