use serde::{Deserialize, Serialize};

use crate::event::{Event, EventDetail};
use crate::pitch::{Mirror, Point};
use crate::position::PositionCode;

/// Lineup snapshot carried by starting-XI and tactical-shift records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tactics {
    /// Formation as the feed encodes it, e.g. `433` or `3421`.
    pub formation: Option<u32>,
    pub lineup: Vec<LineupEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub player: Option<String>,
    pub position: Option<PositionCode>,
    pub jersey_number: Option<u32>,
}

impl Tactics {
    /// "4-3-3" style label.
    pub fn formation_label(&self) -> Option<String> {
        let raw = self.formation?.to_string();
        let parts: Vec<String> = raw.chars().map(|c| c.to_string()).collect();
        Some(parts.join("-"))
    }
}

/// A tactical shift: when it happened plus the full lineup after it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TacticalShift {
    pub index: u32,
    pub minute: u32,
    pub second: u32,
    pub tactics: Tactics,
}

impl TacticalShift {
    pub fn from_event(event: &Event) -> Option<Self> {
        let EventDetail::TacticalShift { tactics } = &event.detail else {
            return None;
        };
        Some(Self {
            index: event.index,
            minute: event.minute,
            second: event.second,
            tactics: tactics.clone()?,
        })
    }

    pub fn clock_label(&self) -> String {
        format!("{:02}:{:02}", self.minute, self.second)
    }
}

/// Fixed marker position for each formation slot, in an own-half-left frame.
pub fn slot_point(code: PositionCode) -> Option<Point> {
    let (x, y) = match code {
        1 => (10.0, 40.0),
        2 => (25.0, 72.0),
        3 => (25.0, 56.0),
        4 => (25.0, 40.0),
        5 => (25.0, 24.0),
        6 => (25.0, 8.0),
        7 => (42.5, 72.0),
        9 => (42.5, 56.0),
        10 => (42.5, 40.0),
        11 => (42.5, 24.0),
        8 => (42.5, 8.0),
        12 => (60.0, 72.0),
        13 => (60.0, 56.0),
        14 => (60.0, 40.0),
        15 => (60.0, 24.0),
        16 => (60.0, 8.0),
        17 => (77.5, 72.0),
        18 => (77.5, 56.0),
        19 => (77.5, 40.0),
        20 => (77.5, 24.0),
        21 => (77.5, 8.0),
        25 => (88.75, 40.0),
        22 => (100.0, 56.0),
        23 => (100.0, 40.0),
        24 => (100.0, 24.0),
        _ => return None,
    };
    Some(Point::new(x, y))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormationMarker {
    pub player: Option<String>,
    pub jersey_number: Option<u32>,
    pub position: PositionCode,
    pub point: Point,
}

/// Markers for every lineup entry with a known slot; unknown codes are skipped.
pub fn markers(tactics: &Tactics, mirror: Mirror) -> Vec<FormationMarker> {
    tactics
        .lineup
        .iter()
        .filter_map(|entry| {
            let code = entry.position?;
            let point = slot_point(code)?.mirrored(mirror);
            Some(FormationMarker {
                player: entry.player.clone(),
                jersey_number: entry.jersey_number,
                position: code,
                point,
            })
        })
        .collect()
}
