use serde::{Deserialize, Serialize};

pub const PITCH_LENGTH: f64 = 120.0;
pub const PITCH_WIDTH: f64 = 80.0;

/// A pitch coordinate in the feed's frame: x along the length (0..=120),
/// y across the width (0..=80). Wire form is `[x, y]` (a trailing z is ignored).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn mirrored(self, mirror: Mirror) -> Self {
        match mirror {
            Mirror::Identity => self,
            Mirror::Full => Point::new(PITCH_LENGTH - self.x, PITCH_WIDTH - self.y),
            Mirror::Horizontal => Point::new(PITCH_LENGTH - self.x, self.y),
        }
    }

    pub fn axis(self, axis: Axis) -> f64 {
        match axis {
            Axis::Depth => self.x,
            Axis::Width => self.y,
        }
    }
}

impl TryFrom<Vec<f64>> for Point {
    type Error = String;

    fn try_from(raw: Vec<f64>) -> Result<Self, Self::Error> {
        match raw.as_slice() {
            [x, y, ..] => Ok(Point::new(*x, *y)),
            _ => Err(format!("location needs two components, got {}", raw.len())),
        }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Depth,
    Width,
}

impl Axis {
    pub fn extent(self) -> f64 {
        match self {
            Axis::Depth => PITCH_LENGTH,
            Axis::Width => PITCH_WIDTH,
        }
    }
}

/// Every event is recorded with the acting team attacking left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mirror {
    Identity,
    /// `x' = 120 - x, y' = 80 - y`. An involution.
    Full,
    /// `x' = 120 - x, y' = y`.
    Horizontal,
}

/// Chart families, each bound to exactly one convention for opponent data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Chart {
    TacticPlot,
    DefensiveDisplay,
    FormationOverlay,
    PositionView,
}

impl Chart {
    pub fn own_mirror(self) -> Mirror {
        Mirror::Identity
    }

    pub fn opponent_mirror(self) -> Mirror {
        match self {
            Chart::TacticPlot | Chart::DefensiveDisplay => Mirror::Full,
            Chart::FormationOverlay => Mirror::Horizontal,
            Chart::PositionView => Mirror::Identity,
        }
    }

    pub fn mirror_for(self, opponent: bool) -> Mirror {
        if opponent {
            self.opponent_mirror()
        } else {
            self.own_mirror()
        }
    }
}

pub fn normalize(point: Point, mirror: Mirror) -> Point {
    point.mirrored(mirror)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_mirror_is_an_involution() {
        for p in [
            Point::new(0.0, 0.0),
            Point::new(120.0, 80.0),
            Point::new(37.5, 12.25),
            Point::new(101.0, 79.9),
        ] {
            assert_eq!(p.mirrored(Mirror::Full).mirrored(Mirror::Full), p);
            assert_eq!(
                p.mirrored(Mirror::Horizontal).mirrored(Mirror::Horizontal),
                p
            );
        }
    }

    #[test]
    fn full_mirror_flips_both_axes() {
        let p = normalize(Point::new(100.0, 20.0), Mirror::Full);
        assert_eq!(p, Point::new(20.0, 60.0));
        let h = normalize(Point::new(100.0, 20.0), Mirror::Horizontal);
        assert_eq!(h, Point::new(20.0, 20.0));
    }

    #[test]
    fn point_parses_from_two_or_three_components() {
        let p: Point = serde_json::from_str("[60.5, 40.1]").expect("pair");
        assert_eq!(p, Point::new(60.5, 40.1));
        let p: Point = serde_json::from_str("[118.0, 38.2, 1.4]").expect("triple");
        assert_eq!(p, Point::new(118.0, 38.2));
        assert!(serde_json::from_str::<Point>("[1.0]").is_err());
    }

    #[test]
    fn own_data_is_never_mirrored() {
        for chart in [
            Chart::TacticPlot,
            Chart::DefensiveDisplay,
            Chart::FormationOverlay,
            Chart::PositionView,
        ] {
            assert_eq!(chart.mirror_for(false), Mirror::Identity);
        }
        assert_eq!(Chart::TacticPlot.mirror_for(true), Mirror::Full);
    }
}
