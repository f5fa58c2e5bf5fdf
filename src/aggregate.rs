use std::collections::BTreeMap;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::context::AnalysisContext;
use crate::event::{Event, EventDetail, TeamEvents};
use crate::pitch::{Axis, Point};
use crate::position::PositionBucket;
use crate::taxonomy::ActionGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ReceiptDepth,
    ReceiptWidth,
    DefenceDepth,
    DefenceWidth,
    ShotDepth,
    ShotWidth,
    PassLength,
    PassAngle,
    CarryDuration,
}

/// Axis range and histogram bin width for drawing a metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramHint {
    pub range: Option<(f64, f64)>,
    pub bin_width: f64,
}

impl Metric {
    pub const ALL: [Metric; 9] = [
        Metric::ReceiptDepth,
        Metric::ReceiptWidth,
        Metric::DefenceDepth,
        Metric::DefenceWidth,
        Metric::ShotDepth,
        Metric::ShotWidth,
        Metric::PassLength,
        Metric::PassAngle,
        Metric::CarryDuration,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::ReceiptDepth => "receipt_depth",
            Metric::ReceiptWidth => "receipt_width",
            Metric::DefenceDepth => "defence_depth",
            Metric::DefenceWidth => "defence_width",
            Metric::ShotDepth => "shot_depth",
            Metric::ShotWidth => "shot_width",
            Metric::PassLength => "pass_length",
            Metric::PassAngle => "pass_angle",
            Metric::CarryDuration => "carry_duration",
        }
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|m| m.name() == wanted)
    }

    pub fn group(self) -> ActionGroup {
        match self {
            Metric::ReceiptDepth | Metric::ReceiptWidth => ActionGroup::BallReceipt,
            Metric::DefenceDepth | Metric::DefenceWidth => ActionGroup::Defence,
            Metric::ShotDepth | Metric::ShotWidth => ActionGroup::Shot,
            Metric::PassLength | Metric::PassAngle => ActionGroup::Pass,
            Metric::CarryDuration => ActionGroup::Carry,
        }
    }

    pub fn axis(self) -> Option<Axis> {
        match self {
            Metric::ReceiptDepth | Metric::DefenceDepth | Metric::ShotDepth => Some(Axis::Depth),
            Metric::ReceiptWidth | Metric::DefenceWidth | Metric::ShotWidth => Some(Axis::Width),
            _ => None,
        }
    }

    /// Value of this metric for one event, if the event carries it.
    pub fn value(self, e: &Event) -> Option<f64> {
        if let Some(axis) = self.axis() {
            return e.location.map(|p| p.axis(axis));
        }
        match (self, &e.detail) {
            (Metric::PassLength, EventDetail::Pass { length, .. }) => *length,
            (Metric::PassAngle, EventDetail::Pass { angle, .. }) => *angle,
            (Metric::CarryDuration, EventDetail::Carry { .. }) => e.duration,
            _ => None,
        }
    }

    pub fn hint(self) -> HistogramHint {
        match self.axis() {
            Some(axis) => HistogramHint {
                range: Some((0.0, axis.extent())),
                bin_width: 1.0,
            },
            None => HistogramHint {
                range: None,
                bin_width: match self {
                    Metric::PassLength => 1.0,
                    _ => 0.1,
                },
            },
        }
    }
}

/// Events by players whose position code falls in `bucket`. Events without a
/// recognised code are never included.
pub fn bucket_events(events: &[Event], bucket: PositionBucket) -> impl Iterator<Item = &Event> {
    events.iter().filter(move |e| e.bucket() == Some(bucket))
}

pub fn selected_values(events: &[Event], bucket: PositionBucket, metric: Metric) -> Vec<f64> {
    let group = metric.group();
    bucket_events(events, bucket)
        .filter(|e| group.contains(e.type_id))
        .filter_map(|e| metric.value(e))
        .collect()
}

pub fn bucket_counts(events: &[Event], group: ActionGroup) -> BTreeMap<PositionBucket, usize> {
    let mut counts = BTreeMap::new();
    for e in events.iter().filter(|e| group.contains(e.type_id)) {
        if let Some(bucket) = e.bucket() {
            *counts.entry(bucket).or_insert(0) += 1;
        }
    }
    counts
}

/// Locations of every located event in `bucket`, any type.
pub fn heatmap_points(events: &[Event], bucket: PositionBucket) -> Vec<Point> {
    bucket_events(events, bucket)
        .filter_map(|e| e.location)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionPair {
    pub bucket: PositionBucket,
    pub metric: Metric,
    pub hint: HistogramHint,
    pub selected: Vec<f64>,
    pub reference: Vec<f64>,
}

pub fn compare(
    ctx: &AnalysisContext,
    team: &TeamEvents,
    bucket: PositionBucket,
    metric: Metric,
) -> DistributionPair {
    DistributionPair {
        bucket,
        metric,
        hint: metric.hint(),
        selected: selected_values(team.events(), bucket, metric),
        reference: ctx.reference().series(bucket, metric),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionMatrix {
    pub team: String,
    pub cells: Vec<DistributionPair>,
    pub heatmaps: BTreeMap<PositionBucket, Vec<Point>>,
}

impl PositionMatrix {
    pub fn cell(&self, bucket: PositionBucket, metric: Metric) -> Option<&DistributionPair> {
        self.cells
            .iter()
            .find(|c| c.bucket == bucket && c.metric == metric)
    }
}

/// Every bucket x metric pair for `team`, bucket-major.
pub fn position_matrix(
    ctx: &AnalysisContext,
    team: &TeamEvents,
    metrics: &[Metric],
) -> PositionMatrix {
    let pairs: Vec<(PositionBucket, Metric)> = PositionBucket::ALL
        .iter()
        .flat_map(|b| metrics.iter().map(move |m| (*b, *m)))
        .collect();

    let cells: Vec<DistributionPair> = with_matrix_pool(ctx.config().matrix_parallelism, || {
        pairs
            .par_iter()
            .map(|(bucket, metric)| compare(ctx, team, *bucket, *metric))
            .collect()
    });

    let heatmaps = PositionBucket::ALL
        .iter()
        .map(|b| (*b, heatmap_points(team.events(), *b)))
        .collect();

    debug!(
        "position matrix for {}: {} cells",
        team.team(),
        cells.len()
    );
    PositionMatrix {
        team: team.team().to_string(),
        cells,
        heatmaps,
    }
}

fn with_matrix_pool<T>(threads: usize, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(action),
        Err(_) => action(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_round_trip() {
        for m in Metric::ALL {
            assert_eq!(Metric::from_name(m.name()), Some(m));
        }
        assert_eq!(Metric::from_name("Pass-Length"), Some(Metric::PassLength));
        assert_eq!(Metric::from_name("xg"), None);
    }

    #[test]
    fn axis_metrics_hint_full_pitch_range() {
        assert_eq!(Metric::DefenceDepth.hint().range, Some((0.0, 120.0)));
        assert_eq!(Metric::ReceiptWidth.hint().range, Some((0.0, 80.0)));
        assert_eq!(Metric::PassAngle.hint().range, None);
        assert!((Metric::CarryDuration.hint().bin_width - 0.1).abs() < f64::EPSILON);
    }
}
