use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::aggregate::Metric;
use crate::error::DataError;
use crate::pitch::Point;
use crate::position::PositionBucket;

pub const RECEIPT_FILE: &str = "all_receipt.json";
pub const DEFENCE_FILE: &str = "all_defence.json";
pub const SHOT_FILE: &str = "all_shot.json";
pub const PASS_FILE: &str = "all_pass.json";
pub const CARRY_FILE: &str = "all_carry.json";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassSample {
    pub length: f64,
    pub angle: f64,
}

/// Historical per-bucket samples across the whole competition. Loaded once,
/// never mutated; share it behind an `Arc` or a plain reference.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    receipt: HashMap<PositionBucket, Vec<Point>>,
    defence: HashMap<PositionBucket, Vec<Point>>,
    shot: HashMap<PositionBucket, Vec<Point>>,
    pass: HashMap<PositionBucket, Vec<PassSample>>,
    carry: HashMap<PositionBucket, Vec<f64>>,
}

impl ReferenceSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load_dir(dir: &Path) -> Result<Self, DataError> {
        let set = Self {
            receipt: parse_points_json(&read_file(dir, RECEIPT_FILE)?, RECEIPT_FILE)?,
            defence: parse_points_json(&read_file(dir, DEFENCE_FILE)?, DEFENCE_FILE)?,
            shot: parse_points_json(&read_file(dir, SHOT_FILE)?, SHOT_FILE)?,
            pass: parse_pass_json(&read_file(dir, PASS_FILE)?)?,
            carry: parse_carry_json(&read_file(dir, CARRY_FILE)?)?,
        };
        info!(
            "loaded reference distributions from {} ({} samples)",
            dir.display(),
            set.sample_count()
        );
        Ok(set)
    }

    pub fn with_receipt(mut self, data: HashMap<PositionBucket, Vec<Point>>) -> Self {
        self.receipt = data;
        self
    }

    pub fn with_defence(mut self, data: HashMap<PositionBucket, Vec<Point>>) -> Self {
        self.defence = data;
        self
    }

    pub fn with_shot(mut self, data: HashMap<PositionBucket, Vec<Point>>) -> Self {
        self.shot = data;
        self
    }

    pub fn with_pass(mut self, data: HashMap<PositionBucket, Vec<PassSample>>) -> Self {
        self.pass = data;
        self
    }

    pub fn with_carry(mut self, data: HashMap<PositionBucket, Vec<f64>>) -> Self {
        self.carry = data;
        self
    }

    /// Reference values of `metric` for `bucket`; empty when the bucket is absent.
    pub fn series(&self, bucket: PositionBucket, metric: Metric) -> Vec<f64> {
        match metric {
            Metric::ReceiptDepth | Metric::ReceiptWidth => axis_values(&self.receipt, bucket, metric),
            Metric::DefenceDepth | Metric::DefenceWidth => axis_values(&self.defence, bucket, metric),
            Metric::ShotDepth | Metric::ShotWidth => axis_values(&self.shot, bucket, metric),
            Metric::PassLength => pass_values(&self.pass, bucket, |p| p.length),
            Metric::PassAngle => pass_values(&self.pass, bucket, |p| p.angle),
            Metric::CarryDuration => self.carry.get(&bucket).cloned().unwrap_or_default(),
        }
    }

    pub fn sample_count(&self) -> usize {
        fn total<T>(map: &HashMap<PositionBucket, Vec<T>>) -> usize {
            map.values().map(Vec::len).sum()
        }
        total(&self.receipt)
            + total(&self.defence)
            + total(&self.shot)
            + total(&self.pass)
            + total(&self.carry)
    }
}

fn axis_values(
    map: &HashMap<PositionBucket, Vec<Point>>,
    bucket: PositionBucket,
    metric: Metric,
) -> Vec<f64> {
    let Some(axis) = metric.axis() else {
        return Vec::new();
    };
    map.get(&bucket)
        .map(|points| points.iter().map(|p| p.axis(axis)).collect())
        .unwrap_or_default()
}

fn pass_values(
    map: &HashMap<PositionBucket, Vec<PassSample>>,
    bucket: PositionBucket,
    field: impl Fn(&PassSample) -> f64,
) -> Vec<f64> {
    map.get(&bucket)
        .map(|samples| samples.iter().map(field).collect())
        .unwrap_or_default()
}

fn read_file(dir: &Path, name: &str) -> Result<String, DataError> {
    let path = dir.join(name);
    fs::read_to_string(&path).map_err(|source| DataError::ReferenceIo { path, source })
}

/// Bucket -> `[x, y]` samples (ball receipts, defensive actions, shots).
pub fn parse_points_json(
    raw: &str,
    what: &'static str,
) -> Result<HashMap<PositionBucket, Vec<Point>>, DataError> {
    parse_bucketed(raw, what)
}

/// Bucket -> `{length, angle}` pass samples.
pub fn parse_pass_json(raw: &str) -> Result<HashMap<PositionBucket, Vec<PassSample>>, DataError> {
    parse_bucketed(raw, PASS_FILE)
}

/// Bucket -> carry durations in seconds.
pub fn parse_carry_json(raw: &str) -> Result<HashMap<PositionBucket, Vec<f64>>, DataError> {
    parse_bucketed(raw, CARRY_FILE)
}

fn parse_bucketed<T: DeserializeOwned>(
    raw: &str,
    what: &'static str,
) -> Result<HashMap<PositionBucket, Vec<T>>, DataError> {
    let parsed: HashMap<String, Vec<T>> =
        serde_json::from_str(raw.trim()).map_err(|source| DataError::Malformed { what, source })?;
    let mut out = HashMap::with_capacity(parsed.len());
    for (name, samples) in parsed {
        match PositionBucket::from_name(&name) {
            Some(bucket) => {
                out.insert(bucket, samples);
            }
            None => warn!("{what}: skipping unknown position bucket {name:?}"),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_bucket_names_are_skipped() {
        let raw = r#"{"centerback": [[20.0, 40.0]], "goalkeeper": [[5.0, 40.0]]}"#;
        let parsed = parse_points_json(raw, RECEIPT_FILE).expect("valid json");
        assert_eq!(parsed.len(), 1);
        assert_eq!(
            parsed[&PositionBucket::Centerback],
            vec![Point::new(20.0, 40.0)]
        );
    }

    #[test]
    fn malformed_reference_reports_file() {
        let err = parse_carry_json("[1, 2, 3]").expect_err("array is not a bucket map");
        assert!(err.to_string().contains(CARRY_FILE));
    }

    #[test]
    fn series_projects_axis_and_pass_fields() {
        let set = ReferenceSet::empty()
            .with_shot(HashMap::from([(
                PositionBucket::Striker,
                vec![Point::new(108.0, 36.0), Point::new(112.0, 44.0)],
            )]))
            .with_pass(HashMap::from([(
                PositionBucket::Midfielder,
                vec![PassSample {
                    length: 22.5,
                    angle: -0.4,
                }],
            )]));
        assert_eq!(
            set.series(PositionBucket::Striker, Metric::ShotWidth),
            vec![36.0, 44.0]
        );
        assert_eq!(
            set.series(PositionBucket::Midfielder, Metric::PassAngle),
            vec![-0.4]
        );
        assert!(set.series(PositionBucket::Winger, Metric::CarryDuration).is_empty());
        assert_eq!(set.sample_count(), 3);
    }
}
