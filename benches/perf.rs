use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use wc23_tactics::aggregate::{Metric, position_matrix};
use wc23_tactics::classify::{classify, is_no_goal_shot, select};
use wc23_tactics::config::Config;
use wc23_tactics::context::AnalysisContext;
use wc23_tactics::event::{Event, EventDetail, MatchEvents};
use wc23_tactics::open_data::parse_events_json;
use wc23_tactics::pitch::Point;
use wc23_tactics::position::PositionBucket;
use wc23_tactics::reference::{PassSample, ReferenceSet};
use wc23_tactics::sequence::build_up_sequences;

const TEAMS: [&str; 2] = ["Home", "Away"];

/// A full-length match worth of events cycling through the classified types.
fn synthetic_match(len: u32) -> MatchEvents {
    let events = (1..=len)
        .map(|index| {
            let team = TEAMS[(index / 7 % 2) as usize].to_string();
            let x = f64::from(index % 120);
            let y = f64::from(index * 7 % 80);
            let (type_id, detail, duration) = match index % 10 {
                0 => (
                    16,
                    EventDetail::Shot {
                        outcome: Some(if index % 60 == 0 { "Goal" } else { "Saved" }.to_string()),
                        end_location: Some(Point::new(120.0, 40.0)),
                        xg: Some(0.1),
                    },
                    None,
                ),
                1 | 2 | 3 => (
                    30,
                    EventDetail::Pass {
                        length: Some(f64::from(index % 60)),
                        angle: Some(0.3),
                        end_location: Some(Point::new((x + 20.0).min(120.0), y)),
                        outcome: (index % 4 == 0).then(|| "Incomplete".to_string()),
                        has_outcome: index % 4 == 0,
                    },
                    Some(1.0),
                ),
                4 => (42, EventDetail::BallReceipt, None),
                5 | 6 => (
                    43,
                    EventDetail::Carry {
                        end_location: Some(Point::new((x + 5.0).min(120.0), y)),
                    },
                    Some(f64::from(index % 8) * 0.75),
                ),
                7 => (
                    4,
                    EventDetail::Duel {
                        duel_type: Some(if index % 3 == 0 { 11 } else { 10 }),
                        outcome: Some(4),
                    },
                    None,
                ),
                8 => (
                    10,
                    EventDetail::Interception {
                        outcome: Some(if index % 2 == 0 { 16 } else { 13 }),
                    },
                    None,
                ),
                _ => (9, EventDetail::Clearance, None),
            };
            Event {
                index,
                id: format!("ev-{index}"),
                type_id,
                period: if index < len / 2 { 1 } else { 2 },
                minute: index * 90 / len,
                second: index % 60,
                timestamp: None,
                team,
                player: Some(format!("Player {}", index % 11)),
                position: Some(1 + index % 25),
                location: Some(Point::new(x, y)),
                duration,
                detail,
            }
        })
        .collect();
    MatchEvents::new(events)
}

fn synthetic_context() -> AnalysisContext {
    let points: HashMap<PositionBucket, Vec<Point>> = PositionBucket::ALL
        .iter()
        .map(|b| {
            let pts = (0..2_000)
                .map(|i| Point::new(f64::from(i % 120), f64::from(i % 80)))
                .collect();
            (*b, pts)
        })
        .collect();
    let passes: HashMap<PositionBucket, Vec<PassSample>> = PositionBucket::ALL
        .iter()
        .map(|b| {
            let samples = (0..2_000)
                .map(|i| PassSample {
                    length: f64::from(i % 70),
                    angle: f64::from(i % 6) - 3.0,
                })
                .collect();
            (*b, samples)
        })
        .collect();
    let carries: HashMap<PositionBucket, Vec<f64>> = PositionBucket::ALL
        .iter()
        .map(|b| (*b, (0..2_000).map(|i| f64::from(i % 10) * 0.5).collect()))
        .collect();
    let reference = ReferenceSet::empty()
        .with_receipt(points.clone())
        .with_defence(points.clone())
        .with_shot(points)
        .with_pass(passes)
        .with_carry(carries);
    AnalysisContext::new(Config::default(), reference)
}

fn bench_classify(c: &mut Criterion) {
    let events = synthetic_match(3_500);
    let home = events.team("Home");
    c.bench_function("classify_team", |b| {
        b.iter(|| {
            let classified = classify(black_box(&home));
            black_box(classified.counts());
        })
    });
}

fn bench_sequences(c: &mut Criterion) {
    let events = synthetic_match(3_500);
    let home = events.team("Home");
    let shots = select(home.events(), is_no_goal_shot);
    c.bench_function("build_up_sequences", |b| {
        b.iter(|| {
            let sequences = build_up_sequences(black_box(&home), &shots);
            black_box(sequences.len());
        })
    });
}

fn bench_position_matrix(c: &mut Criterion) {
    let events = synthetic_match(3_500);
    let home = events.team("Home");
    let ctx = synthetic_context();
    c.bench_function("position_matrix", |b| {
        b.iter(|| {
            let matrix = position_matrix(&ctx, black_box(&home), &Metric::ALL);
            black_box(matrix.cells.len());
        })
    });
}

fn bench_events_parse(c: &mut Criterion) {
    c.bench_function("events_parse", |b| {
        b.iter(|| {
            let events = parse_events_json(black_box(EVENTS_JSON)).unwrap();
            black_box(events.len());
        })
    });
}

criterion_group!(
    perf,
    bench_classify,
    bench_sequences,
    bench_position_matrix,
    bench_events_parse
);
criterion_main!(perf);

const EVENTS_JSON: &str = include_str!("../tests/fixtures/events_sample.json");
