use std::io::{self, BufRead};
use std::sync::mpsc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use log::{info, warn};
use serde::Serialize;

use wc23_tactics::aggregate::{self, Metric};
use wc23_tactics::charts::{self, split_sides};
use wc23_tactics::classify::classify;
use wc23_tactics::config::Config;
use wc23_tactics::context::AnalysisContext;
use wc23_tactics::event::MatchEvents;
use wc23_tactics::matches::{MatchInfo, MatchList};
use wc23_tactics::open_data::OpenDataClient;
use wc23_tactics::position::PositionBucket;
use wc23_tactics::session::{Applied, Session};
use wc23_tactics::worker::{FetchCommand, spawn_fetch_worker};

#[derive(Debug, Parser)]
#[command(name = "wc23_tactics", version, about = "Tactical chart data from open match events")]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Competition stages with their match ids
    Stages,
    /// Matches of one stage (defaults to DEFAULT_STAGE)
    Matches {
        #[arg(long)]
        stage: Option<String>,
    },
    /// Tactic plot, formations and subset counts for one team
    Tactics {
        match_id: Option<u64>,
        /// Team name as it appears on events (defaults to the home team)
        #[arg(long)]
        team: Option<String>,
    },
    /// Starting XI and tactical shifts for one team against its opponent
    Formation {
        match_id: Option<u64>,
        #[arg(long)]
        team: Option<String>,
    },
    /// Per-position distributions against the reference data
    Positions {
        match_id: Option<u64>,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        bucket: Option<String>,
        #[arg(long)]
        metric: Option<String>,
    },
    /// Read match ids from stdin and load each in the background; the last one wins
    Browse {
        #[arg(long)]
        team: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let config = Config::from_env();
    let ctx = AnalysisContext::load(config.clone()).context("load reference distributions")?;
    let client = OpenDataClient::new(&config).context("build open-data client")?;

    match cli.command {
        Command::Stages => {
            let list = client.fetch_matches().context("match list")?;
            emit(&list.stages(), cli.pretty)
        }
        Command::Matches { stage } => {
            let list = client.fetch_matches().context("match list")?;
            let stage = stage.unwrap_or_else(|| config.default_stage.clone());
            let rows: Vec<MatchRow> = list.in_stage(&stage).into_iter().map(MatchRow::from).collect();
            if rows.is_empty() {
                warn!("no matches in stage {stage:?}");
            }
            emit(&rows, cli.pretty)
        }
        Command::Tactics { match_id, team } => {
            let (list, events, match_id) = load_match(&client, &config, match_id)?;
            let info = list.find(match_id).ok();
            let team = resolve_team(team, info, &events)?;
            emit(&charts::match_view(&events, info, &team), cli.pretty)
        }
        Command::Formation { match_id, team } => {
            let (list, events, match_id) = load_match(&client, &config, match_id)?;
            let info = list.find(match_id).ok();
            let team = resolve_team(team, info, &events)?;
            let (own, other) = split_sides(&events, info, &team);
            let overlay = charts::formation_overlay(&classify(&own), &classify(&other));
            emit(&overlay, cli.pretty)
        }
        Command::Positions {
            match_id,
            team,
            bucket,
            metric,
        } => {
            let (list, events, match_id) = load_match(&client, &config, match_id)?;
            let info = list.find(match_id).ok();
            let team = resolve_team(team, info, &events)?;
            let own = events.team(&team);
            let metric = metric
                .map(|m| Metric::from_name(&m).ok_or_else(|| anyhow!("unknown metric {m:?}")))
                .transpose()?;
            let bucket = bucket
                .map(|b| PositionBucket::from_name(&b).ok_or_else(|| anyhow!("unknown bucket {b:?}")))
                .transpose()?;
            match (bucket, metric) {
                (Some(bucket), Some(metric)) => {
                    emit(&aggregate::compare(&ctx, &own, bucket, metric), cli.pretty)
                }
                (bucket, metric) => {
                    let metrics = metric.map(|m| vec![m]).unwrap_or_else(|| Metric::ALL.to_vec());
                    let mut matrix = aggregate::position_matrix(&ctx, &own, &metrics);
                    if let Some(bucket) = bucket {
                        matrix.cells.retain(|c| c.bucket == bucket);
                        matrix.heatmaps.retain(|b, _| *b == bucket);
                    }
                    emit(&matrix, cli.pretty)
                }
            }
        }
        Command::Browse { team } => browse(client, &config, team, cli.pretty),
    }
}

#[derive(Debug, Serialize)]
struct MatchRow {
    match_id: u64,
    label: String,
    home_team: String,
    away_team: String,
}

impl From<&MatchInfo> for MatchRow {
    fn from(m: &MatchInfo) -> Self {
        Self {
            match_id: m.match_id,
            label: m.label(),
            home_team: m.home_team.name.clone(),
            away_team: m.away_team.name.clone(),
        }
    }
}

fn load_match(
    client: &OpenDataClient,
    config: &Config,
    match_id: Option<u64>,
) -> Result<(MatchList, MatchEvents, u64)> {
    let match_id = match_id.unwrap_or(config.default_match_id);
    let list = match client.fetch_matches() {
        Ok(list) => list,
        Err(err) => {
            warn!("match list unavailable, continuing without header: {err}");
            MatchList::default()
        }
    };
    let events = client
        .fetch_events(match_id)
        .with_context(|| format!("events for match {match_id}"))?;
    Ok((list, events, match_id))
}

fn resolve_team(team: Option<String>, info: Option<&MatchInfo>, events: &MatchEvents) -> Result<String> {
    if let Some(team) = team {
        return Ok(team);
    }
    info.map(|m| m.home_team.name.clone())
        .or_else(|| events.teams().first().map(|t| t.to_string()))
        .ok_or_else(|| anyhow!("match has no events and no match record; pass --team"))
}

fn browse(client: OpenDataClient, config: &Config, team: Option<String>, pretty: bool) -> Result<()> {
    let list = client.fetch_matches().unwrap_or_default();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (tx, rx) = mpsc::channel();
    let handle = spawn_fetch_worker(client, tx, cmd_rx);
    let mut session = Session::new();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("read stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let Ok(match_id) = trimmed.parse::<u64>() else {
            warn!("ignoring {trimmed:?}: not a match id");
            continue;
        };
        session.request(&cmd_tx, match_id)?;
        while let Ok(update) = rx.try_recv() {
            session.apply(update);
        }
    }

    if session.selected().is_none() {
        session.request(&cmd_tx, config.default_match_id)?;
    }
    while session.is_pending() {
        let update = rx.recv().context("fetch worker stopped")?;
        if session.apply(update) == Applied::Accepted {
            break;
        }
    }
    let _ = cmd_tx.send(FetchCommand::Shutdown);
    let _ = handle.join();

    if let Some(err) = session.last_error() {
        return Err(anyhow!("match {:?}: {err}", session.selected()));
    }
    let Some(loaded) = session.loaded() else {
        return Err(anyhow!("no match loaded"));
    };
    info!("showing match {}", loaded.match_id);
    let info = list.find(loaded.match_id).ok();
    let team = resolve_team(team, info, &loaded.events)?;
    emit(&charts::match_view(&loaded.events, info, &team), pretty)
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serialize output")?;
    println!("{json}");
    Ok(())
}
