use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use crate::error::DataError;
use crate::event::MatchEvents;
use crate::open_data::EventSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCommand {
    LoadMatch { match_id: u64, generation: u64 },
    Shutdown,
}

#[derive(Debug)]
pub enum FetchUpdate {
    MatchLoaded {
        match_id: u64,
        generation: u64,
        events: Arc<MatchEvents>,
    },
    FetchFailed {
        match_id: u64,
        generation: u64,
        error: DataError,
    },
}

impl FetchUpdate {
    pub fn generation(&self) -> u64 {
        match self {
            FetchUpdate::MatchLoaded { generation, .. }
            | FetchUpdate::FetchFailed { generation, .. } => *generation,
        }
    }

    pub fn match_id(&self) -> u64 {
        match self {
            FetchUpdate::MatchLoaded { match_id, .. } | FetchUpdate::FetchFailed { match_id, .. } => {
                *match_id
            }
        }
    }
}

/// Runs fetches off the caller's thread, one at a time, in request order.
/// Results are tagged with the requesting generation; deciding which ones are
/// stale is the receiver's job.
pub fn spawn_fetch_worker<S: EventSource>(
    source: S,
    tx: Sender<FetchUpdate>,
    cmd_rx: Receiver<FetchCommand>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                FetchCommand::LoadMatch {
                    match_id,
                    generation,
                } => {
                    debug!("worker: loading match {match_id} (generation {generation})");
                    let update = match source.fetch_events(match_id) {
                        Ok(events) => FetchUpdate::MatchLoaded {
                            match_id,
                            generation,
                            events: Arc::new(events),
                        },
                        Err(error) => {
                            warn!("worker: match {match_id} fetch failed: {error}");
                            FetchUpdate::FetchFailed {
                                match_id,
                                generation,
                                error,
                            }
                        }
                    };
                    if tx.send(update).is_err() {
                        break;
                    }
                }
                FetchCommand::Shutdown => break,
            }
        }
        debug!("worker: stopped");
    })
}
