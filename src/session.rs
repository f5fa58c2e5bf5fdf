use std::sync::Arc;
use std::sync::mpsc::Sender;

use log::debug;

use crate::error::DataError;
use crate::event::MatchEvents;
use crate::worker::{FetchCommand, FetchUpdate};

#[derive(Debug, Clone)]
pub struct LoadedMatch {
    pub match_id: u64,
    pub events: Arc<MatchEvents>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Accepted,
    /// The update answered an older selection and was dropped.
    Stale,
}

/// Selection state of one viewer. The newest selection wins: results that
/// arrive for an earlier selection are discarded, never merged.
#[derive(Debug, Default)]
pub struct Session {
    generation: u64,
    selected: Option<u64>,
    loaded: Option<LoadedMatch>,
    last_error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    pub fn loaded(&self) -> Option<&LoadedMatch> {
        self.loaded.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.selected.is_some()
            && self.loaded.as_ref().map(|l| l.match_id) != self.selected
            && self.last_error.is_none()
    }

    /// Starts a new selection and returns the command that fetches it.
    pub fn select(&mut self, match_id: u64) -> FetchCommand {
        self.generation += 1;
        self.selected = Some(match_id);
        self.last_error = None;
        FetchCommand::LoadMatch {
            match_id,
            generation: self.generation,
        }
    }

    pub fn request(&mut self, tx: &Sender<FetchCommand>, match_id: u64) -> Result<u64, DataError> {
        let cmd = self.select(match_id);
        tx.send(cmd).map_err(|_| DataError::WorkerGone)?;
        Ok(self.generation)
    }

    pub fn apply(&mut self, update: FetchUpdate) -> Applied {
        if update.generation() != self.generation {
            debug!(
                "discarding stale result for match {} (generation {}, current {})",
                update.match_id(),
                update.generation(),
                self.generation
            );
            return Applied::Stale;
        }
        match update {
            FetchUpdate::MatchLoaded {
                match_id, events, ..
            } => {
                self.loaded = Some(LoadedMatch { match_id, events });
                self.last_error = None;
            }
            FetchUpdate::FetchFailed { error, .. } => {
                self.loaded = None;
                self.last_error = Some(error.to_string());
            }
        }
        Applied::Accepted
    }
}
