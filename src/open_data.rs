use log::info;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::error::DataError;
use crate::event::{Event, MatchEvents, RawEvent};
use crate::http_cache::ResponseCache;
use crate::http_client::build_http_client;
use crate::matches::{MatchInfo, MatchList};

/// Anything that can produce a match's event list. The fetch worker is
/// generic over this so it can run against a canned source.
pub trait EventSource: Send + 'static {
    fn fetch_events(&self, match_id: u64) -> Result<MatchEvents, DataError>;
}

pub struct OpenDataClient {
    client: Client,
    cache: ResponseCache,
    config: Config,
}

impl OpenDataClient {
    pub fn new(config: &Config) -> Result<Self, DataError> {
        Ok(Self {
            client: build_http_client(config.request_timeout)?,
            cache: ResponseCache::new(),
            config: config.clone(),
        })
    }

    pub fn fetch_matches(&self) -> Result<MatchList, DataError> {
        let url = self.config.matches_url();
        info!("fetching match list {url}");
        let body = self.cache.fetch_text(&self.client, &url)?;
        parse_matches_json(&body)
    }

    pub fn fetch_events(&self, match_id: u64) -> Result<MatchEvents, DataError> {
        let url = self.config.events_url(match_id);
        info!("fetching events for match {match_id}");
        let body = self.cache.fetch_text(&self.client, &url)?;
        let events = parse_events_json(&body)?;
        info!("match {match_id}: {} events", events.len());
        Ok(events)
    }
}

impl EventSource for OpenDataClient {
    fn fetch_events(&self, match_id: u64) -> Result<MatchEvents, DataError> {
        OpenDataClient::fetch_events(self, match_id)
    }
}

pub fn parse_matches_json(raw: &str) -> Result<MatchList, DataError> {
    let matches: Vec<MatchInfo> = parse_records(raw, "match list")?;
    Ok(MatchList::new(matches))
}

pub fn parse_events_json(raw: &str) -> Result<MatchEvents, DataError> {
    let raw_events: Vec<RawEvent> = parse_records(raw, "event")?;
    Ok(MatchEvents::new(
        raw_events.into_iter().map(Event::from).collect(),
    ))
}

fn parse_records<T: DeserializeOwned>(raw: &str, what: &'static str) -> Result<Vec<T>, DataError> {
    let root: Value =
        serde_json::from_str(raw.trim()).map_err(|source| DataError::Malformed { what, source })?;
    let Value::Array(items) = root else {
        return Err(DataError::NotASequence { what });
    };
    if items.iter().any(|item| !item.is_object()) {
        return Err(DataError::NotASequence { what });
    }
    serde_json::from_value(Value::Array(items)).map_err(|source| DataError::Malformed { what, source })
}
