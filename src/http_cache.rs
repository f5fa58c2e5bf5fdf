use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ETAG, HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};

use crate::error::DataError;

/// Bodies kept by default: the match list plus a few recent event documents.
pub const DEFAULT_CACHE_CAPACITY: usize = 4;

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    etag: Option<String>,
    last_modified: Option<String>,
    fetched_at: u64,
}

#[derive(Debug, Default)]
struct Entries {
    by_url: HashMap<String, CacheEntry>,
    /// Least recently used first.
    order: VecDeque<String>,
}

impl Entries {
    fn touch(&mut self, url: &str) {
        if let Some(pos) = self.order.iter().position(|u| u == url) {
            if let Some(key) = self.order.remove(pos) {
                self.order.push_back(key);
            }
        }
    }

    fn insert(&mut self, url: &str, entry: CacheEntry, capacity: usize) {
        if self.by_url.insert(url.to_string(), entry).is_some() {
            self.touch(url);
        } else {
            self.order.push_back(url.to_string());
        }
        while self.order.len() > capacity {
            if let Some(evicted) = self.order.pop_front() {
                debug!("evicting cached {evicted}");
                self.by_url.remove(&evicted);
            }
        }
    }
}

/// In-memory conditional-GET cache, owned by one fetcher. Re-selecting a
/// match revalidates with `If-None-Match` / `If-Modified-Since` instead of
/// downloading the event document again. At most `capacity` bodies are kept,
/// least recently used evicted first. Nothing is written to disk.
#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<Entries>,
    capacity: usize,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Entries::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, url: &str) -> bool {
        self.lock().by_url.contains_key(url)
    }

    pub fn fetch_text(&self, client: &Client, url: &str) -> Result<String, DataError> {
        let cached_entry = self.lock().by_url.get(url).cloned();

        let mut req = client.get(url);
        if let Some(entry) = cached_entry.as_ref() {
            if let Some(etag) = entry.etag.as_ref() {
                req = req.header(IF_NONE_MATCH, etag);
            }
            if let Some(last_modified) = entry.last_modified.as_ref() {
                req = req.header(IF_MODIFIED_SINCE, last_modified);
            }
        }

        let resp = req.send().map_err(|source| DataError::Request {
            url: url.to_string(),
            source,
        })?;
        let status = resp.status();
        let headers = resp.headers().clone();
        if status == StatusCode::NOT_MODIFIED {
            if let Some(entry) = cached_entry {
                debug!("{url} not modified since {}", entry.fetched_at);
                self.lock().touch(url);
                return Ok(entry.body);
            }
            return Err(DataError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(DataError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().map_err(|source| DataError::Request {
            url: url.to_string(),
            source,
        })?;

        let header_text = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };
        self.store(
            url,
            CacheEntry {
                body: body.clone(),
                etag: header_text(ETAG),
                last_modified: header_text(LAST_MODIFIED),
                fetched_at: system_time_to_secs(SystemTime::now()).unwrap_or_default(),
            },
        );
        Ok(body)
    }

    fn store(&self, url: &str, entry: CacheEntry) {
        let capacity = self.capacity;
        self.lock().insert(url, entry, capacity);
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn system_time_to_secs(time: SystemTime) -> Option<u64> {
    time.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}
