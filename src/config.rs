use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/statsbomb/open-data/master/data";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub open_data_base_url: String,
    pub competition_id: u32,
    pub season_id: u32,
    pub reference_dir: PathBuf,
    pub request_timeout: Duration,
    pub default_stage: String,
    pub default_match_id: u64,
    pub matrix_parallelism: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            open_data_base_url: DEFAULT_BASE_URL.to_string(),
            competition_id: 72,
            season_id: 107,
            reference_dir: PathBuf::from("json"),
            request_timeout: Duration::from_secs(10),
            default_stage: "Group Stage".to_string(),
            default_match_id: 3893806,
            matrix_parallelism: 5,
        }
    }
}

impl Config {
    /// Reads `.env.local` then `.env`, then the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            open_data_base_url: get("OPEN_DATA_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(d.open_data_base_url),
            competition_id: get("COMPETITION_ID")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.competition_id),
            season_id: get("SEASON_ID")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.season_id),
            reference_dir: get("REFERENCE_DIR")
                .map(PathBuf::from)
                .unwrap_or(d.reference_dir),
            request_timeout: Duration::from_secs(
                get("HTTP_TIMEOUT_SECS")
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(10)
                    .clamp(2, 120),
            ),
            default_stage: get("DEFAULT_STAGE").unwrap_or(d.default_stage),
            default_match_id: get("DEFAULT_MATCH_ID")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.default_match_id),
            matrix_parallelism: get("MATRIX_PARALLELISM")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(d.matrix_parallelism)
                .clamp(1, 16),
        }
    }

    pub fn matches_url(&self) -> String {
        format!(
            "{}/matches/{}/{}.json",
            self.open_data_base_url, self.competition_id, self.season_id
        )
    }

    pub fn events_url(&self, match_id: u64) -> String {
        format!("{}/events/{match_id}.json", self.open_data_base_url)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn lookup_overrides_and_clamps() {
        let vars = HashMap::from([
            ("OPEN_DATA_BASE_URL", "http://localhost:8080/data/"),
            ("SEASON_ID", "3"),
            ("HTTP_TIMEOUT_SECS", "900"),
            ("MATRIX_PARALLELISM", "0"),
            ("COMPETITION_ID", "not-a-number"),
        ]);
        let cfg = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.open_data_base_url, "http://localhost:8080/data");
        assert_eq!(cfg.season_id, 3);
        assert_eq!(cfg.competition_id, 72);
        assert_eq!(cfg.request_timeout, Duration::from_secs(120));
        assert_eq!(cfg.matrix_parallelism, 1);
        assert_eq!(
            cfg.matches_url(),
            "http://localhost:8080/data/matches/72/3.json"
        );
        assert_eq!(
            cfg.events_url(3893806),
            "http://localhost:8080/data/events/3893806.json"
        );
    }
}
