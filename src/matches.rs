use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInfo {
    #[serde(alias = "home_team_id", alias = "away_team_id")]
    pub id: Option<u32>,
    /// Name used on the team's event records.
    #[serde(alias = "home_team_name", alias = "away_team_name")]
    pub name: String,
    pub country: Option<Named>,
    pub managers: Option<Vec<Named>>,
}

impl TeamInfo {
    /// Country name when present (national-team competitions), else team name.
    pub fn display_name(&self) -> &str {
        self.country
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or(self.name.as_str())
    }

    pub fn manager_names(&self) -> Vec<&str> {
        self.managers
            .iter()
            .flatten()
            .map(|m| m.name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub match_id: u64,
    pub match_date: NaiveDate,
    pub kick_off: Option<String>,
    pub competition_stage: Named,
    pub home_team: TeamInfo,
    pub away_team: TeamInfo,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

impl MatchInfo {
    pub fn stage(&self) -> &str {
        &self.competition_stage.name
    }

    pub fn label(&self) -> String {
        match (self.home_score, self.away_score) {
            (Some(h), Some(a)) => format!(
                "{} {h} - {a} {} ({})",
                self.home_team.display_name(),
                self.away_team.display_name(),
                self.match_date
            ),
            _ => format!(
                "{} vs {} ({})",
                self.home_team.display_name(),
                self.away_team.display_name(),
                self.match_date
            ),
        }
    }

    /// The other side of `team` (matched on event team name).
    pub fn opponent_of(&self, team: &str) -> Option<&TeamInfo> {
        if self.home_team.name == team {
            Some(&self.away_team)
        } else if self.away_team.name == team {
            Some(&self.home_team)
        } else {
            None
        }
    }

    pub fn header(&self) -> MatchHeader {
        MatchHeader {
            match_id: self.match_id,
            stage: self.stage().to_string(),
            date: self.match_date,
            home: self.home_team.display_name().to_string(),
            away: self.away_team.display_name().to_string(),
            home_score: self.home_score,
            away_score: self.away_score,
            home_managers: owned(self.home_team.manager_names()),
            away_managers: owned(self.away_team.manager_names()),
        }
    }
}

fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}

/// Title block shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchHeader {
    pub match_id: u64,
    pub stage: String,
    pub date: NaiveDate,
    pub home: String,
    pub away: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub home_managers: Vec<String>,
    pub away_managers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    pub name: String,
    pub match_ids: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchList {
    matches: Vec<MatchInfo>,
}

impl MatchList {
    pub fn new(matches: Vec<MatchInfo>) -> Self {
        Self { matches }
    }

    pub fn matches(&self) -> &[MatchInfo] {
        &self.matches
    }

    pub fn find(&self, match_id: u64) -> Result<&MatchInfo, DataError> {
        self.matches
            .iter()
            .find(|m| m.match_id == match_id)
            .ok_or(DataError::UnknownMatch(match_id))
    }

    /// Stages in order of first appearance, each with its match ids in list order.
    pub fn stages(&self) -> Vec<Stage> {
        let mut out: Vec<Stage> = Vec::new();
        for m in &self.matches {
            match out.iter_mut().find(|s| s.name == m.stage()) {
                Some(stage) => stage.match_ids.push(m.match_id),
                None => out.push(Stage {
                    name: m.stage().to_string(),
                    match_ids: vec![m.match_id],
                }),
            }
        }
        out
    }

    pub fn in_stage(&self, stage: &str) -> Vec<&MatchInfo> {
        self.matches.iter().filter(|m| m.stage() == stage).collect()
    }
}
