use std::fmt;

use serde::{Deserialize, Serialize};

/// Feed position code (`position.id`), 1 = goalkeeper .. 25 = secondary striker.
pub type PositionCode = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionBucket {
    Centerback,
    Fullback,
    Midfielder,
    Winger,
    Striker,
}

impl PositionBucket {
    pub const ALL: [PositionBucket; 5] = [
        PositionBucket::Centerback,
        PositionBucket::Fullback,
        PositionBucket::Midfielder,
        PositionBucket::Winger,
        PositionBucket::Striker,
    ];

    pub fn codes(self) -> &'static [PositionCode] {
        match self {
            PositionBucket::Centerback => &[3, 4, 5],
            PositionBucket::Fullback => &[2, 6, 7, 8],
            PositionBucket::Midfielder => &[9, 10, 11, 13, 14, 15, 18, 19, 20],
            PositionBucket::Winger => &[12, 16, 17, 21],
            PositionBucket::Striker => &[22, 23, 24, 25],
        }
    }

    /// Goalkeepers (1) and unknown codes belong to no bucket.
    pub fn from_code(code: PositionCode) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.codes().contains(&code))
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "centerback" | "centreback" | "center-back" | "centre-back" | "cb" => {
                Some(PositionBucket::Centerback)
            }
            "fullback" | "full-back" | "fb" => Some(PositionBucket::Fullback),
            "midfielder" | "midfield" | "mf" => Some(PositionBucket::Midfielder),
            "winger" | "wing" | "w" => Some(PositionBucket::Winger),
            "striker" | "forward" | "st" => Some(PositionBucket::Striker),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PositionBucket::Centerback => "centerback",
            PositionBucket::Fullback => "fullback",
            PositionBucket::Midfielder => "midfielder",
            PositionBucket::Winger => "winger",
            PositionBucket::Striker => "striker",
        }
    }
}

impl fmt::Display for PositionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_are_disjoint_and_skip_goalkeeper() {
        assert_eq!(PositionBucket::from_code(1), None);
        assert_eq!(PositionBucket::from_code(26), None);
        for code in 2..=25 {
            let owners = PositionBucket::ALL
                .iter()
                .filter(|b| b.codes().contains(&code))
                .count();
            assert_eq!(owners, 1, "code {code} must map to exactly one bucket");
        }
    }

    #[test]
    fn names_parse_back() {
        for bucket in PositionBucket::ALL {
            assert_eq!(PositionBucket::from_name(bucket.name()), Some(bucket));
        }
        assert_eq!(
            PositionBucket::from_name(" Centre-Back "),
            Some(PositionBucket::Centerback)
        );
        assert_eq!(PositionBucket::from_name("goalkeeper"), None);
    }
}
