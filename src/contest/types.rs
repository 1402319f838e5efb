use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ranking::RankingType;

pub type StepId = u64;
pub type CategoryId = u64;
pub type RouteGroupId = u64;
pub type RouteId = u64;
pub type ParticipantId = u64;
pub type AscentId = u64;

/// A stage subdivision of a contest. Its ranking type decides how ascents score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub name: String,
    pub ranking_type: RankingType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// When false, rankings are split by genre
    #[serde(default)]
    pub unisex: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Male,
    Female,
}

impl Genre {
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Male => "male",
            Genre::Female => "female",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Genre::Male),
            "female" => Ok(Genre::Female),
            other => Err(format!("unknown genre '{}' (expected male or female)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGroup {
    pub id: RouteGroupId,
    pub step_id: StepId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub route_group_id: RouteGroupId,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub disabled_at: Option<DateTime<Utc>>,
}

impl Route {
    pub fn is_disabled(&self) -> bool {
        self.disabled_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub first_name: String,
    pub last_name: String,
    pub category_id: CategoryId,
    pub genre: Genre,
}

impl Participant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One recorded result of a participant on a route.
///
/// Attempt counts are `None` or `0` when the hold was never reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ascent {
    pub id: AscentId,
    pub participant_id: ParticipantId,
    pub route_id: RouteId,
    #[serde(default)]
    pub realised: bool,
    #[serde(default)]
    pub top_attempt: Option<u32>,
    #[serde(default)]
    pub zone_1_attempt: Option<u32>,
}

impl Ascent {
    pub fn is_topped(&self) -> bool {
        self.top_attempt.is_some_and(|n| n > 0)
    }

    pub fn is_zoned(&self) -> bool {
        self.zone_1_attempt.is_some_and(|n| n > 0)
    }
}
