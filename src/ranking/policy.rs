use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

const POINT_UNITS: &[&str] = &["pts"];
const TOP_ZONE_UNITS: &[&str] = &["top", "zone"];

/// Scoring policy of a contest step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingType {
    /// 1000 points per route, shared between everyone who realised it
    Division,
    /// 10 points for a flash, one less per extra attempt
    AttemptsToTop,
    /// Tops first, zones break ties
    ZoneAndTopRealised,
    AttemptsToOneZoneAndTop,
    AttemptsToTwoZonesAndTop,
    HighestHold,
}

impl RankingType {
    pub const ALL: [RankingType; 6] = [
        RankingType::Division,
        RankingType::AttemptsToTop,
        RankingType::ZoneAndTopRealised,
        RankingType::AttemptsToOneZoneAndTop,
        RankingType::AttemptsToTwoZonesAndTop,
        RankingType::HighestHold,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RankingType::Division => "division",
            RankingType::AttemptsToTop => "attempts_to_top",
            RankingType::ZoneAndTopRealised => "zone_and_top_realised",
            RankingType::AttemptsToOneZoneAndTop => "attempts_to_one_zone_and_top",
            RankingType::AttemptsToTwoZonesAndTop => "attempts_to_two_zones_and_top",
            RankingType::HighestHold => "highest_hold",
        }
    }

    /// Display labels for the participant details, if the policy is scored.
    pub fn units(self) -> Option<&'static [&'static str]> {
        match self {
            RankingType::Division | RankingType::AttemptsToTop => Some(POINT_UNITS),
            RankingType::ZoneAndTopRealised => Some(TOP_ZONE_UNITS),
            RankingType::AttemptsToOneZoneAndTop
            | RankingType::AttemptsToTwoZonesAndTop
            | RankingType::HighestHold => None,
        }
    }
}

impl fmt::Display for RankingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RankingType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown ranking type '{}'", s))
    }
}

/// A score that stays integral until a fractional score is added to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Int(i64),
    Float(f64),
}

impl ScoreValue {
    pub const ZERO: ScoreValue = ScoreValue::Int(0);

    pub fn as_f64(self) -> f64 {
        match self {
            ScoreValue::Int(n) => n as f64,
            ScoreValue::Float(f) => f,
        }
    }
}

impl Add for ScoreValue {
    type Output = ScoreValue;

    fn add(self, rhs: ScoreValue) -> ScoreValue {
        match (self, rhs) {
            (ScoreValue::Int(a), ScoreValue::Int(b)) => ScoreValue::Int(a + b),
            (a, b) => ScoreValue::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreValue::Int(n) => write!(f, "{}", n),
            // Zone bonuses live in the third decimal
            ScoreValue::Float(x) => {
                let s = format!("{:.3}", x);
                let s = s.trim_end_matches('0').trim_end_matches('.');
                f.write_str(s)
            }
        }
    }
}

/// Breakdown of a single ascent score. Serialises as a JSON array:
/// `["NR"]`, `[points]` or `[top, zone]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AscentDetails {
    NotRanked,
    Points(ScoreValue),
    TopZone { top: bool, zone: bool },
}

impl Serialize for AscentDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AscentDetails::NotRanked => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element("NR")?;
                seq.end()
            }
            AscentDetails::Points(value) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(value)?;
                seq.end()
            }
            AscentDetails::TopZone { top, zone } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(top)?;
                seq.serialize_element(zone)?;
                seq.end()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AscentScore {
    /// `None` means not ranked, never zero
    pub value: Option<ScoreValue>,
    pub details: AscentDetails,
}

impl AscentScore {
    pub fn not_ranked() -> Self {
        Self {
            value: None,
            details: AscentDetails::NotRanked,
        }
    }

    pub fn points(value: ScoreValue) -> Self {
        Self {
            value: Some(value),
            details: AscentDetails::Points(value),
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.value.is_some()
    }
}

/// Accumulated details of a participant. Serialises as `[points]` or
/// `[tops, zones]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticipantDetails {
    Points(ScoreValue),
    TopZoneCounts { tops: u32, zones: u32 },
}

impl Serialize for ParticipantDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParticipantDetails::Points(value) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(value)?;
                seq.end()
            }
            ParticipantDetails::TopZoneCounts { tops, zones } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(tops)?;
                seq.serialize_element(zones)?;
                seq.end()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantScore {
    pub value: Option<ScoreValue>,
    pub details: Option<ParticipantDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<&'static [&'static str]>,
}
