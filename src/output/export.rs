use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::contest::{CategoryId, Genre, StepId};
use crate::ranking::{RankingCalculator, RankingType, Standing};

/// Point-in-time results of one ranking, as written by `export`.
#[derive(Debug, Clone, Serialize)]
pub struct RankingSnapshot<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub step_id: StepId,
    pub step: &'a str,
    pub category_id: CategoryId,
    pub category: &'a str,
    /// Absent for unisex categories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
    pub ranking_type: RankingType,
    pub standings: &'a [Standing],
}

impl<'a> RankingSnapshot<'a> {
    pub fn new(calculator: &'a RankingCalculator, standings: &'a [Standing]) -> Self {
        let category = calculator.category();
        Self {
            version: 1,
            generated_at: Utc::now(),
            step_id: calculator.step().id,
            step: &calculator.step().name,
            category_id: category.id,
            category: &category.name,
            genre: (!category.unisex).then_some(calculator.genre()),
            ranking_type: calculator.ranking_type(),
            standings,
        }
    }
}

/// Save a ranking snapshot to a JSON file atomically
///
/// Uses atomic-write-file so a reader never sees a half-written snapshot.
/// The parent directory must already exist.
pub fn save_snapshot(path: &Path, snapshot: &RankingSnapshot) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, snapshot)
        .context("Failed to serialize ranking snapshot")?;

    file.commit().context("Failed to save ranking snapshot")?;

    tracing::debug!(
        standings = snapshot.standings.len(),
        "wrote ranking snapshot to {}",
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::{Ascent, Category, ContestData, Participant, Route, RouteGroup, Step};
    use crate::ranking::build_leaderboard;
    use serde_json::Value;
    use std::env;

    fn sample_data(unisex: bool) -> ContestData {
        ContestData {
            steps: vec![Step {
                id: 3,
                name: "Final".to_string(),
                ranking_type: RankingType::ZoneAndTopRealised,
            }],
            categories: vec![Category {
                id: 2,
                name: "U18".to_string(),
                unisex,
            }],
            route_groups: vec![RouteGroup { id: 1, step_id: 3 }],
            routes: vec![Route {
                id: 1,
                route_group_id: 1,
                number: Some(1),
                name: Some("Yellow slab".to_string()),
                disabled_at: None,
            }],
            participants: vec![Participant {
                id: 10,
                first_name: "Ai".to_string(),
                last_name: "Mori".to_string(),
                category_id: 2,
                genre: Genre::Female,
            }],
            ascents: vec![Ascent {
                id: 1,
                participant_id: 10,
                route_id: 1,
                realised: true,
                top_attempt: Some(2),
                zone_1_attempt: Some(1),
            }],
        }
    }

    #[test]
    fn test_save_snapshot_roundtrip() {
        let temp_path = env::temp_dir().join("contest_rank_test_snapshot.json");
        let _ = std::fs::remove_file(&temp_path);

        let data = sample_data(false);
        let calc =
            RankingCalculator::new(&data, &data.steps[0], &data.categories[0], Genre::Female);
        let standings = build_leaderboard(&calc, &data.participants);
        let snapshot = RankingSnapshot::new(&calc, &standings);

        save_snapshot(&temp_path, &snapshot).unwrap();

        let content = std::fs::read_to_string(&temp_path).unwrap();
        let json: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["step_id"], 3);
        assert_eq!(json["category"], "U18");
        assert_eq!(json["genre"], "female");
        assert_eq!(json["ranking_type"], "zone_and_top_realised");
        assert_eq!(json["standings"][0]["rank"], 1);
        assert_eq!(json["standings"][0]["participant"]["id"], 10);
        assert_eq!(json["standings"][0]["score"]["details"], serde_json::json!([1, 1]));
        assert!(json["generated_at"].is_string());

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_snapshot_omits_genre_for_unisex() {
        let data = sample_data(true);
        let calc = RankingCalculator::new(&data, &data.steps[0], &data.categories[0], Genre::Male);
        let standings = build_leaderboard(&calc, &data.participants);
        let snapshot = RankingSnapshot::new(&calc, &standings);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("genre").is_none());
        assert_eq!(json["standings"].as_array().unwrap().len(), 1);
    }
}
