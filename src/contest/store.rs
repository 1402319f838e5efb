use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::types::{
    Ascent, Category, CategoryId, Genre, Participant, ParticipantId, Route, RouteGroup,
    RouteGroupId, RouteId, Step, StepId,
};

/// Filter describing which ascents a ranking works on.
#[derive(Debug, Clone, PartialEq)]
pub struct AscentQuery {
    pub step_id: StepId,
    pub category_id: CategoryId,
    /// `None` keeps every genre (unisex categories)
    pub genre: Option<Genre>,
    pub realised_only: bool,
}

/// Data-access seam used by the ranking engine to materialise its scope.
pub trait AscentSource {
    /// Return ascents matching `query`, in source order.
    ///
    /// Only ascents on enabled routes of route groups assigned to the step are
    /// returned; ascents whose participant, route or route group is unknown
    /// are dropped.
    fn find_ascents(&self, query: &AscentQuery) -> Vec<Ascent>;
}

/// A step/category/genre triple resolved against a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub step: &'a Step,
    pub category: &'a Category,
    /// Only meaningful when the category is not unisex
    pub genre: Genre,
}

/// In-memory contest dataset, as loaded from a JSON export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContestData {
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub route_groups: Vec<RouteGroup>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub ascents: Vec<Ascent>,
}

impl ContestData {
    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Resolve a selection, defaulting step and category when the dataset has
    /// exactly one of them.
    ///
    /// # Errors
    ///
    /// Returns an error if an id is unknown, a choice is ambiguous, or the
    /// category is split by genre and no genre is given.
    pub fn resolve_selection(
        &self,
        step: Option<StepId>,
        category: Option<CategoryId>,
        genre: Option<Genre>,
    ) -> Result<Selection<'_>> {
        let step = match step {
            Some(id) => match self.step(id) {
                Some(s) => s,
                None => bail!("Unknown step {}", id),
            },
            None => match self.steps.as_slice() {
                [only] => only,
                [] => bail!("Dataset has no steps"),
                _ => bail!("Dataset has {} steps; pick one with --step", self.steps.len()),
            },
        };

        let category = match category {
            Some(id) => match self.category(id) {
                Some(c) => c,
                None => bail!("Unknown category {}", id),
            },
            None => match self.categories.as_slice() {
                [only] => only,
                [] => bail!("Dataset has no categories"),
                _ => bail!(
                    "Dataset has {} categories; pick one with --category",
                    self.categories.len()
                ),
            },
        };

        let genre = match (genre, category.unisex) {
            (Some(g), _) => g,
            // Unused by unisex rankings
            (None, true) => Genre::Female,
            (None, false) => bail!(
                "Category '{}' is ranked by genre; pick one with --genre",
                category.name
            ),
        };

        Ok(Selection {
            step,
            category,
            genre,
        })
    }

    /// Participants competing in `category`, restricted to `genre` unless the
    /// category is unisex.
    pub fn participants_in(&self, category: &Category, genre: Genre) -> Vec<&Participant> {
        self.participants
            .iter()
            .filter(|p| p.category_id == category.id)
            .filter(|p| category.unisex || p.genre == genre)
            .collect()
    }
}

impl AscentSource for ContestData {
    fn find_ascents(&self, query: &AscentQuery) -> Vec<Ascent> {
        let participants: HashSet<ParticipantId> = self
            .participants
            .iter()
            .filter(|p| p.category_id == query.category_id)
            .filter(|p| query.genre.is_none_or(|g| p.genre == g))
            .map(|p| p.id)
            .collect();

        let step_groups: HashSet<RouteGroupId> = self
            .route_groups
            .iter()
            .filter(|g| g.step_id == query.step_id)
            .map(|g| g.id)
            .collect();

        let routes: HashSet<RouteId> = self
            .routes
            .iter()
            .filter(|r| !r.is_disabled())
            .filter(|r| step_groups.contains(&r.route_group_id))
            .map(|r| r.id)
            .collect();

        self.ascents
            .iter()
            .filter(|a| participants.contains(&a.participant_id))
            .filter(|a| routes.contains(&a.route_id))
            .filter(|a| !query.realised_only || a.realised)
            .cloned()
            .collect()
    }
}

/// Load a contest dataset from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a valid dataset.
pub fn load_contest(path: &Path) -> Result<ContestData> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open contest dataset at {}", path.display()))?;

    let data: ContestData = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse contest dataset in {}", path.display()))?;

    tracing::debug!(
        steps = data.steps.len(),
        participants = data.participants.len(),
        ascents = data.ascents.len(),
        "loaded contest dataset from {}",
        path.display()
    );

    Ok(data)
}
