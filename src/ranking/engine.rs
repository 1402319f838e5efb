use super::aggregate::Aggregator;
use super::policy::{
    AscentDetails, AscentScore, ParticipantDetails, ParticipantScore, RankingType, ScoreValue,
};
use crate::contest::{
    Ascent, AscentId, AscentQuery, AscentSource, Category, Genre, ParticipantId, Step,
};

/// Points shared between everyone who realised a route in division rankings
const DIVISION_POINTS: i64 = 1000;
/// Points for topping on the first attempt in attempts-to-top rankings
const FLASH_POINTS: i64 = 10;
const TOP_VALUE: f64 = 1.001;
const ZONE_VALUE: f64 = 0.001;

/// Scores ascents of one (step, category, genre) selection.
///
/// The ascent scope is materialised once in [`RankingCalculator::new`] and
/// never changes afterwards.
#[derive(Debug, Clone)]
pub struct RankingCalculator {
    step: Step,
    category: Category,
    genre: Genre,
    ascents: Vec<Ascent>,
}

impl RankingCalculator {
    pub fn new<S>(source: &S, step: &Step, category: &Category, genre: Genre) -> Self
    where
        S: AscentSource + ?Sized,
    {
        let query = scope_query(step, category, genre);
        let ascents = source.find_ascents(&query);

        tracing::debug!(
            step = step.id,
            category = category.id,
            genre = %genre,
            ranking_type = %step.ranking_type,
            ascents = ascents.len(),
            "materialised ranking scope"
        );

        Self {
            step: step.clone(),
            category: category.clone(),
            genre,
            ascents,
        }
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn ranking_type(&self) -> RankingType {
        self.step.ranking_type
    }

    /// Ascents in scope, in source order
    pub fn ascents(&self) -> &[Ascent] {
        &self.ascents
    }

    /// Score of a single ascent. Ascents outside the scope are not ranked.
    pub fn scores(&self, ascent_id: AscentId) -> AscentScore {
        let Some(current) = self.ascents.iter().find(|a| a.id == ascent_id) else {
            return AscentScore::not_ranked();
        };

        match self.step.ranking_type {
            RankingType::Division => {
                // Never zero: the current ascent is on this route
                let shared_by = self
                    .ascents
                    .iter()
                    .filter(|a| a.route_id == current.route_id)
                    .count() as i64;
                AscentScore::points(ScoreValue::Int(DIVISION_POINTS / shared_by))
            }
            RankingType::AttemptsToTop => match current.top_attempt {
                // Not clamped: more than 11 attempts scores below zero
                Some(attempts) => AscentScore::points(ScoreValue::Int(
                    FLASH_POINTS - (i64::from(attempts) - 1),
                )),
                None => AscentScore::not_ranked(),
            },
            RankingType::ZoneAndTopRealised => {
                let top = current.is_topped();
                let zone = current.is_zoned();
                let value = if top {
                    ScoreValue::Float(TOP_VALUE)
                } else if zone {
                    ScoreValue::Float(ZONE_VALUE)
                } else {
                    ScoreValue::Int(0)
                };
                AscentScore {
                    value: Some(value),
                    details: AscentDetails::TopZone { top, zone },
                }
            }
            // Declared for steps but intentionally not scored yet
            RankingType::AttemptsToOneZoneAndTop
            | RankingType::AttemptsToTwoZonesAndTop
            | RankingType::HighestHold => AscentScore::not_ranked(),
        }
    }

    /// Sum of a participant's ranked ascents, with per-policy details.
    ///
    /// A participant without any ranked ascent gets no value and no details.
    pub fn participant_scores(&self, participant_id: ParticipantId) -> ParticipantScore {
        let ranking_type = self.step.ranking_type;
        let aggregator = Aggregator::for_ranking(ranking_type);

        let mut value: Option<ScoreValue> = None;
        let mut details: Option<ParticipantDetails> = None;

        for ascent in self.ascents.iter().filter(|a| a.participant_id == participant_id) {
            let score = self.scores(ascent.id);
            let Some(points) = score.value else {
                continue;
            };

            if value.is_none() {
                details = aggregator.zero();
            }

            value = Some(value.unwrap_or(ScoreValue::ZERO) + points);
            if let Some(acc) = details.as_mut() {
                aggregator.combine(acc, &score);
            }
        }

        ParticipantScore {
            value,
            details,
            units: ranking_type.units(),
        }
    }
}

fn scope_query(step: &Step, category: &Category, genre: Genre) -> AscentQuery {
    AscentQuery {
        step_id: step.id,
        category_id: category.id,
        genre: (!category.unisex).then_some(genre),
        realised_only: step.ranking_type == RankingType::Division,
    }
}
