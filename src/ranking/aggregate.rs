use super::policy::{AscentDetails, AscentScore, ParticipantDetails, RankingType, ScoreValue};

/// Folds ascent scores into participant details, one variant per ranking type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregator {
    Division,
    AttemptsToTop,
    ZoneAndTopRealised,
    /// Ranking types without a scoring policy; details stay unset
    Unscored,
}

impl Aggregator {
    pub fn for_ranking(ranking_type: RankingType) -> Self {
        match ranking_type {
            RankingType::Division => Aggregator::Division,
            RankingType::AttemptsToTop => Aggregator::AttemptsToTop,
            RankingType::ZoneAndTopRealised => Aggregator::ZoneAndTopRealised,
            RankingType::AttemptsToOneZoneAndTop
            | RankingType::AttemptsToTwoZonesAndTop
            | RankingType::HighestHold => Aggregator::Unscored,
        }
    }

    /// Details before the first contributing ascent.
    pub fn zero(self) -> Option<ParticipantDetails> {
        match self {
            Aggregator::Division | Aggregator::AttemptsToTop => {
                Some(ParticipantDetails::Points(ScoreValue::ZERO))
            }
            Aggregator::ZoneAndTopRealised => {
                Some(ParticipantDetails::TopZoneCounts { tops: 0, zones: 0 })
            }
            Aggregator::Unscored => None,
        }
    }

    /// Add one ranked ascent to the running details.
    pub fn combine(self, acc: &mut ParticipantDetails, score: &AscentScore) {
        let Some(value) = score.value else {
            return;
        };

        match (self, acc) {
            (Aggregator::Division | Aggregator::AttemptsToTop, ParticipantDetails::Points(total)) => {
                *total = *total + value;
            }
            (Aggregator::ZoneAndTopRealised, ParticipantDetails::TopZoneCounts { tops, zones }) => {
                if let AscentDetails::TopZone { top, zone } = score.details {
                    if top {
                        *tops += 1;
                    }
                    if zone {
                        *zones += 1;
                    }
                }
            }
            _ => {}
        }
    }
}
