use serde::Serialize;
use std::cmp::Ordering;

use super::engine::RankingCalculator;
use super::policy::ParticipantScore;
use crate::contest::Participant;

/// Scores closer than this are treated as a tie
const TIE_EPSILON: f64 = 1e-9;

/// A participant's place in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    /// 1-based rank; `None` for participants without a ranked ascent
    pub rank: Option<usize>,
    pub participant: Participant,
    pub score: ParticipantScore,
}

/// Rank `participants` by their aggregate score.
///
/// Highest score first. Equal scores share a rank and the next rank is
/// skipped (1, 2, 2, 4). Unranked participants come last, without a rank.
/// Ties are listed by last name, then first name, then id.
pub fn build_leaderboard<'a, I>(calculator: &RankingCalculator, participants: I) -> Vec<Standing>
where
    I: IntoIterator<Item = &'a Participant>,
{
    let mut standings: Vec<Standing> = participants
        .into_iter()
        .map(|participant| Standing {
            rank: None,
            score: calculator.participant_scores(participant.id),
            participant: participant.clone(),
        })
        .collect();

    standings.sort_by(|a, b| {
        let value_cmp = match (a.score.value, b.score.value) {
            (Some(x), Some(y)) => compare_desc(x.as_f64(), y.as_f64()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if value_cmp != Ordering::Equal {
            return value_cmp;
        }
        a.participant
            .last_name
            .cmp(&b.participant.last_name)
            .then_with(|| a.participant.first_name.cmp(&b.participant.first_name))
            .then_with(|| a.participant.id.cmp(&b.participant.id))
    });

    let mut previous: Option<f64> = None;
    let mut current_rank = 0;
    for (idx, standing) in standings.iter_mut().enumerate() {
        let Some(value) = standing.score.value.map(|v| v.as_f64()) else {
            break;
        };
        if previous.is_none_or(|p| (p - value).abs() > TIE_EPSILON) {
            current_rank = idx + 1;
        }
        standing.rank = Some(current_rank);
        previous = Some(value);
    }

    tracing::debug!(
        participants = standings.len(),
        ranked = standings.iter().filter(|s| s.rank.is_some()).count(),
        "built leaderboard"
    );

    standings
}

fn compare_desc(a: f64, b: f64) -> Ordering {
    if (a - b).abs() <= TIE_EPSILON {
        Ordering::Equal
    } else {
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    }
}
