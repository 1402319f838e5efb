use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::contest::{AscentId, Participant};
use crate::ranking::{
    AscentDetails, AscentScore, ParticipantDetails, ParticipantScore, RankingCalculator,
    ScoreValue, Standing,
};

const NOT_RANKED: &str = "NR";

/// Check if stdout is a TTY (for auto-detecting color support).
/// An explicit config setting wins over detection.
pub fn should_use_colors(configured: Option<bool>) -> bool {
    configured.unwrap_or_else(|| std::io::stdout().is_terminal())
}

/// Format a nullable score; `None` is "NR" (not ranked), never zero
pub fn format_value(value: Option<ScoreValue>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => NOT_RANKED.to_string(),
    }
}

/// Format participant details with their unit labels
/// "1500 pts", "3 top 4 zone", or "-" when unranked
pub fn format_participant_details(score: &ParticipantScore) -> String {
    let units = score.units.unwrap_or(&[]);
    match score.details {
        Some(ParticipantDetails::Points(points)) => {
            with_unit(points.to_string(), units.first().copied())
        }
        Some(ParticipantDetails::TopZoneCounts { tops, zones }) => format!(
            "{} {}",
            with_unit(tops.to_string(), units.first().copied()),
            with_unit(zones.to_string(), units.get(1).copied())
        ),
        None => "-".to_string(),
    }
}

fn with_unit(value: String, unit: Option<&str>) -> String {
    match unit {
        Some(u) => format!("{} {}", value, u),
        None => value,
    }
}

/// Format the details of a single ascent
pub fn format_ascent_details(details: &AscentDetails) -> String {
    match details {
        AscentDetails::NotRanked => NOT_RANKED.to_string(),
        AscentDetails::Points(points) => format!("{} pts", points),
        AscentDetails::TopZone { top, zone } => {
            let mut parts = Vec::new();
            if *top {
                parts.push("top");
            }
            if *zone {
                parts.push("zone");
            }
            if parts.is_empty() {
                "-".to_string()
            } else {
                parts.join(" + ")
            }
        }
    }
}

/// One-line description of the ranked selection
/// Format: "{step} | {category} ({genre}) | {ranking type}"
pub fn format_selection(calculator: &RankingCalculator, use_colors: bool) -> String {
    let category = if calculator.category().unisex {
        calculator.category().name.clone()
    } else {
        format!("{} ({})", calculator.category().name, calculator.genre())
    };

    if use_colors {
        format!(
            "{} | {} | {}",
            calculator.step().name.bold(),
            category.cyan(),
            calculator.ranking_type().as_str().dimmed()
        )
    } else {
        format!(
            "{} | {} | {}",
            calculator.step().name,
            category,
            calculator.ranking_type()
        )
    }
}

/// Format a single ascent score
pub fn format_ascent_score(ascent_id: AscentId, score: &AscentScore, use_colors: bool) -> String {
    let value = format_value(score.value);
    let details = format_ascent_details(&score.details);

    if use_colors {
        format!("Ascent #{}: {} ({})", ascent_id, value.bold(), details)
    } else {
        format!("Ascent #{}: {} ({})", ascent_id, value, details)
    }
}

/// Format a participant score (multi-line)
pub fn format_participant_score(
    participant: &Participant,
    score: &ParticipantScore,
    use_colors: bool,
) -> String {
    let value = format_value(score.value);
    let details = format_participant_details(score);

    if use_colors {
        format!(
            "{}\n  Score: {}\n  Details: {}",
            participant.full_name().bold(),
            value.bold(),
            details
        )
    } else {
        format!(
            "{}\n  Score: {}\n  Details: {}",
            participant.full_name(),
            value,
            details
        )
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format standings as a table with columns: Rank, Score, Name, Details
/// No headers. Rank column: 3 chars (fits "99."), "-" for unranked
/// Score column is right-aligned, 9 chars wide (fits "12345.678")
pub fn format_leaderboard(standings: &[Standing], use_colors: bool) -> String {
    if standings.is_empty() {
        return "No participants found.".to_string();
    }

    let term_width = get_terminal_width();

    let rank_width = 3;
    let score_width = 9;
    let separator = "  ";

    standings
        .iter()
        .map(|standing| {
            let rank_str = match standing.rank {
                Some(rank) => format!("{:>2}.", rank),
                None => format!("{:>3}", "-"),
            };
            let score_str = format_value(standing.score.value);
            let score_padded = format!("{:>width$}", score_str, width = score_width);
            let details = format_participant_details(&standing.score);

            let fixed_width =
                rank_width + 1 + score_width + separator.len() * 2 + details.chars().count();
            let full_name = standing.participant.full_name();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&full_name, width - fixed_width)
                }
                // Very narrow terminal
                Some(_) => truncate_name(&full_name, 20),
                None => full_name,
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    name,
                    separator,
                    details.cyan()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str, score_padded, separator, name, separator, details
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format standings as tab-separated values for scripting
/// Columns: rank, score, participant id, name, details (no headers, no colors)
/// Unranked participants have an empty rank and "NR" as score
pub fn format_tsv(standings: &[Standing]) -> String {
    if standings.is_empty() {
        return String::new();
    }

    standings
        .iter()
        .map(|standing| {
            let rank = standing.rank.map(|r| r.to_string()).unwrap_or_default();
            format!(
                "{}\t{}\t{}\t{}\t{}",
                rank,
                format_value(standing.score.value),
                standing.participant.id,
                standing.participant.full_name(),
                format_participant_details(&standing.score)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
