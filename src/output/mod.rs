pub mod export;
pub mod formatter;

pub use export::{save_snapshot, RankingSnapshot};
pub use formatter::{
    format_ascent_details, format_ascent_score, format_leaderboard, format_participant_details,
    format_participant_score, format_selection, format_tsv, format_value, should_use_colors,
};
