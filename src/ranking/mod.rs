pub mod aggregate;
pub mod engine;
pub mod leaderboard;
pub mod policy;

pub use aggregate::Aggregator;
pub use engine::RankingCalculator;
pub use leaderboard::{build_leaderboard, Standing};
pub use policy::*;
