pub mod store;
pub mod types;
pub mod validation;

pub use store::{load_contest, AscentQuery, AscentSource, ContestData, Selection};
pub use types::*;
pub use validation::validate_contest;
