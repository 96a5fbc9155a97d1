pub mod r#match;

pub use r#match::{Location, Match, MatchState, SportRef};
