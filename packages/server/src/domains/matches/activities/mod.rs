pub mod configure_strategy;
pub mod create_match;
pub mod join;
pub mod scoring;
pub mod search;
pub mod sweeps;
pub mod transition;

pub use configure_strategy::configure_strategy;
pub use create_match::{create_match, CreateMatchRequest};
pub use join::{request_join, JoinAck};
pub use search::{
    compute_compatibility, list_candidate_matches, RankedCandidate, SearchFilters,
};
pub use transition::{request_transition, TransitionAck};
