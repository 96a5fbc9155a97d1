//! History-based matchmaking.
//!
//! Ranks the match's sport among the sports the candidate has played
//! (organized or participated) and maps the rank to a score. Candidates who
//! never played the sport get a neutral floor - history ranks, it never
//! blocks.

use crate::domains::matches::models::Match;
use crate::domains::players::models::Player;

use super::{passes_basic_checks, MatchmakingStrategy, ScoringContext};

/// Score for the candidate's 8th-or-beyond sport, or one never played.
const FLOOR_SCORE: f64 = 0.5;

pub struct ByHistory;

impl ByHistory {
    pub fn new() -> Self {
        Self
    }

    fn rank_score(rank: usize) -> f64 {
        match rank {
            0 => 1.0,
            1 => 0.85,
            2 => 0.75,
            3 => 0.70,
            4 => 0.65,
            5 => 0.60,
            6 => 0.55,
            _ => FLOOR_SCORE,
        }
    }
}

impl Default for ByHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchmakingStrategy for ByHistory {
    fn name(&self) -> &'static str {
        "BY_HISTORY"
    }

    fn is_eligible(&self, player: &Player, m: &Match, _ctx: &ScoringContext<'_>) -> bool {
        passes_basic_checks(player, m)
    }

    fn score(&self, player: &Player, m: &Match, ctx: &ScoringContext<'_>) -> f64 {
        if !self.is_eligible(player, m, ctx) {
            return 0.0;
        }

        match ctx.history.rank_of(m.sport.id) {
            Some(rank) => Self::rank_score(rank),
            None => FLOOR_SCORE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SportId;
    use crate::domains::matchmaking::fixtures::{open_match, player};
    use crate::domains::matchmaking::PlayerHistory;
    use crate::domains::players::models::SkillLevel;

    #[test]
    fn second_most_played_sport_scores_0_85() {
        let organizer = player(SkillLevel::Intermediate);
        let candidate = player(SkillLevel::Intermediate);
        let mut m = open_match(&organizer, 4);

        let football = SportId::new();
        m.sport.id = SportId::new(); // basketball
        m.sport.name = "Basketball".to_string();

        let mut history = PlayerHistory::default();
        for _ in 0..5 {
            history.record(football);
        }
        history.record(m.sport.id);

        let ctx = ScoringContext {
            organizer: &organizer,
            participants: &[],
            history: &history,
        };
        let score = ByHistory::new().score(&candidate, &m, &ctx);
        assert!((score - 0.85).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn most_played_sport_scores_full() {
        let organizer = player(SkillLevel::Intermediate);
        let candidate = player(SkillLevel::Intermediate);
        let m = open_match(&organizer, 4);

        let mut history = PlayerHistory::default();
        history.record(m.sport.id);
        history.record(m.sport.id);

        let ctx = ScoringContext {
            organizer: &organizer,
            participants: &[],
            history: &history,
        };
        assert_eq!(ByHistory::new().score(&candidate, &m, &ctx), 1.0);
    }

    #[test]
    fn never_played_sport_gets_the_neutral_floor() {
        let organizer = player(SkillLevel::Intermediate);
        let candidate = player(SkillLevel::Intermediate);
        let m = open_match(&organizer, 4);

        let mut history = PlayerHistory::default();
        for _ in 0..10 {
            history.record(SportId::new());
        }

        let ctx = ScoringContext {
            organizer: &organizer,
            participants: &[],
            history: &history,
        };
        assert_eq!(ByHistory::new().score(&candidate, &m, &ctx), FLOOR_SCORE);
    }

    #[test]
    fn deep_ranking_walks_down_the_ladder() {
        let organizer = player(SkillLevel::Intermediate);
        let candidate = player(SkillLevel::Intermediate);
        let mut m = open_match(&organizer, 4);

        let mut history = PlayerHistory::default();
        // Seven sports with descending play counts, then the match's sport
        // with a single play: rank 8 -> floor.
        for plays in (2..9).rev() {
            let sport = SportId::new();
            for _ in 0..plays {
                history.record(sport);
            }
        }
        m.sport.id = SportId::new();
        history.record(m.sport.id);

        let ctx = ScoringContext {
            organizer: &organizer,
            participants: &[],
            history: &history,
        };
        assert_eq!(ByHistory::new().score(&candidate, &m, &ctx), FLOOR_SCORE);
    }

    #[test]
    fn score_is_zero_for_an_existing_participant() {
        let organizer = player(SkillLevel::Intermediate);
        let candidate = player(SkillLevel::Intermediate);
        let mut m = open_match(&organizer, 4);
        m.participants.push(candidate.id);

        let mut history = PlayerHistory::default();
        history.record(m.sport.id);

        let ctx = ScoringContext {
            organizer: &organizer,
            participants: &[],
            history: &history,
        };
        let strategy = ByHistory::new();
        assert!(!strategy.is_eligible(&candidate, &m, &ctx));
        assert_eq!(strategy.score(&candidate, &m, &ctx), 0.0);
    }
}
