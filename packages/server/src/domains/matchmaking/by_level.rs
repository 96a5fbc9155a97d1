//! Skill-tier matchmaking.
//!
//! Intermediate players are the glue tier: they fit everywhere. Beginners
//! score best alongside peers, advanced players alongside other advanced
//! players, and the organizer's own tier earns a small affinity bonus.

use crate::domains::matches::models::Match;
use crate::domains::players::models::{Player, SkillLevel};

use super::{passes_basic_checks, MatchmakingStrategy, ScoringContext, StrategyParams};

/// Widest tier gap tolerated between the candidate and any current
/// participant.
const MAX_TIER_GAP: i32 = 2;

const WEIGHT_BASE: f64 = 0.4;
const WEIGHT_GROUP: f64 = 0.5;
const WEIGHT_ORGANIZER: f64 = 0.1;

pub struct ByLevel {
    level_min: SkillLevel,
    level_max: SkillLevel,
}

impl ByLevel {
    pub fn new(params: &StrategyParams) -> Self {
        Self {
            level_min: params.level_min.unwrap_or(SkillLevel::Beginner),
            level_max: params.level_max.unwrap_or(SkillLevel::Advanced),
        }
    }

    fn in_configured_range(&self, skill: SkillLevel) -> bool {
        skill >= self.level_min && skill <= self.level_max
    }

    fn base_score(skill: SkillLevel) -> f64 {
        match skill {
            SkillLevel::Beginner => 0.6,
            SkillLevel::Intermediate => 1.0,
            SkillLevel::Advanced => 0.8,
        }
    }

    /// Balance against the tiers already on the roster. The distribution
    /// rules apply uniformly - an empty roster is just a roster with zero of
    /// everything.
    fn group_score(skill: SkillLevel, participants: &[Player]) -> f64 {
        let beginners = count_tier(participants, SkillLevel::Beginner);
        let intermediates = count_tier(participants, SkillLevel::Intermediate);
        let advanced = count_tier(participants, SkillLevel::Advanced);

        match skill {
            SkillLevel::Beginner => {
                if beginners > 0 || intermediates > 0 {
                    0.9
                } else if advanced > 2 {
                    0.3
                } else {
                    0.6
                }
            }
            SkillLevel::Intermediate => 0.95,
            SkillLevel::Advanced => {
                if advanced > 0 {
                    1.0
                } else if intermediates > beginners {
                    0.8
                } else if beginners > 2 {
                    0.4
                } else {
                    0.7
                }
            }
        }
    }

    fn organizer_bonus(skill: SkillLevel, organizer: &Player) -> f64 {
        match skill.tiers_apart(organizer.skill) {
            0 => 0.2,
            1 => 0.1,
            _ => 0.0,
        }
    }
}

impl MatchmakingStrategy for ByLevel {
    fn name(&self) -> &'static str {
        "BY_LEVEL"
    }

    fn is_eligible(&self, player: &Player, m: &Match, ctx: &ScoringContext<'_>) -> bool {
        if !passes_basic_checks(player, m) {
            return false;
        }
        if !self.in_configured_range(player.skill) {
            return false;
        }
        ctx.participants
            .iter()
            .all(|p| player.skill.tiers_apart(p.skill) <= MAX_TIER_GAP)
    }

    fn score(&self, player: &Player, m: &Match, ctx: &ScoringContext<'_>) -> f64 {
        if !self.is_eligible(player, m, ctx) {
            return 0.0;
        }

        let base = Self::base_score(player.skill);
        let group = Self::group_score(player.skill, ctx.participants);
        let bonus = Self::organizer_bonus(player.skill, ctx.organizer);

        let combined = base * WEIGHT_BASE + group * WEIGHT_GROUP + bonus * WEIGHT_ORGANIZER;
        combined.min(1.0)
    }
}

fn count_tier(participants: &[Player], tier: SkillLevel) -> usize {
    participants.iter().filter(|p| p.skill == tier).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::matchmaking::fixtures::{open_match, player};
    use crate::domains::matchmaking::PlayerHistory;

    fn ctx<'a>(
        organizer: &'a Player,
        participants: &'a [Player],
        history: &'a PlayerHistory,
    ) -> ScoringContext<'a> {
        ScoringContext {
            organizer,
            participants,
            history,
        }
    }

    #[test]
    fn beginner_joining_advanced_organizer_scores_0_54() {
        let organizer = player(SkillLevel::Advanced);
        let candidate = player(SkillLevel::Beginner);
        let m = open_match(&organizer, 4);
        let history = PlayerHistory::default();
        let strategy = ByLevel::new(&StrategyParams::default());

        let ctx = ctx(&organizer, &[], &history);
        assert!(strategy.is_eligible(&candidate, &m, &ctx));

        // base 0.6, group 0.6 (no peers), organizer bonus 0 (2 tiers apart)
        let score = strategy.score(&candidate, &m, &ctx);
        assert!((score - 0.54).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn intermediate_is_the_glue_tier() {
        let organizer = player(SkillLevel::Intermediate);
        let candidate = player(SkillLevel::Intermediate);
        let m = open_match(&organizer, 4);
        let history = PlayerHistory::default();
        let strategy = ByLevel::new(&StrategyParams::default());

        let ctx = ctx(&organizer, &[], &history);
        // base 1.0, group 0.95, bonus 0.2 -> 0.4 + 0.475 + 0.02
        let score = strategy.score(&candidate, &m, &ctx);
        assert!((score - 0.895).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn beginner_is_penalized_by_a_wall_of_advanced_players() {
        let organizer = player(SkillLevel::Advanced);
        let candidate = player(SkillLevel::Beginner);
        let mut m = open_match(&organizer, 6);
        let roster: Vec<Player> = (0..3).map(|_| player(SkillLevel::Advanced)).collect();
        for p in &roster {
            m.participants.push(p.id);
        }
        let history = PlayerHistory::default();
        let strategy = ByLevel::new(&StrategyParams::default());

        let ctx = ctx(&organizer, &roster, &history);
        let score = strategy.score(&candidate, &m, &ctx);
        // base 0.6, group 0.3, bonus 0 -> 0.39
        assert!((score - 0.39).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn advanced_player_rewarded_by_advanced_peer() {
        let organizer = player(SkillLevel::Intermediate);
        let candidate = player(SkillLevel::Advanced);
        let mut m = open_match(&organizer, 6);
        let roster = vec![player(SkillLevel::Advanced)];
        m.participants.push(roster[0].id);
        let history = PlayerHistory::default();
        let strategy = ByLevel::new(&StrategyParams::default());

        let ctx = ctx(&organizer, &roster, &history);
        // base 0.8, group 1.0, bonus 0.1 -> 0.32 + 0.5 + 0.01
        let score = strategy.score(&candidate, &m, &ctx);
        assert!((score - 0.83).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn configured_range_excludes_tiers_outside_it() {
        let organizer = player(SkillLevel::Advanced);
        let candidate = player(SkillLevel::Beginner);
        let m = open_match(&organizer, 4);
        let history = PlayerHistory::default();
        let strategy = ByLevel::new(&StrategyParams {
            level_min: Some(SkillLevel::Intermediate),
            level_max: Some(SkillLevel::Advanced),
            radius_km: None,
        });

        let ctx = ctx(&organizer, &[], &history);
        assert!(!strategy.is_eligible(&candidate, &m, &ctx));
        assert_eq!(strategy.score(&candidate, &m, &ctx), 0.0);
    }

    #[test]
    fn score_is_zero_whenever_ineligible() {
        let organizer = player(SkillLevel::Intermediate);
        let candidate = player(SkillLevel::Intermediate);
        let mut m = open_match(&organizer, 1);
        let roster = vec![player(SkillLevel::Intermediate)];
        m.participants.push(roster[0].id);
        let history = PlayerHistory::default();
        let strategy = ByLevel::new(&StrategyParams::default());

        // Match full -> ineligible -> hard zero despite a high formula score.
        let ctx = ctx(&organizer, &roster, &history);
        assert!(!strategy.is_eligible(&candidate, &m, &ctx));
        assert_eq!(strategy.score(&candidate, &m, &ctx), 0.0);
    }
}
