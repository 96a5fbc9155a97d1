use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{PlayerId, SportId};
use crate::domains::matches::models::Location;

/// Skill tiers, ordered from least to most experienced.
///
/// The derived `Ord` gives Beginner < Intermediate < Advanced, which the
/// by-level strategy relies on for tier-distance checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Tier index used for "levels apart" arithmetic.
    pub fn tier(self) -> i32 {
        match self {
            SkillLevel::Beginner => 0,
            SkillLevel::Intermediate => 1,
            SkillLevel::Advanced => 2,
        }
    }

    /// Absolute distance in tiers between two levels.
    pub fn tiers_apart(self, other: SkillLevel) -> i32 {
        (self.tier() - other.tier()).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Admin,
}

/// Player profile - owned by the external profile service.
///
/// The core only ever reads these; mutation happens elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Delivery address for the text-message channel.
    pub email: String,
    pub skill: SkillLevel,
    pub favorite_sport: Option<SportId>,
    pub location: Option<Location>,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Player {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
