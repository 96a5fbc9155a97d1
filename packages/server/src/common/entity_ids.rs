//! Typed ID definitions for all domain entities.
//!
//! These aliases make it a compile error to pass a `PlayerId` where a
//! `MatchId` is expected, and vice versa.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Match entities (scheduled sessions).
pub struct Match;

/// Marker type for Player entities (profiles owned by the profile service).
pub struct Player;

/// Marker type for Sport entities (catalog references).
pub struct Sport;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Match entities.
pub type MatchId = Id<Match>;

/// Typed ID for Player entities.
pub type PlayerId = Id<Player>;

/// Typed ID for Sport entities.
pub type SportId = Id<Sport>;
