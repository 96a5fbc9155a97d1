//! Geographic matchmaking.
//!
//! Scores the better of a zone-based and a distance-based estimate, plus a
//! transport-connectivity bonus. Geography only ranks candidates - it never
//! blocks a join.

use crate::common::utils::geo::haversine_km;
use crate::domains::matches::models::{Location, Match};
use crate::domains::players::models::Player;

use super::zones;
use super::{passes_basic_checks, MatchmakingStrategy, ScoringContext, StrategyParams};

/// Default distance beyond which the score floors out.
const DEFAULT_RADIUS_KM: f64 = 25.0;

/// Score when zone information is missing on the match side.
const UNKNOWN_ZONE_SCORE: f64 = 0.5;

/// Score when neither side has usable coordinates.
const UNKNOWN_DISTANCE_SCORE: f64 = 0.6;

pub struct ByProximity {
    radius_km: f64,
}

impl ByProximity {
    pub fn new(params: &StrategyParams) -> Self {
        Self {
            radius_km: params.radius_km.unwrap_or(DEFAULT_RADIUS_KM),
        }
    }

    fn zone_score(player_zone: &str, match_location: &Location) -> f64 {
        let match_zone = match &match_location.zone {
            Some(zone) => zone,
            None => return UNKNOWN_ZONE_SCORE,
        };

        if player_zone.eq_ignore_ascii_case(match_zone) {
            return 1.0;
        }
        if zones::are_adjacent(player_zone, match_zone) {
            return 0.8;
        }
        if zones::is_known(player_zone) && zones::is_known(match_zone) {
            return 0.4;
        }
        0.2
    }

    fn distance_score(&self, player_coords: Option<(f64, f64)>, match_coords: Option<(f64, f64)>) -> f64 {
        let ((lat1, lon1), (lat2, lon2)) = match (player_coords, match_coords) {
            (Some(a), Some(b)) => (a, b),
            _ => return UNKNOWN_DISTANCE_SCORE,
        };

        let distance = haversine_km(lat1, lon1, lat2, lon2);
        if distance > self.radius_km {
            return 0.1;
        }
        if distance <= 2.0 {
            1.0
        } else if distance <= 5.0 {
            0.9
        } else if distance <= 10.0 {
            0.7
        } else if distance <= 15.0 {
            0.5
        } else {
            0.3
        }
    }

    fn transport_bonus(player_zone: &str, match_location: &Location) -> f64 {
        let match_zone = match &match_location.zone {
            Some(zone) => zone,
            None => return 0.0,
        };

        let player_connected = zones::is_well_connected(player_zone);
        let match_connected = zones::is_well_connected(match_zone);

        if player_connected && match_connected {
            0.15
        } else if player_connected || match_connected {
            0.08
        } else {
            0.0
        }
    }
}

impl MatchmakingStrategy for ByProximity {
    fn name(&self) -> &'static str {
        "BY_PROXIMITY"
    }

    fn is_eligible(&self, player: &Player, m: &Match, _ctx: &ScoringContext<'_>) -> bool {
        passes_basic_checks(player, m)
    }

    fn score(&self, player: &Player, m: &Match, ctx: &ScoringContext<'_>) -> f64 {
        if !self.is_eligible(player, m, ctx) {
            return 0.0;
        }

        let player_zone = preferred_zone(player);
        let zone = Self::zone_score(&player_zone, &m.location);
        let distance = self.distance_score(player_coordinates(player), match_coordinates(m));
        let bonus = Self::transport_bonus(&player_zone, &m.location);

        (zone.max(distance) + bonus).min(1.0)
    }
}

/// The candidate's zone, falling back to the default when unset.
fn preferred_zone(player: &Player) -> String {
    player
        .location
        .as_ref()
        .and_then(|l| l.zone.clone())
        .unwrap_or_else(|| zones::DEFAULT_ZONE.to_string())
}

fn player_coordinates(player: &Player) -> Option<(f64, f64)> {
    if let Some(coords) = player.location.as_ref().and_then(|l| l.coordinates()) {
        return Some(coords);
    }
    zones::coordinates_of(&preferred_zone(player))
}

fn match_coordinates(m: &Match) -> Option<(f64, f64)> {
    if let Some(coords) = m.location.coordinates() {
        return Some(coords);
    }
    m.location.zone.as_deref().and_then(zones::coordinates_of)
}
