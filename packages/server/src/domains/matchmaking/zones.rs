//! Static geography for zone-based scoring.
//!
//! Buenos Aires neighborhood data: adjacency between zones, approximate
//! center coordinates per zone, and the set of zones with good public
//! transport connectivity. All lookups are case-insensitive.

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref ZONE_ADJACENCY: HashMap<&'static str, Vec<&'static str>> = {
        let mut map = HashMap::new();
        map.insert("centro", vec!["san telmo", "recoleta", "puerto madero"]);
        map.insert("puerto madero", vec!["centro", "san telmo", "la boca"]);
        map.insert("palermo", vec!["belgrano", "villa crespo", "recoleta"]);
        map.insert("belgrano", vec!["palermo", "zona norte"]);
        map.insert("recoleta", vec!["centro", "palermo"]);
        map.insert("san telmo", vec!["centro", "puerto madero", "la boca"]);
        map.insert("la boca", vec!["puerto madero", "san telmo", "zona sur"]);
        map.insert("villa crespo", vec!["palermo", "caballito"]);
        map.insert("caballito", vec!["villa crespo", "flores"]);
        map.insert("flores", vec!["caballito", "zona oeste"]);
        map.insert("zona norte", vec!["belgrano"]);
        map.insert("zona sur", vec!["la boca"]);
        map.insert("zona oeste", vec!["flores"]);
        map
    };
    static ref ZONE_COORDINATES: HashMap<&'static str, (f64, f64)> = {
        let mut map = HashMap::new();
        map.insert("centro", (-34.6083, -58.3712));
        map.insert("puerto madero", (-34.6118, -58.3631));
        map.insert("palermo", (-34.5795, -58.4198));
        map.insert("belgrano", (-34.5633, -58.4533));
        map.insert("recoleta", (-34.5889, -58.3958));
        map.insert("san telmo", (-34.6214, -58.3731));
        map.insert("la boca", (-34.6345, -58.3617));
        map.insert("villa crespo", (-34.6014, -58.4370));
        map.insert("caballito", (-34.6186, -58.4462));
        map.insert("flores", (-34.6281, -58.4685));
        map.insert("zona norte", (-34.4708, -58.5128));
        map.insert("zona sur", (-34.7206, -58.2543));
        map.insert("zona oeste", (-34.7700, -58.6250));
        map
    };
}

/// Zones with good public transport connectivity.
const WELL_CONNECTED: [&str; 5] = ["centro", "puerto madero", "palermo", "belgrano", "recoleta"];

/// Fallback zone assumed for players without location data.
pub const DEFAULT_ZONE: &str = "centro";

pub fn is_known(zone: &str) -> bool {
    ZONE_COORDINATES.contains_key(zone.to_lowercase().as_str())
}

pub fn are_adjacent(a: &str, b: &str) -> bool {
    ZONE_ADJACENCY
        .get(a.to_lowercase().as_str())
        .map(|neighbors| neighbors.contains(&b.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn coordinates_of(zone: &str) -> Option<(f64, f64)> {
    ZONE_COORDINATES.get(zone.to_lowercase().as_str()).copied()
}

pub fn is_well_connected(zone: &str) -> bool {
    WELL_CONNECTED.contains(&zone.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_is_case_insensitive() {
        assert!(are_adjacent("Centro", "San Telmo"));
        assert!(are_adjacent("PALERMO", "belgrano"));
        assert!(!are_adjacent("centro", "flores"));
    }

    #[test]
    fn every_adjacent_zone_has_coordinates() {
        for (zone, neighbors) in ZONE_ADJACENCY.iter() {
            assert!(coordinates_of(zone).is_some(), "missing coords for {zone}");
            for neighbor in neighbors {
                assert!(
                    coordinates_of(neighbor).is_some(),
                    "missing coords for {neighbor}"
                );
            }
        }
    }

    #[test]
    fn well_connected_zones_are_known() {
        for zone in WELL_CONNECTED {
            assert!(is_known(zone));
            assert!(is_well_connected(zone));
        }
        assert!(!is_well_connected("flores"));
    }
}
