use cloudwaste_api::models::{Coordinates, RouteStop};

use crate::models::Bin;

/// Turns bins already ordered by urgency into route stops.
///
/// The order of `bins` is kept as-is; no distance or path planning is done,
/// so the fullest bin is always visited first.
pub fn plan_collection_route(bins: Vec<Bin>) -> Vec<RouteStop> {
    bins.into_iter()
        .map(|bin| RouteStop {
            bin_id: bin.id,
            bin_name: bin.name,
            location: bin.neighborhood,
            fill_level: bin.fill_level,
            coordinates: Coordinates {
                lat: bin.lat,
                lng: bin.lng,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(id: &str, fill_level: i32) -> Bin {
        Bin {
            id: id.to_string(),
            name: format!("Bin {id}"),
            neighborhood: "Nlongkak".to_string(),
            lat: 3.88,
            lng: 11.52,
            fill_level,
            temperature: None,
            battery: None,
            status: "critical".to_string(),
            last_update: None,
            last_collection: None,
        }
    }

    #[test]
    fn test_route_keeps_input_order() {
        let route = plan_collection_route(vec![bin("BIN-003", 95), bin("BIN-001", 82), bin("BIN-002", 61)]);

        let ids: Vec<&str> = route.iter().map(|stop| stop.bin_id.as_str()).collect();
        assert_eq!(ids, vec!["BIN-003", "BIN-001", "BIN-002"]);
        assert_eq!(route[0].location, "Nlongkak");
        assert_eq!(route[0].coordinates.lat, 3.88);
    }

    #[test]
    fn test_empty_route() {
        assert!(plan_collection_route(Vec::new()).is_empty());
    }
}
