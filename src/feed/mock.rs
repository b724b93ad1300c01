//! Synthetic flights used when the real feed is unavailable.
//!
//! Routes are fixed; each call places every aircraft at a random point of
//! its route so repeated snapshots look like movement.

use rand::Rng;

use super::geo::heading;
use super::types::{GeoPoint, LiveEntity};

struct MockRoute {
    flight: &'static str,
    airline: &'static str,
    from: (&'static str, GeoPoint),
    to: (&'static str, GeoPoint),
}

const NEW_YORK: (&str, GeoPoint) = ("New York", GeoPoint::new(-74.0060, 40.7128));
const LONDON: (&str, GeoPoint) = ("London", GeoPoint::new(-0.1278, 51.5074));
const PARIS: (&str, GeoPoint) = ("Paris", GeoPoint::new(2.3522, 48.8566));
const LOS_ANGELES: (&str, GeoPoint) = ("Los Angeles", GeoPoint::new(-118.2437, 34.0522));
const TOKYO: (&str, GeoPoint) = ("Tokyo", GeoPoint::new(139.6917, 35.6895));
const BUENOS_AIRES: (&str, GeoPoint) = ("Buenos Aires", GeoPoint::new(-58.3816, -34.6037));

const ROUTES: &[MockRoute] = &[
    // Transatlantic
    MockRoute { flight: "BA117", airline: "British Airways", from: NEW_YORK, to: LONDON },
    MockRoute { flight: "AA100", airline: "American Airlines", from: LONDON, to: NEW_YORK },
    MockRoute { flight: "AF006", airline: "Air France", from: PARIS, to: NEW_YORK },
    // Transpacific
    MockRoute { flight: "JL061", airline: "Japan Airlines", from: LOS_ANGELES, to: TOKYO },
    MockRoute {
        flight: "NH178",
        airline: "ANA",
        from: TOKYO,
        to: ("Seattle", GeoPoint::new(-122.3321, 47.6062)),
    },
    MockRoute {
        flight: "QF11",
        airline: "Qantas",
        from: ("Sydney", GeoPoint::new(151.2093, -33.8688)),
        to: LOS_ANGELES,
    },
    // Asia
    MockRoute {
        flight: "SQ12",
        airline: "Singapore Airlines",
        from: ("Singapore", GeoPoint::new(103.8198, 1.3521)),
        to: TOKYO,
    },
    MockRoute {
        flight: "MU501",
        airline: "China Eastern",
        from: ("Shanghai", GeoPoint::new(121.4737, 31.2304)),
        to: ("Hong Kong", GeoPoint::new(114.1095, 22.3964)),
    },
    MockRoute {
        flight: "EK512",
        airline: "Emirates",
        from: ("Delhi", GeoPoint::new(77.1025, 28.7041)),
        to: ("Dubai", GeoPoint::new(55.2708, 25.2048)),
    },
    // Europe
    MockRoute {
        flight: "IB3253",
        airline: "Iberia",
        from: ("Madrid", GeoPoint::new(-3.7038, 40.4168)),
        to: ("Rome", GeoPoint::new(12.4964, 41.9028)),
    },
    MockRoute {
        flight: "LH1444",
        airline: "Lufthansa",
        from: ("Berlin", GeoPoint::new(13.4050, 52.5200)),
        to: ("Moscow", GeoPoint::new(37.6173, 55.7558)),
    },
    // Americas
    MockRoute {
        flight: "UA1234",
        airline: "United",
        from: NEW_YORK,
        to: ("Chicago", GeoPoint::new(-87.6298, 41.8781)),
    },
    MockRoute {
        flight: "WN1234",
        airline: "Southwest",
        from: LOS_ANGELES,
        to: ("Kansas City", GeoPoint::new(-95.7129, 37.0902)),
    },
    MockRoute {
        flight: "AM021",
        airline: "Aeromexico",
        from: ("Mexico City", GeoPoint::new(-99.1332, 19.4326)),
        to: BUENOS_AIRES,
    },
    MockRoute {
        flight: "LA3001",
        airline: "LATAM",
        from: ("São Paulo", GeoPoint::new(-46.6333, -23.5505)),
        to: ("Rio de Janeiro", GeoPoint::new(-43.1729, -22.9068)),
    },
    MockRoute {
        flight: "LA2401",
        airline: "LATAM",
        from: BUENOS_AIRES,
        to: ("Lima", GeoPoint::new(-77.0428, -12.0464)),
    },
];

/// Number of aircraft in every synthetic snapshot.
pub fn route_count() -> usize {
    ROUTES.len()
}

/// Builds one synthetic snapshot, one aircraft per fixed route.
pub fn synthetic_snapshot<R: Rng>(rng: &mut R) -> Vec<LiveEntity> {
    ROUTES
        .iter()
        .map(|route| {
            let (origin, from) = route.from;
            let (destination, to) = route.to;
            let progress: f64 = rng.gen();
            let position = from.lerp(to, progress);

            LiveEntity {
                id: format!("mock-{}", route.flight),
                label: route.flight.to_string(),
                airline: route.airline.to_string(),
                position,
                altitude: rng.gen_range(30_000.0..40_000.0),
                speed: rng.gen_range(400.0..550.0),
                heading: heading(from, to),
                origin_key: origin.to_string(),
                destination_key: destination.to_string(),
                route_path: vec![from, position, to],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_snapshot_shape_is_fixed() {
        let mut rng = StdRng::seed_from_u64(7);
        let snapshot = synthetic_snapshot(&mut rng);

        assert_eq!(snapshot.len(), route_count());
        assert_eq!(snapshot[0].label, "BA117");
        assert_eq!(snapshot[0].origin_key, "New York");
        assert_eq!(snapshot[0].destination_key, "London");
    }

    #[test]
    fn test_positions_lie_on_route() {
        let mut rng = StdRng::seed_from_u64(42);
        for entity in synthetic_snapshot(&mut rng) {
            let [from, position, to] = entity.route_path[..] else {
                panic!("route path must have three points");
            };
            assert_eq!(position, entity.position);

            let (lo_lon, hi_lon) = (from.lon.min(to.lon), from.lon.max(to.lon));
            let (lo_lat, hi_lat) = (from.lat.min(to.lat), from.lat.max(to.lat));
            assert!(position.lon >= lo_lon && position.lon <= hi_lon);
            assert!(position.lat >= lo_lat && position.lat <= hi_lat);

            assert!((30_000.0..40_000.0).contains(&entity.altitude));
            assert!((400.0..550.0).contains(&entity.speed));
            assert!((0.0..360.0).contains(&entity.heading));
        }
    }

    #[test]
    fn test_ids_stable_positions_vary() {
        let mut rng = StdRng::seed_from_u64(1);
        let first = synthetic_snapshot(&mut rng);
        let second = synthetic_snapshot(&mut rng);

        let ids = |s: &[LiveEntity]| s.iter().map(|e| e.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        assert_ne!(first[0].position, second[0].position);
    }
}
