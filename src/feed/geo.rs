//! Geographic helpers: great-circle bearing and airport lookup.

use super::types::GeoPoint;

// == Heading ==
/// Initial great-circle bearing from `from` to `to`, in degrees in [0, 360).
///
/// 0 is north, 90 east. Identical points yield 0.
pub fn heading(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let degrees = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round a tiny negative up to exactly 360
    if degrees >= 360.0 {
        0.0
    } else {
        degrees
    }
}

// == Airports ==
const AIRPORTS: &[(&str, GeoPoint)] = &[
    ("JFK", GeoPoint::new(-73.7781, 40.6413)),
    ("LAX", GeoPoint::new(-118.4085, 33.9416)),
    ("LHR", GeoPoint::new(-0.4543, 51.4700)),
    ("CDG", GeoPoint::new(2.5479, 49.0097)),
    ("NRT", GeoPoint::new(140.3929, 35.7720)),
    ("DXB", GeoPoint::new(55.3644, 25.2532)),
    ("SIN", GeoPoint::new(103.9915, 1.3644)),
    ("HKG", GeoPoint::new(113.9145, 22.3080)),
    ("FRA", GeoPoint::new(8.5706, 50.0379)),
    ("AMS", GeoPoint::new(4.7639, 52.3105)),
    ("ORD", GeoPoint::new(-87.9048, 41.9742)),
    ("DFW", GeoPoint::new(-97.0403, 32.8998)),
    ("ATL", GeoPoint::new(-84.4279, 33.6407)),
    ("SFO", GeoPoint::new(-122.3750, 37.6213)),
    ("SEA", GeoPoint::new(-122.3088, 47.4502)),
    ("MIA", GeoPoint::new(-80.2906, 25.7959)),
    ("BOS", GeoPoint::new(-71.0096, 42.3656)),
    ("IAD", GeoPoint::new(-77.4565, 38.9531)),
    ("EWR", GeoPoint::new(-74.1745, 40.6895)),
    ("LGA", GeoPoint::new(-73.8740, 40.7769)),
    ("SYD", GeoPoint::new(151.1772, -33.9461)),
    ("MEL", GeoPoint::new(144.8432, -37.6690)),
    ("PEK", GeoPoint::new(116.5974, 40.0799)),
    ("PVG", GeoPoint::new(121.8058, 31.1443)),
    ("ICN", GeoPoint::new(126.4506, 37.4602)),
    ("BKK", GeoPoint::new(100.7501, 13.6900)),
    ("DEL", GeoPoint::new(77.1025, 28.5665)),
    ("BOM", GeoPoint::new(72.8679, 19.0896)),
];

/// Coordinates of a known airport by IATA code (case-insensitive).
pub fn airport_coordinates(iata: &str) -> Option<GeoPoint> {
    AIRPORTS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(iata))
        .map(|(_, point)| *point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_heading_due_north_is_zero() {
        let h = heading(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 10.0));
        assert!(h.abs() < TOLERANCE, "got {h}");
    }

    #[test]
    fn test_heading_due_east_on_equator() {
        let h = heading(GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 0.0));
        assert!(h > 0.0 && h < 180.0);
        assert!((h - 90.0).abs() < TOLERANCE, "got {h}");
    }

    #[test]
    fn test_heading_south_and_west() {
        let south = heading(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, -10.0));
        assert!((south - 180.0).abs() < TOLERANCE, "got {south}");

        let west = heading(GeoPoint::new(0.0, 0.0), GeoPoint::new(-10.0, 0.0));
        assert!((west - 270.0).abs() < TOLERANCE, "got {west}");
    }

    #[test]
    fn test_heading_follows_great_circle_not_plane() {
        // New York to London leaves north-east (~51°), not the planar ~8°
        let h = heading(
            GeoPoint::new(-74.0060, 40.7128),
            GeoPoint::new(-0.1278, 51.5074),
        );
        assert!((h - 51.2).abs() < 1.0, "got {h}");
    }

    #[test]
    fn test_airport_lookup() {
        assert_eq!(
            airport_coordinates("cdg"),
            Some(GeoPoint::new(2.5479, 49.0097))
        );
        assert!(airport_coordinates("XXX").is_none());
    }

    proptest! {
        #[test]
        fn prop_heading_in_range(
            lon1 in -180.0f64..180.0, lat1 in -89.0f64..89.0,
            lon2 in -180.0f64..180.0, lat2 in -89.0f64..89.0,
        ) {
            let h = heading(GeoPoint::new(lon1, lat1), GeoPoint::new(lon2, lat2));
            prop_assert!((0.0..360.0).contains(&h), "heading {} out of range", h);
        }
    }
}
