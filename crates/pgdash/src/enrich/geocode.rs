//! Approximate coordinates for Hyderabad localities.

use crate::schema::{Coordinates, Derived, Listing};

use super::pipeline::EnrichmentStep;

/// Centre of Hyderabad, used when a location is not in the table.
pub const DEFAULT_COORDINATES: Coordinates = Coordinates::new(17.3850, 78.4867);

/// Known localities in title case, with approximate centre points.
const LOCALITIES: &[(&str, f64, f64)] = &[
    ("Ameerpet", 17.4375, 78.4483),
    ("Banjara Hills", 17.4138, 78.4398),
    ("Begumpet", 17.4447, 78.4664),
    ("Chanda Nagar", 17.4960, 78.3290),
    ("Dilsukhnagar", 17.3688, 78.5247),
    ("Erragadda", 17.4566, 78.4330),
    ("Financial District", 17.4150, 78.3430),
    ("Gachibowli", 17.4401, 78.3489),
    ("Hafeezpet", 17.4800, 78.3560),
    ("Hitech City", 17.4435, 78.3772),
    ("Jubilee Hills", 17.4325, 78.4071),
    ("Kokapet", 17.3950, 78.3340),
    ("Kondapur", 17.4600, 78.3640),
    ("Kphb", 17.4930, 78.3990),
    ("Kukatpally", 17.4849, 78.4138),
    ("Lb Nagar", 17.3457, 78.5522),
    ("Madhapur", 17.4483, 78.3915),
    ("Manikonda", 17.4050, 78.3860),
    ("Mehdipatnam", 17.3959, 78.4312),
    ("Miyapur", 17.4968, 78.3614),
    ("Nanakramguda", 17.4190, 78.3490),
    ("Narsingi", 17.3860, 78.3560),
    ("Secunderabad", 17.4399, 78.4983),
    ("Sr Nagar", 17.4416, 78.4432),
    ("Tolichowki", 17.3970, 78.4160),
    ("Uppal", 17.4058, 78.5591),
];

/// Exact lookup of a title-cased locality name.
pub fn lookup_locality(name: &str) -> Option<Coordinates> {
    LOCALITIES
        .iter()
        .find(|(known, _, _)| *known == name)
        .map(|&(_, lat, lon)| Coordinates::new(lat, lon))
}

/// Spread a point by up to `radius` degrees on each axis.
///
/// Listings in the same area share coordinates; map front-ends use this to
/// keep markers from stacking.
pub fn jitter(coordinates: Coordinates, radius: f64, rng: &mut fastrand::Rng) -> Coordinates {
    let offset = |rng: &mut fastrand::Rng| (rng.f64() * 2.0 - 1.0) * radius;
    Coordinates::new(coordinates.lat + offset(rng), coordinates.lon + offset(rng))
}

/// Resolves a listing's location to coordinates.
#[derive(Debug, Clone)]
pub struct Geocoder {
    default: Coordinates,
}

impl Geocoder {
    pub fn new() -> Self {
        Self::with_default(DEFAULT_COORDINATES)
    }

    /// Use `default` for unknown locations.
    pub fn with_default(default: Coordinates) -> Self {
        Self { default }
    }

    /// Full name first, then the first word, then the default.
    pub fn locate(&self, location: &str) -> Coordinates {
        let location = location.trim();
        lookup_locality(location)
            .or_else(|| {
                location
                    .split_whitespace()
                    .next()
                    .and_then(lookup_locality)
            })
            .unwrap_or(self.default)
    }
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrichmentStep for Geocoder {
    fn name(&self) -> &'static str {
        "geocode"
    }

    fn derive(&self, listing: &Listing, derived: &mut Derived) {
        derived.coordinates = self.locate(&listing.location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_match() {
        let geocoder = Geocoder::new();
        assert_eq!(
            geocoder.locate("Hitech City"),
            Coordinates::new(17.4435, 78.3772)
        );
    }

    #[test]
    fn test_first_token_fallback() {
        let geocoder = Geocoder::new();
        assert_eq!(
            geocoder.locate("Gachibowli Main Road"),
            lookup_locality("Gachibowli").unwrap()
        );
    }

    #[test]
    fn test_unknown_uses_default() {
        let geocoder = Geocoder::new();
        assert_eq!(geocoder.locate("Unknown"), DEFAULT_COORDINATES);
        assert_eq!(geocoder.locate("Near Some Temple"), DEFAULT_COORDINATES);
        assert_eq!(geocoder.locate(""), DEFAULT_COORDINATES);

        let custom = Geocoder::with_default(Coordinates::new(1.0, 2.0));
        assert_eq!(custom.locate("Atlantis"), Coordinates::new(1.0, 2.0));
    }

    #[test]
    fn test_lookup_is_case_sensitive_on_canonical_names() {
        assert!(lookup_locality("gachibowli").is_none());
        assert!(lookup_locality("Gachibowli").is_some());
    }

    #[test]
    fn test_jitter_stays_within_radius() {
        let mut rng = fastrand::Rng::with_seed(7);
        let origin = lookup_locality("Madhapur").unwrap();
        for _ in 0..100 {
            let moved = jitter(origin, 0.005, &mut rng);
            assert!((moved.lat - origin.lat).abs() <= 0.005);
            assert!((moved.lon - origin.lon).abs() <= 0.005);
        }
    }
}
