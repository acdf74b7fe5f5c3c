//! Geographic data and the spherical projection used to place city markers.

use glam::Vec3;

/// A named point on the Earth's surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub name: &'static str,
    pub latitude: f32,
    pub longitude: f32,
}

/// A city plus its marker-size hint (world units, pre-globe-scale).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CityMarker {
    pub point: GeoPoint,
    pub size: f32,
}

/// Project a latitude/longitude pair onto a sphere of the given radius.
///
/// Latitude is mapped to the polar angle and longitude to the azimuth with a
/// 180-degree offset so marker positions line up with the seam of the
/// equirectangular surface texture. Total over all real inputs; out-of-range
/// coordinates simply wrap around the sphere.
pub fn project(latitude: f32, longitude: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - latitude).to_radians();
    let theta = (longitude + 180.0).to_radians();
    Vec3::new(
        -(radius * phi.sin() * theta.cos()),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

const fn city(name: &'static str, latitude: f32, longitude: f32) -> GeoPoint {
    GeoPoint {
        name,
        latitude,
        longitude,
    }
}

const fn sized(name: &'static str, latitude: f32, longitude: f32, size: f32) -> CityMarker {
    CityMarker {
        point: city(name, latitude, longitude),
        size,
    }
}

/// Default capital set: each gets the full dot + glow + stem marker treatment.
pub const CAPITAL_CITIES: &[GeoPoint] = &[
    city("London", 51.5074, -0.1278),
    city("Paris", 48.8566, 2.3522),
    city("Tokyo", 35.6762, 139.6503),
    city("Washington DC", 38.8977, -77.0365),
    city("Beijing", 39.9042, 116.4074),
    city("Moscow", 55.7558, 37.6173),
    city("Berlin", 52.52, 13.405),
    city("Rome", 41.9028, 12.4964),
];

/// Default major-city set: plain dots sized by hint.
pub const MAJOR_CITIES: &[CityMarker] = &[
    // North America
    sized("New York", 40.7128, -74.006, 0.005),
    sized("Los Angeles", 34.0522, -118.2437, 0.005),
    sized("Chicago", 41.8781, -87.6298, 0.005),
    sized("Toronto", 43.6532, -79.3832, 0.005),
    sized("Mexico City", 19.4326, -99.1332, 0.005),
    sized("Vancouver", 49.2827, -123.1207, 0.005),
    sized("Miami", 25.7617, -80.1918, 0.005),
    sized("Dallas", 32.7767, -96.797, 0.005),
    // Europe
    sized("London", 51.5074, -0.1278, 0.005),
    sized("Paris", 48.8566, 2.3522, 0.005),
    sized("Berlin", 52.52, 13.405, 0.005),
    sized("Rome", 41.9028, 12.4964, 0.005),
    sized("Madrid", 40.4168, -3.7038, 0.005),
    sized("Amsterdam", 52.3676, 4.9041, 0.005),
    sized("Brussels", 50.8503, 4.3517, 0.005),
    sized("Vienna", 48.2082, 16.3738, 0.005),
    sized("Stockholm", 59.3293, 18.0686, 0.005),
    sized("Athens", 37.9838, 23.7275, 0.005),
    // Asia
    sized("Tokyo", 35.6762, 139.6503, 0.005),
    sized("Beijing", 39.9042, 116.4074, 0.005),
    sized("New Delhi", 28.6139, 77.209, 0.005),
    sized("Seoul", 37.5665, 126.978, 0.005),
    sized("Bangkok", 13.7563, 100.5018, 0.005),
    sized("Singapore", 1.3521, 103.8198, 0.005),
    // Africa
    sized("Cairo", 30.0444, 31.2357, 0.005),
    sized("Lagos", 6.5244, 3.3792, 0.005),
    sized("Nairobi", 1.2921, 36.8219, 0.005),
    sized("Cape Town", -33.9249, 18.4241, 0.005),
    // South America
    sized("São Paulo", -23.5505, -46.6333, 0.005),
    sized("Buenos Aires", -34.6037, -58.3816, 0.005),
    sized("Rio de Janeiro", -22.9068, -43.1729, 0.005),
    sized("Lima", -12.0464, -77.0428, 0.005),
    sized("Bogotá", 4.711, -74.0721, 0.005),
    // Australia / Oceania
    sized("Sydney", -33.8688, 151.2093, 0.005),
    sized("Melbourne", -37.8136, 144.9631, 0.005),
    sized("Auckland", -36.8509, 174.7645, 0.005),
];
