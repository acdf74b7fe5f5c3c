// Tests for the lat/lng -> sphere projection used to place city markers.

use backdrop_core::geo::{project, CAPITAL_CITIES, MAJOR_CITIES};
use rand::prelude::*;

const EPS: f32 = 1e-5;

#[test]
fn equator_reference_meridian_maps_to_positive_x() {
    // lng = 0 lands at theta = 180 degrees under the texture-seam offset,
    // so x = -(sin 90 * cos 180) = +1
    let p = project(0.0, 0.0, 1.0);
    assert!((p.x - 1.0).abs() < EPS, "x was {}", p.x);
    assert!(p.y.abs() < EPS, "y was {}", p.y);
    assert!(p.z.abs() < EPS, "z was {}", p.z);
}

#[test]
fn north_pole_maps_to_positive_y_for_any_longitude() {
    for lng in [-180.0, -77.0, 0.0, 13.4, 139.6, 180.0] {
        let p = project(90.0, lng, 1.0);
        assert!(p.x.abs() < EPS, "x was {} at lng {}", p.x, lng);
        assert!((p.y - 1.0).abs() < EPS, "y was {} at lng {}", p.y, lng);
        assert!(p.z.abs() < EPS, "z was {} at lng {}", p.z, lng);
    }
}

#[test]
fn south_pole_maps_to_negative_y() {
    let p = project(-90.0, 42.0, 2.5);
    assert!((p.y - (-2.5)).abs() < 1e-4, "y was {}", p.y);
}

#[test]
fn projected_points_lie_on_the_sphere() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let lat = rng.gen::<f32>() * 180.0 - 90.0;
        let lng = rng.gen::<f32>() * 360.0 - 180.0;
        let radius = rng.gen::<f32>() * 10.0 + 0.1;
        let p = project(lat, lng, radius);
        let len = p.length();
        assert!(
            (len - radius).abs() < radius * 1e-4,
            "|project({lat}, {lng}, {radius})| = {len}"
        );
    }
}

#[test]
fn out_of_range_inputs_are_accepted() {
    // Total function: wild inputs wrap around the sphere instead of failing
    let p = project(123.0, 481.0, 1.0);
    assert!((p.length() - 1.0).abs() < 1e-4);
}

#[test]
fn compiled_in_city_data_is_in_domain() {
    for c in CAPITAL_CITIES {
        assert!(c.latitude.abs() <= 90.0, "{} latitude", c.name);
        assert!(c.longitude.abs() <= 180.0, "{} longitude", c.name);
    }
    for c in MAJOR_CITIES {
        assert!(c.point.latitude.abs() <= 90.0, "{} latitude", c.point.name);
        assert!(c.point.longitude.abs() <= 180.0, "{} longitude", c.point.name);
        assert!(c.size > 0.0, "{} size hint", c.point.name);
    }
}
