// Tests for globe rotation scheduling and marker placement.

use backdrop_core::geo::{CityMarker, GeoPoint};
use backdrop_core::{Globe, GlobeConfig, GRID_SHELLS};
use glam::Vec3;

fn synthetic_config() -> GlobeConfig {
    GlobeConfig {
        capitals: vec![
            GeoPoint {
                name: "Alpha",
                latitude: 10.0,
                longitude: 20.0,
            },
            GeoPoint {
                name: "Beta",
                latitude: -45.0,
                longitude: 170.0,
            },
        ],
        cities: vec![CityMarker {
            point: GeoPoint {
                name: "Gamma",
                latitude: 0.0,
                longitude: 0.0,
            },
            size: 0.01,
        }],
        ..GlobeConfig::default()
    }
}

#[test]
fn rotation_is_monotonic_at_the_configured_rate() {
    let globe = Globe::new(GlobeConfig::default());
    let rate = globe.config.rotation_rate;
    let mut prev = globe.rotation_y(0.0);
    for step in 1..200 {
        let t = step as f32 * 0.25;
        let now = globe.rotation_y(t);
        assert!(now > prev, "rotation must strictly increase at t={t}");
        let expected = rate * 0.25;
        assert!(
            ((now - prev) - expected).abs() < 1e-4,
            "rate mismatch at t={t}: {} vs {}",
            now - prev,
            expected
        );
        prev = now;
    }
}

#[test]
fn clouds_rotate_faster_than_the_surface() {
    let globe = Globe::new(GlobeConfig::default());
    let t = 12.5;
    let surface = globe.rotation_y(t);
    let clouds = globe.cloud_rotation_y(t);
    assert!(
        (clouds / surface - globe.config.cloud_rate_multiplier).abs() < 1e-5,
        "cloud ratio was {}",
        clouds / surface
    );
}

#[test]
fn markers_sit_slightly_above_the_surface() {
    let globe = Globe::new(synthetic_config());
    for m in globe
        .capital_markers
        .iter()
        .chain(globe.city_markers.iter())
    {
        let r = m.local_position.length();
        assert!(
            (r - globe.config.marker_radius).abs() < 1e-4,
            "marker radius {r}"
        );
        assert!(r > globe.config.radius, "marker must clear the surface");
    }
}

#[test]
fn marker_counts_follow_the_injected_sets() {
    let globe = Globe::new(synthetic_config());
    assert_eq!(globe.capital_markers.len(), 2);
    assert_eq!(globe.city_markers.len(), 1);
    for m in &globe.capital_markers {
        assert!(m.glow_radius > m.dot_radius, "glow wraps the dot");
        assert!(m.stem_length > 0.0);
    }
    for m in &globe.city_markers {
        assert_eq!(m.glow_radius, 0.0, "city dots carry no glow");
        assert_eq!(m.stem_length, 0.0);
    }
}

#[test]
fn default_config_uses_compiled_in_city_data() {
    let globe = Globe::new(GlobeConfig::default());
    assert_eq!(globe.capital_markers.len(), 8);
    assert_eq!(globe.city_markers.len(), 36);
}

#[test]
fn markers_rotate_in_lock_step_with_the_surface() {
    // A marker transformed by the globe's model matrix must keep its angular
    // offset from the surface point directly beneath it.
    let globe = Globe::new(synthetic_config());
    let marker = globe.capital_markers[0].local_position;
    for t in [0.0_f32, 1.0, 17.3, 400.0] {
        let model = globe.model_matrix(t);
        let world = model.transform_point3(marker);
        let expected_len = globe.config.marker_radius * globe.config.group_scale;
        assert!(
            (world.length() - expected_len).abs() < 1e-3,
            "marker drifted off its shell at t={t}"
        );
        // Rotation about +y preserves height
        let local_scaled = marker * globe.config.group_scale;
        assert!((world.y - local_scaled.y).abs() < 1e-3, "height at t={t}");
    }
}

#[test]
fn grid_shells_grow_outward_and_fade() {
    let mut prev_scale = 1.0;
    let mut prev_opacity = f32::INFINITY;
    for shell in GRID_SHELLS {
        assert!(shell.scale > prev_scale, "shells must nest outward");
        assert!(shell.opacity < prev_opacity, "outer shells must be fainter");
        prev_scale = shell.scale;
        prev_opacity = shell.opacity;
    }
}

#[test]
fn model_matrix_applies_group_scale() {
    let globe = Globe::new(GlobeConfig::default());
    let model = globe.model_matrix(0.0);
    let p = model.transform_point3(Vec3::new(1.0, 0.0, 0.0));
    assert!(
        (p.length() - globe.config.group_scale).abs() < 1e-5,
        "scale was {}",
        p.length()
    );
}
