// Tests for the orbit camera: zoom band, pitch clamp and view geometry.

use backdrop_core::OrbitCamera;
use glam::Vec4;

#[test]
fn zoom_clamps_to_the_distance_band() {
    let mut cam = OrbitCamera::default();
    cam.zoom(-100.0);
    assert_eq!(cam.distance, cam.min_distance, "zoom-in floor");
    cam.zoom(1000.0);
    assert_eq!(cam.distance, cam.max_distance, "zoom-out ceiling");
}

#[test]
fn zoom_steps_scale_with_the_configured_speed() {
    let mut cam = OrbitCamera::default();
    let before = cam.distance;
    cam.zoom(1.0);
    assert!((cam.distance - before - cam.zoom_speed).abs() < 1e-6);
}

#[test]
fn pitch_never_reaches_the_poles() {
    let mut cam = OrbitCamera::default();
    for _ in 0..1000 {
        cam.rotate(0.0, 1.0);
    }
    assert!(cam.pitch < std::f32::consts::FRAC_PI_2, "pitch {}", cam.pitch);
    for _ in 0..2000 {
        cam.rotate(0.0, -1.0);
    }
    assert!(cam.pitch > -std::f32::consts::FRAC_PI_2);
}

#[test]
fn rotation_scales_with_the_configured_speed() {
    let mut cam = OrbitCamera::default();
    let yaw0 = cam.yaw;
    cam.rotate(0.5, 0.0);
    assert!((yaw0 - cam.yaw - 0.5 * cam.rotate_speed).abs() < 1e-6);
}

#[test]
fn eye_stays_at_the_orbit_distance() {
    let mut cam = OrbitCamera::default();
    cam.rotate(1.3, 0.4);
    cam.zoom(0.7);
    assert!((cam.eye().length() - cam.distance).abs() < 1e-4);
}

#[test]
fn view_matrix_puts_the_origin_ahead_of_the_eye() {
    let mut cam = OrbitCamera::default();
    cam.rotate(2.0, -0.3);
    let v = cam.view_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    // Looking down -z in view space, at the orbit distance
    assert!((v.z + cam.distance).abs() < 1e-4, "view z was {}", v.z);
    assert!(v.x.abs() < 1e-4 && v.y.abs() < 1e-4);
}
