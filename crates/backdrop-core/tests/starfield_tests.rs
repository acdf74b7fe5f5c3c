// Tests for starfield scatter and its ambient rotation schedule.

use backdrop_core::{Starfield, StarfieldConfig};

fn small_field() -> Starfield {
    Starfield::new(StarfieldConfig {
        count: 500,
        seed: 3,
        ..StarfieldConfig::default()
    })
}

#[test]
fn stars_fill_the_configured_shell() {
    let field = small_field();
    assert_eq!(field.positions.len(), 500);
    let inner = field.config.radius;
    let outer = field.config.radius + field.config.depth;
    for p in &field.positions {
        let r = p.length();
        assert!(
            r >= inner - 1e-2 && r <= outer + 1e-2,
            "star at radius {r} outside [{inner}, {outer}]"
        );
    }
}

#[test]
fn scatter_is_deterministic_per_seed() {
    let a = small_field();
    let b = small_field();
    assert_eq!(a.positions, b.positions);
    let c = Starfield::new(StarfieldConfig {
        count: 500,
        seed: 4,
        ..StarfieldConfig::default()
    });
    assert_ne!(a.positions, c.positions, "different seed, different sky");
}

#[test]
fn yaw_advances_linearly_and_pitch_stays_bounded() {
    let field = small_field();
    let rate = field.config.yaw_rate;
    let (_, yaw1) = field.rotation(10.0);
    let (_, yaw2) = field.rotation(30.0);
    assert!(((yaw2 - yaw1) - rate * 20.0).abs() < 1e-5);
    for step in 0..500 {
        let (pitch, _) = field.rotation(step as f32 * 0.37);
        assert!(
            pitch.abs() <= field.config.wobble_amplitude + 1e-6,
            "pitch {pitch} exceeds the nod amplitude"
        );
    }
}

#[test]
fn stars_are_not_coplanar() {
    // A degenerate scatter (all on one hemisphere axis) would look wrong;
    // check both hemispheres are populated on every axis.
    let field = small_field();
    for axis in 0..3 {
        let pos = field
            .positions
            .iter()
            .filter(|p| p.to_array()[axis] > 0.0)
            .count();
        assert!(
            pos > 100 && pos < 400,
            "axis {axis} lopsided: {pos} of {} positive",
            field.positions.len()
        );
    }
}
