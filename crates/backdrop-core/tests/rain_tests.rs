// Tests for glyph-rain column state: resize atomicity, staggered restarts
// and the zero-width edge case.

use backdrop_core::rain::{GlyphDraw, RainField, RainParams};

fn make_field() -> RainField {
    RainField::new(RainParams::default(), 42)
}

#[test]
fn resize_sets_column_count_from_width() {
    let mut field = make_field();
    let cell = field.params.cell_px;
    for width in [0.0_f32, 13.9, 14.0, 280.0, 1920.0, 2561.0] {
        field.resize(width, 600.0);
        let expected = (width / cell).floor() as usize;
        assert_eq!(field.column_count(), expected, "width {width}");
        assert_eq!(field.drops().len(), expected, "drops at width {width}");
        assert_eq!(field.delays().len(), expected, "delays at width {width}");
    }
}

#[test]
fn zero_width_resize_is_safe_and_draws_nothing() {
    let mut field = make_field();
    field.resize(0.0, 480.0);
    assert_eq!(field.column_count(), 0);
    let mut draws = Vec::new();
    for _ in 0..100 {
        field.tick(&mut draws);
    }
    assert!(draws.is_empty(), "no columns may draw at zero width");
}

#[test]
fn negative_measurements_clamp_to_zero() {
    let mut field = make_field();
    field.resize(-50.0, -10.0);
    assert_eq!(field.column_count(), 0);
}

#[test]
fn initial_delays_are_staggered() {
    let mut field = make_field();
    field.resize(1400.0, 800.0);
    let delays = field.delays();
    assert!(delays.len() > 50);
    let first = delays[0];
    assert!(
        delays.iter().any(|d| (d - first).abs() > 1.0),
        "all {} initial delays identical",
        delays.len()
    );
    let window = field.params.restart_window as f64;
    for d in delays {
        assert!((0.0..window).contains(d), "delay {d} outside [0, {window})");
    }
}

#[test]
fn columns_restart_on_different_ticks() {
    let mut field = make_field();
    // Short canvas so drops wrap quickly
    field.resize(280.0, 56.0);
    let columns = field.column_count();
    assert!(columns >= 20);

    // Record the first restart tick per column
    let mut first_restart: Vec<Option<u32>> = vec![None; columns];
    let mut draws: Vec<GlyphDraw> = Vec::new();
    let mut prev: Vec<f32> = field.drops().to_vec();
    for tick in 0..2000_u32 {
        draws.clear();
        field.tick(&mut draws);
        for (i, (&now, slot)) in field
            .drops()
            .iter()
            .zip(first_restart.iter_mut())
            .enumerate()
        {
            if slot.is_none() && now < prev[i] {
                *slot = Some(tick);
            }
        }
        prev.copy_from_slice(field.drops());
    }

    let restarts: Vec<u32> = first_restart.into_iter().flatten().collect();
    assert!(
        restarts.len() >= columns / 2,
        "expected most columns to have wrapped, got {}",
        restarts.len()
    );
    let first = restarts[0];
    assert!(
        restarts.iter().any(|&t| t != first),
        "all columns restarted on tick {first}"
    );
}

#[test]
fn draws_stay_inside_the_column_grid() {
    let mut field = make_field();
    field.resize(700.0, 500.0);
    let cell = field.params.cell_px;
    let columns = field.column_count() as f32;
    let mut draws = Vec::new();
    for _ in 0..500 {
        draws.clear();
        field.tick(&mut draws);
        for d in &draws {
            assert!(d.x >= 0.0 && d.x < columns * cell, "x {}", d.x);
            assert!(d.opacity >= 0.0 && d.opacity <= 1.0, "opacity {}", d.opacity);
        }
    }
}

#[test]
fn dormant_columns_do_not_draw_before_their_delay() {
    let mut field = make_field();
    field.resize(280.0, 10_000.0);
    let delays = field.delays().to_vec();
    let min_delay = delays.iter().cloned().fold(f64::INFINITY, f64::min);
    if min_delay < 1.0 {
        return; // every column may draw immediately with this seed
    }
    let mut draws = Vec::new();
    field.tick(&mut draws);
    let active = delays.iter().filter(|&&d| d < 1.0).count();
    assert_eq!(
        draws.len(),
        active,
        "only columns past their delay may draw on tick 1"
    );
}

#[test]
fn columns_keep_raining_past_the_f32_frame_horizon() {
    // An f32 frame counter stops incrementing at 2^24 (about 78 hours at
    // 60 fps); restart delays of frame + window would then never elapse and
    // the field would go permanently dark. One narrow column keeps the run
    // cheap: most ticks are a dormant counter bump.
    let mut field = make_field();
    field.resize(14.0, 28.0);
    assert_eq!(field.column_count(), 1);

    let horizon = 1u64 << 24;
    let total = horizon + 1_000_000;
    let mut draws = Vec::new();
    let mut active_after_horizon = 0u64;
    for tick in 0..total {
        draws.clear();
        field.tick(&mut draws);
        if tick >= horizon && !draws.is_empty() {
            active_after_horizon += 1;
        }
    }
    assert!(
        field.frame() > horizon as f64,
        "frame clock saturated at {}",
        field.frame()
    );
    assert!(
        active_after_horizon > 0,
        "column went permanently dark after the horizon"
    );
}

#[test]
fn resize_mid_animation_rebuilds_state_wholesale() {
    let mut field = make_field();
    field.resize(1000.0, 300.0);
    let mut draws = Vec::new();
    for _ in 0..50 {
        field.tick(&mut draws);
    }
    field.resize(420.0, 300.0);
    let expected = (420.0 / field.params.cell_px) as usize;
    assert_eq!(field.column_count(), expected);
    assert!(field.drops().iter().all(|&d| d == 1.0), "drops reset");
}
