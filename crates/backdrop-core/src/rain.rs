//! Glyph-rain column state: the falling-character effect, kept free of any
//! drawing API so it can be ticked deterministically in tests.

use rand::prelude::*;

use crate::constants::{
    RAIN_CELL_PX, RAIN_FALL_SPEED, RAIN_GLYPHS, RAIN_GLYPH_MIN_OPACITY, RAIN_GLYPH_OPACITY_SPAN,
    RAIN_RESTART_WINDOW_FRAMES,
};

#[derive(Clone, Copy, Debug)]
pub struct RainParams {
    /// Glyph cell width in pixels; also the font size.
    pub cell_px: f32,
    /// Rows a drop advances per tick.
    pub fall_speed: f32,
    /// Restart delays are drawn uniformly from `[0, restart_window)` frames.
    pub restart_window: f32,
    pub min_opacity: f32,
    pub opacity_span: f32,
}

impl Default for RainParams {
    fn default() -> Self {
        Self {
            cell_px: RAIN_CELL_PX,
            fall_speed: RAIN_FALL_SPEED,
            restart_window: RAIN_RESTART_WINDOW_FRAMES,
            min_opacity: RAIN_GLYPH_MIN_OPACITY,
            opacity_span: RAIN_GLYPH_OPACITY_SPAN,
        }
    }
}

/// One glyph to paint this tick, in canvas pixel coordinates.
#[derive(Clone, Copy, Debug)]
pub struct GlyphDraw {
    pub x: f32,
    pub y: f32,
    pub glyph: char,
    pub opacity: f32,
}

/// Per-column animation state for the whole field.
///
/// The drop and delay arrays always have exactly `column_count` entries;
/// `resize` rebuilds both wholesale so a tick can never observe a stale pair.
pub struct RainField {
    pub params: RainParams,
    glyphs: Vec<char>,
    width: f32,
    height: f32,
    drops: Vec<f32>,
    // Frame clock and delays are f64: an f32 counter stops incrementing at
    // 2^24 frames (about 78 hours at 60 fps) and every column goes dark.
    delays: Vec<f64>,
    frame: f64,
    rng: StdRng,
}

impl RainField {
    pub fn new(params: RainParams, seed: u64) -> Self {
        Self {
            params,
            glyphs: RAIN_GLYPHS.chars().collect(),
            width: 0.0,
            height: 0.0,
            drops: Vec::new(),
            delays: Vec::new(),
            frame: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn column_count(&self) -> usize {
        self.drops.len()
    }

    pub fn frame(&self) -> f64 {
        self.frame
    }

    pub fn delays(&self) -> &[f64] {
        &self.delays
    }

    pub fn drops(&self) -> &[f32] {
        &self.drops
    }

    /// Adopt a new canvas size and reinitialize all per-column state.
    ///
    /// In-flight animation state is discarded. A zero (or negative) width
    /// clamps to zero columns rather than failing.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        let columns = if self.params.cell_px > 0.0 {
            (self.width / self.params.cell_px).floor() as usize
        } else {
            0
        };
        self.drops = vec![1.0; columns];
        self.delays = (0..columns)
            .map(|_| (self.rng.gen::<f32>() * self.params.restart_window) as f64)
            .collect();
    }

    /// Advance one frame, pushing every glyph to paint into `out`.
    ///
    /// Columns whose scheduled start delay has not elapsed stay dark. A drop
    /// that falls past the bottom edge resets to the top and draws a fresh
    /// random restart delay, so column restarts stay staggered.
    pub fn tick(&mut self, out: &mut Vec<GlyphDraw>) {
        self.frame += 1.0;
        let cell = self.params.cell_px;
        for i in 0..self.drops.len() {
            if self.frame <= self.delays[i] {
                continue;
            }
            let glyph = *self.glyphs.choose(&mut self.rng).unwrap_or(&'0');
            let opacity =
                self.params.min_opacity + self.rng.gen::<f32>() * self.params.opacity_span;
            out.push(GlyphDraw {
                x: i as f32 * cell,
                y: self.drops[i] * cell,
                glyph,
                opacity,
            });
            self.drops[i] += self.params.fall_speed;
            if self.drops[i] * cell > self.height {
                self.drops[i] = 0.0;
                self.delays[i] =
                    self.frame + (self.rng.gen::<f32>() * self.params.restart_window) as f64;
            }
        }
    }
}
