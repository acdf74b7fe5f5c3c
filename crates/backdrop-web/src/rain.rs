//! Canvas-2D glyph rain layer: painting, resize observation and lifecycle.

use std::cell::RefCell;
use std::rc::Rc;

use backdrop_core::{GlyphDraw, RainField, RainParams, RAIN_TRAIL_ALPHA};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::raf::RafLoop;

type ResizeClosure = Closure<dyn FnMut(js_sys::Array)>;

/// Mounted glyph-rain effect. Owns its own frame chain and resize observer;
/// both are released on `unmount` (or drop).
pub struct RainLayer {
    raf: RafLoop,
    observer: web::ResizeObserver,
    _resize_closure: ResizeClosure,
}

impl RainLayer {
    /// Mount onto `canvas`, observing `container` for size changes.
    ///
    /// Returns `Ok(None)` when no 2D context is available: the effect is
    /// decorative, so an unsupported environment renders nothing instead of
    /// failing the page.
    pub fn mount(
        container: &web::Element,
        canvas: &web::HtmlCanvasElement,
        seed: u64,
    ) -> anyhow::Result<Option<RainLayer>> {
        let ctx = match acquire_2d_context(canvas) {
            Some(ctx) => ctx,
            None => {
                log::warn!("[rain] no 2d context; effect disabled");
                return Ok(None);
            }
        };

        let field = Rc::new(RefCell::new(RainField::new(RainParams::default(), seed)));

        // Resize observation: canvas backing size and column arrays are
        // rebuilt together, so a tick never sees a mismatched pair.
        let observer_canvas = canvas.clone();
        let observer_field = field.clone();
        let resize_closure: ResizeClosure = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
            dom::sync_canvas_backing_size(&observer_canvas);
            observer_field.borrow_mut().resize(
                observer_canvas.width() as f32,
                observer_canvas.height() as f32,
            );
        }) as Box<dyn FnMut(js_sys::Array)>);
        let observer = web::ResizeObserver::new(resize_closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("ResizeObserver: {:?}", e))?;
        observer.observe(container);

        // Initial measurement before the first frame
        dom::sync_canvas_backing_size(canvas);
        field
            .borrow_mut()
            .resize(canvas.width() as f32, canvas.height() as f32);

        let paint_canvas = canvas.clone();
        let paint_field = field.clone();
        let trail_style = format!("rgba(0, 0, 0, {})", RAIN_TRAIL_ALPHA);
        let font = format!("{}px monospace", RainParams::default().cell_px);
        let mut draws: Vec<GlyphDraw> = Vec::new();
        let raf = RafLoop::start(move || {
            let width = paint_canvas.width() as f64;
            let height = paint_canvas.height() as f64;
            ctx.set_fill_style_str(&trail_style);
            ctx.fill_rect(0.0, 0.0, width, height);
            ctx.set_font(&font);

            draws.clear();
            paint_field.borrow_mut().tick(&mut draws);
            let mut buf = [0u8; 4];
            for d in &draws {
                ctx.set_fill_style_str(&format!("rgba(0, 255, 0, {:.3})", d.opacity));
                let _ = ctx.fill_text(d.glyph.encode_utf8(&mut buf), d.x as f64, d.y as f64);
            }
        });

        log::info!("[rain] mounted");
        Ok(Some(RainLayer {
            raf,
            observer,
            _resize_closure: resize_closure,
        }))
    }

    pub fn unmount(self) {
        // Drop order does not matter; the two handles are unrelated.
        self.raf.stop();
        self.observer.disconnect();
        log::info!("[rain] unmounted");
    }
}

impl Drop for RainLayer {
    fn drop(&mut self) {
        self.raf.stop();
        self.observer.disconnect();
    }
}

fn acquire_2d_context(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|obj| obj.dyn_into::<web::CanvasRenderingContext2d>().ok())
}
