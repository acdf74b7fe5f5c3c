//! Per-frame context for the 3D scene layer: one shared clock drives the
//! globe and starfield updates ahead of each draw.

use std::cell::RefCell;
use std::rc::Rc;

use backdrop_core::{Globe, GlobeConfig, OrbitCamera, Starfield, StarfieldConfig};
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::input::PointerControls;
use crate::raf::RafLoop;
use crate::render::GpuState;
use crate::textures::TextureSet;

type ResizeClosure = Closure<dyn FnMut(js_sys::Array)>;

pub struct SceneContext {
    pub gpu: GpuState<'static>,
    pub globe: Globe,
    pub starfield: Starfield,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub canvas: web::HtmlCanvasElement,
    pub started: Instant,
}

impl SceneContext {
    pub fn frame(&mut self) {
        // Backing-size sync happens in the resize observer; this only picks
        // up the new size, and is a no-op when nothing changed.
        self.gpu.resize(self.canvas.width(), self.canvas.height());
        let elapsed = self.started.elapsed().as_secs_f32();
        let camera = self.camera.borrow().clone();
        self.gpu
            .render(&camera, &self.globe, &self.starfield, elapsed);
    }
}

/// Mounted 3D layer. Unmount (or drop) stops the frame chain, disconnects
/// the resize observer and detaches the pointer listeners.
pub struct SceneLayer {
    raf: RafLoop,
    observer: web::ResizeObserver,
    _resize_closure: ResizeClosure,
    _controls: PointerControls,
}

impl SceneLayer {
    pub async fn mount(canvas: &web::HtmlCanvasElement) -> anyhow::Result<SceneLayer> {
        dom::sync_canvas_backing_size(canvas);
        let textures = TextureSet::fetch_default().await?;
        let globe = Globe::new(GlobeConfig::default());
        let starfield = Starfield::new(StarfieldConfig::default());

        // Leak a canvas clone to satisfy the surface's 'static lifetime
        let leaked: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
        let gpu = GpuState::new(leaked, &globe, &starfield, &textures).await?;

        let camera = Rc::new(RefCell::new(OrbitCamera::default()));
        let controls = PointerControls::attach(canvas, camera.clone());

        let ctx = Rc::new(RefCell::new(SceneContext {
            gpu,
            globe,
            starfield,
            camera,
            canvas: canvas.clone(),
            started: Instant::now(),
        }));
        let observer_ctx = ctx.clone();
        let resize_closure: ResizeClosure = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
            let ctx = &mut *observer_ctx.borrow_mut();
            dom::sync_canvas_backing_size(&ctx.canvas);
            ctx.gpu.resize(ctx.canvas.width(), ctx.canvas.height());
        }) as Box<dyn FnMut(js_sys::Array)>);
        let observer = web::ResizeObserver::new(resize_closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("ResizeObserver: {:?}", e))?;
        observer.observe(canvas);

        let tick_ctx = ctx.clone();
        let raf = RafLoop::start(move || tick_ctx.borrow_mut().frame());

        log::info!("[scene] mounted");
        Ok(SceneLayer {
            raf,
            observer,
            _resize_closure: resize_closure,
            _controls: controls,
        })
    }

    pub fn unmount(self) {
        self.raf.stop();
        self.observer.disconnect();
        log::info!("[scene] unmounted");
    }
}

impl Drop for SceneLayer {
    fn drop(&mut self) {
        self.raf.stop();
        self.observer.disconnect();
    }
}
