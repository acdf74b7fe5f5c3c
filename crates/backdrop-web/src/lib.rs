#![cfg(target_arch = "wasm32")]
//! Ambient page backdrop: a glyph-rain canvas layered behind a WebGPU scene
//! with a rotating, city-marked Earth and a slow starfield. The whole
//! assembly mounts once per page lifetime into a fixed full-viewport
//! container and never restarts on foreground re-renders.

mod dom;
mod frame;
mod input;
mod raf;
mod rain;
mod render;
mod textures;

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use backdrop_core::TeardownEpoch;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const CONTAINER_ID: &str = "backdrop";

struct Backdrop {
    rain: Option<rain::RainLayer>,
    scene: Option<frame::SceneLayer>,
    rain_canvas: web::HtmlCanvasElement,
    scene_canvas: web::HtmlCanvasElement,
}

thread_local! {
    static BACKDROP: RefCell<Option<Backdrop>> = const { RefCell::new(None) };
}

static MOUNT_STARTED: AtomicBool = AtomicBool::new(false);
// Bumped by unmount so a mount still awaiting texture fetches discards its
// work instead of installing after teardown.
static MOUNT_EPOCH: TeardownEpoch = TeardownEpoch::new();

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("backdrop-web starting");
    mount();
    Ok(())
}

/// Mount the backdrop into `#backdrop`. Repeat calls are ignored so page
/// re-renders can never restart the animations or reset their phase.
#[wasm_bindgen]
pub fn mount() {
    if MOUNT_STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("backdrop already mounted; ignoring");
        return;
    }
    let token = MOUNT_EPOCH.begin();
    spawn_local(async move {
        if let Err(e) = mount_impl(token).await {
            log::error!("mount error: {:?}", e);
        }
    });
}

/// Tear the backdrop down: both frame chains stop, both observers and all
/// listeners are released, and the canvases leave the DOM. A mount still in
/// flight is invalidated and cleans up after itself when it resumes.
#[wasm_bindgen]
pub fn unmount() {
    MOUNT_EPOCH.invalidate();
    let taken = BACKDROP.with(|slot| slot.borrow_mut().take());
    if let Some(b) = taken {
        if let Some(rain) = b.rain {
            rain.unmount();
        }
        if let Some(scene) = b.scene {
            scene.unmount();
        }
        b.rain_canvas.remove();
        b.scene_canvas.remove();
        log::info!("backdrop unmounted");
    }
    MOUNT_STARTED.store(false, Ordering::SeqCst);
}

async fn mount_impl(token: u64) -> anyhow::Result<()> {
    // unmount may have run before this task was first polled
    if !MOUNT_EPOCH.is_current(token) {
        return Ok(());
    }
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = document
        .get_element_by_id(CONTAINER_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CONTAINER_ID} container"))?;

    let rain_canvas = dom::create_layer_canvas(&document, &container, "0")?;
    rain_canvas
        .style()
        .set_property("opacity", "0.4")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let scene_canvas = dom::create_layer_canvas(&document, &container, "1")?;

    let seed = js_sys::Date::now() as u64;
    let rain = rain::RainLayer::mount(&container, &rain_canvas, seed)?;

    // Install before the scene's texture fetches: an unmount arriving while
    // the fetches are in flight can then stop the rain chain and pull both
    // canvases immediately.
    BACKDROP.with(|slot| {
        *slot.borrow_mut() = Some(Backdrop {
            rain,
            scene: None,
            rain_canvas: rain_canvas.clone(),
            scene_canvas: scene_canvas.clone(),
        });
    });

    // Texture or adapter failures surface here through the renderer's normal
    // error path; the rain layer keeps running either way.
    let scene = match frame::SceneLayer::mount(&scene_canvas).await {
        Ok(s) => Some(s),
        Err(e) => {
            log::error!("scene init failed: {:?}", e);
            None
        }
    };

    if !MOUNT_EPOCH.is_current(token) {
        // Torn down while the scene was loading; nothing of it may survive
        if let Some(s) = scene {
            s.unmount();
        }
        return Ok(());
    }
    BACKDROP.with(|slot| {
        if let Some(b) = slot.borrow_mut().as_mut() {
            b.scene = scene;
        }
    });
    log::info!("backdrop mounted");
    Ok(())
}
