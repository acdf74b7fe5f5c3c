//! requestAnimationFrame adapter over the core `FrameLoop` lifecycle.

use std::cell::RefCell;
use std::rc::Rc;

use backdrop_core::{FrameLoop, FrameScheduler};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameClosure = Closure<dyn FnMut()>;

/// `FrameScheduler` backed by `window.requestAnimationFrame`, always
/// re-registering the same stored closure.
struct WindowScheduler {
    closure: Rc<RefCell<Option<FrameClosure>>>,
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) -> u64 {
        let id = web::window()
            .zip(self.closure.borrow().as_ref().map(|c| c.as_ref().clone()))
            .and_then(|(w, cb)| w.request_animation_frame(cb.unchecked_ref()).ok())
            .unwrap_or(0);
        id as u64
    }

    fn cancel_frame(&mut self, id: u64) {
        if let Some(w) = web::window() {
            let _ = w.cancel_animation_frame(id as i32);
        }
    }
}

/// A running rAF chain driving one tick function.
///
/// Stopping (or dropping) cancels the in-flight request and bars the closure
/// from running again; the stop flag is checked before any tick work.
pub struct RafLoop {
    frame_loop: Rc<RefCell<FrameLoop>>,
    sched: Rc<RefCell<WindowScheduler>>,
    _closure: Rc<RefCell<Option<FrameClosure>>>,
}

impl RafLoop {
    pub fn start(mut tick: impl FnMut() + 'static) -> Self {
        let closure_slot: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
        let sched = Rc::new(RefCell::new(WindowScheduler {
            closure: closure_slot.clone(),
        }));
        // Placeholder until the real loop state is installed below
        let frame_loop = Rc::new(RefCell::new(FrameLoop::start(&mut WindowScheduler {
            closure: Rc::new(RefCell::new(None)),
        })));

        let loop_cb = frame_loop.clone();
        let sched_cb = sched.clone();
        *closure_slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            // Lifecycle check first: nothing runs after stop()
            let run = loop_cb.borrow_mut().on_frame(&mut *sched_cb.borrow_mut());
            if run {
                tick();
            }
        }) as Box<dyn FnMut()>));

        *frame_loop.borrow_mut() = FrameLoop::start(&mut *sched.borrow_mut());
        Self {
            frame_loop,
            sched,
            _closure: closure_slot,
        }
    }

    pub fn stop(&self) {
        self.frame_loop
            .borrow_mut()
            .stop(&mut *self.sched.borrow_mut());
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
