//! Pointer-driven orbit controls: drag rotates, wheel zooms, nothing pans.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use backdrop_core::OrbitCamera;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type MouseClosure = Closure<dyn FnMut(web::MouseEvent)>;
type WheelClosure = Closure<dyn FnMut(web::WheelEvent)>;

const WHEEL_STEP: f32 = 0.01;

/// Event listeners attached to the scene canvas, removed on detach/drop so
/// teardown leaves nothing registered.
pub struct PointerControls {
    canvas: web::HtmlCanvasElement,
    mouse_closures: Vec<(&'static str, MouseClosure)>,
    wheel_closure: Option<WheelClosure>,
}

impl PointerControls {
    pub fn attach(canvas: &web::HtmlCanvasElement, camera: Rc<RefCell<OrbitCamera>>) -> Self {
        let down = Rc::new(Cell::new(false));
        let last = Rc::new(Cell::new((0.0_f32, 0.0_f32)));

        let mut mouse_closures: Vec<(&'static str, MouseClosure)> = Vec::new();

        {
            let down = down.clone();
            let last = last.clone();
            let closure: MouseClosure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
                down.set(true);
                last.set((ev.client_x() as f32, ev.client_y() as f32));
            }) as Box<dyn FnMut(web::MouseEvent)>);
            mouse_closures.push(("mousedown", closure));
        }
        {
            let down = down.clone();
            let last = last.clone();
            let camera = camera.clone();
            let canvas = canvas.clone();
            let closure: MouseClosure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
                if !down.get() {
                    return;
                }
                let (lx, ly) = last.get();
                let x = ev.client_x() as f32;
                let y = ev.client_y() as f32;
                last.set((x, y));
                let w = (canvas.client_width() as f32).max(1.0);
                let h = (canvas.client_height() as f32).max(1.0);
                camera.borrow_mut().rotate(
                    (x - lx) / w * std::f32::consts::TAU,
                    (y - ly) / h * std::f32::consts::PI,
                );
            }) as Box<dyn FnMut(web::MouseEvent)>);
            mouse_closures.push(("mousemove", closure));
        }
        for name in ["mouseup", "mouseleave"] {
            let down = down.clone();
            let closure: MouseClosure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
                down.set(false);
            }) as Box<dyn FnMut(web::MouseEvent)>);
            mouse_closures.push((name, closure));
        }

        for (name, closure) in &mouse_closures {
            let _ = canvas
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }

        let wheel_closure: WheelClosure = {
            let camera = camera.clone();
            Closure::wrap(Box::new(move |ev: web::WheelEvent| {
                camera.borrow_mut().zoom(ev.delta_y() as f32 * WHEEL_STEP);
                ev.prevent_default();
            }) as Box<dyn FnMut(web::WheelEvent)>)
        };
        let _ = canvas
            .add_event_listener_with_callback("wheel", wheel_closure.as_ref().unchecked_ref());

        Self {
            canvas: canvas.clone(),
            mouse_closures,
            wheel_closure: Some(wheel_closure),
        }
    }

    pub fn detach(&mut self) {
        for (name, closure) in self.mouse_closures.drain(..) {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        if let Some(closure) = self.wheel_closure.take() {
            let _ = self
                .canvas
                .remove_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for PointerControls {
    fn drop(&mut self) {
        self.detach();
    }
}
