//! Platform timer handles
//!
//! Thin owners for the browser's two scheduling primitives. Both types keep
//! their JS callback alive for as long as it can still fire and know how to
//! cancel themselves, so the restart and game-over paths never leak a
//! closure or leave a stale callback running.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

struct FrameInner {
    running: Cell<bool>,
    raf_id: Cell<Option<i32>>,
    closure: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

/// A cancellable requestAnimationFrame loop
///
/// The callback reschedules itself after each frame until [`cancel`] runs.
/// Cancelling both revokes the pending frame and flags the loop stopped, so
/// a callback already dispatched by the browser exits without doing work.
///
/// [`cancel`]: FrameLoop::cancel
pub struct FrameLoop {
    inner: Rc<FrameInner>,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(FrameInner {
                running: Cell::new(false),
                raf_id: Cell::new(None),
                closure: RefCell::new(None),
            }),
        }
    }

    /// Start the loop, replacing any previous callback
    pub fn start<F: FnMut(f64) + 'static>(&self, mut callback: F) {
        self.cancel();
        self.inner.running.set(true);

        let inner = Rc::clone(&self.inner);
        let closure = Closure::wrap(Box::new(move |timestamp: f64| {
            if !inner.running.get() {
                return;
            }

            callback(timestamp);

            // The callback may have cancelled the loop
            if inner.running.get() {
                if let Some(closure) = inner.closure.borrow().as_ref() {
                    if let Ok(id) =
                        window().request_animation_frame(closure.as_ref().unchecked_ref())
                    {
                        inner.raf_id.set(Some(id));
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>);

        if let Ok(id) = window().request_animation_frame(closure.as_ref().unchecked_ref()) {
            self.inner.raf_id.set(Some(id));
        }
        *self.inner.closure.borrow_mut() = Some(closure);
    }

    /// Stop the loop and revoke the pending frame
    pub fn cancel(&self) {
        self.inner.running.set(false);
        if let Some(id) = self.inner.raf_id.take() {
            let _ = window().cancel_animation_frame(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

/// A cancellable setInterval handle
///
/// Restarting with a new delay is stop-then-start; there is no in-place
/// reschedule in the browser API.
pub struct Interval {
    id: Cell<Option<i32>>,
    closure: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Default for Interval {
    fn default() -> Self {
        Self::new()
    }
}

impl Interval {
    pub fn new() -> Self {
        Self {
            id: Cell::new(None),
            closure: RefCell::new(None),
        }
    }

    /// Start firing every `delay_ms`, replacing any previous schedule
    pub fn start<F: FnMut() + 'static>(&self, callback: F, delay_ms: i32) {
        self.stop();

        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        if let Ok(id) = window()
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms,
            )
        {
            self.id.set(Some(id));
        }
        *self.closure.borrow_mut() = Some(closure);
    }

    /// Stop firing and drop the callback
    pub fn stop(&self) {
        if let Some(id) = self.id.take() {
            window().clear_interval_with_handle(id);
        }
        *self.closure.borrow_mut() = None;
    }

    pub fn is_running(&self) -> bool {
        self.id.get().is_some()
    }
}
