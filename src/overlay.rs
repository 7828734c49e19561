// Browser wiring for the particle field: a full-window canvas laid over the page,
// viewport resize and pointer listeners, and the requestAnimationFrame loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent, Window};

use crate::field::ParticleField;
use crate::pointer::PointerTracker;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

#[wasm_bindgen]
pub struct CursorParticles {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    field: Rc<RefCell<ParticleField>>,
    running: Rc<Cell<bool>>,
    frame_id: Rc<Cell<Option<i32>>>,
    frame: FrameCallback,
    on_resize: Closure<dyn FnMut()>,
    on_move: Closure<dyn FnMut(MouseEvent)>,
}

#[wasm_bindgen]
impl CursorParticles {
    // Creates the overlay canvas and hooks up its listeners. The loop stays idle until start().
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<CursorParticles, JsValue> {
        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("window has no document")?;
        let body = document.body().ok_or("document has no body")?;

        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        let style = canvas.style();
        style.set_property("position", "fixed")?;
        style.set_property("top", "0")?;
        style.set_property("left", "0")?;
        style.set_property("z-index", "9999")?;
        style.set_property("pointer-events", "none")?;
        body.append_child(&canvas)?;

        let context = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let (width, height) = viewport_size(&window)?;
        canvas.set_width(width);
        canvas.set_height(height);
        let field = Rc::new(RefCell::new(ParticleField::new(width, height)));

        let on_resize = {
            let window = window.clone();
            let canvas = canvas.clone();
            let field = field.clone();
            Closure::wrap(Box::new(move || match viewport_size(&window) {
                Ok((width, height)) => {
                    canvas.set_width(width);
                    canvas.set_height(height);
                    field.borrow_mut().resize(width, height);
                }
                Err(err) => log::warn!("could not read viewport size: {:?}", err),
            }) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        let on_move = {
            let field = field.clone();
            let mut tracker = PointerTracker::new(js_sys::Date::now(), field.borrow().config());
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let x = event.client_x() as f64;
                let y = event.client_y() as f64;
                let speed = tracker.track(x, y, js_sys::Date::now());
                field.borrow_mut().spawn(x, y, speed);
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;

        let running = Rc::new(Cell::new(false));
        let frame_id = Rc::new(Cell::new(None));
        let frame: FrameCallback = Rc::new(RefCell::new(None));
        {
            let window = window.clone();
            let field = field.clone();
            let running = running.clone();
            let frame_id = frame_id.clone();
            let next = frame.clone();
            let mut context = context;
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                frame_id.set(None);
                if !running.get() {
                    return;
                }
                if let Err(err) = field.borrow_mut().tick(&mut context) {
                    log::warn!("particle frame failed to render: {:?}", err);
                }
                if let Some(callback) = next.borrow().as_ref() {
                    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                        Ok(id) => frame_id.set(Some(id)),
                        Err(err) => {
                            log::error!("could not schedule next particle frame: {:?}", err);
                            running.set(false);
                        }
                    }
                }
            }) as Box<dyn FnMut()>));
        }

        log::info!("particle overlay ready at {}x{}", width, height);
        Ok(CursorParticles {
            window,
            document,
            canvas,
            field,
            running,
            frame_id,
            frame,
            on_resize,
            on_move,
        })
    }

    pub fn start(&self) -> Result<(), JsValue> {
        if self.running.get() {
            return Ok(());
        }
        if let Some(callback) = self.frame.borrow().as_ref() {
            let id = self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())?;
            self.frame_id.set(Some(id));
            self.running.set(true);
            log::info!("particle overlay started");
        }
        Ok(())
    }

    pub fn stop(&self) -> Result<(), JsValue> {
        self.running.set(false);
        if let Some(id) = self.frame_id.take() {
            self.window.cancel_animation_frame(id)?;
            log::info!("particle overlay stopped");
        }
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn particle_count(&self) -> usize {
        self.field.borrow().len()
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }
}

impl Drop for CursorParticles {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            log::warn!("could not cancel pending particle frame: {:?}", err);
        }
        // The frame closure holds a handle to itself; dropping it here breaks the cycle
        self.frame.borrow_mut().take();
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        let _ = self
            .document
            .remove_event_listener_with_callback("mousemove", self.on_move.as_ref().unchecked_ref());
        self.canvas.remove();
    }
}

fn viewport_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or("innerWidth is not a number")?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or("innerHeight is not a number")?;
    Ok((width as u32, height as u32))
}
