//! WASM bindings for the canvas-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Inputs and outputs are JSON strings; failures come back as an
//! `{"error": {...}}` payload and are also logged to the browser console.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent, WheelEvent};

use crate::bridge::{self, GestureSession, ZoomState};
use crate::error::Result;
use crate::geometry::{Point, Size};
use crate::output::{error_json, ZoomOutput};
use crate::viewport::{StageBox, WheelInput};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

fn respond(what: &str, result: Result<String>) -> String {
    match result {
        Ok(json) => json,
        Err(e) => {
            console_error(&format!("{what}: {e}"));
            error_json(&e)
        }
    }
}

fn respond_optional(what: &str, result: Result<Option<String>>) -> String {
    respond(what, result.map(|json| json.unwrap_or_else(|| "null".to_string())))
}

fn to_js_error(e: crate::error::CoreError) -> JsValue {
    JsValue::from_str(&error_json(&e))
}

fn zoom_json(out: &ZoomOutput) -> String {
    respond("Error encoding zoom state", serde_json::to_string(out).map_err(Into::into))
}

/// Push a moving rectangle out of its obstacles.
#[wasm_bindgen]
pub fn resolve_collision(moving: &str, obstacles: &str, config: &str) -> String {
    respond("Error resolving collision", bridge::resolve(moving, obstacles, config))
}

/// Overlaps and guides for a candidate rectangle.
#[wasm_bindgen]
pub fn overlay(
    sections: &str,
    self_id: &str,
    candidate: &str,
    scope: &str,
    canvas_w: f64,
    canvas_h: f64,
    config: &str,
) -> String {
    let canvas = Size { w: canvas_w, h: canvas_h };
    respond("Error computing overlay", bridge::overlay(sections, self_id, candidate, scope, canvas, config))
}

/// Keep or revert a dropped rectangle.
#[wasm_bindgen]
pub fn commit_drop(sections: &str, self_id: &str, proposed: &str, previous: &str, scope: &str) -> String {
    respond("Error committing drop", bridge::commit_drop(sections, self_id, proposed, previous, scope))
}

/// Sections visible in a drill-down scope, re-based to the container.
/// Pass an empty `scope_parent_id` for the root scope.
#[wasm_bindgen]
pub fn scoped_view(sections: &str, scope_parent_id: &str, canvas_w: f64, canvas_h: f64) -> String {
    let canvas = Size { w: canvas_w, h: canvas_h };
    respond("Error building scoped view", bridge::scoped_view(sections, scope_parent_id, canvas))
}

/// Id of the section under a canvas point, or `null`.
#[wasm_bindgen]
pub fn topmost_at(sections: &str, x: f64, y: f64) -> String {
    respond("Error hit testing", bridge::topmost_at(sections, x, y))
}

#[wasm_bindgen]
pub fn apply_patch(sections: &str, patch: &str) -> String {
    respond("Error applying patch", bridge::apply_patch(sections, patch))
}

/// One drag or resize at a time. The section list is passed on every call
/// so the store stays the single owner of section data.
#[wasm_bindgen]
pub struct DragSession {
    inner: GestureSession,
}

#[wasm_bindgen]
impl DragSession {
    #[wasm_bindgen(constructor)]
    pub fn new(config: &str) -> std::result::Result<DragSession, JsValue> {
        GestureSession::new(config).map(|inner| DragSession { inner }).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.inner.is_active()
    }

    /// Returns the commit of an interrupted gesture, or `null`.
    pub fn begin(
        &mut self,
        sections: &str,
        section_id: &str,
        scope_parent_id: &str,
        canvas_w: f64,
        canvas_h: f64,
    ) -> String {
        let canvas = Size { w: canvas_w, h: canvas_h };
        respond_optional(
            "Error starting gesture",
            self.inner.begin(sections, section_id, scope_parent_id, canvas),
        )
    }

    pub fn update(&mut self, sections: &str, candidate: &str) -> String {
        respond("Error updating gesture", self.inner.update(sections, candidate))
    }

    pub fn end(&mut self, sections: &str, proposal: &str) -> String {
        respond("Error ending gesture", self.inner.end(sections, proposal))
    }

    /// For blur/pointercancel: commit the last proposal. `null` if idle.
    pub fn interrupt(&mut self, sections: &str) -> String {
        respond_optional("Error interrupting gesture", self.inner.interrupt(sections))
    }
}

/// Zoom state for the scrollable stage element.
#[wasm_bindgen]
pub struct StageZoom {
    state: Rc<RefCell<ZoomState>>,
    last_cursor: Option<Point>,
}

fn stage_box(stage: &Element) -> StageBox {
    let r = stage.get_bounding_client_rect();
    StageBox { left: r.left(), top: r.top(), width: r.width(), height: r.height() }
}

#[wasm_bindgen]
impl StageZoom {
    #[wasm_bindgen(constructor)]
    pub fn new(config: &str) -> std::result::Result<StageZoom, JsValue> {
        let state = ZoomState::new(config).map_err(to_js_error)?;
        Ok(StageZoom { state: Rc::new(RefCell::new(state)), last_cursor: None })
    }

    pub fn state(&self) -> String {
        zoom_json(&self.state.borrow().snapshot())
    }

    /// Remember where the pointer is so toolbar zooms can anchor on it.
    pub fn track_cursor(&mut self, event: &MouseEvent, stage: &Element) {
        self.last_cursor = stage_box(stage).local(event.client_x() as f64, event.client_y() as f64);
    }

    pub fn forget_cursor(&mut self) {
        self.last_cursor = None;
    }

    pub fn zoom_in(&mut self, stage: &Element) -> String {
        let out = self.state.borrow_mut().zoom_in(self.last_cursor);
        self.after_toolbar(stage, out)
    }

    pub fn zoom_out(&mut self, stage: &Element) -> String {
        let out = self.state.borrow_mut().zoom_out(self.last_cursor);
        self.after_toolbar(stage, out)
    }

    pub fn reset(&mut self, stage: &Element) -> String {
        let out = self.state.borrow_mut().reset(self.last_cursor);
        self.after_toolbar(stage, out)
    }

    pub fn set_percent(&mut self, percent: f64, stage: &Element) -> String {
        let out = self.state.borrow_mut().set_percent(percent, self.last_cursor);
        self.after_toolbar(stage, out)
    }

    /// Wheel handler for the stage. Returns `true` if the event zoomed, in
    /// which case default scrolling has been prevented.
    pub fn handle_wheel(&mut self, event: &WheelEvent, stage: &Element) -> bool {
        let input = WheelInput {
            client_x: event.client_x() as f64,
            client_y: event.client_y() as f64,
            delta_y: event.delta_y(),
            zoom_modifier: event.ctrl_key() || event.meta_key(),
        };
        let bounds = stage_box(stage);

        let dom_scroll = Point { x: stage.scroll_left() as f64, y: stage.scroll_top() as f64 };

        let zoomed = self.state.borrow_mut().wheel(&input, &bounds, dom_scroll).is_some();
        if zoomed {
            event.prevent_default();
            self.schedule_scroll(stage);
        }
        zoomed
    }

    fn after_toolbar(&self, stage: &Element, out: ZoomOutput) -> String {
        if out.pending_scroll.is_some() {
            self.schedule_scroll(stage);
        }
        zoom_json(&out)
    }

    /// Apply the pending scroll correction once the scaled content has been
    /// laid out, i.e. on the next animation frame.
    fn schedule_scroll(&self, stage: &Element) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let state = Rc::clone(&self.state);
        let stage = stage.clone();
        let callback: js_sys::Function = Closure::once_into_js(move || {
            if let Some(scroll) = state.borrow_mut().frame() {
                stage.set_scroll_left(scroll.x.round() as i32);
                stage.set_scroll_top(scroll.y.round() as i32);
            }
        })
        .unchecked_into();
        if let Err(e) = window.request_animation_frame(&callback) {
            console_error(&format!("Error scheduling scroll correction: {e:?}"));
        }
    }
}
