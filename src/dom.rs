//! Browser adapters for the scroll core (wasm32 only).
//!
//! Provides the DOM-backed [`ViewportControl`] implementation and the event
//! listener wiring that feeds raw browser gestures into the coordination
//! core. Listeners are attached once at construction and kept alive by
//! holding their closures; `detach` removes everything.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element, Event, TouchEvent, WheelEvent};

use crate::channel::ScrollChannel;
use crate::input::touch::TouchPoint;
use crate::input::wheel::WheelInput;
use crate::pane::RenderPane;
use crate::viewport::ViewportControl;

// Timing helper for throttling and touch velocity.
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

#[allow(clippy::cast_possible_truncation)]
fn narrow(value: f64) -> f32 {
    value as f32
}

#[allow(clippy::cast_possible_truncation)]
fn to_px(value: f32) -> i32 {
    value.round() as i32
}

/// Convert a browser wheel event into canonical notch units. Browsers
/// disagree on `deltaMode`: pixel-mode deltas arrive in (roughly) 120px
/// notches, line mode in 3-line notches, page mode maps one page to one
/// notch.
pub fn normalize_wheel_event(event: &WheelEvent) -> WheelInput {
    let divisor = match event.delta_mode() {
        WheelEvent::DOM_DELTA_LINE => 3.0,
        WheelEvent::DOM_DELTA_PAGE => 1.0,
        _ => 120.0,
    };
    WheelInput {
        delta_x: narrow(event.delta_x() / divisor),
        delta_y: narrow(event.delta_y() / divisor),
    }
}

fn touch_point(event: &TouchEvent) -> Option<TouchPoint> {
    let touch = event.target_touches().get(0)?;
    Some(TouchPoint {
        screen_x: narrow(f64::from(touch.screen_x())),
        screen_y: narrow(f64::from(touch.screen_y())),
    })
}

/// [`ViewportControl`] backed by a DOM element's native scroll properties.
pub struct ElementViewport {
    element: Element,
}

impl ElementViewport {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl ViewportControl for ElementViewport {
    fn scroll_top(&self) -> f32 {
        self.element.scroll_top() as f32
    }

    fn set_scroll_top(&mut self, value: f32) {
        self.element.set_scroll_top(to_px(value));
    }

    fn scroll_left(&self) -> f32 {
        self.element.scroll_left() as f32
    }

    fn set_scroll_left(&mut self, value: f32) {
        self.element.set_scroll_left(to_px(value));
    }

    fn viewport_width(&self) -> f32 {
        self.element.client_width() as f32
    }

    fn viewport_height(&self) -> f32 {
        self.element.client_height() as f32
    }

    fn scroll_width(&self) -> f32 {
        self.element.scroll_width() as f32
    }
}

/// DOM event wiring for one pane: wheel and touchstart on the pane root,
/// touchmove/touchend/touchcancel at document level so a drag keeps tracking
/// when the finger leaves the pane, and the viewport's native scroll
/// publication.
pub struct PaneListeners {
    root: Element,
    viewport: Element,
    document: Document,
    wheel_closure: Closure<dyn FnMut(WheelEvent)>,
    touch_start_closure: Closure<dyn FnMut(TouchEvent)>,
    touch_move_closure: Closure<dyn FnMut(TouchEvent)>,
    touch_end_closure: Closure<dyn FnMut(TouchEvent)>,
    scroll_closure: Closure<dyn FnMut(Event)>,
}

impl PaneListeners {
    /// Attach all listeners. Wheel and touchmove are registered non-passive
    /// so the core's interception decisions can call `preventDefault`.
    ///
    /// # Errors
    /// Fails when the document is unavailable or a listener cannot be added.
    pub fn attach(
        root: &Element,
        viewport: &Element,
        pane: &Rc<RefCell<RenderPane>>,
        channel: &ScrollChannel,
    ) -> Result<Self, JsValue> {
        console_error_panic_hook::set_once();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("document unavailable"))?;

        let wheel_closure = {
            let weak = Rc::downgrade(pane);
            let channel = channel.clone();
            Closure::wrap(Box::new(move |event: WheelEvent| {
                let Some(pane) = weak.upgrade() else {
                    return;
                };
                let scroll = { pane.borrow().wheel_scroll(normalize_wheel_event(&event)) };
                if let Some(scroll) = scroll {
                    if scroll.intercept {
                        event.prevent_default();
                        channel.publish_throttled(&scroll.event, now_ms());
                    }
                }
            }) as Box<dyn FnMut(WheelEvent)>)
        };

        let touch_start_closure = {
            let weak = Rc::downgrade(pane);
            Closure::wrap(Box::new(move |event: TouchEvent| {
                let Some(pane) = weak.upgrade() else {
                    return;
                };
                let Some(point) = touch_point(&event) else {
                    return;
                };
                pane.borrow_mut().touch_start(point, now_ms());
            }) as Box<dyn FnMut(TouchEvent)>)
        };

        let touch_move_closure = {
            let weak = Rc::downgrade(pane);
            let channel = channel.clone();
            Closure::wrap(Box::new(move |event: TouchEvent| {
                let Some(pane) = weak.upgrade() else {
                    return;
                };
                let Some(point) = touch_point(&event) else {
                    return;
                };
                let scroll = { pane.borrow_mut().touch_move(point) };
                if let Some(scroll) = scroll {
                    if scroll.suppress_native {
                        event.prevent_default();
                    }
                    channel.publish(&scroll.event);
                }
            }) as Box<dyn FnMut(TouchEvent)>)
        };

        let touch_end_closure = {
            let weak = Rc::downgrade(pane);
            Closure::wrap(Box::new(move |_event: TouchEvent| {
                let Some(pane) = weak.upgrade() else {
                    return;
                };
                let _ = pane.borrow_mut().touch_end(now_ms());
            }) as Box<dyn FnMut(TouchEvent)>)
        };

        let scroll_closure = {
            let weak = Rc::downgrade(pane);
            let channel = channel.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                let Some(pane) = weak.upgrade() else {
                    return;
                };
                let scroll_event = { pane.borrow().viewport_scroll_event() };
                if !scroll_event.is_empty() {
                    channel.publish(&scroll_event);
                }
            }) as Box<dyn FnMut(Event)>)
        };

        let non_passive = AddEventListenerOptions::new();
        non_passive.set_passive(false);

        root.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            wheel_closure.as_ref().unchecked_ref(),
            &non_passive,
        )?;
        root.add_event_listener_with_callback(
            "touchstart",
            touch_start_closure.as_ref().unchecked_ref(),
        )?;
        document.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            touch_move_closure.as_ref().unchecked_ref(),
            &non_passive,
        )?;
        document.add_event_listener_with_callback(
            "touchend",
            touch_end_closure.as_ref().unchecked_ref(),
        )?;
        document.add_event_listener_with_callback(
            "touchcancel",
            touch_end_closure.as_ref().unchecked_ref(),
        )?;
        viewport
            .add_event_listener_with_callback("scroll", scroll_closure.as_ref().unchecked_ref())?;

        Ok(Self {
            root: root.clone(),
            viewport: viewport.clone(),
            document,
            wheel_closure,
            touch_start_closure,
            touch_move_closure,
            touch_end_closure,
            scroll_closure,
        })
    }

    /// Remove every listener added by [`attach`].
    ///
    /// [`attach`]: PaneListeners::attach
    pub fn detach(&self) {
        let _ = self.root.remove_event_listener_with_callback(
            "wheel",
            self.wheel_closure.as_ref().unchecked_ref(),
        );
        let _ = self.root.remove_event_listener_with_callback(
            "touchstart",
            self.touch_start_closure.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "touchmove",
            self.touch_move_closure.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "touchend",
            self.touch_end_closure.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "touchcancel",
            self.touch_end_closure.as_ref().unchecked_ref(),
        );
        let _ = self.viewport.remove_event_listener_with_callback(
            "scroll",
            self.scroll_closure.as_ref().unchecked_ref(),
        );
    }
}

/// Export a pane's diagnostics snapshot as a JS object.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn diagnostics_to_js(pane: &RenderPane) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&pane.diagnostics())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
