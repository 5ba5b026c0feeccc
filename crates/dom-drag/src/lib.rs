//! DOM Drag Utilities
//!
//! Mouse-event plumbing for dragging a floating element by a handle.
//! Geometry and state live with the caller; this crate only reads the DOM
//! and forwards pointer coordinates.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Pointer position in client pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

impl PointerPos {
    pub fn from_event(ev: &web_sys::MouseEvent) -> Self {
        Self {
            x: f64::from(ev.client_x()),
            y: f64::from(ev.client_y()),
        }
    }
}

/// Element box in client pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Bounding box of an element
pub fn element_box(el: &web_sys::Element) -> ElementBox {
    let rect = el.get_bounding_client_rect();
    ElementBox {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

/// Window inner size, `(width, height)`
pub fn viewport_size() -> Option<(f64, f64)> {
    let win = web_sys::window()?;
    let width = win.inner_width().ok()?.as_f64()?;
    let height = win.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

/// Create mousedown handler for a drag handle.
/// Primary button only; suppresses text selection.
pub fn make_on_handle_mousedown<F>(on_start: F) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    F: Fn(PointerPos) + Clone + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            ev.prevent_default();
            on_start(PointerPos::from_event(&ev));
        }
    }
}

fn bind_document_mouse<F>(event: &str, handler: F)
where
    F: FnMut(web_sys::MouseEvent) + 'static,
{
    let callback = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(handler);
    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
    }
    // Lives as long as the page
    callback.forget();
}

/// Bind document-level mousemove; the handler decides whether a drag is active
pub fn bind_global_mousemove<F>(on_move: F)
where
    F: Fn(PointerPos) + 'static,
{
    bind_document_mouse("mousemove", move |ev| on_move(PointerPos::from_event(&ev)));
}

/// Bind document-level mouseup
pub fn bind_global_mouseup<F>(on_up: F)
where
    F: Fn() + 'static,
{
    bind_document_mouse("mouseup", move |_ev| on_up());
}
