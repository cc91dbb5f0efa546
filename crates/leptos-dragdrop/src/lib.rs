//! Leptos DragDrop Utilities
//!
//! Handle-driven list reordering using pointer events.
//! A drag starts only from a handle, reorders locally while the pointer
//! passes over other rows, and ends on a document-level pointer release.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Reorder gesture state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture<K> {
    /// No gesture in progress
    Idle,
    /// Pointer is down on the handle of `key`
    Dragging { key: K },
    /// Pointer released, final order is being persisted
    Committing,
}

impl<K> Default for Gesture<K> {
    fn default() -> Self {
        Gesture::Idle
    }
}

impl<K: Copy + PartialEq> Gesture<K> {
    /// Begin dragging `key`. Allowed while a previous commit is in flight,
    /// refused while another drag is still active.
    pub fn start(self, key: K) -> Option<Self> {
        match self {
            Gesture::Idle | Gesture::Committing => Some(Gesture::Dragging { key }),
            Gesture::Dragging { .. } => None,
        }
    }

    /// Key being dragged, if any
    pub fn dragging(&self) -> Option<K> {
        match self {
            Gesture::Dragging { key } => Some(*key),
            _ => None,
        }
    }

    /// Pointer released. Returns the next state and the dragged key when a
    /// drag was actually active.
    pub fn release(self) -> (Self, Option<K>) {
        match self {
            Gesture::Dragging { key } => (Gesture::Committing, Some(key)),
            other => (other, None),
        }
    }

    /// Commit finished. A drag started meanwhile is left alone.
    pub fn settle(self) -> Self {
        match self {
            Gesture::Committing => Gesture::Idle,
            other => other,
        }
    }
}

/// Move the item keyed `dragged` into the slot currently held by `over`.
/// Returns false when nothing moved (same slot or unknown key).
pub fn reorder_by_key<T, K, F>(items: &mut Vec<T>, key_of: F, dragged: K, over: K) -> bool
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let from = items.iter().position(|item| key_of(item) == dragged);
    let to = items.iter().position(|item| key_of(item) == over);
    match (from, to) {
        (Some(from), Some(to)) if from != to => {
            let item = items.remove(from);
            items.insert(to, item);
            true
        }
        _ => false,
    }
}

/// Capability to observe the end of a pointer gesture anywhere on the page
pub trait GestureObserver {
    fn on_gesture_end(&self, handler: Box<dyn Fn()>);
}

/// Observes `pointerup` on the document, so releases outside the list count
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowGestures;

impl GestureObserver for WindowGestures {
    fn on_gesture_end(&self, handler: Box<dyn Fn()>) {
        let on_pointerup = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |_ev: web_sys::PointerEvent| {
            handler();
        });

        if let Some(win) = web_sys::window() {
            if let Some(doc) = win.document() {
                let _ = doc.add_event_listener_with_callback("pointerup", on_pointerup.as_ref().unchecked_ref());
            }
        }
        on_pointerup.forget();
    }
}

/// Create pointerdown handler for a drag handle.
/// Primary button only. Releases the implicit touch capture so the
/// rows under the pointer keep receiving pointerenter.
pub fn make_on_handle_pointerdown<F>(on_start: F) -> impl Fn(web_sys::PointerEvent) + Clone + 'static
where
    F: Fn() + Clone + 'static,
{
    move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        if let Some(target) = ev.target() {
            if let Some(el) = target.dyn_ref::<web_sys::Element>() {
                if el.has_pointer_capture(ev.pointer_id()) {
                    let _ = el.release_pointer_capture(ev.pointer_id());
                }
            }
        }
        on_start();
    }
}

/// Create pointerenter handler for a row
pub fn make_on_row_pointerenter<F>(on_over: F) -> impl Fn(web_sys::PointerEvent) + Clone + 'static
where
    F: Fn() + Clone + 'static,
{
    move |_ev: web_sys::PointerEvent| on_over()
}
