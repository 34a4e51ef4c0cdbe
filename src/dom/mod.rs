//! Browser binding: `new DragTable("#grid", options)`.
//!
//! Press and click listeners live on the table for its whole lifetime.
//! Move and release listeners are added to the document when a header is
//! pressed and removed again once the table is back to idle, so only one
//! interaction is ever in flight.

mod grid;

pub use grid::DomGrid;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlTableCellElement, HtmlTableElement, MouseEvent,
    Node, TouchEvent,
};

use crate::config::TableConfig;
use crate::error::DragTableError;
use crate::table::Table;
use crate::types::{Point, PointerEvent, PointerPhase};

type Listener = Closure<dyn FnMut(Event)>;

/// Page position of a mouse or touch event.
///
/// Touch uses the first active touch, or the first changed touch on
/// `touchend` when no touch is active any more.
fn event_position(event: &Event) -> Option<Point> {
    let kind = event.type_();
    if kind.starts_with("touch") {
        let touch_event: &TouchEvent = event.unchecked_ref();
        let list = if kind == "touchend" {
            touch_event.changed_touches()
        } else {
            touch_event.touches()
        };
        let touch = list.item(0)?;
        return Some(Point::new(f64::from(touch.page_x()), f64::from(touch.page_y())));
    }
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(Point::new(f64::from(mouse.page_x()), f64::from(mouse.page_y())))
}

fn listen(target: &EventTarget, kind: &str, listener: &Listener) {
    if let Err(e) = target.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
    {
        log::warn!("failed to add {kind} listener: {e:?}");
    }
}

fn unlisten(target: &EventTarget, kind: &str, listener: &Listener) {
    if let Err(e) =
        target.remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
    {
        log::warn!("failed to remove {kind} listener: {e:?}");
    }
}

/// State reachable from the listeners
struct Shared {
    table: RefCell<Table<DomGrid>>,
    element: HtmlTableElement,
    document: Document,
    /// Document-level move and release listeners
    tracking: RefCell<Vec<(&'static str, Listener)>>,
    attached: Cell<bool>,
}

impl Shared {
    /// Slot of the header cell `event` targets, if it belongs to this table
    fn header_slot(&self, event: &Event) -> Option<usize> {
        let target = event.target()?.dyn_into::<Element>().ok()?;
        let th = target.closest("th").ok()??;
        let node: &Node = th.as_ref();
        if !self.element.contains(Some(node)) {
            return None;
        }
        let index = th.dyn_ref::<HtmlTableCellElement>()?.cell_index();
        usize::try_from(index).ok()
    }

    fn pointer(&self, event: PointerEvent) {
        match self.table.try_borrow_mut() {
            Ok(mut table) => {
                table.pointer(event);
            }
            Err(_) => log::warn!("pointer {:?} while the table is busy", event.phase),
        }
        self.sync_tracking();
    }

    /// Attach the document listeners while a press is live, detach otherwise
    fn sync_tracking(&self) {
        let Ok(interacting) = self.table.try_borrow().map(|t| t.is_interacting()) else {
            return;
        };
        if interacting == self.attached.get() {
            return;
        }
        let Ok(listeners) = self.tracking.try_borrow() else {
            return;
        };
        for (kind, listener) in listeners.iter() {
            if interacting {
                listen(&self.document, kind, listener);
            } else {
                unlisten(&self.document, kind, listener);
            }
        }
        self.attached.set(interacting);
        log::trace!("document listeners attached: {interacting}");
    }

    fn on_press(&self, event: &Event) {
        let Some(position) = event_position(event) else {
            return;
        };
        let header = self.header_slot(event);
        if header.is_some() && event.type_() == "mousedown" {
            // Keeps the browser from starting a text selection
            event.prevent_default();
        }
        self.pointer(PointerEvent {
            phase: PointerPhase::Down,
            position,
            header,
        });
    }

    fn on_click(&self, event: &Event) {
        let Some(slot) = self.header_slot(event) else {
            return;
        };
        let result = match self.table.try_borrow_mut() {
            Ok(mut table) => table.click(slot),
            Err(_) => Err(DragTableError::Other("table is busy".to_string())),
        };
        if let Err(e) = result {
            log::warn!("sort on header {slot} failed: {e}");
        }
    }
}

/// A `<table>` with draggable columns and sortable rows
#[wasm_bindgen]
pub struct DragTable {
    shared: Rc<Shared>,
    /// Press and click listeners on the table element
    own: Vec<(&'static str, Listener)>,
}

impl DragTable {
    fn listener(weak: &Weak<Shared>, handler: fn(&Shared, &Event)) -> Listener {
        let weak = weak.clone();
        Closure::wrap(Box::new(move |event: Event| {
            if let Some(shared) = weak.upgrade() {
                handler(&shared, &event);
            }
        }) as Box<dyn FnMut(Event)>)
    }

    fn with_table<T>(&self, f: impl FnOnce(&mut Table<DomGrid>) -> T) -> Result<T, JsValue> {
        let mut table = self
            .shared
            .table
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("table is busy"))?;
        Ok(f(&mut table))
    }
}

#[wasm_bindgen]
impl DragTable {
    /// Attach to the first `<table>` matching `selector`.
    ///
    /// `options` is an optional object with `dragThreshold`,
    /// `comparePolicy` (`"legacy"` or `"numeric"`), `classes` and
    /// `logLevel`.
    #[wasm_bindgen(constructor)]
    pub fn new(selector: &str, options: JsValue) -> Result<DragTable, JsValue> {
        console_error_panic_hook::set_once();
        let config = TableConfig::from_js(options)?;
        crate::logging::init_console(config.log_level);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let element = document
            .query_selector(selector)?
            .ok_or_else(|| DragTableError::Dom(format!("nothing matches {selector:?}")))?
            .dyn_into::<HtmlTableElement>()
            .map_err(|_| DragTableError::Dom(format!("{selector:?} is not a <table>")))?;

        let view = DomGrid::new(window, document.clone(), element.clone(), config.classes.clone())?;
        let table = Table::new(view, config)?;

        let shared = Rc::new(Shared {
            table: RefCell::new(table),
            element,
            document,
            tracking: RefCell::new(Vec::new()),
            attached: Cell::new(false),
        });
        let weak = Rc::downgrade(&shared);

        let on_move: fn(&Shared, &Event) = |shared, event| {
            if let Some(position) = event_position(event) {
                shared.pointer(PointerEvent::moved(position));
            }
        };
        let on_release: fn(&Shared, &Event) = |shared, event| {
            let position = event_position(event).unwrap_or_default();
            shared.pointer(PointerEvent::up(position));
        };
        *shared.tracking.borrow_mut() = vec![
            ("mousemove", Self::listener(&weak, on_move)),
            ("touchmove", Self::listener(&weak, on_move)),
            ("mouseup", Self::listener(&weak, on_release)),
            ("touchend", Self::listener(&weak, on_release)),
        ];

        let own = vec![
            ("mousedown", Self::listener(&weak, Shared::on_press)),
            ("touchstart", Self::listener(&weak, Shared::on_press)),
            ("click", Self::listener(&weak, Shared::on_click)),
        ];
        for (kind, listener) in &own {
            listen(&shared.element, kind, listener);
        }

        Ok(DragTable { shared, own })
    }

    /// Original column indices in current left-to-right order
    #[wasm_bindgen(js_name = "columnOrder")]
    pub fn column_order(&self) -> Result<JsValue, JsValue> {
        let order = self.with_table(|t| t.column_order())?;
        serde_wasm_bindgen::to_value(&order)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// `"unsorted"`, `"ascending"` or `"descending"` per header, left to right
    #[wasm_bindgen(js_name = "sortStates")]
    pub fn sort_states(&self) -> Result<JsValue, JsValue> {
        let states = self.with_table(|t| t.sort_states())?;
        serde_wasm_bindgen::to_value(&states)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Same as clicking the header at `slot`
    pub fn sort(&self, slot: usize) -> Result<JsValue, JsValue> {
        let state = self.with_table(|t| t.click(slot))??;
        serde_wasm_bindgen::to_value(&state)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    #[wasm_bindgen(js_name = "moveColumn")]
    pub fn move_column(&self, from: usize, to: usize) -> Result<(), JsValue> {
        self.with_table(|t| t.move_column(from, to))??;
        Ok(())
    }

    /// Unsort every header and restore the original row order
    pub fn reset(&self) -> Result<(), JsValue> {
        self.with_table(Table::reset)??;
        self.shared.sync_tracking();
        Ok(())
    }

    #[wasm_bindgen(js_name = "isDragging")]
    pub fn is_dragging(&self) -> bool {
        self.with_table(|t| t.controller().is_dragging())
            .unwrap_or(false)
    }
}

impl Drop for DragTable {
    fn drop(&mut self) {
        for (kind, listener) in &self.own {
            unlisten(&self.shared.element, kind, listener);
        }
        if self.shared.attached.get() {
            if let Ok(listeners) = self.shared.tracking.try_borrow() {
                for (kind, listener) in listeners.iter() {
                    unlisten(&self.shared.document, kind, listener);
                }
            }
        }
    }
}
