//! Browser tests for the DOM binding.
//!
//! Run with: wasm-pack test --headless --firefox

#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::cast_possible_truncation
)]

use dragtable::{ColumnId, DragTable, SortState};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, MouseEvent, MouseEventInit, Touch,
    TouchEvent, TouchEventInit, TouchInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Insert a fresh table with the given id and return its selector
fn mount(id: &str) -> String {
    let doc = document();
    let holder = doc.create_element("div").unwrap();
    holder.set_inner_html(&format!(
        "<table id=\"{id}\">\
           <thead><tr><th>name</th><th>score</th></tr></thead>\
           <tbody>\
             <tr><td>carol</td><td>3</td></tr>\
             <tr><td>alice</td><td>1</td></tr>\
             <tr><td>bob</td><td>2</td></tr>\
           </tbody>\
         </table>"
    ));
    doc.body().unwrap().append_child(&holder).unwrap();
    format!("#{id}")
}

fn texts(selector: &str) -> Vec<String> {
    let nodes = document().query_selector_all(selector).unwrap();
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .map(|n| n.text_content().unwrap_or_default())
        .collect()
}

#[wasm_bindgen_test]
fn sort_reorders_body_rows() {
    let selector = mount("sorted");
    let table = DragTable::new(&selector, JsValue::UNDEFINED).unwrap();

    table.sort(1).unwrap();
    assert_eq!(
        texts("#sorted tbody td:first-child"),
        vec!["alice", "bob", "carol"]
    );
    let up = document()
        .query_selector("#sorted thead th:nth-child(2)")
        .unwrap()
        .unwrap();
    assert!(up.class_list().contains("up"));

    table.sort(1).unwrap();
    assert_eq!(
        texts("#sorted tbody td:first-child"),
        vec!["carol", "bob", "alice"]
    );
    assert!(!table.is_dragging());
}

#[wasm_bindgen_test]
fn move_column_moves_cells() {
    let selector = mount("moved");
    let table = DragTable::new(&selector, JsValue::UNDEFINED).unwrap();

    table.move_column(1, 0).unwrap();
    assert_eq!(texts("#moved thead th"), vec!["score", "name"]);
    assert_eq!(texts("#moved tbody td:first-child"), vec!["3", "1", "2"]);

    table.sort(0).unwrap();
    table.reset().unwrap();
    assert_eq!(texts("#moved tbody td:last-child"), vec!["carol", "alice", "bob"]);
    assert_eq!(texts("#moved thead th"), vec!["score", "name"]);
}

#[wasm_bindgen_test]
fn rejects_missing_table() {
    assert!(DragTable::new("#nowhere", JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn rejects_bad_options() {
    let selector = mount("configured");
    let options = js_sys::JSON::parse(r#"{ "dragThreshold": -1 }"#).unwrap();
    assert!(DragTable::new(&selector, options).is_err());
}

// ============================================================================
// Pointer input
// ============================================================================

fn header(selector: &str, slot: usize) -> Element {
    document()
        .query_selector(&format!("{selector} thead th:nth-child({})", slot + 1))
        .unwrap()
        .unwrap()
}

fn center(element: &Element) -> (i32, i32) {
    let r = element.get_bounding_client_rect();
    (
        ((r.left() + r.right()) / 2.0).round() as i32,
        ((r.top() + r.bottom()) / 2.0).round() as i32,
    )
}

/// Page x a little past the right edge of the last header
fn past_right_edge(selector: &str, count: usize) -> i32 {
    header(selector, count - 1).get_bounding_client_rect().right().round() as i32 + 40
}

fn mouse(kind: &str, x: i32, y: i32) -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_client_x(x);
    init.set_client_y(y);
    MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
}

/// Dispatch `event`; false when a listener prevented the default action
fn fire(target: &EventTarget, event: &Event) -> bool {
    target.dispatch_event(event).unwrap()
}

/// Column proxies currently floating in `<body>`
fn proxy_count() -> u32 {
    document()
        .query_selector_all("body > table.column")
        .unwrap()
        .length()
}

fn column_order(table: &DragTable) -> Vec<ColumnId> {
    serde_wasm_bindgen::from_value(table.column_order().unwrap()).unwrap()
}

fn sort_states(table: &DragTable) -> Vec<SortState> {
    serde_wasm_bindgen::from_value(table.sort_states().unwrap()).unwrap()
}

fn display(selector: &str) -> String {
    let element: HtmlElement = document()
        .query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    element.style().get_property_value("display").unwrap()
}

#[wasm_bindgen_test]
fn mouse_drag_moves_column() {
    let selector = mount("mouse_drag");
    let table = DragTable::new(&selector, JsValue::UNDEFINED).unwrap();
    let doc = document();
    let (x, y) = center(&header(&selector, 0));
    let end = past_right_edge(&selector, 2);

    // Pressing a header suppresses text selection
    assert!(!fire(&header(&selector, 0), &mouse("mousedown", x, y)));
    assert!(!table.is_dragging());
    assert_eq!(proxy_count(), 0);

    fire(&doc, &mouse("mousemove", x, y + 10));
    assert!(table.is_dragging());
    assert_eq!(proxy_count(), 2);
    assert_eq!(display(&selector), "none");

    fire(&doc, &mouse("mousemove", end, y));
    fire(&doc, &mouse("mouseup", end, y));

    assert!(!table.is_dragging());
    assert_eq!(proxy_count(), 0);
    assert_eq!(display(&selector), "");
    assert_eq!(column_order(&table), vec![ColumnId(1), ColumnId(0)]);
    assert_eq!(texts("#mouse_drag thead th"), vec!["score", "name"]);
    assert_eq!(texts("#mouse_drag tbody td:first-child"), vec!["3", "1", "2"]);
    assert_eq!(
        texts("#mouse_drag tbody td:last-child"),
        vec!["carol", "alice", "bob"]
    );

    // Once idle the document no longer drives the table
    fire(&doc, &mouse("mousemove", x, y + 10));
    fire(&doc, &mouse("mouseup", x, y + 10));
    assert!(!table.is_dragging());
    assert_eq!(proxy_count(), 0);
    assert_eq!(column_order(&table), vec![ColumnId(1), ColumnId(0)]);

    // The click that ends the drag does not sort; the next one does
    let first = header(&selector, 0);
    fire(&first, &mouse("click", x, y));
    assert_eq!(sort_states(&table), vec![SortState::Unsorted; 2]);
    fire(&first, &mouse("click", x, y));
    assert_eq!(
        sort_states(&table),
        vec![SortState::Ascending, SortState::Unsorted]
    );
    assert_eq!(texts("#mouse_drag tbody td:first-child"), vec!["1", "2", "3"]);
}

#[wasm_bindgen_test]
fn mouse_jitter_is_a_click() {
    let selector = mount("mouse_jitter");
    let table = DragTable::new(&selector, JsValue::UNDEFINED).unwrap();
    let doc = document();
    let th = header(&selector, 1);
    let (x, y) = center(&th);

    fire(&th, &mouse("mousedown", x, y));
    for (dx, dy) in [(3, -3), (-3, 3), (2, 0)] {
        fire(&doc, &mouse("mousemove", x + dx, y + dy));
        assert!(!table.is_dragging());
        assert_eq!(proxy_count(), 0);
    }
    fire(&doc, &mouse("mouseup", x + 2, y));
    fire(&th, &mouse("click", x + 2, y));

    assert_eq!(column_order(&table), vec![ColumnId(0), ColumnId(1)]);
    assert_eq!(
        sort_states(&table),
        vec![SortState::Unsorted, SortState::Ascending]
    );
    assert_eq!(
        texts("#mouse_jitter tbody td:first-child"),
        vec!["alice", "bob", "carol"]
    );
}

fn touch_event(kind: &str, target: &EventTarget, at: Option<(i32, i32)>) -> Option<TouchEvent> {
    let init = TouchEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let list = js_sys::Array::new();
    if let Some((x, y)) = at {
        let point = TouchInit::new(1, target);
        point.set_client_x(f64::from(x));
        point.set_client_y(f64::from(y));
        point.set_page_x(f64::from(x));
        point.set_page_y(f64::from(y));
        list.push(&Touch::new(&point).ok()?);
    }
    if kind == "touchend" {
        init.set_changed_touches(&list);
    } else {
        init.set_touches(&list);
    }
    TouchEvent::new_with_event_init_dict(kind, &init).ok()
}

#[wasm_bindgen_test]
fn touch_drag_moves_column() {
    let selector = mount("touch_drag");
    let table = DragTable::new(&selector, JsValue::UNDEFINED).unwrap();
    let doc = document();
    let th = header(&selector, 0);
    let (x, y) = center(&th);
    let end = past_right_edge(&selector, 2);

    // Desktop browsers without touch support cannot build touch events
    let Some(start) = touch_event("touchstart", &th, Some((x, y))) else {
        return;
    };
    // Touch presses keep their default so the page can still scroll
    assert!(fire(&th, &start));

    fire(&doc, &touch_event("touchmove", &th, Some((x, y + 10))).unwrap());
    assert!(table.is_dragging());
    fire(&doc, &touch_event("touchmove", &th, Some((end, y))).unwrap());
    fire(&doc, &touch_event("touchend", &th, Some((end, y))).unwrap());

    assert!(!table.is_dragging());
    assert_eq!(proxy_count(), 0);
    assert_eq!(column_order(&table), vec![ColumnId(1), ColumnId(0)]);
    assert_eq!(texts("#touch_drag thead th"), vec!["score", "name"]);
    assert_eq!(texts("#touch_drag tbody td:first-child"), vec!["3", "1", "2"]);
}
