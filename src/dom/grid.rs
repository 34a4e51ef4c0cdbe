//! [`GridView`](crate::view::GridView) over a live `<table>`.
//!
//! Header and body cells are captured once as elements and never rebuilt:
//! rendering re-appends the existing nodes in model order, so attributes,
//! inline markup and event handlers on cells survive every reorder and
//! sort. Proxies are deep clones of the live cells stacked in a detached
//! `<table>` appended to `<body>`.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlCollection, HtmlElement, HtmlTableElement, HtmlTableRowElement,
    HtmlTableSectionElement, Window,
};

use crate::config::ClassNames;
use crate::error::{DragTableError, Result};
use crate::types::{ColumnBox, ColumnContent, ColumnId, GridModel, Point, Rect};
use crate::view::{Geometry, GridRenderer, GridSource, ProxyId, ProxyLayer};

/// Elements of `collection` that are of type `T`, in order
fn elements<T: JsCast>(collection: &HtmlCollection) -> Vec<T> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .filter_map(|e| e.dyn_into::<T>().ok())
        .collect()
}

/// Parse a computed CSS length such as `"98.5px"`
fn px(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .unwrap_or(0.0)
}

fn text(element: &Element) -> String {
    element.text_content().unwrap_or_default()
}

pub struct DomGrid {
    window: Window,
    document: Document,
    table: HtmlTableElement,
    header_row: HtmlTableRowElement,
    body: HtmlTableSectionElement,
    /// Header cells by column id
    headers: Vec<HtmlElement>,
    /// Body rows by origin
    rows: Vec<HtmlTableRowElement>,
    /// Body cells by row origin, then column id
    cells: Vec<Vec<HtmlElement>>,
    /// Column id per slot as of the last render
    column_order: Vec<ColumnId>,
    /// Row origin per position as of the last render
    row_order: Vec<usize>,
    proxies: Vec<Option<HtmlTableElement>>,
    classes: ClassNames,
}

impl DomGrid {
    /// Capture the header row of `<thead>` and the rows of the first `<tbody>`.
    ///
    /// # Errors
    /// Returns [`DragTableError::Dom`] if either section is missing.
    pub fn new(
        window: Window,
        document: Document,
        table: HtmlTableElement,
        classes: ClassNames,
    ) -> Result<Self> {
        let header_row = table
            .t_head()
            .and_then(|head| head.rows().item(0))
            .and_then(|row| row.dyn_into::<HtmlTableRowElement>().ok())
            .ok_or_else(|| DragTableError::Dom("table has no <thead> row".to_string()))?;
        let body = table
            .t_bodies()
            .item(0)
            .and_then(|b| b.dyn_into::<HtmlTableSectionElement>().ok())
            .ok_or_else(|| DragTableError::Dom("table has no <tbody>".to_string()))?;

        let headers: Vec<HtmlElement> = elements(&header_row.cells());
        let rows: Vec<HtmlTableRowElement> = elements(&body.rows());
        let cells = rows.iter().map(|row| elements(&row.cells())).collect();

        Ok(Self {
            window,
            document,
            column_order: (0..headers.len()).map(ColumnId).collect(),
            row_order: (0..rows.len()).collect(),
            table,
            header_row,
            body,
            headers,
            rows,
            cells,
            proxies: Vec::new(),
            classes,
        })
    }

    pub fn table(&self) -> &HtmlTableElement {
        &self.table
    }

    fn scroll(&self) -> Point {
        Point::new(
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        )
    }

    /// Bounding rectangle of `element` in page coordinates
    fn page_rect(&self, element: &Element) -> Rect {
        let r = element.get_bounding_client_rect();
        let s = self.scroll();
        Rect::new(r.left() + s.x, r.top() + s.y, r.right() + s.x, r.bottom() + s.y)
    }

    fn computed(&self, element: &Element, property: &str) -> Result<String> {
        let style = self
            .window
            .get_computed_style(element)?
            .ok_or_else(|| DragTableError::Dom("no computed style".to_string()))?;
        Ok(style.get_property_value(property)?)
    }

    fn header_at(&self, slot: usize) -> Result<&HtmlElement> {
        self.column_order
            .get(slot)
            .and_then(|id| self.headers.get(id.0))
            .ok_or(DragTableError::ColumnOutOfRange {
                index: slot,
                count: self.column_order.len(),
            })
    }

    fn cell(&self, origin: usize, id: ColumnId) -> Result<&HtmlElement> {
        self.cells
            .get(origin)
            .and_then(|row| row.get(id.0))
            .ok_or_else(|| DragTableError::Dom(format!("no cell for row {origin}, column {}", id.0)))
    }

    fn proxy(&self, proxy: ProxyId) -> Result<&HtmlTableElement> {
        self.proxies
            .get(proxy.0)
            .and_then(Option::as_ref)
            .ok_or_else(|| DragTableError::Dom(format!("unknown proxy {}", proxy.0)))
    }

    /// Append a one-cell row holding a deep clone of `cell` to `proxy`
    fn append_clone(&self, proxy: &HtmlTableElement, cell: &HtmlElement) -> Result<()> {
        let tr = self.document.create_element("tr")?;
        tr.append_child(&cell.clone_node_with_deep(true)?)?;
        proxy.append_child(&tr)?;
        Ok(())
    }
}

impl GridSource for DomGrid {
    fn header_texts(&self) -> Result<Vec<String>> {
        Ok(elements::<Element>(&self.header_row.cells())
            .iter()
            .map(text)
            .collect())
    }

    fn row_texts(&self) -> Result<Vec<Vec<String>>> {
        Ok(elements::<HtmlTableRowElement>(&self.body.rows())
            .iter()
            .map(|row| elements::<Element>(&row.cells()).iter().map(text).collect())
            .collect())
    }
}

impl Geometry for DomGrid {
    fn grid_rect(&self) -> Result<Rect> {
        Ok(self.page_rect(&self.table))
    }

    fn header_rect(&self, slot: usize) -> Result<Rect> {
        Ok(self.page_rect(self.header_at(slot)?))
    }

    fn proxy_rect(&self, proxy: ProxyId) -> Result<Rect> {
        Ok(self.page_rect(self.proxy(proxy)?))
    }

    fn proxy_box(&self, proxy: ProxyId) -> Result<ColumnBox> {
        let element = self.proxy(proxy)?;
        let width = px(&self.computed(element, "width")?);
        let border = px(&self.computed(element, "border-left-width")?);
        Ok(ColumnBox::new(width, border))
    }
}

impl ProxyLayer for DomGrid {
    fn create_proxy(&mut self, content: &ColumnContent, at: Point) -> Result<ProxyId> {
        let id = content.header.id;
        let proxy = self
            .document
            .create_element("table")?
            .dyn_into::<HtmlTableElement>()
            .map_err(|_| DragTableError::Dom("created element is not a table".to_string()))?;
        proxy.class_list().add_1(&self.classes.column)?;

        let header = self
            .headers
            .get(id.0)
            .ok_or_else(|| DragTableError::Dom(format!("no header for column {}", id.0)))?;
        self.append_clone(&proxy, header)?;
        for &origin in &self.row_order {
            self.append_clone(&proxy, self.cell(origin, id)?)?;
        }

        let style = proxy.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", &format!("{}px", at.x))?;
        style.set_property("top", &format!("{}px", at.y))?;
        self.document
            .body()
            .ok_or_else(|| DragTableError::Dom("document has no <body>".to_string()))?
            .append_child(&proxy)?;

        self.proxies.push(Some(proxy));
        Ok(ProxyId(self.proxies.len() - 1))
    }

    fn mark_dragging(&mut self, proxy: ProxyId) -> Result<()> {
        self.proxy(proxy)?.class_list().add_1(&self.classes.dragging)?;
        Ok(())
    }

    fn place_proxy(&mut self, proxy: ProxyId, at: Point) -> Result<()> {
        let style = self.proxy(proxy)?.style();
        style.set_property("left", &format!("{}px", at.x))?;
        style.set_property("top", &format!("{}px", at.y))?;
        Ok(())
    }

    fn remove_proxy(&mut self, proxy: ProxyId) -> Result<()> {
        let element = self
            .proxies
            .get_mut(proxy.0)
            .and_then(Option::take)
            .ok_or_else(|| DragTableError::Dom(format!("unknown proxy {}", proxy.0)))?;
        element.remove();
        // Ids restart from zero once the last proxy of a drag is gone
        if self.proxies.iter().all(Option::is_none) {
            self.proxies.clear();
        }
        Ok(())
    }

    fn set_grid_hidden(&mut self, hidden: bool) -> Result<()> {
        let style = self.table.style();
        if hidden {
            style.set_property("display", "none")?;
        } else {
            style.remove_property("display")?;
        }
        Ok(())
    }
}

impl GridRenderer for DomGrid {
    fn render(&mut self, grid: &GridModel) -> Result<()> {
        let order = grid.column_order();
        for header in grid.headers() {
            let element = self
                .headers
                .get(header.id.0)
                .ok_or_else(|| DragTableError::Dom(format!("no header for column {}", header.id.0)))?;
            let classes = element.class_list();
            for class in self.classes.indicators() {
                classes.remove_1(class)?;
            }
            classes.add_1(self.classes.for_state(header.sort))?;
            self.header_row.append_child(element)?;
        }

        for row in grid.rows() {
            let tr = self
                .rows
                .get(row.origin)
                .ok_or_else(|| DragTableError::Dom(format!("no row {}", row.origin)))?;
            for &id in &order {
                tr.append_child(self.cell(row.origin, id)?)?;
            }
            self.body.append_child(tr)?;
        }

        self.column_order = order;
        self.row_order = grid.rows().iter().map(|r| r.origin).collect();
        Ok(())
    }

    fn pin_column_size(&mut self, slot: usize) -> Result<()> {
        let header = self.header_at(slot)?;
        let width = self.computed(header, "width")?;
        let height = self.computed(header, "height")?;
        header.style().set_property("width", &width)?;
        header.style().set_property("height", &height)?;

        let id = self
            .column_order
            .get(slot)
            .copied()
            .ok_or(DragTableError::ColumnOutOfRange {
                index: slot,
                count: self.column_order.len(),
            })?;
        for &origin in &self.row_order {
            let cell = self.cell(origin, id)?;
            let height = self.computed(cell, "height")?;
            cell.style().set_property("height", &height)?;
        }
        Ok(())
    }
}
