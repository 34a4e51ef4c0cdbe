//! Column proxies: one floating stack per column while a drag is live.

use crate::error::Result;
use crate::types::{ColumnBox, ColumnContent, GridModel};
use crate::view::{Geometry, ProxyId, ProxyLayer};

/// A captured column during a drag
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Current slot (0-based)
    pub index: usize,
    /// Header and cell content carried by the proxy
    pub content: ColumnContent,
    pub proxy: ProxyId,
    pub metrics: ColumnBox,
    /// Page y of the proxy's top edge; packing only moves proxies sideways
    pub top: f64,
    /// Distance from the grid's left edge to the proxy's left edge
    pub left_offset: f64,
    /// Page x of the proxy's horizontal midpoint
    pub center_x: f64,
}

/// Builds and tears down column proxies through the view layer
pub struct ColumnProxyFactory;

impl ColumnProxyFactory {
    /// Create one proxy per column, each placed over its header cell.
    ///
    /// If any step fails the proxies created so far are removed again.
    pub fn capture<V: Geometry + ProxyLayer>(
        view: &mut V,
        grid: &GridModel,
        grid_left: f64,
    ) -> Result<Vec<Column>> {
        let mut columns: Vec<Column> = Vec::with_capacity(grid.column_count());
        for slot in 0..grid.column_count() {
            match Self::capture_one(view, grid, slot, grid_left) {
                Ok(column) => columns.push(column),
                Err(e) => {
                    Self::discard(view, &columns);
                    return Err(e);
                }
            }
        }
        Ok(columns)
    }

    fn capture_one<V: Geometry + ProxyLayer>(
        view: &mut V,
        grid: &GridModel,
        slot: usize,
        grid_left: f64,
    ) -> Result<Column> {
        let content = grid.column(slot)?;
        let header = view.header_rect(slot)?;
        let proxy = view.create_proxy(&content, header.top_left())?;
        let (rect, metrics) = match (view.proxy_rect(proxy), view.proxy_box(proxy)) {
            (Ok(rect), Ok(metrics)) => (rect, metrics),
            (Err(e), _) | (_, Err(e)) => {
                let _ = view.remove_proxy(proxy);
                return Err(e);
            }
        };
        Ok(Column {
            index: slot,
            content,
            proxy,
            metrics,
            top: header.top,
            left_offset: rect.left - grid_left,
            center_x: rect.center_x(),
        })
    }

    /// Remove every proxy in `columns`; failures are logged and skipped
    pub fn discard<V: ProxyLayer>(view: &mut V, columns: &[Column]) {
        for column in columns {
            if let Err(e) = view.remove_proxy(column.proxy) {
                log::warn!("failed to remove proxy {:?}: {e}", column.proxy);
            }
        }
    }
}
