//! Row/column offset computation for virtualized panes.
//!
//! When leading rows or columns are virtualized out, the first rendered item
//! carries a margin equal to the cumulative size of everything hidden before
//! it, so the canvas keeps its full scroll geometry without dummy filler
//! nodes. In right-to-left layouts the column offset flips to a trailing
//! margin; the row offset is never mirrored.

use serde::Serialize;

use crate::geometry::{ContainerGeometry, Direction};
use crate::pane::RenderPane;

/// Margin adjustments for one rendered row or column element, in CSS pixels.
/// Absent fields mean "leave the margin alone".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OffsetMargins {
    pub top: Option<f32>,
    pub left: Option<f32>,
    pub right: Option<f32>,
}

impl OffsetMargins {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.right.is_none()
    }

    /// Inline-style text for the template layer, e.g. `margin-top: 90px;`.
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        if let Some(top) = self.top {
            out.push_str(&format!("margin-top: {top}px;"));
        }
        if let Some(left) = self.left {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&format!("margin-left: {left}px;"));
        }
        if let Some(right) = self.right {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&format!("margin-right: {right}px;"));
        }
        out
    }
}

fn column_margin(offset: f32, direction: Direction) -> OffsetMargins {
    match direction {
        Direction::LeftToRight => OffsetMargins {
            left: Some(offset),
            ..OffsetMargins::default()
        },
        Direction::RightToLeft => OffsetMargins {
            right: Some(offset),
            ..OffsetMargins::default()
        },
    }
}

/// Margins for the rendered row element at `rendered_index`.
///
/// The vertical offset lands only on the first rendered row, and only when
/// rows are actually virtualized out above it. Every row additionally
/// carries the column offset so the cells inside it line up with the
/// virtualized column window.
pub fn row_offset(
    own: &ContainerGeometry,
    rows: &ContainerGeometry,
    cols: &ContainerGeometry,
    direction: Direction,
    rendered_index: usize,
) -> OffsetMargins {
    let mut margins = OffsetMargins::default();

    if !own.disable_row_offset && rendered_index == 0 && rows.first_visible_row != 0 {
        margins.top = Some(rows.hidden_rows_height());
    }

    if !own.disable_column_offset && cols.first_visible_col != 0 {
        let column = column_margin(cols.column_offset, direction);
        margins.left = column.left;
        margins.right = column.right;
    }

    margins
}

/// Margins for the rendered column element at `rendered_index`: the column
/// offset on the first rendered column when columns are virtualized out.
pub fn col_offset(
    own: &ContainerGeometry,
    cols: &ContainerGeometry,
    direction: Direction,
    rendered_index: usize,
) -> OffsetMargins {
    if own.disable_column_offset || rendered_index != 0 || cols.first_visible_col == 0 {
        return OffsetMargins::default();
    }
    column_margin(cols.column_offset, direction)
}

impl RenderPane {
    /// Offset margins for the rendered row at `rendered_index`, consumed by
    /// the template layer.
    pub fn row_offset(&self, rendered_index: usize) -> OffsetMargins {
        row_offset(
            &self.own.borrow(),
            &self.rows.borrow(),
            &self.cols.borrow(),
            self.grid.borrow().direction,
            rendered_index,
        )
    }

    /// Offset margins for the rendered column at `rendered_index`.
    pub fn col_offset(&self, rendered_index: usize) -> OffsetMargins {
        col_offset(
            &self.own.borrow(),
            &self.cols.borrow(),
            self.grid.borrow().direction,
            rendered_index,
        )
    }
}
