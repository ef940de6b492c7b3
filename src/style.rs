//! Pane dimension style computation.
//!
//! Each pane contributes a block of CSS rules scoped to its generated class
//! name, regenerated on demand from the same geometry snapshots the scroll
//! core reads. Computations register in a [`StyleRegistry`] under a fixed
//! priority so grid-wide and pane-specific rules always land in the same
//! cascade order.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::pane::RenderPane;

/// Cascade slot for pane dimension rules.
pub const PANE_STYLE_PRIORITY: i32 = 6;

struct StyleComputation {
    priority: i32,
    func: Box<dyn Fn() -> String>,
}

/// Priority-ordered collection of style computations for one grid.
/// Equal priorities keep registration order.
#[derive(Default)]
pub struct StyleRegistry {
    computations: Vec<StyleComputation>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, priority: i32, func: impl Fn() -> String + 'static) {
        self.computations.push(StyleComputation {
            priority,
            func: Box::new(func),
        });
    }

    /// Run every computation in stable priority order and concatenate the
    /// resulting rule blocks.
    pub fn compute(&self) -> String {
        let mut order: Vec<usize> = (0..self.computations.len()).collect();
        order.sort_by_key(|&i| self.computations.get(i).map_or(0, |c| c.priority));
        order
            .iter()
            .filter_map(|&i| self.computations.get(i))
            .map(|c| (c.func)())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.computations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.computations.is_empty()
    }
}

impl RenderPane {
    /// CSS rule block sizing this pane's canvas, viewport, and paired
    /// header/footer viewports from the current geometry snapshots.
    pub fn pane_styles(&self) -> String {
        let grid = self.grid.borrow();
        let rows = self.rows.borrow();
        let cols = self.cols.borrow();
        let own = self.own.borrow();

        let canvas_width = cols.canvas_width;
        let viewport_width = cols.viewport_width;
        let viewport_height = rows.viewport_height;
        let header_viewport_width = cols.header_viewport_width;
        let footer_viewport_width = cols.header_viewport_width;
        let header_canvas_width = canvas_width + grid.scrollbar_width;
        let footer_canvas_width = canvas_width + grid.scrollbar_width;

        // Panes without their own horizontal scrollbar pad the canvas so it
        // lines up with the body pane's.
        let mut canvas_height = rows.canvas_height;
        if !self.owns_horizontal_scrollbar {
            canvas_height += grid.scrollbar_height;
        }

        let scope = format!(".grid{} .grid-pane-{}", grid.id, self.id);
        let mut ret = String::new();

        ret.push_str(&format!(
            "\n {scope} .grid-canvas {{ width: {canvas_width}px; height: {canvas_height}px; }}"
        ));
        ret.push_str(&format!(
            "\n {scope} .grid-header-canvas {{ width: {header_canvas_width}px; }}"
        ));
        ret.push_str(&format!(
            "\n {scope} .grid-viewport {{ width: {viewport_width}px; height: {viewport_height}px; }}"
        ));
        ret.push_str(&format!(
            "\n {scope} .grid-header-viewport {{ width: {header_viewport_width}px; }}"
        ));
        ret.push_str(&format!(
            "\n {scope} .grid-footer-canvas {{ width: {footer_canvas_width}px; }}"
        ));
        ret.push_str(&format!(
            "\n {scope} .grid-footer-viewport {{ width: {footer_viewport_width}px; }}"
        ));

        // A configured header height always wins over the measured inner
        // height; either pins header cells so panes with shorter content
        // keep aligned borders.
        if let Some(height) = own.explicit_header_height.filter(|h| *h > 0.0) {
            ret.push_str(&format!(
                "\n {scope} .grid-header-cell {{ height: {height}px; }}"
            ));
        } else if let Some(height) = own.inner_header_height.filter(|h| *h > 0.0) {
            ret.push_str(&format!(
                "\n {scope} .grid-header-cell {{ height: {height}px; }}"
            ));
        }

        ret
    }

    /// Register this pane's style computation under the fixed pane priority.
    /// The registration holds only a weak reference; a dropped pane
    /// contributes nothing.
    pub fn register_pane_styles(pane: &Rc<RefCell<Self>>, registry: &mut StyleRegistry) {
        let weak: Weak<RefCell<Self>> = Rc::downgrade(pane);
        registry.register(PANE_STYLE_PRIORITY, move || {
            weak.upgrade()
                .map(|pane| pane.borrow().pane_styles())
                .unwrap_or_default()
        });
    }
}
