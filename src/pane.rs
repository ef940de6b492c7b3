//! Per-pane scroll controller.
//!
//! A [`RenderPane`] owns the mutable runtime state of one render container
//! pane: its viewport handle, optional paired header/footer viewports, and
//! the bookkeeping needed for loop suppression. Construction resolves every
//! geometry source up front (there is no partially-initialized phase) and
//! fails with a configuration error when a container name is missing or
//! unregistered.
//!
//! Cross-pane coordination happens exclusively through the published-event
//! protocol: a pane only ever mutates its own viewport and its own paired
//! header/footer elements.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::channel::ScrollChannel;
use crate::error::{GridScrollError, Result};
use crate::event::{ScrollDelta, ScrollEvent, ScrollSource};
use crate::geometry::{ContainerGeometry, GridContext};
use crate::input::touch::TouchTracker;
use crate::viewport::{
    denormalize_scroll_left, max_scroll_left, normalize_scroll_left, ViewportControl,
};

/// Static configuration for one pane.
#[derive(Debug, Clone)]
pub struct PaneOptions {
    /// The pane's own render container name (offset opt-outs and header
    /// heights are read from this entry).
    pub pane_id: String,
    /// Name of the registered container providing row geometry. Required.
    pub row_container: String,
    /// Name of the registered container providing column geometry. Required.
    pub col_container: String,
    /// Apply vertical intents from the event channel to this pane.
    pub bind_scroll_vertical: bool,
    /// Apply horizontal intents from the event channel to this pane.
    pub bind_scroll_horizontal: bool,
    /// Whether this pane carries the grid's horizontal scrollbar (the body
    /// pane does). Panes that don't pad their canvas height by the scrollbar
    /// height so canvases align across panes.
    pub owns_horizontal_scrollbar: bool,
}

impl PaneOptions {
    pub fn new(
        pane_id: impl Into<String>,
        row_container: impl Into<String>,
        col_container: impl Into<String>,
    ) -> Self {
        Self {
            pane_id: pane_id.into(),
            row_container: row_container.into(),
            col_container: col_container.into(),
            bind_scroll_vertical: false,
            bind_scroll_horizontal: false,
            owns_horizontal_scrollbar: false,
        }
    }
}

/// Snapshot of a pane's coordination state, exported for host-side
/// inspection.
#[derive(Debug, Serialize)]
pub struct ScrollDiagnostics {
    pub pane_id: String,
    pub last_event: Option<ScrollEvent>,
    pub last_scroll_left: f32,
    pub subscribed: bool,
}

/// Mutable controller for one pane of the grid.
pub struct RenderPane {
    pub(crate) id: String,
    pub(crate) grid: Rc<RefCell<GridContext>>,
    pub(crate) rows: Rc<RefCell<ContainerGeometry>>,
    pub(crate) cols: Rc<RefCell<ContainerGeometry>>,
    /// The pane's own container entry.
    pub(crate) own: Rc<RefCell<ContainerGeometry>>,
    pub(crate) viewport: Box<dyn ViewportControl>,
    pub(crate) header_viewport: Option<Box<dyn ViewportControl>>,
    pub(crate) footer_viewport: Option<Box<dyn ViewportControl>>,
    pub(crate) row_container_name: String,
    pub(crate) col_container_name: String,
    pub(crate) bind_scroll_vertical: bool,
    pub(crate) bind_scroll_horizontal: bool,
    pub(crate) owns_horizontal_scrollbar: bool,
    /// Most recent event applied, kept for loop suppression diagnostics.
    pub(crate) last_event: Option<ScrollEvent>,
    /// Last applied normalized horizontal position, for delta-free reads
    /// when the native value must be denormalized under RTL.
    pub(crate) last_scroll_left: f32,
    pub(crate) touch: TouchTracker,
    subscription: Option<u64>,
}

impl std::fmt::Debug for RenderPane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPane")
            .field("id", &self.id)
            .field("row_container_name", &self.row_container_name)
            .field("col_container_name", &self.col_container_name)
            .field("bind_scroll_vertical", &self.bind_scroll_vertical)
            .field("bind_scroll_horizontal", &self.bind_scroll_horizontal)
            .field("owns_horizontal_scrollbar", &self.owns_horizontal_scrollbar)
            .field("last_scroll_left", &self.last_scroll_left)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

impl RenderPane {
    /// Build a pane with its geometry sources fully resolved.
    ///
    /// # Errors
    /// Fails when a row/column container name is empty or refers to a
    /// container that was never registered with the grid.
    pub fn new(
        grid: Rc<RefCell<GridContext>>,
        options: PaneOptions,
        viewport: Box<dyn ViewportControl>,
        header_viewport: Option<Box<dyn ViewportControl>>,
        footer_viewport: Option<Box<dyn ViewportControl>>,
    ) -> Result<Self> {
        if options.row_container.is_empty() {
            return Err(GridScrollError::MissingRowContainer(options.pane_id));
        }
        if options.col_container.is_empty() {
            return Err(GridScrollError::MissingColumnContainer(options.pane_id));
        }

        let (rows, cols, own) = {
            let ctx = grid.borrow();
            let resolve = |name: &str| {
                ctx.container(name)
                    .ok_or_else(|| GridScrollError::UnregisteredContainer(name.to_string()))
            };
            (
                resolve(&options.row_container)?,
                resolve(&options.col_container)?,
                resolve(&options.pane_id)?,
            )
        };

        Ok(Self {
            id: options.pane_id,
            grid,
            rows,
            cols,
            own,
            viewport,
            header_viewport,
            footer_viewport,
            row_container_name: options.row_container,
            col_container_name: options.col_container,
            bind_scroll_vertical: options.bind_scroll_vertical,
            bind_scroll_horizontal: options.bind_scroll_horizontal,
            owns_horizontal_scrollbar: options.owns_horizontal_scrollbar,
            last_event: None,
            last_scroll_left: 0.0,
            touch: TouchTracker::default(),
            subscription: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn last_event(&self) -> Option<&ScrollEvent> {
        self.last_event.as_ref()
    }

    /// Apply one scroll event to this pane.
    ///
    /// Events for other grids and events with no intent are ignored. A
    /// vertical intent is skipped when this pane's own native scroll
    /// produced it (re-applying would jitter); a horizontal intent always
    /// tracks into the paired header/footer viewports but repositions the
    /// pane's own viewport only for non-native sources, since a native
    /// horizontal scrollbar self-manages its position.
    pub fn handle_scroll_event(&mut self, event: &ScrollEvent) {
        if event.grid != self.grid.borrow().id {
            return;
        }
        if event.is_empty() {
            return;
        }

        if event.vertical.is_some() && self.bind_scroll_vertical {
            let length = self.rows.borrow().vertical_scroll_length();
            if let Some(new_scroll_top) = event.new_scroll_top(length) {
                let own_viewport_scroll = event.source == ScrollSource::ViewportScroll
                    && event.source_col_container == self.col_container_name;
                if !own_viewport_scroll {
                    self.viewport.set_scroll_top(new_scroll_top);
                }
            }
            self.last_event = Some(event.clone());
        }

        if event.horizontal.is_some() && self.bind_scroll_horizontal {
            let length = self.cols.borrow().horizontal_scroll_length();
            if let Some(new_scroll_left) = event.new_scroll_left(length) {
                let (direction, kind) = {
                    let ctx = self.grid.borrow();
                    (ctx.direction, ctx.rtl_scroll_kind)
                };

                if let Some(header) = self.header_viewport.as_mut() {
                    let native = denormalize_scroll_left(
                        new_scroll_left,
                        max_scroll_left(header.as_ref()),
                        direction,
                        kind,
                    );
                    header.set_scroll_left(native);
                }
                if let Some(footer) = self.footer_viewport.as_mut() {
                    let native = denormalize_scroll_left(
                        new_scroll_left,
                        max_scroll_left(footer.as_ref()),
                        direction,
                        kind,
                    );
                    footer.set_scroll_left(native);
                }

                if event.source != ScrollSource::ViewportScroll {
                    let native = denormalize_scroll_left(
                        new_scroll_left,
                        max_scroll_left(self.viewport.as_ref()),
                        direction,
                        kind,
                    );
                    self.viewport.set_scroll_left(native);
                }

                self.last_scroll_left = new_scroll_left;
            }
            self.last_event = Some(event.clone());
        }
    }

    /// Current horizontal position as distance from the logical start.
    pub fn normalized_scroll_left(&self) -> f32 {
        let ctx = self.grid.borrow();
        normalize_scroll_left(
            self.viewport.scroll_left(),
            max_scroll_left(self.viewport.as_ref()),
            ctx.direction,
            ctx.rtl_scroll_kind,
        )
    }

    /// Empty event template carrying this pane's provenance.
    pub(crate) fn scroll_event(&self, source: ScrollSource) -> ScrollEvent {
        ScrollEvent::new(
            self.grid.borrow().id,
            source,
            self.row_container_name.clone(),
            self.col_container_name.clone(),
        )
    }

    /// Event describing the viewport's current native scroll position,
    /// published when the native scrollbar moves this pane directly.
    pub fn viewport_scroll_event(&self) -> ScrollEvent {
        let mut event = self.scroll_event(ScrollSource::ViewportScroll);

        let vertical_length = self.rows.borrow().vertical_scroll_length();
        if vertical_length > 0.0 {
            let percentage = self.viewport.scroll_top() / vertical_length;
            event.vertical = Some(ScrollDelta::new(percentage, 0.0));
        }

        let horizontal_length = self.cols.borrow().horizontal_scroll_length();
        if horizontal_length > 0.0 {
            let left = self.normalized_scroll_left();
            let percentage = left / horizontal_length;
            event.horizontal = Some(ScrollDelta::new(percentage, left - self.last_scroll_left));
        }

        event
    }

    /// Event for host-driven scroll-to requests. Percentages are clamped to
    /// `[0, 1]`; pass `None` to leave an axis untouched.
    pub fn programmatic_scroll_event(
        &self,
        vertical: Option<f32>,
        horizontal: Option<f32>,
    ) -> ScrollEvent {
        let mut event = self.scroll_event(ScrollSource::Programmatic);
        event.vertical = vertical.map(|p| ScrollDelta::new(p, 0.0));
        event.horizontal = horizontal.map(|p| ScrollDelta::new(p, 0.0));
        event
    }

    /// Subscribe the pane to its grid's scroll channel. Panes that bind
    /// neither axis do not subscribe. The subscription holds only a weak
    /// reference, so dropping the pane makes delivery a no-op.
    pub fn attach(pane: &Rc<RefCell<Self>>, channel: &ScrollChannel) -> Option<u64> {
        let binds = {
            let p = pane.borrow();
            p.bind_scroll_vertical || p.bind_scroll_horizontal
        };
        if !binds {
            return None;
        }

        let weak = Rc::downgrade(pane);
        let id = channel.subscribe(move |event| {
            if let Some(pane) = weak.upgrade() {
                pane.borrow_mut().handle_scroll_event(event);
            }
        });
        pane.borrow_mut().subscription = Some(id);
        Some(id)
    }

    /// Tear the pane off the channel; further events are not applied.
    pub fn detach(pane: &Rc<RefCell<Self>>, channel: &ScrollChannel) {
        if let Some(id) = pane.borrow_mut().subscription.take() {
            channel.unsubscribe(id);
        }
    }

    /// Coordination state snapshot for host-side inspection.
    pub fn diagnostics(&self) -> ScrollDiagnostics {
        ScrollDiagnostics {
            pane_id: self.id.clone(),
            last_event: self.last_event.clone(),
            last_scroll_left: self.last_scroll_left,
            subscribed: self.subscription.is_some(),
        }
    }

    /// Diagnostics as a JSON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn diagnostics_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.diagnostics())?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::geometry::Direction;
    use crate::testkit::{grid_with_containers, FakeViewport};

    fn pane_options(pane_id: &str) -> PaneOptions {
        let mut options = PaneOptions::new(pane_id, "body", pane_id);
        options.bind_scroll_vertical = true;
        options.bind_scroll_horizontal = true;
        options
    }

    #[test]
    fn construction_requires_row_container_name() {
        let grid = grid_with_containers(Direction::LeftToRight, &["body"]);
        let options = PaneOptions::new("body", "", "body");
        let err = RenderPane::new(grid, options, Box::new(FakeViewport::default()), None, None)
            .unwrap_err();
        assert!(matches!(err, GridScrollError::MissingRowContainer(_)));
    }

    #[test]
    fn construction_requires_col_container_name() {
        let grid = grid_with_containers(Direction::LeftToRight, &["body"]);
        let options = PaneOptions::new("body", "body", "");
        let err = RenderPane::new(grid, options, Box::new(FakeViewport::default()), None, None)
            .unwrap_err();
        assert!(matches!(err, GridScrollError::MissingColumnContainer(_)));
    }

    #[test]
    fn construction_rejects_unregistered_container() {
        let grid = grid_with_containers(Direction::LeftToRight, &["body"]);
        let options = PaneOptions::new("body", "body", "left");
        let err = RenderPane::new(grid, options, Box::new(FakeViewport::default()), None, None)
            .unwrap_err();
        match err {
            GridScrollError::UnregisteredContainer(name) => assert_eq!(name, "left"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn vertical_event_applies_against_own_range() {
        let grid = grid_with_containers(Direction::LeftToRight, &["body"]);
        grid.borrow()
            .container("body")
            .unwrap()
            .borrow_mut()
            .canvas_height = 1200.0;
        grid.borrow()
            .container("body")
            .unwrap()
            .borrow_mut()
            .viewport_height = 200.0;

        let mut pane = RenderPane::new(
            Rc::clone(&grid),
            pane_options("body"),
            Box::new(FakeViewport::default()),
            None,
            None,
        )
        .unwrap();

        let mut event = pane.scroll_event(ScrollSource::MouseWheel);
        event.vertical = Some(ScrollDelta::new(0.5, 0.0));
        pane.handle_scroll_event(&event);

        assert_eq!(pane.viewport.scroll_top(), 500.0);
        assert!(pane.last_event().is_some());
    }

    #[test]
    fn event_for_other_grid_is_ignored() {
        let grid = grid_with_containers(Direction::LeftToRight, &["body"]);
        let other_grid = grid_with_containers(Direction::LeftToRight, &["body"]);

        let mut pane = RenderPane::new(
            grid,
            pane_options("body"),
            Box::new(FakeViewport::default()),
            None,
            None,
        )
        .unwrap();

        let mut event =
            ScrollEvent::new(other_grid.borrow().id, ScrollSource::MouseWheel, "body", "body");
        event.vertical = Some(ScrollDelta::new(1.0, 0.0));
        pane.handle_scroll_event(&event);

        assert_eq!(pane.viewport.scroll_top(), 0.0);
        assert!(pane.last_event().is_none());
    }

    #[test]
    fn empty_event_is_a_no_op() {
        let grid = grid_with_containers(Direction::LeftToRight, &["body"]);
        let mut pane = RenderPane::new(
            grid,
            pane_options("body"),
            Box::new(FakeViewport::default()),
            None,
            None,
        )
        .unwrap();

        let event = pane.scroll_event(ScrollSource::Programmatic);
        pane.handle_scroll_event(&event);
        assert!(pane.last_event().is_none());
        assert_eq!(pane.viewport.scroll_top(), 0.0);
    }

    #[test]
    fn unbound_axes_are_not_applied() {
        let grid = grid_with_containers(Direction::LeftToRight, &["body"]);
        grid.borrow()
            .container("body")
            .unwrap()
            .borrow_mut()
            .canvas_height = 1000.0;

        let mut options = PaneOptions::new("body", "body", "body");
        options.bind_scroll_horizontal = true; // vertical left unbound
        let mut pane =
            RenderPane::new(grid, options, Box::new(FakeViewport::default()), None, None).unwrap();

        let mut event = pane.scroll_event(ScrollSource::MouseWheel);
        event.vertical = Some(ScrollDelta::new(1.0, 0.0));
        pane.handle_scroll_event(&event);
        assert_eq!(pane.viewport.scroll_top(), 0.0);
    }
}
