//! Grid-level shared state and per-container virtualization geometry.
//!
//! [`ContainerGeometry`] is a read-only snapshot owned and refreshed by the
//! external virtualization layer; this crate only reads the latest values
//! when applying scroll events or computing offsets. [`GridContext`] ties one
//! grid instance together: its identity, layout direction, scrollbar
//! dimensions, and the named registry of container geometry.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

static NEXT_GRID_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier distinguishing grid instances that share one event channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridId(u64);

impl GridId {
    /// Allocate the next process-unique grid id.
    pub fn next() -> Self {
        Self(NEXT_GRID_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for GridId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Layout direction of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// How the host browser reports `scrollLeft` in right-to-left layouts.
///
/// Detected once by the host and recorded on [`GridContext`]; the core works
/// in normalized "distance from the logical start" coordinates and converts
/// at the viewport boundary only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RtlScrollKind {
    /// `scrollLeft` runs 0..max with 0 at the start edge (old WebKit).
    #[default]
    Default,
    /// `scrollLeft` runs -max..0 with 0 at the start edge (Firefox and the
    /// CSSOM behavior modern browsers converged on).
    Negative,
    /// `scrollLeft` runs max..0 with max at the start edge (old IE/Edge).
    Reverse,
}

/// Virtualization geometry snapshot for one render container.
///
/// Owned by the external row/column virtualization layer, which refreshes the
/// fields whenever the visible window shifts. All values are in CSS pixels.
#[derive(Debug, Clone, Default)]
pub struct ContainerGeometry {
    /// Full canvas width (all rendered columns).
    pub canvas_width: f32,
    /// Full canvas height (all rendered rows).
    pub canvas_height: f32,
    /// Visible viewport width.
    pub viewport_width: f32,
    /// Visible viewport height.
    pub viewport_height: f32,
    /// Width of the paired header viewport.
    pub header_viewport_width: f32,
    /// Index of the first row still rendered (not virtualized out).
    pub first_visible_row: usize,
    /// Index of the first column still rendered.
    pub first_visible_col: usize,
    /// Pixel height per absolute row index. Must cover at least the hidden
    /// leading rows; missing entries contribute nothing to offsets.
    pub row_heights: Vec<f32>,
    /// Cumulative pixel width of hidden leading columns, supplied by the
    /// column virtualization pass.
    pub column_offset: f32,
    /// Opt out of row offsets (pane renders all rows unvirtualized).
    pub disable_row_offset: bool,
    /// Opt out of column offsets.
    pub disable_column_offset: bool,
    /// Host-configured header cell height. Always wins over `inner_header_height`.
    pub explicit_header_height: Option<f32>,
    /// Measured inner header height, used to equalize header cells across
    /// panes whose content differs.
    pub inner_header_height: Option<f32>,
}

impl ContainerGeometry {
    /// Vertical scrollable range: canvas height minus viewport height,
    /// clamped so content smaller than the viewport yields zero.
    pub fn vertical_scroll_length(&self) -> f32 {
        (self.canvas_height - self.viewport_height).max(0.0)
    }

    /// Horizontal scrollable range.
    pub fn horizontal_scroll_length(&self) -> f32 {
        (self.canvas_width - self.viewport_width).max(0.0)
    }

    /// Cumulative pixel height of every row before the first visible one.
    pub fn hidden_rows_height(&self) -> f32 {
        self.row_heights.iter().take(self.first_visible_row).sum()
    }
}

/// Shared per-grid state: identity, direction, scrollbar dimensions, and the
/// registry of render container geometry keyed by name.
#[derive(Debug)]
pub struct GridContext {
    pub id: GridId,
    pub direction: Direction,
    pub rtl_scroll_kind: RtlScrollKind,
    /// Width the host's vertical scrollbar occupies.
    pub scrollbar_width: f32,
    /// Height the host's horizontal scrollbar occupies.
    pub scrollbar_height: f32,
    containers: HashMap<String, Rc<RefCell<ContainerGeometry>>>,
}

impl GridContext {
    pub fn new(direction: Direction) -> Self {
        Self {
            id: GridId::next(),
            direction,
            rtl_scroll_kind: RtlScrollKind::default(),
            scrollbar_width: 0.0,
            scrollbar_height: 0.0,
            containers: HashMap::new(),
        }
    }

    pub fn is_rtl(&self) -> bool {
        self.direction == Direction::RightToLeft
    }

    /// Register a render container's geometry under `name`, returning the
    /// shared handle the virtualization layer refreshes.
    pub fn register_container(
        &mut self,
        name: impl Into<String>,
        geometry: ContainerGeometry,
    ) -> Rc<RefCell<ContainerGeometry>> {
        let handle = Rc::new(RefCell::new(geometry));
        self.containers.insert(name.into(), Rc::clone(&handle));
        handle
    }

    /// Look up a registered container's geometry.
    pub fn container(&self, name: &str) -> Option<Rc<RefCell<ContainerGeometry>>> {
        self.containers.get(name).map(Rc::clone)
    }
}
