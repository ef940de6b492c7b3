//! In-memory doubles for unit tests. Compiled only for `cfg(test)`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::{ContainerGeometry, Direction, GridContext};
use crate::viewport::ViewportControl;

#[derive(Debug, Default)]
struct ViewportState {
    scroll_top: f32,
    scroll_left: f32,
    viewport_width: f32,
    viewport_height: f32,
    scroll_width: f32,
}

/// Shared-state viewport double: clones observe the same scroll position, so
/// a test can keep a handle to a viewport it moved into a pane.
#[derive(Debug, Clone, Default)]
pub struct FakeViewport {
    state: Rc<RefCell<ViewportState>>,
}

impl FakeViewport {
    pub fn new(viewport_width: f32, viewport_height: f32, scroll_width: f32) -> Self {
        Self {
            state: Rc::new(RefCell::new(ViewportState {
                viewport_width,
                viewport_height,
                scroll_width,
                ..ViewportState::default()
            })),
        }
    }
}

impl ViewportControl for FakeViewport {
    fn scroll_top(&self) -> f32 {
        self.state.borrow().scroll_top
    }

    fn set_scroll_top(&mut self, value: f32) {
        self.state.borrow_mut().scroll_top = value;
    }

    fn scroll_left(&self) -> f32 {
        self.state.borrow().scroll_left
    }

    fn set_scroll_left(&mut self, value: f32) {
        self.state.borrow_mut().scroll_left = value;
    }

    fn viewport_width(&self) -> f32 {
        self.state.borrow().viewport_width
    }

    fn viewport_height(&self) -> f32 {
        self.state.borrow().viewport_height
    }

    fn scroll_width(&self) -> f32 {
        self.state.borrow().scroll_width
    }
}

/// Grid context with default geometry registered under each name.
pub fn grid_with_containers(
    direction: Direction,
    names: &[&str],
) -> Rc<RefCell<GridContext>> {
    let mut grid = GridContext::new(direction);
    for name in names {
        grid.register_container(*name, ContainerGeometry::default());
    }
    Rc::new(RefCell::new(grid))
}
