//! Integration tests for virtualized offsets and pane style computation.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use gridscroll::{
    ContainerGeometry, Direction, GridContext, OffsetMargins, PaneOptions, RenderPane,
    StyleRegistry, ViewportControl,
};

struct NullViewport;

impl ViewportControl for NullViewport {
    fn scroll_top(&self) -> f32 {
        0.0
    }

    fn set_scroll_top(&mut self, _value: f32) {}

    fn scroll_left(&self) -> f32 {
        0.0
    }

    fn set_scroll_left(&mut self, _value: f32) {}

    fn viewport_width(&self) -> f32 {
        0.0
    }

    fn viewport_height(&self) -> f32 {
        0.0
    }

    fn scroll_width(&self) -> f32 {
        0.0
    }
}

fn virtualized_grid(direction: Direction) -> Rc<RefCell<GridContext>> {
    let mut context = GridContext::new(direction);
    context.scrollbar_width = 10.0;
    context.scrollbar_height = 10.0;
    context.register_container(
        "body",
        ContainerGeometry {
            canvas_width: 800.0,
            canvas_height: 2000.0,
            viewport_width: 400.0,
            viewport_height: 300.0,
            header_viewport_width: 400.0,
            first_visible_row: 3,
            first_visible_col: 2,
            row_heights: vec![30.0; 50],
            column_offset: 130.0,
            ..ContainerGeometry::default()
        },
    );
    Rc::new(RefCell::new(context))
}

fn body_pane(grid: &Rc<RefCell<GridContext>>) -> Rc<RefCell<RenderPane>> {
    let mut options = PaneOptions::new("body", "body", "body");
    options.owns_horizontal_scrollbar = true;
    Rc::new(RefCell::new(
        RenderPane::new(Rc::clone(grid), options, Box::new(NullViewport), None, None).unwrap(),
    ))
}

#[test]
fn row_offset_hits_only_the_first_rendered_row() {
    let grid = virtualized_grid(Direction::LeftToRight);
    let pane = body_pane(&grid);

    let first = pane.borrow().row_offset(0);
    assert_eq!(first.top, Some(90.0));
    assert_eq!(first.left, Some(130.0));

    let second = pane.borrow().row_offset(1);
    assert_eq!(second.top, None);
    // Every row still carries the column offset.
    assert_eq!(second.left, Some(130.0));
}

#[test]
fn no_offsets_at_the_window_origin() {
    let grid = virtualized_grid(Direction::LeftToRight);
    {
        let ctx = grid.borrow();
        let body = ctx.container("body").unwrap();
        let mut body = body.borrow_mut();
        body.first_visible_row = 0;
        body.first_visible_col = 0;
    }
    let pane = body_pane(&grid);
    assert_eq!(pane.borrow().row_offset(0), OffsetMargins::default());
    assert_eq!(pane.borrow().col_offset(0), OffsetMargins::default());
}

#[test]
fn rtl_mirrors_column_offset_only() {
    let ltr_pane = body_pane(&virtualized_grid(Direction::LeftToRight));
    let rtl_pane = body_pane(&virtualized_grid(Direction::RightToLeft));

    let ltr = ltr_pane.borrow().col_offset(0);
    assert_eq!(ltr.left, Some(130.0));
    assert_eq!(ltr.right, None);

    let rtl = rtl_pane.borrow().col_offset(0);
    assert_eq!(rtl.left, None);
    assert_eq!(rtl.right, Some(130.0));

    // The vertical offset never mirrors.
    assert_eq!(rtl_pane.borrow().row_offset(0).top, Some(90.0));
}

#[test]
fn offset_opt_outs_disable_each_axis() {
    let grid = virtualized_grid(Direction::LeftToRight);
    {
        let ctx = grid.borrow();
        let body = ctx.container("body").unwrap();
        let mut body = body.borrow_mut();
        body.disable_row_offset = true;
        body.disable_column_offset = true;
    }
    let pane = body_pane(&grid);
    assert_eq!(pane.borrow().row_offset(0), OffsetMargins::default());
    assert_eq!(pane.borrow().col_offset(0), OffsetMargins::default());
}

#[test]
fn registered_styles_regenerate_from_live_geometry() {
    let grid = virtualized_grid(Direction::LeftToRight);
    let pane = body_pane(&grid);

    let mut registry = StyleRegistry::new();
    RenderPane::register_pane_styles(&pane, &mut registry);

    let css = registry.compute();
    assert!(css.contains(".grid-pane-body .grid-canvas { width: 800px; height: 2000px; }"));
    assert!(css.contains(".grid-viewport { width: 400px; height: 300px; }"));
    assert!(css.contains(&format!(".grid{}", grid.borrow().id)));

    // The virtualization layer grows the canvas; the next pass sees it.
    grid.borrow()
        .container("body")
        .unwrap()
        .borrow_mut()
        .canvas_height = 2400.0;
    assert!(registry
        .compute()
        .contains(".grid-canvas { width: 800px; height: 2400px; }"));
}

#[test]
fn header_height_rules_follow_precedence() {
    let grid = virtualized_grid(Direction::LeftToRight);
    let pane = body_pane(&grid);

    {
        let ctx = grid.borrow();
        ctx.container("body").unwrap().borrow_mut().inner_header_height = Some(28.0);
    }
    assert!(pane
        .borrow()
        .pane_styles()
        .contains(".grid-header-cell { height: 28px; }"));

    {
        let ctx = grid.borrow();
        ctx.container("body")
            .unwrap()
            .borrow_mut()
            .explicit_header_height = Some(35.0);
    }
    let css = pane.borrow().pane_styles();
    assert!(css.contains(".grid-header-cell { height: 35px; }"));
    assert!(!css.contains("height: 28px"));
}
