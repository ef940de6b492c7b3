//! Touch gesture translation.
//!
//! One [`TouchTracker`] sequence spans touch-down to release. Moves are
//! translated relative to the positions captured at touch-down, so cumulative
//! dragging tracks total finger travel rather than per-frame deltas. Release
//! computes gesture velocities for diagnostics only: there is no momentum
//! continuation after the finger lifts.

use serde::Serialize;

use crate::event::{ScrollDelta, ScrollEvent, ScrollSource};
use crate::input::fraction_of_range;
use crate::pane::RenderPane;

/// Amplification applied to raw finger travel.
pub const TOUCH_SCROLL_SCALE: f32 = 2.0;

/// One finger position in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchPoint {
    pub screen_x: f32,
    pub screen_y: f32,
}

/// Outcome of one touch-move frame.
#[derive(Debug, Clone)]
pub struct TouchScroll {
    /// Fired unthrottled, one event per move frame.
    pub event: ScrollEvent,
    /// When true the caller must prevent the native gesture so it cannot
    /// chain to an ancestor scrollable region. The event fires either way.
    pub suppress_native: bool,
}

/// Release diagnostics. Velocities are pixels per millisecond of viewport
/// travel over the whole sequence; direction signs are from the last move.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TouchRelease {
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub direction_x: f32,
    pub direction_y: f32,
}

#[derive(Debug)]
struct TouchSequence {
    start_x: f32,
    start_y: f32,
    started_at_ms: f64,
    scroll_top_start: f32,
    scroll_left_start: f32,
    direction_x: f32,
    direction_y: f32,
}

/// State for the pane's active touch sequence, if any.
#[derive(Debug, Default)]
pub struct TouchTracker {
    active: Option<TouchSequence>,
}

impl TouchTracker {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl RenderPane {
    /// Begin a touch sequence: capture the finger position, the clock, and
    /// both scroll positions at touch-down.
    pub fn touch_start(&mut self, point: TouchPoint, now_ms: f64) {
        let scroll_left_start = self.normalized_scroll_left();
        self.touch.active = Some(TouchSequence {
            start_x: point.screen_x,
            start_y: point.screen_y,
            started_at_ms: now_ms,
            scroll_top_start: self.viewport.scroll_top(),
            scroll_left_start,
            direction_x: 1.0,
            direction_y: 1.0,
        });
    }

    /// Translate one move frame. Returns `None` when no sequence is active
    /// or the finger has not moved on either axis.
    pub fn touch_move(&mut self, point: TouchPoint) -> Option<TouchScroll> {
        let vertical_length = self.rows.borrow().vertical_scroll_length();
        let horizontal_length = self.cols.borrow().horizontal_scroll_length();
        let mut event = self.scroll_event(ScrollSource::TouchMove);

        let seq = self.touch.active.as_mut()?;

        let mut delta_x = -(point.screen_x - seq.start_x);
        let mut delta_y = -(point.screen_y - seq.start_y);
        seq.direction_y = if delta_y < 1.0 { -1.0 } else { 1.0 };
        seq.direction_x = if delta_x < 1.0 { -1.0 } else { 1.0 };
        delta_x *= TOUCH_SCROLL_SCALE;
        delta_y *= TOUCH_SCROLL_SCALE;

        if delta_y.abs() > f32::EPSILON {
            let percentage =
                fraction_of_range(seq.scroll_top_start + delta_y, vertical_length);
            event.vertical = Some(ScrollDelta::new(percentage, delta_y));
        }
        if delta_x.abs() > f32::EPSILON {
            let percentage =
                fraction_of_range(seq.scroll_left_start + delta_x, horizontal_length);
            event.horizontal = Some(ScrollDelta::new(percentage, delta_x));
        }

        if event.is_empty() {
            return None;
        }

        let suppress_native = event
            .vertical
            .is_some_and(|d| d.percentage > 0.0 && d.percentage < 1.0)
            || event
                .horizontal
                .is_some_and(|d| d.percentage > 0.0 && d.percentage < 1.0);

        Some(TouchScroll {
            event,
            suppress_native,
        })
    }

    /// End the active sequence and report release diagnostics. A release
    /// with no active sequence (duplicate `touchend`/`touchcancel`) returns
    /// `None`.
    pub fn touch_end(&mut self, now_ms: f64) -> Option<TouchRelease> {
        let seq = self.touch.active.take()?;

        let delta_y = (self.viewport.scroll_top() - seq.scroll_top_start).abs();
        let delta_x = (self.normalized_scroll_left() - seq.scroll_left_start).abs();
        let duration_ms = now_ms - seq.started_at_ms;

        // touchend can fire in the same tick as touchstart.
        let (velocity_x, velocity_y) = if duration_ms > 0.0 {
            (
                f64::from(delta_x) / duration_ms,
                f64::from(delta_y) / duration_ms,
            )
        } else {
            (0.0, 0.0)
        };

        Some(TouchRelease {
            velocity_x,
            velocity_y,
            direction_x: seq.direction_x,
            direction_y: seq.direction_y,
        })
    }
}
