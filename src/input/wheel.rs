//! Wheel gesture translation.
//!
//! A wheel notch becomes a pixel delta against the pane's current position,
//! re-expressed as a percentage of the pane's scrollable range. The outcome
//! also decides whether the native event should be intercepted: at a range
//! boundary the gesture is left alone so the browser can chain the scroll to
//! an ancestor scrollable region.

use crate::event::{ScrollDelta, ScrollEvent, ScrollSource};
use crate::input::fraction_of_range;
use crate::pane::RenderPane;

/// Pixels scrolled per normalized wheel notch. Negative: wheel-down (a
/// positive delta) moves content up, matching scrollbar convention.
pub const WHEEL_NOTCH_PIXELS: f32 = -120.0;

/// Outcome of translating one wheel gesture.
#[derive(Debug, Clone)]
pub struct WheelScroll {
    pub event: ScrollEvent,
    /// When true the caller must suppress the native event (prevent default
    /// and stop scroll chaining) and publish `event` throttled. When false
    /// the gesture falls through to the parent scrollable container.
    pub intercept: bool,
}

/// Cross-platform-normalized wheel deltas, in notch units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelInput {
    pub delta_x: f32,
    pub delta_y: f32,
}

impl RenderPane {
    /// Translate a normalized wheel gesture into a scroll event and the
    /// interception decision. Returns `None` when the gesture has no delta
    /// on either axis.
    pub fn wheel_scroll(&self, input: WheelInput) -> Option<WheelScroll> {
        let mut event = self.scroll_event(ScrollSource::MouseWheel);

        if input.delta_y.abs() > f32::EPSILON {
            let pixels = input.delta_y * WHEEL_NOTCH_PIXELS;
            let length = self.rows.borrow().vertical_scroll_length();
            let percentage = fraction_of_range(self.viewport.scroll_top() + pixels, length);
            event.vertical = Some(ScrollDelta::new(percentage, pixels));
        }

        if input.delta_x.abs() > f32::EPSILON {
            let pixels = input.delta_x * WHEEL_NOTCH_PIXELS;
            let length = self.cols.borrow().horizontal_scroll_length();
            let percentage =
                fraction_of_range(self.normalized_scroll_left() + pixels, length);
            event.horizontal = Some(ScrollDelta::new(percentage, pixels));
        }

        if event.is_empty() {
            return None;
        }

        // Intercept only while strictly inside the scrollable range; a
        // gesture that lands exactly on a boundary chains to the ancestor.
        let vertical_interior = event
            .vertical
            .is_some_and(|d| d.percentage > 0.0 && d.percentage < 1.0)
            && self.viewport.scroll_top() > 0.0;
        let horizontal_interior = event
            .horizontal
            .is_some_and(|d| d.percentage > 0.0 && d.percentage < 1.0);

        Some(WheelScroll {
            event,
            intercept: vertical_interior || horizontal_interior,
        })
    }
}
