//! Scroll intent value types.
//!
//! A [`ScrollEvent`] describes one discrete scroll gesture or programmatic
//! scroll. Position is carried as a percentage of the *producing* pane's
//! scrollable range so that consuming panes with different ranges stay at the
//! same relative position; the raw pixel delta rides along for diagnostics.

use serde::Serialize;

use crate::geometry::GridId;

/// Origin of a scroll intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScrollSource {
    /// The pane's native scrollbar moved the viewport directly.
    ViewportScroll,
    /// Synthesized from a mouse wheel gesture.
    MouseWheel,
    /// Synthesized from a touch drag.
    TouchMove,
    /// Issued by the host application (scroll-to APIs).
    Programmatic,
}

/// One axis of scroll intent.
///
/// `percentage` is a position in the producing pane's scrollable range and is
/// clamped to `[0, 1]` at construction; non-finite input collapses to 0 so a
/// zero-range pane can never poison downstream position assignments.
/// `pixels` is the raw gesture delta, informational only; it is never
/// applied as an absolute position across panes.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScrollDelta {
    /// Position in the producing pane's scrollable range, in `[0, 1]`.
    pub percentage: f32,
    /// Raw pixel delta behind the gesture.
    pub pixels: f32,
}

impl ScrollDelta {
    /// Create a delta, clamping the percentage into `[0, 1]`.
    pub fn new(percentage: f32, pixels: f32) -> Self {
        let percentage = if percentage.is_finite() {
            percentage.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { percentage, pixels }
    }
}

/// One scroll intent, published once per discrete gesture or programmatic
/// scroll and delivered to every pane of the grid in publish order.
#[derive(Debug, Clone, Serialize)]
pub struct ScrollEvent {
    /// Grid instance this event targets. Subscribers sharing a channel must
    /// ignore events for other grids.
    pub grid: GridId,
    /// What produced the event.
    pub source: ScrollSource,
    /// Name of the row container whose range produced the vertical percentage.
    pub source_row_container: String,
    /// Name of the column container whose range produced the horizontal
    /// percentage. Also identifies the producing pane for loop suppression.
    pub source_col_container: String,
    /// Vertical intent, absent when the gesture had no vertical component.
    pub vertical: Option<ScrollDelta>,
    /// Horizontal intent.
    pub horizontal: Option<ScrollDelta>,
}

impl ScrollEvent {
    /// Create an event with no intent on either axis.
    pub fn new(
        grid: GridId,
        source: ScrollSource,
        source_row_container: impl Into<String>,
        source_col_container: impl Into<String>,
    ) -> Self {
        Self {
            grid,
            source,
            source_row_container: source_row_container.into(),
            source_col_container: source_col_container.into(),
            vertical: None,
            horizontal: None,
        }
    }

    /// An event with neither vertical nor horizontal intent is a no-op.
    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }

    /// Target `scrollTop` for a consuming pane, denormalized against that
    /// pane's *own* vertical scrollable length.
    pub fn new_scroll_top(&self, vertical_scroll_length: f32) -> Option<f32> {
        self.vertical
            .map(|d| (d.percentage * vertical_scroll_length.max(0.0)).round())
    }

    /// Target normalized `scrollLeft` for a consuming pane, denormalized
    /// against that pane's *own* horizontal scrollable width.
    pub fn new_scroll_left(&self, horizontal_scroll_length: f32) -> Option<f32> {
        self.horizontal
            .map(|d| (d.percentage * horizontal_scroll_length.max(0.0)).round())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn event_with_vertical(percentage: f32) -> ScrollEvent {
        let mut event = ScrollEvent::new(
            GridId::next(),
            ScrollSource::MouseWheel,
            "body",
            "body",
        );
        event.vertical = Some(ScrollDelta::new(percentage, 0.0));
        event
    }

    #[test_case(-0.5, 0.0 ; "below range clamps to zero")]
    #[test_case(0.0, 0.0 ; "zero passes through")]
    #[test_case(0.62, 0.62 ; "in range passes through")]
    #[test_case(1.0, 1.0 ; "one passes through")]
    #[test_case(7.3, 1.0 ; "past range clamps to one")]
    fn percentage_is_clamped(input: f32, expected: f32) {
        assert_eq!(ScrollDelta::new(input, 0.0).percentage, expected);
    }

    #[test]
    fn non_finite_percentage_collapses_to_zero() {
        assert_eq!(ScrollDelta::new(f32::NAN, 10.0).percentage, 0.0);
        assert_eq!(ScrollDelta::new(f32::INFINITY, 10.0).percentage, 0.0);
        assert_eq!(ScrollDelta::new(f32::NEG_INFINITY, 10.0).percentage, 0.0);
    }

    #[test]
    fn pixels_are_preserved_unclamped() {
        let delta = ScrollDelta::new(2.0, 4800.0);
        assert_eq!(delta.percentage, 1.0);
        assert_eq!(delta.pixels, 4800.0);
    }

    #[test]
    fn empty_event_reports_no_intent() {
        let event = ScrollEvent::new(
            GridId::next(),
            ScrollSource::Programmatic,
            "body",
            "body",
        );
        assert!(event.is_empty());
        assert_eq!(event.new_scroll_top(1000.0), None);
        assert_eq!(event.new_scroll_left(1000.0), None);
    }

    #[test]
    fn scroll_top_denormalizes_against_consumer_range() {
        let event = event_with_vertical(0.5);
        // Same percentage, different ranges: each pane lands at its own
        // relative position, not a shared absolute pixel offset.
        assert_eq!(event.new_scroll_top(100.0), Some(50.0));
        assert_eq!(event.new_scroll_top(400.0), Some(200.0));
    }

    #[test]
    fn scroll_top_rounds_to_whole_pixels() {
        let event = event_with_vertical(0.62);
        assert_eq!(event.new_scroll_top(1000.0), Some(620.0));
        let event = event_with_vertical(0.333);
        assert_eq!(event.new_scroll_top(100.0), Some(33.0));
    }

    #[test]
    fn negative_consumer_range_is_treated_as_zero() {
        let event = event_with_vertical(1.0);
        assert_eq!(event.new_scroll_top(-50.0), Some(0.0));
    }
}
