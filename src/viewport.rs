//! Scroll surface abstraction.
//!
//! Coordination logic never touches a rendering surface directly: every
//! scrollable region is driven through [`ViewportControl`], so the whole core
//! runs headless in native tests. The DOM-backed implementation lives in
//! `crate::dom`.
//!
//! Horizontal positions inside the core are *normalized*: distance in pixels
//! from the logical start edge, regardless of layout direction. Browsers
//! disagree on what `scrollLeft` means under RTL, so values are converted at
//! the viewport boundary with [`denormalize_scroll_left`] /
//! [`normalize_scroll_left`].

use crate::geometry::{Direction, RtlScrollKind};

/// Host-side handle to one scrollable region (a pane viewport, or a paired
/// header/footer viewport).
pub trait ViewportControl {
    /// Current vertical scroll position.
    fn scroll_top(&self) -> f32;
    fn set_scroll_top(&mut self, value: f32);

    /// Current native `scrollLeft`, in the host's own RTL convention.
    fn scroll_left(&self) -> f32;
    fn set_scroll_left(&mut self, value: f32);

    /// Visible width of the region.
    fn viewport_width(&self) -> f32;
    /// Visible height of the region.
    fn viewport_height(&self) -> f32;
    /// Full scrollable content width.
    fn scroll_width(&self) -> f32;
}

/// Maximum native horizontal scroll distance of a viewport.
pub fn max_scroll_left(viewport: &dyn ViewportControl) -> f32 {
    (viewport.scroll_width() - viewport.viewport_width()).max(0.0)
}

/// Convert a normalized scroll-left (distance from the logical start) into
/// the value the host expects for `scrollLeft`.
pub fn denormalize_scroll_left(
    normalized: f32,
    max_scroll: f32,
    direction: Direction,
    kind: RtlScrollKind,
) -> f32 {
    if direction == Direction::LeftToRight {
        return normalized;
    }
    match kind {
        RtlScrollKind::Default => normalized,
        RtlScrollKind::Negative => -normalized,
        RtlScrollKind::Reverse => max_scroll - normalized,
    }
}

/// Convert a native `scrollLeft` reading into normalized distance from the
/// logical start.
pub fn normalize_scroll_left(
    native: f32,
    max_scroll: f32,
    direction: Direction,
    kind: RtlScrollKind,
) -> f32 {
    if direction == Direction::LeftToRight {
        return native;
    }
    match kind {
        RtlScrollKind::Default => native,
        RtlScrollKind::Negative => -native,
        RtlScrollKind::Reverse => max_scroll - native,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(RtlScrollKind::Default, 120.0 ; "default keeps the distance")]
    #[test_case(RtlScrollKind::Negative, -120.0 ; "negative mirrors the sign")]
    #[test_case(RtlScrollKind::Reverse, 380.0 ; "reverse counts from max")]
    fn denormalize_rtl_conventions(kind: RtlScrollKind, expected: f32) {
        let native = denormalize_scroll_left(120.0, 500.0, Direction::RightToLeft, kind);
        assert_eq!(native, expected);
    }

    #[test_case(RtlScrollKind::Default)]
    #[test_case(RtlScrollKind::Negative)]
    #[test_case(RtlScrollKind::Reverse)]
    fn rtl_conversion_round_trips(kind: RtlScrollKind) {
        let normalized = 235.0;
        let native =
            denormalize_scroll_left(normalized, 500.0, Direction::RightToLeft, kind);
        let back = normalize_scroll_left(native, 500.0, Direction::RightToLeft, kind);
        assert_eq!(back, normalized);
    }

    #[test]
    fn ltr_ignores_the_convention() {
        for kind in [
            RtlScrollKind::Default,
            RtlScrollKind::Negative,
            RtlScrollKind::Reverse,
        ] {
            assert_eq!(
                denormalize_scroll_left(42.0, 500.0, Direction::LeftToRight, kind),
                42.0
            );
            assert_eq!(
                normalize_scroll_left(42.0, 500.0, Direction::LeftToRight, kind),
                42.0
            );
        }
    }
}
