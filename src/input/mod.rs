//! Input gesture translation.
//!
//! Converts normalized wheel and touch input into [`crate::event::ScrollEvent`]s
//! with percentage+pixel deltas. Raw event capture and cross-platform unit
//! normalization belong to the host platform (the `wasm32` adapter in
//! `crate::dom` provides them for browsers).

pub mod touch;
pub mod wheel;

/// Position as a fraction of a scrollable range, clamped to `[0, 1]`.
/// A zero or negative range (content smaller than the viewport) yields 0
/// so no NaN/infinity can reach a DOM position assignment.
pub(crate) fn fraction_of_range(position: f32, range: f32) -> f32 {
    if range <= 0.0 {
        return 0.0;
    }
    (position / range).clamp(0.0, 1.0)
}
