//! gridscroll - multi-pane scroll coordination for web grid widgets
//!
//! Coordinates scroll synchronization and virtualized layout across the
//! adjacent panes of a grid (pinned-left, body, pinned-right; headers and
//! footers tracking the body's horizontal scroll) so that independently
//! scrollable regions behave as one coherent surface:
//! - Wheel/touch gestures normalized into percentage+pixel scroll events
//! - Cross-pane propagation over a per-grid event channel, loop-suppressed
//! - Row/column margin offsets compensating for virtualized-out items
//! - Per-pane dimension style blocks regenerated from live geometry
//!
//! The coordination core is pure Rust and runs headless; browser hosting
//! (DOM viewports, wheel/touch listeners) lives behind
//! `#[cfg(target_arch = "wasm32")]` in `dom`.

pub mod channel;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod offset;
pub mod pane;
pub mod style;
pub mod viewport;

// Browser adapters
#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(test)]
mod testkit;

use wasm_bindgen::prelude::*;

pub use channel::{ScrollChannel, WHEEL_THROTTLE_MS};
pub use error::{GridScrollError, Result};
pub use event::{ScrollDelta, ScrollEvent, ScrollSource};
pub use geometry::{ContainerGeometry, Direction, GridContext, GridId, RtlScrollKind};
pub use input::touch::{TouchPoint, TouchRelease, TouchScroll, TOUCH_SCROLL_SCALE};
pub use input::wheel::{WheelInput, WheelScroll, WHEEL_NOTCH_PIXELS};
pub use offset::OffsetMargins;
pub use pane::{PaneOptions, RenderPane, ScrollDiagnostics};
pub use style::{StyleRegistry, PANE_STYLE_PRIORITY};
pub use viewport::ViewportControl;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
