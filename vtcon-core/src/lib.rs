//! Vtcon Core
//!
//! Platform-independent data model for a console screen buffer as seen by a
//! virtual terminal adapter:
//! - Buffer coordinates and rectangles with signed 16-bit math
//! - The legacy 16-bit color/style attribute word
//! - A bounds-checked 2D cell grid with fill and scroll operations
//! - Scrolling margins and tab stops
//! - Synthetic keyboard events for status-report responses
//!
//! This crate has no I/O or GUI dependencies and can be used headlessly.

pub mod attr;
pub mod coord;
pub mod grid;
pub mod input;
pub mod margins;
pub mod tabs;

pub use attr::{ExtendedColor, LegacyAttributes};
pub use coord::{Coord, Rect};
pub use grid::{Cell, Grid};
pub use input::{response_events, KeyEvent};
pub use margins::Margins;
pub use tabs::TabStops;
