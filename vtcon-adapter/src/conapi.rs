//! The capability interface between the dispatcher and the screen buffer.
//!
//! One flat trait: everything the adapter may read from or do to a console.
//! The real console implements it over its buffer engine; [`crate::soft`]
//! implements it over an in-memory grid; the test suite wraps that with
//! per-call failure injection. The adapter never reaches around this
//! boundary.

use thiserror::Error;
use vtcon_core::{Cell, Coord, ExtendedColor, KeyEvent, LegacyAttributes, Margins, Rect};

/// A capability call the console declined or could not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("console capability call failed")]
pub struct ApiError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Screen buffer state returned by [`ConsoleApi::get_buffer_info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferInfo {
    /// Total buffer dimensions (x = columns, y = rows).
    pub buffer_size: Coord,
    /// The visible window into the buffer. Bottom/right exclusive.
    pub viewport: Rect,
    /// Cursor position, buffer-absolute.
    pub cursor_position: Coord,
    /// The active text attribute.
    pub attributes: LegacyAttributes,
}

/// Cursor shape and visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorInfo {
    /// Cell coverage percentage (legacy console notion of cursor height).
    pub size: u32,
    pub visible: bool,
}

pub trait ConsoleApi {
    /// Snapshot of buffer size, viewport, cursor, and active attribute.
    fn get_buffer_info(&self) -> ApiResult<BufferInfo>;
    /// Write back buffer-level state; used for buffer resizes.
    fn set_buffer_info(&mut self, info: &BufferInfo) -> ApiResult<()>;

    fn set_cursor_position(&mut self, pos: Coord) -> ApiResult<()>;
    fn get_cursor_info(&self) -> ApiResult<CursorInfo>;
    fn set_cursor_info(&mut self, info: &CursorInfo) -> ApiResult<()>;

    /// Move the window. `absolute` means `window` is the new viewport;
    /// otherwise it holds per-edge deltas.
    fn set_window_info(&mut self, absolute: bool, window: Rect) -> ApiResult<()>;

    /// Write `count` copies of `ch` starting at `start`, wrapping rows.
    /// Returns the number of cells written.
    fn fill_char(&mut self, ch: char, count: u32, start: Coord) -> ApiResult<u32>;
    /// Write `count` copies of `attr` starting at `start`, wrapping rows.
    fn fill_attributes(&mut self, attr: LegacyAttributes, count: u32, start: Coord)
        -> ApiResult<u32>;

    /// Merge `attr` into the active attribute, touching only the groups
    /// whose flag is set.
    fn set_legacy_attributes(
        &mut self,
        attr: LegacyAttributes,
        foreground: bool,
        background: bool,
        meta: bool,
    ) -> ApiResult<()>;
    /// Switch one color channel to an indexed or RGB color.
    fn set_extended_attribute(&mut self, color: ExtendedColor, foreground: bool) -> ApiResult<()>;

    /// Append events to the input queue. Returns the number written.
    fn write_input(&mut self, events: &[KeyEvent]) -> ApiResult<usize>;
    /// Push events in front of any pending input, preserving their order.
    /// Status-report responses go through here so they outrun typed input.
    fn prepend_input(&mut self, events: &[KeyEvent]) -> ApiResult<usize>;

    /// Move `source` so its top-left corner lands on `dest`, clipped to
    /// `clip` on both the read and write side, back-filling with `fill`.
    fn scroll_region(
        &mut self,
        source: Rect,
        clip: Option<Rect>,
        dest: Coord,
        fill: Cell,
    ) -> ApiResult<()>;

    /// Install or clear the scrolling margins.
    fn set_scrolling_region(&mut self, margins: Option<Margins>) -> ApiResult<()>;

    fn set_cursor_keys_mode(&mut self, application_mode: bool) -> ApiResult<()>;
    fn set_keypad_mode(&mut self, application_mode: bool) -> ApiResult<()>;
    fn set_cursor_blinking(&mut self, enabled: bool) -> ApiResult<()>;

    fn set_window_title(&mut self, title: &str) -> ApiResult<()>;

    fn use_alternate_screen_buffer(&mut self) -> ApiResult<()>;
    fn use_main_screen_buffer(&mut self) -> ApiResult<()>;

    /// Cursor up one line, scrolling the region down when already at its top.
    fn reverse_line_feed(&mut self) -> ApiResult<()>;

    /// Set a tab stop in the cursor's column.
    fn horizontal_tab_set(&mut self) -> ApiResult<()>;
    /// Move the cursor forward by `count` tab stops.
    fn forward_tab(&mut self, count: u16) -> ApiResult<()>;
    /// Move the cursor backward by `count` tab stops.
    fn backwards_tab(&mut self, count: u16) -> ApiResult<()>;
    /// Clear the stop in the cursor's column, or all of them.
    fn tab_clear(&mut self, clear_all: bool) -> ApiResult<()>;

    fn enable_vt200_mouse_mode(&mut self, enabled: bool) -> ApiResult<()>;
    fn enable_utf8_extended_mouse_mode(&mut self, enabled: bool) -> ApiResult<()>;
    fn enable_sgr_extended_mouse_mode(&mut self, enabled: bool) -> ApiResult<()>;
    fn enable_button_event_mouse_mode(&mut self, enabled: bool) -> ApiResult<()>;
    fn enable_any_event_mouse_mode(&mut self, enabled: bool) -> ApiResult<()>;
    fn enable_alternate_scroll(&mut self, enabled: bool) -> ApiResult<()>;
}
