//! Shared test support: a failure-injecting console double and the standard
//! buffer scene the behavior tests run against.
//!
//! The double delegates every capability call to a [`SoftConsole`] unless
//! the matching switch in [`Failures`] is thrown, in which case the call
//! reports [`ApiError`] without touching anything. Tests flip exactly the
//! switch whose failure path they are probing.

#![allow(dead_code)]

use vtcon_adapter::{
    ApiError, ApiResult, BufferInfo, ConsoleApi, CursorInfo, SoftConsole, VtAdapter,
};
use vtcon_core::{Cell, Coord, ExtendedColor, Grid, KeyEvent, LegacyAttributes, Margins, Rect};

/// The buffer is much larger than the viewport so every operation has
/// out-of-viewport cells to leave alone.
pub fn buffer_size() -> Coord {
    Coord::new(100, 600)
}

/// A viewport in the middle of the buffer: excess rows and columns on all
/// sides. Bottom/right exclusive.
pub fn viewport() -> Rect {
    Rect::new(20, 49, 30, 59)
}

/// Gray on black, the session default the adapter resets to.
pub fn default_fill() -> LegacyAttributes {
    LegacyAttributes::FG_BLUE | LegacyAttributes::FG_GREEN | LegacyAttributes::FG_RED
}

/// A loud attribute for erase operations, so erased cells are unmistakable.
pub fn erase_attr() -> LegacyAttributes {
    LegacyAttributes::FG_BLUE
        | LegacyAttributes::FG_GREEN
        | LegacyAttributes::BG_RED
        | LegacyAttributes::BG_INTENSITY
}

pub fn center() -> Coord {
    let vp = viewport();
    Coord::new(
        vp.left + (vp.right - vp.left) / 2,
        vp.top + (vp.bottom - vp.top) / 2,
    )
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Failures {
    pub get_buffer_info: bool,
    pub set_buffer_info: bool,
    pub set_cursor_position: bool,
    pub get_cursor_info: bool,
    pub set_cursor_info: bool,
    pub set_window_info: bool,
    pub fill_char: bool,
    pub fill_attributes: bool,
    pub set_legacy_attributes: bool,
    pub set_extended_attribute: bool,
    pub write_input: bool,
    pub prepend_input: bool,
    pub scroll_region: bool,
    pub set_scrolling_region: bool,
    pub set_cursor_keys_mode: bool,
    pub set_keypad_mode: bool,
    pub set_cursor_blinking: bool,
    pub set_window_title: bool,
    pub use_alternate_screen_buffer: bool,
    pub use_main_screen_buffer: bool,
    pub reverse_line_feed: bool,
    pub horizontal_tab_set: bool,
    pub forward_tab: bool,
    pub backwards_tab: bool,
    pub tab_clear: bool,
    pub mouse_modes: bool,
}

pub struct TestConsole {
    pub inner: SoftConsole,
    pub fail: Failures,
}

impl TestConsole {
    pub fn new() -> Self {
        let mut inner = SoftConsole::new(buffer_size(), viewport());
        inner.set_cursor(center());
        inner.set_attributes(default_fill());
        inner.set_cursor_state(CursorInfo {
            size: 33,
            visible: true,
        });
        TestConsole {
            inner,
            fail: Failures::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        self.inner.grid()
    }
}

fn gate(fail: bool) -> ApiResult<()> {
    if fail {
        Err(ApiError)
    } else {
        Ok(())
    }
}

impl ConsoleApi for TestConsole {
    fn get_buffer_info(&self) -> ApiResult<BufferInfo> {
        gate(self.fail.get_buffer_info)?;
        self.inner.get_buffer_info()
    }

    fn set_buffer_info(&mut self, info: &BufferInfo) -> ApiResult<()> {
        gate(self.fail.set_buffer_info)?;
        self.inner.set_buffer_info(info)
    }

    fn set_cursor_position(&mut self, pos: Coord) -> ApiResult<()> {
        gate(self.fail.set_cursor_position)?;
        self.inner.set_cursor_position(pos)
    }

    fn get_cursor_info(&self) -> ApiResult<CursorInfo> {
        gate(self.fail.get_cursor_info)?;
        self.inner.get_cursor_info()
    }

    fn set_cursor_info(&mut self, info: &CursorInfo) -> ApiResult<()> {
        gate(self.fail.set_cursor_info)?;
        self.inner.set_cursor_info(info)
    }

    fn set_window_info(&mut self, absolute: bool, window: Rect) -> ApiResult<()> {
        gate(self.fail.set_window_info)?;
        self.inner.set_window_info(absolute, window)
    }

    fn fill_char(&mut self, ch: char, count: u32, start: Coord) -> ApiResult<u32> {
        gate(self.fail.fill_char)?;
        self.inner.fill_char(ch, count, start)
    }

    fn fill_attributes(
        &mut self,
        attr: LegacyAttributes,
        count: u32,
        start: Coord,
    ) -> ApiResult<u32> {
        gate(self.fail.fill_attributes)?;
        self.inner.fill_attributes(attr, count, start)
    }

    fn set_legacy_attributes(
        &mut self,
        attr: LegacyAttributes,
        foreground: bool,
        background: bool,
        meta: bool,
    ) -> ApiResult<()> {
        gate(self.fail.set_legacy_attributes)?;
        self.inner
            .set_legacy_attributes(attr, foreground, background, meta)
    }

    fn set_extended_attribute(&mut self, color: ExtendedColor, foreground: bool) -> ApiResult<()> {
        gate(self.fail.set_extended_attribute)?;
        self.inner.set_extended_attribute(color, foreground)
    }

    fn write_input(&mut self, events: &[KeyEvent]) -> ApiResult<usize> {
        gate(self.fail.write_input)?;
        self.inner.write_input(events)
    }

    fn prepend_input(&mut self, events: &[KeyEvent]) -> ApiResult<usize> {
        gate(self.fail.prepend_input)?;
        self.inner.prepend_input(events)
    }

    fn scroll_region(
        &mut self,
        source: Rect,
        clip: Option<Rect>,
        dest: Coord,
        fill: Cell,
    ) -> ApiResult<()> {
        gate(self.fail.scroll_region)?;
        self.inner.scroll_region(source, clip, dest, fill)
    }

    fn set_scrolling_region(&mut self, margins: Option<Margins>) -> ApiResult<()> {
        gate(self.fail.set_scrolling_region)?;
        self.inner.set_scrolling_region(margins)
    }

    fn set_cursor_keys_mode(&mut self, application_mode: bool) -> ApiResult<()> {
        gate(self.fail.set_cursor_keys_mode)?;
        self.inner.set_cursor_keys_mode(application_mode)
    }

    fn set_keypad_mode(&mut self, application_mode: bool) -> ApiResult<()> {
        gate(self.fail.set_keypad_mode)?;
        self.inner.set_keypad_mode(application_mode)
    }

    fn set_cursor_blinking(&mut self, enabled: bool) -> ApiResult<()> {
        gate(self.fail.set_cursor_blinking)?;
        self.inner.set_cursor_blinking(enabled)
    }

    fn set_window_title(&mut self, title: &str) -> ApiResult<()> {
        gate(self.fail.set_window_title)?;
        self.inner.set_window_title(title)
    }

    fn use_alternate_screen_buffer(&mut self) -> ApiResult<()> {
        gate(self.fail.use_alternate_screen_buffer)?;
        self.inner.use_alternate_screen_buffer()
    }

    fn use_main_screen_buffer(&mut self) -> ApiResult<()> {
        gate(self.fail.use_main_screen_buffer)?;
        self.inner.use_main_screen_buffer()
    }

    fn reverse_line_feed(&mut self) -> ApiResult<()> {
        gate(self.fail.reverse_line_feed)?;
        self.inner.reverse_line_feed()
    }

    fn horizontal_tab_set(&mut self) -> ApiResult<()> {
        gate(self.fail.horizontal_tab_set)?;
        self.inner.horizontal_tab_set()
    }

    fn forward_tab(&mut self, count: u16) -> ApiResult<()> {
        gate(self.fail.forward_tab)?;
        self.inner.forward_tab(count)
    }

    fn backwards_tab(&mut self, count: u16) -> ApiResult<()> {
        gate(self.fail.backwards_tab)?;
        self.inner.backwards_tab(count)
    }

    fn tab_clear(&mut self, clear_all: bool) -> ApiResult<()> {
        gate(self.fail.tab_clear)?;
        self.inner.tab_clear(clear_all)
    }

    fn enable_vt200_mouse_mode(&mut self, enabled: bool) -> ApiResult<()> {
        gate(self.fail.mouse_modes)?;
        self.inner.enable_vt200_mouse_mode(enabled)
    }

    fn enable_utf8_extended_mouse_mode(&mut self, enabled: bool) -> ApiResult<()> {
        gate(self.fail.mouse_modes)?;
        self.inner.enable_utf8_extended_mouse_mode(enabled)
    }

    fn enable_sgr_extended_mouse_mode(&mut self, enabled: bool) -> ApiResult<()> {
        gate(self.fail.mouse_modes)?;
        self.inner.enable_sgr_extended_mouse_mode(enabled)
    }

    fn enable_button_event_mouse_mode(&mut self, enabled: bool) -> ApiResult<()> {
        gate(self.fail.mouse_modes)?;
        self.inner.enable_button_event_mouse_mode(enabled)
    }

    fn enable_any_event_mouse_mode(&mut self, enabled: bool) -> ApiResult<()> {
        gate(self.fail.mouse_modes)?;
        self.inner.enable_any_event_mouse_mode(enabled)
    }

    fn enable_alternate_scroll(&mut self, enabled: bool) -> ApiResult<()> {
        gate(self.fail.mouse_modes)?;
        self.inner.enable_alternate_scroll(enabled)
    }
}

/// An adapter over a fresh double, cursor at the viewport center.
pub fn adapter() -> VtAdapter<TestConsole> {
    VtAdapter::new(TestConsole::new(), default_fill())
}

/// An adapter with the cursor placed at `pos`.
pub fn adapter_at(pos: Coord) -> VtAdapter<TestConsole> {
    let mut console = TestConsole::new();
    console.inner.set_cursor(pos);
    VtAdapter::new(console, default_fill())
}

/// The Q/R scene: buffer full of 'Q' cells, viewport full of 'R' cells, so
/// tests can see exactly which side of the boundary an operation touched.
pub fn q_attr() -> LegacyAttributes {
    LegacyAttributes::FG_BLUE | LegacyAttributes::BG_GREEN
}

pub fn r_attr() -> LegacyAttributes {
    LegacyAttributes::FG_RED | LegacyAttributes::BG_BLUE
}

pub fn fill_scene(console: &mut TestConsole) {
    let size = buffer_size();
    console
        .inner
        .grid_mut()
        .fill_rect(Rect::new(0, size.y, 0, size.x), 'Q', q_attr());
    console.inner.grid_mut().fill_rect(viewport(), 'R', r_attr());
}

/// Every cell of `rect`, minus `except`, holds `ch`/`attr`.
pub fn assert_region_except(
    grid: &Grid,
    rect: Rect,
    ch: char,
    attr: LegacyAttributes,
    except: Option<Rect>,
) {
    for y in rect.top..rect.bottom {
        for x in rect.left..rect.right {
            let pos = Coord::new(x, y);
            if except.is_some_and(|e| e.contains(pos)) {
                continue;
            }
            let cell = grid.cell(pos).unwrap();
            assert_eq!(
                cell.ch, ch,
                "char mismatch at ({}, {}): expected {:?}, found {:?}",
                x, y, ch, cell.ch
            );
            assert_eq!(
                cell.attr, attr,
                "attr mismatch at ({}, {}): expected {:?}, found {:?}",
                x, y, attr, cell.attr
            );
        }
    }
}

pub fn assert_region(grid: &Grid, rect: Rect, ch: char, attr: LegacyAttributes) {
    assert_region_except(grid, rect, ch, attr, None);
}

/// The string `text` with attribute `attr` sits at `start`.
pub fn assert_text(grid: &Grid, start: Coord, text: &str, attr: LegacyAttributes) {
    for (i, ch) in text.chars().enumerate() {
        let pos = Coord::new(start.x + i as i16, start.y);
        let cell = grid.cell(pos).unwrap();
        assert_eq!(cell.ch, ch, "char mismatch at ({}, {})", pos.x, pos.y);
        assert_eq!(cell.attr, attr, "attr mismatch at ({}, {})", pos.x, pos.y);
    }
}

/// Decode prepended response events back into the reply string, checking the
/// down/up pairing and the empty key/scan codes along the way.
pub fn decode_response(events: &[KeyEvent]) -> String {
    assert_eq!(events.len() % 2, 0, "responses come in down/up pairs");
    let mut text = String::new();
    for pair in events.chunks(2) {
        assert!(pair[0].key_down);
        assert!(!pair[1].key_down);
        assert_eq!(pair[0].ch, pair[1].ch);
        for event in pair {
            assert_eq!(event.repeat_count, 1);
            assert_eq!(event.virtual_key_code, 0);
            assert_eq!(event.virtual_scan_code, 0);
            assert_eq!(event.control_key_state, 0);
        }
        text.push(pair[0].ch);
    }
    text
}
