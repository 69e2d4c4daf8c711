//! An in-memory console.
//!
//! [`SoftConsole`] realizes the capability interface over a plain
//! [`Grid`]: a headless screen buffer with a viewport, cursor, attribute
//! state, margins, tab stops, and an input queue, but no window and no
//! renderer. Headless sessions run against it directly, and the test suite
//! builds its failure-injecting double on top of it.

use std::collections::VecDeque;

use vtcon_core::{
    Cell, Coord, ExtendedColor, Grid, KeyEvent, LegacyAttributes, Margins, Rect, TabStops,
};

use crate::conapi::{ApiError, ApiResult, BufferInfo, ConsoleApi, CursorInfo};

/// Which representation is live for one color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSlot {
    /// The channel renders from its legacy attribute bits.
    #[default]
    Legacy,
    /// The channel renders from an indexed or RGB color; the legacy bits
    /// are dormant until a legacy call touches the channel again.
    Extended(ExtendedColor),
}

/// Input modes toggled through the adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleModes {
    pub cursor_keys_application: bool,
    pub keypad_application: bool,
    pub cursor_blinking: bool,
    pub vt200_mouse: bool,
    pub utf8_extended_mouse: bool,
    pub sgr_extended_mouse: bool,
    pub button_event_mouse: bool,
    pub any_event_mouse: bool,
    pub alternate_scroll: bool,
}

pub struct SoftConsole {
    grid: Grid,
    viewport: Rect,
    cursor: Coord,
    cursor_info: CursorInfo,
    attributes: LegacyAttributes,
    foreground: ColorSlot,
    background: ColorSlot,
    margins: Option<Margins>,
    tabs: TabStops,
    modes: ConsoleModes,
    title: Option<String>,
    using_alternate_buffer: bool,
    input: VecDeque<KeyEvent>,
}

impl SoftConsole {
    /// A console over a fresh blank buffer. The viewport must lie inside
    /// the buffer; the cursor starts at the viewport origin.
    pub fn new(buffer_size: Coord, viewport: Rect) -> Self {
        let cols = buffer_size.x.max(0) as usize;
        let rows = buffer_size.y.max(0) as usize;
        SoftConsole {
            grid: Grid::new(cols, rows),
            viewport,
            cursor: Coord::new(viewport.left, viewport.top),
            cursor_info: CursorInfo {
                size: 25,
                visible: true,
            },
            attributes: LegacyAttributes::empty(),
            foreground: ColorSlot::Legacy,
            background: ColorSlot::Legacy,
            margins: None,
            tabs: TabStops::new(cols),
            modes: ConsoleModes::default(),
            title: None,
            using_alternate_buffer: false,
            input: VecDeque::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Place the cursor without the bounds check `set_cursor_position`
    /// applies.
    pub fn set_cursor(&mut self, pos: Coord) {
        self.cursor = pos;
    }

    pub fn attributes(&self) -> LegacyAttributes {
        self.attributes
    }

    pub fn set_attributes(&mut self, attr: LegacyAttributes) {
        self.attributes = attr;
    }

    pub fn cursor_state(&self) -> CursorInfo {
        self.cursor_info
    }

    pub fn set_cursor_state(&mut self, info: CursorInfo) {
        self.cursor_info = info;
    }

    pub fn foreground(&self) -> ColorSlot {
        self.foreground
    }

    pub fn background(&self) -> ColorSlot {
        self.background
    }

    pub fn margins(&self) -> Option<Margins> {
        self.margins
    }

    pub fn tabs(&self) -> &TabStops {
        &self.tabs
    }

    pub fn modes(&self) -> &ConsoleModes {
        &self.modes
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn using_alternate_buffer(&self) -> bool {
        self.using_alternate_buffer
    }

    pub fn input(&self) -> &VecDeque<KeyEvent> {
        &self.input
    }

    /// Drain the input queue, front first.
    pub fn take_input(&mut self) -> Vec<KeyEvent> {
        self.input.drain(..).collect()
    }

    /// The region scrolling is confined to: the margins if set, otherwise
    /// the whole viewport. Buffer-absolute, half-open.
    fn scroll_bounds(&self) -> Rect {
        match self.margins {
            Some(m) => Rect::new(
                self.viewport.top + m.top,
                self.viewport.top + m.bottom + 1,
                self.viewport.left,
                self.viewport.right,
            ),
            None => self.viewport,
        }
    }

    fn merge_attributes(&mut self, mask: LegacyAttributes, value: LegacyAttributes) {
        self.attributes = (self.attributes - mask) | (value & mask);
    }
}

impl ConsoleApi for SoftConsole {
    fn get_buffer_info(&self) -> ApiResult<BufferInfo> {
        Ok(BufferInfo {
            buffer_size: self.grid.size(),
            viewport: self.viewport,
            cursor_position: self.cursor,
            attributes: self.attributes,
        })
    }

    fn set_buffer_info(&mut self, info: &BufferInfo) -> ApiResult<()> {
        let cols = info.buffer_size.x.max(0) as usize;
        let rows = info.buffer_size.y.max(0) as usize;
        self.grid.resize(cols, rows);
        self.tabs.resize(cols);
        self.viewport = info.viewport;
        self.cursor = info.cursor_position;
        self.attributes = info.attributes;
        Ok(())
    }

    fn set_cursor_position(&mut self, pos: Coord) -> ApiResult<()> {
        if self.grid.cell(pos).is_none() {
            return Err(ApiError);
        }
        self.cursor = pos;
        Ok(())
    }

    fn get_cursor_info(&self) -> ApiResult<CursorInfo> {
        Ok(self.cursor_info)
    }

    fn set_cursor_info(&mut self, info: &CursorInfo) -> ApiResult<()> {
        self.cursor_info = *info;
        Ok(())
    }

    fn set_window_info(&mut self, absolute: bool, window: Rect) -> ApiResult<()> {
        self.viewport = if absolute {
            window
        } else {
            Rect::new(
                self.viewport.top + window.top,
                self.viewport.bottom + window.bottom,
                self.viewport.left + window.left,
                self.viewport.right + window.right,
            )
        };
        Ok(())
    }

    fn fill_char(&mut self, ch: char, count: u32, start: Coord) -> ApiResult<u32> {
        Ok(self.grid.fill_chars(ch, count, start))
    }

    fn fill_attributes(
        &mut self,
        attr: LegacyAttributes,
        count: u32,
        start: Coord,
    ) -> ApiResult<u32> {
        Ok(self.grid.fill_attributes(attr, count, start))
    }

    fn set_legacy_attributes(
        &mut self,
        attr: LegacyAttributes,
        foreground: bool,
        background: bool,
        meta: bool,
    ) -> ApiResult<()> {
        if foreground {
            self.merge_attributes(LegacyAttributes::FG_ATTRS, attr);
            self.foreground = ColorSlot::Legacy;
        }
        if background {
            self.merge_attributes(LegacyAttributes::BG_ATTRS, attr);
            self.background = ColorSlot::Legacy;
        }
        if meta {
            self.merge_attributes(LegacyAttributes::META_ATTRS, attr);
        }
        Ok(())
    }

    fn set_extended_attribute(&mut self, color: ExtendedColor, foreground: bool) -> ApiResult<()> {
        // The first 16 palette entries map straight onto the legacy nibbles,
        // so they keep the channel in legacy representation.
        let legacy = match color {
            ExtendedColor::Indexed(index) => LegacyAttributes::from_xterm_index(index, foreground),
            ExtendedColor::Rgb(..) => None,
        };
        match legacy {
            Some(bits) => {
                let mask = if foreground {
                    LegacyAttributes::FG_ATTRS
                } else {
                    LegacyAttributes::BG_ATTRS
                };
                self.merge_attributes(mask, bits);
                if foreground {
                    self.foreground = ColorSlot::Legacy;
                } else {
                    self.background = ColorSlot::Legacy;
                }
            }
            None => {
                if foreground {
                    self.foreground = ColorSlot::Extended(color);
                } else {
                    self.background = ColorSlot::Extended(color);
                }
            }
        }
        Ok(())
    }

    fn write_input(&mut self, events: &[KeyEvent]) -> ApiResult<usize> {
        self.input.extend(events.iter().copied());
        Ok(events.len())
    }

    fn prepend_input(&mut self, events: &[KeyEvent]) -> ApiResult<usize> {
        for event in events.iter().rev() {
            self.input.push_front(*event);
        }
        Ok(events.len())
    }

    fn scroll_region(
        &mut self,
        source: Rect,
        clip: Option<Rect>,
        dest: Coord,
        fill: Cell,
    ) -> ApiResult<()> {
        self.grid.scroll_region(source, clip, dest, fill);
        Ok(())
    }

    fn set_scrolling_region(&mut self, margins: Option<Margins>) -> ApiResult<()> {
        self.margins = margins;
        Ok(())
    }

    fn set_cursor_keys_mode(&mut self, application_mode: bool) -> ApiResult<()> {
        self.modes.cursor_keys_application = application_mode;
        Ok(())
    }

    fn set_keypad_mode(&mut self, application_mode: bool) -> ApiResult<()> {
        self.modes.keypad_application = application_mode;
        Ok(())
    }

    fn set_cursor_blinking(&mut self, enabled: bool) -> ApiResult<()> {
        self.modes.cursor_blinking = enabled;
        Ok(())
    }

    fn set_window_title(&mut self, title: &str) -> ApiResult<()> {
        self.title = Some(title.to_string());
        Ok(())
    }

    fn use_alternate_screen_buffer(&mut self) -> ApiResult<()> {
        self.using_alternate_buffer = true;
        Ok(())
    }

    fn use_main_screen_buffer(&mut self) -> ApiResult<()> {
        self.using_alternate_buffer = false;
        Ok(())
    }

    fn reverse_line_feed(&mut self) -> ApiResult<()> {
        let bounds = self.scroll_bounds();
        if self.cursor.y > bounds.top {
            self.cursor.y -= 1;
        } else {
            // At the top of the region: the region slides down instead.
            let fill = Cell::new(' ', self.attributes);
            self.grid.scroll_region(
                bounds,
                Some(bounds),
                Coord::new(bounds.left, bounds.top + 1),
                fill,
            );
        }
        Ok(())
    }

    fn horizontal_tab_set(&mut self) -> ApiResult<()> {
        self.tabs.set(self.cursor.x.max(0) as usize);
        Ok(())
    }

    fn forward_tab(&mut self, count: u16) -> ApiResult<()> {
        let stop = self
            .tabs
            .next_stop(self.cursor.x.max(0) as usize, count as usize);
        self.cursor.x = (stop as i16).min(self.viewport.right - 1);
        Ok(())
    }

    fn backwards_tab(&mut self, count: u16) -> ApiResult<()> {
        let stop = self
            .tabs
            .prev_stop(self.cursor.x.max(0) as usize, count as usize);
        self.cursor.x = (stop as i16).max(self.viewport.left);
        Ok(())
    }

    fn tab_clear(&mut self, clear_all: bool) -> ApiResult<()> {
        if clear_all {
            self.tabs.clear_all();
        } else {
            self.tabs.clear(self.cursor.x.max(0) as usize);
        }
        Ok(())
    }

    fn enable_vt200_mouse_mode(&mut self, enabled: bool) -> ApiResult<()> {
        self.modes.vt200_mouse = enabled;
        Ok(())
    }

    fn enable_utf8_extended_mouse_mode(&mut self, enabled: bool) -> ApiResult<()> {
        self.modes.utf8_extended_mouse = enabled;
        Ok(())
    }

    fn enable_sgr_extended_mouse_mode(&mut self, enabled: bool) -> ApiResult<()> {
        self.modes.sgr_extended_mouse = enabled;
        Ok(())
    }

    fn enable_button_event_mouse_mode(&mut self, enabled: bool) -> ApiResult<()> {
        self.modes.button_event_mouse = enabled;
        Ok(())
    }

    fn enable_any_event_mouse_mode(&mut self, enabled: bool) -> ApiResult<()> {
        self.modes.any_event_mouse = enabled;
        Ok(())
    }

    fn enable_alternate_scroll(&mut self, enabled: bool) -> ApiResult<()> {
        self.modes.alternate_scroll = enabled;
        Ok(())
    }
}
