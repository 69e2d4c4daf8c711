//! The VT command dispatcher.
//!
//! One method per VT command family, invoked by the upstream parser with
//! already-parsed numeric parameters. Each call re-queries buffer state
//! through [`ConsoleApi`] (nothing is cached between calls), computes the new
//! state with clamping and overflow checks, and writes it back. The only
//! state the dispatcher keeps for itself is what has to survive between
//! sequences: the saved cursor, the scrolling margins, and the rendition
//! flags owned by the SGR engine in [`crate::graphics`].
//!
//! Failure is a first-class return, never a panic: bad parameters and
//! overflowing coordinate math are rejected before the buffer is touched,
//! and a declined capability call aborts whatever remained of the command.

use log::debug;
use vtcon_core::{response_events, Cell, Coord, LegacyAttributes, Margins, Rect};

use crate::conapi::{BufferInfo, ConsoleApi};
use crate::error::{DispatchError, DispatchResult};

/// Which part of the line or display ED/EL should erase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseKind {
    /// From the cursor (inclusive) to the end.
    ToEnd,
    /// From the beginning to the cursor (inclusive).
    FromBeginning,
    /// Everything.
    All,
    /// The buffer outside the viewport (ED 3, xterm's scrollback clear).
    Scrollback,
}

impl EraseKind {
    /// Map a raw ED/EL parameter value.
    pub fn from_param(param: u16) -> Option<Self> {
        match param {
            0 => Some(EraseKind::ToEnd),
            1 => Some(EraseKind::FromBeginning),
            2 => Some(EraseKind::All),
            3 => Some(EraseKind::Scrollback),
            _ => None,
        }
    }
}

/// DSR status type the adapter recognizes.
pub const STATUS_CURSOR_POSITION: u16 = 6;

/// TBC parameter: clear the stop in the cursor's column.
pub const TAB_CLEAR_CURRENT: u16 = 0;
/// TBC parameter: clear every stop.
pub const TAB_CLEAR_ALL: u16 = 3;

const DECCOLM_WIDE: u32 = 132;
const DECCOLM_NARROW: u32 = 80;

#[derive(Debug, Clone, Copy)]
enum CursorDirection {
    Up,
    Down,
    Left,
    Right,
    NextLine,
    PrevLine,
}

#[derive(Debug, Clone, Copy)]
enum ScrollDirection {
    Up,
    Down,
}

/// Convert a VT magnitude into the signed 16-bit range the console math
/// runs in. Out-of-range values fail the command outright; they are never
/// clamped.
fn to_short(value: u32) -> Result<i16, DispatchError> {
    i16::try_from(value).map_err(|_| DispatchError::Overflow)
}

fn checked_add(a: i16, b: i16) -> Result<i16, DispatchError> {
    a.checked_add(b).ok_or(DispatchError::Overflow)
}

fn checked_sub(a: i16, b: i16) -> Result<i16, DispatchError> {
    a.checked_sub(b).ok_or(DispatchError::Overflow)
}

/// The adapter: one instance per screen buffer / terminal session.
pub struct VtAdapter<C> {
    pub(crate) api: C,
    pub(crate) default_attributes: LegacyAttributes,
    /// Sticky intensity installed by SGR 1; see [`crate::graphics`].
    pub(crate) brightness: LegacyAttributes,
    /// DECSC cursor, kept in VT terms (1-based, viewport-relative) so a
    /// panned viewport still restores to the same visible spot.
    saved_cursor: Coord,
    margins: Option<Margins>,
}

impl<C: ConsoleApi> VtAdapter<C> {
    pub fn new(api: C, default_attributes: LegacyAttributes) -> Self {
        VtAdapter {
            api,
            default_attributes,
            brightness: LegacyAttributes::empty(),
            // Restore-without-save is defined to home the cursor.
            saved_cursor: Coord::new(1, 1),
            margins: None,
        }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut C {
        &mut self.api
    }

    pub fn into_api(self) -> C {
        self.api
    }

    /// The attribute SGR 0 resets to.
    pub fn update_default_attributes(&mut self, attr: LegacyAttributes) {
        self.default_attributes = attr;
    }

    // --- Cursor movement -------------------------------------------------

    /// CUU - cursor up.
    pub fn cursor_up(&mut self, distance: u32) -> DispatchResult {
        self.move_cursor(CursorDirection::Up, distance)
    }

    /// CUD - cursor down.
    pub fn cursor_down(&mut self, distance: u32) -> DispatchResult {
        self.move_cursor(CursorDirection::Down, distance)
    }

    /// CUF - cursor forward (right).
    pub fn cursor_forward(&mut self, distance: u32) -> DispatchResult {
        self.move_cursor(CursorDirection::Right, distance)
    }

    /// CUB - cursor backward (left).
    pub fn cursor_backward(&mut self, distance: u32) -> DispatchResult {
        self.move_cursor(CursorDirection::Left, distance)
    }

    /// CNL - cursor to the start of a following line.
    pub fn cursor_next_line(&mut self, distance: u32) -> DispatchResult {
        self.move_cursor(CursorDirection::NextLine, distance)
    }

    /// CPL - cursor to the start of a preceding line.
    pub fn cursor_prev_line(&mut self, distance: u32) -> DispatchResult {
        self.move_cursor(CursorDirection::PrevLine, distance)
    }

    fn move_cursor(&mut self, dir: CursorDirection, distance: u32) -> DispatchResult {
        let delta = to_short(distance)?;
        let info = self.api.get_buffer_info()?;
        let viewport = info.viewport;
        let mut cursor = info.cursor_position;

        // Next/previous line land on the left edge regardless of distance.
        if matches!(dir, CursorDirection::NextLine | CursorDirection::PrevLine) {
            cursor.x = viewport.left;
        }

        // A move that runs past the viewport bottoms out at the edge; only
        // arithmetic overflow is a failure.
        match dir {
            CursorDirection::Up | CursorDirection::PrevLine => {
                cursor.y = checked_sub(cursor.y, delta)?.max(viewport.top);
            }
            CursorDirection::Down | CursorDirection::NextLine => {
                cursor.y = checked_add(cursor.y, delta)?.min(viewport.bottom - 1);
            }
            CursorDirection::Left => {
                cursor.x = checked_sub(cursor.x, delta)?.max(viewport.left);
            }
            CursorDirection::Right => {
                cursor.x = checked_add(cursor.x, delta)?.min(viewport.right - 1);
            }
        }

        self.api.set_cursor_position(cursor)?;
        Ok(())
    }

    // --- Absolute positioning --------------------------------------------

    /// CUP - move to an exact row and column.
    pub fn cursor_position(&mut self, row: u32, col: u32) -> DispatchResult {
        self.move_to(Some(row), Some(col))
    }

    /// CHA - move to an exact column on the current line.
    pub fn cursor_horizontal_absolute(&mut self, col: u32) -> DispatchResult {
        self.move_to(None, Some(col))
    }

    /// VPA - move to an exact row in the current column.
    pub fn vertical_line_absolute(&mut self, row: u32) -> DispatchResult {
        self.move_to(Some(row), None)
    }

    /// An omitted axis keeps the cursor's current position on that axis.
    fn move_to(&mut self, row: Option<u32>, col: Option<u32>) -> DispatchResult {
        // VT positions are 1-based; zero is not a position (the parser maps
        // a defaulted parameter to 1, never 0), so it is rejected outright.
        if row == Some(0) || col == Some(0) {
            return Err(DispatchError::InvalidParameter);
        }
        let row = row.map(|r| to_short(r - 1)).transpose()?;
        let col = col.map(|c| to_short(c - 1)).transpose()?;

        let info = self.api.get_buffer_info()?;
        let viewport = info.viewport;
        let cursor = info.cursor_position;

        // VT coordinates are viewport-relative; offset them to buffer space.
        let y = match row {
            Some(r) => checked_add(r, viewport.top)?,
            None => cursor.y,
        };
        let x = match col {
            Some(c) => checked_add(c, viewport.left)?,
            None => cursor.x,
        };

        self.api.set_cursor_position(viewport.clamp(Coord::new(x, y)))?;
        Ok(())
    }

    /// DECSC - save the cursor position.
    pub fn cursor_save_position(&mut self) -> DispatchResult {
        let info = self.api.get_buffer_info()?;
        self.saved_cursor = Coord::new(
            (info.cursor_position.x - info.viewport.left + 1).max(1),
            (info.cursor_position.y - info.viewport.top + 1).max(1),
        );
        Ok(())
    }

    /// DECRC - restore the saved cursor position, or home if none was saved.
    pub fn cursor_restore_position(&mut self) -> DispatchResult {
        let row = self.saved_cursor.y as u32;
        let col = self.saved_cursor.x as u32;
        self.move_to(Some(row), Some(col))
    }

    /// DECTCEM - show or hide the cursor, leaving its shape alone.
    pub fn cursor_visibility(&mut self, visible: bool) -> DispatchResult {
        let mut info = self.api.get_cursor_info()?;
        info.visible = visible;
        self.api.set_cursor_info(&info)?;
        Ok(())
    }

    // --- Insert/delete ---------------------------------------------------

    /// ICH - insert blanks at the cursor, pushing the rest of the line right.
    pub fn insert_character(&mut self, count: u32) -> DispatchResult {
        self.insert_delete_chars(count, true)
    }

    /// DCH - delete at the cursor, pulling the rest of the line left and
    /// filling in blanks from the right edge.
    pub fn delete_character(&mut self, count: u32) -> DispatchResult {
        self.insert_delete_chars(count, false)
    }

    /// Both operations cut the remainder of the cursor's row and paste it
    /// shifted; the viewport clip keeps every effect inside the row's
    /// visible span.
    fn insert_delete_chars(&mut self, count: u32, insert: bool) -> DispatchResult {
        let distance = to_short(count)?;
        let info = self.api.get_buffer_info()?;
        let viewport = info.viewport;
        let cursor = info.cursor_position;

        let mut source = Rect::new(cursor.y, cursor.y + 1, cursor.x, viewport.right);
        let mut dest = cursor;
        if insert {
            dest.x = checked_add(dest.x, distance)?;
        } else {
            source.left = checked_add(source.left, distance)?;
        }

        let fill = Cell::new(' ', info.attributes);
        if source.left >= viewport.right || dest.x >= viewport.right {
            // The shift pushes everything out of the viewport; what's left of
            // the row is all blank fill.
            let remaining = (viewport.right - cursor.x).max(0) as u32;
            self.api.fill_char(' ', remaining, cursor)?;
            self.api.fill_attributes(info.attributes, remaining, cursor)?;
        } else {
            self.api.scroll_region(source, Some(viewport), dest, fill)?;
        }
        Ok(())
    }

    // --- Erase -----------------------------------------------------------

    /// ECH - erase characters on the cursor's line, never wrapping.
    pub fn erase_characters(&mut self, count: u32) -> DispatchResult {
        let info = self.api.get_buffer_info()?;
        let cursor = info.cursor_position;
        let remaining = (info.viewport.right - cursor.x).max(0) as u32;
        self.fill_span(cursor, count.min(remaining), info.attributes)
    }

    /// EL - erase within the cursor's line.
    pub fn erase_in_line(&mut self, kind: EraseKind) -> DispatchResult {
        if kind == EraseKind::Scrollback {
            return Err(DispatchError::InvalidParameter);
        }
        let info = self.api.get_buffer_info()?;
        let cursor_y = info.cursor_position.y;
        self.erase_line_span(&info, kind, cursor_y)
    }

    /// ED - erase within the viewport, or the scrollback for ED 3.
    pub fn erase_in_display(&mut self, kind: EraseKind) -> DispatchResult {
        if kind == EraseKind::Scrollback {
            return self.erase_scrollback();
        }
        let info = self.api.get_buffer_info()?;
        let viewport = info.viewport;
        let cursor = info.cursor_position;

        // Three bands: rows strictly above the cursor, the cursor's own row,
        // rows strictly below. Which bands participate depends on the kind.
        if matches!(kind, EraseKind::FromBeginning | EraseKind::All) {
            for row in viewport.top..cursor.y {
                self.erase_line_span(&info, EraseKind::All, row)?;
            }
        }
        self.erase_line_span(&info, kind, cursor.y)?;
        if matches!(kind, EraseKind::ToEnd | EraseKind::All) {
            for row in (cursor.y + 1)..viewport.bottom {
                self.erase_line_span(&info, EraseKind::All, row)?;
            }
        }
        Ok(())
    }

    fn erase_line_span(&mut self, info: &BufferInfo, kind: EraseKind, row: i16) -> DispatchResult {
        let viewport = info.viewport;
        let cursor = info.cursor_position;
        let (start_x, length) = match kind {
            // Inclusive of the cursor cell, hence the +1.
            EraseKind::FromBeginning => (viewport.left, cursor.x - viewport.left + 1),
            EraseKind::ToEnd => (cursor.x, viewport.right - cursor.x),
            EraseKind::All | EraseKind::Scrollback => (viewport.left, viewport.width()),
        };
        self.fill_span(
            Coord::new(start_x, row),
            length.max(0) as u32,
            info.attributes,
        )
    }

    /// Blank `length` cells from `start` in the erase attribute.
    fn fill_span(
        &mut self,
        start: Coord,
        length: u32,
        attr: LegacyAttributes,
    ) -> DispatchResult {
        self.api.fill_char(' ', length, start)?;
        self.api.fill_attributes(attr, length, start)?;
        Ok(())
    }

    /// ED 3: relocate the viewport to the buffer origin (its cells stay
    /// put), blank everything below and to the right of it, and keep the
    /// cursor at the same offset within the window.
    fn erase_scrollback(&mut self) -> DispatchResult {
        let info = self.api.get_buffer_info()?;
        let viewport = info.viewport;
        let width = viewport.width();
        let height = viewport.height();
        let relative_cursor = Coord::new(
            info.cursor_position.x - viewport.left,
            info.cursor_position.y - viewport.top,
        );

        self.api
            .set_window_info(true, Rect::new(0, height, 0, width))?;

        // Everything below the relocated viewport, in one wrapping pass.
        let below_count =
            (info.buffer_size.x as u32) * ((info.buffer_size.y - height).max(0) as u32);
        self.fill_span(Coord::new(0, height), below_count, info.attributes)?;

        // The strip to its right, row by row so the fill doesn't wrap back
        // into the viewport.
        let right_count = (info.buffer_size.x - width).max(0) as u32;
        for row in 0..height {
            self.fill_span(Coord::new(width, row), right_count, info.attributes)?;
        }

        self.api.set_cursor_position(relative_cursor)?;
        Ok(())
    }

    // --- Scrolling -------------------------------------------------------

    /// SU - scroll the margin region up (text moves up, blanks at the bottom).
    pub fn scroll_up(&mut self, distance: u32) -> DispatchResult {
        self.scroll(ScrollDirection::Up, distance)
    }

    /// SD - scroll the margin region down.
    pub fn scroll_down(&mut self, distance: u32) -> DispatchResult {
        self.scroll(ScrollDirection::Down, distance)
    }

    fn scroll(&mut self, dir: ScrollDirection, distance: u32) -> DispatchResult {
        let delta = to_short(distance)?;
        let info = self.api.get_buffer_info()?;
        let viewport = info.viewport;

        // Scrolling is confined to the margin region, or the whole viewport
        // when no margins are set.
        let bounds = match self.margins {
            Some(m) => Rect::new(
                checked_add(viewport.top, m.top)?,
                checked_add(viewport.top, checked_add(m.bottom, 1)?)?,
                viewport.left,
                viewport.right,
            ),
            None => viewport,
        };
        let dest_y = match dir {
            ScrollDirection::Up => checked_sub(bounds.top, delta)?,
            ScrollDirection::Down => checked_add(bounds.top, delta)?,
        };

        // The clip discards rows pushed past the region and back-fills their
        // places. The cursor does not participate in scrolling.
        let fill = Cell::new(' ', info.attributes);
        self.api.scroll_region(
            bounds,
            Some(bounds),
            Coord::new(bounds.left, dest_y),
            fill,
        )?;
        Ok(())
    }

    /// IL - insert blank lines at the cursor, pushing lines below it down.
    pub fn insert_line(&mut self, distance: u32) -> DispatchResult {
        self.insert_delete_lines(distance, true)
    }

    /// DL - delete lines at the cursor, pulling lines below it up.
    pub fn delete_line(&mut self, distance: u32) -> DispatchResult {
        self.insert_delete_lines(distance, false)
    }

    fn insert_delete_lines(&mut self, distance: u32, insert: bool) -> DispatchResult {
        let delta = to_short(distance)?;
        let info = self.api.get_buffer_info()?;
        let viewport = info.viewport;
        let cursor = info.cursor_position;

        // Only the cursor's row and everything below it move.
        let source = Rect::new(cursor.y, viewport.bottom, viewport.left, viewport.right);
        let dest_y = if insert {
            checked_add(cursor.y, delta)?
        } else {
            checked_sub(cursor.y, delta)?
        };

        let fill = Cell::new(' ', info.attributes);
        self.api.scroll_region(
            source,
            Some(source),
            Coord::new(viewport.left, dest_y),
            fill,
        )?;
        Ok(())
    }

    // --- Margins ---------------------------------------------------------

    /// DECSTBM - set or clear the top/bottom scrolling margins.
    ///
    /// `top` and `bottom` are 1-based viewport lines; 0 means "default".
    /// `(0, 0)` clears the margins, a lone top implies bottom = viewport
    /// bottom, and margins that span the whole viewport normalize to the
    /// cleared state however they were spelled. The cursor is homed after a
    /// successful change.
    pub fn set_top_bottom_scrolling_margins(&mut self, top: u32, bottom: u32) -> DispatchResult {
        if top != 0 && bottom != 0 && bottom < top {
            return Err(DispatchError::InvalidParameter);
        }
        let top = to_short(top)?;
        let bottom = to_short(bottom)?;

        let info = self.api.get_buffer_info()?;
        let height = info.viewport.height();

        let margins = if top == 0 && bottom == 0 {
            None
        } else {
            let bottom = if bottom == 0 { height } else { bottom };
            // 1-based VT lines to 0-based inclusive rows.
            let top = (top - 1).max(0);
            let bottom = (bottom - 1).max(0);
            if top == 0 && bottom == height - 1 {
                None
            } else {
                Some(Margins::new(top, bottom))
            }
        };

        self.margins = margins;
        self.api.set_scrolling_region(margins)?;
        self.cursor_position(1, 1)
    }

    /// The margins currently in force, if any.
    pub fn margins(&self) -> Option<Margins> {
        self.margins
    }

    // --- Device queries --------------------------------------------------

    /// DSR - report console status back through the input queue.
    /// Unrecognized status types fail without touching the buffer.
    pub fn device_status_report(&mut self, status: u16) -> DispatchResult {
        match status {
            STATUS_CURSOR_POSITION => self.cursor_position_report(),
            _ => Err(DispatchError::InvalidParameter),
        }
    }

    /// DA - identify ourselves: a VT101 with no options.
    pub fn device_attributes(&mut self) -> DispatchResult {
        self.write_response("\x1b[?1;0c")
    }

    /// DSR-CPR: the cursor position, 1-based and viewport-relative.
    fn cursor_position_report(&mut self) -> DispatchResult {
        let info = self.api.get_buffer_info()?;
        let row = info.cursor_position.y - info.viewport.top + 1;
        let col = info.cursor_position.x - info.viewport.left + 1;
        let response = format!("\x1b[{};{}R", row, col);
        self.write_response(&response)
    }

    /// Replies travel as synthesized key-down/key-up pairs, prepended so
    /// they beat any input already waiting in the queue.
    fn write_response(&mut self, text: &str) -> DispatchResult {
        let events = response_events(text);
        self.api.prepend_input(&events)?;
        Ok(())
    }

    // --- Modes and pass-throughs -----------------------------------------

    /// DECCKM - cursor keys application (true) or normal (false) mode.
    pub fn set_cursor_keys_mode(&mut self, application_mode: bool) -> DispatchResult {
        self.api.set_cursor_keys_mode(application_mode)?;
        Ok(())
    }

    /// DECKPAM/DECKPNM - keypad application (true) or numeric (false) mode.
    pub fn set_keypad_mode(&mut self, application_mode: bool) -> DispatchResult {
        self.api.set_keypad_mode(application_mode)?;
        Ok(())
    }

    /// ATT610 - start or stop cursor blinking.
    pub fn enable_cursor_blinking(&mut self, enabled: bool) -> DispatchResult {
        self.api.set_cursor_blinking(enabled)?;
        Ok(())
    }

    /// RI - reverse line feed.
    pub fn reverse_line_feed(&mut self) -> DispatchResult {
        self.api.reverse_line_feed()?;
        Ok(())
    }

    /// OSC window title.
    pub fn set_window_title(&mut self, title: &str) -> DispatchResult {
        self.api.set_window_title(title)?;
        Ok(())
    }

    /// ASBSET - switch to the alternate screen buffer.
    pub fn use_alternate_screen_buffer(&mut self) -> DispatchResult {
        self.api.use_alternate_screen_buffer()?;
        Ok(())
    }

    /// ASBRST - return to the main screen buffer.
    pub fn use_main_screen_buffer(&mut self) -> DispatchResult {
        self.api.use_main_screen_buffer()?;
        Ok(())
    }

    /// DECSCPP - set the buffer width in columns.
    pub fn set_columns(&mut self, columns: u32) -> DispatchResult {
        let columns = to_short(columns)?;
        let mut info = self.api.get_buffer_info()?;
        info.buffer_size.x = columns;
        self.api.set_buffer_info(&info)?;
        Ok(())
    }

    /// DECSET - enable private mode parameters.
    pub fn set_private_modes(&mut self, params: &[u16]) -> DispatchResult {
        self.set_reset_private_modes(params, true)
    }

    /// DECRST - disable private mode parameters.
    pub fn reset_private_modes(&mut self, params: &[u16]) -> DispatchResult {
        self.set_reset_private_modes(params, false)
    }

    /// Params we support may be chained with ones we don't; attempt every
    /// one, and fail overall if any one failed.
    fn set_reset_private_modes(&mut self, params: &[u16], enable: bool) -> DispatchResult {
        let mut result = Ok(());
        for &param in params {
            if let Err(err) = self.private_mode(param, enable) {
                result = Err(err);
            }
        }
        result
    }

    fn private_mode(&mut self, param: u16, enable: bool) -> DispatchResult {
        match param {
            1 => self.set_cursor_keys_mode(enable),
            3 => self.set_columns_with_reset(if enable { DECCOLM_WIDE } else { DECCOLM_NARROW }),
            12 => self.enable_cursor_blinking(enable),
            25 => self.cursor_visibility(enable),
            1049 => {
                if enable {
                    self.use_alternate_screen_buffer()
                } else {
                    self.use_main_screen_buffer()
                }
            }
            _ => {
                debug!("unsupported private mode parameter {}", param);
                Err(DispatchError::InvalidParameter)
            }
        }
    }

    /// DECCOLM resizes, then clears the screen, homes the cursor, and
    /// resets the margins.
    fn set_columns_with_reset(&mut self, columns: u32) -> DispatchResult {
        self.set_columns(columns)?;
        self.cursor_position(1, 1)?;
        self.erase_in_display(EraseKind::All)?;
        self.set_top_bottom_scrolling_margins(0, 0)
    }

    // --- Tabs ------------------------------------------------------------

    /// HTS - set a tab stop in the cursor's column.
    pub fn horizontal_tab_set(&mut self) -> DispatchResult {
        self.api.horizontal_tab_set()?;
        Ok(())
    }

    /// CHT - tab the cursor forward.
    pub fn forward_tab(&mut self, count: u16) -> DispatchResult {
        self.api.forward_tab(count)?;
        Ok(())
    }

    /// CBT - tab the cursor backward, without reverse line feeding.
    pub fn backwards_tab(&mut self, count: u16) -> DispatchResult {
        self.api.backwards_tab(count)?;
        Ok(())
    }

    /// TBC - clear the current column's stop (0) or all stops (3).
    pub fn tab_clear(&mut self, clear_type: u16) -> DispatchResult {
        match clear_type {
            TAB_CLEAR_CURRENT => self.api.tab_clear(false)?,
            TAB_CLEAR_ALL => self.api.tab_clear(true)?,
            _ => return Err(DispatchError::InvalidParameter),
        }
        Ok(())
    }

    // --- Mouse modes ------------------------------------------------------

    /// DECSET/DECRST 1000.
    pub fn enable_vt200_mouse_mode(&mut self, enabled: bool) -> DispatchResult {
        self.api.enable_vt200_mouse_mode(enabled)?;
        Ok(())
    }

    /// DECSET/DECRST 1005.
    pub fn enable_utf8_extended_mouse_mode(&mut self, enabled: bool) -> DispatchResult {
        self.api.enable_utf8_extended_mouse_mode(enabled)?;
        Ok(())
    }

    /// DECSET/DECRST 1006.
    pub fn enable_sgr_extended_mouse_mode(&mut self, enabled: bool) -> DispatchResult {
        self.api.enable_sgr_extended_mouse_mode(enabled)?;
        Ok(())
    }

    /// DECSET/DECRST 1002.
    pub fn enable_button_event_mouse_mode(&mut self, enabled: bool) -> DispatchResult {
        self.api.enable_button_event_mouse_mode(enabled)?;
        Ok(())
    }

    /// DECSET/DECRST 1003.
    pub fn enable_any_event_mouse_mode(&mut self, enabled: bool) -> DispatchResult {
        self.api.enable_any_event_mouse_mode(enabled)?;
        Ok(())
    }

    /// DECSET/DECRST 1007.
    pub fn enable_alternate_scroll(&mut self, enabled: bool) -> DispatchResult {
        self.api.enable_alternate_scroll(enabled)?;
        Ok(())
    }

    // --- Resets ----------------------------------------------------------

    /// DECSTR - soft reset: visible cursor, normal cursor keys, numeric
    /// keypad, no margins, normal rendition, saved cursor at home.
    pub fn soft_reset(&mut self) -> DispatchResult {
        self.cursor_visibility(true)?;
        self.set_cursor_keys_mode(false)?;
        self.set_keypad_mode(false)?;
        self.set_top_bottom_scrolling_margins(0, 0)?;
        self.set_graphics_rendition(&[0])?;
        // The margins call homed the cursor, so DECRC now restores to home.
        self.cursor_save_position()
    }

    /// RIS - hard reset: normal rendition, scrollback erased, cursor at the
    /// buffer origin. Best-effort: a failing step aborts the rest, and
    /// completed steps stay done.
    pub fn hard_reset(&mut self) -> DispatchResult {
        self.set_graphics_rendition(&[0])?;
        self.erase_scrollback()?;
        // The erase parked the viewport at the origin, so homing lands the
        // cursor at buffer-absolute (0, 0).
        self.cursor_position(1, 1)
    }
}
