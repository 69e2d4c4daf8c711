//! SGR (Select Graphic Rendition) handling.
//!
//! SGR is stateful in two ways the rest of the dispatcher is not. First,
//! intensity turned on by SGR 1 is sticky: it re-asserts itself on later
//! plain 30-37/40-47 color selections until reset or turned off, while the
//! bright 90-97/100-107 colors set intensity for that selection only.
//! Second, each color channel can be switched out of the legacy palette into
//! an indexed or RGB color, independently of the other channel, and switches
//! back the next time a legacy option touches it.

use log::debug;
use vtcon_core::{ExtendedColor, LegacyAttributes};

use crate::adapter::VtAdapter;
use crate::conapi::ConsoleApi;
use crate::error::{DispatchError, DispatchResult};

const SGR_OFF: u16 = 0;
const SGR_BOLD_BRIGHT: u16 = 1;
const SGR_UNDERLINE: u16 = 4;
const SGR_NEGATIVE: u16 = 7;
const SGR_NO_UNDERLINE: u16 = 24;
const SGR_POSITIVE: u16 = 27;
const SGR_FOREGROUND_EXTENDED: u16 = 38;
const SGR_FOREGROUND_DEFAULT: u16 = 39;
const SGR_BACKGROUND_EXTENDED: u16 = 48;
const SGR_BACKGROUND_DEFAULT: u16 = 49;

/// Second value of an extended color form: 24-bit RGB follows.
const SGR_EXTENDED_RGB: u16 = 2;
/// Second value of an extended color form: a palette index follows.
const SGR_EXTENDED_INDEXED: u16 = 5;

/// Which attribute groups an option touched. Forwarded with the new word so
/// the console merges only the affected bits.
#[derive(Debug, Clone, Copy, Default)]
struct Changed {
    foreground: bool,
    background: bool,
    meta: bool,
}

impl Changed {
    fn any(&self) -> bool {
        self.foreground || self.background || self.meta
    }
}

impl<C: ConsoleApi> VtAdapter<C> {
    /// SGR - apply a list of rendition parameters, in order, one commit per
    /// option. A failed capability call aborts before later options run.
    pub fn set_graphics_rendition(&mut self, options: &[u16]) -> DispatchResult {
        let info = self.api.get_buffer_info()?;
        let mut attr = info.attributes;

        let mut i = 0;
        while i < options.len() {
            let opt = options[i];
            if opt == SGR_FOREGROUND_EXTENDED || opt == SGR_BACKGROUND_EXTENDED {
                i += self.apply_extended_color(&options[i..])?;
            } else {
                let changed = self.apply_option(opt, &mut attr);
                if changed.any() {
                    self.api.set_legacy_attributes(
                        attr,
                        changed.foreground,
                        changed.background,
                        changed.meta,
                    )?;
                }
                i += 1;
            }
        }
        Ok(())
    }

    fn apply_option(&mut self, opt: u16, attr: &mut LegacyAttributes) -> Changed {
        let mut changed = Changed::default();
        match opt {
            SGR_OFF => {
                *attr = self.default_attributes;
                self.brightness = LegacyAttributes::empty();
                changed = Changed {
                    foreground: true,
                    background: true,
                    meta: true,
                };
            }
            SGR_BOLD_BRIGHT => {
                // Only SGR 1 makes intensity stick to later 3x selections;
                // 9x colors are bright on their own and must not bleed.
                attr.insert(LegacyAttributes::FG_INTENSITY);
                self.brightness = LegacyAttributes::FG_INTENSITY;
                changed.foreground = true;
            }
            SGR_UNDERLINE => {
                attr.insert(LegacyAttributes::UNDERSCORE);
                changed.meta = true;
            }
            SGR_NO_UNDERLINE => {
                attr.remove(LegacyAttributes::UNDERSCORE);
                changed.meta = true;
            }
            SGR_NEGATIVE => {
                attr.insert(LegacyAttributes::REVERSE_VIDEO);
                changed.meta = true;
            }
            SGR_POSITIVE => {
                attr.remove(LegacyAttributes::REVERSE_VIDEO);
                changed.meta = true;
            }
            30..=37 => {
                attr.remove(LegacyAttributes::FG_ATTRS);
                attr.insert(LegacyAttributes::fg_color(opt - 30));
                changed.foreground = true;
            }
            SGR_FOREGROUND_DEFAULT => {
                attr.remove(LegacyAttributes::FG_ATTRS);
                attr.insert(self.default_attributes & LegacyAttributes::FG_ATTRS);
                changed.foreground = true;
            }
            40..=47 => {
                attr.remove(LegacyAttributes::BG_ATTRS);
                attr.insert(LegacyAttributes::bg_color(opt - 40));
                changed.background = true;
            }
            SGR_BACKGROUND_DEFAULT => {
                attr.remove(LegacyAttributes::BG_ATTRS);
                attr.insert(self.default_attributes & LegacyAttributes::BG_ATTRS);
                changed.background = true;
            }
            90..=97 => {
                attr.remove(LegacyAttributes::FG_ATTRS);
                attr.insert(LegacyAttributes::fg_color(opt - 90) | LegacyAttributes::FG_INTENSITY);
                changed.foreground = true;
            }
            100..=107 => {
                attr.remove(LegacyAttributes::BG_ATTRS);
                attr.insert(LegacyAttributes::bg_color(opt - 100) | LegacyAttributes::BG_INTENSITY);
                changed.background = true;
            }
            _ => {
                debug!("ignoring unsupported SGR option {}", opt);
            }
        }
        // The stored brightness re-asserts itself after every option.
        attr.insert(self.brightness);
        changed
    }

    /// Consume one 38/48 form: `38;5;index` or `38;2;r;g;b`. Returns how
    /// many options the form used up.
    fn apply_extended_color(&mut self, options: &[u16]) -> Result<usize, DispatchError> {
        let is_foreground = options[0] == SGR_FOREGROUND_EXTENDED;
        match options.get(1) {
            Some(&SGR_EXTENDED_INDEXED) => {
                let index = options.get(2).ok_or(DispatchError::InvalidParameter)?;
                let index =
                    u8::try_from(*index).map_err(|_| DispatchError::InvalidParameter)?;
                self.api
                    .set_extended_attribute(ExtendedColor::Indexed(index), is_foreground)?;
                Ok(3)
            }
            Some(&SGR_EXTENDED_RGB) => {
                if options.len() < 5 {
                    return Err(DispatchError::InvalidParameter);
                }
                let clamp = |v: u16| v.min(255) as u8;
                let color =
                    ExtendedColor::Rgb(clamp(options[2]), clamp(options[3]), clamp(options[4]));
                self.api.set_extended_attribute(color, is_foreground)?;
                Ok(5)
            }
            _ => Err(DispatchError::InvalidParameter),
        }
    }
}
