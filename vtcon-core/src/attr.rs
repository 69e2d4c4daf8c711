//! The legacy 16-bit text attribute word.
//!
//! The low byte holds the colors: foreground in the low nibble, background in
//! the high nibble, each as blue/green/red bits plus an intensity bit. The
//! high byte carries the meta flags this crate cares about: reverse video and
//! underscore.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Color and style bits for one cell or for the active rendition.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct LegacyAttributes: u16 {
        const FG_BLUE = 0x0001;
        const FG_GREEN = 0x0002;
        const FG_RED = 0x0004;
        const FG_INTENSITY = 0x0008;
        const BG_BLUE = 0x0010;
        const BG_GREEN = 0x0020;
        const BG_RED = 0x0040;
        const BG_INTENSITY = 0x0080;
        const REVERSE_VIDEO = 0x4000;
        const UNDERSCORE = 0x8000;

        /// Every foreground bit, intensity included.
        const FG_ATTRS = 0x000F;
        /// Every background bit, intensity included.
        const BG_ATTRS = 0x00F0;
        /// The non-color flags.
        const META_ATTRS = 0xC000;
    }
}

impl LegacyAttributes {
    /// Foreground bits for a base color index in VT numbering
    /// (1 = red, 2 = green, 4 = blue), without intensity.
    ///
    /// VT and the legacy word disagree on which bit is red and which is blue,
    /// which is the whole reason this function exists.
    pub fn fg_color(vt_index: u16) -> LegacyAttributes {
        let mut attr = LegacyAttributes::empty();
        if vt_index & 0x1 != 0 {
            attr |= LegacyAttributes::FG_RED;
        }
        if vt_index & 0x2 != 0 {
            attr |= LegacyAttributes::FG_GREEN;
        }
        if vt_index & 0x4 != 0 {
            attr |= LegacyAttributes::FG_BLUE;
        }
        attr
    }

    /// Background bits for a base color index in VT numbering.
    pub fn bg_color(vt_index: u16) -> LegacyAttributes {
        LegacyAttributes::from_bits_truncate(Self::fg_color(vt_index).bits() << 4)
    }

    /// Legacy bits for one of the first 16 xterm palette entries, or `None`
    /// for an index the legacy word cannot represent.
    pub fn from_xterm_index(index: u8, foreground: bool) -> Option<LegacyAttributes> {
        if index >= 16 {
            return None;
        }
        let mut bits = Self::fg_color(u16::from(index & 0x7));
        if index & 0x8 != 0 {
            bits |= LegacyAttributes::FG_INTENSITY;
        }
        Some(if foreground {
            bits
        } else {
            LegacyAttributes::from_bits_truncate(bits.bits() << 4)
        })
    }
}

/// A color outside the legacy 16-color space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtendedColor {
    /// xterm 256-color palette index.
    Indexed(u8),
    /// 24-bit RGB.
    Rgb(u8, u8, u8),
}
