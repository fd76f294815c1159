//! Packed pixel word in the layout the ws281x driver keeps in its LED buffer.

use core::fmt;

/// One LED as the ws281x driver stores it: `0xWWRRGGBB`.
///
/// Blue sits in the lowest byte, then green, red, and the white channel of RGBW
/// strips in the top byte. Plain RGB strips ignore the white byte.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LedColor(pub u32);

impl LedColor {
    pub const BLACK: LedColor = LedColor::from_rgb(0, 0, 0);
    pub const RED: LedColor = LedColor::from_rgb(255, 0, 0);
    pub const GREEN: LedColor = LedColor::from_rgb(0, 255, 0);
    pub const BLUE: LedColor = LedColor::from_rgb(0, 0, 255);
    pub const WHITE: LedColor = LedColor::from_rgb(255, 255, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        LedColor::from_rgbw(r, g, b, 0)
    }

    pub const fn from_rgbw(r: u8, g: u8, b: u8, w: u8) -> Self {
        LedColor((w as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    pub const fn white(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Channels in `[r, g, b]` order, white dropped.
    pub const fn rgb(self) -> [u8; 3] {
        [self.red(), self.green(), self.blue()]
    }

    pub const fn with_white(self, w: u8) -> Self {
        LedColor(self.0 & 0x00FF_FFFF | (w as u32) << 24)
    }
}

impl From<u32> for LedColor {
    fn from(value: u32) -> Self {
        LedColor(value)
    }
}

impl From<LedColor> for u32 {
    fn from(value: LedColor) -> Self {
        value.0
    }
}

impl fmt::Display for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::Debug for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedColor")
            .field("r", &self.red())
            .field("g", &self.green())
            .field("b", &self.blue())
            .field("w", &self.white())
            .finish()
    }
}
