//! HSV to packed ws281x pixel conversion.
//!
//! All three components are bytes. The hue circle is split into three sectors of
//! [`THIRD`] steps (red to green, green to blue, blue to red) and each sector blends
//! linearly between its two primaries. This is cheaper than the six sector model and
//! is what the strip colors were tuned against.

use crate::led::LedColor;

/// Width of one hue sector on the 0..=255 wheel.
pub const THIRD: u8 = 0x56;

/// HSV coordinates, one byte each.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Hsv {
    /// Hue, 0..=255 around the whole circle. Sectors start at 0, `THIRD`, `2 * THIRD`.
    pub h: u8,
    /// Saturation, 0 is gray.
    pub s: u8,
    /// Value, 0 is black.
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Hsv { h, s, v }
    }

    /// Build from a hue in degrees (wrapped modulo 360).
    ///
    /// 0°, 120° and 240° map exactly onto the sector starts so the primaries stay
    /// pure. The last sector is two steps narrower than the others, so it is scaled
    /// separately to avoid running past 255.
    pub const fn from_degrees(degrees: u16, s: u8, v: u8) -> Self {
        const WIDTHS: [u16; 3] = [THIRD as u16, THIRD as u16, 256 - 2 * THIRD as u16];
        let degrees = degrees % 360;
        let sector = (degrees / 120) as usize;
        let h = sector as u16 * THIRD as u16 + (degrees % 120) * WIDTHS[sector] / 120;
        Hsv { h: h as u8, s, v }
    }

    pub const fn to_rgb(self) -> LedColor {
        hsv_to_rgb(self)
    }
}

impl From<Hsv> for LedColor {
    fn from(value: Hsv) -> Self {
        hsv_to_rgb(value)
    }
}

impl LedColor {
    pub const fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self)
    }
}

/// Fully saturated, full value color for a hue.
const fn wheel(h: u8) -> [u8; 3] {
    // h % THIRD is the offset into whichever sector h falls in, at most 85.
    let pos = (h % THIRD) * 3;
    if h < THIRD {
        [255 - pos, pos, 0]
    } else if h < 2 * THIRD {
        [0, 255 - pos, pos]
    } else {
        [pos, 0, 255 - pos]
    }
}

/// Pull a wheel channel towards white by `1 - s`, then scale by `v`.
const fn shade(c: u8, s: u8, v: u8) -> u8 {
    let (c, s, v) = (c as u16, s as u16, v as u16);
    (v * (255 - s * (255 - c) / 255) / 255) as u8
}

/// Convert an HSV sample to the packed pixel the LED driver expects.
///
/// Total over all inputs; the white byte of the result is always zero.
pub const fn hsv_to_rgb(hsv: Hsv) -> LedColor {
    let Hsv { h, s, v } = hsv;
    if s == 0 {
        return LedColor::from_rgb(v, v, v);
    }

    let [r, g, b] = wheel(h);
    LedColor::from_rgb(shade(r, s, v), shade(g, s, v), shade(b, s, v))
}

/// Inverse of [`hsv_to_rgb`] under the three sector model, ignoring the white byte.
///
/// The input is projected onto the three sector gamut, where the two lit channels of
/// a shaded wheel color sum to `v` above the gray floor. For colors [`hsv_to_rgb`] can
/// produce, converting back lands within 4 per channel, and exactly for fully
/// saturated full value colors and for grays. Any other color is mapped to the
/// nearest hue of that gamut and can come back far off: `(255, 128, 0)` gives
/// `Hsv { h: 42, s: 255, v: 255 }`, which converts to `(129, 126, 0)`. Black and
/// grays come back with hue 0.
pub const fn rgb_to_hsv(color: LedColor) -> Hsv {
    let [r, g, b] = color.rgb();
    let (r, g, b) = (r as u16, g as u16, b as u16);
    let min = min3(r, g, b);

    // Before shading, the two non-zero wheel channels always sum to 255.
    let v = r + g + b - 2 * min;
    let v = if v > 255 { 255 } else { v };
    if v <= min {
        return Hsv { h: 0, s: 0, v: v as u8 };
    }

    let span = v - min;
    let s = 255 * span / v;

    // The smallest channel tells the sector, the one after it in wheel order rises.
    let (start, rising) = if b <= r && b <= g {
        (0, g)
    } else if r <= g && r <= b {
        (THIRD as u16, b)
    } else {
        (2 * THIRD as u16, r)
    };
    let pos = (rising - min) * 255 / span;
    let pos = if pos > 255 { 255 } else { pos };
    let h = start + pos / 3;
    let h = if h > 255 { 255 } else { h };

    Hsv { h: h as u8, s: s as u8, v: v as u8 }
}

const fn min3(a: u16, b: u16, c: u16) -> u16 {
    let m = if a < b { a } else { b };
    if m < c { m } else { c }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries() {
        assert_eq!(hsv_to_rgb(Hsv::new(0, 255, 255)), LedColor::RED);
        assert_eq!(hsv_to_rgb(Hsv::new(THIRD, 255, 255)), LedColor::GREEN);
        assert_eq!(hsv_to_rgb(Hsv::new(2 * THIRD, 255, 255)), LedColor::BLUE);
    }

    #[test]
    fn sector_midpoints() {
        // pos = 43 * 3 = 129
        assert_eq!(hsv_to_rgb(Hsv::new(43, 255, 255)), LedColor::from_rgb(126, 129, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(THIRD + 43, 255, 255)), LedColor::from_rgb(0, 126, 129));
        assert_eq!(hsv_to_rgb(Hsv::new(2 * THIRD + 43, 255, 255)), LedColor::from_rgb(129, 0, 126));
        // last step of the wheel is almost back at red
        assert_eq!(hsv_to_rgb(Hsv::new(255, 255, 255)), LedColor::from_rgb(249, 0, 6));
    }

    #[test]
    fn gray_and_black() {
        assert_eq!(hsv_to_rgb(Hsv::new(123, 0, 77)), LedColor::from_rgb(77, 77, 77));
        assert_eq!(hsv_to_rgb(Hsv::new(0, 0, 255)), LedColor::WHITE);
        assert_eq!(hsv_to_rgb(Hsv::new(200, 255, 0)), LedColor::BLACK);
    }

    #[test]
    fn half_saturation_red() {
        // 255 - 128 * 255 / 255 = 127
        assert_eq!(hsv_to_rgb(Hsv::new(0, 128, 255)), LedColor::from_rgb(255, 127, 127));
        assert_eq!(hsv_to_rgb(Hsv::new(0, 255, 128)), LedColor::from_rgb(128, 0, 0));
    }

    #[test]
    fn degrees() {
        assert_eq!(Hsv::from_degrees(0, 1, 2), Hsv::new(0, 1, 2));
        assert_eq!(Hsv::from_degrees(120, 255, 255).h, THIRD);
        assert_eq!(Hsv::from_degrees(240, 255, 255).h, 2 * THIRD);
        assert_eq!(Hsv::from_degrees(360, 255, 255).h, 0);
        assert_eq!(Hsv::from_degrees(60, 255, 255).h, 43);
        assert_eq!(Hsv::from_degrees(359, 255, 255).h, 255);
        assert_eq!(Hsv::from_degrees(120, 255, 255).to_rgb(), LedColor::GREEN);
        assert_eq!(Hsv::from_degrees(240, 255, 255).to_rgb(), LedColor::BLUE);
    }

    #[test]
    fn inverse_of_primaries() {
        for color in [LedColor::RED, LedColor::GREEN, LedColor::BLUE] {
            assert_eq!(hsv_to_rgb(rgb_to_hsv(color)), color);
            assert_eq!(rgb_to_hsv(color).s, 255);
            assert_eq!(rgb_to_hsv(color).v, 255);
        }
        assert_eq!(rgb_to_hsv(LedColor::RED).h, 0);
    }

    #[test]
    fn inverse_of_gray() {
        assert_eq!(rgb_to_hsv(LedColor::BLACK), Hsv::default());
        assert_eq!(rgb_to_hsv(LedColor::from_rgb(40, 40, 40)), Hsv::new(0, 0, 40));
        assert_eq!(rgb_to_hsv(LedColor::WHITE.with_white(9)), Hsv::new(0, 0, 255));
    }

    #[test]
    fn off_gamut_projects_onto_wheel() {
        let orange = LedColor::from_rgb(255, 128, 0);
        assert_eq!(rgb_to_hsv(orange), Hsv::new(42, 255, 255));
        assert_eq!(hsv_to_rgb(rgb_to_hsv(orange)), LedColor::from_rgb(129, 126, 0));
    }

    #[test]
    fn conversions_agree() {
        let hsv = Hsv::new(99, 200, 150);
        assert_eq!(LedColor::from(hsv), hsv.to_rgb());
        assert_eq!(hsv.to_rgb().to_hsv(), rgb_to_hsv(hsv_to_rgb(hsv)));
    }

    const _: () = assert!(hsv_to_rgb(Hsv::new(0, 255, 255)).0 == 0x00FF_0000);
}
