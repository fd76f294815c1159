//! hsv_display.rs
//! Copyright © 2026 Sean Springer
//! [This program is licensed under the "MIT License"]
//! Please see the file LICENSE in the source distribution of this software for license terms.
//!
//! The hsv_display module wraps the microbit::display::nonblocking::Display and draws the
//! editing state on the MB2 5x5 LED matrix: the top row marks which HSV component the
//! potentiometer is editing, the four rows below are a 20 cell gauge of that component.

use hsv_neopixel::Hsv;
use hsv_neopixel::gauge;
use microbit::{
    display::nonblocking::{Display, GreyscaleImage},
    hal::timer::Instance,
};

/// Which HSV component the potentiometer currently edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HSVPage {
    H = 0,
    S = 1,
    V = 2,
}

impl HSVPage {
    fn prev(self) -> Self {
        match self {
            HSVPage::H => HSVPage::V,
            HSVPage::S => HSVPage::H,
            HSVPage::V => HSVPage::S,
        }
    }

    fn next(self) -> Self {
        match self {
            HSVPage::H => HSVPage::S,
            HSVPage::S => HSVPage::V,
            HSVPage::V => HSVPage::H,
        }
    }

    /// The component of `hsv` this page edits.
    pub fn component(self, hsv: Hsv) -> u8 {
        match self {
            HSVPage::H => hsv.h,
            HSVPage::S => hsv.s,
            HSVPage::V => hsv.v,
        }
    }

    /// Marker column in the top row: left, middle, right.
    fn marker_column(self) -> usize {
        self as usize * 2
    }
}

/// HSVDisplay<T> where <T> is the TIMER instance driving the nonblocking Display. The
/// TIMER needs its interrupt enabled both in the peripheral and in the NVIC.
pub struct HSVDisplay<T>
where
    T: Instance,
{
    page: HSVPage,
    display: Display<T>,
    image: GreyscaleImage,
}

impl<T> HSVDisplay<T>
where
    T: Instance,
{
    /// Starts on the hue page with an empty gauge.
    pub fn new(display: Display<T>) -> Self {
        HSVDisplay {
            page: HSVPage::H,
            display,
            image: GreyscaleImage::blank(),
        }
    }

    /// A button: rotate to the previous page, with wrap-around.
    pub fn left(&mut self) {
        self.page = self.page.prev();
    }

    /// B button: rotate to the next page, with wrap-around.
    pub fn right(&mut self) {
        self.page = self.page.next();
    }

    /// Redraw for the current page with `hsv` as the edited color.
    pub fn render(&mut self, hsv: Hsv) {
        let leds = gauge::frame(self.page.marker_column(), self.page.component(hsv));
        self.image = GreyscaleImage::new(&leds);
        self.display.show(&self.image);
    }

    /// Must be called from the display TIMER interrupt.
    pub fn handle_display_event(&mut self) {
        self.display.handle_display_event();
    }

    pub fn get_page(&self) -> HSVPage {
        self.page
    }
}
