//! Drives the discrete RGB LED from a packed ws281x color through a
//! [`PwmSchedule`]. The pins are active low.

use embedded_hal::digital::{OutputPin, PinState};
use hsv_neopixel::pwm::PwmSchedule;
use hsv_neopixel::scale::unit_to_byte;
use hsv_neopixel::{Hsv, LedColor, hsv_to_rgb};

use crate::BluePinType;
use crate::ColorTimer;
use crate::GreenPinType;
use crate::RedPinType;

pub const STARTING_HSV: Hsv = Hsv {
    h: 214,
    s: 191,
    v: 204,
}; //magenta

pub struct ColorControler {
    base_color: Hsv,
    schedule: PwmSchedule,

    red_pin: RedPinType,
    green_pin: GreenPinType,
    blue_pin: BluePinType,

    timer: ColorTimer,
}

impl ColorControler {
    const TICKS_PER_STEP: u32 = 40; // 40us at 1MHz, ~10ms period

    pub fn new(
        color: Hsv,
        mut timer: ColorTimer,
        red_pin: RedPinType,
        green_pin: GreenPinType,
        blue_pin: BluePinType,
    ) -> Self {
        timer.enable_interrupt();
        timer.reset_event();

        ColorControler {
            base_color: color,
            schedule: PwmSchedule::new(hsv_to_rgb(color)),

            red_pin,
            green_pin,
            blue_pin,

            timer,
        }
    }

    fn drive<P: OutputPin>(pin: &mut P, on: bool) {
        // low lights the LED
        pin.set_state(PinState::from(!on)).ok();
    }

    pub fn hsv(&self) -> Hsv {
        self.base_color
    }

    pub fn color(&self) -> LedColor {
        hsv_to_rgb(self.base_color)
    }

    pub fn update_hue(&mut self, hue: f32) {
        self.base_color.h = unit_to_byte(hue);
    }

    pub fn update_sat(&mut self, sat: f32) {
        self.base_color.s = unit_to_byte(sat);
    }

    pub fn update_value(&mut self, value: f32) {
        self.base_color.v = unit_to_byte(value);
    }

    pub fn render(&mut self) {
        let edge = self.schedule.advance(self.color());

        let [r, g, b] = edge.on;
        ColorControler::drive(&mut self.red_pin, r);
        ColorControler::drive(&mut self.green_pin, g);
        ColorControler::drive(&mut self.blue_pin, b);

        self.timer
            .start(u32::from(edge.steps) * ColorControler::TICKS_PER_STEP);
    }
}
