//! HSV to ws281x pixel conversion for addressable LED strips.
//!
//! [`hsv_to_rgb`] turns a byte HSV sample into the packed `0xWWRRGGBB` word the
//! strip driver keeps per LED. The crate is `no_std` and allocation free, so the
//! same code runs on the micro:bit demo firmware and on the host. The firmware's
//! PWM schedule, matrix gauge and ADC scaling live here too.

#![cfg_attr(not(test), no_std)]

pub mod gauge;
pub mod hsv_rgb_convert;
pub mod led;
pub mod pwm;
pub mod scale;

pub use hsv_rgb_convert::{Hsv, THIRD, hsv_to_rgb, rgb_to_hsv};
pub use led::LedColor;
