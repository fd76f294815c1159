pub mod color_control;
pub mod hsv_display;
