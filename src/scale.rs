//! Mapping of analog readings onto color bytes.

/// Map a `[0, 1]` fraction onto a byte, rounding, and clamping anything outside.
pub fn unit_to_byte(fraction: f32) -> u8 {
    (fraction.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// Average of `samples` accumulated readings, clamped to `[floor, ceiling]` and
/// mapped onto `[0, 1]`. No samples reads as 0.
pub fn adc_fraction(total: u32, samples: u32, floor: f32, ceiling: f32) -> f32 {
    if samples == 0 {
        return 0.0;
    }
    let average = (total as f32 / samples as f32).clamp(floor, ceiling);
    (average - floor) / (ceiling - floor)
}
