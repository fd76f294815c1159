//! Edge-to-edge software PWM schedule for one RGB LED.
//!
//! One period is 256 steps. At step `t` a channel is lit iff its level is above `t`,
//! so the timer only has to fire where some channel switches off and at the end of
//! the period. The color is latched when a period starts.

use crate::led::LedColor;

/// What to do at one timer interrupt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PwmEdge {
    /// Channel states, `[r, g, b]`.
    pub on: [bool; 3],
    /// Steps until the next interrupt, 1..=256.
    pub steps: u16,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PwmSchedule {
    /// Levels latched for the running period, `[r, g, b]`.
    levels: [u8; 3],
    /// Step the next edge lands on, 0 starts a new period.
    step: u16,
}

impl PwmSchedule {
    pub const STEPS_PER_PERIOD: u16 = 256;

    pub const fn new(color: LedColor) -> Self {
        PwmSchedule {
            levels: color.rgb(),
            step: 0,
        }
    }

    pub fn step(&self) -> u16 {
        self.step
    }

    pub fn levels(&self) -> [u8; 3] {
        self.levels
    }

    /// Smallest level still above `step`, or the end of the period.
    fn next_edge(levels: &[u8; 3], step: u16) -> u16 {
        levels
            .iter()
            .map(|level| u16::from(*level))
            .filter(|level| *level > step)
            .min()
            .unwrap_or(PwmSchedule::STEPS_PER_PERIOD)
    }

    /// Move to the next edge. `color` only takes effect at the start of a period.
    pub fn advance(&mut self, color: LedColor) -> PwmEdge {
        if self.step == 0 {
            self.levels = color.rgb();
        }

        let step = self.step;
        let on = self.levels.map(|level| u16::from(level) > step);
        let next = PwmSchedule::next_edge(&self.levels, step);
        self.step = next % PwmSchedule::STEPS_PER_PERIOD;

        PwmEdge {
            on,
            steps: next - step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_sleeps_whole_period() {
        let mut pwm = PwmSchedule::new(LedColor::BLACK);
        let edge = pwm.advance(LedColor::BLACK);
        assert_eq!(edge, PwmEdge { on: [false; 3], steps: 256 });
        assert_eq!(pwm.step(), 0);
    }

    #[test]
    fn full_white_has_one_step_tail() {
        let mut pwm = PwmSchedule::new(LedColor::WHITE);
        assert_eq!(pwm.advance(LedColor::WHITE), PwmEdge { on: [true; 3], steps: 255 });
        assert_eq!(pwm.step(), 255);
        assert_eq!(pwm.advance(LedColor::WHITE), PwmEdge { on: [false; 3], steps: 1 });
        assert_eq!(pwm.step(), 0);
    }

    #[test]
    fn equal_levels_share_an_edge() {
        let gray = LedColor::from_rgb(100, 100, 100);
        let mut pwm = PwmSchedule::new(gray);
        assert_eq!(pwm.advance(gray), PwmEdge { on: [true; 3], steps: 100 });
        assert_eq!(pwm.advance(gray), PwmEdge { on: [false; 3], steps: 156 });
        assert_eq!(pwm.step(), 0);
    }

    #[test]
    fn channels_switch_off_in_level_order() {
        let color = LedColor::from_rgb(10, 200, 0);
        let mut pwm = PwmSchedule::new(color);
        let edges: Vec<PwmEdge> = (0..3).map(|_| pwm.advance(color)).collect();
        assert_eq!(
            edges,
            [
                PwmEdge { on: [true, true, false], steps: 10 },
                PwmEdge { on: [false, true, false], steps: 190 },
                PwmEdge { on: [false, false, false], steps: 56 },
            ]
        );
        let total: u16 = edges.iter().map(|e| e.steps).sum();
        assert_eq!(total, PwmSchedule::STEPS_PER_PERIOD);
    }

    #[test]
    fn color_latched_at_period_start() {
        let mut pwm = PwmSchedule::new(LedColor::BLACK);
        let red = LedColor::from_rgb(50, 0, 0);
        let blue = LedColor::from_rgb(0, 0, 80);

        assert_eq!(pwm.advance(red), PwmEdge { on: [true, false, false], steps: 50 });
        // mid period, the new color waits
        assert_eq!(pwm.advance(blue), PwmEdge { on: [false; 3], steps: 206 });
        assert_eq!(pwm.levels(), [50, 0, 0]);

        assert_eq!(pwm.advance(blue), PwmEdge { on: [false, false, true], steps: 80 });
        assert_eq!(pwm.levels(), [0, 0, 80]);
    }

    #[test]
    fn white_byte_ignored() {
        let mut pwm = PwmSchedule::new(LedColor::BLACK);
        let edge = pwm.advance(LedColor::BLACK.with_white(255));
        assert_eq!(edge.on, [false; 3]);
    }
}
