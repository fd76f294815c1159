//! 5x5 matrix frame: a marker in the top row and a 20 cell level gauge below it.

pub const LED_SIZE: usize = 5; // MB2 LED is 5x5 grid
pub type Frame = [[u8; LED_SIZE]; LED_SIZE];

pub const BRIGHT: u8 = 9;
pub const DIM: u8 = 2;
const GAUGE_ROWS: usize = LED_SIZE - 1;
pub const GAUGE_CELLS: u16 = (GAUGE_ROWS * LED_SIZE) as u16;

/// Marker at `marker` in row 0, gauge filled bottom-up, left to right. A cell that
/// is only partly reached is drawn dim.
pub fn frame(marker: usize, level: u8) -> Frame {
    let mut leds: Frame = [[0; LED_SIZE]; LED_SIZE];
    leds[0][marker.min(LED_SIZE - 1)] = BRIGHT;

    // level in 1/255 units, scaled to cells and fifths of a cell
    let scaled = u16::from(level) * GAUGE_CELLS * 5 / 255;
    let (full, partial) = ((scaled / 5) as usize, scaled % 5);

    for cell in 0..GAUGE_CELLS as usize {
        let row = LED_SIZE - 1 - cell / LED_SIZE;
        let col = cell % LED_SIZE;
        leds[row][col] = if cell < full {
            BRIGHT
        } else if cell == full && partial > 0 {
            DIM
        } else {
            0
        };
    }
    leds
}
