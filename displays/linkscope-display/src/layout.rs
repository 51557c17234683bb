//! Fixed screen geometry for the 320x240 panel

use crate::canvas::{Point, Rect};
use linkscope_core::panel::{BlockButton, ToggleButton};
use linkscope_core::telemetry::Channel;

pub const SCREEN_WIDTH: i16 = 320;
pub const SCREEN_HEIGHT: i16 = 240;

/// Banner across the top of the screen
pub const BANNER: Rect = Rect::new(0, 0, SCREEN_WIDTH - 1, 23);
pub const BANNER_TEXT: Point = Point::new(160, 10);

/// Area owned by the active panel
pub const PANEL_AREA: Rect = Rect::new(0, 24, SCREEN_WIDTH - 1, 189);
/// Where the overview picture is drawn
pub const OVERVIEW_IMAGE: Point = Point::new(0, 24);

pub const PREVIOUS_BUTTON: Rect = Rect::sized(0, 190, 50, 50);
pub const TITLE: Rect = Rect::sized(50, 190, 220, 50);
pub const NEXT_BUTTON: Rect = Rect::sized(270, 190, 50, 50);

/// Black backdrop behind the scopes of the detail panels
pub const SCOPE_BACKDROP: Rect = Rect::new(0, 85 - 6, SCREEN_WIDTH - 1, 186 + 3);

/// Advisory line of the overview and block diagram
pub const ADVISORY: Point = Point::new(20, 95);

/// Block diagram button size
pub const BLOCK_SIZE: i16 = 45;
pub const BLOCK_COLUMNS: [i16; 4] = [20, 95, 170, 245];
pub const BLOCK_TOP_ROW: i16 = 45;
pub const BLOCK_BOTTOM_ROW: i16 = 120;

/// Status buttons across the top row
pub const fn status_block(button: BlockButton) -> Rect {
    Rect::sized(
        BLOCK_COLUMNS[button as usize],
        BLOCK_TOP_ROW,
        BLOCK_SIZE,
        BLOCK_SIZE,
    )
}

/// Latching buttons across the bottom row
pub const fn toggle_block(button: ToggleButton) -> Rect {
    Rect::sized(
        BLOCK_COLUMNS[button as usize],
        BLOCK_BOTTOM_ROW,
        BLOCK_SIZE,
        BLOCK_SIZE,
    )
}

/// Status LED grid
pub const LED_RADIUS: u16 = 10;
const LED_X0: i16 = 40;
const LED_Y0: i16 = 80;
const LED_DX: i16 = 56;
const LED_DY: i16 = 90;

/// Number of LEDs on the status panel
pub const LED_COUNT: usize = 10;

/// Channels shown by the LEDs, row-major; `None` is an unused LED
pub const LED_CHANNELS: [Option<Channel>; LED_COUNT] = [
    Some(Channel::Agc),
    Some(Channel::Lock),
    Some(Channel::Hold),
    Some(Channel::Evm),
    Some(Channel::Frame),
    Some(Channel::Crc),
    Some(Channel::Ber),
    None,
    None,
    None,
];

pub const fn led_center(index: usize) -> Point {
    let col = (index % 5) as i16;
    let row = (index / 5) as i16;
    Point::new(LED_X0 + col * LED_DX, LED_Y0 + row * LED_DY)
}

/// Data table text columns
pub const DATA_LEFT_X: i16 = 77;
pub const DATA_RIGHT_X: i16 = 240;
/// Data table text rows
pub const DATA_ROWS: [i16; 5] = [30, 60, 90, 120, 150];

/// Advisory row of the detail panels
pub const DETAIL_ADVISORY_Y: i16 = DATA_ROWS[1] - 5;
