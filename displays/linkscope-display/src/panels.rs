//! Static content of each panel
//!
//! Painted once when a panel is attached; the per-tick values are drawn
//! on top by the dashboard.

use linkscope_core::panel::PanelState;

use crate::canvas::{Canvas, Color, DisplayError, Point, TextAlign};
use crate::layout::{self, DATA_LEFT_X, DATA_RIGHT_X, DATA_ROWS};

/// LED captions, row-major
const LED_LABELS: [&str; layout::LED_COUNT] = [
    "AGC", "Lock", "HOLD", "EVM", "FRAME", "CRC", "BER", "---", "---", "---",
];

/// Data table labels, row-major over the two columns
const DATA_LABELS: [&str; 10] = [
    "AGC: ", "Lock: ", "HOLD: ", "EVM: ", "FRAME: ", "CRC: ", "BER: ", "---: ", "---: ", "---: ",
];

/// Background fill of a panel
pub fn background(panel: PanelState) -> Color {
    match panel {
        PanelState::Overview | PanelState::BlockDiagram | PanelState::LedStatus => Color::BLACK,
        _ => Color::LIME,
    }
}

/// Paint the background and the fixed labels of a panel
pub fn paint_static<C: Canvas>(canvas: &mut C, panel: PanelState) -> Result<(), DisplayError> {
    canvas.set_foreground(background(panel));
    canvas.fill_rect(layout::PANEL_AREA)?;

    match panel {
        PanelState::Overview => Ok(()),
        PanelState::BlockDiagram => paint_block_diagram(canvas),
        PanelState::LedStatus => paint_leds(canvas),
        PanelState::DataTable => paint_data_labels(canvas),
        PanelState::RxStatus => {
            paint_labels(canvas, &[("AGC: ", DATA_LEFT_X)])?;
            paint_scope_backdrop(canvas)
        }
        PanelState::PllStatus => {
            paint_labels(canvas, &[("Lock: ", DATA_LEFT_X), ("HOLD: ", DATA_RIGHT_X)])?;
            paint_scope_backdrop(canvas)
        }
        PanelState::SyncStatus => {
            canvas.set_foreground(Color::BLACK);
            canvas.set_background(Color::LIME);
            canvas.draw_text("FRAME: ", Point::new(32, DATA_ROWS[0]), TextAlign::Left, true)?;
            paint_scope_backdrop(canvas)
        }
        PanelState::RxMsgStatus => {
            paint_labels(canvas, &[("CRC: ", DATA_LEFT_X)])?;
            paint_scope_backdrop(canvas)
        }
    }
}

fn paint_block_diagram<C: Canvas>(canvas: &mut C) -> Result<(), DisplayError> {
    canvas.set_foreground(Color::SEASHELL);
    canvas.fill_rect(layout::PANEL_AREA)?;
    canvas.set_foreground(Color::BROWN);

    let size = layout::BLOCK_SIZE;
    let half = size / 2;
    let top = layout::BLOCK_TOP_ROW + half;
    let bottom = layout::BLOCK_BOTTOM_ROW + half;
    let columns = layout::BLOCK_COLUMNS;

    // Receive chain, left to right
    for pair in columns.windows(2) {
        let (from, to) = (pair[0] + size, pair[1]);
        canvas.draw_line(Point::new(from, top), Point::new(to, top))?;
        canvas.draw_line(Point::new(to - 10, top - 5), Point::new(to, top))?;
        canvas.draw_line(Point::new(to - 10, top + 5), Point::new(to, top))?;
    }

    // Loop back down from the last block
    let x = columns[3] + half;
    let (y0, y1) = (layout::BLOCK_TOP_ROW + size, layout::BLOCK_BOTTOM_ROW);
    canvas.draw_line(Point::new(x, y0), Point::new(x, y1))?;
    canvas.draw_line(Point::new(x + 5, y1 - 10), Point::new(x, y1))?;
    canvas.draw_line(Point::new(x - 5, y1 - 10), Point::new(x, y1))?;

    // Transmit chain, right to left
    for pair in columns.windows(2) {
        let (head, to) = (pair[0] + size, pair[1]);
        canvas.draw_line(Point::new(head, bottom), Point::new(to, bottom))?;
        canvas.draw_line(Point::new(head, bottom), Point::new(head + 10, bottom - 5))?;
        canvas.draw_line(Point::new(head, bottom), Point::new(head + 10, bottom + 5))?;
    }

    Ok(())
}

fn paint_leds<C: Canvas>(canvas: &mut C) -> Result<(), DisplayError> {
    canvas.set_foreground(Color::LIME);
    for i in 0..layout::LED_COUNT {
        canvas.fill_circle(layout::led_center(i), layout::LED_RADIUS)?;
    }

    canvas.set_foreground(Color::LIME_GREEN);
    for (i, label) in LED_LABELS.iter().enumerate() {
        let center = layout::led_center(i);
        canvas.draw_text(
            label,
            Point::new(center.x, center.y - 30),
            TextAlign::Center,
            false,
        )?;
    }
    Ok(())
}

fn paint_data_labels<C: Canvas>(canvas: &mut C) -> Result<(), DisplayError> {
    canvas.set_foreground(Color::BLACK);
    for (i, label) in DATA_LABELS.iter().enumerate() {
        let x = if i % 2 == 0 { DATA_LEFT_X } else { DATA_RIGHT_X };
        let y = DATA_ROWS[i / 2];
        canvas.draw_text(label, Point::new(x + 10, y), TextAlign::Right, false)?;
    }
    Ok(())
}

fn paint_labels<C: Canvas>(canvas: &mut C, labels: &[(&str, i16)]) -> Result<(), DisplayError> {
    canvas.set_foreground(Color::BLACK);
    for &(label, x) in labels {
        canvas.draw_text(label, Point::new(x + 10, DATA_ROWS[0]), TextAlign::Right, false)?;
    }
    Ok(())
}

fn paint_scope_backdrop<C: Canvas>(canvas: &mut C) -> Result<(), DisplayError> {
    canvas.set_foreground(Color::BLACK);
    canvas.fill_rect(layout::SCOPE_BACKDROP)
}
