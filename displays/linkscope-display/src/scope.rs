//! Scope drawing
//!
//! Draws the grid of a trace and replays the buffer's erase/draw steps
//! onto a [`Canvas`].

use linkscope_core::scope::{ScopeBuffer, ScopeOp, ScopeRange, Segment, TraceSink};

use crate::canvas::{Canvas, Color, DisplayError, Point, TextAlign};
use crate::layout::SCREEN_WIDTH;

/// Columns of the short grid ticks
const TICK_COLUMNS: [i16; 6] = [39, 79, 119, 199, 239, 279];
/// Column of the vertical axis
const AXIS_X: i16 = 159;
const TICK_HALF: i16 = 3;
const LABEL_X: i16 = 240;

const GRID_COLOR: Color = Color::LIME_GREEN;
const TRACE_COLOR: Color = Color::YELLOW;
const ERASE_COLOR: Color = Color::BLACK;

/// Draw the grid and label of a trace
pub fn draw_grid<C: Canvas>(
    canvas: &mut C,
    range: &ScopeRange,
    label: &str,
) -> Result<(), DisplayError> {
    let center = range.center() as i16;
    let quarter = range.quarter() as i16;
    let (row_min, row_max) = (range.row_min as i16, range.row_max as i16);

    canvas.set_background(Color::BLACK);
    canvas.set_foreground(GRID_COLOR);
    canvas.draw_text(label, Point::new(LABEL_X, row_min + 5), TextAlign::Left, true)?;

    let (left, right) = TICK_COLUMNS.split_at(3);
    for &x in left {
        canvas.draw_vline(x, center - TICK_HALF, center + TICK_HALF)?;
    }
    canvas.draw_hline(AXIS_X - TICK_HALF, AXIS_X + TICK_HALF, center - quarter)?;
    canvas.draw_vline(AXIS_X, row_min - 2, row_max + 2)?;
    canvas.draw_hline(AXIS_X - TICK_HALF, AXIS_X + TICK_HALF, center + quarter)?;
    for &x in right {
        canvas.draw_vline(x, center - TICK_HALF, center + TICK_HALF)?;
    }
    canvas.draw_hline(0, SCREEN_WIDTH - 1, center)
}

/// Border lines framing the trace band
pub fn draw_border<C: Canvas>(canvas: &mut C, range: &ScopeRange) -> Result<(), DisplayError> {
    let (row_min, row_max) = (range.row_min as i16, range.row_max as i16);
    canvas.set_foreground(GRID_COLOR);
    for y in [row_min - 3, row_min - 2, row_max + 2, row_max + 3] {
        canvas.draw_hline(0, SCREEN_WIDTH - 1, y)?;
    }
    Ok(())
}

/// Grid, scrolled trace and border for one new value
pub fn update<C: Canvas>(
    canvas: &mut C,
    buffer: &mut ScopeBuffer,
    value: f32,
    label: &str,
) -> Result<(), DisplayError> {
    let range = *buffer.range();
    draw_grid(canvas, &range, label)?;

    let mut sink = CanvasSink {
        canvas: &mut *canvas,
        result: Ok(()),
    };
    buffer.push_traced(value, &mut sink);
    sink.result?;

    draw_border(canvas, &range)
}

/// Adapts a canvas to the buffer's drawing steps
///
/// The first error stops drawing; the buffer itself always updates.
struct CanvasSink<'a, C> {
    canvas: &'a mut C,
    result: Result<(), DisplayError>,
}

impl<C: Canvas> TraceSink for CanvasSink<'_, C> {
    fn apply(&mut self, op: ScopeOp) {
        if self.result.is_err() {
            return;
        }
        let (color, segment) = match op {
            ScopeOp::Erase(segment) => (ERASE_COLOR, segment),
            ScopeOp::Draw(segment) => (TRACE_COLOR, segment),
        };
        self.canvas.set_foreground(color);
        self.result = draw_segment(self.canvas, segment);
    }
}

fn draw_segment<C: Canvas>(canvas: &mut C, s: Segment) -> Result<(), DisplayError> {
    canvas.draw_line(
        Point::new(s.x0 as i16, s.y0 as i16),
        Point::new(s.x1 as i16, s.y1 as i16),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Op, RecordingCanvas};
    use linkscope_core::scope::Trace;

    #[test]
    fn test_grid_geometry() {
        let mut canvas = RecordingCanvas::new();
        draw_grid(&mut canvas, &Trace::Agc.range(), "AGC Graph").unwrap();

        assert_eq!(
            canvas.ops[0],
            Op::Text {
                text: "AGC Graph".into(),
                at: Point::new(240, 141),
                align: TextAlign::Left,
                opaque: true,
                fg: Color::LIME_GREEN,
                bg: Color::BLACK,
            }
        );
        // Quarter marks at 161 -/+ 12 and the axis
        assert!(canvas.ops.contains(&Op::Line {
            from: Point::new(156, 149),
            to: Point::new(162, 149),
            color: Color::LIME_GREEN
        }));
        assert!(canvas.ops.contains(&Op::Line {
            from: Point::new(159, 134),
            to: Point::new(159, 188),
            color: Color::LIME_GREEN
        }));
        assert_eq!(
            canvas.ops.last(),
            Some(&Op::Line {
                from: Point::new(0, 161),
                to: Point::new(319, 161),
                color: Color::LIME_GREEN
            })
        );
    }

    #[test]
    fn test_update_draws_trace_then_border() {
        let mut buffer = Trace::Crc.buffer();
        let mut canvas = RecordingCanvas::new();
        update(&mut canvas, &mut buffer, 1.0, "CRC Graph").unwrap();

        assert_eq!(buffer.latest(), 136);
        let yellow = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Line { color: Color::YELLOW, .. }))
            .count();
        assert_eq!(yellow, 319);

        let tail = &canvas.ops[canvas.ops.len() - 5..];
        assert_eq!(
            tail[0],
            Op::Line {
                from: Point::new(318, 186),
                to: Point::new(319, 136),
                color: Color::YELLOW
            }
        );
        assert_eq!(
            tail[4],
            Op::Line {
                from: Point::new(0, 189),
                to: Point::new(319, 189),
                color: Color::LIME_GREEN
            }
        );
    }
}
