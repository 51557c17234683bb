use crate::telemetry::Channel;

/// Samples across one trace, one per pixel column
pub const SCOPE_WIDTH: usize = 320;

/// Value range and row band of a trace
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScopeRange {
    pub min: f32,
    pub max: f32,
    /// Row of `max`
    pub row_min: u8,
    /// Row of `min`
    pub row_max: u8,
}

impl ScopeRange {
    pub const fn new(min: f32, max: f32, row_min: u8, row_max: u8) -> Self {
        Self {
            min,
            max,
            row_min,
            row_max,
        }
    }

    /// Map a value to its row, clamping into range
    ///
    /// Inverted bounds are taken in sorted order. An empty value range maps
    /// everything to the bottom row.
    pub fn row(&self, value: f32) -> u8 {
        let (lo, hi) = (self.min.min(self.max), self.max.max(self.min));
        let (top, bottom) = self.band();
        if hi.is_nan() || hi <= lo {
            return bottom;
        }

        let value = value.max(lo).min(hi);
        let span = (bottom - top) as f32;
        let row = bottom as f32 - span * (value - lo) / (hi - lo);
        row as u8
    }

    /// Band rows as (top, bottom)
    fn band(&self) -> (u8, u8) {
        (
            self.row_min.min(self.row_max),
            self.row_min.max(self.row_max),
        )
    }

    /// Middle row of the band
    pub fn center(&self) -> u8 {
        ((self.row_max as u16 + self.row_min as u16) / 2) as u8
    }

    /// Distance of the quarter marks from the center row
    pub fn quarter(&self) -> u8 {
        self.row_max.abs_diff(self.row_min) / 4
    }
}

/// Line between two trace points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    pub x0: u16,
    pub y0: u8,
    pub x1: u16,
    pub y1: u8,
}

/// Drawing step emitted during a traced push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScopeOp {
    /// Paint the segment in the background color
    Erase(Segment),
    /// Paint the segment in the trace color
    Draw(Segment),
}

/// Receiver of trace drawing steps
pub trait TraceSink {
    fn apply(&mut self, op: ScopeOp);
}

/// Fixed-width scrolling trace of row values
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeBuffer {
    range: ScopeRange,
    rows: [u8; SCOPE_WIDTH],
}

impl ScopeBuffer {
    /// Create a buffer with every column at `fill`
    pub const fn new(range: ScopeRange, fill: u8) -> Self {
        Self {
            range,
            rows: [fill; SCOPE_WIDTH],
        }
    }

    pub fn range(&self) -> &ScopeRange {
        &self.range
    }

    pub fn rows(&self) -> &[u8; SCOPE_WIDTH] {
        &self.rows
    }

    /// Most recent row
    pub fn latest(&self) -> u8 {
        self.rows[SCOPE_WIDTH - 1]
    }

    /// Shift left and append the mapped value
    pub fn push(&mut self, value: f32) {
        self.rows.copy_within(1.., 0);
        self.rows[SCOPE_WIDTH - 1] = self.range.row(value);
    }

    /// Same update as [`push`](Self::push), emitting the redraw steps
    ///
    /// Each column's old segment is erased just before it moves, and the
    /// segment to its left is redrawn right after.
    pub fn push_traced<S: TraceSink>(&mut self, value: f32, sink: &mut S) {
        let rows = &mut self.rows;

        sink.apply(ScopeOp::Erase(segment(rows, 0)));
        rows[0] = rows[1];

        for i in 1..SCOPE_WIDTH - 1 {
            sink.apply(ScopeOp::Erase(segment(rows, i)));
            rows[i] = rows[i + 1];
            sink.apply(ScopeOp::Draw(segment(rows, i - 1)));
        }

        let last = SCOPE_WIDTH - 1;
        rows[last] = self.range.row(value);
        sink.apply(ScopeOp::Draw(segment(rows, last - 1)));
    }

    /// Push the current value of a decoded channel
    pub fn push_channel<S: TraceSink>(
        &mut self,
        telemetry: &crate::telemetry::Telemetry,
        channel: Channel,
        sink: &mut S,
    ) {
        self.push_traced(telemetry.get(channel).value, sink);
    }
}

fn segment(rows: &[u8; SCOPE_WIDTH], x: usize) -> Segment {
    Segment {
        x0: x as u16,
        y0: rows[x],
        x1: (x + 1) as u16,
        y1: rows[x + 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Recorder {
        ops: Vec<ScopeOp>,
    }

    impl TraceSink for Recorder {
        fn apply(&mut self, op: ScopeOp) {
            self.ops.push(op);
        }
    }

    const AGC: ScopeRange = ScopeRange::new(-0.5, 0.5, 136, 186);

    #[test]
    fn test_row_mapping() {
        assert_eq!(AGC.row(-0.5), 186);
        assert_eq!(AGC.row(0.5), 136);
        assert_eq!(AGC.row(0.0), 161);
        assert_eq!(AGC.row(10.0), 136);
        assert_eq!(AGC.row(-10.0), 186);
        assert_eq!(AGC.center(), 161);
        assert_eq!(AGC.quarter(), 12);
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let rows_swapped = ScopeRange::new(0.0, 1.0, 186, 136);
        assert_eq!(rows_swapped.row(0.5), 161);
        assert_eq!(rows_swapped.row(1.0), 136);
        assert_eq!(rows_swapped.quarter(), 12);

        let values_swapped = ScopeRange::new(1.0, 0.0, 136, 186);
        assert_eq!(values_swapped.row(0.5), 161);
        assert_eq!(values_swapped.row(-3.0), 186);
    }

    #[test]
    fn test_empty_range_maps_to_bottom() {
        let flat = ScopeRange::new(0.5, 0.5, 136, 186);
        assert_eq!(flat.row(0.5), 186);
        assert_eq!(flat.row(f32::NAN), 186);
    }

    #[test]
    fn test_push_shifts_left() {
        let mut buffer = ScopeBuffer::new(AGC, 161);
        buffer.push(0.5);
        assert_eq!(buffer.latest(), 136);
        assert_eq!(buffer.rows()[318], 161);
        buffer.push(-0.5);
        assert_eq!(buffer.rows()[318], 136);
        assert_eq!(buffer.latest(), 186);
    }

    #[test]
    fn test_traced_op_order() {
        let mut buffer = ScopeBuffer::new(AGC, 161);
        buffer.push(0.5);

        let mut recorder = Recorder {
            ops: Vec::new(),
        };
        buffer.push_traced(-0.5, &mut recorder);
        let ops = recorder.ops;

        assert_eq!(ops.len(), 1 + 2 * 318 + 1);
        assert_eq!(
            ops[0],
            ScopeOp::Erase(Segment { x0: 0, y0: 161, x1: 1, y1: 161 })
        );
        assert_eq!(
            ops[1],
            ScopeOp::Erase(Segment { x0: 1, y0: 161, x1: 2, y1: 161 })
        );
        assert_eq!(
            ops[2],
            ScopeOp::Draw(Segment { x0: 0, y0: 161, x1: 1, y1: 161 })
        );

        // The old spike at 319 is erased before moving to 318
        assert_eq!(
            ops[ops.len() - 3],
            ScopeOp::Erase(Segment { x0: 318, y0: 161, x1: 319, y1: 136 })
        );
        assert_eq!(
            ops[ops.len() - 2],
            ScopeOp::Draw(Segment { x0: 317, y0: 161, x1: 318, y1: 136 })
        );
        assert_eq!(
            ops[ops.len() - 1],
            ScopeOp::Draw(Segment { x0: 318, y0: 136, x1: 319, y1: 186 })
        );
    }

    #[test]
    fn test_traced_matches_plain_push() {
        let mut plain = ScopeBuffer::new(AGC, 150);
        let mut traced = plain.clone();
        let mut recorder = Recorder {
            ops: Vec::new(),
        };
        for v in [0.1, -0.3, 0.45, 2.0] {
            plain.push(v);
            traced.push_traced(v, &mut recorder);
        }
        assert_eq!(plain, traced);
    }

    proptest! {
        #[test]
        fn prop_push_shifts_and_appends(
            seed in proptest::collection::vec(-1.0f32..1.0, 0..40),
            value in -2.0f32..2.0,
        ) {
            let mut buffer = ScopeBuffer::new(AGC, 161);
            for v in seed {
                buffer.push(v);
            }
            let before = *buffer.rows();
            buffer.push(value);
            let after = buffer.rows();

            prop_assert_eq!(after.len(), SCOPE_WIDTH);
            for i in 0..SCOPE_WIDTH - 1 {
                prop_assert_eq!(after[i], before[i + 1]);
            }
            prop_assert_eq!(after[SCOPE_WIDTH - 1], AGC.row(value.clamp(-0.5, 0.5)));
        }

        #[test]
        fn prop_out_of_range_clamps(excess in 0.0f32..100.0) {
            prop_assert_eq!(AGC.row(0.5 + excess), AGC.row(0.5));
            prop_assert_eq!(AGC.row(-0.5 - excess), AGC.row(-0.5));
            let row = AGC.row(excess - 50.0);
            prop_assert!((136..=186).contains(&row));
        }
    }
}
