//! Recording fakes for host tests

use linkscope_core::panel::{Affordances, NavEvent, PanelState};

use crate::canvas::{Canvas, Color, DisplayError, ImageId, Point, Rect, TextAlign};
use crate::widgets::{BlockId, WidgetTree};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
    Outline {
        rect: Rect,
        color: Color,
    },
    Fill {
        rect: Rect,
        color: Color,
    },
    Circle {
        center: Point,
        radius: u16,
        color: Color,
    },
    Text {
        text: String,
        at: Point,
        align: TextAlign,
        opaque: bool,
        fg: Color,
        bg: Color,
    },
    Image {
        image: ImageId,
        at: Point,
    },
    Flush,
}

/// Canvas that records every drawing call with the colors in effect
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
    fg: Color,
    bg: Color,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            fg: Color::WHITE,
            bg: Color::BLACK,
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            Op::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// The text op drawing `text`, if any
    pub fn find_text(&self, text: &str) -> Option<&Op> {
        self.ops
            .iter()
            .find(|op| matches!(op, Op::Text { text: t, .. } if t == text))
    }
}

impl Canvas for RecordingCanvas {
    fn set_foreground(&mut self, color: Color) {
        self.fg = color;
    }

    fn set_background(&mut self, color: Color) {
        self.bg = color;
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), DisplayError> {
        self.ops.push(Op::Line {
            from,
            to,
            color: self.fg,
        });
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect) -> Result<(), DisplayError> {
        self.ops.push(Op::Outline {
            rect,
            color: self.fg,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<(), DisplayError> {
        self.ops.push(Op::Fill {
            rect,
            color: self.fg,
        });
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: u16) -> Result<(), DisplayError> {
        self.ops.push(Op::Circle {
            center,
            radius,
            color: self.fg,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: Point,
        align: TextAlign,
        opaque: bool,
    ) -> Result<(), DisplayError> {
        self.ops.push(Op::Text {
            text: text.to_string(),
            at,
            align,
            opaque,
            fg: self.fg,
            bg: self.bg,
        });
        Ok(())
    }

    fn draw_image(&mut self, image: ImageId, at: Point) -> Result<(), DisplayError> {
        self.ops.push(Op::Image { image, at });
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.ops.push(Op::Flush);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Add(PanelState),
    Remove(PanelState),
    Paint(PanelState),
    Caption(String),
    Nav(Affordances),
    BlockFill(BlockId, Color),
}

/// Widget tree that records calls and serves a scripted input queue
#[derive(Default)]
pub struct RecordingWidgets {
    pub calls: Vec<Call>,
    pub input: Vec<NavEvent>,
}

impl WidgetTree for RecordingWidgets {
    fn add_panel(&mut self, panel: PanelState) {
        self.calls.push(Call::Add(panel));
    }

    fn remove_panel(&mut self, panel: PanelState) {
        self.calls.push(Call::Remove(panel));
    }

    fn paint_panel(&mut self, panel: PanelState) {
        self.calls.push(Call::Paint(panel));
    }

    fn set_caption(&mut self, caption: &str) {
        self.calls.push(Call::Caption(caption.to_string()));
    }

    fn set_nav_visible(&mut self, affordances: Affordances) {
        self.calls.push(Call::Nav(affordances));
    }

    fn set_block_fill(&mut self, block: BlockId, color: Color) {
        self.calls.push(Call::BlockFill(block, color));
    }

    fn poll_input(&mut self) -> Option<NavEvent> {
        if self.input.is_empty() {
            None
        } else {
            Some(self.input.remove(0))
        }
    }
}
