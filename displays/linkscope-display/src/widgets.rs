//! Retained widget layer
//!
//! [`WidgetTree`] is what the dashboard drives: attach and detach panels,
//! request repaints, set the title and button states, and read queued
//! input. [`WidgetTable`] implements it as a flat table indexed by
//! [`PanelState`] and paints whatever changed on the next
//! [`render`](WidgetTable::render).

use heapless::{Deque, String};
use linkscope_core::panel::{Affordances, BlockButton, NavEvent, PanelState, ToggleButton};

use crate::canvas::{Canvas, Color, DisplayError, Rect, TextAlign};
use crate::layout;
use crate::panels;

/// Capacity of the title text
pub const CAPTION_LEN: usize = 24;

/// Queued input events
pub const INPUT_QUEUE_LEN: usize = 8;

/// Buttons of the block diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlockId {
    Status(BlockButton),
    Toggle(ToggleButton),
}

impl BlockId {
    pub const COUNT: usize = 8;

    pub const ALL: [BlockId; Self::COUNT] = [
        BlockId::Status(BlockButton::Rx),
        BlockId::Status(BlockButton::Pll),
        BlockId::Status(BlockButton::Sync),
        BlockId::Status(BlockButton::Msg),
        BlockId::Toggle(ToggleButton::Tx),
        BlockId::Toggle(ToggleButton::Rrc),
        BlockId::Toggle(ToggleButton::Bpsk),
        BlockId::Toggle(ToggleButton::Msg2),
    ];

    pub const fn index(self) -> usize {
        match self {
            BlockId::Status(b) => b as usize,
            BlockId::Toggle(b) => 4 + b as usize,
        }
    }

    pub const fn rect(self) -> Rect {
        match self {
            BlockId::Status(b) => layout::status_block(b),
            BlockId::Toggle(b) => layout::toggle_block(b),
        }
    }

    /// Button text; the MSG2 toggle is labelled like its status twin
    pub const fn label(self) -> &'static str {
        match self {
            BlockId::Status(b) => b.label(),
            BlockId::Toggle(ToggleButton::Msg2) => "MSG",
            BlockId::Toggle(b) => b.label(),
        }
    }
}

/// Widget operations used by the dashboard
pub trait WidgetTree {
    /// Attach a panel to the screen
    fn add_panel(&mut self, panel: PanelState);

    /// Detach a panel
    fn remove_panel(&mut self, panel: PanelState);

    /// Request a full repaint of an attached panel
    fn paint_panel(&mut self, panel: PanelState);

    /// Set the title bar text
    fn set_caption(&mut self, caption: &str);

    /// Show or hide the previous/next buttons
    fn set_nav_visible(&mut self, affordances: Affordances);

    /// Change the fill color of a block diagram button
    fn set_block_fill(&mut self, block: BlockId, color: Color);

    /// Take the next queued input event
    fn poll_input(&mut self) -> Option<NavEvent>;
}

/// Flat widget table
pub struct WidgetTable {
    attached: [bool; PanelState::COUNT],
    /// Panels waiting for a repaint, one bit per panel
    pending_panels: u8,
    caption: String<CAPTION_LEN>,
    title_dirty: bool,
    nav: Affordances,
    nav_dirty: bool,
    block_fills: [Color; BlockId::COUNT],
    /// Blocks waiting for a repaint, one bit per block
    pending_blocks: u8,
    input: Deque<NavEvent, INPUT_QUEUE_LEN>,
}

impl Default for WidgetTable {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTable {
    pub const fn new() -> Self {
        Self {
            attached: [false; PanelState::COUNT],
            pending_panels: 0,
            caption: String::new(),
            title_dirty: true,
            nav: Affordances {
                previous: false,
                next: false,
            },
            nav_dirty: true,
            block_fills: [Color::LIGHT_GREEN; BlockId::COUNT],
            pending_blocks: 0,
            input: Deque::new(),
        }
    }

    pub fn is_attached(&self, panel: PanelState) -> bool {
        self.attached[panel.index()]
    }

    pub fn caption(&self) -> &str {
        self.caption.as_str()
    }

    pub fn nav(&self) -> Affordances {
        self.nav
    }

    pub fn block_fill(&self, block: BlockId) -> Color {
        self.block_fills[block.index()]
    }

    /// True when nothing is waiting to be painted
    pub fn is_clean(&self) -> bool {
        self.pending_panels == 0 && self.pending_blocks == 0 && !self.title_dirty && !self.nav_dirty
    }

    /// Queue an input event
    ///
    /// Returns false if the queue is full and the event was dropped.
    pub fn push_input(&mut self, event: NavEvent) -> bool {
        self.input.push_back(event).is_ok()
    }

    /// Paint everything that changed since the last render
    pub fn render<C: Canvas>(&mut self, canvas: &mut C) -> Result<(), DisplayError> {
        for panel in PanelState::ALL {
            let bit = 1 << panel.index();
            if self.pending_panels & bit == 0 {
                continue;
            }
            self.pending_panels &= !bit;
            if !self.is_attached(panel) {
                continue;
            }

            panels::paint_static(canvas, panel)?;
            if panel == PanelState::BlockDiagram {
                self.pending_blocks = u8::MAX;
            }
        }

        if self.pending_blocks != 0 {
            if self.is_attached(PanelState::BlockDiagram) {
                for block in BlockId::ALL {
                    if self.pending_blocks & (1 << block.index()) != 0 {
                        self.paint_block(canvas, block)?;
                    }
                }
            }
            self.pending_blocks = 0;
        }

        if self.title_dirty {
            canvas.set_foreground(Color::BLACK);
            canvas.fill_rect(layout::TITLE)?;
            canvas.set_foreground(Color::SILVER);
            canvas.draw_text(
                self.caption.as_str(),
                layout::TITLE.center(),
                TextAlign::Center,
                false,
            )?;
            self.title_dirty = false;
        }

        if self.nav_dirty {
            paint_nav_button(canvas, layout::PREVIOUS_BUTTON, "-", self.nav.previous)?;
            paint_nav_button(canvas, layout::NEXT_BUTTON, "+", self.nav.next)?;
            self.nav_dirty = false;
        }

        Ok(())
    }

    fn paint_block<C: Canvas>(&self, canvas: &mut C, block: BlockId) -> Result<(), DisplayError> {
        let rect = block.rect();
        canvas.set_foreground(self.block_fill(block));
        canvas.fill_rect(rect)?;
        canvas.set_foreground(Color::BLACK);
        canvas.draw_rect(rect)?;
        canvas.draw_text(block.label(), rect.center(), TextAlign::Center, false)
    }
}

fn paint_nav_button<C: Canvas>(
    canvas: &mut C,
    rect: Rect,
    label: &str,
    visible: bool,
) -> Result<(), DisplayError> {
    if !visible {
        canvas.set_foreground(Color::BLACK);
        return canvas.fill_rect(rect);
    }

    canvas.set_foreground(Color::DARK_BLUE);
    canvas.fill_rect(rect)?;
    canvas.set_foreground(Color::SILVER);
    canvas.draw_rect(rect)?;
    canvas.draw_text(label, rect.center(), TextAlign::Center, false)
}

impl WidgetTree for WidgetTable {
    fn add_panel(&mut self, panel: PanelState) {
        self.attached[panel.index()] = true;
    }

    fn remove_panel(&mut self, panel: PanelState) {
        self.attached[panel.index()] = false;
        self.pending_panels &= !(1 << panel.index());
    }

    fn paint_panel(&mut self, panel: PanelState) {
        self.pending_panels |= 1 << panel.index();
    }

    fn set_caption(&mut self, caption: &str) {
        self.caption.clear();
        for ch in caption.chars() {
            if self.caption.push(ch).is_err() {
                break;
            }
        }
        self.title_dirty = true;
    }

    fn set_nav_visible(&mut self, affordances: Affordances) {
        self.nav = affordances;
        self.nav_dirty = true;
    }

    fn set_block_fill(&mut self, block: BlockId, color: Color) {
        let fill = &mut self.block_fills[block.index()];
        if *fill != color {
            *fill = color;
            self.pending_blocks |= 1 << block.index();
        }
    }

    fn poll_input(&mut self) -> Option<NavEvent> {
        self.input.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Op, RecordingCanvas};

    #[test]
    fn test_block_indices_are_dense() {
        for (i, block) in BlockId::ALL.iter().enumerate() {
            assert_eq!(block.index(), i);
        }
        assert_eq!(BlockId::Toggle(ToggleButton::Msg2).label(), "MSG");
    }

    #[test]
    fn test_caption_truncates() {
        let mut table = WidgetTable::new();
        table.set_caption("a caption that is far too long for the title");
        assert_eq!(table.caption().len(), CAPTION_LEN);
    }

    #[test]
    fn test_input_queue_fifo() {
        let mut table = WidgetTable::new();
        assert!(table.push_input(NavEvent::Next));
        assert!(table.push_input(NavEvent::Previous));
        assert_eq!(table.poll_input(), Some(NavEvent::Next));
        assert_eq!(table.poll_input(), Some(NavEvent::Previous));
        assert_eq!(table.poll_input(), None);

        for _ in 0..INPUT_QUEUE_LEN {
            assert!(table.push_input(NavEvent::Next));
        }
        assert!(!table.push_input(NavEvent::Next));
    }

    #[test]
    fn test_render_paints_once() {
        let mut table = WidgetTable::new();
        table.add_panel(PanelState::LedStatus);
        table.paint_panel(PanelState::LedStatus);
        table.set_caption("Status LEDs");

        let mut canvas = RecordingCanvas::new();
        table.render(&mut canvas).unwrap();
        assert!(table.is_clean());
        assert!(canvas.texts().any(|t| t == "Status LEDs"));
        assert!(canvas.ops.iter().any(|op| matches!(op, Op::Circle { .. })));

        let mut again = RecordingCanvas::new();
        table.render(&mut again).unwrap();
        assert!(again.ops.is_empty());
    }

    #[test]
    fn test_removed_panel_is_not_painted() {
        let mut table = WidgetTable::new();
        table.add_panel(PanelState::DataTable);
        table.paint_panel(PanelState::DataTable);
        table.remove_panel(PanelState::DataTable);

        let mut canvas = RecordingCanvas::new();
        table.render(&mut canvas).unwrap();
        assert!(!canvas.texts().any(|t| t == "AGC: "));
    }

    #[test]
    fn test_block_fill_repaints_only_on_block_diagram() {
        let mut table = WidgetTable::new();
        table.set_block_fill(BlockId::Status(BlockButton::Pll), Color::RED);
        let mut canvas = RecordingCanvas::new();
        table.render(&mut canvas).unwrap();
        assert!(!canvas.texts().any(|t| t == "PLL"));

        table.add_panel(PanelState::BlockDiagram);
        table.paint_panel(PanelState::BlockDiagram);
        let mut canvas = RecordingCanvas::new();
        table.render(&mut canvas).unwrap();
        assert!(canvas.ops.contains(&Op::Fill {
            rect: layout::status_block(BlockButton::Pll),
            color: Color::RED
        }));
        assert_eq!(table.block_fill(BlockId::Status(BlockButton::Pll)), Color::RED);
    }

    #[test]
    fn test_unchanged_fill_is_not_repainted() {
        let mut table = WidgetTable::new();
        table.add_panel(PanelState::BlockDiagram);
        let mut canvas = RecordingCanvas::new();
        table.render(&mut canvas).unwrap();

        table.set_block_fill(BlockId::Status(BlockButton::Rx), Color::LIGHT_GREEN);
        assert!(table.is_clean());
        table.set_block_fill(BlockId::Status(BlockButton::Rx), Color::YELLOW);
        assert!(!table.is_clean());
    }

    #[test]
    fn test_hidden_nav_button_is_blanked() {
        let mut table = WidgetTable::new();
        table.set_nav_visible(Affordances {
            previous: false,
            next: true,
        });
        let mut canvas = RecordingCanvas::new();
        table.render(&mut canvas).unwrap();
        assert!(canvas.ops.contains(&Op::Fill {
            rect: layout::PREVIOUS_BUTTON,
            color: Color::BLACK
        }));
        assert!(canvas.texts().any(|t| t == "+"));
        assert!(!canvas.texts().any(|t| t == "-"));
    }
}
