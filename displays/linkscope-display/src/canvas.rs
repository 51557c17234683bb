//! Drawing surface
//!
//! A small stateful drawing context: set the colors, then draw. Text can be
//! drawn opaque (background filled behind the glyphs) or transparent.

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the display
    Communication,
    /// Coordinates outside the screen
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x00_00_00);
    pub const WHITE: Color = Color(0xFF_FF_FF);
    pub const RED: Color = Color(0xFF_00_00);
    pub const YELLOW: Color = Color(0xFF_FF_00);
    pub const LIME: Color = Color(0x00_FF_00);
    pub const LIME_GREEN: Color = Color(0x32_CD_32);
    pub const LIGHT_GREEN: Color = Color(0x90_EE_90);
    pub const SEASHELL: Color = Color(0xFF_F5_EE);
    pub const DARK_BLUE: Color = Color(0x00_00_8B);
    pub const BROWN: Color = Color(0xA5_2A_2A);
    pub const SILVER: Color = Color(0xC0_C0_C0);
    pub const GOLD: Color = Color(0xFF_D7_00);

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }
}

/// Pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Rectangle with inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl Rect {
    pub const fn new(x_min: i16, y_min: i16, x_max: i16, y_max: i16) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Rectangle from its origin and size
    pub const fn sized(x: i16, y: i16, width: i16, height: i16) -> Self {
        Self::new(x, y, x + width - 1, y + height - 1)
    }

    pub const fn width(&self) -> i16 {
        self.x_max - self.x_min + 1
    }

    pub const fn height(&self) -> i16 {
        self.y_max - self.y_min + 1
    }

    pub const fn center(&self) -> Point {
        Point::new(
            (self.x_min + self.x_max) / 2,
            (self.y_min + self.y_max) / 2,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        (self.x_min..=self.x_max).contains(&p.x) && (self.y_min..=self.y_max).contains(&p.y)
    }
}

/// Horizontal anchoring of text relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAlign {
    /// Position is the top-left corner
    Left,
    /// Position is the top-right corner
    Right,
    /// Position is the center of the text
    Center,
}

/// Full-panel pictures shown on the overview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageId {
    /// Everything healthy
    Flower,
    /// At least one channel out of range
    Lightning,
}

/// Drawing context
pub trait Canvas {
    fn set_foreground(&mut self, color: Color);

    fn set_background(&mut self, color: Color);

    /// One-pixel line in the foreground color
    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), DisplayError>;

    /// Outline in the foreground color
    fn draw_rect(&mut self, rect: Rect) -> Result<(), DisplayError>;

    fn fill_rect(&mut self, rect: Rect) -> Result<(), DisplayError>;

    fn fill_circle(&mut self, center: Point, radius: u16) -> Result<(), DisplayError>;

    /// Text in the foreground color, over the background color if `opaque`
    fn draw_text(
        &mut self,
        text: &str,
        at: Point,
        align: TextAlign,
        opaque: bool,
    ) -> Result<(), DisplayError>;

    fn draw_image(&mut self, image: ImageId, at: Point) -> Result<(), DisplayError>;

    /// Push pending drawing to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Horizontal line from `x0` to `x1` inclusive
    fn draw_hline(&mut self, x0: i16, x1: i16, y: i16) -> Result<(), DisplayError> {
        self.draw_line(Point::new(x0, y), Point::new(x1, y))
    }

    /// Vertical line from `y0` to `y1` inclusive
    fn draw_vline(&mut self, x: i16, y0: i16, y1: i16) -> Result<(), DisplayError> {
        self.draw_line(Point::new(x, y0), Point::new(x, y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_geometry() {
        let rect = Rect::sized(0, 190, 50, 50);
        assert_eq!(rect, Rect::new(0, 190, 49, 239));
        assert_eq!(rect.width(), 50);
        assert_eq!(rect.center(), Point::new(24, 214));
        assert!(rect.contains(Point::new(49, 239)));
        assert!(!rect.contains(Point::new(50, 239)));
    }

    #[test]
    fn test_color_channels() {
        assert_eq!(Color::SEASHELL.r(), 0xFF);
        assert_eq!(Color::SEASHELL.g(), 0xF5);
        assert_eq!(Color::SEASHELL.b(), 0xEE);
    }
}
