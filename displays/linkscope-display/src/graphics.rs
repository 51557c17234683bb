//! `Canvas` over an embedded-graphics draw target

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::Point as EgPoint;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{Circle, Line, Primitive, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_graphics::Drawable;

use crate::canvas::{Canvas, Color, DisplayError, ImageId, Point, Rect, TextAlign};
use crate::layout;

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        Rgb565::new(color.r() >> 3, color.g() >> 2, color.b() >> 3)
    }
}

fn eg_point(p: Point) -> EgPoint {
    EgPoint::new(p.x as i32, p.y as i32)
}

fn eg_rect(rect: Rect) -> Rectangle {
    Rectangle::with_corners(
        EgPoint::new(rect.x_min as i32, rect.y_min as i32),
        EgPoint::new(rect.x_max as i32, rect.y_max as i32),
    )
}

/// Stateful canvas drawing into an RGB565 target
pub struct GraphicsCanvas<D> {
    target: D,
    fg: Color,
    bg: Color,
}

impl<D> GraphicsCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            fg: Color::WHITE,
            bg: Color::BLACK,
        }
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn draw_flower(&mut self, at: Point) -> Result<(), DisplayError> {
        let area = Rect::sized(at.x, at.y, layout::SCREEN_WIDTH, layout::PANEL_AREA.height());
        let center = area.center();

        self.set_foreground(Color::SEASHELL);
        self.fill_rect(area)?;

        // Stem
        self.set_foreground(Color::LIME_GREEN);
        for dx in -1..=1 {
            self.draw_vline(center.x + dx, center.y, area.y_max)?;
        }

        self.set_foreground(Color::RED);
        let petals = [
            (0, -28),
            (28, 0),
            (0, 28),
            (-28, 0),
            (20, -20),
            (20, 20),
            (-20, 20),
            (-20, -20),
        ];
        for (dx, dy) in petals {
            self.fill_circle(Point::new(center.x + dx, center.y + dy), 16)?;
        }

        self.set_foreground(Color::GOLD);
        self.fill_circle(center, 18)
    }

    fn draw_lightning(&mut self, at: Point) -> Result<(), DisplayError> {
        let area = Rect::sized(at.x, at.y, layout::SCREEN_WIDTH, layout::PANEL_AREA.height());
        let cx = area.center().x;
        let top = area.y_min + 10;
        let bottom = area.y_max - 10;
        let third = (bottom - top) / 3;

        self.set_foreground(Color::DARK_BLUE);
        self.fill_rect(area)?;

        let bolt = [
            Point::new(cx + 30, top),
            Point::new(cx - 20, top + third + 10),
            Point::new(cx + 15, top + third + 10),
            Point::new(cx - 30, bottom),
        ];
        self.set_foreground(Color::YELLOW);
        for offset in -3..=3 {
            for pair in bolt.windows(2) {
                self.draw_line(
                    Point::new(pair[0].x + offset, pair[0].y),
                    Point::new(pair[1].x + offset, pair[1].y),
                )?;
            }
        }
        Ok(())
    }
}

impl<D> Canvas for GraphicsCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn set_foreground(&mut self, color: Color) {
        self.fg = color;
    }

    fn set_background(&mut self, color: Color) {
        self.bg = color;
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), DisplayError> {
        Line::new(eg_point(from), eg_point(to))
            .into_styled(PrimitiveStyle::with_stroke(self.fg.into(), 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_rect(&mut self, rect: Rect) -> Result<(), DisplayError> {
        eg_rect(rect)
            .into_styled(PrimitiveStyle::with_stroke(self.fg.into(), 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<(), DisplayError> {
        self.target
            .fill_solid(&eg_rect(rect), self.fg.into())
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_circle(&mut self, center: Point, radius: u16) -> Result<(), DisplayError> {
        Circle::with_center(eg_point(center), 2 * radius as u32 + 1)
            .into_styled(PrimitiveStyle::with_fill(self.fg.into()))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: Point,
        align: TextAlign,
        opaque: bool,
    ) -> Result<(), DisplayError> {
        let mut character = MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(self.fg.into());
        if opaque {
            character = character.background_color(self.bg.into());
        }

        let (alignment, baseline) = match align {
            TextAlign::Left => (Alignment::Left, Baseline::Top),
            TextAlign::Right => (Alignment::Right, Baseline::Top),
            TextAlign::Center => (Alignment::Center, Baseline::Middle),
        };
        let style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(baseline)
            .build();

        Text::with_text_style(text, eg_point(at), character.build(), style)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_image(&mut self, image: ImageId, at: Point) -> Result<(), DisplayError> {
        let fg = self.fg;
        let result = match image {
            ImageId::Flower => self.draw_flower(at),
            ImageId::Lightning => self.draw_lightning(at),
        };
        self.fg = fg;
        result
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        // Every primitive is written straight to the target
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_graphics::geometry::{OriginDimensions, Size};
    use embedded_graphics::Pixel;

    const W: usize = layout::SCREEN_WIDTH as usize;
    const H: usize = layout::SCREEN_HEIGHT as usize;

    struct Frame {
        pixels: Vec<Rgb565>,
        writes: usize,
    }

    impl Frame {
        fn new() -> Self {
            Self {
                pixels: vec![Rgb565::new(0, 0, 0); W * H],
                writes: 0,
            }
        }

        fn at(&self, x: usize, y: usize) -> Rgb565 {
            self.pixels[y * W + x]
        }
    }

    impl OriginDimensions for Frame {
        fn size(&self) -> Size {
            Size::new(W as u32, H as u32)
        }
    }

    impl DrawTarget for Frame {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(p, color) in pixels {
                if (0..W as i32).contains(&p.x) && (0..H as i32).contains(&p.y) {
                    self.pixels[p.y as usize * W + p.x as usize] = color;
                    self.writes += 1;
                }
            }
            Ok(())
        }
    }

    /// Target whose bus always fails
    struct Broken;

    impl OriginDimensions for Broken {
        fn size(&self) -> Size {
            Size::new(W as u32, H as u32)
        }
    }

    impl DrawTarget for Broken {
        type Color = Rgb565;
        type Error = ();

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            Err(())
        }
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(Rgb565::from(Color::WHITE), Rgb565::new(31, 63, 31));
        assert_eq!(Rgb565::from(Color::RED), Rgb565::new(31, 0, 0));
        assert_eq!(Rgb565::from(Color::DARK_BLUE), Rgb565::new(0, 0, 17));
    }

    #[test]
    fn test_fill_rect_is_inclusive() {
        let mut canvas = GraphicsCanvas::new(Frame::new());
        canvas.set_foreground(Color::YELLOW);
        canvas.fill_rect(Rect::new(10, 20, 12, 21)).unwrap();

        let frame = canvas.into_inner();
        assert_eq!(frame.writes, 6);
        assert_eq!(frame.at(12, 21), Color::YELLOW.into());
        assert_eq!(frame.at(13, 21), Rgb565::new(0, 0, 0));
    }

    #[test]
    fn test_line_and_circle() {
        let mut canvas = GraphicsCanvas::new(Frame::new());
        canvas.set_foreground(Color::LIME);
        canvas.draw_hline(0, 319, 100).unwrap();
        canvas.set_foreground(Color::RED);
        canvas.fill_circle(Point::new(40, 80), 10).unwrap();

        let frame = canvas.into_inner();
        assert_eq!(frame.at(0, 100), Color::LIME.into());
        assert_eq!(frame.at(319, 100), Color::LIME.into());
        assert_eq!(frame.at(40, 80), Color::RED.into());
        assert_eq!(frame.at(40, 72), Color::RED.into());
        assert_eq!(frame.at(52, 80), Rgb565::new(0, 0, 0));
    }

    #[test]
    fn test_opaque_text_fills_background() {
        let mut canvas = GraphicsCanvas::new(Frame::new());
        canvas.set_foreground(Color::BLACK);
        canvas.set_background(Color::LIME);
        canvas
            .draw_text("Ok", Point::new(32, 55), TextAlign::Left, true)
            .unwrap();

        let frame = canvas.into_inner();
        // Two 6x10 cells, every pixel written
        assert_eq!(frame.writes, 2 * 6 * 10);
        assert!((32..44)
            .flat_map(|x| (55..65).map(move |y| (x, y)))
            .any(|(x, y)| frame.at(x, y) == Color::LIME.into()));
    }

    #[test]
    fn test_transparent_text_leaves_background() {
        let mut canvas = GraphicsCanvas::new(Frame::new());
        canvas.set_foreground(Color::WHITE);
        canvas
            .draw_text("Ok", Point::new(310, 30), TextAlign::Right, false)
            .unwrap();

        let frame = canvas.into_inner();
        assert!(frame.writes > 0 && frame.writes < 2 * 6 * 10);
        // Right-aligned text ends at the anchor
        assert!((311..W).all(|x| (30..40).all(|y| frame.at(x, y) == Rgb565::new(0, 0, 0))));
    }

    #[test]
    fn test_images_cover_panel_and_restore_color() {
        for image in [ImageId::Flower, ImageId::Lightning] {
            let mut canvas = GraphicsCanvas::new(Frame::new());
            canvas.set_foreground(Color::SILVER);
            canvas.draw_image(image, layout::OVERVIEW_IMAGE).unwrap();
            canvas.fill_rect(Rect::new(0, 0, 0, 0)).unwrap();

            let frame = canvas.into_inner();
            assert_eq!(frame.at(0, 0), Color::SILVER.into());
            assert_ne!(frame.at(0, 24), Rgb565::new(0, 0, 0));
            assert_ne!(frame.at(319, 189), Rgb565::new(0, 0, 0));
            // Navigation strip untouched
            assert_eq!(frame.at(0, 190), Rgb565::new(0, 0, 0));
        }
    }

    #[test]
    fn test_draw_errors_map_to_communication() {
        let mut canvas = GraphicsCanvas::new(Broken);
        assert_eq!(
            canvas.draw_line(Point::new(0, 0), Point::new(5, 5)),
            Err(DisplayError::Communication)
        );
        assert_eq!(
            canvas.draw_text("x", Point::new(0, 0), TextAlign::Left, true),
            Err(DisplayError::Communication)
        );
        assert_eq!(canvas.flush(), Ok(()));
    }
}
