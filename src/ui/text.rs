//! Mixed-script text lines for the OLED text demo.
//!
//! Latin and CJK glyphs come from different u8g2 bitmap fonts; each line
//! picks its own face and is drawn at its own baseline.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use u8g2_fonts::fonts;
use u8g2_fonts::types::{FontColor, VerticalPosition};
use u8g2_fonts::FontRenderer;

use super::Present;
use crate::error::{Error, Result};

/// Font faces available to text lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Face {
    /// 12 px gothic with kana and common kanji.
    Cjk12,
    /// 32 px Latin.
    Latin32,
    /// 58 px Latin, the keypad glyph face.
    Latin58,
}

impl Face {
    fn renderer(self) -> FontRenderer {
        match self {
            Face::Cjk12 => FontRenderer::new::<fonts::u8g2_font_b12_t_japanese1>(),
            Face::Latin32 => FontRenderer::new::<fonts::u8g2_font_logisoso32_tr>(),
            Face::Latin58 => FontRenderer::new::<fonts::u8g2_font_logisoso58_tr>(),
        }
    }
}

/// One line of text at a baseline origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextLine {
    pub text: &'static str,
    pub face: Face,
    pub origin: Point,
}

impl TextLine {
    pub const fn new(text: &'static str, face: Face, x: i32, y: i32) -> Self {
        Self {
            text,
            face,
            origin: Point::new(x, y),
        }
    }
}

/// The demo greeting: a Japanese line over a large Latin line.
pub const GREETING: [TextLine; 2] = [
    TextLine::new("こんにちは世界", Face::Cjk12, 5, 10),
    TextLine::new("ABCEF", Face::Latin32, 5, 50),
];

/// Clear the frame, draw every line, present once.
pub fn render_lines<D>(display: &mut D, lines: &[TextLine]) -> Result<()>
where
    D: DrawTarget<Color = BinaryColor> + Present,
{
    display.clear(BinaryColor::Off).map_err(|_| Error::Display)?;
    for line in lines {
        line.face
            .renderer()
            .render(
                line.text,
                line.origin,
                VerticalPosition::Baseline,
                FontColor::Transparent(BinaryColor::On),
                display,
            )
            .map_err(|_| Error::Display)?;
    }
    display.present()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::TestFrame;

    #[test]
    fn greeting_renders_in_one_present() {
        let mut frame = TestFrame::new();
        render_lines(&mut frame, &GREETING).unwrap();
        assert_eq!(frame.presents, 1);
        assert!(frame.lit_pixels() > 0);
    }

    #[test]
    fn cjk_line_draws_inside_its_band() {
        let mut frame = TestFrame::new();
        render_lines(&mut frame, &GREETING[..1]).unwrap();
        assert!(frame.lit_pixels() > 0);

        // A 12 px face on baseline 10 stays in the top band.
        let below = frame
            .display
            .bounding_box()
            .points()
            .filter(|p| p.y > 16)
            .any(|p| frame.display.get_pixel(p) == Some(BinaryColor::On));
        assert!(!below);
    }

    #[test]
    fn empty_line_list_only_clears() {
        let mut frame = TestFrame::new();
        render_lines(&mut frame, &[]).unwrap();
        assert_eq!(frame.presents, 1);
        assert_eq!(frame.lit_pixels(), 0);
    }

    #[test]
    fn glyph_face_matches_keypad_renderer() {
        let line = [TextLine::new("A", Face::Latin58, 10, 70)];
        let mut text = TestFrame::new();
        render_lines(&mut text, &line).unwrap();

        let mut glyph = TestFrame::new();
        crate::ui::GlyphRenderer::new().show(&mut glyph, "A").unwrap();

        assert_eq!(text.display, glyph.display);
    }
}
