//! Drawing surface used by the face

use embedded_graphics::{
    geometry::Point,
    image::{Image, ImageRaw},
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    text::{renderer::TextRenderer, Alignment, Baseline, Text, TextStyleBuilder},
};

/// Raw RGB565 image, big endian, as produced by the build script.
pub type Bitmap<'a> = ImageRaw<'a, Rgb565>;

/// How text is drawn: font, size, color and smoothing.
///
/// Text is always left aligned on its baseline.
#[derive(Debug, Clone, Copy)]
pub struct Paint {
    font: &'static MonoFont<'static>,
    text_size: u32,
    color: Rgb565,
    anti_alias: bool,
}

impl Paint {
    pub fn new(font: &'static MonoFont<'static>, text_size: u32, color: Rgb565) -> Self {
        Self {
            font,
            text_size,
            color,
            anti_alias: false,
        }
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    /// Nominal text size, used as the line advance.
    pub fn text_size(&self) -> u32 {
        self.text_size
    }

    pub fn color(&self) -> Rgb565 {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb565) {
        self.color = color;
    }

    pub fn is_anti_alias(&self) -> bool {
        self.anti_alias
    }

    pub fn set_anti_alias(&mut self, anti_alias: bool) {
        self.anti_alias = anti_alias;
    }

    /// Width of `text` in pixels when drawn with this paint.
    pub fn measure_text(&self, text: &str) -> u32 {
        self.character_style()
            .measure_string(text, Point::zero(), Baseline::Alphabetic)
            .bounding_box
            .size
            .width
    }

    fn character_style(&self) -> MonoTextStyle<'static, Rgb565> {
        MonoTextStyle::new(self.font, self.color)
    }
}

/// The host's rendering surface.
pub trait Canvas {
    type Error;

    /// Fill the entire surface with one color.
    fn fill(&mut self, color: Rgb565) -> Result<(), Self::Error>;

    /// Draw a bitmap with its top left corner at `origin`.
    fn draw_bitmap(&mut self, bitmap: &Bitmap<'_>, origin: Point) -> Result<(), Self::Error>;

    /// Draw text left aligned with its baseline starting at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, paint: &Paint) -> Result<(), Self::Error>;
}

/// [`Canvas`] over any RGB565 `embedded-graphics` draw target.
///
/// Mono fonts have no coverage data, so the anti-alias flag of a [`Paint`]
/// does not change what ends up on this surface.
pub struct Surface<D> {
    target: D,
}

impl<D> Surface<D> {
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn inner(&self) -> &D {
        &self.target
    }

    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D> Canvas for Surface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn fill(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.target.clear(color)
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap<'_>, origin: Point) -> Result<(), Self::Error> {
        Image::new(bitmap, origin).draw(&mut self.target)
    }

    fn draw_text(&mut self, text: &str, origin: Point, paint: &Paint) -> Result<(), Self::Error> {
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Left)
            .baseline(Baseline::Alphabetic)
            .build();

        Text::with_text_style(text, origin, paint.character_style(), text_style)
            .draw(&mut self.target)?;
        Ok(())
    }
}
