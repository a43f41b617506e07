//! Drawables that render complication data

use embedded_graphics::{
    geometry::Point,
    pixelcolor::{Rgb565, RgbColor},
    primitives::Rectangle,
};
use heapless::String;
use profont::PROFONT_12_POINT;

use super::canvas::{Canvas, Paint};
use crate::complication::{ComplicationData, ComplicationType, TEXT_LEN};

const AMBIENT_COLOR: Rgb565 = Rgb565::new(12, 24, 12);

/// Icon glyph, title and text with separators.
const LINE_LEN: usize = 2 * TEXT_LEN + 8;

/// Renders the data of one complication slot.
pub trait ComplicationDrawable {
    /// Replace the data shown by this drawable.
    fn set_complication_data(&mut self, data: ComplicationData);

    fn set_in_ambient_mode(&mut self, ambient: bool);

    /// Area of the face this drawable paints into.
    fn set_bounds(&mut self, bounds: Rectangle);

    fn draw<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error>;
}

/// Draws icon glyph, title and text on a single line.
#[derive(Debug, Clone)]
pub struct TextComplication {
    data: Option<ComplicationData>,
    bounds: Rectangle,
    ambient: bool,
    paint: Paint,
}

impl TextComplication {
    pub fn new(color: Rgb565) -> Self {
        let mut paint = Paint::new(&PROFONT_12_POINT, 12, color);
        paint.set_anti_alias(true);

        Self {
            data: None,
            bounds: Rectangle::zero(),
            ambient: false,
            paint,
        }
    }

    pub fn data(&self) -> Option<&ComplicationData> {
        self.data.as_ref()
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn is_in_ambient_mode(&self) -> bool {
        self.ambient
    }

    /// Line of text for the current data, if there is anything to show.
    pub fn line(&self) -> Option<String<LINE_LEN>> {
        let data = self.data.as_ref()?;
        if matches!(data.kind(), ComplicationType::Empty | ComplicationType::NoData) {
            return None;
        }

        let mut line: String<LINE_LEN> = String::new();
        // Fits by construction, see `LINE_LEN`.
        let mut push = |part: &str| {
            if !line.is_empty() {
                let _ = line.push(' ');
            }
            let _ = line.push_str(part);
        };

        let mut glyph = [0u8; 4];
        if let Some(icon) = data.icon_glyph() {
            push(icon.encode_utf8(&mut glyph));
        }
        if data.kind() == ComplicationType::LongText {
            if let Some(title) = data.title() {
                push(title);
            }
        }
        if data.kind() != ComplicationType::Icon {
            if let Some(text) = data.text() {
                push(text);
            }
        }

        (!line.is_empty()).then_some(line)
    }
}

impl Default for TextComplication {
    fn default() -> Self {
        Self::new(Rgb565::WHITE)
    }
}

impl ComplicationDrawable for TextComplication {
    fn set_complication_data(&mut self, data: ComplicationData) {
        self.data = Some(data);
    }

    fn set_in_ambient_mode(&mut self, ambient: bool) {
        self.ambient = ambient;
    }

    fn set_bounds(&mut self, bounds: Rectangle) {
        self.bounds = bounds;
    }

    fn draw<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        let Some(line) = self.line() else {
            return Ok(());
        };

        let mut paint = self.paint;
        if self.ambient {
            paint.set_anti_alias(false);
            paint.set_color(AMBIENT_COLOR);
        }

        // Vertically centered on the baseline
        let baseline = self.bounds.top_left
            + Point::new(0, (self.bounds.size.height + paint.text_size()) as i32 / 2);
        canvas.draw_text(&line, baseline, &paint)
    }
}
