//! Positions of everything on the face
//!
//! Only recomputed when the surface size changes.

use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};

use crate::complication::ComplicationLocation;

const MARGIN: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    width: u32,
    height: u32,
    /// Left edge of the centered date and the time below it
    date_x: i32,
    /// Right edge of the date, where the head-right complication starts
    complication_x: i32,
}

impl Layout {
    /// Center a date of `date_width` pixels on a surface `width` wide.
    pub fn compute(width: u32, height: u32, date_width: u32) -> Self {
        let date_x = (width as i32 - date_width as i32) / 2;

        Self {
            width,
            height,
            date_x,
            complication_x: date_x + date_width as i32,
        }
    }

    pub fn date_x(&self) -> i32 {
        self.date_x
    }

    pub fn complication_x(&self) -> i32 {
        self.complication_x
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounds of a complication slot.
    ///
    /// `line_height` is the date/time text size and `date_baseline` the
    /// baseline of the date line; head slots share the date line.
    pub fn complication_bounds(
        &self,
        location: ComplicationLocation,
        line_height: u32,
        date_baseline: i32,
    ) -> Rectangle {
        let side = line_height;
        let top = date_baseline - line_height as i32;
        let right_limit = self.width as i32 - side as i32;

        match location {
            ComplicationLocation::HeadLeft => Rectangle::new(
                Point::new((self.date_x - side as i32).max(0), top),
                Size::new(side, side),
            ),
            ComplicationLocation::HeadRight => Rectangle::new(
                Point::new(self.complication_x.min(right_limit).max(0), top),
                Size::new(side, side),
            ),
            ComplicationLocation::Center => {
                let width = self.width * 3 / 4;
                Rectangle::new(
                    Point::new(
                        (self.width - width) as i32 / 2,
                        date_baseline + line_height as i32 + MARGIN,
                    ),
                    Size::new(width, side),
                )
            }
            ComplicationLocation::Bottom => Rectangle::new(
                Point::new(
                    (self.width as i32 - side as i32) / 2,
                    self.height as i32 - side as i32 - MARGIN,
                ),
                Size::new(side, side),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn square_face_with_half_width_date() {
        let layout = Layout::compute(400, 400, 200);
        assert_eq!(layout.date_x(), 100);
        assert_eq!(layout.complication_x(), 300);
    }

    #[test]
    fn odd_remainder_truncates() {
        let layout = Layout::compute(240, 240, 151);
        assert_eq!(layout.date_x(), 44);
        assert_eq!(layout.complication_x(), 195);
    }

    #[test]
    fn date_wider_than_surface_goes_negative() {
        let layout = Layout::compute(100, 100, 121);
        assert_eq!(layout.date_x(), -10);
        assert_eq!(layout.complication_x(), 111);
    }

    #[test]
    fn head_right_starts_where_date_ends() {
        let layout = Layout::compute(400, 400, 200);
        let bounds = layout.complication_bounds(ComplicationLocation::HeadRight, 42, 86);
        assert_eq!(bounds.top_left, Point::new(300, 44));
        assert_eq!(bounds.size, Size::new(42, 42));
    }

    #[test]
    fn slots_stay_on_screen() {
        let layout = Layout::compute(240, 240, 240);
        for location in ComplicationLocation::ALL {
            let bounds = layout.complication_bounds(location, 42, 86);
            assert!(bounds.top_left.x >= 0, "{:?}", location);
            assert!(bounds.top_left.x + bounds.size.width as i32 <= 240, "{:?}", location);
            assert!(bounds.top_left.y + bounds.size.height as i32 <= 240, "{:?}", location);
        }
    }

    proptest! {
        #[test]
        fn offsets_match_centering(width in 1u32..2000, date in 0u32..2000) {
            let layout = Layout::compute(width, width, date);
            prop_assert_eq!(layout.date_x(), (width as i32 - date as i32) / 2);
            prop_assert_eq!(layout.complication_x(), layout.date_x() + date as i32);
        }
    }
}
