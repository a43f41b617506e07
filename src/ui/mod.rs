//! UI definitions module
//!
//! A watch face is driven by its host: the host owns the display, the
//! clock tick and the complication providers, and calls into the face
//! through [`WatchFace`]. The face calls back through [`Host`], which is
//! passed in on every call instead of being stored.

use chrono::FixedOffset;

use crate::{
    complication::{ComplicationData, ComplicationType, SystemProvider},
    system::timer::{TickScheduler, TickToken},
};

pub mod canvas;
pub mod complication_drawable;
pub mod default_watchface;
pub mod label;
pub mod layout;

use canvas::Canvas;
use embedded_graphics::primitives::Rectangle;

/// Services the face can request from its host.
pub trait Host: TickScheduler {
    /// Ask for [`WatchFace::on_draw`] to be called soon.
    fn invalidate(&mut self);

    /// Start delivering [`WatchFace::on_timezone_changed`].
    fn register_timezone_receiver(&mut self);

    /// Stop delivering [`WatchFace::on_timezone_changed`].
    fn unregister_timezone_receiver(&mut self);

    /// Declare which complication slots the face shows.
    fn set_active_complications(&mut self, ids: &[u8]);

    /// Provider to use for a slot until the user picks one.
    fn set_default_complication_provider(
        &mut self,
        id: u8,
        provider: SystemProvider,
        kind: ComplicationType,
    );

    /// The timezone the user has currently selected.
    fn default_timezone(&self) -> FixedOffset;
}

/// Lifecycle callbacks delivered by the host, one at a time.
pub trait WatchFace {
    /// Surface created
    fn on_create(&mut self, host: &mut impl Host);

    /// Surface resized
    fn on_surface_changed(&mut self, width: u32, height: u32);

    /// Draw one frame into `bounds` of the canvas
    fn on_draw<C: Canvas>(&mut self, canvas: &mut C, bounds: Rectangle) -> Result<(), C::Error>;

    fn on_visibility_changed(&mut self, host: &mut impl Host, visible: bool);

    fn on_ambient_mode_changed(&mut self, host: &mut impl Host, ambient: bool);

    /// Surface about to be destroyed
    fn on_destroy(&mut self, host: &mut impl Host);

    /// New data for complication slot `id`
    fn on_complication_data_update(
        &mut self,
        host: &mut impl Host,
        id: u8,
        data: ComplicationData,
    );

    /// System timezone changed, only while registered
    fn on_timezone_changed(&mut self, host: &mut impl Host);

    /// A tick scheduled through [`TickScheduler::schedule_tick`] is due
    fn on_tick(&mut self, host: &mut impl Host, token: TickToken);
}

#[cfg(test)]
pub(crate) mod tests {
    use core::convert::Infallible;

    use chrono::{FixedOffset, Offset, Utc};
    use embedded_graphics::{geometry::Point, pixelcolor::Rgb565};

    use super::{
        canvas::{Bitmap, Canvas, Paint},
        Host,
    };
    use crate::{
        complication::{ComplicationType, SystemProvider},
        system::timer::{TickScheduler, TickToken},
    };

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Fill(Rgb565),
        Bitmap {
            origin: Point,
        },
        Text {
            text: String,
            origin: Point,
            color: Rgb565,
            anti_alias: bool,
        },
    }

    /// Canvas that remembers what was drawn.
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        pub ops: Vec<Op>,
    }

    impl Canvas for RecordingCanvas {
        type Error = Infallible;

        fn fill(&mut self, color: Rgb565) -> Result<(), Self::Error> {
            self.ops.push(Op::Fill(color));
            Ok(())
        }

        fn draw_bitmap(&mut self, _bitmap: &Bitmap<'_>, origin: Point) -> Result<(), Self::Error> {
            self.ops.push(Op::Bitmap { origin });
            Ok(())
        }

        fn draw_text(
            &mut self,
            text: &str,
            origin: Point,
            paint: &Paint,
        ) -> Result<(), Self::Error> {
            self.ops.push(Op::Text {
                text: text.into(),
                origin,
                color: paint.color(),
                anti_alias: paint.is_anti_alias(),
            });
            Ok(())
        }
    }

    /// Host that counts the calls it receives.
    #[derive(Debug)]
    pub struct RecordingHost {
        pub invalidations: usize,
        pub register_calls: usize,
        pub unregister_calls: usize,
        pub active: Vec<u8>,
        pub default_providers: Vec<(u8, SystemProvider, ComplicationType)>,
        pub pending: Option<(TickToken, u64)>,
        pub timezone: FixedOffset,
    }

    impl Default for RecordingHost {
        fn default() -> Self {
            Self {
                invalidations: 0,
                register_calls: 0,
                unregister_calls: 0,
                active: Vec::new(),
                default_providers: Vec::new(),
                pending: None,
                timezone: Utc.fix(),
            }
        }
    }

    impl RecordingHost {
        /// Receivers registered and not yet unregistered.
        pub fn subscriptions(&self) -> usize {
            self.register_calls - self.unregister_calls
        }
    }

    impl TickScheduler for RecordingHost {
        fn schedule_tick(&mut self, token: TickToken, delay_ms: u64) {
            self.pending = Some((token, delay_ms));
        }

        fn cancel_tick(&mut self) {
            self.pending = None;
        }
    }

    impl Host for RecordingHost {
        fn invalidate(&mut self) {
            self.invalidations += 1;
        }

        fn register_timezone_receiver(&mut self) {
            self.register_calls += 1;
        }

        fn unregister_timezone_receiver(&mut self) {
            self.unregister_calls += 1;
        }

        fn set_active_complications(&mut self, ids: &[u8]) {
            self.active = ids.to_vec();
        }

        fn set_default_complication_provider(
            &mut self,
            id: u8,
            provider: SystemProvider,
            kind: ComplicationType,
        ) {
            self.default_providers.push((id, provider, kind));
        }

        fn default_timezone(&self) -> FixedOffset {
            self.timezone
        }
    }
}
