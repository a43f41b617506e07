//! Default watchface
//!
//! Centered date with the time right below it, four complication slots
//! and a background image that is swapped for a solid fill in ambient mode.

use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};
use embedded_graphics::{geometry::Point, primitives::Rectangle};
use profont::PROFONT_24_POINT;

use super::{
    canvas::{Bitmap, Canvas, Paint},
    complication_drawable::{ComplicationDrawable, TextComplication},
    label::{format_date, format_time, Label},
    layout::Layout,
    Host, WatchFace,
};
use crate::{
    complication::{
        complication_ids, ComplicationData, ComplicationLocation, ComplicationType, SystemProvider,
    },
    config::FaceConfig,
    system::{
        time::{to_local, Clock},
        timer::{should_run, TickTimer, TickToken, TimerState},
    },
};

/// Basic default watchface
pub struct DefaultWatchface<K, D = TextComplication>
where
    K: Clock,
    D: ComplicationDrawable,
{
    config: FaceConfig,
    clock: K,
    /// Offset applied to the UTC clock, refreshed from the host
    timezone: FixedOffset,
    /// Date and time text paint
    text_paint: Paint,
    /// Shown while interactive
    background: Bitmap<'static>,

    date_label: Label,
    time_label: Label,
    /// Time the layout was computed for, only refreshed on resize
    layout_time: NaiveDateTime,
    layout: Layout,

    ambient: bool,
    visible: bool,
    registered_timezone_receiver: bool,
    timer: TickTimer,

    /// Last data delivered per slot, indexed like `ComplicationLocation::ALL`
    active_complications: [Option<ComplicationData>; 4],
    complication_drawables: [D; 4],
}

impl<K, D> DefaultWatchface<K, D>
where
    K: Clock,
    D: ComplicationDrawable + Default,
{
    pub fn new(config: FaceConfig, clock: K, background: Bitmap<'static>) -> Self {
        let layout_time = clock.now();

        Self {
            timer: TickTimer::new(config.update_rate_ms),
            text_paint: Paint::new(&PROFONT_24_POINT, config.text_size, config.text_color),
            config,
            clock,
            timezone: Utc.fix(),
            background,
            date_label: Label::new(),
            time_label: Label::new(),
            layout_time,
            layout: Layout::default(),
            ambient: false,
            visible: false,
            registered_timezone_receiver: false,
            active_complications: Default::default(),
            complication_drawables: core::array::from_fn(|_| D::default()),
        }
    }

    fn initialize_complications(&mut self, host: &mut impl Host) {
        self.active_complications = Default::default();
        self.complication_drawables = core::array::from_fn(|_| D::default());

        self.place_complications();
        host.set_active_complications(&complication_ids());
    }
}

impl<K, D> DefaultWatchface<K, D>
where
    K: Clock,
    D: ComplicationDrawable,
{
    pub fn clock(&self) -> &K {
        &self.clock
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn text_paint(&self) -> &Paint {
        &self.text_paint
    }

    /// Date text of the last drawn frame
    pub fn date_text(&self) -> &str {
        self.date_label.as_str()
    }

    /// Time text of the last drawn frame
    pub fn time_text(&self) -> &str {
        self.time_label.as_str()
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    /// Last data delivered for slot `id`
    pub fn complication_data(&self, id: u8) -> Option<&ComplicationData> {
        let location = ComplicationLocation::from_id(id)?;
        self.active_complications[location.index()].as_ref()
    }

    pub fn complication_drawable(&self, location: ComplicationLocation) -> &D {
        &self.complication_drawables[location.index()]
    }

    fn place_complications(&mut self) {
        for location in ComplicationLocation::ALL {
            let bounds = self.layout.complication_bounds(
                location,
                self.config.text_size,
                self.config.date_baseline_y,
            );
            self.complication_drawables[location.index()].set_bounds(bounds);
        }
    }

    fn local_now(&self) -> NaiveDateTime {
        to_local(self.clock.now(), self.timezone)
    }

    fn format_labels(&mut self, now: NaiveDateTime) {
        if format_date(&mut self.date_label, now, self.config.locale).is_err() {
            debug!("Date does not fit its label");
        }
        if format_time(&mut self.time_label, now, self.config.use_12hour_format).is_err() {
            debug!("Time does not fit its label");
        }
    }

    fn register_receiver(&mut self, host: &mut impl Host) {
        if self.registered_timezone_receiver {
            return;
        }

        self.registered_timezone_receiver = true;
        host.register_timezone_receiver();
    }

    fn unregister_receiver(&mut self, host: &mut impl Host) {
        if !self.registered_timezone_receiver {
            return;
        }

        self.registered_timezone_receiver = false;
        host.unregister_timezone_receiver();
    }

    fn should_timer_be_running(&self) -> bool {
        should_run(self.visible, self.ambient)
    }

    /// Starts the timer if it should be running, stops it otherwise.
    fn update_timer(&mut self, host: &mut impl Host) {
        let eligible = self.should_timer_be_running();
        self.timer.update(host, eligible);
    }
}

impl<K, D> WatchFace for DefaultWatchface<K, D>
where
    K: Clock,
    D: ComplicationDrawable + Default,
{
    fn on_create(&mut self, host: &mut impl Host) {
        self.text_paint = Paint::new(
            &PROFONT_24_POINT,
            self.config.text_size,
            self.config.text_color,
        );
        self.text_paint.set_anti_alias(true);

        host.set_default_complication_provider(
            ComplicationLocation::HeadRight.id(),
            SystemProvider::StepCount,
            ComplicationType::Icon,
        );
        self.initialize_complications(host);

        info!("Watch face created");
    }

    /// Positions are only worked out here, not on every frame.
    fn on_surface_changed(&mut self, width: u32, height: u32) {
        self.layout_time = self.local_now();
        self.format_labels(self.layout_time);

        let date_width = self.text_paint.measure_text(self.date_label.as_str());
        self.layout = Layout::compute(width, height, date_width);

        self.place_complications();

        debug!(
            "Surface {}x{}, date at x={}",
            width,
            height,
            self.layout.date_x()
        );
    }

    fn on_draw<C: Canvas>(&mut self, canvas: &mut C, bounds: Rectangle) -> Result<(), C::Error> {
        let now = self.local_now();

        if self.ambient {
            canvas.fill(self.config.ambient_background)?;
        } else {
            canvas.draw_bitmap(&self.background, bounds.top_left)?;
        }

        self.format_labels(now);

        let date_origin = Point::new(self.layout.date_x(), self.config.date_baseline_y);
        canvas.draw_text(self.date_label.as_str(), date_origin, &self.text_paint)?;

        let time_origin = date_origin + Point::new(0, self.text_paint.text_size() as i32);
        canvas.draw_text(self.time_label.as_str(), time_origin, &self.text_paint)?;

        for drawable in &self.complication_drawables {
            drawable.draw(canvas)?;
        }

        Ok(())
    }

    fn on_visibility_changed(&mut self, host: &mut impl Host, visible: bool) {
        self.visible = visible;

        if visible {
            self.register_receiver(host);
            self.timezone = host.default_timezone();
            host.invalidate();
        } else {
            self.unregister_receiver(host);
        }

        self.update_timer(host);
    }

    fn on_ambient_mode_changed(&mut self, host: &mut impl Host, ambient: bool) {
        self.ambient = ambient;
        self.text_paint.set_anti_alias(!ambient);

        for drawable in &mut self.complication_drawables {
            drawable.set_in_ambient_mode(ambient);
        }

        self.update_timer(host);
    }

    fn on_destroy(&mut self, host: &mut impl Host) {
        self.timer.cancel(host);
        info!("Watch face destroyed");
    }

    fn on_complication_data_update(
        &mut self,
        host: &mut impl Host,
        id: u8,
        data: ComplicationData,
    ) {
        let Some(location) = ComplicationLocation::from_id(id) else {
            debug!("Ignoring data for unknown complication {}", id);
            return;
        };

        let index = location.index();
        self.active_complications[index] = Some(data.clone());
        self.complication_drawables[index].set_complication_data(data);
        host.invalidate();
    }

    fn on_timezone_changed(&mut self, host: &mut impl Host) {
        self.timezone = host.default_timezone();
        host.invalidate();
    }

    fn on_tick(&mut self, host: &mut impl Host, token: TickToken) {
        let eligible = self.should_timer_be_running();
        let now_ms = self.clock.now_millis();

        if self.timer.on_tick(host, token, eligible, now_ms) {
            host.invalidate();
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use chrono::{DateTime, NaiveDate};
    use embedded_graphics::{
        geometry::Size,
        pixelcolor::{Rgb565, RgbColor},
    };

    use super::*;
    use crate::ui::tests::{Op, RecordingCanvas, RecordingHost};

    static BACKGROUND: [u8; 8] = [0x00; 8];

    /// Clock the test can move by hand.
    struct TestClock(Cell<i64>);

    impl TestClock {
        fn set(&self, millis: i64) {
            self.0.set(millis);
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> NaiveDateTime {
            DateTime::from_timestamp_millis(self.0.get())
                .unwrap()
                .naive_utc()
        }
    }

    fn millis(h: u32, m: u32, s: u32) -> i64 {
        NaiveDate::from_ymd_opt(2024, 3, 3)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    fn face_at(millis: i64) -> (DefaultWatchface<TestClock>, RecordingHost) {
        let clock = TestClock(Cell::new(millis));
        let mut face = DefaultWatchface::new(
            FaceConfig::default(),
            clock,
            Bitmap::new(&BACKGROUND, 2),
        );
        let mut host = RecordingHost::default();
        face.on_create(&mut host);
        face.on_surface_changed(400, 400);
        (face, host)
    }

    fn screen() -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(400, 400))
    }

    fn texts(canvas: &RecordingCanvas) -> Vec<(&str, Point, bool)> {
        canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Text {
                    text,
                    origin,
                    anti_alias,
                    ..
                } => Some((text.as_str(), *origin, *anti_alias)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn create_declares_slots_and_default_provider() {
        let (_, host) = face_at(millis(9, 41, 0));

        assert_eq!(host.active, vec![0, 1, 2, 3]);
        assert_eq!(
            host.default_providers,
            vec![(1, SystemProvider::StepCount, ComplicationType::Icon)]
        );
    }

    #[test]
    fn surface_change_centers_date() {
        let (face, _) = face_at(millis(9, 41, 0));

        let date_width = face.text_paint().measure_text("Sun 03 Mar 2024");
        assert_eq!(face.layout().date_x(), (400 - date_width as i32) / 2);
        assert_eq!(
            face.layout().complication_x(),
            face.layout().date_x() + date_width as i32
        );
        assert_eq!(
            face.complication_drawable(ComplicationLocation::HeadRight)
                .bounds()
                .top_left
                .x,
            face.layout().complication_x()
        );
    }

    #[test]
    fn interactive_frame_draws_background_date_and_time() {
        let (mut face, _) = face_at(millis(9, 41, 0));
        let mut canvas = RecordingCanvas::default();

        face.on_draw(&mut canvas, screen()).unwrap();

        let x = face.layout().date_x();
        assert_eq!(canvas.ops[0], Op::Bitmap { origin: Point::zero() });
        assert_eq!(
            texts(&canvas),
            vec![
                ("Sun 03 Mar 2024", Point::new(x, 86), true),
                ("09:41", Point::new(x, 128), true),
            ]
        );
    }

    #[test]
    fn ambient_frame_fills_black_without_anti_alias() {
        let (mut face, mut host) = face_at(millis(9, 41, 0));
        let mut canvas = RecordingCanvas::default();

        face.on_ambient_mode_changed(&mut host, true);
        face.on_draw(&mut canvas, screen()).unwrap();

        assert_eq!(canvas.ops[0], Op::Fill(Rgb565::BLACK));
        assert!(texts(&canvas).iter().all(|(_, _, anti_alias)| !anti_alias));
        for location in ComplicationLocation::ALL {
            assert!(face.complication_drawable(location).is_in_ambient_mode());
        }

        face.on_ambient_mode_changed(&mut host, false);
        assert!(face.text_paint().is_anti_alias());
    }

    #[test]
    fn draw_uses_live_clock_but_keeps_layout() {
        let (mut face, _) = face_at(millis(9, 41, 0));
        let layout = *face.layout();

        face.clock().set(millis(23, 59, 30));
        let mut canvas = RecordingCanvas::default();
        face.on_draw(&mut canvas, screen()).unwrap();

        assert_eq!(face.time_text(), "23:59");
        assert_eq!(*face.layout(), layout);
    }

    #[test]
    fn timer_runs_only_when_visible_and_interactive() {
        let (mut face, mut host) = face_at(millis(9, 41, 0));
        assert_eq!(face.timer_state(), TimerState::Stopped);

        face.on_visibility_changed(&mut host, true);
        assert!(matches!(face.timer_state(), TimerState::Running { .. }));

        face.on_ambient_mode_changed(&mut host, true);
        assert_eq!(face.timer_state(), TimerState::Stopped);
        assert!(host.pending.is_none());

        face.on_ambient_mode_changed(&mut host, false);
        assert!(matches!(face.timer_state(), TimerState::Running { .. }));

        face.on_visibility_changed(&mut host, false);
        assert_eq!(face.timer_state(), TimerState::Stopped);
        assert!(host.pending.is_none());
    }

    #[test]
    fn ambient_drops_pending_tick() {
        let (mut face, mut host) = face_at(millis(9, 41, 0));
        face.on_visibility_changed(&mut host, true);
        let (token, _) = host.pending.unwrap();

        face.on_ambient_mode_changed(&mut host, true);
        let before = host.invalidations;
        face.on_tick(&mut host, token);

        assert_eq!(host.invalidations, before);
        assert!(host.pending.is_none());
    }

    #[test]
    fn tick_redraws_and_aligns_to_the_minute() {
        let (mut face, mut host) = face_at(millis(9, 41, 0));
        face.on_visibility_changed(&mut host, true);
        let (token, delay) = host.pending.unwrap();
        assert_eq!(delay, 0);

        face.clock().set(millis(9, 41, 17) + 250);
        let before = host.invalidations;
        face.on_tick(&mut host, token);

        assert_eq!(host.invalidations, before + 1);
        let (next, delay) = host.pending.unwrap();
        assert_ne!(next, token);
        assert_eq!(delay, 60_000 - 17_250);
    }

    #[test]
    fn visibility_regain_redraws_once_and_resumes() {
        let (mut face, mut host) = face_at(millis(9, 41, 0));
        face.on_visibility_changed(&mut host, true);
        face.on_visibility_changed(&mut host, false);
        assert!(host.pending.is_none());

        let before = host.invalidations;
        face.on_visibility_changed(&mut host, true);

        assert_eq!(host.invalidations, before + 1);
        assert_eq!(host.pending.map(|(_, delay)| delay), Some(0));
    }

    #[test]
    fn timezone_receiver_is_registered_once() {
        let (mut face, mut host) = face_at(millis(9, 41, 0));

        face.on_visibility_changed(&mut host, true);
        face.on_visibility_changed(&mut host, true);
        assert_eq!(host.register_calls, 1);
        assert_eq!(host.subscriptions(), 1);

        face.on_visibility_changed(&mut host, false);
        face.on_visibility_changed(&mut host, false);
        assert_eq!(host.unregister_calls, 1);
        assert_eq!(host.subscriptions(), 0);
    }

    #[test]
    fn timezone_change_shifts_the_time() {
        let (mut face, mut host) = face_at(millis(9, 41, 0));
        face.on_visibility_changed(&mut host, true);

        host.timezone = FixedOffset::east_opt(2 * 3_600).unwrap();
        let before = host.invalidations;
        face.on_timezone_changed(&mut host);
        face.on_draw(&mut RecordingCanvas::default(), screen()).unwrap();

        assert_eq!(host.invalidations, before + 1);
        assert_eq!(face.time_text(), "11:41");
    }

    #[test]
    fn complication_update_is_last_write_wins() {
        let (mut face, mut host) = face_at(millis(9, 41, 0));

        face.on_complication_data_update(&mut host, 1, ComplicationData::short_text("100"));
        face.on_complication_data_update(&mut host, 1, ComplicationData::icon('*'));

        assert_eq!(face.complication_data(1), Some(&ComplicationData::icon('*')));
        assert_eq!(
            face.complication_drawable(ComplicationLocation::HeadRight).data(),
            Some(&ComplicationData::icon('*'))
        );
        assert_eq!(face.complication_data(0), None);
        assert_eq!(host.invalidations, 2);
    }

    #[test]
    fn unknown_complication_is_ignored() {
        let (mut face, mut host) = face_at(millis(9, 41, 0));

        face.on_complication_data_update(&mut host, 9, ComplicationData::short_text("x"));

        assert_eq!(host.invalidations, 0);
        assert_eq!(face.complication_data(9), None);
    }

    #[test]
    fn complications_are_drawn_after_the_time() {
        let (mut face, mut host) = face_at(millis(9, 41, 0));
        face.on_complication_data_update(&mut host, 3, ComplicationData::short_text("42%"));
        let mut canvas = RecordingCanvas::default();

        face.on_draw(&mut canvas, screen()).unwrap();

        let texts = texts(&canvas);
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[2].0, "42%");
    }

    #[test]
    fn destroy_cancels_pending_tick() {
        let (mut face, mut host) = face_at(millis(9, 41, 0));
        face.on_visibility_changed(&mut host, true);
        let (token, _) = host.pending.unwrap();

        face.on_destroy(&mut host);
        face.on_tick(&mut host, token);

        assert!(host.pending.is_none());
        assert_eq!(face.timer_state(), TimerState::Stopped);
    }
}
