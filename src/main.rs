#![no_std]
#![no_main]

mod board;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use debouncr::{debounce_2, Edge};
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pin, Pull},
    peripherals::{P0_13, P0_15, SPI2},
    spim,
};
use embassy_time::{Duration, Timer};

bind_interrupts!(struct Irqs {
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use board::{
    backlight::Backlight,
    display::{self, Lcd, LCD_H, LCD_W},
    host::{tick_timer, Event, FirmwareHost, EVENTS},
};
use pinetime_face::{
    ui::canvas::Bitmap, DefaultWatchface, FaceConfig, Surface, TimeManager, TimeReference,
    WatchFace,
};

// Others
use chrono::FixedOffset;
use embedded_graphics::{geometry::{Point, Size}, primitives::Rectangle};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));
const TIMEZONE: i32 = 1 * 3_600;

static BACKGROUND: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/background.raw"));

/// Owns the face and the panel; the only place lifecycle callbacks run.
#[embassy_executor::task(pool_size = 1)]
async fn watch_face(
    mut face: DefaultWatchface<TimeManager>,
    mut surface: Surface<Lcd>,
    mut host: FirmwareHost,
) {
    let bounds = Rectangle::new(Point::zero(), Size::new(LCD_W as u32, LCD_H as u32));

    face.on_create(&mut host);
    face.on_surface_changed(bounds.size.width, bounds.size.height);

    loop {
        match EVENTS.receive().await {
            Event::Tick(token) => face.on_tick(&mut host, token),
            Event::Visibility(visible) => face.on_visibility_changed(&mut host, visible),
            Event::Ambient(ambient) => face.on_ambient_mode_changed(&mut host, ambient),
        }

        if host.take_invalidated() && face.on_draw(&mut surface, bounds).is_err() {
            defmt::warn!("Failed to draw watch face");
        }
    }
}

/// Polls the button every 10ms, a press toggles ambient mode.
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(
    mut enable: Output<'static, P0_15>,
    pin: Input<'static, P0_13>,
    mut backlight: Backlight,
) {
    let mut debounce = debounce_2(false);
    let mut ambient = false;

    loop {
        // Enable button
        enable.set_high();
        // The button needs a short time to give stable outputs
        Timer::after(Duration::from_nanos(1)).await;

        // Poll button
        if debounce.update(pin.is_high()) == Some(Edge::Rising) {
            ambient = !ambient;
            defmt::info!("Ambient mode: {}", ambient);
            backlight.set_ambient(ambient);
            EVENTS.send(Event::Ambient(ambient)).await;
        }

        // Button consumes around 34µA when P0.15 is left high.
        // To reduce current consumption, set it low most of the time.
        enable.set_low();

        // Re-schedule the timer interrupt in 10ms
        Timer::after(Duration::from_millis(10)).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(board::config());
    defmt::info!("Initializing");

    // Initialize Backlight
    let backlight = Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
    );

    // Initialize Button
    let button = Input::new(p.P0_13, Pull::None);
    let btn_enable = Output::new(p.P0_15, Level::Low, OutputDrive::Standard);

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let lcd = unwrap!(display::init(
        spim,
        Output::new(p.P0_25.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26.degrade(), Level::Low, OutputDrive::Standard),
    ));

    // Wall clock starts at the build time
    let clock = TimeManager::init(unwrap!(TimeReference::from_timestamp(UTC_TIME, 0)));
    let timezone = unwrap!(FixedOffset::east_opt(TIMEZONE));

    let face = DefaultWatchface::new(
        FaceConfig::default(),
        clock,
        Bitmap::new(BACKGROUND, LCD_W as u32),
    );

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(tick_timer()));
    unwrap!(spawner.spawn(watch_face(
        face,
        Surface::new(lcd),
        FirmwareHost::new(timezone)
    )));
    unwrap!(spawner.spawn(poll_button(btn_enable, button, backlight)));

    // The face becomes visible once the panel is up
    EVENTS.send(Event::Visibility(true)).await;
}
