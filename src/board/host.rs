//! The firmware side of the watch face lifecycle
//!
//! Everything the face reacts to arrives as an [`Event`] on one channel and
//! is handled by a single task, so callbacks never overlap.

use chrono::FixedOffset;
use embassy_futures::select::{select, Either};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel, signal::Signal};
use embassy_time::{Duration, Instant, Timer};
use pinetime_face::{
    system::timer::{TickScheduler, TickToken},
    ComplicationType, Host, SystemProvider,
};

/// Lifecycle events delivered to the watch face task.
pub enum Event {
    Tick(TickToken),
    Visibility(bool),
    Ambient(bool),
}

/// Requests from the face to the tick timer task.
pub enum TickCommand {
    Schedule { token: TickToken, delay_ms: u64 },
    Cancel,
}

pub static EVENTS: Channel<ThreadModeRawMutex, Event, 8> = Channel::new();
static TICK_COMMANDS: Signal<ThreadModeRawMutex, TickCommand> = Signal::new();

/// Host state owned by the watch face task.
pub struct FirmwareHost {
    timezone: FixedOffset,
    invalidated: bool,
}

impl FirmwareHost {
    pub fn new(timezone: FixedOffset) -> Self {
        Self {
            timezone,
            invalidated: false,
        }
    }

    /// Whether a redraw was requested since the last call.
    pub fn take_invalidated(&mut self) -> bool {
        core::mem::take(&mut self.invalidated)
    }
}

impl TickScheduler for FirmwareHost {
    fn schedule_tick(&mut self, token: TickToken, delay_ms: u64) {
        TICK_COMMANDS.signal(TickCommand::Schedule { token, delay_ms });
    }

    fn cancel_tick(&mut self) {
        TICK_COMMANDS.signal(TickCommand::Cancel);
    }
}

impl Host for FirmwareHost {
    fn invalidate(&mut self) {
        self.invalidated = true;
    }

    fn register_timezone_receiver(&mut self) {
        // The timezone is fixed at build time, nothing will ever be delivered
        defmt::debug!("Timezone receiver registered");
    }

    fn unregister_timezone_receiver(&mut self) {
        defmt::debug!("Timezone receiver unregistered");
    }

    fn set_active_complications(&mut self, ids: &[u8]) {
        defmt::info!("Active complications: {=[u8]}", ids);
    }

    fn set_default_complication_provider(
        &mut self,
        id: u8,
        provider: SystemProvider,
        kind: ComplicationType,
    ) {
        defmt::info!("Complication {} defaults to {} ({})", id, provider, kind);
    }

    fn default_timezone(&self) -> FixedOffset {
        self.timezone
    }
}

/// Delivers scheduled ticks back to the face as [`Event::Tick`].
///
/// A new command always replaces the pending deadline.
#[embassy_executor::task(pool_size = 1)]
pub async fn tick_timer() {
    let mut pending: Option<(TickToken, Instant)> = None;

    loop {
        let command = match pending {
            Some((token, deadline)) => match select(Timer::at(deadline), TICK_COMMANDS.wait()).await {
                Either::First(()) => {
                    pending = None;
                    EVENTS.send(Event::Tick(token)).await;
                    continue;
                }
                Either::Second(command) => command,
            },
            None => TICK_COMMANDS.wait().await,
        };

        pending = match command {
            TickCommand::Schedule { token, delay_ms } => {
                Some((token, Instant::now() + Duration::from_millis(delay_ms)))
            }
            TickCommand::Cancel => None,
        };
    }
}
