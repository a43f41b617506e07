//! Minute-aligned redraw timer
//!
//! The timer runs only while the face is visible and interactive. Every
//! scheduled tick carries a fresh [`TickToken`]; a tick whose token is not
//! the one currently pending was cancelled and is dropped.

/// Identifies one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickToken(u32);

impl TickToken {
    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    /// A tick is pending
    Running { token: TickToken },
    /// Nothing is pending
    Stopped,
}

/// Host side of the timer: delivers a tick back after a delay.
pub trait TickScheduler {
    /// Deliver `token` back through the face's tick callback after `delay_ms`.
    /// Replaces any previously scheduled tick.
    fn schedule_tick(&mut self, token: TickToken, delay_ms: u64);

    /// Drop the scheduled tick, if any.
    fn cancel_tick(&mut self);
}

/// Whether the timer should be running for the given face state.
pub const fn should_run(visible: bool, ambient: bool) -> bool {
    visible && !ambient
}

/// Delay until the next multiple of `period_ms` on the wall clock.
///
/// Always in `(0, period_ms]`, so a tick landing exactly on the boundary
/// waits a full period instead of firing twice.
pub fn tick_delay_ms(now_ms: i64, period_ms: u64) -> u64 {
    let period = period_ms.max(1);
    let phase = now_ms.rem_euclid(period as i64) as u64;
    period - phase
}

/// Two-state timer with a single owned, cancellable pending tick.
#[derive(Debug)]
pub struct TickTimer {
    state: TimerState,
    generation: u32,
    period_ms: u64,
}

impl TickTimer {
    pub fn new(period_ms: u64) -> Self {
        Self {
            state: TimerState::Stopped,
            generation: 0,
            period_ms,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Re-evaluate the timer after the face's eligibility may have changed.
    ///
    /// Any pending tick is cancelled first. When eligible an immediate tick
    /// is scheduled, which redraws and aligns the cadence to the minute.
    pub fn update(&mut self, scheduler: &mut impl TickScheduler, eligible: bool) {
        self.cancel(scheduler);

        if eligible {
            self.schedule(scheduler, 0);
        }
    }

    /// Handle a delivered tick.
    ///
    /// Returns `true` when the face should be invalidated. Stale tokens
    /// return `false` and leave the timer untouched.
    pub fn on_tick(
        &mut self,
        scheduler: &mut impl TickScheduler,
        token: TickToken,
        eligible: bool,
        now_ms: i64,
    ) -> bool {
        if self.state != (TimerState::Running { token }) {
            trace!("Dropping stale tick {}", token.value());
            return false;
        }

        if eligible {
            let delay = tick_delay_ms(now_ms, self.period_ms);
            self.schedule(scheduler, delay);
        } else {
            self.state = TimerState::Stopped;
        }

        true
    }

    /// Cancel the pending tick, if any.
    pub fn cancel(&mut self, scheduler: &mut impl TickScheduler) {
        scheduler.cancel_tick();
        if self.is_running() {
            debug!("Timer stopped");
        }
        self.state = TimerState::Stopped;
    }

    fn schedule(&mut self, scheduler: &mut impl TickScheduler, delay_ms: u64) {
        self.generation = self.generation.wrapping_add(1);
        let token = TickToken(self.generation);
        scheduler.schedule_tick(token, delay_ms);
        self.state = TimerState::Running { token };
    }
}
