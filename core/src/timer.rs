use serde::{Deserialize, Serialize};

/// Identifies one run of the ticker, ticks carrying an older token are ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u32);

/// Whole-second game clock.
///
/// The timer does not own a clock source: whoever drives it calls [`Timer::tick`] once per second with the token
/// handed out by [`Timer::start`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    elapsed_secs: u32,
    generation: u32,
    running: bool,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stopped timer showing `elapsed_secs`.
    pub fn frozen_at(elapsed_secs: u32) -> Self {
        Self {
            elapsed_secs,
            ..Self::default()
        }
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Token of the live ticker, if any.
    pub fn token(&self) -> Option<TimerToken> {
        self.running.then_some(TimerToken(self.generation))
    }

    /// Starts ticking, cancelling a ticker that is already running.
    pub fn start(&mut self) -> TimerToken {
        self.stop();
        self.generation = self.generation.wrapping_add(1);
        self.running = true;
        log::debug!("Timer started, generation {}", self.generation);
        TimerToken(self.generation)
    }

    /// Stops the ticker, safe to call on a stopped timer.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::debug!("Timer stopped at {}s", self.elapsed_secs);
        }
    }

    pub fn reset(&mut self) {
        self.stop();
        self.elapsed_secs = 0;
    }

    /// Advances one second when `token` belongs to the running ticker.
    pub fn tick(&mut self, token: TimerToken) -> bool {
        if self.token() != Some(token) {
            log::trace!("Ignoring stale tick {:?}", token);
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        true
    }
}
