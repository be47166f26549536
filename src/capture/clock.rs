use std::time::Duration;

/// Period of one countdown step.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// The single tick source that drives the capture countdown.
pub trait Ticker {
    /// Block until the next tick is due.
    fn wait_tick(&mut self);
}

/// Wall-clock ticker sleeping a fixed period between ticks.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTicker {
    period: Duration,
}

impl IntervalTicker {
    /// Ticker with a custom period.
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

impl Ticker for IntervalTicker {
    fn wait_tick(&mut self) {
        std::thread::sleep(self.period);
    }
}

/// Ticker that never sleeps; counts how often it was asked to wait.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualTicker {
    ticks: u64,
}

impl ManualTicker {
    /// Fresh ticker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks delivered so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Ticker for ManualTicker {
    fn wait_tick(&mut self) {
        self.ticks += 1;
    }
}
