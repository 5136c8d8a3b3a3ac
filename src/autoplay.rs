// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CRPC Protocol Simulator - Autoplay Ticker
//
// Host-driven interval timer. The host reports elapsed time through `poll`;
// at most one handle is live, and `cancel` takes effect immediately.

/// Default autoplay cadence in milliseconds.
pub const AUTOPLAY_INTERVAL_MS: f64 = 3000.0;

/// Identity of an armed ticker. Re-arming issues a new generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerHandle {
    pub generation: u64,
}

#[derive(Debug, Clone)]
struct Armed {
    handle: TickerHandle,
    elapsed_ms: f64,
}

#[derive(Debug, Clone)]
pub struct AutoplayTicker {
    interval_ms: f64,
    armed: Option<Armed>,
    generation: u64,
}

impl AutoplayTicker {
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, armed: None, generation: 0 }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Arm a fresh interval, replacing any live handle.
    pub fn arm(&mut self) -> TickerHandle {
        self.generation += 1;
        let handle = TickerHandle { generation: self.generation };
        self.armed = Some(Armed { handle, elapsed_ms: 0.0 });
        handle
    }

    /// Drop the live handle, if any. Returns whether one was live.
    pub fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn handle(&self) -> Option<TickerHandle> {
        self.armed.as_ref().map(|a| a.handle)
    }

    /// Advance the clock by `elapsed_ms`. Fires at most once per call; the
    /// interval restarts from zero after firing so a long stall never bursts.
    pub fn poll(&mut self, elapsed_ms: f64) -> bool {
        let interval = self.interval_ms;
        match self.armed.as_mut() {
            Some(armed) => {
                armed.elapsed_ms += elapsed_ms.max(0.0);
                if armed.elapsed_ms >= interval {
                    armed.elapsed_ms = 0.0;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }
}

impl Default for AutoplayTicker {
    fn default() -> Self {
        Self::new(AUTOPLAY_INTERVAL_MS)
    }
}
