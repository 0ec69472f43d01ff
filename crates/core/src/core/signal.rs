//! Outbound event notifications.
//!
//! Signals are fire-and-forget: the core never waits for, or reads back from, a sink.
//! Timers, audio and UI layers decide for themselves how to react.

use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    NavigationStarted,
    NavigationFinished { success: bool },
    WallHit,
    GenerationFinished,
}

impl Signal {
    pub fn as_str(self) -> &'static str {
        match self {
            Signal::NavigationStarted => "navigation_started",
            Signal::NavigationFinished { success: true } => "navigation_finished_success",
            Signal::NavigationFinished { success: false } => "navigation_finished_failure",
            Signal::WallHit => "wall_hit",
            Signal::GenerationFinished => "generation_finished",
        }
    }
}

pub trait SignalSink {
    fn emit(&mut self, signal: Signal);
}

impl<T: SignalSink + ?Sized> SignalSink for &mut T {
    fn emit(&mut self, signal: Signal) {
        (**self).emit(signal)
    }
}

/// Drops every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SignalSink for NullSink {
    fn emit(&mut self, _signal: Signal) {}
}

/// Keeps every signal in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    signals: Vec<Signal>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn count(&self, signal: Signal) -> usize {
        self.signals.iter().filter(|&&s| s == signal).count()
    }

    /// Returns and forgets everything recorded so far.
    pub fn take(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }
}

impl SignalSink for RecordingSink {
    fn emit(&mut self, signal: Signal) {
        self.signals.push(signal);
    }
}

/// Logs each signal through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl SignalSink for TracingSink {
    fn emit(&mut self, signal: Signal) {
        info!(signal = signal.as_str(), "maze signal");
    }
}
