use crate::signal::{Signal, SignalSink};

/// Running counters for a [`crate::game::MazeGame`] session, fed from its signals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavStats {
    pub moves: u32,
    pub wall_hits: u32,
    pub runs_started: u32,
    pub runs_won: u32,
    pub generations: u32,
}

impl NavStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, signal: Signal) {
        match signal {
            Signal::NavigationStarted => self.runs_started = self.runs_started.saturating_add(1),
            Signal::NavigationFinished { success: true } => {
                self.runs_won = self.runs_won.saturating_add(1)
            }
            Signal::NavigationFinished { success: false } => {}
            Signal::WallHit => self.wall_hits = self.wall_hits.saturating_add(1),
            Signal::GenerationFinished => self.generations = self.generations.saturating_add(1),
        }
    }

    pub fn record_move(&mut self) {
        self.moves = self.moves.saturating_add(1);
    }

    /// Fraction of moves that ended in a collision (0 before the first move).
    pub fn collision_rate(&self) -> f32 {
        if self.moves == 0 {
            0.0
        } else {
            self.wall_hits as f32 / self.moves as f32
        }
    }
}

/// Forwards signals to `inner` after counting them into `stats`.
#[derive(Debug)]
pub struct StatsSink<'a, S> {
    stats: &'a mut NavStats,
    inner: &'a mut S,
}

impl<'a, S: SignalSink> StatsSink<'a, S> {
    pub fn new(stats: &'a mut NavStats, inner: &'a mut S) -> Self {
        Self { stats, inner }
    }
}

impl<S: SignalSink> SignalSink for StatsSink<'_, S> {
    fn emit(&mut self, signal: Signal) {
        self.stats.observe(signal);
        self.inner.emit(signal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_signals() {
        let mut s = NavStats::new();
        s.observe(Signal::NavigationStarted);
        s.observe(Signal::WallHit);
        s.observe(Signal::WallHit);
        s.observe(Signal::NavigationFinished { success: true });
        s.observe(Signal::GenerationFinished);
        for _ in 0..4 {
            s.record_move();
        }
        assert_eq!((s.runs_started, s.runs_won, s.generations), (1, 1, 1));
        assert_eq!(s.wall_hits, 2);
        assert_eq!(s.collision_rate(), 0.5);
        assert_eq!(NavStats::new().collision_rate(), 0.0);
    }

    #[test]
    fn stats_sink_counts_and_forwards() {
        use crate::signal::RecordingSink;

        let mut stats = NavStats::new();
        let mut inner = RecordingSink::new();
        let mut tee = StatsSink::new(&mut stats, &mut inner);
        tee.emit(Signal::WallHit);
        tee.emit(Signal::NavigationStarted);
        assert_eq!(stats.wall_hits, 1);
        assert_eq!(stats.runs_started, 1);
        assert_eq!(inner.signals(), &[Signal::WallHit, Signal::NavigationStarted]);
    }
}
