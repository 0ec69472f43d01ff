// Minimal PRNG (no external crates).
//
// This is NOT cryptographically secure.
// It is used only for maze carving and recovery jumps, where reproducibility
// from a seed matters more than statistical quality.

/// Source of uniform index choices.
///
/// The generator and navigator only ever need "pick one of `len` things", so this is
/// the whole seam between the algorithms and randomness. Swapping the source replays
/// a run exactly.
pub trait ChoiceSource {
    /// Returns an index in `0..len`. `len` is always at least 1.
    fn choose_index(&mut self, len: usize) -> usize;
}

impl<T: ChoiceSource + ?Sized> ChoiceSource for &mut T {
    fn choose_index(&mut self, len: usize) -> usize {
        (**self).choose_index(len)
    }
}

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // Avoid a zero state.
        let seed = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self { state: seed }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline]
    pub fn gen_range_usize(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        let span = (high - low) as u64;
        let v = self.next_u64() % span;
        low + v as usize
    }
}

impl ChoiceSource for Prng {
    fn choose_index(&mut self, len: usize) -> usize {
        self.gen_range_usize(0, len)
    }
}

/// Replays a fixed list of choices.
///
/// Each entry is reduced modulo the `len` it is asked for. Once the list runs out every
/// further choice is 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChoices {
    script: Vec<usize>,
    pos: usize,
}

impl ScriptedChoices {
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            pos: 0,
        }
    }

    /// Choices not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.pos)
    }
}

impl ChoiceSource for ScriptedChoices {
    fn choose_index(&mut self, len: usize) -> usize {
        let v = self.script.get(self.pos).copied().unwrap_or(0);
        self.pos = self.pos.saturating_add(1);
        if len == 0 {
            0
        } else {
            v % len
        }
    }
}

/// Wraps another source and logs every index it hands out.
#[derive(Debug, Clone)]
pub struct RecordingSource<R> {
    inner: R,
    log: Vec<usize>,
}

impl<R: ChoiceSource> RecordingSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            log: Vec::new(),
        }
    }

    pub fn log(&self) -> &[usize] {
        &self.log
    }

    /// The recorded choices, ready to feed into [`ScriptedChoices::new`].
    pub fn into_log(self) -> Vec<usize> {
        self.log
    }
}

impl<R: ChoiceSource> ChoiceSource for RecordingSource<R> {
    fn choose_index(&mut self, len: usize) -> usize {
        let v = self.inner.choose_index(len);
        self.log.push(v);
        v
    }
}
