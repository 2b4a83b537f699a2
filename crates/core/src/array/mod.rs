use crate::Result;

/// Counts of the primitive operations performed during one sorting run.
///
/// Reset by the session at run start; the shuffle's own operations are never
/// attributed to the algorithm that follows it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub array_access: u64,
    pub comparisons: u64,
}

impl Counters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Indices touched by the operation behind a render event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touched {
    None,
    One(usize),
    Pair(usize, usize),
}

impl Touched {
    /// The index whose value drives the audio pitch.
    pub fn primary(self) -> Option<usize> {
        match self {
            Touched::None => None,
            Touched::One(i) | Touched::Pair(i, _) => Some(i),
        }
    }

    /// Whether `index` is one of the touched indices.
    pub fn contains(self, index: usize) -> bool {
        match self {
            Touched::None => false,
            Touched::One(i) => i == index,
            Touched::Pair(i, j) => i == index || j == index,
        }
    }
}

/// Capability invoked after every visible array operation.
///
/// Injected at construction so the array is testable without a canvas or
/// sink. Hooks may block (the pipeline writes a frame to the encoder), which
/// is why the visible primitives return [`Result`].
pub trait RenderHook {
    fn on_step(&mut self, values: &[u32], counters: &Counters, touched: Touched) -> Result<()>;
}

/// No-op hook for headless runs and tests.
impl RenderHook for () {
    fn on_step(&mut self, _values: &[u32], _counters: &Counters, _touched: Touched) -> Result<()> {
        Ok(())
    }
}

/// Value buffer plus scratch space behind instrumented access primitives.
///
/// The values are a permutation of `0..len` for the lifetime of a run; only
/// `write` and `swap` mutate them. Every `read`/`write`/`swap` fires the
/// render hook tagged with the touched indices; `compare` is silent.
/// Out-of-range indices are a programming error and panic.
#[derive(Debug)]
pub struct InstrumentedArray<H> {
    values: Vec<u32>,
    scratch: Vec<u32>,
    counters: Counters,
    hook: H,
}

impl<H: RenderHook> InstrumentedArray<H> {
    /// Creates an array holding the identity permutation `0..len`.
    pub fn new(len: usize, hook: H) -> Self {
        Self::with_values((0..len as u32).collect(), hook)
    }

    /// Creates an array over explicit contents.
    pub fn with_values(values: Vec<u32>, hook: H) -> Self {
        let scratch = vec![0; values.len()];
        Self {
            values,
            scratch,
            counters: Counters::default(),
            hook,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn reset_counters(&mut self) {
        self.counters.reset();
    }

    /// Rebuilds the identity permutation at the requested length.
    pub fn reset(&mut self, len: usize) {
        self.values.clear();
        self.values.extend(0..len as u32);
        self.scratch.clear();
        self.scratch.resize(len, 0);
    }

    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    /// Splits into array state and hook for callers that need both at once.
    pub fn parts_mut(&mut self) -> (&[u32], &Counters, &mut H) {
        (&self.values, &self.counters, &mut self.hook)
    }

    /// Returns `values[index]`; one access, renders tagged with `index`.
    pub fn read(&mut self, index: usize) -> Result<u32> {
        let value = self.values[index];
        self.counters.array_access += 1;
        self.trigger(Touched::One(index))?;
        Ok(value)
    }

    /// Sets `values[index]`; one access, renders tagged with `index`.
    pub fn write(&mut self, index: usize, value: u32) -> Result<()> {
        self.values[index] = value;
        self.counters.array_access += 1;
        self.trigger(Touched::One(index))
    }

    /// Returns the raw signed difference `values[i] - values[j]`. Callers
    /// rely on the sign only. Two accesses, one comparison, no render event.
    pub fn compare(&mut self, i: usize, j: usize) -> i64 {
        self.counters.array_access += 2;
        self.counters.comparisons += 1;
        i64::from(self.values[i]) - i64::from(self.values[j])
    }

    /// Exchanges two elements; two accesses, renders tagged with both.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.values.swap(i, j);
        self.counters.array_access += 2;
        self.trigger(Touched::Pair(i, j))
    }

    /// Fisher–Yates shuffle built on `swap`, so shuffling is itself visible
    /// and instrumented. The session resets the counters afterwards.
    pub fn shuffle(&mut self, rng: &mut fastrand::Rng) -> Result<()> {
        for i in 0..self.values.len().saturating_sub(1) {
            let remaining = self.values.len() - i;
            let offset = rng.usize(..remaining);
            self.swap(i, i + offset)?;
        }
        Ok(())
    }

    /// Fires the render hook without mutating or counting anything. The
    /// verification sweep uses this to animate the checked prefix.
    pub fn observe(&mut self, touched: Touched) -> Result<()> {
        self.trigger(touched)
    }

    /// Raw scratch read — staging space for merge runs and radix buckets,
    /// never instrumented, never rendered.
    pub fn scratch_read(&self, index: usize) -> u32 {
        self.scratch[index]
    }

    /// Raw scratch write, counterpart of [`Self::scratch_read`].
    pub fn scratch_write(&mut self, index: usize, value: u32) {
        self.scratch[index] = value;
    }

    fn trigger(&mut self, touched: Touched) -> Result<()> {
        self.hook.on_step(&self.values, &self.counters, touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHook {
        events: Vec<Touched>,
    }

    impl RenderHook for RecordingHook {
        fn on_step(&mut self, _: &[u32], _: &Counters, touched: Touched) -> Result<()> {
            self.events.push(touched);
            Ok(())
        }
    }

    #[test]
    fn read_and_write_count_one_access_each() {
        let mut array = InstrumentedArray::new(4, RecordingHook::default());

        let value = array.read(2).unwrap();
        assert_eq!(value, 2);
        array.write(2, 9).unwrap();

        assert_eq!(array.counters().array_access, 2);
        assert_eq!(array.counters().comparisons, 0);
        assert_eq!(
            array.hook_mut().events,
            vec![Touched::One(2), Touched::One(2)]
        );
    }

    #[test]
    fn swap_counts_two_accesses_and_tags_both_indices() {
        let mut array = InstrumentedArray::new(4, RecordingHook::default());

        array.swap(0, 3).unwrap();

        assert_eq!(array.values(), &[3, 1, 2, 0]);
        assert_eq!(array.counters().array_access, 2);
        assert_eq!(array.hook_mut().events, vec![Touched::Pair(0, 3)]);
    }

    #[test]
    fn compare_is_silent_and_keeps_the_sign() {
        let mut array = InstrumentedArray::with_values(vec![5, 2, 2], RecordingHook::default());

        assert!(array.compare(0, 1) > 0);
        assert!(array.compare(1, 0) < 0);
        assert_eq!(array.compare(1, 2), 0);

        assert_eq!(array.counters().array_access, 6);
        assert_eq!(array.counters().comparisons, 3);
        assert!(array.hook_mut().events.is_empty());
    }

    #[test]
    fn shuffle_preserves_the_permutation() {
        let mut array = InstrumentedArray::new(64, RecordingHook::default());
        let mut rng = fastrand::Rng::with_seed(7);

        array.shuffle(&mut rng).unwrap();

        let mut sorted = array.values().to_vec();
        sorted.sort_unstable();
        let identity: Vec<u32> = (0..64).collect();
        assert_eq!(sorted, identity);
        assert_eq!(array.hook_mut().events.len(), 63);
    }

    #[test]
    fn observe_renders_without_counting() {
        let mut array = InstrumentedArray::new(4, RecordingHook::default());

        array.observe(Touched::One(1)).unwrap();

        assert_eq!(*array.counters(), Counters::default());
        assert_eq!(array.hook_mut().events, vec![Touched::One(1)]);
    }

    #[test]
    fn reset_rebuilds_the_identity_permutation() {
        let mut array = InstrumentedArray::new(8, RecordingHook::default());
        let mut rng = fastrand::Rng::with_seed(3);
        array.shuffle(&mut rng).unwrap();

        array.reset(4);

        assert_eq!(array.values(), &[0, 1, 2, 3]);
    }
}
